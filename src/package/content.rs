//! Content-category selection.
//!
//! Every generated document varies on whether a package carries forms,
//! firmware, or both. [`ContentMix`] is that choice as a closed enum so each
//! generator matches it exhaustively.

use std::fmt;

/// Which content categories a set of staged files contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMix {
    /// Forms and firmware
    Both,
    /// Forms only
    FormsOnly,
    /// Firmware only
    FirmwareOnly,
}

impl ContentMix {
    /// Classify from presence flags. `None` when neither category is present.
    pub fn detect(has_forms: bool, has_firmware: bool) -> Option<Self> {
        match (has_forms, has_firmware) {
            (true, true) => Some(ContentMix::Both),
            (true, false) => Some(ContentMix::FormsOnly),
            (false, true) => Some(ContentMix::FirmwareOnly),
            (false, false) => None,
        }
    }

    /// Whether forms are part of this mix
    pub fn has_forms(self) -> bool {
        matches!(self, ContentMix::Both | ContentMix::FormsOnly)
    }

    /// Whether firmware is part of this mix
    pub fn has_firmware(self) -> bool {
        matches!(self, ContentMix::Both | ContentMix::FirmwareOnly)
    }

    /// Noun for the content, singular when exactly one file is present.
    ///
    /// Forms read "form"/"forms", firmware reads "firmware file"/"firmware
    /// files", and a mix of both is simply "files".
    pub fn noun(self, count: usize) -> &'static str {
        match (self, count == 1) {
            (ContentMix::FormsOnly, true) => "form",
            (ContentMix::FormsOnly, false) => "forms",
            (ContentMix::FirmwareOnly, true) => "firmware file",
            (ContentMix::FirmwareOnly, false) => "firmware files",
            (ContentMix::Both, _) => "files",
        }
    }

    /// Short label used in headings
    pub fn label(self) -> &'static str {
        match self {
            ContentMix::Both => "forms and firmware",
            ContentMix::FormsOnly => "forms",
            ContentMix::FirmwareOnly => "firmware",
        }
    }
}

impl fmt::Display for ContentMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
