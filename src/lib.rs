//! # RSO Packager
//!
//! Assembles RSO deployment packages for point-of-sale terminals.
//!
//! Given a JSON input file and four staging folders of forms and firmware,
//! the packager builds a package tree with install and rollback scripts,
//! readme files, a changelog and a content manifest, then removes the
//! staging folders.
//!
//! ## Usage
//!
//! ```bash
//! rso_packager package.json
//! rso_packager --work-dir /srv/staging package.json
//! rso_packager --hash-command "hashdeep -r -j0" package.json
//! ```
//!
//! ## Library
//!
//! ```no_run
//! use rso_packager::{PackageBuilder, RunLog, load_metadata};
//! use std::path::Path;
//!
//! # fn example() -> rso_packager::Result<()> {
//! let log = RunLog::open(Path::new("logs"))?;
//! let metadata = load_metadata(Path::new("package.json"))?;
//! let report = PackageBuilder::new(".").build(metadata, &log)?;
//! println!("Created {}", report.root().display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod error;
pub mod input;
pub mod logging;
pub mod manifest;
pub mod package;
pub mod templates;
pub mod utils;

// Re-export main types for public API
pub use error::{InputError, ManifestError, PackageError, Result};
pub use input::{PackageInput, PackageMetadata, load_metadata};
pub use logging::RunLog;
pub use manifest::{HashBackend, ManifestHasher};
pub use package::{BuildReport, ContentMix, PackageBuilder, PackageContext, PackageLayout};
