//! Package input file: loading and field validation.
//!
//! The input is a JSON object with upper-case keys:
//!
//! ```json
//! {
//!   "PACKAGE_NAME": "Acme",
//!   "DATE": "2024-01-01",
//!   "BUSINESS_ITEM": "BI-1042",
//!   "PREREQUISITES": ["Terminal OS 4.2 or later"],
//!   "PACKAGE_DESCRIPTION": "Spring promotion forms"
//! }
//! ```
//!
//! Deserialization is lenient (every field optional) so that validation can
//! report all missing or malformed fields in one pass instead of stopping at
//! the first serde error.

use crate::error::{FieldError, InputError};
use crate::logging::LOG_DIR_NAME;
use crate::package::StagingArea;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Expected `DATE` format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// File name of the sample input written next to the staging folders
pub const SAMPLE_FILE_NAME: &str = "sample-input.json";

/// Characters Windows refuses in file names
const FORBIDDEN_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Raw input document as it appears on disk
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PackageInput {
    /// Package (and output folder) name
    pub package_name: Option<String>,
    /// Release date, `YYYY-MM-DD`
    pub date: Option<String>,
    /// Business item / change ticket id
    pub business_item: Option<String>,
    /// Human readable prerequisites
    pub prerequisites: Option<Vec<String>>,
    /// Free-text description
    pub package_description: Option<String>,
}

/// Validated package metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Package name, safe to use as a folder name
    pub name: String,
    /// Release date exactly as given
    pub date: String,
    /// Business item id
    pub business_item: String,
    /// Prerequisites in input order
    pub prerequisites: Vec<String>,
    /// Package description
    pub description: String,
}

impl PackageInput {
    /// Read and parse an input file.
    ///
    /// Checks the path exists, is a file, and carries a `.json` extension
    /// before reading it.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        if !path.is_file() {
            return Err(InputError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if !is_json {
            return Err(InputError::NotJson {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|source| InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents).map_err(|source| InputError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse input JSON text
    pub fn parse(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    /// Validate every field, collecting all failures
    pub fn validate(self) -> Result<PackageMetadata, InputError> {
        let mut errors = Vec::new();

        let name = required(&mut errors, "PACKAGE_NAME", self.package_name);
        if let Some(name) = &name
            && let Some(reason) = invalid_name_reason(name)
        {
            errors.push(FieldError::new("PACKAGE_NAME", reason));
        }

        let date = required(&mut errors, "DATE", self.date);
        if let Some(date) = &date
            && NaiveDate::parse_from_str(date, DATE_FORMAT).is_err()
        {
            errors.push(FieldError::new(
                "DATE",
                format!("'{date}' is not a valid date, expected YYYY-MM-DD"),
            ));
        }

        let business_item = required(&mut errors, "BUSINESS_ITEM", self.business_item);
        let description = required(&mut errors, "PACKAGE_DESCRIPTION", self.package_description);

        let prerequisites = match self.prerequisites {
            Some(list) => {
                for (index, item) in list.iter().enumerate() {
                    if item.trim().is_empty() {
                        errors.push(FieldError::new(
                            "PREREQUISITES",
                            format!("entry {index} must not be empty"),
                        ));
                    }
                }
                list.into_iter().map(|s| s.trim().to_string()).collect()
            }
            None => {
                errors.push(FieldError::new("PREREQUISITES", "missing (use [] for none)"));
                Vec::new()
            }
        };

        match (name, date, business_item, description) {
            (Some(name), Some(date), Some(business_item), Some(description))
                if errors.is_empty() =>
            {
                Ok(PackageMetadata {
                    name,
                    date,
                    business_item,
                    prerequisites,
                    description,
                })
            }
            _ => Err(InputError::InvalidFields(errors)),
        }
    }

    /// Example document written alongside usage text
    pub fn sample() -> Self {
        Self {
            package_name: Some("ExamplePackage".to_string()),
            date: Some("2024-01-01".to_string()),
            business_item: Some("BI-0000".to_string()),
            prerequisites: Some(vec!["Terminal application 2.0 or later".to_string()]),
            package_description: Some("Describe what this package changes".to_string()),
        }
    }
}

/// Load and validate in one step
pub fn load_metadata(path: &Path) -> Result<PackageMetadata, InputError> {
    PackageInput::load(path)?.validate()
}

/// Write [`PackageInput::sample`] into `dir` unless a sample already exists.
///
/// Returns the sample path when a file was written.
pub fn write_sample(dir: &Path) -> std::io::Result<Option<PathBuf>> {
    let path = dir.join(SAMPLE_FILE_NAME);
    if path.exists() {
        return Ok(None);
    }
    let json = serde_json::to_string_pretty(&PackageInput::sample())?;
    std::fs::write(&path, format!("{json}\n"))?;
    Ok(Some(path))
}

fn required(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: Option<String>,
) -> Option<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Some(v),
        Some(_) => {
            errors.push(FieldError::new(field, "must not be empty"));
            None
        }
        None => {
            errors.push(FieldError::new(field, "missing"));
            None
        }
    }
}

fn invalid_name_reason(name: &str) -> Option<String> {
    if name == "." || name == ".." {
        return Some(format!("'{name}' is not a usable folder name"));
    }
    if let Some(reserved) = reserved_work_dir_name(name) {
        return Some(format!(
            "'{name}' collides with '{reserved}' in the work directory"
        ));
    }
    if let Some(c) = name
        .chars()
        .find(|c| FORBIDDEN_NAME_CHARS.contains(c) || c.is_control())
    {
        return Some(format!("contains character {c:?} not allowed in a folder name"));
    }
    if name.ends_with('.') || name.ends_with(' ') {
        return Some("must not end with '.' or a space".to_string());
    }
    None
}

/// Work directory entry a package folder named `name` would land on.
///
/// Compared without case since Windows file names are case-insensitive.
fn reserved_work_dir_name(name: &str) -> Option<&'static str> {
    StagingArea::ALL
        .iter()
        .map(|area| area.folder_name())
        .chain([LOG_DIR_NAME, SAMPLE_FILE_NAME])
        .find(|reserved| reserved.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACME: &str = r#"{
        "PACKAGE_NAME": "Acme",
        "DATE": "2024-01-01",
        "BUSINESS_ITEM": "BI-1",
        "PREREQUISITES": ["OS 4.2"],
        "PACKAGE_DESCRIPTION": "New receipt form"
    }"#;

    #[test]
    fn test_valid_input() {
        let meta = PackageInput::parse(ACME).unwrap().validate().unwrap();
        assert_eq!(meta.name, "Acme");
        assert_eq!(meta.date, "2024-01-01");
        assert_eq!(meta.prerequisites, vec!["OS 4.2".to_string()]);
    }

    #[test]
    fn test_all_field_errors_collected() {
        let input = PackageInput::parse(r#"{"PACKAGE_NAME": "a/b", "DATE": "01/02/2024"}"#).unwrap();
        let Err(InputError::InvalidFields(errors)) = input.validate() else {
            panic!("expected field errors");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "PACKAGE_NAME",
                "DATE",
                "BUSINESS_ITEM",
                "PACKAGE_DESCRIPTION",
                "PREREQUISITES"
            ]
        );
    }

    #[test]
    fn test_empty_strings_rejected() {
        let mut input = PackageInput::sample();
        input.business_item = Some("   ".to_string());
        input.prerequisites = Some(vec![String::new()]);
        let Err(InputError::InvalidFields(errors)) = input.validate() else {
            panic!("expected field errors");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], FieldError::new("BUSINESS_ITEM", "must not be empty"));
        assert_eq!(errors[1].field, "PREREQUISITES");
    }

    #[test]
    fn test_empty_prerequisites_allowed() {
        let mut input = PackageInput::sample();
        input.prerequisites = Some(Vec::new());
        assert!(input.validate().unwrap().prerequisites.is_empty());
    }

    #[test]
    fn test_folder_name_rules() {
        assert!(invalid_name_reason("Acme 2024").is_none());
        assert!(invalid_name_reason("..").is_some());
        assert!(invalid_name_reason("a:b").is_some());
        assert!(invalid_name_reason("trailing.").is_some());
    }

    #[test]
    fn test_work_dir_entries_rejected_as_names() {
        for name in ["install-forms", "Rollback-Firmware", "LOGS", "sample-input.json"] {
            let reason = invalid_name_reason(name).unwrap();
            assert!(reason.contains("collides"), "{name}: {reason}");
        }
        assert!(invalid_name_reason("install-forms-2").is_none());

        let mut input = PackageInput::sample();
        input.package_name = Some("install-forms".to_string());
        let Err(InputError::InvalidFields(errors)) = input.validate() else {
            panic!("expected field errors");
        };
        assert_eq!(errors[0].field, "PACKAGE_NAME");
    }

    #[test]
    fn test_load_rejects_non_json_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, ACME).unwrap();
        assert!(matches!(
            PackageInput::load(&path),
            Err(InputError::NotJson { .. })
        ));
    }

    #[test]
    fn test_load_reports_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            PackageInput::load(&path),
            Err(InputError::Malformed { .. })
        ));
    }

    #[test]
    fn test_sample_round_trips_through_validation() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_sample(dir.path()).unwrap().unwrap();
        assert!(load_metadata(&written).is_ok());
        assert!(write_sample(dir.path()).unwrap().is_none());
    }
}
