//! Validation system for configuration values
//!
//! Each config section implements [`ConfigSection`], which includes validation.

pub use crate::error::ValidationError;
use std::path::Path;

/// Trait for configuration sections that can validate themselves
pub trait ConfigSection: Default {
    /// Validates the configuration section
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Merges another config section into this one
    ///
    /// Values from `other` take precedence.
    fn merge(&mut self, other: Self);

    /// Returns the section name for error reporting
    fn section_name(&self) -> &'static str;
}

/// Common validators for config values
pub struct Validator;

impl Validator {
    /// Validates that a path is not empty
    pub fn path_not_empty(path: &Path, field: &str) -> Result<(), ValidationError> {
        if path.as_os_str().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// Validates that a path, if it exists, is not a directory
    ///
    /// Missing paths pass: the catalog reports them when it tries to load.
    pub fn not_a_directory(path: &Path, field: &str) -> Result<(), ValidationError> {
        if path.is_dir() {
            Err(ValidationError::with_value(
                field,
                "must point to a file, not a directory",
                path.display(),
            ))
        } else {
            Ok(())
        }
    }

    /// Collects multiple validation results into a single result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_path_not_empty() {
        assert!(Validator::path_not_empty(Path::new("books.txt"), "test").is_ok());
        assert!(Validator::path_not_empty(Path::new(""), "test").is_err());
    }

    #[test]
    fn test_not_a_directory_rejects_directory() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let err = Validator::not_a_directory(dir.path(), "catalog.source_path").unwrap_err();
        assert_eq!(err.field, "catalog.source_path");
        assert!(err.value.is_some());
    }

    #[test]
    fn test_not_a_directory_allows_missing_path() {
        let path = PathBuf::from("/this/path/definitely/does/not/exist.txt");
        assert!(Validator::not_a_directory(&path, "test").is_ok());
    }

    #[test]
    fn test_collect_errors_all_ok() {
        let results = vec![Ok(()), Ok(())];
        assert!(Validator::collect_errors(results).is_ok());
    }

    #[test]
    fn test_collect_errors_some_err() {
        let results = vec![
            Ok(()),
            Err(ValidationError::new("field1", "error1")),
            Err(ValidationError::new("field2", "error2")),
        ];
        let result = Validator::collect_errors(results);
        assert_eq!(result.unwrap_err().len(), 2);
    }
}
