//! Error types and recovery strategies for Bookshelf
//!
//! Every error carries a severity tier:
//! - **Recoverable**: the operation was refused and nothing changed (duplicate id, unknown id)
//! - **Degraded**: the catalog keeps working with less data (missing or malformed source file)
//! - **Fatal**: the settings file itself is unusable and needs the user's attention
//!
//! Each error also names a recovery action the driver can act on.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Recovery actions that can be taken when an error occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Ask the user for different input and try again
    CorrectInput,
    /// Continue with whatever the catalog already holds
    ContinueWithCurrent,
    /// Drop the offending record and keep loading
    SkipRecord,
    /// Replace the configuration with defaults
    RestoreDefaults,
    /// No automatic recovery - user intervention required
    UserIntervention,
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorrectInput => write!(f, "Correcting input"),
            Self::ContinueWithCurrent => write!(f, "Continuing with current catalog"),
            Self::SkipRecord => write!(f, "Skipping record"),
            Self::RestoreDefaults => write!(f, "Restoring defaults"),
            Self::UserIntervention => write!(f, "User intervention required"),
        }
    }
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Operation refused, state unchanged
    Recoverable,
    /// Catalog usable but incomplete
    Degraded,
    /// Critical error requiring user action
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recoverable => write!(f, "Recoverable"),
            Self::Degraded => write!(f, "Degraded"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Main error type for Bookshelf
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Catalog Errors =====
    /// A record id is already present in the catalog
    #[error("Duplicate id: {id} is already in use")]
    DuplicateId { id: i64 },

    /// No record matched the requested identifier
    #[error("Record not found: {entity} with {identifier}")]
    RecordNotFound { entity: String, identifier: String },

    /// A source line could not be turned into a record
    #[error("Malformed record in {source_name} at line {line}: {reason}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        reason: String,
    },

    // ===== File System Errors =====
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Permission denied for file operation
    #[error("Permission denied: {operation} on {path}")]
    PermissionDenied { operation: String, path: PathBuf },

    /// General I/O error
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration
    #[error("Invalid configuration: {setting} = '{value}' ({reason})")]
    InvalidConfiguration {
        setting: String,
        value: String,
        reason: String,
    },

    /// Configuration file could not be read or parsed
    #[error("Configuration corrupted: {path} ({reason})")]
    ConfigurationCorrupted { path: PathBuf, reason: String },
}

impl AppError {
    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateId { .. } | Self::RecordNotFound { .. } => ErrorSeverity::Recoverable,

            Self::MalformedRecord { .. }
            | Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::IoError { .. }
            | Self::InvalidConfiguration { .. } => ErrorSeverity::Degraded,

            Self::ConfigurationCorrupted { .. } => ErrorSeverity::Fatal,
        }
    }

    /// Returns the recommended recovery action for this error
    pub fn recovery_action(&self) -> RecoveryAction {
        match self {
            Self::DuplicateId { .. } | Self::RecordNotFound { .. } => RecoveryAction::CorrectInput,

            Self::FileNotFound { .. } | Self::IoError { .. } => {
                RecoveryAction::ContinueWithCurrent
            }

            Self::MalformedRecord { .. } => RecoveryAction::SkipRecord,

            Self::InvalidConfiguration { .. } | Self::ConfigurationCorrupted { .. } => {
                RecoveryAction::RestoreDefaults
            }

            Self::PermissionDenied { .. } => RecoveryAction::UserIntervention,
        }
    }

    /// Returns a user-friendly error message suitable for the menu
    pub fn user_message(&self) -> String {
        match self {
            Self::DuplicateId { id } => {
                format!("Cannot add the book. ID {} is already in use.", id)
            }
            Self::RecordNotFound { entity, identifier } => {
                format!("{} with ID {} not found.", entity, identifier)
            }
            Self::MalformedRecord { line, .. } => {
                format!("The book file has an unreadable entry on line {}.", line)
            }
            Self::FileNotFound { path } => format!("File not found: {}", path.display()),
            Self::PermissionDenied { .. } => {
                "Permission denied. Please check the file's access rights.".to_string()
            }
            Self::IoError { .. } => "A file operation failed. Please try again.".to_string(),
            Self::InvalidConfiguration { setting, .. } => {
                format!("Invalid setting: {}. Please check your configuration.", setting)
            }
            Self::ConfigurationCorrupted { .. } => {
                "Settings are corrupted. Run 'bookshelf config init --force' to reset them."
                    .to_string()
            }
        }
    }

    /// Returns true if this error should be logged at ERROR level
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }

    /// Helper to create an I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::IoError {
            message: message.into(),
            source,
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound {
                path: PathBuf::from("unknown"),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                operation: "file operation".to_string(),
                path: PathBuf::from("unknown"),
            },
            _ => Self::IoError {
                message: err.to_string(),
                source: err,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_severity_ordering() {
        assert!(ErrorSeverity::Recoverable < ErrorSeverity::Degraded);
        assert!(ErrorSeverity::Degraded < ErrorSeverity::Fatal);
    }

    #[test]
    fn test_duplicate_id_is_recoverable() {
        let err = AppError::DuplicateId { id: 7 };
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
        assert_eq!(err.recovery_action(), RecoveryAction::CorrectInput);
        assert_eq!(
            err.user_message(),
            "Cannot add the book. ID 7 is already in use."
        );
        assert!(!err.is_critical());
    }

    #[test]
    fn test_record_not_found_message() {
        let err = AppError::RecordNotFound {
            entity: "Book".to_string(),
            identifier: "99".to_string(),
        };
        assert_eq!(err.user_message(), "Book with ID 99 not found.");
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
    }

    #[test]
    fn test_missing_file_degrades() {
        let err = AppError::FileNotFound {
            path: PathBuf::from("/books.txt"),
        };
        assert_eq!(err.severity(), ErrorSeverity::Degraded);
        assert_eq!(err.recovery_action(), RecoveryAction::ContinueWithCurrent);
        assert!(err.user_message().contains("/books.txt"));
    }

    #[test]
    fn test_malformed_record_display() {
        let err = AppError::MalformedRecord {
            source_name: "books.txt".to_string(),
            line: 3,
            reason: "expected 3 fields, found 2".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("books.txt"));
        assert!(display.contains("line 3"));
        assert_eq!(err.recovery_action(), RecoveryAction::SkipRecord);
    }

    #[test]
    fn test_configuration_corrupted_is_fatal() {
        let err = AppError::ConfigurationCorrupted {
            path: PathBuf::from("/config.toml"),
            reason: "expected `]`".to_string(),
        };
        assert!(err.is_critical());
        assert!(err.to_string().contains("expected `]`"));
        assert_eq!(err.recovery_action(), RecoveryAction::RestoreDefaults);
    }

    #[test]
    fn test_from_io_error_not_found() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let app_err: AppError = io_err.into();

        assert!(matches!(app_err, AppError::FileNotFound { .. }));
    }

    #[test]
    fn test_from_io_error_permission_denied() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let app_err: AppError = io_err.into();

        assert!(matches!(app_err, AppError::PermissionDenied { .. }));
    }

    #[test]
    fn test_from_io_error_other() {
        let io_err = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let app_err: AppError = io_err.into();

        assert!(matches!(app_err, AppError::IoError { .. }));
        assert!(app_err.source().is_some());
    }

    #[test]
    fn test_io_helper_keeps_source() {
        let err = AppError::io("reading books.txt", io::Error::other("boom"));
        assert!(err.to_string().contains("reading books.txt"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_recovery_action_display() {
        assert_eq!(RecoveryAction::SkipRecord.to_string(), "Skipping record");
        assert_eq!(
            RecoveryAction::UserIntervention.to_string(),
            "User intervention required"
        );
    }
}
