// FILE: crates/library/src/error.rs

use crate::parser::RecordError;
use bookshelf_core::error::AppError;
use bookshelf_core::BookId;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by catalog operations
///
/// The `Display` text of each variant is the line shown to the user.
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed record in {source_name} on line {line}: {reason}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        content: String,
        #[source]
        reason: RecordError,
    },

    #[error("Cannot add the book. ID {0} is already in use.")]
    DuplicateId(BookId),

    #[error("Book with ID {0} not found.")]
    BookNotFound(BookId),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, LibraryError>;
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;

impl From<LibraryError> for AppError {
    fn from(err: LibraryError) -> Self {
        match err {
            LibraryError::FileNotFound { path, source } => match source.kind() {
                io::ErrorKind::PermissionDenied => AppError::PermissionDenied {
                    operation: "open catalog file".to_string(),
                    path,
                },
                _ => AppError::FileNotFound { path },
            },
            LibraryError::MalformedRecord {
                source_name,
                line,
                reason,
                ..
            } => AppError::MalformedRecord {
                source_name,
                line,
                reason: reason.to_string(),
            },
            LibraryError::DuplicateId(id) => AppError::DuplicateId { id: id.get() },
            LibraryError::BookNotFound(id) => AppError::RecordNotFound {
                entity: "Book".to_string(),
                identifier: id.to_string(),
            },
            LibraryError::Io(source) => AppError::io("reading catalog source", source),
        }
    }
}
