// FILE: crates/library/src/parser.rs

//! Record-line parsing for catalog source files
//!
//! A source line is `id,title,author`. Fields are split on the literal comma
//! and trimmed. There is no quoting, so a comma can never appear inside a
//! field; anything after the third field is ignored.

use bookshelf_core::{Book, BookId};
use thiserror::Error;

/// Why a single line could not become a [`Book`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 3 comma-separated fields (id,title,author), found {found}")]
    MissingFields { found: usize },

    #[error("id '{value}' is not a whole number")]
    InvalidId { value: String },

    #[error("{field} is empty")]
    EmptyField { field: &'static str },
}

/// Returns true for lines that carry no record at all
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Parses one non-blank source line into a book
pub fn parse_record(line: &str) -> Result<Book, RecordError> {
    let mut fields = line.split(',').map(str::trim);

    // split always yields at least one item
    let raw_id = fields.next().unwrap_or_default();
    let title = fields.next().ok_or(RecordError::MissingFields { found: 1 })?;
    let author = fields.next().ok_or(RecordError::MissingFields { found: 2 })?;

    let extra = fields.count();
    if extra > 0 {
        log::debug!("Ignoring {} extra field(s) in record '{}'", extra, raw_id);
    }

    let id: BookId = raw_id.parse().map_err(|_| RecordError::InvalidId {
        value: raw_id.to_string(),
    })?;

    if title.is_empty() {
        return Err(RecordError::EmptyField { field: "title" });
    }
    if author.is_empty() {
        return Err(RecordError::EmptyField { field: "author" });
    }

    Ok(Book::new(id, title, author))
}
