//! Book domain model

use crate::types::Validator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Caller-assigned identifier for a book
///
/// Identifiers are never generated; they come from the source file or from
/// the person adding a book.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    /// Wraps a raw integer identifier
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for BookId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl FromStr for BookId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single catalog entry
///
/// Fields are fixed at construction. The catalog owns every `Book` it holds
/// and hands out shared borrows only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
}

impl Book {
    /// Creates a book from caller-supplied fields without validating them
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    /// Canonical one-line rendering: `ID: {id}, Title: {title}, Author: {author}`
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}",
            self.id, self.title, self.author
        )
    }
}

impl Validator for Book {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title cannot be empty".to_string());
        }

        if self.author.trim().is_empty() {
            errors.push("Author cannot be empty".to_string());
        }

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

    #[test]
    fn test_book_id_from_str() {
        let id: BookId = "42".parse().unwrap();
        assert_eq!(id, BookId::new(42));
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn test_book_id_accepts_sign() {
        assert_eq!("-7".parse::<BookId>().unwrap().get(), -7);
        assert_eq!("+7".parse::<BookId>().unwrap().get(), 7);
    }

    #[test]
    fn test_book_id_rejects_text() {
        assert!("abc".parse::<BookId>().is_err());
        assert!("".parse::<BookId>().is_err());
        assert!("1.5".parse::<BookId>().is_err());
        assert!(" 1".parse::<BookId>().is_err());
    }

    #[test]
    fn test_book_id_display() {
        assert_eq!(BookId::new(1984).to_string(), "1984");
    }

    #[test]
    fn test_book_new() {
        let book = Book::new(BookId::new(1), "Dune", "Herbert");

        assert_eq!(book.id(), BookId::new(1));
        assert_eq!(book.title(), "Dune");
        assert_eq!(book.author(), "Herbert");
    }

    #[test]
    fn test_book_render() {
        let book = Book::new(BookId::new(2), "1984", "Orwell");
        assert_eq!(book.render(), "ID: 2, Title: 1984, Author: Orwell");
        assert_eq!(format!("{}", book), book.render());
    }

    #[test]
    fn test_book_render_keeps_inner_spacing() {
        let book = Book::new(BookId::new(3), "The Left Hand of Darkness", "Ursula K. Le Guin");
        assert_eq!(
            book.render(),
            "ID: 3, Title: The Left Hand of Darkness, Author: Ursula K. Le Guin"
        );
    }

    #[test]
    fn test_book_validation_success() {
        let book = Book::new(BookId::new(1), "Emma", "Austen");
        assert!(book.is_valid());
    }

    #[test]
    fn test_book_validation_blank_fields() {
        let book = Book::new(BookId::new(1), "   ", "");
        let errors = book.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Title"));
        assert!(errors[1].contains("Author"));
    }

    #[test]
    fn test_book_serializes_flat_id() {
        let book = Book::new(BookId::new(5), "Beloved", "Morrison");
        let json = serde_json::to_string(&book).unwrap();
        assert_eq!(json, r#"{"id":5,"title":"Beloved","author":"Morrison"}"#);
    }
}
