//! Domain types for Bookshelf

mod book;

pub use book::{Book, BookId};

/// Trait for types that can validate themselves
pub trait Validator {
    /// Validates the instance and returns every problem found
    fn validate(&self) -> Result<(), Vec<String>>;

    /// Returns true if the instance is valid
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
