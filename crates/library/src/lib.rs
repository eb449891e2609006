//! Bookshelf catalog
//!
//! Holds the in-memory book collection and loads it from `id,title,author`
//! text files. Loading, adding, removing, and listing all go through
//! [`Catalog`].

pub mod catalog;
pub mod error;
pub mod parser;

pub use bookshelf_config::MalformedPolicy;
pub use catalog::{Books, Catalog, Listing, LoadReport, SkippedLine};
pub use error::{LibraryError, LibraryResult};
pub use parser::{parse_record, RecordError};
