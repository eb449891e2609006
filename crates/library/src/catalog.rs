// FILE: crates/library/src/catalog.rs

use crate::error::{LibraryError, Result};
use crate::parser::{is_blank, parse_record, RecordError};
use bookshelf_config::{CatalogConfig, MalformedPolicy};
use bookshelf_core::{Book, BookId};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::slice;

/// In-memory book collection
///
/// Insertion order is iteration and display order. Ids added through
/// [`Catalog::insert`] are unique; bulk loads do not check them.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the configured source file, if there is one
    ///
    /// Returns `None` when no source path is configured.
    pub fn load_from_config(&mut self, config: &CatalogConfig) -> Option<Result<LoadReport>> {
        config
            .source_path
            .as_ref()
            .map(|path| self.bulk_load(path, config.on_malformed))
    }

    /// Appends every record in the text file at `path`
    ///
    /// The file is opened, read to the end, and closed before this returns.
    /// Any failure to open it is reported as [`LibraryError::FileNotFound`]
    /// and leaves the catalog untouched.
    pub fn bulk_load<P: AsRef<Path>>(
        &mut self,
        path: P,
        policy: MalformedPolicy,
    ) -> Result<LoadReport> {
        let path = path.as_ref();
        info!("Loading books from {}", path.display());

        let file = File::open(path).map_err(|source| {
            warn!("Cannot open {}: {}", path.display(), source);
            LibraryError::FileNotFound {
                path: path.to_path_buf(),
                source,
            }
        })?;

        self.bulk_load_from_reader(BufReader::new(file), &path.display().to_string(), policy)
    }

    /// Appends every record read from `reader`
    ///
    /// Under [`MalformedPolicy::Abort`] the load is all-or-nothing: the first
    /// bad line fails it and nothing is appended. Under
    /// [`MalformedPolicy::Skip`] bad lines are reported in the returned
    /// [`LoadReport`] and the rest are appended. A read error always fails
    /// the whole load.
    pub fn bulk_load_from_reader<R: BufRead>(
        &mut self,
        reader: R,
        source_name: &str,
        policy: MalformedPolicy,
    ) -> Result<LoadReport> {
        let mut staged = Vec::new();
        let mut skipped = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;

            if is_blank(&line) {
                continue;
            }

            match parse_record(&line) {
                Ok(book) => {
                    debug!("{}:{}: {}", source_name, line_no, book);
                    staged.push(book);
                }
                Err(reason) => match policy {
                    MalformedPolicy::Abort => {
                        warn!(
                            "Aborting load of {}: line {}: {}",
                            source_name, line_no, reason
                        );
                        return Err(LibraryError::MalformedRecord {
                            source_name: source_name.to_string(),
                            line: line_no,
                            content: line,
                            reason,
                        });
                    }
                    MalformedPolicy::Skip => {
                        warn!("Skipping {}:{}: {}", source_name, line_no, reason);
                        skipped.push(SkippedLine {
                            line: line_no,
                            content: line,
                            reason,
                        });
                    }
                },
            }
        }

        self.warn_on_duplicates(&staged, source_name);

        let loaded = staged.len();
        self.books.extend(staged);
        info!(
            "Loaded {} book(s) from {} ({} skipped, {} total)",
            loaded,
            source_name,
            skipped.len(),
            self.books.len()
        );

        Ok(LoadReport {
            source_name: source_name.to_string(),
            loaded,
            skipped,
        })
    }

    /// Bulk loads accept repeated ids; they are only reported.
    fn warn_on_duplicates(&self, staged: &[Book], source_name: &str) {
        let mut seen: HashSet<BookId> = self.books.iter().map(Book::id).collect();
        for book in staged {
            if !seen.insert(book.id()) {
                warn!(
                    "{} repeats ID {}; keeping both records",
                    source_name,
                    book.id()
                );
            }
        }
    }

    /// Adds a book unless its id is already in use
    pub fn insert(
        &mut self,
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Result<()> {
        if self.contains(id) {
            debug!("Refusing to add ID {}: already present", id);
            return Err(LibraryError::DuplicateId(id));
        }

        let book = Book::new(id, title, author);
        info!("Added {}", book);
        self.books.push(book);
        Ok(())
    }

    /// Removes the first book with `id` and returns it
    pub fn remove_by_id(&mut self, id: BookId) -> Result<Book> {
        let position = self
            .books
            .iter()
            .position(|book| book.id() == id)
            .ok_or(LibraryError::BookNotFound(id))?;

        let book = self.books.remove(position);
        info!("Removed {}", book);
        Ok(book)
    }

    /// Current contents in insertion order
    pub fn list_all(&self) -> Listing<'_> {
        if self.books.is_empty() {
            Listing::Empty
        } else {
            Listing::Books(Books { books: &self.books })
        }
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id() == id)
    }

    pub fn contains(&self, id: BookId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Outcome of a successful bulk load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub source_name: String,
    /// Records appended to the catalog
    pub loaded: usize,
    /// Lines dropped under [`MalformedPolicy::Skip`]
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            write!(f, "Books added successfully.")
        } else {
            write!(
                f,
                "Books added with problems: {} loaded, {} line(s) skipped.",
                self.loaded,
                self.skipped.len()
            )
        }
    }
}

/// A source line dropped during a tolerant load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub content: String,
    pub reason: RecordError,
}

impl fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line, self.reason, self.content)
    }
}

/// Result of [`Catalog::list_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing<'a> {
    /// The catalog holds no books
    Empty,
    /// Non-empty contents in insertion order
    Books(Books<'a>),
}

impl<'a> Listing<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }

    /// Iterates the listed books; yields nothing for [`Listing::Empty`]
    pub fn iter(&self) -> slice::Iter<'a, Book> {
        let books: &'a [Book] = match self {
            Listing::Empty => &[],
            Listing::Books(books) => books.as_slice(),
        };
        books.iter()
    }
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Empty => write!(f, "No books in the collection."),
            Listing::Books(books) => {
                write!(f, "Books in the collection:")?;
                for book in books {
                    write!(f, "\n{}", book)?;
                }
                Ok(())
            }
        }
    }
}

/// Borrowed, restartable view over a catalog's books
///
/// `Books` is `Copy`; every call to [`Books::iter`] starts from the first
/// book again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Books<'a> {
    books: &'a [Book],
}

impl<'a> Books<'a> {
    pub fn iter(&self) -> slice::Iter<'a, Book> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn as_slice(&self) -> &'a [Book] {
        self.books
    }
}

impl<'a> IntoIterator for Books<'a> {
    type Item = &'a Book;
    type IntoIter = slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}

impl<'a> IntoIterator for &Books<'a> {
    type Item = &'a Book;
    type IntoIter = slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}
