// FILE: crates/cli/src/menu.rs
//! Interactive numbered menu over a [`Catalog`]
//!
//! Input and output are generic so a whole session can be scripted.

use bookshelf_core::{AppError, Book, BookId, Validator};
use bookshelf_library::Catalog;
use console::style;
use std::io::{self, BufRead, Write};

const MENU: &str = "\nMenu:\n\
                    1. Add a new book\n\
                    2. Remove a book by ID\n\
                    3. Display all books\n\
                    4. Exit";

/// One parsed menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Add,
    Remove,
    Display,
    Exit,
}

impl Choice {
    /// Parses the user's answer to the menu prompt
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(Choice::Add),
            2 => Some(Choice::Remove),
            3 => Some(Choice::Display),
            4 => Some(Choice::Exit),
            _ => None,
        }
    }
}

pub struct Menu<'a, R, W> {
    catalog: &'a mut Catalog,
    input: R,
    output: W,
    styled: bool,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(catalog: &'a mut Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
            styled: false,
        }
    }

    /// Prefix outcome lines with colored status marks
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    /// Runs until the user exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(answer) = self.prompt("Enter your choice (1-4): ")? else {
                break;
            };

            match Choice::parse(&answer) {
                Some(Choice::Add) => {
                    if !self.add_book()? {
                        break;
                    }
                }
                Some(Choice::Remove) => {
                    if !self.remove_book()? {
                        break;
                    }
                }
                Some(Choice::Display) => self.display_books()?,
                Some(Choice::Exit) => break,
                None => writeln!(
                    self.output,
                    "Invalid choice. Please enter a number between 1 and 4."
                )?,
            }
        }

        writeln!(self.output, "Exiting the program.")?;
        self.output.flush()
    }

    /// Returns false when input ran out mid-dialog.
    fn add_book(&mut self) -> io::Result<bool> {
        writeln!(self.output, "\nEnter details to add a new book:")?;

        let Some(id) = self.prompt_id("Enter ID: ")? else {
            return Ok(false);
        };
        let Some(id) = id else {
            return Ok(true);
        };
        let Some(title) = self.prompt("Enter Title: ")? else {
            return Ok(false);
        };
        let Some(author) = self.prompt("Enter Author: ")? else {
            return Ok(false);
        };

        let draft = Book::new(id, title.trim(), author.trim());
        if let Err(problems) = draft.validate() {
            for problem in problems {
                self.failure(&problem)?;
            }
            return Ok(true);
        }

        match self.catalog.insert(id, draft.title(), draft.author()) {
            Ok(()) => self.success("New book added successfully.")?,
            Err(err) => self.report(err.into())?,
        }
        Ok(true)
    }

    fn remove_book(&mut self) -> io::Result<bool> {
        writeln!(self.output)?;
        let Some(id) = self.prompt_id("Enter ID to remove a book: ")? else {
            return Ok(false);
        };
        let Some(id) = id else {
            return Ok(true);
        };

        match self.catalog.remove_by_id(id) {
            Ok(_) => self.success("Book removed successfully.")?,
            Err(err) => self.report(err.into())?,
        }
        Ok(true)
    }

    fn display_books(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", self.catalog.list_all())
    }

    /// Prints `label` and reads one line; `None` at end of input
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Outer `None` is end of input; inner `None` is an unparseable id.
    fn prompt_id(&mut self, label: &str) -> io::Result<Option<Option<BookId>>> {
        let Some(answer) = self.prompt(label)? else {
            return Ok(None);
        };

        match answer.trim().parse::<BookId>() {
            Ok(id) => Ok(Some(Some(id))),
            Err(_) => {
                log::debug!("Rejected book id input {:?}", answer);
                self.failure("Invalid ID. Please enter a whole number.")?;
                Ok(Some(None))
            }
        }
    }

    fn report(&mut self, err: AppError) -> io::Result<()> {
        log::info!("{} ({:?})", err, err.recovery_action());
        self.failure(&err.user_message())
    }

    fn success(&mut self, message: &str) -> io::Result<()> {
        if self.styled {
            writeln!(self.output, "{} {}", style("✓").green().bold(), message)
        } else {
            writeln!(self.output, "{}", message)
        }
    }

    fn failure(&mut self, message: &str) -> io::Result<()> {
        if self.styled {
            writeln!(self.output, "{} {}", style("✗").red().bold(), message)
        } else {
            writeln!(self.output, "{}", message)
        }
    }
}
