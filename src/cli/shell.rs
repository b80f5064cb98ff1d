//! Interactive menu loop.
//!
//! Reads one command at a time, collects its arguments, calls into the
//! library and prints the outcome. Malformed input is re-prompted here so the
//! core only ever sees well-formed values. End of input is treated as Exit.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::debug;

use super::render::{self, Action};
use crate::config::ShellSettings;
use crate::core::Library;
use crate::domain::EventType;

/// Menu entries, numbered as displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListBooks,
    SearchByAuthor,
    ListPatrons,
    Checkout,
    Return,
    PatronHoldings,
    AddBook,
    AddPatron,
    History,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 10] = [
        MenuChoice::ListBooks,
        MenuChoice::SearchByAuthor,
        MenuChoice::ListPatrons,
        MenuChoice::Checkout,
        MenuChoice::Return,
        MenuChoice::PatronHoldings,
        MenuChoice::AddBook,
        MenuChoice::AddPatron,
        MenuChoice::History,
        MenuChoice::Exit,
    ];

    /// Map a 1-based menu number to an entry
    pub fn from_number(n: i64) -> Option<Self> {
        let idx = usize::try_from(n).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::ListBooks => "List all books",
            MenuChoice::SearchByAuthor => "Search for books by author",
            MenuChoice::ListPatrons => "List all patrons",
            MenuChoice::Checkout => "Check out a book",
            MenuChoice::Return => "Return a book",
            MenuChoice::PatronHoldings => "View books checked out by a patron",
            MenuChoice::AddBook => "Add a new book",
            MenuChoice::AddPatron => "Add a new patron",
            MenuChoice::History => "View circulation history",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// The interactive shell over arbitrary input and output streams
pub struct Shell<R, W> {
    input: R,
    output: W,
    settings: ShellSettings,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, settings: ShellSettings) -> Self {
        Self {
            input,
            output,
            settings,
        }
    }

    /// Give back the output stream (used by tests to inspect what was written)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until Exit is chosen or input ends
    pub fn run(&mut self, library: &mut Library) -> Result<()> {
        loop {
            if self.settings.show_menu {
                self.print_menu()?;
            }

            let prompt = self.settings.prompt.clone();
            let Some(number) = self.read_number::<i64>(&prompt)? else {
                debug!("Input closed, leaving shell");
                break;
            };

            let Some(choice) = MenuChoice::from_number(number) else {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            };

            debug!(?choice, "Menu command");
            if choice == MenuChoice::Exit {
                writeln!(self.output, "Exiting program. Goodbye!")?;
                break;
            }

            if !self.dispatch(choice, library)? {
                debug!("Input closed mid-command, leaving shell");
                break;
            }
        }

        self.output.flush().context("Failed to flush output")
    }

    /// Execute one command. Returns false if input ended while collecting
    /// its arguments.
    fn dispatch(&mut self, choice: MenuChoice, library: &mut Library) -> Result<bool> {
        match choice {
            MenuChoice::ListBooks => render::books(&mut self.output, library.catalog())?,
            MenuChoice::SearchByAuthor => {
                let Some(author) = self.read_text("Enter the author's name: ")? else {
                    return Ok(false);
                };
                render::author_search(&mut self.output, library.catalog(), &author)?;
            }
            MenuChoice::ListPatrons => render::patrons(&mut self.output, library.roster())?,
            MenuChoice::Checkout => return self.circulate(library, EventType::CheckedOut),
            MenuChoice::Return => return self.circulate(library, EventType::Returned),
            MenuChoice::PatronHoldings => {
                let Some(patron_id) = self.read_text("Enter patron ID: ")? else {
                    return Ok(false);
                };
                match library.holdings_report(&patron_id) {
                    Ok(report) => render::holdings(&mut self.output, &report)?,
                    Err(err) => writeln!(self.output, "{}", render::failure(Action::Holdings, &err))?,
                }
            }
            MenuChoice::AddBook => {
                let Some(title) = self.read_required("Enter book title: ")? else {
                    return Ok(false);
                };
                let Some(author) = self.read_text("Enter author's name: ")? else {
                    return Ok(false);
                };
                let Some(year) = self.read_number::<i32>("Enter publication year: ")? else {
                    return Ok(false);
                };
                library.add_book(&title, &author, year);
                writeln!(self.output, "Book added successfully: {}", title)?;
            }
            MenuChoice::AddPatron => {
                let Some(name) = self.read_text("Enter patron name: ")? else {
                    return Ok(false);
                };
                let Some(id) = self.read_required("Enter patron ID: ")? else {
                    return Ok(false);
                };
                library.add_patron(&name, &id);
                writeln!(self.output, "Patron added successfully: {}", name)?;
            }
            MenuChoice::History => render::journal(&mut self.output, library.journal())?,
            MenuChoice::Exit => {}
        }

        Ok(true)
    }

    /// Collect patron ID and title, then check out or return
    fn circulate(&mut self, library: &mut Library, kind: EventType) -> Result<bool> {
        let (action, title_prompt) = match kind {
            EventType::CheckedOut => (Action::Checkout, "Enter the title of the book to check out: "),
            EventType::Returned => (Action::Return, "Enter the title of the book to return: "),
        };

        let Some(patron_id) = self.read_text("Enter patron ID: ")? else {
            return Ok(false);
        };
        let Some(title) = self.read_text(title_prompt)? else {
            return Ok(false);
        };

        let outcome = match kind {
            EventType::CheckedOut => library.checkout(&patron_id, &title),
            EventType::Returned => library.return_book(&patron_id, &title),
        };
        let message = match outcome {
            Ok(receipt) => render::receipt(kind, &receipt),
            Err(err) => render::failure(action, &err),
        };
        writeln!(self.output, "{}", message)?;

        Ok(true)
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- Library Management System Menu ---")?;
        for (idx, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, choice.label())?;
        }
        Ok(())
    }

    /// Prompt and read one trimmed line; `None` at end of input
    fn read_text(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;

        if read == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like `read_text`, re-prompting until the answer is non-empty
    fn read_required(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            match self.read_text(prompt)? {
                Some(text) if text.is_empty() => {
                    writeln!(self.output, "Input cannot be empty.")?;
                }
                other => return Ok(other),
            }
        }
    }

    /// Re-prompt until the answer parses as a number
    fn read_number<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>> {
        loop {
            let Some(text) = self.read_text(prompt)? else {
                return Ok(None);
            };
            match text.parse::<T>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => writeln!(self.output, "Invalid input. Please enter a number.")?,
            }
        }
    }
}
