//! Catalog of all books held by the library.
//!
//! An ordered list searched linearly. Titles are not required to be unique;
//! lookups return the first match in insertion order.

use tracing::debug;

use crate::domain::{same_key, Book, BookRef};

/// Ordered collection of books
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an available book. Duplicate titles are accepted and shadowed
    /// by earlier entries on lookup.
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        publication_year: i32,
    ) -> BookRef {
        let book = Book::new(title, author, publication_year);
        debug!(title = %book.title, author = %book.author, publication_year, "Adding book");

        self.books.push(book);
        BookRef(self.books.len() - 1)
    }

    /// Get a book by handle
    pub fn get(&self, book: BookRef) -> &Book {
        &self.books[book.0]
    }

    pub(crate) fn get_mut(&mut self, book: BookRef) -> &mut Book {
        &mut self.books[book.0]
    }

    /// Find the first book whose title matches (case-insensitive)
    pub fn find_by_title(&self, title: &str) -> Option<BookRef> {
        self.books
            .iter()
            .position(|book| same_key(&book.title, title))
            .map(BookRef)
    }

    /// All books by an author (case-insensitive exact match), in insertion order
    pub fn find_all_by_author<'a>(&'a self, author: &'a str) -> impl Iterator<Item = BookRef> + 'a {
        self.books
            .iter()
            .enumerate()
            .filter(move |(_, book)| same_key(&book.author, author))
            .map(|(idx, _)| BookRef(idx))
    }

    /// All books in insertion order
    pub fn list_all(&self) -> impl Iterator<Item = BookRef> + '_ {
        (0..self.books.len()).map(BookRef)
    }

    /// Borrow the underlying records, in insertion order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Get the number of books
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
