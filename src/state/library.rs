//! Saved books, deduplicated by title

use crate::backend::Book;

/// Books the user bookmarked this session, in the order they were saved.
///
/// Titles are unique. Saving a title that is already present is a no-op and
/// never updates the stored entry.
#[derive(Debug, Default)]
pub struct SavedCollection {
    books: Vec<Book>,
}

impl SavedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the book was added
    pub fn save(&mut self, book: &Book) -> bool {
        if self.contains(&book.title) {
            tracing::debug!("'{}' already saved", book.title);
            return false;
        }

        tracing::info!("Saved '{}' to library", book.title);
        self.books.push(book.without_match_reason());
        true
    }

    pub fn contains(&self, title: &str) -> bool {
        self.books.iter().any(|saved| saved.title == title)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
