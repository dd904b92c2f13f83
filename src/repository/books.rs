//! In-memory book store.
//!
//! The sole mutable state of the server. The collection is an ordered
//! sequence: insertion order is preserved and is the iteration order for
//! listing. The store exposes an explicit API instead of the raw vector so
//! callers cannot bypass the record invariants.

use crate::models::Book;

/// Ordered, process-local collection of book records
#[derive(Debug, Default)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Append a record at the end of the sequence.
    pub fn push(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Find a record by id.
    pub fn find(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Position of the record with the given id, if present.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Book> {
        self.books.get(index)
    }

    /// Replace the record at `index` wholesale.
    pub fn replace_at(&mut self, index: usize, book: Book) {
        self.books[index] = book;
    }

    /// Remove the record at `index`, preserving the order of the rest.
    pub fn remove_at(&mut self, index: usize) -> Book {
        self.books.remove(index)
    }

    /// Iterate over all records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book::{generate_id, BookPayload};
    use chrono::Utc;

    fn sample(name: &str) -> Book {
        let payload = BookPayload {
            name: Some(name.to_string()),
            ..Default::default()
        };
        Book::from_payload(generate_id(), payload, Utc::now())
    }

    #[test]
    fn push_then_find_by_id() {
        let mut store = BookStore::new();
        let book = sample("Neuromancer");
        let id = book.id.clone();
        store.push(book);

        assert_eq!(store.len(), 1);
        assert_eq!(store.find(&id).map(|b| b.name.as_str()), Some("Neuromancer"));
        assert!(store.find("no-such-id").is_none());
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut store = BookStore::new();
        for name in ["a", "b", "c"] {
            store.push(sample(name));
        }
        let middle = store.iter().nth(1).map(|b| b.id.clone()).unwrap();

        let index = store.position(&middle).unwrap();
        store.remove_at(index);

        let names: Vec<_> = store.iter().map(|b| b.name.clone()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn replace_keeps_the_slot() {
        let mut store = BookStore::new();
        store.push(sample("a"));
        store.push(sample("b"));

        let mut replacement = store.get(0).cloned().unwrap();
        replacement.name = "a2".to_string();
        store.replace_at(0, replacement);

        let names: Vec<_> = store.iter().map(|b| b.name.clone()).collect();
        assert_eq!(names, ["a2", "b"]);
    }
}
