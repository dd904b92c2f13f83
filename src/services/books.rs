//! Bookshelf service: validation and mutation logic for book records.
//!
//! Each operation validates its input, takes the store lock once, performs
//! at most one linear pass over the records, and returns a result for the
//! handler to wrap into a response envelope. Operations never call each
//! other.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::book::{generate_id, Book, BookPayload, BookQuery, BookSummary},
    repository::BookStore,
};

/// Owns the book store and implements the five record operations.
///
/// Handlers run concurrently, so every operation holds the lock for its
/// whole scan+mutate critical section. Nothing awaits or blocks while
/// holding it.
#[derive(Default)]
pub struct BookshelfService {
    store: Mutex<BookStore>,
}

impl BookshelfService {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, BookStore> {
        // Poisoning would mean another handler panicked mid-operation;
        // nothing sensible is left to do but propagate.
        self.store.lock().expect("book store mutex poisoned")
    }

    /// Validate a candidate payload. First failure wins.
    fn validate(payload: &BookPayload) -> Result<(), &'static str> {
        match payload.name.as_deref() {
            None | Some("") => return Err("Book name is required"),
            Some(_) => {}
        }
        if payload.read_page > payload.page_count {
            return Err("readPage must not be greater than pageCount");
        }
        Ok(())
    }

    /// Create a new book record and return its id.
    pub fn create_book(&self, payload: BookPayload) -> AppResult<String> {
        if let Err(reason) = Self::validate(&payload) {
            return Err(AppError::Validation(format!("Failed to add book. {reason}")));
        }

        let id = generate_id();
        let book = Book::from_payload(id.clone(), payload, Utc::now());

        let mut store = self.store();
        store.push(book);

        // Read-your-write guard: the record must be retrievable right after
        // the append. A miss here is a store-invariant violation.
        if store.find(&id).is_none() {
            return Err(AppError::Consistency(format!(
                "book {id} not retrievable after insert"
            )));
        }

        tracing::info!(book_id = %id, "book added");
        Ok(id)
    }

    /// List books matching the query, projected to `{id, name, publisher}`.
    /// Filters compose by logical AND; the result keeps insertion order.
    pub fn list_books(&self, query: &BookQuery) -> Vec<BookSummary> {
        let name_needle = query.name.as_deref().map(str::to_lowercase);
        let reading = query.reading_filter();
        let finished = query.finished_filter();

        self.store()
            .iter()
            .filter(|book| {
                name_needle
                    .as_deref()
                    .map_or(true, |needle| book.name.to_lowercase().contains(needle))
            })
            .filter(|book| reading.map_or(true, |want| book.reading == want))
            .filter(|book| finished.map_or(true, |want| book.finished == want))
            .map(BookSummary::from)
            .collect()
    }

    /// Get the full record with the given id.
    pub fn get_book(&self, id: &str) -> AppResult<Book> {
        self.store()
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }

    /// Update the record with the given id in place.
    pub fn update_book(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        let mut store = self.store();

        let index = store.position(id).ok_or_else(|| {
            AppError::NotFound("Failed to update book. Id not found".to_string())
        })?;

        if let Err(reason) = Self::validate(&payload) {
            return Err(AppError::Validation(format!(
                "Failed to update book. {reason}"
            )));
        }

        let mut book = store.get(index).cloned().ok_or_else(|| {
            AppError::Consistency(format!("book at index {index} vanished mid-update"))
        })?;
        book.apply(payload, Utc::now());
        store.replace_at(index, book);

        tracing::info!(book_id = %id, "book updated");
        Ok(())
    }

    /// Delete the record with the given id.
    pub fn delete_book(&self, id: &str) -> AppResult<()> {
        let mut store = self.store();

        match store.position(id) {
            Some(index) => {
                store.remove_at(index);
                tracing::info!(book_id = %id, "book deleted");
                Ok(())
            }
            None => Err(AppError::NotFound(
                "Failed to delete book. Id not found".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, page_count: i32, read_page: i32, reading: bool) -> BookPayload {
        BookPayload {
            name: Some(name.to_string()),
            year: 2005,
            author: Some("John Doe".to_string()),
            summary: Some("A summary".to_string()),
            publisher: Some("Dicoding Indonesia".to_string()),
            page_count,
            read_page,
            reading,
        }
    }

    fn query(name: Option<&str>, reading: Option<&str>, finished: Option<&str>) -> BookQuery {
        BookQuery {
            name: name.map(str::to_string),
            reading: reading.map(str::to_string),
            finished: finished.map(str::to_string),
        }
    }

    #[test]
    fn create_derives_finished_and_returns_id() {
        let service = BookshelfService::new();
        let id = service.create_book(payload("A", 100, 100, false)).unwrap();
        assert_eq!(id.len(), 16);

        let book = service.get_book(&id).unwrap();
        assert!(book.finished);
        assert_eq!(book.inserted_at, book.updated_at);
    }

    #[test]
    fn create_rejects_missing_or_empty_name() {
        let service = BookshelfService::new();

        let mut missing = payload("x", 10, 5, false);
        missing.name = None;
        let err = service.create_book(missing).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service.create_book(payload("", 10, 5, false)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(service.store().is_empty());
    }

    #[test]
    fn create_rejects_read_page_beyond_page_count() {
        let service = BookshelfService::new();
        let err = service.create_book(payload("B", 100, 101, false)).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("readPage")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(service.store().is_empty());
    }

    #[test]
    fn name_check_runs_before_page_check() {
        let service = BookshelfService::new();
        let mut bad_both = payload("", 10, 99, false);
        bad_both.name = None;
        match service.create_book(bad_both).unwrap_err() {
            AppError::Validation(msg) => assert!(msg.contains("name")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn get_after_create_round_trips_the_input() {
        let service = BookshelfService::new();
        let id = service
            .create_book(payload("Clean Code", 464, 100, true))
            .unwrap();

        let book = service.get_book(&id).unwrap();
        assert_eq!(book.id, id);
        assert_eq!(book.name, "Clean Code");
        assert_eq!(book.year, 2005);
        assert_eq!(book.author.as_deref(), Some("John Doe"));
        assert_eq!(book.publisher.as_deref(), Some("Dicoding Indonesia"));
        assert_eq!(book.page_count, 464);
        assert_eq!(book.read_page, 100);
        assert!(book.reading);
        assert!(!book.finished);
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let service = BookshelfService::new();
        let err = service.get_book("aaaabbbbccccdddd").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn update_preserves_identity_and_recomputes_derived_fields() {
        let service = BookshelfService::new();
        let id = service.create_book(payload("Draft", 100, 10, true)).unwrap();
        let before = service.get_book(&id).unwrap();

        service
            .update_book(&id, payload("Final", 100, 100, false))
            .unwrap();

        let after = service.get_book(&id).unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.inserted_at, before.inserted_at);
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.name, "Final");
        assert!(after.finished);
        assert!(!after.reading);
    }

    #[test]
    fn update_unknown_id_is_not_found_before_validation() {
        let service = BookshelfService::new();
        // Invalid payload on a missing id must still report not-found.
        let err = service
            .update_book("aaaabbbbccccdddd", payload("", 10, 99, false))
            .unwrap_err();
        match err {
            AppError::NotFound(msg) => assert!(msg.contains("not found")),
            other => panic!("expected not-found error, got {other:?}"),
        }
    }

    #[test]
    fn update_with_bad_payload_leaves_record_untouched() {
        let service = BookshelfService::new();
        let id = service.create_book(payload("Keep", 100, 10, true)).unwrap();
        let before = service.get_book(&id).unwrap();

        let err = service
            .update_book(&id, payload("Changed", 100, 200, false))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert_eq!(service.get_book(&id).unwrap(), before);
    }

    #[test]
    fn delete_removes_exactly_one_record() {
        let service = BookshelfService::new();
        let first = service.create_book(payload("a", 10, 0, false)).unwrap();
        let second = service.create_book(payload("b", 10, 0, false)).unwrap();

        service.delete_book(&first).unwrap();

        assert!(matches!(
            service.get_book(&first).unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(service.get_book(&second).is_ok());
        assert_eq!(service.store().len(), 1);
    }

    #[test]
    fn delete_unknown_id_is_not_found_and_store_unchanged() {
        let service = BookshelfService::new();
        service.create_book(payload("only", 10, 0, false)).unwrap();

        let err = service.delete_book("aaaabbbbccccdddd").unwrap_err();
        match err {
            AppError::NotFound(msg) => assert!(msg.contains("not found")),
            other => panic!("expected not-found error, got {other:?}"),
        }
        assert_eq!(service.store().len(), 1);
    }

    #[test]
    fn list_without_filters_keeps_insertion_order_and_projects() {
        let service = BookshelfService::new();
        for name in ["first", "second", "third"] {
            service.create_book(payload(name, 10, 0, false)).unwrap();
        }

        let books = service.list_books(&query(None, None, None));
        let names: Vec<_> = books.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert_eq!(books[0].publisher.as_deref(), Some("Dicoding Indonesia"));
    }

    #[test]
    fn list_name_filter_is_case_insensitive_substring() {
        let service = BookshelfService::new();
        service
            .create_book(payload("Dicoding Bookshelf", 10, 0, false))
            .unwrap();
        service.create_book(payload("Other", 10, 0, false)).unwrap();

        let books = service.list_books(&query(Some("DICODING"), None, None));
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].name, "Dicoding Bookshelf");
    }

    #[test]
    fn list_filters_compose_by_and() {
        let service = BookshelfService::new();
        // reading & finished
        service.create_book(payload("a", 10, 10, true)).unwrap();
        // reading & unfinished
        service.create_book(payload("b", 10, 5, true)).unwrap();
        // not reading
        service.create_book(payload("c", 10, 5, false)).unwrap();

        let books = service.list_books(&query(None, Some("1"), Some("0")));
        let names: Vec<_> = books.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["b"]);
    }

    #[test]
    fn list_treats_other_flag_values_as_no_filter() {
        let service = BookshelfService::new();
        service.create_book(payload("a", 10, 10, true)).unwrap();
        service.create_book(payload("b", 10, 5, false)).unwrap();

        let books = service.list_books(&query(None, Some("maybe"), Some("2")));
        assert_eq!(books.len(), 2);
    }

    #[test]
    fn list_is_empty_success_on_empty_store() {
        let service = BookshelfService::new();
        assert!(service.list_books(&query(None, None, None)).is_empty());
    }
}
