//! Book record model and related types.
//!
//! The wire format uses camelCase field names; `Book` is the full stored
//! record, `BookPayload` the caller-supplied candidate fields, and
//! `BookSummary` the projection returned by the list endpoint.

use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Length of generated book ids
pub const BOOK_ID_LEN: usize = 16;

/// Generate a fresh random book id.
///
/// 16 alphanumeric characters give a 62^16 identifier space; collisions
/// within a single store lifetime are negligible.
pub fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOOK_ID_LEN)
        .map(char::from)
        .collect()
}

/// A book record held in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque 16-character identifier, unique for the store lifetime
    pub id: String,
    pub name: String,
    pub year: i32,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: i32,
    pub read_page: i32,
    /// Derived: `read_page == page_count`, recomputed on create and update
    pub finished: bool,
    pub reading: bool,
    /// Set once at creation, never changed afterwards
    pub inserted_at: DateTime<Utc>,
    /// Refreshed on every successful update
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a fresh record from a validated payload.
    pub fn from_payload(id: String, payload: BookPayload, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: payload.name.unwrap_or_default(),
            year: payload.year,
            author: payload.author,
            summary: payload.summary,
            publisher: payload.publisher,
            finished: payload.page_count == payload.read_page,
            page_count: payload.page_count,
            read_page: payload.read_page,
            reading: payload.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace the caller-supplied fields with a validated payload,
    /// recomputing `finished` and refreshing `updated_at`. The id and
    /// `inserted_at` stay untouched.
    pub fn apply(&mut self, payload: BookPayload, now: DateTime<Utc>) {
        self.name = payload.name.unwrap_or_default();
        self.year = payload.year;
        self.author = payload.author;
        self.summary = payload.summary;
        self.publisher = payload.publisher;
        self.finished = payload.page_count == payload.read_page;
        self.page_count = payload.page_count;
        self.read_page = payload.read_page;
        self.reading = payload.reading;
        self.updated_at = now;
    }
}

/// Candidate fields for create and update requests.
///
/// Everything except `name` is defaulted when absent; the two actual
/// validation rules (name present, readPage <= pageCount) live in the
/// service.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: Option<String>,
    #[serde(default)]
    pub year: i32,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[serde(default)]
    pub page_count: i32,
    #[serde(default)]
    pub read_page: i32,
    #[serde(default)]
    pub reading: bool,
}

/// Projection of a record returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Query filters accepted by the list endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    /// Case-insensitive substring match on the book name
    pub name: Option<String>,
    /// "1" keeps books being read, "0" keeps the rest, anything else is ignored
    pub reading: Option<String>,
    /// "1" keeps finished books, "0" keeps the rest, anything else is ignored
    pub finished: Option<String>,
}

impl BookQuery {
    pub fn reading_filter(&self) -> Option<bool> {
        flag_filter(self.reading.as_deref())
    }

    pub fn finished_filter(&self) -> Option<bool> {
        flag_filter(self.finished.as_deref())
    }
}

/// Tri-state flag filter: "1" must be set, "0" must be unset, any other
/// value (or absence) applies no filter at all.
fn flag_filter(value: Option<&str>) -> Option<bool> {
    match value {
        Some("0") => Some(false),
        Some("1") => Some(true),
        _ => None,
    }
}
