//! Business logic services

pub mod books;

use books::BookshelfService;

/// Container for all services
#[derive(Default)]
pub struct Services {
    pub books: BookshelfService,
}

impl Services {
    /// Create all services with a fresh, empty book store
    pub fn new() -> Self {
        Self::default()
    }
}
