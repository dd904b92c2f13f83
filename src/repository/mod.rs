//! Repository layer: process-local storage

pub mod books;

pub use books::BookStore;
