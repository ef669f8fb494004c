//! Local ebook shelf: a PDF/EPUB/TXT library with a minimal desktop reader.

#![allow(non_snake_case)]

pub mod components;
pub mod error;
pub mod logging;

pub use components::{BookId, BookRecord, BookType, LastPage, LibraryStore, Preferences, ReaderController, View};
pub use error::{ReaderError, Result};
