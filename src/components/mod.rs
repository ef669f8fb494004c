mod book;
mod controller;
mod epub_loader;
mod header;
mod html_processor;
mod library;
mod preferences;
mod reader;
mod settings;
pub mod storage;
mod text_pager;
mod toc;

pub use book::{BookId, BookRecord, BookType, Document, LastPage, EPUB_START_BOOKMARK};
pub use controller::{EpubPane, PdfPane, ReaderController, ReaderPane, ReaderSession, View};
pub use epub_loader::{parse_spine_index, spine_bookmark, Chapter, EpubRendition, TocEntry};
pub use header::Header;
pub use html_processor::{data_url, process_html_content, resolve_href};
pub use library::Library;
pub use preferences::{Preferences, Theme};
pub use reader::Reader;
pub(crate) use settings::SettingsPanel;
pub use storage::LibraryStore;
pub use text_pager::{TextPager, WORDS_PER_PAGE};
pub(crate) use toc::TableOfContents;
