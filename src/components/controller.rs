//! Library/reader state machine.
//!
//! `ReaderController` owns the store, the preferences and the active view.
//! UI components only ever talk to it through a single `Signal`.

use tracing::{info, warn};

use crate::components::html_processor::data_url;
use crate::components::{
    BookId, BookRecord, BookType, Document, EpubRendition, LastPage, LibraryStore, Preferences,
    TextPager, Theme,
};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct PdfPane {
    /// `data:` URL for the embedded viewer, released with the session.
    pub blob_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EpubPane {
    Ready(EpubRendition),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReaderPane {
    Pdf(PdfPane),
    Epub(EpubPane),
    Text(TextPager),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReaderSession {
    pub record: BookRecord,
    pub pane: ReaderPane,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Library,
    Reading(ReaderSession),
}

#[derive(Debug)]
pub struct ReaderController {
    store: LibraryStore,
    prefs: Preferences,
    view: View,
}

impl ReaderController {
    pub fn new(store: LibraryStore, prefs: Preferences) -> Self {
        Self { store, prefs, view: View::Library }
    }

    /// Store and preferences from the user data dir.
    pub fn open_default() -> Self {
        let store = LibraryStore::open_default();
        let prefs = Preferences::load(crate::components::storage::data_dir());
        Self::new(store, prefs)
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn session(&self) -> Option<&ReaderSession> {
        match &self.view {
            View::Reading(session) => Some(session),
            View::Library => None,
        }
    }

    pub fn books(&self) -> &[BookRecord] {
        self.store.list()
    }

    pub fn store(&self) -> &LibraryStore {
        &self.store
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Validates and stores a new book, then opens it. Unsupported files
    /// leave the library and the view untouched.
    pub fn upload(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<BookId> {
        let kind = BookType::from_file_name(file_name)?;
        let record = self.store.add(file_name, kind, bytes)?;
        self.open(record.id)?;
        Ok(record.id)
    }

    pub fn open(&mut self, id: BookId) -> Result<()> {
        let bytes = self.store.load_content(id)?;
        let record = self
            .store
            .get(id)
            .cloned()
            .ok_or(crate::error::ReaderError::NotFound(id))?;
        info!(id = %id, name = %record.name, kind = %record.kind, "Opening book");

        let pane = match Document::load(&record, bytes) {
            Document::Pdf { bytes } => ReaderPane::Pdf(PdfPane {
                blob_url: data_url("application/pdf", &bytes),
            }),
            Document::Epub { bytes, bookmark } => match EpubRendition::open(bytes) {
                Ok(mut rendition) => {
                    rendition.display(&bookmark);
                    ReaderPane::Epub(EpubPane::Ready(rendition))
                }
                Err(e) => {
                    warn!(id = %id, "EPUB failed to render: {e}");
                    ReaderPane::Epub(EpubPane::Failed(e.to_string()))
                }
            },
            Document::Text { content } => {
                let start = record.last_page.page().unwrap_or(1);
                ReaderPane::Text(TextPager::new(&content, start))
            }
        };

        self.view = View::Reading(ReaderSession { record, pane });
        self.record_position();
        Ok(())
    }

    /// Returns to the library, dropping the session's blob URL or rendition.
    pub fn back(&mut self) {
        if let View::Reading(session) = std::mem::take(&mut self.view) {
            info!(id = %session.record.id, "Closing book");
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.navigate(|pane| match pane {
            ReaderPane::Text(pager) => pager.next(),
            ReaderPane::Epub(EpubPane::Ready(r)) => r.next().is_some(),
            _ => false,
        })
    }

    pub fn prev_page(&mut self) -> bool {
        self.navigate(|pane| match pane {
            ReaderPane::Text(pager) => pager.prev(),
            ReaderPane::Epub(EpubPane::Ready(r)) => r.prev().is_some(),
            _ => false,
        })
    }

    pub fn goto_chapter(&mut self, index: usize) -> bool {
        self.navigate(|pane| match pane {
            ReaderPane::Epub(EpubPane::Ready(r)) => r.goto(index).is_some(),
            _ => false,
        })
    }

    fn navigate(&mut self, step: impl FnOnce(&mut ReaderPane) -> bool) -> bool {
        let View::Reading(session) = &mut self.view else {
            return false;
        };
        let moved = step(&mut session.pane);
        if moved {
            self.record_position();
        }
        moved
    }

    /// Writes the session's position back to its record. Best effort: a
    /// failed write is logged and reading continues.
    fn record_position(&mut self) {
        let View::Reading(session) = &mut self.view else {
            return;
        };
        let position = match &session.pane {
            ReaderPane::Text(pager) => LastPage::Page(pager.current_page()),
            ReaderPane::Epub(EpubPane::Ready(r)) => LastPage::Bookmark(r.current_bookmark()),
            ReaderPane::Pdf(_) | ReaderPane::Epub(EpubPane::Failed(_)) => return,
        };
        session.record.last_page = position.clone();
        if let Err(e) = self.store.update_last_page(session.record.id, position) {
            warn!(id = %session.record.id, "Failed to save reading position: {e}");
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.prefs.toggle_theme()
    }

    pub fn set_font_size(&mut self, size: u32) -> u32 {
        self.prefs.set_font_size(size)
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.prefs.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.prefs.zoom_out()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReaderError;

    fn controller() -> ReaderController {
        ReaderController::new(LibraryStore::in_memory(), Preferences::in_memory())
    }

    fn words(n: usize) -> Vec<u8> {
        vec!["word"; n].join(" ").into_bytes()
    }

    #[test]
    fn rejected_upload_changes_nothing() {
        let mut c = controller();
        let err = c.upload("photo.jpeg", vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, ReaderError::UnsupportedFormat(_)));
        assert!(c.books().is_empty());
        assert_eq!(c.view(), &View::Library);
    }

    #[test]
    fn pdf_upload_opens_embedded_viewer() {
        let mut c = controller();
        let id = c.upload("paper.PDF", b"%PDF-1.4".to_vec()).unwrap();
        let session = c.session().unwrap();
        assert_eq!(session.record.id, id);
        assert_eq!(session.record.kind, BookType::Pdf);
        assert_eq!(session.record.last_page, LastPage::Page(1));
        match &session.pane {
            ReaderPane::Pdf(pane) => assert!(pane.blob_url.starts_with("data:application/pdf;base64,")),
            other => panic!("unexpected pane {other:?}"),
        }
        assert!(!c.next_page());
    }

    #[test]
    fn text_navigation_persists_each_page() {
        let mut c = controller();
        let id = c.upload("novel.txt", words(600)).unwrap();
        assert!(c.next_page());
        assert!(c.next_page());
        assert!(!c.next_page());
        assert_eq!(c.store().get(id).unwrap().last_page, LastPage::Page(3));
        assert!(c.prev_page());
        assert_eq!(c.store().get(id).unwrap().last_page, LastPage::Page(2));

        c.back();
        assert_eq!(c.view(), &View::Library);
        c.open(id).unwrap();
        match &c.session().unwrap().pane {
            ReaderPane::Text(pager) => assert_eq!(pager.current_page(), 2),
            other => panic!("unexpected pane {other:?}"),
        }
    }

    #[test]
    fn broken_epub_fails_inline() {
        let mut c = controller();
        let id = c.upload("broken.epub", b"not a zip".to_vec()).unwrap();
        match &c.session().unwrap().pane {
            ReaderPane::Epub(EpubPane::Failed(message)) => assert!(!message.is_empty()),
            other => panic!("unexpected pane {other:?}"),
        }
        assert!(!c.next_page());
        c.back();
        assert_eq!(c.view(), &View::Library);
        assert_eq!(c.books().len(), 1);
        assert_eq!(c.store().get(id).unwrap().last_page, BookType::Epub.default_last_page());
    }

    #[test]
    fn back_in_library_is_a_noop() {
        let mut c = controller();
        c.back();
        assert_eq!(c.view(), &View::Library);
        assert!(!c.prev_page());
    }

    #[test]
    fn opening_unknown_book_fails() {
        let mut c = controller();
        assert!(matches!(c.open(BookId(42)), Err(ReaderError::NotFound(BookId(42)))));
        assert_eq!(c.view(), &View::Library);
    }

    #[test]
    fn theme_toggle_round_trips() {
        let mut c = controller();
        let original = c.preferences().theme();
        c.toggle_theme();
        assert_ne!(c.preferences().theme(), original);
        c.toggle_theme();
        assert_eq!(c.preferences().theme(), original);
    }
}
