use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::components::{BookId, BookRecord, BookType, LastPage};
use crate::error::{ReaderError, Result};

const APP_DIR: &str = "shelf_reader";
const INDEX_FILE: &str = "library.json";
const CONTENT_DIR: &str = "books";
const HOME_ENV: &str = "SHELF_READER_HOME";

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LibraryIndex {
    next_id: u64,
    books: Vec<BookRecord>,
}

impl Default for LibraryIndex {
    fn default() -> Self {
        Self { next_id: 1, books: Vec::new() }
    }
}

#[derive(Debug)]
enum Backing {
    Disk { root: PathBuf },
    Memory { content: HashMap<BookId, Vec<u8>> },
}

/// Book records keyed by auto-increment id, persisted as a JSON index plus
/// one content file per book.
#[derive(Debug)]
pub struct LibraryStore {
    index: LibraryIndex,
    backing: Backing,
}

/// Directory holding the library and preferences, `SHELF_READER_HOME` wins.
pub fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(home);
    }
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl LibraryStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let content_dir = root.join(CONTENT_DIR);
        fs::create_dir_all(&content_dir).map_err(|e| ReaderError::io(&content_dir, e))?;

        let index_path = root.join(INDEX_FILE);
        let index = match fs::read_to_string(&index_path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => LibraryIndex::default(),
            Err(e) => return Err(ReaderError::io(&index_path, e)),
        };
        info!(root = %root.display(), books = index.books.len(), "Opened library");

        Ok(Self { index, backing: Backing::Disk { root } })
    }

    /// Opens the store in the user data dir, or degrades to a session-only store.
    pub fn open_default() -> Self {
        let root = data_dir();
        match Self::open(&root) {
            Ok(store) => store,
            Err(e) => {
                warn!(root = %root.display(), "Library unavailable, keeping books in memory: {e}");
                Self::in_memory()
            }
        }
    }

    pub fn in_memory() -> Self {
        Self {
            index: LibraryIndex::default(),
            backing: Backing::Memory { content: HashMap::new() },
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self.backing, Backing::Disk { .. })
    }

    pub fn add(&mut self, name: &str, kind: BookType, bytes: Vec<u8>) -> Result<BookRecord> {
        let id = BookId(self.index.next_id);
        let file_name = format!("{}.{}", id.0, kind.extension());

        let (content, content_path) = match &mut self.backing {
            Backing::Disk { root } => {
                let path = root.join(CONTENT_DIR).join(&file_name);
                fs::write(&path, &bytes).map_err(|e| ReaderError::io(&path, e))?;
                (Some(file_name), Some(path))
            }
            Backing::Memory { content } => {
                content.insert(id, bytes);
                (None, None)
            }
        };

        let record = BookRecord {
            id,
            name: name.to_string(),
            kind,
            date_added: Utc::now(),
            last_page: kind.default_last_page(),
            content,
        };
        self.index.next_id += 1;
        self.index.books.push(record.clone());
        if let Err(e) = self.save() {
            // Nothing from a failed add may stay visible or on disk.
            self.index.books.pop();
            self.index.next_id -= 1;
            if let Some(path) = content_path {
                if let Err(remove_err) = fs::remove_file(&path) {
                    warn!(path = %path.display(), "Failed to remove orphaned content: {remove_err}");
                }
            }
            return Err(e);
        }

        info!(id = %id, name, kind = %kind, "Added book to library");
        Ok(record)
    }

    /// All books in insertion order.
    pub fn list(&self) -> &[BookRecord] {
        &self.index.books
    }

    pub fn get(&self, id: BookId) -> Option<&BookRecord> {
        self.index.books.iter().find(|b| b.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&BookRecord> {
        self.index.books.iter().find(|b| b.name == name)
    }

    pub fn list_by_type(&self, kind: BookType) -> impl Iterator<Item = &BookRecord> + '_ {
        self.index.books.iter().filter(move |b| b.kind == kind)
    }

    pub fn load_content(&self, id: BookId) -> Result<Vec<u8>> {
        let record = self.get(id).ok_or(ReaderError::NotFound(id))?;
        match &self.backing {
            Backing::Disk { root } => {
                let file_name = record.content.as_deref().ok_or(ReaderError::NotFound(id))?;
                let path = root.join(CONTENT_DIR).join(file_name);
                fs::read(&path).map_err(|e| ReaderError::io(&path, e))
            }
            Backing::Memory { content } => {
                content.get(&id).cloned().ok_or(ReaderError::NotFound(id))
            }
        }
    }

    pub fn update_last_page(&mut self, id: BookId, last_page: LastPage) -> Result<()> {
        let book = self
            .index
            .books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(ReaderError::NotFound(id))?;
        if book.last_page == last_page {
            return Ok(());
        }
        debug!(id = %id, ?last_page, "Updating reading position");
        book.last_page = last_page;
        self.save()
    }

    fn save(&self) -> Result<()> {
        let Backing::Disk { root } = &self.backing else {
            return Ok(());
        };
        write_index(root, &self.index)
    }
}

fn write_index(root: &Path, index: &LibraryIndex) -> Result<()> {
    let path = root.join(INDEX_FILE);
    let content = serde_json::to_string_pretty(index)?;
    fs::write(&path, content).map_err(|e| ReaderError::io(&path, e))
}
