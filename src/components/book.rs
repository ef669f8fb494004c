use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ReaderError, Result};

/// Bookmark handed to the EPUB renderer for a freshly uploaded book.
pub const EPUB_START_BOOKMARK: &str = "epubcfi(/6/2!)";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookType {
    Pdf,
    Epub,
    Txt,
}

impl BookType {
    pub const ALL: [BookType; 3] = [BookType::Pdf, BookType::Epub, BookType::Txt];

    /// Resolves the type from the extension after the last dot.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let ext = match name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return Err(ReaderError::UnsupportedFormat(name.to_string())),
        };
        match ext.as_str() {
            "pdf" => Ok(BookType::Pdf),
            "epub" => Ok(BookType::Epub),
            "txt" => Ok(BookType::Txt),
            _ => Err(ReaderError::UnsupportedFormat(ext)),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            BookType::Pdf => "pdf",
            BookType::Epub => "epub",
            BookType::Txt => "txt",
        }
    }

    pub fn default_last_page(self) -> LastPage {
        match self {
            BookType::Epub => LastPage::Bookmark(EPUB_START_BOOKMARK.to_string()),
            BookType::Pdf | BookType::Txt => LastPage::Page(1),
        }
    }
}

impl fmt::Display for BookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Reading position: a page number for text/PDF, an opaque bookmark for EPUB.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum LastPage {
    Page(u32),
    Bookmark(String),
}

impl LastPage {
    pub fn page(&self) -> Option<u32> {
        match self {
            LastPage::Page(page) => Some(*page),
            LastPage::Bookmark(_) => None,
        }
    }

    pub fn bookmark(&self) -> Option<&str> {
        match self {
            LastPage::Bookmark(cfi) => Some(cfi),
            LastPage::Page(_) => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub id: BookId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: BookType,
    pub date_added: DateTime<Utc>,
    pub last_page: LastPage,
    /// File name of the stored content, relative to the store's content directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// An opened book with its content resolved by type.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Pdf { bytes: Vec<u8> },
    Epub { bytes: Vec<u8>, bookmark: String },
    Text { content: String },
}

impl Document {
    pub fn load(record: &BookRecord, bytes: Vec<u8>) -> Self {
        match record.kind {
            BookType::Pdf => Document::Pdf { bytes },
            BookType::Epub => Document::Epub {
                bytes,
                bookmark: record
                    .last_page
                    .bookmark()
                    .unwrap_or(EPUB_START_BOOKMARK)
                    .to_string(),
            },
            BookType::Txt => Document::Text {
                content: String::from_utf8_lossy(&bytes).into_owned(),
            },
        }
    }
}
