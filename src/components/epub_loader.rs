use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use epub::doc::{EpubDoc, NavPoint};
use tracing::{debug, info, warn};

use crate::components::book::EPUB_START_BOOKMARK;
use crate::components::process_html_content;
use crate::error::{ReaderError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    pub spine_index: usize,
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    pub label: String,
    pub chapter: Option<usize>,
    pub children: Vec<TocEntry>,
}

/// Renders an EPUB chapter by chapter and reports positions as spine-level
/// CFI bookmarks (`epubcfi(/6/N!)`).
#[derive(Debug, Clone, PartialEq)]
pub struct EpubRendition {
    chapters: Vec<Chapter>,
    toc: Vec<TocEntry>,
    current: usize,
}

pub fn spine_bookmark(spine_index: usize) -> String {
    format!("epubcfi(/6/{}!)", (spine_index + 1) * 2)
}

/// Extracts the spine position from a CFI. Only the step after `/6` is read;
/// everything past the indirection is ignored.
pub fn parse_spine_index(bookmark: &str) -> Option<usize> {
    let inner = bookmark.trim().strip_prefix("epubcfi(")?.strip_suffix(')')?;
    let spine_path = inner.split('!').next()?;
    let mut steps = spine_path.split('/').skip(1);
    if steps.next()? != "6" {
        return None;
    }
    // Steps may carry an id assertion, e.g. `/4[chap01]`.
    let step = steps.next()?;
    let step: usize = step.split('[').next()?.parse().ok()?;
    if step < 2 || step % 2 != 0 {
        return None;
    }
    Some(step / 2 - 1)
}

fn resolve_chapter_index(original: &Path, map: &HashMap<PathBuf, usize>) -> Option<usize> {
    let cleaned = original
        .to_str()
        .and_then(|s| s.split('#').next())
        .map(PathBuf::from)
        .unwrap_or_else(|| original.to_path_buf());

    if let Some(&idx) = map.get(&cleaned) {
        return Some(idx);
    }

    // Some NCX files point at bare file names.
    let file_name = cleaned.file_name()?;
    map.iter()
        .find(|(path, _)| path.file_name() == Some(file_name))
        .map(|(_, &idx)| idx)
}

fn build_toc(points: &[NavPoint], map: &HashMap<PathBuf, usize>) -> Vec<TocEntry> {
    points
        .iter()
        .map(|point| TocEntry {
            label: point.label.clone(),
            chapter: resolve_chapter_index(&point.content, map),
            children: build_toc(&point.children, map),
        })
        .collect()
}

impl EpubRendition {
    pub fn open(bytes: Vec<u8>) -> Result<Self> {
        let mut doc = EpubDoc::from_reader(Cursor::new(bytes))
            .map_err(|e| ReaderError::Epub(e.to_string()))?;

        let mut chapters = Vec::new();
        let mut spine_index = 0;
        loop {
            let path = doc.get_current_path().unwrap_or_default();
            match doc.get_current_str() {
                Some((html, _mime)) => {
                    let content = process_html_content(&html, &path, |resource| {
                        let bytes = doc.get_resource_by_path(resource)?;
                        let mime = doc
                            .get_resource_mime_by_path(resource)
                            .unwrap_or_else(|| "application/octet-stream".to_string());
                        Some((bytes, mime))
                    });
                    chapters.push(Chapter { spine_index, path, content });
                }
                None => warn!(spine_index, "Skipping unreadable spine item"),
            }

            if !doc.go_next() {
                break;
            }
            spine_index += 1;
        }

        if chapters.is_empty() {
            return Err(ReaderError::EmptyEpub);
        }

        let path_to_chapter: HashMap<PathBuf, usize> = chapters
            .iter()
            .enumerate()
            .map(|(idx, chapter)| (chapter.path.clone(), idx))
            .collect();
        let toc = build_toc(&doc.toc, &path_to_chapter);

        info!(chapters = chapters.len(), toc_entries = toc.len(), "Loaded EPUB");
        Ok(Self { chapters, toc, current: 0 })
    }

    /// Moves to the chapter a bookmark points at. Unknown bookmarks open the
    /// first chapter.
    pub fn display(&mut self, bookmark: &str) -> String {
        let target = parse_spine_index(bookmark).and_then(|spine| {
            self.chapters.iter().position(|c| c.spine_index >= spine)
        });
        self.current = match target {
            Some(idx) => idx,
            None => {
                if bookmark != EPUB_START_BOOKMARK {
                    warn!(bookmark, "Unrecognized bookmark, opening first chapter");
                }
                0
            }
        };
        self.current_bookmark()
    }

    /// Returns the new bookmark if the position changed.
    pub fn goto(&mut self, index: usize) -> Option<String> {
        if index >= self.chapters.len() || index == self.current {
            return None;
        }
        self.current = index;
        debug!(chapter = index, "Relocated");
        Some(self.current_bookmark())
    }

    pub fn next(&mut self) -> Option<String> {
        self.goto(self.current + 1)
    }

    pub fn prev(&mut self) -> Option<String> {
        self.goto(self.current.checked_sub(1)?)
    }

    pub fn current_bookmark(&self) -> String {
        spine_bookmark(self.chapters[self.current].spine_index)
    }

    pub fn current_chapter(&self) -> usize {
        self.current
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    pub fn chapter_html(&self) -> &str {
        &self.chapters[self.current].content
    }

    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }
}
