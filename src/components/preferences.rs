//! Scalar reader preferences persisted as a small JSON key/value file.
//!
//! Values are read once at startup and written back on every change. Anything
//! missing or out of range falls back to its default so a damaged file never
//! blocks startup.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ReaderError, Result};

const PREFS_FILE: &str = "preferences.json";

pub const KEY_THEME: &str = "theme";
pub const KEY_FONT_SIZE: &str = "fontSize";
pub const KEY_PDF_ZOOM: &str = "pdfZoom";

pub const DEFAULT_FONT_SIZE: u32 = 18;
pub const MIN_FONT_SIZE: u32 = 14;
pub const MAX_FONT_SIZE: u32 = 24;

pub const DEFAULT_ZOOM: f64 = 1.0;
pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.0;
pub const ZOOM_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    theme: Theme,
    font_size: u32,
    pdf_zoom: f64,
    path: Option<PathBuf>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl Preferences {
    pub fn in_memory() -> Self {
        Self {
            theme: Theme::default(),
            font_size: DEFAULT_FONT_SIZE,
            pdf_zoom: DEFAULT_ZOOM,
            path: None,
        }
    }

    /// Loads `preferences.json` from `dir`; unreadable files yield defaults.
    pub fn load(dir: impl Into<PathBuf>) -> Self {
        let path = dir.into().join(PREFS_FILE);
        let values: BTreeMap<String, Value> = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), "Ignoring malformed preferences: {e}");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };

        let theme = match values.get(KEY_THEME).and_then(Value::as_str) {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        };
        let font_size = values
            .get(KEY_FONT_SIZE)
            .and_then(number_value)
            .map(|v| v.round() as u32)
            .filter(|v| (MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(v))
            .unwrap_or(DEFAULT_FONT_SIZE);
        let pdf_zoom = values
            .get(KEY_PDF_ZOOM)
            .and_then(number_value)
            .filter(|v| (MIN_ZOOM..=MAX_ZOOM).contains(v))
            .unwrap_or(DEFAULT_ZOOM);

        Self { theme, font_size, pdf_zoom, path: Some(path) }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn pdf_zoom(&self) -> f64 {
        self.pdf_zoom
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.pdf_zoom * 100.0).round() as u32
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.persist();
        self.theme
    }

    pub fn set_font_size(&mut self, size: u32) -> u32 {
        self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.persist();
        self.font_size
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.pdf_zoom + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(self.pdf_zoom - ZOOM_STEP)
    }

    fn set_zoom(&mut self, zoom: f64) -> f64 {
        // One decimal keeps repeated steps from drifting.
        self.pdf_zoom = ((zoom * 10.0).round() / 10.0).clamp(MIN_ZOOM, MAX_ZOOM);
        self.persist();
        self.pdf_zoom
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!("Failed to save preferences: {e}");
        }
    }

    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ReaderError::io(parent, e))?;
        }

        let mut values = BTreeMap::new();
        values.insert(KEY_THEME, Value::from(self.theme.as_str()));
        values.insert(KEY_FONT_SIZE, Value::from(self.font_size));
        values.insert(KEY_PDF_ZOOM, Value::from(self.pdf_zoom));
        let content = serde_json::to_string_pretty(&values)?;
        fs::write(path, content).map_err(|e| ReaderError::io(path, e))?;
        debug!(theme = self.theme.as_str(), font_size = self.font_size, zoom = self.pdf_zoom, "Saved preferences");
        Ok(())
    }
}

// Values written by older builds may be stored as strings.
fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_stored() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::load(dir.path());
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.font_size(), DEFAULT_FONT_SIZE);
        assert_eq!(prefs.zoom_percent(), 100);
    }

    #[test]
    fn toggling_twice_restores_theme_and_stored_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = Preferences::load(dir.path());
        assert_eq!(prefs.toggle_theme(), Theme::Dark);
        assert_eq!(Preferences::load(dir.path()).theme(), Theme::Dark);
        assert_eq!(prefs.toggle_theme(), Theme::Light);
        assert_eq!(Preferences::load(dir.path()).theme(), Theme::Light);
    }

    #[test]
    fn values_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = Preferences::load(dir.path());
        prefs.set_font_size(22);
        prefs.zoom_in();
        prefs.zoom_in();

        let reloaded = Preferences::load(dir.path());
        assert_eq!(reloaded.font_size(), 22);
        assert_eq!(reloaded.zoom_percent(), 120);
        assert_eq!(reloaded, prefs);
    }

    #[test]
    fn settings_are_clamped() {
        let mut prefs = Preferences::in_memory();
        assert_eq!(prefs.set_font_size(40), MAX_FONT_SIZE);
        assert_eq!(prefs.set_font_size(2), MIN_FONT_SIZE);
        for _ in 0..20 {
            prefs.zoom_in();
        }
        assert_eq!(prefs.pdf_zoom(), MAX_ZOOM);
        for _ in 0..30 {
            prefs.zoom_out();
        }
        assert_eq!(prefs.pdf_zoom(), MIN_ZOOM);
    }

    #[test]
    fn invalid_stored_values_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(PREFS_FILE),
            r#"{"theme":"sepia","fontSize":"99","pdfZoom":"1.5"}"#,
        )
        .unwrap();
        let prefs = Preferences::load(dir.path());
        assert_eq!(prefs.theme(), Theme::Light);
        assert_eq!(prefs.font_size(), DEFAULT_FONT_SIZE);
        assert_eq!(prefs.pdf_zoom(), 1.5);
    }
}
