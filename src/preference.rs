//! Light/dark theme preference.
//!
//! Persistence is best-effort: a store that cannot be read yields the light
//! theme, a store that cannot be written is logged and ignored. Nothing here
//! returns an error to the UI.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(StoreError::Invalid(other.to_string())),
        }
    }
}

// ============================================================================
// STORES
// ============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("unrecognized value {0:?}")]
    Invalid(String),
}

/// Durable string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Keys stored as a flat TOML table in one file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        toml::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_table()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // a corrupt file is replaced rather than blocking every later write
        let mut table = self.read_table().unwrap_or_else(|e| {
            warn!("overwriting unreadable preferences: {e}");
            BTreeMap::new()
        });
        table.insert(key.to_string(), value.to_string());
        let content = toml::to_string(&table)?;

        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        fs::write(&self.path, content).map_err(io_err)
    }
}

/// In-process store; also stands in for disabled storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every access fails.
    pub fn unavailable() -> Self {
        Self {
            values: BTreeMap::new(),
            unavailable: true,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// PREFERENCE
// ============================================================================

pub struct PreferenceStore {
    store: Box<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Saved theme, or light when unset or unreadable.
    pub fn load(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring saved theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "could not read theme preference");
                Theme::default()
            }
        }
    }

    pub fn save(&mut self, theme: Theme) {
        if let Err(e) = self.store.set(THEME_KEY, theme.as_str()) {
            warn!(error = %e, %theme, "could not persist theme preference");
        }
    }
}

/// Owns the active theme. The only place the theme changes.
pub struct ThemeController {
    current: Theme,
    preferences: PreferenceStore,
}

impl ThemeController {
    pub fn load(preferences: PreferenceStore) -> Self {
        let current = preferences.load();
        info!(theme = %current, "theme loaded");
        Self {
            current,
            preferences,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.preferences.save(self.current);
        info!(theme = %self.current, "theme toggled");
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    #[test]
    fn saved_theme_is_loaded_back() {
        let mut prefs = PreferenceStore::new(MemoryStore::new());
        prefs.save(Theme::Dark);
        assert_eq!(prefs.load(), Theme::Dark);
    }

    #[test]
    fn unset_theme_defaults_to_light() {
        let prefs = PreferenceStore::new(MemoryStore::new());
        assert_eq!(prefs.load(), Theme::Light);
    }

    #[test]
    fn unavailable_storage_degrades_to_light() {
        let mut prefs = PreferenceStore::new(MemoryStore::unavailable());
        prefs.save(Theme::Dark);
        assert_eq!(prefs.load(), Theme::Light);
    }

    #[test]
    fn garbage_values_are_ignored() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "solarized").unwrap();
        assert_eq!(PreferenceStore::new(store).load(), Theme::Light);
    }

    #[test]
    fn file_store_survives_a_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let mut prefs = PreferenceStore::new(FileStore::new(&path));
        prefs.save(Theme::Dark);

        let reopened = PreferenceStore::new(FileStore::new(&path));
        assert_eq!(reopened.load(), Theme::Dark);
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), r#"theme = "dark""#);
    }

    #[test]
    fn file_store_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "font = \"mono\"\n").unwrap();

        let mut store = FileStore::new(&path);
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(store.get("font").unwrap().as_deref(), Some("mono"));
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn overwriting_a_bad_file_is_logged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "font_size = 14\nfont = \"mono\"\n").unwrap();

        let logs = Captured::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let mut store = FileStore::new(&path);
        tracing::subscriber::with_default(subscriber, || {
            store.set(THEME_KEY, "dark").unwrap();
        });

        let logged = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("WARN"), "{logged}");
        assert!(logged.contains("overwriting unreadable preferences"), "{logged}");
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn corrupt_file_falls_back_to_light() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "this is = = not toml").unwrap();

        let prefs = PreferenceStore::new(FileStore::new(&path));
        assert_eq!(prefs.load(), Theme::Light);
    }

    #[test]
    fn unreadable_path_falls_back_to_light() {
        let dir = tempdir().unwrap();
        // a directory where the file should be
        let prefs = PreferenceStore::new(FileStore::new(dir.path()));
        assert_eq!(prefs.load(), Theme::Light);
    }

    #[test]
    fn toggle_flips_and_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.toml");

        let mut controller = ThemeController::load(PreferenceStore::new(FileStore::new(&path)));
        assert_eq!(controller.current(), Theme::Light);
        assert_eq!(controller.toggle(), Theme::Dark);

        let restarted = ThemeController::load(PreferenceStore::new(FileStore::new(&path)));
        assert_eq!(restarted.current(), Theme::Dark);
    }
}
