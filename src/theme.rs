//! Light/dark theme state.
//!
//! A single [`ThemeStore`] owns the current [`ThemeMode`] for the lifetime of
//! a page (or a CLI invocation). It is initialized from a persisted preference
//! and flipped only by [`ThemeStore::toggle`]. Renderers never read the store
//! directly: they receive a [`ThemeContext`] snapshot as a parameter, so there
//! is exactly one source of truth and no ambient global.
//!
//! ## Persistence
//!
//! One key-value pair, `theme = "light" | "dark"`, behind the
//! [`PreferenceStorage`] trait:
//!
//! - [`FileStorage`] keeps a `preferences.json` object in the state directory.
//! - [`MemoryStorage`] keeps values in memory (tests, embedding).
//!
//! Storage is best-effort. A missing, unreadable or corrupt value reads as
//! "absent" (→ Light) and a failed write still applies the flip in memory.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage key holding the persisted mode.
pub const THEME_KEY: &str = "theme";

/// Class applied to the root element while dark mode is active.
pub const DARK_ROOT_CLASS: &str = "dark";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("preference storage unavailable")]
    Unavailable,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown theme mode '{0}' (expected \"light\" or \"dark\")")]
pub struct ParseModeError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Key-value preference storage (the browser's `localStorage` equivalent).
pub trait PreferenceStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Preferences persisted as a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// File name used inside the state directory.
    pub const FILE_NAME: &'static str = "preferences.json";

    pub fn in_dir(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(Self::FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl PreferenceStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking the write.
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

/// In-memory preferences. `unavailable()` builds one that fails every call.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
    available: bool,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            available: true,
        }
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.values.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn unavailable() -> Self {
        Self {
            values: BTreeMap::new(),
            available: false,
        }
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Snapshot of the theme handed to every renderer.
///
/// `revision` increases on each committed toggle so a renderer can tell
/// whether it is looking at a stale value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeContext {
    pub mode: ThemeMode,
    pub revision: u64,
}

impl ThemeContext {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode, revision: 0 }
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    /// Class list for the root `<html>` element.
    pub fn root_class(&self) -> Option<&'static str> {
        self.is_dark().then_some(DARK_ROOT_CLASS)
    }

    /// Pick between a light and a dark variant of a class or value.
    pub fn pick<'a>(&self, light: &'a str, dark: &'a str) -> &'a str {
        if self.is_dark() { dark } else { light }
    }
}

type Subscriber = Box<dyn FnMut(ThemeContext)>;

/// The single owner of the active [`ThemeMode`].
pub struct ThemeStore<S: PreferenceStorage> {
    storage: S,
    context: ThemeContext,
    subscribers: Vec<Subscriber>,
}

impl<S: PreferenceStorage> ThemeStore<S> {
    /// Read the persisted preference, defaulting to Light when it is absent,
    /// unreadable or not one of the two known values.
    pub fn initialize(storage: S) -> Self {
        let mode = match storage.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
                warn!("ignoring stored theme preference: {e}");
                ThemeMode::Light
            }),
            Ok(None) => ThemeMode::Light,
            Err(e) => {
                warn!("theme preference unreadable, using light: {e}");
                ThemeMode::Light
            }
        };
        debug!("theme initialized to {mode}");
        Self {
            storage,
            context: ThemeContext::new(mode),
            subscribers: Vec::new(),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.context.mode
    }

    pub fn context(&self) -> ThemeContext {
        self.context
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Register a renderer to be notified after every committed change.
    pub fn subscribe(&mut self, subscriber: impl FnMut(ThemeContext) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Flip the mode exactly once, persist it (best effort) and notify
    /// subscribers.
    pub fn toggle(&mut self) -> ThemeMode {
        self.commit(self.context.mode.flipped());
        self.context.mode
    }

    /// Force a specific mode. A no-op when it is already active.
    pub fn set(&mut self, mode: ThemeMode) -> ThemeMode {
        if mode != self.context.mode {
            self.commit(mode);
        }
        self.context.mode
    }

    fn commit(&mut self, mode: ThemeMode) {
        self.context = ThemeContext {
            mode,
            revision: self.context.revision + 1,
        };
        if let Err(e) = self.storage.set(THEME_KEY, mode.as_str()) {
            warn!("theme preference not persisted: {e}");
        }
        debug!("theme → {mode} (revision {})", self.context.revision);
        let context = self.context;
        for subscriber in &mut self.subscribers {
            subscriber(context);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[test]
    fn initialize_defaults_to_light_when_absent() {
        let store = ThemeStore::initialize(MemoryStorage::new());
        assert_eq!(store.mode(), ThemeMode::Light);
        assert_eq!(store.context().root_class(), None);
    }

    #[test]
    fn initialize_reads_persisted_dark() {
        let store = ThemeStore::initialize(MemoryStorage::with_value(THEME_KEY, "dark"));
        assert_eq!(store.mode(), ThemeMode::Dark);
        assert_eq!(store.context().root_class(), Some("dark"));
    }

    #[test]
    fn initialize_treats_corrupt_value_as_absent() {
        let store = ThemeStore::initialize(MemoryStorage::with_value(THEME_KEY, "sepia"));
        assert_eq!(store.mode(), ThemeMode::Light);
    }

    #[test]
    fn initialize_survives_unavailable_storage() {
        let store = ThemeStore::initialize(MemoryStorage::unavailable());
        assert_eq!(store.mode(), ThemeMode::Light);
    }

    #[test]
    fn toggle_parity_and_persistence_match_after_every_flip() {
        for n in 0..7 {
            let mut store = ThemeStore::initialize(MemoryStorage::new());
            for _ in 0..n {
                let mode = store.toggle();
                assert_eq!(store.storage().value(THEME_KEY), Some(mode.as_str()));
            }
            let expected = if n % 2 == 0 {
                ThemeMode::Light
            } else {
                ThemeMode::Dark
            };
            assert_eq!(store.mode(), expected, "after {n} toggles");
        }
    }

    #[test]
    fn double_toggle_restores_mode_and_persisted_value() {
        let mut store = ThemeStore::initialize(MemoryStorage::with_value(THEME_KEY, "dark"));
        store.toggle();
        store.toggle();
        assert_eq!(store.mode(), ThemeMode::Dark);
        assert_eq!(store.storage().value(THEME_KEY), Some("dark"));
    }

    #[test]
    fn toggle_with_unavailable_storage_still_flips_in_memory() {
        let mut store = ThemeStore::initialize(MemoryStorage::unavailable());
        assert_eq!(store.toggle(), ThemeMode::Dark);
        assert_eq!(store.context().root_class(), Some("dark"));
    }

    #[test]
    fn subscribers_see_each_committed_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = ThemeStore::initialize(MemoryStorage::new());
        let sink = Rc::clone(&seen);
        store.subscribe(move |ctx| sink.borrow_mut().push((ctx.mode, ctx.revision)));

        store.toggle();
        store.toggle();
        store.set(ThemeMode::Light); // already light: no notification

        assert_eq!(
            *seen.borrow(),
            vec![(ThemeMode::Dark, 1), (ThemeMode::Light, 2)]
        );
    }

    #[test]
    fn file_storage_round_trips_through_disk() {
        let tmp = TempDir::new().unwrap();
        let mut store = ThemeStore::initialize(FileStorage::in_dir(tmp.path()));
        store.toggle();

        let reopened = ThemeStore::initialize(FileStorage::in_dir(tmp.path()));
        assert_eq!(reopened.mode(), ThemeMode::Dark);
        let raw = fs::read_to_string(tmp.path().join(FileStorage::FILE_NAME)).unwrap();
        assert!(raw.contains(r#""theme": "dark""#));
    }

    #[test]
    fn file_storage_overwrites_corrupt_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(FileStorage::FILE_NAME), "{ not json").unwrap();

        let mut store = ThemeStore::initialize(FileStorage::in_dir(tmp.path()));
        assert_eq!(store.mode(), ThemeMode::Light);
        store.toggle();
        assert_eq!(
            store.storage().get(THEME_KEY).unwrap().as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn mode_parses_known_values_only() {
        assert_eq!("dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert_eq!(" light ".parse::<ThemeMode>(), Ok(ThemeMode::Light));
        assert!("Dark!".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn context_pick_follows_mode() {
        let ctx = ThemeContext::new(ThemeMode::Dark);
        assert_eq!(ctx.pick("bg-white", "bg-gray-900"), "bg-gray-900");
    }

    #[test]
    fn default_memory_storage_is_usable() {
        let mut storage = MemoryStorage::default();
        storage.set(THEME_KEY, "dark").unwrap();
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }
}
