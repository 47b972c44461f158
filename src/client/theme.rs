//! Dark mode toggle backed by a persisted string flag.
//!
//! The flag lives under [`DARKMODE_KEY`] and is either [`ACTIVE`] or
//! [`INACTIVE`]. While active, the page body carries the [`DARKMODE_CLASS`]
//! class.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::client::error::PreferenceError;

pub const DARKMODE_KEY: &str = "darkmode";
pub const DARKMODE_CLASS: &str = "darkmode";
pub const ACTIVE: &str = "active";
pub const INACTIVE: &str = "null";

/// String key/value storage that survives page reloads.
pub trait PreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    items: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Items kept as one JSON object in a file. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FilePreferenceStore { path: path.as_ref().to_path_buf() }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&items)?)?;
        Ok(())
    }
}

/// Ordered, duplicate-free class names of an element.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClassList {
    classes: Vec<String>,
}

impl ClassList {
    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

pub struct ThemeToggle<S: PreferenceStore> {
    store: S,
    body: ClassList,
}

impl<S: PreferenceStore> ThemeToggle<S> {
    /// Page load: applies dark mode before any interaction if it was left on.
    pub fn load(store: S, body: ClassList) -> Self {
        let mut toggle = ThemeToggle { store, body };
        if toggle.stored_flag().as_deref() == Some(ACTIVE) {
            toggle.enable();
        }
        toggle
    }

    /// Click handler. Returns whether dark mode is now on.
    pub fn toggle(&mut self) -> bool {
        if self.stored_flag().as_deref() != Some(ACTIVE) {
            self.enable();
            true
        } else {
            self.disable();
            false
        }
    }

    pub fn enable(&mut self) {
        self.body.add(DARKMODE_CLASS);
        self.persist(ACTIVE);
    }

    pub fn disable(&mut self) {
        self.body.remove(DARKMODE_CLASS);
        self.persist(INACTIVE);
    }

    pub fn is_dark(&self) -> bool {
        self.body.contains(DARKMODE_CLASS)
    }

    pub fn body(&self) -> &ClassList {
        &self.body
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn stored_flag(&self) -> Option<String> {
        match self.store.get_item(DARKMODE_KEY) {
            Ok(flag) => flag,
            Err(e) => {
                log::warn!("Could not read theme preference: {}", e);
                None
            }
        }
    }

    fn persist(&mut self, flag: &str) {
        if let Err(e) = self.store.set_item(DARKMODE_KEY, flag) {
            log::warn!("Could not persist theme preference: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(flag: Option<&str>) -> MemoryPreferenceStore {
        let mut store = MemoryPreferenceStore::new();
        if let Some(flag) = flag {
            store.set_item(DARKMODE_KEY, flag).unwrap();
        }
        store
    }

    fn stored(toggle: &ThemeToggle<MemoryPreferenceStore>) -> Option<String> {
        toggle.store().get_item(DARKMODE_KEY).unwrap()
    }

    #[test]
    fn test_active_flag_applies_dark_mode_on_load() {
        let toggle = ThemeToggle::load(store_with(Some(ACTIVE)), ClassList::default());
        assert!(toggle.is_dark());
    }

    #[test]
    fn test_other_flags_leave_light_mode_on_load() {
        for flag in [None, Some(INACTIVE), Some("dark")] {
            let toggle = ThemeToggle::load(store_with(flag), ClassList::default());
            assert!(!toggle.is_dark(), "flag {:?}", flag);
            assert_eq!(stored(&toggle).as_deref(), flag);
        }
    }

    #[test]
    fn test_toggle_twice_restores_active_state() {
        let mut toggle = ThemeToggle::load(store_with(Some(ACTIVE)), ClassList::default());
        let before = (stored(&toggle), toggle.body().clone());

        assert!(!toggle.toggle());
        assert_eq!(stored(&toggle).as_deref(), Some(INACTIVE));
        assert!(toggle.toggle());

        assert_eq!((stored(&toggle), toggle.body().clone()), before);
    }

    #[test]
    fn test_toggle_twice_restores_inactive_state() {
        let mut toggle = ThemeToggle::load(store_with(Some(INACTIVE)), ClassList::default());
        let before = (stored(&toggle), toggle.body().clone());

        assert!(toggle.toggle());
        assert_eq!(stored(&toggle).as_deref(), Some(ACTIVE));
        assert!(!toggle.toggle());

        assert_eq!((stored(&toggle), toggle.body().clone()), before);
    }

    #[test]
    fn test_toggle_keeps_other_body_classes() {
        let mut body = ClassList::default();
        body.add("landing");

        let mut toggle = ThemeToggle::load(store_with(None), body);
        toggle.toggle();
        toggle.toggle();
        toggle.toggle();

        assert_eq!(toggle.body().iter().collect::<Vec<_>>(), vec!["landing", "darkmode"]);
    }

    #[test]
    fn test_file_store_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("local_storage.json");

        let mut toggle = ThemeToggle::load(FilePreferenceStore::new(&path), ClassList::default());
        assert!(toggle.toggle());

        let reloaded = ThemeToggle::load(FilePreferenceStore::new(&path), ClassList::default());
        assert!(reloaded.is_dark());
    }

    #[test]
    fn test_corrupt_file_store_reads_as_light() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FilePreferenceStore::new(&path);
        assert!(matches!(store.get_item(DARKMODE_KEY), Err(PreferenceError::Parse(_))));

        let toggle = ThemeToggle::load(store, ClassList::default());
        assert!(!toggle.is_dark());
    }
}
