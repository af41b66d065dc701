//! The per-application key-value preference store.
//!
//! H9 persists a single string, the saved command shortcut. On macOS it lives
//! in `NSUserDefaults`; a TOML file can stand in for it (`--prefs PATH`, and
//! on other platforms by default).
use std::{
    collections::HashMap,
    env, fs, io,
    path::{Path, PathBuf},
};

use toml_edit::{DocumentMut, value};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Key under which the saved command shortcut is stored.
pub const SAVED_SHORTCUT_KEY: &str = "h9commandshortcut";

/// Simple string key-value store.
pub trait Preferences {
    /// Read `key`. `Ok(None)` when unset.
    fn get_string(&self, key: &str) -> Result<Option<String>>;
    /// Write `key`.
    fn set_string(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Typed access to the saved command shortcut preference.
pub struct SavedShortcut;

impl SavedShortcut {
    /// Load the saved shortcut, falling back to `""` when unset or unreadable.
    pub fn load(prefs: &dyn Preferences) -> String {
        match prefs.get_string(SAVED_SHORTCUT_KEY) {
            Ok(v) => v.unwrap_or_default(),
            Err(e) => {
                warn!("failed to read saved shortcut: {}", e);
                String::new()
            }
        }
    }

    /// Persist a new saved shortcut.
    pub fn store(prefs: &mut dyn Preferences, shortcut: &str) -> Result<()> {
        debug!(shortcut, "storing saved shortcut");
        prefs.set_string(SAVED_SHORTCUT_KEY, shortcut)
    }
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryPrefs {
    /// Stored values.
    values: HashMap<String, String>,
}

impl Preferences for MemoryPrefs {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in a TOML file. Unrelated keys and formatting in the
/// file are preserved on write.
#[derive(Debug)]
pub struct TomlPrefs {
    /// Backing file.
    path: PathBuf,
    /// Parsed document; written back whole on every set.
    doc: DocumentMut,
}

impl TomlPrefs {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        let doc = match fs::read_to_string(path) {
            Ok(s) => s.parse::<DocumentMut>().map_err(|source| Error::PrefsParse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => DocumentMut::new(),
            Err(source) => {
                return Err(Error::PrefsIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default file location: `~/.h9/prefs.toml`.
    pub fn default_path() -> Option<PathBuf> {
        env::var_os("HOME").map(|h| PathBuf::from(h).join(".h9").join("prefs.toml"))
    }

    /// Write the document back to disk.
    fn flush(&self) -> Result<()> {
        let io_err = |source| Error::PrefsIo {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        fs::write(&self.path, self.doc.to_string()).map_err(io_err)
    }
}

impl Preferences for TomlPrefs {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        match self.doc.get(key) {
            None => Ok(None),
            Some(item) => item
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| Error::PrefsType {
                    key: key.to_string(),
                }),
        }
    }

    fn set_string(&mut self, key: &str, v: &str) -> Result<()> {
        self.doc[key] = value(v);
        self.flush()
    }
}

/// `NSUserDefaults.standardUserDefaults`.
#[cfg(target_os = "macos")]
#[derive(Debug, Default, Clone, Copy)]
pub struct UserDefaults;

#[cfg(target_os = "macos")]
impl Preferences for UserDefaults {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        use objc2_foundation::{NSString, NSUserDefaults};

        let defaults = NSUserDefaults::standardUserDefaults();
        let v = defaults.stringForKey(&NSString::from_str(key));
        Ok(v.map(|s| s.to_string()))
    }

    fn set_string(&mut self, key: &str, v: &str) -> Result<()> {
        use objc2::runtime::AnyObject;
        use objc2_foundation::{NSString, NSUserDefaults};

        let defaults = NSUserDefaults::standardUserDefaults();
        let val = NSString::from_str(v);
        let obj: &AnyObject = &val;
        // NSString is a property-list type.
        unsafe { defaults.setObject_forKey(Some(obj), &NSString::from_str(key)) };
        Ok(())
    }
}

/// Pick the preference store: the TOML file at `path` when given, otherwise
/// the platform store.
pub fn open_store(path: Option<&Path>) -> Result<Box<dyn Preferences>> {
    if let Some(p) = path {
        debug!(path = %p.display(), "using file preferences");
        return Ok(Box::new(TomlPrefs::open(p)?));
    }
    platform_store()
}

/// Platform default store.
#[cfg(target_os = "macos")]
fn platform_store() -> Result<Box<dyn Preferences>> {
    Ok(Box::new(UserDefaults))
}

/// Platform default store.
#[cfg(not(target_os = "macos"))]
fn platform_store() -> Result<Box<dyn Preferences>> {
    match TomlPrefs::default_path() {
        Some(p) => Ok(Box::new(TomlPrefs::open(&p)?)),
        None => {
            warn!("HOME is not set; preferences will not persist");
            Ok(Box::new(MemoryPrefs::default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_shortcut_defaults_to_empty() {
        let prefs = MemoryPrefs::default();
        assert_eq!(SavedShortcut::load(&prefs), "");
    }

    #[test]
    fn saved_shortcut_round_trips_in_memory() {
        let mut prefs = MemoryPrefs::default();
        SavedShortcut::store(&mut prefs, "⌃⌥⌘K").unwrap();
        assert_eq!(SavedShortcut::load(&prefs), "⌃⌥⌘K");
    }

    #[test]
    fn toml_store_persists_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "# mine\nother = 3\n").unwrap();

        let mut prefs = TomlPrefs::open(&path).unwrap();
        SavedShortcut::store(&mut prefs, "⇧⌘S").unwrap();

        let reopened = TomlPrefs::open(&path).unwrap();
        assert_eq!(SavedShortcut::load(&reopened), "⇧⌘S");
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("# mine"));
        assert!(text.contains("other = 3"));
    }

    #[test]
    fn toml_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = TomlPrefs::open(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(prefs.get_string(SAVED_SHORTCUT_KEY).unwrap(), None);
        assert!(!prefs.path().exists());
    }

    #[test]
    fn toml_store_rejects_non_string() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "h9commandshortcut = 7\n").unwrap();
        let prefs = TomlPrefs::open(&path).unwrap();
        assert!(matches!(
            prefs.get_string(SAVED_SHORTCUT_KEY),
            Err(Error::PrefsType { .. })
        ));
        assert_eq!(SavedShortcut::load(&prefs), "");
    }

    #[test]
    fn toml_store_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        fs::write(&path, "this is = = not toml").unwrap();
        assert!(matches!(
            TomlPrefs::open(&path),
            Err(Error::PrefsParse { .. })
        ));
    }
}
