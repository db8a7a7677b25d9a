//! User preferences (theme, font family and font size) and the key/value
//! stores they persist to. Every change is written through to the store
//! immediately.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

pub const THEME_KEY: &str = "theme";
pub const FONT_FAMILY_KEY: &str = "fontFamily";
pub const FONT_SIZE_KEY: &str = "fontSize";

/// The font size, in pixels, assumed before the user changes it.
pub const DEFAULT_FONT_SIZE: u32 = 16;
pub const MIN_FONT_SIZE: u32 = 12;
pub const MAX_FONT_SIZE: u32 = 24;
pub const FONT_SIZE_STEP: u32 = 2;

/// A string key/value store, the equivalent of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// A store that lives only as long as the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A store persisted as a YAML map. The whole file is rewritten on every
/// [`KeyValueStore::set`].
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing or blank file is an empty store.
    /// A file that isn't a YAML map of strings is logged and also treated as
    /// empty; it is overwritten by the next [`KeyValueStore::set`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<FileStore> {
        let path = path.as_ref().to_owned();
        let values = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(values) => values,
                Err(e) => {
                    log::warn!(
                        "ignoring unreadable preferences `{}`: {}",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(Error::Io(e)),
        };
        Ok(FileStore { path, values })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        serde_yaml::to_writer(File::create(&self.path)?, &self.values)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
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

    fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub font_family: Option<String>,

    /// The base font size in pixels, if the user has changed it.
    pub font_size: Option<u32>,
}

impl Preferences {
    /// Reads preferences from `store`. The system dark-mode hint is only
    /// consulted when no theme has been stored.
    pub fn load<S: KeyValueStore>(store: &S, system_prefers_dark: bool) -> Self {
        let theme = match store.get(THEME_KEY) {
            Some(theme) if theme == Theme::Dark.as_str() => Theme::Dark,
            Some(theme) if !theme.is_empty() => Theme::Light,
            _ if system_prefers_dark => Theme::Dark,
            _ => Theme::Light,
        };
        Preferences {
            theme,
            font_family: store.get(FONT_FAMILY_KEY).filter(|f| !f.is_empty()),
            font_size: store
                .get(FONT_SIZE_KEY)
                .and_then(|s| s.trim().parse::<u32>().ok())
                .map(|size| size.max(MIN_FONT_SIZE).min(MAX_FONT_SIZE)),
        }
    }

    /// The font size in effect.
    pub fn effective_font_size(&self) -> u32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }
}

/// Owns a store and the preferences loaded from it, and applies changes to
/// both.
pub struct PreferenceManager<S: KeyValueStore> {
    store: S,
    preferences: Preferences,
}

impl<S: KeyValueStore> PreferenceManager<S> {
    pub fn new(store: S, system_prefers_dark: bool) -> Self {
        let preferences = Preferences::load(&store, system_prefers_dark);
        PreferenceManager { store, preferences }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Switches between light and dark and returns the new theme.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.preferences.theme.toggled();
        self.store.set(THEME_KEY, theme.as_str())?;
        self.preferences.theme = theme;
        log::debug!("theme set to {}", theme.as_str());
        Ok(theme)
    }

    pub fn set_font_family(&mut self, family: &str) -> Result<()> {
        self.store.set(FONT_FAMILY_KEY, family)?;
        self.preferences.font_family = Some(family.to_owned());
        Ok(())
    }

    /// Grows the font by one step unless it is already at the maximum.
    /// Returns the size in effect afterwards.
    pub fn increase_font(&mut self) -> Result<u32> {
        let current = self.preferences.effective_font_size();
        if current >= MAX_FONT_SIZE {
            return Ok(current);
        }
        self.set_font_size((current + FONT_SIZE_STEP).min(MAX_FONT_SIZE))
    }

    /// Shrinks the font by one step unless it is already at the minimum.
    /// Returns the size in effect afterwards.
    pub fn decrease_font(&mut self) -> Result<u32> {
        let current = self.preferences.effective_font_size();
        if current <= MIN_FONT_SIZE {
            return Ok(current);
        }
        self.set_font_size(
            current.saturating_sub(FONT_SIZE_STEP).max(MIN_FONT_SIZE),
        )
    }

    fn set_font_size(&mut self, size: u32) -> Result<u32> {
        self.store.set(FONT_SIZE_KEY, &size.to_string())?;
        self.preferences.font_size = Some(size);
        Ok(size)
    }
}

/// The result of a preference store operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failure to read or persist preferences.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O errors on the preferences file.
    Io(io::Error),

    /// Returned when preferences can't be written out as YAML.
    Yaml(serde_yaml::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Yaml(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Yaml(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Error {
        Error::Yaml(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_system_hint_only_without_stored_theme() -> Result<()> {
        let mut store = MemoryStore::default();
        assert_eq!(Preferences::load(&store, true).theme, Theme::Dark);
        assert_eq!(Preferences::load(&store, false).theme, Theme::Light);

        store.set(THEME_KEY, "light")?;
        assert_eq!(Preferences::load(&store, true).theme, Theme::Light);
        Ok(())
    }

    #[test]
    fn test_dark_theme_survives_reload() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("prefs.yaml");

        let mut manager = PreferenceManager::new(FileStore::open(&path)?, false);
        assert_eq!(manager.toggle_theme()?, Theme::Dark);
        drop(manager);

        // The system hint says light, but the stored choice wins.
        let manager = PreferenceManager::new(FileStore::open(&path)?, false);
        assert_eq!(manager.preferences().theme, Theme::Dark);
        Ok(())
    }

    #[test]
    fn test_blank_or_corrupt_file_is_empty() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("prefs.yaml");

        fs::write(&path, "")?;
        let manager = PreferenceManager::new(FileStore::open(&path)?, true);
        assert_eq!(manager.preferences().theme, Theme::Dark);

        fs::write(&path, "  \n")?;
        assert_eq!(FileStore::open(&path)?.get(THEME_KEY), None);

        fs::write(&path, "- not\n- a map\n")?;
        let mut store = FileStore::open(&path)?;
        assert_eq!(store.get(THEME_KEY), None);
        store.set(THEME_KEY, "dark")?;
        assert_eq!(
            FileStore::open(&path)?.get(THEME_KEY).as_deref(),
            Some("dark")
        );
        Ok(())
    }

    #[test]
    fn test_font_size_bounds() -> Result<()> {
        let mut manager = PreferenceManager::new(MemoryStore::default(), false);
        assert_eq!(manager.preferences().effective_font_size(), 16);
        assert_eq!(manager.increase_font()?, 18);
        assert_eq!(manager.increase_font()?, 20);
        assert_eq!(manager.increase_font()?, 22);
        assert_eq!(manager.increase_font()?, 24);
        assert_eq!(manager.increase_font()?, 24);

        for _ in 0..10 {
            manager.decrease_font()?;
        }
        assert_eq!(manager.preferences().font_size, Some(12));
        assert_eq!(
            manager.into_store().get(FONT_SIZE_KEY).as_deref(),
            Some("12")
        );
        Ok(())
    }

    #[test]
    fn test_font_family_and_stored_size() -> Result<()> {
        let mut store = MemoryStore::default();
        store.set(FONT_SIZE_KEY, "40")?;
        let mut manager = PreferenceManager::new(store, false);
        assert_eq!(manager.preferences().font_size, Some(24));

        manager.set_font_family("Georgia, serif")?;
        let prefs = Preferences::load(&manager.into_store(), false);
        assert_eq!(prefs.font_family.as_deref(), Some("Georgia, serif"));
        Ok(())
    }
}
