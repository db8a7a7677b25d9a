//! Defines the [`Fetcher`] trait through which documents and the search index
//! are retrieved, and two implementations: [`DirectoryFetcher`] for a content
//! directory on disk and [`MemoryFetcher`] for content held in memory.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Retrieves static assets by path relative to the content root (e.g.,
/// `search_index.json` or `rust/ownership.md`).
pub trait Fetcher {
    fn fetch(&self, path: &str) -> Result<String>;
}

/// Reads assets from a directory on the local file system.
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        DirectoryFetcher {
            root: root.as_ref().to_owned(),
        }
    }
}

impl Fetcher for DirectoryFetcher {
    fn fetch(&self, path: &str) -> Result<String> {
        // Refuse to climb out of the content root.
        if Path::new(path)
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(Error::NotFound(path.to_owned()));
        }

        match std::fs::read_to_string(self.root.join(path)) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(Error::NotFound(path.to_owned()))
            }
            Err(e) => Err(Error::Io {
                path: path.to_owned(),
                err: e,
            }),
        }
    }
}

/// Serves assets from an in-memory map keyed by path.
#[derive(Default)]
pub struct MemoryFetcher {
    files: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the asset at `path`.
    pub fn with<P: Into<String>, C: Into<String>>(
        mut self,
        path: P,
        contents: C,
    ) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch(&self, path: &str) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound(path.to_owned()))
    }
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, path: &str) -> Result<String> {
        (**self).fetch(path)
    }
}

/// The result of a fetch.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failure to retrieve an asset.
#[derive(Debug)]
pub enum Error {
    /// Returned when no asset exists at the path.
    NotFound(String),

    /// Returned for other I/O errors while reading the asset.
    Io { path: String, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound(path) => write!(f, "`{}` not found", path),
            Error::Io { path, err } => write!(f, "reading `{}`: {}", path, err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound(_) => None,
            Error::Io { path: _, err } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_directory_fetcher() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir(dir.path().join("rust"))?;
        std::fs::write(dir.path().join("rust/hola.md"), "# Hola")?;

        let fetcher = DirectoryFetcher::new(dir.path());
        assert_eq!(fetcher.fetch("rust/hola.md")?, "# Hola");
        assert!(matches!(
            fetcher.fetch("rust/adios.md"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            fetcher.fetch("../secret.md"),
            Err(Error::NotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_directory_fetcher_io_error() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir(dir.path().join("rust"))?;

        let fetcher = DirectoryFetcher::new(dir.path());
        match fetcher.fetch("rust") {
            Err(Error::Io { path, .. }) => assert_eq!(path, "rust"),
            other => panic!("expected an I/O error, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_memory_fetcher() {
        let fetcher = MemoryFetcher::new().with("home.md", "hi");
        assert_eq!(fetcher.fetch("home.md").ok(), Some("hi".to_owned()));
        assert!(fetcher.fetch("nope.md").is_err());
    }
}
