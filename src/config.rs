//! Loads the site configuration from a `fragmark.yaml` project file. Every key
//! is optional; a missing key takes the default shown on [`Config`].

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "fragmark.yaml";

/// A link in the side menu. `target` is a route token without the leading
/// `#`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MenuLink {
    pub title: String,
    pub target: String,
}

/// User-facing strings. The defaults are those of the site the renderer was
/// built for.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub home: String,
    pub tag: String,
    pub pages: String,
    pub categories: String,
    pub tags: String,
    pub category: String,
    pub date: String,
    pub reading: String,
    pub minutes_read: String,
    pub posts_tagged: String,
    pub no_posts_in_category: String,
    pub no_posts_with_tag: String,
    pub no_results: String,
    pub home_not_found: String,
    pub page_not_found: String,
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            home: "Home".to_owned(),
            tag: "Etiqueta".to_owned(),
            pages: "Páginas".to_owned(),
            categories: "Categorías".to_owned(),
            tags: "Etiquetas".to_owned(),
            category: "Categoría".to_owned(),
            date: "Fecha".to_owned(),
            reading: "Lectura".to_owned(),
            minutes_read: "min de lectura".to_owned(),
            posts_tagged: "Posts con la etiqueta".to_owned(),
            no_posts_in_category: "No hay posts en esta categoría.".to_owned(),
            no_posts_with_tag: "No se encontraron posts con esta etiqueta."
                .to_owned(),
            no_results: "No se encontraron resultados.".to_owned(),
            home_not_found: "Página de inicio no encontrada".to_owned(),
            page_not_found: "Página no encontrada".to_owned(),
        }
    }
}

/// Routing configuration: the reserved tokens and folders the router
/// recognizes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Routing {
    /// The token of the home document, also the name of its markdown file.
    pub home: String,

    /// The folder name used in route tokens for static pages.
    pub static_pages_folder: String,

    /// The content folder static pages are actually fetched from.
    pub pages_folder: String,
}

impl Default for Routing {
    fn default() -> Self {
        Routing {
            home: "home".to_owned(),
            static_pages_folder: "contenido".to_owned(),
            pages_folder: "paginas".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The directory holding `fragmark.yaml`. Relative paths below are
    /// resolved against it.
    #[serde(skip)]
    pub root_directory: PathBuf,

    /// The directory documents and the index are fetched from.
    pub content_directory: PathBuf,

    /// The search index, relative to `content_directory`.
    pub index_file: String,

    #[serde(flatten)]
    pub routing: Routing,

    /// Render single newlines in documents as line breaks.
    pub line_breaks: bool,

    /// Where preferences are persisted, relative to the root directory.
    pub preferences_file: PathBuf,

    pub menu: Vec<MenuLink>,

    pub labels: Labels,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root_directory: PathBuf::from("."),
            content_directory: PathBuf::from("docs"),
            index_file: "search_index.json".to_owned(),
            routing: Routing::default(),
            line_breaks: true,
            preferences_file: PathBuf::from(".preferences.yaml"),
            menu: Vec::new(),
            labels: Labels::default(),
        }
    }
}

impl Config {
    /// Searches `dir` and then each of its ancestors for `fragmark.yaml` and
    /// loads the first one found.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            match Config::from_project_file(&path) {
                Ok(config) => Ok(config),
                Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
            }
        } else {
            match dir.parent() {
                Some(dir) => Config::from_directory(dir),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    PROJECT_FILE
                )),
            }
        }
    }

    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|e| {
            anyhow!("Opening project file `{}`: {}", path.display(), e)
        })?;
        let mut config: Config = serde_yaml::from_reader(file)?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => {
                config.root_directory = project_root.to_owned();
                Ok(config)
            }
        }
    }

    pub fn content_root(&self) -> PathBuf {
        self.root_directory.join(&self.content_directory)
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.root_directory.join(&self.preferences_file)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_directory_walks_up() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(
            dir.path().join(PROJECT_FILE),
            "content_directory: contenido-web\nhome: inicio\nmenu:\n  - title: Ownership\n    target: rust/ownership\nlabels:\n  home: Inicio\n",
        )?;
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested)?;

        let config = Config::from_directory(&nested)?;
        assert_eq!(config.root_directory, dir.path());
        assert_eq!(config.content_root(), dir.path().join("contenido-web"));
        assert_eq!(config.routing.home, "inicio");
        assert_eq!(config.routing.pages_folder, "paginas");
        assert_eq!(config.labels.home, "Inicio");
        assert_eq!(config.labels.tag, "Etiqueta");
        assert_eq!(
            config.menu,
            vec![MenuLink {
                title: "Ownership".to_owned(),
                target: "rust/ownership".to_owned(),
            }]
        );
        assert!(config.line_breaks);
        Ok(())
    }

    #[test]
    fn test_empty_project_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        std::fs::write(&path, "{}\n")?;
        let config = Config::from_project_file(&path)?;
        assert_eq!(config.index_file, "search_index.json");
        assert_eq!(config.routing, Routing::default());
        Ok(())
    }
}
