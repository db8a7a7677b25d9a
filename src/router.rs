//! The router: owns the application state (configuration, search index,
//! fetcher and surface), turns navigation tokens into views and keeps the
//! ancillary UI (table of contents, breadcrumbs, active menu link) in step
//! with whatever view is current.
//!
//! A navigation runs in three steps so that a slow fetch can never overwrite
//! a newer page:
//!
//! 1. [`App::begin`] parses the token, pushes history and takes a new
//!    generation number.
//! 2. [`App::resolve`] fetches and renders the view.
//! 3. [`App::complete`] writes the result to the surface, unless another
//!    navigation has begun in the meantime, in which case it is dropped.
//!
//! [`App::navigate`] runs all three back to back.

use std::fmt;

use crate::breadcrumb::Breadcrumbs;
use crate::config::Config;
use crate::fetch::{self, Fetcher};
use crate::frontmatter;
use crate::index::SearchIndex;
use crate::markdown;
use crate::preferences::Preferences;
use crate::route::{token_from_fragment, Route};
use crate::sidebar;
use crate::surface::Surface;
use crate::toc;
use crate::view::{self, View};

/// A navigation that has begun but not yet completed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub generation: u64,
    pub token: String,
    pub route: Route,
}

pub struct App<F: Fetcher, S: Surface> {
    config: Config,
    index: SearchIndex,
    fetcher: F,
    surface: S,
    generation: u64,
}

impl<F: Fetcher, S: Surface> App<F, S> {
    /// Builds the application and loads the search index. An index that
    /// can't be loaded is logged and replaced by an empty one for the rest of
    /// the session; listings and searches then come up empty.
    pub fn new(config: Config, fetcher: F, mut surface: S) -> Self {
        let index = match SearchIndex::load(&fetcher, &config.index_file) {
            Ok(index) => {
                log::info!("loaded search index: {} posts", index.len());
                index
            }
            Err(e) => {
                log::error!("loading search index `{}`: {}", config.index_file, e);
                SearchIndex::default()
            }
        };
        surface.set_sidebar(
            &sidebar::category_cloud(&index, &config.labels),
            &sidebar::tag_cloud(&index, &config.labels),
        );
        App {
            config,
            index,
            fetcher,
            surface,
            generation: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// The generation of the most recently begun navigation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Applies theme and font preferences to the surface.
    pub fn apply_preferences(&mut self, preferences: &Preferences) {
        self.surface.apply_preferences(preferences);
    }

    /// Navigates to `token` and records it in history.
    pub fn navigate(&mut self, token: &str) -> bool {
        let navigation = self.begin(token, true);
        let outcome = self.resolve(&navigation);
        self.complete(&navigation, outcome)
    }

    /// Navigates to the page named by a URL fragment without adding a
    /// history entry. Used on first load and when the user moves through
    /// history.
    pub fn restore(&mut self, fragment: &str) -> bool {
        let token = token_from_fragment(fragment, &self.config.routing);
        let navigation = self.begin(&token, false);
        let outcome = self.resolve(&navigation);
        self.complete(&navigation, outcome)
    }

    /// Starts a navigation to `token`, superseding any navigation still in
    /// flight.
    pub fn begin(&mut self, token: &str, push_history: bool) -> Navigation {
        self.generation += 1;
        let route = Route::parse(token, &self.config.routing);
        log::debug!(
            "navigation {} to `{}`: {:?}",
            self.generation,
            token,
            route
        );
        if push_history {
            self.surface.push_history(token);
        }
        Navigation {
            generation: self.generation,
            token: token.to_owned(),
            route,
        }
    }

    /// Fetches and renders the view for `navigation`. Touches neither the
    /// surface nor the generation.
    pub fn resolve(&self, navigation: &Navigation) -> Result<View> {
        let config = &self.config;
        match &navigation.route {
            Route::Home => {
                let raw = self.fetch_document(
                    &navigation.route,
                    &config.labels.home_not_found,
                )?;
                Ok(view::home(&raw, config.line_breaks)?)
            }
            Route::Category(slug) => {
                Ok(view::category(&self.index, slug, &config.labels))
            }
            Route::Tag(tag) => Ok(view::tag(&self.index, tag, &config.labels)),
            Route::StaticPage { id, .. } | Route::Document(id) => {
                let raw = self.fetch_document(
                    &navigation.route,
                    &config.labels.page_not_found,
                )?;
                Ok(view::document(
                    &frontmatter::parse(&raw),
                    self.index.find(id),
                    config.line_breaks,
                    &config.labels,
                )?)
            }
        }
    }

    /// Writes the outcome of `navigation` to the surface. Returns `false`,
    /// leaving the surface untouched, when a newer navigation has begun since.
    pub fn complete(
        &mut self,
        navigation: &Navigation,
        outcome: Result<View>,
    ) -> bool {
        if navigation.generation != self.generation {
            log::debug!(
                "discarding stale navigation {} to `{}` (current is {})",
                navigation.generation,
                navigation.token,
                self.generation
            );
            return false;
        }

        match outcome {
            Ok(view) => {
                self.surface.set_content(&view.html);
                if view.highlight {
                    self.surface.highlight_code();
                }
                self.surface.set_toc(&toc::render(&view.headings));
                let crumbs =
                    Breadcrumbs::build(&navigation.route, &self.index, &self.config);
                self.surface.set_breadcrumbs(&crumbs.to_html());
            }
            Err(e) => {
                log::warn!("navigation to `{}` failed: {}", navigation.token, e);
                let html = view::error(match &e {
                    Error::Fetch { message, .. } => message,
                    Error::Markdown(_) => &self.config.labels.page_not_found,
                });
                self.surface.set_content(&html);
                self.surface.set_toc("");
                self.surface.set_breadcrumbs("");
            }
        }
        self.surface.mark_active(&navigation.token);
        self.surface.scroll_to_top();
        true
    }

    /// Runs a search and renders the results panel. Queries too short to run
    /// clear the panel.
    pub fn search(&mut self, text: &str) {
        let results = self.index.search(text);
        let html = view::search_results(results.as_deref(), &self.config.labels);
        self.surface.set_search_results(&html);
    }

    /// Follows a search result: navigates to `token` and clears the search
    /// box and its results.
    pub fn open_search_result(&mut self, token: &str) -> bool {
        let completed = self.navigate(token);
        self.surface.set_search_results("");
        self.surface.clear_search_input();
        completed
    }

    fn fetch_document(&self, route: &Route, message: &str) -> Result<String> {
        let fetched = match route.document_path(&self.config.routing) {
            Some(path) => self.fetcher.fetch(&path),
            None => Err(fetch::Error::NotFound(format!("{:?}", route))),
        };
        fetched.map_err(|err| Error::Fetch {
            message: message.to_owned(),
            err,
        })
    }
}

/// The result of resolving a navigation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a navigation that couldn't produce a view.
#[derive(Debug)]
pub enum Error {
    /// Returned when the route's document couldn't be fetched. `message` is
    /// the text shown to the user.
    Fetch { message: String, err: fetch::Error },

    /// Returned when the document couldn't be converted to HTML.
    Markdown(markdown::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Fetch { message, err } => write!(f, "{}: {}", message, err),
            Error::Markdown(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Fetch { message: _, err } => Some(err),
            Error::Markdown(err) => Some(err),
        }
    }
}

impl From<markdown::Error> for Error {
    fn from(err: markdown::Error) -> Error {
        Error::Markdown(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::MenuLink;
    use crate::fetch::MemoryFetcher;
    use crate::index::test::INDEX_JSON;
    use crate::surface::Screen;

    const OWNERSHIP: &str = "---\ntitle: Ownership en Rust\ntags: [rust, memoria]\n---\n# Ownership\n\nCada valor tiene un dueño.\n\n## Préstamos\n\n```rust\nlet r = &x;\n```\n";

    fn config() -> Config {
        let mut config = Config::default();
        config.menu = vec![MenuLink {
            title: "Ownership".to_owned(),
            target: "rust/ownership".to_owned(),
        }];
        config
    }

    fn fetcher() -> MemoryFetcher {
        MemoryFetcher::new()
            .with("search_index.json", INDEX_JSON)
            .with("home.md", "# Bienvenida\n\nHola.")
            .with("rust/ownership.md", OWNERSHIP)
            .with("paginas/acerca.md", "# Acerca de\n")
    }

    fn app() -> App<MemoryFetcher, Screen> {
        let config = config();
        let screen = Screen::new(config.menu.clone());
        App::new(config, fetcher(), screen)
    }

    #[test]
    fn test_sidebar_rendered_on_load() {
        let app = app();
        assert_eq!(app.index().len(), 3);
        assert!(app.surface().categories.contains("Rust Avanzado"));
        assert!(app.surface().tags.contains("memoria"));
    }

    #[test]
    fn test_missing_index_degrades() {
        let config = config();
        let fetcher = MemoryFetcher::new().with("home.md", "# Hola");
        let mut app = App::new(config, fetcher, Screen::default());
        assert!(app.index().is_empty());
        assert_eq!(app.surface().categories, "");
        assert_eq!(app.surface().tags, "");

        app.search("rust");
        assert_eq!(
            app.surface().search_results,
            "<li>No se encontraron resultados.</li>"
        );

        assert!(app.navigate("category/rust"));
        assert!(app
            .surface()
            .content
            .contains("No hay posts en esta categoría."));
        assert!(app.navigate("home"));
        assert!(app.surface().content.contains("Hola"));
    }

    #[test]
    fn test_navigate_home() {
        let mut app = app();
        assert!(app.restore(""));
        let screen = app.surface();
        assert!(screen.content.contains(r#"<h1 id="bienvenida">Bienvenida</h1>"#));
        assert_eq!(
            screen.toc,
            r##"<ul><li><a href="#bienvenida">Bienvenida</a></li></ul>"##
        );
        assert_eq!(screen.breadcrumbs, r##"<a href="#home">Home</a>"##);
        // Restoring from a fragment doesn't add history.
        assert!(screen.history.is_empty());
        assert_eq!(screen.scrolls, 1);
    }

    #[test]
    fn test_navigate_post() {
        let mut app = app();
        assert!(app.navigate("rust/ownership"));
        let screen = app.surface();
        assert!(screen.content.starts_with(r#"<p class="post-meta">"#));
        assert!(screen.content.contains("Lectura: 3 min"));
        assert!(screen
            .content
            .contains(r#"<code class="language-rust">"#));
        assert_eq!(
            screen.toc,
            r##"<ul><li><a href="#ownership">Ownership</a></li><li><a href="#préstamos">Préstamos</a></li></ul>"##
        );
        assert_eq!(
            screen.breadcrumbs,
            r##"<a href="#home">Home</a> &gt; <a href="#category/rust">Rust Avanzado</a> &gt; Ownership en Rust"##
        );
        assert_eq!(screen.active.as_deref(), Some("rust/ownership"));
        assert_eq!(screen.highlights, 1);
        assert_eq!(screen.history, vec!["rust/ownership".to_owned()]);
    }

    #[test]
    fn test_navigate_static_page() {
        let mut app = app();
        assert!(app.navigate("contenido/acerca"));
        let screen = app.surface();
        assert_eq!(screen.content, r#"<h1 id="acerca-de">Acerca de</h1>"#);
        assert_eq!(
            screen.breadcrumbs,
            r##"<a href="#home">Home</a> &gt; <a href="#category/contenido">Páginas</a> &gt; acerca"##
        );
    }

    #[test]
    fn test_listings_clear_toc_and_active() {
        let mut app = app();
        app.navigate("rust/ownership");
        assert!(app.navigate("tag/rust"));
        let screen = app.surface();
        assert!(screen.content.starts_with(r#"<h2>Posts con la etiqueta "rust"</h2>"#));
        assert_eq!(screen.toc, "");
        assert_eq!(screen.active, None);
        assert_eq!(
            screen.breadcrumbs,
            r##"<a href="#home">Home</a> &gt; <a href="#tag/rust">Etiqueta: rust</a>"##
        );

        assert!(app.navigate("category/Rust Avanzado"));
        assert!(app.surface().content.starts_with("<h1>Rust Avanzado</h1>"));
        assert_eq!(app.surface().highlights, 1);
    }

    #[test]
    fn test_failed_fetch_renders_inline_error() {
        let mut app = app();
        app.navigate("rust/ownership");
        assert!(app.navigate("rust/no-existe"));
        let screen = app.surface();
        assert_eq!(screen.content, "<h2>Error</h2><p>Página no encontrada</p>");
        assert_eq!(screen.toc, "");
        assert_eq!(screen.breadcrumbs, "");
        assert_eq!(screen.scrolls, 2);

        // The app is still usable afterwards.
        assert!(app.navigate("home"));
        assert!(app.surface().content.contains("Bienvenida"));
    }

    #[test]
    fn test_missing_home_message() {
        let config = config();
        let fetcher = MemoryFetcher::new().with("search_index.json", INDEX_JSON);
        let mut app = App::new(config, fetcher, Screen::default());
        app.navigate("home");
        assert_eq!(
            app.surface().content,
            "<h2>Error</h2><p>Página de inicio no encontrada</p>"
        );
    }

    #[test]
    fn test_stale_navigation_is_discarded() {
        let mut app = app();
        let slow = app.begin("rust/ownership", true);
        let fast = app.begin("tag/go", true);

        let fast_outcome = app.resolve(&fast);
        assert!(app.complete(&fast, fast_outcome));

        let slow_outcome = app.resolve(&slow);
        assert!(!app.complete(&slow, slow_outcome));

        let screen = app.surface();
        assert!(screen.content.contains(r#"etiqueta "go""#));
        assert_eq!(screen.scrolls, 1);
        assert_eq!(
            screen.history,
            vec!["rust/ownership".to_owned(), "tag/go".to_owned()]
        );
        assert_eq!(app.generation(), 2);
    }

    #[test]
    fn test_search_panel() {
        let mut app = app();
        app.search("ASYNC");
        assert_eq!(
            app.surface().search_results,
            r##"<li><a href="#rust/async" class="search-result-link">Async Rust</a></li>"##
        );

        app.search("a");
        assert_eq!(app.surface().search_results, "");

        app.search("goroutines");
        assert!(app.open_search_result("go/goroutines"));
        let screen = app.surface();
        assert_eq!(screen.search_results, "");
        assert!(screen.search_input_cleared);
        // Not fetched in this fixture, so the inline error shows.
        assert!(screen.content.contains("Página no encontrada"));
        assert_eq!(screen.history, vec!["go/goroutines".to_owned()]);
    }
}
