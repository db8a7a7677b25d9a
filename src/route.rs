//! Defines [`Route`], the parsed form of a navigation token. A token is what
//! follows the `#` in a URL (`home`, `category/rust`, `tag/async`,
//! `rust/ownership`, ...); it is decided once, here, which view it names.

use crate::config::Routing;
use crate::util::slugify;

const CATEGORY_PREFIX: &str = "category/";
const TAG_PREFIX: &str = "tag/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// The fixed home document.
    Home,

    /// The listing of a category, by slug.
    Category(String),

    /// The listing of a tag, compared verbatim.
    Tag(String),

    /// A static page addressed through the static-pages folder. `path` is the
    /// document path with that folder swapped for the pages folder.
    StaticPage { id: String, path: String },

    /// A post or page addressed by its id.
    Document(String),
}

impl Route {
    /// Parses a navigation token.
    pub fn parse(token: &str, routing: &Routing) -> Route {
        if token == routing.home {
            return Route::Home;
        }
        if let Some(rest) = token.strip_prefix(CATEGORY_PREFIX) {
            return Route::Category(slugify(rest));
        }
        if let Some(rest) = token.strip_prefix(TAG_PREFIX) {
            return Route::Tag(rest.to_owned());
        }
        if let Some((folder, rest)) = split_folder(token) {
            if folder == routing.static_pages_folder {
                return Route::StaticPage {
                    id: token.to_owned(),
                    path: format!("{}/{}", routing.pages_folder, rest),
                };
            }
        }
        Route::Document(token.to_owned())
    }

    /// Parses a URL fragment, with or without its leading `#`. An empty
    /// fragment is the home route.
    pub fn from_fragment(fragment: &str, routing: &Routing) -> Route {
        Route::parse(&token_from_fragment(fragment, routing), routing)
    }

    /// The markdown file backing the route, relative to the content root.
    /// Listings have none.
    pub fn document_path(&self, routing: &Routing) -> Option<String> {
        match self {
            Route::Home => Some(format!("{}.md", routing.home)),
            Route::Category(_) | Route::Tag(_) => None,
            Route::StaticPage { path, .. } => Some(format!("{}.md", path)),
            Route::Document(id) => Some(format!("{}.md", id)),
        }
    }
}

/// Strips the leading `#` from `fragment`, falling back to the home token.
pub fn token_from_fragment(fragment: &str, routing: &Routing) -> String {
    match fragment.strip_prefix('#').unwrap_or(fragment) {
        "" => routing.home.clone(),
        token => token.to_owned(),
    }
}

/// Splits `folder/rest` at the first `/`.
pub fn split_folder(token: &str) -> Option<(&str, &str)> {
    token.split_once('/')
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(token: &str) -> Route {
        Route::parse(token, &Routing::default())
    }

    #[test]
    fn test_dispatch_order() {
        assert_eq!(parse("home"), Route::Home);
        assert_eq!(
            parse("category/Rust Avanzado"),
            Route::Category("rust-avanzado".to_owned())
        );
        assert_eq!(parse("tag/Rust"), Route::Tag("Rust".to_owned()));
        assert_eq!(
            parse("contenido/acerca"),
            Route::StaticPage {
                id: "contenido/acerca".to_owned(),
                path: "paginas/acerca".to_owned(),
            }
        );
        assert_eq!(
            parse("rust/ownership"),
            Route::Document("rust/ownership".to_owned())
        );
        assert_eq!(parse("acerca"), Route::Document("acerca".to_owned()));
        // Only the first segment selects static pages.
        assert_eq!(
            parse("rust/contenido"),
            Route::Document("rust/contenido".to_owned())
        );
    }

    #[test]
    fn test_from_fragment() {
        let routing = Routing::default();
        assert_eq!(Route::from_fragment("", &routing), Route::Home);
        assert_eq!(Route::from_fragment("#", &routing), Route::Home);
        assert_eq!(
            Route::from_fragment("#tag/rust", &routing),
            Route::Tag("rust".to_owned())
        );
    }

    #[test]
    fn test_document_path() {
        let routing = Routing::default();
        assert_eq!(
            parse("home").document_path(&routing),
            Some("home.md".to_owned())
        );
        assert_eq!(
            parse("contenido/acerca").document_path(&routing),
            Some("paginas/acerca.md".to_owned())
        );
        assert_eq!(parse("tag/rust").document_path(&routing), None);
    }
}
