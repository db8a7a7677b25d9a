//! Defines the [`SearchIndex`], the in-memory store of [`PostRecord`]s loaded
//! once from `search_index.json`, and the queries run against it: lookups by
//! id, category and tag, and the free-text search behind the search box.

use std::collections::HashSet;
use std::fmt;

use crate::fetch::{self, Fetcher};
use crate::post::PostRecord;

/// Queries shorter than this (in characters) are treated as no query at all.
pub const MIN_QUERY_LEN: usize = 2;

/// An ordered, read-only collection of [`PostRecord`]s.
#[derive(Clone, Debug, Default)]
pub struct SearchIndex {
    posts: Vec<PostRecord>,
}

impl SearchIndex {
    pub fn new(posts: Vec<PostRecord>) -> Self {
        SearchIndex { posts }
    }

    /// Fetches and deserializes the index stored at `path`.
    pub fn load<F: Fetcher>(fetcher: &F, path: &str) -> Result<Self> {
        let raw = fetcher.fetch(path)?;
        Ok(SearchIndex::new(serde_json::from_str(&raw)?))
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Returns the first record whose id is `id`.
    pub fn find(&self, id: &str) -> Option<&PostRecord> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Returns the records with a category whose slug is `slug`.
    pub fn in_category(&self, slug: &str) -> Vec<&PostRecord> {
        self.posts
            .iter()
            .filter(|p| p.category_matching(slug).is_some())
            .collect()
    }

    /// Returns the original-cased name of the category `slug` as spelled by
    /// the first record carrying it.
    pub fn category_name(&self, slug: &str) -> Option<&str> {
        self.posts.iter().find_map(|p| p.category_matching(slug))
    }

    /// Returns the records tagged exactly `tag`. Unlike categories, tags are
    /// compared verbatim, case included.
    pub fn tagged(&self, tag: &str) -> Vec<&PostRecord> {
        self.posts
            .iter()
            .filter(|p| p.tags.iter().any(|t| t == tag))
            .collect()
    }

    /// Case-insensitive substring search over titles, summaries and tags.
    /// Returns `None` when the query is too short to run, which callers treat
    /// as "no query" rather than "no matches".
    pub fn search(&self, text: &str) -> Option<Vec<&PostRecord>> {
        let query = text.to_lowercase();
        if query.chars().count() < MIN_QUERY_LEN {
            return None;
        }

        Some(
            self.posts
                .iter()
                .filter(|p| {
                    p.title.to_lowercase().contains(&query)
                        || p.summary.to_lowercase().contains(&query)
                        || p.tags.iter().any(|t| t.to_lowercase().contains(&query))
                })
                .collect(),
        )
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.posts.iter().flat_map(|p| p.category.iter()))
    }

    /// Distinct tags in first-seen order.
    pub fn tags(&self) -> Vec<&str> {
        distinct(self.posts.iter().flat_map(|p| p.tags.iter()))
    }
}

fn distinct<'a>(items: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    items
        .map(String::as_str)
        .filter(|item| seen.insert(*item))
        .collect()
}

/// The result of loading a [`SearchIndex`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failure to load the index.
#[derive(Debug)]
pub enum Error {
    /// Returned when the index file could not be fetched.
    Fetch(fetch::Error),

    /// Returned when the index file is not a JSON array of post records.
    DeserializeJson(serde_json::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Fetch(err) => err.fmt(f),
            Error::DeserializeJson(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Fetch(err) => Some(err),
            Error::DeserializeJson(err) => Some(err),
        }
    }
}

impl From<fetch::Error> for Error {
    fn from(err: fetch::Error) -> Error {
        Error::Fetch(err)
    }
}

impl From<serde_json::Error> for Error {
    /// Converts a [`serde_json::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator when deserializing the index.
    fn from(err: serde_json::Error) -> Error {
        Error::DeserializeJson(err)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::fetch::MemoryFetcher;

    pub(crate) const INDEX_JSON: &str = r#"[
        {
            "id": "rust/ownership",
            "title": "Ownership en Rust",
            "date": "2025-09-01",
            "category": ["Rust Avanzado"],
            "tags": ["rust", "memoria"],
            "summary": "Cómo funciona el borrow checker.",
            "word_count": 480
        },
        {
            "id": "go/goroutines",
            "title": "Goroutines",
            "date": "2025-08-20",
            "category": ["Go"],
            "tags": ["go", "Concurrencia"],
            "summary": "Concurrencia ligera.",
            "word_count": 150
        },
        {
            "id": "rust/async",
            "title": "Async Rust",
            "date": "2025-07-02",
            "category": ["Rust Avanzado", "Concurrencia"],
            "tags": ["rust", "async"],
            "summary": "Futures y executors.",
            "word_count": 0
        }
    ]"#;

    pub(crate) fn sample() -> SearchIndex {
        let fetcher = MemoryFetcher::new().with("search_index.json", INDEX_JSON);
        SearchIndex::load(&fetcher, "search_index.json").unwrap()
    }

    #[test]
    fn test_load_failures() {
        let fetcher = MemoryFetcher::new().with("broken.json", "{not json");
        assert!(matches!(
            SearchIndex::load(&fetcher, "missing.json"),
            Err(Error::Fetch(_))
        ));
        assert!(matches!(
            SearchIndex::load(&fetcher, "broken.json"),
            Err(Error::DeserializeJson(_))
        ));
    }

    #[test]
    fn test_find_first_match_wins() {
        let index = SearchIndex::new(vec![
            serde_json::from_str(r#"{"id": "a", "title": "First"}"#).unwrap(),
            serde_json::from_str(r#"{"id": "a", "title": "Second"}"#).unwrap(),
        ]);
        assert_eq!(index.find("a").map(|p| p.title.as_str()), Some("First"));
        assert!(index.find("b").is_none());
    }

    #[test]
    fn test_in_category() {
        let index = sample();
        let ids: Vec<&str> = index
            .in_category("rust-avanzado")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["rust/ownership", "rust/async"]);
        assert_eq!(index.category_name("rust-avanzado"), Some("Rust Avanzado"));
        assert!(index.in_category("python").is_empty());
    }

    #[test]
    fn test_tagged_counts_exact_matches() {
        let index = sample();
        for tag in index.tags() {
            let expected = index
                .posts()
                .iter()
                .filter(|p| p.tags.iter().any(|t| t == tag))
                .count();
            assert_eq!(index.tagged(tag).len(), expected);
        }
        assert_eq!(index.tagged("rust").len(), 2);
        // Tag matching is case-sensitive.
        assert!(index.tagged("concurrencia").is_empty());
        assert_eq!(index.tagged("Concurrencia").len(), 1);
    }

    #[test]
    fn test_search_short_query() {
        let index = sample();
        assert!(index.search("").is_none());
        assert!(index.search("r").is_none());
        assert!(index.search("Ó").is_none());
    }

    #[test]
    fn test_search_case_insensitive() {
        let index = sample();
        let hits = index.search("GOROUTINES").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "go/goroutines");

        // Matches on tags and summaries too, in index order.
        let hits: Vec<&str> = index
            .search("concurrencia")
            .unwrap()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(hits, vec!["go/goroutines"]);

        assert!(index.search("haskell").unwrap().is_empty());
    }

    #[test]
    fn test_distinct_categories_and_tags() {
        let index = sample();
        assert_eq!(index.categories(), vec!["Rust Avanzado", "Go", "Concurrencia"]);
        assert_eq!(
            index.tags(),
            vec!["rust", "memoria", "go", "Concurrencia", "async"]
        );
    }
}
