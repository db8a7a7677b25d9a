//! Defines the [`PostRecord`] type, one entry of the precomputed search
//! index, plus the reading-time estimate derived from it.

use serde::{Deserialize, Deserializer};

/// Words read per minute when estimating reading time.
pub const WORDS_PER_MINUTE: u64 = 160;

/// The category assigned by the index generator to documents that declare
/// none.
const UNCATEGORIZED: &str = "Sin Categoría";

/// Represents a post as described by `search_index.json`. Records are
/// immutable once loaded and owned by the [`crate::index::SearchIndex`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PostRecord {
    /// The routable token for the post, e.g. `rust/ownership`.
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub date: String,

    /// The categories of the post in declaration order. Accepts a bare string
    /// as a single category.
    #[serde(
        default = "PostRecord::default_category",
        deserialize_with = "PostRecord::deserialize_category"
    )]
    pub category: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub word_count: u64,
}

impl PostRecord {
    /// Estimated minutes to read the post.
    pub fn reading_time(&self) -> u64 {
        reading_time(self.word_count)
    }

    /// Returns the category whose slug equals `slug`, in its original case.
    pub fn category_matching(&self, slug: &str) -> Option<&str> {
        self.category
            .iter()
            .find(|c| crate::util::slugify(c) == slug)
            .map(String::as_str)
    }

    fn default_category() -> Vec<String> {
        vec![UNCATEGORIZED.to_owned()]
    }

    fn deserialize_category<'de, D>(
        deserializer: D,
    ) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(String),
            Many(Vec<String>),
        }

        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(c) => vec![c],
            OneOrMany::Many(v) if v.is_empty() => Self::default_category(),
            OneOrMany::Many(v) => v,
        })
    }
}

/// `ceil(word_count / 160)`; zero words read in zero minutes.
pub fn reading_time(word_count: u64) -> u64 {
    word_count / WORDS_PER_MINUTE
        + u64::from(word_count % WORDS_PER_MINUTE != 0)
}
