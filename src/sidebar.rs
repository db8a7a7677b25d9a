//! The category and tag clouds shown in the sidebar, generated once after the
//! search index loads.

use crate::config::Labels;
use crate::index::SearchIndex;
use crate::util::{escape, slugify};

/// Renders the category cloud; empty when the index has no categories.
pub fn category_cloud(index: &SearchIndex, labels: &Labels) -> String {
    let categories = index.categories();
    if categories.is_empty() {
        return String::new();
    }

    let mut html = format!(
        r#"<h3>{}</h3><div class="category-cloud">"#,
        escape(&labels.categories)
    );
    for category in categories {
        let slug = escape(&slugify(category));
        html.push_str(&format!(
            r##"<a href="#category/{}" class="category-link" data-category="{}">{}</a>"##,
            slug,
            slug,
            escape(category)
        ));
    }
    html.push_str("</div>");
    html
}

/// Renders the tag cloud; empty when the index has no tags.
pub fn tag_cloud(index: &SearchIndex, labels: &Labels) -> String {
    let tags = index.tags();
    if tags.is_empty() {
        return String::new();
    }

    let mut html = format!(
        r#"<h3>{}</h3><div class="tag-cloud">"#,
        escape(&labels.tags)
    );
    for tag in tags {
        let tag = escape(tag);
        html.push_str(&format!(
            r##"<a href="#tag/{}" class="tag-link" data-tag="{}">{}</a>"##,
            tag, tag, tag
        ));
    }
    html.push_str("</div>");
    html
}
