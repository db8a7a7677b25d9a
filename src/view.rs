//! View generators: each turns a route's inputs (the search index and, for
//! documents, the fetched source) into the HTML fragment that replaces the
//! content region.

use crate::config::Labels;
use crate::frontmatter::ParsedDocument;
use crate::index::SearchIndex;
use crate::markdown::{self, Rendered};
use crate::post::PostRecord;
use crate::toc::Heading;
use crate::util::{escape, slugify};

/// A rendered view, ready to be written into the content region.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct View {
    pub html: String,

    /// The headings the table of contents lists. Listings have none.
    pub headings: Vec<Heading>,

    /// Whether code blocks in `html` should be handed to the highlighter.
    pub highlight: bool,
}

impl From<Rendered> for View {
    fn from(rendered: Rendered) -> View {
        View {
            html: rendered.html,
            headings: rendered.headings,
            highlight: false,
        }
    }
}

/// The home document: plain markdown, no metadata.
pub fn home(raw: &str, line_breaks: bool) -> Result<View, markdown::Error> {
    Ok(markdown::to_html(raw, line_breaks)?.into())
}

/// A post or page. The metadata block is rendered only when `post`, the
/// index record for the document, exists.
pub fn document(
    doc: &ParsedDocument,
    post: Option<&PostRecord>,
    line_breaks: bool,
    labels: &Labels,
) -> Result<View, markdown::Error> {
    let rendered = markdown::to_html(&doc.body, line_breaks)?;
    let mut html = match post {
        Some(post) => post_meta(post, labels),
        None => String::new(),
    };
    html.push_str(&rendered.html);
    Ok(View {
        html,
        headings: rendered.headings,
        highlight: true,
    })
}

/// The listing of every post in the category `slug`.
pub fn category(index: &SearchIndex, slug: &str, labels: &Labels) -> View {
    let posts = index.in_category(slug);
    let title = posts
        .first()
        .and_then(|p| p.category_matching(slug))
        .unwrap_or(slug);

    let mut html = format!("<h1>{}</h1>", escape(title));
    if posts.is_empty() {
        html.push_str(&format!("<p>{}</p>", escape(&labels.no_posts_in_category)));
    } else {
        html.push_str(r#"<ul class="category-list">"#);
        for post in posts {
            html.push_str(&format!(
                concat!(
                    r#"<li class="category-post">"#,
                    r##"<h2><a href="#{id}">{title}</a></h2>"##,
                    r#"<p class="post-meta"><span>📅 {date}</span><span>⏳ {minutes} {minutes_read}</span></p>"#,
                    "<p>{summary}</p>",
                    r#"<div class="tags">{tags}</div>"#,
                    "</li>",
                ),
                id = escape(&post.id),
                title = escape(&post.title),
                date = escape(&post.date),
                minutes = post.reading_time(),
                minutes_read = escape(&labels.minutes_read),
                summary = escape(&post.summary),
                tags = tag_links(&post.tags),
            ));
        }
        html.push_str("</ul>");
    }
    View {
        html,
        ..View::default()
    }
}

/// The listing of every post tagged exactly `tag`.
pub fn tag(index: &SearchIndex, tag: &str, labels: &Labels) -> View {
    let posts = index.tagged(tag);
    let mut html = format!(
        r#"<h2>{} "{}"</h2><ul class="category-list">"#,
        escape(&labels.posts_tagged),
        escape(tag)
    );
    if posts.is_empty() {
        html.push_str(&format!("<li>{}</li>", escape(&labels.no_posts_with_tag)));
    }
    for post in posts {
        let categories: String = post
            .category
            .iter()
            .map(|c| {
                format!(
                    "<span>{}: {}</span>",
                    escape(&labels.category),
                    category_link(c)
                )
            })
            .collect();
        html.push_str(&format!(
            concat!(
                "<li>",
                r##"<h2><a href="#{id}">{title}</a></h2>"##,
                r#"<p class="post-meta">{categories}<span>📅 {date}</span><span>⏳ {minutes} {minutes_read}</span></p>"#,
                "<p>{summary}</p>",
                r#"<div class="tags">{tags}</div>"#,
                "</li>",
            ),
            id = escape(&post.id),
            title = escape(&post.title),
            categories = categories,
            date = escape(&post.date),
            minutes = post.reading_time(),
            minutes_read = escape(&labels.minutes_read),
            summary = escape(&post.summary),
            tags = tag_links(&post.tags),
        ));
    }
    html.push_str("</ul>");
    View {
        html,
        ..View::default()
    }
}

/// The search results panel. `None` means the query was too short to run and
/// the panel stays empty.
pub fn search_results(results: Option<&[&PostRecord]>, labels: &Labels) -> String {
    match results {
        None => String::new(),
        Some([]) => format!("<li>{}</li>", escape(&labels.no_results)),
        Some(posts) => posts
            .iter()
            .map(|post| {
                format!(
                    r##"<li><a href="#{}" class="search-result-link">{}</a></li>"##,
                    escape(&post.id),
                    escape(&post.title)
                )
            })
            .collect(),
    }
}

/// The inline message shown in place of content when a navigation fails.
pub fn error(message: &str) -> String {
    format!("<h2>Error</h2><p>{}</p>", escape(message))
}

fn post_meta(post: &PostRecord, labels: &Labels) -> String {
    let categories = post
        .category
        .iter()
        .map(|c| category_link(c))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        concat!(
            r#"<p class="post-meta">"#,
            "<span>{category}: {categories}</span>",
            "<span>{date_label}: {date}</span>",
            "<span>{reading}: {minutes} min</span>",
            "</p>",
            r#"<div class="tags">{tags}</div>"#,
        ),
        category = escape(&labels.category),
        categories = categories,
        date_label = escape(&labels.date),
        date = escape(&post.date),
        reading = escape(&labels.reading),
        minutes = post.reading_time(),
        tags = tag_links(&post.tags),
    )
}

fn category_link(category: &str) -> String {
    format!(
        r##"<a href="#category/{}" class="category-link">{}</a>"##,
        escape(&slugify(category)),
        escape(category)
    )
}

/// Renders `tags` as links to their tag views.
fn tag_links(tags: &[String]) -> String {
    tags.iter()
        .map(|t| {
            let t = escape(t);
            format!(
                r##"<a href="#tag/{}" class="tag-link" data-tag="{}">{}</a>"##,
                t, t, t
            )
        })
        .collect()
}
