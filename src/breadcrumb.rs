//! Builds the breadcrumb trail shown above the content: always a link to the
//! home document, followed by segments that depend on the shape of the
//! current route.

use std::fmt;

use crate::config::Config;
use crate::index::SearchIndex;
use crate::route::{split_folder, Route};
use crate::util::{capitalize, escape};

const SEPARATOR: &str = " > ";

/// The page segment that stands for a folder's own index document.
const FOLDER_INDEX: &str = "index";

/// One segment of the trail. The last segment of a post trail has no target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub target: Option<String>,
}

impl Crumb {
    fn link<L: Into<String>, T: Into<String>>(label: L, target: T) -> Self {
        Crumb {
            label: label.into(),
            target: Some(target.into()),
        }
    }

    fn text<L: Into<String>>(label: L) -> Self {
        Crumb {
            label: label.into(),
            target: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumbs(pub Vec<Crumb>);

impl Breadcrumbs {
    /// Builds the trail for `route`, looking posts up in `index` for their
    /// titles and categories.
    pub fn build(route: &Route, index: &SearchIndex, config: &Config) -> Self {
        let labels = &config.labels;
        let mut crumbs = vec![Crumb::link(&labels.home, &config.routing.home)];

        match route {
            Route::Home => {}
            Route::Category(slug) => crumbs.push(Crumb::link(
                index
                    .category_name(slug)
                    .map(str::to_owned)
                    .unwrap_or_else(|| capitalize(slug)),
                format!("category/{}", slug),
            )),
            Route::Tag(tag) => crumbs.push(Crumb::link(
                format!("{}: {}", labels.tag, tag),
                format!("tag/{}", tag),
            )),
            Route::StaticPage { id, .. } | Route::Document(id) => {
                let post = index.find(id);
                match split_folder(id) {
                    None => crumbs.push(Crumb::text(
                        post.map(|p| p.title.as_str()).unwrap_or(id.as_str()),
                    )),
                    Some((folder, rest)) => {
                        let routing = &config.routing;
                        let folder_label = if folder == routing.pages_folder
                            || folder == routing.static_pages_folder
                        {
                            labels.pages.clone()
                        } else if let Some(first) =
                            post.and_then(|p| p.category.first())
                        {
                            first.clone()
                        } else {
                            capitalize(folder)
                        };
                        crumbs.push(Crumb::link(
                            folder_label,
                            format!("category/{}", folder),
                        ));

                        let page = rest.rsplit('/').next().unwrap_or(rest);
                        if page != FOLDER_INDEX {
                            crumbs.push(Crumb::text(
                                post.map(|p| p.title.as_str()).unwrap_or(page),
                            ));
                        }
                    }
                }
            }
        }
        Breadcrumbs(crumbs)
    }

    pub fn to_html(&self) -> String {
        self.0
            .iter()
            .map(|crumb| match &crumb.target {
                Some(target) => format!(
                    r##"<a href="#{}">{}</a>"##,
                    escape(target),
                    escape(&crumb.label)
                ),
                None => escape(&crumb.label),
            })
            .collect::<Vec<_>>()
            .join(&escape(SEPARATOR))
    }
}

impl fmt::Display for Breadcrumbs {
    /// Displays the trail as plain text, e.g. `Home > Etiqueta: rust`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, crumb) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(SEPARATOR)?;
            }
            f.write_str(&crumb.label)?;
        }
        Ok(())
    }
}
