//! The library code for the `fragmark` site renderer. A site is a folder of
//! markdown documents plus a precomputed `search_index.json`; pages are
//! addressed by URL fragment (`#rust/ownership`, `#tag/async`, ...) and
//! rendered on demand. The architecture breaks down into three layers:
//!
//! 1. Loading inputs: the search index ([`crate::index`]) and documents through
//!    a [`crate::fetch::Fetcher`], with frontmatter split off by
//!    [`crate::frontmatter`].
//! 2. Producing views: [`crate::route`] decides which view a token names and
//!    [`crate::view`] renders it, converting markdown with
//!    [`crate::markdown`].
//! 3. Applying views: [`crate::router::App`] writes the view into a
//!    [`crate::surface::Surface`] and re-derives the table of contents
//!    ([`crate::toc`]), breadcrumbs ([`crate::breadcrumb`]) and active menu
//!    link from it.
//!
//! Theme and font preferences live in [`crate::preferences`], persisted
//! through an injected key/value store.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod breadcrumb;
pub mod config;
pub mod fetch;
pub mod frontmatter;
mod htmlrenderer;
pub mod index;
pub mod markdown;
pub mod post;
pub mod preferences;
pub mod route;
pub mod router;
pub mod sidebar;
pub mod surface;
pub mod toc;
mod util;
pub mod view;
