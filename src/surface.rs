//! Defines the [`Surface`] trait, the page regions the router writes into,
//! and [`Screen`], an in-memory surface that simply records what was written.
//! A browser front end implements [`Surface`] over the DOM; the CLI and the
//! tests use [`Screen`].

use crate::config::MenuLink;
use crate::preferences::{Preferences, Theme};

/// The regions of the page and the browser facilities the router drives.
pub trait Surface {
    /// Replaces the main content region.
    fn set_content(&mut self, html: &str);

    fn set_toc(&mut self, html: &str);

    fn set_breadcrumbs(&mut self, html: &str);

    /// Replaces the search results panel.
    fn set_search_results(&mut self, html: &str);

    fn clear_search_input(&mut self);

    /// Writes the category and tag clouds.
    fn set_sidebar(&mut self, categories: &str, tags: &str);

    /// Clears the active side-menu link and marks the one pointing at
    /// `#<token>`, if any.
    fn mark_active(&mut self, token: &str);

    /// Hands the current content to the syntax highlighter.
    fn highlight_code(&mut self);

    fn scroll_to_top(&mut self);

    /// Pushes a history entry for `#<token>`.
    fn push_history(&mut self, token: &str);

    /// Applies theme and font preferences to the page.
    fn apply_preferences(&mut self, preferences: &Preferences);
}

/// A [`Surface`] that keeps every region as a string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Screen {
    pub content: String,
    pub toc: String,
    pub breadcrumbs: String,
    pub search_results: String,
    pub search_input_cleared: bool,
    pub categories: String,
    pub tags: String,
    pub menu: Vec<MenuLink>,

    /// The target of the active menu link.
    pub active: Option<String>,

    /// How many times the highlighter ran.
    pub highlights: usize,

    /// How many times the page scrolled to the top.
    pub scrolls: usize,

    /// Pushed history entries, oldest first.
    pub history: Vec<String>,

    pub dark: bool,
    pub font_family: Option<String>,
    pub font_size: Option<u32>,
}

impl Screen {
    pub fn new(menu: Vec<MenuLink>) -> Self {
        Screen {
            menu,
            ..Screen::default()
        }
    }
}

impl Surface for Screen {
    fn set_content(&mut self, html: &str) {
        self.content = html.to_owned();
    }

    fn set_toc(&mut self, html: &str) {
        self.toc = html.to_owned();
    }

    fn set_breadcrumbs(&mut self, html: &str) {
        self.breadcrumbs = html.to_owned();
    }

    fn set_search_results(&mut self, html: &str) {
        self.search_results = html.to_owned();
    }

    fn clear_search_input(&mut self) {
        self.search_input_cleared = true;
    }

    fn set_sidebar(&mut self, categories: &str, tags: &str) {
        self.categories = categories.to_owned();
        self.tags = tags.to_owned();
    }

    fn mark_active(&mut self, token: &str) {
        self.active = self
            .menu
            .iter()
            .find(|link| link.target == token)
            .map(|link| link.target.clone());
    }

    fn highlight_code(&mut self) {
        self.highlights += 1;
    }

    fn scroll_to_top(&mut self) {
        self.scrolls += 1;
    }

    fn push_history(&mut self, token: &str) {
        self.history.push(token.to_owned());
    }

    fn apply_preferences(&mut self, preferences: &Preferences) {
        self.dark = preferences.theme == Theme::Dark;
        self.font_family = preferences.font_family.clone();
        self.font_size = preferences.font_size;
    }
}
