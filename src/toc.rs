//! The table of contents: the `h1`–`h3` headings of the current content, in
//! document order, each linked by an anchor derived from its text.

use crate::util::{escape, slugify};

/// The deepest heading level listed in the table of contents.
pub const MAX_LEVEL: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    pub level: u32,
    pub text: String,

    /// The anchor: lowercased text with whitespace runs turned into `-`.
    /// Identical headings get identical anchors.
    pub id: String,
}

impl Heading {
    pub fn new<S: Into<String>>(level: u32, text: S) -> Self {
        let text = text.into();
        Heading {
            level,
            id: slugify(&text),
            text,
        }
    }
}

/// Renders the table of contents for `headings`; empty when there are none.
pub fn render(headings: &[Heading]) -> String {
    if headings.is_empty() {
        return String::new();
    }

    let mut html = String::from("<ul>");
    for heading in headings {
        html.push_str(&format!(
            r##"<li><a href="#{}">{}</a></li>"##,
            escape(&heading.id),
            escape(&heading.text)
        ));
    }
    html.push_str("</ul>");
    html
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_render() {
        let headings = vec![
            Heading::new(1, "Hola Mundo"),
            Heading::new(2, "Uso  de <T>"),
        ];
        assert_eq!(
            render(&headings),
            r##"<ul><li><a href="#hola-mundo">Hola Mundo</a></li><li><a href="#uso-de-&lt;t&gt;">Uso  de &lt;T&gt;</a></li></ul>"##
        );
    }

    #[test]
    fn test_duplicate_headings_share_anchor() {
        assert_eq!(Heading::new(2, "Notas").id, Heading::new(3, "Notas").id);
    }
}
