use crate::htmlrenderer::push_html;
use crate::toc::Heading;
use pulldown_cmark::{Options, Parser};
use std::fmt;
use std::io;

/// HTML converted from markdown, along with the headings the table of
/// contents is built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rendered {
    pub html: String,
    pub headings: Vec<Heading>,
}

/// Converts markdown to HTML.
///
/// * [`markdown`] is the document body (frontmatter already removed).
/// * [`line_breaks`] renders single newlines inside a paragraph as `<br />`.
pub fn to_html(markdown: &str, line_breaks: bool) -> Result<Rendered, Error> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut html = String::new();
    let headings =
        push_html(&mut html, Parser::new_ext(markdown, options), line_breaks)?;
    Ok(Rendered { html, headings })
}

/// Represents an error converting markdown to HTML.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O errors from the HTML writer.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for Error {
    /// Converts a [`io::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for IO operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
