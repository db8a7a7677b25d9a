//! Splits a raw Markdown document into its frontmatter metadata and body.
//!
//! The frontmatter is a block of `key: value` lines between two `---` fence
//! lines at the very top of the document:
//!
//! ```md
//! ---
//! title: Hola
//! tags: [rust, "memoria"]
//! ---
//! # Hola
//! ```
//!
//! Values wrapped in brackets become [`Value::List`]s. Parsing never fails:
//! anything that doesn't look like a frontmatter block is left in the body.

use std::collections::BTreeMap;

const FENCE: &str = "---";

/// A frontmatter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::Scalar(_) => None,
            Value::List(items) => Some(items),
        }
    }
}

/// A document split into metadata and body text. Lives only as long as it
/// takes to render the view that fetched it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedDocument {
    pub metadata: BTreeMap<String, Value>,
    pub body: String,
}

impl ParsedDocument {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}

/// Parses `raw` into a [`ParsedDocument`]. Without a complete frontmatter
/// block the metadata is empty and the body is all of `raw`.
pub fn parse(raw: &str) -> ParsedDocument {
    match split(raw) {
        None => ParsedDocument {
            metadata: BTreeMap::new(),
            body: raw.to_owned(),
        },
        Some((frontmatter, body)) => ParsedDocument {
            metadata: frontmatter.lines().filter_map(parse_line).collect(),
            body: body.to_owned(),
        },
    }
}

// Returns the frontmatter lines and the body, or `None` if either fence is
// missing.
fn split(raw: &str) -> Option<(&str, &str)> {
    let trimmed = raw.trim_start();
    let first_line_end = trimmed.find('\n').unwrap_or_else(|| trimmed.len());
    if trimmed[..first_line_end].trim_end() != FENCE {
        return None;
    }

    let rest = trimmed.get(first_line_end + 1..)?;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim() == FENCE {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_line(line: &str) -> Option<(String, Value)> {
    let colon = line.find(':')?;
    let key = line[..colon].trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_owned(), parse_value(line[colon + 1..].trim())))
}

fn parse_value(value: &str) -> Value {
    if value.len() >= 2 && value.starts_with('[') && value.ends_with(']') {
        let inner = value[1..value.len() - 1].trim();
        if inner.is_empty() {
            return Value::List(Vec::new());
        }
        return Value::List(
            inner
                .split(',')
                .map(|item| item.trim().replace('"', ""))
                .collect(),
        );
    }

    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return Value::Scalar(value[1..value.len() - 1].to_owned());
    }
    Value::Scalar(value.to_owned())
}
