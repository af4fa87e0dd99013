//! Content file parsing: front-matter plus page body.
//!
//! A content file starts with a front-matter block fenced by lines that are
//! exactly `---`, carrying a fixed `key: value` schema (`layout` required,
//! `title` optional). Everything after the closing fence is the page body,
//! used verbatim as the `content` binding.

use anyhow::{Context, Result};
use std::{fs, path::Path};
use thiserror::Error;

/// Front-matter fence line.
const FENCE: &str = "---";

/// Front-matter failures. All of them abort the build: a content file
/// without a usable `layout` is an authoring error, not a data error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontMatterError {
    #[error("content file does not start with a `---` front matter fence")]
    Missing,

    #[error("front matter block is never closed by a `---` line")]
    Unterminated,

    #[error("front matter line `{0}` is not a `key: value` pair")]
    MalformedPair(String),

    #[error("front matter is missing the required `layout` key")]
    MissingLayout,
}

/// One parsed content file. Constructed fresh per render, discarded after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDocument {
    /// Layout name, resolved against the store's layout index.
    pub layout: String,
    /// Page title, empty when absent.
    pub title: String,
    /// Verbatim text after the front-matter block, newline-joined.
    pub body: String,
}

impl PageDocument {
    pub fn parse(source: &str) -> Result<Self, FrontMatterError> {
        let mut lines = source.lines();
        match lines.next() {
            Some(line) if line.trim_end() == FENCE => {}
            _ => return Err(FrontMatterError::Missing),
        }

        let mut layout = None;
        let mut title = None;
        let mut closed = false;
        for line in lines.by_ref() {
            if line.trim_end() == FENCE {
                closed = true;
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            let (key, value) = parse_pair(line)?;
            match key {
                "layout" => layout = Some(value.to_owned()),
                "title" => title = Some(value.to_owned()),
                // Fixed schema: anything else is carried by templates, not
                // front-matter, so unknown keys are ignored.
                _ => {}
            }
        }
        if !closed {
            return Err(FrontMatterError::Unterminated);
        }

        Ok(Self {
            layout: layout.ok_or(FrontMatterError::MissingLayout)?,
            title: title.unwrap_or_default(),
            body: lines.collect::<Vec<_>>().join("\n"),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("reading content file `{}`", path.display()))?;
        Self::parse(&source)
            .with_context(|| format!("parsing front matter of `{}`", path.display()))
    }
}

fn parse_pair(line: &str) -> Result<(&str, &str), FrontMatterError> {
    let Some((key, value)) = line.split_once(':') else {
        return Err(FrontMatterError::MalformedPair(line.trim().to_owned()));
    };
    Ok((key.trim(), unquote(value.trim())))
}

/// Strip one pair of symmetric double quotes, if present.
fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout_and_title() {
        let doc = PageDocument::parse("---\nlayout: base\ntitle: Home\n---\nbody").unwrap();
        assert_eq!(doc.layout, "base");
        assert_eq!(doc.title, "Home");
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn test_title_defaults_to_empty() {
        let doc = PageDocument::parse("---\nlayout: base\n---\n").unwrap();
        assert_eq!(doc.title, "");
    }

    #[test]
    fn test_quoted_values_are_unquoted() {
        let doc = PageDocument::parse("---\nlayout: base\ntitle: \"A: B\"\n---\n").unwrap();
        assert_eq!(doc.title, "A: B");
    }

    #[test]
    fn test_body_lines_are_newline_joined() {
        let doc = PageDocument::parse("---\nlayout: base\n---\none\ntwo\nthree").unwrap();
        assert_eq!(doc.body, "one\ntwo\nthree");
    }

    #[test]
    fn test_body_keeps_template_markers_verbatim() {
        let doc = PageDocument::parse("---\nlayout: base\n---\nHello {{site_name}}").unwrap();
        assert_eq!(doc.body, "Hello {{site_name}}");
    }

    #[test]
    fn test_unterminated_block_fails() {
        let err = PageDocument::parse("---\nlayout: base\nbody text").unwrap_err();
        assert_eq!(err, FrontMatterError::Unterminated);
    }

    #[test]
    fn test_missing_front_matter_fails() {
        let err = PageDocument::parse("just a body").unwrap_err();
        assert_eq!(err, FrontMatterError::Missing);
    }

    #[test]
    fn test_missing_layout_key_fails() {
        let err = PageDocument::parse("---\ntitle: Home\n---\nbody").unwrap_err();
        assert_eq!(err, FrontMatterError::MissingLayout);
    }

    #[test]
    fn test_line_without_colon_fails() {
        let err = PageDocument::parse("---\nlayout base\n---\n").unwrap_err();
        assert_eq!(err, FrontMatterError::MalformedPair("layout base".into()));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let doc = PageDocument::parse("---\nlayout: base\ndraft: true\n---\n").unwrap();
        assert_eq!(doc.layout, "base");
    }

    #[test]
    fn test_blank_lines_in_front_matter_are_skipped() {
        let doc = PageDocument::parse("---\nlayout: base\n\ntitle: T\n---\n").unwrap();
        assert_eq!(doc.title, "T");
    }
}
