//! Slug generation for heading anchors; also consumed by the site generator
//! for post URLs.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\t\n\f\r ]+").unwrap());
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9A-Za-z_-]").unwrap());
static DASH_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Creates a URL-safe identifier: whitespace runs become hyphens, HTML tags
/// are stripped, anything outside `[0-9A-Za-z_-]` is dropped, hyphen runs
/// collapse, and the result is lowercased.
///
/// Idempotent: `slugify(slugify(s)) == slugify(s)`.
///
/// # Examples
///
/// ```
/// use quillmark::slugify;
///
/// assert_eq!(slugify("Example Heading 123"), "example-heading-123");
/// assert_eq!(slugify("  spaced   out  "), "spaced-out");
/// ```
pub fn slugify(text: &str) -> String {
    let slug = text.trim();
    let slug = WHITESPACE.replace_all(slug, "-");
    let slug = HTML_TAG.replace_all(&slug, "");
    let slug = NON_WORD.replace_all(&slug, "");
    let slug = DASH_RUN.replace_all(&slug, "-");
    slug.to_ascii_lowercase()
}
