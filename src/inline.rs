//! Inline rewriting.
//!
//! Block text is HTML already as far as this markup is concerned; the only
//! inline syntax is rewritten by a small table of regex substitutions applied
//! in order. The table covers bare `https://` URLs and `[fn:N]` footnote
//! references. It applies to heading, paragraph, list-item, blockquote, and
//! footnote text; `%pre`, `%html`, and figure bodies stay verbatim.

use std::sync::LazyLock;

use regex::Regex;

/// The rewrite table: `(pattern, replacement)` pairs applied in order.
///
/// Kept as data so the rule set is easy to extend.
pub const REWRITE_RULES: &[(&str, &str)] = &[
    // A bare URL becomes its own anchor; leading whitespace is kept.
    (r"(\s*)(https://\S+)", r#"$1<a href="$2">$2</a>"#),
    // [fn:N] becomes a numbered footnote reference.
    (
        r"\[fn:(\d+)\]",
        r##"<a id="fnr.$1" href="#fn.$1"><sup>[$1]</sup></a>"##,
    ),
];

static REWRITES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    REWRITE_RULES
        .iter()
        .map(|&(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
        .collect()
});

/// Applies [`REWRITE_RULES`] to `text` and trims trailing whitespace.
///
/// # Examples
///
/// ```
/// use quillmark::inline::rewrite;
///
/// assert_eq!(
///     rewrite("example[fn:1]"),
///     "example<a id=\"fnr.1\" href=\"#fn.1\"><sup>[1]</sup></a>",
/// );
/// ```
pub fn rewrite(text: &str) -> String {
    let mut text = text.to_string();
    for (re, replacement) in REWRITES.iter() {
        text = re.replace_all(&text, *replacement).into_owned();
    }
    let trimmed = text.trim_end().len();
    text.truncate(trimmed);
    text
}
