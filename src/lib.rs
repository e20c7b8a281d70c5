//! # quillmark
//!
//! Compiler for a lightweight plain-text markup language for blog posts.
//! A document is compiled to an `<article>` HTML fragment by a two-stage
//! pipeline: a state-machine [`Lexer`] that recognizes block-level structure,
//! and a single-lookahead parser that builds a [`Document`] tree and emits
//! HTML.
//!
//! ## Usage
//!
//! ```
//! use quillmark::{HtmlOptions, parse};
//!
//! let doc = parse("%title Hello\n\nMy first post.").unwrap();
//! assert_eq!(doc.title, "Hello");
//!
//! let html = doc.to_html(&HtmlOptions::default());
//! assert!(html.contains("<h1 class=\"title\">Hello</h1>"));
//! assert!(html.contains("<p>My first post.</p>"));
//! ```
//!
//! ## Markup surface
//!
//! | Syntax | Meaning |
//! |---|---|
//! | `%title` `%subtitle` `%date` `%author` | document metadata (one per line) |
//! | `%pre`, `%html`, `%figure [args]`, `%blockquote`, `%footnotes` | block directives; body runs until a blank line or the next directive |
//! | `* text`, `** text`, `*** text` | headings (extra stars collapse to level 3) |
//! | `- text` | unordered list item |
//! | `1. text` | ordered list item |
//! | anything else | paragraph, ended by a blank line |
//! | `https://…` | rewritten to an anchor |
//! | `[fn:N]` | rewritten to a footnote reference |
//!
//! Literal HTML passes through untouched; nothing is escaped.

mod ast;
pub mod inline;
mod lex;
mod parse;
mod render;
mod slug;

pub use ast::{Block, Document};
pub use lex::{Item, ItemKind, Lexer};
pub use parse::parse;
pub use slug::slugify;

/// Options for customizing HTML output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    /// When `true`, suppress the newlines and single-tab indentation that
    /// normally separate elements inside the `<article>` fragment. Content of
    /// `<p>`, `<pre>`, and `<blockquote>` is unaffected. Default: `false`.
    pub minified: bool,
}

/// Error type for compiling a markup document.
///
/// The first failure aborts the compile; no partial [`Document`] is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The lexer rejected the input. The message names what was being
    /// scanned (unknown keyword, eof inside a keyword, footnotes shape).
    #[error("{message} (byte {offset})")]
    Lex { message: String, offset: usize },

    /// A `%date` value that does not parse as `YYYY-MM-DD`.
    #[error("invalid date {value:?} (byte {offset}): expected YYYY-MM-DD")]
    InvalidDate { value: String, offset: usize },

    /// A metadata item the parser does not recognize.
    #[error("unrecognized metadata (byte {offset})")]
    UnknownMetadata { offset: usize },
}

/// Result type alias for quillmark operations.
pub type Result<T> = std::result::Result<T, Error>;
