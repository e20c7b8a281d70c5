//! HTML emission for the document tree.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::HtmlOptions;
use crate::ast::{Block, Document};
use crate::inline::rewrite;
use crate::slug::slugify;

static FIGURE_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="([^"]*)""#).unwrap());

impl Document {
    /// Render the document as an `<article>` HTML fragment.
    ///
    /// Repeated calls with the same options produce byte-identical output.
    ///
    /// # Examples
    ///
    /// ```
    /// use quillmark::{HtmlOptions, parse};
    ///
    /// let doc = parse("%title Hello").unwrap();
    /// assert_eq!(
    ///     doc.to_html(&HtmlOptions { minified: true }),
    ///     "<article><header><h1 class=\"title\">Hello</h1></header></article>",
    /// );
    /// ```
    pub fn to_html(&self, options: &HtmlOptions) -> String {
        let nl = if options.minified { "" } else { "\n" };
        let tab = if options.minified { "" } else { "\t" };

        let mut out = String::with_capacity(256);
        out.push_str("<article>");
        out.push_str(nl);
        self.render_header(&mut out, nl, tab);
        out.push_str(nl);
        for block in &self.content {
            render_block(block, &mut out, nl, tab);
            out.push_str(nl);
        }
        out.push_str("</article>");
        out
    }

    /// The `<header>` always appears, even with no metadata set.
    fn render_header(&self, out: &mut String, nl: &str, tab: &str) {
        out.push_str("<header>");
        out.push_str(nl);
        if !self.title.is_empty() {
            out.push_str(tab);
            let _ = write!(out, "<h1 class=\"title\">{}</h1>", self.title);
            out.push_str(nl);
        }
        if !self.subtitle.is_empty() {
            out.push_str(tab);
            let _ = write!(out, "<p class=\"subtitle\">{}</p>", self.subtitle);
            out.push_str(nl);
        }
        if let Some(date) = self.date {
            out.push_str(tab);
            let _ = write!(
                out,
                "<p class=\"pubdate\"><time datetime=\"{}\">{}</time></p>",
                date.format("%Y-%m-%d"),
                date.format("%B %-d, %Y"),
            );
            out.push_str(nl);
        }
        if !self.author.is_empty() {
            out.push_str(tab);
            let _ = write!(out, "<p class=\"author\">{}</p>", self.author);
            out.push_str(nl);
        }
        out.push_str("</header>");
    }
}

fn render_block(block: &Block, out: &mut String, nl: &str, tab: &str) {
    match block {
        Block::Heading { level, text } => {
            // Stored level 1..=3 maps to h2..=h4, leaving h1 to the title.
            let digit = (b'0' + (*level).min(3) + 1) as char;
            let slug = slugify(text);
            out.push_str("<h");
            out.push(digit);
            let _ = write!(
                out,
                " id=\"{slug}\" class=\"heading\">{} <a class=\"heading-ref\" href=\"#{slug}\">#</a></h",
                rewrite(text),
            );
            out.push(digit);
            out.push('>');
        }
        Block::Paragraph { text } => {
            out.push_str("<p>");
            out.push_str(&rewrite(text));
            out.push_str("</p>");
        }
        Block::UnorderedList { items } => render_list(out, "ul", items, nl, tab),
        Block::OrderedList { items } => render_list(out, "ol", items, nl, tab),
        Block::Blockquote { text } => {
            out.push_str("<blockquote>");
            out.push_str(&rewrite(text));
            out.push_str("</blockquote>");
        }
        Block::Pre { text } => {
            out.push_str("<pre>");
            out.push_str(text);
            out.push_str("</pre>");
        }
        Block::Html { text } => out.push_str(text),
        Block::Figure {
            args,
            html,
            caption,
        } => {
            out.push_str("<figure>");
            out.push_str(nl);
            out.push_str(tab);
            match FIGURE_HREF.captures(args) {
                Some(caps) => {
                    let _ = write!(out, "<a href=\"{}\">{html}</a>", &caps[1]);
                }
                None => out.push_str(html),
            }
            out.push_str(nl);
            if !caption.is_empty() {
                out.push_str(tab);
                let _ = write!(out, "<figcaption>{caption}</figcaption>");
                out.push_str(nl);
            }
            out.push_str("</figure>");
        }
        Block::Footnotes { items } => {
            out.push_str("<footer>");
            out.push_str(nl);
            out.push_str("<ol>");
            out.push_str(nl);
            for (i, item) in items.iter().enumerate() {
                let n = i + 1;
                out.push_str(tab);
                let _ = write!(
                    out,
                    "<li id=\"fn.{n}\">{} <a href=\"#fnr.{n}\">\u{2B90}</a></li>",
                    rewrite(item),
                );
                out.push_str(nl);
            }
            out.push_str("</ol>");
            out.push_str(nl);
            out.push_str("</footer>");
        }
    }
}

fn render_list(out: &mut String, tag: &str, items: &[String], nl: &str, tab: &str) {
    let _ = write!(out, "<{tag}>");
    out.push_str(nl);
    for item in items {
        out.push_str(tab);
        out.push_str("<li>");
        out.push_str(&rewrite(item));
        out.push_str("</li>");
        out.push_str(nl);
    }
    let _ = write!(out, "</{tag}>");
}
