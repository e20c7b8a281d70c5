//! Parser: groups lexer items into a [`Document`] tree.

use chrono::NaiveDate;

use crate::ast::{Block, Document};
use crate::lex::{Item, ItemKind, Lexer};
use crate::{Error, Result};

/// Parse a markup string into a [`Document`].
///
/// The first lexer or metadata error aborts the parse; no partial document
/// is returned.
///
/// # Examples
///
/// ```
/// use quillmark::{Block, parse};
///
/// let doc = parse("%date 2024-03-09\n\n* Intro").unwrap();
/// assert!(doc.date.is_some());
/// assert!(matches!(&doc.content[0], Block::Heading { level: 1, .. }));
/// ```
pub fn parse(input: &str) -> Result<Document> {
    Parser::new(input).parse_document()
}

/// Pulls items from the lexer with single-item pushback.
struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Item>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            peeked: None,
        }
    }

    fn next_item(&mut self) -> Item {
        if let Some(item) = self.peeked.take() {
            return item;
        }
        // The lexer stream ends with a terminal item and the dispatch loop
        // stops there, so this branch only synthesizes a stand-in if an item
        // is requested past the end.
        self.lexer.next_item().unwrap_or_else(|| Item {
            kind: ItemKind::Eof,
            value: String::new(),
            offset: self.lexer.input().len(),
        })
    }

    fn backup(&mut self, item: Item) {
        self.peeked = Some(item);
    }

    fn parse_document(&mut self) -> Result<Document> {
        let mut doc = Document::default();
        loop {
            let item = self.next_item();
            match item.kind {
                ItemKind::Eof => break,
                ItemKind::Error => {
                    self.lexer.drain();
                    return Err(Error::Lex {
                        message: item.value,
                        offset: item.offset,
                    });
                }

                ItemKind::Title | ItemKind::Subtitle | ItemKind::Date | ItemKind::Author => {
                    self.metadata(&mut doc, item)?;
                }

                ItemKind::Paragraph => doc.content.push(Block::Paragraph { text: item.value }),
                // A body line outside any keyword block (e.g. directly below
                // a metadata directive) reads as a paragraph.
                ItemKind::Text => doc.content.push(Block::Paragraph { text: item.value }),

                ItemKind::HeadingOne => doc.content.push(Block::Heading {
                    level: 1,
                    text: item.value,
                }),
                ItemKind::HeadingTwo => doc.content.push(Block::Heading {
                    level: 2,
                    text: item.value,
                }),
                ItemKind::HeadingThree => doc.content.push(Block::Heading {
                    level: 3,
                    text: item.value,
                }),

                ItemKind::UnorderedList => {
                    self.backup(item);
                    let items = self.collect_values(ItemKind::UnorderedList);
                    doc.content.push(Block::UnorderedList { items });
                }
                ItemKind::OrderedList => {
                    self.backup(item);
                    let items = self.collect_values(ItemKind::OrderedList);
                    doc.content.push(Block::OrderedList { items });
                }
                ItemKind::Footnotes => {
                    let items = self.collect_values(ItemKind::UnorderedList);
                    doc.content.push(Block::Footnotes { items });
                }

                ItemKind::Figure => {
                    let block = self.figure(item);
                    doc.content.push(block);
                }

                ItemKind::Blockquote => {
                    let text = self.collect_values(ItemKind::Text).join("\n");
                    doc.content.push(Block::Blockquote { text });
                }
                ItemKind::Pre => {
                    let text = self.collect_values(ItemKind::Text).join("\n");
                    doc.content.push(Block::Pre { text });
                }
                ItemKind::Html => {
                    let text = self.collect_values(ItemKind::Text).join("\n");
                    doc.content.push(Block::Html { text });
                }

                // Comparison pivot, never emitted by the lexer.
                ItemKind::Keyword => {}
            }
        }
        Ok(doc)
    }

    /// Applies one metadata item: last writer wins, empty values are no-ops.
    fn metadata(&mut self, doc: &mut Document, item: Item) -> Result<()> {
        if item.value.is_empty() {
            return Ok(());
        }
        match item.kind {
            ItemKind::Title => doc.title = item.value,
            ItemKind::Subtitle => doc.subtitle = item.value,
            ItemKind::Author => doc.author = item.value,
            ItemKind::Date => {
                let date = NaiveDate::parse_from_str(&item.value, "%Y-%m-%d").map_err(|_| {
                    Error::InvalidDate {
                        value: item.value.clone(),
                        offset: item.offset,
                    }
                })?;
                doc.date = Some(date);
            }
            _ => return Err(Error::UnknownMetadata { offset: item.offset }),
        }
        Ok(())
    }

    /// Gathers the values of consecutive items of `kind`; the first
    /// non-matching item is pushed back.
    fn collect_values(&mut self, kind: ItemKind) -> Vec<String> {
        let mut values = Vec::new();
        loop {
            let item = self.next_item();
            if item.kind == kind {
                values.push(item.value);
            } else {
                self.backup(item);
                return values;
            }
        }
    }

    /// A figure is its argument string, one line of literal HTML, and an
    /// optional caption line.
    fn figure(&mut self, item: Item) -> Block {
        let args = item.value;
        let mut html = String::new();
        let mut caption = String::new();

        let next = self.next_item();
        if next.kind == ItemKind::Text {
            html = next.value;
            let next = self.next_item();
            if next.kind == ItemKind::Text {
                caption = next.value;
            } else {
                self.backup(next);
            }
        } else {
            self.backup(next);
        }

        Block::Figure {
            args,
            html,
            caption,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_fields() {
        let doc = parse("%title A Title\n%subtitle sub\n%date 2006-01-02\n%author me\n").unwrap();
        assert_eq!(doc.title, "A Title");
        assert_eq!(doc.subtitle, "sub");
        assert_eq!(doc.author, "me");
        assert_eq!(doc.date, NaiveDate::from_ymd_opt(2006, 1, 2));
        assert!(doc.content.is_empty());
    }

    #[test]
    fn later_metadata_wins_but_empty_is_ignored() {
        let doc = parse("%title first\n\n%title second\n\n%title\t\n").unwrap();
        assert_eq!(doc.title, "second");
    }

    #[test]
    fn invalid_date_is_rejected() {
        let err = parse("%date 123123123123").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidDate {
                value: "123123123123".to_string(),
                offset: 6,
            }
        );
    }

    #[test]
    fn lexer_errors_surface_with_offset() {
        let err = parse("ok\n\n%bogus x").unwrap_err();
        match err {
            Error::Lex { message, offset } => {
                assert_eq!(message, "unrecognized keyword: \"%bogus\"");
                assert_eq!(offset, 4);
            }
            other => panic!("expected lex error, got {other:?}"),
        }
    }

    #[test]
    fn consecutive_list_items_group_into_one_block() {
        let doc = parse("- one\n- two\n\n- three").unwrap();
        assert_eq!(
            doc.content,
            vec![
                Block::UnorderedList {
                    items: vec!["one".to_string(), "two".to_string()],
                },
                Block::UnorderedList {
                    items: vec!["three".to_string()],
                },
            ]
        );
    }

    #[test]
    fn figure_caption_is_optional() {
        let doc = parse("%figure\n<img src=\"a.jpg\"/>\n\nafter").unwrap();
        assert_eq!(
            doc.content,
            vec![
                Block::Figure {
                    args: String::new(),
                    html: "<img src=\"a.jpg\"/>".to_string(),
                    caption: String::new(),
                },
                Block::Paragraph {
                    text: "after".to_string(),
                },
            ]
        );
    }

    #[test]
    fn keyword_bodies_join_lines() {
        let doc = parse("%blockquote\nlorem\nipsum\n\n%pre\n  a\n  b").unwrap();
        assert_eq!(
            doc.content,
            vec![
                Block::Blockquote {
                    text: "lorem\nipsum".to_string(),
                },
                Block::Pre {
                    text: "  a\n  b".to_string(),
                },
            ]
        );
    }

    #[test]
    fn body_line_below_metadata_reads_as_a_paragraph() {
        let doc = parse("%title x\nbody").unwrap();
        assert_eq!(doc.title, "x");
        assert_eq!(
            doc.content,
            vec![Block::Paragraph {
                text: "body".to_string(),
            }]
        );
    }

    #[test]
    fn footnotes_collect_list_items() {
        let doc = parse("%footnotes\n- foo\n- bar").unwrap();
        assert_eq!(
            doc.content,
            vec![Block::Footnotes {
                items: vec!["foo".to_string(), "bar".to_string()],
            }]
        );
    }
}
