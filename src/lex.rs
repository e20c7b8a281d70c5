//! Block-level lexer.
//!
//! Scans a markup string into a sequence of [`Item`]s: one item per heading,
//! paragraph, or list entry, plus keyword sentinels followed by verbatim
//! `Text` lines for their bodies. Inline spans are not tokenized; they ride
//! along in the item value and are resolved during rendering.
//!
//! The scanner is a state machine driven on demand: each call to
//! [`Lexer::next_item`] runs states until at least one item is buffered.
//! Every state either consumes input or transitions toward the terminal
//! `Eof`/`Error` item, of which exactly one ends the stream.

use std::collections::VecDeque;
use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// The kind tag of a lexed [`Item`].
///
/// `Keyword` is never emitted; it sits below the keyword sentinels so that
/// "is this a keyword?" is an ordering check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ItemKind {
    Error,
    Eof,
    Text,
    Paragraph,
    HeadingOne,
    HeadingTwo,
    HeadingThree,
    UnorderedList,
    OrderedList,

    Keyword,
    Title,
    Subtitle,
    Date,
    Author,
    Pre,
    Html,
    Figure,
    Footnotes,
    Blockquote,
}

impl ItemKind {
    /// Whether this kind is one of the `%word` keyword sentinels.
    pub fn is_keyword(self) -> bool {
        self > ItemKind::Keyword
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::Error => "error",
            ItemKind::Eof => "eof",
            ItemKind::Text => "text",
            ItemKind::Paragraph => "paragraph",
            ItemKind::HeadingOne => "heading one",
            ItemKind::HeadingTwo => "heading two",
            ItemKind::HeadingThree => "heading three",
            ItemKind::UnorderedList => "unordered list",
            ItemKind::OrderedList => "ordered list",
            ItemKind::Keyword => "keyword",
            ItemKind::Title => "%title",
            ItemKind::Subtitle => "%subtitle",
            ItemKind::Date => "%date",
            ItemKind::Author => "%author",
            ItemKind::Pre => "%pre",
            ItemKind::Html => "%html",
            ItemKind::Figure => "%figure",
            ItemKind::Footnotes => "%footnotes",
            ItemKind::Blockquote => "%blockquote",
        };
        f.write_str(name)
    }
}

static KEYWORDS: LazyLock<FxHashMap<&'static str, ItemKind>> = LazyLock::new(|| {
    FxHashMap::from_iter([
        // Metadata
        ("%title", ItemKind::Title),
        ("%subtitle", ItemKind::Subtitle),
        ("%date", ItemKind::Date),
        ("%author", ItemKind::Author),
        // Blocks
        ("%pre", ItemKind::Pre),
        ("%html", ItemKind::Html),
        ("%figure", ItemKind::Figure),
        ("%footnotes", ItemKind::Footnotes),
        ("%blockquote", ItemKind::Blockquote),
    ])
});

/// One unit of lexer output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    /// The item's text, a copy of the input in source order. Empty for `Eof`
    /// and for keyword sentinels without a same-line argument.
    pub value: String,
    /// Byte offset of the value's first character; for `Eof`, the input
    /// length.
    pub offset: usize,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ItemKind::Eof => f.write_str("EOF"),
            ItemKind::Error => f.write_str(&self.value),
            k if k.is_keyword() => write!(f, "<{}>", self.value),
            _ if self.value.chars().count() > 10 => {
                let short: String = self.value.chars().take(10).collect();
                write!(f, "{short:?}...")
            }
            _ => write!(f, "{:?}", self.value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Block,
    Keyword,
    KeywordBody,
    Heading,
    UnorderedList,
    OrderedList,
    Paragraph,
    Done,
}

/// Block-level scanner over a markup string.
///
/// Produces items lazily; iterate or call [`next_item`](Lexer::next_item)
/// until the terminal `Eof` or `Error` item, after which the stream is
/// exhausted. A single lexer is single-use and not shareable; lex each
/// document with its own instance.
pub struct Lexer<'a> {
    input: &'a str,
    /// Start of the item currently being scanned.
    start: usize,
    /// Current cursor position.
    pos: usize,
    /// Byte width of the last char returned by `next_char`, for `backup`.
    width: usize,
    state: State,
    items: VecDeque<Item>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            pos: 0,
            width: 0,
            state: State::Block,
            items: VecDeque::new(),
        }
    }

    /// The input string this lexer scans.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the next item, or `None` once the terminal item has been
    /// delivered.
    pub fn next_item(&mut self) -> Option<Item> {
        loop {
            if let Some(item) = self.items.pop_front() {
                return Some(item);
            }
            if self.state == State::Done {
                return None;
            }
            self.state = self.step();
        }
    }

    /// Consumes and discards the rest of the stream, through the terminal
    /// item. Lets a caller that stops reading early shut the scanner down.
    pub fn drain(&mut self) {
        while self.next_item().is_some() {}
    }

    fn step(&mut self) -> State {
        match self.state {
            State::Block => self.lex_block(),
            State::Keyword => self.lex_keyword(),
            State::KeywordBody => self.lex_keyword_body(),
            State::Heading => self.lex_heading(),
            State::UnorderedList => self.lex_unordered_list(),
            State::OrderedList => self.lex_ordered_list(),
            State::Paragraph => self.lex_paragraph(),
            State::Done => State::Done,
        }
    }

    // Cursor primitives.

    fn next_char(&mut self) -> Option<char> {
        match self.input[self.pos..].chars().next() {
            Some(c) => {
                self.width = c.len_utf8();
                self.pos += self.width;
                Some(c)
            }
            None => {
                self.width = 0;
                None
            }
        }
    }

    /// Steps back over the last char returned by `next_char`.
    fn backup(&mut self) {
        self.pos -= self.width;
    }

    fn peek_char(&mut self) -> Option<char> {
        let c = self.next_char();
        self.backup();
        c
    }

    /// Drops the pending input before the cursor.
    fn ignore(&mut self) {
        self.start = self.pos;
    }

    /// Advances the cursor to the next newline (exclusive) or end of input.
    fn scan_line(&mut self) {
        let bytes = self.input.as_bytes();
        self.pos = match memchr::memchr(b'\n', &bytes[self.pos..]) {
            Some(i) => self.pos + i,
            None => bytes.len(),
        };
        self.width = 0;
    }

    fn emit(&mut self, kind: ItemKind) {
        self.items.push_back(Item {
            kind,
            value: self.input[self.start..self.pos].to_string(),
            offset: self.start,
        });
        self.start = self.pos;
    }

    fn emit_eof(&mut self) {
        self.items.push_back(Item {
            kind: ItemKind::Eof,
            value: String::new(),
            offset: self.input.len(),
        });
    }

    fn emit_error(&mut self, message: impl Into<String>) -> State {
        self.items.push_back(Item {
            kind: ItemKind::Error,
            value: message.into(),
            offset: self.start,
        });
        State::Done
    }

    // States.

    /// Dispatch at the start of a block. Skips blank space, then picks the
    /// scanner for the next block from its first character.
    fn lex_block(&mut self) -> State {
        loop {
            match self.next_char() {
                Some('%') => return State::Keyword,
                Some('*') => return State::Heading,
                Some('-') => return State::UnorderedList,
                Some(c) if c.is_ascii_digit() => return State::OrderedList,
                Some(' ' | '\t' | '\n') => self.ignore(),
                Some(_) => {
                    self.backup();
                    return State::Paragraph;
                }
                None => {
                    self.emit_eof();
                    return State::Done;
                }
            }
        }
    }

    /// Scans `%word`, validates it, and emits the sentinel with the rest of
    /// the line as its value.
    fn lex_keyword(&mut self) -> State {
        loop {
            match self.next_char() {
                Some(' ' | '\t' | '\n') => {
                    self.backup();
                    break;
                }
                Some(_) => {}
                None => return self.emit_error("unexpected eof while scanning keyword"),
            }
        }

        let input = self.input;
        let word = &input[self.start..self.pos];
        let Some(&kind) = KEYWORDS.get(word.to_ascii_lowercase().as_str()) else {
            return self.emit_error(format!("unrecognized keyword: {word:?}"));
        };

        // Separator between keyword and argument.
        while let Some(' ' | '\t') = self.next_char() {}
        self.backup();
        self.ignore();

        // The argument runs to the end of the line.
        self.scan_line();
        self.emit(kind);

        // A footnotes body must be an unordered list; hand the sentinel's
        // following lines straight to the list scanner.
        if kind == ItemKind::Footnotes {
            loop {
                match self.next_char() {
                    Some(' ' | '\t' | '\n') => self.ignore(),
                    Some('-') => return State::UnorderedList,
                    _ => return self.emit_error("footnotes must be given as an unordered list"),
                }
            }
        }

        State::KeywordBody
    }

    /// Consumes one body line per step: a blank line closes the block, a line
    /// starting with `%` opens the next keyword, anything else is a verbatim
    /// `Text` item.
    fn lex_keyword_body(&mut self) -> State {
        // The newline ending the previous line, or end of input.
        if self.next_char().is_none() {
            self.emit_eof();
            return State::Done;
        }

        match self.peek_char() {
            None => {
                self.emit_eof();
                State::Done
            }
            Some('%') => {
                self.ignore();
                State::Keyword
            }
            Some('\n') => {
                self.next_char();
                self.ignore();
                State::Block
            }
            Some(_) => {
                self.ignore();
                self.scan_line();
                self.emit(ItemKind::Text);
                State::KeywordBody
            }
        }
    }

    /// Scans `*`-run headings. Stars not followed by whitespace belong to a
    /// paragraph; the consumed stars stay pending so nothing is rescanned.
    fn lex_heading(&mut self) -> State {
        loop {
            match self.next_char() {
                Some('*') => {}
                Some(_) => {
                    self.backup();
                    break;
                }
                None => break,
            }
        }
        let level = self.pos - self.start;

        match self.next_char() {
            Some(' ' | '\t') => {}
            _ => {
                self.backup();
                return State::Paragraph;
            }
        }
        while let Some(' ' | '\t') = self.next_char() {}
        self.backup();
        self.ignore();

        self.scan_line();
        self.emit(match level {
            1 => ItemKind::HeadingOne,
            2 => ItemKind::HeadingTwo,
            _ => ItemKind::HeadingThree,
        });
        State::Block
    }

    /// Scans a `- item` line. A `-` without trailing whitespace belongs to a
    /// paragraph.
    fn lex_unordered_list(&mut self) -> State {
        match self.next_char() {
            Some(' ' | '\t') => {}
            _ => {
                self.backup();
                return State::Paragraph;
            }
        }
        while let Some(' ' | '\t') = self.next_char() {}
        self.backup();
        self.ignore();

        self.scan_line();
        self.emit(ItemKind::UnorderedList);
        State::Block
    }

    /// Scans a `N. item` line. A digit run without `.` plus whitespace
    /// belongs to a paragraph.
    fn lex_ordered_list(&mut self) -> State {
        loop {
            match self.next_char() {
                Some(c) if c.is_ascii_digit() => {}
                Some('.') => break,
                _ => {
                    self.backup();
                    return State::Paragraph;
                }
            }
        }
        match self.next_char() {
            Some(' ' | '\t') => {}
            _ => {
                self.backup();
                return State::Paragraph;
            }
        }
        while let Some(' ' | '\t') = self.next_char() {}
        self.backup();
        self.ignore();

        self.scan_line();
        self.emit(ItemKind::OrderedList);
        State::Block
    }

    /// Consumes non-blank lines into one `Paragraph` item, original newlines
    /// preserved.
    fn lex_paragraph(&mut self) -> State {
        loop {
            self.scan_line();
            if self.pos >= self.input.len() {
                if self.pos > self.start {
                    self.emit(ItemKind::Paragraph);
                }
                self.emit_eof();
                return State::Done;
            }
            // At a newline; a blank line or end of input past it closes the
            // paragraph without the trailing newline.
            match self.input.as_bytes().get(self.pos + 1) {
                None | Some(b'\n') => {
                    self.emit(ItemKind::Paragraph);
                    self.next_char();
                    self.ignore();
                    return State::Block;
                }
                Some(_) => {
                    self.next_char();
                }
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Item;

    fn next(&mut self) -> Option<Item> {
        self.next_item()
    }
}
