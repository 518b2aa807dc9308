//! Solver script parser: function definition headers and the entry point
//!
//! Recognizes `def <name>(<params>)` headers in raw script text. The
//! parameter list is assumed flat: it runs to the first `)`.
//!
//! A header that is followed (after optional spaces and an optional
//! `-> annotation`) by `:` *opens a block*. Guideline validation only counts
//! block-opening headers; extraction accepts any header.

pub mod scanner;

use scanner::{find_word, Scanner, Span};

/// A `def name(params)` header located in script text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefHeader<'a> {
    /// Function name
    pub name: &'a str,
    /// Raw text between the parentheses
    pub params: &'a str,
    /// Byte offset of `def`
    pub start: usize,
    /// Byte offset just past the closing `)`
    pub end: usize,
    /// Whether the header is followed by the `:` that opens the body
    pub opens_block: bool,
    pub span: Span,
}

/// Iterator over every definition header in a text, in source order.
///
/// The iterator only ever moves forward, so a full pass is linear in the
/// length of the text.
pub struct Definitions<'a> {
    text: &'a str,
    cursor: usize,
    /// Line and column tracking, kept at the last `def` examined
    scanner: Scanner<'a>,
    /// Last `)` search: where it started and what it found
    last_close: Option<(usize, Option<usize>)>,
}

impl<'a> Iterator for Definitions<'a> {
    type Item = DefHeader<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(start) = find_word(self.text, "def", self.cursor) {
            match self.parse_header(start) {
                Some(header) => {
                    self.cursor = header.end;
                    return Some(header);
                }
                None => self.cursor = start + "def".len(),
            }
        }
        self.cursor = self.text.len();
        None
    }
}

impl<'a> Definitions<'a> {
    /// Parse a header whose `def` keyword starts at `start`
    fn parse_header(&mut self, start: usize) -> Option<DefHeader<'a>> {
        self.scanner.advance_to(start);
        let mut scanner = self.scanner.clone();
        let span = scanner.current_span();

        if !scanner.eat_keyword("def") || scanner.skip_whitespace() == 0 {
            return None;
        }
        let name = scanner.read_identifier()?;
        scanner.skip_whitespace();
        if !scanner.eat(b'(') {
            return None;
        }

        let params_start = scanner.position();
        let close = self.close_paren(params_start)?;
        scanner.advance_to(close + 1);
        let end = scanner.position();

        Some(DefHeader {
            name,
            params: &self.text[params_start..close],
            start,
            end,
            opens_block: opens_block(&mut scanner),
            span,
        })
    }

    /// First `)` at or after `from`, reusing the previous search when it
    /// already covers `from`
    fn close_paren(&mut self, from: usize) -> Option<usize> {
        if let Some((searched_from, found)) = self.last_close {
            if searched_from <= from && found.map_or(true, |close| close >= from) {
                return found;
            }
        }
        let found = self.text[from..].find(')').map(|i| from + i);
        self.last_close = Some((from, found));
        found
    }
}

/// All definition headers in `text`
pub fn definitions(text: &str) -> Definitions<'_> {
    Definitions {
        text,
        cursor: 0,
        scanner: Scanner::new(text),
        last_close: None,
    }
}

/// The first header defining `name`, block-opening or not
pub fn find_entry_point<'a>(text: &'a str, name: &str) -> Option<DefHeader<'a>> {
    definitions(text).find(|header| header.name == name)
}

/// The first block-opening header defining `name`
pub fn find_entry_block<'a>(text: &'a str, name: &str) -> Option<DefHeader<'a>> {
    definitions(text).find(|header| header.name == name && header.opens_block)
}

/// `:` after optional spaces and an optional `-> annotation` on the same line
fn opens_block(scanner: &mut Scanner<'_>) -> bool {
    scanner.skip_inline_whitespace();
    if scanner.starts_with("->") {
        while let Some(b) = scanner.peek() {
            if b == b':' || b == b'\n' {
                break;
            }
            scanner.advance();
        }
    }
    scanner.eat(b':')
}
