//! Source scanner: byte cursor and text helpers over solver script text
//!
//! Handles: identifiers, whole-word keywords, bracket depth, quoted string
//! literals, triple-quoted block strings and `#` line comments.
//!
//! Only ASCII bytes are ever compared, so every offset the scanner stops on
//! is a UTF-8 boundary of the original `&str` and can be sliced directly.
//!
//! Guarantees:
//! - Total: malformed brackets, unterminated strings and binary garbage
//!   degrade to "no match", never a panic
//! - Deterministic: same input always produces the same result

/// Position in source text for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Cursor over script text
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `text`
    pub fn new(text: &'a str) -> Self {
        Scanner {
            text,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    // ── Character helpers ──────────────────────────────────

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.text.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.position).copied()
    }

    pub fn advance(&mut self) -> Option<u8> {
        let b = self.peek();
        if let Some(b) = b {
            self.position += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else if !is_continuation_byte(b) {
                self.column += 1;
            }
        }
        b
    }

    pub fn current_span(&self) -> Span {
        Span {
            line: self.line,
            column: self.column,
            offset: self.position,
        }
    }

    /// Advance until the cursor reaches byte `offset`
    pub fn advance_to(&mut self, offset: usize) {
        while self.position < offset && self.advance().is_some() {}
    }

    pub fn starts_with(&self, pattern: &str) -> bool {
        self.text.as_bytes()[self.position.min(self.text.len())..].starts_with(pattern.as_bytes())
    }

    /// Consume `expected` if it is the next byte
    pub fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `keyword` if it appears here as a whole word
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        if !self.starts_with(keyword) || !is_word_boundary(self.text, self.position) {
            return false;
        }
        let end = self.position + keyword.len();
        if !is_word_boundary(self.text, end) {
            return false;
        }
        self.advance_to(end);
        true
    }

    // ── Whitespace & identifiers ───────────────────────────

    /// Skip any whitespace, newlines included; returns how many bytes were skipped
    pub fn skip_whitespace(&mut self) -> usize {
        let start = self.position;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
        self.position - start
    }

    /// Skip spaces and tabs on the current line
    pub fn skip_inline_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
            self.advance();
        }
    }

    pub fn read_identifier(&mut self) -> Option<&'a str> {
        let start = self.position;
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
            _ => return None,
        }
        while let Some(b) = self.peek() {
            if is_word_byte(b) {
                self.advance();
            } else {
                break;
            }
        }
        Some(&self.text[start..self.position])
    }
}

// ── Word boundaries ────────────────────────────────────────

/// `[A-Za-z0-9_]`
pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_continuation_byte(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// True when `offset` does not sit between two word bytes
fn is_word_boundary(text: &str, offset: usize) -> bool {
    let bytes = text.as_bytes();
    let before = offset
        .checked_sub(1)
        .and_then(|i| bytes.get(i))
        .is_some_and(|&b| is_word_byte(b));
    let after = bytes.get(offset).is_some_and(|&b| is_word_byte(b));
    !(before && after)
}

/// Byte offset of the first whole-word occurrence of `word` at or after `from`
pub fn find_word(text: &str, word: &str, from: usize) -> Option<usize> {
    if from > text.len() {
        return None;
    }
    text[from..]
        .match_indices(word)
        .map(|(i, _)| from + i)
        .find(|&start| {
            is_word_boundary(text, start) && is_word_boundary(text, start + word.len())
        })
}

/// Like [`find_word`], but occurrences inside quoted string literals are
/// skipped
pub fn find_keyword(text: &str, word: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = string_end(bytes, i);
                continue;
            }
            _ if bytes[i..].starts_with(word.as_bytes())
                && is_word_boundary(text, i)
                && is_word_boundary(text, i + word.len()) =>
            {
                return Some(i);
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Whole-word search, equivalent to `\bword\b`
pub fn contains_word(text: &str, word: &str) -> bool {
    find_word(text, word, 0).is_some()
}

// ── String literals ────────────────────────────────────────

/// Offset just past the quoted string starting at `start`.
///
/// Single-line semantics: a string that is still open at a newline ends
/// there (the newline itself is not consumed), and one still open at the end
/// of the text ends at the end.
fn string_end(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Remove every `"""…"""` and `'''…'''` span, newlines included.
///
/// Matching is leftmost and non-greedy. An opener with no closing delimiter
/// is left in place.
pub fn strip_block_strings(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i + 3 <= bytes.len() {
        let delimiter = match &bytes[i..i + 3] {
            b"\"\"\"" => Some("\"\"\""),
            b"'''" => Some("'''"),
            _ => None,
        };
        if let Some(delimiter) = delimiter {
            if let Some(close) = text[i + 3..].find(delimiter) {
                out.push_str(&text[copied..i]);
                i += 3 + close + 3;
                copied = i;
                continue;
            }
        }
        i += 1;
    }

    out.push_str(&text[copied..]);
    out
}

/// Remove `#` through end of line on every line.
///
/// A `#` inside a quoted string on the same line is not a comment.
pub fn strip_line_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = string_end(bytes, i),
            b'#' => {
                out.push_str(&text[copied..i]);
                i = text[i..].find('\n').map_or(text.len(), |p| i + p);
                copied = i;
            }
            _ => i += 1,
        }
    }

    out.push_str(&text[copied..]);
    out
}

// ── Bracket-aware splitting ────────────────────────────────

/// Offset of the bracket closing the one at `open`, if any
pub fn matching_close(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth: i32 = 0;
    let mut i = open;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = string_end(bytes, i);
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Trim `expr` and strip one outer `(`…`)` pair if it spans the whole expression.
///
/// `(a, b)` becomes `a, b`; `(a), (b)` is left alone.
pub fn strip_outer_parens(expr: &str) -> &str {
    let expr = expr.trim();
    if expr.starts_with('(') && matching_close(expr, 0) == Some(expr.len() - 1) {
        expr[1..expr.len() - 1].trim()
    } else {
        expr
    }
}

/// Split on commas at bracket depth zero.
///
/// Depth rises on `( [ {` and falls on `) ] }`. Commas and brackets inside
/// quoted strings are ignored. Pieces are trimmed; empty pieces are dropped.
pub fn split_top_level(expr: &str) -> Vec<String> {
    let bytes = expr.as_bytes();
    let mut pieces = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = string_end(bytes, i);
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b',' if depth == 0 => {
                push_piece(&mut pieces, &expr[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    push_piece(&mut pieces, &expr[start..]);
    pieces
}

fn push_piece(pieces: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        pieces.push(piece.to_string());
    }
}

/// End of the logical line starting at `start`.
///
/// A logical line ends at a newline outside brackets (unless escaped with a
/// trailing `\`), at a top-level `;`, or at the end of the text.
pub fn logical_line_end(text: &str, start: usize) -> usize {
    let bytes = text.as_bytes();
    let mut depth: i32 = 0;
    let mut i = start;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = string_end(bytes, i);
                continue;
            }
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b'\\' if bytes.get(i + 1) == Some(&b'\n') => {
                i += 2;
                continue;
            }
            b'\n' | b';' if depth <= 0 => return i,
            _ => {}
        }
        i += 1;
    }
    bytes.len()
}
