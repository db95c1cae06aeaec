//! The dual-cursor character stream the grammar reads from.
//!
//! Two cursors: a commit index (bytes consumed) and a peek offset (lookahead
//! distance from the commit index). The grammar speculatively inspects
//! upcoming blanks and newlines through the peek cursor to decide, for
//! example, whether an indented line continues a pattern, and then either
//! commits the peeked range or resets it.
//!
//! CRLF is folded at this level: wherever the stream would report `\r`
//! followed by `\n` it reports `\n` and advances over both bytes, so no
//! downstream rule ever sees `\r`. Indices remain true byte offsets into the
//! original source.

use ftl_ast::error::{ErrorKind, ParseError};

pub(crate) const EOL: char = '\n';

/// Characters which, at the start of an indented line, end a pattern:
/// a closing brace, an attribute, or a variant key.
fn is_pattern_continuation(ch: Option<char>) -> bool {
    match ch {
        Some(ch) => !matches!(ch, '}' | '.' | '[' | '*'),
        None => false,
    }
}

pub(crate) fn is_id_start(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

pub(crate) struct ParserStream<'a> {
    source: &'a str,
    pub(crate) index: usize,
    pub(crate) peek_offset: usize,
}

impl<'a> ParserStream<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        ParserStream {
            source,
            index: 0,
            peek_offset: 0,
        }
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    /// Width in bytes of the logical character at `offset`; a CRLF pair is
    /// one logical character spanning two bytes.
    fn width_at(&self, offset: usize) -> Option<usize> {
        match self.source.as_bytes().get(offset)? {
            b'\r' if self.source.as_bytes().get(offset + 1) == Some(&b'\n') => Some(2),
            _ => self.source[offset..].chars().next().map(char::len_utf8),
        }
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        match self.source.as_bytes().get(offset)? {
            b'\r' if self.source.as_bytes().get(offset + 1) == Some(&b'\n') => Some(EOL),
            _ => self.source[offset..].chars().next(),
        }
    }

    pub(crate) fn current_char(&self) -> Option<char> {
        self.char_at(self.index)
    }

    pub(crate) fn current_peek(&self) -> Option<char> {
        self.char_at(self.index + self.peek_offset)
    }

    /// Advance the commit cursor by one logical character and reset the
    /// peek; returns the new current character.
    pub(crate) fn next(&mut self) -> Option<char> {
        self.peek_offset = 0;
        if let Some(width) = self.width_at(self.index) {
            self.index += width;
        }
        self.current_char()
    }

    /// Advance the peek cursor by one logical character; returns the new
    /// peeked character.
    pub(crate) fn peek(&mut self) -> Option<char> {
        if let Some(width) = self.width_at(self.index + self.peek_offset) {
            self.peek_offset += width;
        }
        self.current_peek()
    }

    pub(crate) fn reset_peek(&mut self, offset: usize) {
        self.peek_offset = offset;
    }

    pub(crate) fn skip_to_peek(&mut self) {
        self.index += self.peek_offset;
        self.peek_offset = 0;
    }

    /// Peek over a run of inline blanks (U+0020 only) and return them.
    pub(crate) fn peek_blank_inline(&mut self) -> &'a str {
        let start = self.index + self.peek_offset;
        while self.current_peek() == Some(' ') {
            self.peek();
        }
        &self.source[start..self.index + self.peek_offset]
    }

    pub(crate) fn skip_blank_inline(&mut self) -> &'a str {
        let blank = self.peek_blank_inline();
        self.skip_to_peek();
        blank
    }

    /// Peek over full blank lines. Returns one LF per consumed blank line;
    /// a partial blank line at EOF counts as blank. On a non-blank line the
    /// peek is left at column 1 of that line.
    pub(crate) fn peek_blank_block(&mut self) -> String {
        let mut blank = String::new();
        loop {
            let line_start = self.peek_offset;
            self.peek_blank_inline();
            match self.current_peek() {
                Some(EOL) => {
                    blank.push(EOL);
                    self.peek();
                }
                None => return blank,
                Some(_) => {
                    self.reset_peek(line_start);
                    return blank;
                }
            }
        }
    }

    pub(crate) fn skip_blank_block(&mut self) -> String {
        let blank = self.peek_blank_block();
        self.skip_to_peek();
        blank
    }

    /// Peek over any mix of spaces and newlines.
    pub(crate) fn peek_blank(&mut self) {
        while matches!(self.current_peek(), Some(' ' | EOL)) {
            self.peek();
        }
    }

    pub(crate) fn skip_blank(&mut self) {
        self.peek_blank();
        self.skip_to_peek();
    }

    pub(crate) fn expect_char(&mut self, ch: char) -> Result<(), ParseError> {
        if self.current_char() == Some(ch) {
            self.next();
            return Ok(());
        }
        Err(ParseError::new(ErrorKind::ExpectedToken(ch), self.index))
    }

    /// EOF is a valid line end; a newline is consumed.
    pub(crate) fn expect_line_end(&mut self) -> Result<(), ParseError> {
        match self.current_char() {
            None => Ok(()),
            Some(EOL) => {
                self.next();
                Ok(())
            }
            Some(_) => Err(ParseError::new(
                ErrorKind::ExpectedToken('\u{2424}'),
                self.index,
            )),
        }
    }

    pub(crate) fn take_char(&mut self, f: impl Fn(char) -> bool) -> Option<char> {
        match self.current_char() {
            Some(ch) if f(ch) => {
                self.next();
                Some(ch)
            }
            _ => None,
        }
    }

    pub(crate) fn take_id_start(&mut self) -> Result<char, ParseError> {
        match self.current_char() {
            Some(ch) if is_id_start(ch) => {
                self.next();
                Ok(ch)
            }
            _ => Err(ParseError::new(
                ErrorKind::ExpectedCharRange { range: "a-zA-Z" },
                self.index,
            )),
        }
    }

    pub(crate) fn take_id_char(&mut self) -> Option<char> {
        self.take_char(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
    }

    pub(crate) fn take_digit(&mut self) -> Option<char> {
        self.take_char(|ch| ch.is_ascii_digit())
    }

    pub(crate) fn take_hex_digit(&mut self) -> Option<char> {
        self.take_char(|ch| ch.is_ascii_hexdigit())
    }

    pub(crate) fn is_identifier_start(&self) -> bool {
        matches!(self.current_peek(), Some(ch) if is_id_start(ch))
    }

    pub(crate) fn is_number_start(&mut self) -> bool {
        let ch = if self.current_char() == Some('-') {
            self.peek()
        } else {
            self.current_char()
        };
        let is_digit = matches!(ch, Some(ch) if ch.is_ascii_digit());
        self.reset_peek(0);
        is_digit
    }

    pub(crate) fn is_value_start(&self) -> bool {
        !matches!(self.current_peek(), Some(EOL) | None)
    }

    /// After the end of a line, decides whether the next line continues the
    /// current pattern. True when the line opens a placeable, or when it is
    /// indented and does not start with a pattern-ending character. On true
    /// the peek is restored to column 1 of the line.
    pub(crate) fn is_value_continuation(&mut self) -> bool {
        let column1 = self.peek_offset;
        self.peek_blank_inline();
        if self.current_peek() == Some('{') {
            self.reset_peek(column1);
            return true;
        }
        if self.peek_offset == column1 {
            return false;
        }
        if is_pattern_continuation(self.current_peek()) {
            self.reset_peek(column1);
            return true;
        }
        false
    }

    /// From a commit position on an EOL: does the next line begin with
    /// exactly `level + 1` sigils (1 to 3 when `level` is -1) followed by a
    /// space or a line end?
    pub(crate) fn is_next_line_comment(&mut self, level: i8) -> bool {
        if self.current_char() != Some(EOL) {
            return false;
        }
        let max = if level == -1 { 3 } else { level as usize + 1 };
        let mut count = 0;
        let mut ch = self.peek();
        while ch == Some('#') && count < max {
            count += 1;
            ch = self.peek();
        }
        let sigils_ok = if level == -1 {
            count >= 1
        } else {
            count == max
        };
        let ret = sigils_ok && matches!(ch, Some(' ' | EOL));
        self.reset_peek(0);
        ret
    }

    pub(crate) fn is_variant_start(&mut self) -> bool {
        let offset = self.peek_offset;
        if self.current_peek() == Some('*') {
            self.peek();
        }
        let ret = self.current_peek() == Some('[');
        self.reset_peek(offset);
        ret
    }

    pub(crate) fn is_attribute_start(&self) -> bool {
        self.current_peek() == Some('.')
    }

    /// Resynchronize after a grammar error. Rewinds to the last newline if
    /// it lies after `junk_start` (rewinding is only safe across
    /// fully-skipped lines), then walks forward and stops after any newline
    /// whose next character looks like an entry start. The commit index ends
    /// up at the first character of the next entry, or at EOF.
    pub(crate) fn skip_to_next_entry_start(&mut self, junk_start: usize) {
        let search_end = if self.source.as_bytes().get(self.index) == Some(&b'\n') {
            self.index + 1
        } else {
            self.index.min(self.source.len())
        };
        if let Some(last_newline) = self.source[..search_end].rfind(EOL) {
            if junk_start < last_newline {
                self.index = last_newline;
                self.peek_offset = 0;
            }
        }
        while let Some(ch) = self.current_char() {
            if ch != EOL {
                self.next();
                continue;
            }
            match self.next() {
                Some(first) if is_id_start(first) || first == '-' || first == '#' => break,
                Some(_) => continue,
                None => break,
            }
        }
    }
}
