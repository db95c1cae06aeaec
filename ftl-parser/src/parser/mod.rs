//! Entry-level grammar: resource, entry, comment, message, term, attribute,
//! pattern and dedentation, plus error recovery into Junk.
//!
//! Every routine returns `Result` and short-circuits with `?`; the entry
//! boundary in `get_entry_or_junk` is the only place errors are inspected
//! before falling through to Junk packaging.

mod expr;
#[cfg(test)]
mod test;

use ftl_ast::error::{ErrorKind, ParseError};
use ftl_ast::*;

use crate::stream::{ParserStream, EOL};
use crate::Parser;

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// A transient token of the pattern builder: the blank lines before one
/// continuation line plus that line's inline indent. During dedent it is
/// folded into adjacent text, promoted to a text element, or discarded; it
/// never escapes the builder.
enum RawPatternElement {
    Text(TextElement),
    Placeable(Placeable),
    Indent {
        value: String,
        start: usize,
        end: usize,
    },
}

impl Parser {
    fn span(&self, start: usize, end: usize) -> Option<Span> {
        self.with_spans.then_some(Span::new(start, end))
    }

    pub(crate) fn get_resource(&self, ps: &mut ParserStream) -> Resource {
        ps.skip_blank_block();

        let mut body: Vec<Entry> = Vec::new();
        let mut last_comment: Option<Comment> = None;

        while ps.current_char().is_some() {
            let entry = self.get_entry_or_junk(ps);
            let blank_lines = ps.skip_blank_block();

            // A standalone comment may attach to the entry that follows it.
            // Group and resource comments never do, and neither does a
            // comment separated by a blank line or sitting at EOF. Whether
            // the next entry accepts the comment is only known once it has
            // parsed, so stash it for one iteration.
            match entry {
                Entry::Comment(comment)
                    if blank_lines.is_empty() && ps.current_char().is_some() =>
                {
                    last_comment = Some(comment);
                    continue;
                }
                mut entry => {
                    if let Some(comment) = last_comment.take() {
                        match &mut entry {
                            Entry::Message(message) => {
                                if let (Some(span), Some(comment_span)) =
                                    (&mut message.span, &comment.span)
                                {
                                    span.start = comment_span.start;
                                }
                                message.comment = Some(comment);
                            }
                            Entry::Term(term) => {
                                if let (Some(span), Some(comment_span)) =
                                    (&mut term.span, &comment.span)
                                {
                                    span.start = comment_span.start;
                                }
                                term.comment = Some(comment);
                            }
                            _ => body.push(Entry::Comment(comment)),
                        }
                    }
                    body.push(entry);
                }
            }
        }

        Resource {
            body,
            span: self.span(0, ps.index),
        }
    }

    /// Parse one entry, or package the failed region as Junk and resume at
    /// the next plausible entry start.
    fn get_entry_or_junk(&self, ps: &mut ParserStream) -> Entry {
        let entry_start = ps.index;

        let parsed = self.get_entry(ps).and_then(|entry| {
            ps.expect_line_end()?;
            Ok(entry)
        });

        match parsed {
            Ok(entry) => {
                log::trace!("{} entry at {entry_start}..{}", entry.as_ref(), ps.index);
                entry
            }
            Err(err) => {
                let mut error_index = err.pos;
                ps.skip_to_next_entry_start(entry_start);
                let next_entry_start = ps.index;
                if next_entry_start < error_index {
                    // Annotations stay inside their Junk span.
                    error_index = next_entry_start;
                }
                log::debug!(
                    "junk at {entry_start}..{next_entry_start}: {}",
                    err.kind.code()
                );
                let annotation = Annotation {
                    code: err.kind.code(),
                    arguments: err.kind.arguments(),
                    message: err.kind.to_string(),
                    span: Span::point(error_index),
                };
                Entry::Junk(Junk {
                    annotations: vec![annotation],
                    content: ps.slice(entry_start, next_entry_start).to_string(),
                    span: self.span(entry_start, next_entry_start),
                })
            }
        }
    }

    fn get_entry(&self, ps: &mut ParserStream) -> ParseResult<Entry> {
        match ps.current_char() {
            Some('#') => self.get_comment(ps),
            Some('-') => Ok(Entry::Term(self.get_term(ps)?)),
            Some(_) if ps.is_identifier_start() => Ok(Entry::Message(self.get_message(ps)?)),
            _ => Err(ParseError::new(ErrorKind::ExpectedEntry, ps.index)),
        }
    }

    fn get_comment(&self, ps: &mut ParserStream) -> ParseResult<Entry> {
        let start = ps.index;
        // The sigil count on the first line fixes the level for the entry.
        let mut level: i8 = -1;
        let mut content = String::new();

        loop {
            let mut i: i8 = -1;
            let max = if level == -1 { 2 } else { level };
            while ps.current_char() == Some('#') && i < max {
                ps.next();
                i += 1;
            }
            if level == -1 {
                level = i;
            }

            if ps.current_char() != Some(EOL) {
                ps.expect_char(' ')?;
                while let Some(ch) = ps.take_char(|ch| ch != EOL) {
                    content.push(ch);
                }
            }

            if ps.is_next_line_comment(level) {
                content.push(EOL);
                ps.next();
            } else {
                break;
            }
        }

        let comment = Comment {
            content,
            span: self.span(start, ps.index),
        };
        Ok(match level {
            0 => Entry::Comment(comment),
            1 => Entry::GroupComment(comment),
            _ => Entry::ResourceComment(comment),
        })
    }

    fn get_message(&self, ps: &mut ParserStream) -> ParseResult<Message> {
        let start = ps.index;
        let id = self.get_identifier(ps)?;
        ps.skip_blank_inline();
        ps.expect_char('=')?;

        let value = self.maybe_get_pattern(ps)?;
        let attributes = self.get_attributes(ps)?;

        if value.is_none() && attributes.is_empty() {
            return Err(ParseError::new(
                ErrorKind::ExpectedMessageField { entry_id: id.name },
                ps.index,
            ));
        }

        Ok(Message {
            id,
            value,
            attributes,
            comment: None,
            span: self.span(start, ps.index),
        })
    }

    fn get_term(&self, ps: &mut ParserStream) -> ParseResult<Term> {
        let start = ps.index;
        ps.expect_char('-')?;
        let id = self.get_identifier(ps)?;
        ps.skip_blank_inline();
        ps.expect_char('=')?;

        let Some(value) = self.maybe_get_pattern(ps)? else {
            return Err(ParseError::new(
                ErrorKind::ExpectedTermField { entry_id: id.name },
                ps.index,
            ));
        };
        let attributes = self.get_attributes(ps)?;

        Ok(Term {
            id,
            value,
            attributes,
            comment: None,
            span: self.span(start, ps.index),
        })
    }

    fn get_attribute(&self, ps: &mut ParserStream) -> ParseResult<Attribute> {
        let start = ps.index;
        ps.expect_char('.')?;
        let id = self.get_identifier(ps)?;
        ps.skip_blank_inline();
        ps.expect_char('=')?;

        let Some(value) = self.maybe_get_pattern(ps)? else {
            return Err(ParseError::new(ErrorKind::MissingValue, ps.index));
        };

        Ok(Attribute {
            id,
            value,
            span: self.span(start, ps.index),
        })
    }

    fn get_attributes(&self, ps: &mut ParserStream) -> ParseResult<Vec<Attribute>> {
        let mut attributes = Vec::new();
        ps.peek_blank();
        while ps.is_attribute_start() {
            ps.skip_to_peek();
            attributes.push(self.get_attribute(ps)?);
            ps.peek_blank();
        }
        Ok(attributes)
    }

    pub(crate) fn get_identifier(&self, ps: &mut ParserStream) -> ParseResult<Identifier> {
        let start = ps.index;
        let mut name = String::new();
        name.push(ps.take_id_start()?);
        while let Some(ch) = ps.take_id_char() {
            name.push(ch);
        }
        Ok(Identifier {
            name,
            span: self.span(start, ps.index),
        })
    }

    /// An inline pattern starts on the current line; a block pattern starts
    /// on a later, continuing line. Returns `None` when neither does.
    fn maybe_get_pattern(&self, ps: &mut ParserStream) -> ParseResult<Option<Pattern>> {
        ps.peek_blank_inline();
        if ps.is_value_start() {
            ps.skip_to_peek();
            return Ok(Some(self.get_pattern(ps, false)?));
        }

        ps.peek_blank_block();
        if ps.is_value_continuation() {
            ps.skip_to_peek();
            return Ok(Some(self.get_pattern(ps, true)?));
        }

        Ok(None)
    }

    fn get_pattern(&self, ps: &mut ParserStream, is_block: bool) -> ParseResult<Pattern> {
        let start = ps.index;
        let mut elements: Vec<RawPatternElement> = Vec::new();

        // The minimum indent across continuation lines, stripped during
        // dedent. A block pattern's first line seeds it.
        let mut common_indent = if is_block {
            let blank_start = ps.index;
            let first_indent = ps.skip_blank_inline();
            elements.push(RawPatternElement::Indent {
                value: first_indent.to_string(),
                start: blank_start,
                end: ps.index,
            });
            first_indent.len()
        } else {
            usize::MAX
        };

        while let Some(ch) = ps.current_char() {
            match ch {
                EOL => {
                    let blank_start = ps.index;
                    let blank_lines = ps.peek_blank_block();
                    if !ps.is_value_continuation() {
                        // A newline not followed by a continuation ends the
                        // pattern.
                        ps.reset_peek(0);
                        break;
                    }
                    ps.skip_to_peek();
                    let indent = ps.skip_blank_inline();
                    common_indent = common_indent.min(indent.len());
                    elements.push(RawPatternElement::Indent {
                        value: blank_lines + indent,
                        start: blank_start,
                        end: ps.index,
                    });
                }
                '{' => {
                    elements.push(RawPatternElement::Placeable(self.get_placeable(ps)?));
                }
                '}' => {
                    return Err(ParseError::new(ErrorKind::UnbalancedClosingBrace, ps.index));
                }
                _ => {
                    elements.push(RawPatternElement::Text(self.get_text_element(ps)));
                }
            }
        }

        Ok(Pattern {
            elements: self.dedent(elements, common_indent),
            span: self.span(start, ps.index),
        })
    }

    fn get_text_element(&self, ps: &mut ParserStream) -> TextElement {
        let start = ps.index;
        let mut value = String::new();
        while let Some(ch) = ps.current_char() {
            if matches!(ch, '{' | '}' | EOL) {
                break;
            }
            value.push(ch);
            ps.next();
        }
        TextElement {
            value,
            span: self.span(start, ps.index),
        }
    }

    /// Strip the common indent from every Indent token, fold the survivors
    /// into adjacent text, and trim trailing whitespace off the pattern.
    fn dedent(
        &self,
        elements: Vec<RawPatternElement>,
        common_indent: usize,
    ) -> Vec<PatternElement> {
        let mut trimmed: Vec<PatternElement> = Vec::with_capacity(elements.len());

        for element in elements {
            let (value, start, end) = match element {
                RawPatternElement::Placeable(placeable) => {
                    trimmed.push(PatternElement::Placeable(placeable));
                    continue;
                }
                RawPatternElement::Indent { value, start, end } => {
                    // The minimum over all indents never exceeds this one,
                    // and the stripped tail is all spaces.
                    let stripped = value.len() - common_indent;
                    if stripped == 0 {
                        continue;
                    }
                    let mut value = value;
                    value.truncate(stripped);
                    (value, start, end)
                }
                RawPatternElement::Text(text) => {
                    let span = text.span;
                    (
                        text.value,
                        span.map_or(0, |s| s.start),
                        span.map_or(0, |s| s.end),
                    )
                }
            };

            // Join adjacent text by extending the previous element.
            if let Some(PatternElement::TextElement(prev)) = trimmed.last_mut() {
                prev.value.push_str(&value);
                if let Some(span) = &mut prev.span {
                    span.end = end;
                }
                continue;
            }

            trimmed.push(PatternElement::TextElement(TextElement {
                value,
                span: self.span(start, end),
            }));
        }

        let mut drop_last = false;
        if let Some(PatternElement::TextElement(last)) = trimmed.last_mut() {
            let kept = last.value.trim_end_matches([' ', '\t', '\n', '\r']).len();
            if kept == 0 {
                drop_last = true;
            } else {
                // The value may be shorter than its source range once indents
                // are stripped, so the span end moves back by the trimmed
                // byte count; the trimmed run is ASCII whitespace.
                let removed = last.value.len() - kept;
                last.value.truncate(kept);
                if let Some(span) = &mut last.span {
                    span.end -= removed;
                }
            }
        }
        if drop_last {
            trimmed.pop();
        }

        trimmed
    }
}
