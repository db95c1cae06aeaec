//! Expression grammar: placeables, select expressions, inline expressions,
//! call arguments, variants and literals.

use ftl_ast::error::{ErrorKind, ParseError};
use ftl_ast::*;

use super::ParseResult;
use crate::stream::{ParserStream, EOL};
use crate::Parser;

/// `^[A-Z][A-Z0-9_-]*$`
fn is_callee(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|ch| ch.is_ascii_uppercase())
        && chars.all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_' || ch == '-')
}

/// One parsed call argument, positional or named, before ordering and
/// uniqueness are enforced.
enum CallArgument {
    Positional(InlineExpression),
    Named(NamedArgument),
}

impl Parser {
    pub(super) fn get_placeable(&self, ps: &mut ParserStream) -> ParseResult<Placeable> {
        let start = ps.index;
        ps.expect_char('{')?;
        ps.skip_blank();
        let expression = self.get_expression(ps)?;
        ps.expect_char('}')?;
        Ok(Placeable {
            expression,
            span: self.span(start, ps.index),
        })
    }

    fn get_expression(&self, ps: &mut ParserStream) -> ParseResult<Expression> {
        let start = ps.index;
        let selector = self.get_inline_expression(ps)?;
        ps.skip_blank();

        if ps.current_char() == Some('-') {
            if ps.peek() != Some('>') {
                ps.reset_peek(0);
                return Ok(Expression::Inline(selector));
            }

            match &selector {
                InlineExpression::MessageReference(reference) => {
                    let kind = if reference.attribute.is_none() {
                        ErrorKind::MessageReferenceAsSelector
                    } else {
                        ErrorKind::MessageAttributeAsSelector
                    };
                    return Err(ParseError::new(kind, ps.index));
                }
                InlineExpression::TermReference(reference) if reference.attribute.is_none() => {
                    return Err(ParseError::new(
                        ErrorKind::TermReferenceAsSelector,
                        ps.index,
                    ));
                }
                InlineExpression::Placeable(_) => {
                    return Err(ParseError::new(
                        ErrorKind::ExpectedSimpleExpressionAsSelector,
                        ps.index,
                    ));
                }
                _ => {}
            }

            ps.next();
            ps.next();
            ps.skip_blank_inline();
            ps.expect_line_end()?;

            let variants = self.get_variants(ps)?;
            return Ok(Expression::Select(SelectExpression {
                selector,
                variants,
                span: self.span(start, ps.index),
            }));
        }

        // Term attributes are only valid as selectors.
        if let InlineExpression::TermReference(reference) = &selector {
            if reference.attribute.is_some() {
                return Err(ParseError::new(
                    ErrorKind::TermAttributeAsPlaceable,
                    ps.index,
                ));
            }
        }

        Ok(Expression::Inline(selector))
    }

    pub(super) fn get_inline_expression(
        &self,
        ps: &mut ParserStream,
    ) -> ParseResult<InlineExpression> {
        let start = ps.index;

        if ps.current_char() == Some('{') {
            let placeable = self.get_placeable(ps)?;
            return Ok(InlineExpression::Placeable(Box::new(placeable)));
        }

        if ps.is_number_start() {
            return Ok(InlineExpression::NumberLiteral(self.get_number(ps)?));
        }

        if ps.current_char() == Some('"') {
            return Ok(InlineExpression::StringLiteral(self.get_string(ps)?));
        }

        if ps.current_char() == Some('$') {
            ps.next();
            let id = self.get_identifier(ps)?;
            return Ok(InlineExpression::VariableReference(VariableReference {
                id,
                span: self.span(start, ps.index),
            }));
        }

        if ps.current_char() == Some('-') {
            ps.next();
            let id = self.get_identifier(ps)?;

            let mut attribute = None;
            if ps.current_char() == Some('.') {
                ps.next();
                attribute = Some(self.get_identifier(ps)?);
            }

            let mut arguments = None;
            ps.peek_blank();
            if ps.current_peek() == Some('(') {
                ps.skip_to_peek();
                arguments = Some(self.get_call_arguments(ps)?);
            }

            return Ok(InlineExpression::TermReference(TermReference {
                id,
                attribute,
                arguments,
                span: self.span(start, ps.index),
            }));
        }

        if ps.is_identifier_start() {
            let id = self.get_identifier(ps)?;
            ps.peek_blank();

            if ps.current_peek() == Some('(') {
                if !is_callee(&id.name) {
                    return Err(ParseError::new(ErrorKind::ForbiddenCallee, ps.index));
                }
                ps.skip_to_peek();
                let arguments = self.get_call_arguments(ps)?;
                return Ok(InlineExpression::FunctionReference(FunctionReference {
                    id,
                    arguments,
                    span: self.span(start, ps.index),
                }));
            }

            let mut attribute = None;
            if ps.current_char() == Some('.') {
                ps.next();
                attribute = Some(self.get_identifier(ps)?);
            }

            return Ok(InlineExpression::MessageReference(MessageReference {
                id,
                attribute,
                span: self.span(start, ps.index),
            }));
        }

        Err(ParseError::new(ErrorKind::ExpectedInlineExpression, ps.index))
    }

    fn get_call_argument(&self, ps: &mut ParserStream) -> ParseResult<CallArgument> {
        let start = ps.index;
        let expression = self.get_inline_expression(ps)?;
        ps.skip_blank();

        if ps.current_char() != Some(':') {
            return Ok(CallArgument::Positional(expression));
        }

        // The name of a named argument parses as a message reference.
        match expression {
            InlineExpression::MessageReference(reference) if reference.attribute.is_none() => {
                ps.next();
                ps.skip_blank();
                let value = self.get_literal(ps)?;
                Ok(CallArgument::Named(NamedArgument {
                    name: reference.id,
                    value,
                    span: self.span(start, ps.index),
                }))
            }
            _ => Err(ParseError::new(ErrorKind::ForbiddenKey, ps.index)),
        }
    }

    fn get_call_arguments(&self, ps: &mut ParserStream) -> ParseResult<CallArguments> {
        let start = ps.index;
        let mut positional: Vec<InlineExpression> = Vec::new();
        let mut named: Vec<NamedArgument> = Vec::new();

        ps.expect_char('(')?;
        ps.skip_blank();

        loop {
            if ps.current_char() == Some(')') {
                break;
            }

            match self.get_call_argument(ps)? {
                CallArgument::Named(argument) => {
                    if named.iter().any(|n| n.name.name == argument.name.name) {
                        return Err(ParseError::new(
                            ErrorKind::DuplicatedNamedArgument(argument.name.name),
                            ps.index,
                        ));
                    }
                    named.push(argument);
                }
                CallArgument::Positional(expression) => {
                    if !named.is_empty() {
                        return Err(ParseError::new(
                            ErrorKind::PositionalArgumentFollowsNamed,
                            ps.index,
                        ));
                    }
                    positional.push(expression);
                }
            }

            ps.skip_blank();
            if ps.current_char() == Some(',') {
                ps.next();
                ps.skip_blank();
                continue;
            }
            break;
        }

        ps.expect_char(')')?;
        Ok(CallArguments {
            positional,
            named,
            span: self.span(start, ps.index),
        })
    }

    fn get_literal(&self, ps: &mut ParserStream) -> ParseResult<Literal> {
        if ps.is_number_start() {
            return Ok(Literal::Number(self.get_number(ps)?));
        }
        if ps.current_char() == Some('"') {
            return Ok(Literal::String(self.get_string(ps)?));
        }
        Err(ParseError::new(ErrorKind::MissingLiteral, ps.index))
    }

    fn get_variants(&self, ps: &mut ParserStream) -> ParseResult<Vec<Variant>> {
        let mut variants: Vec<Variant> = Vec::new();
        let mut has_default = false;

        ps.skip_blank();
        while ps.is_variant_start() {
            let variant = self.get_variant(ps, has_default)?;
            has_default = has_default || variant.default;
            variants.push(variant);
            ps.expect_line_end()?;
            ps.skip_blank();
        }

        if variants.is_empty() {
            return Err(ParseError::new(ErrorKind::MissingVariants, ps.index));
        }
        if !has_default {
            return Err(ParseError::new(ErrorKind::MissingDefaultVariant, ps.index));
        }
        Ok(variants)
    }

    fn get_variant(&self, ps: &mut ParserStream, has_default: bool) -> ParseResult<Variant> {
        let start = ps.index;
        let mut default = false;

        if ps.current_char() == Some('*') {
            if has_default {
                return Err(ParseError::new(
                    ErrorKind::MultipleDefaultVariants,
                    ps.index,
                ));
            }
            ps.next();
            default = true;
        }

        ps.expect_char('[')?;
        ps.skip_blank();
        let key = self.get_variant_key(ps)?;
        ps.skip_blank();
        ps.expect_char(']')?;

        let Some(value) = self.maybe_get_pattern(ps)? else {
            return Err(ParseError::new(ErrorKind::MissingValue, ps.index));
        };

        Ok(Variant {
            key,
            value,
            default,
            span: self.span(start, ps.index),
        })
    }

    fn get_variant_key(&self, ps: &mut ParserStream) -> ParseResult<VariantKey> {
        match ps.current_char() {
            None => Err(ParseError::new(ErrorKind::MissingVariantKey, ps.index)),
            Some(ch) if ch.is_ascii_digit() || ch == '-' => {
                Ok(VariantKey::NumberLiteral(self.get_number(ps)?))
            }
            Some(_) => Ok(VariantKey::Identifier(self.get_identifier(ps)?)),
        }
    }

    fn get_number(&self, ps: &mut ParserStream) -> ParseResult<NumberLiteral> {
        let start = ps.index;
        let mut value = String::new();

        if ps.current_char() == Some('-') {
            ps.next();
            value.push('-');
        }
        value.push_str(&self.get_digits(ps)?);

        if ps.current_char() == Some('.') {
            ps.next();
            value.push('.');
            value.push_str(&self.get_digits(ps)?);
        }

        Ok(NumberLiteral {
            value,
            span: self.span(start, ps.index),
        })
    }

    fn get_digits(&self, ps: &mut ParserStream) -> ParseResult<String> {
        let mut digits = String::new();
        while let Some(ch) = ps.take_digit() {
            digits.push(ch);
        }
        if digits.is_empty() {
            return Err(ParseError::new(
                ErrorKind::ExpectedCharRange { range: "0-9" },
                ps.index,
            ));
        }
        Ok(digits)
    }

    fn get_string(&self, ps: &mut ParserStream) -> ParseResult<StringLiteral> {
        let start = ps.index;
        ps.expect_char('"')?;

        let mut value = String::new();
        while let Some(ch) = ps.take_char(|ch| ch != '"' && ch != EOL) {
            if ch == '\\' {
                value.push_str(&self.get_escape_sequence(ps)?);
            } else {
                value.push(ch);
            }
        }

        if ps.current_char() == Some(EOL) {
            return Err(ParseError::new(
                ErrorKind::UnterminatedStringLiteral,
                ps.index,
            ));
        }
        ps.expect_char('"')?;

        Ok(StringLiteral {
            value,
            span: self.span(start, ps.index),
        })
    }

    /// Escapes are captured verbatim; the stored string keeps its raw
    /// escaped form. Decoding happens in `crate::unicode`.
    fn get_escape_sequence(&self, ps: &mut ParserStream) -> ParseResult<String> {
        match ps.current_char() {
            Some(ch @ ('\\' | '"')) => {
                ps.next();
                Ok(format!("\\{ch}"))
            }
            Some('u') => self.get_unicode_escape_sequence(ps, 'u', 4),
            Some('U') => self.get_unicode_escape_sequence(ps, 'U', 6),
            Some(ch) => Err(ParseError::new(
                ErrorKind::UnknownEscapeSequence(format!("\\{ch}")),
                ps.index,
            )),
            None => Err(ParseError::new(
                ErrorKind::UnknownEscapeSequence("\\".to_string()),
                ps.index,
            )),
        }
    }

    fn get_unicode_escape_sequence(
        &self,
        ps: &mut ParserStream,
        u: char,
        digits: usize,
    ) -> ParseResult<String> {
        ps.expect_char(u)?;
        let mut sequence = String::new();
        for _ in 0..digits {
            match ps.take_hex_digit() {
                Some(ch) => sequence.push(ch),
                None => {
                    let found = ps.current_char().map(String::from).unwrap_or_default();
                    return Err(ParseError::new(
                        ErrorKind::InvalidUnicodeEscapeSequence(format!(
                            "\\{u}{sequence}{found}"
                        )),
                        ps.index,
                    ));
                }
            }
        }
        Ok(format!("\\{u}{sequence}"))
    }
}
