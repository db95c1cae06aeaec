//! Parse errors produced by the grammar.
//!
//! Errors never escape a parse; they are packaged into [`crate::Junk`]
//! annotations at entry boundaries. Each kind knows its machine-readable
//! `E####` code, its argument list, and a stable human-readable message.

use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Byte index at which the error was observed.
    pub pos: usize,
    pub kind: ErrorKind,
}

impl ParseError {
    pub fn new(kind: ErrorKind, pos: usize) -> Self {
        ParseError { pos, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    ExpectedEntry,
    ExpectedToken(char),
    ExpectedCharRange { range: &'static str },
    ExpectedMessageField { entry_id: String },
    ExpectedTermField { entry_id: String },
    ForbiddenCallee,
    ForbiddenKey,
    MissingDefaultVariant,
    MissingVariants,
    MissingValue,
    MissingVariantKey,
    MissingLiteral,
    MultipleDefaultVariants,
    MessageReferenceAsSelector,
    TermReferenceAsSelector,
    MessageAttributeAsSelector,
    TermAttributeAsPlaceable,
    UnterminatedStringLiteral,
    PositionalArgumentFollowsNamed,
    DuplicatedNamedArgument(String),
    UnknownEscapeSequence(String),
    InvalidUnicodeEscapeSequence(String),
    UnbalancedClosingBrace,
    ExpectedInlineExpression,
    ExpectedSimpleExpressionAsSelector,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        use ErrorKind::*;
        match self {
            ExpectedEntry => "E0002",
            ExpectedToken(..) => "E0003",
            ExpectedCharRange { .. } => "E0004",
            ExpectedMessageField { .. } => "E0005",
            ExpectedTermField { .. } => "E0006",
            ForbiddenCallee => "E0008",
            ForbiddenKey => "E0009",
            MissingDefaultVariant => "E0010",
            MissingVariants => "E0011",
            MissingValue => "E0012",
            MissingVariantKey => "E0013",
            MissingLiteral => "E0014",
            MultipleDefaultVariants => "E0015",
            MessageReferenceAsSelector => "E0016",
            TermReferenceAsSelector => "E0017",
            MessageAttributeAsSelector => "E0018",
            TermAttributeAsPlaceable => "E0019",
            UnterminatedStringLiteral => "E0020",
            PositionalArgumentFollowsNamed => "E0021",
            DuplicatedNamedArgument(..) => "E0022",
            UnknownEscapeSequence(..) => "E0025",
            InvalidUnicodeEscapeSequence(..) => "E0026",
            UnbalancedClosingBrace => "E0027",
            ExpectedInlineExpression => "E0028",
            ExpectedSimpleExpressionAsSelector => "E0029",
        }
    }

    /// The error's arguments in order, as they appear in annotations.
    pub fn arguments(&self) -> Vec<String> {
        use ErrorKind::*;
        match self {
            ExpectedToken(token) => vec![token.to_string()],
            ExpectedCharRange { range } => vec![range.to_string()],
            ExpectedMessageField { entry_id } | ExpectedTermField { entry_id } => {
                vec![entry_id.clone()]
            }
            DuplicatedNamedArgument(name) => vec![name.clone()],
            UnknownEscapeSequence(sequence) | InvalidUnicodeEscapeSequence(sequence) => {
                vec![sequence.clone()]
            }
            _ => Vec::new(),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use ErrorKind::*;
        match self {
            ExpectedEntry => f.write_str("Expected an entry start"),
            ExpectedToken(token) => write!(f, "Expected token: \"{token}\""),
            ExpectedCharRange { range } => {
                write!(f, "Expected a character from range: \"{range}\"")
            }
            ExpectedMessageField { entry_id } => {
                write!(f, "Expected message \"{entry_id}\" to have a value or attributes")
            }
            ExpectedTermField { entry_id } => {
                write!(f, "Expected term \"-{entry_id}\" to have a value")
            }
            ForbiddenCallee => {
                f.write_str("The callee has to be an upper-case identifier or a term")
            }
            ForbiddenKey => f.write_str("The argument name has to be a simple identifier"),
            MissingDefaultVariant => {
                f.write_str("Expected one of the variants to be marked as default (*)")
            }
            MissingVariants => f.write_str("Expected at least one variant after \"->\""),
            MissingValue => f.write_str("Expected value"),
            MissingVariantKey => f.write_str("Expected variant key"),
            MissingLiteral => f.write_str("Expected literal"),
            MultipleDefaultVariants => {
                f.write_str("Only one variant can be marked as default (*)")
            }
            MessageReferenceAsSelector => {
                f.write_str("Message references cannot be used as selectors")
            }
            TermReferenceAsSelector => f.write_str("Terms cannot be used as selectors"),
            MessageAttributeAsSelector => {
                f.write_str("Attributes of messages cannot be used as selectors")
            }
            TermAttributeAsPlaceable => {
                f.write_str("Attributes of terms cannot be used as placeables")
            }
            UnterminatedStringLiteral => f.write_str("Unterminated string expression"),
            PositionalArgumentFollowsNamed => {
                f.write_str("Positional arguments must not follow named arguments")
            }
            DuplicatedNamedArgument(name) => {
                write!(f, "The \"{name}\" argument appears twice")
            }
            UnknownEscapeSequence(sequence) => {
                write!(f, "Unknown escape sequence: {sequence}")
            }
            InvalidUnicodeEscapeSequence(sequence) => {
                write!(f, "Invalid Unicode escape sequence: {sequence}")
            }
            UnbalancedClosingBrace => f.write_str("Unbalanced closing brace in TextElement"),
            ExpectedInlineExpression => f.write_str("Expected an inline expression"),
            ExpectedSimpleExpressionAsSelector => {
                f.write_str("Expected a simple expression as selector")
            }
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}: {}", self.kind.code(), self.pos, self.kind)
    }
}

impl std::error::Error for ParseError {}
