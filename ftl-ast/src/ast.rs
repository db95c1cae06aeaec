//! The node tree produced by parsing a Fluent resource.
//!
//! Every node owns its substructure. The `type` string required by the JSON
//! form is derived from the variant tag and never stored; see `json.rs`.

use enum_as_inner::EnumAsInner;

use crate::Span;

/// An ordered sequence of top-level entries; the result of one parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub body: Vec<Entry>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, EnumAsInner, strum::AsRefStr)]
pub enum Entry {
    Message(Message),
    Term(Term),
    /// A standalone `#` comment that did not attach to a following entry.
    Comment(Comment),
    /// A `##` group comment.
    GroupComment(Comment),
    /// A `###` resource comment.
    ResourceComment(Comment),
    /// A contiguous span of source that failed to parse as any entry.
    Junk(Junk),
}

/// `id = value` with optional attributes. Either the value or at least one
/// attribute is present.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Identifier,
    pub value: Option<Pattern>,
    pub attributes: Vec<Attribute>,
    pub comment: Option<Comment>,
    pub span: Option<Span>,
}

/// `-id = value`; the value is required.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub id: Identifier,
    pub value: Pattern,
    pub attributes: Vec<Attribute>,
    pub comment: Option<Comment>,
    pub span: Option<Span>,
}

/// Comment content without the `#` sigils or the single leading space;
/// continuation lines are joined with `\n`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub content: String,
    pub span: Option<Span>,
}

/// Skipped source preserved verbatim, with the diagnostics that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct Junk {
    pub annotations: Vec<Annotation>,
    pub content: String,
    pub span: Option<Span>,
}

/// One diagnostic attached to a [`Junk`] entry. The span is a single point
/// at the byte index where the error was observed and is recorded
/// unconditionally; it is part of the diagnostic, not of span tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub code: &'static str,
    pub arguments: Vec<String>,
    pub message: String,
    pub span: Span,
}

/// `.key = value`; the value is required.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub id: Identifier,
    pub value: Pattern,
    pub span: Option<Span>,
}

/// The value side of a message, term, attribute or variant, after
/// dedentation: alternating text and placeables, no two adjacent text
/// elements, no empty text element.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub elements: Vec<PatternElement>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, EnumAsInner)]
pub enum PatternElement {
    TextElement(TextElement),
    Placeable(Placeable),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub value: String,
    pub span: Option<Span>,
}

/// `{ ... }` embedded expression inside a pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeable {
    pub expression: Expression,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, EnumAsInner)]
pub enum Expression {
    Select(SelectExpression),
    Inline(InlineExpression),
}

/// `selector -> variants`; exactly one variant is the default.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectExpression {
    pub selector: InlineExpression,
    pub variants: Vec<Variant>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, EnumAsInner)]
pub enum InlineExpression {
    StringLiteral(StringLiteral),
    NumberLiteral(NumberLiteral),
    VariableReference(VariableReference),
    MessageReference(MessageReference),
    TermReference(TermReference),
    FunctionReference(FunctionReference),
    Placeable(Box<Placeable>),
}

/// The raw value with escape sequences still encoded; never contains a
/// literal newline. Decode with `unescape_unicode`.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub span: Option<Span>,
}

/// Preserved verbatim: optional `-`, digits, optional `.` and digits.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub value: String,
    pub span: Option<Span>,
}

/// `$id`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableReference {
    pub id: Identifier,
    pub span: Option<Span>,
}

/// `id` or `id.attribute`
#[derive(Debug, Clone, PartialEq)]
pub struct MessageReference {
    pub id: Identifier,
    pub attribute: Option<Identifier>,
    pub span: Option<Span>,
}

/// `-id`, optionally with `.attribute` and call arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct TermReference {
    pub id: Identifier,
    pub attribute: Option<Identifier>,
    pub arguments: Option<CallArguments>,
    pub span: Option<Span>,
}

/// `ID(...)`; the id matches `^[A-Z][A-Z0-9_-]*$`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionReference {
    pub id: Identifier,
    pub arguments: CallArguments,
    pub span: Option<Span>,
}

/// All positional arguments precede all named ones; named argument names
/// are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct CallArguments {
    pub positional: Vec<InlineExpression>,
    pub named: Vec<NamedArgument>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedArgument {
    pub name: Identifier,
    pub value: Literal,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, EnumAsInner)]
pub enum Literal {
    String(StringLiteral),
    Number(NumberLiteral),
}

/// One branch of a select expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub key: VariantKey,
    pub value: Pattern,
    pub default: bool,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, EnumAsInner)]
pub enum VariantKey {
    Identifier(Identifier),
    NumberLiteral(NumberLiteral),
}

/// `[A-Za-z][A-Za-z0-9_-]*`
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Option<Span>,
}

impl Identifier {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Identifier {
            name: name.into(),
            span: None,
        }
    }
}

impl Pattern {
    pub fn new(elements: Vec<PatternElement>) -> Self {
        Pattern {
            elements,
            span: None,
        }
    }
}

impl TextElement {
    pub fn new<S: Into<String>>(value: S) -> Self {
        TextElement {
            value: value.into(),
            span: None,
        }
    }
}

impl StringLiteral {
    pub fn new<S: Into<String>>(value: S) -> Self {
        StringLiteral {
            value: value.into(),
            span: None,
        }
    }
}

impl NumberLiteral {
    pub fn new<S: Into<String>>(value: S) -> Self {
        NumberLiteral {
            value: value.into(),
            span: None,
        }
    }
}

impl Comment {
    pub fn new<S: Into<String>>(content: S) -> Self {
        Comment {
            content: content.into(),
            span: None,
        }
    }
}
