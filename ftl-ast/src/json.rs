//! The stable JSON form of the AST.
//!
//! Every node serializes to an object with a leading `"type"` tag followed
//! by the node's own fields in declared order. The `"span"` field is present
//! iff the node carries a span; optional children (`value`, `comment`,
//! `attribute`, `arguments`) serialize as `null`. These impls are written by
//! hand because the tag is derived from the node kind, not stored.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::ast::*;
use crate::Span;

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Span", 3)?;
        s.serialize_field("type", "Span")?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Resource", 2 + self.span.is_some() as usize)?;
        s.serialize_field("type", "Resource")?;
        s.serialize_field("body", &self.body)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Entry::Message(message) => message.serialize(serializer),
            Entry::Term(term) => term.serialize(serializer),
            Entry::Comment(comment) => serialize_comment(comment, "Comment", serializer),
            Entry::GroupComment(comment) => serialize_comment(comment, "GroupComment", serializer),
            Entry::ResourceComment(comment) => {
                serialize_comment(comment, "ResourceComment", serializer)
            }
            Entry::Junk(junk) => junk.serialize(serializer),
        }
    }
}

fn serialize_comment<S: Serializer>(
    comment: &Comment,
    tag: &'static str,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut s = serializer.serialize_struct(tag, 2 + comment.span.is_some() as usize)?;
    s.serialize_field("type", tag)?;
    s.serialize_field("content", &comment.content)?;
    if let Some(span) = &comment.span {
        s.serialize_field("span", span)?;
    }
    s.end()
}

impl Serialize for Comment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_comment(self, "Comment", serializer)
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Message", 5 + self.span.is_some() as usize)?;
        s.serialize_field("type", "Message")?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("value", &self.value)?;
        s.serialize_field("attributes", &self.attributes)?;
        s.serialize_field("comment", &self.comment)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Term", 5 + self.span.is_some() as usize)?;
        s.serialize_field("type", "Term")?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("value", &self.value)?;
        s.serialize_field("attributes", &self.attributes)?;
        s.serialize_field("comment", &self.comment)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for Junk {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Junk", 3 + self.span.is_some() as usize)?;
        s.serialize_field("type", "Junk")?;
        s.serialize_field("annotations", &self.annotations)?;
        s.serialize_field("content", &self.content)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for Annotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Annotation", 5)?;
        s.serialize_field("type", "Annotation")?;
        s.serialize_field("code", &self.code)?;
        s.serialize_field("arguments", &self.arguments)?;
        s.serialize_field("message", &self.message)?;
        s.serialize_field("span", &self.span)?;
        s.end()
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Attribute", 3 + self.span.is_some() as usize)?;
        s.serialize_field("type", "Attribute")?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("value", &self.value)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Pattern", 2 + self.span.is_some() as usize)?;
        s.serialize_field("type", "Pattern")?;
        s.serialize_field("elements", &self.elements)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for PatternElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PatternElement::TextElement(text) => text.serialize(serializer),
            PatternElement::Placeable(placeable) => placeable.serialize(serializer),
        }
    }
}

impl Serialize for TextElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TextElement", 2 + self.span.is_some() as usize)?;
        s.serialize_field("type", "TextElement")?;
        s.serialize_field("value", &self.value)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for Placeable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Placeable", 2 + self.span.is_some() as usize)?;
        s.serialize_field("type", "Placeable")?;
        s.serialize_field("expression", &self.expression)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expression::Select(select) => select.serialize(serializer),
            Expression::Inline(inline) => inline.serialize(serializer),
        }
    }
}

impl Serialize for SelectExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s =
            serializer.serialize_struct("SelectExpression", 3 + self.span.is_some() as usize)?;
        s.serialize_field("type", "SelectExpression")?;
        s.serialize_field("selector", &self.selector)?;
        s.serialize_field("variants", &self.variants)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for InlineExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InlineExpression::StringLiteral(literal) => literal.serialize(serializer),
            InlineExpression::NumberLiteral(literal) => literal.serialize(serializer),
            InlineExpression::VariableReference(reference) => reference.serialize(serializer),
            InlineExpression::MessageReference(reference) => reference.serialize(serializer),
            InlineExpression::TermReference(reference) => reference.serialize(serializer),
            InlineExpression::FunctionReference(reference) => reference.serialize(serializer),
            InlineExpression::Placeable(placeable) => placeable.serialize(serializer),
        }
    }
}

impl Serialize for StringLiteral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s =
            serializer.serialize_struct("StringLiteral", 2 + self.span.is_some() as usize)?;
        s.serialize_field("type", "StringLiteral")?;
        s.serialize_field("value", &self.value)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for NumberLiteral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s =
            serializer.serialize_struct("NumberLiteral", 2 + self.span.is_some() as usize)?;
        s.serialize_field("type", "NumberLiteral")?;
        s.serialize_field("value", &self.value)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for VariableReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s =
            serializer.serialize_struct("VariableReference", 2 + self.span.is_some() as usize)?;
        s.serialize_field("type", "VariableReference")?;
        s.serialize_field("id", &self.id)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for MessageReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s =
            serializer.serialize_struct("MessageReference", 3 + self.span.is_some() as usize)?;
        s.serialize_field("type", "MessageReference")?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("attribute", &self.attribute)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for TermReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s =
            serializer.serialize_struct("TermReference", 4 + self.span.is_some() as usize)?;
        s.serialize_field("type", "TermReference")?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("attribute", &self.attribute)?;
        s.serialize_field("arguments", &self.arguments)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for FunctionReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s =
            serializer.serialize_struct("FunctionReference", 3 + self.span.is_some() as usize)?;
        s.serialize_field("type", "FunctionReference")?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("arguments", &self.arguments)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for CallArguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s =
            serializer.serialize_struct("CallArguments", 3 + self.span.is_some() as usize)?;
        s.serialize_field("type", "CallArguments")?;
        s.serialize_field("positional", &self.positional)?;
        s.serialize_field("named", &self.named)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for NamedArgument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s =
            serializer.serialize_struct("NamedArgument", 3 + self.span.is_some() as usize)?;
        s.serialize_field("type", "NamedArgument")?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("value", &self.value)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Literal::String(literal) => literal.serialize(serializer),
            Literal::Number(literal) => literal.serialize(serializer),
        }
    }
}

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Variant", 4 + self.span.is_some() as usize)?;
        s.serialize_field("type", "Variant")?;
        s.serialize_field("key", &self.key)?;
        s.serialize_field("value", &self.value)?;
        s.serialize_field("default", &self.default)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}

impl Serialize for VariantKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            VariantKey::Identifier(identifier) => identifier.serialize(serializer),
            VariantKey::NumberLiteral(literal) => literal.serialize(serializer),
        }
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Identifier", 2 + self.span.is_some() as usize)?;
        s.serialize_field("type", "Identifier")?;
        s.serialize_field("name", &self.name)?;
        if let Some(span) = &self.span {
            s.serialize_field("span", span)?;
        }
        s.end()
    }
}
