//! A recoverable recursive-descent parser for the Fluent (FTL) localization
//! syntax.
//!
//! [`parse`] turns a UTF-8 source string into a typed [`Resource`] of
//! messages, terms, comments and junk. Parsing is total: malformed input is
//! packaged as Junk entries carrying diagnostic annotations instead of
//! aborting. Configure span tracking through [`Parser`].

pub use ftl_ast as ast;

mod parser;
mod stream;
pub mod unicode;

use ftl_ast::Resource;

/// Parse a Fluent resource without span tracking.
pub fn parse(source: &str) -> Resource {
    Parser::new().parse(source)
}

/// A configured parser. The only setting is span tracking, which is
/// immutable for the lifetime of the instance; distinct parses share no
/// state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    with_spans: bool,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a half-open `[start, end)` byte span on every node.
    pub fn with_spans(mut self, with_spans: bool) -> Self {
        self.with_spans = with_spans;
        self
    }

    /// Parse `source` into a [`Resource`]; never fails.
    pub fn parse(&self, source: &str) -> Resource {
        log::trace!("parsing a resource of {} bytes", source.len());
        let mut ps = stream::ParserStream::new(source);
        self.get_resource(&mut ps)
    }
}
