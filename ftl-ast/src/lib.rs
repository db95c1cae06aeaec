//! AST for the Fluent (FTL) localization syntax.
//!
//! Nodes carry an optional half-open `[start, end)` byte [`Span`] over the
//! original source. Serializing any node with `serde_json` yields the stable
//! JSON form used for fixture comparison; see the [`json`] module.

pub mod ast;
pub mod error;
mod json;
mod span;

pub use ast::*;
pub use span::Span;
