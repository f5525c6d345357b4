//! Minimal structural reading of C# source.
//!
//! This is not a C# front end. It recognises only what the behaviour
//! extractors need: namespace declarations, `using` directives, method
//! declarations with their bodies as opaque byte spans, and the doc comments
//! sitting directly above each method.
//!
//! Parsing is backed by tree-sitter and the C# grammar. Every call builds its
//! own parser, so independent files can be parsed concurrently.

pub mod parser;
pub mod types;

pub use parser::parse_source;
pub use types::{BlockSpan, MethodBody, MethodDecl, SourceUnit};
