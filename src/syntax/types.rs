//! Structural view of a parsed C# compilation unit.

use std::ops::Range;

/// The parts of a source file the extractors care about.
///
/// Everything is recorded in source order. Text spans are byte ranges into
/// [`SourceUnit::source`].
#[derive(Debug, Clone)]
pub struct SourceUnit<'a> {
    /// Source text the unit was parsed from.
    pub source: &'a str,
    /// Qualified names of every namespace declaration, nested ones included.
    pub namespaces: Vec<String>,
    /// Import targets of every `using` directive.
    pub usings: Vec<String>,
    /// Every method declaration in the file.
    pub methods: Vec<MethodDecl>,
    /// Whether the syntax tree contains error or missing nodes.
    pub has_errors: bool,
}

impl<'a> SourceUnit<'a> {
    /// Slice the source by a byte range.
    pub fn text(&self, span: &Range<usize>) -> &'a str {
        self.source.get(span.clone()).unwrap_or("")
    }
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Identifier as written.
    pub identifier: String,
    /// 1-indexed line of the declaration.
    pub line: usize,
    /// Shape of the body.
    pub body: MethodBody,
    /// Raw text of the doc comments directly above the declaration, top first.
    pub doc_comments: Vec<String>,
}

/// The body of a method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodBody {
    /// A `{ ... }` block.
    Block(BlockSpan),
    /// An expression body (`=> expr;`).
    Expression,
    /// No body at all (abstract, partial or extern).
    Missing,
}

/// Location of a block body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan {
    /// Bytes from the opening to the closing brace, inclusive.
    pub block: Range<usize>,
    /// Bytes from the first statement's start to the last statement's end.
    /// `None` when the block holds no statements.
    pub statements: Option<Range<usize>>,
}
