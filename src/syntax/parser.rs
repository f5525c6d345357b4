//! tree-sitter walk that fills a [`SourceUnit`].

use tree_sitter::{Node, Parser};

use super::types::{BlockSpan, MethodBody, MethodDecl, SourceUnit};
use crate::error::{Error, Result};

/// Parse C# source text into a [`SourceUnit`].
///
/// Trees with error nodes are still walked; callers decide whether the
/// recovered structure is good enough.
pub fn parse_source(source: &str) -> Result<SourceUnit<'_>> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
        .map_err(|e| Error::Parser(format!("Failed to load C# grammar: {}", e)))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| Error::Parser("Parser returned no syntax tree".to_string()))?;
    let root = tree.root_node();

    let mut unit = SourceUnit {
        source,
        namespaces: Vec::new(),
        usings: Vec::new(),
        methods: Vec::new(),
        has_errors: root.has_error(),
    };
    walk(root, &mut unit);
    Ok(unit)
}

fn walk(node: Node<'_>, unit: &mut SourceUnit<'_>) {
    match node.kind() {
        "namespace_declaration" | "file_scoped_namespace_declaration" => {
            if let Some(name) = node.child_by_field_name("name") {
                unit.namespaces.push(node_text(name, unit.source).to_string());
            }
        }
        "using_directive" => {
            if let Some(target) = using_target(node, unit.source) {
                unit.usings.push(target);
            }
            return;
        }
        "method_declaration" => {
            if let Some(method) = method_decl(node, unit.source) {
                unit.methods.push(method);
            }
            return;
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        walk(child, unit);
    }
}

/// The imported name of a `using` directive. For an alias directive the
/// alias identifier is skipped and the aliased name returned.
fn using_target(node: Node<'_>, source: &str) -> Option<String> {
    let alias = node.child_by_field_name("name").map(|n| n.id());
    let mut cursor = node.walk();
    let target = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment" && Some(child.id()) != alias)
        .last()?;
    let text = node_text(target, source);
    (!text.is_empty()).then(|| text.to_string())
}

fn method_decl(node: Node<'_>, source: &str) -> Option<MethodDecl> {
    let name = node.child_by_field_name("name")?;
    let body = match node.child_by_field_name("body") {
        Some(body) if body.kind() == "block" => MethodBody::Block(block_span(body)),
        Some(_) => MethodBody::Expression,
        None => MethodBody::Missing,
    };

    Some(MethodDecl {
        identifier: node_text(name, source).to_string(),
        line: node.start_position().row + 1,
        body,
        doc_comments: doc_comments(node, source),
    })
}

fn block_span(block: Node<'_>) -> BlockSpan {
    let mut cursor = block.walk();
    let statements: Vec<Node<'_>> = block
        .named_children(&mut cursor)
        .filter(|child| is_statement(child.kind()))
        .collect();

    let statements = match (statements.first(), statements.last()) {
        (Some(first), Some(last)) => Some(first.start_byte()..last.end_byte()),
        _ => None,
    };

    BlockSpan {
        block: block.start_byte()..block.end_byte(),
        statements,
    }
}

fn is_statement(kind: &str) -> bool {
    kind != "comment" && !kind.starts_with("preproc")
}

/// Doc comments are the run of `///` or `/** */` comment siblings that
/// directly precede the declaration.
fn doc_comments(node: Node<'_>, source: &str) -> Vec<String> {
    let mut comments = Vec::new();
    let mut current = node.prev_named_sibling();
    while let Some(sibling) = current {
        if sibling.kind() != "comment" {
            break;
        }
        let text = node_text(sibling, source);
        if !(text.starts_with("///") || text.starts_with("/**")) {
            break;
        }
        comments.push(text.to_string());
        current = sibling.prev_named_sibling();
    }
    comments.reverse();
    comments
}

fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}
