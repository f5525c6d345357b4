//! Expression text recovered from method bodies.

use crate::syntax::{BlockSpan, SourceUnit};

/// Body text between the first `{` and the last `}`, trimmed.
pub fn trimmed_expression(block_text: &str) -> String {
    match (block_text.find('{'), block_text.rfind('}')) {
        (Some(open), Some(close)) if open < close => block_text[open + 1..close].trim().to_string(),
        _ => String::new(),
    }
}

/// Statement text laid out as in the source.
///
/// Starts at the line after the opening brace, or at the first statement when
/// it shares the brace's line. Ends after the line terminator that follows
/// the last statement, or at the statement's end when the closing brace is on
/// the same line. Indentation, inner comments and `\r\n` terminators are kept.
pub fn statement_expression(unit: &SourceUnit<'_>, span: &BlockSpan) -> String {
    let Some(statements) = &span.statements else {
        return String::new();
    };

    let open = span.block.start + 1;
    let close = span.block.end.saturating_sub(1);

    let leading = unit.text(&(open..statements.start));
    let start = match leading.find('\n') {
        Some(newline) => open + newline + 1,
        None => statements.start,
    };

    let trailing = unit.text(&(statements.end..close));
    let end = match trailing.find('\n') {
        Some(newline) => statements.end + newline + 1,
        None => statements.end,
    };

    unit.text(&(start..end)).to_string()
}
