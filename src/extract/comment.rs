//! Name and description mining from XML doc comments.
//!
//! The generator writes the behaviour's display name on the first summary
//! line and its description on the lines after it:
//!
//! ```text
//! /// <summary>
//! /// HelloWorld
//! /// Send a message:
//! /// Hello World!
//! /// </summary>
//! ```

use std::sync::LazyLock;

use regex::Regex;

static XML_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));

/// Line terminator used when joining description lines.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator used when joining description lines.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// What a doc comment says about its method.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocSummary {
    /// First non-empty line, overriding the identifier-derived name.
    pub name: Option<String>,
    /// Remaining lines joined with [`LINE_ENDING`]. Empty when there are none.
    pub description: String,
}

impl DocSummary {
    /// Mine the raw comment texts sitting above a method, top first.
    pub fn from_comments<S: AsRef<str>>(comments: &[S]) -> Self {
        let body = comments
            .iter()
            .flat_map(|c| comment_lines(c.as_ref()))
            .collect::<Vec<_>>()
            .join("\n");

        let summary = summary_content(&body);
        let stripped = XML_TAG_PATTERN.replace_all(summary, "");
        let mut lines = stripped
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty());

        let name = lines.next().map(str::to_string);
        let description = lines.collect::<Vec<_>>().join(LINE_ENDING);

        Self { name, description }
    }
}

/// Text lines of one comment with the comment markers removed.
fn comment_lines(comment: &str) -> Vec<&str> {
    let comment = comment.trim_start();
    if let Some(line) = comment.strip_prefix("///") {
        return vec![line];
    }

    let inner = comment
        .strip_prefix("/**")
        .map(|rest| rest.strip_suffix("*/").unwrap_or(rest))
        .unwrap_or(comment);
    inner
        .lines()
        .map(|line| {
            let line = line.trim_start();
            line.strip_prefix('*').unwrap_or(line)
        })
        .collect()
}

/// Content of the `<summary>` element, or the whole text when there is none.
fn summary_content(body: &str) -> &str {
    let Some(open) = body.find("<summary>") else {
        return body;
    };
    let start = open + "<summary>".len();
    match body[start..].find("</summary>") {
        Some(close) => &body[start..start + close],
        None => &body[start..],
    }
}
