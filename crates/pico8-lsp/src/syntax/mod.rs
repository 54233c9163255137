//! Structural reader for PICO-8 Lua
//!
//! Produces the two inputs the folding analyzers consume:
//! - an outline tree of compound statements with 1-based locations
//! - the comment stream, in document order

pub mod ast;
pub mod lexer;
pub mod line_index;
pub mod parser;

#[cfg(test)]
mod tests;

use tracing::debug;

pub use ast::{Chunk, Comment, Node, Position, SourceLocation};
use lexer::{long_bracket_level, tokenize};
use line_index::LineIndex;
use parser::Parser;

/// Tree and comments read from one document snapshot
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub chunk: Chunk,
    pub comments: Vec<Comment>,
}

/// Read `source` into an outline tree and comment list
pub fn parse(source: &str) -> ParsedDocument {
    let index = LineIndex::new(source);
    let tokens = tokenize(source, &index);

    let comments: Vec<Comment> = tokens
        .iter()
        .filter(|t| t.kind.is_comment())
        .map(|t| {
            let raw = t.text(source);
            Comment {
                raw: raw.to_string(),
                value: comment_value(raw).to_string(),
                loc: SourceLocation::new(t.start, t.end),
            }
        })
        .collect();

    let chunk = Parser::new(source, tokens).parse_chunk();
    debug!(
        "read {} nodes and {} comments from {} lines",
        chunk.node_count(),
        comments.len(),
        index.line_count()
    );

    ParsedDocument { chunk, comments }
}

/// Comment content without `--` and long brackets, trimmed
fn comment_value(raw: &str) -> &str {
    let body = raw.strip_prefix("--").unwrap_or(raw);
    match long_bracket_level(body) {
        Some(level) => {
            let inner = &body[level + 2..];
            let close = format!("]{}]", "=".repeat(level));
            inner.strip_suffix(close.as_str()).unwrap_or(inner).trim()
        }
        None => body.trim(),
    }
}
