//! Folding ranges for compound statements
//!
//! Generates LSP folding ranges for:
//! - `while`, `do`, `repeat`, `for` and `function` blocks
//! - Each clause of an `if` statement, ending on the line before the next
//!   clause keyword (or before the closing `end`)
//!
//! Tree locations are 1-based; output lines are 0-based. Blocks that fit on a
//! single line produce no range.

use tower_lsp::lsp_types::FoldingRange;
use tracing::debug;

use crate::error::{FoldError, Result};
use crate::syntax::ast::{BlockStatement, Chunk, FunctionDeclaration, IfStatement, Node};

/// Tree walker collecting folding ranges in pre-order
#[derive(Debug, Default)]
pub struct FoldingWalker {
    ranges: Vec<FoldingRange>,
}

impl FoldingWalker {
    /// Generate folding ranges for the whole tree
    pub fn generate_ranges(chunk: &Chunk) -> Result<Vec<FoldingRange>> {
        let mut walker = Self::default();
        walker.visit_nodes(&chunk.body)?;
        debug!("generated {} block folding ranges", walker.ranges.len());
        Ok(walker.ranges)
    }

    /// Add a range from 1-based source lines, skipping single-line spans
    fn add_explicit_range(&mut self, start_line: i64, end_line: i64) {
        let start = start_line - 1;
        let end = end_line - 1;
        if start >= 0 && start < end {
            self.ranges.push(FoldingRange {
                start_line: start as u32,
                end_line: end as u32,
                kind: None,
                start_character: None,
                end_character: None,
                collapsed_text: None,
            });
        }
    }

    fn visit_nodes(&mut self, nodes: &[Node]) -> Result<()> {
        nodes.iter().try_for_each(|node| self.visit_node(node))
    }

    fn visit_node(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::If(stmt) => self.visit_if_statement(stmt),
            Node::While(block)
            | Node::Do(block)
            | Node::Repeat(block)
            | Node::ForNumeric(block)
            | Node::ForGeneric(block) => self.visit_block_statement(block),
            Node::Function(func) => self.visit_function_declaration(func),
        }
    }

    fn visit_if_statement(&mut self, stmt: &IfStatement) -> Result<()> {
        if stmt.clauses.is_empty() {
            return Err(FoldError::EmptyConditional {
                line: stmt.loc.map(|loc| loc.start.line),
            });
        }

        for (i, clause) in stmt.clauses.iter().enumerate() {
            if let (Some(if_loc), Some(clause_loc)) = (stmt.loc, clause.loc) {
                let start_line = i64::from(clause_loc.start.line);
                let end_line = match stmt.clauses.get(i + 1).and_then(|next| next.loc) {
                    // End one line before the next clause keyword
                    Some(next_loc) => i64::from(next_loc.start.line) - 1,
                    // Last clause ends one line above the closing `end`
                    None => i64::from(if_loc.end.line) - 1,
                };
                self.add_explicit_range(start_line, end_line);
            }
            self.visit_nodes(&clause.body)?;
        }
        Ok(())
    }

    fn visit_block_statement(&mut self, block: &BlockStatement) -> Result<()> {
        if let Some(loc) = block.loc {
            self.add_explicit_range(loc.start.line.into(), loc.end.line.into());
        }
        self.visit_nodes(&block.body)
    }

    fn visit_function_declaration(&mut self, func: &FunctionDeclaration) -> Result<()> {
        if let Some(loc) = func.loc {
            self.add_explicit_range(loc.start.line.into(), loc.end.line.into());
        }
        self.visit_nodes(&func.body)
    }
}
