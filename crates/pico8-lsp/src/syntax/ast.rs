//! Outline tree for PICO-8 Lua
//!
//! Only compound statements are retained: everything the folding walker
//! needs, nothing else. Lines and columns are 1-based.

use serde::Serialize;

/// A 1-based (line, column) position in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Source span of a node or comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

impl SourceLocation {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "location start must not follow its end");
        Self { start, end }
    }

    /// Location covering whole lines, columns set to 1
    pub fn lines(start_line: u32, end_line: u32) -> Self {
        Self::new(Position::new(start_line, 1), Position::new(end_line, 1))
    }
}

/// A comment token as produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// Full comment text including the `--` and any long brackets
    pub raw: String,
    /// Content without delimiters, trimmed
    pub value: String,
    pub loc: SourceLocation,
}

impl Comment {
    /// 1-based line the comment starts on
    pub fn start_line(&self) -> u32 {
        self.loc.start.line
    }
}

/// Which keyword opened a conditional branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseKind {
    If,
    ElseIf,
    Else,
}

/// One branch of a conditional
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub kind: ClauseKind,
    pub loc: Option<SourceLocation>,
    pub body: Vec<Node>,
}

/// A loop, `do` block or function body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockStatement {
    pub loc: Option<SourceLocation>,
    pub body: Vec<Node>,
}

/// `function` in statement, `local function` or expression position
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionDeclaration {
    /// Dotted name for declarations, `None` for anonymous functions
    pub name: Option<String>,
    pub is_local: bool,
    pub loc: Option<SourceLocation>,
    pub body: Vec<Node>,
}

/// `if ... elseif ... else ... end`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStatement {
    pub loc: Option<SourceLocation>,
    pub clauses: Vec<Clause>,
}

/// Compound statements of the outline tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    If(IfStatement),
    While(BlockStatement),
    Do(BlockStatement),
    Repeat(BlockStatement),
    ForNumeric(BlockStatement),
    ForGeneric(BlockStatement),
    Function(FunctionDeclaration),
}

impl Node {
    pub fn loc(&self) -> Option<SourceLocation> {
        match self {
            Node::If(stmt) => stmt.loc,
            Node::While(block)
            | Node::Do(block)
            | Node::Repeat(block)
            | Node::ForNumeric(block)
            | Node::ForGeneric(block) => block.loc,
            Node::Function(func) => func.loc,
        }
    }

    /// Short keyword describing the variant, used in logs
    pub fn keyword(&self) -> &'static str {
        match self {
            Node::If(_) => "if",
            Node::While(_) => "while",
            Node::Do(_) => "do",
            Node::Repeat(_) => "repeat",
            Node::ForNumeric(_) | Node::ForGeneric(_) => "for",
            Node::Function(_) => "function",
        }
    }
}

/// Root of the outline tree
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Chunk {
    pub body: Vec<Node>,
}

impl Chunk {
    /// Total number of nodes in the tree, clauses not counted
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|node| {
                    1 + match node {
                        Node::If(stmt) => stmt.clauses.iter().map(|c| count(&c.body)).sum(),
                        Node::While(b)
                        | Node::Do(b)
                        | Node::Repeat(b)
                        | Node::ForNumeric(b)
                        | Node::ForGeneric(b) => count(&b.body),
                        Node::Function(f) => count(&f.body),
                    }
                })
                .sum()
        }
        count(&self.body)
    }
}
