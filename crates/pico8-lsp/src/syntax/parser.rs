//! Block reader for PICO-8 Lua
//!
//! Builds the outline tree by matching block keywords over the significant
//! token stream. Expressions are skipped rather than parsed; the reader only
//! needs to know where each compound statement starts and ends.
//!
//! The reader never fails. Stray closers are skipped and unterminated blocks
//! end at the last token read, so a half-typed document still folds.

use std::mem;

use tracing::debug;

use super::ast::{
    BlockStatement, Chunk, Clause, ClauseKind, FunctionDeclaration, IfStatement, Node, Position,
    SourceLocation,
};
use super::lexer::{Token, TokenKind};

/// Keywords that end a block body
const CLOSERS: [TokenKind; 4] = [
    TokenKind::End,
    TokenKind::Else,
    TokenKind::ElseIf,
    TokenKind::Until,
];

/// Keywords that cannot appear inside a statement header
const HEADER_STOPS: [TokenKind; 12] = [
    TokenKind::End,
    TokenKind::Else,
    TokenKind::ElseIf,
    TokenKind::Until,
    TokenKind::Then,
    TokenKind::Do,
    TokenKind::If,
    TokenKind::While,
    TokenKind::For,
    TokenKind::Repeat,
    TokenKind::Local,
    TokenKind::Return,
];

/// Recursive block reader over significant (non-comment) tokens
pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a reader; comment tokens in `tokens` are ignored
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|t| !t.kind.is_comment())
            .collect();
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    /// Read the whole token stream into a chunk
    pub fn parse_chunk(mut self) -> Chunk {
        let mut body = Vec::new();
        while self.peek().is_some() {
            self.statement(&mut body);
        }
        Chunk { body }
    }

    // ------------------------------------------------------------------
    // Cursor helpers
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn previous(&self) -> Option<Token> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i).copied())
    }

    /// End of the last consumed token
    fn last_end(&self, fallback: Position) -> Position {
        self.previous().map_or(fallback, |t| t.end)
    }

    fn span_from(&self, start: Position) -> Option<SourceLocation> {
        Some(SourceLocation::new(start, self.last_end(start)))
    }

    /// Index of the token closing the bracket opened at `open`
    fn matching_close(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (i, token) in self.tokens.iter().enumerate().skip(open) {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn expect_end(&mut self, keyword: &str, start: Position) {
        if self.peek_kind() == Some(TokenKind::End) {
            self.bump();
        } else {
            debug!("unterminated `{}` block starting at line {}", keyword, start.line);
        }
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn block(&mut self, terminators: &[TokenKind]) -> Vec<Node> {
        let mut body = Vec::new();
        while let Some(kind) = self.peek_kind() {
            if terminators.contains(&kind) {
                break;
            }
            self.statement(&mut body);
        }
        body
    }

    /// Read one statement-level construct, always consuming at least one token
    fn statement(&mut self, out: &mut Vec<Node>) {
        let Some(token) = self.peek() else {
            return;
        };

        match token.kind {
            TokenKind::If => self.if_statement(out),
            TokenKind::While => self.while_statement(out),
            TokenKind::For => self.for_statement(out),
            TokenKind::Do => {
                let node = self.do_statement();
                out.push(node);
            }
            TokenKind::Repeat => self.repeat_statement(out),
            TokenKind::Function => {
                let func = self.function(None, false);
                out.push(Node::Function(func));
            }
            TokenKind::Local if self.nth_kind(1) == Some(TokenKind::Function) => {
                self.bump();
                let func = self.function(Some(token.start), true);
                out.push(Node::Function(func));
            }
            kind if CLOSERS.contains(&kind) => {
                debug!("skipping stray `{}` at line {}", token.text(self.source), token.start.line);
                self.bump();
            }
            _ => {
                self.bump();
            }
        }
    }

    /// Consume a statement header through `terminator`
    ///
    /// Function expressions in the header are collected into `out`. Returns
    /// whether the terminator was found.
    fn header(&mut self, terminator: TokenKind, out: &mut Vec<Node>) -> bool {
        while let Some(kind) = self.peek_kind() {
            if kind == terminator {
                self.bump();
                return true;
            }
            if HEADER_STOPS.contains(&kind) {
                break;
            }
            if kind == TokenKind::Function {
                let func = self.function(None, false);
                out.push(Node::Function(func));
            } else {
                self.bump();
            }
        }
        false
    }

    /// PICO-8 shorthand `if (cond) stmt` / `while (cond) stmt`
    ///
    /// The cursor sits right after the keyword. The form applies when a
    /// parenthesised condition is followed, on the same line, by something
    /// that cannot continue the condition.
    fn is_shorthand(&self) -> bool {
        if self.peek_kind() != Some(TokenKind::LParen) {
            return false;
        }
        let Some(close) = self.matching_close(self.pos) else {
            return false;
        };
        let close_line = self.tokens[close].end.line;
        match self.tokens.get(close + 1) {
            Some(next) => next.start.line == close_line && !continues_condition(next.kind),
            None => false,
        }
    }

    /// Read the rest of a shorthand statement: condition plus one-line body
    fn shorthand(&mut self, out: &mut Vec<Node>) {
        let Some(close) = self.matching_close(self.pos) else {
            return;
        };
        let line = self.tokens[close].end.line;
        while self.pos <= close {
            if self.peek_kind() == Some(TokenKind::Function) {
                let func = self.function(None, false);
                out.push(Node::Function(func));
            } else {
                self.bump();
            }
        }

        while let Some(token) = self.peek() {
            if token.start.line != line {
                break;
            }
            match token.kind {
                TokenKind::Else => {
                    self.bump();
                }
                TokenKind::End | TokenKind::ElseIf | TokenKind::Until => break,
                _ => self.statement(out),
            }
        }
    }

    fn if_statement(&mut self, out: &mut Vec<Node>) {
        let Some(keyword) = self.bump() else {
            return;
        };
        if self.is_shorthand() {
            self.shorthand(out);
            return;
        }

        let mut clauses = Vec::new();
        let mut kind = ClauseKind::If;
        let mut clause_start = keyword.start;
        let mut body = Vec::new();
        self.header(TokenKind::Then, &mut body);

        loop {
            body.extend(self.block(&[TokenKind::End, TokenKind::Else, TokenKind::ElseIf]));
            clauses.push(Clause {
                kind,
                loc: self.span_from(clause_start),
                body: mem::take(&mut body),
            });

            match self.peek() {
                Some(token) if token.kind == TokenKind::ElseIf => {
                    self.bump();
                    kind = ClauseKind::ElseIf;
                    clause_start = token.start;
                    self.header(TokenKind::Then, &mut body);
                }
                Some(token) if token.kind == TokenKind::Else => {
                    self.bump();
                    kind = ClauseKind::Else;
                    clause_start = token.start;
                }
                _ => break,
            }
        }

        self.expect_end("if", keyword.start);
        out.push(Node::If(IfStatement {
            loc: self.span_from(keyword.start),
            clauses,
        }));
    }

    fn while_statement(&mut self, out: &mut Vec<Node>) {
        let Some(keyword) = self.bump() else {
            return;
        };
        if self.is_shorthand() {
            self.shorthand(out);
            return;
        }

        let mut body = Vec::new();
        self.header(TokenKind::Do, &mut body);
        body.extend(self.block(&[TokenKind::End]));
        self.expect_end("while", keyword.start);
        out.push(Node::While(BlockStatement {
            loc: self.span_from(keyword.start),
            body,
        }));
    }

    fn for_statement(&mut self, out: &mut Vec<Node>) {
        let Some(keyword) = self.bump() else {
            return;
        };
        let numeric = self.peek_kind() == Some(TokenKind::Name)
            && self.nth_kind(1) == Some(TokenKind::Assign);

        let mut body = Vec::new();
        self.header(TokenKind::Do, &mut body);
        body.extend(self.block(&[TokenKind::End]));
        self.expect_end("for", keyword.start);

        let block = BlockStatement {
            loc: self.span_from(keyword.start),
            body,
        };
        out.push(if numeric {
            Node::ForNumeric(block)
        } else {
            Node::ForGeneric(block)
        });
    }

    fn do_statement(&mut self) -> Node {
        let start = self.bump().map_or(Position::new(1, 1), |t| t.start);
        let body = self.block(&[TokenKind::End]);
        self.expect_end("do", start);
        Node::Do(BlockStatement {
            loc: self.span_from(start),
            body,
        })
    }

    fn repeat_statement(&mut self, out: &mut Vec<Node>) {
        let Some(keyword) = self.bump() else {
            return;
        };
        let mut body = self.block(&[TokenKind::Until]);
        if self.peek_kind() == Some(TokenKind::Until) {
            self.bump();
            self.condition(&mut body);
        } else {
            debug!("`repeat` at line {} has no `until`", keyword.start.line);
        }
        out.push(Node::Repeat(BlockStatement {
            loc: self.span_from(keyword.start),
            body,
        }));
    }

    /// Skip the expression after `until`
    ///
    /// The expression continues while brackets are open, while the previous
    /// token still needs an operand, or while the next token is an infix
    /// operator (or a call/index on the same line).
    fn condition(&mut self, out: &mut Vec<Node>) {
        let mut depth = 0usize;
        while let (Some(next), Some(prev)) = (self.peek(), self.previous()) {
            if depth == 0 {
                let closes = CLOSERS.contains(&next.kind)
                    || matches!(
                        next.kind,
                        TokenKind::RParen
                            | TokenKind::RBracket
                            | TokenKind::RBrace
                            | TokenKind::Semicolon
                    );
                if closes || !(expects_operand(prev.kind) || continues_expression(&prev, &next)) {
                    break;
                }
            }
            match next.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1)
                }
                TokenKind::Function => {
                    let func = self.function(None, false);
                    out.push(Node::Function(func));
                    continue;
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Read `function [name] (params) body end`
    ///
    /// `start` overrides the location start, used for `local function`.
    fn function(&mut self, start: Option<Position>, is_local: bool) -> FunctionDeclaration {
        let Some(keyword) = self.bump() else {
            return FunctionDeclaration::default();
        };
        let start = start.unwrap_or(keyword.start);

        // Name ( ('.' | ':') Name )*
        let mut name = String::new();
        let mut want_name = true;
        while let Some(token) = self.peek() {
            let text = token.text(self.source);
            let accepted = match token.kind {
                TokenKind::Name => want_name,
                TokenKind::Op => !want_name && (text == "." || text == ":"),
                _ => false,
            };
            if !accepted {
                break;
            }
            name.push_str(text);
            want_name = !want_name;
            self.bump();
        }

        if self.peek_kind() == Some(TokenKind::LParen) {
            match self.matching_close(self.pos) {
                Some(close) => self.pos = close + 1,
                None => self.pos = self.tokens.len(),
            }
        }

        let body = self.block(&[TokenKind::End]);
        self.expect_end("function", start);

        FunctionDeclaration {
            name: (!name.is_empty()).then_some(name),
            is_local,
            loc: self.span_from(start),
            body,
        }
    }
}

/// Tokens that keep a parenthesised `if`/`while` condition going
fn continues_condition(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Then
            | TokenKind::Do
            | TokenKind::And
            | TokenKind::Or
            | TokenKind::Op
            | TokenKind::Minus
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::LBrace
            | TokenKind::String
            | TokenKind::LongString
    )
}

fn expects_operand(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Until
            | TokenKind::Op
            | TokenKind::Minus
            | TokenKind::Assign
            | TokenKind::Comma
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::LBrace
            | TokenKind::And
            | TokenKind::Or
            | TokenKind::Not
    )
}

fn continues_expression(prev: &Token, next: &Token) -> bool {
    match next.kind {
        TokenKind::Op | TokenKind::Minus | TokenKind::And | TokenKind::Or => true,
        TokenKind::LParen
        | TokenKind::LBracket
        | TokenKind::LBrace
        | TokenKind::String
        | TokenKind::LongString => next.start.line == prev.end.line,
        _ => false,
    }
}
