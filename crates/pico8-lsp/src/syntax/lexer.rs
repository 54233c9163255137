//! Logos-based lexer for PICO-8 Lua
//!
//! Produces just enough token detail for the block reader: keywords,
//! brackets and a coarse operator class. Comments are kept as tokens so the
//! caller can split them off into the comment stream.

use logos::Logos;
use tracing::trace;

use super::ast::Position;
use super::line_index::LineIndex;

/// A token with its kind, byte span and 1-based positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub len: usize,
    pub start: Position,
    pub end: Position,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.offset..self.offset + self.len]
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\x0C]+")]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA AND LITERALS
    // =========================================================================
    #[token("--", lex_comment)]
    Comment,

    #[regex(r"\[=*\[", lex_long_string)]
    LongString,

    #[regex(r#""([^"\\\n]|\\[^\n]|\\\n)*""#)]
    #[regex(r#"'([^'\\\n]|\\[^\n]|\\\n)*'"#)]
    String,

    #[regex(r"[0-9][0-9a-zA-Z_.]*")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("and")]
    And,
    #[token("break")]
    Break,
    #[token("do")]
    Do,
    #[token("else")]
    Else,
    #[token("elseif")]
    ElseIf,
    #[token("end")]
    End,
    #[token("false")]
    False,
    #[token("for")]
    For,
    #[token("function")]
    Function,
    #[token("goto")]
    Goto,
    #[token("if")]
    If,
    #[token("in")]
    In,
    #[token("local")]
    Local,
    #[token("nil")]
    Nil,
    #[token("not")]
    Not,
    #[token("or")]
    Or,
    #[token("repeat")]
    Repeat,
    #[token("return")]
    Return,
    #[token("then")]
    Then,
    #[token("true")]
    True,
    #[token("until")]
    Until,
    #[token("while")]
    While,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Assign,
    #[token("-")]
    Minus,

    /// Every other operator, including PICO-8's `!=`, `\` and `?`
    #[token("==")]
    #[token("~=")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("..")]
    #[token("::")]
    #[regex(r"[+*/%^#&~|<>:.!@$?\\]")]
    Op,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        self == TokenKind::Comment
    }
}

/// Nesting level of a long bracket opener (`[[`, `[=[`, ...) at the start of `text`
pub(crate) fn long_bracket_level(text: &str) -> Option<usize> {
    let rest = text.strip_prefix('[')?;
    let level = rest.bytes().take_while(|&b| b == b'=').count();
    (rest.as_bytes().get(level) == Some(&b'[')).then_some(level)
}

/// Consume up to and including the matching `]=*]`, or to end of input
fn close_long_bracket(lex: &mut logos::Lexer<TokenKind>, level: usize) {
    let close = format!("]{}]", "=".repeat(level));
    let rest = lex.remainder();
    let len = rest
        .find(&close)
        .map_or(rest.len(), |pos| pos + close.len());
    lex.bump(len);
}

fn lex_long_string(lex: &mut logos::Lexer<TokenKind>) {
    let level = lex.slice().len() - 2;
    close_long_bracket(lex, level);
}

fn lex_comment(lex: &mut logos::Lexer<TokenKind>) {
    let rest = lex.remainder();
    if let Some(level) = long_bracket_level(rest) {
        lex.bump(level + 2);
        close_long_bracket(lex, level);
    } else {
        let line = &rest[..rest.find('\n').unwrap_or(rest.len())];
        lex.bump(line.strip_suffix('\r').unwrap_or(line).len());
    }
}

/// Tokenize `source`, resolving positions through `index`
///
/// Characters the lexer does not recognise (P8SCII glyphs, stray quotes)
/// are dropped.
pub fn tokenize(source: &str, index: &LineIndex<'_>) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                offset: span.start,
                len: span.len(),
                start: index.position(span.start),
                end: index.position(span.end),
            }),
            Err(()) => trace!("skipping unrecognised input at byte {}", span.start),
        }
    }

    tokens
}
