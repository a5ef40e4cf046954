//! Token definitions shared by the lexer and the parser
//!
//! A [`Token`] is a lexeme plus the [`TokenKind`] it was classified as. Tokens
//! are built by the lexer and never mutated afterwards.

use std::fmt;

/// Line / column position of a character in the source (both 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Reserved words of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    Then,
    Else,
    End,
    Repeat,
    Until,
    Read,
    Write,
}

impl Keyword {
    pub const ALL: [Keyword; 8] = [
        Keyword::If,
        Keyword::Then,
        Keyword::Else,
        Keyword::End,
        Keyword::Repeat,
        Keyword::Until,
        Keyword::Read,
        Keyword::Write,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::If => "if",
            Keyword::Then => "then",
            Keyword::Else => "else",
            Keyword::End => "end",
            Keyword::Repeat => "repeat",
            Keyword::Until => "until",
            Keyword::Read => "read",
            Keyword::Write => "write",
        }
    }

    pub fn lookup(word: &str) -> Option<Keyword> {
        Self::ALL.into_iter().find(|kw| kw.as_str() == word)
    }
}

/// Classified token type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Identifier,
    Assign, // :=

    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    Equal,     // =
    Less,      // <
    LParen,    // (
    RParen,    // )
    Semicolon, // ;

    Keyword(Keyword),

    Eof,
}

impl TokenKind {
    /// Look up a one-character operator or punctuation symbol.
    pub fn symbol(ch: char) -> Option<TokenKind> {
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Equal,
            '<' => TokenKind::Less,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ';' => TokenKind::Semicolon,
            _ => return None,
        };
        Some(kind)
    }

    /// Classify a completed lexeme: symbol table first, then keywords,
    /// otherwise an identifier.
    pub fn classify(lexeme: &str) -> TokenKind {
        let mut chars = lexeme.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(kind) = TokenKind::symbol(ch) {
                return kind;
            }
        }

        match Keyword::lookup(lexeme) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Identifier,
        }
    }

    /// Human-readable description, used in "expected" positions of errors
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::Assign => ":=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Equal => "=",
            TokenKind::Less => "<",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Semicolon => ";",
            TokenKind::Keyword(kw) => kw.as_str(),
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A classified lexeme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    lexeme: String,
    kind: TokenKind,
    location: SourceLocation,
}

impl Token {
    pub fn new(lexeme: String, kind: TokenKind, location: SourceLocation) -> Self {
        Self {
            lexeme,
            kind,
            location,
        }
    }

    /// The end-of-input sentinel: empty lexeme, [`TokenKind::Eof`].
    pub fn eof(location: SourceLocation) -> Self {
        Self::new(String::new(), TokenKind::Eof, location)
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn into_lexeme(self) -> String {
        self.lexeme
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            f.write_str("end of input")
        } else {
            f.write_str(&self.lexeme)
        }
    }
}
