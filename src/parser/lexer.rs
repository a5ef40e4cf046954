//! Lexer (tokenizer) for TINY source code
//!
//! Converts a character stream into [`Token`]s, one per call to
//! [`Lexer::next_token`]. Every character is read tentatively; a character
//! that does not belong to the token being built is pushed back into a
//! single-slot buffer so the next call sees it again.
//!
//! Whitespace and `{ ... }` comments never produce tokens. Comments do not
//! nest: the first `}` closes the comment.

use super::token::{SourceLocation, Token, TokenKind};
use std::str::Chars;

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("Invalid token: [{found}] at {location}")]
    InvalidCharacter {
        found: char,
        location: SourceLocation,
    },

    /// `:` not followed by `=`; `found` holds the two offending characters
    #[error("Invalid token: [{found}] at {location}, expected ':='")]
    MalformedAssignment {
        found: String,
        location: SourceLocation,
    },

    #[error("Unterminated comment starting at {location}")]
    UnterminatedComment { location: SourceLocation },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::InvalidCharacter { location, .. }
            | LexError::MalformedAssignment { location, .. }
            | LexError::UnterminatedComment { location } => *location,
        }
    }
}

/// Scanner states while a token is being assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Number,
    Identifier,
    Assign,
    Comment,
}

/// Lexer for TINY source code
pub struct Lexer<I: Iterator<Item = char>> {
    chars: I,
    pushback: Option<char>,
    line: usize,
    column: usize,
    /// Location before the most recent `read`, restored by `unread`
    last_location: SourceLocation,
}

impl<'a> Lexer<Chars<'a>> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'a str) -> Self {
        Self::from_chars(source.chars())
    }
}

impl<I: Iterator<Item = char>> Lexer<I> {
    /// Create a lexer over any character stream.
    pub fn from_chars(chars: I) -> Self {
        Self {
            chars,
            pushback: None,
            line: 1,
            column: 1,
            last_location: SourceLocation::new(1, 1),
        }
    }

    /// Tokenize the entire input, ending with the [`TokenKind::Eof`] token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Scan and return the next token.
    ///
    /// Once the input is exhausted every call returns the end-of-input token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let mut state = State::Start;
        let mut lexeme = String::new();
        let mut start = self.current_location();

        loop {
            let loc = self.current_location();
            let ch = self.read();

            match state {
                State::Start => {
                    let Some(ch) = ch else {
                        return Ok(Token::eof(loc));
                    };
                    start = loc;

                    if ch.is_ascii_digit() {
                        state = State::Number;
                    } else if ch.is_alphabetic() {
                        state = State::Identifier;
                    } else if ch == ':' {
                        state = State::Assign;
                    } else if ch == '{' {
                        state = State::Comment;
                        continue;
                    } else if ch.is_whitespace() {
                        continue;
                    } else if let Some(kind) = TokenKind::symbol(ch) {
                        return Ok(Token::new(ch.to_string(), kind, start));
                    } else {
                        return Err(LexError::InvalidCharacter {
                            found: ch,
                            location: loc,
                        });
                    }

                    lexeme.push(ch);
                }

                State::Number => match ch {
                    Some(c) if c.is_ascii_digit() => lexeme.push(c),
                    other => {
                        self.unread(other);
                        return Ok(Token::new(lexeme, TokenKind::Number, start));
                    }
                },

                State::Identifier => match ch {
                    Some(c) if c.is_alphabetic() || c.is_ascii_digit() => lexeme.push(c),
                    other => {
                        self.unread(other);
                        let kind = TokenKind::classify(&lexeme);
                        return Ok(Token::new(lexeme, kind, start));
                    }
                },

                State::Assign => match ch {
                    Some('=') => {
                        lexeme.push('=');
                        return Ok(Token::new(lexeme, TokenKind::Assign, start));
                    }
                    Some(c) => {
                        return Err(LexError::MalformedAssignment {
                            found: format!(":{}", c),
                            location: start,
                        });
                    }
                    None => {
                        return Err(LexError::MalformedAssignment {
                            found: ":".to_string(),
                            location: start,
                        });
                    }
                },

                State::Comment => match ch {
                    Some('}') => state = State::Start,
                    Some(_) => {}
                    None => return Err(LexError::UnterminatedComment { location: start }),
                },
            }
        }
    }

    /// Consume one character, preferring the pushback slot.
    fn read(&mut self) -> Option<char> {
        let ch = self.pushback.take().or_else(|| self.chars.next())?;

        self.last_location = self.current_location();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Push back the character just read so the next `read` returns it.
    fn unread(&mut self, ch: Option<char>) {
        if let Some(ch) = ch {
            debug_assert!(self.pushback.is_none(), "only one character of pushback");
            self.pushback = Some(ch);
            self.line = self.last_location.line;
            self.column = self.last_location.column;
        }
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
