use std::borrow::Cow;

use super::{position::Position, token_type::TokenType};

/// One lexed token and where it starts.
///
/// `text` is the source spelling, except for string literals where it holds
/// the unescaped contents without quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenType,
    pub text: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenType, text: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn eof(position: Position) -> Self {
        Self::new(TokenType::Eof, "", position)
    }

    pub fn is(&self, kind: TokenType) -> bool {
        self.kind == kind
    }

    /// How the token is named in syntax error messages.
    pub fn describe(&self) -> Cow<'_, str> {
        match self.kind {
            TokenType::Eof => Cow::Borrowed("end of input"),
            TokenType::String | TokenType::UnterminatedString => {
                Cow::Owned(format!("'{}'", self.text))
            }
            _ => Cow::Borrowed(&self.text),
        }
    }
}
