use super::position::Position;
use super::token::Token;
use super::token_type::{TokenType, lookup_ident};

/// Lexer for snippets and module definition lines.
#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    read_position: usize,
    current_char: Option<char>,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: impl Into<String>) -> Self {
        Self::starting_at_line(input, 1)
    }

    /// Creates a lexer whose positions are reported from `line` onward.
    ///
    /// Module files are parsed one definition per line, so each line gets its
    /// own lexer but diagnostics still point at the file line.
    pub fn starting_at_line(input: impl Into<String>, line: usize) -> Self {
        let mut lexer = Self {
            input: input.into().chars().collect(),
            position: 0,
            read_position: 0,
            current_char: None,
            line,
            column: 0,
        };
        lexer.read_char();
        lexer.column = 0;
        lexer
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Token {
        self.skip_ignorable();

        let start = Position::new(self.line, self.column);

        let token = match self.current_char {
            // Two-character operators
            Some('=') if self.peek_char() == Some('=') => {
                self.read_char();
                Token::new(TokenType::Eq, "==", start)
            }
            Some('!') if self.peek_char() == Some('=') => {
                self.read_char();
                Token::new(TokenType::NotEq, "!=", start)
            }
            Some('<') if self.peek_char() == Some('=') => {
                self.read_char();
                Token::new(TokenType::Lte, "<=", start)
            }
            Some('>') if self.peek_char() == Some('=') => {
                self.read_char();
                Token::new(TokenType::Gte, ">=", start)
            }
            Some('*') if self.peek_char() == Some('*') => {
                self.read_char();
                Token::new(TokenType::DoubleStar, "**", start)
            }
            Some('/') if self.peek_char() == Some('/') => {
                self.read_char();
                Token::new(TokenType::DoubleSlash, "//", start)
            }
            // Single-character operators and delimiters
            Some('=') => Token::new(TokenType::Assign, "=", start),
            Some('+') => Token::new(TokenType::Plus, "+", start),
            Some('-') => Token::new(TokenType::Minus, "-", start),
            Some('*') => Token::new(TokenType::Asterisk, "*", start),
            Some('%') => Token::new(TokenType::Percent, "%", start),
            Some('<') => Token::new(TokenType::Lt, "<", start),
            Some('>') => Token::new(TokenType::Gt, ">", start),
            Some('(') => Token::new(TokenType::LParen, "(", start),
            Some(')') => Token::new(TokenType::RParen, ")", start),
            Some('[') => Token::new(TokenType::LBracket, "[", start),
            Some(']') => Token::new(TokenType::RBracket, "]", start),
            Some(',') => Token::new(TokenType::Comma, ",", start),
            Some('.') => Token::new(TokenType::Dot, ".", start),

            // String literals
            Some(quote @ ('"' | '\'')) => {
                return self.read_string(quote, start);
            }

            // End of file
            None => Token::new(TokenType::Eof, "", start),

            // Identifiers and keywords
            Some(ch) if is_letter(ch) => {
                let ident = self.read_identifier();
                return Token::new(lookup_ident(&ident), ident, start);
            }

            // Numbers
            Some(ch) if ch.is_ascii_digit() => {
                let num = self.read_number();
                return Token::new(TokenType::Int, num, start);
            }

            // Illegal character
            Some(ch) => Token::new(TokenType::Illegal, ch.to_string(), start),
        };

        self.read_char();
        token
    }

    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let is_eof = token.is(TokenType::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn read_char(&mut self) {
        if self.current_char == Some('\n') {
            self.line += 1;
            self.column = 0;
        } else if self.current_char.is_some() {
            self.column += 1;
        }

        self.current_char = if self.read_position >= self.input.len() {
            None
        } else {
            Some(self.input[self.read_position])
        };

        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.read_position).copied()
    }

    fn skip_ignorable(&mut self) {
        loop {
            while matches!(self.current_char, Some(' ' | '\t' | '\r' | '\n')) {
                self.read_char();
            }

            if self.current_char == Some('#') {
                while self.current_char.is_some() && self.current_char != Some('\n') {
                    self.read_char();
                }
                continue;
            }

            break;
        }
    }

    fn read_identifier(&mut self) -> String {
        let start = self.position;
        while self
            .current_char
            .is_some_and(|ch| is_letter(ch) || ch.is_ascii_digit())
        {
            self.read_char();
        }
        self.input[start..self.position].iter().collect()
    }

    fn read_number(&mut self) -> String {
        let start = self.position;
        while self
            .current_char
            .is_some_and(|ch| ch.is_ascii_digit() || ch == '_')
        {
            self.read_char();
        }
        self.input[start..self.position]
            .iter()
            .filter(|ch| **ch != '_')
            .collect()
    }

    /// Reads a quoted literal. The text of the returned token is the
    /// unescaped contents without quotes.
    fn read_string(&mut self, quote: char, start: Position) -> Token {
        self.read_char(); // opening quote
        let mut contents = String::new();

        loop {
            match self.current_char {
                None | Some('\n') => {
                    return Token::new(TokenType::UnterminatedString, contents, start);
                }
                Some(ch) if ch == quote => {
                    self.read_char();
                    return Token::new(TokenType::String, contents, start);
                }
                Some('\\') => {
                    self.read_char();
                    match self.current_char {
                        Some('n') => contents.push('\n'),
                        Some('t') => contents.push('\t'),
                        Some('\\') => contents.push('\\'),
                        Some('\'') => contents.push('\''),
                        Some('"') => contents.push('"'),
                        Some(other) => {
                            contents.push('\\');
                            contents.push(other);
                        }
                        None => {
                            return Token::new(TokenType::UnterminatedString, contents, start);
                        }
                    }
                    self.read_char();
                }
                Some(ch) => {
                    contents.push(ch);
                    self.read_char();
                }
            }
        }
    }
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}
