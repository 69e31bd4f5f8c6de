use std::fmt;

use super::{
    expression::{Expression, PrefixOperator},
    lexer::Lexer,
    position::Position,
    precedence::{Precedence, infix_info, right_binding, token_precedence},
    token::Token,
    token_type::TokenType,
};

mod module;

pub use module::parse_module;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub position: Position,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.position)
    }
}

impl std::error::Error for SyntaxError {}

/// Deepest expression tree the parser will build. Each grouping, operand
/// and postfix link in a chain counts one level.
pub const MAX_NESTING_DEPTH: usize = 200;

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    peek_token: Token,
    depth: usize,
    pub errors: Vec<SyntaxError>,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        let mut parser = Parser {
            lexer,
            current_token: Token::eof(Position::default()),
            peek_token: Token::eof(Position::default()),
            depth: 0,
            errors: Vec::new(),
        };
        parser.next_token();
        parser.next_token();
        parser
    }

    fn next_token(&mut self) {
        self.current_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    /// Parses the whole input as exactly one expression.
    pub fn parse_single_expression(&mut self) -> Option<Expression> {
        if self.current_token.is(TokenType::Eof) {
            self.error_at_current("expected an expression, found end of input");
            return None;
        }
        let expression = self.parse_expression(Precedence::Lowest)?;
        if !self.peek_token.is(TokenType::Eof) {
            let message = format!(
                "unexpected `{}` after expression; only a single expression is allowed",
                self.peek_token.describe()
            );
            self.errors
                .push(SyntaxError::new(message, self.peek_token.position));
            return None;
        }
        Some(expression)
    }

    // Core expression parsing
    pub(super) fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let outer = self.depth;
        let expression = if self.descend() {
            self.parse_chain(precedence)
        } else {
            None
        };
        self.depth = outer;
        expression
    }

    fn parse_chain(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while precedence < token_precedence(self.peek_token.kind) {
            // Left-leaning chains deepen the tree without recursing here.
            if !self.descend() {
                return None;
            }
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn descend(&mut self) -> bool {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            self.error_at_current(format!(
                "expression nested too deeply (limit {})",
                MAX_NESTING_DEPTH
            ));
            return false;
        }
        true
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        let position = self.current_token.position;
        match self.current_token.kind {
            TokenType::Ident => Some(Expression::Identifier {
                name: self.current_token.text.clone(),
                position,
            }),
            TokenType::Int => self.parse_integer(),
            TokenType::String => Some(Expression::String {
                value: self.current_token.text.clone(),
                position,
            }),
            TokenType::True | TokenType::False => Some(Expression::Boolean {
                value: self.current_token.is(TokenType::True),
                position,
            }),
            TokenType::None => Some(Expression::None { position }),
            TokenType::Minus => {
                self.parse_prefix_expression(PrefixOperator::Negate, Precedence::Prefix)
            }
            TokenType::Not => {
                self.parse_prefix_expression(PrefixOperator::Not, Precedence::LogicalNot)
            }
            TokenType::LParen => self.parse_grouped_expression(),
            TokenType::LBracket => self.parse_list(),
            TokenType::UnterminatedString => {
                self.error_at_current("unterminated string literal");
                None
            }
            TokenType::Eof => {
                self.error_at_current("unexpected end of input");
                None
            }
            _ => {
                let message = format!("unexpected `{}`", self.current_token.describe());
                self.error_at_current(message);
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        let info = infix_info(self.current_token.kind)?;
        let position = left.position();
        match self.current_token.kind {
            TokenType::LParen => {
                let arguments = self.parse_expression_list(TokenType::RParen)?;
                Some(Expression::Call {
                    function: Box::new(left),
                    arguments,
                    position,
                })
            }
            TokenType::Dot => {
                if !self.expect_peek(TokenType::Ident) {
                    return None;
                }
                Some(Expression::Attribute {
                    object: Box::new(left),
                    name: self.current_token.text.clone(),
                    position,
                })
            }
            TokenType::LBracket => {
                self.next_token();
                let index = self.parse_expression(Precedence::Lowest)?;
                if !self.expect_peek(TokenType::RBracket) {
                    return None;
                }
                Some(Expression::Index {
                    left: Box::new(left),
                    index: Box::new(index),
                    position,
                })
            }
            _ => {
                let operator = info.operator?;
                self.next_token();
                let right = self.parse_expression(right_binding(info))?;
                Some(Expression::Infix {
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                    position,
                })
            }
        }
    }

    fn parse_integer(&mut self) -> Option<Expression> {
        let position = self.current_token.position;
        match self.current_token.text.parse::<i64>() {
            Ok(value) => Some(Expression::Integer { value, position }),
            Err(_) => {
                let message = format!(
                    "integer literal `{}` does not fit in 64 bits",
                    self.current_token.text
                );
                self.error_at_current(message);
                None
            }
        }
    }

    fn parse_prefix_expression(
        &mut self,
        operator: PrefixOperator,
        precedence: Precedence,
    ) -> Option<Expression> {
        let position = self.current_token.position;
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Prefix {
            operator,
            right: Box::new(right),
            position,
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenType::RParen) {
            return None;
        }
        Some(expression)
    }

    fn parse_list(&mut self) -> Option<Expression> {
        let position = self.current_token.position;
        let elements = self.parse_expression_list(TokenType::RBracket)?;
        Some(Expression::List { elements, position })
    }

    /// Parses `a, b, c` up to `end`; the current token is the opening delimiter.
    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek_token.is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            if self.peek_token.is(end) {
                break; // trailing comma
            }
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    fn expect_peek(&mut self, kind: TokenType) -> bool {
        if self.peek_token.is(kind) {
            self.next_token();
            true
        } else {
            let message = format!(
                "expected `{}`, found `{}`",
                kind,
                self.peek_token.describe()
            );
            self.errors
                .push(SyntaxError::new(message, self.peek_token.position));
            false
        }
    }

    fn error_at_current(&mut self, message: impl Into<String>) {
        self.errors
            .push(SyntaxError::new(message, self.current_token.position));
    }

    fn first_error(&mut self) -> SyntaxError {
        self.errors.drain(..).next().unwrap_or_else(|| {
            SyntaxError::new("invalid syntax", self.current_token.position)
        })
    }
}

/// Parses `source` as a single expression.
pub fn parse_snippet(source: &str) -> Result<Expression, SyntaxError> {
    let mut parser = Parser::new(Lexer::new(source));
    match parser.parse_single_expression() {
        Some(expression) if parser.errors.is_empty() => Ok(expression),
        _ => Err(parser.first_error()),
    }
}
