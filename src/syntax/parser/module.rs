use crate::syntax::{
    expression::{Definition, Expression},
    lexer::Lexer,
    position::Position,
    precedence::Precedence,
    token_type::TokenType,
};

use super::{Parser, SyntaxError};

/// Parses a module file: one `def name(params) = expr` or `name = expr`
/// per line. Blank lines and `#` comments are skipped.
pub fn parse_module(source: &str) -> Result<Vec<Definition>, SyntaxError> {
    let mut definitions: Vec<Definition> = Vec::new();

    for (index, text) in source.lines().enumerate() {
        let line = index + 1;
        let Some(definition) = parse_line(text, line)? else {
            continue;
        };
        if definitions.iter().any(|d| d.name() == definition.name()) {
            return Err(SyntaxError::new(
                format!("`{}` is defined more than once", definition.name()),
                Position::new(line, 0),
            ));
        }
        definitions.push(definition);
    }

    Ok(definitions)
}

fn parse_line(text: &str, line: usize) -> Result<Option<Definition>, SyntaxError> {
    let mut parser = Parser::new(Lexer::starting_at_line(text, line));

    let definition = match parser.current_token.kind {
        TokenType::Eof => return Ok(None),
        TokenType::Def => parser.parse_function_definition(line),
        TokenType::Ident if parser.peek_token.is(TokenType::Assign) => {
            parser.parse_binding(line)
        }
        _ => {
            parser.error_at_current(
                "expected `def name(...) = expression` or `name = expression`",
            );
            None
        }
    };

    match definition {
        Some(definition) if parser.errors.is_empty() => Ok(Some(definition)),
        _ => Err(parser.first_error()),
    }
}

impl Parser {
    fn parse_function_definition(&mut self, line: usize) -> Option<Definition> {
        if !self.expect_peek(TokenType::Ident) {
            return None;
        }
        let name = self.current_token.text.clone();

        if !self.expect_peek(TokenType::LParen) {
            return None;
        }
        let params = self.parse_parameters()?;

        if !self.expect_peek(TokenType::Assign) {
            return None;
        }
        let body = self.parse_body()?;

        Some(Definition::Function {
            name,
            params,
            body,
            line,
        })
    }

    fn parse_binding(&mut self, line: usize) -> Option<Definition> {
        let name = self.current_token.text.clone();
        self.next_token(); // `=`
        let value = self.parse_body()?;
        Some(Definition::Binding { name, value, line })
    }

    fn parse_parameters(&mut self) -> Option<Vec<String>> {
        let mut params = Vec::new();

        if self.peek_token.is(TokenType::RParen) {
            self.next_token();
            return Some(params);
        }

        loop {
            if !self.expect_peek(TokenType::Ident) {
                return None;
            }
            let param = self.current_token.text.clone();
            if params.contains(&param) {
                self.error_at_current(format!("duplicate parameter `{}`", param));
                return None;
            }
            params.push(param);

            if self.peek_token.is(TokenType::Comma) {
                self.next_token();
                continue;
            }
            break;
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }
        Some(params)
    }

    /// Parses the right-hand side after `=`; the current token is `=`.
    fn parse_body(&mut self) -> Option<Expression> {
        self.next_token();
        if self.current_token.is(TokenType::Eof) {
            self.error_at_current("expected an expression after `=`");
            return None;
        }
        let body = self.parse_expression(Precedence::Lowest)?;
        if !self.peek_token.is(TokenType::Eof) {
            let message = format!("unexpected `{}` after definition", self.peek_token.describe());
            self.errors
                .push(SyntaxError::new(message, self.peek_token.position));
            return None;
        }
        Some(body)
    }
}
