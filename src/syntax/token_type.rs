use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Special
    Illegal,
    UnterminatedString,
    Eof,

    // Identifiers and literals
    Ident,
    Int,
    String,

    // Arithmetic Operators
    Plus,
    Minus,
    Asterisk,
    DoubleStar,
    DoubleSlash,
    Percent,

    // Comparison Operators
    Lt,
    Gt,
    Lte,
    Gte,
    Eq,
    NotEq,

    // Assignment
    Assign,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,

    // Keywords
    Def,
    And,
    Or,
    Not,
    True,
    False,
    None,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            // Special
            TokenType::Illegal => "ILLEGAL",
            TokenType::UnterminatedString => "UNTERMINATED_STRING",
            TokenType::Eof => "EOF",

            // Identifiers and literals
            TokenType::Ident => "IDENT",
            TokenType::Int => "INT",
            TokenType::String => "STRING",

            // Arithmetic Operators
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Asterisk => "*",
            TokenType::DoubleStar => "**",
            TokenType::DoubleSlash => "//",
            TokenType::Percent => "%",

            // Comparison Operators
            TokenType::Lt => "<",
            TokenType::Gt => ">",
            TokenType::Lte => "<=",
            TokenType::Gte => ">=",
            TokenType::Eq => "==",
            TokenType::NotEq => "!=",

            // Assignment
            TokenType::Assign => "=",

            // Delimiters
            TokenType::LParen => "(",
            TokenType::RParen => ")",
            TokenType::LBracket => "[",
            TokenType::RBracket => "]",
            TokenType::Comma => ",",
            TokenType::Dot => ".",

            // Keywords
            TokenType::Def => "def",
            TokenType::And => "and",
            TokenType::Or => "or",
            TokenType::Not => "not",
            TokenType::True => "True",
            TokenType::False => "False",
            TokenType::None => "None",
        };
        write!(f, "{}", s)
    }
}

pub fn lookup_ident(ident: &str) -> TokenType {
    match ident {
        "def" => TokenType::Def,
        "and" => TokenType::And,
        "or" => TokenType::Or,
        "not" => TokenType::Not,
        "True" => TokenType::True,
        "False" => TokenType::False,
        "None" => TokenType::None,
        _ => TokenType::Ident,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(lookup_ident("True"), TokenType::True);
        assert_eq!(lookup_ident("true"), TokenType::Ident);
        assert_eq!(lookup_ident("None"), TokenType::None);
        assert_eq!(lookup_ident("def"), TokenType::Def);
        assert_eq!(lookup_ident("define"), TokenType::Ident);
    }
}
