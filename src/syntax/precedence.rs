use super::{expression::InfixOperator, token_type::TokenType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    LogicalOr,   // or
    LogicalAnd,  // and
    LogicalNot,  // not x
    Comparison,  // <, >, <=, >=, ==, !=
    Sum,         // +, -
    Product,     // *, //, %
    Prefix,      // -x
    Power,       // ** binds tighter than unary minus on its left
    Call,        // fn(x), module.attr
    Index,       // list[index]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfixInfo {
    pub operator: Option<InfixOperator>,
    pub precedence: Precedence,
    pub associativity: Assoc,
}

const fn binary(operator: InfixOperator, precedence: Precedence) -> InfixInfo {
    InfixInfo {
        operator: Some(operator),
        precedence,
        associativity: Assoc::Left,
    }
}

/// Infix binding power for the token in infix position, if any.
pub fn infix_info(token: TokenType) -> Option<InfixInfo> {
    let info = match token {
        TokenType::Or => binary(InfixOperator::Or, Precedence::LogicalOr),
        TokenType::And => binary(InfixOperator::And, Precedence::LogicalAnd),
        TokenType::Lt => binary(InfixOperator::Less, Precedence::Comparison),
        TokenType::Lte => binary(InfixOperator::LessEqual, Precedence::Comparison),
        TokenType::Gt => binary(InfixOperator::Greater, Precedence::Comparison),
        TokenType::Gte => binary(InfixOperator::GreaterEqual, Precedence::Comparison),
        TokenType::Eq => binary(InfixOperator::Equal, Precedence::Comparison),
        TokenType::NotEq => binary(InfixOperator::NotEqual, Precedence::Comparison),
        TokenType::Plus => binary(InfixOperator::Add, Precedence::Sum),
        TokenType::Minus => binary(InfixOperator::Subtract, Precedence::Sum),
        TokenType::Asterisk => binary(InfixOperator::Multiply, Precedence::Product),
        TokenType::DoubleSlash => binary(InfixOperator::FloorDivide, Precedence::Product),
        TokenType::Percent => binary(InfixOperator::Modulo, Precedence::Product),
        TokenType::DoubleStar => InfixInfo {
            operator: Some(InfixOperator::Power),
            precedence: Precedence::Power,
            associativity: Assoc::Right,
        },
        TokenType::LParen | TokenType::Dot => InfixInfo {
            operator: None,
            precedence: Precedence::Call,
            associativity: Assoc::Left,
        },
        TokenType::LBracket => InfixInfo {
            operator: None,
            precedence: Precedence::Index,
            associativity: Assoc::Left,
        },
        _ => return None,
    };
    Some(info)
}

pub fn token_precedence(token: TokenType) -> Precedence {
    infix_info(token).map_or(Precedence::Lowest, |info| info.precedence)
}

/// Precedence used when parsing the right operand of an infix operator.
///
/// Right-associative operators parse their right side one level lower so
/// that `2 ** 3 ** 2` groups as `2 ** (3 ** 2)`.
pub fn right_binding(info: InfixInfo) -> Precedence {
    match (info.associativity, info.precedence) {
        (Assoc::Right, Precedence::Power) => Precedence::Prefix,
        _ => info.precedence,
    }
}
