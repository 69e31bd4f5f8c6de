use std::fmt;

use super::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    FloorDivide,
    Modulo,
    Power,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::FloorDivide => "//",
            InfixOperator::Modulo => "%",
            InfixOperator::Power => "**",
            InfixOperator::Less => "<",
            InfixOperator::LessEqual => "<=",
            InfixOperator::Greater => ">",
            InfixOperator::GreaterEqual => ">=",
            InfixOperator::Equal => "==",
            InfixOperator::NotEqual => "!=",
            InfixOperator::And => "and",
            InfixOperator::Or => "or",
        };
        write!(f, "{}", s)
    }
}

/// Expression tree produced by the parser and walked by the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Integer {
        value: i64,
        position: Position,
    },
    String {
        value: String,
        position: Position,
    },
    Boolean {
        value: bool,
        position: Position,
    },
    None {
        position: Position,
    },
    Identifier {
        name: String,
        position: Position,
    },
    List {
        elements: Vec<Expression>,
        position: Position,
    },
    Prefix {
        operator: PrefixOperator,
        right: Box<Expression>,
        position: Position,
    },
    Infix {
        left: Box<Expression>,
        operator: InfixOperator,
        right: Box<Expression>,
        position: Position,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
        position: Position,
    },
    Attribute {
        object: Box<Expression>,
        name: String,
        position: Position,
    },
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
        position: Position,
    },
}

impl Expression {
    pub fn position(&self) -> Position {
        match self {
            Expression::Integer { position, .. }
            | Expression::String { position, .. }
            | Expression::Boolean { position, .. }
            | Expression::None { position }
            | Expression::Identifier { position, .. }
            | Expression::List { position, .. }
            | Expression::Prefix { position, .. }
            | Expression::Infix { position, .. }
            | Expression::Call { position, .. }
            | Expression::Attribute { position, .. }
            | Expression::Index { position, .. } => *position,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Integer { value, .. } => write!(f, "{}", value),
            Expression::String { value, .. } => write!(f, "{:?}", value),
            Expression::Boolean { value: true, .. } => write!(f, "True"),
            Expression::Boolean { value: false, .. } => write!(f, "False"),
            Expression::None { .. } => write!(f, "None"),
            Expression::Identifier { name, .. } => write!(f, "{}", name),
            Expression::List { elements, .. } => {
                let items: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Expression::Prefix {
                operator: PrefixOperator::Negate,
                right,
                ..
            } => write!(f, "(-{})", right),
            Expression::Prefix {
                operator: PrefixOperator::Not,
                right,
                ..
            } => write!(f, "(not {})", right),
            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::Call {
                function,
                arguments,
                ..
            } => {
                let args: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", function, args.join(", "))
            }
            Expression::Attribute { object, name, .. } => write!(f, "{}.{}", object, name),
            Expression::Index { left, index, .. } => write!(f, "{}[{}]", left, index),
        }
    }
}

/// One line of a module file.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// `def name(params) = body`
    Function {
        name: String,
        params: Vec<String>,
        body: Expression,
        line: usize,
    },
    /// `name = value`
    Binding {
        name: String,
        value: Expression,
        line: usize,
    },
}

impl Definition {
    pub fn name(&self) -> &str {
        match self {
            Definition::Function { name, .. } | Definition::Binding { name, .. } => name,
        }
    }
}
