use std::cmp::Ordering;

use crate::{
    runtime::{
        error::{ErrorKind, RaisedError, RtResult},
        heap::Heap,
        object::{MAX_CONTAINER_DEPTH, Object, ObjectId},
    },
    syntax::expression::InfixOperator,
};

/// Rich comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Lt,
    Le,
    Eq,
    Ne,
    Gt,
    Ge,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    pub(crate) fn from_infix(operator: InfixOperator) -> Option<Self> {
        match operator {
            InfixOperator::Less => Some(CompareOp::Lt),
            InfixOperator::LessEqual => Some(CompareOp::Le),
            InfixOperator::Equal => Some(CompareOp::Eq),
            InfixOperator::NotEqual => Some(CompareOp::Ne),
            InfixOperator::Greater => Some(CompareOp::Gt),
            InfixOperator::GreaterEqual => Some(CompareOp::Ge),
            _ => None,
        }
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }
}

/// Operator result that has not been placed on the heap yet.
///
/// `List` slots are borrowed from the operands; whoever allocates the list
/// must take a reference to each of them.
#[derive(Debug, PartialEq)]
pub(crate) enum Computed {
    Int(i64),
    Str(String),
    List(Vec<Option<ObjectId>>),
}

fn overflow() -> RaisedError {
    RaisedError::value_error("integer overflow")
}

fn zero_division() -> RaisedError {
    RaisedError::new(
        ErrorKind::ZeroDivisionError,
        "integer division or modulo by zero",
    )
}

/// Division rounding toward negative infinity.
pub fn floor_divide(a: i64, b: i64) -> RtResult<i64> {
    if b == 0 {
        return Err(zero_division());
    }
    let quotient = a.checked_div(b).ok_or_else(overflow)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Remainder carrying the sign of the divisor.
pub fn modulo(a: i64, b: i64) -> RtResult<i64> {
    if b == 0 {
        return Err(zero_division());
    }
    if b == -1 {
        return Ok(0);
    }
    let remainder = a % b;
    if remainder != 0 && ((remainder < 0) != (b < 0)) {
        Ok(remainder + b)
    } else {
        Ok(remainder)
    }
}

pub fn power(base: i64, exponent: i64) -> RtResult<i64> {
    if exponent < 0 {
        return Err(RaisedError::value_error(
            "negative exponents are not supported for integers",
        ));
    }
    let exponent = u32::try_from(exponent).map_err(|_| overflow())?;
    base.checked_pow(exponent).ok_or_else(overflow)
}

pub fn int_arithmetic(operator: InfixOperator, a: i64, b: i64) -> RtResult<i64> {
    let result = match operator {
        InfixOperator::Add => a.checked_add(b),
        InfixOperator::Subtract => a.checked_sub(b),
        InfixOperator::Multiply => a.checked_mul(b),
        InfixOperator::FloorDivide => return floor_divide(a, b),
        InfixOperator::Modulo => return modulo(a, b),
        InfixOperator::Power => return power(a, b),
        other => {
            return Err(RaisedError::type_error(format!(
                "`{}` is not an arithmetic operator",
                other
            )));
        }
    };
    result.ok_or_else(overflow)
}

pub(crate) fn arithmetic(
    heap: &Heap,
    operator: InfixOperator,
    left: ObjectId,
    right: ObjectId,
) -> RtResult<Computed> {
    match (heap.get(left), heap.get(right)) {
        (Object::Int(a), Object::Int(b)) => int_arithmetic(operator, *a, *b).map(Computed::Int),
        (Object::Str(a), Object::Str(b)) if operator == InfixOperator::Add => {
            Ok(Computed::Str(format!("{}{}", a, b)))
        }
        (Object::List(a), Object::List(b)) if operator == InfixOperator::Add => {
            Ok(Computed::List(a.iter().chain(b.iter()).copied().collect()))
        }
        (l, r) => Err(RaisedError::type_error(format!(
            "unsupported operand type(s) for {}: '{}' and '{}'",
            operator,
            l.kind(),
            r.kind()
        ))),
    }
}

pub(crate) fn negate(heap: &Heap, operand: ObjectId) -> RtResult<Computed> {
    match heap.get(operand) {
        Object::Int(value) => value.checked_neg().map(Computed::Int).ok_or_else(overflow),
        other => Err(RaisedError::type_error(format!(
            "bad operand type for unary -: '{}'",
            other.kind()
        ))),
    }
}

/// Total order between two objects, or `None` when their kinds do not
/// compare. Objects of other kinds are only equal to themselves.
pub(crate) fn ordering(heap: &Heap, a: ObjectId, b: ObjectId) -> RtResult<Option<Ordering>> {
    nested_ordering(heap, a, b, 0)
}

fn nested_ordering(
    heap: &Heap,
    a: ObjectId,
    b: ObjectId,
    depth: usize,
) -> RtResult<Option<Ordering>> {
    let ordering = match (heap.get(a), heap.get(b)) {
        (Object::Int(x), Object::Int(y)) => Some(x.cmp(y)),
        (Object::Bool(x), Object::Bool(y)) => Some(x.cmp(y)),
        (Object::Str(x), Object::Str(y)) => Some(x.cmp(y)),
        (Object::None, Object::None) => Some(Ordering::Equal),
        (Object::List(xs), Object::List(ys)) => return list_ordering(heap, xs, ys, depth),
        _ if a == b => Some(Ordering::Equal),
        _ => None,
    };
    Ok(ordering)
}

fn list_ordering(
    heap: &Heap,
    xs: &[Option<ObjectId>],
    ys: &[Option<ObjectId>],
    depth: usize,
) -> RtResult<Option<Ordering>> {
    if depth >= MAX_CONTAINER_DEPTH {
        return Err(RaisedError::new(
            ErrorKind::RecursionError,
            format!(
                "lists nested deeper than {} levels do not compare",
                MAX_CONTAINER_DEPTH
            ),
        ));
    }
    for (x, y) in xs.iter().zip(ys) {
        let (Some(x), Some(y)) = (x, y) else {
            return Err(RaisedError::value_error(
                "cannot compare a list with an unset slot",
            ));
        };
        match nested_ordering(heap, *x, *y, depth + 1)? {
            Some(Ordering::Equal) => continue,
            other => return Ok(other),
        }
    }
    Ok(Some(xs.len().cmp(&ys.len())))
}

pub(crate) fn compare(heap: &Heap, op: CompareOp, a: ObjectId, b: ObjectId) -> RtResult<bool> {
    match ordering(heap, a, b)? {
        Some(ordering) => Ok(op.holds(ordering)),
        None => match op {
            CompareOp::Eq => Ok(false),
            CompareOp::Ne => Ok(true),
            _ => Err(RaisedError::type_error(format!(
                "'{}' not supported between instances of '{}' and '{}'",
                op.symbol(),
                heap.kind(a),
                heap.kind(b)
            ))),
        },
    }
}

/// Stable insertion sort that fails on the first pair that does not compare.
pub(crate) fn sort_ids(heap: &Heap, ids: &mut [ObjectId]) -> RtResult<()> {
    for i in 1..ids.len() {
        let mut j = i;
        while j > 0 {
            let (a, b) = (ids[j - 1], ids[j]);
            let ordering = ordering(heap, a, b)?.ok_or_else(|| {
                RaisedError::type_error(format!(
                    "'<' not supported between instances of '{}' and '{}'",
                    heap.kind(a),
                    heap.kind(b)
                ))
            })?;
            if ordering != Ordering::Greater {
                break;
            }
            ids.swap(j - 1, j);
            j -= 1;
        }
    }
    Ok(())
}

pub fn is_true(object: &Object) -> bool {
    match object {
        Object::Int(value) => *value != 0,
        Object::Bool(value) => *value,
        Object::None => false,
        Object::Str(value) => !value.is_empty(),
        Object::List(items) => !items.is_empty(),
        Object::Dict(entries) => !entries.is_empty(),
        Object::Module { .. } | Object::Function(_) | Object::Builtin(_) => true,
    }
}
