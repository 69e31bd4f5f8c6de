use std::rc::Rc;

use crate::runtime::{
    error::RtResult,
    interpreter::Interpreter,
    object::{Object, ObjectId},
};

use super::helpers::{arg_int, check_arity};

/// Binary spelling with a `0b` prefix, e.g. `bin(-5) == "-0b101"`.
pub(super) fn format_binary(value: i64) -> String {
    if value < 0 {
        format!("-0b{:b}", value.unsigned_abs())
    } else {
        format!("0b{:b}", value)
    }
}

pub(super) fn builtin_bin(interp: &mut Interpreter, args: &[ObjectId]) -> RtResult<ObjectId> {
    check_arity(args, 1, "bin", "bin(n)")?;
    let value = arg_int(interp, args, 0, "bin", "argument", "bin(n)")?;
    interp
        .heap
        .alloc(Object::Str(Rc::from(format_binary(value))))
}
