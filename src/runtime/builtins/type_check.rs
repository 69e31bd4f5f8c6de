use std::rc::Rc;

use crate::runtime::{
    error::RtResult,
    interpreter::Interpreter,
    object::{Object, ObjectId, ObjectKind},
};

use super::helpers::check_arity;

pub(super) fn builtin_type_of(interp: &mut Interpreter, args: &[ObjectId]) -> RtResult<ObjectId> {
    check_arity(args, 1, "type_of", "type_of(x)")?;
    let name = interp.kind(args[0]).name();
    interp.heap.alloc(Object::Str(Rc::from(name)))
}

/// Exact integer check; booleans are not integers here.
pub(super) fn builtin_is_int(interp: &mut Interpreter, args: &[ObjectId]) -> RtResult<ObjectId> {
    check_arity(args, 1, "is_int", "is_int(x)")?;
    let exact = interp.kind(args[0]) == ObjectKind::Int;
    Ok(interp.bool_obj(exact))
}
