use crate::runtime::{
    error::{ErrorKind, RaisedError, RtResult},
    interpreter::Interpreter,
    object::ObjectId,
};

use super::helpers::check_arity;

/// `ensure(cond, message)` returns `None` or raises `AssertionError`.
pub(super) fn builtin_ensure(interp: &mut Interpreter, args: &[ObjectId]) -> RtResult<ObjectId> {
    check_arity(args, 2, "ensure", "ensure(cond, message)")?;
    if interp.is_true(args[0]) {
        return Ok(interp.none());
    }
    Err(RaisedError::new(
        ErrorKind::AssertionError,
        interp.str_of(args[1]),
    ))
}
