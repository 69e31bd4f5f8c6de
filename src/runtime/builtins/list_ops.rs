use crate::runtime::{
    error::RtResult,
    interpreter::Interpreter,
    object::{Object, ObjectId},
    operators::sort_ids,
};

use super::helpers::{arg_list_items, check_arity};

pub(super) fn builtin_len(interp: &mut Interpreter, args: &[ObjectId]) -> RtResult<ObjectId> {
    check_arity(args, 1, "len", "len(x)")?;
    let len = interp.length_of(args[0])?;
    interp.heap.alloc(Object::Int(len as i64))
}

/// A new ascending list; the argument is left untouched.
pub(super) fn builtin_sorted(interp: &mut Interpreter, args: &[ObjectId]) -> RtResult<ObjectId> {
    check_arity(args, 1, "sorted", "sorted(xs)")?;
    let mut items = arg_list_items(interp, args, 0, "sorted", "sorted(xs)")?;
    sort_ids(&interp.heap, &mut items)?;
    for item in &items {
        interp.heap.incref(*item);
    }
    interp
        .heap
        .alloc(Object::List(items.into_iter().map(Some).collect()))
}
