use crate::runtime::{
    error::{RaisedError, RtResult},
    interpreter::Interpreter,
    object::{Object, ObjectId},
};

pub(super) fn arity_error(name: &str, expected: usize, got: usize, signature: &str) -> RaisedError {
    RaisedError::type_error(format!(
        "{}() takes {} argument(s) but {} were given (usage: {})",
        name, expected, got, signature
    ))
}

pub(super) fn type_error(
    name: &str,
    label: &str,
    expected: &str,
    got: &str,
    signature: &str,
) -> RaisedError {
    RaisedError::type_error(format!(
        "{} expected {} to be {}, got {} (usage: {})",
        name, label, expected, got, signature
    ))
}

pub(super) fn check_arity(
    args: &[ObjectId],
    expected: usize,
    name: &str,
    signature: &str,
) -> RtResult<()> {
    if args.len() != expected {
        return Err(arity_error(name, expected, args.len(), signature));
    }
    Ok(())
}

pub(super) fn arg_int(
    interp: &Interpreter,
    args: &[ObjectId],
    index: usize,
    name: &str,
    label: &str,
    signature: &str,
) -> RtResult<i64> {
    match interp.get(args[index]) {
        Object::Int(value) => Ok(*value),
        other => Err(type_error(
            name,
            label,
            "int",
            other.kind().name(),
            signature,
        )),
    }
}

/// Items of a fully populated list argument.
pub(super) fn arg_list_items(
    interp: &Interpreter,
    args: &[ObjectId],
    index: usize,
    name: &str,
    signature: &str,
) -> RtResult<Vec<ObjectId>> {
    match interp.get(args[index]) {
        Object::List(items) => items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                item.ok_or_else(|| {
                    RaisedError::value_error(format!(
                        "{} found an unset slot at position {}",
                        name, position
                    ))
                })
            })
            .collect(),
        other => Err(type_error(
            name,
            "argument",
            "list",
            other.kind().name(),
            signature,
        )),
    }
}
