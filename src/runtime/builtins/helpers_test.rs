use std::io;

use crate::runtime::{
    error::ErrorKind,
    interpreter::{Interpreter, InterpreterOptions},
};

use super::helpers::{arg_int, arg_list_items, check_arity, type_error};

fn interpreter() -> Interpreter {
    Interpreter::new(InterpreterOptions::default(), Box::new(io::sink()))
}

#[test]
fn check_arity_rejects_wrong_count() {
    let mut interp = interpreter();
    let one = interp.new_int(1).unwrap();
    let err = check_arity(&[one], 2, "bin", "bin(n)").unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
    assert_eq!(
        err.message,
        "bin() takes 2 argument(s) but 1 were given (usage: bin(n))"
    );
}

#[test]
fn arg_int_reports_actual_kind() {
    let mut interp = interpreter();
    let text = interp.new_str("stray cat").unwrap();
    let err = arg_int(&interp, &[text], 0, "bin", "argument", "bin(n)").unwrap_err();
    assert!(err.message.contains("bin expected argument to be int, got str"));
}

#[test]
fn arg_list_items_rejects_unset_slots() {
    let mut interp = interpreter();
    let list = interp.new_list(2).unwrap();
    let err = arg_list_items(&interp, &[list], 0, "sorted", "sorted(xs)").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ValueError);
    assert!(err.message.contains("position 0"));
}

#[test]
fn type_error_formats_message() {
    let err = type_error("len", "argument", "list", "int", "len(x)");
    assert_eq!(
        err.message,
        "len expected argument to be list, got int (usage: len(x))"
    );
}
