use crate::{
    runtime::{
        error::ErrorKind,
        heap::Heap,
        object::Object,
        operators::{
            CompareOp, Computed, arithmetic, compare, floor_divide, int_arithmetic, modulo, power,
            sort_ids,
        },
    },
    syntax::expression::InfixOperator,
};

#[test]
fn floor_division_rounds_toward_negative_infinity() {
    assert_eq!(floor_divide(7, 2).unwrap(), 3);
    assert_eq!(floor_divide(-7, 2).unwrap(), -4);
    assert_eq!(floor_divide(7, -2).unwrap(), -4);
    assert_eq!(floor_divide(-8, 2).unwrap(), -4);
}

#[test]
fn modulo_follows_divisor_sign() {
    assert_eq!(modulo(7, 3).unwrap(), 1);
    assert_eq!(modulo(-7, 3).unwrap(), 2);
    assert_eq!(modulo(7, -3).unwrap(), -2);
    assert_eq!(modulo(i64::MIN, -1).unwrap(), 0);
}

#[test]
fn division_by_zero_is_raised() {
    assert_eq!(
        floor_divide(1, 0).unwrap_err().kind,
        ErrorKind::ZeroDivisionError
    );
    assert_eq!(modulo(1, 0).unwrap_err().kind, ErrorKind::ZeroDivisionError);
}

#[test]
fn overflow_is_a_value_error() {
    assert_eq!(
        floor_divide(i64::MIN, -1).unwrap_err().kind,
        ErrorKind::ValueError
    );
    assert_eq!(
        int_arithmetic(InfixOperator::Add, i64::MAX, 1)
            .unwrap_err()
            .kind,
        ErrorKind::ValueError
    );
    assert_eq!(power(2, 64).unwrap_err().kind, ErrorKind::ValueError);
}

#[test]
fn power_rejects_negative_exponent() {
    assert_eq!(power(7, 3).unwrap(), 343);
    assert_eq!(power(2, -1).unwrap_err().kind, ErrorKind::ValueError);
}

#[test]
fn strings_and_lists_concatenate() {
    let mut heap = Heap::new();
    let a = heap.alloc(Object::Str("stray ".into())).unwrap();
    let b = heap.alloc(Object::Str("cat".into())).unwrap();
    assert_eq!(
        arithmetic(&heap, InfixOperator::Add, a, b).unwrap(),
        Computed::Str("stray cat".to_string())
    );

    let one = heap.alloc(Object::Int(1)).unwrap();
    let xs = heap.alloc(Object::List(vec![Some(one)])).unwrap();
    let ys = heap.alloc(Object::List(vec![None])).unwrap();
    assert_eq!(
        arithmetic(&heap, InfixOperator::Add, xs, ys).unwrap(),
        Computed::List(vec![Some(one), None])
    );

    let err = arithmetic(&heap, InfixOperator::Subtract, a, b).unwrap_err();
    assert_eq!(
        err.message,
        "unsupported operand type(s) for -: 'str' and 'str'"
    );
}

#[test]
fn mixed_kinds_only_compare_for_equality() {
    let mut heap = Heap::new();
    let n = heap.alloc(Object::Int(23)).unwrap();
    let s = heap.alloc(Object::Str("stray cat".into())).unwrap();

    assert!(!compare(&heap, CompareOp::Eq, n, s).unwrap());
    assert!(compare(&heap, CompareOp::Ne, n, s).unwrap());
    let err = compare(&heap, CompareOp::Lt, n, s).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeError);
    assert_eq!(
        err.message,
        "'<' not supported between instances of 'int' and 'str'"
    );
}

#[test]
fn lists_compare_lexicographically() {
    let mut heap = Heap::new();
    let one = heap.alloc(Object::Int(1)).unwrap();
    let two = heap.alloc(Object::Int(2)).unwrap();
    let short = heap.alloc(Object::List(vec![Some(one)])).unwrap();
    let long = heap.alloc(Object::List(vec![Some(one), Some(two)])).unwrap();

    assert!(compare(&heap, CompareOp::Lt, short, long).unwrap());
    assert!(compare(&heap, CompareOp::Ge, long, short).unwrap());
}

#[test]
fn sort_ids_orders_ints_and_rejects_mixed() {
    let mut heap = Heap::new();
    let mut ids: Vec<_> = [5, 3, 9]
        .into_iter()
        .map(|v| heap.alloc(Object::Int(v)).unwrap())
        .collect();
    sort_ids(&heap, &mut ids).unwrap();
    let values: Vec<i64> = ids
        .iter()
        .map(|id| match heap.get(*id) {
            Object::Int(v) => *v,
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(values, vec![3, 5, 9]);

    let s = heap.alloc(Object::Str("x".into())).unwrap();
    ids.push(s);
    assert_eq!(
        sort_ids(&heap, &mut ids).unwrap_err().kind,
        ErrorKind::TypeError
    );
}
