use std::io;

use crate::{
    bridge::{Borrowed, FromObject, Owned, RawObject, Runtime, ToObject},
    config::BridgeConfig,
    error::BridgeError,
    runtime::ObjectKind,
};

fn runtime() -> Runtime {
    Runtime::initialize_with_sink(BridgeConfig::default(), Box::new(io::sink())).unwrap()
}

#[test]
fn clone_and_drop_move_the_count_by_one() {
    let rt = runtime();
    let value = rt.new_int(7).unwrap();
    assert_eq!(value.refcount(), 1);

    let copy = value.clone();
    assert_eq!(value.refcount(), 2);
    drop(copy);
    assert_eq!(value.refcount(), 1);

    value.release();
    assert_eq!(rt.live_objects(), 0);
}

#[test]
fn raw_round_trip_keeps_the_reference() {
    let rt = runtime();
    let raw = rt.new_str("ferry").unwrap().into_raw();
    assert!(!raw.is_null());
    assert_eq!(rt.live_objects(), 1);

    let back = unsafe { Owned::from_raw(&rt, raw) }.unwrap();
    assert_eq!(back.refcount(), 1);
    assert_eq!(back.repr(), "'ferry'");
    drop(back);
    assert_eq!(rt.live_objects(), 0);

    assert!(unsafe { Owned::from_raw(&rt, RawObject::NULL) }.is_none());
    assert!(unsafe { Borrowed::from_raw(&rt, RawObject::NULL) }.is_none());
}

#[test]
fn upgrade_takes_a_new_reference() {
    let rt = runtime();
    let list = vec![4_i64, 5].to_object(&rt).unwrap();
    let item = list.get_item(1).unwrap();
    assert_eq!(item.refcount(), 1);

    let owned = rt.upgrade(item);
    assert_eq!(owned.refcount(), 2);
    drop(list);
    assert_eq!(owned.refcount(), 1);
    assert_eq!(owned.extract::<i64>().unwrap(), 5);
}

#[test]
fn shared_constants_are_identities() {
    let rt = runtime();
    assert!(rt.none().is_none());
    assert!(rt.true_value().is_true_singleton());
    assert!(rt.false_value().is_false_singleton());
    assert!(rt.bool_value(true).is(rt.true_value()));
    assert!(!rt.true_value().is(rt.false_value()));

    let one = rt.new_int(1).unwrap();
    assert!(one.is_true());
    assert!(!one.as_borrowed().is_true_singleton());
    assert!(!one.is_bool());
}

#[test]
fn kind_predicates_are_exact() {
    let rt = runtime();
    let int = 3_i64.to_object(&rt).unwrap();
    let flag = true.to_object(&rt).unwrap();
    let dict = rt.new_dict().unwrap();

    assert!(int.is_int_exact());
    assert!(!flag.is_int_exact());
    assert!(flag.is_bool());
    assert!(dict.is_dict_exact());
    assert!(!dict.is_list());
    assert_eq!(flag.kind(), ObjectKind::Bool);
}

#[test]
fn conversions() {
    let rt = runtime();
    let words = ["a", "b"].to_object(&rt).unwrap();
    assert_eq!(words.repr(), "['a', 'b']");

    let numbers = vec![3_i64, 1, 2].to_object(&rt).unwrap();
    assert_eq!(Vec::<i64>::from_object(numbers.as_borrowed()).unwrap(), vec![3, 1, 2]);
    assert_eq!(
        String::from("stray").to_object(&rt).unwrap().extract::<String>().unwrap(),
        "stray"
    );
    assert!(!false.to_object(&rt).unwrap().extract::<bool>().unwrap());
}

#[test]
fn conversion_mismatch_names_both_sides() {
    let rt = runtime();
    let text = rt.new_str("5").unwrap();

    let err = text.extract::<i64>().unwrap_err();
    assert_eq!(
        err,
        BridgeError::Conversion {
            expected: "int",
            found: "str".to_string(),
        }
    );
    assert_eq!(err.to_string(), "cannot convert str to int");

    let holes = rt.new_list(2).unwrap();
    let err = holes.extract::<Vec<i64>>().unwrap_err();
    assert!(matches!(err, BridgeError::Conversion { expected: "list item", .. }));
}
