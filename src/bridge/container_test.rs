use std::io;

use crate::{
    bridge::{Runtime, ToObject},
    config::BridgeConfig,
    error::BridgeError,
    runtime::ErrorKind,
};

fn runtime() -> Runtime {
    Runtime::initialize_with_sink(BridgeConfig::default(), Box::new(io::sink())).unwrap()
}

#[test]
fn fresh_list_slots_are_unset() {
    let rt = runtime();
    let list = rt.new_list(3).unwrap();

    assert_eq!(list.size().unwrap(), 3);
    assert!(list.get_slot(0).unwrap().is_none());
    let err = list.get_item(0).unwrap_err();
    assert!(matches!(&err, BridgeError::Index(raised) if raised.message == "list slot 0 is unset"));
    assert!(!rt.error_occurred());
}

#[test]
fn set_item_moves_the_value_into_the_list() {
    let rt = runtime();
    let mut list = rt.new_list(2).unwrap();
    list.set_item(0, rt.new_int(10).unwrap()).unwrap();
    list.set_item(1, rt.new_int(20).unwrap()).unwrap();

    let first = list.get_item(0).unwrap();
    assert_eq!(first.refcount(), 1);
    assert_eq!(list.repr(), "[10, 20]");

    list.set_item(0, rt.new_int(11).unwrap()).unwrap();
    assert_eq!(list.repr(), "[11, 20]");
    assert_eq!(rt.live_objects(), 3);

    drop(list);
    assert_eq!(rt.live_objects(), 0);
}

#[test]
fn failed_store_still_consumes_the_value() {
    let rt = runtime();
    let mut list = rt.new_list(1).unwrap();

    let err = list.set_item(4, rt.new_int(99).unwrap()).unwrap_err();
    assert!(matches!(&err, BridgeError::Index(raised) if raised.kind == ErrorKind::IndexError));
    assert_eq!(rt.live_objects(), 1);

    let mut not_a_list = rt.new_int(0).unwrap();
    let err = not_a_list.set_item(0, rt.new_int(1).unwrap()).unwrap_err();
    assert!(matches!(&err, BridgeError::Index(raised) if raised.kind == ErrorKind::TypeError));
    assert_eq!(rt.live_objects(), 2);
}

#[test]
fn reading_past_the_end_is_an_index_failure() {
    let rt = runtime();
    let list = vec![1_i64].to_object(&rt).unwrap();
    let err = list.get_slot(1).unwrap_err();
    assert!(matches!(&err, BridgeError::Index(raised) if raised.kind == ErrorKind::IndexError));
    assert!(!rt.error_occurred());
}

#[test]
fn dict_items_are_borrowed_and_keep_their_own_count() {
    let rt = runtime();
    let mut dict = rt.new_dict().unwrap();
    let value = rt.new_str("flat").unwrap();

    dict.dict_set_item("boat", value.as_borrowed()).unwrap();
    assert_eq!(value.refcount(), 2);
    assert_eq!(dict.size().unwrap(), 1);

    let found = dict.dict_get_item("boat").unwrap().unwrap();
    assert!(found.is(value.as_borrowed()));
    assert!(dict.dict_get_item("ferry").unwrap().is_none());

    drop(dict);
    assert_eq!(value.refcount(), 1);
}

#[test]
fn size_needs_a_sized_object() {
    let rt = runtime();
    let number = rt.new_int(3).unwrap();
    let err = number.size().unwrap_err();
    assert!(matches!(&err, BridgeError::Index(raised) if raised.message == "object of type 'int' has no len()"));
}

#[test]
fn list_from_owned_items() {
    let rt = runtime();
    let items = vec![rt.new_int(1).unwrap(), rt.new_str("two").unwrap()];
    let list = rt.list_from(items).unwrap();
    assert_eq!(list.repr(), "[1, 'two']");
    drop(list);
    assert_eq!(rt.live_objects(), 0);
}
