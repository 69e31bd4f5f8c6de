use std::io;

use crate::{
    bridge::{
        RawObject, Runtime,
        shims::{
            refbridge_bool_check, refbridge_dict_check_exact, refbridge_false_get_borrowed,
            refbridge_is, refbridge_is_false, refbridge_is_none, refbridge_is_true,
            refbridge_long_check_exact, refbridge_none_get_borrowed, refbridge_true_get_borrowed,
        },
    },
    config::BridgeConfig,
};

fn runtime() -> Runtime {
    Runtime::initialize_with_sink(BridgeConfig::default(), Box::new(io::sink())).unwrap()
}

#[test]
fn type_predicates() {
    let rt = runtime();
    let ptr: *const Runtime = &rt;
    let int = rt.new_int(9).unwrap();
    let dict = rt.new_dict().unwrap();
    let truth = rt.true_value().as_raw();

    unsafe {
        assert_eq!(refbridge_long_check_exact(ptr, int.as_borrowed().as_raw()), 1);
        assert_eq!(refbridge_long_check_exact(ptr, truth), 0);
        assert_eq!(refbridge_long_check_exact(ptr, RawObject::NULL), 0);
        assert_eq!(refbridge_dict_check_exact(ptr, dict.as_borrowed().as_raw()), 1);
        assert_eq!(refbridge_dict_check_exact(ptr, int.as_borrowed().as_raw()), 0);
        assert_eq!(refbridge_bool_check(ptr, truth), 1);
        assert_eq!(refbridge_bool_check(ptr, int.as_borrowed().as_raw()), 0);
    }
}

#[test]
fn constants_and_identity() {
    let rt = runtime();
    let ptr: *const Runtime = &rt;

    unsafe {
        let none = refbridge_none_get_borrowed(ptr);
        let yes = refbridge_true_get_borrowed(ptr);
        let no = refbridge_false_get_borrowed(ptr);

        assert_eq!(none, rt.none().as_raw());
        assert_eq!(refbridge_is_none(ptr, none), 1);
        assert_eq!(refbridge_is_none(ptr, RawObject::NULL), 0);
        assert_eq!(refbridge_is_true(ptr, yes), 1);
        assert_eq!(refbridge_is_true(ptr, no), 0);
        assert_eq!(refbridge_is_false(ptr, no), 1);
        assert_eq!(refbridge_is(ptr, yes, yes), 1);
        assert_eq!(refbridge_is(ptr, yes, no), 0);
        assert_eq!(refbridge_is(ptr, RawObject::NULL, RawObject::NULL), 1);
    }

    // A truthy int is not the `True` singleton.
    let one = rt.new_int(1).unwrap();
    assert_eq!(unsafe { refbridge_is_true(ptr, one.as_borrowed().as_raw()) }, 0);
}
