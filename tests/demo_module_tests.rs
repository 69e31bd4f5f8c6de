use refbridge::{
    BridgeConfig, BridgeError, Runtime, ToObject,
    bridge::SharedBuffer,
    demo::{DEMO_MODULE, run_demo},
    runtime::{ErrorKind, ObjectKind},
};

const DEMOS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos");

fn demo_runtime() -> (Runtime, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let config = BridgeConfig::default()
        .without_working_dir()
        .with_module_dir(DEMOS_DIR);
    let rt = Runtime::initialize_with_sink(config, Box::new(buffer.clone())).unwrap();
    (rt, buffer)
}

#[test]
fn demo_transcript() {
    let (rt, buffer) = demo_runtime();
    run_demo(&rt).unwrap();

    insta::assert_snapshot!(buffer.contents().trim_end(), @r"
    give_five(): 5
    give_two(): 2
    list_a: [5, 3, 9, 1, 7]
    sorted list_a: [1, 3, 5, 7, 9]
    seven cubed: 343
    257 in binary: 0b100000001
    take_five(five): None
    take_five(two) raised AssertionError: take_five expects 5
    ");

    let report = rt.teardown();
    assert!(report.is_clean(), "leaked: {:?}", report.leaked);
}

#[test]
fn contract_functions_return_the_documented_kinds() {
    let (rt, _) = demo_runtime();
    let lib = rt.import_module(DEMO_MODULE).unwrap();

    let five = lib.getattr("give_five").unwrap().call0().unwrap();
    assert_eq!(five.extract::<i64>().unwrap(), 5);
    assert_eq!(
        lib.getattr("give_two").unwrap().call0().unwrap().extract::<i64>().unwrap(),
        2
    );

    let list_a = lib.getattr("give_list_a").unwrap().call0().unwrap();
    assert_eq!(list_a.kind(), ObjectKind::List);
    let sorted = lib
        .getattr("get_sorted_list")
        .unwrap()
        .call1(list_a.as_borrowed())
        .unwrap();
    assert_eq!(sorted.extract::<Vec<i64>>().unwrap(), vec![1, 3, 5, 7, 9]);
    assert_eq!(list_a.extract::<Vec<i64>>().unwrap(), vec![5, 3, 9, 1, 7]);

    let n = 257_i64.to_object(&rt).unwrap();
    let binary = lib.getattr("get_binary").unwrap().call1(n.as_borrowed()).unwrap();
    assert_eq!(binary.extract::<String>().unwrap(), "0b100000001");

    let accepted = lib.getattr("take_five").unwrap().call1(five.as_borrowed()).unwrap();
    assert!(accepted.is_none());
}

#[test]
fn take_five_rejects_other_values() {
    let (rt, _) = demo_runtime();
    let lib = rt.import_module(DEMO_MODULE).unwrap();
    let two = 2_i64.to_object(&rt).unwrap();

    let err = lib.getattr("take_five").unwrap().call1(two.as_borrowed()).unwrap_err();
    match err {
        BridgeError::Evaluation(raised) => {
            assert_eq!(raised.kind, ErrorKind::AssertionError);
            assert_eq!(raised.message, "take_five expects 5");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!rt.error_occurred());
}

#[test]
fn missing_attribute_is_an_attribute_lookup_failure() {
    let (rt, _) = demo_runtime();
    let lib = rt.import_module(DEMO_MODULE).unwrap();

    let err = lib.getattr("give_six").unwrap_err();
    match err {
        BridgeError::AttributeLookup(raised) => {
            assert_eq!(raised.message, "module 'lib' has no attribute 'give_six'");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn repeated_import_returns_the_cached_module() {
    let (rt, _) = demo_runtime();
    let first = rt.import_module(DEMO_MODULE).unwrap();
    let second = rt.import_module(DEMO_MODULE).unwrap();

    assert!(first.as_borrowed().is(second.as_borrowed()));
    assert_eq!(rt.loaded_modules(), vec![DEMO_MODULE.to_string()]);
}
