use crate::{
    bridge::{Borrowed, Owned, Runtime, SharedBuffer, ToObject},
    config::BridgeConfig,
    search::{
        SearchArgError, SearchOutcome, SearchStep, binary_search_native,
        binary_search_native_traced, binary_search_object, binary_search_object_traced,
        check_search_args, typecheck_for_binary_search,
    },
};

fn runtime() -> (Runtime, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let rt = Runtime::initialize_with_sink(BridgeConfig::default(), Box::new(buffer.clone()))
        .unwrap();
    (rt, buffer)
}

fn ints<'rt>(rt: &'rt Runtime, values: &[i64]) -> Owned<'rt> {
    values.to_object(rt).unwrap()
}

fn rejection(list: Option<Borrowed<'_>>, target: Option<Borrowed<'_>>) -> SearchArgError {
    check_search_args(list, target).unwrap_err()
}

#[test]
fn gate_names_the_first_failing_condition() {
    crate::test_utils::init_test_logging();
    let (rt, _) = runtime();
    let list = ints(&rt, &[1, 2]);
    let dict = rt.new_dict().unwrap();
    let target = rt.new_int(2).unwrap();
    let text = rt.new_str("2").unwrap();
    let mixed = rt
        .list_from(vec![rt.new_int(23).unwrap(), rt.new_str("stray cat").unwrap()])
        .unwrap();
    let holes = rt.new_list(3).unwrap();

    assert_eq!(rejection(None, Some(target.as_borrowed())), SearchArgError::NullList);
    assert_eq!(
        rejection(Some(dict.as_borrowed()), Some(target.as_borrowed())),
        SearchArgError::ListNotSequence
    );
    assert_eq!(rejection(Some(list.as_borrowed()), None), SearchArgError::NullTarget);
    assert_eq!(
        rejection(Some(list.as_borrowed()), Some(text.as_borrowed())),
        SearchArgError::TargetNotInt
    );
    assert_eq!(
        rejection(Some(mixed.as_borrowed()), Some(target.as_borrowed())),
        SearchArgError::ElementNotInt(1)
    );
    assert_eq!(
        rejection(Some(holes.as_borrowed()), Some(target.as_borrowed())),
        SearchArgError::NullElement(0)
    );
    // A bool is not an exact int.
    assert_eq!(
        rejection(Some(list.as_borrowed()), Some(rt.true_value())),
        SearchArgError::TargetNotInt
    );

    let args = check_search_args(Some(list.as_borrowed()), Some(target.as_borrowed())).unwrap();
    assert_eq!(args.len, 2);
}

#[test]
fn rejected_arguments_write_one_diagnostic_line() {
    let (rt, buffer) = runtime();
    let target = rt.new_int(23).unwrap();
    let word = rt.new_str("stray cat").unwrap();
    let table = rt.new_dict().unwrap();
    let sorted = ints(&rt, &[5, 23]);
    let unset = rt.new_list(3).unwrap();
    let mixed = rt
        .list_from(vec![rt.new_int(23).unwrap(), rt.new_str("stray cat").unwrap()])
        .unwrap();

    let rejected = [
        (None, Some(target.as_borrowed())),
        (Some(table.as_borrowed()), Some(target.as_borrowed())),
        (Some(sorted.as_borrowed()), None),
        (Some(sorted.as_borrowed()), Some(word.as_borrowed())),
        (Some(unset.as_borrowed()), Some(target.as_borrowed())),
        (Some(mixed.as_borrowed()), Some(target.as_borrowed())),
    ];
    for (list, target) in rejected {
        assert!(!typecheck_for_binary_search(&rt, list, target));
    }

    insta::assert_snapshot!(buffer.contents().trim_end(), @r"
    the list argument is null
    the list argument is not a list
    the target argument is null
    the target argument is not an exact integer
    the item at position 0 in the list is null
    the item at position 1 in the list is not an exact integer
    ");
}

#[test]
fn rejected_arguments_never_reach_the_loop() {
    let (rt, buffer) = runtime();
    let holes = rt.new_list(3).unwrap();
    let target = rt.new_int(1).unwrap();
    let mut steps = Vec::new();

    let outcome = binary_search_object_traced(
        &rt,
        Some(holes.as_borrowed()),
        Some(target.as_borrowed()),
        &mut |step| steps.push(step),
    );

    assert_eq!(outcome, SearchOutcome::Rejected(SearchArgError::NullElement(0)));
    assert!(steps.is_empty());
    assert_eq!(buffer.contents(), "the item at position 0 in the list is null\n");
    assert!(binary_search_object(&rt, Some(holes.as_borrowed()), Some(target.as_borrowed())).is_none());
    assert!(!binary_search_native(&rt, Some(holes.as_borrowed()), Some(target.as_borrowed())));
}

#[test]
fn single_element_window_takes_one_midpoint() {
    let (rt, _) = runtime();
    let list = ints(&rt, &[7]);

    let expected = [
        (
            7,
            vec![
                SearchStep::CheckingBounds { low: 0, high: 1 },
                SearchStep::ComputingMidpoint { mid: 0 },
                SearchStep::Comparing { mid: 0 },
                SearchStep::Found { index: 0 },
            ],
        ),
        (
            3,
            vec![
                SearchStep::CheckingBounds { low: 0, high: 1 },
                SearchStep::ComputingMidpoint { mid: 0 },
                SearchStep::Comparing { mid: 0 },
                SearchStep::AdvancingHigh { high: 0 },
                SearchStep::CheckingBounds { low: 0, high: 0 },
                SearchStep::NotFound,
            ],
        ),
        (
            9,
            vec![
                SearchStep::CheckingBounds { low: 0, high: 1 },
                SearchStep::ComputingMidpoint { mid: 0 },
                SearchStep::Comparing { mid: 0 },
                SearchStep::AdvancingLow { low: 1 },
                SearchStep::CheckingBounds { low: 1, high: 1 },
                SearchStep::NotFound,
            ],
        ),
    ];

    for (value, steps) in expected {
        let target = rt.new_int(value).unwrap();
        let mut native_steps = Vec::new();
        let mut object_steps = Vec::new();
        binary_search_native_traced(
            &rt,
            Some(list.as_borrowed()),
            Some(target.as_borrowed()),
            &mut |step| native_steps.push(step),
        );
        binary_search_object_traced(
            &rt,
            Some(list.as_borrowed()),
            Some(target.as_borrowed()),
            &mut |step| object_steps.push(step),
        );
        assert_eq!(native_steps, steps, "native policy, target {}", value);
        assert_eq!(object_steps, steps, "object policy, target {}", value);
    }
}

#[test]
fn object_policy_answers_with_the_shared_booleans() {
    let (rt, _) = runtime();
    let list = ints(&rt, &[1, 3, 5]);
    let present = rt.new_int(5).unwrap();
    let absent = rt.new_int(4).unwrap();

    let yes = binary_search_object(&rt, Some(list.as_borrowed()), Some(present.as_borrowed()))
        .unwrap();
    let no = binary_search_object(&rt, Some(list.as_borrowed()), Some(absent.as_borrowed()))
        .unwrap();

    assert!(yes.is(rt.true_value()));
    assert!(no.is(rt.false_value()));
}

#[test]
fn policies_agree_and_release_everything() {
    let (rt, _) = runtime();
    let values = [-8, -3, 0, 2, 2, 5, 11, 40];
    let list = ints(&rt, &values);
    let before = rt.live_objects();

    for probe in -10..=42 {
        let target = rt.new_int(probe).unwrap();
        let native = binary_search_native(&rt, Some(list.as_borrowed()), Some(target.as_borrowed()));
        let object = binary_search_object(&rt, Some(list.as_borrowed()), Some(target.as_borrowed()))
            .map(|answer| answer.is_true_singleton());
        assert_eq!(object, Some(native), "target {}", probe);
        assert_eq!(native, values.contains(&probe), "target {}", probe);
    }

    assert_eq!(rt.live_objects(), before);
}
