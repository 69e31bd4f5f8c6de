//! Reference count accounting across whole runs: every object allocated is
//! freed, and every reference taken is released exactly once.

use refbridge::{
    BridgeConfig, Runtime, ToObject,
    bridge::SharedBuffer,
    demo::{run_demo, run_search_scenarios},
    runtime::leak_detector::LeakStats,
    search::{binary_search_native, binary_search_object},
};

const DEMOS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos");

fn runtime() -> Runtime {
    let config = BridgeConfig::default()
        .without_working_dir()
        .with_module_dir(DEMOS_DIR);
    Runtime::initialize_with_sink(config, Box::new(SharedBuffer::new())).unwrap()
}

fn assert_balanced(stats: LeakStats) {
    assert_eq!(stats.live, 0, "{:?}", stats);
    assert_eq!(stats.allocations, stats.frees, "{:?}", stats);
    assert_eq!(stats.decrefs, stats.allocations + stats.increfs, "{:?}", stats);
}

#[test]
fn full_demo_run_releases_everything() {
    let rt = runtime();
    run_demo(&rt).unwrap();
    run_search_scenarios(&rt).unwrap();

    let report = rt.teardown();
    assert!(report.is_clean(), "leaked: {:?}", report.leaked);
    assert_balanced(report.stats);
}

#[test]
fn object_policy_allocates_and_frees_its_indices() {
    let rt = runtime();
    let list = (0..64_i64).map(|i| i * 3).collect::<Vec<_>>().to_object(&rt).unwrap();
    let target = rt.new_int(93).unwrap();
    let before = rt.stats();

    let found = binary_search_object(&rt, Some(list.as_borrowed()), Some(target.as_borrowed()))
        .unwrap();
    assert!(found.is_true_singleton());

    let traffic = rt.stats().since(&before);
    assert!(traffic.allocations > 0);
    assert_eq!(traffic.allocations, traffic.frees);
    assert_eq!(traffic.decrefs, traffic.allocations + traffic.increfs);

    let before = rt.stats();
    assert!(binary_search_native(&rt, Some(list.as_borrowed()), Some(target.as_borrowed())));
    let traffic = rt.stats().since(&before);
    assert_eq!(traffic.allocations, 0);

    drop((list, target));
    assert_balanced(rt.teardown().stats);
}

#[test]
fn failing_paths_release_what_they_took() {
    let rt = runtime();
    let lib = rt.import_module("lib").unwrap();
    let two = rt.new_int(2).unwrap();

    for _ in 0..3 {
        assert!(lib.getattr("take_five").unwrap().call1(two.as_borrowed()).is_err());
        assert!(lib.getattr("missing").is_err());
        assert!(rt.evaluate("[1, 2][5]", &[]).is_err());
        assert!(rt.evaluate_expecting("'x'", &[], refbridge::runtime::ObjectKind::Int).is_err());
    }

    drop((lib, two));
    let report = rt.teardown();
    assert!(report.is_clean(), "leaked: {:?}", report.leaked);
    assert_balanced(report.stats);
}
