use std::collections::BTreeMap;

use crate::runtime::{
    error::ErrorKind,
    heap::{Heap, IMMORTAL_REFCOUNT},
    object::Object,
};

#[test]
fn alloc_starts_at_one_and_never_uses_slot_zero() {
    let mut heap = Heap::new();
    let id = heap.alloc(Object::Int(7)).unwrap();
    assert_ne!(id.raw(), 0);
    assert_eq!(heap.refcount(id), 1);
    assert_eq!(heap.live_count(), 1);
}

#[test]
fn decref_to_zero_releases_children() {
    let mut heap = Heap::new();
    let a = heap.alloc(Object::Int(1)).unwrap();
    let b = heap.alloc(Object::Int(2)).unwrap();
    heap.incref(b);
    let list = heap.alloc(Object::List(vec![Some(a), Some(b), None])).unwrap();

    heap.decref(list);

    assert!(!heap.contains(list));
    assert!(!heap.contains(a));
    assert!(heap.contains(b));
    assert_eq!(heap.refcount(b), 1);
    assert_eq!(heap.live_count(), 1);
}

#[test]
fn nested_namespaces_are_released_iteratively() {
    let mut heap = Heap::new();
    let mut inner = heap.alloc(Object::Int(0)).unwrap();
    for depth in 0..10_000 {
        let mut entries = BTreeMap::new();
        entries.insert(format!("level{}", depth), inner);
        inner = heap.alloc(Object::Dict(entries)).unwrap();
    }

    heap.decref(inner);

    assert_eq!(heap.live_count(), 0);
}

#[test]
fn freed_slots_are_reused() {
    let mut heap = Heap::new();
    let first = heap.alloc(Object::Int(1)).unwrap();
    heap.decref(first);
    let second = heap.alloc(Object::Int(2)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn immortal_objects_ignore_counting() {
    let mut heap = Heap::new();
    let none = heap.alloc_immortal(Object::None);
    heap.incref(none);
    heap.decref(none);
    heap.decref(none);
    assert!(heap.contains(none));
    assert!(heap.is_immortal(none));
    assert_eq!(heap.refcount(none), IMMORTAL_REFCOUNT);
    assert_eq!(heap.live_count(), 0);
}

#[test]
fn limit_raises_memory_error() {
    let mut heap = Heap::new();
    heap.alloc_immortal(Object::None);
    heap.set_limit(Some(2));
    let a = heap.alloc(Object::Int(1)).unwrap();
    heap.alloc(Object::Int(2)).unwrap();

    let err = heap.alloc(Object::Int(3)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MemoryError);

    heap.decref(a);
    assert!(heap.alloc(Object::Int(3)).is_ok());
}

#[test]
fn stats_track_traffic() {
    let mut heap = Heap::new();
    let before = heap.stats();
    let id = heap.alloc(Object::Str("x".into())).unwrap();
    heap.incref(id);
    heap.decref(id);
    heap.decref(id);

    let delta = heap.stats().since(&before);
    assert_eq!(delta.allocations, 1);
    assert_eq!(delta.frees, 1);
    assert_eq!(delta.increfs, 1);
    assert_eq!(delta.decrefs, 2);
    assert_eq!(delta.live, 0);
    assert_eq!(delta.outstanding(), 0);
}

#[test]
fn live_ids_skip_immortals() {
    let mut heap = Heap::new();
    heap.alloc_immortal(Object::Bool(true));
    let id = heap.alloc(Object::Int(5)).unwrap();
    assert_eq!(heap.live_ids(), vec![id]);
}
