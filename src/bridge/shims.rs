//! `extern "C"` predicates and constant accessors for callers on the other
//! side of a C boundary. Objects cross as [`RawObject`] ids, `0` being null;
//! predicates answer `0` for a null object.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::ffi::c_int;

use crate::bridge::{
    handle::{Borrowed, RawObject},
    runtime::Runtime,
};

/// Dereferences the runtime pointer, aborting on null instead of panicking
/// so nothing unwinds across the boundary.
macro_rules! runtime_or_abort {
    ($ptr:expr, $name:literal) => {{
        if $ptr.is_null() {
            eprintln!("fatal: {}: null runtime pointer", $name);
            std::process::abort();
        }
        // SAFETY: non-null, and the caller guarantees it points to a live
        // runtime on this thread.
        unsafe { &*$ptr }
    }};
}

fn predicate(rt: &Runtime, object: RawObject, check: fn(Borrowed<'_>) -> bool) -> c_int {
    // SAFETY: the caller guarantees `object` is null or alive.
    match unsafe { Borrowed::from_raw(rt, object) } {
        Some(object) => c_int::from(check(object)),
        None => 0,
    }
}

/// # Safety
/// `rt` must point to a live [`Runtime`] on the calling thread and `object`
/// must be null or a live object of that runtime. The same holds for every
/// function in this module.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn refbridge_long_check_exact(rt: *const Runtime, object: RawObject) -> c_int {
    let rt = runtime_or_abort!(rt, "refbridge_long_check_exact");
    predicate(rt, object, |object| object.is_int_exact())
}

/// # Safety
/// See [`refbridge_long_check_exact`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn refbridge_dict_check_exact(rt: *const Runtime, object: RawObject) -> c_int {
    let rt = runtime_or_abort!(rt, "refbridge_dict_check_exact");
    predicate(rt, object, |object| object.is_dict_exact())
}

/// # Safety
/// See [`refbridge_long_check_exact`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn refbridge_bool_check(rt: *const Runtime, object: RawObject) -> c_int {
    let rt = runtime_or_abort!(rt, "refbridge_bool_check");
    predicate(rt, object, |object| object.is_bool())
}

/// # Safety
/// See [`refbridge_long_check_exact`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn refbridge_is_none(rt: *const Runtime, object: RawObject) -> c_int {
    let rt = runtime_or_abort!(rt, "refbridge_is_none");
    predicate(rt, object, |object| object.is_none())
}

/// # Safety
/// See [`refbridge_long_check_exact`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn refbridge_is_true(rt: *const Runtime, object: RawObject) -> c_int {
    let rt = runtime_or_abort!(rt, "refbridge_is_true");
    predicate(rt, object, |object| object.is_true_singleton())
}

/// # Safety
/// See [`refbridge_long_check_exact`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn refbridge_is_false(rt: *const Runtime, object: RawObject) -> c_int {
    let rt = runtime_or_abort!(rt, "refbridge_is_false");
    predicate(rt, object, |object| object.is_false_singleton())
}

/// Identity of two raw objects; two nulls are identical.
///
/// # Safety
/// See [`refbridge_long_check_exact`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn refbridge_is(rt: *const Runtime, a: RawObject, b: RawObject) -> c_int {
    let _ = runtime_or_abort!(rt, "refbridge_is");
    c_int::from(a == b)
}

/// Borrowed reference to the shared `None`.
///
/// # Safety
/// See [`refbridge_long_check_exact`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn refbridge_none_get_borrowed(rt: *const Runtime) -> RawObject {
    let rt = runtime_or_abort!(rt, "refbridge_none_get_borrowed");
    rt.none().as_raw()
}

/// # Safety
/// See [`refbridge_long_check_exact`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn refbridge_true_get_borrowed(rt: *const Runtime) -> RawObject {
    let rt = runtime_or_abort!(rt, "refbridge_true_get_borrowed");
    rt.true_value().as_raw()
}

/// # Safety
/// See [`refbridge_long_check_exact`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn refbridge_false_get_borrowed(rt: *const Runtime) -> RawObject {
    let rt = runtime_or_abort!(rt, "refbridge_false_get_borrowed");
    rt.false_value().as_raw()
}
