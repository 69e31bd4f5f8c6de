//! Binary search over a runtime list of ints, in two policies that agree on
//! every input.
//!
//! [`native`] converts the list to native integers once and searches in
//! Rust. [`object`] keeps every index as a runtime object and drives each
//! step through the runtime: comparisons, the midpoint expression and the
//! advance of the low bound.
//!
//! Both run the same argument gate first ([`typecheck::check_search_args`]).
//! Once it has passed, a failing runtime call inside the loop means the gate
//! and the runtime disagree; that is treated as fatal.

pub mod native;
pub mod object;
pub mod typecheck;

pub use native::{binary_search_native, binary_search_native_traced};
pub use object::{binary_search_object, binary_search_object_traced};
pub use typecheck::{SearchArgError, SearchArgs, check_search_args, typecheck_for_binary_search};

use crate::error::BridgeError;

/// One step of the search loop, reported to traced searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStep {
    CheckingBounds { low: usize, high: usize },
    ComputingMidpoint { mid: usize },
    Comparing { mid: usize },
    AdvancingLow { low: usize },
    AdvancingHigh { high: usize },
    Found { index: usize },
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found { index: usize },
    NotFound,
    Rejected(SearchArgError),
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
}

/// Unwraps a runtime result the gate has already guaranteed.
pub(crate) fn guaranteed<T>(result: Result<T, BridgeError>, precondition: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("binary search invariant broken ({}): {}", precondition, err),
    }
}

#[cfg(test)]
mod search_test;
