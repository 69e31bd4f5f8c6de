use thiserror::Error;
use tracing::warn;

use crate::bridge::{Borrowed, Runtime};

/// The first search precondition a pair of arguments violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchArgError {
    #[error("the list argument is null")]
    NullList,
    #[error("the list argument is not a list")]
    ListNotSequence,
    #[error("the target argument is null")]
    NullTarget,
    #[error("the target argument is not an exact integer")]
    TargetNotInt,
    #[error("the item at position {0} in the list is null")]
    NullElement(usize),
    #[error("the item at position {0} in the list is not an exact integer")]
    ElementNotInt(usize),
}

/// Arguments that passed the gate.
#[derive(Debug, Clone, Copy)]
pub struct SearchArgs<'a> {
    pub list: Borrowed<'a>,
    pub target: Borrowed<'a>,
    pub len: usize,
}

/// Checks, in order: the list is present and a list, the target is present
/// and an exact int, and every item is set and an exact int.
pub fn check_search_args<'a>(
    list: Option<Borrowed<'a>>,
    target: Option<Borrowed<'a>>,
) -> Result<SearchArgs<'a>, SearchArgError> {
    let list = list.ok_or(SearchArgError::NullList)?;
    if !list.is_list() {
        return Err(SearchArgError::ListNotSequence);
    }
    let target = target.ok_or(SearchArgError::NullTarget)?;
    if !target.is_int_exact() {
        return Err(SearchArgError::TargetNotInt);
    }

    let len = list.size().map_err(|_| SearchArgError::ListNotSequence)?;
    for position in 0..len {
        let item = list
            .get_slot(position)
            .ok()
            .flatten()
            .ok_or(SearchArgError::NullElement(position))?;
        if !item.is_int_exact() {
            return Err(SearchArgError::ElementNotInt(position));
        }
    }

    Ok(SearchArgs { list, target, len })
}

/// Runs the gate, reporting a rejection on the diagnostic sink.
pub(crate) fn gate<'a>(
    rt: &Runtime,
    list: Option<Borrowed<'a>>,
    target: Option<Borrowed<'a>>,
) -> Result<SearchArgs<'a>, SearchArgError> {
    check_search_args(list, target).inspect_err(|err| {
        warn!(%err, "binary search arguments rejected");
        rt.diagnostic(&err.to_string());
    })
}

/// Returns whether a search may run on these arguments. On `false` one
/// line naming the problem has been written to the diagnostic sink.
pub fn typecheck_for_binary_search(
    rt: &Runtime,
    list: Option<Borrowed<'_>>,
    target: Option<Borrowed<'_>>,
) -> bool {
    gate(rt, list, target).is_ok()
}
