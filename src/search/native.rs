use crate::{
    bridge::{Borrowed, Runtime},
    search::{SearchOutcome, SearchStep, guaranteed, typecheck::gate},
};

/// Searches for `target` with native integers.
///
/// Returns `false` both when the target is absent and when the arguments
/// are rejected; the latter also writes a diagnostic line.
pub fn binary_search_native(
    rt: &Runtime,
    list: Option<Borrowed<'_>>,
    target: Option<Borrowed<'_>>,
) -> bool {
    binary_search_native_traced(rt, list, target, &mut |_| {}).found()
}

pub fn binary_search_native_traced(
    rt: &Runtime,
    list: Option<Borrowed<'_>>,
    target: Option<Borrowed<'_>>,
    on_step: &mut dyn FnMut(SearchStep),
) -> SearchOutcome {
    let args = match gate(rt, list, target) {
        Ok(args) => args,
        Err(err) => return SearchOutcome::Rejected(err),
    };
    let target: i64 = guaranteed(args.target.extract(), "target is an int");
    let values: Vec<i64> = guaranteed(args.list.extract(), "every item is an int");

    let (mut low, mut high) = (0, values.len());
    loop {
        on_step(SearchStep::CheckingBounds { low, high });
        if low >= high {
            break;
        }
        let mid = low + (high - low) / 2;
        on_step(SearchStep::ComputingMidpoint { mid });
        on_step(SearchStep::Comparing { mid });
        if values[mid] < target {
            low = mid + 1;
            on_step(SearchStep::AdvancingLow { low });
        } else if values[mid] > target {
            high = mid;
            on_step(SearchStep::AdvancingHigh { high });
        } else {
            on_step(SearchStep::Found { index: mid });
            return SearchOutcome::Found { index: mid };
        }
    }
    on_step(SearchStep::NotFound);
    SearchOutcome::NotFound
}
