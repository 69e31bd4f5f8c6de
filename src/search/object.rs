use crate::{
    bridge::{Borrowed, Owned, Runtime, ToObject},
    runtime::{ObjectKind, operators::CompareOp},
    search::{SearchOutcome, SearchStep, guaranteed, typecheck::gate},
};

const MIDPOINT: &str = "(a + b) // 2";
const SUCCESSOR: &str = "a + 1";

/// Searches for `target` keeping every index a runtime object.
///
/// The answer is the shared `True` or `False`; `None` means the arguments
/// were rejected and a diagnostic line was written.
pub fn binary_search_object<'rt>(
    rt: &'rt Runtime,
    list: Option<Borrowed<'_>>,
    target: Option<Borrowed<'_>>,
) -> Option<Borrowed<'rt>> {
    match binary_search_object_traced(rt, list, target, &mut |_| {}) {
        SearchOutcome::Found { .. } => Some(rt.true_value()),
        SearchOutcome::NotFound => Some(rt.false_value()),
        SearchOutcome::Rejected(_) => None,
    }
}

pub fn binary_search_object_traced(
    rt: &Runtime,
    list: Option<Borrowed<'_>>,
    target: Option<Borrowed<'_>>,
    on_step: &mut dyn FnMut(SearchStep),
) -> SearchOutcome {
    let args = match gate(rt, list, target) {
        Ok(args) => args,
        Err(err) => return SearchOutcome::Rejected(err),
    };

    let mut low = guaranteed(0_i64.to_object(rt), "allocating the low bound");
    let mut high = guaranteed(args.len.to_object(rt), "allocating the high bound");

    loop {
        on_step(SearchStep::CheckingBounds {
            low: index_of(&low),
            high: index_of(&high),
        });
        if !holds(low.as_borrowed(), high.as_borrowed(), CompareOp::Lt) {
            break;
        }

        let mid = guaranteed(
            rt.evaluate_expecting(
                MIDPOINT,
                &[("a", low.as_borrowed()), ("b", high.as_borrowed())],
                ObjectKind::Int,
            ),
            "the midpoint is an int",
        );
        let position = index_of(&mid);
        on_step(SearchStep::ComputingMidpoint { mid: position });

        let item = guaranteed(args.list.get_item(position), "the midpoint is inside the list");
        on_step(SearchStep::Comparing { mid: position });
        let less = holds(item, args.target, CompareOp::Lt);
        let greater = holds(item, args.target, CompareOp::Gt);

        if less {
            low = guaranteed(
                rt.evaluate_expecting(SUCCESSOR, &[("a", mid.as_borrowed())], ObjectKind::Int),
                "the successor of the midpoint is an int",
            );
            on_step(SearchStep::AdvancingLow {
                low: index_of(&low),
            });
        } else if greater {
            high = mid;
            on_step(SearchStep::AdvancingHigh {
                high: index_of(&high),
            });
        } else {
            on_step(SearchStep::Found { index: position });
            return SearchOutcome::Found { index: position };
        }
    }
    on_step(SearchStep::NotFound);
    SearchOutcome::NotFound
}

/// Runs a rich comparison and reads the shared boolean it returns.
fn holds(a: Borrowed<'_>, b: Borrowed<'_>, op: CompareOp) -> bool {
    let result = guaranteed(a.rich_compare(b, op), "ints are comparable");
    assert!(
        result.is_bool(),
        "binary search invariant broken (comparison yields a bool): got {}",
        result.kind()
    );
    result.is_true()
}

fn index_of(index: &Owned<'_>) -> usize {
    let value: i64 = guaranteed(index.extract(), "indices are ints");
    usize::try_from(value)
        .unwrap_or_else(|_| panic!("binary search invariant broken (indices are non-negative): {}", value))
}
