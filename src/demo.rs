//! The walkthrough behind `refbridge demo` and `refbridge search`.

use crate::{
    bridge::{Borrowed, Owned, Runtime, ToObject},
    error::BridgeError,
    search::{SearchOutcome, binary_search_native_traced, binary_search_object},
};

/// Module imported by [`run_demo`].
pub const DEMO_MODULE: &str = "lib";

/// Imports the demo module and calls each of its functions, printing the
/// results to the runtime's sink.
pub fn run_demo(rt: &Runtime) -> Result<(), BridgeError> {
    let lib = rt.import_module(DEMO_MODULE)?;
    let give_five = lib.getattr("give_five")?;
    let give_two = lib.getattr("give_two")?;
    let take_five = lib.getattr("take_five")?;
    let give_list_a = lib.getattr("give_list_a")?;
    let get_sorted_list = lib.getattr("get_sorted_list")?;
    let get_binary = lib.getattr("get_binary")?;
    let get_cubed = lib.getattr("get_cubed")?;

    let five = give_five.call0()?;
    let two = give_two.call0()?;
    rt.print_labelled("give_five():", five.as_borrowed())?;
    rt.print_labelled("give_two():", two.as_borrowed())?;

    let list_a = give_list_a.call0()?;
    rt.print_labelled("list_a:", list_a.as_borrowed())?;
    let sorted = get_sorted_list.call1(list_a.as_borrowed())?;
    rt.print_labelled("sorted list_a:", sorted.as_borrowed())?;

    let seven = 7_i64.to_object(rt)?;
    let cubed = get_cubed.call1(seven.as_borrowed())?;
    rt.print_labelled("seven cubed:", cubed.as_borrowed())?;

    let n = 257_i64.to_object(rt)?;
    let binary = get_binary.call1(n.as_borrowed())?;
    rt.print_labelled("257 in binary:", binary.as_borrowed())?;

    let accepted = take_five.call1(five.as_borrowed())?;
    rt.print_labelled("take_five(five):", accepted.as_borrowed())?;
    match take_five.call1(two.as_borrowed()) {
        Ok(unexpected) => rt.print_labelled("take_five(two):", unexpected.as_borrowed())?,
        Err(BridgeError::Evaluation(raised)) => {
            rt.diagnostic(&format!("take_five(two) raised {}", raised));
        }
        Err(err) => return Err(err),
    }
    Ok(())
}

/// Runs the fixed search scenarios through both policies.
pub fn run_search_scenarios(rt: &Runtime) -> Result<(), BridgeError> {
    let empty = rt.new_list(0)?;
    search_scenario(rt, "A", empty.as_borrowed(), &[1])?;

    let mixed = rt.list_from(vec![23_i64.to_object(rt)?, "stray cat".to_object(rt)?])?;
    search_scenario(rt, "B", mixed.as_borrowed(), &[23])?;

    let squares: Vec<i64> = (0..=16).map(|i| i * i).collect();
    let squares = squares.to_object(rt)?;
    search_scenario(rt, "C", squares.as_borrowed(), &[24, 25])?;

    let unset = rt.new_list(3)?;
    search_scenario(rt, "D", unset.as_borrowed(), &[1])?;
    Ok(())
}

fn search_scenario(
    rt: &Runtime,
    name: &str,
    list: Borrowed<'_>,
    targets: &[i64],
) -> Result<(), BridgeError> {
    for value in targets {
        let target: Owned<'_> = value.to_object(rt)?;
        rt.diagnostic(&format!("scenario {}: {} target {}", name, list.repr(), value));

        let native = binary_search_native_traced(
            rt,
            Some(list),
            Some(target.as_borrowed()),
            &mut |_| {},
        );
        let native = match native {
            SearchOutcome::Found { index } => format!("found at index {}", index),
            SearchOutcome::NotFound => "not found".to_string(),
            SearchOutcome::Rejected(_) => "rejected".to_string(),
        };
        rt.diagnostic(&format!("  native: {}", native));

        let object = binary_search_object(rt, Some(list), Some(target.as_borrowed()))
            .map_or_else(|| "rejected".to_string(), |answer| answer.repr());
        rt.diagnostic(&format!("  object: {}", object));
    }
    Ok(())
}
