use crate::runtime::{error::RtResult, interpreter::Interpreter, object::ObjectId};

/// Writes the arguments, separated by spaces, as one line to the sink.
pub(super) fn builtin_print(interp: &mut Interpreter, args: &[ObjectId]) -> RtResult<ObjectId> {
    let line = args
        .iter()
        .map(|arg| interp.str_of(*arg))
        .collect::<Vec<_>>()
        .join(" ");
    interp.write_to_sink(&line)?;
    Ok(interp.none())
}
