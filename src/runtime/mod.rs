//! The embedded runtime: a reference-counted object heap with an error
//! indicator, a module loader and a single-expression evaluator.
//!
//! # No-Cycle Invariant
//! Objects are reclaimed by reference counting alone, so the object graph
//! must stay acyclic:
//! - Expressions only build new values out of existing ones; nothing in the
//!   language stores a container into itself.
//! - Module functions name their module instead of holding a reference to it,
//!   so a module namespace never reaches back to the module.
//! - Native callers that insert a dict into itself create a leak the heap
//!   cannot recover.
//!
//! Any future mutating feature that can form back-edges needs cycle-aware
//! collection.

pub mod builtins;
pub mod error;
mod eval;
pub mod heap;
pub mod import;
pub mod interpreter;
pub mod leak_detector;
pub mod object;
pub mod operators;
pub mod repr;

pub use error::{ErrorKind, RaisedError, RtResult};
pub use interpreter::{Interpreter, InterpreterOptions};
pub use object::{ObjectId, ObjectKind};

#[cfg(test)]
mod heap_test;
#[cfg(test)]
mod operators_test;
