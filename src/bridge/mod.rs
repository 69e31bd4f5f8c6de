//! Safe handles over the embedded runtime.
//!
//! [`Owned`] releases its reference on drop and [`Borrowed`] never touches the
//! count, so the borrow checker enforces what the raw runtime leaves to
//! convention. Every handle borrows the [`Runtime`] it came from.

pub mod container;
pub mod convert;
pub mod evaluator;
pub mod handle;
pub mod protocol;
pub mod runtime;
pub mod shims;
pub mod sink;

pub use convert::{FromObject, ToObject};
pub use evaluator::NULL_PLACEHOLDER;
pub use handle::{Borrowed, Owned, RawObject};
pub use runtime::{LeakedObject, Runtime, TeardownReport};
pub use sink::SharedBuffer;

#[cfg(test)]
mod container_test;
#[cfg(test)]
mod handle_test;
#[cfg(test)]
mod shims_test;
