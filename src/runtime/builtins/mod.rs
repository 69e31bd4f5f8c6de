use std::fmt;

use crate::runtime::{error::RtResult, interpreter::Interpreter, object::ObjectId};

mod assert_ops;
mod helpers;
mod io_ops;
mod list_ops;
mod numeric_ops;
mod type_check;

use assert_ops::builtin_ensure;
use io_ops::builtin_print;
use list_ops::{builtin_len, builtin_sorted};
use numeric_ops::builtin_bin;
use type_check::{builtin_is_int, builtin_type_of};

/// Builtins receive borrowed arguments and return a new reference.
pub type BuiltinFn = fn(&mut Interpreter, &[ObjectId]) -> RtResult<ObjectId>;

pub struct BuiltinFunction {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFunction({})", self.name)
    }
}

impl PartialEq for BuiltinFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Every builtin, exposed through the `builtins` module and name lookup.
pub static BUILTINS: &[BuiltinFunction] = &[
    BuiltinFunction {
        name: "print",
        func: builtin_print,
    },
    BuiltinFunction {
        name: "len",
        func: builtin_len,
    },
    BuiltinFunction {
        name: "sorted",
        func: builtin_sorted,
    },
    BuiltinFunction {
        name: "bin",
        func: builtin_bin,
    },
    BuiltinFunction {
        name: "ensure",
        func: builtin_ensure,
    },
    BuiltinFunction {
        name: "type_of",
        func: builtin_type_of,
    },
    BuiltinFunction {
        name: "is_int",
        func: builtin_is_int,
    },
];

#[cfg(test)]
mod helpers_test;
