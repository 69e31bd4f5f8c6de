use std::{collections::BTreeMap, fmt, num::NonZeroU32, rc::Rc};

use crate::{runtime::builtins::BuiltinFunction, syntax::expression::Expression};

/// Deepest container nesting that rendering and comparison walk into.
pub const MAX_CONTAINER_DEPTH: usize = 500;

/// Identity of a live heap object.
///
/// Ids are heap slot indices starting at 1, so the raw value `0` is free to
/// act as the null object at the native boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(NonZeroU32);

impl ObjectId {
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub fn raw(self) -> u32 {
        self.0.get()
    }

    pub(crate) fn slot(self) -> usize {
        self.0.get() as usize
    }
}

/// Dynamic type tag of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Int,
    Bool,
    None,
    Str,
    List,
    Dict,
    Module,
    Function,
    Builtin,
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Int => "int",
            ObjectKind::Bool => "bool",
            ObjectKind::None => "NoneType",
            ObjectKind::Str => "str",
            ObjectKind::List => "list",
            ObjectKind::Dict => "dict",
            ObjectKind::Module => "module",
            ObjectKind::Function => "function",
            ObjectKind::Builtin => "builtin_function",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A function defined by a module file.
///
/// The owning module is referenced by name and resolved through the module
/// cache at call time, so a module and its functions never form a cycle.
#[derive(Debug)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Expression,
    pub module: Rc<str>,
}

#[derive(Debug)]
pub enum Object {
    Int(i64),
    Bool(bool),
    None,
    Str(Rc<str>),
    /// Fixed-length sequence; `None` marks a slot that was never assigned.
    List(Vec<Option<ObjectId>>),
    Dict(BTreeMap<String, ObjectId>),
    Module {
        name: Rc<str>,
        namespace: BTreeMap<String, ObjectId>,
    },
    Function(Rc<FunctionDef>),
    Builtin(&'static BuiltinFunction),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Int(_) => ObjectKind::Int,
            Object::Bool(_) => ObjectKind::Bool,
            Object::None => ObjectKind::None,
            Object::Str(_) => ObjectKind::Str,
            Object::List(_) => ObjectKind::List,
            Object::Dict(_) => ObjectKind::Dict,
            Object::Module { .. } => ObjectKind::Module,
            Object::Function(_) => ObjectKind::Function,
            Object::Builtin(_) => ObjectKind::Builtin,
        }
    }

    /// Pushes every reference this object owns onto `out`.
    pub(crate) fn push_children(self, out: &mut Vec<ObjectId>) {
        match self {
            Object::List(items) => out.extend(items.into_iter().flatten()),
            Object::Dict(entries) => out.extend(entries.into_values()),
            Object::Module { namespace, .. } => out.extend(namespace.into_values()),
            Object::Int(_)
            | Object::Bool(_)
            | Object::None
            | Object::Str(_)
            | Object::Function(_)
            | Object::Builtin(_) => {}
        }
    }

    /// Name-to-object table of a dict or module.
    pub(crate) fn namespace(&self) -> Option<&BTreeMap<String, ObjectId>> {
        match self {
            Object::Dict(entries) => Some(entries),
            Object::Module { namespace, .. } => Some(namespace),
            _ => None,
        }
    }

    pub(crate) fn namespace_mut(&mut self) -> Option<&mut BTreeMap<String, ObjectId>> {
        match self {
            Object::Dict(entries) => Some(entries),
            Object::Module { namespace, .. } => Some(namespace),
            _ => None,
        }
    }
}
