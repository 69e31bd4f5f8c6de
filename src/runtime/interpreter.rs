use std::{
    collections::{BTreeMap, HashMap},
    io::Write,
    rc::Rc,
};

use tracing::debug;

use crate::runtime::{
    builtins::BUILTINS,
    error::{ErrorKind, RaisedError, RtResult},
    heap::Heap,
    leak_detector::LeakStats,
    object::{Object, ObjectId, ObjectKind},
    operators::{self, CompareOp},
    repr,
};

/// Name under which the builtin functions are importable.
pub const BUILTINS_MODULE: &str = "builtins";

/// Deepest chain of module function calls before `RecursionError`.
pub const MAX_CALL_DEPTH: usize = 200;

/// Deepest stack of expression evaluations, counted across calls.
pub const MAX_EVAL_DEPTH: usize = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterpreterOptions {
    pub heap_limit: Option<usize>,
    pub trace_refcounts: bool,
}

pub(crate) struct CachedModule {
    pub id: ObjectId,
    pub digest: [u8; 32],
}

/// Variable tables an expression is evaluated against.
///
/// Names resolve through `locals`, then `globals`, then the builtins.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope {
    pub globals: Option<ObjectId>,
    pub locals: Option<ObjectId>,
}

/// The embedded runtime: heap, error indicator, module cache and output sink.
///
/// Public operations follow the error-indicator convention: a failing call
/// returns `None` and leaves a [`RaisedError`] pending until it is taken or
/// cleared. Ids returned by `new_*`, `import`, `getattr`, `call`,
/// `rich_compare` and `evaluate` carry a new reference; `list_get_item` and
/// `dict_get_item` return borrowed ids.
pub struct Interpreter {
    pub(crate) heap: Heap,
    none: ObjectId,
    true_obj: ObjectId,
    false_obj: ObjectId,
    pub(crate) builtins: ObjectId,
    error: Option<RaisedError>,
    pub(crate) search_path: Vec<String>,
    pub(crate) modules: HashMap<String, CachedModule>,
    sink: Box<dyn Write>,
    pub(crate) depth: usize,
    pub(crate) nesting: usize,
}

impl Interpreter {
    pub fn new(options: InterpreterOptions, sink: Box<dyn Write>) -> Self {
        let mut heap = Heap::new();
        heap.set_trace_refcounts(options.trace_refcounts);

        let none = heap.alloc_immortal(Object::None);
        let true_obj = heap.alloc_immortal(Object::Bool(true));
        let false_obj = heap.alloc_immortal(Object::Bool(false));

        let mut namespace = BTreeMap::new();
        for builtin in BUILTINS {
            let id = heap.alloc_immortal(Object::Builtin(builtin));
            namespace.insert(builtin.name.to_string(), id);
        }
        let builtins = heap.alloc_immortal(Object::Module {
            name: Rc::from(BUILTINS_MODULE),
            namespace,
        });

        heap.set_limit(options.heap_limit);

        Self {
            heap,
            none,
            true_obj,
            false_obj,
            builtins,
            error: None,
            search_path: Vec::new(),
            modules: HashMap::new(),
            sink,
            depth: 0,
            nesting: 0,
        }
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn get(&self, id: ObjectId) -> &Object {
        self.heap.get(id)
    }

    pub fn kind(&self, id: ObjectId) -> ObjectKind {
        self.heap.kind(id)
    }

    pub fn incref(&mut self, id: ObjectId) {
        self.heap.incref(id);
    }

    pub fn decref(&mut self, id: ObjectId) {
        self.heap.decref(id);
    }

    pub fn refcount(&self, id: ObjectId) -> usize {
        self.heap.refcount(id)
    }

    pub fn stats(&self) -> LeakStats {
        self.heap.stats()
    }

    // Shared constants. These are immortal and never need a reference.

    pub fn none(&self) -> ObjectId {
        self.none
    }

    pub fn true_obj(&self) -> ObjectId {
        self.true_obj
    }

    pub fn false_obj(&self) -> ObjectId {
        self.false_obj
    }

    pub fn bool_obj(&self, value: bool) -> ObjectId {
        if value { self.true_obj } else { self.false_obj }
    }

    // Error indicator

    pub fn raise(&mut self, error: RaisedError) {
        self.error = Some(error);
    }

    pub fn error_occurred(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&RaisedError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<RaisedError> {
        self.error.take()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Moves a failure into the error indicator.
    pub(crate) fn indicate<T>(&mut self, result: RtResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                debug!(%error, "error raised");
                self.error = Some(error);
                None
            }
        }
    }

    // Allocation

    pub fn new_int(&mut self, value: i64) -> Option<ObjectId> {
        let result = self.heap.alloc(Object::Int(value));
        self.indicate(result)
    }

    pub fn new_str(&mut self, value: &str) -> Option<ObjectId> {
        let result = self.heap.alloc(Object::Str(Rc::from(value)));
        self.indicate(result)
    }

    /// A list of `len` unset slots.
    pub fn new_list(&mut self, len: usize) -> Option<ObjectId> {
        let result = self.heap.alloc(Object::List(vec![None; len]));
        self.indicate(result)
    }

    pub fn new_dict(&mut self) -> Option<ObjectId> {
        let result = self.heap.alloc(Object::Dict(BTreeMap::new()));
        self.indicate(result)
    }

    // Containers

    /// Stores `value` at `index`, taking over the caller's reference even
    /// when the store fails. The previous occupant is released.
    pub fn list_set_item(&mut self, list: ObjectId, index: usize, value: ObjectId) -> Option<()> {
        let result = self.store_list_slot(list, index, value);
        if result.is_err() {
            self.heap.decref(value);
        }
        self.indicate(result)
    }

    fn store_list_slot(&mut self, list: ObjectId, index: usize, value: ObjectId) -> RtResult<()> {
        let kind = self.heap.kind(list);
        let Object::List(items) = self.heap.get_mut(list) else {
            return Err(RaisedError::type_error(format!(
                "item assignment needs a list, not '{}'",
                kind
            )));
        };
        let len = items.len();
        let Some(slot) = items.get_mut(index) else {
            return Err(RaisedError::index_error(format!(
                "list assignment index {} out of range for length {}",
                index, len
            )));
        };
        let previous = slot.replace(value);
        if let Some(previous) = previous {
            self.heap.decref(previous);
        }
        Ok(())
    }

    /// Borrowed item at `index`. An unset slot yields `None` without raising.
    pub fn list_get_item(&mut self, list: ObjectId, index: usize) -> Option<ObjectId> {
        let result = match self.heap.get(list) {
            Object::List(items) => match items.get(index) {
                Some(slot) => Ok(*slot),
                None => Err(RaisedError::index_error(format!(
                    "list index {} out of range for length {}",
                    index,
                    items.len()
                ))),
            },
            other => Err(RaisedError::type_error(format!(
                "item access needs a list, not '{}'",
                other.kind()
            ))),
        };
        self.indicate(result).flatten()
    }

    pub fn size(&mut self, id: ObjectId) -> Option<usize> {
        let result = self.length_of(id);
        self.indicate(result)
    }

    pub(crate) fn length_of(&self, id: ObjectId) -> RtResult<usize> {
        match self.heap.get(id) {
            Object::List(items) => Ok(items.len()),
            Object::Dict(entries) => Ok(entries.len()),
            Object::Str(value) => Ok(value.chars().count()),
            other => Err(RaisedError::type_error(format!(
                "object of type '{}' has no len()",
                other.kind()
            ))),
        }
    }

    /// Binds `key` to `value` in a dict. The caller keeps its reference.
    pub fn dict_set_item(&mut self, dict: ObjectId, key: &str, value: ObjectId) -> Option<()> {
        let result = match self.heap.kind(dict) {
            ObjectKind::Dict => {
                self.heap.incref(value);
                self.store_name(dict, key, value)
            }
            kind => Err(RaisedError::type_error(format!(
                "key assignment needs a dict, not '{}'",
                kind
            ))),
        };
        self.indicate(result)
    }

    /// Borrowed value for `key`. A missing key yields `None` without raising.
    pub fn dict_get_item(&mut self, dict: ObjectId, key: &str) -> Option<ObjectId> {
        let result = match self.heap.get(dict) {
            Object::Dict(entries) => Ok(entries.get(key).copied()),
            other => Err(RaisedError::type_error(format!(
                "key lookup needs a dict, not '{}'",
                other.kind()
            ))),
        };
        self.indicate(result).flatten()
    }

    /// Inserts into a dict or module namespace, taking over `value`.
    pub(crate) fn store_name(&mut self, target: ObjectId, key: &str, value: ObjectId) -> RtResult<()> {
        let previous = self
            .heap
            .get_mut(target)
            .namespace_mut()
            .map(|namespace| namespace.insert(key.to_string(), value));
        match previous {
            Some(Some(previous)) => {
                self.heap.decref(previous);
                Ok(())
            }
            Some(None) => Ok(()),
            None => {
                self.heap.decref(value);
                Err(RaisedError::type_error(format!(
                    "'{}' object has no namespace",
                    self.heap.kind(target)
                )))
            }
        }
    }

    // Object protocol

    pub fn getattr(&mut self, target: ObjectId, name: &str) -> Option<ObjectId> {
        let result = self.get_attribute(target, name);
        self.indicate(result)
    }

    /// Calls `callee` with borrowed arguments.
    pub fn call(&mut self, callee: ObjectId, args: &[ObjectId]) -> Option<ObjectId> {
        let result = self.call_object(callee, args);
        self.indicate(result)
    }

    /// Compares two objects; the result is the shared `True` or `False`.
    pub fn rich_compare(&mut self, a: ObjectId, b: ObjectId, op: CompareOp) -> Option<ObjectId> {
        let result = operators::compare(&self.heap, op, a, b).map(|value| self.bool_obj(value));
        self.indicate(result)
    }

    pub fn is_true(&self, id: ObjectId) -> bool {
        operators::is_true(self.heap.get(id))
    }

    pub fn repr(&self, id: ObjectId) -> String {
        repr::repr(&self.heap, id)
    }

    pub fn str_of(&self, id: ObjectId) -> String {
        repr::str_of(&self.heap, id)
    }

    // Modules

    pub fn search_path(&self) -> &[String] {
        &self.search_path
    }

    pub fn extend_search_path(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        debug!(entry = %entry, "search path extended");
        self.search_path.push(entry);
    }

    pub fn import(&mut self, name: &str) -> Option<ObjectId> {
        let result = self.import_module(name);
        self.indicate(result)
    }

    /// Names of the modules currently cached, sorted.
    pub fn loaded_modules(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.keys().cloned().collect();
        names.sort();
        names
    }

    // Evaluation

    /// Evaluates `snippet` as one expression against two dicts.
    pub fn evaluate(&mut self, snippet: &str, globals: ObjectId, locals: ObjectId) -> Option<ObjectId> {
        let result = self.evaluate_snippet(snippet, globals, locals);
        self.indicate(result)
    }

    // Output

    /// Writes one line to the diagnostic sink.
    pub fn write_line(&mut self, line: &str) -> Option<()> {
        let result = self.write_to_sink(line);
        self.indicate(result)
    }

    pub(crate) fn write_to_sink(&mut self, line: &str) -> RtResult<()> {
        writeln!(self.sink, "{}", line)
            .and_then(|_| self.sink.flush())
            .map_err(|err| RaisedError::new(ErrorKind::IOError, err.to_string()))
    }

    /// Releases the module cache and returns every object still alive.
    pub fn shutdown(&mut self) -> Vec<ObjectId> {
        let cached: Vec<CachedModule> = self.modules.drain().map(|(_, module)| module).collect();
        for module in cached {
            self.heap.decref(module.id);
        }
        self.error = None;
        self.heap.live_ids()
    }
}
