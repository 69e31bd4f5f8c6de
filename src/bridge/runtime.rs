use std::{
    cell::{Cell, RefCell},
    io::{self, Write},
};

use tracing::{debug, warn};

use crate::{
    bridge::handle::{Borrowed, Owned},
    config::BridgeConfig,
    error::BridgeError,
    runtime::{
        Interpreter, ObjectId, ObjectKind, RaisedError, leak_detector::LeakStats,
        error::ErrorKind,
    },
};

thread_local! {
    static RUNTIME_ACTIVE: Cell<bool> = const { Cell::new(false) };
}

/// An object still alive when the runtime was torn down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeakedObject {
    pub id: u32,
    pub kind: ObjectKind,
    pub refcount: usize,
    pub repr: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownReport {
    pub leaked: Vec<LeakedObject>,
    pub stats: LeakStats,
}

impl TeardownReport {
    pub fn is_clean(&self) -> bool {
        self.leaked.is_empty()
    }
}

/// An initialized embedded runtime, bound to the thread that created it.
///
/// At most one runtime exists per thread. Handles borrow the runtime, so
/// they cannot outlive [`Runtime::teardown`].
pub struct Runtime {
    interp: RefCell<Interpreter>,
    config: BridgeConfig,
}

impl Runtime {
    /// Starts a runtime that prints to standard output.
    pub fn initialize(config: BridgeConfig) -> Result<Self, BridgeError> {
        Self::initialize_with_sink(config, Box::new(io::stdout()))
    }

    pub fn initialize_with_sink(
        config: BridgeConfig,
        sink: Box<dyn Write>,
    ) -> Result<Self, BridgeError> {
        if RUNTIME_ACTIVE.with(|active| active.replace(true)) {
            return Err(BridgeError::AlreadyInitialized);
        }

        let mut interp = Interpreter::new(config.interpreter_options(), sink);
        for entry in config.effective_search_path() {
            interp.extend_search_path(entry);
        }
        debug!(
            search_path = ?interp.search_path(),
            heap_limit = ?config.heap_limit,
            "runtime initialized"
        );

        Ok(Self {
            interp: RefCell::new(interp),
            config,
        })
    }

    /// Releases the module cache and reports every object that is still
    /// alive afterwards.
    pub fn teardown(self) -> TeardownReport {
        let report = {
            let mut interp = self.interp.borrow_mut();
            let survivors = interp.shutdown();
            let leaked = survivors
                .into_iter()
                .map(|id| LeakedObject {
                    id: id.raw(),
                    kind: interp.kind(id),
                    refcount: interp.refcount(id),
                    repr: interp.repr(id),
                })
                .collect();
            TeardownReport {
                leaked,
                stats: interp.stats(),
            }
        };

        if report.is_clean() {
            debug!(stats = ?report.stats, "runtime torn down");
        } else {
            warn!(leaked = report.leaked.len(), "objects still alive at teardown");
        }
        report
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Runs `f` with exclusive access to the interpreter.
    ///
    /// Handles must not be dropped inside `f`: their `Drop` re-enters here.
    pub(crate) fn with_interp<R>(&self, f: impl FnOnce(&mut Interpreter) -> R) -> R {
        f(&mut self.interp.borrow_mut())
    }

    /// Wraps a new reference returned by a raw operation, or turns the
    /// pending error into a [`BridgeError`].
    pub(crate) fn adopt(
        &self,
        result: Option<ObjectId>,
        context: fn(RaisedError) -> BridgeError,
    ) -> Result<Owned<'_>, BridgeError> {
        match result {
            Some(id) => Ok(Owned::from_new(self, id)),
            None => Err(self.fetch_error(context)),
        }
    }

    /// Takes the pending error. Allocation failures always surface as
    /// [`BridgeError::Allocation`] whatever the calling operation was.
    pub(crate) fn fetch_error(&self, context: fn(RaisedError) -> BridgeError) -> BridgeError {
        let raised = self.with_interp(|interp| interp.take_error()).unwrap_or_else(|| {
            RaisedError::new(
                ErrorKind::SystemError,
                "operation failed without setting an error",
            )
        });
        match raised.kind {
            ErrorKind::MemoryError => BridgeError::Allocation(raised),
            _ => context(raised),
        }
    }

    pub fn error_occurred(&self) -> bool {
        self.with_interp(|interp| interp.error_occurred())
    }

    pub fn take_error(&self) -> Option<RaisedError> {
        self.with_interp(|interp| interp.take_error())
    }

    pub fn clear_error(&self) {
        self.with_interp(|interp| interp.clear_error());
    }

    pub fn search_path(&self) -> Vec<String> {
        self.with_interp(|interp| interp.search_path().to_vec())
    }

    pub fn extend_search_path(&self, entry: impl Into<String>) {
        let entry = entry.into();
        self.with_interp(|interp| interp.extend_search_path(entry));
    }

    /// Imports `name` from the search path, reusing the cached module when
    /// its source is unchanged.
    pub fn import_module(&self, name: &str) -> Result<Owned<'_>, BridgeError> {
        let result = self.with_interp(|interp| interp.import(name));
        self.adopt(result, BridgeError::Import)
    }

    pub fn loaded_modules(&self) -> Vec<String> {
        self.with_interp(|interp| interp.loaded_modules())
    }

    pub fn stats(&self) -> LeakStats {
        self.with_interp(|interp| interp.stats())
    }

    /// Number of counted objects currently alive.
    pub fn live_objects(&self) -> usize {
        self.with_interp(|interp| interp.heap().live_count())
    }

    pub fn none(&self) -> Borrowed<'_> {
        let id = self.with_interp(|interp| interp.none());
        Borrowed::new(self, id)
    }

    pub fn true_value(&self) -> Borrowed<'_> {
        self.bool_value(true)
    }

    pub fn false_value(&self) -> Borrowed<'_> {
        self.bool_value(false)
    }

    pub fn bool_value(&self, value: bool) -> Borrowed<'_> {
        let id = self.with_interp(|interp| interp.bool_obj(value));
        Borrowed::new(self, id)
    }

    /// Takes a new reference to a borrowed object.
    pub fn upgrade<'rt>(&'rt self, object: Borrowed<'_>) -> Owned<'rt> {
        self.with_interp(|interp| interp.incref(object.id()));
        Owned::from_new(self, object.id())
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        RUNTIME_ACTIVE.with(|active| active.set(false));
    }
}
