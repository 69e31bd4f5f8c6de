use tracing::{debug, warn};

use crate::{
    bridge::{
        handle::{Borrowed, Owned},
        runtime::Runtime,
    },
    error::BridgeError,
    runtime::ObjectKind,
};

/// Printed in place of an object when asked to print a null handle.
pub const NULL_PLACEHOLDER: &str = "(((can't print a null object)))";

impl Runtime {
    /// Evaluates one expression with `bindings` as its globals and an empty
    /// locals table. Both tables are released before this returns.
    pub fn evaluate(
        &self,
        snippet: &str,
        bindings: &[(&str, Borrowed<'_>)],
    ) -> Result<Owned<'_>, BridgeError> {
        let mut globals = self.new_dict()?;
        for (name, value) in bindings {
            globals.dict_set_item(name, *value)?;
        }
        let locals = self.new_dict()?;

        let result =
            self.with_interp(|interp| interp.evaluate(snippet, globals.id(), locals.id()));
        self.adopt(result, BridgeError::Evaluation)
    }

    /// Like [`Runtime::evaluate`], failing unless the result has `expected`
    /// kind. A mismatched result is released.
    pub fn evaluate_expecting(
        &self,
        snippet: &str,
        bindings: &[(&str, Borrowed<'_>)],
        expected: ObjectKind,
    ) -> Result<Owned<'_>, BridgeError> {
        let value = self.evaluate(snippet, bindings)?;
        let found = value.kind();
        if found != expected {
            debug!(snippet, %expected, %found, "unexpected result type");
            return Err(BridgeError::TypeMismatch { expected, found });
        }
        Ok(value)
    }

    /// Prints an object through the runtime's `print`, or a placeholder line
    /// for a null handle.
    pub fn print_object(&self, object: Option<Borrowed<'_>>) -> Result<(), BridgeError> {
        match object {
            Some(object) => self.evaluate("print(x)", &[("x", object)])?.release(),
            None => self.diagnostic(NULL_PLACEHOLDER),
        }
        Ok(())
    }

    /// Prints `label` followed by the object on one line.
    pub fn print_labelled(&self, label: &str, object: Borrowed<'_>) -> Result<(), BridgeError> {
        let label = self.new_str(label)?;
        self.evaluate(
            "print(label, x)",
            &[("label", label.as_borrowed()), ("x", object)],
        )?
        .release();
        Ok(())
    }

    /// Writes one raw line to the diagnostic sink.
    pub fn diagnostic(&self, line: &str) {
        let failure = self.with_interp(|interp| match interp.write_line(line) {
            Some(()) => None,
            None => interp.take_error(),
        });
        if let Some(err) = failure {
            warn!(%err, "diagnostic sink failed");
        }
    }
}
