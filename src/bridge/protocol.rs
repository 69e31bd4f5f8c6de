use crate::{
    bridge::handle::{Borrowed, Owned},
    error::BridgeError,
    runtime::{ObjectId, operators::CompareOp},
};

impl<'a> Borrowed<'a> {
    pub fn getattr(self, name: &str) -> Result<Owned<'a>, BridgeError> {
        let rt = self.runtime();
        let result = rt.with_interp(|interp| interp.getattr(self.id(), name));
        rt.adopt(result, BridgeError::AttributeLookup)
    }

    /// Calls this object with borrowed arguments.
    pub fn call(self, args: &[Borrowed<'_>]) -> Result<Owned<'a>, BridgeError> {
        let rt = self.runtime();
        let args: Vec<ObjectId> = args.iter().map(|arg| arg.id()).collect();
        let result = rt.with_interp(|interp| interp.call(self.id(), &args));
        rt.adopt(result, BridgeError::Evaluation)
    }

    pub fn call0(self) -> Result<Owned<'a>, BridgeError> {
        self.call(&[])
    }

    pub fn call1(self, arg: Borrowed<'_>) -> Result<Owned<'a>, BridgeError> {
        self.call(&[arg])
    }

    /// Compares two objects. The result is a new reference to the shared
    /// `True` or `False`.
    pub fn rich_compare(self, other: Borrowed<'_>, op: CompareOp) -> Result<Owned<'a>, BridgeError> {
        let rt = self.runtime();
        let result = rt.with_interp(|interp| interp.rich_compare(self.id(), other.id(), op));
        rt.adopt(result, BridgeError::Evaluation)
    }

    /// Truthiness: `0`, `False`, `None` and empty containers are false.
    pub fn is_true(self) -> bool {
        self.runtime().with_interp(|interp| interp.is_true(self.id()))
    }
}

impl<'rt> Owned<'rt> {
    pub fn getattr(&self, name: &str) -> Result<Owned<'rt>, BridgeError> {
        self.detached().getattr(name)
    }

    pub fn call(&self, args: &[Borrowed<'_>]) -> Result<Owned<'rt>, BridgeError> {
        self.detached().call(args)
    }

    pub fn call0(&self) -> Result<Owned<'rt>, BridgeError> {
        self.detached().call0()
    }

    pub fn call1(&self, arg: Borrowed<'_>) -> Result<Owned<'rt>, BridgeError> {
        self.detached().call1(arg)
    }

    pub fn rich_compare(&self, other: Borrowed<'_>, op: CompareOp) -> Result<Owned<'rt>, BridgeError> {
        self.detached().rich_compare(other, op)
    }

    pub fn is_true(&self) -> bool {
        self.as_borrowed().is_true()
    }
}
