use std::{fmt, mem};

use crate::{
    bridge::{convert::FromObject, runtime::Runtime},
    error::BridgeError,
    runtime::{ObjectId, ObjectKind},
};

/// An object reference as it crosses the `extern "C"` boundary. `0` is null.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RawObject(pub u32);

impl RawObject {
    pub const NULL: RawObject = RawObject(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub(crate) fn id(self) -> Option<ObjectId> {
        ObjectId::from_raw(self.0)
    }
}

impl From<ObjectId> for RawObject {
    fn from(id: ObjectId) -> Self {
        RawObject(id.raw())
    }
}

/// A strong reference. Dropping it releases exactly one count.
pub struct Owned<'rt> {
    rt: &'rt Runtime,
    id: ObjectId,
}

/// A non-owning reference, valid while whoever owns the object keeps it.
#[derive(Clone, Copy)]
pub struct Borrowed<'a> {
    rt: &'a Runtime,
    id: ObjectId,
}

impl<'rt> Owned<'rt> {
    /// Adopts a reference the caller already owns.
    pub(crate) fn from_new(rt: &'rt Runtime, id: ObjectId) -> Self {
        Self { rt, id }
    }

    pub(crate) fn id(&self) -> ObjectId {
        self.id
    }

    pub fn runtime(&self) -> &'rt Runtime {
        self.rt
    }

    pub fn as_borrowed(&self) -> Borrowed<'_> {
        Borrowed::new(self.rt, self.id)
    }

    /// Borrowed view with the runtime's lifetime, for results that do not
    /// depend on this handle staying alive.
    pub(crate) fn detached(&self) -> Borrowed<'rt> {
        Borrowed::new(self.rt, self.id)
    }

    /// Gives up the reference without releasing it.
    pub fn into_raw(self) -> RawObject {
        let raw = RawObject::from(self.id);
        mem::forget(self);
        raw
    }

    /// Takes back a reference previously given up with [`Owned::into_raw`].
    ///
    /// # Safety
    /// `raw` must carry one reference owned by the caller on this runtime;
    /// that reference moves into the returned handle.
    pub unsafe fn from_raw(rt: &'rt Runtime, raw: RawObject) -> Option<Self> {
        raw.id().map(|id| Self::from_new(rt, id))
    }

    pub fn release(self) {
        drop(self);
    }

    pub fn kind(&self) -> ObjectKind {
        self.as_borrowed().kind()
    }

    pub fn is_int_exact(&self) -> bool {
        self.as_borrowed().is_int_exact()
    }

    pub fn is_list(&self) -> bool {
        self.as_borrowed().is_list()
    }

    pub fn is_dict_exact(&self) -> bool {
        self.as_borrowed().is_dict_exact()
    }

    pub fn is_bool(&self) -> bool {
        self.as_borrowed().is_bool()
    }

    pub fn is_none(&self) -> bool {
        self.as_borrowed().is_none()
    }

    pub fn refcount(&self) -> usize {
        self.as_borrowed().refcount()
    }

    pub fn repr(&self) -> String {
        self.as_borrowed().repr()
    }

    pub fn extract<T: FromObject>(&self) -> Result<T, BridgeError> {
        self.as_borrowed().extract()
    }
}

impl Clone for Owned<'_> {
    fn clone(&self) -> Self {
        self.rt.with_interp(|interp| interp.incref(self.id));
        Self {
            rt: self.rt,
            id: self.id,
        }
    }
}

impl Drop for Owned<'_> {
    fn drop(&mut self) {
        self.rt.with_interp(|interp| interp.decref(self.id));
    }
}

impl fmt::Debug for Owned<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Owned(#{})", self.id.raw())
    }
}

impl<'a> Borrowed<'a> {
    pub(crate) fn new(rt: &'a Runtime, id: ObjectId) -> Self {
        Self { rt, id }
    }

    /// Borrows the object behind `raw`; `None` for the null object.
    ///
    /// # Safety
    /// `raw` must name an object that stays alive for `'a`.
    pub unsafe fn from_raw(rt: &'a Runtime, raw: RawObject) -> Option<Self> {
        raw.id().map(|id| Self::new(rt, id))
    }

    pub(crate) fn id(self) -> ObjectId {
        self.id
    }

    pub fn runtime(self) -> &'a Runtime {
        self.rt
    }

    pub fn as_raw(self) -> RawObject {
        RawObject::from(self.id)
    }

    pub fn kind(self) -> ObjectKind {
        self.rt.with_interp(|interp| interp.kind(self.id))
    }

    pub fn is_int_exact(self) -> bool {
        self.kind() == ObjectKind::Int
    }

    pub fn is_list(self) -> bool {
        self.kind() == ObjectKind::List
    }

    pub fn is_dict_exact(self) -> bool {
        self.kind() == ObjectKind::Dict
    }

    pub fn is_bool(self) -> bool {
        self.kind() == ObjectKind::Bool
    }

    pub fn is_none(self) -> bool {
        self.id == self.rt.none().id
    }

    /// Identity with the shared `True`, not truthiness.
    pub fn is_true_singleton(self) -> bool {
        self.id == self.rt.true_value().id
    }

    pub fn is_false_singleton(self) -> bool {
        self.id == self.rt.false_value().id
    }

    /// Object identity.
    pub fn is(self, other: Borrowed<'_>) -> bool {
        self.id == other.id
    }

    pub fn refcount(self) -> usize {
        self.rt.with_interp(|interp| interp.refcount(self.id))
    }

    pub fn repr(self) -> String {
        self.rt.with_interp(|interp| interp.repr(self.id))
    }

    pub fn extract<T: FromObject>(self) -> Result<T, BridgeError> {
        T::from_object(self)
    }

    pub fn upgrade(self) -> Owned<'a> {
        self.rt.upgrade(self)
    }
}

impl fmt::Debug for Borrowed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Borrowed(#{})", self.id.raw())
    }
}
