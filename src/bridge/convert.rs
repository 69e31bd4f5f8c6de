use crate::{
    bridge::{
        handle::{Borrowed, Owned},
        runtime::Runtime,
    },
    error::BridgeError,
    runtime::{ObjectKind, object::Object},
};

/// Native values that can be placed on the runtime heap.
pub trait ToObject {
    fn to_object<'rt>(&self, rt: &'rt Runtime) -> Result<Owned<'rt>, BridgeError>;
}

/// Native values that can be read back out of runtime objects.
pub trait FromObject: Sized {
    fn from_object(object: Borrowed<'_>) -> Result<Self, BridgeError>;
}

fn mismatch(expected: &'static str, object: Borrowed<'_>) -> BridgeError {
    BridgeError::Conversion {
        expected,
        found: object.kind().to_string(),
    }
}

impl ToObject for i64 {
    fn to_object<'rt>(&self, rt: &'rt Runtime) -> Result<Owned<'rt>, BridgeError> {
        rt.new_int(*self)
    }
}

impl ToObject for usize {
    fn to_object<'rt>(&self, rt: &'rt Runtime) -> Result<Owned<'rt>, BridgeError> {
        let value = i64::try_from(*self).map_err(|_| BridgeError::Conversion {
            expected: "int",
            found: format!("usize {}", self),
        })?;
        rt.new_int(value)
    }
}

impl ToObject for bool {
    fn to_object<'rt>(&self, rt: &'rt Runtime) -> Result<Owned<'rt>, BridgeError> {
        Ok(rt.bool_value(*self).upgrade())
    }
}

impl ToObject for str {
    fn to_object<'rt>(&self, rt: &'rt Runtime) -> Result<Owned<'rt>, BridgeError> {
        rt.new_str(self)
    }
}

impl ToObject for String {
    fn to_object<'rt>(&self, rt: &'rt Runtime) -> Result<Owned<'rt>, BridgeError> {
        rt.new_str(self)
    }
}

impl<T: ToObject> ToObject for [T] {
    fn to_object<'rt>(&self, rt: &'rt Runtime) -> Result<Owned<'rt>, BridgeError> {
        let mut list = rt.new_list(self.len())?;
        for (index, item) in self.iter().enumerate() {
            list.set_item(index, item.to_object(rt)?)?;
        }
        Ok(list)
    }
}

impl<T: ToObject> ToObject for Vec<T> {
    fn to_object<'rt>(&self, rt: &'rt Runtime) -> Result<Owned<'rt>, BridgeError> {
        self.as_slice().to_object(rt)
    }
}

impl<T: ToObject + ?Sized> ToObject for &T {
    fn to_object<'rt>(&self, rt: &'rt Runtime) -> Result<Owned<'rt>, BridgeError> {
        (**self).to_object(rt)
    }
}

impl FromObject for i64 {
    fn from_object(object: Borrowed<'_>) -> Result<Self, BridgeError> {
        let value = object.runtime().with_interp(|interp| match interp.get(object.id()) {
            Object::Int(value) => Some(*value),
            _ => None,
        });
        value.ok_or_else(|| mismatch("int", object))
    }
}

impl FromObject for bool {
    fn from_object(object: Borrowed<'_>) -> Result<Self, BridgeError> {
        let value = object.runtime().with_interp(|interp| match interp.get(object.id()) {
            Object::Bool(value) => Some(*value),
            _ => None,
        });
        value.ok_or_else(|| mismatch("bool", object))
    }
}

impl FromObject for String {
    fn from_object(object: Borrowed<'_>) -> Result<Self, BridgeError> {
        let value = object.runtime().with_interp(|interp| match interp.get(object.id()) {
            Object::Str(value) => Some(value.to_string()),
            _ => None,
        });
        value.ok_or_else(|| mismatch("str", object))
    }
}

impl<T: FromObject> FromObject for Vec<T> {
    fn from_object(object: Borrowed<'_>) -> Result<Self, BridgeError> {
        if object.kind() != ObjectKind::List {
            return Err(mismatch("list", object));
        }
        let len = object.size()?;
        let mut values = Vec::with_capacity(len);
        for index in 0..len {
            let item = object.get_slot(index)?.ok_or_else(|| BridgeError::Conversion {
                expected: "list item",
                found: format!("unset slot at position {}", index),
            })?;
            values.push(T::from_object(item)?);
        }
        Ok(values)
    }
}
