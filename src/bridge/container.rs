use std::mem;

use crate::{
    bridge::{
        handle::{Borrowed, Owned},
        runtime::Runtime,
    },
    error::BridgeError,
    runtime::RaisedError,
};

impl Runtime {
    pub fn new_int(&self, value: i64) -> Result<Owned<'_>, BridgeError> {
        let result = self.with_interp(|interp| interp.new_int(value));
        self.adopt(result, BridgeError::Allocation)
    }

    pub fn new_str(&self, value: &str) -> Result<Owned<'_>, BridgeError> {
        let result = self.with_interp(|interp| interp.new_str(value));
        self.adopt(result, BridgeError::Allocation)
    }

    /// A list of `len` unset slots, to be filled with [`Owned::set_item`].
    pub fn new_list(&self, len: usize) -> Result<Owned<'_>, BridgeError> {
        let result = self.with_interp(|interp| interp.new_list(len));
        self.adopt(result, BridgeError::Allocation)
    }

    pub fn new_dict(&self) -> Result<Owned<'_>, BridgeError> {
        let result = self.with_interp(|interp| interp.new_dict());
        self.adopt(result, BridgeError::Allocation)
    }

    /// Builds a list out of owned items, moving each into its slot.
    pub fn list_from<'rt>(&'rt self, items: Vec<Owned<'rt>>) -> Result<Owned<'rt>, BridgeError> {
        let mut list = self.new_list(items.len())?;
        for (index, item) in items.into_iter().enumerate() {
            list.set_item(index, item)?;
        }
        Ok(list)
    }
}

impl<'a> Borrowed<'a> {
    /// Length of a list, dict or string.
    pub fn size(self) -> Result<usize, BridgeError> {
        let rt = self.runtime();
        rt.with_interp(|interp| interp.size(self.id()))
            .ok_or_else(|| rt.fetch_error(BridgeError::Index))
    }

    /// Borrowed item at `index`; an unset slot is an error.
    pub fn get_item(self, index: usize) -> Result<Borrowed<'a>, BridgeError> {
        self.get_slot(index)?.ok_or_else(|| {
            BridgeError::Index(RaisedError::index_error(format!(
                "list slot {} is unset",
                index
            )))
        })
    }

    /// Borrowed item at `index`, or `None` for an unset slot.
    pub fn get_slot(self, index: usize) -> Result<Option<Borrowed<'a>>, BridgeError> {
        let rt = self.runtime();
        rt.with_interp(|interp| {
            let item = interp.list_get_item(self.id(), index);
            match item {
                Some(id) => Ok(Some(id)),
                None if interp.error_occurred() => Err(()),
                None => Ok(None),
            }
        })
        .map(|item| item.map(|id| Borrowed::new(rt, id)))
        .map_err(|()| rt.fetch_error(BridgeError::Index))
    }

    /// Borrowed value bound to `key`, or `None` when it is missing.
    pub fn dict_get_item(self, key: &str) -> Result<Option<Borrowed<'a>>, BridgeError> {
        let rt = self.runtime();
        rt.with_interp(|interp| {
            let item = interp.dict_get_item(self.id(), key);
            match item {
                Some(id) => Ok(Some(id)),
                None if interp.error_occurred() => Err(()),
                None => Ok(None),
            }
        })
        .map(|item| item.map(|id| Borrowed::new(rt, id)))
        .map_err(|()| rt.fetch_error(BridgeError::Index))
    }
}

impl<'rt> Owned<'rt> {
    /// Stores `value` at `index`. The value moves into the list even when
    /// the store fails.
    pub fn set_item(&mut self, index: usize, value: Owned<'rt>) -> Result<(), BridgeError> {
        let rt = self.runtime();
        let list = self.id();
        let item = value.id();
        // The list takes over this reference, or releases it on failure.
        mem::forget(value);
        let stored = rt.with_interp(|interp| interp.list_set_item(list, index, item));
        stored.ok_or_else(|| rt.fetch_error(BridgeError::Index))
    }

    /// Binds `key` in a dict. The dict takes its own reference to `value`.
    pub fn dict_set_item(&mut self, key: &str, value: Borrowed<'_>) -> Result<(), BridgeError> {
        let rt = self.runtime();
        let dict = self.id();
        rt.with_interp(|interp| interp.dict_set_item(dict, key, value.id()))
            .ok_or_else(|| rt.fetch_error(BridgeError::Index))
    }

    pub fn size(&self) -> Result<usize, BridgeError> {
        self.as_borrowed().size()
    }

    pub fn get_item(&self, index: usize) -> Result<Borrowed<'_>, BridgeError> {
        self.as_borrowed().get_item(index)
    }

    pub fn get_slot(&self, index: usize) -> Result<Option<Borrowed<'_>>, BridgeError> {
        self.as_borrowed().get_slot(index)
    }

    pub fn dict_get_item(&self, key: &str) -> Result<Option<Borrowed<'_>>, BridgeError> {
        self.as_borrowed().dict_get_item(key)
    }
}
