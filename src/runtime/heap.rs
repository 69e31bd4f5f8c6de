use tracing::trace;

use crate::runtime::{
    error::{ErrorKind, RaisedError, RtResult},
    leak_detector::{LeakCounters, LeakStats},
    object::{Object, ObjectId, ObjectKind},
};

/// Reported count for objects that are never counted.
pub const IMMORTAL_REFCOUNT: usize = u32::MAX as usize;

struct HeapEntry {
    object: Object,
    refcount: usize,
    immortal: bool,
}

/// Slot heap of reference-counted objects.
///
/// Slot 0 is never handed out. Freed slots are reused through the free list
/// before the storage vector grows. Immortal objects ignore `incref` and
/// `decref` and do not count against the heap limit.
pub struct Heap {
    entries: Vec<Option<HeapEntry>>,
    free_list: Vec<u32>,
    limit: Option<usize>,
    live: usize,
    counters: LeakCounters,
    trace_refcounts: bool,
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

impl Heap {
    pub fn new() -> Self {
        Self {
            entries: vec![None],
            free_list: Vec::new(),
            limit: None,
            live: 0,
            counters: LeakCounters::default(),
            trace_refcounts: false,
        }
    }

    /// Caps the number of counted objects alive at once.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    pub fn set_trace_refcounts(&mut self, enabled: bool) {
        self.trace_refcounts = enabled;
    }

    /// Allocates `object` with a reference count of one.
    ///
    /// References held by `object` belong to the heap from here on. When the
    /// heap limit is reached they are released and `MemoryError` is raised.
    pub fn alloc(&mut self, object: Object) -> RtResult<ObjectId> {
        if let Some(limit) = self.limit.filter(|limit| self.live >= *limit) {
            let mut children = Vec::new();
            object.push_children(&mut children);
            for child in children {
                self.decref(child);
            }
            return Err(RaisedError::new(
                ErrorKind::MemoryError,
                format!("heap limit of {} live objects reached", limit),
            ));
        }

        let kind = object.kind();
        let id = self.insert(HeapEntry {
            object,
            refcount: 1,
            immortal: false,
        });
        self.live += 1;
        self.counters.record_alloc();
        if self.trace_refcounts {
            trace!(id = id.raw(), %kind, "alloc");
        }
        Ok(id)
    }

    /// Allocates an object that lives as long as the heap.
    pub fn alloc_immortal(&mut self, object: Object) -> ObjectId {
        self.insert(HeapEntry {
            object,
            refcount: IMMORTAL_REFCOUNT,
            immortal: true,
        })
    }

    fn insert(&mut self, entry: HeapEntry) -> ObjectId {
        let slot = match self.free_list.pop() {
            Some(slot) => {
                self.entries[slot as usize] = Some(entry);
                slot
            }
            None => {
                let slot = self.entries.len() as u32;
                self.entries.push(Some(entry));
                slot
            }
        };
        // Slot 0 stays empty and never enters the free list.
        ObjectId::from_raw(slot).unwrap_or_else(|| unreachable!("heap slot 0 is reserved"))
    }

    fn entry(&self, id: ObjectId) -> &HeapEntry {
        self.entries
            .get(id.slot())
            .and_then(Option::as_ref)
            .expect("Heap::get: invalid or freed object id")
    }

    fn entry_mut(&mut self, id: ObjectId) -> &mut HeapEntry {
        self.entries
            .get_mut(id.slot())
            .and_then(Option::as_mut)
            .expect("Heap::get: invalid or freed object id")
    }

    /// Returns the live object behind `id`.
    ///
    /// Panics if `id` points at a freed slot; holding an id without a
    /// reference is a contract violation, not a recoverable error.
    pub fn get(&self, id: ObjectId) -> &Object {
        &self.entry(id).object
    }

    pub fn get_mut(&mut self, id: ObjectId) -> &mut Object {
        &mut self.entry_mut(id).object
    }

    pub fn kind(&self, id: ObjectId) -> ObjectKind {
        self.get(id).kind()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        matches!(self.entries.get(id.slot()), Some(Some(_)))
    }

    pub fn is_immortal(&self, id: ObjectId) -> bool {
        self.entry(id).immortal
    }

    pub fn refcount(&self, id: ObjectId) -> usize {
        self.entry(id).refcount
    }

    pub fn incref(&mut self, id: ObjectId) {
        let trace_refcounts = self.trace_refcounts;
        let entry = self.entry_mut(id);
        if entry.immortal {
            return;
        }
        entry.refcount += 1;
        let refcount = entry.refcount;
        self.counters.record_incref();
        if trace_refcounts {
            trace!(id = id.raw(), refcount, "incref");
        }
    }

    /// Drops one reference. Objects reaching zero are freed and release
    /// their children; the walk is iterative so long chains cannot overflow
    /// the stack.
    pub fn decref(&mut self, id: ObjectId) {
        let mut pending = vec![id];

        while let Some(id) = pending.pop() {
            let trace_refcounts = self.trace_refcounts;
            let entry = self.entry_mut(id);
            if entry.immortal {
                continue;
            }
            entry.refcount -= 1;
            let refcount = entry.refcount;
            self.counters.record_decref();
            if trace_refcounts {
                trace!(id = id.raw(), refcount, "decref");
            }
            if refcount > 0 {
                continue;
            }

            let Some(freed) = self.entries[id.slot()].take() else {
                continue;
            };
            self.free_list.push(id.raw());
            self.live -= 1;
            self.counters.record_free();
            if trace_refcounts {
                trace!(id = id.raw(), kind = %freed.object.kind(), "free");
            }
            freed.object.push_children(&mut pending);
        }
    }

    /// Number of counted objects currently alive.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Ids of every counted object currently alive, in slot order.
    pub fn live_ids(&self) -> Vec<ObjectId> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| match entry {
                Some(entry) if !entry.immortal => ObjectId::from_raw(slot as u32),
                _ => None,
            })
            .collect()
    }

    pub fn stats(&self) -> LeakStats {
        self.counters.snapshot(self.live)
    }
}
