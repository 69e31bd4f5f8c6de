/// Reference-count traffic observed by one heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeakStats {
    pub allocations: usize,
    pub frees: usize,
    pub increfs: usize,
    pub decrefs: usize,
    /// Counted objects alive at snapshot time.
    pub live: usize,
}

impl LeakStats {
    /// Traffic between `earlier` and this snapshot. `live` is kept as is.
    pub fn since(&self, earlier: &LeakStats) -> LeakStats {
        LeakStats {
            allocations: self.allocations - earlier.allocations,
            frees: self.frees - earlier.frees,
            increfs: self.increfs - earlier.increfs,
            decrefs: self.decrefs - earlier.decrefs,
            live: self.live,
        }
    }

    /// Allocations not yet matched by a free.
    pub fn outstanding(&self) -> isize {
        self.allocations as isize - self.frees as isize
    }
}

#[derive(Debug, Default)]
pub(crate) struct LeakCounters {
    allocations: usize,
    frees: usize,
    increfs: usize,
    decrefs: usize,
}

impl LeakCounters {
    pub fn record_alloc(&mut self) {
        self.allocations += 1;
    }

    pub fn record_free(&mut self) {
        self.frees += 1;
    }

    pub fn record_incref(&mut self) {
        self.increfs += 1;
    }

    pub fn record_decref(&mut self) {
        self.decrefs += 1;
    }

    pub fn snapshot(&self, live: usize) -> LeakStats {
        LeakStats {
            allocations: self.allocations,
            frees: self.frees,
            increfs: self.increfs,
            decrefs: self.decrefs,
            live,
        }
    }
}
