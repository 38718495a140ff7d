//! Locking strategies for [`List`](super::List).
//!
//! A list picks its strategy once, as a type parameter, instead of being
//! handed an optional lock on every call. Lookups and walks take the lock
//! shared, insertions and removals take it exclusive, so a
//! [`visit`](super::List::visit) callback may still look things up in the
//! list it is walking. Both strategies here implement
//! [`lock_api::RawRwLock`], so a host can also plug in its own lock (for
//! example one that masks interrupts while held).

use core::cell::Cell;
use core::sync::atomic::{AtomicUsize, Ordering};

use lock_api::{GuardNoSend, GuardSend, RawRwLock};

/// No mutual exclusion.
///
/// `NoLock` is `Send` but not `Sync`, so a list built on it cannot be shared
/// between threads. It still tracks who holds it on the current thread:
/// reads nest freely, but modifying a list while a read or another
/// modification is in progress (for instance from inside its own
/// [`visit`](super::List::visit) callback) panics rather than handing out an
/// aliased mutable view of the list head.
#[derive(Debug)]
pub struct NoLock {
    readers: Cell<usize>,
    writer: Cell<bool>,
}

unsafe impl RawRwLock for NoLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self {
        readers: Cell::new(0),
        writer: Cell::new(false),
    };

    type GuardMarker = GuardNoSend;

    fn lock_shared(&self) {
        if !self.try_lock_shared() {
            panic!("list read while it is being modified");
        }
    }

    fn try_lock_shared(&self) -> bool {
        if self.writer.get() {
            return false;
        }
        self.readers.set(self.readers.get() + 1);
        true
    }

    unsafe fn unlock_shared(&self) {
        self.readers.set(self.readers.get() - 1);
    }

    fn lock_exclusive(&self) {
        if !self.try_lock_exclusive() {
            panic!("list modified while an operation is in progress");
        }
    }

    fn try_lock_exclusive(&self) -> bool {
        if self.writer.get() || self.readers.get() > 0 {
            return false;
        }
        self.writer.set(true);
        true
    }

    unsafe fn unlock_exclusive(&self) {
        self.writer.set(false);
    }

    fn is_locked(&self) -> bool {
        self.writer.get() || self.readers.get() > 0
    }

    fn is_locked_exclusive(&self) -> bool {
        self.writer.get()
    }
}

const WRITER: usize = 1;
const READER: usize = 2;

/// A spinning reader-writer lock for lists shared between threads or with
/// interrupt handlers that never run on the same core as the holder.
///
/// Readers are preferred: a walk may re-enter the list for reading without
/// deadlocking, while a writer waits until every reader is gone.
#[derive(Debug)]
pub struct SpinLock {
    state: AtomicUsize,
}

unsafe impl RawRwLock for SpinLock {
    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self {
        state: AtomicUsize::new(0),
    };

    type GuardMarker = GuardSend;

    fn lock_shared(&self) {
        while !self.try_lock_shared() {
            while self.state.load(Ordering::Relaxed) & WRITER != 0 {
                core::hint::spin_loop();
            }
        }
    }

    fn try_lock_shared(&self) -> bool {
        let state = self.state.fetch_add(READER, Ordering::Acquire);
        if state & WRITER != 0 {
            self.state.fetch_sub(READER, Ordering::Relaxed);
            return false;
        }
        true
    }

    unsafe fn unlock_shared(&self) {
        self.state.fetch_sub(READER, Ordering::Release);
    }

    fn lock_exclusive(&self) {
        while !self.try_lock_exclusive() {
            while self.state.load(Ordering::Relaxed) != 0 {
                core::hint::spin_loop();
            }
        }
    }

    fn try_lock_exclusive(&self) -> bool {
        self.state
            .compare_exchange(0, WRITER, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock_exclusive(&self) {
        self.state.fetch_and(!WRITER, Ordering::Release);
    }

    fn is_locked(&self) -> bool {
        self.state.load(Ordering::Relaxed) != 0
    }

    fn is_locked_exclusive(&self) -> bool {
        self.state.load(Ordering::Relaxed) & WRITER != 0
    }
}
