//! Intrusive singly-linked lists over externally owned nodes.
//!
//! A [`List`] never allocates and never owns its members. Each node embeds a
//! [`Link`] slot and exposes it through the [`Node`] trait; the list only
//! rewires those slots. This is what backs the command registry, and any
//! table a command handler wants to keep (devices, sensors, pins) can use the
//! same machinery.
//!
//! # Membership
//!
//! A node belongs to at most one list at a time. [`Link::is_linked`] reports
//! membership; it becomes `true` on insertion and goes back to `false` when
//! the node is removed, popped, or the list is cleared or dropped. Inserting a
//! node that is already linked fails with [`Error::AlreadyLinked`].
//!
//! # Locking
//!
//! Every operation takes `&self` and holds the list's lock for its own
//! duration only. Lookups and walks share the lock; insertions and removals
//! take it exclusively. The strategy is the `R` type parameter:
//!
//! - [`NoLock`]: single-threaded use, the list is `!Sync`
//! - [`SpinLock`]: shareable between threads
//! - any other [`lock_api::RawRwLock`]
//!
//! Compound sequences such as find-then-remove are not atomic; hold an outer
//! lock around them if that matters.
//!
//! # Example
//!
//! ```rust
//! use libcli::list::{Link, List, Node};
//!
//! struct Device {
//!     name: &'static str,
//!     link: Link<Device>,
//! }
//!
//! impl Node for Device {
//!     fn link(&self) -> &Link<Self> {
//!         &self.link
//!     }
//! }
//!
//! let laser = Device { name: "laser", link: Link::new() };
//! let pump = Device { name: "pump", link: Link::new() };
//!
//! let devices: List<Device> = List::new();
//! devices.append(&laser).unwrap();
//! devices.append(&pump).unwrap();
//!
//! let found = devices.find(|d| d.name == "pump").unwrap();
//! assert!(core::ptr::eq(found, &pump));
//! assert!(devices.remove(&laser));
//! assert!(!laser.link.is_linked());
//! ```

use core::cmp::Ordering as CmpOrdering;
use core::fmt;
use core::ptr;
use core::sync::atomic::{AtomicBool, AtomicPtr, Ordering};

use lock_api::{RawRwLock, RwLock};

/// Error types for list operations
pub mod error;

/// Locking strategies
pub mod lock;


pub use error::Error;
pub use lock::{NoLock, SpinLock};

/// The link slot a node embeds to take part in a [`List`].
///
/// A `Link` is `const`-constructible so nodes can live in `static`s, and it
/// is `Sync` so such statics are allowed. Only the list that owns the node
/// ever writes to it.
pub struct Link<T> {
    next: AtomicPtr<T>,
    linked: AtomicBool,
}

impl<T> Link<T> {
    /// Create an unlinked slot.
    pub const fn new() -> Self {
        Self {
            next: AtomicPtr::new(ptr::null_mut()),
            linked: AtomicBool::new(false),
        }
    }

    /// Whether the node is currently a member of a list.
    pub fn is_linked(&self) -> bool {
        self.linked.load(Ordering::Acquire)
    }

    fn claim(&self) -> Result<(), Error> {
        self.linked
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| Error::AlreadyLinked)
    }

    fn release(&self) {
        self.next.store(ptr::null_mut(), Ordering::Relaxed);
        self.linked.store(false, Ordering::Release);
    }

    fn next_ptr(&self) -> *mut T {
        self.next.load(Ordering::Relaxed)
    }

    fn set_next(&self, next: Option<&T>) {
        let next = next.map_or(ptr::null_mut(), |n| n as *const T as *mut T);
        self.next.store(next, Ordering::Relaxed);
    }
}

impl<T> Default for Link<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Link<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("linked", &self.is_linked())
            .finish()
    }
}

/// A record that can be threaded onto a [`List`].
pub trait Node: Sized {
    /// The node's own link slot.
    fn link(&self) -> &Link<Self>;
}

/// An intrusive singly-linked list of `&'a T`.
///
/// Members must outlive the list; declare nodes before the list that links
/// them. Dropping the list unlinks every remaining member.
pub struct List<'a, T: Node, R: RawRwLock = NoLock> {
    head: RwLock<R, Option<&'a T>>,
}

impl<'a, T: Node, R: RawRwLock> List<'a, T, R> {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self {
            head: RwLock::const_new(R::INIT, None),
        }
    }

    fn next_of(node: &'a T) -> Option<&'a T> {
        // SAFETY: while `node` is linked its next pointer is either null or
        // was taken from a `&'a T` inserted into this same list, and no node
        // can sit in two lists at once. Every member is unlinked before the
        // list is dropped, so the pointee is alive for `'a`.
        unsafe { node.link().next_ptr().as_ref() }
    }

    fn nodes(first: Option<&'a T>) -> Nodes<'a, T, R> {
        Nodes {
            cursor: first,
            _list: core::marker::PhantomData,
        }
    }

    /// Insert `node` at the head. O(1).
    pub fn push(&self, node: &'a T) -> Result<(), Error> {
        let mut head = self.head.write();
        node.link().claim()?;
        node.link().set_next(*head);
        *head = Some(node);
        Ok(())
    }

    /// Insert `node` at the tail. O(n).
    pub fn append(&self, node: &'a T) -> Result<(), Error> {
        let mut head = self.head.write();
        node.link().claim()?;
        node.link().set_next(None);
        match Self::nodes(*head).last() {
            Some(tail) => tail.link().set_next(Some(node)),
            None => *head = Some(node),
        }
        Ok(())
    }

    /// Insert `node` in front of the first member it does not compare
    /// greater than, or at the tail if there is none.
    ///
    /// Keeps an ascending list ascending; a node equal to existing members is
    /// placed before them.
    pub fn add_sorted<F>(&self, node: &'a T, mut compare: F) -> Result<(), Error>
    where
        F: FnMut(&T, &T) -> CmpOrdering,
    {
        let mut head = self.head.write();
        node.link().claim()?;
        match *head {
            Some(first) if compare(node, first) == CmpOrdering::Greater => {
                let mut prev = first;
                while let Some(next) = Self::next_of(prev) {
                    if compare(node, next) != CmpOrdering::Greater {
                        break;
                    }
                    prev = next;
                }
                node.link().set_next(Self::next_of(prev));
                prev.link().set_next(Some(node));
            }
            first => {
                node.link().set_next(first);
                *head = Some(node);
            }
        }
        Ok(())
    }

    /// Unlink `node`, compared by identity.
    ///
    /// Returns `false` if it is not a member of this list.
    pub fn remove(&self, node: &T) -> bool {
        let mut head = self.head.write();
        let Some(first) = *head else {
            return false;
        };

        if ptr::eq(first, node) {
            *head = Self::next_of(first);
            first.link().release();
            return true;
        }

        let mut prev = first;
        while let Some(current) = Self::next_of(prev) {
            if ptr::eq(current, node) {
                prev.link().set_next(Self::next_of(current));
                current.link().release();
                return true;
            }
            prev = current;
        }

        false
    }

    /// Remove and return the head.
    pub fn pop(&self) -> Option<&'a T> {
        let mut head = self.head.write();
        let first = (*head)?;
        *head = Self::next_of(first);
        first.link().release();
        Some(first)
    }

    /// First member matching `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<&'a T>
    where
        F: FnMut(&T) -> bool,
    {
        let head = self.head.read();
        Self::nodes(*head).find(|node| predicate(node))
    }

    /// Whether `node` is a member of this list.
    pub fn contains(&self, node: &T) -> bool {
        self.find(|member| ptr::eq(member, node)).is_some()
    }

    /// Call `visitor` on every member in list order.
    ///
    /// The lock is held shared for the whole walk: the visitor may read this
    /// list (`find`, `contains`, `len`) but must not modify it. Under
    /// [`NoLock`] a modification from the visitor panics; under a spinning
    /// lock it deadlocks.
    pub fn visit<F>(&self, mut visitor: F)
    where
        F: FnMut(&'a T),
    {
        let head = self.head.read();
        Self::nodes(*head).for_each(|node| visitor(node));
    }

    /// Number of members. O(n).
    pub fn len(&self) -> usize {
        let head = self.head.read();
        Self::nodes(*head).count()
    }

    /// Whether the list has no members.
    pub fn is_empty(&self) -> bool {
        self.head.read().is_none()
    }

    /// Unlink every member, returning how many there were.
    pub fn clear(&self) -> usize {
        let mut count = 0;
        while self.pop().is_some() {
            count += 1;
        }
        count
    }
}

impl<T: Node, R: RawRwLock> Default for List<'_, T, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Node, R: RawRwLock> Drop for List<'_, T, R> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Node, R: RawRwLock> fmt::Debug for List<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List").field("len", &self.len()).finish()
    }
}

// Walks members while the caller holds the list lock.
struct Nodes<'a, T: Node, R: RawRwLock> {
    cursor: Option<&'a T>,
    _list: core::marker::PhantomData<fn() -> R>,
}

impl<'a, T: Node, R: RawRwLock> Iterator for Nodes<'a, T, R> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.cursor?;
        self.cursor = List::<'a, T, R>::next_of(node);
        Some(node)
    }
}
