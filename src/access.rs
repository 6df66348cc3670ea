//! Scoped access to collections owned by a managed runtime.
//!
//! A managed array must be pinned before its elements can be touched
//! directly, and must be unpinned afterwards. [`Pinned`] ties the unpin to
//! `Drop`, so it happens on every exit path, early returns included.

use std::ops::{Deref, DerefMut};

/// A collection whose storage is owned by the managed side.
pub trait ManagedArray {
    type Elem: Copy;

    /// Number of elements, readable without pinning.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Try to obtain direct access. Returns false if the runtime refuses.
    fn pin(&mut self) -> bool;

    /// Give direct access back. Called exactly once per successful `pin`.
    fn unpin(&mut self);

    /// Elements; only valid between `pin` and `unpin`.
    fn elements(&self) -> &[Self::Elem];

    fn elements_mut(&mut self) -> &mut [Self::Elem];
}

// ─── Pinned ─────────────────────────────────────────────────────────────────

/// Guard over a pinned [`ManagedArray`]. Derefs to its elements.
pub struct Pinned<'a, A: ManagedArray + ?Sized> {
    array: &'a mut A,
}

impl<'a, A: ManagedArray + ?Sized> Pinned<'a, A> {
    /// Pin `array`, or `None` if the runtime refused.
    pub fn acquire(array: &'a mut A) -> Option<Self> {
        if array.pin() {
            Some(Self { array })
        } else {
            None
        }
    }
}

impl<A: ManagedArray + ?Sized> Deref for Pinned<'_, A> {
    type Target = [A::Elem];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.array.elements()
    }
}

impl<A: ManagedArray + ?Sized> DerefMut for Pinned<'_, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.array.elements_mut()
    }
}

impl<A: ManagedArray + ?Sized> Drop for Pinned<'_, A> {
    fn drop(&mut self) {
        self.array.unpin();
    }
}

// ─── HeapArray ──────────────────────────────────────────────────────────────

/// In-process managed array backed by a `Vec`.
///
/// Counts pin attempts and can be told to refuse pinning, which is how the
/// access-failure paths are driven without a real runtime.
#[derive(Debug, Clone, Default)]
pub struct HeapArray<T> {
    data: Vec<T>,
    refuse_pin: bool,
    pinned: bool,
    pin_attempts: usize,
    unpins: usize,
}

impl<T: Copy> HeapArray<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self {
            data,
            refuse_pin: false,
            pinned: false,
            pin_attempts: 0,
            unpins: 0,
        }
    }

    /// An array the runtime will never pin.
    pub fn refusing(data: Vec<T>) -> Self {
        Self {
            refuse_pin: true,
            ..Self::new(data)
        }
    }

    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    #[inline]
    pub fn pin_attempts(&self) -> usize {
        self.pin_attempts
    }

    #[inline]
    pub fn unpins(&self) -> usize {
        self.unpins
    }

    /// Contents as seen by the managed side.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}

impl<T: Copy> ManagedArray for HeapArray<T> {
    type Elem = T;

    fn len(&self) -> usize {
        self.data.len()
    }

    fn pin(&mut self) -> bool {
        self.pin_attempts += 1;
        if self.refuse_pin || self.pinned {
            return false;
        }
        self.pinned = true;
        true
    }

    fn unpin(&mut self) {
        debug_assert!(self.pinned, "unpin without matching pin");
        self.pinned = false;
        self.unpins += 1;
    }

    fn elements(&self) -> &[T] {
        debug_assert!(self.pinned, "elements read while unpinned");
        &self.data
    }

    fn elements_mut(&mut self) -> &mut [T] {
        debug_assert!(self.pinned, "elements written while unpinned");
        &mut self.data
    }
}
