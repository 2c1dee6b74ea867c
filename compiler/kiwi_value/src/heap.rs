//! Shared, mutable storage for aggregate values.
//!
//! Lists, hashmaps and struct instances are reference types in Kiwi:
//! assigning one to a second variable aliases the same collection. The
//! interpreter is single-threaded, so `Rc<RefCell<T>>` is the backing.
//! Construction is crate-private; outside code goes through the
//! `Value` factory methods.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Handle to a shared aggregate payload.
pub struct Heap<T>(Rc<RefCell<T>>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Rc::new(RefCell::new(value)))
    }

    /// Borrow the payload.
    ///
    /// Panics if the payload is currently mutably borrowed.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutably borrow the payload.
    ///
    /// Panics if the payload is currently borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Borrow the payload unless it is currently mutably borrowed.
    #[inline]
    pub fn try_borrow(&self) -> Option<Ref<'_, T>> {
        self.0.try_borrow().ok()
    }

    /// True when both handles point at the same collection.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared payload; the identity used by visited sets.
    #[inline]
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    /// Number of live handles to this payload.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl<T> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_borrow() {
            Some(inner) => inner.fmt(f),
            None => write!(f, "<borrowed>"),
        }
    }
}
