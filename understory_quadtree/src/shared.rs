// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference-identity item handle.

use alloc::rc::Rc;
use core::cell::{Ref, RefCell, RefMut};
use core::hash::{Hash, Hasher};
use kurbo::Rect;

use crate::types::Bounded;

/// Shared, mutable item handle that compares by reference.
///
/// Clones point at the same value, so the owner can keep one handle, give another to
/// the tree, and move the item by mutating through its own handle. Equality and hashing
/// use the allocation address, never the value: two handles built from equal values are
/// still different items.
///
/// ```
/// use kurbo::Rect;
/// use understory_quadtree::{QuadTree, Shared};
///
/// let mut tree = QuadTree::new(100.0, 100.0);
/// let item = Shared::new(Rect::new(5.0, 5.0, 7.0, 7.0));
/// tree.insert(item.clone());
///
/// *item.borrow_mut() = Rect::new(90.0, 90.0, 92.0, 92.0);
/// tree.update();
/// assert_eq!(tree.query(Rect::new(80.0, 80.0, 100.0, 100.0)), vec![item]);
/// ```
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    /// Wrap `value` in a new handle.
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    /// Borrow the value. Panics if it is mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the value mutably. Panics if it is borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Replace the value, returning the old one.
    pub fn replace(&self, value: T) -> T {
        self.0.replace(value)
    }

    /// Whether both handles refer to the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T> Eq for Shared<T> {}

impl<T> Hash for Shared<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::ptr::hash(Rc::as_ptr(&self.0), state);
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Shared").field(&*self.0.borrow()).finish()
    }
}

impl<T: Bounded> Bounded for Shared<T> {
    fn bounds(&self) -> Rect {
        self.0.borrow().bounds()
    }
}
