//! Shared mutable cells used by operators that fan state out to several
//! observers (`take_until`, `flat_map`, subjects, ...).
//!
//! Everything in rxkit runs on the calling thread, so the cell is an
//! `Rc<RefCell<T>>`. The `try_*` accessors exist for paths that can be reached
//! re-entrantly while the same cell is already borrowed further up the stack.

use std::{
  cell::{Ref, RefCell, RefMut},
  rc::Rc,
};

#[derive(Default)]
pub struct MutRc<T>(Rc<RefCell<T>>);

impl<T> MutRc<T> {
  pub fn own(t: T) -> Self { Self(Rc::new(RefCell::new(t))) }

  #[inline]
  pub fn rc_deref(&self) -> Ref<'_, T> { self.0.borrow() }

  #[inline]
  pub fn rc_deref_mut(&self) -> RefMut<'_, T> { self.0.borrow_mut() }

  /// Borrow immutably, or `None` if the cell is mutably borrowed right now.
  #[inline]
  pub fn try_rc_deref(&self) -> Option<Ref<'_, T>> { self.0.try_borrow().ok() }

  /// Borrow mutably, or `None` if the cell is borrowed right now.
  #[inline]
  pub fn try_rc_deref_mut(&self) -> Option<RefMut<'_, T>> { self.0.try_borrow_mut().ok() }
}

impl<T> From<T> for MutRc<T> {
  #[inline]
  fn from(t: T) -> Self { Self::own(t) }
}

impl<T> Clone for MutRc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}
