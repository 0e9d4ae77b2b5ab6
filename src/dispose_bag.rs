//! An owning collection of disposables released together.

use std::cell::RefCell;

use crate::disposable::{BoxedDisposable, Disposable};

#[derive(Default)]
struct BagState {
  disposed: bool,
  items: Vec<BoxedDisposable>,
}

/// Collects disposables and releases them, in insertion order, when the bag is
/// disposed or dropped.
///
/// Once the bag is disposed, anything inserted into it is released on the
/// spot.
///
/// ```rust
/// use rxkit::prelude::*;
///
/// let bag = DisposeBag::new();
/// observable::never::<i32>().subscribe(|_| {}).disposed_by(&bag);
/// assert_eq!(bag.len(), 1);
/// drop(bag);
/// ```
#[derive(Default)]
pub struct DisposeBag(RefCell<BagState>);

impl DisposeBag {
  pub fn new() -> Self { Self::default() }

  pub fn insert(&self, disposable: impl Disposable + 'static) {
    let mut state = self.0.borrow_mut();
    if state.disposed {
      drop(state);
      disposable.dispose();
    } else {
      state.items.push(BoxedDisposable::new(disposable));
    }
  }

  /// Release every member. A second call does nothing.
  pub fn dispose(&self) {
    // Members may insert into this bag while being released, so nothing stays
    // borrowed during the loop.
    let items = {
      let mut state = self.0.borrow_mut();
      state.disposed = true;
      std::mem::take(&mut state.items)
    };
    if !items.is_empty() {
      tracing::trace!(count = items.len(), "dispose bag released");
    }
    for item in items {
      item.dispose();
    }
  }

  #[inline]
  pub fn is_disposed(&self) -> bool { self.0.borrow().disposed }

  #[inline]
  pub fn len(&self) -> usize { self.0.borrow().items.len() }

  #[inline]
  pub fn is_empty(&self) -> bool { self.0.borrow().items.is_empty() }
}

impl Drop for DisposeBag {
  fn drop(&mut self) { self.dispose(); }
}
