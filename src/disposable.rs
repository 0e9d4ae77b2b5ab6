//! Disposables: handles for releasable resources.
//!
//! Every `CoreObservable::actual_subscribe` returns a `Disposable` describing
//! how to tear that subscription down. Releasing it twice is harmless, since
//! `dispose` consumes the value, and shared handles such as `Subscription`
//! guard themselves with a closed flag.

mod boxed;
mod dynamic;
mod tuple;

pub use boxed::*;
pub use dynamic::*;
pub use tuple::*;

/// A releasable resource.
pub trait Disposable {
  /// Release the resource. Consumes the handle, so a given value can only be
  /// released once.
  fn dispose(self);

  fn is_disposed(&self) -> bool;
}

/// Nothing to release. Sources that finish during `subscribe` return `()`.
impl Disposable for () {
  #[inline]
  fn dispose(self) {}

  #[inline]
  fn is_disposed(&self) -> bool { true }
}

impl<D: Disposable> Disposable for Option<D> {
  #[inline]
  fn dispose(self) {
    if let Some(d) = self {
      d.dispose();
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.as_ref().map_or(true, D::is_disposed) }
}

/// Runs a closure when disposed.
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
///
/// use rxkit::prelude::*;
///
/// let released = Rc::new(Cell::new(false));
/// let c_released = released.clone();
/// ClosureDisposable(move || c_released.set(true)).dispose();
/// assert!(released.get());
/// ```
pub struct ClosureDisposable<F: FnOnce()>(pub F);

impl<F: FnOnce()> Disposable for ClosureDisposable<F> {
  #[inline]
  fn dispose(self) { (self.0)() }

  #[inline]
  fn is_disposed(&self) -> bool { false }
}

#[cfg(test)]
mod tests {
  use std::{cell::Cell, rc::Rc};

  use super::*;

  #[rxkit_macro::test]
  fn option_disposes_inner() {
    let hits = Rc::new(Cell::new(0));
    let c_hits = hits.clone();
    let d = Some(ClosureDisposable(move || c_hits.set(c_hits.get() + 1)));
    assert!(!d.is_disposed());
    d.dispose();
    assert_eq!(hits.get(), 1);

    let none: Option<()> = None;
    assert!(none.is_disposed());
    none.dispose();
  }
}
