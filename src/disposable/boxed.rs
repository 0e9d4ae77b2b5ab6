use super::Disposable;

/// Helper trait for calling dispose on boxed trait objects
///
/// `Disposable::dispose(self)` requires `Sized`, so `Box<dyn Disposable>`
/// goes through this trait instead.
pub trait BoxedDisposableInner {
  fn boxed_dispose(self: Box<Self>);
  fn boxed_is_disposed(&self) -> bool;
}

impl<T: Disposable> BoxedDisposableInner for T {
  #[inline]
  fn boxed_dispose(self: Box<Self>) { (*self).dispose() }

  #[inline]
  fn boxed_is_disposed(&self) -> bool { self.is_disposed() }
}

/// A type-erased disposable.
///
/// Disposables are control handles that get stored and released at an
/// arbitrary later time (in a `DisposeBag`, a `Subscription`, a `flat_map`
/// state), so the boxed value must own everything it needs: `'static`.
pub struct BoxedDisposable(Box<dyn BoxedDisposableInner>);

impl BoxedDisposable {
  #[inline]
  pub fn new(disposable: impl Disposable + 'static) -> Self { Self(Box::new(disposable)) }
}

impl Disposable for BoxedDisposable {
  #[inline]
  fn dispose(self) { self.0.boxed_dispose() }

  #[inline]
  fn is_disposed(&self) -> bool { self.0.boxed_is_disposed() }
}
