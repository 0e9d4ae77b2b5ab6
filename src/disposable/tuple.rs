use super::Disposable;

/// Two disposables released together, upstream first.
///
/// Operators with a second source (`take_until`, `skip_until`) or with their
/// own teardown (`flat_map`, `on_disposed`) pair it with the upstream handle.
pub struct TupleDisposable<A, B> {
  first: A,
  second: B,
}

impl<A, B> TupleDisposable<A, B> {
  pub fn new(first: A, second: B) -> Self { TupleDisposable { first, second } }
}

impl<A, B> Disposable for TupleDisposable<A, B>
where
  A: Disposable,
  B: Disposable,
{
  fn dispose(self) {
    self.first.dispose();
    self.second.dispose();
  }

  fn is_disposed(&self) -> bool { self.first.is_disposed() && self.second.is_disposed() }
}
