use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Ignores values while `predicate` holds. The first value that fails it is
/// emitted, and so is everything after it, whatever the predicate says.
#[derive(Clone)]
pub struct SkipWhile<S, F> {
  pub source: S,
  pub predicate: F,
}

impl<S: ObservableType, F> ObservableType for SkipWhile<S, F> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct SkipWhileObserver<O, F> {
  observer: O,
  predicate: F,
  done_skipping: bool,
}

impl<O, F, Item, Err> Observer<Item, Err> for SkipWhileObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if !self.done_skipping && (self.predicate)(&value) {
      return;
    }
    self.done_skipping = true;
    self.observer.next(value);
  }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) { self.observer.complete(); }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, F, O> CoreObservable<O> for SkipWhile<S, F>
where
  S: CoreObservable<SkipWhileObserver<O, F>>,
  F: FnMut(&S::Item) -> bool,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let SkipWhile { source, predicate } = self;
    source.actual_subscribe(SkipWhileObserver { observer, predicate, done_skipping: false })
  }
}
