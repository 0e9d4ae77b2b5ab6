//! DistinctUntilChanged operators
//!
//! Suppress a value when it matches the value emitted just before it. Only
//! adjacent values are compared: `A, A, B, A` becomes `A, B, A`.

use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Compares with `PartialEq`.
#[derive(Clone)]
pub struct DistinctUntilChanged<S> {
  pub source: S,
}

/// Compares with a caller-supplied function; `comparator(previous, current)`
/// returning true means the two are equal and `current` is suppressed.
#[derive(Clone)]
pub struct DistinctUntilChangedBy<S, F> {
  pub source: S,
  pub comparator: F,
}

impl<S: ObservableType> ObservableType for DistinctUntilChanged<S> {
  type Item = S::Item;
  type Err = S::Err;
}

impl<S: ObservableType, F> ObservableType for DistinctUntilChangedBy<S, F> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct DistinctUntilChangedObserver<O, Item, F> {
  observer: O,
  last: Option<Item>,
  comparator: F,
}

impl<O, Item, Err, F> Observer<Item, Err> for DistinctUntilChangedObserver<O, Item, F>
where
  O: Observer<Item, Err>,
  Item: Clone,
  F: FnMut(&Item, &Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if let Some(last) = &self.last {
      if (self.comparator)(last, &value) {
        return;
      }
    }
    self.last = Some(value.clone());
    self.observer.next(value);
  }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) { self.observer.complete(); }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

type EqComparator<Item> = fn(&Item, &Item) -> bool;

impl<S, O, Item> CoreObservable<O> for DistinctUntilChanged<S>
where
  S: CoreObservable<DistinctUntilChangedObserver<O, Item, EqComparator<Item>>>
    + ObservableType<Item = Item>,
  Item: PartialEq,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let comparator: EqComparator<Item> = |a, b| a == b;
    self
      .source
      .actual_subscribe(DistinctUntilChangedObserver { observer, last: None, comparator })
  }
}

impl<S, F, O, Item> CoreObservable<O> for DistinctUntilChangedBy<S, F>
where
  S: CoreObservable<DistinctUntilChangedObserver<O, Item, F>> + ObservableType<Item = Item>,
  F: FnMut(&Item, &Item) -> bool,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let DistinctUntilChangedBy { source, comparator } = self;
    source.actual_subscribe(DistinctUntilChangedObserver { observer, last: None, comparator })
  }
}
