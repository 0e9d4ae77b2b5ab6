//! Skip operator implementation
//!
//! This module contains the Skip operator, which ignores the first `count`
//! values emitted by the source Observable, then emits the rest.

use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Skip operator: Ignores the first `count` values from the source observable
///
/// If the source completes before emitting `count` values, `skip` completes
/// without emitting any values. A `count` of zero forwards everything.
///
/// ```
/// use rxkit::prelude::*;
///
/// let mut result = Vec::new();
/// of![1, 2, 3, 4, 5].skip(2).subscribe(|v| result.push(v));
/// assert_eq!(result, vec![3, 4, 5]);
/// ```
#[derive(Clone)]
pub struct Skip<S> {
  pub source: S,
  pub count: usize,
}

impl<S: ObservableType> ObservableType for Skip<S> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct SkipObserver<O> {
  observer: O,
  remaining: usize,
}

impl<O, Item, Err> Observer<Item, Err> for SkipObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, v: Item) {
    if self.remaining > 0 {
      self.remaining -= 1;
    } else {
      self.observer.next(v);
    }
  }

  fn error(self, e: Err) { self.observer.error(e); }

  fn complete(self) { self.observer.complete(); }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, O> CoreObservable<O> for Skip<S>
where
  S: CoreObservable<SkipObserver<O>>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Skip { source, count } = self;
    source.actual_subscribe(SkipObserver { observer, remaining: count })
  }
}
