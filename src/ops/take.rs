//! Take operator implementation
//!
//! Emits only the first `count` values emitted by the source Observable, then
//! completes and releases the source.

use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Take operator: Emits only the first `count` values from the source
///
/// The completion is sent together with the `count`-th value, without waiting
/// for the source to produce another one. A `count` of zero completes as soon
/// as it is subscribed, without subscribing the source.
///
/// ```
/// use rxkit::prelude::*;
///
/// let mut result = Vec::new();
/// observable::from_iter(0..).take(3).subscribe(|v| result.push(v));
/// assert_eq!(result, vec![0, 1, 2]);
/// ```
#[derive(Clone)]
pub struct Take<S> {
  pub source: S,
  pub count: usize,
}

impl<S: ObservableType> ObservableType for Take<S> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct TakeObserver<O> {
  observer: Option<O>,
  remaining: usize,
}

impl<O, Item, Err> Observer<Item, Err> for TakeObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    let Some(observer) = self.observer.as_mut() else { return };
    self.remaining -= 1;
    observer.next(value);
    if self.remaining == 0 {
      self.observer.take().complete();
    }
  }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) { self.observer.complete(); }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, O> CoreObservable<O> for Take<S>
where
  S: CoreObservable<TakeObserver<O>>,
  O: Observer<S::Item, S::Err>,
{
  type Unsub = Option<S::Unsub>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Take { source, count } = self;
    if count == 0 {
      observer.complete();
      return None;
    }
    Some(source.actual_subscribe(TakeObserver { observer: Some(observer), remaining: count }))
  }
}
