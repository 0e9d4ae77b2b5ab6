//! Map operators
//!
//! `map` applies a projection to every value; `try_map` applies one that can
//! fail, ending the stream with the failure.

use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Creates a new stream which calls a closure on each element and uses its
/// return as the value.
///
/// ```
/// use rxkit::prelude::*;
///
/// let mut doubled = vec![];
/// of![1, 2, 3].map(|v| v * 2).subscribe(|v| doubled.push(v));
/// assert_eq!(doubled, vec![2, 4, 6]);
/// ```
#[derive(Clone)]
pub struct Map<S, F> {
  pub source: S,
  pub func: F,
}

#[derive(Clone)]
pub struct TryMap<S, F> {
  pub source: S,
  pub func: F,
}

impl<S, F, B> ObservableType for Map<S, F>
where
  S: ObservableType,
  F: FnMut(S::Item) -> B,
{
  type Item = B;
  type Err = S::Err;
}

impl<S, F, B> ObservableType for TryMap<S, F>
where
  S: ObservableType,
  F: FnMut(S::Item) -> Result<B, S::Err>,
{
  type Item = B;
  type Err = S::Err;
}

pub struct MapObserver<O, F> {
  observer: O,
  func: F,
}

impl<O, F, Item, Err, B> Observer<Item, Err> for MapObserver<O, F>
where
  O: Observer<B, Err>,
  F: FnMut(Item) -> B,
{
  fn next(&mut self, value: Item) { self.observer.next((self.func)(value)) }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, F, B, O> CoreObservable<O> for Map<S, F>
where
  S: CoreObservable<MapObserver<O, F>>,
  F: FnMut(S::Item) -> B,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Map { source, func } = self;
    source.actual_subscribe(MapObserver { observer, func })
  }
}

pub struct TryMapObserver<O, F> {
  observer: Option<O>,
  func: F,
}

impl<O, F, Item, Err, B> Observer<Item, Err> for TryMapObserver<O, F>
where
  O: Observer<B, Err>,
  F: FnMut(Item) -> Result<B, Err>,
{
  fn next(&mut self, value: Item) {
    let Some(observer) = self.observer.as_mut() else { return };
    match (self.func)(value) {
      Ok(mapped) => observer.next(mapped),
      Err(err) => self.observer.take().error(err),
    }
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, F, B, O> CoreObservable<O> for TryMap<S, F>
where
  S: CoreObservable<TryMapObserver<O, F>>,
  F: FnMut(S::Item) -> Result<B, S::Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let TryMap { source, func } = self;
    source.actual_subscribe(TryMapObserver { observer: Some(observer), func })
  }
}
