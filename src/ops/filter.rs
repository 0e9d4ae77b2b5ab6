//! Filter operators
//!
//! `filter` forwards the values that satisfy a predicate; `try_filter` does
//! the same with a predicate that can fail.

use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Emits only the values for which `filter` returns true.
///
/// ```
/// use rxkit::prelude::*;
///
/// let mut evens = vec![];
/// of![1, 2, 3, 4, 5, 6].filter(|v| v % 2 == 0).subscribe(|v| evens.push(v));
/// assert_eq!(evens, vec![2, 4, 6]);
/// ```
#[derive(Clone)]
pub struct Filter<S, F> {
  pub source: S,
  pub filter: F,
}

/// Emits the values for which `filter` returns `Ok(true)`; an `Err` ends the
/// stream with that error.
#[derive(Clone)]
pub struct TryFilter<S, F> {
  pub source: S,
  pub filter: F,
}

impl<S: ObservableType, F> ObservableType for Filter<S, F> {
  type Item = S::Item;
  type Err = S::Err;
}

impl<S: ObservableType, F> ObservableType for TryFilter<S, F> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct FilterObserver<O, F> {
  observer: O,
  filter: F,
}

impl<O, F, Item, Err> Observer<Item, Err> for FilterObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.filter)(&value) {
      self.observer.next(value);
    }
  }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) { self.observer.complete(); }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, F, O> CoreObservable<O> for Filter<S, F>
where
  S: CoreObservable<FilterObserver<O, F>>,
  F: FnMut(&S::Item) -> bool,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Filter { source, filter } = self;
    source.actual_subscribe(FilterObserver { observer, filter })
  }
}

pub struct TryFilterObserver<O, F> {
  observer: Option<O>,
  filter: F,
}

impl<O, F, Item, Err> Observer<Item, Err> for TryFilterObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> Result<bool, Err>,
{
  fn next(&mut self, value: Item) {
    let Some(observer) = self.observer.as_mut() else { return };
    match (self.filter)(&value) {
      Ok(true) => observer.next(value),
      Ok(false) => {}
      Err(err) => self.observer.take().error(err),
    }
  }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) { self.observer.complete(); }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, F, O> CoreObservable<O> for TryFilter<S, F>
where
  S: CoreObservable<TryFilterObserver<O, F>>,
  F: FnMut(&S::Item) -> Result<bool, S::Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let TryFilter { source, filter } = self;
    source.actual_subscribe(TryFilterObserver { observer: Some(observer), filter })
  }
}
