use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Maps each value with `func` and emits the `Some` results; `None` results
/// are dropped silently.
///
/// ```
/// use rxkit::prelude::*;
///
/// let mut numbers = vec![];
/// of!["1", "two", "3"]
///   .filter_map(|s| s.parse::<i32>().ok())
///   .subscribe(|v| numbers.push(v));
/// assert_eq!(numbers, vec![1, 3]);
/// ```
#[derive(Clone)]
pub struct FilterMap<S, F> {
  pub source: S,
  pub func: F,
}

impl<S, F, B> ObservableType for FilterMap<S, F>
where
  S: ObservableType,
  F: FnMut(S::Item) -> Option<B>,
{
  type Item = B;
  type Err = S::Err;
}

pub struct FilterMapObserver<O, F> {
  observer: O,
  func: F,
}

impl<O, F, Item, Err, B> Observer<Item, Err> for FilterMapObserver<O, F>
where
  O: Observer<B, Err>,
  F: FnMut(Item) -> Option<B>,
{
  fn next(&mut self, value: Item) {
    if let Some(mapped) = (self.func)(value) {
      self.observer.next(mapped);
    }
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, F, B, O> CoreObservable<O> for FilterMap<S, F>
where
  S: CoreObservable<FilterMapObserver<O, F>>,
  F: FnMut(S::Item) -> Option<B>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let FilterMap { source, func } = self;
    source.actual_subscribe(FilterMapObserver { observer, func })
  }
}
