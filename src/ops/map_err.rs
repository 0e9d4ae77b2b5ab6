use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Converts the error of the source with `func`; values and completion pass
/// through unchanged.
#[derive(Clone)]
pub struct MapErr<S, F> {
  pub source: S,
  pub func: F,
}

impl<S, F, E> ObservableType for MapErr<S, F>
where
  S: ObservableType,
  F: FnOnce(S::Err) -> E,
{
  type Item = S::Item;
  type Err = E;
}

pub struct MapErrObserver<O, F> {
  observer: O,
  func: F,
}

impl<O, F, Item, Err, E> Observer<Item, Err> for MapErrObserver<O, F>
where
  O: Observer<Item, E>,
  F: FnOnce(Err) -> E,
{
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(self, err: Err) { self.observer.error((self.func)(err)) }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, F, E, O> CoreObservable<O> for MapErr<S, F>
where
  S: CoreObservable<MapErrObserver<O, F>>,
  F: FnOnce(S::Err) -> E,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let MapErr { source, func } = self;
    source.actual_subscribe(MapErrObserver { observer, func })
  }
}
