use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Emits values while `predicate` holds. The first value that fails it is
/// dropped and the stream completes.
///
/// Combine with `enumerate` when the decision depends on the index as well.
#[derive(Clone)]
pub struct TakeWhile<S, F> {
  pub source: S,
  pub predicate: F,
}

impl<S: ObservableType, F> ObservableType for TakeWhile<S, F> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct TakeWhileObserver<O, F> {
  observer: Option<O>,
  predicate: F,
}

impl<O, F, Item, Err> Observer<Item, Err> for TakeWhileObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    let Some(observer) = self.observer.as_mut() else { return };
    if (self.predicate)(&value) {
      observer.next(value);
    } else {
      self.observer.take().complete();
    }
  }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) { self.observer.complete(); }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, F, O> CoreObservable<O> for TakeWhile<S, F>
where
  S: CoreObservable<TakeWhileObserver<O, F>>,
  F: FnMut(&S::Item) -> bool,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let TakeWhile { source, predicate } = self;
    source.actual_subscribe(TakeWhileObserver { observer: Some(observer), predicate })
  }
}
