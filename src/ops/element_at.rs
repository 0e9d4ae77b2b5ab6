use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Emits only the value at zero-based `index`, then completes.
///
/// A source that completes before reaching `index` completes without
/// emitting.
#[derive(Clone)]
pub struct ElementAt<S> {
  pub source: S,
  pub index: usize,
}

impl<S: ObservableType> ObservableType for ElementAt<S> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct ElementAtObserver<O> {
  observer: Option<O>,
  remaining: usize,
}

impl<O, Item, Err> Observer<Item, Err> for ElementAtObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.remaining > 0 {
      self.remaining -= 1;
      return;
    }
    if let Some(mut observer) = self.observer.take() {
      observer.next(value);
      observer.complete();
    }
  }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) { self.observer.complete(); }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, O> CoreObservable<O> for ElementAt<S>
where
  S: CoreObservable<ElementAtObserver<O>>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let ElementAt { source, index } = self;
    source.actual_subscribe(ElementAtObserver { observer: Some(observer), remaining: index })
  }
}
