use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Pairs each value with its zero-based index. The counter belongs to the
/// subscription, so every subscriber starts from zero.
#[derive(Clone)]
pub struct Enumerate<S> {
  pub source: S,
}

impl<S: ObservableType> ObservableType for Enumerate<S> {
  type Item = (usize, S::Item);
  type Err = S::Err;
}

pub struct EnumerateObserver<O> {
  observer: O,
  index: usize,
}

impl<O, Item, Err> Observer<Item, Err> for EnumerateObserver<O>
where
  O: Observer<(usize, Item), Err>,
{
  fn next(&mut self, value: Item) {
    let index = self.index;
    self.index += 1;
    self.observer.next((index, value));
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, O> CoreObservable<O> for Enumerate<S>
where
  S: CoreObservable<EnumerateObserver<O>>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(EnumerateObserver { observer, index: 0 })
  }
}
