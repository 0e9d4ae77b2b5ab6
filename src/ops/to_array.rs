use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Buffers every value and emits them as one `Vec`, in arrival order, when
/// the source completes. An error discards the buffer and is forwarded.
///
/// Returned wrapped in a `Single` by `Observable::to_array`.
#[derive(Clone)]
pub struct ToArray<S> {
  pub source: S,
}

impl<S: ObservableType> ObservableType for ToArray<S> {
  type Item = Vec<S::Item>;
  type Err = S::Err;
}

pub struct ToArrayObserver<O, Item> {
  observer: O,
  buffer: Vec<Item>,
}

impl<O, Item, Err> Observer<Item, Err> for ToArrayObserver<O, Item>
where
  O: Observer<Vec<Item>, Err>,
{
  fn next(&mut self, value: Item) { self.buffer.push(value); }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) {
    let ToArrayObserver { mut observer, buffer } = self;
    observer.next(buffer);
    observer.complete();
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, O, Item> CoreObservable<O> for ToArray<S>
where
  S: CoreObservable<ToArrayObserver<O, Item>> + ObservableType<Item = Item>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ToArrayObserver { observer, buffer: Vec::new() })
  }
}
