//! FlatMap operator
//!
//! Projects each source value to an inner observable and merges the values of
//! every live inner subscription into one stream.
//!
//! Behavior summary:
//! - Inner values are forwarded in arrival order, interleaved across inners.
//! - The output completes once the source and every inner have completed.
//! - An error from the source or from any inner is forwarded at once, and every
//!   other inner subscription is released.
//! - An inner that emits while another inner's value is still being delivered
//!   (from a downstream callback) is queued behind it.

use crate::{
  disposable::{BoxedDisposable, Disposable, DynamicDisposables, TupleDisposable},
  observable::{CoreObservable, ObservableType},
  observer::{Observer, SerializedObserver},
  rc::MutRc,
};

#[derive(Clone)]
pub struct FlatMap<S, F> {
  pub source: S,
  pub func: F,
}

impl<S, F, B> ObservableType for FlatMap<S, F>
where
  S: ObservableType,
  F: FnMut(S::Item) -> B,
  B: ObservableType<Err = S::Err>,
{
  type Item = B::Item;
  type Err = S::Err;
}

/// Inner subscriptions keyed by id. A slot is `None` while its inner is
/// still being subscribed.
#[doc(hidden)]
#[derive(Default)]
pub struct FlatMapState {
  inners: DynamicDisposables<Option<BoxedDisposable>>,
  outer_completed: bool,
  closed: bool,
}

impl FlatMapState {
  /// Stop accepting inners and hand back the live ones for disposal.
  fn close(&mut self) -> Vec<BoxedDisposable> {
    self.closed = true;
    self.inners.drain().flatten().collect()
  }
}

fn dispose_all(inners: Vec<BoxedDisposable>) {
  for inner in inners {
    inner.dispose();
  }
}

#[doc(hidden)]
pub struct FlatMapOuterObserver<O, F, Item, Err> {
  observer: SerializedObserver<O, Item, Err>,
  state: MutRc<FlatMapState>,
  func: F,
}

#[doc(hidden)]
pub struct FlatMapInnerObserver<O, Item, Err> {
  observer: SerializedObserver<O, Item, Err>,
  state: MutRc<FlatMapState>,
  id: usize,
}

/// Releases every live inner subscription.
pub struct FlatMapDisposable(MutRc<FlatMapState>);

impl Disposable for FlatMapDisposable {
  fn dispose(self) {
    let inners = self.0.rc_deref_mut().close();
    dispose_all(inners);
  }

  fn is_disposed(&self) -> bool { self.0.try_rc_deref().is_some_and(|st| st.closed) }
}

impl<S, F, B, O> CoreObservable<O> for FlatMap<S, F>
where
  S: ObservableType,
  B: ObservableType<Err = <S as ObservableType>::Err>,
  S: CoreObservable<
    FlatMapOuterObserver<O, F, <B as ObservableType>::Item, <S as ObservableType>::Err>,
  >,
  F: FnMut(<S as ObservableType>::Item) -> B,
  B: CoreObservable<
    FlatMapInnerObserver<O, <B as ObservableType>::Item, <S as ObservableType>::Err>,
  >,
{
  type Unsub = TupleDisposable<S::Unsub, FlatMapDisposable>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let FlatMap { source, func } = self;
    let state = MutRc::own(FlatMapState::default());
    let outer =
      FlatMapOuterObserver { observer: SerializedObserver::new(observer), state: state.clone(), func };
    let unsub = source.actual_subscribe(outer);
    TupleDisposable::new(unsub, FlatMapDisposable(state))
  }
}

impl<O, F, Item, Err, B, BItem> Observer<Item, Err>
  for FlatMapOuterObserver<O, F, BItem, Err>
where
  O: Observer<BItem, Err>,
  F: FnMut(Item) -> B,
  B: CoreObservable<FlatMapInnerObserver<O, BItem, Err>, Item = BItem, Err = Err>,
  B::Unsub: 'static,
{
  fn next(&mut self, value: Item) {
    if self.is_closed() {
      return;
    }
    let inner = (self.func)(value);
    let id = self.state.rc_deref_mut().inners.add(None);
    let inner_observer =
      FlatMapInnerObserver { observer: self.observer.clone(), state: self.state.clone(), id };
    let unsub = inner.actual_subscribe(inner_observer);

    let mut state = self.state.rc_deref_mut();
    if let Some(slot) = state.inners.get_mut(id) {
      *slot = Some(BoxedDisposable::new(unsub));
    } else {
      // The inner finished, or everything was released, while subscribing.
      drop(state);
      unsub.dispose();
    }
  }

  fn error(self, err: Err) {
    let inners = self.state.rc_deref_mut().close();
    self.observer.error(err);
    dispose_all(inners);
  }

  fn complete(self) {
    let done = {
      let mut state = self.state.rc_deref_mut();
      state.outer_completed = true;
      let done = !state.closed && state.inners.is_empty();
      state.closed |= done;
      done
    };
    if done {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<O, Item, Err> Observer<Item, Err> for FlatMapInnerObserver<O, Item, Err>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) { self.observer.next(value); }

  fn error(self, err: Err) {
    let inners = self.state.rc_deref_mut().close();
    self.observer.error(err);
    dispose_all(inners);
  }

  fn complete(self) {
    let (finished, done) = {
      let mut state = self.state.rc_deref_mut();
      let finished = state.inners.remove(self.id).flatten();
      let done = !state.closed && state.outer_completed && state.inners.is_empty();
      state.closed |= done;
      (finished, done)
    };
    if let Some(finished) = finished {
      finished.dispose();
    }
    if done {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
