//! FlatMapLatest operator
//!
//! Transforms each value emitted by the source into an inner Observable, and
//! forwards items from only the most recently created inner Observable. When a
//! new inner Observable is produced, the previous one is released before the
//! new one is subscribed.
//!
//! Behavior summary:
//! - Only the latest inner Observable's emissions are forwarded downstream.
//! - The operator completes only after the source completes and the current
//!   inner Observable completes.
//! - Errors from the source or from the current inner Observable are propagated
//!   immediately.
//! - Events that arrive while a value is still being delivered downstream are
//!   queued behind it.
//!
//! ```rust
//! use std::{cell::RefCell, convert::Infallible, rc::Rc};
//!
//! use rxkit::prelude::*;
//!
//! let source = PublishSubject::<i32, Infallible>::new();
//! let seen = Rc::new(RefCell::new(vec![]));
//! let c_seen = seen.clone();
//! source
//!   .clone()
//!   .flat_map_latest(|n| of![n, n * 10])
//!   .subscribe(move |v| c_seen.borrow_mut().push(v));
//!
//! source.on_next(1);
//! source.on_next(2);
//! assert_eq!(*seen.borrow(), vec![1, 10, 2, 20]);
//! ```

use crate::{
  disposable::{BoxedDisposable, Disposable, TupleDisposable},
  observable::{CoreObservable, ObservableType},
  observer::{Observer, SerializedObserver},
  rc::MutRc,
};

#[derive(Clone)]
pub struct FlatMapLatest<S, F> {
  pub source: S,
  pub func: F,
}

impl<S, F, B> ObservableType for FlatMapLatest<S, F>
where
  S: ObservableType,
  F: FnMut(S::Item) -> B,
  B: ObservableType<Err = S::Err>,
{
  type Item = B::Item;
  type Err = S::Err;
}

#[doc(hidden)]
#[derive(Default)]
pub struct FlatMapLatestState {
  /// Id of the live inner and its subscription, `None` while subscribing.
  current: Option<(usize, Option<BoxedDisposable>)>,
  next_id: usize,
  outer_completed: bool,
  closed: bool,
}

impl FlatMapLatestState {
  fn is_current(&self, id: usize) -> bool {
    !self.closed && self.current.as_ref().is_some_and(|(current, _)| *current == id)
  }

  fn close(&mut self) -> Option<BoxedDisposable> {
    self.closed = true;
    self.current.take().and_then(|(_, unsub)| unsub)
  }
}

#[doc(hidden)]
pub struct FlatMapLatestOuterObserver<O, F, Item, Err> {
  observer: SerializedObserver<O, Item, Err>,
  state: MutRc<FlatMapLatestState>,
  func: F,
}

#[doc(hidden)]
pub struct FlatMapLatestInnerObserver<O, Item, Err> {
  observer: SerializedObserver<O, Item, Err>,
  state: MutRc<FlatMapLatestState>,
  id: usize,
}

/// Releases the live inner subscription.
pub struct FlatMapLatestDisposable(MutRc<FlatMapLatestState>);

impl Disposable for FlatMapLatestDisposable {
  fn dispose(self) {
    let current = self.0.rc_deref_mut().close();
    current.dispose();
  }

  fn is_disposed(&self) -> bool { self.0.try_rc_deref().is_some_and(|st| st.closed) }
}

impl<S, F, B, O> CoreObservable<O> for FlatMapLatest<S, F>
where
  S: ObservableType,
  B: ObservableType<Err = <S as ObservableType>::Err>,
  S: CoreObservable<
    FlatMapLatestOuterObserver<O, F, <B as ObservableType>::Item, <S as ObservableType>::Err>,
  >,
  F: FnMut(<S as ObservableType>::Item) -> B,
  B: CoreObservable<
    FlatMapLatestInnerObserver<O, <B as ObservableType>::Item, <S as ObservableType>::Err>,
  >,
{
  type Unsub = TupleDisposable<S::Unsub, FlatMapLatestDisposable>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let FlatMapLatest { source, func } = self;
    let state = MutRc::own(FlatMapLatestState::default());
    let outer = FlatMapLatestOuterObserver {
      observer: SerializedObserver::new(observer),
      state: state.clone(),
      func,
    };
    let unsub = source.actual_subscribe(outer);
    TupleDisposable::new(unsub, FlatMapLatestDisposable(state))
  }
}

impl<O, F, Item, Err, B, BItem> Observer<Item, Err>
  for FlatMapLatestOuterObserver<O, F, BItem, Err>
where
  O: Observer<BItem, Err>,
  F: FnMut(Item) -> B,
  B: CoreObservable<FlatMapLatestInnerObserver<O, BItem, Err>, Item = BItem, Err = Err>,
  B::Unsub: 'static,
{
  fn next(&mut self, value: Item) {
    if self.is_closed() {
      return;
    }
    let inner = (self.func)(value);
    let (id, previous) = {
      let mut state = self.state.rc_deref_mut();
      let id = state.next_id;
      state.next_id += 1;
      let previous = state.current.replace((id, None));
      (id, previous.and_then(|(_, unsub)| unsub))
    };
    previous.dispose();

    let inner_observer =
      FlatMapLatestInnerObserver { observer: self.observer.clone(), state: self.state.clone(), id };
    let unsub = inner.actual_subscribe(inner_observer);

    let mut state = self.state.rc_deref_mut();
    if state.is_current(id) {
      if let Some((_, slot)) = state.current.as_mut() {
        *slot = Some(BoxedDisposable::new(unsub));
      }
    } else {
      drop(state);
      unsub.dispose();
    }
  }

  fn error(self, err: Err) {
    let current = self.state.rc_deref_mut().close();
    self.observer.error(err);
    current.dispose();
  }

  fn complete(self) {
    let done = {
      let mut state = self.state.rc_deref_mut();
      state.outer_completed = true;
      let done = !state.closed && state.current.is_none();
      state.closed |= done;
      done
    };
    if done {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<O, Item, Err> Observer<Item, Err> for FlatMapLatestInnerObserver<O, Item, Err>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.state.rc_deref().is_current(self.id) {
      self.observer.next(value);
    }
  }

  fn error(self, err: Err) {
    let current = {
      let mut state = self.state.rc_deref_mut();
      if !state.is_current(self.id) {
        return;
      }
      state.close()
    };
    self.observer.error(err);
    current.dispose();
  }

  fn complete(self) {
    let (finished, done) = {
      let mut state = self.state.rc_deref_mut();
      if !state.is_current(self.id) {
        return;
      }
      let finished = state.current.take().and_then(|(_, unsub)| unsub);
      let done = state.outer_completed;
      state.closed |= done;
      (finished, done)
    };
    finished.dispose();
    if done {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool {
    let current = self.state.try_rc_deref().map_or(true, |state| state.is_current(self.id));
    !current || self.observer.is_closed()
  }
}
