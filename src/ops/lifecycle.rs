//! Lifecycle operators: OnComplete and OnDisposed
//!
//! These operators provide hooks for reacting to the end of a subscription.

use crate::{
  disposable::{Disposable, TupleDisposable},
  observable::{CoreObservable, ObservableType},
  observer::Observer,
  rc::MutRc,
};

// ==================== OnComplete ====================

/// OnComplete operator that executes a callback when the stream completes
///
/// The callback runs before completion is forwarded downstream.
#[derive(Clone)]
pub struct OnComplete<S, F> {
  pub source: S,
  pub func: F,
}

impl<S: ObservableType, F> ObservableType for OnComplete<S, F> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct OnCompleteObserver<O, F> {
  observer: O,
  func: F,
}

impl<O, F, Item, Err> Observer<Item, Err> for OnCompleteObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnOnce(),
{
  fn next(&mut self, value: Item) { self.observer.next(value); }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) {
    (self.func)();
    self.observer.complete();
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, F, O> CoreObservable<O> for OnComplete<S, F>
where
  S: CoreObservable<OnCompleteObserver<O, F>>,
  F: FnOnce(),
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let OnComplete { source, func } = self;
    source.actual_subscribe(OnCompleteObserver { observer, func })
  }
}

// ==================== OnDisposed ====================

/// OnDisposed operator that executes a callback when the subscription ends
///
/// The callback runs exactly once: after a terminal event has been forwarded,
/// or after the upstream has been released by disposal, whichever happens
/// first.
#[derive(Clone)]
pub struct OnDisposed<S, F> {
  pub source: S,
  pub func: F,
}

impl<S: ObservableType, F> ObservableType for OnDisposed<S, F> {
  type Item = S::Item;
  type Err = S::Err;
}

fn run_once<F: FnOnce()>(callback: &MutRc<Option<F>>) {
  let func = callback.rc_deref_mut().take();
  if let Some(func) = func {
    func();
  }
}

pub struct OnDisposedObserver<O, F> {
  observer: O,
  callback: MutRc<Option<F>>,
}

impl<O, F, Item, Err> Observer<Item, Err> for OnDisposedObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnOnce(),
{
  fn next(&mut self, value: Item) { self.observer.next(value); }

  fn error(self, err: Err) {
    self.observer.error(err);
    run_once(&self.callback);
  }

  fn complete(self) {
    self.observer.complete();
    run_once(&self.callback);
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

pub struct OnDisposedDisposable<F>(MutRc<Option<F>>);

impl<F: FnOnce()> Disposable for OnDisposedDisposable<F> {
  fn dispose(self) { run_once(&self.0) }

  fn is_disposed(&self) -> bool { self.0.rc_deref().is_none() }
}

impl<S, F, O> CoreObservable<O> for OnDisposed<S, F>
where
  S: CoreObservable<OnDisposedObserver<O, F>>,
  F: FnOnce(),
{
  type Unsub = TupleDisposable<S::Unsub, OnDisposedDisposable<F>>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let OnDisposed { source, func } = self;
    let callback = MutRc::own(Some(func));
    let unsub = source.actual_subscribe(OnDisposedObserver { observer, callback: callback.clone() });
    TupleDisposable::new(unsub, OnDisposedDisposable(callback))
  }
}
