//! `Single`: a stream that ends with exactly one of a value or an error.
//!
//! A `Single` wraps an ordinary observable that is known to emit one value
//! followed by completion, or one error. It still is an observable, so every
//! operator applies, but its own `subscribe` takes one callback for each
//! outcome and its `map` keeps the result a `Single`.
//!
//! ```rust
//! use rxkit::prelude::*;
//!
//! let mut joined = String::new();
//! of!["a", "b", "c"]
//!   .to_array()
//!   .map(|parts| parts.join("-"))
//!   .subscribe(|text| joined = text, |never| match never {});
//! assert_eq!(joined, "a-b-c");
//! ```

use std::marker::PhantomData;

use crate::{
  disposable::Disposable,
  observable::{just, throw_err, CoreObservable, Just, Observable, ObservableType, ThrowErr},
  observer::Observer,
  ops::map::Map,
  subscription::{SinkObserver, Subscription},
};

/// The outcome of a `Single`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleEvent<Item, Err> {
  Success(Item),
  Failure(Err),
}

#[derive(Clone)]
pub struct Single<S>(S);

impl<S> Single<S> {
  /// Callers guarantee `source` emits one value then completes, or errors.
  pub(crate) fn new(source: S) -> Self { Single(source) }

  /// Drop the `Single` guarantee and treat it as a plain observable.
  #[inline]
  pub fn as_observable(self) -> S { self.0 }
}

impl<Item> Single<Just<Item>> {
  /// A `Single` that succeeds with `value`.
  pub fn just(value: Item) -> Self { Single(just(value)) }
}

impl<Item, Err> Single<ThrowErr<Item, Err>> {
  /// A `Single` that fails with `err`.
  pub fn error(err: Err) -> Self { Single(throw_err(err)) }
}

impl<F, Item, Err> Single<SingleCreate<F, Item, Err>> {
  /// Build a `Single` from a producer.
  ///
  /// The producer runs once per subscription and reports the outcome through
  /// the [`SingleEmitter`]; only the first `success` or `error` counts. The
  /// returned [`Disposable`] is released when the subscription ends.
  ///
  /// ```rust
  /// use rxkit::prelude::*;
  ///
  /// let mut outcome = None;
  /// Single::create(|emitter: &mut dyn SingleEmitter<u32, String>| {
  ///   emitter.success(42);
  ///   emitter.error("ignored".to_owned());
  /// })
  /// .subscribe_event(|e| outcome = Some(e));
  /// assert_eq!(outcome, Some(SingleEvent::Success(42)));
  /// ```
  pub fn create<D>(producer: F) -> Self
  where
    F: FnOnce(&mut dyn SingleEmitter<Item, Err>) -> D,
    D: Disposable,
  {
    Single(SingleCreate { producer, _marker: PhantomData })
  }
}

impl<S: ObservableType> Single<S> {
  /// Transform the success value, keeping the result a `Single`.
  #[inline]
  pub fn map<B, F>(self, f: F) -> Single<Map<S, F>>
  where
    F: FnMut(S::Item) -> B,
  {
    Single(Map { source: self.0, func: f })
  }

  /// Subscribe with one callback per outcome.
  pub fn subscribe<N, E>(self, on_success: N, on_error: E) -> Subscription
  where
    N: FnOnce(S::Item),
    E: FnOnce(S::Err),
    S: CoreObservable<SinkObserver<SingleObserver<N, E>>>,
    <S as CoreObservable<SinkObserver<SingleObserver<N, E>>>>::Unsub: 'static,
  {
    self
      .0
      .subscribe_with(SingleObserver { on_success: Some(on_success), on_error: Some(on_error) })
  }

  /// Subscribe with a single handler receiving the [`SingleEvent`].
  pub fn subscribe_event<F>(self, handler: F) -> Subscription
  where
    F: FnOnce(SingleEvent<S::Item, S::Err>),
    S: CoreObservable<SinkObserver<SingleEventObserver<F>>>,
    <S as CoreObservable<SinkObserver<SingleEventObserver<F>>>>::Unsub: 'static,
  {
    self.0.subscribe_with(SingleEventObserver(Some(handler)))
  }
}

impl<S: ObservableType> ObservableType for Single<S> {
  type Item = S::Item;
  type Err = S::Err;
}

impl<S, O> CoreObservable<O> for Single<S>
where
  S: CoreObservable<O>,
{
  type Unsub = S::Unsub;

  #[inline]
  fn actual_subscribe(self, observer: O) -> Self::Unsub { self.0.actual_subscribe(observer) }
}

/// The outcome channel handed to `Single::create` producers.
pub trait SingleEmitter<Item, Err> {
  fn success(&mut self, value: Item);
  fn error(&mut self, err: Err);
}

pub struct SingleCreate<F, Item, Err> {
  producer: F,
  _marker: PhantomData<fn() -> (Item, Err)>,
}

impl<F: Clone, Item, Err> Clone for SingleCreate<F, Item, Err> {
  fn clone(&self) -> Self { SingleCreate { producer: self.producer.clone(), _marker: PhantomData } }
}

impl<F, Item, Err> ObservableType for SingleCreate<F, Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<F, Item, Err, D, O> CoreObservable<O> for SingleCreate<F, Item, Err>
where
  F: FnOnce(&mut dyn SingleEmitter<Item, Err>) -> D,
  D: Disposable,
  O: Observer<Item, Err>,
{
  type Unsub = D;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let mut emitter = SingleCreateEmitter(Some(observer));
    (self.producer)(&mut emitter)
  }
}

struct SingleCreateEmitter<O>(Option<O>);

impl<O, Item, Err> SingleEmitter<Item, Err> for SingleCreateEmitter<O>
where
  O: Observer<Item, Err>,
{
  fn success(&mut self, value: Item) {
    if let Some(mut observer) = self.0.take() {
      observer.next(value);
      observer.complete();
    }
  }

  fn error(&mut self, err: Err) {
    if let Some(observer) = self.0.take() {
      observer.error(err);
    }
  }
}

#[doc(hidden)]
pub struct SingleObserver<N, E> {
  on_success: Option<N>,
  on_error: Option<E>,
}

impl<N, E, Item, Err> Observer<Item, Err> for SingleObserver<N, E>
where
  N: FnOnce(Item),
  E: FnOnce(Err),
{
  fn next(&mut self, value: Item) {
    if let Some(on_success) = self.on_success.take() {
      self.on_error = None;
      on_success(value);
    }
  }

  fn error(self, err: Err) {
    if let Some(on_error) = self.on_error {
      on_error(err);
    }
  }

  fn complete(self) {}

  fn is_closed(&self) -> bool { self.on_success.is_none() && self.on_error.is_none() }
}

#[doc(hidden)]
pub struct SingleEventObserver<F>(Option<F>);

impl<F, Item, Err> Observer<Item, Err> for SingleEventObserver<F>
where
  F: FnOnce(SingleEvent<Item, Err>),
{
  fn next(&mut self, value: Item) {
    if let Some(handler) = self.0.take() {
      handler(SingleEvent::Success(value));
    }
  }

  fn error(self, err: Err) {
    if let Some(handler) = self.0 {
      handler(SingleEvent::Failure(err));
    }
  }

  fn complete(self) {}

  fn is_closed(&self) -> bool { self.0.is_none() }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[derive(Debug, Clone, PartialEq)]
  enum FileReadError {
    FileNotFound,
  }

  fn load_text(
    name: &'static str,
  ) -> Single<
    SingleCreate<impl FnOnce(&mut dyn SingleEmitter<String, FileReadError>) + Clone, String, FileReadError>,
  > {
    Single::create(move |emitter: &mut dyn SingleEmitter<String, FileReadError>| match name {
      "Copyright" => emitter.success("Copyright 2024".to_owned()),
      _ => emitter.error(FileReadError::FileNotFound),
    })
  }

  #[rxkit_macro::test]
  fn create_reports_success_or_failure() {
    let log = Rc::new(RefCell::new(vec![]));
    for name in ["Copyright", "Missing"] {
      let c_log = log.clone();
      load_text(name).subscribe_event(move |e| c_log.borrow_mut().push(e));
    }
    assert_eq!(
      *log.borrow(),
      vec![
        SingleEvent::Success("Copyright 2024".to_owned()),
        SingleEvent::Failure(FileReadError::FileNotFound)
      ]
    );
  }

  #[rxkit_macro::test]
  fn subscribe_routes_each_outcome() {
    let log = Rc::new(RefCell::new(vec![]));
    let (c_ok, c_err) = (log.clone(), log.clone());
    load_text("Missing").subscribe(
      move |text| c_ok.borrow_mut().push(text),
      move |err| c_err.borrow_mut().push(format!("{err:?}")),
    );
    assert_eq!(*log.borrow(), vec!["FileNotFound"]);
  }

  #[rxkit_macro::test]
  fn only_first_outcome_counts() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    Single::create(|emitter: &mut dyn SingleEmitter<i32, &'static str>| {
      emitter.error("first");
      emitter.success(1);
      emitter.error("second");
    })
    .as_observable()
    .subscribe_event(move |e| c_log.borrow_mut().push(e));

    assert_eq!(*log.borrow(), vec![Event::Error("first")]);
  }

  #[rxkit_macro::test]
  fn map_keeps_single() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    Single::just(20)
      .map(|v| v + 1)
      .map(|v| v * 2)
      .subscribe_event(move |e| c_log.borrow_mut().push(e));
    assert_eq!(*log.borrow(), vec![SingleEvent::Success(42)]);
  }

  #[rxkit_macro::test]
  fn error_constructor_fails() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    Single::<ThrowErr<i32, _>>::error("nope").subscribe_event(move |e| c_log.borrow_mut().push(e));
    assert_eq!(*log.borrow(), vec![SingleEvent::Failure("nope")]);
  }

  #[rxkit_macro::test]
  fn operators_apply_to_single() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    Single::just(3)
      .filter(|v| *v > 5)
      .subscribe_event(move |e| c_log.borrow_mut().push(e));
    assert_eq!(*log.borrow(), vec![Event::Completed]);
  }
}
