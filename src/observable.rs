//! Observable traits and the operator surface.
//!
//! Three layers work together:
//!
//! - [`ObservableType`] names the item and error types a source emits.
//! - [`CoreObservable`] connects a source to one concrete observer type and
//!   hands back the [`Disposable`] that tears the connection down. Every
//!   operator implements it by wrapping the observer and subscribing its
//!   upstream.
//! - [`Observable`] is the user-facing extension trait, implemented for every
//!   `ObservableType`. It carries the operators and the `subscribe*` family.
//!
//! Observables are cold descriptions: subscribing consumes the value and runs
//! production for that subscriber. Clone the observable to subscribe again.

use crate::{
  disposable::Disposable,
  error::RxError,
  event::{Event, EventType},
  observer::{AllObserver, BoxedObserver, EventObserver, FnMutObserver, Observer},
  ops::{
    as_single::AsSingle,
    dematerialize::Dematerialize,
    distinct_until_changed::{DistinctUntilChanged, DistinctUntilChangedBy},
    element_at::ElementAt,
    enumerate::Enumerate,
    filter::{Filter, TryFilter},
    filter_map::FilterMap,
    flat_map::FlatMap,
    flat_map_latest::FlatMapLatest,
    ignore_elements::IgnoreElements,
    lifecycle::{OnComplete, OnDisposed},
    map::{Map, TryMap},
    map_err::MapErr,
    materialize::Materialize,
    skip::Skip,
    skip_until::SkipUntil,
    skip_while::SkipWhile,
    take::Take,
    take_until::{TakeUntil, TakeUntilBehavior, TakeUntilWith},
    take_while::TakeWhile,
    to_array::ToArray,
  },
  single::Single,
  subscription::{SinkObserver, Subscription},
};

mod boxed;
mod create;
mod defer;
mod from_iter;
mod of;
mod range;
mod trivial;

pub use boxed::*;
pub use create::*;
pub use defer::*;
pub use from_iter::*;
pub use of::*;
pub use range::*;
pub use trivial::*;

/// The item and error types a source emits.
pub trait ObservableType {
  type Item;
  type Err;
}

/// A source that can be connected to an observer of type `O`.
///
/// `actual_subscribe` runs whatever production happens at subscription time
/// (all of it, for synchronous sources) and returns the handle that releases
/// the connection.
pub trait CoreObservable<O>: ObservableType {
  type Unsub: Disposable;

  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}

/// Operators and subscription entry points, available on every observable.
pub trait Observable: ObservableType + Sized {
  // ==================== Subscribing ====================

  /// Subscribe with a handler for values only. Errors and completion are
  /// ignored.
  ///
  /// ```rust
  /// use std::{cell::RefCell, rc::Rc};
  ///
  /// use rxkit::prelude::*;
  ///
  /// let seen = Rc::new(RefCell::new(vec![]));
  /// let c_seen = seen.clone();
  /// of![1, 2, 3].subscribe(move |v| c_seen.borrow_mut().push(v));
  /// assert_eq!(*seen.borrow(), vec![1, 2, 3]);
  /// ```
  fn subscribe<F>(self, next: F) -> Subscription
  where
    F: FnMut(Self::Item),
    Self: CoreObservable<SinkObserver<FnMutObserver<F>>>,
    <Self as CoreObservable<SinkObserver<FnMutObserver<F>>>>::Unsub: 'static,
  {
    self.subscribe_with(FnMutObserver(next))
  }

  /// Subscribe with one handler per event kind.
  fn subscribe_all<N, E, C>(self, next: N, error: E, complete: C) -> Subscription
  where
    N: FnMut(Self::Item),
    E: FnOnce(Self::Err),
    C: FnOnce(),
    Self: CoreObservable<SinkObserver<AllObserver<N, E, C>>>,
    <Self as CoreObservable<SinkObserver<AllObserver<N, E, C>>>>::Unsub: 'static,
  {
    self.subscribe_with(AllObserver { next, error, complete })
  }

  /// Subscribe with a single handler that receives every [`Event`].
  fn subscribe_event<F>(self, handler: F) -> Subscription
  where
    F: FnMut(Event<Self::Item, Self::Err>),
    Self: CoreObservable<SinkObserver<EventObserver<F>>>,
    <Self as CoreObservable<SinkObserver<EventObserver<F>>>>::Unsub: 'static,
  {
    self.subscribe_with(EventObserver(handler))
  }

  /// Subscribe any [`Observer`], a subject for instance.
  fn subscribe_with<O>(self, observer: O) -> Subscription
  where
    O: Observer<Self::Item, Self::Err>,
    Self: CoreObservable<SinkObserver<O>>,
    <Self as CoreObservable<SinkObserver<O>>>::Unsub: 'static,
  {
    tracing::trace!("subscribe");
    let subscription = Subscription::new();
    let unsub = self.actual_subscribe(SinkObserver::new(observer, subscription.clone()));
    subscription.attach(unsub);
    subscription
  }

  // ==================== Filtering ====================

  /// Emit only the values for which `filter` returns true.
  #[inline]
  fn filter<F>(self, filter: F) -> Filter<Self, F>
  where
    F: FnMut(&Self::Item) -> bool,
  {
    Filter { source: self, filter }
  }

  /// Like `filter`, but the predicate can fail; a failure terminates the
  /// stream with that error.
  #[inline]
  fn try_filter<F>(self, filter: F) -> TryFilter<Self, F>
  where
    F: FnMut(&Self::Item) -> Result<bool, Self::Err>,
  {
    TryFilter { source: self, filter }
  }

  /// Ignore the first `count` values.
  #[inline]
  fn skip(self, count: usize) -> Skip<Self> { Skip { source: self, count } }

  /// Ignore values while `predicate` holds; once it fails, emit that value
  /// and everything after it.
  #[inline]
  fn skip_while<F>(self, predicate: F) -> SkipWhile<Self, F>
  where
    F: FnMut(&Self::Item) -> bool,
  {
    SkipWhile { source: self, predicate }
  }

  /// Ignore values until `notifier` emits any event.
  #[inline]
  fn skip_until<N>(self, notifier: N) -> SkipUntil<Self, N>
  where
    N: ObservableType,
  {
    SkipUntil { source: self, notifier }
  }

  /// Emit the first `count` values, then complete.
  #[inline]
  fn take(self, count: usize) -> Take<Self> { Take { source: self, count } }

  /// Emit values while `predicate` holds; complete on the first value that
  /// fails it, without emitting that value.
  #[inline]
  fn take_while<F>(self, predicate: F) -> TakeWhile<Self, F>
  where
    F: FnMut(&Self::Item) -> bool,
  {
    TakeWhile { source: self, predicate }
  }

  /// Emit values until `notifier` emits a value, then complete. An error
  /// from `notifier` is forwarded.
  #[inline]
  fn take_until<N>(self, notifier: N) -> TakeUntil<Self, N>
  where
    N: ObservableType<Err = Self::Err>,
  {
    TakeUntil { source: self, notifier }
  }

  /// Emit values until `predicate` holds, then complete. With
  /// [`TakeUntilBehavior::Inclusive`] the matching value is emitted before
  /// completing.
  #[inline]
  fn take_until_with<F>(self, behavior: TakeUntilBehavior, predicate: F) -> TakeUntilWith<Self, F>
  where
    F: FnMut(&Self::Item) -> bool,
  {
    TakeUntilWith { source: self, behavior, predicate }
  }

  /// Suppress values equal to the one emitted just before them.
  #[inline]
  fn distinct_until_changed(self) -> DistinctUntilChanged<Self>
  where
    Self::Item: PartialEq + Clone,
  {
    DistinctUntilChanged { source: self }
  }

  /// Suppress values for which `comparator(previous, current)` returns true.
  #[inline]
  fn distinct_until_changed_by<F>(self, comparator: F) -> DistinctUntilChangedBy<Self, F>
  where
    Self::Item: Clone,
    F: FnMut(&Self::Item, &Self::Item) -> bool,
  {
    DistinctUntilChangedBy { source: self, comparator }
  }

  /// Emit only the value at zero-based `index`, then complete.
  #[inline]
  fn element_at(self, index: usize) -> ElementAt<Self> { ElementAt { source: self, index } }

  /// Drop every value; forward only the terminal event.
  #[inline]
  fn ignore_elements(self) -> IgnoreElements<Self> { IgnoreElements { source: self } }

  // ==================== Transforming ====================

  #[inline]
  fn map<B, F>(self, f: F) -> Map<Self, F>
  where
    F: FnMut(Self::Item) -> B,
  {
    Map { source: self, func: f }
  }

  /// Like `map`, but the projection can fail; a failure terminates the stream
  /// with that error.
  #[inline]
  fn try_map<B, F>(self, f: F) -> TryMap<Self, F>
  where
    F: FnMut(Self::Item) -> Result<B, Self::Err>,
  {
    TryMap { source: self, func: f }
  }

  /// Convert the error type.
  ///
  /// An infallible stream can be given any error type with
  /// `.map_err(|never| match never {})`.
  #[inline]
  fn map_err<E, F>(self, f: F) -> MapErr<Self, F>
  where
    F: FnOnce(Self::Err) -> E,
  {
    MapErr { source: self, func: f }
  }

  /// Map each value and drop the `None` results.
  #[doc(alias = "compact_map")]
  #[inline]
  fn filter_map<B, F>(self, f: F) -> FilterMap<Self, F>
  where
    F: FnMut(Self::Item) -> Option<B>,
  {
    FilterMap { source: self, func: f }
  }

  /// Pair each value with its zero-based index.
  #[inline]
  fn enumerate(self) -> Enumerate<Self> { Enumerate { source: self } }

  /// Collect every value and emit them as one `Vec` when the source
  /// completes.
  #[inline]
  fn to_array(self) -> Single<ToArray<Self>> { Single::new(ToArray { source: self }) }

  /// Project each value to an inner observable and merge the inner streams.
  #[inline]
  fn flat_map<B, F>(self, f: F) -> FlatMap<Self, F>
  where
    F: FnMut(Self::Item) -> B,
    B: ObservableType<Err = Self::Err>,
  {
    FlatMap { source: self, func: f }
  }

  /// Project each value to an inner observable, keeping only the most
  /// recent inner subscription alive.
  #[doc(alias = "switch_map")]
  #[inline]
  fn flat_map_latest<B, F>(self, f: F) -> FlatMapLatest<Self, F>
  where
    F: FnMut(Self::Item) -> B,
    B: ObservableType<Err = Self::Err>,
  {
    FlatMapLatest { source: self, func: f }
  }

  /// Turn every event, terminal ones included, into a value.
  #[inline]
  fn materialize(self) -> Materialize<Self> { Materialize { source: self } }

  /// Turn a stream of events back into the events themselves.
  #[inline]
  fn dematerialize(self) -> Dematerialize<Self>
  where
    Self::Item: EventType<Err = Self::Err>,
  {
    Dematerialize { source: self }
  }

  /// View a stream that emits exactly one value as a [`Single`].
  ///
  /// Completing without a value fails with [`RxError::NoElements`]; a second
  /// value fails with [`RxError::MoreThanOneElement`].
  #[inline]
  fn as_single(self) -> Single<AsSingle<Self>>
  where
    Self::Err: From<RxError>,
  {
    Single::new(AsSingle { source: self })
  }

  // ==================== Lifecycle ====================

  /// Run `f` when the source completes, before completion is forwarded.
  #[inline]
  fn on_complete<F>(self, f: F) -> OnComplete<Self, F>
  where
    F: FnOnce(),
  {
    OnComplete { source: self, func: f }
  }

  /// Run `f` exactly once when the subscription ends, whether by a terminal
  /// event or by disposal.
  #[inline]
  fn on_disposed<F>(self, f: F) -> OnDisposed<Self, F>
  where
    F: FnOnce() + 'static,
  {
    OnDisposed { source: self, func: f }
  }

  /// Erase the concrete type of this observable.
  fn box_it<'a>(self) -> BoxedObservable<'a, Self::Item, Self::Err>
  where
    Self: CoreObservable<
        BoxedObserver<'a, <Self as ObservableType>::Item, <Self as ObservableType>::Err>,
      > + 'a,
    <Self as CoreObservable<
      BoxedObserver<'a, <Self as ObservableType>::Item, <Self as ObservableType>::Err>,
    >>::Unsub: 'static,
  {
    BoxedObservable::new(self)
  }
}

impl<T: ObservableType> Observable for T {}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[rxkit_macro::test]
  fn subscribe_all_sees_completion() {
    let log = Rc::new(RefCell::new(vec![]));
    let (c_next, c_complete) = (log.clone(), log.clone());
    let subscription = of![1, 2].subscribe_all(
      move |v| c_next.borrow_mut().push(v.to_string()),
      |e| match e {},
      move || c_complete.borrow_mut().push("done".to_owned()),
    );

    assert_eq!(*log.borrow(), vec!["1", "2", "done"]);
    assert!(subscription.is_closed());
  }

  #[rxkit_macro::test]
  fn subscribe_event_sees_error() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    observable::throw_err::<i32, _>("boom").subscribe_event(move |e| c_log.borrow_mut().push(e));

    assert_eq!(*log.borrow(), vec![Event::Error("boom")]);
  }

  #[rxkit_macro::test]
  fn cloned_observable_runs_per_subscription() {
    let total = Rc::new(RefCell::new(0));
    let source = observable::from_iter(vec![1, 2, 3]);
    for _ in 0..2 {
      let c_total = total.clone();
      source.clone().subscribe(move |v| *c_total.borrow_mut() += v);
    }
    assert_eq!(*total.borrow(), 12);
  }
}
