//! TakeUntil operators
//!
//! Two forms that stop a stream early:
//!
//! - [`TakeUntil`] emits the source values until a second observable (the
//!   notifier) emits a value.
//! - [`TakeUntilWith`] emits the source values until one of them satisfies a
//!   predicate; [`TakeUntilBehavior`] decides whether that value is emitted.

use std::marker::PhantomData;

use crate::{
  disposable::TupleDisposable,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
  rc::MutRc,
};

// ==================== TakeUntil (notifier) ====================

/// Emits the values of `source` until `notifier` emits a value, then
/// completes. An error from `notifier` is forwarded; its completion is
/// ignored.
#[derive(Clone)]
pub struct TakeUntil<S, N> {
  pub source: S,
  pub notifier: N,
}

impl<S: ObservableType, N> ObservableType for TakeUntil<S, N> {
  type Item = S::Item;
  type Err = S::Err;
}

/// How a notifier that fired mid-delivery ends the output.
enum Stop<Err> {
  Complete,
  Error(Err),
}

/// Observer for the source observable
///
/// A notifier that fires while this observer is delivering a value (from a
/// downstream callback, say) cannot reach the busy downstream observer. It
/// records a `Stop` instead, which the source observer carries out as soon as
/// the value in flight has been handed on.
pub struct TakeUntilObserver<O, Err> {
  observer: MutRc<Option<O>>,
  stopped: MutRc<Option<Stop<Err>>>,
}

/// Observer for the notifier observable
///
/// `Item` is the source's item type, needed to name the `Observer` impl the
/// shared downstream observer is completed through.
pub struct TakeUntilNotifierObserver<O, Item, Err> {
  observer: MutRc<Option<O>>,
  stopped: MutRc<Option<Stop<Err>>>,
  _item: PhantomData<fn(Item)>,
}

impl<O, Item, Err> Observer<Item, Err> for TakeUntilObserver<O, Err>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    self.observer.next(value);
    let stopped = self.stopped.rc_deref_mut().take();
    if let Some(stopped) = stopped {
      let observer = self.observer.rc_deref_mut().take();
      match stopped {
        Stop::Complete => Observer::<Item, Err>::complete(observer),
        Stop::Error(err) => Observer::<Item, Err>::error(observer, err),
      }
    }
  }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) { self.observer.complete(); }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<O, Item, Err> TakeUntilNotifierObserver<O, Item, Err>
where
  O: Observer<Item, Err>,
{
  /// End the output now, or leave `stop` for the source observer if it is
  /// delivering a value right now.
  fn stop(&self, stop: Stop<Err>) {
    let Some(mut slot) = self.observer.try_rc_deref_mut() else {
      let mut stopped = self.stopped.rc_deref_mut();
      if stopped.is_none() {
        *stopped = Some(stop);
      }
      return;
    };
    let observer = slot.take();
    drop(slot);
    match stop {
      Stop::Complete => Observer::<Item, Err>::complete(observer),
      Stop::Error(err) => Observer::<Item, Err>::error(observer, err),
    }
  }
}

impl<O, Item, NItem, Err> Observer<NItem, Err> for TakeUntilNotifierObserver<O, Item, Err>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, _value: NItem) { self.stop(Stop::Complete); }

  fn error(self, err: Err) { self.stop(Stop::Error(err)); }

  fn complete(self) {}

  fn is_closed(&self) -> bool {
    self.stopped.rc_deref().is_some() || Observer::<Item, Err>::is_closed(&self.observer)
  }
}

impl<S, N, O> CoreObservable<O> for TakeUntil<S, N>
where
  S: ObservableType,
  S: CoreObservable<TakeUntilObserver<O, <S as ObservableType>::Err>>,
  N: CoreObservable<
    TakeUntilNotifierObserver<O, <S as ObservableType>::Item, <S as ObservableType>::Err>,
    Err = <S as ObservableType>::Err,
  >,
  O: Observer<<S as ObservableType>::Item, <S as ObservableType>::Err>,
{
  type Unsub = TupleDisposable<S::Unsub, N::Unsub>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let TakeUntil { source, notifier } = self;
    let observer = MutRc::own(Some(observer));
    let stopped = MutRc::own(None);

    // The notifier goes first, so one that fires while being subscribed stops
    // the source before it emits anything.
    let notifier_unsub = notifier.actual_subscribe(TakeUntilNotifierObserver {
      observer: observer.clone(),
      stopped: stopped.clone(),
      _item: PhantomData,
    });
    let source_unsub = source.actual_subscribe(TakeUntilObserver { observer, stopped });
    TupleDisposable::new(source_unsub, notifier_unsub)
  }
}

// ==================== TakeUntilWith (predicate) ====================

/// Whether the value that satisfies a `take_until_with` predicate is emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TakeUntilBehavior {
  /// Emit the matching value, then complete.
  Inclusive,
  /// Complete without emitting the matching value.
  Exclusive,
}

#[derive(Clone)]
pub struct TakeUntilWith<S, F> {
  pub source: S,
  pub behavior: TakeUntilBehavior,
  pub predicate: F,
}

impl<S: ObservableType, F> ObservableType for TakeUntilWith<S, F> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct TakeUntilWithObserver<O, F> {
  observer: Option<O>,
  behavior: TakeUntilBehavior,
  predicate: F,
}

impl<O, F, Item, Err> Observer<Item, Err> for TakeUntilWithObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    let Some(observer) = self.observer.as_mut() else { return };
    if !(self.predicate)(&value) {
      observer.next(value);
      return;
    }
    if self.behavior == TakeUntilBehavior::Inclusive {
      observer.next(value);
    }
    self.observer.take().complete();
  }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) { self.observer.complete(); }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, F, O> CoreObservable<O> for TakeUntilWith<S, F>
where
  S: CoreObservable<TakeUntilWithObserver<O, F>>,
  F: FnMut(&S::Item) -> bool,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let TakeUntilWith { source, behavior, predicate } = self;
    source.actual_subscribe(TakeUntilWithObserver { observer: Some(observer), behavior, predicate })
  }
}
