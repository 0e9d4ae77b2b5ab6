use std::marker::PhantomData;

use crate::{
  disposable::Disposable,
  observable::{CoreObservable, ObservableType},
  observer::{Emitter, Observer},
};

/// Creates an observable from a producer function.
///
/// The producer runs once per subscription. It receives an [`Emitter`] to push
/// events through and returns the [`Disposable`] that releases whatever it
/// set up; that disposable is released when the subscription ends, by a
/// terminal event or by disposal. Anything emitted after `error` or
/// `complete` is dropped.
///
/// ```
/// use std::convert::Infallible;
///
/// use rxkit::prelude::*;
///
/// observable::create(|emitter: &mut dyn Emitter<i32, Infallible>| {
///   emitter.next(1);
///   emitter.next(2);
///   emitter.complete();
///   emitter.next(3); // dropped
/// })
/// .subscribe(|v| println!("{v}"));
/// ```
pub fn create<Item, Err, F, D>(producer: F) -> Create<F, Item, Err>
where
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> D,
  D: Disposable,
{
  Create { producer, _marker: PhantomData }
}

/// Like [`create`], but the producer can fail. An `Err` returned by the
/// producer is emitted as the stream's error, unless a terminal event was
/// already emitted.
pub fn try_create<Item, Err, F, D>(producer: F) -> TryCreate<F, Item, Err>
where
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> Result<D, Err>,
  D: Disposable,
{
  TryCreate { producer, _marker: PhantomData }
}

pub struct Create<F, Item, Err> {
  producer: F,
  _marker: PhantomData<fn() -> (Item, Err)>,
}

pub struct TryCreate<F, Item, Err> {
  producer: F,
  _marker: PhantomData<fn() -> (Item, Err)>,
}

impl<F: Clone, Item, Err> Clone for Create<F, Item, Err> {
  fn clone(&self) -> Self { Create { producer: self.producer.clone(), _marker: PhantomData } }
}

impl<F: Clone, Item, Err> Clone for TryCreate<F, Item, Err> {
  fn clone(&self) -> Self { TryCreate { producer: self.producer.clone(), _marker: PhantomData } }
}

impl<F, Item, Err> ObservableType for Create<F, Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<F, Item, Err> ObservableType for TryCreate<F, Item, Err> {
  type Item = Item;
  type Err = Err;
}

/// Emitter over an observer slot that empties on the first terminal event.
struct CreateEmitter<O>(Option<O>);

impl<O, Item, Err> Emitter<Item, Err> for CreateEmitter<O>
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) {
    if let Some(observer) = &mut self.0 {
      observer.next(value);
    }
  }

  #[inline]
  fn error(&mut self, err: Err) {
    if let Some(observer) = self.0.take() {
      observer.error(err);
    }
  }

  #[inline]
  fn complete(&mut self) {
    if let Some(observer) = self.0.take() {
      observer.complete();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
}

impl<F, Item, Err, D, O> CoreObservable<O> for Create<F, Item, Err>
where
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> D,
  D: Disposable,
  O: Observer<Item, Err>,
{
  type Unsub = D;

  fn actual_subscribe(self, observer: O) -> D {
    let mut emitter = CreateEmitter(Some(observer));
    (self.producer)(&mut emitter)
  }
}

impl<F, Item, Err, D, O> CoreObservable<O> for TryCreate<F, Item, Err>
where
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> Result<D, Err>,
  D: Disposable,
  O: Observer<Item, Err>,
{
  type Unsub = Option<D>;

  fn actual_subscribe(self, observer: O) -> Option<D> {
    let mut emitter = CreateEmitter(Some(observer));
    match (self.producer)(&mut emitter) {
      Ok(teardown) => Some(teardown),
      Err(err) => {
        emitter.error(err);
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, convert::Infallible, rc::Rc};

  use crate::prelude::*;

  #[rxkit_macro::test]
  fn nothing_after_terminal() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    observable::create(|emitter: &mut dyn Emitter<&'static str, &'static str>| {
      emitter.next("1");
      emitter.error("boom");
      emitter.next("2");
      emitter.complete();
    })
    .subscribe_event(move |e| c_log.borrow_mut().push(e));

    assert_eq!(*log.borrow(), vec![Event::Next("1"), Event::Error("boom")]);
  }

  #[rxkit_macro::test]
  fn teardown_runs_after_synchronous_completion() {
    let log = Rc::new(RefCell::new(vec![]));
    let (c_log, d_log) = (log.clone(), log.clone());
    observable::create(move |emitter: &mut dyn Emitter<&'static str, Infallible>| {
      emitter.next("1");
      emitter.complete();
      ClosureDisposable(move || d_log.borrow_mut().push("teardown"))
    })
    .subscribe(move |v| c_log.borrow_mut().push(v));

    assert_eq!(*log.borrow(), vec!["1", "teardown"]);
  }

  #[rxkit_macro::test]
  fn teardown_runs_on_dispose() {
    let hits = Rc::new(RefCell::new(0));
    let c_hits = hits.clone();
    let subscription = observable::create(move |_: &mut dyn Emitter<i32, Infallible>| {
      ClosureDisposable(move || *c_hits.borrow_mut() += 1)
    })
    .subscribe(|_| {});

    assert_eq!(*hits.borrow(), 0);
    subscription.dispose();
    assert_eq!(*hits.borrow(), 1);
  }

  #[rxkit_macro::test]
  fn failed_producer_becomes_error_event() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    observable::try_create(|emitter: &mut dyn Emitter<i32, String>| {
      emitter.next(1);
      "x".parse::<i32>().map_err(|e| e.to_string())?;
      emitter.complete();
      Ok(())
    })
    .subscribe_event(move |e| c_log.borrow_mut().push(e));

    assert_eq!(
      *log.borrow(),
      vec![Event::Next(1), Event::Error("invalid digit found in string".to_owned())]
    );
  }

  #[rxkit_macro::test]
  fn producer_can_stop_when_closed() {
    let produced = Rc::new(RefCell::new(0));
    let c_produced = produced.clone();
    observable::create(move |emitter: &mut dyn Emitter<i32, Infallible>| {
      let mut i = 0;
      while !emitter.is_closed() {
        emitter.next(i);
        i += 1;
      }
      *c_produced.borrow_mut() = i;
    })
    .take(3)
    .subscribe(|_| {});

    assert_eq!(*produced.borrow(), 3);
  }
}
