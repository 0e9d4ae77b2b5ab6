//! SkipUntil operator implementation
//!
//! Ignores the source values until a second observable (the notifier) emits
//! any event.

use std::{cell::Cell, rc::Rc};

use crate::{
  disposable::TupleDisposable,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Ignores the values of `source` until `notifier` emits its first event,
/// then forwards everything.
///
/// Any notifier event opens the gate: a value, an error or completion. The
/// notifier's own values are never forwarded, and neither are its errors.
/// Once the gate is open the notifier observer reports closed, so hot
/// notifiers drop it and cold ones stop producing.
#[derive(Clone)]
pub struct SkipUntil<S, N> {
  pub source: S,
  pub notifier: N,
}

impl<S: ObservableType, N> ObservableType for SkipUntil<S, N> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct SkipUntilObserver<O> {
  observer: O,
  open: Rc<Cell<bool>>,
}

pub struct SkipUntilNotifierObserver {
  open: Rc<Cell<bool>>,
}

impl<O, Item, Err> Observer<Item, Err> for SkipUntilObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.open.get() {
      self.observer.next(value);
    }
  }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) { self.observer.complete(); }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<Item, Err> Observer<Item, Err> for SkipUntilNotifierObserver {
  fn next(&mut self, _value: Item) { self.open.set(true); }

  fn error(self, _err: Err) { self.open.set(true); }

  fn complete(self) { self.open.set(true); }

  fn is_closed(&self) -> bool { self.open.get() }
}

impl<S, N, O> CoreObservable<O> for SkipUntil<S, N>
where
  S: CoreObservable<SkipUntilObserver<O>>,
  N: CoreObservable<SkipUntilNotifierObserver>,
{
  type Unsub = TupleDisposable<S::Unsub, N::Unsub>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let SkipUntil { source, notifier } = self;
    let open = Rc::new(Cell::new(false));
    let notifier_unsub = notifier.actual_subscribe(SkipUntilNotifierObserver { open: open.clone() });
    let source_unsub = source.actual_subscribe(SkipUntilObserver { observer, open });
    TupleDisposable::new(source_unsub, notifier_unsub)
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[rxkit_macro::test]
  fn forwards_after_trigger() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    let subject = PublishSubject::<&str, ()>::new();
    let trigger = PublishSubject::<&str, ()>::new();

    subject
      .clone()
      .skip_until(trigger.clone())
      .subscribe(move |v| c_log.borrow_mut().push(v));

    subject.on_next("A");
    subject.on_next("B");
    trigger.on_next("X");
    subject.on_next("C");
    trigger.on_next("Y");
    subject.on_next("D");

    assert_eq!(*log.borrow(), vec!["C", "D"]);
    assert_eq!(trigger.observer_count(), 0);
  }

  #[rxkit_macro::test]
  fn trigger_completion_opens_gate() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    let subject = PublishSubject::<i32, ()>::new();

    subject
      .clone()
      .skip_until(observable::empty::<()>())
      .subscribe(move |v| c_log.borrow_mut().push(v));

    subject.on_next(1);
    assert_eq!(*log.borrow(), vec![1]);
  }

  #[rxkit_macro::test]
  fn silent_trigger_keeps_gate_closed() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    of![1, 2, 3]
      .skip_until(observable::never::<()>())
      .subscribe_event(move |e| c_log.borrow_mut().push(e));

    assert_eq!(*log.borrow(), vec![Event::Completed]);
  }
}
