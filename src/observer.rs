//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion).

use std::collections::VecDeque;

use crate::{event::Event, rc::MutRc};

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable.
pub trait Observer<Item, Err> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable
  ///
  /// This consumes the observer, as no more values can be emitted after an
  /// error
  fn error(self, err: Err);

  /// Handle completion of the observable
  ///
  /// This consumes the observer, as no more values can be emitted after
  /// completion
  fn complete(self);

  /// Checks if the observer is closed.
  ///
  /// Sources that loop (`from_iter`, `range`) poll this to stop early once a
  /// downstream `take` has finished or the subscription was disposed; subjects
  /// use it to prune finished observers.
  fn is_closed(&self) -> bool;
}

// ============================================================================
// Emitter Trait
// ============================================================================

/// The injection capability handed to `create` producers.
///
/// Unlike `Observer`, every method takes `&mut self`, so a producer can hold a
/// `&mut dyn Emitter` without knowing the concrete observer chain behind it.
/// The framework, not the producer, enforces terminal-once: anything emitted
/// after `error` or `complete` is dropped.
pub trait Emitter<Item, Err> {
  fn next(&mut self, value: Item);
  fn error(&mut self, err: Err);
  fn complete(&mut self);

  /// Whether further emissions would be dropped. Producers that loop can use
  /// it to stop early.
  fn is_closed(&self) -> bool;
}

// ============================================================================
// DynObserver Trait - Object-safe Observer
// ============================================================================

/// Helper trait to enable object-safe Observers (Box<dyn Observer>)
///
/// Standard Observer trait is not object-safe because `error` and `complete`
/// take `self` by value. DynObserver mirrors the interface with boxed
/// receivers.
pub trait DynObserver<Item, Err> {
  fn box_next(&mut self, value: Item);
  fn box_error(self: Box<Self>, err: Err);
  fn box_complete(self: Box<Self>);
  fn box_is_closed(&self) -> bool;
}

impl<T, Item, Err> DynObserver<Item, Err> for T
where
  T: Observer<Item, Err>,
{
  fn box_next(&mut self, value: Item) { self.next(value); }
  fn box_error(self: Box<Self>, err: Err) { self.error(err); }
  fn box_complete(self: Box<Self>) { self.complete(); }
  fn box_is_closed(&self) -> bool { self.is_closed() }
}

/// Boxed observer, used wherever observers of different concrete types must
/// live side by side (subject registries, boxed observables).
pub type BoxedObserver<'a, Item, Err> = Box<dyn DynObserver<Item, Err> + 'a>;

impl<'a, Item, Err> Observer<Item, Err> for BoxedObserver<'a, Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).box_next(value) }

  #[inline]
  fn error(self, err: Err) { self.box_error(err) }

  #[inline]
  fn complete(self) { self.box_complete() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).box_is_closed() }
}

// ============================================================================
// Closure adapters
// ============================================================================

/// Adapts a closure into an observer that only handles values.
///
/// This enables `observable.subscribe(|v| println!("{}", v))`. Errors and
/// completion are no-ops for this observer.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item, Err> Observer<Item, Err> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, v: Item) { (self.0)(v); }

  #[inline]
  fn error(self, _err: Err) {
    tracing::debug!("error dropped: subscriber supplied no error handler");
  }

  #[inline]
  fn complete(self) {}

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// Observer built from one callback per event kind, used by
/// `Observable::subscribe_all`.
pub struct AllObserver<N, E, C> {
  pub next: N,
  pub error: E,
  pub complete: C,
}

impl<N, E, C, Item, Err> Observer<Item, Err> for AllObserver<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  #[inline]
  fn error(self, err: Err) { (self.error)(err); }

  #[inline]
  fn complete(self) { (self.complete)(); }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// Observer funnelling every event through a single handler, used by
/// `Observable::subscribe_event`.
pub struct EventObserver<F>(pub F);

impl<F, Item, Err> Observer<Item, Err> for EventObserver<F>
where
  F: FnMut(Event<Item, Err>),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.0)(Event::Next(value)); }

  #[inline]
  fn error(mut self, err: Err) { (self.0)(Event::Error(err)); }

  #[inline]
  fn complete(mut self) { (self.0)(Event::Completed); }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

// ============================================================================
// Observer implementations for Option and shared Option wrappers
// ============================================================================

/// Option observer - None ignores all events, Some delegates to inner
impl<O, Item, Err> Observer<Item, Err> for Option<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(inner) = self {
      inner.next(value);
    }
  }

  fn error(self, err: Err) {
    if let Some(inner) = self {
      inner.error(err);
    }
  }

  fn complete(self) {
    if let Some(inner) = self {
      inner.complete();
    }
  }

  fn is_closed(&self) -> bool { self.as_ref().map_or(true, |o| o.is_closed()) }
}

/// MutRc<Option<O>> - an observer shared by several upstream subscriptions.
///
/// Terminal events take the inner observer out of the cell before invoking
/// it, so every other holder sees the observer as closed and the borrow is
/// released while the terminal callback runs.
impl<O, Item, Err> Observer<Item, Err> for MutRc<Option<O>>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) { self.rc_deref_mut().next(value); }

  fn error(self, err: Err) {
    let inner = self.rc_deref_mut().take();
    if let Some(inner) = inner {
      inner.error(err);
    }
  }

  fn complete(self) {
    let inner = self.rc_deref_mut().take();
    if let Some(inner) = inner {
      inner.complete();
    }
  }

  fn is_closed(&self) -> bool {
    // A busy cell is in the middle of delivering, so it is still open.
    self
      .try_rc_deref()
      .is_some_and(|inner| inner.is_closed())
  }
}

// ============================================================================
// Serialized delivery
// ============================================================================

struct DeliveryQueue<Item, Err> {
  busy: bool,
  terminated: bool,
  pending: VecDeque<Event<Item, Err>>,
}

/// A downstream observer shared by several upstream observers, any of which
/// may emit while another's delivery is still running, typically because a
/// downstream callback pushed a value into one of the upstream sources.
///
/// An event arriving during a delivery is queued and handed on once that
/// delivery returns, in arrival order. Nothing is accepted after the first
/// terminal event.
pub struct SerializedObserver<O, Item, Err> {
  observer: MutRc<Option<O>>,
  queue: MutRc<DeliveryQueue<Item, Err>>,
}

impl<O, Item, Err> SerializedObserver<O, Item, Err> {
  pub fn new(observer: O) -> Self {
    SerializedObserver {
      observer: MutRc::own(Some(observer)),
      queue: MutRc::own(DeliveryQueue { busy: false, terminated: false, pending: VecDeque::new() }),
    }
  }
}

impl<O, Item, Err> Clone for SerializedObserver<O, Item, Err> {
  fn clone(&self) -> Self {
    SerializedObserver { observer: self.observer.clone(), queue: self.queue.clone() }
  }
}

impl<O, Item, Err> SerializedObserver<O, Item, Err>
where
  O: Observer<Item, Err>,
{
  fn deliver(&self, event: Event<Item, Err>) {
    {
      let mut queue = self.queue.rc_deref_mut();
      if queue.terminated {
        return;
      }
      queue.terminated = event.is_terminal();
      if queue.busy {
        queue.pending.push_back(event);
        return;
      }
      queue.busy = true;
    }

    let mut event = event;
    loop {
      if event.is_terminal() {
        let mut observer = self.observer.rc_deref_mut().take();
        event.dispatch(&mut observer);
      } else {
        let mut slot = self.observer.rc_deref_mut();
        event.dispatch(&mut *slot);
      }
      let next = {
        let mut queue = self.queue.rc_deref_mut();
        let next = queue.pending.pop_front();
        queue.busy = next.is_some();
        next
      };
      match next {
        Some(queued) => event = queued,
        None => return,
      }
    }
  }
}

impl<O, Item, Err> Observer<Item, Err> for SerializedObserver<O, Item, Err>
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.deliver(Event::Next(value)); }

  #[inline]
  fn error(self, err: Err) { self.deliver(Event::Error(err)); }

  #[inline]
  fn complete(self) { self.deliver(Event::Completed); }

  fn is_closed(&self) -> bool { self.queue.rc_deref().terminated || self.observer.is_closed() }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use super::*;

  struct TestObserver {
    values: Vec<i32>,
  }

  impl Observer<i32, ()> for TestObserver {
    fn next(&mut self, value: i32) { self.values.push(value); }

    fn error(self, _: ()) {}

    fn complete(self) {}

    fn is_closed(&self) -> bool { false }
  }

  #[rxkit_macro::test]
  fn test_observer_trait() {
    let mut obs = TestObserver { values: vec![] };
    obs.next(1);
    obs.next(2);
    assert_eq!(obs.values, vec![1, 2]);
    assert!(!obs.is_closed());
  }

  #[rxkit_macro::test]
  fn test_closure_as_observer() {
    let mut count = 0;
    let mut closure_obs = FnMutObserver(|v: i32| {
      count += v;
    });

    Observer::<i32, ()>::next(&mut closure_obs, 10);
    Observer::<i32, ()>::next(&mut closure_obs, 20);
    assert_eq!(count, 30);
  }

  #[rxkit_macro::test]
  fn test_event_observer_sees_every_kind() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    let mut obs = EventObserver(move |e: Event<i32, &'static str>| c_log.borrow_mut().push(e));
    obs.next(1);
    obs.error("boom");
    assert_eq!(*log.borrow(), vec![Event::Next(1), Event::Error("boom")]);
  }

  #[rxkit_macro::test]
  fn test_shared_option_closes_for_every_holder() {
    let shared = MutRc::own(Some(TestObserver { values: vec![] }));
    let other = shared.clone();
    assert!(!other.is_closed());
    Observer::<i32, ()>::complete(shared);
    assert!(other.is_closed());
  }

  #[rxkit_macro::test]
  fn test_serialized_observer_queues_reentrant_events() {
    type Shared = SerializedObserver<BoxedObserver<'static, i32, ()>, i32, ()>;
    let log = Rc::new(RefCell::new(vec![]));
    let feedback: Rc<RefCell<Option<Shared>>> = Rc::default();

    let c_log = log.clone();
    let c_feedback = feedback.clone();
    let handler = move |e: Event<i32, ()>| {
      let first = e == Event::Next(1);
      c_log.borrow_mut().push(e);
      let other = c_feedback.borrow().clone();
      if let (true, Some(mut other)) = (first, other) {
        other.next(2);
        other.complete();
      }
    };
    let mut observer: Shared = SerializedObserver::new(Box::new(EventObserver(handler)));
    *feedback.borrow_mut() = Some(observer.clone());

    observer.next(1);
    assert!(observer.is_closed());
    observer.next(3);
    assert_eq!(*log.borrow(), vec![Event::Next(1), Event::Next(2), Event::Completed]);
  }

  #[rxkit_macro::test]
  fn test_boxed_observer_delegates() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    let mut boxed: BoxedObserver<'_, i32, ()> =
      Box::new(FnMutObserver(move |v: i32| c_seen.borrow_mut().push(v)));
    boxed.next(7);
    assert!(!boxed.is_closed());
    boxed.complete();
    assert_eq!(*seen.borrow(), vec![7]);
  }
}
