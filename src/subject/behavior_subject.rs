use super::subscribers::{SubjectCore, SubjectDisposable};
use crate::{
  event::Event,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
  rc::MutRc,
};

/// A subject that remembers its latest value.
///
/// Every new subscriber receives the current value synchronously during
/// `subscribe`, then everything emitted afterwards. Once terminated, a new
/// subscriber receives only the terminal event.
///
/// ```rust
/// use std::{cell::RefCell, convert::Infallible, rc::Rc};
///
/// use rxkit::prelude::*;
///
/// let subject = BehaviorSubject::<_, Infallible>::new(1);
/// subject.on_next(2);
///
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// subject.clone().subscribe(move |v| c_seen.borrow_mut().push(v));
/// subject.on_next(3);
///
/// assert_eq!(*seen.borrow(), vec![2, 3]);
/// assert_eq!(subject.value(), 3);
/// ```
pub struct BehaviorSubject<Item, Err> {
  subscribers: SubjectCore<Item, Err>,
  value: MutRc<Item>,
}

impl<Item, Err> BehaviorSubject<Item, Err> {
  pub fn new(value: Item) -> Self {
    BehaviorSubject { subscribers: SubjectCore::default(), value: MutRc::own(value) }
  }

  #[inline]
  pub fn observer_count(&self) -> usize { self.subscribers.observer_count() }

  #[inline]
  pub fn is_terminated(&self) -> bool { self.subscribers.is_terminated() }
}

impl<Item: Clone, Err: Clone> BehaviorSubject<Item, Err> {
  /// The latest value. After termination this is the last value accepted.
  pub fn value(&self) -> Item { self.value.rc_deref().clone() }

  /// Store `value` as current and broadcast it. Ignored once the subject has
  /// terminated.
  pub fn on_next(&self, value: Item) {
    if self.subscribers.is_terminated() {
      return;
    }
    *self.value.rc_deref_mut() = value.clone();
    self.subscribers.emit(Event::Next(value));
  }

  pub fn on_error(&self, err: Err) { self.subscribers.emit(Event::Error(err)); }

  pub fn on_completed(&self) { self.subscribers.emit(Event::Completed); }
}

impl<Item, Err> Clone for BehaviorSubject<Item, Err> {
  fn clone(&self) -> Self {
    BehaviorSubject { subscribers: self.subscribers.clone(), value: self.value.clone() }
  }
}

impl<Item: Default, Err> Default for BehaviorSubject<Item, Err> {
  fn default() -> Self { Self::new(Item::default()) }
}

impl<Item, Err> ObservableType for BehaviorSubject<Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<Item, Err, O> CoreObservable<O> for BehaviorSubject<Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Unsub = Option<SubjectDisposable<Item, Err>>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let current = self.value.rc_deref().clone();
    self.subscribers.subscribe(observer, Some(current))
  }
}

impl<Item: Clone, Err: Clone> Observer<Item, Err> for BehaviorSubject<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { self.on_next(value); }

  #[inline]
  fn error(self, err: Err) { self.on_error(err); }

  #[inline]
  fn complete(self) { self.on_completed(); }

  #[inline]
  fn is_closed(&self) -> bool { self.is_terminated() }
}
