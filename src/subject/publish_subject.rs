use super::subscribers::{SubjectCore, SubjectDisposable};
use crate::{
  event::Event,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// A subject that broadcasts each event to the observers registered at the
/// time it is emitted. Nothing is replayed except the terminal event.
///
/// ```rust
/// use std::{cell::RefCell, convert::Infallible, rc::Rc};
///
/// use rxkit::prelude::*;
///
/// let subject = PublishSubject::<i32, Infallible>::new();
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
///
/// subject.on_next(1); // nobody is listening yet
/// subject.clone().subscribe(move |v| c_seen.borrow_mut().push(v));
/// subject.on_next(2);
/// subject.on_next(3);
/// assert_eq!(*seen.borrow(), vec![2, 3]);
/// ```
pub struct PublishSubject<Item, Err> {
  subscribers: SubjectCore<Item, Err>,
}

impl<Item, Err> PublishSubject<Item, Err> {
  pub fn new() -> Self { PublishSubject { subscribers: SubjectCore::default() } }

  /// Number of observers currently registered.
  #[inline]
  pub fn observer_count(&self) -> usize { self.subscribers.observer_count() }

  /// Whether an error or completion has been accepted.
  #[inline]
  pub fn is_terminated(&self) -> bool { self.subscribers.is_terminated() }
}

impl<Item: Clone, Err: Clone> PublishSubject<Item, Err> {
  /// Broadcast a value. Ignored once the subject has terminated.
  pub fn on_next(&self, value: Item) { self.subscribers.emit(Event::Next(value)); }

  pub fn on_error(&self, err: Err) { self.subscribers.emit(Event::Error(err)); }

  pub fn on_completed(&self) { self.subscribers.emit(Event::Completed); }
}

impl<Item, Err> Clone for PublishSubject<Item, Err> {
  fn clone(&self) -> Self { PublishSubject { subscribers: self.subscribers.clone() } }
}

impl<Item, Err> Default for PublishSubject<Item, Err> {
  fn default() -> Self { Self::new() }
}

impl<Item, Err> ObservableType for PublishSubject<Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<Item, Err, O> CoreObservable<O> for PublishSubject<Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Unsub = Option<SubjectDisposable<Item, Err>>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub { self.subscribers.subscribe(observer, None) }
}

impl<Item: Clone, Err: Clone> Observer<Item, Err> for PublishSubject<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { self.on_next(value); }

  #[inline]
  fn error(self, err: Err) { self.on_error(err); }

  #[inline]
  fn complete(self) { self.on_completed(); }

  #[inline]
  fn is_closed(&self) -> bool { self.is_terminated() }
}
