use std::{
  cell::{Cell, RefCell},
  collections::VecDeque,
  rc::Rc,
};

use smallvec::SmallVec;

use crate::{
  disposable::{Disposable, DynamicDisposables},
  event::Event,
  observer::{BoxedObserver, Observer},
  rc::MutRc,
};

/// One registered observer.
///
/// The closed flag is checked before every delivery, so an entry disposed
/// halfway through a broadcast receives nothing further even though it is
/// still part of that broadcast's snapshot.
pub(crate) struct SubjectEntry<Item, Err> {
  closed: Cell<bool>,
  observer: RefCell<Option<BoxedObserver<'static, Item, Err>>>,
}

impl<Item, Err> SubjectEntry<Item, Err> {
  fn new(observer: BoxedObserver<'static, Item, Err>) -> Rc<Self> {
    Rc::new(SubjectEntry { closed: Cell::new(false), observer: RefCell::new(Some(observer)) })
  }

  #[inline]
  fn is_closed(&self) -> bool { self.closed.get() }

  fn next(&self, value: Item) {
    if self.closed.get() {
      return;
    }
    let Ok(mut slot) = self.observer.try_borrow_mut() else {
      return;
    };
    if let Some(observer) = slot.as_mut() {
      observer.next(value);
      if observer.is_closed() {
        self.closed.set(true);
      }
    }
    if self.closed.get() {
      let finished = slot.take();
      drop(slot);
      drop(finished);
    }
  }

  fn terminate(&self, event: Event<Item, Err>) {
    if self.closed.replace(true) {
      return;
    }
    let mut observer = self.observer.try_borrow_mut().ok().and_then(|mut slot| slot.take());
    event.dispatch(&mut observer);
  }

  fn close(&self) {
    self.closed.set(true);
    // Busy means the observer is running right now; `next` drops it on return.
    let finished = self.observer.try_borrow_mut().ok().and_then(|mut slot| slot.take());
    drop(finished);
  }
}

/// The registry shared by every clone of a subject.
pub(crate) struct Subscribers<Item, Err> {
  entries: DynamicDisposables<Rc<SubjectEntry<Item, Err>>>,
  /// The accepted terminal event, kept for late subscribers.
  terminal: Option<Event<Item, Err>>,
  emitting: bool,
  pending: VecDeque<Event<Item, Err>>,
}

impl<Item, Err> Default for Subscribers<Item, Err> {
  fn default() -> Self {
    Subscribers {
      entries: DynamicDisposables::new(),
      terminal: None,
      emitting: false,
      pending: VecDeque::new(),
    }
  }
}

/// Handle onto a subject's registry.
///
/// The registry is never borrowed while an observer runs, so observers can
/// subscribe, dispose, or emit into the same subject from their callbacks.
pub(crate) struct SubjectCore<Item, Err>(MutRc<Subscribers<Item, Err>>);

impl<Item, Err> Clone for SubjectCore<Item, Err> {
  fn clone(&self) -> Self { SubjectCore(self.0.clone()) }
}

impl<Item, Err> Default for SubjectCore<Item, Err> {
  fn default() -> Self { SubjectCore(MutRc::own(Subscribers::default())) }
}

impl<Item, Err> SubjectCore<Item, Err> {
  pub(crate) fn observer_count(&self) -> usize {
    self
      .0
      .rc_deref()
      .entries
      .iter()
      .filter(|entry| !entry.is_closed())
      .count()
  }

  pub(crate) fn is_terminated(&self) -> bool { self.0.rc_deref().terminal.is_some() }
}

impl<Item: Clone, Err: Clone> SubjectCore<Item, Err> {
  /// Accept one event and broadcast it, or queue it when a broadcast is
  /// already running further up the stack. Returns false if the subject had
  /// already terminated and the event was dropped.
  pub(crate) fn emit(&self, event: Event<Item, Err>) -> bool {
    {
      let mut inner = self.0.rc_deref_mut();
      if inner.terminal.is_some() {
        return false;
      }
      if event.is_terminal() {
        tracing::debug!(
          observers = inner.entries.len(),
          error = event.error().is_some(),
          "subject terminated"
        );
        inner.terminal = Some(event.clone());
      }
      if inner.emitting {
        inner.pending.push_back(event);
        return true;
      }
      inner.emitting = true;
    }

    self.broadcast(event);
    self.drain_pending();
    true
  }

  /// Broadcast everything queued while this call held the delivery slot,
  /// then release it.
  fn drain_pending(&self) {
    loop {
      let next = {
        let mut inner = self.0.rc_deref_mut();
        let next = inner.pending.pop_front();
        inner.emitting = next.is_some();
        next
      };
      match next {
        Some(queued) => self.broadcast(queued),
        None => return,
      }
    }
  }

  /// Deliver to a snapshot of the registry. The value is cloned for every
  /// observer but the last one, which receives it by move.
  fn broadcast(&self, event: Event<Item, Err>) {
    match event {
      Event::Next(value) => {
        let entries: SmallVec<[_; 4]> = self.0.rc_deref().entries.iter().cloned().collect();
        let mut iter = entries.iter().peekable();
        while let Some(entry) = iter.next() {
          if iter.peek().is_some() {
            entry.next(value.clone());
          } else {
            entry.next(value);
            break;
          }
        }
        self
          .0
          .rc_deref_mut()
          .entries
          .retain(|entry| !entry.is_closed());
      }
      terminal => {
        let entries: SmallVec<[_; 4]> = self.0.rc_deref_mut().entries.drain().collect();
        let mut iter = entries.iter().peekable();
        while let Some(entry) = iter.next() {
          if iter.peek().is_some() {
            entry.terminate(terminal.clone());
          } else {
            entry.terminate(terminal);
            break;
          }
        }
      }
    }
  }

  /// Register `observer`, or replay the terminal event to it if the subject
  /// has already terminated. `initial` is delivered to the new observer alone,
  /// right after it is registered.
  pub(crate) fn subscribe<O>(&self, observer: O, initial: Option<Item>) -> Option<SubjectDisposable<Item, Err>>
  where
    O: Observer<Item, Err> + 'static,
  {
    let terminal = self.0.rc_deref().terminal.clone();
    if let Some(terminal) = terminal {
      terminal.dispatch(&mut Some(observer));
      return None;
    }

    let entry = SubjectEntry::new(Box::new(observer));
    let id = self.0.rc_deref_mut().entries.add(entry.clone());
    tracing::trace!(id, "subject observer added");
    let disposable = SubjectDisposable { subscribers: self.0.clone(), id, entry };
    if let Some(value) = initial {
      // The initial value holds the delivery slot like a broadcast does, so
      // anything the observer emits into this subject meanwhile is queued.
      let owns_slot = !std::mem::replace(&mut self.0.rc_deref_mut().emitting, true);
      disposable.entry.next(value);
      if owns_slot {
        self.drain_pending();
      }
    }
    if disposable.is_disposed() {
      disposable.dispose();
      return None;
    }
    Some(disposable)
  }
}

/// Removes one observer from a subject.
pub struct SubjectDisposable<Item, Err> {
  subscribers: MutRc<Subscribers<Item, Err>>,
  id: usize,
  entry: Rc<SubjectEntry<Item, Err>>,
}

impl<Item, Err> Disposable for SubjectDisposable<Item, Err> {
  fn dispose(self) {
    self.entry.close();
    let removed = self
      .subscribers
      .try_rc_deref_mut()
      .and_then(|mut inner| inner.entries.remove(self.id));
    if removed.is_some() {
      tracing::trace!(id = self.id, "subject observer removed");
    }
  }

  #[inline]
  fn is_disposed(&self) -> bool { self.entry.is_closed() }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use super::*;
  use crate::observer::EventObserver;

  type Log = Rc<RefCell<Vec<Event<i32, &'static str>>>>;

  fn recorder(log: &Log) -> EventObserver<impl FnMut(Event<i32, &'static str>)> {
    let log = log.clone();
    EventObserver(move |e| log.borrow_mut().push(e))
  }

  #[rxkit_macro::test]
  fn late_subscriber_gets_only_terminal() {
    let core = SubjectCore::<i32, &'static str>::default();
    let log = Log::default();
    core.emit(Event::Next(1));
    core.emit(Event::Error("boom"));
    assert!(core.subscribe(recorder(&log), None).is_none());
    assert_eq!(*log.borrow(), vec![Event::Error("boom")]);
    assert!(!core.emit(Event::Next(2)));
  }

  #[rxkit_macro::test]
  fn disposed_entry_is_removed_at_once() {
    let core = SubjectCore::<i32, &'static str>::default();
    let log = Log::default();
    let disposable = core.subscribe(recorder(&log), None);
    assert_eq!(core.observer_count(), 1);
    disposable.dispose();
    assert_eq!(core.observer_count(), 0);
    core.emit(Event::Next(1));
    assert!(log.borrow().is_empty());
  }

  #[rxkit_macro::test]
  fn emission_during_initial_value_is_queued() {
    let core = SubjectCore::<i32, &'static str>::default();
    let log = Log::default();
    let c_log = log.clone();
    let c_core = core.clone();
    let observer = EventObserver(move |e: Event<i32, &'static str>| {
      if e == Event::Next(1) {
        c_core.emit(Event::Next(2));
        c_core.emit(Event::Completed);
      }
      c_log.borrow_mut().push(e);
    });

    assert!(core.subscribe(observer, Some(1)).is_none());
    assert_eq!(*log.borrow(), vec![Event::Next(1), Event::Next(2), Event::Completed]);
    assert!(core.is_terminated());
    assert_eq!(core.observer_count(), 0);
  }

  #[rxkit_macro::test]
  fn initial_value_reaches_only_the_new_observer() {
    let core = SubjectCore::<i32, &'static str>::default();
    let (first, second) = (Log::default(), Log::default());
    let _a = core.subscribe(recorder(&first), None);
    let _b = core.subscribe(recorder(&second), Some(9));
    assert!(first.borrow().is_empty());
    assert_eq!(*second.borrow(), vec![Event::Next(9)]);
  }
}
