//! The event type exchanged between a source and its observer.

use crate::observer::Observer;

/// One unit of delivery: a value, an error, or completion.
///
/// `Error` and `Completed` are terminal: once either has been delivered on a
/// subscription nothing else follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event<Item, Err> {
  Next(Item),
  Error(Err),
  Completed,
}

impl<Item, Err> Event<Item, Err> {
  #[inline]
  pub fn is_terminal(&self) -> bool { !matches!(self, Event::Next(_)) }

  /// The carried error, if this is an `Error` event.
  #[inline]
  pub fn error(&self) -> Option<&Err> {
    match self {
      Event::Error(e) => Some(e),
      _ => None,
    }
  }

  pub fn map<B>(self, f: impl FnOnce(Item) -> B) -> Event<B, Err> {
    match self {
      Event::Next(v) => Event::Next(f(v)),
      Event::Error(e) => Event::Error(e),
      Event::Completed => Event::Completed,
    }
  }

  /// Deliver this event to `observer`.
  ///
  /// Terminal events take the observer out of the slot, so a slot that has
  /// seen a terminal event stays empty and silently drops anything after it.
  pub fn dispatch<O>(self, observer: &mut Option<O>)
  where
    O: Observer<Item, Err>,
  {
    match self {
      Event::Next(v) => {
        if let Some(observer) = observer.as_mut() {
          observer.next(v);
        }
      }
      Event::Error(e) => {
        if let Some(observer) = observer.take() {
          observer.error(e);
        }
      }
      Event::Completed => {
        if let Some(observer) = observer.take() {
          observer.complete();
        }
      }
    }
  }
}

/// Recovers the item and error types of an `Event`.
///
/// Operators over materialized streams (`dematerialize`) use it to name the
/// types wrapped inside the events they receive.
pub trait EventType {
  type Item;
  type Err;

  fn into_event(self) -> Event<Self::Item, Self::Err>;
}

impl<Item, Err> EventType for Event<Item, Err> {
  type Item = Item;
  type Err = Err;

  #[inline]
  fn into_event(self) -> Event<Item, Err> { self }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Recorder<'a>(&'a mut Vec<Event<i32, &'static str>>);

  impl Observer<i32, &'static str> for Recorder<'_> {
    fn next(&mut self, value: i32) { self.0.push(Event::Next(value)); }

    fn error(self, err: &'static str) { self.0.push(Event::Error(err)); }

    fn complete(self) { self.0.push(Event::Completed); }

    fn is_closed(&self) -> bool { false }
  }

  #[rxkit_macro::test]
  fn accessors() {
    let next: Event<i32, &str> = Event::Next(1);
    let err: Event<i32, &str> = Event::Error("boom");
    assert_eq!(err.error(), Some(&"boom"));
    assert!(!next.is_terminal());
    assert!(err.is_terminal());
    assert!(Event::<i32, &str>::Completed.is_terminal());
    assert_eq!(next.map(|v| v * 10), Event::Next(10));
  }

  #[rxkit_macro::test]
  fn dispatch_empties_slot_on_terminal() {
    let mut log = vec![];
    {
      let mut slot = Some(Recorder(&mut log));
      Event::Next(1).dispatch(&mut slot);
      Event::Completed.dispatch(&mut slot);
      assert!(slot.is_none());
      Event::Next(2).dispatch(&mut slot);
      Event::Error("late").dispatch(&mut slot);
    }
    assert_eq!(log, vec![Event::Next(1), Event::Completed]);
  }
}
