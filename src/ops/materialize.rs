use crate::{
  event::Event,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Turns every event of the source into a value.
///
/// Values arrive as `Event::Next`; the terminal event arrives as the last
/// value (`Event::Error` or `Event::Completed`), followed by completion. The
/// materialized stream itself never errors.
///
/// ```
/// use rxkit::prelude::*;
///
/// let mut events = vec![];
/// observable::throw_err::<i32, _>("boom")
///   .materialize()
///   .subscribe(|e| events.push(e));
/// assert_eq!(events, vec![Event::Error("boom")]);
/// ```
#[derive(Clone)]
pub struct Materialize<S> {
  pub source: S,
}

impl<S: ObservableType> ObservableType for Materialize<S> {
  type Item = Event<S::Item, S::Err>;
  type Err = S::Err;
}

pub struct MaterializeObserver<O>(O);

impl<O, Item, Err> Observer<Item, Err> for MaterializeObserver<O>
where
  O: Observer<Event<Item, Err>, Err>,
{
  fn next(&mut self, value: Item) { self.0.next(Event::Next(value)); }

  fn error(self, err: Err) {
    let mut observer = self.0;
    observer.next(Event::Error(err));
    observer.complete();
  }

  fn complete(self) {
    let mut observer = self.0;
    observer.next(Event::Completed);
    observer.complete();
  }

  fn is_closed(&self) -> bool { self.0.is_closed() }
}

impl<S, O> CoreObservable<O> for Materialize<S>
where
  S: CoreObservable<MaterializeObserver<O>>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(MaterializeObserver(observer))
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[rxkit_macro::test]
  fn terminal_becomes_last_value() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    of![1, 2]
      .materialize()
      .subscribe_event(move |e| c_log.borrow_mut().push(e));

    assert_eq!(
      *log.borrow(),
      vec![
        Event::Next(Event::Next(1)),
        Event::Next(Event::Next(2)),
        Event::Next(Event::Completed),
        Event::Completed
      ]
    );
  }

  #[rxkit_macro::test]
  fn errors_are_turned_into_values() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    let subject = PublishSubject::<i32, &str>::new();
    subject
      .clone()
      .materialize()
      .subscribe_event(move |e| c_log.borrow_mut().push(e));

    subject.on_next(1);
    subject.on_error("boom");

    assert_eq!(
      *log.borrow(),
      vec![Event::Next(Event::Next(1)), Event::Next(Event::Error("boom")), Event::Completed]
    );
  }
}
