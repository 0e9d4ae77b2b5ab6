use crate::{
  error::RxError,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Checks that the source emits exactly one value.
///
/// The value is held until the source completes, then emitted followed by
/// completion. Completing without a value fails with
/// [`RxError::NoElements`]; a second value fails with
/// [`RxError::MoreThanOneElement`] at once.
///
/// Returned wrapped in a `Single` by `Observable::as_single`.
#[derive(Clone)]
pub struct AsSingle<S> {
  pub source: S,
}

impl<S: ObservableType> ObservableType for AsSingle<S> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct AsSingleObserver<O, Item> {
  observer: Option<O>,
  value: Option<Item>,
}

impl<O, Item, Err> Observer<Item, Err> for AsSingleObserver<O, Item>
where
  O: Observer<Item, Err>,
  Err: From<RxError>,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_none() {
      return;
    }
    if self.value.is_some() {
      self.value = None;
      self.observer.take().error(Err::from(RxError::MoreThanOneElement));
    } else {
      self.value = Some(value);
    }
  }

  fn error(self, err: Err) { self.observer.error(err); }

  fn complete(self) {
    let AsSingleObserver { observer, value } = self;
    let Some(mut observer) = observer else { return };
    match value {
      Some(value) => {
        observer.next(value);
        observer.complete();
      }
      None => observer.error(Err::from(RxError::NoElements)),
    }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, O, Item> CoreObservable<O> for AsSingle<S>
where
  S: CoreObservable<AsSingleObserver<O, Item>> + ObservableType<Item = Item>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(AsSingleObserver { observer: Some(observer), value: None })
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[rxkit_macro::test]
  fn exactly_one_value_succeeds() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    observable::range(7, 1)
      .as_single()
      .subscribe_event(move |e| c_log.borrow_mut().push(e));

    assert_eq!(*log.borrow(), vec![SingleEvent::Success(7)]);
  }

  #[rxkit_macro::test]
  fn no_value_fails() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    observable::range(7, 0)
      .as_single()
      .subscribe_event(move |e| c_log.borrow_mut().push(e));

    assert_eq!(*log.borrow(), vec![SingleEvent::Failure(RxError::NoElements)]);
  }

  #[rxkit_macro::test]
  fn second_value_fails() {
    let log = Rc::new(RefCell::new(vec![]));
    let c_log = log.clone();
    observable::range(7, 3)
      .as_single()
      .subscribe_event(move |e| c_log.borrow_mut().push(e));

    assert_eq!(*log.borrow(), vec![SingleEvent::Failure(RxError::MoreThanOneElement)]);
  }
}
