use crate::{
  error::RxError,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Creates an observable emitting `count` consecutive integers starting at
/// `start`, then completing.
///
/// A zero `count` only completes; a negative one fails with
/// [`RxError::NegativeCount`]. A range whose last value does not fit in an
/// `i64` fails with [`RxError::RangeOverflow`] before emitting anything.
///
/// ```
/// use rxkit::prelude::*;
///
/// observable::range(1, 10).subscribe(|n| println!("{n}"));
/// ```
pub fn range(start: i64, count: i64) -> Range { Range { start, count } }

#[derive(Clone, Copy, Debug)]
pub struct Range {
  start: i64,
  count: i64,
}

impl ObservableType for Range {
  type Item = i64;
  type Err = RxError;
}

impl<O> CoreObservable<O> for Range
where
  O: Observer<i64, RxError>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    let Range { start, count } = self;
    if count < 0 {
      observer.error(RxError::NegativeCount(count));
      return;
    }
    if count > 0 && start.checked_add(count - 1).is_none() {
      observer.error(RxError::RangeOverflow { start, count });
      return;
    }
    for offset in 0..count {
      if observer.is_closed() {
        return;
      }
      observer.next(start + offset);
    }
    observer.complete();
  }
}
