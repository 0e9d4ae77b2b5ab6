use std::convert::Infallible;

use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Creates an observable producing a single value.
///
/// Completes immediately after emitting the value given. Never emits an error.
///
/// ```
/// use rxkit::prelude::*;
///
/// observable::just(123).subscribe(|v| println!("{}", v));
/// ```
pub fn just<Item>(v: Item) -> Just<Item> { Just(v) }

#[derive(Clone)]
pub struct Just<Item>(pub(crate) Item);

impl<Item> ObservableType for Just<Item> {
  type Item = Item;
  type Err = Infallible;
}

impl<Item, O> CoreObservable<O> for Just<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    observer.next(self.0);
    observer.complete();
  }
}

/// Creates an observable producing the given values in order, then
/// completing.
///
/// ```
/// use rxkit::prelude::*;
///
/// of![1, 2, 3].subscribe(|v| println!("{}", v));
///
/// // print log:
/// // 1
/// // 2
/// // 3
/// ```
#[macro_export]
macro_rules! of {
  ($($item:expr),* $(,)?) => {
    $crate::observable::from_iter([$($item),*])
  };
}
