use crate::{
  disposable::BoxedDisposable,
  observable::{CoreObservable, ObservableType},
  observer::{BoxedObserver, Observer},
};

type BoxedSubscribe<'a, Item, Err> =
  Box<dyn FnOnce(BoxedObserver<'a, Item, Err>) -> BoxedDisposable + 'a>;

/// An observable with its concrete type erased, produced by
/// `Observable::box_it`.
///
/// Useful when different branches must return the same type, or to store
/// observables in a collection.
///
/// ```
/// use rxkit::prelude::*;
///
/// let sources: Vec<BoxedObservable<'static, i32, _>> =
///   vec![observable::just(1).box_it(), of![2, 3].map(|v| v * 10).box_it()];
/// for source in sources {
///   source.subscribe(|v| println!("{v}"));
/// }
/// ```
pub struct BoxedObservable<'a, Item, Err>(BoxedSubscribe<'a, Item, Err>);

impl<'a, Item, Err> BoxedObservable<'a, Item, Err> {
  pub fn new<S>(source: S) -> Self
  where
    S: CoreObservable<BoxedObserver<'a, Item, Err>> + ObservableType<Item = Item, Err = Err> + 'a,
    S::Unsub: 'static,
  {
    BoxedObservable(Box::new(move |observer: BoxedObserver<'a, Item, Err>| {
      BoxedDisposable::new(source.actual_subscribe(observer))
    }))
  }
}

impl<Item, Err> ObservableType for BoxedObservable<'_, Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<'a, Item, Err, O> CoreObservable<O> for BoxedObservable<'a, Item, Err>
where
  O: Observer<Item, Err> + 'a,
{
  type Unsub = BoxedDisposable;

  fn actual_subscribe(self, observer: O) -> BoxedDisposable { (self.0)(Box::new(observer)) }
}
