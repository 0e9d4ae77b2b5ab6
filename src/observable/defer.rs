use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Creates an observable that will on subscription defer to another observable
/// that is supplied by a factory function which will be run once at each
/// subscription
///
/// ```rust
/// # use rxkit::prelude::*;
///
/// observable::defer(|| {
///   println!("Hi!");
///   observable::just("Hello!")
/// })
/// .subscribe(move |v| {
///   println!("{}", v);
/// });
/// // Prints: Hi!\nHello!\n
/// ```
pub fn defer<F, S>(factory: F) -> Defer<F>
where
  F: FnOnce() -> S,
  S: ObservableType,
{
  Defer(factory)
}

/// Like [`defer`], but the factory can fail; its error is emitted to the
/// subscriber.
pub fn try_defer<F, S>(factory: F) -> TryDefer<F>
where
  F: FnOnce() -> Result<S, S::Err>,
  S: ObservableType,
{
  TryDefer(factory)
}

#[derive(Clone)]
pub struct Defer<F>(F);

#[derive(Clone)]
pub struct TryDefer<F>(F);

impl<F, S> ObservableType for Defer<F>
where
  F: FnOnce() -> S,
  S: ObservableType,
{
  type Item = S::Item;
  type Err = S::Err;
}

impl<F, S> ObservableType for TryDefer<F>
where
  F: FnOnce() -> Result<S, S::Err>,
  S: ObservableType,
{
  type Item = S::Item;
  type Err = S::Err;
}

impl<F, S, O> CoreObservable<O> for Defer<F>
where
  F: FnOnce() -> S,
  S: CoreObservable<O>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub { (self.0)().actual_subscribe(observer) }
}

impl<F, S, O> CoreObservable<O> for TryDefer<F>
where
  F: FnOnce() -> Result<S, S::Err>,
  S: CoreObservable<O>,
  O: Observer<S::Item, S::Err>,
{
  type Unsub = Option<S::Unsub>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    match (self.0)() {
      Ok(source) => Some(source.actual_subscribe(observer)),
      Err(err) => {
        observer.error(err);
        None
      }
    }
  }
}
