//! The handle returned by every `subscribe*` call.
//!
//! A subscription pairs two halves that share one `SubscriptionState`:
//!
//! - `Subscription`, the caller's handle, which releases the chain on
//!   `dispose`.
//! - `SinkObserver`, the last observer in the chain, which wraps the caller's
//!   callbacks, drops events once the subscription is closed, and releases the
//!   chain after a terminal event.
//!
//! Whichever side gets there first releases the upstream disposable; the
//! other side becomes a no-op.

use std::{
  cell::{Cell, RefCell},
  rc::Rc,
};

use crate::{
  disposable::{BoxedDisposable, Disposable},
  dispose_bag::DisposeBag,
  observer::Observer,
};

struct SubscriptionState {
  closed: Cell<bool>,
  upstream: RefCell<Option<BoxedDisposable>>,
}

/// A cloneable handle onto one running subscription.
///
/// Disposing any clone, any number of times, releases the subscription once.
#[derive(Clone)]
pub struct Subscription(Rc<SubscriptionState>);

impl Subscription {
  pub(crate) fn new() -> Self {
    Subscription(Rc::new(SubscriptionState {
      closed: Cell::new(false),
      upstream: RefCell::new(None),
    }))
  }

  /// Hand the upstream disposable to this subscription.
  ///
  /// If the subscription already closed while `subscribe` was still running
  /// (a cold source that completed synchronously, or a dispose from inside a
  /// callback), the disposable is released right away.
  pub(crate) fn attach(&self, upstream: impl Disposable + 'static) {
    if self.0.closed.get() {
      upstream.dispose();
    } else {
      *self.0.upstream.borrow_mut() = Some(BoxedDisposable::new(upstream));
    }
  }

  /// Release the subscription. Calling it again is a no-op.
  pub fn unsubscribe(&self) {
    if self.0.closed.replace(true) {
      return;
    }
    tracing::trace!("subscription disposed");
    // Take the disposable first so nothing stays borrowed while it runs.
    let upstream = self.0.upstream.borrow_mut().take();
    if let Some(upstream) = upstream {
      upstream.dispose();
    }
  }

  /// Whether the subscription has been released, either explicitly or because
  /// a terminal event reached it.
  #[inline]
  pub fn is_closed(&self) -> bool { self.0.closed.get() }

  /// Add this subscription to `bag`, releasing it when the bag is released.
  pub fn disposed_by(self, bag: &DisposeBag) { bag.insert(self); }
}

impl Disposable for Subscription {
  #[inline]
  fn dispose(self) { self.unsubscribe() }

  #[inline]
  fn is_disposed(&self) -> bool { self.is_closed() }
}

/// The terminal observer of a chain, built by `Observable::subscribe*`.
pub struct SinkObserver<O> {
  observer: Option<O>,
  subscription: Subscription,
}

impl<O> SinkObserver<O> {
  pub(crate) fn new(observer: O, subscription: Subscription) -> Self {
    SinkObserver { observer: Some(observer), subscription }
  }
}

impl<O, Item, Err> Observer<Item, Err> for SinkObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.subscription.is_closed() {
      return;
    }
    if let Some(observer) = self.observer.as_mut() {
      observer.next(value);
    }
  }

  fn error(mut self, err: Err) {
    if self.subscription.is_closed() {
      return;
    }
    if let Some(observer) = self.observer.take() {
      observer.error(err);
    }
    self.subscription.unsubscribe();
  }

  fn complete(mut self) {
    if self.subscription.is_closed() {
      return;
    }
    if let Some(observer) = self.observer.take() {
      observer.complete();
    }
    self.subscription.unsubscribe();
  }

  fn is_closed(&self) -> bool {
    self.subscription.is_closed() || self.observer.as_ref().map_or(true, |o| o.is_closed())
  }
}
