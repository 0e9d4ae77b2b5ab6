//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.
//! Creation functions stay behind their module path (`observable::range`,
//! `observable::create`, ...); the `of!` macro is exported at the crate root.

// Creation module and the observable types it produces
pub use crate::observable::{
  self, BoxedObservable, Create, Defer, Empty, FromIter, Just, Never, Range, ThrowErr, TryCreate,
  TryDefer,
};
// Core traits
pub use crate::observable::{CoreObservable, Observable, ObservableType};
// Observer side
pub use crate::observer::{BoxedObserver, Emitter, Observer};
// Operators
pub use crate::ops::take_until::TakeUntilBehavior;
// Subject
pub use crate::subject::*;
// Subscription and disposal
pub use crate::{
  disposable::{BoxedDisposable, ClosureDisposable, Disposable, TupleDisposable},
  dispose_bag::DisposeBag,
  subscription::Subscription,
};
pub use crate::{
  error::RxError,
  event::{Event, EventType},
  of,
  single::{Single, SingleCreate, SingleEmitter, SingleEvent},
};
