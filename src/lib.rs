//! # rxkit: Reactive Extensions core for Rust
//!
//! Single-threaded, synchronous implementation of the core of
//! [Reactive Extensions](http://reactivex.io/): observables, operators,
//! subjects and `Single`.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxkit::prelude::*;
//!
//! let bag = DisposeBag::new();
//! observable::range(0, 10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| println!("Value: {}", v))
//!   .disposed_by(&bag);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | The extension trait carrying every operator |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Event`] | One delivered event, as seen by `subscribe_event` and `materialize` |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`DisposeBag`] | Releases many subscriptions at once |
//! | [`PublishSubject`] / [`BehaviorSubject`] | Hot sources you push events into |
//! | [`Single`] | A stream ending with exactly one value or one error |
//!
//! Everything runs on the calling thread: a cold source produces all of its
//! events inside `subscribe`, and a subject delivers inside `on_next`.
//!
//! ## Logging
//!
//! rxkit logs subscription lifecycle and subject termination through
//! [`tracing`](https://docs.rs/tracing). Install any subscriber to see it.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Event`]: event::Event
//! [`Subscription`]: subscription::Subscription
//! [`DisposeBag`]: dispose_bag::DisposeBag
//! [`PublishSubject`]: subject::PublishSubject
//! [`BehaviorSubject`]: subject::BehaviorSubject
//! [`Single`]: single::Single

pub mod disposable;
pub mod dispose_bag;
pub mod error;
pub mod event;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod single;
pub mod subject;
pub mod subscription;

// Re-export the prelude module
pub use prelude::*;

#[cfg(doctest)]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
