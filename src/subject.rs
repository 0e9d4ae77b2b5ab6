//! Subjects: hot observables that are also observers.
//!
//! A subject keeps a registry of observers and broadcasts every event it is
//! fed to all of them. Handles are cheap to clone and share one registry, so
//! one clone can be subscribed while another is used to inject events.
//!
//! - [`PublishSubject`] forwards only what is emitted after subscribing.
//! - [`BehaviorSubject`] additionally hands every new subscriber the current
//!   value right away.
//!
//! Both cache their terminal event: a late subscriber receives only that
//! terminal event and is not registered.
//!
//! # Re-entrancy
//!
//! Emitting into a subject from inside one of its own callbacks does not
//! recurse. The event is queued and broadcast once the current broadcast has
//! finished, so every observer sees events in the same order. Subscribing or
//! disposing from inside a callback is allowed; a new observer does not see
//! the broadcast in progress, and a disposed one sees nothing further.

mod behavior_subject;
mod publish_subject;
mod subscribers;

pub use behavior_subject::*;
pub use publish_subject::*;
pub use subscribers::SubjectDisposable;
