//! Errors raised by rxkit itself.
//!
//! Streams carry their own error type parameter; `RxError` only covers the
//! failures the library detects on its own (a negative or overflowing
//! `range`, a `Single` built from a stream without exactly one element).
//! Streams that can hit those failures require `Err: From<RxError>`, which
//! `RxError` satisfies trivially.
//!
//! Caller logic reports failure through `Result`-returning closures
//! (`try_map`, `try_filter`, `try_create`, `try_defer`); the `Err` they return
//! is emitted downstream as an error event instead of escaping `subscribe`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RxError {
  #[error("range count must not be negative, got {0}")]
  NegativeCount(i64),

  #[error("range starting at {start} with {count} values overflows i64")]
  RangeOverflow { start: i64, count: i64 },

  #[error("sequence contains no elements")]
  NoElements,

  #[error("sequence contains more than one element")]
  MoreThanOneElement,
}
