//! Operators. Each module holds one operator struct (what `Observable`
//! methods return) together with the observer it wraps downstream with.

pub mod as_single;
pub mod dematerialize;
pub mod distinct_until_changed;
pub mod element_at;
pub mod enumerate;
pub mod filter;
pub mod filter_map;
pub mod flat_map;
pub mod flat_map_latest;
pub mod ignore_elements;
pub mod lifecycle;
pub mod map;
pub mod map_err;
pub mod materialize;
pub mod skip;
pub mod skip_until;
pub mod skip_while;
pub mod take;
pub mod take_until;
pub mod take_while;
pub mod to_array;
