#![forbid(unsafe_code)]
//! Chainable containers for optional and fallible values, plus a concurrent
//! map that keeps every element's failure to itself.
//!
//! [`Maybe`] holds zero or one value. [`Outcome`] holds a value or an
//! [`Error`], and its `then_*` combinators stop at the first failure:
//!
//! ```
//! use ffp::Outcome;
//!
//! let port = Outcome::attempt(|| "8080".parse::<u16>())
//!     .then_call(|port| if port > 1024 { Ok(port) } else { Err(ffp::MissingValue) });
//!
//! assert_eq!(port.or_else(80), 8080);
//! ```
//!
//! [`map_concurrent`] and [`map_concurrent_result`] run a function over a
//! collection with one task per element. Results come back in completion
//! order, not input order.
//!
//! ```
//! let out = ffp::map_concurrent_result(["1", "two", "3"], |s| s.parse::<i32>());
//!
//! assert_eq!(out.len(), 3);
//! assert_eq!(out.iter().filter(|res| res.is_err()).count(), 1);
//! ```

mod error;
mod fanout;
#[cfg(feature = "logging")]
pub mod logging;
mod mapper;
mod maybe;
mod outcome;
pub mod seq;

pub use crate::error::*;
pub use crate::fanout::{Fanout, map_concurrent, map_concurrent_result};
pub use crate::mapper::Mapper;
pub use crate::maybe::Maybe;
pub use crate::outcome::{Outcome, call, only_err};
