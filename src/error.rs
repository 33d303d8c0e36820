use std::error::Error as StdError;

/// Opaque error carried by a failed [`Outcome`](crate::Outcome).
///
/// Anything implementing `std::error::Error + Send + Sync + 'static` converts
/// into it, and it keeps the full cause chain of whatever it wraps.
pub use anyhow::Error;

/// Returned when an absent [`Maybe`](crate::Maybe) is turned into an
/// [`Outcome`](crate::Outcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("value is absent")]
pub struct MissingValue;

/// A known error value that can be looked for anywhere in a cause chain.
///
/// Implemented for every error type that can be compared with `==`, so an
/// ignore list may freely mix sentinels of different types:
///
/// ```
/// use ffp::Sentinel;
///
/// #[derive(Debug, PartialEq, thiserror::Error)]
/// #[error("not found")]
/// struct NotFound;
///
/// let ignore: [&dyn Sentinel; 2] = [&NotFound, &ffp::MissingValue];
/// assert_eq!(ignore.len(), 2);
/// ```
pub trait Sentinel {
    /// Whether a single link of a cause chain is this sentinel.
    fn matches(&self, cause: &(dyn StdError + 'static)) -> bool;

    /// Whether this sentinel is attached anywhere to `err`, either as a
    /// context layer or as a link of its cause chain.
    fn found_in(&self, err: &Error) -> bool {
        err.chain().any(|cause| self.matches(cause))
    }
}

impl<E> Sentinel for E
where
    E: StdError + PartialEq + Send + Sync + 'static,
{
    fn matches(&self, cause: &(dyn StdError + 'static)) -> bool {
        cause.downcast_ref::<E>().is_some_and(|cause| cause == self)
    }

    fn found_in(&self, err: &Error) -> bool {
        // Context values live in anyhow's private wrapper, only the
        // error's own downcast sees them.
        err.downcast_ref::<E>() == Some(self) || err.chain().any(|cause| self.matches(cause))
    }
}

pub(crate) fn chain_contains(err: &Error, target: &dyn Sentinel) -> bool {
    target.found_in(err)
}

pub(crate) fn chain_contains_any(err: &Error, targets: &[&dyn Sentinel]) -> bool {
    targets.iter().any(|target| chain_contains(err, *target))
}
