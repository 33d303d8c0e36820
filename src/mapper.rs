use std::marker::PhantomData;

use crate::{Error, Outcome};

/// An [`Outcome<T>`] waiting for one step that changes its value type to `V`.
///
/// The `then_*` combinators keep the type fixed, a mapper is the single
/// exit from a chain into a new type.
///
/// ```
/// use ffp::Outcome;
///
/// let len = Outcome::ok("  padded ")
///     .then_call(|s| Ok::<_, ffp::Error>(s.trim()))
///     .mapper::<usize>()
///     .map(|s| Ok::<_, ffp::Error>(s.len()));
///
/// assert_eq!(len.or_empty(), 6);
/// ```
#[derive(Debug)]
#[must_use]
pub struct Mapper<T, V> {
    inner: Outcome<T>,
    target: PhantomData<fn() -> V>,
}

impl<T, V> Mapper<T, V> {
    /// Forwards an existing failure as `Outcome<V>`, otherwise feeds the
    /// value into `f` and wraps what it returns.
    pub fn map<F, E>(self, f: F) -> Outcome<V>
    where
        F: FnOnce(T) -> Result<V, E>,
        E: Into<Error>,
    {
        match self.inner {
            Outcome::Ok(value) => crate::call(f, value),
            Outcome::Err(error) => Outcome::Err(error),
        }
    }
}

impl<T, V> From<Outcome<T>> for Mapper<T, V> {
    fn from(inner: Outcome<T>) -> Self {
        Self {
            inner,
            target: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("bad input")]
    struct BadInput;

    #[test]
    fn test_map_changes_type() {
        let r: Outcome<String> = Outcome::ok(41)
            .mapper()
            .map(|x: i32| Ok::<_, Error>(format!("#{}", x + 1)));
        assert_eq!(r.or_empty(), "#42");
    }

    #[test]
    fn test_map_propagates_failure() {
        let calls = Cell::new(0);
        let r = Mapper::<i32, String>::from(Outcome::err(BadInput)).map(|x| {
            calls.set(calls.get() + 1);
            Ok::<_, Error>(x.to_string())
        });

        assert_eq!(calls.get(), 0);
        assert!(r.error_is(&BadInput));
    }

    #[test]
    fn test_map_wraps_new_failure() {
        let r = Outcome::ok("abc")
            .mapper::<u8>()
            .map(|s| s.parse::<u8>());
        assert!(r.is_err());
        assert!(r.error_is_kind::<std::num::ParseIntError>());
    }
}
