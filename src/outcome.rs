use std::error::Error as StdError;

use crate::error::{chain_contains, chain_contains_any};
use crate::{Error, Maybe, Mapper, Sentinel};

/// Success with a value, or failure with an opaque [`Error`].
///
/// The two states are exclusive by construction. Chaining methods
/// short-circuit: once an `Outcome` is `Err`, every `then_*` step returns it
/// unchanged without calling the supplied function.
#[derive(Debug)]
#[must_use]
pub enum Outcome<T> {
    Ok(T),
    Err(Error),
}

impl<T> Outcome<T> {
    /// Success holding `value`.
    pub fn ok(value: T) -> Self {
        Outcome::Ok(value)
    }

    /// Failure holding `error`.
    pub fn err(error: impl Into<Error>) -> Self {
        Outcome::Err(error.into())
    }

    /// Runs `f` exactly once and classifies what it returned.
    pub fn attempt<F, E>(f: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Error>,
    {
        f().into()
    }

    /// Builds an outcome from a raw value and error pair. A present error
    /// always wins, the value is then dropped.
    pub fn from_parts(value: T, error: Option<Error>) -> Self {
        match error {
            Some(error) => Outcome::Err(error),
            None => Outcome::Ok(value),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Err(error) => Some(error),
        }
    }

    /// Whether `target` appears anywhere in the cause chain of the held
    /// error. Always `false` for a success.
    pub fn error_is(&self, target: &dyn Sentinel) -> bool {
        self.error().is_some_and(|err| chain_contains(err, target))
    }

    /// Like [`Outcome::error_is`], but matches any cause of type `E`.
    pub fn error_is_kind<E>(&self) -> bool
    where
        E: StdError + Send + Sync + 'static,
    {
        self.error()
            .is_some_and(|err| err.is::<E>() || err.chain().any(|cause| cause.is::<E>()))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Err(_) => None,
        }
    }

    /// Splits into the value (default on failure) and the error, if any.
    pub fn get(self) -> (T, Option<Error>)
    where
        T: Default,
    {
        match self {
            Outcome::Ok(value) => (value, None),
            Outcome::Err(error) => (T::default(), Some(error)),
        }
    }

    pub fn or_else(self, fallback: T) -> T {
        match self {
            Outcome::Ok(value) => value,
            Outcome::Err(_) => fallback,
        }
    }

    pub fn or_empty(self) -> T
    where
        T: Default,
    {
        self.or_else(T::default())
    }

    /// Runs `f` if this is a success, accumulating its failure otherwise.
    /// `f` does not see the current value.
    pub fn then_try<F, E>(self, f: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Error>,
    {
        match self {
            Outcome::Ok(_) => Outcome::attempt(f),
            Outcome::Err(_) => self,
        }
    }

    /// Feeds the current value into `f` and wraps what it returns.
    pub fn then_call<F, E>(self, f: F) -> Self
    where
        F: FnOnce(T) -> Result<T, E>,
        E: Into<Error>,
    {
        match self {
            Outcome::Ok(value) => call(f, value),
            Outcome::Err(_) => self,
        }
    }

    /// Feeds the current value into `f`, which decides the next outcome
    /// itself.
    pub fn then_call_result<F>(self, f: F) -> Self
    where
        F: FnOnce(T) -> Outcome<T>,
    {
        match self {
            Outcome::Ok(value) => f(value),
            Outcome::Err(_) => self,
        }
    }

    /// Runs a fallible side effect against the current value.
    ///
    /// If `f` fails with an error whose cause chain contains one of the
    /// `ignore` sentinels, the failure is dropped and the value is kept.
    /// Any other failure replaces this outcome.
    ///
    /// ```
    /// use ffp::Outcome;
    ///
    /// #[derive(Debug, PartialEq, thiserror::Error)]
    /// #[error("already exists")]
    /// struct AlreadyExists;
    ///
    /// let created = Outcome::ok("report.txt")
    ///     .if_not_error(|_| Err(AlreadyExists), &[&AlreadyExists]);
    ///
    /// assert_eq!(created.or_empty(), "report.txt");
    /// ```
    pub fn if_not_error<F, E>(self, f: F, ignore: &[&dyn Sentinel]) -> Self
    where
        F: FnOnce(&T) -> Result<(), E>,
        E: Into<Error>,
    {
        let value = match self {
            Outcome::Ok(value) => value,
            Outcome::Err(_) => return self,
        };

        match f(&value) {
            Ok(()) => Outcome::Ok(value),
            Err(err) => {
                let err = err.into();
                if chain_contains_any(&err, ignore) {
                    Outcome::Ok(value)
                } else {
                    Outcome::Err(err)
                }
            }
        }
    }

    /// Re-targets this outcome for a single type-changing step.
    pub fn mapper<V>(self) -> Mapper<T, V> {
        Mapper::from(self)
    }

    pub fn ok_value(self) -> Maybe<T> {
        match self {
            Outcome::Ok(value) => Maybe::Some(value),
            Outcome::Err(_) => Maybe::None,
        }
    }

    pub fn into_result(self) -> Result<T, Error> {
        self.into()
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<Error>,
{
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(value) => Outcome::Ok(value),
            Err(error) => Outcome::Err(error.into()),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Error> {
    fn from(value: Outcome<T>) -> Self {
        match value {
            Outcome::Ok(value) => Ok(value),
            Outcome::Err(error) => Err(error),
        }
    }
}

/// Calls `f(arg)` and wraps the result, without the closure `attempt` would
/// need.
pub fn call<A, V, E, F>(f: F, arg: A) -> Outcome<V>
where
    F: FnOnce(A) -> Result<V, E>,
    E: Into<Error>,
{
    f(arg).into()
}

/// Drops the value half of a fallible function, keeping only its failure.
/// Fits value-returning functions into [`Outcome::if_not_error`].
pub fn only_err<A, V, E, F>(f: F) -> impl Fn(&A) -> Result<(), E>
where
    A: ?Sized,
    F: Fn(&A) -> Result<V, E>,
{
    move |arg: &A| f(arg).map(|_| ())
}
