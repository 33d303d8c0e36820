use crate::{MissingValue, Outcome};

/// An optional value: either [`Maybe::Some`] holding exactly one `T`, or
/// [`Maybe::None`] holding nothing.
///
/// Every operation is total. Transformations consume the container and
/// produce a new one, nothing is mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Maybe<T> {
    Some(T),
    None,
}

impl<T> Maybe<T> {
    /// Present state holding `value`.
    pub fn some(value: T) -> Self {
        Maybe::Some(value)
    }

    /// Absent state.
    pub fn none() -> Self {
        Maybe::None
    }

    pub fn is_some(&self) -> bool {
        matches!(self, Maybe::Some(_))
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }

    /// Returns the held value, or `fallback` when absent.
    pub fn or_else(self, fallback: T) -> T {
        match self {
            Maybe::Some(value) => value,
            Maybe::None => fallback,
        }
    }

    /// Returns the held value, or `T::default()` when absent.
    pub fn or_empty(self) -> T
    where
        T: Default,
    {
        self.or_else(T::default())
    }

    /// Splits into the value (default when absent) and the presence flag.
    pub fn get(self) -> (T, bool)
    where
        T: Default,
    {
        let present = self.is_some();
        (self.or_empty(), present)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Maybe::Some(value) => Some(value),
            Maybe::None => None,
        }
    }

    pub fn map<V>(self, f: impl FnOnce(T) -> V) -> Maybe<V> {
        match self {
            Maybe::Some(value) => Maybe::Some(f(value)),
            Maybe::None => Maybe::None,
        }
    }

    /// Turns absence into a failed [`Outcome`] carrying [`MissingValue`].
    pub fn ok_or_missing(self) -> Outcome<T> {
        match self {
            Maybe::Some(value) => Outcome::Ok(value),
            Maybe::None => Outcome::err(MissingValue),
        }
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::None
    }
}

impl<T> From<Option<T>> for Maybe<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Maybe::Some(value),
            None => Maybe::None,
        }
    }
}

impl<T> From<Maybe<T>> for Option<T> {
    fn from(value: Maybe<T>) -> Self {
        match value {
            Maybe::Some(value) => Some(value),
            Maybe::None => None,
        }
    }
}
