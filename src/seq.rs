//! Single-threaded helpers that pair with the concurrent engine.

use crate::{Error, Outcome};

/// Keeps the elements for which `f` returns `true`, in their original order.
pub fn filter<I, T, F>(vals: I, mut f: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> bool,
{
    vals.into_iter().filter(|val| f(val)).collect()
}

/// Applies `f` to each element. Output slot `i` belongs to input slot `i`.
pub fn map<I, T, V, F>(vals: I, f: F) -> Vec<V>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> V,
{
    vals.into_iter().map(f).collect()
}

/// Positional map with a fallible `f`, one [`Outcome`] per element.
pub fn map_result<I, T, V, E, F>(vals: I, mut f: F) -> Vec<Outcome<V>>
where
    I: IntoIterator<Item = T>,
    E: Into<Error>,
    F: FnMut(T) -> Result<V, E>,
{
    vals.into_iter().map(|val| Outcome::from(f(val))).collect()
}

/// Collapses each outcome to its value, failures become `T::default()`.
pub fn map_or_empty<I, T>(vals: I) -> Vec<T>
where
    I: IntoIterator<Item = Outcome<T>>,
    T: Default,
{
    vals.into_iter().map(Outcome::or_empty).collect()
}

/// Splits a batch into its successful values and its errors.
pub fn partition_outcomes<I, T>(vals: I) -> (Vec<T>, Vec<Error>)
where
    I: IntoIterator<Item = Outcome<T>>,
{
    let mut values = Vec::new();
    let mut errors = Vec::new();

    for val in vals {
        match val {
            Outcome::Ok(value) => values.push(value),
            Outcome::Err(error) => errors.push(error),
        }
    }

    (values, errors)
}

/// `true` when every element satisfies `f`, stopping at the first one that
/// doesn't. Empty input yields `true`.
pub fn every<I, T, F>(vals: I, f: F) -> bool
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> bool,
{
    vals.into_iter().all(f)
}

pub fn for_each<I, T, F>(vals: I, f: F)
where
    I: IntoIterator<Item = T>,
    F: FnMut(T),
{
    vals.into_iter().for_each(f)
}
