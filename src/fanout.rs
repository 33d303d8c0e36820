use std::borrow::Cow;
use std::sync::Arc;

use crossbeam_channel::bounded;
use rayon::ThreadPool;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{Error, Outcome};

/// Settings for the concurrent map engine.
///
/// Every batch spawns one task per input element; the pool only decides
/// which threads run them. Without a pool, rayon's global pool is used.
#[derive(Debug, Clone)]
pub struct Fanout {
    pool: Option<Arc<ThreadPool>>,
    label: Cow<'static, str>,
}

impl Default for Fanout {
    fn default() -> Self {
        Self {
            pool: None,
            label: Cow::Borrowed("fanout"),
        }
    }
}

impl Fanout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run tasks on a dedicated pool instead of the global one.
    pub fn with_pool(mut self, pool: Arc<ThreadPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Name attached to the log events of this engine.
    pub fn label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// Applies `f` to every element concurrently, one task per element.
    ///
    /// The output holds exactly one `f(x)` per input `x`, in the order the
    /// tasks happened to finish. Nothing ties output positions to input
    /// positions; use [`Fanout::map_ordered`] when that matters.
    pub fn map<I, T, V, F>(&self, vals: I, f: F) -> Vec<V>
    where
        I: IntoIterator<Item = T>,
        T: Send,
        V: Send,
        F: Fn(T) -> V + Sync,
    {
        self.dispatch(vals.into_iter().collect(), f)
    }

    /// Like [`Fanout::map`] for a fallible `f`.
    ///
    /// Each element's failure lands in its own slot, no failure stops or
    /// hides the others. There is no batch-level error: inspect every
    /// returned [`Outcome`].
    pub fn map_result<I, T, V, E, F>(&self, vals: I, f: F) -> Vec<Outcome<V>>
    where
        I: IntoIterator<Item = T>,
        T: Send,
        V: Send,
        E: Into<Error>,
        F: Fn(T) -> Result<V, E> + Sync,
    {
        let results = self.dispatch(vals.into_iter().collect(), |val| Outcome::from(f(val)));

        let failed = results.iter().filter(|res| res.is_err()).count();
        if failed > 0 {
            tracing::debug!(label = %self.label, failed, total = results.len(), "batch had failures");
        }

        results
    }

    /// Applies `f` concurrently and keeps positions: slot `i` of the output
    /// belongs to element `i` of the input.
    pub fn map_ordered<I, T, V, F>(&self, vals: I, f: F) -> Vec<V>
    where
        I: IntoIterator<Item = T>,
        T: Send,
        V: Send,
        F: Fn(T) -> V + Sync + Send,
    {
        let vals: Vec<T> = vals.into_iter().collect();
        tracing::debug!(label = %self.label, tasks = vals.len(), "dispatching ordered batch");

        self.install(|| vals.into_par_iter().map(f).collect())
    }

    /// Ordered counterpart of [`Fanout::map_result`].
    pub fn map_ordered_result<I, T, V, E, F>(&self, vals: I, f: F) -> Vec<Outcome<V>>
    where
        I: IntoIterator<Item = T>,
        T: Send,
        V: Send,
        E: Into<Error>,
        F: Fn(T) -> Result<V, E> + Sync + Send,
    {
        self.map_ordered(vals, |val| Outcome::from(f(val)))
    }

    /// Spawns one task per element and collects what they send back on a
    /// channel sized to hold every result at once.
    fn dispatch<T, R, F>(&self, vals: Vec<T>, f: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Sync,
    {
        let total = vals.len();
        tracing::debug!(label = %self.label, tasks = total, "dispatching batch");

        let (sender, receiver) = bounded::<R>(total);
        let label = &self.label;
        let f = &f;

        self.scope(move |s| {
            for (index, val) in vals.into_iter().enumerate() {
                let sender = sender.clone();

                s.spawn(move |_| {
                    let result = f(val);
                    tracing::trace!(label = %label, index, "task completed");
                    let _ = sender.send(result);
                });
            }
            // The original sender is dropped here, the channel disconnects
            // once the last task drops its clone.
        });

        let results: Vec<R> = receiver.iter().collect();
        debug_assert_eq!(results.len(), total);

        tracing::debug!(label = %self.label, received = results.len(), "batch drained");
        results
    }

    fn scope<'scope, OP>(&self, op: OP)
    where
        OP: FnOnce(&rayon::Scope<'scope>) + Send,
    {
        match &self.pool {
            Some(pool) => pool.scope(op),
            None => rayon::scope(op),
        }
    }

    fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

/// Applies `f` to every element concurrently on rayon's global pool.
///
/// Output order follows task completion, not input order:
///
/// ```
/// let mut doubled = ffp::map_concurrent(1..=4, |x| x * 2);
/// doubled.sort();
/// assert_eq!(doubled, [2, 4, 6, 8]);
/// ```
pub fn map_concurrent<I, T, V, F>(vals: I, f: F) -> Vec<V>
where
    I: IntoIterator<Item = T>,
    T: Send,
    V: Send,
    F: Fn(T) -> V + Sync,
{
    Fanout::default().map(vals, f)
}

/// Applies a fallible `f` to every element concurrently on rayon's global
/// pool, returning one [`Outcome`] per element in completion order.
pub fn map_concurrent_result<I, T, V, E, F>(vals: I, f: F) -> Vec<Outcome<V>>
where
    I: IntoIterator<Item = T>,
    T: Send,
    V: Send,
    E: Into<Error>,
    F: Fn(T) -> Result<V, E> + Sync,
{
    Fanout::default().map_result(vals, f)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    use rayon::ThreadPoolBuilder;

    use super::*;
    use crate::seq::{map_or_empty, partition_outcomes};

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("rejected input {0}")]
    struct Rejected(i32);

    fn input() -> Vec<i32> {
        vec![1, 2, 3, 4, 5, 6, 7, 8, 9]
    }

    fn pool(threads: usize) -> Arc<ThreadPool> {
        Arc::new(ThreadPoolBuilder::new().num_threads(threads).build().unwrap())
    }

    #[test]
    fn test_map_concurrent() {
        let mut out = map_concurrent(input(), |x| x * 2);
        out.sort();
        assert_eq!(out, vec![2, 4, 6, 8, 10, 12, 14, 16, 18]);
    }

    #[test]
    fn test_map_concurrent_empty() {
        let out: Vec<i32> = map_concurrent(Vec::<i32>::new(), |x| x);
        assert!(out.is_empty());

        let out = map_concurrent_result(Vec::<i32>::new(), |x| Ok::<_, Error>(x));
        assert!(out.is_empty());
    }

    #[test]
    fn test_map_concurrent_calls_once_per_element() {
        let calls = AtomicUsize::new(0);
        let input: Vec<i32> = (0..200).collect();

        let mut out = map_concurrent(&input, |x| {
            calls.fetch_add(1, Ordering::SeqCst);
            x + 1
        });

        assert_eq!(calls.load(Ordering::SeqCst), input.len());
        out.sort();
        assert_eq!(out, (1..=200).collect::<Vec<_>>());
    }

    #[test]
    fn test_map_concurrent_slow_task() {
        let mut out = Fanout::new().with_pool(pool(4)).map(input(), |x| {
            if x == 1 {
                thread::sleep(Duration::from_millis(30));
            }
            x * 10
        });
        out.sort();
        assert_eq!(out, vec![10, 20, 30, 40, 50, 60, 70, 80, 90]);
    }

    #[test]
    fn test_map_concurrent_result_all_ok() {
        let out = map_concurrent_result(input(), |x| Ok::<_, Error>(x * 2));
        assert_eq!(out.len(), 9);
        assert!(out.iter().all(Outcome::is_ok));

        let mut values = map_or_empty(out);
        values.sort();
        assert_eq!(values, vec![2, 4, 6, 8, 10, 12, 14, 16, 18]);
    }

    #[test]
    fn test_map_concurrent_result_isolates_failures() {
        let out = map_concurrent_result(input(), |x| if x % 2 == 0 { Err(Rejected(x)) } else { Ok(x) });

        assert_eq!(out.len(), 9);
        assert_eq!(out.iter().filter(|res| res.is_err()).count(), 4);
        assert_eq!(out.iter().filter(|res| res.is_ok()).count(), 5);

        let (mut values, errors) = partition_outcomes(out);
        values.sort();
        assert_eq!(values, vec![1, 3, 5, 7, 9]);

        let mut failed: Vec<i32> = errors
            .iter()
            .map(|err| err.downcast_ref::<Rejected>().unwrap().0)
            .collect();
        failed.sort();
        assert_eq!(failed, vec![2, 4, 6, 8]);
    }

    #[test]
    fn test_map_concurrent_result_calls_once_per_element() {
        let calls = AtomicUsize::new(0);
        let out = map_concurrent_result(input(), |x| {
            calls.fetch_add(1, Ordering::SeqCst);
            if x > 5 { Err(Rejected(x)) } else { Ok(x) }
        });

        assert_eq!(out.len(), 9);
        assert_eq!(calls.load(Ordering::SeqCst), 9);
    }

    #[test]
    fn test_single_thread_pool() {
        let fanout = Fanout::new().with_pool(pool(1)).label("single");

        let mut out = fanout.map(0..64, |x| x * x);
        out.sort();
        assert_eq!(out, (0..64).map(|x| x * x).collect::<Vec<_>>());

        let out = fanout.map_result(0..64, |x| Ok::<_, Error>(x));
        assert_eq!(out.len(), 64);
    }

    #[test]
    fn test_map_ordered() {
        let fanout = Fanout::new().with_pool(pool(3));
        let out = fanout.map_ordered(input(), |x| x * 2);
        assert_eq!(out, vec![2, 4, 6, 8, 10, 12, 14, 16, 18]);

        let out = Fanout::default().map_ordered(input(), |x| x - 1);
        assert_eq!(out, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_map_ordered_result() {
        let out = Fanout::default()
            .map_ordered_result(input(), |x| if x % 2 == 0 { Err(Rejected(x)) } else { Ok(x) });

        for (i, res) in out.iter().enumerate() {
            let x = i as i32 + 1;
            if x % 2 == 0 {
                assert!(res.error_is(&Rejected(x)));
            } else {
                assert_eq!(res.value(), Some(&x));
            }
        }
    }
}
