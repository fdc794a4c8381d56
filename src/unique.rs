use std::collections::hash_map::RandomState;
use std::collections::HashSet;
use std::fmt;
use std::hash::{BuildHasher, Hash};

use crate::stream::{Pull, Stream};

/// A stream of unique items, where items are compared by value.
///
/// This is created by [`Stream::unique`].
pub type Unique<S> = UniqueBy<
    S,
    <S as Stream>::Item,
    fn(&<S as Stream>::Item) -> <S as Stream>::Item,
>;

/// A stream that emits only the first item for each key.
///
/// Keys are computed by a projection supplied at construction. It's like a
/// hashing function, but it doesn't have to be one: any `Eq + Hash` value
/// works. The projection is called exactly once per item pulled from the
/// source, and should be pure.
///
/// Every distinct key seen is remembered for the lifetime of the stream, so
/// memory use grows with the number of distinct keys. Nothing is evicted.
///
/// # Example
///
/// ```
/// use fungi::Stream;
///
/// struct User {
///     id: u64,
///     name: &'static str,
/// }
///
/// let users = fungi::iter(vec![
///     User { id: 1, name: "ana" },
///     User { id: 2, name: "bo" },
///     User { id: 1, name: "ana (again)" },
/// ]);
/// let names: Vec<&str> = users
///     .unique_by(|u| u.id)
///     .map(|u| u.name)
///     .collect()
///     .unwrap();
/// assert_eq!(names, vec!["ana", "bo"]);
/// ```
pub struct UniqueBy<S, K, F, H = RandomState> {
    source: S,
    project: F,
    seen: HashSet<K, H>,
}

impl<S, K, F> UniqueBy<S, K, F>
where
    S: Stream,
    K: Eq + Hash,
    F: FnMut(&S::Item) -> K,
{
    /// Create a new stream that keeps the first item of `source` for each
    /// key returned by `project`.
    pub fn new(source: S, project: F) -> UniqueBy<S, K, F> {
        UniqueBy::with_hasher(source, project, RandomState::new())
    }
}

impl<S, K, F, H> UniqueBy<S, K, F, H>
where
    S: Stream,
    K: Eq + Hash,
    F: FnMut(&S::Item) -> K,
    H: BuildHasher,
{
    /// Like `new`, but hashes keys with the given hasher builder.
    pub fn with_hasher(
        source: S,
        project: F,
        hasher: H,
    ) -> UniqueBy<S, K, F, H> {
        UniqueBy { source, project, seen: HashSet::with_hasher(hasher) }
    }

    /// Returns the number of distinct keys seen so far.
    pub fn seen(&self) -> usize {
        self.seen.len()
    }
}

impl<S, K, F, H> fmt::Debug for UniqueBy<S, K, F, H>
where
    S: fmt::Debug,
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueBy")
            .field("source", &self.source)
            .field("seen", &self.seen.iter().collect::<Vec<&K>>())
            .finish()
    }
}

impl<S, K, F, H> Stream for UniqueBy<S, K, F, H>
where
    S: Stream,
    K: Eq + Hash,
    F: FnMut(&S::Item) -> K,
    H: BuildHasher,
{
    type Item = S::Item;
    type Error = S::Error;

    fn next(&mut self) -> Pull<S::Item, S::Error> {
        loop {
            let item = match self.source.next() {
                Pull::Item(item) => item,
                pull => return pull,
            };
            if self.seen.insert((self.project)(&item)) {
                return Pull::Item(item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use fnv::FnvBuildHasher;

    use crate::stream::{Pull, Stream};
    use crate::tests::Counter;
    use crate::{iter, try_iter};

    use super::UniqueBy;

    #[test]
    fn identity_keeps_first_occurrence() {
        let mut stream = iter(vec![1, 2, 2, 3, 1]).unique();
        assert_eq!(stream.next(), Pull::Item(1));
        assert_eq!(stream.next(), Pull::Item(2));
        assert_eq!(stream.next(), Pull::Item(3));
        assert_eq!(stream.next(), Pull::Exhausted);
        assert_eq!(stream.seen(), 3);
    }

    #[test]
    fn projection_keys() {
        let words = vec!["apple", "avocado", "banana", "blueberry", "cherry"];
        let firsts: Vec<&str> = iter(words)
            .unique_by(|w| w.as_bytes()[0])
            .collect()
            .unwrap();
        assert_eq!(firsts, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn projection_called_once_per_item() {
        let mut calls = 0;
        let got: Vec<u64> = Counter::exhausting(10)
            .unique_by(|n| {
                calls += 1;
                n % 3
            })
            .collect()
            .unwrap();
        assert_eq!(got, vec![1, 2, 3]);
        assert_eq!(calls, 10);
    }

    #[test]
    fn failure_passes_through() {
        let mut stream =
            try_iter(vec![Ok(1), Ok(1), Err("bad"), Ok(1), Ok(2)]).unique();
        assert_eq!(stream.next(), Pull::Item(1));
        assert_eq!(stream.next(), Pull::Failed("bad"));
        // Seen keys survive a failure.
        assert_eq!(stream.next(), Pull::Item(2));
        assert_eq!(stream.next(), Pull::Exhausted);
    }

    #[test]
    fn custom_hasher() {
        let stream = UniqueBy::with_hasher(
            iter(vec!["a", "b", "a", "c", "b"]),
            |s: &&str| s.to_string(),
            FnvBuildHasher::default(),
        );
        assert_eq!(stream.collect::<Vec<_>>(), Ok(vec!["a", "b", "c"]));
    }
}
