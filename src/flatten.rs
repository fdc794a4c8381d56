use std::fmt;

use crate::stream::{Pull, Stream};

/// A stream that expands a stream of batches into their individual items.
///
/// Batches are any `IntoIterator`, most commonly the `Vec`s produced by
/// [`Chunk`](crate::Chunk). Items are emitted in order, batch by batch.
/// Empty batches are skipped without being observable by the consumer.
///
/// This does not deduplicate items, which can be done with
/// [`Stream::unique_by`].
///
/// # Example
///
/// ```
/// use fungi::Stream;
///
/// let items: Vec<u64> = fungi::iter(vec![vec![1, 2, 3], vec![], vec![4, 5]])
///     .flatten()
///     .collect()
///     .unwrap();
/// assert_eq!(items, vec![1, 2, 3, 4, 5]);
/// ```
pub struct Flatten<S>
where
    S: Stream,
    S::Item: IntoIterator,
{
    source: S,
    cur: Option<<S::Item as IntoIterator>::IntoIter>,
}

impl<S> Flatten<S>
where
    S: Stream,
    S::Item: IntoIterator,
{
    /// Create a new stream over the items of the batches in `source`.
    pub fn new(source: S) -> Flatten<S> {
        Flatten { source, cur: None }
    }
}

impl<S> fmt::Debug for Flatten<S>
where
    S: Stream + fmt::Debug,
    S::Item: IntoIterator,
    <S::Item as IntoIterator>::IntoIter: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flatten")
            .field("source", &self.source)
            .field("cur", &self.cur)
            .finish()
    }
}

impl<S> Stream for Flatten<S>
where
    S: Stream,
    S::Item: IntoIterator,
{
    type Item = <S::Item as IntoIterator>::Item;
    type Error = S::Error;

    fn next(&mut self) -> Pull<Self::Item, S::Error> {
        loop {
            if let Some(item) = self.cur.as_mut().and_then(Iterator::next) {
                return Pull::Item(item);
            }
            match self.source.next() {
                Pull::Item(batch) => self.cur = Some(batch.into_iter()),
                Pull::Exhausted => {
                    self.cur = None;
                    return Pull::Exhausted;
                }
                Pull::Failed(err) => {
                    self.cur = None;
                    return Pull::Failed(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::stream::{Pull, Stream};
    use crate::{iter, try_iter};

    #[test]
    fn batches_in_order() {
        let mut stream = iter(vec![vec![1, 2, 3], vec![4, 5]]).flatten();
        for expected in 1..=5 {
            assert_eq!(stream.next(), Pull::Item(expected));
        }
        assert_eq!(stream.next(), Pull::Exhausted);
    }

    #[test]
    fn empty_batches_skipped() {
        let mut stream = iter(vec![vec![1], vec![], vec![2]]).flatten();
        assert_eq!(stream.next(), Pull::Item(1));
        assert_eq!(stream.next(), Pull::Item(2));
        assert_eq!(stream.next(), Pull::Exhausted);
    }

    #[test]
    fn only_empty_batches() {
        let batches: Vec<Vec<u8>> = vec![vec![], vec![], vec![]];
        let mut stream = iter(batches).flatten();
        assert_eq!(stream.next(), Pull::Exhausted);
    }

    #[test]
    fn failure_between_batches() {
        let mut stream = try_iter(vec![
            Ok(vec!['a', 'b']),
            Err("bad batch"),
            Ok(vec![]),
            Ok(vec!['c']),
        ])
        .flatten();
        assert_eq!(stream.next(), Pull::Item('a'));
        assert_eq!(stream.next(), Pull::Item('b'));
        assert_eq!(stream.next(), Pull::Failed("bad batch"));
        assert_eq!(stream.next(), Pull::Item('c'));
        assert_eq!(stream.next(), Pull::Exhausted);
    }

    #[test]
    fn any_into_iterator_batch() {
        let words = iter(vec!["ab", "", "cd"]).map(str::chars).flatten();
        assert_eq!(words.collect::<String>(), Ok("abcd".to_string()));
    }
}
