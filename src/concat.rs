use std::iter::FromIterator;

use crate::stream::{IntoStream, Pull, Stream};

/// Joins together multiple streams, one after the other.
///
/// Every item of the first stream is emitted before any item of the second,
/// and so on. Each source is dropped as soon as it is exhausted.
///
/// All sources must have the same type. Use
/// [`Stream::boxed`](crate::Stream::boxed) to mix streams of different
/// concrete types.
///
/// # Example
///
/// ```
/// use fungi::Stream;
///
/// let joined: Vec<u64> = fungi::concat(vec![
///     fungi::iter(vec![1, 2, 3]),
///     fungi::iter(vec![4, 5]),
/// ]).collect().unwrap();
/// assert_eq!(joined, vec![1, 2, 3, 4, 5]);
/// ```
pub fn concat<I>(streams: I) -> Concat<<I::Item as IntoStream>::IntoStream>
where
    I: IntoIterator,
    I::Item: IntoStream,
{
    streams.into_iter().collect()
}

/// A stream that concatenates a list of streams.
///
/// A failure from the current source is passed through without moving on to
/// the next source. Pulling again retries the source that failed.
///
/// This is created by [`concat`], or by collecting streams into it.
#[derive(Clone, Debug)]
pub struct Concat<S> {
    // Remaining sources, in reverse order so that the current source is
    // always last.
    sources: Vec<S>,
}

impl<S: Stream> Concat<S> {
    /// Create a concatenation with no sources.
    ///
    /// Until a source is pushed, pulling it reports exhaustion.
    pub fn new() -> Concat<S> {
        Concat { sources: vec![] }
    }

    /// Add a stream after all of the streams already in this concatenation.
    pub fn push<I>(&mut self, stream: I)
    where
        I: IntoStream<IntoStream = S>,
    {
        self.sources.insert(0, stream.into_stream());
    }

    /// Returns the number of sources that have not yet been exhausted.
    pub fn remaining(&self) -> usize {
        self.sources.len()
    }
}

impl<S: Stream> Default for Concat<S> {
    fn default() -> Concat<S> {
        Concat::new()
    }
}

impl<S, I> Extend<I> for Concat<S>
where
    S: Stream,
    I: IntoStream<IntoStream = S>,
{
    fn extend<T>(&mut self, it: T)
    where
        T: IntoIterator<Item = I>,
    {
        let mut added: Vec<S> =
            it.into_iter().map(IntoStream::into_stream).collect();
        added.reverse();
        added.append(&mut self.sources);
        self.sources = added;
    }
}

impl<S, I> FromIterator<I> for Concat<S>
where
    S: Stream,
    I: IntoStream<IntoStream = S>,
{
    fn from_iter<T>(it: T) -> Concat<S>
    where
        T: IntoIterator<Item = I>,
    {
        let mut concat = Concat::new();
        concat.extend(it);
        concat
    }
}

impl<S: Stream> Stream for Concat<S> {
    type Item = S::Item;
    type Error = S::Error;

    fn next(&mut self) -> Pull<S::Item, S::Error> {
        while let Some(source) = self.sources.last_mut() {
            match source.next() {
                Pull::Exhausted => {
                    self.sources.pop();
                    tracing::trace!(
                        remaining = self.sources.len(),
                        "concat source exhausted"
                    );
                }
                pull => return pull,
            }
        }
        Pull::Exhausted
    }
}
