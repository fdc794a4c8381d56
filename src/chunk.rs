use std::fmt;
use std::mem;

use crate::error::{Error, Result};
use crate::stream::{Pull, Stream};

/// The most items a chunker reserves room for ahead of time.
const RESERVE_LIMIT: usize = 1024;

/// A stream that groups the items of another stream into ordered batches.
///
/// Every batch has exactly the requested size, except possibly the last one,
/// which holds whatever items remained when the source was exhausted.
/// Concatenating all of the batches in order reproduces the source.
///
/// # Terminal signals are sticky
///
/// Once the source reports [`Pull::Exhausted`] or [`Pull::Failed`], the
/// chunker remembers it. Every later pull reports the same signal again (a
/// failure is cloned) without pulling the source, so it is always safe to
/// keep pulling a chunker even when its source is not.
///
/// # Failures discard the partial batch
///
/// If the source fails while a batch is being filled, the items collected
/// for that batch are dropped and the failure is returned in place of the
/// batch. A failure is never turned into a short batch.
///
/// # Example
///
/// ```
/// use fungi::Stream;
///
/// let batches: Vec<Vec<u32>> = fungi::iter(1..=10)
///     .chunk(3)
///     .unwrap()
///     .collect()
///     .unwrap();
/// assert_eq!(batches, vec![
///     vec![1, 2, 3],
///     vec![4, 5, 6],
///     vec![7, 8, 9],
///     vec![10],
/// ]);
/// ```
pub struct Chunk<S: Stream> {
    source: S,
    size: usize,
    buf: Vec<S::Item>,
    state: State<S::Error>,
}

#[derive(Debug)]
enum State<E> {
    Running,
    Exhausted,
    Failed(E),
}

impl<S: Stream> Chunk<S> {
    /// Create a new chunker that emits batches of `size` items from
    /// `source`.
    ///
    /// This returns an error if `size` is `0`.
    pub fn new(source: S, size: usize) -> Result<Chunk<S>> {
        if size == 0 {
            return Err(Error::InvalidChunkSize { got: size });
        }
        Ok(Chunk {
            source,
            size,
            buf: Vec::with_capacity(size.min(RESERVE_LIMIT)),
            state: State::Running,
        })
    }

    /// Returns the size of each full batch.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Consumes this chunker and returns its source.
    ///
    /// Any items buffered for an incomplete batch are dropped.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S> fmt::Debug for Chunk<S>
where
    S: Stream + fmt::Debug,
    S::Item: fmt::Debug,
    S::Error: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("source", &self.source)
            .field("size", &self.size)
            .field("buf", &self.buf)
            .field("state", &self.state)
            .finish()
    }
}

impl<S> Stream for Chunk<S>
where
    S: Stream,
    S::Error: Clone,
{
    type Item = Vec<S::Item>;
    type Error = S::Error;

    fn next(&mut self) -> Pull<Vec<S::Item>, S::Error> {
        match self.state {
            State::Running => {}
            State::Exhausted => return Pull::Exhausted,
            State::Failed(ref err) => return Pull::Failed(err.clone()),
        }
        while self.buf.len() < self.size {
            match self.source.next() {
                Pull::Item(item) => self.buf.push(item),
                Pull::Exhausted => {
                    tracing::trace!(
                        buffered = self.buf.len(),
                        "chunk source exhausted"
                    );
                    self.state = State::Exhausted;
                    if self.buf.is_empty() {
                        return Pull::Exhausted;
                    }
                    return Pull::Item(mem::take(&mut self.buf));
                }
                Pull::Failed(err) => {
                    tracing::trace!(
                        discarded = self.buf.len(),
                        "chunk source failed"
                    );
                    self.state = State::Failed(err.clone());
                    self.buf.clear();
                    return Pull::Failed(err);
                }
            }
        }
        let batch = Vec::with_capacity(self.size.min(RESERVE_LIMIT));
        Pull::Item(mem::replace(&mut self.buf, batch))
    }
}
