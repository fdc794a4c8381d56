use std::hash::Hash;

use crate::chunk::Chunk;
use crate::error::Result;
use crate::flatten::Flatten;
use crate::map::Map;
use crate::unique::{Unique, UniqueBy};

/// A boxed stream, useful for mixing streams with different concrete types.
///
/// For example, [`concat`](crate::concat) requires all of its sources to
/// have the same type. Boxing each source erases the difference.
pub type BoxStream<'a, T, E> = Box<dyn Stream<Item = T, Error = E> + 'a>;

/// The outcome of pulling a single value from a stream.
///
/// A stream distinguishes exactly two terminal signals. `Exhausted` means the
/// stream has ended normally and will never produce another item. `Failed`
/// means an operational error occurred while producing the next item. Whether
/// a failure is terminal is up to the stream reporting it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Pull<T, E> {
    /// The next item in the stream.
    Item(T),
    /// The stream has ended. It has no more items.
    Exhausted,
    /// The stream failed to produce its next item.
    Failed(E),
}

impl<T, E> Pull<T, E> {
    /// Returns true if and only if this is an item.
    pub fn is_item(&self) -> bool {
        matches!(*self, Pull::Item(_))
    }

    /// Returns true if and only if this signals normal exhaustion.
    pub fn is_exhausted(&self) -> bool {
        matches!(*self, Pull::Exhausted)
    }

    /// Returns true if and only if this signals a failure.
    pub fn is_failed(&self) -> bool {
        matches!(*self, Pull::Failed(_))
    }

    /// Returns the item, discarding either terminal signal.
    pub fn item(self) -> Option<T> {
        match self {
            Pull::Item(item) => Some(item),
            Pull::Exhausted | Pull::Failed(_) => None,
        }
    }

    /// Maps the item with `f`, leaving terminal signals untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Pull<U, E> {
        match self {
            Pull::Item(item) => Pull::Item(f(item)),
            Pull::Exhausted => Pull::Exhausted,
            Pull::Failed(err) => Pull::Failed(err),
        }
    }

    /// Maps the cause of a failure with `f`.
    pub fn map_err<E2, F: FnOnce(E) -> E2>(self, f: F) -> Pull<T, E2> {
        match self {
            Pull::Item(item) => Pull::Item(item),
            Pull::Exhausted => Pull::Exhausted,
            Pull::Failed(err) => Pull::Failed(f(err)),
        }
    }

    /// Converts this into the shape used by fallible iterators.
    ///
    /// `Exhausted` becomes `None`.
    pub fn into_option(self) -> Option<std::result::Result<T, E>> {
        match self {
            Pull::Item(item) => Some(Ok(item)),
            Pull::Exhausted => None,
            Pull::Failed(err) => Some(Err(err)),
        }
    }
}

impl<T, E> From<Option<std::result::Result<T, E>>> for Pull<T, E> {
    fn from(next: Option<std::result::Result<T, E>>) -> Pull<T, E> {
        match next {
            Some(Ok(item)) => Pull::Item(item),
            Some(Err(err)) => Pull::Failed(err),
            None => Pull::Exhausted,
        }
    }
}

/// Stream describes a lazy, pull-based sequence of values.
///
/// A stream is a capability: "give me the next item, or tell me why there
/// isn't one." Every call to `next` either produces an item, reports that the
/// stream is exhausted or reports a failure. Streams are single pass. Their
/// position is owned by the stream value itself, and there is no way to
/// rewind one.
///
/// Streams compose by wrapping. An adapter such as [`Chunk`] owns the stream
/// it transforms and pulls from it only when it is itself pulled. No adapter
/// in this crate pushes values or does work ahead of demand, so a chain of
/// adapters is driven entirely by whoever calls `next` on the outermost one.
///
/// # Differences from `Iterator`
///
/// `Iterator<Item = Result<T, E>>` can model most of this, but it conflates
/// "the next item is an error" with "iteration may continue afterwards."
/// `Stream` keeps the failure type separate from the item type, which lets
/// adapters like [`Chunk`] batch items while passing failures through
/// untouched. Use [`iter`](crate::iter) and [`try_iter`](crate::try_iter) to
/// go from iterators to streams, and the drain methods on this trait
/// ([`for_each`](Stream::for_each), [`collect`](Stream::collect), ...) to go
/// back.
///
/// # Behavior after a terminal signal
///
/// It is not specified what a stream does after it reports `Exhausted` or
/// `Failed`. Most streams in this crate keep reporting `Exhausted` once
/// exhausted. [`Chunk`] goes further and repeats whichever terminal signal
/// it saw on every subsequent pull without consulting its source again.
pub trait Stream {
    /// The type of the item emitted by this stream.
    type Item;
    /// The type of the failure cause reported by this stream.
    type Error;

    /// Pulls the next item from this stream.
    fn next(&mut self) -> Pull<Self::Item, Self::Error>;

    /// Groups this stream into ordered batches of exactly `size` items.
    ///
    /// The final batch may be shorter. See [`Chunk`] for details on how
    /// failures are handled.
    ///
    /// This returns an error if `size` is `0`.
    fn chunk(self, size: usize) -> Result<Chunk<Self>>
    where
        Self: Sized,
        Self::Error: Clone,
    {
        Chunk::new(self, size)
    }

    /// Expands a stream of batches into a stream of their items, in order.
    fn flatten(self) -> Flatten<Self>
    where
        Self: Sized,
        Self::Item: IntoIterator,
    {
        Flatten::new(self)
    }

    /// Keeps only the first item seen for each key produced by `project`.
    fn unique_by<K, F>(self, project: F) -> UniqueBy<Self, K, F>
    where
        Self: Sized,
        K: Eq + Hash,
        F: FnMut(&Self::Item) -> K,
    {
        UniqueBy::new(self, project)
    }

    /// Keeps only the first occurrence of each item.
    fn unique(self) -> Unique<Self>
    where
        Self: Sized,
        Self::Item: Eq + Hash + Clone,
    {
        let identity: fn(&Self::Item) -> Self::Item = Clone::clone;
        UniqueBy::new(self, identity)
    }

    /// Applies `f` to every item in this stream.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> U,
    {
        Map::new(self, f)
    }

    /// Borrows this stream rather than consuming it.
    ///
    /// This is useful for draining part of a stream with an adapter and then
    /// continuing with the original.
    fn by_ref(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this stream, erasing its concrete type.
    fn boxed<'a>(self) -> BoxStream<'a, Self::Item, Self::Error>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }

    /// Calls `f` on every item until the stream is exhausted.
    ///
    /// The first failure reported by the stream stops the drain and is
    /// returned.
    fn for_each<F>(mut self, mut f: F) -> std::result::Result<(), Self::Error>
    where
        Self: Sized,
        F: FnMut(Self::Item),
    {
        loop {
            match self.next() {
                Pull::Item(item) => f(item),
                Pull::Exhausted => return Ok(()),
                Pull::Failed(err) => return Err(err),
            }
        }
    }

    /// Calls a fallible `f` on every item until the stream is exhausted.
    ///
    /// The drain stops at the first failure, whether it was reported by the
    /// stream or returned by `f`.
    ///
    /// Streams that cannot fail report `Infallible`, so `E` must implement
    /// `From<Infallible>` for them.
    fn try_for_each<F, E>(mut self, mut f: F) -> std::result::Result<(), E>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> std::result::Result<(), E>,
        E: From<Self::Error>,
    {
        loop {
            match self.next() {
                Pull::Item(item) => f(item)?,
                Pull::Exhausted => return Ok(()),
                Pull::Failed(err) => return Err(E::from(err)),
            }
        }
    }

    /// Drains this stream into a collection.
    fn collect<C>(mut self) -> std::result::Result<C, Self::Error>
    where
        Self: Sized,
        C: Default + Extend<Self::Item>,
    {
        let mut collection = C::default();
        loop {
            match self.next() {
                Pull::Item(item) => collection.extend(Some(item)),
                Pull::Exhausted => return Ok(collection),
                Pull::Failed(err) => return Err(err),
            }
        }
    }

    /// Drains this stream, returning the number of items it produced.
    fn count(self) -> std::result::Result<usize, Self::Error>
    where
        Self: Sized,
    {
        let mut count = 0;
        self.for_each(|_| count += 1)?;
        Ok(count)
    }
}

impl<'s, S: Stream + ?Sized> Stream for &'s mut S {
    type Item = S::Item;
    type Error = S::Error;

    fn next(&mut self) -> Pull<S::Item, S::Error> {
        (**self).next()
    }
}

impl<S: Stream + ?Sized> Stream for Box<S> {
    type Item = S::Item;
    type Error = S::Error;

    fn next(&mut self) -> Pull<S::Item, S::Error> {
        (**self).next()
    }
}

/// IntoStream describes types that can be converted to streams.
///
/// This is analogous to the `IntoIterator` trait for `Iterator` in
/// `std::iter`.
pub trait IntoStream {
    /// The type of the item emitted by the stream.
    type Item;
    /// The type of the failure cause reported by the stream.
    type Error;
    /// The type of the stream to be constructed.
    type IntoStream: Stream<Item = Self::Item, Error = Self::Error>;

    /// Construct a stream from `Self`.
    fn into_stream(self) -> Self::IntoStream;
}

impl<S: Stream> IntoStream for S {
    type Item = S::Item;
    type Error = S::Error;
    type IntoStream = S;

    fn into_stream(self) -> S {
        self
    }
}
