use std::convert::Infallible;

use crate::stream::{Pull, Stream};

/// Creates a stream that yields every item of `it` in order.
///
/// The stream never fails.
///
/// # Example
///
/// ```
/// use fungi::Stream;
///
/// let mut sum = 0;
/// fungi::iter(vec![1, 2, 3]).for_each(|n| sum += n).unwrap();
/// assert_eq!(sum, 6);
/// ```
pub fn iter<I: IntoIterator>(it: I) -> Iter<I::IntoIter> {
    Iter { it: it.into_iter() }
}

/// Creates a stream from an iterator of results.
///
/// Every `Ok` value is yielded as an item and every `Err` value is reported
/// as a failure. A failure is not terminal: pulling again continues with the
/// next element of `it`.
pub fn try_iter<T, E, I>(it: I) -> TryIter<I::IntoIter>
where
    I: IntoIterator<Item = std::result::Result<T, E>>,
{
    TryIter { it: it.into_iter() }
}

/// A stream over the items of an iterator.
///
/// This is created by [`iter`].
#[derive(Clone, Debug)]
pub struct Iter<I> {
    it: I,
}

impl<I: Iterator> Stream for Iter<I> {
    type Item = I::Item;
    type Error = Infallible;

    fn next(&mut self) -> Pull<I::Item, Infallible> {
        match self.it.next() {
            Some(item) => Pull::Item(item),
            None => Pull::Exhausted,
        }
    }
}

/// A stream over an iterator of results.
///
/// This is created by [`try_iter`].
#[derive(Clone, Debug)]
pub struct TryIter<I> {
    it: I,
}

impl<T, E, I> Stream for TryIter<I>
where
    I: Iterator<Item = std::result::Result<T, E>>,
{
    type Item = T;
    type Error = E;

    fn next(&mut self) -> Pull<T, E> {
        Pull::from(self.it.next())
    }
}
