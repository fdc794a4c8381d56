use std::fmt;

use crate::stream::{Pull, Stream};

/// A stream that applies a function to every item of another stream.
///
/// Terminal signals pass through unchanged.
///
/// This is created by [`Stream::map`].
pub struct Map<S, F> {
    source: S,
    f: F,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(source: S, f: F) -> Map<S, F> {
        Map { source, f }
    }
}

impl<S: fmt::Debug, F> fmt::Debug for Map<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map").field("source", &self.source).finish()
    }
}

impl<S, F, U> Stream for Map<S, F>
where
    S: Stream,
    F: FnMut(S::Item) -> U,
{
    type Item = U;
    type Error = S::Error;

    fn next(&mut self) -> Pull<U, S::Error> {
        self.source.next().map(&mut self.f)
    }
}

#[cfg(test)]
mod tests {
    use crate::stream::{Pull, Stream};
    use crate::tests::Counter;

    #[test]
    fn maps_items_and_passes_failure() {
        let mut stream = Counter::failing(2, "boom").map(|n| n * 100);
        assert_eq!(stream.next(), Pull::Item(100));
        assert_eq!(stream.next(), Pull::Item(200));
        assert_eq!(stream.next(), Pull::Failed("boom"));
    }

    #[test]
    fn chunk_then_map_then_flatten() {
        let got: Vec<i64> = Counter::exhausting(5)
            .chunk(3)
            .unwrap()
            .map(|batch| batch.into_iter().map(|n| -(n as i64)))
            .flatten()
            .collect()
            .unwrap();
        assert_eq!(got, vec![-1, -2, -3, -4, -5]);
    }
}
