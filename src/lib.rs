/*!
Crate `fungi` provides lazy, pull-based streams and a small set of
composable stream adapters.

A [`Stream`] produces one value per call to [`Stream::next`], which returns a
[`Pull`]: either the next item, a signal that the stream is exhausted or a
failure carrying the stream's own error type. Adapters wrap streams and
transform them without materializing intermediate collections. Nothing
happens until the outermost stream is pulled.

# Overview of types and functions

Leaf streams, which produce values without wrapping another stream:

* [`iter`] and [`try_iter`] stream the elements of an in-memory iterator.
* [`chan_stream`] receives items from a `crossbeam_channel::Receiver`.
  [`done_chan_stream`] does the same, but also stops cleanly when a second
  cancellation channel fires.

Adapters:

* [`Stream::chunk`] groups items into fixed size batches. Its terminal
  signals are sticky.
* [`concat`] emits every item of several streams, one stream after another.
* [`Stream::flatten`] expands a stream of batches back into their items.
* [`Stream::unique_by`] and [`Stream::unique`] drop items whose key has
  already been seen.
* [`Stream::map`] transforms each item.

Drains, which pull a stream until it ends: [`Stream::for_each`],
[`Stream::try_for_each`], [`Stream::collect`] and [`Stream::count`].

# Example: chunking and reflattening

```
use fungi::Stream;

let mut batches = vec![];
let items: Vec<u64> = fungi::iter(vec![1, 2, 3, 4, 5])
    .chunk(3)?
    .map(|batch| {
        // This step could be replaced with, e.g., a batched API call.
        batches.push(batch.clone());
        batch.into_iter().map(|n| n * 10).collect::<Vec<u64>>()
    })
    .flatten()
    .collect()
    .unwrap();

assert_eq!(batches, vec![vec![1, 2, 3], vec![4, 5]]);
assert_eq!(items, vec![10, 20, 30, 40, 50]);
# Ok::<(), fungi::Error>(())
```

# Example: draining a channel with a timeout

```
use std::thread;
use std::time::Duration;

use fungi::Stream;

let (send, recv) = crossbeam_channel::unbounded();
thread::spawn(move || {
    for i in 1..1000u64 {
        send.send(i).unwrap();
    }
});

let done = crossbeam_channel::after(Duration::from_secs(60));
let mut sum = 0;
fungi::done_chan_stream(recv, done).for_each(|n| sum += n).unwrap();
assert_eq!(sum, 499_500);
```

# Concurrency

Streams are driven synchronously by whichever thread calls `next`. No
adapter spawns threads or buffers ahead of demand. The only places a pull
may block are channel backed streams, and the only way to interrupt a
blocked pull is the cancellation channel of a [`done_chan_stream`].
*/

#![deny(missing_docs)]

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

pub use crate::chan::{
    chan_stream, done_chan_stream, ChanStream, DoneChanStream,
};
pub use crate::chunk::Chunk;
pub use crate::concat::{concat, Concat};
pub use crate::error::{Error, Result};
pub use crate::flatten::Flatten;
pub use crate::iter::{iter, try_iter, Iter, TryIter};
pub use crate::map::Map;
pub use crate::stream::{BoxStream, IntoStream, Pull, Stream};
pub use crate::unique::{Unique, UniqueBy};

mod chan;
mod chunk;
mod concat;
mod error;
mod flatten;
mod iter;
mod map;
mod stream;
#[cfg(test)]
mod tests;
mod unique;
