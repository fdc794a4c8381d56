use std::convert::Infallible;

use crossbeam_channel::{select, Receiver};

use crate::stream::{Pull, Stream};

/// Creates a stream that receives its items from a channel.
///
/// Each pull blocks the calling thread until a value is available. Once the
/// channel is empty and all of its senders have been dropped, the stream is
/// exhausted.
///
/// # Example
///
/// ```
/// use std::thread;
///
/// use fungi::Stream;
///
/// let (send, recv) = crossbeam_channel::bounded(0);
/// thread::spawn(move || {
///     for i in 1..=3 {
///         send.send(i).unwrap();
///     }
/// });
/// let got: Vec<u32> = fungi::chan_stream(recv).collect().unwrap();
/// assert_eq!(got, vec![1, 2, 3]);
/// ```
pub fn chan_stream<T>(recv: Receiver<T>) -> ChanStream<T> {
    ChanStream { recv }
}

/// Creates a stream that receives items from `recv` until `done` fires.
///
/// Each pull waits on both channels at once. If a value arrives on `recv`,
/// it is the next item. If `done` receives a value or all of its senders are
/// dropped, the stream ends: cancellation is reported as
/// [`Pull::Exhausted`], not as a failure. The stream also ends when `recv` is
/// empty and disconnected, just like [`chan_stream`].
///
/// If both channels are ready at the same time, either one may win. No
/// ordering is guaranteed between a pending item and a cancellation.
///
/// Passing `crossbeam_channel::after(timeout)` as `done` bounds how long the
/// stream may run. Passing `crossbeam_channel::never()` disables
/// cancellation.
pub fn done_chan_stream<T, D>(
    recv: Receiver<T>,
    done: Receiver<D>,
) -> DoneChanStream<T, D> {
    DoneChanStream { recv, done, finished: false }
}

/// A stream backed by a channel.
///
/// This is created by [`chan_stream`].
#[derive(Debug)]
pub struct ChanStream<T> {
    recv: Receiver<T>,
}

impl<T> ChanStream<T> {
    /// Returns the channel this stream receives from.
    pub fn get_ref(&self) -> &Receiver<T> {
        &self.recv
    }
}

impl<T> Stream for ChanStream<T> {
    type Item = T;
    type Error = Infallible;

    fn next(&mut self) -> Pull<T, Infallible> {
        match self.recv.recv() {
            Ok(item) => Pull::Item(item),
            Err(_) => Pull::Exhausted,
        }
    }
}

/// A channel backed stream that can be cancelled by a second channel.
///
/// This is created by [`done_chan_stream`].
#[derive(Debug)]
pub struct DoneChanStream<T, D> {
    recv: Receiver<T>,
    done: Receiver<D>,
    finished: bool,
}

impl<T, D> DoneChanStream<T, D> {
    /// Returns true if this stream has been cancelled or its channel has
    /// been closed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<T, D> Stream for DoneChanStream<T, D> {
    type Item = T;
    type Error = Infallible;

    fn next(&mut self) -> Pull<T, Infallible> {
        if self.finished {
            return Pull::Exhausted;
        }
        let pull = select! {
            recv(self.recv) -> msg => match msg {
                Ok(item) => Pull::Item(item),
                Err(_) => {
                    tracing::trace!("channel stream closed");
                    Pull::Exhausted
                }
            },
            recv(self.done) -> _ => {
                tracing::debug!("channel stream cancelled");
                Pull::Exhausted
            }
        };
        if pull.is_exhausted() {
            self.finished = true;
        }
        pull
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use crossbeam_channel::{bounded, never, unbounded};

    use crate::stream::{Pull, Stream};

    use super::{chan_stream, done_chan_stream};

    #[test]
    fn closed_channel_is_exhausted() {
        let (send, recv) = unbounded();
        send.send(1).unwrap();
        send.send(2).unwrap();
        drop(send);

        let mut stream = chan_stream(recv);
        assert_eq!(stream.next(), Pull::Item(1));
        assert_eq!(stream.next(), Pull::Item(2));
        assert_eq!(stream.next(), Pull::Exhausted);
        assert_eq!(stream.next(), Pull::Exhausted);
    }

    #[test]
    fn get_ref_sees_pending_items() {
        let (send, recv) = unbounded();
        send.send('a').unwrap();
        send.send('b').unwrap();

        let mut stream = chan_stream(recv);
        assert_eq!(stream.get_ref().len(), 2);
        assert_eq!(stream.next(), Pull::Item('a'));
        assert_eq!(stream.get_ref().len(), 1);
    }

    #[test]
    fn done_closed_data_channel_is_exhausted() {
        let (send, recv) = unbounded::<u8>();
        drop(send);
        let mut stream = done_chan_stream(recv, never::<()>());
        assert_eq!(stream.next(), Pull::Exhausted);
        assert!(stream.is_finished());
        assert_eq!(stream.next(), Pull::Exhausted);
    }

    #[test]
    fn done_signal_ends_stream() {
        let (_send, recv) = unbounded::<u8>();
        let (cancel, done) = bounded(1);
        cancel.send(()).unwrap();

        let mut stream = done_chan_stream(recv, done);
        assert_eq!(stream.next(), Pull::Exhausted);
        // The done channel is now empty, but the stream stays finished.
        assert_eq!(stream.next(), Pull::Exhausted);
    }

    #[test]
    fn dropped_done_sender_ends_stream() {
        let (_send, recv) = unbounded::<u8>();
        let (cancel, done) = bounded::<()>(0);
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            drop(cancel);
        });

        let mut stream = done_chan_stream(recv, done);
        assert_eq!(stream.next(), Pull::Exhausted);
        handle.join().unwrap();
    }

    #[test]
    fn done_stream_yields_items_until_closed() {
        let (send, recv) = bounded(0);
        let handle = thread::spawn(move || {
            for i in 0..10u32 {
                send.send(i).unwrap();
            }
        });

        let stream = done_chan_stream(recv, never::<()>());
        let got: Vec<u32> = stream.collect().unwrap();
        assert_eq!(got, (0..10).collect::<Vec<u32>>());
        handle.join().unwrap();
    }
}
