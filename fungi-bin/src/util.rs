use std::fs::File;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bstr::BString;
use crossbeam_channel as chan;
use fungi::{DoneChanStream, Pull, Stream};

use crate::Error;

/// Settings shared by every command.
#[derive(Clone, Debug)]
pub struct Config {
    /// When set, streams end cleanly once this much time has passed.
    pub timeout: Option<Duration>,
    /// The number of lines buffered between a reader thread and the
    /// consumer.
    pub buffer: usize,
    /// Where commands write their output. `None` means stdout.
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn new(m: &clap::ArgMatches) -> Result<Config, Error> {
        let timeout = match m.value_of_lossy("timeout") {
            None => None,
            Some(ms) => Some(Duration::from_millis(ms.parse()?)),
        };
        Ok(Config {
            timeout,
            buffer: m.value_of_lossy("buffer").unwrap().parse()?,
            output: m.value_of_os("output").map(PathBuf::from),
        })
    }
}

pub fn get_buf_reader<T: AsRef<Path>>(
    path: Option<T>,
) -> io::Result<io::BufReader<Box<dyn io::Read + Send + Sync + 'static>>> {
    Ok(io::BufReader::new(get_reader(path)?))
}

pub fn get_buf_writer<T: AsRef<Path>>(
    path: Option<T>,
) -> io::Result<io::BufWriter<Box<dyn io::Write + Send + Sync + 'static>>> {
    Ok(io::BufWriter::new(get_writer(path)?))
}

pub fn get_reader<T: AsRef<Path>>(
    path: Option<T>,
) -> io::Result<Box<dyn io::Read + Send + Sync + 'static>> {
    Ok(match to_stdio(path) {
        None => Box::new(io::stdin()),
        Some(path) => Box::new(File::open(path)?),
    })
}

pub fn get_writer<T: AsRef<Path>>(
    path: Option<T>,
) -> io::Result<Box<dyn io::Write + Send + Sync + 'static>> {
    Ok(match to_stdio(path) {
        None => Box::new(io::stdout()),
        Some(path) => Box::new(File::create(path)?),
    })
}

fn to_stdio<T: AsRef<Path>>(path: Option<T>) -> Option<PathBuf> {
    match path {
        None => None,
        Some(s) => {
            if s.as_ref().to_string_lossy() == "-" {
                None
            } else {
                Some(s.as_ref().to_path_buf())
            }
        }
    }
}

type Reader = io::BufReader<Box<dyn io::Read + Send + Sync + 'static>>;

/// A stream of the lines in a single file.
///
/// The file is opened on the first pull. Line terminators (`\n` or `\r\n`)
/// are stripped.
pub struct LineReader {
    path: PathBuf,
    rdr: Option<Reader>,
    buf: Vec<u8>,
    eof: bool,
}

impl LineReader {
    pub fn new(path: PathBuf) -> LineReader {
        LineReader { path, rdr: None, buf: vec![], eof: false }
    }

    fn read_line(&mut self) -> io::Result<Option<BString>> {
        if self.rdr.is_none() {
            tracing::debug!(path = %self.path.display(), "opening input");
            self.rdr = Some(get_buf_reader(Some(&self.path))?);
        }
        let rdr = match self.rdr {
            None => return Ok(None),
            Some(ref mut rdr) => rdr,
        };
        self.buf.clear();
        if rdr.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        let line: &[u8] = &self.buf;
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        Ok(Some(BString::from(line)))
    }
}

impl Stream for LineReader {
    type Item = BString;
    type Error = io::Error;

    fn next(&mut self) -> Pull<BString, io::Error> {
        if self.eof {
            return Pull::Exhausted;
        }
        match self.read_line() {
            Ok(Some(line)) => Pull::Item(line),
            Ok(None) => {
                self.eof = true;
                self.rdr = None;
                Pull::Exhausted
            }
            Err(err) => Pull::Failed(err),
        }
    }
}

/// The consumer side of a set of inputs read on a background thread.
///
/// Read errors arrive as ordinary channel messages and are reported here as
/// stream failures. The error is shared so that sticky adapters, like
/// `Chunk`, can report it more than once.
pub struct Lines {
    recv: DoneChanStream<io::Result<BString>, std::time::Instant>,
}

impl Stream for Lines {
    type Item = BString;
    type Error = Arc<io::Error>;

    fn next(&mut self) -> Pull<BString, Arc<io::Error>> {
        match self.recv.next() {
            Pull::Item(Ok(line)) => Pull::Item(line),
            Pull::Item(Err(err)) => Pull::Failed(Arc::new(err)),
            Pull::Exhausted => Pull::Exhausted,
            Pull::Failed(never) => match never {},
        }
    }
}

/// Starts a thread that reads every line of `inputs`, in order, and returns
/// a stream of those lines.
///
/// The reader thread stops at the first error it sees, after forwarding it.
/// If the config has a timeout, the returned stream ends once the timeout
/// fires, whether or not the inputs have been read completely.
pub fn lines(config: &Config, inputs: &[PathBuf]) -> Lines {
    let (send, recv) = chan::bounded(config.buffer);
    let readers: Vec<LineReader> =
        inputs.iter().cloned().map(LineReader::new).collect();
    thread::spawn(move || {
        tracing::debug!(inputs = readers.len(), "reader thread started");
        let res = fungi::concat(readers).try_for_each(|line| {
            send.send(Ok(line)).map_err(|_| ReadError::Disconnected)
        });
        match res {
            Ok(()) => tracing::debug!("reader thread finished"),
            Err(ReadError::Io(err)) => {
                tracing::debug!(error = %err, "reader thread failed");
                let _ = send.send(Err(err));
            }
            Err(ReadError::Disconnected) => {
                tracing::debug!("consumer went away, reader thread stopped");
            }
        }
    });
    let done = match config.timeout {
        None => chan::never(),
        Some(timeout) => chan::after(timeout),
    };
    Lines { recv: fungi::done_chan_stream(recv, done) }
}

enum ReadError {
    Io(io::Error),
    Disconnected,
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> ReadError {
        ReadError::Io(err)
    }
}
