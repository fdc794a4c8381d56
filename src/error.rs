use std::fmt;

/// A `Result` type alias for this crate's `Error` type.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that occurred while constructing a stream adapter.
///
/// These errors are reported synchronously by adapter constructors. They are
/// distinct from the failures a stream reports while it is being pulled,
/// which are carried by [`Pull::Failed`](crate::Pull::Failed) in the
/// source's own error type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A chunk adapter was asked to produce batches with a size of zero.
    ///
    /// Every batch emitted by a chunk adapter contains at least one item, so
    /// the size must be at least `1`.
    InvalidChunkSize {
        /// The size that was given.
        got: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::InvalidChunkSize { got } => write!(
                f,
                "invalid chunk size {}: chunk size must be greater than 0",
                got
            ),
        }
    }
}

impl std::error::Error for Error {}
