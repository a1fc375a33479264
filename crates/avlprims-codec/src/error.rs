/// Errors that can occur while encoding or decoding AVL packets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Fewer bytes remain than a fixed-width field requires.
    #[error("truncated input (needed {needed} bytes, {remaining} remaining)")]
    TruncatedInput { needed: usize, remaining: usize },

    /// Bytes remain after the trailing record count.
    #[error("{0} trailing bytes after packet")]
    TrailingData(usize),

    /// An IO group would exceed 255 entries.
    #[error("too many IO elements in {width}-byte group (max 255)")]
    TooManyElements { width: usize },

    /// A packet would carry more than 255 records.
    #[error("too many records ({0}, max 255)")]
    TooManyRecords(usize),

    /// The leading and trailing record counts disagree.
    #[error("record count mismatch (leading {leading}, trailing {trailing})")]
    CountMismatch { leading: u8, trailing: u8 },
}

pub type Result<T> = std::result::Result<T, CodecError>;
