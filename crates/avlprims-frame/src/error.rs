use avlprims_codec::CodecError;

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The buffer is too short to hold the envelope.
    #[error("truncated frame (needed {needed} bytes, {remaining} remaining)")]
    TruncatedInput { needed: usize, remaining: usize },

    /// The preamble is not all zero.
    #[error("bad preamble (expected 0, got {0:#010x})")]
    BadPreamble(u32),

    /// The declared payload length does not match the buffer size.
    /// `actual` is the size of the whole frame buffer.
    #[error("bad length (declared payload {declared} bytes, frame is {actual} bytes)")]
    BadLength { declared: u32, actual: usize },

    /// The trailing checksum does not match the payload.
    #[error("checksum mismatch (computed {expected:#06x}, frame claims {actual:#010x})")]
    ChecksumMismatch { expected: u16, actual: u32 },

    /// The payload could not be encoded or decoded as a packet.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

pub type Result<T> = std::result::Result<T, FrameError>;
