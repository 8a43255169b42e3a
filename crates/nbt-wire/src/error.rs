/// Stream-level failures raised while reading a tag stream.
///
/// Every variant here means the *bytes* were unusable: the input ran out,
/// a string was not valid modified UTF-8, or the underlying reader failed.
/// None of them say anything about whether the payload was hostile; that
/// judgement belongs to the decoder, which reports it separately.
///
/// ```text
///   WireError
///   ├── UnexpectedEof        ← input ended before a field was complete
///   ├── InvalidModifiedUtf8  ← string bytes are not modified UTF-8
///   └── Io(std::io::Error)   ← any other failure of the underlying reader
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete field could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: u64 },

    /// A length-prefixed string contained a malformed modified UTF-8
    /// sequence or an unpaired surrogate.
    #[error("invalid modified UTF-8 in string at offset {offset}")]
    InvalidModifiedUtf8 { offset: u64 },

    /// I/O error from the underlying reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
