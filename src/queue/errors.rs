//! Error types for queue-file decoding and encoding.

use thiserror::Error;

use super::field::Field;

/// Errors that can occur when decoding or encoding a queue file.
#[derive(Debug, Error)]
pub enum QueueError {
    /// No field separator was found before the end of the buffer.
    #[error("missing separator for field {field} at byte {offset}")]
    MalformedRecord {
        /// Byte offset at which the field's text was expected to start.
        offset: usize,
        /// The field whose separator was missing.
        field: Field,
    },
    /// A record's closing terminator sequence was never found.
    #[error("unterminated record starting at byte {offset}")]
    UnterminatedRecord {
        /// Byte offset at which the unterminated record starts.
        offset: usize,
    },
    /// Bytes remained after the final field of a record.
    #[error("trailing bytes after final field at byte {offset}")]
    TrailingBytes {
        /// Byte offset of the first unexpected byte.
        offset: usize,
    },
    /// A field's bytes do not form valid UTF-16LE text.
    #[error("field {field} is not valid UTF-16LE text")]
    InvalidUtf16 {
        /// The field whose bytes failed to decode.
        field: Field,
    },
    /// A numeric or enumerated field held text that does not parse.
    #[error("field {field} holds invalid value {text:?}")]
    InvalidField {
        /// The field whose value was rejected.
        field: Field,
        /// The offending decoded text.
        text: String,
    },
    /// A field value contains a reserved delimiter byte sequence.
    ///
    /// The wire format has no escaping mechanism, so such a value can
    /// never round-trip; encoding rejects it up front.
    #[error("field {field} contains a reserved delimiter byte sequence")]
    EmbeddedDelimiter {
        /// The field whose value embeds a delimiter.
        field: Field,
    },
    /// The embedded advanced-parameters sub-record was malformed.
    #[error("invalid advanced parameters: {0}")]
    AdvancedParams(#[from] AdvancedParamsError),
    /// I/O error surfaced verbatim from the file wrappers.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QueueError {
    /// Shift offset-bearing variants by the start of the enclosing record
    /// span, so container-level errors report whole-file offsets.
    #[must_use]
    pub(crate) fn with_base_offset(self, base: usize) -> Self {
        match self {
            Self::MalformedRecord { offset, field } => Self::MalformedRecord {
                offset: offset + base,
                field,
            },
            Self::TrailingBytes { offset } => Self::TrailingBytes {
                offset: offset + base,
            },
            other => other,
        }
    }
}

/// Errors that can occur when parsing an advanced-parameters string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdvancedParamsError {
    /// The string did not split into exactly four comma-separated segments.
    #[error("expected 4 comma-separated segments, found {0}")]
    SegmentCount(usize),
    /// The flags segment was not exactly fifteen characters long.
    #[error("flags segment must be 15 digits, found {0} characters")]
    FlagSegmentLength(usize),
    /// A flag position held something other than an ASCII digit.
    #[error("flag position {position} holds non-digit {digit:?}")]
    InvalidDigit {
        /// Zero-based position within the flags segment.
        position: usize,
        /// The offending character.
        digit: char,
    },
    /// The file-size filter mode digit was outside its 0–3 range.
    #[error("file-size filter mode digit {0} is out of range")]
    InvalidSizeMode(u32),
    /// A numeric segment failed integer parsing.
    #[error("numeric segment {segment} holds invalid value {text:?}")]
    InvalidNumber {
        /// One-based segment index within the sub-record.
        segment: usize,
        /// The offending segment text.
        text: String,
    },
}
