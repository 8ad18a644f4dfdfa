//! Whole-file container for the transfer queue.
//!
//! A queue file is the byte-order marker followed by each record's
//! encoding in execution order. Records are delimited by the four-byte
//! terminator alone; the format carries no record count and no trailing
//! marker.

use std::{fs, path::Path};

use serde::Serialize;
use tracing::debug;

use super::{
    BYTE_ORDER_MARK,
    RECORD_TERMINATOR,
    errors::QueueError,
    find_pattern,
    item::TransferItem,
};

/// Ordered collection of queued transfers, decoded from or encoded to the
/// on-disk queue-file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueFile {
    /// Records in transfer execution order.
    pub items: Vec<TransferItem>,
}

impl QueueFile {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Decode a whole queue file from its byte content.
    ///
    /// A leading byte-order marker is stripped once if present. The
    /// remaining bytes are split into records on the terminator sequence;
    /// each span is decoded in order. Decoding is strict: the first record
    /// that fails aborts the whole operation, and bytes left after the
    /// final terminator are treated as a truncated record.
    ///
    /// # Errors
    /// Returns [`QueueError::UnterminatedRecord`] for a span with no
    /// closing terminator, or whatever record-level error the item codec
    /// raised, with offsets relative to the whole buffer.
    #[must_use = "handle the result"]
    pub fn decode(bytes: &[u8]) -> Result<Self, QueueError> {
        let mut offset = if bytes.starts_with(&BYTE_ORDER_MARK) {
            BYTE_ORDER_MARK.len()
        } else {
            0
        };
        let mut items = Vec::new();
        while offset < bytes.len() {
            let rest = bytes.get(offset..).unwrap_or_default();
            let span_len = find_pattern(rest, &RECORD_TERMINATOR)
                .ok_or(QueueError::UnterminatedRecord { offset })?;
            let span = rest.get(..span_len).unwrap_or_default();
            let item =
                TransferItem::decode(span).map_err(|err| err.with_base_offset(offset))?;
            items.push(item);
            offset += span_len + RECORD_TERMINATOR.len();
        }
        Ok(Self { items })
    }

    /// Encode the queue into the on-disk byte format.
    ///
    /// # Errors
    /// Returns [`QueueError::EmbeddedDelimiter`] if any record holds a
    /// value the format cannot represent.
    #[must_use = "use the encoded bytes"]
    pub fn encode(&self) -> Result<Vec<u8>, QueueError> {
        let mut out = Vec::from(BYTE_ORDER_MARK);
        for item in &self.items {
            out.extend_from_slice(&item.encode()?);
        }
        Ok(out)
    }

    /// Read and decode a queue file in one shot.
    ///
    /// # Errors
    /// Surfaces [`QueueError::Io`] verbatim, plus any decode error.
    #[must_use = "handle the result"]
    pub fn load(path: &Path) -> Result<Self, QueueError> {
        let bytes = fs::read(path)?;
        let decoded = Self::decode(&bytes)?;
        debug!(
            path = %path.display(),
            records = decoded.items.len(),
            "loaded transfer queue"
        );
        Ok(decoded)
    }

    /// Encode and write the queue file in one shot.
    ///
    /// # Errors
    /// Surfaces [`QueueError::Io`] verbatim, plus any encode error.
    #[must_use = "handle the result"]
    pub fn save(&self, path: &Path) -> Result<(), QueueError> {
        let bytes = self.encode()?;
        fs::write(path, &bytes)?;
        debug!(
            path = %path.display(),
            records = self.items.len(),
            "saved transfer queue"
        );
        Ok(())
    }
}
