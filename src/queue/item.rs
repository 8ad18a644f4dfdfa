//! Per-record codec for transfer-queue items.
//!
//! A record is a flat byte sequence of sixteen UTF-16LE text fields, each
//! followed by the two-byte separator, with the four-byte terminator after
//! the final separator. There is no length prefix; field boundaries are
//! found by a literal forward scan for the separator pattern.

#![expect(
    clippy::little_endian_bytes,
    reason = "queue file text is UTF-16 little-endian on the wire"
)]

use serde::Serialize;

use super::{
    BYTE_ORDER_MARK,
    FIELD_SEPARATOR,
    RECORD_TERMINATOR,
    advanced::AdvancedParams,
    errors::QueueError,
    field::Field,
    find_pattern,
};

/// Kind of item a queued transfer moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileKind {
    /// Kind not recorded by the client.
    Unknown,
    /// A directory; the name field holds the directory itself.
    Directory,
    /// A regular file.
    File,
}

impl FileKind {
    /// Wire ordinal of the kind.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Directory => 1,
            Self::File => 2,
        }
    }

    /// Inverse of [`ordinal`](Self::ordinal); `None` out of range.
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Unknown),
            1 => Some(Self::Directory),
            2 => Some(Self::File),
            _ => None,
        }
    }
}

/// Direction or mode of a queued transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferKind {
    /// Local to remote.
    Upload,
    /// Remote to local.
    Download,
    /// Site-to-site transfer that bypasses the controlling machine.
    Fxp,
    /// Unobserved ordinal 3.
    Unknown3,
    /// Unobserved ordinal 4.
    Unknown4,
    /// Unobserved ordinal 5.
    Unknown5,
    /// Unobserved ordinal 6.
    Unknown6,
}

impl TransferKind {
    /// Wire ordinal of the transfer kind.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Upload => 0,
            Self::Download => 1,
            Self::Fxp => 2,
            Self::Unknown3 => 3,
            Self::Unknown4 => 4,
            Self::Unknown5 => 5,
            Self::Unknown6 => 6,
        }
    }

    /// Inverse of [`ordinal`](Self::ordinal); `None` out of range.
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Upload),
            1 => Some(Self::Download),
            2 => Some(Self::Fxp),
            3 => Some(Self::Unknown3),
            4 => Some(Self::Unknown4),
            5 => Some(Self::Unknown5),
            6 => Some(Self::Unknown6),
            _ => None,
        }
    }
}

/// One queued transfer: what moves, between which sites, and its options.
///
/// Site UIDs are either a 32-character hexadecimal identifier or the
/// literal sentinel `Local`. For directory transfers the path fields hold
/// the parent directory and the name fields the directory itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferItem {
    /// Kind of item being transferred.
    pub file_kind: FileKind,
    /// Direction or mode of the transfer.
    pub transfer_kind: TransferKind,
    /// Source site UID or `Local`.
    pub src_site_uid: String,
    /// Source parent-directory path.
    pub src_path: String,
    /// Source file or directory name.
    pub src_name: String,
    /// Destination site UID or `Local`.
    pub dst_site_uid: String,
    /// Destination parent-directory path.
    pub dst_path: String,
    /// Destination file or directory name.
    pub dst_name: String,
    /// Item size in bytes.
    pub size_bytes: u64,
    /// Reserved value, observed always `1`; preserved, never interpreted.
    pub reserved_index4: i64,
    /// Advanced options; `None` encodes as an empty field.
    pub advanced: Option<AdvancedParams>,
    /// Free-form remark, may be empty.
    pub remark: String,
    /// Folder include filter.
    pub folder_include: String,
    /// Folder exclude filter.
    pub folder_exclude: String,
    /// File include filter.
    pub file_include: String,
    /// File exclude filter.
    pub file_exclude: String,
}

/// Decode a field's raw bytes as UTF-16LE text.
#[expect(
    clippy::indexing_slicing,
    reason = "chunks_exact yields two-byte windows"
)]
fn utf16_text(raw: &[u8], field: Field) -> Result<String, QueueError> {
    let chunks = raw.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        return Err(QueueError::InvalidUtf16 { field });
    }
    let units: Vec<u16> = chunks
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|_| QueueError::InvalidUtf16 { field })
}

/// Encode text as UTF-16LE bytes.
fn utf16_bytes(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Cursor walking separator-delimited fields of one record.
struct FieldCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> FieldCursor<'a> {
    const fn new(buf: &'a [u8], offset: usize) -> Self {
        Self { buf, offset }
    }

    /// Extract the next field's text and advance past its separator.
    fn take_text(&mut self, field: Field) -> Result<String, QueueError> {
        let rest = self.buf.get(self.offset..).unwrap_or_default();
        let end = find_pattern(rest, &FIELD_SEPARATOR).ok_or(QueueError::MalformedRecord {
            offset: self.offset,
            field,
        })?;
        let text = utf16_text(rest.get(..end).unwrap_or_default(), field)?;
        self.offset += end + FIELD_SEPARATOR.len();
        Ok(text)
    }

    /// Accept end-of-buffer or a sole trailing record terminator.
    fn finish(self) -> Result<(), QueueError> {
        let rest = self.buf.get(self.offset..).unwrap_or_default();
        if rest.is_empty() || rest == RECORD_TERMINATOR {
            Ok(())
        } else {
            Err(QueueError::TrailingBytes {
                offset: self.offset,
            })
        }
    }
}

fn take_ordinal<T>(
    cursor: &mut FieldCursor<'_>,
    field: Field,
    from_ordinal: fn(u8) -> Option<T>,
) -> Result<T, QueueError> {
    let text = cursor.take_text(field)?;
    text.parse::<u8>()
        .ok()
        .and_then(from_ordinal)
        .ok_or(QueueError::InvalidField { field, text })
}

fn take_number<T: std::str::FromStr>(
    cursor: &mut FieldCursor<'_>,
    field: Field,
) -> Result<T, QueueError> {
    let text = cursor.take_text(field)?;
    text.parse()
        .map_err(|_| QueueError::InvalidField { field, text })
}

impl TransferItem {
    /// Decode one record from a flat byte sequence.
    ///
    /// A leading byte-order marker is skipped if present; the buffer may
    /// end either directly after the final field separator or after the
    /// record terminator.
    ///
    /// # Errors
    /// Returns [`QueueError::MalformedRecord`] when a required field's
    /// separator is missing, [`QueueError::InvalidUtf16`] or
    /// [`QueueError::InvalidField`] when a field's content is unusable,
    /// and [`QueueError::AdvancedParams`] when the embedded sub-record is
    /// malformed. No partially-populated record is ever returned.
    #[must_use = "handle the result"]
    pub fn decode(bytes: &[u8]) -> Result<Self, QueueError> {
        let start = if bytes.starts_with(&BYTE_ORDER_MARK) {
            BYTE_ORDER_MARK.len()
        } else {
            0
        };
        let mut cursor = FieldCursor::new(bytes, start);

        let file_kind = take_ordinal(&mut cursor, Field::FileKind, FileKind::from_ordinal)?;
        let transfer_kind =
            take_ordinal(&mut cursor, Field::TransferKind, TransferKind::from_ordinal)?;
        let src_site_uid = cursor.take_text(Field::SrcSiteUid)?;
        let src_path = cursor.take_text(Field::SrcPath)?;
        let src_name = cursor.take_text(Field::SrcName)?;
        let dst_site_uid = cursor.take_text(Field::DstSiteUid)?;
        let dst_path = cursor.take_text(Field::DstPath)?;
        let dst_name = cursor.take_text(Field::DstName)?;
        let size_bytes = take_number(&mut cursor, Field::SizeBytes)?;
        let reserved_index4 = take_number(&mut cursor, Field::ReservedIndex4)?;
        let advanced_text = cursor.take_text(Field::AdvancedParams)?;
        let advanced = if advanced_text.is_empty() {
            None
        } else {
            Some(advanced_text.parse::<AdvancedParams>()?)
        };
        let remark = cursor.take_text(Field::Remark)?;
        let folder_include = cursor.take_text(Field::FolderInclude)?;
        let folder_exclude = cursor.take_text(Field::FolderExclude)?;
        let file_include = cursor.take_text(Field::FileInclude)?;
        let file_exclude = cursor.take_text(Field::FileExclude)?;
        cursor.finish()?;

        Ok(Self {
            file_kind,
            transfer_kind,
            src_site_uid,
            src_path,
            src_name,
            dst_site_uid,
            dst_path,
            dst_name,
            size_bytes,
            reserved_index4,
            advanced,
            remark,
            folder_include,
            folder_exclude,
            file_include,
            file_exclude,
        })
    }

    /// Encode the record as a flat byte sequence ending in the terminator.
    ///
    /// Output length is fully determined by the field contents; there is
    /// no padding or alignment.
    ///
    /// # Errors
    /// Returns [`QueueError::EmbeddedDelimiter`] if any field value would
    /// contain the separator or terminator byte sequence once encoded; the
    /// format cannot escape them, so such a record can never round-trip.
    #[must_use = "handle the result"]
    pub fn encode(&self) -> Result<Vec<u8>, QueueError> {
        let mut line = Vec::new();
        for (field, text) in self.wire_fields() {
            let raw = utf16_bytes(&text);
            if find_pattern(&raw, &FIELD_SEPARATOR).is_some()
                || find_pattern(&raw, &RECORD_TERMINATOR).is_some()
            {
                return Err(QueueError::EmbeddedDelimiter { field });
            }
            line.extend_from_slice(&raw);
            line.extend_from_slice(&FIELD_SEPARATOR);
        }
        line.extend_from_slice(&RECORD_TERMINATOR);
        Ok(line)
    }

    /// The sixteen wire fields in declaration order, as text.
    fn wire_fields(&self) -> [(Field, String); 16] {
        [
            (Field::FileKind, self.file_kind.ordinal().to_string()),
            (Field::TransferKind, self.transfer_kind.ordinal().to_string()),
            (Field::SrcSiteUid, self.src_site_uid.clone()),
            (Field::SrcPath, self.src_path.clone()),
            (Field::SrcName, self.src_name.clone()),
            (Field::DstSiteUid, self.dst_site_uid.clone()),
            (Field::DstPath, self.dst_path.clone()),
            (Field::DstName, self.dst_name.clone()),
            (Field::SizeBytes, self.size_bytes.to_string()),
            (Field::ReservedIndex4, self.reserved_index4.to_string()),
            (
                Field::AdvancedParams,
                self.advanced.map(|p| p.to_string()).unwrap_or_default(),
            ),
            (Field::Remark, self.remark.clone()),
            (Field::FolderInclude, self.folder_include.clone()),
            (Field::FolderExclude, self.folder_exclude.clone()),
            (Field::FileInclude, self.file_include.clone()),
            (Field::FileExclude, self.file_exclude.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> TransferItem {
        TransferItem {
            file_kind: FileKind::File,
            transfer_kind: TransferKind::Download,
            src_site_uid: "0123456789ABCDEF0123456789ABCDEF".to_owned(),
            src_path: "/incoming".to_owned(),
            src_name: "release.tar".to_owned(),
            dst_site_uid: "Local".to_owned(),
            dst_path: "/home/user".to_owned(),
            dst_name: "release.tar".to_owned(),
            size_bytes: 1_048_576,
            reserved_index4: 1,
            advanced: Some(AdvancedParams::default()),
            remark: "nightly".to_owned(),
            folder_include: String::new(),
            folder_exclude: String::new(),
            file_include: String::new(),
            file_exclude: String::new(),
        }
    }

    #[test]
    fn roundtrips_structurally() {
        let item = sample_item();
        let bytes = item.encode().expect("encode");
        let decoded = TransferItem::decode(&bytes).expect("decode");
        assert_eq!(decoded, item);
    }

    #[test]
    fn tolerates_leading_byte_order_marker() {
        let item = sample_item();
        let mut bytes = Vec::from(BYTE_ORDER_MARK);
        bytes.extend_from_slice(&item.encode().expect("encode"));
        let decoded = TransferItem::decode(&bytes).expect("decode");
        assert_eq!(decoded, item);
    }

    #[test]
    fn decodes_span_without_terminator() {
        let item = sample_item();
        let mut bytes = item.encode().expect("encode");
        bytes.truncate(bytes.len() - RECORD_TERMINATOR.len());
        let decoded = TransferItem::decode(&bytes).expect("decode");
        assert_eq!(decoded, item);
    }

    #[test]
    fn truncated_record_fails_closed() {
        let item = sample_item();
        let bytes = item.encode().expect("encode");
        // Cut away the four filter fields' separators and the terminator,
        // leaving the record mid-field.
        let err = TransferItem::decode(&bytes[..bytes.len() - 12]).expect_err("must fail");
        assert!(matches!(err, QueueError::MalformedRecord { .. }));
    }

    #[test]
    fn missing_first_separator_names_first_field() {
        let bytes = utf16_bytes("2");
        let err = TransferItem::decode(&bytes).expect_err("must fail");
        assert!(matches!(
            err,
            QueueError::MalformedRecord {
                offset: 0,
                field: Field::FileKind
            }
        ));
    }

    #[test]
    fn rejects_out_of_range_ordinals() {
        let item = sample_item();
        let bytes = item.encode().expect("encode");
        // Patch the file-kind digit "2" (UTF-16LE 0x32 0x00) to "7".
        let mut patched = bytes;
        patched[0] = 0x37;
        let err = TransferItem::decode(&patched).expect_err("must fail");
        assert!(matches!(
            err,
            QueueError::InvalidField {
                field: Field::FileKind,
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_numeric_size() {
        let mut item = sample_item();
        item.remark = String::new();
        let encoded = item.encode().expect("encode");
        let needle = utf16_bytes("1048576");
        let pos = find_pattern(&encoded, &needle).expect("size text present");
        let mut patched = encoded;
        let _removed: Vec<u8> = patched
            .splice(pos..pos + needle.len(), utf16_bytes("big?two"))
            .collect();
        let err = TransferItem::decode(&patched).expect_err("must fail");
        assert!(matches!(
            err,
            QueueError::InvalidField {
                field: Field::SizeBytes,
                ..
            }
        ));
    }

    #[test]
    fn odd_field_byte_length_is_invalid_utf16() {
        // One stray byte before the first separator.
        let mut bytes = vec![0x32];
        bytes.extend_from_slice(&FIELD_SEPARATOR);
        let err = TransferItem::decode(&bytes).expect_err("must fail");
        assert!(matches!(
            err,
            QueueError::InvalidUtf16 {
                field: Field::FileKind
            }
        ));
    }

    #[test]
    fn empty_advanced_field_decodes_as_none() {
        let mut item = sample_item();
        item.advanced = None;
        let bytes = item.encode().expect("encode");
        let decoded = TransferItem::decode(&bytes).expect("decode");
        assert_eq!(decoded.advanced, None);
    }

    #[test]
    fn rejects_separator_embedded_in_value() {
        let mut item = sample_item();
        // U+0002 encodes to exactly the separator bytes 0x02 0x00.
        item.remark = "before\u{2}after".to_owned();
        let err = item.encode().expect_err("must reject");
        assert!(matches!(
            err,
            QueueError::EmbeddedDelimiter {
                field: Field::Remark
            }
        ));
    }

    #[test]
    fn rejects_terminator_embedded_in_value() {
        let mut item = sample_item();
        item.dst_path = "line\r\nbreak".to_owned();
        let err = item.encode().expect_err("must reject");
        assert!(matches!(
            err,
            QueueError::EmbeddedDelimiter {
                field: Field::DstPath
            }
        ));
    }

    #[test]
    fn rejects_delimiter_straddling_code_units() {
        let mut item = sample_item();
        // U+0261 then U+4100: bytes 61 02 00 41 contain 02 00 across the
        // code-unit boundary.
        item.remark = "\u{261}\u{4100}".to_owned();
        let err = item.encode().expect_err("must reject");
        assert!(matches!(
            err,
            QueueError::EmbeddedDelimiter {
                field: Field::Remark
            }
        ));
    }

    #[test]
    fn trailing_garbage_after_final_field_is_rejected() {
        let item = sample_item();
        let mut bytes = item.encode().expect("encode");
        bytes.extend_from_slice(&utf16_bytes("x"));
        let err = TransferItem::decode(&bytes).expect_err("must fail");
        assert!(matches!(err, QueueError::TrailingBytes { .. }));
    }
}
