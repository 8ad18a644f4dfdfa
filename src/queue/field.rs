//! Positional field names for transfer-queue records.

/// The sixteen positional fields of a transfer-queue record, in wire order.
///
/// Used for error context; the codec itself extracts fields strictly in
/// this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Kind of item being transferred (file, directory).
    FileKind,
    /// Direction or mode of the transfer.
    TransferKind,
    /// Source site UID or the literal `Local`.
    SrcSiteUid,
    /// Source parent-directory path.
    SrcPath,
    /// Source file or directory name.
    SrcName,
    /// Destination site UID or the literal `Local`.
    DstSiteUid,
    /// Destination parent-directory path.
    DstPath,
    /// Destination file or directory name.
    DstName,
    /// Item size in bytes, decimal text.
    SizeBytes,
    /// Reserved field, observed always `1`.
    ReservedIndex4,
    /// Embedded advanced-parameters sub-record, possibly empty.
    AdvancedParams,
    /// Free-form remark.
    Remark,
    /// Folder include filter.
    FolderInclude,
    /// Folder exclude filter.
    FolderExclude,
    /// File include filter.
    FileInclude,
    /// File exclude filter.
    FileExclude,
}

impl Field {
    /// Zero-based position of the field within a record.
    #[must_use]
    pub const fn position(self) -> usize {
        match self {
            Self::FileKind => 0,
            Self::TransferKind => 1,
            Self::SrcSiteUid => 2,
            Self::SrcPath => 3,
            Self::SrcName => 4,
            Self::DstSiteUid => 5,
            Self::DstPath => 6,
            Self::DstName => 7,
            Self::SizeBytes => 8,
            Self::ReservedIndex4 => 9,
            Self::AdvancedParams => 10,
            Self::Remark => 11,
            Self::FolderInclude => 12,
            Self::FolderExclude => 13,
            Self::FileInclude => 14,
            Self::FileExclude => 15,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FileKind => "FileKind",
            Self::TransferKind => "TransferKind",
            Self::SrcSiteUid => "SrcSiteUid",
            Self::SrcPath => "SrcPath",
            Self::SrcName => "SrcName",
            Self::DstSiteUid => "DstSiteUid",
            Self::DstPath => "DstPath",
            Self::DstName => "DstName",
            Self::SizeBytes => "SizeBytes",
            Self::ReservedIndex4 => "ReservedIndex4",
            Self::AdvancedParams => "AdvancedParams",
            Self::Remark => "Remark",
            Self::FolderInclude => "FolderInclude",
            Self::FolderExclude => "FolderExclude",
            Self::FileInclude => "FileInclude",
            Self::FileExclude => "FileExclude",
        };
        f.write_str(name)
    }
}
