//! The packed advanced-parameters sub-record embedded in each queue record.
//!
//! The sub-record is ASCII text of the shape
//! `<15 flag digits>,<size>,<date1>,<date2>`: fifteen single-digit values
//! at fixed positions (fourteen booleans plus the file-size filter mode),
//! then three decimal integers. It uses only commas internally and never
//! contains the outer record delimiters, so it embeds safely as one field.

use std::{fmt, str::FromStr};

use serde::Serialize;

use super::errors::AdvancedParamsError;

/// Number of digit positions in the flags segment.
pub const FLAG_COUNT: usize = 15;

/// File-size filter applied when queueing transfers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FileSizeMode {
    /// No size filtering.
    #[default]
    Disabled,
    /// Transfer only files of exactly the threshold size.
    Equals,
    /// Transfer only files at most the threshold size.
    AtMost,
    /// Transfer only files at least the threshold size.
    AtLeast,
}

impl FileSizeMode {
    /// The digit this mode occupies at flag position 5.
    #[must_use]
    pub const fn digit(self) -> u32 {
        match self {
            Self::Disabled => 0,
            Self::Equals => 1,
            Self::AtMost => 2,
            Self::AtLeast => 3,
        }
    }

    /// Inverse of [`digit`](Self::digit); `None` outside the 0–3 range.
    #[must_use]
    pub const fn from_digit(digit: u32) -> Option<Self> {
        match digit {
            0 => Some(Self::Disabled),
            1 => Some(Self::Equals),
            2 => Some(Self::AtMost),
            3 => Some(Self::AtLeast),
            _ => None,
        }
    }
}

/// Time unit for the "file not older than" filter.
///
/// Interprets `date_param2` when [`AdvancedParams::not_older_than_mode`]
/// is set. The codec never applies or validates this; it is offered for
/// consumers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeUnit {
    /// Age filtering disabled.
    Disabled,
    /// Day(s).
    Day,
    /// Week(s).
    Week,
    /// Month(s).
    Month,
    /// Year(s).
    Year,
}

impl AgeUnit {
    /// Map a raw `date_param2` value onto a unit; `None` out of range.
    #[must_use]
    pub const fn from_param(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Disabled),
            1 => Some(Self::Day),
            2 => Some(Self::Week),
            3 => Some(Self::Month),
            4 => Some(Self::Year),
            _ => None,
        }
    }
}

/// Advanced transfer options packed into one field of a queue record.
///
/// `date_param1` and `date_param2` change meaning with
/// [`not_older_than_mode`](Self::not_older_than_mode): when unset they are
/// an opaque serial-date range, when set they are a unit count and an
/// [`AgeUnit`] value. Both are carried as opaque integers here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdvancedParams {
    /// Whether the transfer honours the global skip-list.
    pub use_global_skip_list: bool,
    /// Whether the transfer runs in synchronisation mode.
    pub enable_synchronization: bool,
    /// Whether the transfer recurses into subfolders.
    pub include_subfolders: bool,
    /// Whether the filter strings are regular expressions.
    pub use_regular_expressions: bool,
    /// Sync option: ignore new or deleted files.
    pub sync_existing_files_only: bool,
    /// File-size filter mode, used together with [`size_param`](Self::size_param).
    pub file_size_mode: FileSizeMode,
    /// Whether date conditions also apply to directories.
    pub apply_date_condition_to_folders: bool,
    /// Sync option: delete destination files absent from the source.
    pub sync_delete_non_existent_files: bool,
    /// Sync option: compare file date-times.
    pub sync_compare_file_date_time: bool,
    /// Sync option: compare file sizes.
    pub sync_compare_file_size: bool,
    /// Selects "not older than" semantics for the date parameters.
    pub not_older_than_mode: bool,
    /// Sync option: use binary mode for ASCII files.
    pub sync_use_binary_mode_for_ascii: bool,
    /// Sync option: synchronise in both directions.
    pub sync_both_sides: bool,
    /// Whether the client disconnects once the transfer completes.
    pub disconnect_after_complete: bool,
    /// Reserved flag at position 14, semantics unknown.
    pub reserved_flag15: bool,
    /// Size threshold in bytes for the file-size filter.
    pub size_param: i64,
    /// Earliest allowed date, or the unit count in not-older-than mode.
    pub date_param1: i32,
    /// Latest allowed date, or the [`AgeUnit`] value in not-older-than mode.
    pub date_param2: i32,
}

impl Default for AdvancedParams {
    fn default() -> Self {
        Self {
            use_global_skip_list: true,
            enable_synchronization: false,
            include_subfolders: true,
            use_regular_expressions: false,
            sync_existing_files_only: false,
            file_size_mode: FileSizeMode::Disabled,
            apply_date_condition_to_folders: false,
            sync_delete_non_existent_files: false,
            sync_compare_file_date_time: false,
            sync_compare_file_size: false,
            not_older_than_mode: false,
            sync_use_binary_mode_for_ascii: false,
            sync_both_sides: false,
            disconnect_after_complete: false,
            reserved_flag15: false,
            size_param: 0,
            date_param1: 0,
            date_param2: 0,
        }
    }
}

impl AdvancedParams {
    /// Whether date filtering is disabled by the both-zero convention.
    #[must_use]
    pub const fn date_filter_disabled(&self) -> bool {
        self.date_param1 == 0 && self.date_param2 == 0
    }

    /// The age unit in effect, if the record is in not-older-than mode.
    #[must_use]
    pub const fn age_unit(&self) -> Option<AgeUnit> {
        if self.not_older_than_mode {
            AgeUnit::from_param(self.date_param2)
        } else {
            None
        }
    }
}

impl fmt::Display for AdvancedParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits: [u32; FLAG_COUNT] = [
            u32::from(self.use_global_skip_list),
            u32::from(self.enable_synchronization),
            u32::from(self.include_subfolders),
            u32::from(self.use_regular_expressions),
            u32::from(self.sync_existing_files_only),
            self.file_size_mode.digit(),
            u32::from(self.apply_date_condition_to_folders),
            u32::from(self.sync_delete_non_existent_files),
            u32::from(self.sync_compare_file_date_time),
            u32::from(self.sync_compare_file_size),
            u32::from(self.not_older_than_mode),
            u32::from(self.sync_use_binary_mode_for_ascii),
            u32::from(self.sync_both_sides),
            u32::from(self.disconnect_after_complete),
            u32::from(self.reserved_flag15),
        ];
        for digit in digits {
            write!(f, "{digit}")?;
        }
        write!(
            f,
            ",{},{},{}",
            self.size_param, self.date_param1, self.date_param2
        )
    }
}

fn parse_segment<T: FromStr>(text: &str, segment: usize) -> Result<T, AdvancedParamsError> {
    text.parse().map_err(|_| AdvancedParamsError::InvalidNumber {
        segment,
        text: text.to_owned(),
    })
}

impl FromStr for AdvancedParams {
    type Err = AdvancedParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split(',').collect();
        let [flags, size_text, date1_text, date2_text] = segments.as_slice() else {
            return Err(AdvancedParamsError::SegmentCount(segments.len()));
        };

        let flag_len = flags.chars().count();
        if flag_len != FLAG_COUNT {
            return Err(AdvancedParamsError::FlagSegmentLength(flag_len));
        }
        let mut digits = [0u32; FLAG_COUNT];
        for (position, (slot, ch)) in digits.iter_mut().zip(flags.chars()).enumerate() {
            *slot = ch
                .to_digit(10)
                .ok_or(AdvancedParamsError::InvalidDigit { position, digit: ch })?;
        }
        let [
            skip_list,
            synchronization,
            subfolders,
            regex,
            existing_only,
            size_mode,
            date_folders,
            delete_non_existent,
            compare_date_time,
            compare_size,
            not_older_than,
            binary_for_ascii,
            both_sides,
            disconnect,
            reserved,
        ] = digits;

        Ok(Self {
            use_global_skip_list: skip_list != 0,
            enable_synchronization: synchronization != 0,
            include_subfolders: subfolders != 0,
            use_regular_expressions: regex != 0,
            sync_existing_files_only: existing_only != 0,
            file_size_mode: FileSizeMode::from_digit(size_mode)
                .ok_or(AdvancedParamsError::InvalidSizeMode(size_mode))?,
            apply_date_condition_to_folders: date_folders != 0,
            sync_delete_non_existent_files: delete_non_existent != 0,
            sync_compare_file_date_time: compare_date_time != 0,
            sync_compare_file_size: compare_size != 0,
            not_older_than_mode: not_older_than != 0,
            sync_use_binary_mode_for_ascii: binary_for_ascii != 0,
            sync_both_sides: both_sides != 0,
            disconnect_after_complete: disconnect != 0,
            reserved_flag15: reserved != 0,
            size_param: parse_segment(size_text, 1)?,
            date_param1: parse_segment(date1_text, 2)?,
            date_param2: parse_segment(date2_text, 3)?,
        })
    }
}
