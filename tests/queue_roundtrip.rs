//! Record-level codec scenarios and round-trip properties.

use proptest::{collection::vec, option, prelude::*};
use rushq::queue::{
    AdvancedParams,
    FIELD_SEPARATOR,
    FileKind,
    FileSizeMode,
    QueueFile,
    RECORD_TERMINATOR,
    TransferItem,
    TransferKind,
};

fn reference_item() -> TransferItem {
    TransferItem {
        file_kind: FileKind::File,
        transfer_kind: TransferKind::Upload,
        src_site_uid: "Local".to_owned(),
        src_path: "/tmp".to_owned(),
        src_name: "a.txt".to_owned(),
        dst_site_uid: "0123456789ABCDEF0123456789ABCDEF".to_owned(),
        dst_path: "/remote".to_owned(),
        dst_name: "a.txt".to_owned(),
        size_bytes: 1024,
        reserved_index4: 1,
        advanced: Some(AdvancedParams::default()),
        remark: String::new(),
        folder_include: String::new(),
        folder_exclude: String::new(),
        file_include: String::new(),
        file_exclude: String::new(),
    }
}

#[test]
fn reference_item_encodes_to_expected_bytes() {
    let bytes = reference_item().encode().expect("encode");
    // UTF-16LE "2", separator, "0", separator.
    assert_eq!(bytes[..8], [0x32, 0x00, 0x02, 0x00, 0x30, 0x00, 0x02, 0x00]);
    assert!(bytes.ends_with(&RECORD_TERMINATOR));
}

#[test]
fn reference_item_round_trips_exactly() {
    let item = reference_item();
    let bytes = item.encode().expect("encode");
    let decoded = TransferItem::decode(&bytes).expect("decode");
    assert_eq!(decoded, item);
}

#[test]
fn separator_follows_every_field() {
    let bytes = reference_item().encode().expect("encode");
    let separators = bytes
        .windows(FIELD_SEPARATOR.len())
        .filter(|window| *window == FIELD_SEPARATOR)
        .count();
    // Sixteen fields, one separator each; no field content contains the
    // pattern for this item.
    assert_eq!(separators, 16);
}

fn safe_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ._/-]{0,24}"
}

fn site_uid() -> impl Strategy<Value = String> {
    prop_oneof![Just("Local".to_owned()), "[0-9A-F]{32}"]
}

fn file_kind() -> impl Strategy<Value = FileKind> {
    (0u8..=2).prop_map(|n| FileKind::from_ordinal(n).expect("in range"))
}

fn transfer_kind() -> impl Strategy<Value = TransferKind> {
    (0u8..=6).prop_map(|n| TransferKind::from_ordinal(n).expect("in range"))
}

fn advanced() -> impl Strategy<Value = AdvancedParams> {
    (
        any::<[bool; 8]>(),
        any::<[bool; 6]>(),
        (0u32..=3).prop_map(|d| FileSizeMode::from_digit(d).expect("in range")),
        any::<i64>(),
        any::<i32>(),
        any::<i32>(),
    )
        .prop_map(|(first, second, file_size_mode, size_param, date_param1, date_param2)| {
            let [
                use_global_skip_list,
                enable_synchronization,
                include_subfolders,
                use_regular_expressions,
                sync_existing_files_only,
                apply_date_condition_to_folders,
                sync_delete_non_existent_files,
                sync_compare_file_date_time,
            ] = first;
            let [
                sync_compare_file_size,
                not_older_than_mode,
                sync_use_binary_mode_for_ascii,
                sync_both_sides,
                disconnect_after_complete,
                reserved_flag15,
            ] = second;
            AdvancedParams {
                use_global_skip_list,
                enable_synchronization,
                include_subfolders,
                use_regular_expressions,
                sync_existing_files_only,
                file_size_mode,
                apply_date_condition_to_folders,
                sync_delete_non_existent_files,
                sync_compare_file_date_time,
                sync_compare_file_size,
                not_older_than_mode,
                sync_use_binary_mode_for_ascii,
                sync_both_sides,
                disconnect_after_complete,
                reserved_flag15,
                size_param,
                date_param1,
                date_param2,
            }
        })
}

fn transfer_item() -> impl Strategy<Value = TransferItem> {
    (
        (file_kind(), transfer_kind(), site_uid(), safe_text(), safe_text()),
        (site_uid(), safe_text(), safe_text(), any::<u64>(), any::<i64>()),
        (option::of(advanced()), safe_text()),
        (safe_text(), safe_text(), safe_text(), safe_text()),
    )
        .prop_map(|(src, dst, extras, filters)| {
            let (file_kind, transfer_kind, src_site_uid, src_path, src_name) = src;
            let (dst_site_uid, dst_path, dst_name, size_bytes, reserved_index4) = dst;
            let (advanced, remark) = extras;
            let (folder_include, folder_exclude, file_include, file_exclude) = filters;
            TransferItem {
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
            }
        })
}

proptest! {
    #[test]
    fn record_round_trip_identity(item in transfer_item()) {
        let bytes = item.encode().expect("encode");
        let decoded = TransferItem::decode(&bytes).expect("decode");
        prop_assert_eq!(decoded, item);
    }

    #[test]
    fn record_encoding_is_byte_stable(item in transfer_item()) {
        let first = item.encode().expect("encode");
        let again = TransferItem::decode(&first)
            .expect("decode")
            .encode()
            .expect("re-encode");
        prop_assert_eq!(again, first);
    }

    #[test]
    fn file_round_trip_preserves_item_order(items in vec(transfer_item(), 0..4)) {
        let queue = QueueFile { items };
        let bytes = queue.encode().expect("encode");
        let decoded = QueueFile::decode(&bytes).expect("decode");
        prop_assert_eq!(decoded.items, queue.items);
    }

    #[test]
    fn advanced_params_round_trip(params in advanced()) {
        let decoded: AdvancedParams = params.to_string().parse().expect("decode");
        prop_assert_eq!(decoded, params);
    }
}
