//! Utility to create AFL fuzzing corpus data.
//!
//! Generates a handful of small queue files covering the codec's shapes
//! and writes them into the `fuzz/corpus` directory.
use std::{fs, io::Write, path::Path};

use rushq::queue::{
    AdvancedParams,
    FileKind,
    FileSizeMode,
    QueueFile,
    TransferItem,
    TransferKind,
};

const CORPUS_DIR: &str = "fuzz/corpus";

fn base_item() -> TransferItem {
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

fn upload_queue() -> QueueFile {
    QueueFile {
        items: vec![base_item()],
    }
}

fn directory_download_queue() -> QueueFile {
    let mut item = base_item();
    item.file_kind = FileKind::Directory;
    item.transfer_kind = TransferKind::Download;
    item.src_site_uid = "0123456789ABCDEF0123456789ABCDEF".to_owned();
    item.src_path = "/remote".to_owned();
    item.src_name = "photos".to_owned();
    item.dst_site_uid = "Local".to_owned();
    item.dst_path = "/home/user".to_owned();
    item.dst_name = "photos".to_owned();
    item.advanced = None;
    QueueFile { items: vec![item] }
}

fn filtered_fxp_queue() -> QueueFile {
    let mut item = base_item();
    item.transfer_kind = TransferKind::Fxp;
    item.remark = "mirror run".to_owned();
    item.folder_include = "releases".to_owned();
    item.file_exclude = "*.tmp".to_owned();
    item.advanced = Some(AdvancedParams {
        enable_synchronization: true,
        file_size_mode: FileSizeMode::AtMost,
        size_param: 5_242_880,
        ..AdvancedParams::default()
    });
    QueueFile {
        items: vec![item, base_item()],
    }
}

fn save_queue(queue: &QueueFile, path: &Path) -> std::io::Result<()> {
    let bytes = queue.encode().expect("corpus queues hold no delimiters");
    let mut f = fs::File::create(path)?;
    f.write_all(&bytes)?;
    Ok(())
}

fn main() -> std::io::Result<()> {
    fs::create_dir_all(CORPUS_DIR)?;
    let dir = Path::new(CORPUS_DIR);
    save_queue(&upload_queue(), &dir.join("upload.qx"))?;
    save_queue(&directory_download_queue(), &dir.join("directory_download.qx"))?;
    save_queue(&filtered_fxp_queue(), &dir.join("filtered_fxp.qx"))?;
    Ok(())
}
