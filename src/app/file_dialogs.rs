// file_dialogs.rs
use rfd::FileDialog;
use std::path::{Path, PathBuf};

use crate::converter::TargetFormat;

pub fn select_image() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select an Image")
        .add_filter("Image Files", &["jpg", "jpeg", "png", "bmp", "gif", "tiff", "webp"])
        .add_filter("All Files", &["*"])
        .pick_file()
}

pub fn select_destination(source: &Path, format: TargetFormat) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save Converted Image")
        .add_filter(&format!("{} Files", format), &[format.extension()])
        .add_filter("All Files", &["*"])
        .set_file_name(&suggested_file_name(source, format));
    if let Some(dir) = source.parent() {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file()
}

fn suggested_file_name(source: &Path, format: TargetFormat) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "converted".to_string());
    format!("{}.{}", stem, format.extension())
}
