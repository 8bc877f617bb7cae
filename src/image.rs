//! 画像ファイルの読み込み（Data URL化）

use crate::error::{FloraScanError, Result};
use florascan_common::to_data_url;
use std::path::Path;

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
];

/// 拡張子からMIMEタイプを判定（大文字小文字を区別しない）
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// 画像ファイルを読み込んでData URLにする
pub fn load_image(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(FloraScanError::FileNotFound(path.display().to_string()));
    }

    let mime_type = mime_type_for(path)
        .ok_or_else(|| FloraScanError::UnsupportedImage(path.display().to_string()))?;

    let bytes = std::fs::read(path)?;
    Ok(to_data_url(mime_type, &bytes))
}
