//! Data URLユーティリティ

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// バイト列からData URLを作る
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// 画像のMIMEタイプか（ファイル選択時の判定）
pub fn is_image_mime_type(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}
