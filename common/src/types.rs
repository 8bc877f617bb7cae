//! 植物データの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - PlantRecord: データセットの1件（正規化済み）
//! - IdentificationResult: 識別結果（結果ページで表示）

use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Unknown";
pub const DEFAULT_CATEGORY: &str = "Ornamental";
pub const DEFAULT_ORIGIN: &str = "Philippines";

/// 正規化済みの植物レコード
///
/// すべてのフィールドが常に存在する。生データからは
/// [`crate::normalize_plant`] を通して作る。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecord {
    pub name: String,
    pub scientific_name: String,
    pub family: String,
    pub definition: String,
    pub image_url: String,
    pub description: String,
    pub category: String,
    pub origin: String,
    pub characteristics: Vec<String>,
    pub care: String,
}

impl Default for PlantRecord {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            scientific_name: String::new(),
            family: String::new(),
            definition: String::new(),
            image_url: String::new(),
            description: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            characteristics: Vec::new(),
            care: String::new(),
        }
    }
}

/// 識別結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentificationResult {
    pub name: String,
    pub scientific_name: String,
    pub family: String,
    pub definition: String,
    pub confidence: String,
    pub category: String,
    pub origin: String,
    pub description: String,
    pub characteristics: Vec<String>,
    pub care: String,
    /// Data URLまたはリモートURL
    pub image: String,
}
