//! データセットのプレビュー表示モデル

use crate::types::PlantRecord;

/// プレビューに出す最大件数
pub const PREVIEW_LIMIT: usize = 20;

const NO_DATASET_STATUS: &str = "No dataset loaded. Upload or paste above.";
const MISSING_NAME: &str = "—";

/// プレビューの1行（名前 + 学名）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewItem {
    pub name: String,
    pub scientific_name: String,
}

/// ステータス行・プレビュー・クリアボタン表示の3面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetView {
    pub status: String,
    pub items: Vec<PreviewItem>,
    /// 省略した件数（「… and N more」）
    pub remaining: usize,
    pub show_clear: bool,
}

impl DatasetView {
    pub fn build(dataset: Option<&[PlantRecord]>) -> Self {
        let plants = match dataset {
            Some(plants) if !plants.is_empty() => plants,
            _ => return Self::empty(),
        };

        let items = plants
            .iter()
            .take(PREVIEW_LIMIT)
            .map(|p| PreviewItem {
                name: if p.name.is_empty() { MISSING_NAME.to_string() } else { p.name.clone() },
                scientific_name: p.scientific_name.clone(),
            })
            .collect();

        Self {
            status: format!(
                "{} plant(s) in dataset. Used on Home and for identification.",
                plants.len()
            ),
            items,
            remaining: plants.len().saturating_sub(PREVIEW_LIMIT),
            show_clear: true,
        }
    }

    pub fn empty() -> Self {
        Self {
            status: NO_DATASET_STATUS.to_string(),
            items: Vec::new(),
            remaining: 0,
            show_clear: false,
        }
    }

    /// 省略行の文言。省略がなければ None
    pub fn more_label(&self) -> Option<String> {
        (self.remaining > 0).then(|| format!("… and {} more", self.remaining))
    }
}
