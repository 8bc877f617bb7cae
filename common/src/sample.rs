//! ダウンロード用サンプルデータセット

use crate::error::Result;
use crate::types::PlantRecord;

pub const SAMPLE_FILE_NAME: &str = "florascan-sample-dataset.json";

/// 2件のサンプル
pub fn sample_dataset() -> Vec<PlantRecord> {
    vec![
        PlantRecord {
            name: "Spider Plant".into(),
            scientific_name: "Chlorophytum comosum".into(),
            family: "Asparagaceae".into(),
            definition: "A popular houseplant with arching green and white striped leaves. Easy to grow and helps purify indoor air.".into(),
            image_url: "https://images.unsplash.com/photo-1638842940758-c933b1d7a369?w=400&h=400&fit=crop".into(),
            description: "Popular houseplant with arching leaves.".into(),
            category: "Ornamental".into(),
            origin: "Tropical Africa".into(),
            characteristics: vec![
                "Long arching leaves".into(),
                "Air purifying".into(),
                "Low maintenance".into(),
            ],
            care: "Water when dry, bright indirect light.".into(),
        },
        PlantRecord {
            name: "Snake Plant".into(),
            scientific_name: "Sansevieria trifasciata".into(),
            family: "Asparagaceae".into(),
            definition: "Hardy succulent with upright, sword-shaped leaves. Very drought tolerant.".into(),
            image_url: "https://images.unsplash.com/photo-1596670121720-43b064147efd?w=400&h=400&fit=crop".into(),
            description: "Hardy succulent with upright leaves.".into(),
            category: "Ornamental".into(),
            origin: "West Africa".into(),
            characteristics: vec![
                "Upright leaves".into(),
                "Drought tolerant".into(),
                "Low light".into(),
            ],
            care: "Water sparingly, tolerates low light.".into(),
        },
    ]
}

/// 整形済みJSON（2スペースインデント）
pub fn sample_dataset_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&sample_dataset())?)
}
