//! データセット管理
//!
//! 永続ストアの1スロットに植物データセット全体を保存する。
//! 変更の単位はデータセット全体（置き換え・削除のみ）。

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::normalize::{normalize_plant, normalize_value};
use crate::parser::{csv_has_data_rows, is_csv_file_name, parse_csv, parse_json_dataset};
use crate::preview::DatasetView;
use crate::store::{KeyValueStore, DATASET_KEY, RESULT_KEY};
use crate::types::{IdentificationResult, PlantRecord};

/// データセットのリポジトリ
///
/// UIハンドラにはこれを渡し、ストアを直接触らせない。
#[derive(Debug)]
pub struct DatasetManager<S> {
    store: S,
}

impl<S: KeyValueStore> DatasetManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 保存済みデータセットを読む
    ///
    /// スロットがない・読めない・JSONでない・配列でない場合は None。
    /// オブジェクト以外の要素はデフォルト値のレコードとして読む
    pub fn load(&self) -> Option<Vec<PlantRecord>> {
        let raw = match self.store.get(DATASET_KEY) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(e) => {
                tracing::warn!("dataset slot unreadable: {}", e);
                return None;
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("dataset slot is not valid JSON: {}", e);
                return None;
            }
        };

        let items = value.as_array()?;
        let plants = items
            .iter()
            .map(|item| normalize_value(item).unwrap_or_else(|| normalize_plant(&Map::new())))
            .collect();
        Some(plants)
    }

    /// データセットを丸ごと置き換える
    ///
    /// 空配列ならスロットを削除して「データセットなし」に戻す。
    /// シリアライズを済ませてから1回で書き込むので、途中状態は見えない。
    pub fn save(&self, plants: &[PlantRecord]) -> Result<()> {
        if plants.is_empty() {
            return self.clear();
        }

        let normalized: Vec<PlantRecord> = plants.iter().map(PlantRecord::normalized).collect();
        let json = serde_json::to_string(&normalized)?;
        self.store.set(DATASET_KEY, &json)?;
        tracing::info!("dataset saved: {} plant(s)", normalized.len());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(DATASET_KEY)?;
        tracing::info!("dataset cleared");
        Ok(())
    }

    /// アップロードされたファイルを取り込む
    ///
    /// `.csv` はCSV、それ以外はJSONとして扱う。保存した件数を返す。
    /// 失敗時は既存のデータセットに触れない。
    pub fn import_upload(&self, file_name: &str, text: &str) -> Result<usize> {
        let plants = if is_csv_file_name(file_name) {
            if !csv_has_data_rows(text) {
                return Err(Error::MalformedInput("CSV has no data rows.".into()));
            }
            parse_csv(text)
        } else {
            parse_json_dataset(text)?
        };

        if plants.is_empty() {
            return Err(Error::EmptyResult("No valid plants found in file.".into()));
        }

        self.save(&plants)?;
        Ok(plants.len())
    }

    /// 貼り付けられたJSONを取り込む
    pub fn import_paste(&self, text: &str) -> Result<usize> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::MissingInput("Paste JSON first.".into()));
        }

        let plants = parse_json_dataset(text)?;
        if plants.is_empty() {
            return Err(Error::EmptyResult("JSON must be an array of plants.".into()));
        }

        self.save(&plants)?;
        Ok(plants.len())
    }

    /// 表示用モデルを作り直す
    pub fn refresh_view(&self) -> DatasetView {
        DatasetView::build(self.load().as_deref())
    }
}

/// 識別結果の一時スロット
#[derive(Debug)]
pub struct ResultSlot<S> {
    store: S,
}

impl<S: KeyValueStore> ResultSlot<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 前回の結果を上書きする
    pub fn save(&self, result: &IdentificationResult) -> Result<()> {
        let json = serde_json::to_string(result)?;
        self.store.set(RESULT_KEY, &json)
    }

    pub fn load(&self) -> Option<IdentificationResult> {
        let raw = self.store.get(RESULT_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::warn!("result slot is not valid JSON: {}", e);
                None
            }
        }
    }
}

/// 保存済みメッセージ
pub fn saved_message(count: usize) -> String {
    format!("Dataset saved: {} plant(s).", count)
}
