//! 植物レコードの正規化
//!
//! 生のJSONオブジェクト（アップロード・貼り付け・CSV行）を
//! [`PlantRecord`] に変換する。フィールドごとに
//! (参照するキーの順序, デフォルト値) を表で持ち、先頭から順に適用する。

use serde_json::{Map, Value};

use crate::types::{PlantRecord, DEFAULT_CATEGORY, DEFAULT_NAME, DEFAULT_ORIGIN};

/// 文字列フィールドの規則
struct FieldRule {
    keys: &'static [&'static str],
    default: &'static str,
}

const NAME: FieldRule = FieldRule { keys: &["name"], default: DEFAULT_NAME };
const SCIENTIFIC_NAME: FieldRule = FieldRule { keys: &["scientificName", "scientific_name"], default: "" };
const FAMILY: FieldRule = FieldRule { keys: &["family", "family_name"], default: "" };
const DEFINITION: FieldRule = FieldRule { keys: &["definition", "description"], default: "" };
const IMAGE_URL: FieldRule = FieldRule { keys: &["imageUrl", "image_url"], default: "" };
const DESCRIPTION: FieldRule = FieldRule { keys: &["description"], default: "" };
const CATEGORY: FieldRule = FieldRule { keys: &["category"], default: DEFAULT_CATEGORY };
const ORIGIN: FieldRule = FieldRule { keys: &["origin"], default: DEFAULT_ORIGIN };
const CARE: FieldRule = FieldRule { keys: &["care"], default: "" };

const CHARACTERISTICS_KEY: &str = "characteristics";

/// 生オブジェクトを正規化する
///
/// 純粋関数で冪等: 正規化済みレコードを再度通しても同じ結果になる。
pub fn normalize_plant(raw: &Map<String, Value>) -> PlantRecord {
    PlantRecord {
        name: apply(raw, &NAME),
        scientific_name: apply(raw, &SCIENTIFIC_NAME),
        family: apply(raw, &FAMILY),
        definition: apply(raw, &DEFINITION),
        image_url: apply(raw, &IMAGE_URL),
        description: apply(raw, &DESCRIPTION),
        category: apply(raw, &CATEGORY),
        origin: apply(raw, &ORIGIN),
        characteristics: string_list(raw.get(CHARACTERISTICS_KEY)),
        care: apply(raw, &CARE),
    }
}

/// JSON値を正規化する。オブジェクト以外は None
pub fn normalize_value(raw: &Value) -> Option<PlantRecord> {
    raw.as_object().map(normalize_plant)
}

impl PlantRecord {
    /// 型付きレコードを再正規化する（空の名前などにデフォルトを入れる）
    pub fn normalized(&self) -> PlantRecord {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => normalize_plant(&map),
            _ => self.clone(),
        }
    }
}

fn apply(raw: &Map<String, Value>, rule: &FieldRule) -> String {
    rule.keys
        .iter()
        .find_map(|key| raw.get(*key).and_then(text))
        .unwrap_or_else(|| rule.default.to_string())
}

/// 値を文字列として取り出す。null・空文字・false・0は欠損扱い
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// 文字列配列として取り出す
///
/// 配列はそのまま（要素は文字列化、nullは除外）、単独の値は1要素に包む。
pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect(),
        Some(other) => text(other).into_iter().collect(),
        None => Vec::new(),
    }
}
