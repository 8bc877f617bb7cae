//! データセットパーサー
//!
//! アップロード・貼り付けされたCSV/JSONテキストを
//! [`PlantRecord`] の配列に変換する

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::normalize::{normalize_plant, normalize_value};
use crate::types::PlantRecord;

const CHARACTERISTICS_HEADER: &str = "characteristics";
const CHARACTERISTICS_SEPARATOR: char = ';';

/// CSVテキストをパースする
///
/// 1行目をヘッダとして扱い、以降の行を位置で対応付ける。
/// 値が足りない列は空文字になる（空行はデフォルト値だけのレコードになる）。
/// `characteristics` 列は `;` で分割する。
///
/// ヘッダのみ・空テキストの場合は空配列を返す。
///
/// # Examples
/// ```
/// use florascan_common::parse_csv;
///
/// let plants = parse_csv("name,origin\nNarra,\n");
/// assert_eq!(plants.len(), 1);
/// assert_eq!(plants[0].origin, "Philippines");
/// ```
pub fn parse_csv(text: &str) -> Vec<PlantRecord> {
    let lines = csv_lines(text);
    if lines.len() < 2 {
        return Vec::new();
    }

    let headers = split_row(lines[0]);

    lines[1..]
        .iter()
        .map(|line| {
            let values = split_row(line);
            let mut row = Map::new();
            for (i, header) in headers.iter().enumerate() {
                let value = values.get(i).cloned().unwrap_or_default();
                row.insert(header.clone(), Value::String(value));
            }
            split_characteristics(&mut row);
            normalize_plant(&row)
        })
        .collect()
}

/// CSVにデータ行（ヘッダ以外の行）があるか
pub fn csv_has_data_rows(text: &str) -> bool {
    csv_lines(text).len() >= 2
}

/// JSONテキストをパースする
///
/// 配列以外は0件として返す（件数0のメッセージは呼び出し側が決める）。
/// オブジェクト以外の要素を含む配列はバッチ全体をエラーにする。
pub fn parse_json_dataset(text: &str) -> Result<Vec<PlantRecord>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| Error::MalformedInput(format!("Invalid JSON: {}", e)))?;

    let Some(items) = value.as_array() else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            normalize_value(item).ok_or_else(|| {
                Error::MalformedInput(format!("Entry {} is not a plant object.", i + 1))
            })
        })
        .collect()
}

/// ファイル名がCSVか（拡張子、大文字小文字を区別しない）
pub fn is_csv_file_name(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(".csv")
}

fn csv_lines(text: &str) -> Vec<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.lines().collect()
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',').map(unquote).collect()
}

fn unquote(cell: &str) -> String {
    let cell = cell.trim();
    let cell = cell.strip_prefix('"').unwrap_or(cell);
    let cell = cell.strip_suffix('"').unwrap_or(cell);
    cell.to_string()
}

fn split_characteristics(row: &mut Map<String, Value>) {
    let Some(Value::String(raw)) = row.get(CHARACTERISTICS_HEADER) else {
        return;
    };
    if raw.is_empty() {
        return;
    }

    let items: Vec<Value> = raw
        .split(CHARACTERISTICS_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Value::String(s.to_string()))
        .collect();

    row.insert(CHARACTERISTICS_HEADER.to_string(), Value::Array(items));
}
