//! 植物識別フロー
//!
//! 画像があれば識別APIを1回だけ呼び、失敗したら手元で決定的な
//! フォールバック結果を作る。APIの失敗はユーザーに見せない。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dataset::ResultSlot;
use crate::error::{Error, Result};
use crate::normalize::text;
use crate::store::KeyValueStore;
use crate::types::{IdentificationResult, DEFAULT_CATEGORY, DEFAULT_ORIGIN};

pub const DEFAULT_RESULT_NAME: &str = "Identified Plant";
pub const DEFAULT_CONFIDENCE: &str = "85%";
const PLACEHOLDER: &str = "—";
const MISSING_INPUT_MESSAGE: &str = "Please upload a photo or take a picture first.";

/// `POST /api/identify` のリクエストボディ
#[derive(Debug, Clone, Serialize)]
pub struct IdentifyRequest {
    /// Data URL
    pub image: String,
}

/// `POST /api/identify` のレスポンス
///
/// 全フィールド任意。JSONオブジェクトでなければデシリアライズに失敗する。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct IdentifyResponse {
    pub fields: Map<String, Value>,
}

impl IdentifyResponse {
    fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).and_then(text)
    }

    fn list(&self, key: &str) -> Option<Vec<String>> {
        let items = self.fields.get(key)?.as_array()?;
        Some(
            items
                .iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect(),
        )
    }
}

/// 識別APIクライアント
///
/// ネットワークエラー・失敗ステータス・不正なレスポンスはすべて
/// `Error::RemoteUnavailable` として返す。
#[async_trait(?Send)]
pub trait IdentificationClient {
    async fn identify(&self, request: &IdentifyRequest) -> Result<IdentifyResponse>;
}

/// 識別を実行する
///
/// 画像も説明文もなければ `Error::MissingInput`。
pub async fn identify<C>(
    client: &C,
    staged_image: Option<&str>,
    description: &str,
) -> Result<IdentificationResult>
where
    C: IdentificationClient + ?Sized,
{
    let staged_image = staged_image.filter(|s| !s.is_empty());
    let description = description.trim();

    if staged_image.is_none() && description.is_empty() {
        return Err(Error::MissingInput(MISSING_INPUT_MESSAGE.into()));
    }

    if let Some(image) = staged_image {
        let request = IdentifyRequest { image: image.to_string() };
        match client.identify(&request).await {
            Ok(response) => return Ok(from_response(&response, image)),
            Err(e) => tracing::warn!("identification endpoint failed, using fallback: {}", e),
        }
    }

    Ok(fallback_result(description, staged_image))
}

/// 識別して結果スロットに保存する
///
/// 入力不足のときは何も保存しない。
pub async fn identify_and_store<C, S>(
    client: &C,
    slot: &ResultSlot<S>,
    staged_image: Option<&str>,
    description: &str,
) -> Result<IdentificationResult>
where
    C: IdentificationClient + ?Sized,
    S: KeyValueStore,
{
    let result = identify(client, staged_image, description).await?;
    slot.save(&result)?;
    Ok(result)
}

/// APIレスポンスから結果を作る（欠けたフィールドはデフォルト）
pub fn from_response(response: &IdentifyResponse, staged_image: &str) -> IdentificationResult {
    let definition = response.text("definition");
    let description = response.text("description");

    IdentificationResult {
        name: response.text("name").unwrap_or_else(|| DEFAULT_RESULT_NAME.into()),
        scientific_name: response.text("scientificName").unwrap_or_else(|| PLACEHOLDER.into()),
        family: response.text("family").unwrap_or_else(|| PLACEHOLDER.into()),
        definition: definition.clone().or_else(|| description.clone()).unwrap_or_default(),
        confidence: response.text("confidence").unwrap_or_else(|| DEFAULT_CONFIDENCE.into()),
        category: response.text("category").unwrap_or_else(|| DEFAULT_CATEGORY.into()),
        origin: response.text("origin").unwrap_or_else(|| DEFAULT_ORIGIN.into()),
        description: description.or(definition).unwrap_or_default(),
        characteristics: response
            .list("characteristics")
            .unwrap_or_else(|| vec![PLACEHOLDER.into()]),
        care: response.text("care").unwrap_or_default(),
        image: response.text("image").unwrap_or_else(|| staged_image.to_string()),
    }
}

/// APIが使えないときの結果
///
/// 説明文の最初の単語から名前を作る。画像があればそのまま載せる。
pub fn fallback_result(description: &str, staged_image: Option<&str>) -> IdentificationResult {
    let description = description.trim();
    // タブ・改行も単語の区切りにする
    let name = description
        .split_whitespace()
        .next()
        .map(|word| format!("{} Plant", word))
        .unwrap_or_else(|| DEFAULT_RESULT_NAME.into());

    let summary = if staged_image.is_some() {
        "Identified from your photo.".to_string()
    } else {
        format!("Based on your description \"{}\".", description)
    };

    IdentificationResult {
        name,
        scientific_name: "Scientific name pending analysis".into(),
        family: PLACEHOLDER.into(),
        definition: String::new(),
        confidence: DEFAULT_CONFIDENCE.into(),
        category: DEFAULT_CATEGORY.into(),
        origin: DEFAULT_ORIGIN.into(),
        description: summary,
        characteristics: vec![
            "Green foliage".into(),
            "Native species".into(),
            "Adaptable".into(),
        ],
        care: "Provide adequate water and sunlight.".into(),
        image: staged_image.unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, RESULT_KEY};
    use futures::executor::block_on;
    use std::cell::Cell;

    const IMAGE: &str = "data:image/jpeg;base64,/9j/4AAQ";

    /// 呼び出し回数を数えるクライアント
    struct FakeClient {
        response: Option<&'static str>,
        calls: Cell<usize>,
    }

    impl FakeClient {
        fn ok(json: &'static str) -> Self {
            Self { response: Some(json), calls: Cell::new(0) }
        }

        fn failing() -> Self {
            Self { response: None, calls: Cell::new(0) }
        }
    }

    #[async_trait(?Send)]
    impl IdentificationClient for FakeClient {
        async fn identify(&self, request: &IdentifyRequest) -> Result<IdentifyResponse> {
            self.calls.set(self.calls.get() + 1);
            assert_eq!(request.image, IMAGE);
            match self.response {
                Some(json) => serde_json::from_str(json)
                    .map_err(|e| Error::RemoteUnavailable(e.to_string())),
                None => Err(Error::RemoteUnavailable("connection refused".into())),
            }
        }
    }

    #[test]
    fn test_missing_input() {
        let client = FakeClient::failing();
        let err = block_on(identify(&client, None, "   ")).unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
        assert_eq!(client.calls.get(), 0);
    }

    #[test]
    fn test_missing_input_stores_nothing() {
        let store = MemoryStore::new();
        let slot = ResultSlot::new(&store);
        let client = FakeClient::failing();

        let err = block_on(identify_and_store(&client, &slot, Some(""), "")).unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
        assert!(!store.contains(RESULT_KEY));
    }

    #[test]
    fn test_success_maps_response() {
        let client = FakeClient::ok(r#"{
            "name": "Spider Plant",
            "scientificName": "Chlorophytum comosum",
            "family": "Asparagaceae",
            "description": "Arching leaves",
            "confidence": "92%",
            "characteristics": ["Air purifying"]
        }"#);

        let result = block_on(identify(&client, Some(IMAGE), "")).unwrap();
        assert_eq!(client.calls.get(), 1);
        assert_eq!(result.name, "Spider Plant");
        assert_eq!(result.confidence, "92%");
        assert_eq!(result.definition, "Arching leaves");
        assert_eq!(result.description, "Arching leaves");
        assert_eq!(result.characteristics, vec!["Air purifying"]);
        assert_eq!(result.category, "Ornamental");
        assert_eq!(result.origin, "Philippines");
        assert_eq!(result.image, IMAGE);
    }

    #[test]
    fn test_success_with_empty_object_uses_defaults() {
        let client = FakeClient::ok("{}");
        let result = block_on(identify(&client, Some(IMAGE), "")).unwrap();
        assert_eq!(result.name, "Identified Plant");
        assert_eq!(result.scientific_name, "—");
        assert_eq!(result.family, "—");
        assert_eq!(result.confidence, "85%");
        assert_eq!(result.characteristics, vec!["—"]);
        assert_eq!(result.care, "");
        assert_eq!(result.image, IMAGE);
    }

    #[test]
    fn test_response_image_overrides_staged() {
        let client = FakeClient::ok(r#"{"image": "https://example.com/p.jpg"}"#);
        let result = block_on(identify(&client, Some(IMAGE), "")).unwrap();
        assert_eq!(result.image, "https://example.com/p.jpg");
    }

    #[test]
    fn test_remote_failure_falls_back_with_image() {
        let client = FakeClient::failing();
        let result = block_on(identify(&client, Some(IMAGE), "")).unwrap();

        assert_eq!(client.calls.get(), 1);
        assert_eq!(result, fallback_result("", Some(IMAGE)));
        assert_eq!(result.image, IMAGE);
        assert_eq!(result.name, "Identified Plant");
        assert_eq!(result.description, "Identified from your photo.");
    }

    #[test]
    fn test_malformed_response_falls_back() {
        let client = FakeClient::ok(r#"["not", "an", "object"]"#);
        let result = block_on(identify(&client, Some(IMAGE), "Guava tree")).unwrap();
        assert_eq!(result.name, "Guava Plant");
        assert_eq!(result.image, IMAGE);
    }

    #[test]
    fn test_description_only_skips_remote() {
        let client = FakeClient::failing();
        let result = block_on(identify(&client, None, "  Malunggay with small leaves ")).unwrap();

        assert_eq!(client.calls.get(), 0);
        assert_eq!(result.name, "Malunggay Plant");
        assert_eq!(result.description, "Based on your description \"Malunggay with small leaves\".");
        assert_eq!(result.scientific_name, "Scientific name pending analysis");
        assert_eq!(result.characteristics, vec!["Green foliage", "Native species", "Adaptable"]);
        assert_eq!(result.image, "");
    }

    #[test]
    fn test_fallback_name_splits_on_any_whitespace() {
        assert_eq!(fallback_result("Fern\twith fronds", None).name, "Fern Plant");
        assert_eq!(fallback_result("Pandan\nleaves", None).name, "Pandan Plant");
        assert_eq!(fallback_result("   ", None).name, "Identified Plant");
    }

    #[test]
    fn test_identify_and_store_persists() {
        let store = MemoryStore::new();
        let slot = ResultSlot::new(&store);
        let client = FakeClient::failing();

        let result = block_on(identify_and_store(&client, &slot, None, "Orchid")).unwrap();
        assert_eq!(slot.load(), Some(result));
    }

    #[test]
    fn test_request_serialize() {
        let request = IdentifyRequest { image: IMAGE.to_string() };
        let json = serde_json::to_string(&request).expect("シリアライズ失敗");
        assert_eq!(json, format!("{{\"image\":\"{}\"}}", IMAGE));
    }
}
