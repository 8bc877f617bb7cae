//! 識別API連携（fetch）
//!
//! ページと同じオリジンの `POST /api/identify` を呼ぶ

use async_trait::async_trait;
use florascan_common::{Error, IdentificationClient, IdentifyRequest, IdentifyResponse, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

const IDENTIFY_PATH: &str = "/api/identify";

/// fetchによる識別APIクライアント
pub struct FetchClient {
    endpoint: String,
}

impl FetchClient {
    pub fn new(origin: &str) -> Self {
        Self {
            endpoint: identify_endpoint(origin),
        }
    }

    /// 現在のページのオリジンを使う。取得できなければ相対パス
    pub fn from_page_origin() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        Self::new(&origin)
    }

    async fn post(&self, body: &str) -> std::result::Result<String, JsValue> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(body));

        let request = Request::new_with_str_and_init(&self.endpoint, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        if !resp.ok() {
            return Err(JsValue::from_str(&format!("API error: {}", resp.status())));
        }

        let text = JsFuture::from(resp.text()?).await?;
        text.as_string()
            .ok_or_else(|| JsValue::from_str("Empty response"))
    }
}

#[async_trait(?Send)]
impl IdentificationClient for FetchClient {
    async fn identify(&self, request: &IdentifyRequest) -> Result<IdentifyResponse> {
        let body = serde_json::to_string(request)?;
        let text = self
            .post(&body)
            .await
            .map_err(|e| Error::RemoteUnavailable(format!("{:?}", e)))?;
        parse_identify_response(&text)
    }
}

/// オリジンからエンドポイントURLを作る
pub fn identify_endpoint(origin: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), IDENTIFY_PATH)
}

/// レスポンス本文をパース。JSONオブジェクトでなければRemoteUnavailable
pub fn parse_identify_response(text: &str) -> Result<IdentifyResponse> {
    serde_json::from_str(text)
        .map_err(|e| Error::RemoteUnavailable(format!("malformed response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_endpoint() {
        assert_eq!(identify_endpoint("https://florascan.example"), "https://florascan.example/api/identify");
        assert_eq!(identify_endpoint("http://localhost:5000/"), "http://localhost:5000/api/identify");
        assert_eq!(identify_endpoint(""), "/api/identify");
    }

    #[test]
    fn test_parse_identify_response_object() {
        let response = parse_identify_response(r#"{"name": "Spider Plant", "confidence": "90%"}"#)
            .expect("パース失敗");
        assert_eq!(response.fields["name"], "Spider Plant");
    }

    #[test]
    fn test_parse_identify_response_malformed() {
        for text in ["", "<html>", "[1, 2]", "\"text\""] {
            let err = parse_identify_response(text).unwrap_err();
            assert!(matches!(err, Error::RemoteUnavailable(_)), "{}", text);
        }
    }
}
