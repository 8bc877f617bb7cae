//! 識別APIクライアント（reqwest）

use async_trait::async_trait;
use florascan_common::{Error, IdentificationClient, IdentifyRequest, IdentifyResponse};
use std::time::Duration;

use crate::error::Result;

const IDENTIFY_PATH: &str = "/api/identify";

/// `POST {api_base}/api/identify` を呼ぶクライアント
pub struct HttpIdentificationClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpIdentificationClient {
    pub fn new(api_base: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: identify_endpoint(api_base),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl IdentificationClient for HttpIdentificationClient {
    async fn identify(&self, request: &IdentifyRequest) -> florascan_common::Result<IdentifyResponse> {
        tracing::debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::RemoteUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteUnavailable(format!("API error: {}", status)));
        }

        response
            .json::<IdentifyResponse>()
            .await
            .map_err(|e| Error::RemoteUnavailable(format!("malformed response: {}", e)))
    }
}

/// APIオリジンから識別エンドポイントURLを作る
pub fn identify_endpoint(api_base: &str) -> String {
    format!("{}{}", api_base.trim().trim_end_matches('/'), IDENTIFY_PATH)
}
