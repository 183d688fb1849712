use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use synapse_core::error::{Error, Result};
use synapse_core::traits::Backend;
use synapse_core::types::{Document, SearchRequest};

use crate::routes::{plot_path, search_path, spelling_path};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    documents: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct SpellingResponse {
    #[serde(default)]
    suggestion: String,
}

/// `Backend` over plain HTTP GETs against `base_url`.
pub struct HttpBackend {
    http: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let transport = |e: reqwest::Error| Error::Transport { path: path.to_string(), message: e.to_string() };
        let response = self.http.get(&url).header("Accept", "application/json").send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { path: path.to_string(), status: status.as_u16() });
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|e| Error::Decode { path: path.to_string(), message: e.to_string() })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Document>> {
        let path = search_path(request);
        let response: SearchResponse = self.get(&path).await?;
        decode_documents(response.documents).map_err(|message| Error::Decode { path, message })
    }

    async fn plot(&self, k: usize, query: &str) -> Result<Value> {
        self.get(&plot_path(k, query)).await
    }

    async fn spelling(&self, text: &str) -> Result<String> {
        let response: SpellingResponse = self.get(&spelling_path(text)).await?;
        Ok(response.suggestion)
    }
}

/// Turn the `documents` map into a list in server (ranking) order, filling
/// each missing `id` from its key.
pub fn decode_documents(documents: Map<String, Value>) -> std::result::Result<Vec<Document>, String> {
    documents
        .into_iter()
        .map(|(key, value)| {
            let mut doc: Document = serde_json::from_value(value).map_err(|e| format!("document {key}: {e}"))?;
            if doc.id.is_empty() {
                doc.id = key;
            }
            Ok(doc)
        })
        .collect()
}
