use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Document, SearchRequest};

/// The three endpoints the explorer consumes.
///
/// `plot` hands back the raw payload; shaping it is the graph processor's job.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Document>>;
    async fn plot(&self, k: usize, query: &str) -> Result<serde_json::Value>;
    async fn spelling(&self, text: &str) -> Result<String>;
}

/// Navigation history of query strings (`?query=...&node=...`).
pub trait NavigationState: Send {
    /// Query string of the current entry.
    fn read(&self) -> String;
    /// Push a new entry; never replaces the current one.
    fn push(&mut self, location: String);
}
