//! Domain types shared by the view transforms, the HTTP client and the
//! exploration controller.

use serde::{Deserialize, Serialize};

pub type NodeId = String;

/// Default result/graph breadth sent with every search and plot request.
pub const DEFAULT_K: usize = 40;

/// A ranked document as returned by the search endpoint.
///
/// - `id`: key of the document in the server's `documents` map
/// - `tags`/`extra_tags`: entity labels; `extra_tags` travels as `extra-tags`
///
/// Every field is optional on the wire and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub url: String,
    pub date: String,
    pub summary: String,
    pub tags: Vec<String>,
    #[serde(rename = "extra-tags")]
    pub extra_tags: Vec<String>,
}

impl Document {
    /// Tags followed by extra tags, first occurrence wins.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.tags.len() + self.extra_tags.len());
        for tag in self.tags.iter().chain(self.extra_tags.iter()) {
            if !out.contains(&tag.as_str()) {
                out.push(tag);
            }
        }
        out
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().chain(self.extra_tags.iter()).any(|t| t == tag)
    }
}

/// A node ready for rendering. `size` is the node's degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub color: String,
    pub group: String,
    pub size: usize,
}

/// A link whose endpoints are guaranteed to exist in the owning `GraphData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: NodeId,
    pub target: NodeId,
    pub relation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphData {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Links with `id` at either end.
    pub fn links_touching<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphLink> + 'a {
        self.links.iter().filter(move |l| l.source == id || l.target == id)
    }
}

/// The authoritative query state. Only the controller writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub raw_input: String,
    pub committed_query: String,
    pub focused_node: Option<NodeId>,
    pub page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self { raw_input: String::new(), committed_query: String::new(), focused_node: None, page: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellingSuggestion {
    pub text: String,
    pub for_input: String,
}

/// The deep-link triple kept in navigation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    pub query: String,
    pub node: Option<NodeId>,
    pub page: usize,
}

impl Default for NavigationEntry {
    fn default() -> Self {
        Self { query: String::new(), node: None, page: 1 }
    }
}

/// Parameters of one `/search` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub sort: bool,
    pub node: Option<NodeId>,
    pub k: usize,
    pub query: String,
}

impl SearchRequest {
    /// The request used to probe whether the backend is up.
    pub fn health_check() -> Self {
        Self { sort: false, node: None, k: 0, query: " ".to_string() }
    }
}
