//! Path builders for the backend endpoints.
//!
//! Text segments lose every `/` and are then percent-encoded, since a path
//! segment cannot carry a slash.

use synapse_core::types::SearchRequest;

/// Placeholder sent in the node segment when no node is focused.
pub const NO_NODE: &str = "null";

pub fn segment(text: &str) -> String {
    urlencoding::encode(&text.replace('/', "")).into_owned()
}

pub fn search_path(request: &SearchRequest) -> String {
    let node = request.node.as_deref().map_or_else(|| NO_NODE.to_string(), segment);
    format!("/search/{}/{}/{}/{}", request.sort, node, request.k, segment(&request.query))
}

pub fn plot_path(k: usize, query: &str) -> String {
    format!("/plot/{}/{}", k, segment(query))
}

pub fn spelling_path(text: &str) -> String {
    format!("/spelling/{}", segment(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(node: Option<&str>, query: &str) -> SearchRequest {
        SearchRequest { sort: false, node: node.map(str::to_string), k: 40, query: query.to_string() }
    }

    #[test]
    fn search_uses_null_sentinel_without_node() {
        assert_eq!(search_path(&request(None, "neural")), "/search/false/null/40/neural");
    }

    #[test]
    fn health_check_path() {
        assert_eq!(search_path(&SearchRequest::health_check()), "/search/false/null/0/%20");
    }

    #[test]
    fn segments_are_stripped_and_encoded() {
        assert_eq!(
            search_path(&request(Some("graph/nn"), "tcp/ip & udp")),
            "/search/false/graphnn/40/tcpip%20%26%20udp"
        );
        assert_eq!(plot_path(40, "a/b/c d"), "/plot/40/abc%20d");
        assert_eq!(spelling_path("nueral?"), "/spelling/nueral%3F");
    }
}
