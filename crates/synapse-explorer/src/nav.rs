use tracing::debug;

use synapse_core::traits::NavigationState;
use synapse_core::types::NavigationEntry;

/// Maps the `{query, node, page}` triple onto a navigation port.
pub struct UrlStateSync<N: NavigationState> {
    nav: N,
}

impl<N: NavigationState> UrlStateSync<N> {
    pub fn new(nav: N) -> Self {
        Self { nav }
    }

    pub fn read(&self) -> NavigationEntry {
        parse_location(&self.nav.read())
    }

    /// Push a new history entry. `node` and `page` are only written when
    /// given.
    pub fn write(&mut self, query: &str, node: Option<&str>, page: Option<usize>) {
        let location = render_location(query, node, page);
        debug!(%location, "push navigation entry");
        self.nav.push(location);
    }

    pub fn port(&self) -> &N {
        &self.nav
    }

    pub fn port_mut(&mut self) -> &mut N {
        &mut self.nav
    }
}

pub fn render_location(query: &str, node: Option<&str>, page: Option<usize>) -> String {
    let mut out = format!("?query={}", urlencoding::encode(query));
    if let Some(node) = node {
        out.push_str("&node=");
        out.push_str(&urlencoding::encode(node));
    }
    if let Some(page) = page {
        out.push_str(&format!("&page={page}"));
    }
    out
}

/// Lenient parse: leading `?` optional, unknown keys ignored, empty `node`
/// treated as absent, bad or missing `page` read as 1.
pub fn parse_location(location: &str) -> NavigationEntry {
    let mut entry = NavigationEntry::default();
    let query_string = location.strip_prefix('?').unwrap_or(location);
    for (key, value) in url::form_urlencoded::parse(query_string.as_bytes()) {
        match key.as_ref() {
            "query" => entry.query = value.into_owned(),
            "node" if !value.is_empty() => entry.node = Some(value.into_owned()),
            "page" => entry.page = value.parse::<usize>().ok().filter(|p| *p >= 1).unwrap_or(1),
            _ => {}
        }
    }
    entry
}

/// In-memory history with back/forward, standing in for a browser.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigation {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// History whose first entry is `location`, as when opening a deep link.
    pub fn starting_at(location: &str) -> Self {
        Self { entries: vec![location.to_string()], cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

impl NavigationState for MemoryNavigation {
    fn read(&self) -> String {
        self.entries.get(self.cursor).cloned().unwrap_or_default()
    }

    fn push(&mut self, location: String) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(location);
        self.cursor = self.entries.len() - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_encodes_each_component() {
        assert_eq!(render_location("neural", None, None), "?query=neural");
        assert_eq!(
            render_location("graph nets", Some("a&b"), Some(3)),
            "?query=graph%20nets&node=a%26b&page=3"
        );
    }

    #[test]
    fn parse_reads_triple_with_defaults() {
        let entry = parse_location("?query=graph%20nets&node=a%26b&page=3");
        assert_eq!(entry, NavigationEntry { query: "graph nets".to_string(), node: Some("a&b".to_string()), page: 3 });

        assert_eq!(parse_location("query=x+y&page=zero").page, 1);
        assert_eq!(parse_location("query=x+y").query, "x y");
        assert_eq!(parse_location("?page=0").page, 1);
        assert_eq!(parse_location(""), NavigationEntry::default());
        assert_eq!(parse_location("?query=q&node=").node, None);
    }

    #[test]
    fn push_after_back_drops_forward_entries() {
        let mut nav = MemoryNavigation::starting_at("?query=a");
        nav.push("?query=b".to_string());
        nav.push("?query=c".to_string());
        assert!(nav.back());
        assert_eq!(nav.read(), "?query=b");
        nav.push("?query=d".to_string());
        assert_eq!(nav.entries(), ["?query=a", "?query=b", "?query=d"]);
        assert!(!nav.forward());
        assert!(nav.back() && nav.back());
        assert!(!nav.back());
        assert_eq!(nav.read(), "?query=a");
    }
}
