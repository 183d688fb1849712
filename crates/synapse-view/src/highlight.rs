use regex::RegexBuilder;
use tracing::warn;

/// Keywords this short or shorter never highlight.
const MIN_KEYWORD_LEN: usize = 3;

/// A run of text, flagged when it is exactly one of the keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub is_match: bool,
}

impl Fragment {
    fn plain(text: &str) -> Self {
        Self { text: text.to_string(), is_match: false }
    }
}

/// Split `text` into fragments, marking occurrences of the query tokens and
/// of the focused node.
///
/// Fragments concatenate back to `text`. A query of one character or less
/// leaves the text untouched.
pub fn highlight(text: &str, query: &str, focused_node: Option<&str>) -> Vec<Fragment> {
    if query.chars().count() <= 1 {
        return vec![Fragment::plain(text)];
    }

    let keywords = keywords(query, focused_node);
    if keywords.is_empty() {
        return vec![Fragment::plain(text)];
    }

    let pattern = keywords.iter().map(|k| regex::escape(k)).collect::<Vec<_>>().join("|");
    let re = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re,
        Err(e) => {
            warn!(error = %e, "highlight pattern rejected, rendering plain text");
            return vec![Fragment::plain(text)];
        }
    };

    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let is_keyword = |part: &str| {
        let part = part.to_lowercase();
        lowered.iter().any(|k| *k == part)
    };

    let mut out = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            out.push(Fragment::plain(&text[last..m.start()]));
        }
        out.push(Fragment { text: m.as_str().to_string(), is_match: is_keyword(m.as_str()) });
        last = m.end();
    }
    if last < text.len() {
        out.push(Fragment::plain(&text[last..]));
    }
    if out.is_empty() {
        out.push(Fragment::plain(text));
    }
    out
}

/// Unique query tokens plus the focused node, in order, minus short ones.
fn keywords<'a>(query: &'a str, focused_node: Option<&'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for token in query.split_whitespace().chain(focused_node) {
        if token.chars().count() >= MIN_KEYWORD_LEN && !out.contains(&token) {
            out.push(token);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(fragments: &[Fragment]) -> Vec<&str> {
        fragments.iter().filter(|f| f.is_match).map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn keywords_dedup_and_drop_short_tokens() {
        assert_eq!(keywords("the neural  net of neural", Some("vision")), vec!["the", "neural", "net", "vision"]);
        assert_eq!(keywords("a an of", None), Vec::<&str>::new());
    }

    #[test]
    fn single_character_query_is_identity() {
        assert_eq!(highlight("cat", "a", None), vec![Fragment::plain("cat")]);
        assert_eq!(highlight("", "", None), vec![Fragment::plain("")]);
    }

    #[test]
    fn matches_are_case_insensitive_and_keep_original_case() {
        let fragments = highlight("Neural networks and NEURAL nets", "neural", None);
        assert_eq!(matches(&fragments), vec!["Neural", "NEURAL"]);
        let joined: String = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(joined, "Neural networks and NEURAL nets");
    }

    #[test]
    fn focused_node_is_highlighted_too() {
        let fragments = highlight("Graph learning with transformers", "graph", Some("transformers"));
        assert_eq!(matches(&fragments), vec!["Graph", "transformers"]);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let fragments = highlight("Intro to c++ and c#", "c++ intro", None);
        assert_eq!(matches(&fragments), vec!["Intro", "c++"]);
    }
}
