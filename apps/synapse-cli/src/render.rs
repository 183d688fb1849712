use synapse_core::traits::NavigationState;
use synapse_core::types::Document;
use synapse_explorer::{QueryController, Update};
use synapse_view::{Fragment, PageRange};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Join fragments back together, matches in bold.
pub fn emphasize(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        if fragment.is_match {
            out.push_str(BOLD);
            out.push_str(&fragment.text);
            out.push_str(RESET);
        } else {
            out.push_str(&fragment.text);
        }
    }
    out
}

/// `Showing 21-40 of 47 | pages: 1 [2] 3`
pub fn page_line(range: &PageRange, total: usize, current: usize) -> String {
    let mut line = format!("Showing {}-{} of {}", range.start_item, range.end_item, total);
    if range.needs_controls() {
        let pages: Vec<String> =
            range.pages.iter().map(|&p| if p == current { format!("[{p}]") } else { p.to_string() }).collect();
        line.push_str(&format!(" | pages: {}", pages.join(" ")));
    }
    line
}

/// Lines for one result; title, date, summary and tags all highlighted.
pub fn document_lines<N: NavigationState>(controller: &QueryController<N>, number: usize, doc: &Document) -> Vec<String> {
    let mut lines = vec![format!("  {}. {}", number, emphasize(&controller.highlight(&doc.title)))];
    if !doc.date.is_empty() || !doc.url.is_empty() {
        lines.push(format!("     {}  {}", emphasize(&controller.highlight(&doc.date)), doc.url));
    }
    if !doc.summary.is_empty() {
        lines.push(format!("     {}", emphasize(&controller.highlight(&doc.summary))));
    }
    let tags: Vec<String> = doc.all_tags().into_iter().map(|tag| emphasize(&controller.highlight(tag))).collect();
    if !tags.is_empty() {
        lines.push(format!("     🏷  {}", tags.join(", ")));
    }
    lines
}

pub fn print_updates<N: NavigationState>(controller: &QueryController<N>, updates: &[Update]) {
    for update in updates {
        match update {
            Update::Documents | Update::ScrollToTop => print_documents(controller),
            Update::Graph => print_graph_summary(controller),
            Update::Suggestion => print_suggestion(controller),
        }
    }
}

pub fn print_documents<N: NavigationState>(controller: &QueryController<N>) {
    let state = controller.state();
    let documents = controller.documents();
    println!();
    if documents.is_empty() {
        println!("🔍 No results for: \"{}\"", state.committed_query);
        return;
    }
    match &state.focused_node {
        Some(node) => println!("🔍 {} results for: \"{}\" (node: {})", documents.len(), state.committed_query, node),
        None => println!("🔍 {} results for: \"{}\"", documents.len(), state.committed_query),
    }

    let range = controller.page_range();
    for (i, doc) in controller.visible_documents().iter().enumerate() {
        for line in document_lines(controller, range.start_item + i, doc) {
            println!("{line}");
        }
    }
    println!("{}", page_line(&range, documents.len(), state.page));
}

pub fn print_graph_summary<N: NavigationState>(controller: &QueryController<N>) {
    let graph = controller.graph();
    println!();
    println!("🕸  Graph: {} nodes, {} links (/graph to list)", graph.nodes.len(), graph.links.len());
}

pub fn print_graph<N: NavigationState>(controller: &QueryController<N>) {
    let graph = controller.graph();
    if graph.is_empty() {
        println!("🕸  No graph yet");
        return;
    }
    let mut nodes: Vec<_> = graph.nodes.iter().collect();
    nodes.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.id.cmp(&b.id)));
    println!("🕸  {} nodes, {} links", graph.nodes.len(), graph.links.len());
    for node in nodes {
        let marker = if controller.state().focused_node.as_deref() == Some(node.id.as_str()) { "*" } else { " " };
        println!(" {} {} (degree {})", marker, node.id, node.size);
    }
}

pub fn print_suggestion<N: NavigationState>(controller: &QueryController<N>) {
    if let Some(suggestion) = controller.suggestion() {
        println!();
        println!("💡 Did you mean: {}? (/accept)", suggestion.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_core::config::ExplorerSettings;
    use synapse_explorer::MemoryNavigation;
    use synapse_view::page_range;
    use tokio::time::Instant;

    #[test]
    fn matches_are_bold() {
        let fragments = vec![
            Fragment { text: "Neural".to_string(), is_match: true },
            Fragment { text: " nets".to_string(), is_match: false },
        ];
        assert_eq!(emphasize(&fragments), "\x1b[1mNeural\x1b[0m nets");
    }

    #[test]
    fn page_line_marks_current_page() {
        let range = page_range(47, 20, 2);
        assert_eq!(page_line(&range, 47, 2), "Showing 21-40 of 47 | pages: 1 [2] 3");

        let single = page_range(5, 20, 1);
        assert_eq!(page_line(&single, 5, 1), "Showing 1-5 of 5");
    }

    #[test]
    fn date_and_tags_are_highlighted_too() {
        let mut controller = QueryController::new(MemoryNavigation::new(), ExplorerSettings::default());
        controller.commit(Some("bert 2019"), Instant::now());
        let doc = Document {
            title: "Language models".to_string(),
            date: "2019-05-01".to_string(),
            tags: vec!["bert".to_string(), "nlp".to_string()],
            ..Document::default()
        };

        let lines = document_lines(&controller, 1, &doc);
        assert_eq!(lines[0], "  1. Language models");
        assert_eq!(lines[1], "     \x1b[1m2019\x1b[0m-05-01  ");
        assert_eq!(lines[2], "     🏷  \x1b[1mbert\x1b[0m, nlp");
    }
}
