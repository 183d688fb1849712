//! The single writer of the query/node/page state.
//!
//! Handlers mutate state and hand back [`Effect`]s; they never do I/O or
//! sleep. Timers are deadlines kept here and fired by [`QueryController::poll`].
//! Every dispatched request carries a [`Ticket`], and a response is applied
//! only while its ticket is still the latest of its kind.

use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use synapse_core::config::ExplorerSettings;
use synapse_core::error::Result;
use synapse_core::traits::NavigationState;
use synapse_core::types::{Document, GraphData, QueryState, SearchRequest, SpellingSuggestion};
use synapse_view::pagination::{clamp_page, page_range, paginate, PageRange};
use synapse_view::{highlight, Fragment, GraphDataProcessor};

use crate::debounce::SpellCheckDebouncer;
use crate::nav::UrlStateSync;

/// Generation of a request, compared against the latest of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Search(SearchRequest),
    Plot { k: usize, query: String },
    Spelling { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch { ticket: Ticket, request: Request },
    ScrollToTop,
}

#[derive(Debug, Clone)]
struct ScheduledPlot {
    due: Instant,
    ticket: Ticket,
    query: String,
}

pub struct QueryController<N: NavigationState> {
    settings: ExplorerSettings,
    state: QueryState,
    documents: Vec<Document>,
    graph: GraphData,
    processor: GraphDataProcessor,
    url: UrlStateSync<N>,
    speller: SpellCheckDebouncer,
    search_generation: u64,
    plot_generation: u64,
    scheduled_plot: Option<ScheduledPlot>,
}

impl<N: NavigationState> QueryController<N> {
    pub fn new(nav: N, settings: ExplorerSettings) -> Self {
        Self {
            processor: GraphDataProcessor::new(settings.max_graph_nodes),
            speller: SpellCheckDebouncer::new(settings.spelling_debounce()),
            settings,
            state: QueryState::default(),
            documents: Vec::new(),
            graph: GraphData::default(),
            url: UrlStateSync::new(nav),
            search_generation: 0,
            plot_generation: 0,
            scheduled_plot: None,
        }
    }

    /// Load state from the current navigation entry. A direct navigation:
    /// search and graph are both requested right away.
    pub fn hydrate_from_url(&mut self) -> Vec<Effect> {
        let entry = self.url.read();
        let query = entry.query.to_lowercase();
        self.speller.clear();
        self.scheduled_plot = None;

        if query.trim().is_empty() {
            debug!("navigation entry has no query");
            self.state = QueryState::default();
            self.documents.clear();
            self.graph = GraphData::default();
            self.search_generation += 1;
            self.plot_generation += 1;
            return Vec::new();
        }

        info!(%query, node = ?entry.node, page = entry.page, "hydrating from navigation entry");
        self.state = QueryState {
            raw_input: query.clone(),
            committed_query: query.clone(),
            focused_node: entry.node,
            page: entry.page,
        };
        let search_query = match &self.state.focused_node {
            Some(node) => format!("{query} {node}"),
            None => query.clone(),
        };
        vec![self.dispatch_search(search_query), self.dispatch_plot(query)]
    }

    /// Keystroke: only the raw input and the spelling timer move.
    pub fn on_input_change(&mut self, text: &str, now: Instant) {
        self.state.raw_input = text.to_lowercase();
        self.speller.on_input(now);
    }

    /// Promote `text` (default: the raw input) to the committed query.
    pub fn commit(&mut self, text: Option<&str>, now: Instant) -> Vec<Effect> {
        let text = text.unwrap_or(&self.state.raw_input).to_lowercase();
        if text.trim().is_empty() {
            return Vec::new();
        }

        info!(query = %text, "commit");
        self.state.raw_input = text.clone();
        self.state.committed_query = text.clone();
        self.state.focused_node = None;
        self.state.page = 1;
        self.speller.clear();
        self.url.write(&text, None, None);

        let search = self.dispatch_search(text.clone());
        self.plot_generation += 1;
        self.scheduled_plot = Some(ScheduledPlot {
            due: now + self.settings.graph_stagger(),
            ticket: Ticket(self.plot_generation),
            query: text,
        });
        vec![search]
    }

    /// Narrow the current query to a graph node. The graph stays as is.
    pub fn on_node_click(&mut self, node_id: &str) -> Vec<Effect> {
        if node_id.is_empty() || self.state.committed_query.trim().is_empty() {
            return Vec::new();
        }
        debug!(node = node_id, "focus node");
        let query = self.state.committed_query.clone();
        self.state.focused_node = Some(node_id.to_string());
        self.state.page = 1;
        self.url.write(&query, Some(node_id), None);
        vec![self.dispatch_search(format!("{query} {node_id}"))]
    }

    pub fn on_tag_click(&mut self, tag: &str, now: Instant) -> Vec<Effect> {
        let text = if self.state.committed_query.is_empty() {
            tag.to_string()
        } else {
            format!("{} {}", self.state.committed_query, tag)
        };
        self.commit(Some(&text), now)
    }

    /// Client-side only: the documents are already here.
    pub fn on_page_change(&mut self, page: usize) -> Vec<Effect> {
        let page = clamp_page(page, self.documents.len(), self.settings.items_per_page);
        self.state.page = page;
        self.url.write(&self.state.committed_query, self.state.focused_node.as_deref(), Some(page));
        vec![Effect::ScrollToTop]
    }

    pub fn on_suggestion_click(&mut self, now: Instant) -> Vec<Effect> {
        match self.speller.take() {
            Some(suggestion) => {
                self.state.raw_input = suggestion.text.clone();
                self.commit(Some(&suggestion.text), now)
            }
            None => Vec::new(),
        }
    }

    /// Fire whichever timers are due.
    pub fn poll(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.scheduled_plot.as_ref().is_some_and(|p| p.due <= now) {
            if let Some(plot) = self.scheduled_plot.take() {
                debug!(query = %plot.query, "graph stagger elapsed");
                effects.push(Effect::Fetch {
                    ticket: plot.ticket,
                    request: Request::Plot { k: self.settings.k, query: plot.query },
                });
            }
        }
        if let Some((ticket, text)) = self.speller.fire(now, &self.state.raw_input) {
            effects.push(Effect::Fetch { ticket: Ticket(ticket), request: Request::Spelling { text } });
        }
        effects
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        let plot = self.scheduled_plot.as_ref().map(|p| p.due);
        match (plot, self.speller.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Returns true when the documents were replaced.
    pub fn on_search_response(&mut self, ticket: Ticket, result: Result<Vec<Document>>) -> bool {
        if ticket.0 != self.search_generation {
            debug!(ticket = ticket.0, latest = self.search_generation, "discarding stale search response");
            return false;
        }
        match result {
            Ok(documents) => {
                debug!(count = documents.len(), "documents replaced");
                // a deep-linked page may point past the end of the new list;
                // the navigation entry is left as is and re-clamps on hydration
                let page = clamp_page(self.state.page, documents.len(), self.settings.items_per_page);
                if page != self.state.page {
                    debug!(requested = self.state.page, page, "page clamped to results");
                    self.state.page = page;
                }
                self.documents = documents;
                true
            }
            Err(e) => {
                warn!(error = %e, query = %self.state.committed_query, "search failed, keeping previous documents");
                false
            }
        }
    }

    /// Returns true when the graph was replaced.
    pub fn on_plot_response(&mut self, ticket: Ticket, result: Result<Value>) -> bool {
        if ticket.0 != self.plot_generation {
            debug!(ticket = ticket.0, latest = self.plot_generation, "discarding stale graph response");
            return false;
        }
        match result {
            Ok(raw) => {
                self.graph = self.processor.normalize(&raw);
                true
            }
            Err(e) => {
                warn!(error = %e, query = %self.state.committed_query, "graph fetch failed, keeping previous graph");
                false
            }
        }
    }

    /// Returns true when a suggestion is now shown.
    pub fn on_spelling_response(&mut self, ticket: Ticket, result: Result<String>) -> bool {
        let suggestion = match result {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(error = %e, "spelling request failed");
                None
            }
        };
        self.speller.on_response(ticket.0, suggestion, &self.state.raw_input)
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn settings(&self) -> &ExplorerSettings {
        &self.settings
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn visible_documents(&self) -> &[Document] {
        paginate(&self.documents, self.state.page, self.settings.items_per_page)
    }

    pub fn page_range(&self) -> PageRange {
        page_range(self.documents.len(), self.settings.items_per_page, self.state.page)
    }

    pub fn graph(&self) -> &GraphData {
        &self.graph
    }

    pub fn suggestion(&self) -> Option<&SpellingSuggestion> {
        self.speller.suggestion()
    }

    /// Highlight `text` against the committed query and focused node.
    pub fn highlight(&self, text: &str) -> Vec<Fragment> {
        highlight(text, &self.state.committed_query, self.state.focused_node.as_deref())
    }

    /// Visible documents tagged with `node_id`, e.g. for hover emphasis.
    pub fn documents_tagged<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Document> + 'a {
        self.visible_documents().iter().filter(move |d| d.has_tag(node_id))
    }

    pub fn navigation(&self) -> &UrlStateSync<N> {
        &self.url
    }

    pub fn navigation_mut(&mut self) -> &mut UrlStateSync<N> {
        &mut self.url
    }

    fn dispatch_search(&mut self, query: String) -> Effect {
        self.search_generation += 1;
        Effect::Fetch {
            ticket: Ticket(self.search_generation),
            request: Request::Search(SearchRequest {
                sort: false,
                node: self.state.focused_node.clone(),
                k: self.settings.k,
                query,
            }),
        }
    }

    fn dispatch_plot(&mut self, query: String) -> Effect {
        self.plot_generation += 1;
        Effect::Fetch { ticket: Ticket(self.plot_generation), request: Request::Plot { k: self.settings.k, query } }
    }
}
