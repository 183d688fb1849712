//! Event loop around a [`QueryController`].
//!
//! The session is the only owner of the controller. Fetch effects become
//! spawned tasks that report back over a channel; the session applies those
//! completions one at a time, between commands and timer wake-ups.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

use synapse_core::error::Result;
use synapse_core::traits::{Backend, NavigationState};
use synapse_core::types::Document;

use crate::controller::{Effect, QueryController, Request, Ticket};

/// User actions, as a front end reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Input(String),
    Commit(Option<String>),
    NodeClick(String),
    TagClick(String),
    Page(usize),
    AcceptSuggestion,
}

/// What a front end has to re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    Documents,
    Graph,
    Suggestion,
    ScrollToTop,
}

#[derive(Debug)]
enum Completion {
    Search(Ticket, Result<Vec<Document>>),
    Plot(Ticket, Result<Value>),
    Spelling(Ticket, Result<String>),
}

enum Wake {
    Completion(Completion),
    Timer,
}

pub struct Session<N: NavigationState> {
    controller: QueryController<N>,
    backend: Arc<dyn Backend>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl<N: NavigationState> Session<N> {
    pub fn new(controller: QueryController<N>, backend: Arc<dyn Backend>) -> Self {
        let (completions_tx, completions) = mpsc::unbounded_channel();
        Self { controller, backend, completions_tx, completions, in_flight: 0 }
    }

    pub fn controller(&self) -> &QueryController<N> {
        &self.controller
    }

    /// Requests spawned and not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// No request outstanding and no timer armed.
    pub fn is_idle(&self) -> bool {
        self.in_flight == 0 && self.controller.next_deadline().is_none()
    }

    /// Hydrate from the current navigation entry.
    pub fn start(&mut self) -> Vec<Update> {
        self.apply_with(|controller, _| controller.hydrate_from_url())
    }

    pub fn apply(&mut self, command: Command) -> Vec<Update> {
        debug!(?command, "apply");
        match command {
            Command::Input(text) => {
                let had_suggestion = self.controller.suggestion().is_some();
                self.controller.on_input_change(&text, Instant::now());
                if had_suggestion {
                    vec![Update::Suggestion]
                } else {
                    Vec::new()
                }
            }
            Command::Commit(text) => self.apply_with(|c, now| c.commit(text.as_deref(), now)),
            Command::NodeClick(node) => self.apply_with(|c, _| c.on_node_click(&node)),
            Command::TagClick(tag) => self.apply_with(|c, now| c.on_tag_click(&tag, now)),
            Command::Page(page) => self.apply_with(|c, _| c.on_page_change(page)),
            Command::AcceptSuggestion => {
                let mut updates = self.apply_with(|c, now| c.on_suggestion_click(now));
                updates.push(Update::Suggestion);
                updates
            }
        }
    }

    /// Run an arbitrary controller handler and execute its effects.
    pub fn apply_with<F>(&mut self, handler: F) -> Vec<Update>
    where
        F: FnOnce(&mut QueryController<N>, Instant) -> Vec<Effect>,
    {
        let effects = handler(&mut self.controller, Instant::now());
        self.execute(effects)
    }

    /// Wait for the next completion or timer and apply it.
    ///
    /// Returns immediately with nothing when the session is idle.
    pub async fn next_updates(&mut self) -> Vec<Update> {
        if self.is_idle() {
            return Vec::new();
        }
        let wake = self.wait().await;
        self.handle(wake)
    }

    /// Drive timers and requests until nothing is pending.
    pub async fn run_until_idle(&mut self) -> Vec<Update> {
        let mut updates = Vec::new();
        while !self.is_idle() {
            updates.extend(self.next_updates().await);
        }
        updates
    }

    async fn wait(&mut self) -> Wake {
        let deadline = self.controller.next_deadline();
        let until = deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

        tokio::select! {
            Some(done) = self.completions.recv() => Wake::Completion(done),
            _ = tokio::time::sleep_until(until), if deadline.is_some() => Wake::Timer,
        }
    }

    fn handle(&mut self, wake: Wake) -> Vec<Update> {
        match wake {
            Wake::Completion(done) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.complete(done)
            }
            Wake::Timer => {
                let effects = self.controller.poll(Instant::now());
                self.execute(effects)
            }
        }
    }

    fn complete(&mut self, done: Completion) -> Vec<Update> {
        let (changed, update) = match done {
            Completion::Search(ticket, result) => (self.controller.on_search_response(ticket, result), Update::Documents),
            Completion::Plot(ticket, result) => (self.controller.on_plot_response(ticket, result), Update::Graph),
            Completion::Spelling(ticket, result) => {
                (self.controller.on_spelling_response(ticket, result), Update::Suggestion)
            }
        };
        if changed {
            vec![update]
        } else {
            Vec::new()
        }
    }

    fn execute(&mut self, effects: Vec<Effect>) -> Vec<Update> {
        let mut updates = Vec::new();
        for effect in effects {
            match effect {
                Effect::Fetch { ticket, request } => self.spawn(ticket, request),
                Effect::ScrollToTop => updates.push(Update::ScrollToTop),
            }
        }
        updates
    }

    fn spawn(&mut self, ticket: Ticket, request: Request) {
        let backend = Arc::clone(&self.backend);
        let tx = self.completions_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let done = match request {
                Request::Search(search) => Completion::Search(ticket, backend.search(&search).await),
                Request::Plot { k, query } => Completion::Plot(ticket, backend.plot(k, &query).await),
                Request::Spelling { text } => Completion::Spelling(ticket, backend.spelling(&text).await),
            };
            // the session may be gone; nothing left to update then
            let _ = tx.send(done);
        });
    }
}
