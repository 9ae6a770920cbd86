//! Debounced search-as-you-type.

use cinerow_model::{SearchQuery, Title};
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;
use tracing::debug;

use crate::{catalog::Catalog, config::TimingConfig, task::TaskSlot};

/// Published search view state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Latest input together with the sequence number it was issued under.
    pub query: SearchQuery,
    pub results: Vec<Title>,
    /// Whether a request for the current query is in flight.
    pub is_searching: bool,
}

/// Delays provider lookups until input pauses, and only ever shows the
/// response for the latest input.
#[derive(Debug)]
pub struct SearchController {
    catalog: Catalog,
    debounce: Duration,
    state: Arc<watch::Sender<SearchState>>,
    timer: TaskSlot,
}

impl SearchController {
    pub fn new(catalog: Catalog, debounce: Duration) -> Self {
        Self {
            catalog,
            debounce,
            state: Arc::new(watch::Sender::new(SearchState::default())),
            timer: TaskSlot::new(),
        }
    }

    pub fn from_config(catalog: Catalog, timing: &TimingConfig) -> Self {
        Self::new(catalog, timing.search_debounce)
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Handle one keystroke: supersede whatever was pending and, for a
    /// non-blank query, schedule a lookup after the debounce interval.
    pub fn on_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.timer.cancel();

        let mut issued = SearchQuery::default();
        self.state.send_modify(|state| {
            state.query = state.query.next(text);
            state.results.clear();
            state.is_searching = false;
            issued = state.query.clone();
        });

        if issued.is_empty() {
            debug!(sequence = issued.sequence, "blank query, nothing to fetch");
            return;
        }

        let catalog = self.catalog.clone();
        let state = Arc::clone(&self.state);
        self.timer.arm(self.debounce, async move {
            let started = state.send_if_modified(|state| {
                if !state.query.is_current(issued.sequence) {
                    return false;
                }
                state.is_searching = true;
                true
            });
            if !started {
                return;
            }

            debug!(query = %issued.text, sequence = issued.sequence, "searching");
            let results = catalog.search(issued.text.trim()).await;

            let applied = state.send_if_modified(|state| {
                if !state.query.is_current(issued.sequence) {
                    return false;
                }
                state.results = results;
                state.is_searching = false;
                true
            });
            if !applied {
                debug!(sequence = issued.sequence, "discarding stale search response");
            }
        });
    }

    /// Reset to an empty query and drop anything pending.
    pub fn clear(&self) {
        self.on_input(String::new());
    }
}
