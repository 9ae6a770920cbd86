//! Row data aggregation.
//!
//! A row is fed either by a list of title names, looked up one by one and
//! merged, or by one of the provider's curated lists. Either way the row
//! publishes exactly two states per source: loading, then the full result.

use cinerow_model::Title;
use futures::future::join_all;
use parking_lot::Mutex;
use std::{fmt, sync::Arc};
use tokio::sync::watch;
use tracing::debug;

use crate::{catalog::Catalog, providers::MovieList, task::TaskSlot};

/// Ordered title names. Two lists are the same input only if they are the
/// same allocation, mirroring reference identity in the view layer.
#[derive(Clone)]
pub struct TitleList(Arc<[String]>);

impl TitleList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn same_as(&self, other: &TitleList) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TitleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl From<&[&str]> for TitleList {
    fn from(names: &[&str]) -> Self {
        Self::new(names.iter().copied())
    }
}

impl From<Vec<String>> for TitleList {
    fn from(names: Vec<String>) -> Self {
        Self(names.into())
    }
}

#[derive(Debug, Clone)]
pub enum RowSource {
    Titles(TitleList),
    List { list: MovieList, page: u32 },
}

impl RowSource {
    pub fn list(list: MovieList) -> Self {
        RowSource::List { list, page: 1 }
    }

    /// Whether loading `other` would be a repeat of `self`.
    pub fn same_as(&self, other: &RowSource) -> bool {
        match (self, other) {
            (RowSource::Titles(a), RowSource::Titles(b)) => a.same_as(b),
            (
                RowSource::List { list: a, page: pa },
                RowSource::List { list: b, page: pb },
            ) => a == b && pa == pb,
            _ => false,
        }
    }
}

impl From<TitleList> for RowSource {
    fn from(titles: TitleList) -> Self {
        RowSource::Titles(titles)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowState {
    pub loading: bool,
    /// Resolved titles in input order. Failed lookups are left out.
    pub titles: Vec<Title>,
    /// Bumped on every source change.
    pub generation: u64,
}

impl Default for RowState {
    fn default() -> Self {
        Self {
            loading: true,
            titles: Vec::new(),
            generation: 0,
        }
    }
}

#[derive(Debug)]
pub struct RowAggregator {
    catalog: Catalog,
    source: Mutex<Option<RowSource>>,
    state: Arc<watch::Sender<RowState>>,
    run: TaskSlot,
}

impl RowAggregator {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            source: Mutex::new(None),
            state: Arc::new(watch::Sender::new(RowState::default())),
            run: TaskSlot::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RowState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> RowState {
        self.state.borrow().clone()
    }

    /// Start aggregating `source` unless it is the one already loaded.
    /// Returns whether a new run was started. A run for a previous source
    /// is abandoned and its result never published.
    pub fn load(&self, source: impl Into<RowSource>) -> bool {
        let source = source.into();
        {
            let mut current = self.source.lock();
            if current.as_ref().is_some_and(|c| c.same_as(&source)) {
                return false;
            }
            *current = Some(source.clone());
        }
        self.start(source);
        true
    }

    /// Re-run the current source, e.g. after the user asks for a refresh.
    pub fn reload(&self) -> bool {
        let Some(source) = self.source.lock().clone() else {
            return false;
        };
        self.start(source);
        true
    }

    /// Wait for the current run to publish.
    pub async fn settled(&self) -> RowState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    fn start(&self, source: RowSource) {
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation = state.generation.wrapping_add(1);
            state.loading = true;
            state.titles.clear();
            generation = state.generation;
        });

        let catalog = self.catalog.clone();
        let state = Arc::clone(&self.state);
        self.run.start(async move {
            let titles = aggregate(&catalog, &source).await;
            let count = titles.len();
            let published = state.send_if_modified(|state| {
                if state.generation != generation {
                    return false;
                }
                state.titles = titles;
                state.loading = false;
                true
            });
            debug!(generation, count, published, "row settled");
        });
    }
}

/// Resolve a source to its titles. Name lookups run concurrently and the
/// result keeps input order; names that did not resolve are dropped.
pub async fn aggregate(catalog: &Catalog, source: &RowSource) -> Vec<Title> {
    match source {
        RowSource::Titles(names) => {
            join_all(names.names().iter().map(|n| catalog.fetch_by_title(n)))
                .await
                .into_iter()
                .flatten()
                .collect()
        }
        RowSource::List { list, page } => catalog.fetch_list(*list, *page).await,
    }
}
