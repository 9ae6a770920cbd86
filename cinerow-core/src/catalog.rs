//! Fail-soft facade over a [`CatalogSource`].
//!
//! Rows, search and the banner never see provider errors: every failure
//! is logged here and collapses into "absent" or "empty". The video chain
//! needs to distinguish "no data" from "fetch failed", so it talks to
//! [`Catalog::source`] directly.

use cinerow_model::{Title, VideoRef, WatchProviders};
use std::{fmt, sync::Arc};
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::providers::{CatalogSource, MovieList, RemoteCatalog};

#[derive(Clone)]
pub struct Catalog {
    source: Arc<dyn CatalogSource>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog").finish_non_exhaustive()
    }
}

impl Catalog {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self { source }
    }

    /// Catalog backed by the real providers described in `config`.
    pub fn remote(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(Arc::new(RemoteCatalog::from_config(config)?)))
    }

    pub fn source(&self) -> Arc<dyn CatalogSource> {
        Arc::clone(&self.source)
    }

    /// `None` when the provider has no match or the request failed.
    pub async fn fetch_by_title(&self, name: &str) -> Option<Title> {
        self.source
            .lookup_title(name)
            .await
            .map_err(|err| log_failure("lookup_title", name, &err))
            .ok()
    }

    pub async fn search(&self, query: &str) -> Vec<Title> {
        self.source
            .search_titles(query)
            .await
            .map_err(|err| log_failure("search", query, &err))
            .unwrap_or_default()
    }

    pub async fn fetch_popular(&self, page: u32) -> Vec<Title> {
        self.fetch_list(MovieList::Popular, page).await
    }

    pub async fn fetch_upcoming(&self, page: u32) -> Vec<Title> {
        self.fetch_list(MovieList::Upcoming, page).await
    }

    pub async fn fetch_top_rated(&self, page: u32) -> Vec<Title> {
        self.fetch_list(MovieList::TopRated, page).await
    }

    pub async fn fetch_list(&self, list: MovieList, page: u32) -> Vec<Title> {
        self.source
            .movie_list(list, page)
            .await
            .map_err(|err| log_failure("movie_list", list.as_path(), &err))
            .unwrap_or_default()
    }

    pub async fn fetch_videos(&self, movie_id: u64) -> Vec<VideoRef> {
        self.source
            .videos(movie_id)
            .await
            .map_err(|err| log_failure("videos", &movie_id.to_string(), &err))
            .unwrap_or_default()
    }

    pub async fn watch_providers(
        &self,
        movie_id: u64,
        region: &str,
    ) -> Option<WatchProviders> {
        self.source
            .watch_providers(movie_id, region)
            .await
            .map_err(|err| {
                log_failure("watch_providers", &movie_id.to_string(), &err)
            })
            .ok()
    }
}

fn log_failure(operation: &str, subject: &str, err: &CatalogError) {
    if err.is_empty_result() {
        debug!(operation, subject, "no catalog match");
    } else {
        warn!(operation, subject, kind = ?err.kind(), "catalog request failed: {err}");
    }
}
