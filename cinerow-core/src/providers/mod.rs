//! Remote catalog providers.
//!
//! [`CatalogSource`] is the seam the controllers depend on. It surfaces
//! provider failures as [`CatalogError`] so callers that need to tell "no
//! data" from "fetch failed" (the video chain) can; [`crate::Catalog`]
//! wraps any source with the fail-soft behaviour rows and search expect.

pub mod http;
pub mod omdb;
pub mod tmdb;

use async_trait::async_trait;
use cinerow_model::{Title, VideoRef, WatchProviders};
use std::fmt;

use crate::config::CatalogConfig;
use crate::error::CatalogError;

pub use omdb::OmdbClient;
pub use tmdb::TmdbClient;

#[cfg(test)]
use mockall::automock;

/// Provider-curated movie lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieList {
    Popular,
    Upcoming,
    TopRated,
}

impl MovieList {
    pub fn as_path(&self) -> &'static str {
        match self {
            MovieList::Popular => "popular",
            MovieList::Upcoming => "upcoming",
            MovieList::TopRated => "top_rated",
        }
    }
}

impl fmt::Display for MovieList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Single best match for an exact title (search/rating provider).
    async fn lookup_title(&self, name: &str) -> Result<Title, CatalogError>;

    /// Free-text search (search/rating provider).
    async fn search_titles(
        &self,
        query: &str,
    ) -> Result<Vec<Title>, CatalogError>;

    /// One page of a curated list (metadata provider).
    async fn movie_list(
        &self,
        list: MovieList,
        page: u32,
    ) -> Result<Vec<Title>, CatalogError>;

    /// Title search on the metadata provider; results carry TMDB ids.
    async fn search_movies(
        &self,
        title: &str,
    ) -> Result<Vec<Title>, CatalogError>;

    async fn videos(&self, movie_id: u64)
    -> Result<Vec<VideoRef>, CatalogError>;

    async fn watch_providers(
        &self,
        movie_id: u64,
        region: &str,
    ) -> Result<WatchProviders, CatalogError>;
}

/// Routes each operation to the provider that serves it.
#[derive(Debug, Clone)]
pub struct RemoteCatalog {
    tmdb: TmdbClient,
    omdb: OmdbClient,
}

impl RemoteCatalog {
    pub fn new(tmdb: TmdbClient, omdb: OmdbClient) -> Self {
        Self { tmdb, omdb }
    }

    /// Build both clients over one shared connection pool.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = http::build_client()?;
        Ok(Self::new(
            TmdbClient::new(client.clone(), config.tmdb.clone()),
            OmdbClient::new(client, config.omdb.clone()),
        ))
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalog {
    async fn lookup_title(&self, name: &str) -> Result<Title, CatalogError> {
        self.omdb.by_title(name).await
    }

    async fn search_titles(
        &self,
        query: &str,
    ) -> Result<Vec<Title>, CatalogError> {
        self.omdb.search(query).await
    }

    async fn movie_list(
        &self,
        list: MovieList,
        page: u32,
    ) -> Result<Vec<Title>, CatalogError> {
        self.tmdb.movie_list(list, page).await
    }

    async fn search_movies(
        &self,
        title: &str,
    ) -> Result<Vec<Title>, CatalogError> {
        self.tmdb.search_movies(title).await
    }

    async fn videos(
        &self,
        movie_id: u64,
    ) -> Result<Vec<VideoRef>, CatalogError> {
        self.tmdb.videos(movie_id).await
    }

    async fn watch_providers(
        &self,
        movie_id: u64,
        region: &str,
    ) -> Result<WatchProviders, CatalogError> {
        self.tmdb.watch_providers(movie_id, region).await
    }
}
