//! Scripted in-memory catalog with per-call latency.

#![allow(dead_code)]

use async_trait::async_trait;
use cinerow_core::{CatalogError, CatalogSource, MovieList};
use cinerow_model::{
    Title, TitleId, VideoKind, VideoRef, VideoSite, WatchProviders,
};
use parking_lot::Mutex;
use std::{collections::HashMap, time::Duration};
use tokio::time;

type Scripted<T> = (Duration, Result<T, Failure>);

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Empty,
    Status(u16),
}

impl From<Failure> for CatalogError {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::Empty => CatalogError::Empty,
            Failure::Status(code) => CatalogError::Status(code),
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeCatalog {
    titles: HashMap<String, Scripted<Title>>,
    searches: HashMap<String, Scripted<Vec<Title>>>,
    lists: HashMap<MovieList, Scripted<Vec<Title>>>,
    movie_searches: HashMap<String, Scripted<Vec<Title>>>,
    videos: HashMap<u64, Scripted<Vec<VideoRef>>>,
    calls: Mutex<Vec<String>>,
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub fn imdb_title(name: &str) -> Title {
    Title::new(TitleId::Imdb(format!("tt-{}", name.to_lowercase())), name)
}

pub fn youtube_trailer(key: &str) -> VideoRef {
    VideoRef {
        key: key.to_string(),
        name: format!("Trailer {key}"),
        site: VideoSite::YouTube,
        kind: VideoKind::Trailer,
    }
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, name: &str, latency: Duration) -> Self {
        self.titles
            .insert(name.to_string(), (latency, Ok(imdb_title(name))));
        self
    }

    pub fn missing_title(mut self, name: &str, latency: Duration) -> Self {
        self.titles
            .insert(name.to_string(), (latency, Err(Failure::Empty)));
        self
    }

    pub fn search(
        mut self,
        query: &str,
        latency: Duration,
        hits: &[&str],
    ) -> Self {
        let hits = hits.iter().map(|name| imdb_title(name)).collect();
        self.searches.insert(query.to_string(), (latency, Ok(hits)));
        self
    }

    pub fn list(
        mut self,
        list: MovieList,
        latency: Duration,
        titles: Vec<Title>,
    ) -> Self {
        self.lists.insert(list, (latency, Ok(titles)));
        self
    }

    pub fn movie_search(
        mut self,
        title: &str,
        latency: Duration,
        ids: &[u64],
    ) -> Self {
        let hits = ids
            .iter()
            .map(|id| Title::new(TitleId::Tmdb(*id), title))
            .collect();
        self.movie_searches
            .insert(title.to_string(), (latency, Ok(hits)));
        self
    }

    pub fn videos(
        mut self,
        id: u64,
        latency: Duration,
        videos: Vec<VideoRef>,
    ) -> Self {
        self.videos.insert(id, (latency, Ok(videos)));
        self
    }

    pub fn failing_videos(mut self, id: u64, status: u16) -> Self {
        self.videos
            .insert(id, (Duration::ZERO, Err(Failure::Status(status))));
        self
    }

    /// Every call made so far, as `operation:argument`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|call| call.split(':').next() == Some(operation))
            .count()
    }

    fn record(&self, operation: &str, argument: impl std::fmt::Display) {
        self.calls.lock().push(format!("{operation}:{argument}"));
    }
}

async fn play<T: Clone>(
    script: Option<&Scripted<T>>,
    missing: impl FnOnce() -> Result<T, CatalogError>,
) -> Result<T, CatalogError> {
    match script {
        Some((latency, outcome)) => {
            time::sleep(*latency).await;
            outcome.clone().map_err(CatalogError::from)
        }
        None => missing(),
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    async fn lookup_title(&self, name: &str) -> Result<Title, CatalogError> {
        self.record("lookup_title", name);
        play(self.titles.get(name), || Err(CatalogError::Empty)).await
    }

    async fn search_titles(
        &self,
        query: &str,
    ) -> Result<Vec<Title>, CatalogError> {
        self.record("search_titles", query);
        play(self.searches.get(query), || Err(CatalogError::Empty)).await
    }

    async fn movie_list(
        &self,
        list: MovieList,
        page: u32,
    ) -> Result<Vec<Title>, CatalogError> {
        self.record("movie_list", format!("{list}/{page}"));
        play(self.lists.get(&list), || Ok(Vec::new())).await
    }

    async fn search_movies(
        &self,
        title: &str,
    ) -> Result<Vec<Title>, CatalogError> {
        self.record("search_movies", title);
        play(self.movie_searches.get(title), || Ok(Vec::new())).await
    }

    async fn videos(
        &self,
        movie_id: u64,
    ) -> Result<Vec<VideoRef>, CatalogError> {
        self.record("videos", movie_id);
        play(self.videos.get(&movie_id), || Ok(Vec::new())).await
    }

    async fn watch_providers(
        &self,
        movie_id: u64,
        region: &str,
    ) -> Result<WatchProviders, CatalogError> {
        self.record("watch_providers", format!("{movie_id}/{region}"));
        Ok(WatchProviders {
            region: region.to_string(),
            ..WatchProviders::default()
        })
    }
}
