//! Landing page composition: banner plus the fixed set of rows.

use cinerow_model::Title;
use futures::future::join_all;
use serde::Serialize;

use crate::{
    banner::BannerController,
    catalog::Catalog,
    config::CatalogConfig,
    constants::curated,
    providers::MovieList,
    rows::{RowAggregator, RowSource, TitleList},
};

#[derive(Debug, Clone)]
pub struct RowSpec {
    pub heading: String,
    pub source: RowSource,
}

impl RowSpec {
    pub fn new(heading: impl Into<String>, source: impl Into<RowSource>) -> Self {
        Self {
            heading: heading.into(),
            source: source.into(),
        }
    }
}

/// Rows of the landing page, top to bottom.
pub fn default_rows() -> Vec<RowSpec> {
    vec![
        RowSpec::new("Upcoming Movies", RowSource::list(MovieList::Upcoming)),
        RowSpec::new("Top Rated Movies", RowSource::list(MovieList::TopRated)),
        RowSpec::new("Popular Movies", RowSource::list(MovieList::Popular)),
        RowSpec::new(
            "Thrilling Movies",
            TitleList::from(curated::THRILLER_TITLES),
        ),
        RowSpec::new(
            "Most Rated Movies",
            TitleList::from(curated::MOST_RATED_TITLES),
        ),
    ]
}

/// A title as a card shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub year: Option<u16>,
    pub poster_url: String,
    pub backdrop_url: Option<String>,
    /// Provider rating on its 0-10 scale.
    pub rating: Option<f32>,
    /// Same rating on a five-star scale.
    pub stars: Option<f32>,
    pub overview: Option<String>,
}

impl CardView {
    pub fn new(title: &Title, default_poster: &str) -> Self {
        Self {
            id: title.id.to_string(),
            name: title.name.clone(),
            year: title.year,
            poster_url: title.poster_or(default_poster).to_string(),
            backdrop_url: title.backdrop_url.clone(),
            rating: title.rating.map(|r| r.value()),
            stars: title.rating.map(|r| r.out_of_five()),
            overview: title.overview.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSnapshot {
    pub heading: String,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeSnapshot {
    pub banner: Option<CardView>,
    pub rows: Vec<RowSnapshot>,
}

#[derive(Debug)]
pub struct HomeFeed {
    banner: BannerController,
    rows: Vec<(RowSpec, RowAggregator)>,
    default_poster: String,
}

impl HomeFeed {
    pub fn new(catalog: Catalog, config: &CatalogConfig) -> Self {
        Self::with_rows(catalog, config, default_rows())
    }

    pub fn with_rows(
        catalog: Catalog,
        config: &CatalogConfig,
        rows: Vec<RowSpec>,
    ) -> Self {
        Self {
            banner: BannerController::from_config(catalog.clone(), config),
            rows: rows
                .into_iter()
                .map(|spec| (spec, RowAggregator::new(catalog.clone())))
                .collect(),
            default_poster: config.assets.default_poster_url.clone(),
        }
    }

    pub fn banner(&self) -> &BannerController {
        &self.banner
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &RowAggregator)> {
        self.rows
            .iter()
            .map(|(spec, row)| (spec.heading.as_str(), row))
    }

    /// Kick off the banner rotation and every row.
    pub fn start(&self) {
        self.banner.start();
        for (spec, row) in &self.rows {
            row.load(spec.source.clone());
        }
    }

    pub fn stop(&self) {
        self.banner.stop();
    }

    /// Wait for the banner and every row to finish loading.
    pub async fn settled(&self) -> HomeSnapshot {
        let banner = self.banner.settled().await;
        let rows = join_all(self.rows.iter().map(|(spec, row)| async move {
            let state = row.settled().await;
            RowSnapshot {
                heading: spec.heading.clone(),
                cards: state
                    .titles
                    .iter()
                    .map(|t| CardView::new(t, &self.default_poster))
                    .collect(),
            }
        }))
        .await;

        HomeSnapshot {
            banner: banner
                .title
                .as_ref()
                .map(|t| CardView::new(t, &self.default_poster)),
            rows,
        }
    }
}
