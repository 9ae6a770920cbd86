//! Search and rating provider, addressed by exact title or free text.

use cinerow_model::{Rating, Title, TitleId, title::parse_year};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::http;
use crate::config::OmdbConfig;
use crate::error::CatalogError;

/// Placeholder the provider uses for absent fields.
const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    config: OmdbConfig,
}

impl std::fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl OmdbClient {
    pub fn new(client: Client, config: OmdbConfig) -> Self {
        Self { client, config }
    }

    /// Best match for an exact title. A `"Response": "False"` body is
    /// reported as [`CatalogError::Empty`].
    pub async fn by_title(&self, name: &str) -> Result<Title, CatalogError> {
        let body: TitleResponse = self.get(&[("t", name)]).await?;
        body.into_title()
    }

    pub async fn search(
        &self,
        query: &str,
    ) -> Result<Vec<Title>, CatalogError> {
        let body: SearchResponse = self.get(&[("s", query)]).await?;
        body.into_titles()
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CatalogError::MissingCredentials("omdb"))?;
        let mut url: Url = self.config.base_url.clone();
        url.query_pairs_mut()
            .append_pair("apikey", key)
            .extend_pairs(params);
        http::get_json(self.client.get(url)).await
    }
}

fn available(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty() && value != NOT_AVAILABLE)
}

fn succeeded(response: &str) -> bool {
    response.eq_ignore_ascii_case("true")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TitleResponse {
    #[serde(default)]
    response: String,
    title: Option<String>,
    year: Option<String>,
    poster: Option<String>,
    plot: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    error: Option<String>,
}

impl TitleResponse {
    fn into_title(self) -> Result<Title, CatalogError> {
        if !succeeded(&self.response) {
            tracing::debug!(reason = ?self.error, "no title match");
            return Err(CatalogError::Empty);
        }
        let imdb_id = available(self.imdb_id).ok_or_else(|| {
            CatalogError::Malformed("record without imdbID".to_string())
        })?;
        let name = available(self.title).unwrap_or_default();
        let rating = available(self.imdb_rating)
            .and_then(|raw| raw.parse::<f32>().ok())
            .and_then(|value| Rating::new(value).ok());

        Ok(Title::new(TitleId::Imdb(imdb_id), name)
            .with_year(available(self.year).as_deref().and_then(parse_year))
            .with_poster(available(self.poster))
            .with_rating(rating)
            .with_overview(available(self.plot)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    search: Vec<SearchHit>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchHit {
    #[serde(default)]
    title: String,
    year: Option<String>,
    poster: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
}

impl SearchResponse {
    fn into_titles(self) -> Result<Vec<Title>, CatalogError> {
        if !succeeded(&self.response) {
            tracing::debug!(reason = ?self.error, "no search hits");
            return Err(CatalogError::Empty);
        }
        Ok(self
            .search
            .into_iter()
            .filter_map(|hit| {
                let id = available(hit.imdb_id)?;
                Some(
                    Title::new(TitleId::Imdb(id), hit.title)
                        .with_year(
                            available(hit.year).as_deref().and_then(parse_year),
                        )
                        .with_poster(available(hit.poster)),
                )
            })
            .collect())
    }
}
