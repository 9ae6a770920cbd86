//! Movie metadata provider: curated lists, title search, videos and
//! watch providers.

use cinerow_model::{
    ProviderOffer, Rating, Title, TitleId, VideoKind, VideoRef, VideoSite,
    WatchProviders, title::parse_year,
};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

use super::{MovieList, http};
use crate::config::TmdbConfig;
use crate::error::CatalogError;

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    config: TmdbConfig,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    pub fn new(client: Client, config: TmdbConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    pub async fn popular(&self, page: u32) -> Result<Vec<Title>, CatalogError> {
        self.movie_list(MovieList::Popular, page).await
    }

    pub async fn upcoming(
        &self,
        page: u32,
    ) -> Result<Vec<Title>, CatalogError> {
        self.movie_list(MovieList::Upcoming, page).await
    }

    pub async fn top_rated(
        &self,
        page: u32,
    ) -> Result<Vec<Title>, CatalogError> {
        self.movie_list(MovieList::TopRated, page).await
    }

    /// One page of a curated list. Pages are 1-based; 0 is treated as 1.
    pub async fn movie_list(
        &self,
        list: MovieList,
        page: u32,
    ) -> Result<Vec<Title>, CatalogError> {
        let page = page.max(1).to_string();
        let url = self.endpoint(
            &["movie", list.as_path()],
            &[
                ("language", self.config.language.as_str()),
                ("page", page.as_str()),
            ],
        )?;
        let body: MoviePage = self.get(url).await?;
        debug!(%list, count = body.results.len(), "fetched movie list");
        Ok(self.titles(body))
    }

    pub async fn search_movies(
        &self,
        title: &str,
    ) -> Result<Vec<Title>, CatalogError> {
        let url = self.endpoint(
            &["search", "movie"],
            &[
                ("query", title),
                ("language", self.config.language.as_str()),
            ],
        )?;
        let body: MoviePage = self.get(url).await?;
        Ok(self.titles(body))
    }

    pub async fn videos(
        &self,
        movie_id: u64,
    ) -> Result<Vec<VideoRef>, CatalogError> {
        let id = movie_id.to_string();
        let url = self.endpoint(
            &["movie", id.as_str(), "videos"],
            &[("language", self.config.language.as_str())],
        )?;
        let body: VideoPage = self.get(url).await?;
        Ok(body.results.into_iter().map(VideoRef::from).collect())
    }

    /// Offers for one region. A region the provider has no data for yields
    /// an empty set rather than an error.
    pub async fn watch_providers(
        &self,
        movie_id: u64,
        region: &str,
    ) -> Result<WatchProviders, CatalogError> {
        let id = movie_id.to_string();
        let url = self.endpoint(
            &["movie", id.as_str(), "watch", "providers"],
            &[],
        )?;
        let mut body: ProvidersPage = self.get(url).await?;
        Ok(self.region_offers(region, body.results.remove(region)))
    }

    fn region_offers(
        &self,
        region: &str,
        entry: Option<RegionDto>,
    ) -> WatchProviders {
        let Some(entry) = entry else {
            return WatchProviders {
                region: region.to_string(),
                ..WatchProviders::default()
            };
        };
        let offers = |raw: Vec<ProviderDto>| -> Vec<ProviderOffer> {
            raw.into_iter()
                .filter_map(|p| {
                    Some(ProviderOffer {
                        id: p.provider_id?,
                        name: p.provider_name.unwrap_or_default(),
                        logo_url: self.image_url(p.logo_path.as_deref()),
                    })
                })
                .collect()
        };
        WatchProviders {
            region: region.to_string(),
            link: entry.link,
            flatrate: offers(entry.flatrate),
            free: offers(entry.free),
            rent: offers(entry.rent),
            buy: offers(entry.buy),
        }
    }

    fn endpoint(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<Url, CatalogError> {
        http::endpoint(&self.config.base_url, segments, params)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<T, CatalogError> {
        let token = self
            .config
            .bearer_token
            .as_deref()
            .ok_or(CatalogError::MissingCredentials("tmdb"))?;
        http::get_json(
            self.client
                .get(url)
                .bearer_auth(token)
                .header(reqwest::header::ACCEPT, "application/json"),
        )
        .await
    }

    /// Entries without an id are skipped; the rest of the page is kept.
    fn titles(&self, page: MoviePage) -> Vec<Title> {
        page.results
            .into_iter()
            .filter_map(|movie| self.title(movie))
            .collect()
    }

    fn title(&self, movie: MovieDto) -> Option<Title> {
        let id = movie.id?;
        let name = movie.title.unwrap_or_default();
        let title = Title::new(TitleId::Tmdb(id), name)
            .with_year(movie.release_date.as_deref().and_then(parse_year))
            .with_poster(self.image_url(movie.poster_path.as_deref()))
            .with_backdrop(self.image_url(movie.backdrop_path.as_deref()))
            .with_rating(movie.vote_average.and_then(|v| Rating::new(v).ok()))
            .with_overview(movie.overview.filter(|o| !o.trim().is_empty()));
        Some(title)
    }

    /// Absolute image URL for a provider path such as `/abc.jpg`.
    pub fn image_url(&self, path: Option<&str>) -> Option<String> {
        let path = path.map(str::trim).filter(|p| !p.is_empty())?;
        let base = self.config.image_base_url.trim_end_matches('/');
        if path.starts_with('/') {
            Some(format!("{base}{path}"))
        } else {
            Some(format!("{base}/{path}"))
        }
    }
}

#[derive(Debug, Deserialize)]
struct MoviePage {
    #[serde(default)]
    results: Vec<MovieDto>,
}

#[derive(Debug, Deserialize)]
struct MovieDto {
    id: Option<u64>,
    title: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
    overview: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoPage {
    #[serde(default)]
    results: Vec<VideoDto>,
}

#[derive(Debug, Deserialize)]
struct VideoDto {
    key: Option<String>,
    name: Option<String>,
    site: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl From<VideoDto> for VideoRef {
    fn from(dto: VideoDto) -> Self {
        VideoRef {
            key: dto.key.unwrap_or_default(),
            name: dto.name.unwrap_or_default(),
            site: VideoSite::parse(dto.site.as_deref().unwrap_or_default()),
            kind: VideoKind::parse(dto.kind.as_deref().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProvidersPage {
    #[serde(default)]
    results: HashMap<String, RegionDto>,
}

#[derive(Debug, Deserialize)]
struct RegionDto {
    link: Option<String>,
    #[serde(default)]
    flatrate: Vec<ProviderDto>,
    #[serde(default)]
    free: Vec<ProviderDto>,
    #[serde(default)]
    rent: Vec<ProviderDto>,
    #[serde(default)]
    buy: Vec<ProviderDto>,
}

#[derive(Debug, Deserialize)]
struct ProviderDto {
    provider_id: Option<u64>,
    provider_name: Option<String>,
    logo_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::new(Client::new(), TmdbConfig::default())
    }

    #[test]
    fn maps_list_page() {
        let page: MoviePage = http::decode(
            r#"{
                "page": 1,
                "results": [
                    {
                        "id": 603,
                        "title": "The Matrix",
                        "release_date": "1999-03-31",
                        "poster_path": "/matrix.jpg",
                        "backdrop_path": null,
                        "vote_average": 8.2,
                        "overview": "A hacker learns the truth."
                    },
                    { "id": 1, "title": "Bare", "release_date": "" }
                ],
                "total_pages": 10
            }"#,
        )
        .unwrap();

        let titles = client().titles(page);
        assert_eq!(titles.len(), 2);

        let matrix = &titles[0];
        assert_eq!(matrix.id, TitleId::Tmdb(603));
        assert_eq!(matrix.year, Some(1999));
        assert_eq!(
            matrix.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/matrix.jpg")
        );
        assert_eq!(matrix.rating.map(|r| r.out_of_five()), Some(4.1));
        assert!(matrix.backdrop_url.is_none());

        let bare = &titles[1];
        assert_eq!(bare.year, None);
        assert!(bare.poster_url.is_none());
        assert!(bare.rating.is_none());
    }

    #[test]
    fn out_of_range_vote_is_dropped() {
        let page: MoviePage = http::decode(
            r#"{"results":[{"id":2,"title":"Odd","vote_average":42.0}]}"#,
        )
        .unwrap();
        assert!(client().titles(page)[0].rating.is_none());
    }

    #[test]
    fn broken_entries_are_skipped_not_the_page() {
        let page: MoviePage = http::decode(
            r#"{"results":[
                {"id":603,"title":"The Matrix"},
                {"title":"No id"},
                {"id":2,"title":null},
                {"id":null,"title":"Null id"}
            ]}"#,
        )
        .unwrap();
        let titles = client().titles(page);
        let ids: Vec<_> = titles.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, vec![TitleId::Tmdb(603), TitleId::Tmdb(2)]);
        assert_eq!(titles[1].name, "");
    }

    #[test]
    fn null_video_fields_are_tolerated() {
        let page: VideoPage = http::decode(
            r#"{"results":[{"key":null,"name":null,"site":"YouTube","type":null}]}"#,
        )
        .unwrap();
        let video = VideoRef::from(page.results.into_iter().next().unwrap());
        assert!(video.key.is_empty());
        assert_eq!(video.site, VideoSite::YouTube);
    }

    #[test]
    fn free_only_region_has_offers() {
        let mut page: ProvidersPage = http::decode(
            r#"{"id":603,"results":{"US":{
                "link":"https://www.themoviedb.org/movie/603/watch",
                "free":[
                    {"provider_id":73,"provider_name":"Tubi TV","logo_path":"/tubi.jpg"},
                    {"provider_name":"No id"}
                ]
            }}}"#,
        )
        .unwrap();
        let providers = client().region_offers("US", page.results.remove("US"));

        assert!(!providers.is_empty());
        assert!(providers.flatrate.is_empty());
        assert_eq!(providers.free.len(), 1);
        assert_eq!(providers.free[0].id, 73);
        assert_eq!(providers.free[0].name, "Tubi TV");
        assert_eq!(
            providers.free[0].logo_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/tubi.jpg")
        );
    }

    #[test]
    fn missing_region_is_empty() {
        let providers = client().region_offers("FR", None);
        assert_eq!(providers.region, "FR");
        assert!(providers.is_empty());
    }

    #[test]
    fn maps_video_entries() {
        let page: VideoPage = http::decode(
            r#"{"id":603,"results":[
                {"key":"abc","name":"Teaser","site":"YouTube","type":"Teaser"},
                {"key":"def","name":"Official","site":"YouTube","type":"Trailer"}
            ]}"#,
        )
        .unwrap();
        let videos: Vec<VideoRef> =
            page.results.into_iter().map(VideoRef::from).collect();
        assert_eq!(videos[0].kind, VideoKind::Teaser);
        assert!(videos[1].is_youtube_trailer());
    }

    #[test]
    fn malformed_body_is_an_error() {
        let err = http::decode::<VideoPage>(r#"{"results": 7}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn image_url_joins_paths() {
        let client = client();
        assert_eq!(client.image_url(None), None);
        assert_eq!(client.image_url(Some("  ")), None);
        assert_eq!(
            client.image_url(Some("x.png")).as_deref(),
            Some("https://image.tmdb.org/t/p/original/x.png")
        );
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_request() {
        let err = client()
            .popular(1)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::MissingCredentials("tmdb")));
    }
}
