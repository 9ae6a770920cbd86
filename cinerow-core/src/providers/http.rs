//! Shared request plumbing for both providers.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::CatalogError;

/// One client for both providers. No timeout and no retries: the first
/// failure is final for that call.
pub fn build_client() -> Result<Client, CatalogError> {
    Client::builder()
        .user_agent(concat!("cinerow/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(CatalogError::Network)
}

/// Append path segments and query pairs to a provider base URL.
pub fn endpoint(
    base: &Url,
    segments: &[&str],
    params: &[(&str, &str)],
) -> Result<Url, CatalogError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| CatalogError::InvalidBaseUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url)
}

/// Send a GET and decode the JSON body. Non-2xx statuses and undecodable
/// bodies become errors rather than panics or partial values.
pub async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<T, CatalogError> {
    let response = request.send().await?;
    let status = response.status();
    debug!(status = status.as_u16(), url = %response.url().path(), "provider response");
    if !status.is_success() {
        return Err(CatalogError::Status(status.as_u16()));
    }
    let body = response.text().await?;
    decode(&body)
}

pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, CatalogError> {
    serde_json::from_str(body).map_err(CatalogError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path() {
        let base = Url::parse("https://api.themoviedb.org/3").unwrap();
        let url = endpoint(
            &base,
            &["movie", "603", "videos"],
            &[("language", "en-US")],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/movie/603/videos?language=en-US"
        );
    }

    #[test]
    fn endpoint_encodes_query() {
        let base = Url::parse("https://www.omdbapi.com/").unwrap();
        let url = endpoint(&base, &[], &[("t", "Se7en & Co")]).unwrap();
        assert_eq!(url.as_str(), "https://www.omdbapi.com/?t=Se7en+%26+Co");
    }

    #[test]
    fn rejects_non_base_url() {
        let base = Url::parse("mailto:someone@example.com").unwrap();
        assert!(matches!(
            endpoint(&base, &["x"], &[]),
            Err(CatalogError::InvalidBaseUrl(_))
        ));
    }
}
