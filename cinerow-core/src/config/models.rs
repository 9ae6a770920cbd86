use std::fmt;
use std::time::Duration;

use url::Url;

use crate::constants::{self, endpoints, timing};

/// Fully resolved configuration handed to the catalog and controllers.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub tmdb: TmdbConfig,
    pub omdb: OmdbConfig,
    pub timing: TimingConfig,
    pub assets: AssetConfig,
    /// Region used for watch-provider lookups.
    pub region: String,
}

/// Movie metadata provider.
#[derive(Clone)]
pub struct TmdbConfig {
    pub base_url: Url,
    pub image_base_url: String,
    pub bearer_token: Option<String>,
    pub language: String,
}

/// Search and rating provider.
#[derive(Clone)]
pub struct OmdbConfig {
    pub base_url: Url,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub search_debounce: Duration,
    pub hover_dwell: Duration,
    pub banner_rotation: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    pub default_poster_url: String,
    pub demo_video_url: String,
}

// Credentials never end up in logs.
impl fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("base_url", &self.base_url.as_str())
            .field("image_base_url", &self.image_base_url)
            .field("has_token", &self.bearer_token.is_some())
            .field("language", &self.language)
            .finish()
    }
}

impl fmt::Debug for OmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OmdbConfig")
            .field("base_url", &self.base_url.as_str())
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_url(endpoints::TMDB_BASE_URL),
            image_base_url: endpoints::TMDB_IMAGE_BASE_URL.to_string(),
            bearer_token: None,
            language: constants::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_url(endpoints::OMDB_BASE_URL),
            api_key: None,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            search_debounce: timing::SEARCH_DEBOUNCE,
            hover_dwell: timing::HOVER_DWELL,
            banner_rotation: timing::BANNER_ROTATION,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            default_poster_url: endpoints::DEFAULT_POSTER_URL.to_string(),
            demo_video_url: endpoints::DEMO_VIDEO_URL.to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            tmdb: TmdbConfig::default(),
            omdb: OmdbConfig::default(),
            timing: TimingConfig::default(),
            assets: AssetConfig::default(),
            region: constants::DEFAULT_REGION.to_string(),
        }
    }
}

fn default_url(raw: &'static str) -> Url {
    // Compiled-in constants; covered by `defaults_parse`.
    Url::parse(raw).expect("compiled-in provider URL is valid")
}
