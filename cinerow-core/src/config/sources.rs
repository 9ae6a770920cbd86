use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub tmdb: FileTmdbConfig,
    #[serde(default)]
    pub omdb: FileOmdbConfig,
    #[serde(default)]
    pub timing: FileTimingConfig,
    #[serde(default)]
    pub assets: FileAssetConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileTmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileOmdbConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Durations are humantime strings such as `"400ms"` or `"10s"`.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileTimingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_debounce: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_dwell: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_rotation: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileAssetConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_video_url: Option<String>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub tmdb_bearer_token: Option<String>,
    pub omdb_api_key: Option<String>,
    pub region: Option<String>,
    pub language: Option<String>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            config_path: get("CINEROW_CONFIG").map(PathBuf::from),
            tmdb_bearer_token: get("TMDB_BEARER_TOKEN"),
            omdb_api_key: get("OMDB_API_KEY"),
            region: get("CINEROW_REGION"),
            language: get("CINEROW_LANGUAGE"),
        }
    }
}
