use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::{
    models::{
        AssetConfig, CatalogConfig, OmdbConfig, TimingConfig, TmdbConfig,
    },
    sources::{EnvConfig, FileConfig, FileTimingConfig},
};

const DEFAULT_CONFIG_LOCATIONS: &[&str] =
    &["cinerow.toml", "config/cinerow.toml"];

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

/// Result of a load: the resolved config plus anything worth telling the
/// operator about.
#[derive(Debug)]
pub struct ConfigLoad {
    pub config: CatalogConfig,
    pub config_path: Option<PathBuf>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("config file {path} does not exist")]
    MissingConfig { path: PathBuf },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid URL for {field}: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid duration for {field}: {source}")]
    InvalidDuration {
        field: &'static str,
        #[source]
        source: humantime::DurationError,
    },
    #[error("failed to load env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };
        debug!(env_file_loaded, "gathering configuration");

        self.load_with_env(EnvConfig::gather())
    }

    /// Same as [`ConfigLoader::load`] but with an explicit environment and
    /// no `.env` processing.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;

        let mut warnings = Vec::new();
        if config_path.is_none() {
            warnings.push(
                "No cinerow.toml detected; using compiled-in defaults and environment variables"
                    .to_string(),
            );
        }

        let config = compose_config(file_config.unwrap_or_default(), env)?;

        if config.tmdb.bearer_token.is_none() {
            warnings.push(
                "TMDB bearer token not set; list rows, banner and trailers will stay empty"
                    .to_string(),
            );
        }
        if config.omdb.api_key.is_none() {
            warnings.push(
                "OMDb API key not set; search and curated rows will stay empty"
                    .to_string(),
            );
        }

        Ok(ConfigLoad {
            config,
            config_path,
            warnings,
        })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let file_config = read_file_config(&path)?;
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|err| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source: err,
        })?;
    toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source: err,
    })
}

/// Layer file values over compiled defaults, then environment over both.
pub fn compose_config(
    file: FileConfig,
    env: EnvConfig,
) -> Result<CatalogConfig, ConfigLoadError> {
    let defaults = CatalogConfig::default();
    let FileConfig {
        tmdb: file_tmdb,
        omdb: file_omdb,
        timing: file_timing,
        assets: file_assets,
        region: file_region,
    } = file;

    let tmdb = TmdbConfig {
        base_url: parse_url("tmdb.base_url", file_tmdb.base_url)?
            .unwrap_or(defaults.tmdb.base_url),
        image_base_url: file_tmdb
            .image_base_url
            .map(|raw| raw.trim_end_matches('/').to_string())
            .unwrap_or(defaults.tmdb.image_base_url),
        bearer_token: env.tmdb_bearer_token.or(file_tmdb.bearer_token),
        language: env
            .language
            .or(file_tmdb.language)
            .unwrap_or(defaults.tmdb.language),
    };

    let omdb = OmdbConfig {
        base_url: parse_url("omdb.base_url", file_omdb.base_url)?
            .unwrap_or(defaults.omdb.base_url),
        api_key: env.omdb_api_key.or(file_omdb.api_key),
    };

    let timing = compose_timing(file_timing, defaults.timing)?;

    let assets = AssetConfig {
        default_poster_url: file_assets
            .default_poster_url
            .unwrap_or(defaults.assets.default_poster_url),
        demo_video_url: file_assets
            .demo_video_url
            .unwrap_or(defaults.assets.demo_video_url),
    };

    Ok(CatalogConfig {
        tmdb,
        omdb,
        timing,
        assets,
        region: env.region.or(file_region).unwrap_or(defaults.region),
    })
}

fn compose_timing(
    file: FileTimingConfig,
    defaults: TimingConfig,
) -> Result<TimingConfig, ConfigLoadError> {
    Ok(TimingConfig {
        search_debounce: parse_duration(
            "timing.search_debounce",
            file.search_debounce,
        )?
        .unwrap_or(defaults.search_debounce),
        hover_dwell: parse_duration("timing.hover_dwell", file.hover_dwell)?
            .unwrap_or(defaults.hover_dwell),
        banner_rotation: parse_duration(
            "timing.banner_rotation",
            file.banner_rotation,
        )?
        .unwrap_or(defaults.banner_rotation),
    })
}

fn parse_url(
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<Url>, ConfigLoadError> {
    raw.map(|value| Url::parse(value.trim()))
        .transpose()
        .map_err(|source| ConfigLoadError::InvalidUrl { field, source })
}

fn parse_duration(
    field: &'static str,
    raw: Option<String>,
) -> Result<Option<Duration>, ConfigLoadError> {
    raw.map(|value| humantime::parse_duration(value.trim()))
        .transpose()
        .map_err(|source| ConfigLoadError::InvalidDuration { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> EnvConfig {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(move |key| {
            pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn defaults_without_file_or_env() {
        let config =
            compose_config(FileConfig::default(), EnvConfig::default())
                .unwrap();
        assert_eq!(config.timing, TimingConfig::default());
        assert!(config.tmdb.bearer_token.is_none());
        assert!(config.omdb.api_key.is_none());
    }

    #[test]
    fn providers_are_independent_entries() {
        let file: FileConfig = toml::from_str(
            r#"
            [tmdb]
            bearer_token = "tmdb-from-file"

            [omdb]
            api_key = "omdb-from-file"
            "#,
        )
        .unwrap();
        let config =
            compose_config(file, env(&[("OMDB_API_KEY", "omdb-env")]))
                .unwrap();
        assert_eq!(config.tmdb.bearer_token.as_deref(), Some("tmdb-from-file"));
        assert_eq!(config.omdb.api_key.as_deref(), Some("omdb-env"));
    }

    #[test]
    fn file_timing_uses_humantime() {
        let file: FileConfig = toml::from_str(
            r#"
            region = "GB"

            [timing]
            search_debounce = "250ms"
            banner_rotation = "1m"
            "#,
        )
        .unwrap();
        let config = compose_config(file, EnvConfig::default()).unwrap();
        assert_eq!(config.timing.search_debounce, Duration::from_millis(250));
        assert_eq!(config.timing.banner_rotation, Duration::from_secs(60));
        assert_eq!(config.timing.hover_dwell, Duration::from_secs(1));
        assert_eq!(config.region, "GB");
    }

    #[test]
    fn bad_duration_is_reported() {
        let file: FileConfig =
            toml::from_str("[timing]\nhover_dwell = \"soon\"").unwrap();
        let err = compose_config(file, EnvConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigLoadError::InvalidDuration {
                field: "timing.hover_dwell",
                ..
            }
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("api_key = \"x\"").is_err());
    }

    #[test]
    fn blank_env_values_are_unset() {
        let env = env(&[("TMDB_BEARER_TOKEN", "   ")]);
        assert!(env.tmdb_bearer_token.is_none());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = ConfigLoader::new()
            .with_config_path("/definitely/not/here/cinerow.toml")
            .load_with_env(EnvConfig::default())
            .unwrap_err();
        assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[tmdb]\nlanguage = \"de-DE\"").unwrap();

        let load = ConfigLoader::new()
            .with_config_path(file.path())
            .load_with_env(env(&[("TMDB_BEARER_TOKEN", "t")]))
            .unwrap();
        assert_eq!(load.config.tmdb.language, "de-DE");
        assert_eq!(load.config_path.as_deref(), Some(file.path()));
        // Only the OMDb key is missing.
        assert_eq!(load.warnings.len(), 1);
    }
}
