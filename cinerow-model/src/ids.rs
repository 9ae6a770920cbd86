use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Provider-qualified identifier for a title.
///
/// TMDB identifies movies numerically while OMDb uses IMDb ids
/// (`tt0133093`). Both can show up in the same row, so the id keeps
/// track of which namespace it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "provider", content = "id"))]
pub enum TitleId {
    #[cfg_attr(feature = "serde", serde(rename = "tmdb"))]
    Tmdb(u64),
    #[cfg_attr(feature = "serde", serde(rename = "imdb"))]
    Imdb(String),
}

impl TitleId {
    /// TMDB numeric id, when this title came from TMDB.
    pub fn tmdb(&self) -> Option<u64> {
        match self {
            TitleId::Tmdb(id) => Some(*id),
            TitleId::Imdb(_) => None,
        }
    }

    pub fn imdb(&self) -> Option<&str> {
        match self {
            TitleId::Imdb(id) => Some(id.as_str()),
            TitleId::Tmdb(_) => None,
        }
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TitleId::Tmdb(id) => write!(f, "tmdb:{id}"),
            TitleId::Imdb(id) => write!(f, "imdb:{id}"),
        }
    }
}

impl FromStr for TitleId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidId(s.to_string());
        let (namespace, raw) = s.split_once(':').ok_or_else(invalid)?;
        match namespace {
            "tmdb" => raw.parse().map(TitleId::Tmdb).map_err(|_| invalid()),
            "imdb" if raw.starts_with("tt") && raw.len() > 2 => {
                Ok(TitleId::Imdb(raw.to_string()))
            }
            _ => Err(invalid()),
        }
    }
}
