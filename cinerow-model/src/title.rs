use crate::ids::TitleId;
use crate::rating::Rating;

/// A catalog record as normalized from either provider.
///
/// Image references are absolute URLs; providers that only hand out paths
/// are expected to resolve them before building a `Title`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Title {
    pub id: TitleId,
    pub name: String,
    pub year: Option<u16>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub rating: Option<Rating>,
    pub overview: Option<String>,
}

impl Title {
    pub fn new(id: TitleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            year: None,
            poster_url: None,
            backdrop_url: None,
            rating: None,
            overview: None,
        }
    }

    pub fn with_year(mut self, year: Option<u16>) -> Self {
        self.year = year;
        self
    }

    pub fn with_poster(mut self, url: Option<String>) -> Self {
        self.poster_url = url;
        self
    }

    pub fn with_backdrop(mut self, url: Option<String>) -> Self {
        self.backdrop_url = url;
        self
    }

    pub fn with_rating(mut self, rating: Option<Rating>) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_overview(mut self, overview: Option<String>) -> Self {
        self.overview = overview;
        self
    }

    /// Poster URL, or `fallback` when the provider had none.
    pub fn poster_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.poster_url.as_deref().unwrap_or(fallback)
    }
}

/// Leading four-digit year of a provider date or year field.
///
/// Accepts `2019-10-04`, `1999`, and OMDb ranges like `2008–2013`.
pub fn parse_year(raw: &str) -> Option<u16> {
    let head = raw.trim().get(..4)?;
    if !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    head.parse().ok().filter(|year| *year > 0)
}
