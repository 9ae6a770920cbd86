/// Hosting site of a provider video entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VideoSite {
    YouTube,
    Vimeo,
    Other(String),
}

impl VideoSite {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("youtube") {
            VideoSite::YouTube
        } else if raw.eq_ignore_ascii_case("vimeo") {
            VideoSite::Vimeo
        } else {
            VideoSite::Other(raw.to_string())
        }
    }
}

/// Editorial type of a video entry (`type` in TMDB's payload).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VideoKind {
    Trailer,
    Teaser,
    Clip,
    Featurette,
    Other(String),
}

impl VideoKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Trailer" => VideoKind::Trailer,
            "Teaser" => VideoKind::Teaser,
            "Clip" => VideoKind::Clip,
            "Featurette" => VideoKind::Featurette,
            other => VideoKind::Other(other.to_string()),
        }
    }
}

/// Reference to a third-party hosted video, addressed by the site's key.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoRef {
    pub key: String,
    pub name: String,
    pub site: VideoSite,
    pub kind: VideoKind,
}

impl VideoRef {
    pub fn is_youtube_trailer(&self) -> bool {
        self.site == VideoSite::YouTube && self.kind == VideoKind::Trailer
    }

    /// Playable page URL for the entry, if the site is one we can embed.
    pub fn watch_url(&self) -> Option<String> {
        if self.key.is_empty() {
            return None;
        }
        match self.site {
            VideoSite::YouTube => {
                Some(format!("https://www.youtube.com/watch?v={}", self.key))
            }
            VideoSite::Vimeo => Some(format!("https://vimeo.com/{}", self.key)),
            VideoSite::Other(_) => None,
        }
    }
}
