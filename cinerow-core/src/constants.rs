//! Compiled-in defaults. Everything here can be overridden through
//! [`crate::config`] except the curated row lists.

/// Provider endpoints and static assets.
pub mod endpoints {
    pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
    pub const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";
    pub const OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

    /// Poster shown for titles the providers returned without artwork.
    pub const DEFAULT_POSTER_URL: &str =
        "https://image.tmdb.org/t/p/original/1E5baAaEse26fej7uHcjOgEE2t2.jpg";

    /// Locally playable asset offered when no trailer can be resolved.
    pub const DEMO_VIDEO_URL: &str = "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";
}

/// Timer defaults for the controllers.
pub mod timing {
    use std::time::Duration;

    pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);
    pub const HOVER_DWELL: Duration = Duration::from_secs(1);
    pub const BANNER_ROTATION: Duration = Duration::from_secs(10);
}

/// Carousel geometry.
pub mod carousel {
    /// Distance covered by one directional step.
    pub const SCROLL_STEP: f32 = 320.0;
    /// Width of the pointer edge zone that nudges the row.
    pub const EDGE_ZONE: f32 = 50.0;
    /// Distance covered by one edge nudge.
    pub const EDGE_NUDGE: f32 = 10.0;
}

pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_REGION: &str = "US";

/// Curated rows on the landing page.
pub mod curated {
    pub const THRILLER_TITLES: &[&str] = &[
        "Se7en",
        "Gone Girl",
        "Prisoners",
        "Shutter Island",
        "The Girl with the Dragon Tattoo",
        "Zodiac",
        "Nightcrawler",
        "Oldboy",
        "The Silence of the Lambs",
        "Memento",
    ];

    pub const MOST_RATED_TITLES: &[&str] = &[
        "The Shawshank Redemption",
        "The Godfather",
        "The Dark Knight",
        "Pulp Fiction",
        "Forrest Gump",
        "Inception",
        "Fight Club",
        "The Lord of the Rings: The Return of the King",
        "Interstellar",
        "The Matrix",
    ];
}
