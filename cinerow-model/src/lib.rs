//! Core data model definitions shared across cinerow crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod rating;
pub mod scroll;
pub mod search;
pub mod title;
pub mod video;
pub mod watch;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::TitleId;
pub use rating::Rating;
pub use scroll::{SCROLL_EPSILON, ScrollAffordances, ScrollWindow};
pub use search::SearchQuery;
pub use title::Title;
pub use video::{VideoKind, VideoRef, VideoSite};
pub use watch::{ProviderOffer, WatchProviders};
