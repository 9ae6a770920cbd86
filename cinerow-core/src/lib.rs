//! Catalog clients and view-state controllers for a movie browsing UI.
//!
//! The providers live in [`providers`]; [`Catalog`] makes them fail soft.
//! Each controller owns its published state (a `tokio::sync::watch`
//! channel) and its timers, and never lets a provider error escape.
#![allow(missing_docs)]

pub mod banner;
pub mod carousel;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod home;
pub mod providers;
pub mod rows;
pub mod search;
pub mod task;
pub mod video;

pub use banner::{BannerController, BannerState};
pub use carousel::{
    CarouselConfig, CarouselController, ScrollBehavior, ScrollDirection,
    ScrollRequest,
};
pub use catalog::Catalog;
pub use config::{CatalogConfig, ConfigLoad, ConfigLoadError, ConfigLoader};
pub use error::{CatalogError, ErrorKind};
pub use home::{
    CardView, HomeFeed, HomeSnapshot, RowSnapshot, RowSpec, default_rows,
};
pub use providers::{CatalogSource, MovieList, RemoteCatalog};
pub use rows::{RowAggregator, RowSource, RowState, TitleList};
pub use search::{SearchController, SearchState};
pub use task::TaskSlot;
pub use video::{
    Failure, FailureKind, PlaybackMode, PlaybackState, ResolveError,
    ResolvedVideo, VideoSession, VideoTarget,
};

pub use cinerow_model as model;
