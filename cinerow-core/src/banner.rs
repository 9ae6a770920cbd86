//! Hero banner: a random popular movie, rotated on a fixed period.

use cinerow_model::Title;
use rand::seq::IndexedRandom;
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;
use tracing::debug;

use crate::{
    catalog::Catalog,
    config::CatalogConfig,
    task::TaskSlot,
    video::{PlaybackMode, VideoSession, VideoTarget},
};

#[derive(Debug, Clone, PartialEq)]
pub struct BannerState {
    pub title: Option<Title>,
    pub loading: bool,
}

impl Default for BannerState {
    fn default() -> Self {
        Self {
            title: None,
            loading: true,
        }
    }
}

#[derive(Debug)]
pub struct BannerController {
    catalog: Catalog,
    rotation: Duration,
    demo_url: String,
    state: Arc<watch::Sender<BannerState>>,
    rotation_timer: TaskSlot,
}

impl BannerController {
    pub fn new(
        catalog: Catalog,
        rotation: Duration,
        demo_url: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            rotation,
            demo_url: demo_url.into(),
            state: Arc::new(watch::Sender::new(BannerState::default())),
            rotation_timer: TaskSlot::new(),
        }
    }

    pub fn from_config(catalog: Catalog, config: &CatalogConfig) -> Self {
        Self::new(
            catalog,
            config.timing.banner_rotation,
            config.assets.demo_video_url.clone(),
        )
    }

    pub fn subscribe(&self) -> watch::Receiver<BannerState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> BannerState {
        self.state.borrow().clone()
    }

    /// Pick a title now and then once per rotation period. Restarting
    /// replaces the running rotation.
    pub fn start(&self) {
        self.state.send_modify(|state| state.loading = true);
        let catalog = self.catalog.clone();
        let state = Arc::clone(&self.state);
        self.rotation_timer.arm_every(self.rotation, move || {
            let catalog = catalog.clone();
            let state = Arc::clone(&state);
            async move { refresh(&catalog, &state).await }
        });
    }

    pub fn stop(&self) {
        self.rotation_timer.cancel();
    }

    pub async fn settled(&self) -> BannerState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Open a trailer session for the title currently shown.
    pub fn open_trailer(&self) -> Option<VideoSession> {
        let title = self.state.borrow().title.clone()?;
        let session =
            VideoSession::new(self.catalog.source(), self.demo_url.clone());
        session.open(VideoTarget::from(&title), PlaybackMode::Trailer);
        Some(session)
    }
}

/// A refresh that comes back empty keeps the title already shown.
async fn refresh(catalog: &Catalog, state: &watch::Sender<BannerState>) {
    let popular = catalog.fetch_popular(1).await;
    let pick = popular.choose(&mut rand::rng()).cloned();
    debug!(
        candidates = popular.len(),
        picked = pick.as_ref().map(|t| t.name.as_str()),
        "banner refresh"
    );
    state.send_if_modified(|current| match pick {
        Some(title) => {
            current.title = Some(title);
            current.loading = false;
            true
        }
        None if current.loading => {
            current.loading = false;
            true
        }
        None => false,
    });
}
