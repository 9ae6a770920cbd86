//! Per-modal playback state.

use cinerow_model::WatchProviders;
use parking_lot::Mutex;
use std::{fmt, sync::Arc};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::chain::{
    PlaybackMode, Resolution, ResolveError, ResolvedVideo, VideoTarget,
    resolve,
};
use crate::{providers::CatalogSource, task::TaskSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Providers answered without anything playable.
    NotFound,
    /// A request failed.
    Fetch,
}

/// Why a request ended without a video, in a form the view can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&ResolveError> for Failure {
    fn from(err: &ResolveError) -> Self {
        Self {
            kind: if err.is_not_found() {
                FailureKind::NotFound
            } else {
                FailureKind::Fetch
            },
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading {
        target: VideoTarget,
        mode: PlaybackMode,
    },
    Resolved(ResolvedVideo),
    Providers(WatchProviders),
    Failed(Failure),
    /// Fixed local asset chosen by the viewer instead of the chain.
    Demo {
        url: String,
    },
    Closed,
}

impl PlaybackState {
    pub fn is_loading(&self) -> bool {
        matches!(self, PlaybackState::Loading { .. })
    }

    /// Playable URL for the view, if there is one.
    pub fn play_url(&self) -> Option<&str> {
        match self {
            PlaybackState::Resolved(video) => Some(&video.url),
            PlaybackState::Demo { url } => Some(url),
            _ => None,
        }
    }
}

impl From<Result<Resolution, ResolveError>> for PlaybackState {
    fn from(outcome: Result<Resolution, ResolveError>) -> Self {
        match outcome {
            Ok(Resolution::Video(video)) => PlaybackState::Resolved(video),
            Ok(Resolution::Providers(p)) => PlaybackState::Providers(p),
            Err(err) => PlaybackState::Failed(Failure::from(&err)),
        }
    }
}

/// One video modal. Every [`VideoSession::open`] is a new request with its
/// own cancellation token; whatever it resolves to is published only while
/// that token is live, so nothing lands after the modal was closed or a
/// newer request replaced it.
pub struct VideoSession {
    source: Arc<dyn CatalogSource>,
    demo_url: String,
    state: Arc<watch::Sender<PlaybackState>>,
    token: Mutex<CancellationToken>,
    lookup: TaskSlot,
}

impl fmt::Debug for VideoSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoSession")
            .field("state", &*self.state.borrow())
            .field("demo_url", &self.demo_url)
            .finish_non_exhaustive()
    }
}

impl VideoSession {
    pub fn new(
        source: Arc<dyn CatalogSource>,
        demo_url: impl Into<String>,
    ) -> Self {
        Self {
            source,
            demo_url: demo_url.into(),
            state: Arc::new(watch::Sender::new(PlaybackState::Idle)),
            token: Mutex::new(CancellationToken::new()),
            lookup: TaskSlot::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> PlaybackState {
        self.state.borrow().clone()
    }

    /// Start resolving `target`, abandoning any request still in flight.
    pub fn open(&self, target: VideoTarget, mode: PlaybackMode) {
        let token = self.renew_token();
        self.state.send_replace(PlaybackState::Loading {
            target: target.clone(),
            mode: mode.clone(),
        });
        debug!(?target, ?mode, "resolving video");

        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        self.lookup.start(async move {
            let outcome = resolve(source.as_ref(), target, &mode).await;
            if let Err(err) = &outcome {
                info!(error = %err, "video resolution ended without playback");
            }
            let next = PlaybackState::from(outcome);
            let published = state.send_if_modified(|current| {
                if token.is_cancelled() {
                    return false;
                }
                *current = next;
                true
            });
            if !published {
                debug!("video request superseded, result dropped");
            }
        });
    }

    /// Escape the chain and play the fixed demo asset.
    pub fn play_demo(&self) {
        self.abandon();
        self.state.send_replace(PlaybackState::Demo {
            url: self.demo_url.clone(),
        });
    }

    /// The modal is gone. Nothing is published after this returns, until
    /// the next [`VideoSession::open`].
    pub fn close(&self) {
        self.abandon();
        self.state.send_replace(PlaybackState::Closed);
    }

    /// Wait for the current request to leave `Loading`.
    pub async fn settled(&self) -> PlaybackState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    fn renew_token(&self) -> CancellationToken {
        let fresh = CancellationToken::new();
        let previous =
            std::mem::replace(&mut *self.token.lock(), fresh.clone());
        previous.cancel();
        fresh
    }

    fn abandon(&self) {
        self.token.lock().cancel();
        self.lookup.cancel();
    }
}

impl Drop for VideoSession {
    fn drop(&mut self) {
        self.token.get_mut().cancel();
    }
}
