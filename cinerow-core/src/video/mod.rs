//! Resolving a movie to something playable.
//!
//! [`chain`] is the pure lookup sequence (id or title, then videos or
//! watch providers); [`session`] wraps it in a cancellable per-modal state
//! machine.

pub mod chain;
pub mod session;

pub use chain::{
    PlaybackMode, Resolution, ResolveError, ResolvedVideo, VideoTarget,
    pick_video, resolve,
};
pub use session::{Failure, FailureKind, PlaybackState, VideoSession};
