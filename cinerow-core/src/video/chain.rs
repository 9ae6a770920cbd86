use cinerow_model::{Title, TitleId, VideoRef, WatchProviders};
use thiserror::Error;
use tracing::debug;

use crate::{error::CatalogError, providers::CatalogSource};

/// What the viewer asked to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoTarget {
    /// Metadata-provider movie id.
    Id(u64),
    /// Free title, searched on the metadata provider first.
    Title(String),
}

impl From<&Title> for VideoTarget {
    fn from(title: &Title) -> Self {
        match title.id {
            TitleId::Tmdb(id) => VideoTarget::Id(id),
            TitleId::Imdb(_) => VideoTarget::Title(title.name.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    #[default]
    Trailer,
    /// Where the movie can be streamed in `region` instead of a trailer.
    Streaming { region: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVideo {
    pub movie_id: u64,
    pub video: VideoRef,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Video(ResolvedVideo),
    Providers(WatchProviders),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No trailer available")]
    NoTrailer,

    #[error("Movie not found")]
    MovieNotFound,

    #[error("No streaming providers available")]
    NoProviders,

    #[error("Failed to load trailer: {0}")]
    Fetch(#[source] CatalogError),
}

impl ResolveError {
    /// The providers answered but had nothing to play.
    pub fn is_not_found(&self) -> bool {
        !matches!(self, ResolveError::Fetch(_))
    }
}

/// Preferred entry of a video list: the first YouTube trailer, otherwise
/// the first entry that can actually be played.
///
/// Entries on unknown sites, or with an empty key, are skipped by the
/// fallback rather than chosen and turned into a dead link. A list made only
/// of such entries picks nothing.
pub fn pick_video(videos: &[VideoRef]) -> Option<&VideoRef> {
    videos
        .iter()
        .find(|video| video.is_youtube_trailer())
        .or_else(|| videos.iter().find(|video| video.watch_url().is_some()))
}

enum Step {
    Search(String),
    Identified(u64),
    Done(Result<Resolution, ResolveError>),
}

/// Run the lookup chain for `target` to completion.
///
/// A title is searched first and the first match's id used; a search with
/// no matches ends the chain without a second request. Empty provider
/// answers map to the not-found variants, anything else to
/// [`ResolveError::Fetch`].
pub async fn resolve(
    source: &dyn CatalogSource,
    target: VideoTarget,
    mode: &PlaybackMode,
) -> Result<Resolution, ResolveError> {
    let mut step = match target {
        VideoTarget::Id(id) => Step::Identified(id),
        VideoTarget::Title(title) => Step::Search(title),
    };

    loop {
        step = match step {
            Step::Search(title) => search_step(source, &title).await,
            Step::Identified(id) => match mode {
                PlaybackMode::Trailer => videos_step(source, id).await,
                PlaybackMode::Streaming { region } => {
                    providers_step(source, id, region).await
                }
            },
            Step::Done(outcome) => return outcome,
        };
    }
}

async fn search_step(source: &dyn CatalogSource, title: &str) -> Step {
    match source.search_movies(title).await {
        Ok(matches) => match matches.first().and_then(|t| t.id.tmdb()) {
            Some(id) => {
                debug!(title, id, "title resolved to movie id");
                Step::Identified(id)
            }
            None => Step::Done(Err(ResolveError::MovieNotFound)),
        },
        Err(err) if err.is_empty_result() => {
            Step::Done(Err(ResolveError::MovieNotFound))
        }
        Err(err) => Step::Done(Err(ResolveError::Fetch(err))),
    }
}

async fn videos_step(source: &dyn CatalogSource, id: u64) -> Step {
    let outcome = match source.videos(id).await {
        Ok(videos) => pick_video(&videos)
            .and_then(|video| {
                Some(ResolvedVideo {
                    movie_id: id,
                    url: video.watch_url()?,
                    video: video.clone(),
                })
            })
            .map(Resolution::Video)
            .ok_or(ResolveError::NoTrailer),
        Err(err) if err.is_empty_result() => Err(ResolveError::NoTrailer),
        Err(err) => Err(ResolveError::Fetch(err)),
    };
    Step::Done(outcome)
}

async fn providers_step(
    source: &dyn CatalogSource,
    id: u64,
    region: &str,
) -> Step {
    let outcome = match source.watch_providers(id, region).await {
        Ok(providers) if providers.is_empty() => Err(ResolveError::NoProviders),
        Ok(providers) => Ok(Resolution::Providers(providers)),
        Err(err) if err.is_empty_result() => Err(ResolveError::NoProviders),
        Err(err) => Err(ResolveError::Fetch(err)),
    };
    Step::Done(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockCatalogSource;
    use cinerow_model::{ProviderOffer, VideoKind, VideoSite};

    fn video(key: &str, site: &str, kind: &str) -> VideoRef {
        VideoRef {
            key: key.to_string(),
            name: format!("{kind} {key}"),
            site: VideoSite::parse(site),
            kind: VideoKind::parse(kind),
        }
    }

    fn trailer(outcome: Result<Resolution, ResolveError>) -> ResolvedVideo {
        match outcome {
            Ok(Resolution::Video(video)) => video,
            other => panic!("expected a video, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn youtube_trailer_wins() {
        let mut mock = MockCatalogSource::new();
        mock.expect_videos().withf(|id| *id == 603).returning(|_| {
            Ok(vec![
                video("teaser", "YouTube", "Teaser"),
                video("vimeo", "Vimeo", "Trailer"),
                video("yt", "YouTube", "Trailer"),
            ])
        });

        let resolved = trailer(
            resolve(&mock, VideoTarget::Id(603), &PlaybackMode::Trailer).await,
        );
        assert_eq!(resolved.movie_id, 603);
        assert_eq!(resolved.url, "https://www.youtube.com/watch?v=yt");
    }

    #[tokio::test]
    async fn falls_back_to_first_entry() {
        let mut mock = MockCatalogSource::new();
        mock.expect_videos().returning(|_| {
            Ok(vec![
                video("clip", "YouTube", "Clip"),
                video("feat", "YouTube", "Featurette"),
            ])
        });

        let resolved = trailer(
            resolve(&mock, VideoTarget::Id(1), &PlaybackMode::Trailer).await,
        );
        assert_eq!(resolved.video.key, "clip");
    }

    #[tokio::test]
    async fn unplayable_entries_are_skipped() {
        let mut mock = MockCatalogSource::new();
        mock.expect_videos().returning(|_| {
            Ok(vec![
                video("x", "Dailymotion", "Clip"),
                video("", "YouTube", "Clip"),
            ])
        });

        let err = resolve(&mock, VideoTarget::Id(1), &PlaybackMode::Trailer)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::NoTrailer));
    }

    #[tokio::test]
    async fn no_videos_is_not_found() {
        let mut mock = MockCatalogSource::new();
        mock.expect_videos().returning(|_| Ok(Vec::new()));

        let err = resolve(&mock, VideoTarget::Id(7), &PlaybackMode::Trailer)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "No trailer available");
    }

    #[tokio::test]
    async fn title_without_matches_stops_after_search() {
        let mut mock = MockCatalogSource::new();
        mock.expect_search_movies()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        mock.expect_videos().never();

        let err = resolve(
            &mock,
            VideoTarget::Title("ZzzNoSuchMovie123".into()),
            &PlaybackMode::Trailer,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ResolveError::MovieNotFound));
        assert_eq!(err.to_string(), "Movie not found");
    }

    #[tokio::test]
    async fn title_resolves_through_first_match() {
        let mut mock = MockCatalogSource::new();
        mock.expect_search_movies()
            .withf(|title| title == "Heat")
            .returning(|_| {
                Ok(vec![
                    Title::new(TitleId::Tmdb(949), "Heat"),
                    Title::new(TitleId::Tmdb(1), "Heat 2"),
                ])
            });
        mock.expect_videos()
            .withf(|id| *id == 949)
            .times(1)
            .returning(|_| Ok(vec![video("heat", "YouTube", "Trailer")]));

        let resolved = trailer(
            resolve(
                &mock,
                VideoTarget::Title("Heat".into()),
                &PlaybackMode::Trailer,
            )
            .await,
        );
        assert_eq!(resolved.movie_id, 949);
    }

    #[tokio::test]
    async fn fetch_errors_are_distinguished() {
        let mut mock = MockCatalogSource::new();
        mock.expect_videos()
            .returning(|_| Err(CatalogError::Status(502)));

        let err = resolve(&mock, VideoTarget::Id(5), &PlaybackMode::Trailer)
            .await
            .unwrap_err();
        assert!(!err.is_not_found());
        assert!(err.to_string().starts_with("Failed to load trailer"));
    }

    #[tokio::test]
    async fn streaming_mode_resolves_providers() {
        let mut mock = MockCatalogSource::new();
        mock.expect_watch_providers()
            .withf(|id, region| *id == 603 && region == "US")
            .returning(|_, region| {
                Ok(WatchProviders {
                    region: region.to_string(),
                    flatrate: vec![ProviderOffer {
                        id: 8,
                        name: "Netflix".into(),
                        logo_url: None,
                    }],
                    ..WatchProviders::default()
                })
            });
        mock.expect_watch_providers()
            .withf(|_, region| region == "FR")
            .returning(|_, region| {
                Ok(WatchProviders {
                    region: region.to_string(),
                    ..WatchProviders::default()
                })
            });

        let us = PlaybackMode::Streaming {
            region: "US".into(),
        };
        match resolve(&mock, VideoTarget::Id(603), &us).await {
            Ok(Resolution::Providers(p)) => assert_eq!(p.flatrate.len(), 1),
            other => panic!("expected providers, got {other:?}"),
        }

        let fr = PlaybackMode::Streaming {
            region: "FR".into(),
        };
        let err = resolve(&mock, VideoTarget::Id(603), &fr)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::NoProviders));
    }

    #[tokio::test]
    async fn free_only_offers_count_as_providers() {
        let mut mock = MockCatalogSource::new();
        mock.expect_watch_providers().returning(|_, region| {
            Ok(WatchProviders {
                region: region.to_string(),
                free: vec![ProviderOffer {
                    id: 73,
                    name: "Tubi TV".into(),
                    logo_url: None,
                }],
                ..WatchProviders::default()
            })
        });

        let mode = PlaybackMode::Streaming {
            region: "US".into(),
        };
        match resolve(&mock, VideoTarget::Id(603), &mode).await {
            Ok(Resolution::Providers(p)) => {
                assert_eq!(p.free.len(), 1);
                assert!(p.flatrate.is_empty());
            }
            other => panic!("expected providers, got {other:?}"),
        }
    }

    #[test]
    fn target_from_title() {
        let tmdb = Title::new(TitleId::Tmdb(3), "Three");
        let imdb = Title::new(TitleId::Imdb("tt3".into()), "Three");
        assert_eq!(VideoTarget::from(&tmdb), VideoTarget::Id(3));
        assert_eq!(
            VideoTarget::from(&imdb),
            VideoTarget::Title("Three".into())
        );
    }
}
