//! Home feed driver.
//!
//! Connects a [`RecommendationSource`] to a [`RecommendationView`]:
//! song change -> decide -> fetch -> apply. The view lock is only held
//! while deciding and applying, never across the request, so overlapping
//! song changes each run their own request and the newest one wins.

use tokio::sync::Mutex;
use tracing::info;

use crate::api::RecommendationSource;
use crate::context::SongContext;
use crate::models::Song;
use crate::view::{FetchOutcome, FetchTicket, Home, RecommendationView};

/// Recommendation feed for the home screen.
///
/// # Example
///
/// ```rust,no_run
/// use songfeed::{ClientConfig, HomeFeed, PlayerState, RecommendApi, Song};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let feed = HomeFeed::new(RecommendApi::new(ClientConfig::default())?);
///     let mut player = PlayerState::new();
///     player.play(Song::new("0tgVpDi06FyKpA1z0VMD4v", "Perfect", "Ed Sheeran"));
///
///     feed.sync(&player).await;
///     print!("{}", feed.home(&player).await);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct HomeFeed<S> {
    source: S,
    view: Mutex<RecommendationView>,
}

impl<S: RecommendationSource> HomeFeed<S> {
    /// Create a feed with an empty recommendation list.
    pub fn new(source: S) -> Self {
        Self {
            source,
            view: Mutex::new(RecommendationView::new()),
        }
    }

    /// Underlying recommendation source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// React to a new current song, fetching if its id changed.
    pub async fn on_current_song(&self, current: Option<&Song>) -> FetchOutcome {
        let ticket = self.view.lock().await.observe(current);
        match ticket {
            Some(ticket) => self.run(ticket).await,
            None => FetchOutcome::Skipped,
        }
    }

    /// Same as [`on_current_song`](Self::on_current_song), reading the
    /// current song from a player context.
    pub async fn sync<C: SongContext>(&self, context: &C) -> FetchOutcome {
        self.on_current_song(context.current_song()).await
    }

    /// Fetch again for the last observed song.
    pub async fn refresh(&self) -> FetchOutcome {
        let ticket = self.view.lock().await.refresh();
        match ticket {
            Some(ticket) => self.run(ticket).await,
            None => FetchOutcome::Skipped,
        }
    }

    async fn run(&self, ticket: FetchTicket) -> FetchOutcome {
        let result = self.source.recommend(ticket.song_id()).await;
        let song_id = ticket.song_id().to_string();
        let outcome = self.view.lock().await.complete(ticket, result);
        if let FetchOutcome::Applied { count } = outcome {
            info!("Loaded {} recommendations for {}", count, song_id);
        }
        outcome
    }

    /// Render the home screen for a player context.
    pub async fn home<C: SongContext>(&self, context: &C) -> Home {
        self.view.lock().await.render(context.songs())
    }

    /// Recommendations as currently shown.
    pub async fn recommendations(&self) -> Vec<Song> {
        self.view.lock().await.made_for_you().to_vec()
    }

    /// Message of the last failed request, if the last one failed.
    pub async fn last_error(&self) -> Option<String> {
        self.view.lock().await.last_error().map(str::to_string)
    }
}
