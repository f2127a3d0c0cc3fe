//! # songfeed
//!
//! Home feed for a song recommendation backend: the play history and a
//! short "Made for you" list fetched for the song currently playing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use songfeed::{ClientConfig, HomeFeed, PlayerState, RecommendApi, Song};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = RecommendApi::new(ClientConfig::new("http://127.0.0.1:5000/")?)?;
//!     let feed = HomeFeed::new(api);
//!
//!     let mut player = PlayerState::new();
//!     player.play(Song::new("0tgVpDi06FyKpA1z0VMD4v", "Perfect", "Ed Sheeran"));
//!
//!     // Fetches /api/recommend/0tgVpDi06FyKpA1z0VMD4v
//!     feed.sync(&player).await;
//!     print!("{}", feed.home(&player).await);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`RecommendationView`] - view model that decides when to fetch; no I/O
//! - [`HomeFeed`] - drives a view from a [`RecommendationSource`]
//! - [`RecommendApi`] - HTTP client for the backend
//! - [`SongContext`] / [`PlayerState`] - where the current song and history come from

pub mod api;
pub mod config;
pub mod context;
pub mod error;
mod feed;
pub mod models;
pub mod view;

pub use feed::HomeFeed;

pub use api::{RecommendApi, RecommendationSource};
pub use config::ClientConfig;
pub use context::{PlayerState, SongContext};
pub use error::FeedError;
pub use models::Song;
pub use view::{FetchOutcome, FetchTicket, Home, RecommendationView, Section};
