//! Recommendation backend client.
//!
//! This module provides a client for the song backend's JSON API:
//! recommendations, search, and stream URLs. No authentication is needed.

use reqwest::{Client, Response, Url};
use tracing::{debug, warn};

use super::source::RecommendationSource;
use crate::config::ClientConfig;
use crate::error::{FeedError, Result};
use crate::models::Song;

/// Form field the search endpoint reads the query from.
const SEARCH_FIELD: &str = "search_box";

/// Song backend API client.
///
/// # Example
///
/// ```rust,no_run
/// use songfeed::{ClientConfig, RecommendApi};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = RecommendApi::new(ClientConfig::new("http://127.0.0.1:5000/")?)?;
///     for song in api.get_recommendations("0tgVpDi06FyKpA1z0VMD4v").await? {
///         println!("{}", song.display_name());
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RecommendApi {
    client: Client,
    base_url: Url,
}

impl RecommendApi {
    /// Create a new client from a config.
    ///
    /// # Errors
    ///
    /// Returns `Request` if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Backend root this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL by appending path segments to the base.
    ///
    /// Each segment is percent-encoded on its own, so an id containing `/`
    /// stays a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FeedError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of the recommendation resource for a song id.
    pub fn recommend_url(&self, song_id: &str) -> Result<Url> {
        self.endpoint(&["api", "recommend", song_id])
    }

    /// URL the backend streams a song's audio from.
    pub fn stream_url(&self, title: &str, artist: &str) -> Result<Url> {
        let mut url = self.endpoint(&["api", "stream"])?;
        url.query_pairs_mut()
            .append_pair("artist", artist)
            .append_pair("song", title);
        Ok(url)
    }

    /// Check the status and parse the body as a song list.
    async fn read_songs(response: Response) -> Result<Vec<Song>> {
        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            warn!("Backend returned {} for {}", status, url);
            return Err(FeedError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let songs: Vec<Song> = serde_json::from_str(&body)?;
        Ok(songs)
    }

    /// Get the full recommendation list for a song.
    ///
    /// The backend decides how many songs to return; trimming for display
    /// is left to the caller.
    pub async fn get_recommendations(&self, song_id: &str) -> Result<Vec<Song>> {
        let url = self.recommend_url(song_id)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let songs = Self::read_songs(response).await?;

        debug!("Got {} recommendations for {}", songs.len(), song_id);
        Ok(songs)
    }

    /// Search the catalogue.
    pub async fn search(&self, query: &str) -> Result<Vec<Song>> {
        let url = self.endpoint(&["api", "search"])?;
        debug!("POST {} with query: {:?}", url, query);

        let response = self
            .client
            .post(url)
            .form(&[(SEARCH_FIELD, query)])
            .send()
            .await?;
        Self::read_songs(response).await
    }
}

impl RecommendationSource for RecommendApi {
    async fn recommend(&self, song_id: &str) -> Result<Vec<Song>> {
        self.get_recommendations(song_id).await
    }
}
