//! Recommendation source abstraction.

use std::future::Future;

use crate::error::Result;
use crate::models::Song;

/// Anything that can produce recommendations for a song id.
///
/// [`HomeFeed`](crate::HomeFeed) depends on this rather than on the HTTP
/// client, so the feed can be driven by any backend.
pub trait RecommendationSource {
    /// Fetch the full recommendation list for `song_id`.
    fn recommend(&self, song_id: &str) -> impl Future<Output = Result<Vec<Song>>> + Send;
}
