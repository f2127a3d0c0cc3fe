//! Song model.

use serde::{Deserialize, Serialize};

/// A song as reported by the backend.
///
/// Only `id` is required; display fields default to empty when the backend
/// omits them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Song {
    /// Backend track identifier, used as the recommendation key.
    pub id: String,

    /// Track title.
    #[serde(default)]
    pub title: String,

    /// Primary artist name.
    #[serde(default)]
    pub artist: String,

    /// Artwork URL.
    #[serde(default)]
    pub image: String,

    /// Short preview clip, when the catalogue has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

impl Song {
    /// Create a new song with id, title and artist.
    pub fn new<S1, S2, S3>(id: S1, title: S2, artist: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            ..Default::default()
        }
    }

    /// Identifier usable as a recommendation key.
    ///
    /// An empty id stands for "no song selected".
    pub fn key(&self) -> Option<&str> {
        let id = self.id.trim();
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }

    /// Get "Title - Artist", or just the title when the artist is unknown.
    pub fn display_name(&self) -> String {
        if self.artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }
}
