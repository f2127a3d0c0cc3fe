//! Data models for backend responses.
//!
//! The backend reports every track with the same flat shape, whether it
//! comes from search or from the recommender.

pub mod song;

// Re-exports for convenience
pub use song::Song;
