//! Backend API access.
//!
//! - [`RecommendApi`]: HTTP client for the song backend
//! - [`RecommendationSource`]: the seam the home feed fetches through

pub mod recommend;
pub mod source;

pub use recommend::RecommendApi;
pub use source::RecommendationSource;
