//! Recommendation view model.
//!
//! [`RecommendationView`] owns the recommended list and decides when a new
//! fetch is needed. It does no I/O itself: [`observe`](RecommendationView::observe)
//! hands out a [`FetchTicket`], the caller performs the request, and
//! [`complete`](RecommendationView::complete) applies the result.
//!
//! Every ticket carries a token. Only the most recently issued token may
//! update the list, so when the song changes while a request is in flight,
//! the newer song's result wins no matter which response arrives first.

use std::fmt;

use tracing::{debug, warn};

use crate::error::{FeedError, Result};
use crate::models::Song;

/// Title of the play history section.
pub const RECENTLY_PLAYED_TITLE: &str = "Recently Played";

/// Title of the recommendation section.
pub const MADE_FOR_YOU_TITLE: &str = "Made for you";

/// Maximum number of recommendations shown.
pub const MAX_RECOMMENDATIONS: usize = 7;

/// Whether moving from `previous` to `next` song id requires a fetch.
///
/// True only when `next` is a non-empty id different from `previous`.
pub fn should_fetch(previous: Option<&str>, next: Option<&str>) -> bool {
    match next {
        Some(next) if !next.is_empty() => previous != Some(next),
        _ => false,
    }
}

/// Permission to run one recommendation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    token: u64,
    song_id: String,
}

impl FetchTicket {
    /// Request token; higher is newer.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Song id to request recommendations for.
    pub fn song_id(&self) -> &str {
        &self.song_id
    }
}

/// What happened to a recommendation request.
#[derive(Debug)]
pub enum FetchOutcome {
    /// No request was needed.
    Skipped,
    /// The result replaced the recommended list.
    Applied {
        /// Number of songs received (before trimming for display).
        count: usize,
    },
    /// A newer request was issued meanwhile; the result was dropped.
    Stale,
    /// The request failed; the previous list is kept.
    Failed(FeedError),
}

impl FetchOutcome {
    /// Whether the recommended list was replaced.
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied { .. })
    }
}

/// A titled, ordered list of songs.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Section heading.
    pub title: String,
    /// Songs in source order.
    pub items: Vec<Song>,
    /// Display `items` back to front.
    pub reverse: bool,
}

impl Section {
    /// Create a section.
    pub fn new<S: Into<String>>(title: S, items: Vec<Song>, reverse: bool) -> Self {
        Self {
            title: title.into(),
            items,
            reverse,
        }
    }

    /// Items in the order they are shown.
    pub fn display_items(&self) -> Vec<&Song> {
        let mut items: Vec<&Song> = self.items.iter().collect();
        if self.reverse {
            items.reverse();
        }
        items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the section has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if self.is_empty() {
            return writeln!(f, "  (nothing yet)");
        }
        for (i, song) in self.display_items().into_iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, song.display_name())?;
        }
        Ok(())
    }
}

/// The rendered home screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Home {
    /// Play history, newest first.
    pub recently_played: Section,
    /// Up to [`MAX_RECOMMENDATIONS`] recommendations.
    pub made_for_you: Section,
}

impl fmt::Display for Home {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.recently_played)?;
        writeln!(f)?;
        write!(f, "{}", self.made_for_you)
    }
}

/// Recommendation state keyed by the current song.
#[derive(Debug, Default)]
pub struct RecommendationView {
    recommended: Vec<Song>,
    observed_id: Option<String>,
    /// Last token handed out; 0 before the first request.
    issued: u64,
    last_error: Option<String>,
}

impl RecommendationView {
    /// Create a view with an empty recommended list.
    pub fn new() -> Self {
        Self::default()
    }

    /// React to the current song (on mount or after a change).
    ///
    /// Returns a ticket when a request should be made: the song has a
    /// non-empty id that differs from the last observed one. With no song
    /// selected nothing is requested and the list is kept, but the observed
    /// id is forgotten so reselecting the same song fetches again.
    pub fn observe(&mut self, current: Option<&Song>) -> Option<FetchTicket> {
        let next = current.and_then(Song::key);
        if !should_fetch(self.observed_id.as_deref(), next) {
            if next.is_none() {
                self.observed_id = None;
            }
            return None;
        }

        let id = next?.to_string();
        self.observed_id = Some(id.clone());
        Some(self.issue(id))
    }

    /// Request again for the last observed song, e.g. after a failure.
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        let id = self.observed_id.clone()?;
        Some(self.issue(id))
    }

    fn issue(&mut self, song_id: String) -> FetchTicket {
        self.issued += 1;
        debug!("Issuing recommendation request #{} for {}", self.issued, song_id);
        FetchTicket {
            token: self.issued,
            song_id,
        }
    }

    /// Apply the result of the request `ticket` was issued for.
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Vec<Song>>) -> FetchOutcome {
        if ticket.token != self.issued {
            debug!(
                "Dropping result of request #{} for {} (latest is #{})",
                ticket.token, ticket.song_id, self.issued
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(songs) => {
                let count = songs.len();
                self.recommended = songs;
                self.last_error = None;
                FetchOutcome::Applied { count }
            }
            Err(e) => {
                warn!("Could not load recommendations for {}: {}", ticket.song_id, e);
                self.last_error = Some(e.to_string());
                FetchOutcome::Failed(e)
            }
        }
    }

    /// Full list from the last accepted response.
    pub fn recommended(&self) -> &[Song] {
        &self.recommended
    }

    /// Recommendations as shown: at most [`MAX_RECOMMENDATIONS`].
    pub fn made_for_you(&self) -> &[Song] {
        let end = self.recommended.len().min(MAX_RECOMMENDATIONS);
        &self.recommended[..end]
    }

    /// Song id the current list was requested for, if one is selected.
    pub fn observed_id(&self) -> Option<&str> {
        self.observed_id.as_deref()
    }

    /// Message of the last failed request, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Build both sections from the play history and current state.
    pub fn render(&self, songs: &[Song]) -> Home {
        Home {
            recently_played: Section::new(RECENTLY_PLAYED_TITLE, songs.to_vec(), true),
            made_for_you: Section::new(MADE_FOR_YOU_TITLE, self.made_for_you().to_vec(), false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn songs(ids: &[&str]) -> Vec<Song> {
        ids.iter().map(|id| Song::new(*id, *id, "")).collect()
    }

    fn ids(items: &[&Song]) -> Vec<String> {
        items.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_should_fetch() {
        assert!(should_fetch(None, Some("1")));
        assert!(should_fetch(Some("1"), Some("2")));
        assert!(!should_fetch(Some("1"), Some("1")));
        assert!(!should_fetch(Some("1"), None));
        assert!(!should_fetch(None, None));
        assert!(!should_fetch(None, Some("")));
    }

    #[test]
    fn test_recently_played_is_history_reversed() {
        let view = RecommendationView::new();
        let history = songs(&["1", "2", "3", "4"]);

        let home = view.render(&history);

        assert_eq!(home.recently_played.title, RECENTLY_PLAYED_TITLE);
        assert!(home.recently_played.reverse);
        assert_eq!(home.recently_played.len(), 4);
        assert_eq!(
            ids(&home.recently_played.display_items()),
            vec!["4", "3", "2", "1"]
        );
    }

    #[test]
    fn test_no_song_issues_nothing() {
        let mut view = RecommendationView::new();
        assert!(view.observe(None).is_none());
        assert!(view.observe(Some(&Song::new("", "Untitled", ""))).is_none());
        assert!(view.recommended().is_empty());
        assert!(view.render(&[]).made_for_you.is_empty());
    }

    #[test]
    fn test_deselect_keeps_list() {
        let mut view = RecommendationView::new();
        let ticket = view.observe(Some(&Song::new("42", "", ""))).unwrap();
        view.complete(ticket, Ok(songs(&["a", "b"])));

        assert!(view.observe(None).is_none());
        assert_eq!(view.recommended().len(), 2);
        assert_eq!(view.observed_id(), None);
    }

    #[test]
    fn test_observe_issues_one_ticket_per_id() {
        let mut view = RecommendationView::new();
        let song = Song::new("42", "", "");

        let ticket = view.observe(Some(&song)).unwrap();
        assert_eq!(ticket.song_id(), "42");
        assert!(view.observe(Some(&song)).is_none());
        assert_eq!(view.observed_id(), Some("42"));
    }

    #[test]
    fn test_reselect_after_deselect_fetches_again() {
        let mut view = RecommendationView::new();
        let song = Song::new("42", "", "");

        assert!(view.observe(Some(&song)).is_some());
        assert!(view.observe(None).is_none());
        assert!(view.observe(Some(&song)).is_some());
    }

    #[test]
    fn test_made_for_you_takes_first_seven() {
        let mut view = RecommendationView::new();
        let ticket = view.observe(Some(&Song::new("42", "", ""))).unwrap();

        let outcome = view.complete(ticket, Ok(songs(&["a", "b", "c", "d", "e", "f", "g", "h"])));

        assert!(matches!(outcome, FetchOutcome::Applied { count: 8 }));
        let home = view.render(&[]);
        assert_eq!(home.made_for_you.title, MADE_FOR_YOU_TITLE);
        assert!(!home.made_for_you.reverse);
        assert_eq!(
            ids(&home.made_for_you.display_items()),
            vec!["a", "b", "c", "d", "e", "f", "g"]
        );
        assert_eq!(view.recommended().len(), 8);
    }

    #[test]
    fn test_short_list_is_not_padded() {
        let mut view = RecommendationView::new();
        let ticket = view.observe(Some(&Song::new("42", "", ""))).unwrap();
        view.complete(ticket, Ok(songs(&["a", "b"])));

        assert_eq!(ids(&view.render(&[]).made_for_you.display_items()), vec!["a", "b"]);
    }

    #[test]
    fn test_failure_keeps_previous_list() {
        let mut view = RecommendationView::new();
        let ticket = view.observe(Some(&Song::new("1", "", ""))).unwrap();
        view.complete(ticket, Ok(songs(&["a"])));

        let ticket = view.observe(Some(&Song::new("2", "", ""))).unwrap();
        let outcome = view.complete(
            ticket,
            Err(FeedError::Status {
                status: 502,
                url: "http://x/api/recommend/2".to_string(),
            }),
        );

        assert!(matches!(outcome, FetchOutcome::Failed(FeedError::Status { status: 502, .. })));
        assert_eq!(ids(&view.made_for_you().iter().collect::<Vec<_>>()), vec!["a"]);
        assert!(view.last_error().unwrap().contains("502"));
    }

    #[test]
    fn test_success_clears_error() {
        let mut view = RecommendationView::new();
        let ticket = view.observe(Some(&Song::new("1", "", ""))).unwrap();
        view.complete(ticket, Err(FeedError::InvalidUrl("x".to_string())));
        assert!(view.last_error().is_some());

        let ticket = view.refresh().unwrap();
        assert_eq!(ticket.song_id(), "1");
        assert!(view.complete(ticket, Ok(songs(&["a"]))).is_applied());
        assert!(view.last_error().is_none());
    }

    #[test]
    fn test_newer_request_wins_regardless_of_arrival() {
        let mut view = RecommendationView::new();
        let first = view.observe(Some(&Song::new("A", "", ""))).unwrap();
        let second = view.observe(Some(&Song::new("B", "", ""))).unwrap();
        assert!(second.token() > first.token());

        // B arrives first, then the older A response.
        assert!(view.complete(second, Ok(songs(&["b1"]))).is_applied());
        assert!(matches!(view.complete(first, Ok(songs(&["a1"]))), FetchOutcome::Stale));

        assert_eq!(view.recommended(), songs(&["b1"]).as_slice());
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut view = RecommendationView::new();
        let first = view.observe(Some(&Song::new("A", "", ""))).unwrap();
        let _second = view.observe(Some(&Song::new("B", "", ""))).unwrap();

        let outcome = view.complete(first, Err(FeedError::InvalidUrl("x".to_string())));

        assert!(matches!(outcome, FetchOutcome::Stale));
        assert!(view.last_error().is_none());
    }

    #[test]
    fn test_same_id_refresh_is_idempotent() {
        let mut view = RecommendationView::new();
        let first = view.observe(Some(&Song::new("42", "", ""))).unwrap();
        view.complete(first, Ok(songs(&["a", "b"])));
        let before = view.render(&[]);

        let again = view.refresh().unwrap();
        view.complete(again, Ok(songs(&["a", "b"])));

        assert_eq!(view.render(&[]), before);
    }

    #[test]
    fn test_section_display() {
        let section = Section::new("Recently Played", vec![Song::new("1", "One", "A")], true);
        assert_eq!(section.to_string(), "Recently Played\n  1. One - A\n");

        let empty = Section::new("Made for you", Vec::new(), false);
        assert_eq!(empty.to_string(), "Made for you\n  (nothing yet)\n");
    }
}
