//! Player context the home feed reads from.

use crate::models::Song;

/// Read-only view of the player: the selected song and the play history.
pub trait SongContext {
    /// Song currently selected or playing, if any.
    fn current_song(&self) -> Option<&Song>;

    /// Songs already played, oldest first.
    fn songs(&self) -> &[Song];
}

/// Owned player state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    current: Option<Song>,
    history: Vec<Song>,
}

impl PlayerState {
    /// Create an empty state with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state from an existing play history, nothing selected.
    pub fn with_history(history: Vec<Song>) -> Self {
        Self {
            current: None,
            history,
        }
    }

    /// Select `song` and record it as played.
    pub fn play(&mut self, song: Song) {
        self.history.push(song.clone());
        self.current = Some(song);
    }

    /// Select a song without touching the history.
    pub fn select(&mut self, song: Option<Song>) {
        self.current = song;
    }

    /// Deselect the current song.
    pub fn clear_current(&mut self) {
        self.current = None;
    }
}

impl SongContext for PlayerState {
    fn current_song(&self) -> Option<&Song> {
        self.current.as_ref()
    }

    fn songs(&self) -> &[Song] {
        &self.history
    }
}
