//! Domain models shared by the record store and the TUI. The intent is that
//! these types stay light-weight data holders so other layers can focus on
//! presentation and persistence logic.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// In-memory representation of a catalog entry. The struct mirrors rows in
/// the `song` table of the instance file.
pub struct Song {
    /// Primary key assigned by the store. Callers never choose this value;
    /// `Library::add_song` ignores whatever is set here and stamps the next
    /// free id before insertion.
    pub id: i64,
    /// Title displayed in lists and detail views.
    pub title: String,
    /// Performing artist.
    pub artist: String,
    /// Album the track belongs to.
    pub album: String,
    /// Free-text genre tag.
    pub genre: String,
    /// Track duration kept as free text ("3:40", "123") exactly as entered.
    pub length: String,
    /// Path or URI of the media file this entry points at.
    pub filename: String,
}

impl Song {
    /// Compose a `Title - Artist` string that gracefully omits the hyphen if
    /// the artist is blank. List views rely on this ready-to-use formatting.
    pub fn display_label(&self) -> String {
        if self.artist.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }
}

impl fmt::Display for Song {
    /// Write the display label to any formatter so the type plays nicely
    /// with Ratatui widgets that consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// One row of the `playlist_song` join table: song `song_id` belongs to
/// playlist `playlist_id`. There is no identity beyond the pair, and
/// `song_id` must reference a live song whenever the catalog is consistent.
pub struct PlaylistMembership {
    pub playlist_id: i64,
    pub song_id: i64,
}
