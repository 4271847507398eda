//! Per-screen view state. Screens hold snapshots of store data plus the
//! current selection; the `App` refreshes them after every mutation so the
//! lists always reflect the live catalog.

use crate::models::Song;
use crate::store::Library;

/// State for the main song browser: the full catalog in id order plus the
/// highlighted row.
pub(crate) struct SongListScreen {
    pub(crate) songs: Vec<Song>,
    pub(crate) selected: usize,
}

impl SongListScreen {
    pub(crate) fn new(songs: Vec<Song>) -> Self {
        let mut screen = Self { songs, selected: 0 };
        screen.ensure_in_bounds();
        screen
    }

    /// Replace the snapshot after a store mutation, keeping the selection
    /// in bounds.
    pub(crate) fn set_songs(&mut self, songs: Vec<Song>) {
        self.songs = songs;
        self.ensure_in_bounds();
    }

    /// Re-select the row holding `id`, falling back to the clamped current
    /// selection when the id is gone.
    pub(crate) fn focus_id(&mut self, id: i64) {
        if let Some(index) = self.songs.iter().position(|song| song.id == id) {
            self.selected = index;
        }
        self.ensure_in_bounds();
    }

    pub(crate) fn current_song(&self) -> Option<&Song> {
        self.songs.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.songs.is_empty() {
            return;
        }
        let len = self.songs.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        if !self.songs.is_empty() {
            self.selected = self.songs.len() - 1;
        }
    }

    pub(crate) fn ensure_in_bounds(&mut self) {
        if self.songs.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.songs.len() {
            self.selected = self.songs.len() - 1;
        }
    }
}

/// State for the playlists screen: one column of playlist numbers, one of
/// that playlist's member songs.
pub(crate) struct PlaylistScreen {
    pub(crate) playlists: Vec<i64>,
    pub(crate) selected_playlist: usize,
    pub(crate) songs: Vec<Song>,
    pub(crate) selected_song: usize,
}

impl PlaylistScreen {
    pub(crate) fn load(library: &Library) -> Self {
        let mut screen = Self {
            playlists: library.playlist_ids(),
            selected_playlist: 0,
            songs: Vec::new(),
            selected_song: 0,
        };
        screen.refresh_songs(library);
        screen
    }

    /// Rebuild both columns from the store, keeping the selected playlist
    /// when it still exists.
    pub(crate) fn refresh(&mut self, library: &Library) {
        let current = self.current_playlist();
        self.playlists = library.playlist_ids();
        if let Some(id) = current {
            if let Some(index) = self.playlists.iter().position(|p| *p == id) {
                self.selected_playlist = index;
            }
        }
        if self.selected_playlist >= self.playlists.len() {
            self.selected_playlist = self.playlists.len().saturating_sub(1);
        }
        self.refresh_songs(library);
    }

    fn refresh_songs(&mut self, library: &Library) {
        self.songs = match self.current_playlist() {
            Some(playlist_id) => library.songs_in_playlist(playlist_id),
            None => Vec::new(),
        };
        if self.selected_song >= self.songs.len() {
            self.selected_song = self.songs.len().saturating_sub(1);
        }
    }

    pub(crate) fn current_playlist(&self) -> Option<i64> {
        self.playlists.get(self.selected_playlist).copied()
    }

    pub(crate) fn current_song(&self) -> Option<&Song> {
        self.songs.get(self.selected_song)
    }

    /// Step through playlists; the song column follows the selection.
    pub(crate) fn move_playlist(&mut self, library: &Library, offset: isize) {
        if self.playlists.is_empty() {
            return;
        }
        let len = self.playlists.len() as isize;
        let new = (self.selected_playlist as isize + offset).clamp(0, len - 1);
        if new as usize != self.selected_playlist {
            self.selected_playlist = new as usize;
            self.selected_song = 0;
            self.refresh_songs(library);
        }
    }

    pub(crate) fn move_song(&mut self, offset: isize) {
        if self.songs.is_empty() {
            return;
        }
        let len = self.songs.len() as isize;
        let new = (self.selected_song as isize + offset).clamp(0, len - 1);
        self.selected_song = new as usize;
    }
}

/// State for the diagnostics screen rendering the `dump_all` walk.
pub(crate) struct TablesScreen {
    pub(crate) lines: Vec<String>,
    pub(crate) offset: usize,
}

impl TablesScreen {
    pub(crate) fn load(library: &Library) -> Self {
        Self {
            lines: library.dump_all().map(|entry| entry.to_string()).collect(),
            offset: 0,
        }
    }

    pub(crate) fn scroll(&mut self, offset: isize) {
        let max_offset = self.lines.len().saturating_sub(1);
        let new = (self.offset as isize + offset).clamp(0, max_offset as isize);
        self.offset = new as usize;
    }
}
