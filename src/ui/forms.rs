//! Form state for the modal dialogs. Each form owns raw text buffers plus
//! focus tracking; `parse_inputs` is the single place raw input becomes a
//! typed value ready for the store.

use anyhow::{anyhow, Context, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Song;

/// Enumerates the fields within the song form to drive focus management.
/// The order here is the Tab order and the on-screen row order.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum SongField {
    Title,
    Artist,
    Album,
    Genre,
    Length,
    Filename,
}

impl SongField {
    pub(crate) const ALL: [SongField; 6] = [
        SongField::Title,
        SongField::Artist,
        SongField::Album,
        SongField::Genre,
        SongField::Length,
        SongField::Filename,
    ];

    pub(crate) fn label(self) -> &'static str {
        match self {
            SongField::Title => "Title",
            SongField::Artist => "Artist",
            SongField::Album => "Album",
            SongField::Genre => "Genre",
            SongField::Length => "Length",
            SongField::Filename => "Filename",
        }
    }

    /// Position of the field within the form, used for cursor placement.
    pub(crate) fn row(self) -> usize {
        SongField::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }
}

impl Default for SongField {
    fn default() -> Self {
        SongField::Title
    }
}

/// Form state for song creation/editing.
#[derive(Default, Clone)]
pub(crate) struct SongForm {
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) album: String,
    pub(crate) genre: String,
    pub(crate) length: String,
    pub(crate) filename: String,
    pub(crate) active: SongField,
    pub(crate) error: Option<String>,
}

impl SongForm {
    /// Populate the form from an existing song when entering edit mode.
    pub(crate) fn from_song(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.artist.clone(),
            album: song.album.clone(),
            genre: song.genre.clone(),
            length: song.length.clone(),
            filename: song.filename.clone(),
            active: SongField::Title,
            error: None,
        }
    }

    fn value(&self, field: SongField) -> &String {
        match field {
            SongField::Title => &self.title,
            SongField::Artist => &self.artist,
            SongField::Album => &self.album,
            SongField::Genre => &self.genre,
            SongField::Length => &self.length,
            SongField::Filename => &self.filename,
        }
    }

    fn value_mut(&mut self, field: SongField) -> &mut String {
        match field {
            SongField::Title => &mut self.title,
            SongField::Artist => &mut self.artist,
            SongField::Album => &mut self.album,
            SongField::Genre => &mut self.genre,
            SongField::Length => &mut self.length,
            SongField::Filename => &mut self.filename,
        }
    }

    /// Move focus to the next field in Tab order, wrapping around.
    pub(crate) fn next_field(&mut self) {
        let index = self.active.row();
        self.active = SongField::ALL[(index + 1) % SongField::ALL.len()];
    }

    /// Move focus to the previous field, wrapping around.
    pub(crate) fn previous_field(&mut self) {
        let index = self.active.row();
        self.active = SongField::ALL[(index + SongField::ALL.len() - 1) % SongField::ALL.len()];
    }

    /// Append a character to the active field. Control characters are
    /// dropped so stray escape sequences cannot end up in the catalog.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value_mut(self.active).push(ch);
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
    }

    /// Validate the inputs and return a song ready for the store. The id is
    /// left at zero: `add_song` assigns its own and `update_song` never
    /// touches the id anyway.
    pub(crate) fn parse_inputs(&self) -> Result<Song> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(anyhow!("Title is required."));
        }
        Ok(Song {
            id: 0,
            title: title.to_string(),
            artist: self.artist.trim().to_string(),
            album: self.album.trim().to_string(),
            genre: self.genre.trim().to_string(),
            length: self.length.trim().to_string(),
            filename: self.filename.trim().to_string(),
        })
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: SongField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() && field == SongField::Title {
            "<required>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Character count of the active field, for cursor placement.
    pub(crate) fn active_len(&self) -> usize {
        self.value(self.active).chars().count()
    }
}

/// Tiny form collecting the target playlist number when assigning a song.
#[derive(Default, Clone)]
pub(crate) struct PlaylistForm {
    pub(crate) song_id: i64,
    pub(crate) number: String,
    pub(crate) error: Option<String>,
}

impl PlaylistForm {
    pub(crate) fn for_song(song_id: i64) -> Self {
        Self {
            song_id,
            ..Self::default()
        }
    }

    /// Append a character, accepting digits only.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_ascii_digit() {
            self.number.push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.number.pop();
    }

    /// Validate and return the playlist id.
    pub(crate) fn parse_inputs(&self) -> Result<i64> {
        let raw = self.number.trim();
        if raw.is_empty() {
            return Err(anyhow!("Playlist number is required."));
        }
        let number = raw
            .parse::<i64>()
            .context("Playlist number must be an integer.")?;
        if number < 1 {
            return Err(anyhow!("Playlist number must be positive."));
        }
        Ok(number)
    }
}

/// Confirmation state for the destructive song delete.
#[derive(Clone)]
pub(crate) struct ConfirmSongDelete {
    pub(crate) song: Song,
}

impl ConfirmSongDelete {
    pub(crate) fn from(song: Song) -> Self {
        Self { song }
    }
}
