//! The record store. `Library` owns the catalog loaded at construction time
//! and is the only code path that mutates it. Every function encapsulates
//! one operation so the UI can stay focused on presentation state. Lookups
//! are absent-or-boolean, mutations either fully apply (including the delete
//! cascade) or change nothing, and `save` rewrites the instance file whole.

use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::models::{PlaylistMembership, Song};

use super::catalog::Catalog;
use super::error::{LoadError, SaveError};
use super::loader;
use super::schema::{MEMBERSHIP_TABLE, SONG_TABLE};

/// On-disk form of the catalog. Field names double as the table names the
/// loader validates against the schema.
#[derive(Serialize)]
struct PersistedCatalog<'a> {
    next_id: i64,
    song: Vec<&'a Song>,
    playlist_song: &'a [PlaylistMembership],
}

pub struct Library {
    catalog: Catalog,
}

impl Library {
    /// Load the catalog from the schema/instance pair and wrap it in a
    /// store. Fails with the loader's `LoadError` when either file is
    /// absent or inconsistent; there is no half-constructed store.
    pub fn open(schema_path: &Path, data_path: &Path) -> Result<Library, LoadError> {
        let catalog = loader::load(schema_path, data_path)?;
        Ok(Library { catalog })
    }

    /// All song ids in ascending numeric order as decimal strings.
    /// Recomputed from the live catalog on every call.
    pub fn song_ids(&self) -> Vec<String> {
        self.catalog.songs().map(|song| song.id.to_string()).collect()
    }

    pub fn song_count(&self) -> usize {
        self.catalog.song_count()
    }

    /// Clones of every song in ascending id order. List views snapshot this
    /// instead of holding references into the live catalog.
    pub fn songs(&self) -> Vec<Song> {
        self.catalog.songs().cloned().collect()
    }

    /// Insert a song under a freshly assigned id, ignoring whatever id the
    /// caller put on the input record. Returns the assigned id. The counter
    /// only moves forward, so ids never repeat even after deletions.
    pub fn add_song(&mut self, mut song: Song) -> i64 {
        let id = self.catalog.allocate_id();
        song.id = id;
        self.catalog.insert_song(song);
        id
    }

    /// Clone of the song at `id`, or `None` when no such song exists. Any
    /// integer is acceptable input; absence is the only not-found signal.
    pub fn get_song(&self, id: i64) -> Option<Song> {
        self.catalog.song(id).cloned()
    }

    /// Overwrite every field except `id` of the song at `id` with the
    /// replacement's fields. Returns `false` without touching anything when
    /// the id does not currently exist; a previously deleted id counts as
    /// nonexistent even though it lies inside the historical range.
    pub fn update_song(&mut self, id: i64, replacement: &Song) -> bool {
        match self.catalog.song_mut(id) {
            Some(song) => {
                song.title = replacement.title.clone();
                song.artist = replacement.artist.clone();
                song.album = replacement.album.clone();
                song.genre = replacement.genre.clone();
                song.length = replacement.length.clone();
                song.filename = replacement.filename.clone();
                true
            }
            None => false,
        }
    }

    /// Remove the song at `id` together with every playlist membership that
    /// references it. Returns `true` iff a song was removed.
    pub fn delete_song(&mut self, id: i64) -> bool {
        self.catalog.remove_song(id)
    }

    /// Record that `song_id` belongs to `playlist_id`. Refused (returns
    /// `false`, no mutation) when the song does not exist, so a membership
    /// can never be created dangling. Re-adding an existing pair is a no-op
    /// that reports success.
    pub fn add_song_to_playlist(&mut self, playlist_id: i64, song_id: i64) -> bool {
        if self.catalog.song(song_id).is_none() {
            return false;
        }
        if !self.catalog.has_membership(playlist_id, song_id) {
            self.catalog.push_membership(PlaylistMembership {
                playlist_id,
                song_id,
            });
        }
        true
    }

    /// Drop one membership pair; `false` when no such pair exists.
    pub fn remove_song_from_playlist(&mut self, playlist_id: i64, song_id: i64) -> bool {
        self.catalog.remove_membership(playlist_id, song_id)
    }

    /// Distinct playlist ids in ascending order.
    pub fn playlist_ids(&self) -> Vec<i64> {
        let ids: BTreeSet<i64> = self
            .catalog
            .memberships()
            .iter()
            .map(|membership| membership.playlist_id)
            .collect();
        ids.into_iter().collect()
    }

    /// Clones of the member songs of a playlist in ascending id order.
    pub fn songs_in_playlist(&self, playlist_id: i64) -> Vec<Song> {
        let ids: BTreeSet<i64> = self
            .catalog
            .memberships()
            .iter()
            .filter(|membership| membership.playlist_id == playlist_id)
            .map(|membership| membership.song_id)
            .collect();
        ids.iter()
            .filter_map(|id| self.catalog.song(*id).cloned())
            .collect()
    }

    /// Copies of all membership rows, mostly for diagnostics and tests.
    pub fn memberships(&self) -> Vec<PlaylistMembership> {
        self.catalog.memberships().to_vec()
    }

    pub fn membership_count(&self) -> usize {
        self.catalog.memberships().len()
    }

    /// Serialize the full catalog to `destination`, fully overwriting any
    /// prior content. The persisted document carries the autoincrement
    /// counter so freed ids stay retired across reload cycles. On failure
    /// the in-memory catalog is untouched and the save may be retried.
    pub fn save(&self, destination: &Path) -> Result<(), SaveError> {
        let persisted = PersistedCatalog {
            next_id: self.catalog.next_id(),
            song: self.catalog.songs().collect(),
            playlist_song: self.catalog.memberships(),
        };
        let text = serde_json::to_string_pretty(&persisted)
            .map_err(|source| SaveError::Serialize { source })?;

        let io_error = |source| SaveError::Io {
            path: destination.to_path_buf(),
            source,
        };
        let mut file = File::create(destination).map_err(io_error)?;
        file.write_all(text.as_bytes()).map_err(io_error)?;
        Ok(())
    }

    /// Lazy, human-readable walk over both tables for diagnostic display:
    /// one entry per field, in table order, row order, field order. Purely
    /// observational.
    pub fn dump_all(&self) -> impl Iterator<Item = DumpEntry> + '_ {
        let songs = self.catalog.songs().enumerate().flat_map(|(row, song)| {
            [
                ("id", song.id.to_string()),
                ("title", song.title.clone()),
                ("artist", song.artist.clone()),
                ("album", song.album.clone()),
                ("genre", song.genre.clone()),
                ("length", song.length.clone()),
                ("filename", song.filename.clone()),
            ]
            .into_iter()
            .map(move |(field, value)| DumpEntry {
                table: SONG_TABLE,
                row,
                field,
                value,
            })
        });

        let memberships = self
            .catalog
            .memberships()
            .iter()
            .enumerate()
            .flat_map(|(row, membership)| {
                [
                    ("playlist_id", membership.playlist_id.to_string()),
                    ("song_id", membership.song_id.to_string()),
                ]
                .into_iter()
                .map(move |(field, value)| DumpEntry {
                    table: MEMBERSHIP_TABLE,
                    row,
                    field,
                    value,
                })
            });

        songs.chain(memberships)
    }
}

/// One `table[row] field=value` line produced by `Library::dump_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpEntry {
    pub table: &'static str,
    pub row: usize,
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for DumpEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] {}={}", self.table, self.row, self.field, self.value)
    }
}
