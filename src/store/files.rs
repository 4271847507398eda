//! On-disk store bootstrap. Resolves the application data directory and
//! seeds the default schema plus an empty instance file on first run, so the
//! loader always finds both files in place of a `MissingFile` failure.
//! Existing files are never touched.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".mini-player";
/// Schema file name stored inside the application data directory.
const SCHEMA_FILE_NAME: &str = "music.schema.json";
/// Instance file name stored inside the application data directory.
const DATA_FILE_NAME: &str = "music.json";

/// The schema seeded on first run: the song table keyed on `id` and the
/// playlist join table whose `song_id` references it.
pub(crate) const DEFAULT_SCHEMA: &str = r#"{
  "tables": [
    {
      "name": "song",
      "key": "id",
      "columns": [
        { "name": "id", "kind": "integer" },
        { "name": "title", "kind": "text" },
        { "name": "artist", "kind": "text" },
        { "name": "album", "kind": "text" },
        { "name": "genre", "kind": "text" },
        { "name": "length", "kind": "text" },
        { "name": "filename", "kind": "text" }
      ]
    },
    {
      "name": "playlist_song",
      "columns": [
        { "name": "playlist_id", "kind": "integer" },
        { "name": "song_id", "kind": "integer", "references": "song.id" }
      ]
    }
  ]
}
"#;

/// The instance document seeded on first run: an empty catalog with the
/// autoincrement counter parked at 1.
const EMPTY_INSTANCE: &str = r#"{
  "next_id": 1,
  "song": [],
  "playlist_song": []
}
"#;

/// Ensure the data directory and both store files exist under the user's
/// home, returning `(schema_path, data_path)` ready for `Library::open`.
pub fn ensure_store_files() -> Result<(PathBuf, PathBuf)> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    ensure_store_files_in(&base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Same as `ensure_store_files` but rooted at an explicit directory. Split
/// out so tests can seed a store under a temporary directory.
pub fn ensure_store_files_in(dir: &Path) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir).context("failed to create data directory")?;

    let schema_path = dir.join(SCHEMA_FILE_NAME);
    if !schema_path.exists() {
        fs::write(&schema_path, DEFAULT_SCHEMA).context("failed to seed schema file")?;
    }

    let data_path = dir.join(DATA_FILE_NAME);
    if !data_path.exists() {
        fs::write(&data_path, EMPTY_INSTANCE).context("failed to seed instance file")?;
    }

    Ok((schema_path, data_path))
}
