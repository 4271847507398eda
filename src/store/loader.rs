//! Schema/instance loader. Reads the schema document, then the instance
//! file, checks every row field-by-field against the declared columns, and
//! only then builds the typed catalog. Anything inconsistent is rejected up
//! front; a catalog that loads successfully satisfies all store invariants.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::models::{PlaylistMembership, Song};

use super::catalog::Catalog;
use super::error::LoadError;
use super::schema::{ColumnKind, Schema, TableSchema};

/// Key in the instance document carrying the persisted autoincrement
/// counter. Optional so hand-written fixtures stay loadable; when absent the
/// counter is derived from the highest live id.
const NEXT_ID_KEY: &str = "next_id";

/// Load the catalog from a schema file and an instance file.
pub fn load(schema_path: &Path, data_path: &Path) -> Result<Catalog, LoadError> {
    let schema = Schema::from_file(schema_path)?;
    let (song_table, membership_table) = schema.expect_catalog_shape()?;

    let document = read_instance(data_path)?;

    for key in document.keys() {
        if key != NEXT_ID_KEY && schema.table(key).is_none() {
            return Err(mismatch(format!("unknown table \"{key}\" in instance data")));
        }
    }

    let next_id = match document.get(NEXT_ID_KEY) {
        None => None,
        Some(value) => Some(read_next_id(value)?),
    };

    let songs: Vec<Song> = table_rows(&document, song_table)?
        .into_iter()
        .map(song_from_row)
        .collect();

    let memberships: Vec<PlaylistMembership> = table_rows(&document, membership_table)?
        .into_iter()
        .map(membership_from_row)
        .collect();

    Catalog::from_parts(songs, memberships, next_id)
}

/// Read and parse the instance file into a JSON object.
fn read_instance(path: &Path) -> Result<Map<String, Value>, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|err| LoadError::MalformedData {
        reason: format!("could not read {}: {err}", path.display()),
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|err| LoadError::MalformedData {
        reason: err.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(LoadError::MalformedData {
            reason: format!("instance document must be an object, found {}", kind_of(&other)),
        }),
    }
}

fn read_next_id(value: &Value) -> Result<i64, LoadError> {
    let next_id = value.as_i64().ok_or_else(|| LoadError::MalformedData {
        reason: format!("\"{NEXT_ID_KEY}\" must be an integer, found {}", kind_of(value)),
    })?;
    if next_id < 1 {
        return Err(LoadError::MalformedData {
            reason: format!("\"{NEXT_ID_KEY}\" must be strictly positive, got {next_id}"),
        });
    }
    Ok(next_id)
}

/// Pull a table's row array out of the document. An absent key is an empty
/// table; a present key must hold an array of objects matching the declared
/// columns exactly.
fn table_rows<'a>(
    document: &'a Map<String, Value>,
    table: &TableSchema,
) -> Result<Vec<&'a Map<String, Value>>, LoadError> {
    let rows = match document.get(&table.name) {
        None => return Ok(Vec::new()),
        Some(Value::Array(rows)) => rows,
        Some(other) => {
            return Err(mismatch(format!(
                "table \"{}\" must be an array, found {}",
                table.name,
                kind_of(other)
            )));
        }
    };

    let mut out = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let object = row.as_object().ok_or_else(|| {
            mismatch(format!(
                "row {index} of table \"{}\" must be an object, found {}",
                table.name,
                kind_of(row)
            ))
        })?;
        check_row(table, index, object)?;
        out.push(object);
    }
    Ok(out)
}

/// Validate one row against the declared columns: every declared column
/// present with the declared type, no extra fields.
fn check_row(table: &TableSchema, index: usize, row: &Map<String, Value>) -> Result<(), LoadError> {
    for column in &table.columns {
        let value = row.get(&column.name).ok_or_else(|| {
            mismatch(format!(
                "row {index} of table \"{}\" is missing field \"{}\"",
                table.name, column.name
            ))
        })?;
        let matches = match column.kind {
            ColumnKind::Integer => value.as_i64().is_some(),
            ColumnKind::Text => value.is_string(),
        };
        if !matches {
            return Err(mismatch(format!(
                "field \"{}\" in row {index} of table \"{}\" has the wrong type ({})",
                column.name,
                table.name,
                kind_of(value)
            )));
        }
    }
    for key in row.keys() {
        if table.column(key).is_none() {
            return Err(mismatch(format!(
                "row {index} of table \"{}\" carries undeclared field \"{key}\"",
                table.name
            )));
        }
    }
    Ok(())
}

fn song_from_row(row: &Map<String, Value>) -> Song {
    Song {
        id: int_field(row, "id"),
        title: text_field(row, "title"),
        artist: text_field(row, "artist"),
        album: text_field(row, "album"),
        genre: text_field(row, "genre"),
        length: text_field(row, "length"),
        filename: text_field(row, "filename"),
    }
}

fn membership_from_row(row: &Map<String, Value>) -> PlaylistMembership {
    PlaylistMembership {
        playlist_id: int_field(row, "playlist_id"),
        song_id: int_field(row, "song_id"),
    }
}

// The two field readers run after `check_row`, so the field is present with
// the right type.
fn int_field(row: &Map<String, Value>, name: &str) -> i64 {
    row.get(name).and_then(Value::as_i64).unwrap_or_default()
}

fn text_field(row: &Map<String, Value>, name: &str) -> String {
    row.get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn mismatch(reason: String) -> LoadError {
    LoadError::SchemaDataMismatch { reason }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
