//! Schema document handling. The schema file declares the record shapes the
//! instance file must conform to; it is read once at startup and is read-only
//! at runtime. The loader checks every instance row against these
//! declarations before anything reaches the catalog.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::error::LoadError;

/// Table name holding song records.
pub(crate) const SONG_TABLE: &str = "song";
/// Table name holding playlist membership rows.
pub(crate) const MEMBERSHIP_TABLE: &str = "playlist_song";

/// Column value types the store understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Text,
}

impl ColumnKind {
    fn describe(self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Text => "text",
        }
    }
}

/// One declared column, optionally referencing a key column elsewhere
/// (`"song.id"` style).
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub kind: ColumnKind,
    #[serde(default)]
    pub references: Option<String>,
}

/// One declared table with an optional primary key column.
#[derive(Debug, Clone, Deserialize)]
pub struct TableSchema {
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// The parsed schema document.
#[derive(Debug, Clone, Deserialize)]
pub struct Schema {
    pub tables: Vec<TableSchema>,
}

impl Schema {
    /// Read and validate a schema file. Fails with `MissingFile` when the
    /// path does not exist and `MalformedSchema` for anything unparseable or
    /// internally inconsistent.
    pub fn from_file(path: &Path) -> Result<Schema, LoadError> {
        if !path.exists() {
            return Err(LoadError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path).map_err(|err| LoadError::MalformedSchema {
            reason: format!("could not read {}: {err}", path.display()),
        })?;
        Schema::parse(&text)
    }

    /// Parse a schema document from text and run the structural checks.
    pub fn parse(text: &str) -> Result<Schema, LoadError> {
        let schema: Schema =
            serde_json::from_str(text).map_err(|err| LoadError::MalformedSchema {
                reason: err.to_string(),
            })?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|table| table.name == name)
    }

    /// Structural validation: unique table and column names, key columns
    /// that actually exist, and `references` targets that resolve to the key
    /// column of a declared table.
    fn validate(&self) -> Result<(), LoadError> {
        for (index, table) in self.tables.iter().enumerate() {
            if self.tables[..index].iter().any(|t| t.name == table.name) {
                return Err(malformed(format!("duplicate table \"{}\"", table.name)));
            }
            if table.columns.is_empty() {
                return Err(malformed(format!("table \"{}\" has no columns", table.name)));
            }
            for (col_index, column) in table.columns.iter().enumerate() {
                if table.columns[..col_index].iter().any(|c| c.name == column.name) {
                    return Err(malformed(format!(
                        "duplicate column \"{}\" in table \"{}\"",
                        column.name, table.name
                    )));
                }
            }
            if let Some(key) = &table.key {
                match table.column(key) {
                    Some(column) if column.kind == ColumnKind::Integer => {}
                    Some(_) => {
                        return Err(malformed(format!(
                            "key column \"{key}\" of table \"{}\" must be an integer",
                            table.name
                        )));
                    }
                    None => {
                        return Err(malformed(format!(
                            "table \"{}\" declares missing key column \"{key}\"",
                            table.name
                        )));
                    }
                }
            }
            for column in &table.columns {
                if let Some(target) = &column.references {
                    self.resolve_reference(target)?;
                }
            }
        }
        Ok(())
    }

    /// Check a `"table.column"` reference target names the key column of a
    /// declared table.
    fn resolve_reference(&self, target: &str) -> Result<(), LoadError> {
        let (table_name, column_name) = target
            .split_once('.')
            .ok_or_else(|| malformed(format!("reference \"{target}\" is not table.column")))?;
        let table = self
            .table(table_name)
            .ok_or_else(|| malformed(format!("reference \"{target}\" names unknown table")))?;
        if table.key.as_deref() != Some(column_name) {
            return Err(malformed(format!(
                "reference \"{target}\" must target the key column of \"{table_name}\""
            )));
        }
        Ok(())
    }

    /// Verify the document declares the song and playlist_song shapes the
    /// loader knows how to materialize, returning both table declarations.
    /// The loader calls this before looking at any instance data.
    pub(crate) fn expect_catalog_shape(
        &self,
    ) -> Result<(&TableSchema, &TableSchema), LoadError> {
        let song = self
            .table(SONG_TABLE)
            .ok_or_else(|| malformed(format!("no \"{SONG_TABLE}\" table declared")))?;
        if song.key.as_deref() != Some("id") {
            return Err(malformed(format!(
                "table \"{SONG_TABLE}\" must be keyed on \"id\""
            )));
        }
        expect_column(song, "id", ColumnKind::Integer)?;
        for name in ["title", "artist", "album", "genre", "length", "filename"] {
            expect_column(song, name, ColumnKind::Text)?;
        }

        let membership = self
            .table(MEMBERSHIP_TABLE)
            .ok_or_else(|| malformed(format!("no \"{MEMBERSHIP_TABLE}\" table declared")))?;
        expect_column(membership, "playlist_id", ColumnKind::Integer)?;
        let song_id = expect_column(membership, "song_id", ColumnKind::Integer)?;
        if song_id.references.as_deref() != Some("song.id") {
            return Err(malformed(
                "column \"song_id\" must reference \"song.id\"".to_string(),
            ));
        }
        Ok((song, membership))
    }
}

fn expect_column<'a>(
    table: &'a TableSchema,
    name: &str,
    kind: ColumnKind,
) -> Result<&'a ColumnSchema, LoadError> {
    let column = table.column(name).ok_or_else(|| {
        malformed(format!(
            "table \"{}\" is missing column \"{name}\"",
            table.name
        ))
    })?;
    if column.kind != kind {
        return Err(malformed(format!(
            "column \"{name}\" of table \"{}\" must be {}",
            table.name,
            kind.describe()
        )));
    }
    Ok(column)
}

fn malformed(reason: String) -> LoadError {
    LoadError::MalformedSchema { reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::files::DEFAULT_SCHEMA;

    #[test]
    fn default_schema_parses_and_has_expected_shape() {
        let schema = Schema::parse(DEFAULT_SCHEMA).unwrap();
        schema.expect_catalog_shape().unwrap();
        assert_eq!(schema.tables.len(), 2);
    }

    #[test]
    fn rejects_key_column_that_does_not_exist() {
        let text = r#"{"tables":[{"name":"song","key":"missing","columns":[
            {"name":"id","kind":"integer"}]}]}"#;
        let err = Schema::parse(text).unwrap_err();
        assert!(matches!(err, LoadError::MalformedSchema { .. }));
    }

    #[test]
    fn rejects_reference_to_non_key_column() {
        let text = r#"{"tables":[
            {"name":"song","key":"id","columns":[
                {"name":"id","kind":"integer"},{"name":"title","kind":"text"}]},
            {"name":"link","columns":[
                {"name":"song_id","kind":"integer","references":"song.title"}]}]}"#;
        let err = Schema::parse(text).unwrap_err();
        assert!(matches!(err, LoadError::MalformedSchema { .. }));
    }
}
