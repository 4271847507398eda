//! Record-store module split across logical submodules.

mod catalog;
mod error;
mod files;
mod library;
mod loader;
mod schema;

pub use error::{LoadError, SaveError};
pub use files::{ensure_store_files, ensure_store_files_in};
pub use library::{DumpEntry, Library};
pub use schema::{ColumnKind, ColumnSchema, Schema, TableSchema};
