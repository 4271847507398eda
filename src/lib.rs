//! Core library surface for the Mini Player TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces.
pub mod models;
pub mod store;
pub mod ui;

/// Convenience re-exports for the record store. These are typically used by
/// `main.rs` to bring up the on-disk files and load the catalog.
pub use store::{ensure_store_files, Library, LoadError, SaveError};

/// The two primary domain types that other layers manipulate.
pub use models::{PlaylistMembership, Song};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
