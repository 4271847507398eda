//! Binary entry point that glues the file-backed catalog to the TUI. The
//! bootstrapping pipeline: make sure the schema and instance files exist,
//! load them into the record store, and drive the Ratatui event loop until
//! the user exits.
use anyhow::Context;

use mini_player::{ensure_store_files, run_app, App, Library};

/// Initialize the store files, load the catalog, and launch the event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (a corrupt
/// instance file, an unreadable home directory) to the terminal instead of
/// crashing silently.
fn main() -> anyhow::Result<()> {
    let (schema_path, data_path) = ensure_store_files()?;
    let library = Library::open(&schema_path, &data_path)
        .context("failed to load the music catalog")?;

    let mut app = App::new(library, data_path);
    run_app(&mut app)
}
