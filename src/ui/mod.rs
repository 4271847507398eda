//! Ratatui front-end split across logical submodules. Everything here is
//! presentation glue: handlers dispatch to the record store and surface the
//! outcome in the footer, and no store code depends on anything in this
//! module.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
