//! Ratatui front-end: form state, the central `App`, and the event loop.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

#[cfg(test)]
mod app_tests;

pub use app::App;
pub use terminal::run_app;
