//! Binary entry point that glues the backend client and system clipboard to
//! the TUI: load configuration, build the HTTP client, hydrate the initial
//! preview, and drive the Ratatui event loop until the user exits.

use suno_prompt_builder::{load_config, run_app, App, PromptClient, SystemClipboard};

/// Returning a `Result` bubbles fatal initialization problems up to the
/// terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let config = load_config();
    let client = PromptClient::new(&config);

    let mut app = App::new(Box::new(client), Box::new(SystemClipboard::default()))?;
    run_app(&mut app)
}
