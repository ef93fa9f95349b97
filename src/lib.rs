//! Core library surface for the Suno Prompt Builder terminal client. The
//! public modules stay intentionally small so the `bin` target and the tests
//! can reuse the same pieces: view-object derivation, the backend client,
//! clipboard access, and the Ratatui front-end.

pub mod client;
pub mod clipboard;
pub mod config;
pub mod models;
pub mod ui;

/// Backend client seam plus its concrete HTTP implementation.
pub use client::{ApiError, PromptApi, PromptClient};

/// Clipboard seam plus the system implementation with its fallback path.
pub use clipboard::{ClipboardSink, SystemClipboard};

/// Environment-driven configuration used by `main.rs`.
pub use config::{load_config, Config};

/// The two view objects derived from the form.
pub use models::{PromptPreview, SavePayload};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
