//! Blocking HTTP client for the prompt-builder backend. The `PromptApi`
//! trait is the seam the UI talks through so tests can substitute a mock for
//! the real transport.

use thiserror::Error;
use ureq::Agent;

use crate::config::Config;
use crate::models::{PromptListResponse, PromptPreview, SavePayload, SaveResponse};

/// Failures surfaced by the backend client. None of these are fatal to the
/// application; the UI renders them in a banner and the form stays usable.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The backend answered but reported `success: false`.
    #[error("{0}")]
    Application(String),
    /// The request never completed (DNS, refused connection, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),
    /// The response body was not the JSON shape we expect.
    #[error("unexpected response from server: {0}")]
    InvalidBody(String),
}

/// Operations the UI needs from the backend.
#[cfg_attr(test, mockall::automock)]
pub trait PromptApi {
    /// POST the payload to the save endpoint. `Ok` means the backend
    /// confirmed the save; a `success: false` body comes back as
    /// `ApiError::Application` carrying the backend's message.
    fn save_prompt(&self, payload: &SavePayload) -> Result<SaveResponse, ApiError>;

    /// Fetch every saved prompt in the backend's formatted (preview) shape.
    fn fetch_prompts(&self) -> Result<Vec<PromptPreview>, ApiError>;
}

/// `ureq`-backed implementation of [`PromptApi`].
pub struct PromptClient {
    agent: Agent,
    base_url: String,
    csrf_token: Option<String>,
}

impl PromptClient {
    pub fn new(config: &Config) -> Self {
        PromptClient {
            agent: Agent::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            csrf_token: config.csrf_token.clone(),
        }
    }

    fn save_url(&self) -> String {
        format!("{}/suno-prompt-builder/save/", self.base_url)
    }

    fn prompts_url(&self) -> String {
        format!("{}/suno-prompt-builder/prompts/", self.base_url)
    }
}

impl PromptApi for PromptClient {
    fn save_prompt(&self, payload: &SavePayload) -> Result<SaveResponse, ApiError> {
        let body = serde_json::to_string(payload)
            .map_err(|err| ApiError::InvalidBody(err.to_string()))?;

        let mut request = self
            .agent
            .post(&self.save_url())
            .set("Content-Type", "application/json");
        if let Some(token) = &self.csrf_token {
            request = request.set("X-CSRFToken", token);
        }

        let text = match request.send_string(&body) {
            Ok(response) => response
                .into_string()
                .map_err(|err| ApiError::Transport(err.to_string()))?,
            // The backend answers failures with HTTP 400 but still sends the
            // JSON body we want, so read it out of the status error too.
            Err(ureq::Error::Status(_, response)) => response
                .into_string()
                .map_err(|err| ApiError::Transport(err.to_string()))?,
            Err(err) => return Err(ApiError::Transport(err.to_string())),
        };

        parse_save_response(&text)
    }

    fn fetch_prompts(&self) -> Result<Vec<PromptPreview>, ApiError> {
        let text = self
            .agent
            .get(&self.prompts_url())
            .call()
            .map_err(|err| ApiError::Transport(err.to_string()))?
            .into_string()
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let listing: PromptListResponse = serde_json::from_str(&text)
            .map_err(|err| ApiError::InvalidBody(err.to_string()))?;
        Ok(listing.prompts)
    }
}

/// Turn a save-endpoint body into a result, promoting `success: false` to an
/// application error carrying the backend's message.
fn parse_save_response(text: &str) -> Result<SaveResponse, ApiError> {
    let response: SaveResponse =
        serde_json::from_str(text).map_err(|err| ApiError::InvalidBody(err.to_string()))?;
    if response.success {
        Ok(response)
    } else {
        let message = response
            .error
            .unwrap_or_else(|| "unknown error".to_string());
        Err(ApiError::Application(message))
    }
}
