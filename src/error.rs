use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("Webhook not found: {name}")]
    WebhookNotFound { name: String },

    #[error("Webhook already exists: {name}")]
    WebhookExists { name: String },

    #[error("Invalid webhook name: {0}")]
    NameError(String),

    #[error("Invalid resource URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("Request to {url} failed: {reason}")]
    RequestFailed { url: String, reason: String },

    #[error("Request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Unknown document event: {0}")]
    UnknownEvent(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Delivery log error: {0}")]
    LogError(String),
}

impl HookError {
    /// Returns a user-friendly suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            HookError::WebhookNotFound { .. } => {
                Some("List configured webhooks with `hookline list`.")
            }
            HookError::WebhookExists { .. } => {
                Some("Pick another name, or remove the existing webhook with `hookline rm`.")
            }
            HookError::NameError(_) => {
                Some("Names use letters, digits, hyphens and underscores, and start with a letter.")
            }
            HookError::InvalidUri { .. } => {
                Some("Resource URIs must be absolute http:// or https:// URLs.")
            }
            HookError::RequestFailed { .. } => {
                Some("Check that the endpoint is reachable and the URL is correct.")
            }
            HookError::HttpStatus { .. } => {
                Some("The endpoint rejected the request. Check credentials and the endpoint's logs.")
            }
            HookError::UnknownEvent(_) => {
                Some("Valid events: create, save, submit, cancel, delete.")
            }
            HookError::LogError(_) => {
                Some("Inspect the delivery log with `hookline log`.")
            }
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HookError {
    fn from(err: serde_json::Error) -> Self {
        HookError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for HookError {
    fn from(err: toml::ser::Error) -> Self {
        HookError::Config(format!("TOML serialization error: {}", err))
    }
}
