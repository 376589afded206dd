//! Credential preparation for webhook delivery.

use crate::model::webhook::{AuthType, Webhook};

/// Credentials resolved for a single delivery attempt.
#[derive(Clone)]
pub enum RequestAuth {
    /// Anonymous delivery, no auth header.
    Anonymous,
    /// HTTP Basic authentication.
    Basic { username: String, password: String },
}

impl std::fmt::Debug for RequestAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestAuth::Anonymous => f.write_str("Anonymous"),
            RequestAuth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"****")
                .finish(),
        }
    }
}

/// Resolve delivery credentials for a webhook.
///
/// Returns None when the webhook must not be delivered to: disabled
/// webhooks, and OAuth 1 webhooks (request signing is not supported, so
/// sending the stored keys unsigned would leak them to no effect).
pub fn prepare_auth(webhook: &Webhook) -> Option<RequestAuth> {
    if !webhook.enabled {
        return None;
    }

    match webhook.authentication_type {
        AuthType::None => Some(RequestAuth::Anonymous),
        AuthType::Basic => Some(RequestAuth::Basic {
            username: webhook.username.clone(),
            password: webhook.password.expose().to_string(),
        }),
        AuthType::OAuth1 => {
            tracing::warn!(
                webhook = %webhook.name,
                "OAuth 1 request signing is not supported; delivery skipped"
            );
            None
        }
    }
}

/// Apply credentials to a request builder.
pub fn apply_auth(
    builder: reqwest::blocking::RequestBuilder,
    auth: &RequestAuth,
) -> reqwest::blocking::RequestBuilder {
    match auth {
        RequestAuth::Anonymous => builder,
        RequestAuth::Basic { username, password } => builder.basic_auth(username, Some(password)),
    }
}
