use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::HookError;
use crate::model::event::DocEvent;

/// Authentication method applied when delivering to a webhook endpoint.
///
/// Serialized under its canonical selector labels so stored values match
/// what the editor form displays and compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum AuthType {
    #[default]
    #[serde(rename = "None")]
    #[value(name = "none")]
    None,

    #[serde(rename = "Basic Authentication")]
    #[value(name = "basic")]
    Basic,

    #[serde(rename = "OAuth 1")]
    #[value(name = "oauth1")]
    OAuth1,
}

impl AuthType {
    /// Canonical selector label. This is the exact string the
    /// field-visibility rule matches on.
    pub fn as_str(self) -> &'static str {
        match self {
            AuthType::None => "None",
            AuthType::Basic => "Basic Authentication",
            AuthType::OAuth1 => "OAuth 1",
        }
    }

    /// Next type in selector order (wrapping).
    pub fn next(self) -> AuthType {
        match self {
            AuthType::None => AuthType::Basic,
            AuthType::Basic => AuthType::OAuth1,
            AuthType::OAuth1 => AuthType::None,
        }
    }

    /// Previous type in selector order (wrapping).
    pub fn prev(self) -> AuthType {
        match self {
            AuthType::None => AuthType::OAuth1,
            AuthType::Basic => AuthType::None,
            AuthType::OAuth1 => AuthType::Basic,
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credential value that is zeroed on drop and masked in Debug output.
#[derive(Clone, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Secret(value.into())
    }

    /// Access the underlying secret material.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Secret(empty)")
        } else {
            f.write_str("Secret(****)")
        }
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Secret(value.to_string())
    }
}

/// One (document, event) pair a webhook listens for, and where to deliver it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Business-object type, e.g. "Invoice". Opaque to hookline.
    pub document: String,
    pub event: DocEvent,
    /// Absolute http(s) URL the event is delivered to.
    pub resource_uri: String,
}

/// A configured webhook endpoint with its authentication material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    pub name: String,
    pub enabled: bool,
    pub authentication_type: AuthType,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "Secret::is_empty")]
    pub password: Secret,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_key: String,
    #[serde(default, skip_serializing_if = "Secret::is_empty")]
    pub client_secret: Secret,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_owner_key: String,
    #[serde(default, skip_serializing_if = "Secret::is_empty")]
    pub resource_owner_secret: Secret,

    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl Webhook {
    /// Create an enabled webhook with no authentication and no subscriptions.
    pub fn new(name: impl Into<String>) -> Self {
        Webhook {
            name: name.into(),
            enabled: true,
            authentication_type: AuthType::None,
            username: String::new(),
            password: Secret::default(),
            client_key: String::new(),
            client_secret: Secret::default(),
            resource_owner_key: String::new(),
            resource_owner_secret: Secret::default(),
            subscriptions: Vec::new(),
        }
    }

    /// Read a form field by name.
    ///
    /// Covers the authentication selector and the six credential fields
    /// the editor form tracks. Unknown names return None.
    pub fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "authentication_type" => Some(self.authentication_type.as_str().to_string()),
            "username" => Some(self.username.clone()),
            "password" => Some(self.password.expose().to_string()),
            "client_key" => Some(self.client_key.clone()),
            "client_secret" => Some(self.client_secret.expose().to_string()),
            "resource_owner_key" => Some(self.resource_owner_key.clone()),
            "resource_owner_secret" => Some(self.resource_owner_secret.expose().to_string()),
            _ => None,
        }
    }

    /// Write a form field by name. Returns whether the name was known.
    pub fn set_field_value(&mut self, field: &str, value: &str) -> bool {
        match field {
            "username" => self.username = value.to_string(),
            "password" => self.password = Secret::new(value),
            "client_key" => self.client_key = value.to_string(),
            "client_secret" => self.client_secret = Secret::new(value),
            "resource_owner_key" => self.resource_owner_key = value.to_string(),
            "resource_owner_secret" => self.resource_owner_secret = Secret::new(value),
            _ => return false,
        }
        true
    }

    /// Find the subscription matching a (document, event) pair.
    pub fn subscription_for(&self, document: &str, event: DocEvent) -> Option<&Subscription> {
        self.subscriptions
            .iter()
            .find(|s| s.document == document && s.event == event)
    }
}

/// Validate that a webhook name is acceptable.
///
/// Rules:
/// - At least 2 characters
/// - Must not start with a digit
/// - Only alphanumeric characters, hyphens, and underscores
pub fn validate_name(name: &str) -> Result<(), HookError> {
    if name.len() < 2 {
        return Err(HookError::NameError(
            "Webhook name must be at least 2 characters".into(),
        ));
    }

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(HookError::NameError(
            "Webhook name must not start with a digit".into(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(HookError::NameError(
            "Webhook name must contain only alphanumeric characters, hyphens, and underscores"
                .into(),
        ));
    }

    Ok(())
}

/// Validate a subscription resource URI: absolute http(s) URL with a host.
pub fn validate_resource_uri(uri: &str) -> Result<(), HookError> {
    let parsed = url::Url::parse(uri).map_err(|e| HookError::InvalidUri {
        uri: uri.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(HookError::InvalidUri {
                uri: uri.to_string(),
                reason: format!("unsupported scheme '{}'", other),
            });
        }
    }

    if parsed.host_str().is_none() {
        return Err(HookError::InvalidUri {
            uri: uri.to_string(),
            reason: "missing host".into(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_type_labels() {
        assert_eq!(AuthType::None.as_str(), "None");
        assert_eq!(AuthType::Basic.as_str(), "Basic Authentication");
        assert_eq!(AuthType::OAuth1.as_str(), "OAuth 1");
    }

    #[test]
    fn auth_type_selector_cycles() {
        assert_eq!(AuthType::None.next(), AuthType::Basic);
        assert_eq!(AuthType::OAuth1.next(), AuthType::None);
        assert_eq!(AuthType::None.prev(), AuthType::OAuth1);
        assert_eq!(AuthType::Basic.prev(), AuthType::None);
    }

    #[test]
    fn secret_debug_is_masked() {
        let secret = Secret::new("hunter2");
        assert_eq!(format!("{:?}", secret), "Secret(****)");
        assert_eq!(format!("{:?}", Secret::default()), "Secret(empty)");
    }

    #[test]
    fn field_value_reads_selector_label() {
        let mut hook = Webhook::new("billing");
        hook.authentication_type = AuthType::Basic;
        assert_eq!(
            hook.field_value("authentication_type").as_deref(),
            Some("Basic Authentication")
        );
    }

    #[test]
    fn field_round_trip() {
        let mut hook = Webhook::new("billing");
        assert!(hook.set_field_value("username", "svc-billing"));
        assert!(hook.set_field_value("password", "s3cret"));
        assert_eq!(hook.field_value("username").as_deref(), Some("svc-billing"));
        assert_eq!(hook.field_value("password").as_deref(), Some("s3cret"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut hook = Webhook::new("billing");
        assert!(hook.field_value("nonexistent").is_none());
        assert!(!hook.set_field_value("nonexistent", "x"));
        // The selector is not writable as free text
        assert!(!hook.set_field_value("authentication_type", "OAuth 1"));
    }

    #[test]
    fn subscription_lookup() {
        let mut hook = Webhook::new("billing");
        hook.subscriptions.push(Subscription {
            document: "Invoice".into(),
            event: DocEvent::Create,
            resource_uri: "https://example.com/invoices".into(),
        });

        assert!(hook.subscription_for("Invoice", DocEvent::Create).is_some());
        assert!(hook.subscription_for("Invoice", DocEvent::Delete).is_none());
        assert!(hook.subscription_for("Order", DocEvent::Create).is_none());
    }

    #[test]
    fn validate_good_names() {
        assert!(validate_name("billing").is_ok());
        assert!(validate_name("crm-sync").is_ok());
        assert!(validate_name("audit_2024").is_ok());
        assert!(validate_name("ab").is_ok());
    }

    #[test]
    fn validate_rejects_bad_names() {
        assert!(validate_name("").is_err());
        assert!(validate_name("a").is_err());
        assert!(validate_name("1hook").is_err());
        assert!(validate_name("my hook").is_err());
        assert!(validate_name("hook.name").is_err());
    }

    #[test]
    fn validate_resource_uri_accepts_http_and_https() {
        assert!(validate_resource_uri("https://example.com/hook").is_ok());
        assert!(validate_resource_uri("http://10.0.0.5:8080/hook").is_ok());
    }

    #[test]
    fn validate_resource_uri_rejects_other_schemes() {
        assert!(validate_resource_uri("ftp://example.com/hook").is_err());
        assert!(validate_resource_uri("not a url").is_err());
    }

    #[test]
    fn toml_round_trip_preserves_labels() {
        let mut hook = Webhook::new("billing");
        hook.authentication_type = AuthType::OAuth1;
        hook.client_key = "ck".into();
        hook.client_secret = Secret::new("cs");

        let serialized = toml::to_string(&hook).unwrap();
        assert!(serialized.contains("OAuth 1"));

        let parsed: Webhook = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.authentication_type, AuthType::OAuth1);
        assert_eq!(parsed.client_secret.expose(), "cs");
    }
}
