use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HookError;

/// Lifecycle event of a business document that webhooks can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocEvent {
    Create,
    Save,
    Submit,
    Cancel,
    Delete,
}

impl DocEvent {
    /// The HTTP method used to deliver this event.
    ///
    /// Create maps to POST, Delete to DELETE, and the in-place
    /// lifecycle events (Save, Submit, Cancel) to PUT.
    pub fn http_method(self) -> &'static str {
        match self {
            DocEvent::Create => "POST",
            DocEvent::Save | DocEvent::Submit | DocEvent::Cancel => "PUT",
            DocEvent::Delete => "DELETE",
        }
    }
}

impl fmt::Display for DocEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocEvent::Create => write!(f, "create"),
            DocEvent::Save => write!(f, "save"),
            DocEvent::Submit => write!(f, "submit"),
            DocEvent::Cancel => write!(f, "cancel"),
            DocEvent::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for DocEvent {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(DocEvent::Create),
            "save" => Ok(DocEvent::Save),
            "submit" => Ok(DocEvent::Submit),
            "cancel" => Ok(DocEvent::Cancel),
            "delete" => Ok(DocEvent::Delete),
            other => Err(HookError::UnknownEvent(other.to_string())),
        }
    }
}
