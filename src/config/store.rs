//! Webhook store for configured webhook definitions.
//!
//! Persists webhooks in `webhooks.toml` within the hookline config
//! directory. Provides CRUD operations used by the CLI commands and the
//! TUI editor.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HookError;
use crate::model::webhook::{validate_name, Webhook};

/// Serialized webhook file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WebhookFile {
    #[serde(default)]
    pub webhooks: Vec<Webhook>,
}

/// In-memory representation of the webhook store backed by a TOML file.
#[derive(Debug)]
pub struct WebhookStore {
    path: PathBuf,
    data: WebhookFile,
}

impl WebhookStore {
    /// Load webhooks from `webhooks.toml` in the given config directory.
    ///
    /// Returns a default (empty) store if the file does not exist.
    pub fn load(config_dir: &Path) -> Result<Self, HookError> {
        let path = config_dir.join("webhooks.toml");
        let data = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents)
                .map_err(|e| HookError::Config(format!("Invalid webhooks.toml: {}", e)))?
        } else {
            WebhookFile::default()
        };
        Ok(Self { path, data })
    }

    /// Save webhooks to disk atomically (write to tmp file, then rename).
    pub fn save(&self) -> Result<(), HookError> {
        let contents = toml::to_string_pretty(&self.data)
            .map_err(|e| HookError::Config(format!("Failed to serialize webhooks: {}", e)))?;
        let tmp_path = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp_path, &contents)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Add a new webhook. The name must be valid and unused.
    pub fn add(&mut self, webhook: Webhook) -> Result<(), HookError> {
        validate_name(&webhook.name)?;
        if self.get(&webhook.name).is_some() {
            return Err(HookError::WebhookExists {
                name: webhook.name.clone(),
            });
        }
        self.data.webhooks.push(webhook);
        Ok(())
    }

    /// Remove a webhook by name. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.data.webhooks.len();
        self.data.webhooks.retain(|w| w.name != name);
        self.data.webhooks.len() != before
    }

    /// Look up a webhook by name.
    pub fn get(&self, name: &str) -> Option<&Webhook> {
        self.data.webhooks.iter().find(|w| w.name == name)
    }

    /// Look up a webhook by name for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Webhook> {
        self.data.webhooks.iter_mut().find(|w| w.name == name)
    }

    /// Replace a stored webhook with an edited copy of the same name.
    pub fn update(&mut self, webhook: Webhook) -> Result<(), HookError> {
        match self.data.webhooks.iter_mut().find(|w| w.name == webhook.name) {
            Some(slot) => {
                *slot = webhook;
                Ok(())
            }
            None => Err(HookError::WebhookNotFound {
                name: webhook.name,
            }),
        }
    }

    /// Enable or disable a webhook by name.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), HookError> {
        match self.get_mut(name) {
            Some(hook) => {
                hook.enabled = enabled;
                Ok(())
            }
            None => Err(HookError::WebhookNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Return all stored webhooks.
    pub fn list(&self) -> &[Webhook] {
        &self.data.webhooks
    }
}

impl Default for WebhookStore {
    /// Create an empty store with no backing file.
    ///
    /// Used as a fallback when the config directory is not available.
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            data: WebhookFile::default(),
        }
    }
}
