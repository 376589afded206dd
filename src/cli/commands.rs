//! Handlers behind the CLI subcommands.

use std::io::Write;

use crate::cli::args::{AddArgs, FireArgs, LogArgs, SubscribeArgs};
use crate::config::paths::{hookline_config_dir, hookline_data_dir};
use crate::config::store::WebhookStore;
use crate::delivery::dispatch::dispatch_event;
use crate::delivery::log::DeliveryLog;
use crate::delivery::request::HttpSender;
use crate::error::HookError;
use crate::form::visibility::{visible_fields, TRACKED_FIELDS};
use crate::model::webhook::{validate_resource_uri, AuthType, Secret, Subscription, Webhook};

/// Delivery log entries kept before oldest-first truncation.
const DELIVERY_LOG_LIMIT: usize = 1000;

/// Fields whose values are never echoed back.
const SECRET_FIELDS: [&str; 3] = ["password", "client_secret", "resource_owner_secret"];

fn load_store() -> Result<WebhookStore, HookError> {
    WebhookStore::load(&hookline_config_dir()?)
}

fn open_log() -> Result<DeliveryLog, HookError> {
    DeliveryLog::load(&hookline_data_dir()?, DELIVERY_LOG_LIMIT)
}

/// `hookline list`
pub fn list() -> Result<(), HookError> {
    let store = load_store()?;
    if store.list().is_empty() {
        println!("No webhooks configured. Add one with `hookline add <name>`.");
        return Ok(());
    }

    println!(
        "{:<20} {:<9} {:<22} {}",
        "NAME", "ENABLED", "AUTH", "SUBSCRIPTIONS"
    );
    for hook in store.list() {
        println!(
            "{:<20} {:<9} {:<22} {}",
            hook.name,
            if hook.enabled { "yes" } else { "no" },
            hook.authentication_type,
            hook.subscriptions.len()
        );
    }
    Ok(())
}

/// `hookline show <name>`
///
/// Prints only the credential fields relevant to the webhook's
/// authentication type, the same rule the editor form applies.
pub fn show(name: &str) -> Result<(), HookError> {
    let store = load_store()?;
    let hook = store
        .get(name)
        .ok_or_else(|| HookError::WebhookNotFound {
            name: name.to_string(),
        })?;

    println!("name:                {}", hook.name);
    println!("enabled:             {}", hook.enabled);
    println!("authentication_type: {}", hook.authentication_type);

    let visible = visible_fields(hook.authentication_type.as_str());
    for field in TRACKED_FIELDS {
        if !visible.contains(field) {
            continue;
        }
        let value = hook.field_value(field).unwrap_or_default();
        let shown = if SECRET_FIELDS.contains(&field) {
            if value.is_empty() { "(unset)" } else { "****" }.to_string()
        } else if value.is_empty() {
            "(unset)".to_string()
        } else {
            value
        };
        println!("{:<20} {}", format!("{}:", field), shown);
    }

    if hook.subscriptions.is_empty() {
        println!("subscriptions:       none");
    } else {
        println!("subscriptions:");
        for sub in &hook.subscriptions {
            println!(
                "  {} {} -> {}",
                sub.document, sub.event, sub.resource_uri
            );
        }
    }
    Ok(())
}

/// `hookline add <name>`
pub fn add(args: AddArgs) -> Result<(), HookError> {
    let mut hook = Webhook::new(args.name.clone());
    hook.enabled = !args.disabled;
    hook.authentication_type = args.auth;

    match args.auth {
        AuthType::None => {}
        AuthType::Basic => {
            hook.username = or_prompt(args.username, "Username: ")?;
            hook.password = Secret::new(or_prompt_secret(args.password, "Password: ")?);
        }
        AuthType::OAuth1 => {
            hook.client_key = or_prompt(args.client_key, "Client key: ")?;
            hook.client_secret =
                Secret::new(or_prompt_secret(args.client_secret, "Client secret: ")?);
            hook.resource_owner_key =
                or_prompt(args.resource_owner_key, "Resource owner key: ")?;
            hook.resource_owner_secret = Secret::new(or_prompt_secret(
                args.resource_owner_secret,
                "Resource owner secret: ",
            )?);
        }
    }

    let mut store = load_store()?;
    store.add(hook)?;
    store.save()?;
    println!("Added webhook '{}'.", args.name);
    Ok(())
}

/// `hookline rm <name>`
pub fn rm(name: &str) -> Result<(), HookError> {
    let mut store = load_store()?;
    if !store.remove(name) {
        return Err(HookError::WebhookNotFound {
            name: name.to_string(),
        });
    }
    store.save()?;
    println!("Removed webhook '{}'.", name);
    Ok(())
}

/// `hookline enable <name>` / `hookline disable <name>`
pub fn set_enabled(name: &str, enabled: bool) -> Result<(), HookError> {
    let mut store = load_store()?;
    store.set_enabled(name, enabled)?;
    store.save()?;
    println!(
        "{} webhook '{}'.",
        if enabled { "Enabled" } else { "Disabled" },
        name
    );
    Ok(())
}

/// `hookline subscribe <name> <document> <event> <uri>`
pub fn subscribe(args: SubscribeArgs) -> Result<(), HookError> {
    validate_resource_uri(&args.uri)?;

    let mut store = load_store()?;
    let hook = store
        .get_mut(&args.name)
        .ok_or_else(|| HookError::WebhookNotFound {
            name: args.name.clone(),
        })?;

    // One subscription per (document, event) pair; re-subscribing
    // replaces the resource URI.
    if let Some(existing) = hook
        .subscriptions
        .iter_mut()
        .find(|s| s.document == args.document && s.event == args.event)
    {
        existing.resource_uri = args.uri.clone();
    } else {
        hook.subscriptions.push(Subscription {
            document: args.document.clone(),
            event: args.event,
            resource_uri: args.uri.clone(),
        });
    }

    store.save()?;
    println!(
        "Webhook '{}' now delivers {} {} to {}.",
        args.name, args.document, args.event, args.uri
    );
    Ok(())
}

/// `hookline fire <document> <event>`
pub fn fire(args: FireArgs) -> Result<(), HookError> {
    let payload = match &args.data {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| HookError::Config(format!("Invalid --data JSON: {}", e)))?,
        None => serde_json::json!({}),
    };

    let store = load_store()?;
    let sender = HttpSender::new()?;
    let records = dispatch_event(store.list(), &sender, &args.document, args.event, &payload);

    if records.is_empty() {
        println!(
            "No webhooks subscribed to {} {}.",
            args.document, args.event
        );
        return Ok(());
    }

    let mut log = open_log()?;
    for record in &records {
        match &record.error {
            Some(error) => println!(
                "{}: {} {} {} ({})",
                record.webhook, record.method, record.resource_uri, record.outcome, error
            ),
            None => println!(
                "{}: {} {} {}",
                record.webhook, record.method, record.resource_uri, record.outcome
            ),
        }
    }
    log.extend(records)?;
    Ok(())
}

/// `hookline log`
pub fn log(args: LogArgs) -> Result<(), HookError> {
    let mut log = open_log()?;

    if args.clear {
        log.clear();
        log.save()?;
        println!("Delivery log cleared.");
        return Ok(());
    }

    if log.list().is_empty() {
        println!("Delivery log is empty.");
        return Ok(());
    }

    let entries = log.list();
    let start = entries.len().saturating_sub(args.count);
    for record in &entries[start..] {
        let error = record
            .error
            .as_deref()
            .map(|e| format!(" ({})", e))
            .unwrap_or_default();
        println!(
            "{}  {:<20} {} {:<8} {}{}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.webhook,
            record.document,
            record.event.to_string(),
            record.outcome,
            error
        );
    }
    Ok(())
}

/// `hookline ui`
pub fn ui() -> Result<(), HookError> {
    crate::tui::launch_tui()
}

/// `hookline completions <shell>`
pub fn completions(shell: clap_complete::Shell) -> Result<(), HookError> {
    use clap::CommandFactory;
    let mut cmd = crate::cli::args::Cli::command();
    clap_complete::generate(shell, &mut cmd, "hookline", &mut std::io::stdout());
    Ok(())
}

/// Use the flag value if given, otherwise prompt on the terminal.
fn or_prompt(value: Option<String>, prompt: &str) -> Result<String, HookError> {
    match value {
        Some(v) => Ok(v),
        None => {
            eprint!("{}", prompt);
            std::io::stderr().flush()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            Ok(line.trim_end().to_string())
        }
    }
}

/// Like `or_prompt`, but without echoing the typed value.
fn or_prompt_secret(value: Option<String>, prompt: &str) -> Result<String, HookError> {
    match value {
        Some(v) => Ok(v),
        None => rpassword::prompt_password(prompt).map_err(|e| HookError::Io { source: e }),
    }
}
