//! Fan-out of a document event to every subscribed webhook.

use chrono::Utc;
use serde_json::Value;

use crate::delivery::auth::prepare_auth;
use crate::delivery::log::{DeliveryOutcome, DeliveryRecord};
use crate::delivery::request::HttpSender;
use crate::model::event::DocEvent;
use crate::model::webhook::Webhook;

/// Deliver `event` for `document` to every webhook subscribed to that
/// pair. Returns one record per attempted delivery, in webhook order.
///
/// Disabled webhooks and webhooks without usable credentials are
/// recorded as skipped rather than failed; webhooks without a matching
/// subscription are not recorded at all.
pub fn dispatch_event(
    webhooks: &[Webhook],
    sender: &HttpSender,
    document: &str,
    event: DocEvent,
    payload: &Value,
) -> Vec<DeliveryRecord> {
    let mut records = Vec::new();

    for webhook in webhooks {
        let Some(subscription) = webhook.subscription_for(document, event) else {
            continue;
        };

        let method = event.http_method();
        let mut record = DeliveryRecord {
            webhook: webhook.name.clone(),
            document: document.to_string(),
            event,
            method: method.to_string(),
            resource_uri: subscription.resource_uri.clone(),
            outcome: DeliveryOutcome::Skipped,
            error: None,
            timestamp: Utc::now(),
        };

        if !webhook.enabled {
            record.error = Some("webhook disabled".into());
            records.push(record);
            continue;
        }

        let Some(auth) = prepare_auth(webhook) else {
            record.error = Some("no usable credentials (OAuth 1 signing unsupported)".into());
            records.push(record);
            continue;
        };

        tracing::info!(
            webhook = %webhook.name,
            %document,
            %event,
            method,
            uri = %subscription.resource_uri,
            "Delivering webhook event"
        );

        let result = match method {
            "POST" => sender.post(&subscription.resource_uri, &auth, payload),
            "PUT" => sender.put(&subscription.resource_uri, &auth, payload),
            "DELETE" => sender.delete(&subscription.resource_uri, &auth),
            other => unreachable!("no delivery method for {}", other),
        };

        match result {
            Ok(_) => {
                record.outcome = DeliveryOutcome::Delivered;
            }
            Err(e) => {
                record.outcome = DeliveryOutcome::Failed;
                record.error = Some(e.to_string());
            }
        }
        records.push(record);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::webhook::{AuthType, Secret, Subscription};
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve one HTTP request on an ephemeral port, then return the
    /// request head that was received.
    fn one_shot_server(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, std::thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            // Read until the end of headers, then drain the body per
            // Content-Length so the client sees a clean connection.
            let header_end = loop {
                let n = stream.read(&mut chunk).unwrap();
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = find_header_end(&buf) {
                    break pos;
                }
                if n == 0 {
                    break buf.len();
                }
            };

            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:").map(str::trim).map(String::from))
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(0);
            let mut body_read = buf.len().saturating_sub(header_end + 4);
            while body_read < content_length {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                body_read += n;
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            head
        });

        (format!("http://{}", addr), handle)
    }

    fn find_header_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n")
    }

    fn subscribed_hook(name: &str, uri: &str, event: DocEvent) -> Webhook {
        let mut hook = Webhook::new(name);
        hook.subscriptions.push(Subscription {
            document: "Invoice".into(),
            event,
            resource_uri: uri.to_string(),
        });
        hook
    }

    #[test]
    fn create_event_posts_payload() {
        let (base, server) = one_shot_server("200 OK", "{\"ok\":true}");
        let uri = format!("{}/invoices", base);
        let hook = subscribed_hook("billing", &uri, DocEvent::Create);
        let sender = HttpSender::new().unwrap();

        let records = dispatch_event(
            &[hook],
            &sender,
            "Invoice",
            DocEvent::Create,
            &serde_json::json!({"id": "INV-001"}),
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].outcome, DeliveryOutcome::Delivered);
        assert_eq!(records[0].method, "POST");

        let head = server.join().unwrap();
        assert!(head.starts_with("POST /invoices"));
        assert!(head.to_ascii_lowercase().contains("content-type: application/json"));
    }

    #[test]
    fn save_event_puts_with_basic_auth_header() {
        let (base, server) = one_shot_server("200 OK", "");
        let uri = format!("{}/invoices/1", base);
        let mut hook = subscribed_hook("billing", &uri, DocEvent::Save);
        hook.authentication_type = AuthType::Basic;
        hook.username = "svc".into();
        hook.password = Secret::new("pw");
        let sender = HttpSender::new().unwrap();

        let records = dispatch_event(
            &[hook],
            &sender,
            "Invoice",
            DocEvent::Save,
            &serde_json::json!({"id": "INV-001"}),
        );

        assert_eq!(records[0].outcome, DeliveryOutcome::Delivered);
        assert_eq!(records[0].method, "PUT");

        let head = server.join().unwrap();
        assert!(head.starts_with("PUT /invoices/1"));
        // "svc:pw" base64-encoded
        assert!(head.contains("Basic c3ZjOnB3"));
    }

    #[test]
    fn endpoint_error_is_recorded_as_failed() {
        let (base, server) = one_shot_server("500 Internal Server Error", "");
        let uri = format!("{}/hook", base);
        let hook = subscribed_hook("billing", &uri, DocEvent::Create);
        let sender = HttpSender::new().unwrap();

        let records = dispatch_event(
            &[hook],
            &sender,
            "Invoice",
            DocEvent::Create,
            &Value::Null,
        );

        assert_eq!(records[0].outcome, DeliveryOutcome::Failed);
        assert!(records[0].error.as_deref().unwrap().contains("500"));
        server.join().unwrap();
    }

    #[test]
    fn disabled_webhook_is_skipped_without_a_request() {
        let mut hook = subscribed_hook("billing", "http://127.0.0.1:1/hook", DocEvent::Create);
        hook.enabled = false;
        let sender = HttpSender::new().unwrap();

        let records =
            dispatch_event(&[hook], &sender, "Invoice", DocEvent::Create, &Value::Null);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].outcome, DeliveryOutcome::Skipped);
        assert!(records[0].error.as_deref().unwrap().contains("disabled"));
    }

    #[test]
    fn oauth1_webhook_is_skipped() {
        let mut hook = subscribed_hook("legacy", "http://127.0.0.1:1/hook", DocEvent::Create);
        hook.authentication_type = AuthType::OAuth1;
        let sender = HttpSender::new().unwrap();

        let records =
            dispatch_event(&[hook], &sender, "Invoice", DocEvent::Create, &Value::Null);

        assert_eq!(records[0].outcome, DeliveryOutcome::Skipped);
        assert!(records[0]
            .error
            .as_deref()
            .unwrap()
            .contains("OAuth 1"));
    }

    #[test]
    fn unsubscribed_webhooks_are_not_recorded() {
        let hooks = [subscribed_hook(
            "billing",
            "http://127.0.0.1:1/hook",
            DocEvent::Create,
        )];
        let sender = HttpSender::new().unwrap();

        let records =
            dispatch_event(&hooks, &sender, "Invoice", DocEvent::Delete, &Value::Null);
        assert!(records.is_empty());

        let records = dispatch_event(&hooks, &sender, "Order", DocEvent::Create, &Value::Null);
        assert!(records.is_empty());
    }
}
