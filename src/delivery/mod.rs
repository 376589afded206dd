//! Delivery of document events to subscribed webhook endpoints.

pub mod auth;
pub mod dispatch;
pub mod log;
pub mod request;

pub use auth::{prepare_auth, RequestAuth};
pub use dispatch::dispatch_event;
pub use log::{DeliveryLog, DeliveryOutcome, DeliveryRecord};
pub use request::HttpSender;
