//! Form behavior for the webhook editor.
//!
//! The editor form is host-agnostic: the visibility rule is a pure
//! function, the host surface is the `FormHost` trait, and the wiring
//! between the two is a plain handler table dispatched on form display
//! and field-change events.

pub mod host;
pub mod registry;
pub mod visibility;

pub use host::FormHost;
pub use registry::{webhook_handlers, FormEvent, HandlerTable};
pub use visibility::{visible_fields, VisibilitySet};
