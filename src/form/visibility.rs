//! Visibility rule for the authentication credential fields.
//!
//! Which credential fields are relevant depends entirely on the current
//! value of the `authentication_type` selector. The rule is a total
//! function over the raw field value, so an empty or unrecognized value
//! simply hides every tracked field.

use std::collections::BTreeSet;

/// Fields shown only for Basic Authentication.
pub const BASIC_AUTH_FIELDS: [&str; 2] = ["username", "password"];

/// Fields shown only for OAuth 1.
pub const OAUTH1_FIELDS: [&str; 4] = [
    "client_key",
    "client_secret",
    "resource_owner_key",
    "resource_owner_secret",
];

/// Every field whose visibility this rule controls.
pub const TRACKED_FIELDS: [&str; 6] = [
    "username",
    "password",
    "client_key",
    "client_secret",
    "resource_owner_key",
    "resource_owner_secret",
];

/// The set of tracked fields that should currently be shown.
/// Fields not in the set are hidden.
pub type VisibilitySet = BTreeSet<&'static str>;

/// Compute which credential fields are visible for the given
/// `authentication_type` value.
///
/// The two field groups are mutually exclusive: at most one group is
/// visible at a time, and any value other than the two recognized
/// selector labels yields the empty set.
pub fn visible_fields(authentication_type: &str) -> VisibilitySet {
    let mut visible = VisibilitySet::new();
    if authentication_type == "Basic Authentication" {
        visible.extend(BASIC_AUTH_FIELDS);
    }
    if authentication_type == "OAuth 1" {
        visible.extend(OAUTH1_FIELDS);
    }
    visible
}
