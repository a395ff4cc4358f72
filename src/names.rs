// SPDX-License-Identifier: Apache-2.0

//! Deployment name validation and coercion.

use regex::Regex;
use std::sync::LazyLock;
use tracing::error;

// DNS-1123 sub-domain grammar; KFServing rejects resource names outside it.
static DNS_1123_SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("DNS-1123 pattern compiles")
});

pub fn is_dns1123_subdomain(name: &str) -> bool {
    DNS_1123_SUBDOMAIN.is_match(name)
}

/// Coerce a deployment name into a DNS-1123-safe resource identifier.
///
/// Valid names pass through untouched. Invalid names are logged, then
/// underscores and spaces become hyphens and the result is lowercased.
/// Validation failure never raises.
pub fn normalize_deployment_name(name: &str) -> String {
    if is_dns1123_subdomain(name) {
        return name.to_string();
    }

    error!(
        "deployment name '{}' does not pass the DNS-1123 sub-domain filter, coercing",
        name
    );
    name.replace('_', "-").replace(' ', "-").to_lowercase()
}
