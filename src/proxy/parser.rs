//! Proxy config file parsing (`KEY="value"` lines).

use super::{ProxyEndpoints, ProxySettings};
use std::collections::HashMap;

/// Parse `KEY="value"` assignments; quotes are optional, comments skipped.
pub fn assignments(content: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            tracing::debug!(line, "Skipping malformed proxy config line");
            continue;
        };

        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        values.insert(key.trim().to_string(), value.trim().to_string());
    }

    values
}

/// Turn the proxy config file content into [`ProxySettings`].
pub fn proxy_settings(content: &str) -> ProxySettings {
    let values = assignments(content);

    let enabled = values
        .get("PROXY_ENABLED")
        .map(|v| !matches!(v.to_lowercase().as_str(), "no" | "false" | "0"))
        .unwrap_or(true);
    if !enabled {
        return ProxySettings::Disabled;
    }

    let value = |key: &str| values.get(key).filter(|v| !v.is_empty()).cloned();
    let endpoints = ProxyEndpoints {
        http: value("HTTP_PROXY"),
        https: value("HTTPS_PROXY"),
        no_proxy: value("NO_PROXY"),
    };

    if endpoints.http.is_none() && endpoints.https.is_none() {
        ProxySettings::Disabled
    } else {
        ProxySettings::Explicit(endpoints)
    }
}
