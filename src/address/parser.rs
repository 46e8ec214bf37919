//! Hosts file parsing and IP literal handling.

use std::net::IpAddr;

/// Parse an IP literal, accepting bracketed IPv6 (`[2001:db8::1]`).
pub fn parse_ip(literal: &str) -> Option<IpAddr> {
    let literal = literal.trim();
    let unbracketed = literal
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'));

    match unbracketed {
        Some(inner) => inner.parse::<std::net::Ipv6Addr>().ok().map(IpAddr::V6),
        None => literal.parse().ok(),
    }
}

/// Host component for a URL: IPv4 as-is, IPv6 in brackets.
///
/// The literal's original spelling is kept so that logs and requests show
/// the address exactly as it was discovered.
pub fn url_host(literal: &str) -> Option<String> {
    let literal = literal.trim();
    match parse_ip(literal)? {
        IpAddr::V4(_) => Some(literal.to_string()),
        IpAddr::V6(_) if literal.starts_with('[') => Some(literal.to_string()),
        IpAddr::V6(_) => Some(format!("[{}]", literal)),
    }
}

/// Addresses mapped to `domain` in hosts file `content`, in file order.
///
/// Commented lines are skipped; only the first token of a line is
/// considered and it must be a valid IP literal. Duplicates are dropped.
pub fn hosts_addresses(content: &str, domain: &str) -> Vec<String> {
    let mut seen: Vec<IpAddr> = Vec::new();
    let mut addresses: Vec<String> = Vec::new();

    for line in content.lines() {
        let line = line.trim_start();
        if line.starts_with('#') || !line.contains(domain) {
            continue;
        }

        let Some(token) = line.split_whitespace().next() else {
            continue;
        };

        let Some(ip) = parse_ip(token) else {
            tracing::debug!(token, "Ignoring hosts entry with invalid IP address");
            continue;
        };

        // Same server under another spelling; keep the first one seen
        if !seen.contains(&ip) {
            seen.push(ip);
            addresses.push(token.to_string());
        }
    }

    addresses
}
