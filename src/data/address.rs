use std::net::IpAddr;

use ipnetwork::IpNetwork;

use crate::error::FilterError;

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a single host address (IPv4 or IPv6, no prefix).
pub fn parse_address(text: &str) -> Result<IpAddr, FilterError> {
    text.parse::<IpAddr>()
        .map_err(|_| FilterError::InvalidAddress {
            value: text.to_string(),
        })
}

/// Parse a network in CIDR form, or a bare address as a single-host network.
pub fn parse_network(text: &str) -> Result<IpNetwork, FilterError> {
    text.parse::<IpNetwork>()
        .map_err(|_| FilterError::InvalidNetwork {
            pattern: text.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Containment
// ---------------------------------------------------------------------------

/// Whether `address` lies inside the already parsed `network`.
///
/// Mixed families yield `Ok(false)`; only a malformed `address` is an error.
pub fn network_contains(network: &IpNetwork, address: &str) -> Result<bool, FilterError> {
    let ip = parse_address(address)?;
    Ok(network.contains(ip))
}

/// Whether `address` lies inside `network`.
///
/// ```text
/// contains("10.0.0.5", "10.0.0.0/24") == Ok(true)
/// contains("10.0.0.5", "::/0")        == Ok(false)   // family mismatch
/// contains("nope",     "10.0.0.0/24") == Err(InvalidAddress)
/// ```
pub fn contains(address: &str, network: &str) -> Result<bool, FilterError> {
    let network = parse_network(network)?;
    network_contains(&network, address)
}
