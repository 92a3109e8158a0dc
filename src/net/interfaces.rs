//! Host interface enumeration and LAN address selection.
//!
//! # Responsibilities
//! - List every interface/address pair the OS reports
//! - Pick the address a LAN peer should use to reach this host
//!
//! # Design Decisions
//! - Selection is a pure function over records so it can be tested without
//!   touching the host
//! - First external IPv4 in enumeration order wins; no other tie-break
//! - No caching: every call re-reads the OS state

use std::fmt;
use std::net::IpAddr;

use network_interface::{Addr, NetworkInterface, NetworkInterfaceConfig};

/// Address family of an interface record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    IPv4,
    IPv6,
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::IPv4 => f.write_str("IPv4"),
            AddressFamily::IPv6 => f.write_str("IPv6"),
        }
    }
}

/// One address bound to one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterfaceRecord {
    pub name: String,
    pub address: IpAddr,
    pub family: AddressFamily,
    /// Loopback; unreachable from other hosts.
    pub internal: bool,
}

impl NetworkInterfaceRecord {
    /// Build a record, deriving the family from the address.
    pub fn new(name: impl Into<String>, address: IpAddr, internal: bool) -> Self {
        let family = match address {
            IpAddr::V4(_) => AddressFamily::IPv4,
            IpAddr::V6(_) => AddressFamily::IPv6,
        };
        Self {
            name: name.into(),
            address,
            family,
            internal,
        }
    }
}

/// Enumerate the host's interface/address pairs in OS order.
pub fn enumerate() -> Result<Vec<NetworkInterfaceRecord>, network_interface::Error> {
    let interfaces = NetworkInterface::show()?;
    tracing::debug!(count = interfaces.len(), "Enumerated network interfaces");

    let mut records = Vec::new();
    for iface in interfaces {
        for addr in &iface.addr {
            let ip = match addr {
                Addr::V4(v4) => IpAddr::V4(v4.ip),
                Addr::V6(v6) => IpAddr::V6(v6.ip),
            };
            records.push(NetworkInterfaceRecord::new(
                iface.name.clone(),
                ip,
                ip.is_loopback(),
            ));
        }
    }
    Ok(records)
}

/// First non-internal IPv4 address, if any.
pub fn select_lan_address(records: &[NetworkInterfaceRecord]) -> Option<IpAddr> {
    records
        .iter()
        .find(|r| r.family == AddressFamily::IPv4 && !r.internal)
        .map(|r| r.address)
}

/// Enumerate and select in one go. Enumeration failures count as "no LAN address".
pub fn lan_address() -> Option<IpAddr> {
    match enumerate() {
        Ok(records) => select_lan_address(&records),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to enumerate network interfaces");
            None
        }
    }
}
