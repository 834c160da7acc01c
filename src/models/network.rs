//! Summary of a whole network block.

use serde::Serialize;
use std::net::Ipv4Addr;

/// Address space of an input CIDR block, used by the info report and to
/// validate spoke networks.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub network: Ipv4Addr,
    #[serde(rename = "totalIPs")]
    pub total_ips: u64,
    #[serde(rename = "firstIP")]
    pub first_ip: Ipv4Addr,
    #[serde(rename = "lastIP")]
    pub last_ip: Ipv4Addr,
}

impl NetworkInfo {
    /// `first - last` address range.
    pub fn address_range(&self) -> String {
        format!("{} - {}", self.first_ip, self.last_ip)
    }
}
