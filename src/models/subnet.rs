//! Planned subnet data model.

use super::CidrBlock;
use serde::Serialize;
use std::net::Ipv4Addr;

/// One subnet produced by the partitioner.
///
/// The zone label is written to all four zone fields so templates can use
/// whichever name their provider expects.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetInfo {
    /// Network address of the subnet.
    pub network: Ipv4Addr,
    /// Subnet in CIDR notation.
    pub cidr: CidrBlock,
    /// Dotted subnet mask.
    pub mask: Ipv4Addr,
    #[serde(rename = "totalIPs")]
    pub total_ips: u64,
    #[serde(rename = "usableIPs")]
    pub usable_ips: u64,
    /// Reserved addresses, leading ones first.
    pub reserved: Vec<Ipv4Addr>,
    /// `first - last` usable address.
    pub usable_range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl SubnetInfo {
    /// The zone label, if the provider assigns one.
    pub fn zone_label(&self) -> Option<&str> {
        self.availability_zone.as_deref()
    }

    /// Reserved addresses joined with `sep`.
    pub fn reserved_list(&self, sep: &str) -> String {
        self.reserved
            .iter()
            .map(|ip| ip.to_string())
            .collect::<Vec<String>>()
            .join(sep)
    }
}
