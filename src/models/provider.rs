//! Cloud provider policy: reserved addresses, prefix limits and zones.

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Supported provider identifiers.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Azure,
    Aws,
    Gcp,
    Oracle,
    AliCloud,
    OnPremises,
}

impl Provider {
    /// All providers in display order.
    pub const ALL: [Provider; 6] = [
        Provider::Azure,
        Provider::Aws,
        Provider::Gcp,
        Provider::Oracle,
        Provider::AliCloud,
        Provider::OnPremises,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Azure => "azure",
            Provider::Aws => "aws",
            Provider::Gcp => "gcp",
            Provider::Oracle => "oracle",
            Provider::AliCloud => "alicloud",
            Provider::OnPremises => "onpremises",
        }
    }

    /// Label used for the zone line of the info report.
    pub fn zone_label(&self) -> Option<&'static str> {
        match self {
            Provider::Azure | Provider::Aws => Some("AZ/Zone"),
            Provider::Gcp => Some("Region"),
            Provider::Oracle => Some("AD"),
            Provider::AliCloud => Some("Zone"),
            Provider::OnPremises => None,
        }
    }

    /// Azure calls its networks VNets, the others VPCs.
    pub fn uses_vnets(&self) -> bool {
        matches!(self, Provider::Azure)
    }

    fn available() -> String {
        Provider::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<&str>>()
            .join(", ")
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Provider> {
        let lower = s.trim().to_lowercase();
        Provider::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| Error::UnknownProvider {
                name: s.to_string(),
                available: Provider::available(),
            })
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric policy of one provider.
///
/// `min_cidr_prefix` is the smallest subnet the provider allows (the longest
/// prefix number), `max_cidr_prefix` the largest network (the shortest prefix
/// number).
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CloudProviderConfig {
    /// Addresses unusable at the edges of every subnet.
    pub reserved_ip_count: u32,
    pub min_cidr_prefix: u8,
    pub max_cidr_prefix: u8,
    /// Zone/region labels assigned round-robin, possibly empty.
    pub availability_zones: Vec<String>,
    pub default_cidr: String,
    pub default_subnet_count: usize,
}

impl CloudProviderConfig {
    /// Zone for the subnet at `index`, `None` when the provider has no zones.
    pub fn zone_for(&self, index: usize) -> Option<&str> {
        if self.availability_zones.is_empty() {
            return None;
        }
        Some(self.availability_zones[index % self.availability_zones.len()].as_str())
    }
}

fn config(
    reserved_ip_count: u32,
    min_cidr_prefix: u8,
    max_cidr_prefix: u8,
    zones: &[&str],
    default_subnet_count: usize,
) -> CloudProviderConfig {
    CloudProviderConfig {
        reserved_ip_count,
        min_cidr_prefix,
        max_cidr_prefix,
        availability_zones: zones.iter().map(|z| z.to_string()).collect(),
        default_cidr: "172.16.1.0/24".to_string(),
        default_subnet_count,
    }
}

/// Immutable table of provider policies, built once and passed by reference.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    configs: BTreeMap<Provider, CloudProviderConfig>,
}

impl ProviderRegistry {
    /// The built-in provider table.
    pub fn builtin() -> ProviderRegistry {
        let mut configs = BTreeMap::new();
        // First 4 IPs + last IP
        configs.insert(Provider::Azure, config(5, 29, 8, &[], 4));
        configs.insert(
            Provider::Aws,
            config(
                5,
                28,
                16,
                &[
                    "us-east-1a",
                    "us-east-1b",
                    "us-east-1c",
                    "us-east-1d",
                    "us-east-1e",
                    "us-east-1f",
                ],
                3,
            ),
        );
        configs.insert(
            Provider::Gcp,
            config(
                4,
                29,
                8,
                &[
                    "us-central1",
                    "us-east1",
                    "us-west1",
                    "europe-west1",
                    "asia-east1",
                    "asia-southeast1",
                ],
                3,
            ),
        );
        configs.insert(Provider::Oracle, config(3, 30, 16, &["AD-1", "AD-2", "AD-3"], 3));
        configs.insert(
            Provider::AliCloud,
            config(
                6,
                29,
                8,
                &[
                    "cn-hangzhou-a",
                    "cn-hangzhou-b",
                    "cn-hangzhou-c",
                    "cn-hangzhou-d",
                    "cn-hangzhou-e",
                    "cn-hangzhou-f",
                ],
                3,
            ),
        );
        // Network + broadcast
        configs.insert(Provider::OnPremises, config(2, 30, 8, &[], 3));
        ProviderRegistry { configs }
    }

    /// Policy for `provider`.
    pub fn get(&self, provider: Provider) -> Result<&CloudProviderConfig> {
        self.configs
            .get(&provider)
            .ok_or_else(|| Error::UnknownProvider {
                name: provider.to_string(),
                available: self.configs.keys().map(|p| p.as_str()).collect::<Vec<_>>().join(", "),
            })
    }

    /// Look a provider up by its (case-insensitive) name.
    pub fn lookup(&self, name: &str) -> Result<(Provider, &CloudProviderConfig)> {
        let provider: Provider = name.parse()?;
        Ok((provider, self.get(provider)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Provider, &CloudProviderConfig)> {
        self.configs.iter()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
