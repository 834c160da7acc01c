//! Domain models for subnet planning.
//!
//! - [`CidrBlock`] and the IPv4 arithmetic helpers
//! - [`SubnetInfo`] - one planned subnet
//! - [`NetworkInfo`] - summary of a parent network
//! - [`Provider`], [`CloudProviderConfig`] and [`ProviderRegistry`] - provider policy

mod ipv4;
mod network;
mod provider;
mod subnet;

// Re-export public types
pub use ipv4::{
    addr_at, block_size, cidr_to_mask, get_cidr_mask, ip_to_number, number_to_ip, parse_cidr,
    parse_ip, CidrBlock, MAX_LENGTH,
};
pub use network::NetworkInfo;
pub use provider::{CloudProviderConfig, Provider, ProviderRegistry};
pub use subnet::SubnetInfo;
