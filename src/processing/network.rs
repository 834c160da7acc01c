//! Network address space of a parent CIDR block.

use crate::error::Result;
use crate::models::{addr_at, parse_cidr, CloudProviderConfig, NetworkInfo};

/// Compute base, size and first/last address of `cidr` under the provider's
/// prefix bounds.
///
/// # Arguments
/// * `cidr` - Network in CIDR notation, need not be aligned
/// * `config` - Provider policy supplying the prefix bounds
///
/// # Returns
/// * `Ok(NetworkInfo)` - The aligned network summary
/// * `Err(Error::InvalidCidr)` - Malformed CIDR or prefix outside the bounds
pub fn calculate_network(cidr: &str, config: &CloudProviderConfig) -> Result<NetworkInfo> {
    let block = parse_cidr(cidr, config.max_cidr_prefix, config.min_cidr_prefix)?;
    let base = block.base();
    let total_ips = block.size();
    log::debug!("calculate_network({cidr}) base={} total={total_ips}", block.network());

    Ok(NetworkInfo {
        network: block.network(),
        total_ips,
        first_ip: block.network(),
        last_ip: addr_at(base, total_ips - 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{Provider, ProviderRegistry};
    use std::net::Ipv4Addr;

    #[test]
    fn test_calculate_network_aligns_base() {
        let registry = ProviderRegistry::builtin();
        let azure = registry.get(Provider::Azure).unwrap();

        let info = calculate_network("10.1.2.3/16", azure).unwrap();
        assert_eq!(info.network, Ipv4Addr::new(10, 1, 0, 0));
        assert_eq!(info.first_ip, Ipv4Addr::new(10, 1, 0, 0));
        assert_eq!(info.last_ip, Ipv4Addr::new(10, 1, 255, 255));
        assert_eq!(info.total_ips, 65536);
        assert_eq!(info.address_range(), "10.1.0.0 - 10.1.255.255");
    }

    #[test]
    fn test_calculate_network_edges() {
        let registry = ProviderRegistry::builtin();
        let onprem = registry.get(Provider::OnPremises).unwrap();

        let info = calculate_network("255.0.0.0/8", onprem).unwrap();
        assert_eq!(info.last_ip, Ipv4Addr::new(255, 255, 255, 255));
        assert_eq!(info.total_ips, 16_777_216);

        let info = calculate_network("192.168.0.7/30", onprem).unwrap();
        assert_eq!(info.network, Ipv4Addr::new(192, 168, 0, 4));
        assert_eq!(info.last_ip, Ipv4Addr::new(192, 168, 0, 7));
    }

    #[test]
    fn test_calculate_network_rejects_out_of_bounds() {
        let registry = ProviderRegistry::builtin();
        let aws = registry.get(Provider::Aws).unwrap();
        assert!(matches!(
            calculate_network("10.0.0.0/8", aws),
            Err(Error::InvalidCidr { .. })
        ));
        assert!(matches!(
            calculate_network("10.0.0.0/29", aws),
            Err(Error::InvalidCidr { .. })
        ));
        assert!(calculate_network("not-a-cidr", aws).is_err());
    }
}
