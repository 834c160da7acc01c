//! Splitting a parent network into equal, contiguous subnets.

use crate::error::{Error, Result};
use crate::models::{addr_at, block_size, CidrBlock, CloudProviderConfig, SubnetInfo, MAX_LENGTH};

/// Largest number of subnets a single call may request.
pub const MAX_SUBNETS: usize = 256;

/// Partition `cidr` into `number_of_subnets` subnets.
///
/// With `desired_subnet_prefix` the subnets use that prefix; otherwise the
/// smallest prefix that fits the requested count is chosen. Subnets are
/// allocated from the network base upwards without gaps, zones are assigned
/// round-robin.
///
/// # Arguments
/// * `cidr` - Parent network, re-aligned to its prefix
/// * `number_of_subnets` - Requested count, 1 to [`MAX_SUBNETS`]
/// * `config` - Provider policy
/// * `desired_subnet_prefix` - Explicit subnet prefix; `None` or `Some(0)` means automatic
///
/// # Returns
/// * `Ok(Vec<SubnetInfo>)` - Subnets in allocation order
/// * `Err` - The first validation that failed, never a partial list
pub fn calculate_subnets(
    cidr: &str,
    number_of_subnets: usize,
    config: &CloudProviderConfig,
    desired_subnet_prefix: Option<u8>,
) -> Result<Vec<SubnetInfo>> {
    log::info!(
        "#Start calculate_subnets() cidr={cidr} subnets={number_of_subnets} prefix={desired_subnet_prefix:?}"
    );
    let parent = parse_parent(cidr, config)?;

    if !(1..=MAX_SUBNETS).contains(&number_of_subnets) {
        return Err(Error::InvalidSubnetCount {
            requested: number_of_subnets,
            max: MAX_SUBNETS,
        });
    }

    let subnet_prefix = match desired_subnet_prefix.filter(|p| *p > 0) {
        Some(prefix) => explicit_prefix(&parent, prefix, number_of_subnets, config)?,
        None => automatic_prefix(&parent, number_of_subnets, config)?,
    };

    let subnet_size = block_size(subnet_prefix);
    if subnet_size <= config.reserved_ip_count as u64 {
        return Err(Error::SubnetTooSmallForReservations {
            subnet_prefix,
            subnet_size,
            reserved: config.reserved_ip_count,
        });
    }

    let count = number_of_subnets.min((parent.size() / subnet_size) as usize);
    let subnets: Vec<SubnetInfo> = (0..count)
        .map(|i| build_subnet(parent.base(), i, subnet_prefix, config))
        .collect();

    log::info!("# {parent} -> {} subnet(s) of /{subnet_prefix}", subnets.len());
    Ok(subnets)
}

/// Parse the parent network and check it against the provider's largest
/// network. A parent below the smallest subnet size fails later, once the
/// subnet prefix is known.
fn parse_parent(cidr: &str, config: &CloudProviderConfig) -> Result<CidrBlock> {
    let parent: CidrBlock = cidr.parse()?;
    if parent.prefix < config.max_cidr_prefix {
        return Err(Error::invalid_cidr(
            cidr,
            format!(
                "network /{} is larger than cloud provider maximum /{}",
                parent.prefix, config.max_cidr_prefix
            ),
        ));
    }
    Ok(parent)
}

fn explicit_prefix(
    parent: &CidrBlock,
    prefix: u8,
    number_of_subnets: usize,
    config: &CloudProviderConfig,
) -> Result<u8> {
    if prefix < parent.prefix {
        return Err(Error::SubnetPrefixTooLarge {
            subnet_prefix: prefix,
            network_prefix: parent.prefix,
        });
    }
    if prefix > config.min_cidr_prefix {
        return Err(Error::SubnetBelowProviderMinimum {
            network_prefix: parent.prefix,
            requested: number_of_subnets,
            subnet_prefix: prefix as u32,
            minimum: config.min_cidr_prefix,
        });
    }
    if prefix < config.max_cidr_prefix {
        return Err(Error::SubnetAboveProviderMaximum {
            subnet_prefix: prefix,
            maximum: config.max_cidr_prefix,
        });
    }
    if prefix > MAX_LENGTH {
        return Err(Error::AddressSpaceExhausted {
            network_prefix: parent.prefix,
            requested: number_of_subnets,
            subnet_prefix: prefix as u32,
        });
    }

    let max_possible = parent.size() / block_size(prefix);
    if max_possible < number_of_subnets as u64 {
        return Err(Error::InsufficientCapacity {
            requested: number_of_subnets,
            subnet_prefix: prefix,
            network_prefix: parent.prefix,
            max_possible,
        });
    }
    Ok(prefix)
}

fn automatic_prefix(
    parent: &CidrBlock,
    number_of_subnets: usize,
    config: &CloudProviderConfig,
) -> Result<u8> {
    let prefix = parent.prefix as u32 + bits_needed(number_of_subnets);
    if prefix > config.min_cidr_prefix as u32 {
        return Err(Error::SubnetBelowProviderMinimum {
            network_prefix: parent.prefix,
            requested: number_of_subnets,
            subnet_prefix: prefix,
            minimum: config.min_cidr_prefix,
        });
    }
    if prefix > MAX_LENGTH as u32 {
        return Err(Error::AddressSpaceExhausted {
            network_prefix: parent.prefix,
            requested: number_of_subnets,
            subnet_prefix: prefix,
        });
    }
    Ok(prefix as u8)
}

/// `ceil(log2(n))` for n >= 1.
fn bits_needed(n: usize) -> u32 {
    n.next_power_of_two().trailing_zeros()
}

fn build_subnet(
    parent_base: u32,
    index: usize,
    prefix: u8,
    config: &CloudProviderConfig,
) -> SubnetInfo {
    let size = block_size(prefix);
    let start = index as u64 * size;
    let subnet_base = addr_at(parent_base, start);
    let base = u32::from(subnet_base);

    let reserved_count = config.reserved_ip_count as u64;
    let head = reserved_count.div_ceil(2);
    let tail = reserved_count / 2;

    let reserved = (0..head)
        .map(|j| addr_at(base, j))
        .chain((1..=tail).rev().map(|j| addr_at(base, size - j)))
        .collect();

    let first_usable = addr_at(base, head);
    let last_usable = addr_at(base, size - (tail + 1));
    let zone = config.zone_for(index).map(str::to_string);

    log::debug!("subnet[{index}] {subnet_base}/{prefix} usable {first_usable} - {last_usable}");

    let cidr = CidrBlock {
        addr: subnet_base,
        prefix,
    };

    SubnetInfo {
        network: subnet_base,
        cidr,
        mask: cidr.mask(),
        total_ips: size,
        usable_ips: size - reserved_count,
        reserved,
        usable_range: format!("{first_usable} - {last_usable}"),
        availability_zone: zone.clone(),
        region: zone.clone(),
        availability_domain: zone.clone(),
        zone,
    }
}
