//! Hub-spoke topologies: one hub network plus independently partitioned
//! spoke networks, and detection of networks whose address spaces overlap.

use super::{calculate_network, calculate_subnets};
use crate::error::{Error, Result};
use crate::models::{CidrBlock, CloudProviderConfig, NetworkInfo, Provider, SubnetInfo};
use serde::Serialize;

/// Subnet count used for a spoke when none is given.
pub const DEFAULT_SPOKE_SUBNETS: usize = 2;

/// A spoke network to plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokeRequest {
    pub cidr: String,
    pub number_of_subnets: usize,
}

/// One planned network (hub or spoke).
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VnetPlan {
    /// 1-based position among the spokes, 0 for the hub.
    pub index: usize,
    pub cidr: String,
    pub number_of_subnets: usize,
    pub vnet_info: NetworkInfo,
    pub subnets: Vec<SubnetInfo>,
}

impl VnetPlan {
    /// Aligned block of the whole network.
    pub fn block(&self) -> CidrBlock {
        CidrBlock {
            addr: self.vnet_info.network,
            prefix: (32 - self.vnet_info.total_ips.trailing_zeros()) as u8,
        }
    }
}

/// A hub with its spokes, all planned against the same provider.
#[derive(Debug, Clone)]
pub struct TopologyPlan {
    pub provider: Provider,
    pub hub: VnetPlan,
    pub spokes: Vec<VnetPlan>,
}

impl TopologyPlan {
    pub fn peering_enabled(&self) -> bool {
        !self.spokes.is_empty()
    }

    /// Hub first, then spokes.
    pub fn networks(&self) -> impl Iterator<Item = &VnetPlan> {
        std::iter::once(&self.hub).chain(self.spokes.iter())
    }
}

/// Represents two planned networks sharing addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapConflict {
    pub first: CidrBlock,
    pub second: CidrBlock,
}

/// Pair spoke CIDRs with their subnet counts.
///
/// An empty `counts` gives every spoke [`DEFAULT_SPOKE_SUBNETS`]; otherwise
/// the lengths must match.
pub fn pair_spokes(cidrs: &[String], counts: &[usize]) -> Result<Vec<SpokeRequest>> {
    if !counts.is_empty() && counts.len() != cidrs.len() {
        return Err(Error::SpokeCountMismatch {
            cidrs: cidrs.len(),
            counts: counts.len(),
        });
    }
    Ok(cidrs
        .iter()
        .enumerate()
        .map(|(i, cidr)| SpokeRequest {
            cidr: cidr.trim().to_string(),
            number_of_subnets: counts.get(i).copied().unwrap_or(DEFAULT_SPOKE_SUBNETS),
        })
        .collect())
}

/// Plan the hub and every spoke.
///
/// The hub may use an explicit subnet prefix; spokes are always sized
/// automatically. A failure names the network that caused it.
pub fn plan_topology(
    provider: Provider,
    config: &CloudProviderConfig,
    hub_cidr: &str,
    hub_subnets: usize,
    hub_prefix: Option<u8>,
    spokes: &[SpokeRequest],
) -> Result<TopologyPlan> {
    log::info!(
        "#Start plan_topology() provider={provider} hub={hub_cidr} spokes={}",
        spokes.len()
    );
    let hub = plan_vnet(0, hub_cidr, hub_subnets, hub_prefix, config).map_err(|e| {
        if spokes.is_empty() {
            e
        } else {
            Error::Hub {
                source: Box::new(e),
            }
        }
    })?;

    let spokes = spokes
        .iter()
        .enumerate()
        .map(|(i, spoke)| {
            plan_vnet(i + 1, &spoke.cidr, spoke.number_of_subnets, None, config).map_err(|e| {
                Error::Spoke {
                    index: i + 1,
                    cidr: spoke.cidr.clone(),
                    source: Box::new(e),
                }
            })
        })
        .collect::<Result<Vec<VnetPlan>>>()?;

    Ok(TopologyPlan {
        provider,
        hub,
        spokes,
    })
}

fn plan_vnet(
    index: usize,
    cidr: &str,
    number_of_subnets: usize,
    prefix: Option<u8>,
    config: &CloudProviderConfig,
) -> Result<VnetPlan> {
    let subnets = calculate_subnets(cidr, number_of_subnets, config, prefix)?;
    let vnet_info = calculate_network(cidr, config)?;
    Ok(VnetPlan {
        index,
        cidr: cidr.to_string(),
        number_of_subnets,
        vnet_info,
        subnets,
    })
}

/// Find every pair of planned networks whose address ranges overlap.
pub fn find_overlaps(plan: &TopologyPlan) -> Vec<OverlapConflict> {
    let blocks: Vec<CidrBlock> = plan.networks().map(VnetPlan::block).collect();
    let mut conflicts = Vec::new();
    for (i, first) in blocks.iter().enumerate() {
        for second in &blocks[i + 1..] {
            if first.overlaps(second) {
                conflicts.push(OverlapConflict {
                    first: *first,
                    second: *second,
                });
            }
        }
    }
    conflicts
}

/// Log overlapping networks as warnings.
pub fn log_overlaps(conflicts: &[OverlapConflict]) {
    if conflicts.is_empty() {
        log::info!("No overlapping network CIDRs found.");
        return;
    }
    log::warn!("Found {} overlapping network CIDR(s):", conflicts.len());
    for conflict in conflicts {
        log::warn!("  {} overlaps {}", conflict.first, conflict.second);
    }
}
