//! JSON output for planned networks and the provider table.

use crate::error::Result;
use crate::models::{CloudProviderConfig, Provider, ProviderRegistry, SubnetInfo};
use crate::processing::{TopologyPlan, VnetPlan};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanDocument<'a> {
    vnet_cidr: &'a str,
    provider: Provider,
    subnets: &'a [SubnetInfo],
    peering_enabled: bool,
    #[serde(rename = "spokeVNets", skip_serializing_if = "Option::is_none")]
    spoke_vnets: Option<&'a [VnetPlan]>,
    #[serde(rename = "spokeVPCs", skip_serializing_if = "Option::is_none")]
    spoke_vpcs: Option<&'a [VnetPlan]>,
}

#[derive(Serialize)]
struct ProviderDocument<'a> {
    name: Provider,
    config: &'a CloudProviderConfig,
}

/// Pretty-printed plan document.
pub fn plan_json(plan: &TopologyPlan) -> Result<String> {
    let spokes = plan.peering_enabled().then_some(plan.spokes.as_slice());
    let vnets = plan.provider.uses_vnets();
    let doc = PlanDocument {
        vnet_cidr: &plan.hub.cidr,
        provider: plan.provider,
        subnets: &plan.hub.subnets,
        peering_enabled: plan.peering_enabled(),
        spoke_vnets: spokes.filter(|_| vnets),
        spoke_vpcs: spokes.filter(|_| !vnets),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Pretty-printed array of `{name, config}`.
pub fn providers_json(registry: &ProviderRegistry) -> Result<String> {
    let docs: Vec<ProviderDocument> = registry
        .iter()
        .map(|(provider, config)| ProviderDocument {
            name: *provider,
            config,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&docs)?)
}
