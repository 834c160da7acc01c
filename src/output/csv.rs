//! CSV output formatting for planned subnets.

use super::terminal::format_field;
use crate::models::ProviderRegistry;
use crate::processing::TopologyPlan;
use itertools::Itertools;

/// One row per subnet, hub first then spokes.
pub fn subnet_csv(plan: &TopologyPlan) -> String {
    log::info!("#Start subnet_csv() networks={}", plan.networks().count());
    let mut lines = vec![
        r#""vnet","vnet_cidr","index","subnet_cidr","mask","total_ips","usable_ips","usable_range","zone","reserved""#
            .to_string(),
    ];

    for vnet in plan.networks() {
        let vnet_name = if vnet.index == 0 {
            "hub".to_string()
        } else {
            format!("spoke{}", vnet.index)
        };
        for (i, subnet) in vnet.subnets.iter().enumerate() {
            lines.push(
                [
                    format_field(&vnet_name, 8),
                    format_field(&vnet.cidr, 18),
                    format_field(i + 1, 5),
                    format_field(subnet.cidr, 18),
                    format_field(subnet.mask, 17),
                    format_field(subnet.total_ips, 10),
                    format_field(subnet.usable_ips, 10),
                    format_field(&subnet.usable_range, 33),
                    format_field(subnet.zone_label().unwrap_or_default(), 17),
                    format_field(subnet.reserved_list(" "), 0),
                ]
                .iter()
                .join(","),
            );
        }
    }
    lines.join("\n") + "\n"
}

/// One row per provider.
pub fn providers_csv(registry: &ProviderRegistry) -> String {
    let mut lines =
        vec![r#""provider","reserved_ip_count","min_cidr_prefix","max_cidr_prefix","zones""#.to_string()];
    for (provider, config) in registry.iter() {
        lines.push(
            [
                format_field(provider, 12),
                format_field(config.reserved_ip_count, 3),
                format_field(config.min_cidr_prefix, 4),
                format_field(config.max_cidr_prefix, 4),
                format_field(config.availability_zones.iter().join(" "), 0),
            ]
            .iter()
            .join(","),
        );
    }
    lines.join("\n") + "\n"
}
