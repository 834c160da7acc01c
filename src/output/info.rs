//! Human-readable network report.

use super::terminal::format_thousands;
use crate::models::{Provider, ProviderRegistry};
use crate::processing::{TopologyPlan, VnetPlan};
use std::fmt::Write;

const HEAVY_RULE: &str = "═══════════════════════════════════════════════════════════";
const LIGHT_RULE: &str = "───────────────────────────────────────────────────────────";

/// Render the hub followed by one section per spoke.
pub fn info_report(plan: &TopologyPlan) -> String {
    let mut out = String::new();
    let provider = plan.provider.as_str().to_uppercase();
    network_section(
        &mut out,
        &format!("Network Information - {provider}"),
        &plan.hub,
        plan.provider,
    );
    for spoke in &plan.spokes {
        network_section(
            &mut out,
            &format!("Spoke {} Network - {provider}", spoke.index),
            spoke,
            plan.provider,
        );
    }
    out
}

fn network_section(out: &mut String, title: &str, vnet: &VnetPlan, provider: Provider) {
    write_section(out, title, vnet, provider).expect("writing to a String cannot fail");
}

fn write_section(
    out: &mut String,
    title: &str,
    vnet: &VnetPlan,
    provider: Provider,
) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "{HEAVY_RULE}")?;
    writeln!(out, "  {title}")?;
    writeln!(out, "{HEAVY_RULE}")?;
    writeln!(out)?;
    writeln!(out, "  Network Address:  {}", vnet.vnet_info.network)?;
    writeln!(out, "  CIDR Notation:    {}", vnet.cidr)?;
    writeln!(out, "  Total IPs:        {}", format_thousands(vnet.vnet_info.total_ips))?;
    writeln!(out, "  Address Range:    {}", vnet.vnet_info.address_range())?;
    writeln!(out, "  Subnets:          {}", vnet.subnets.len())?;
    writeln!(out)?;
    writeln!(out, "{LIGHT_RULE}")?;
    writeln!(out, "  Subnet Details")?;
    writeln!(out, "{LIGHT_RULE}")?;
    writeln!(out)?;

    for (i, subnet) in vnet.subnets.iter().enumerate() {
        writeln!(out, "  Subnet {}:", i + 1)?;
        writeln!(out, "    CIDR:           {}", subnet.cidr)?;
        writeln!(out, "    Network:        {}", subnet.network)?;
        writeln!(out, "    Mask:           {}", subnet.mask)?;
        writeln!(out, "    Total IPs:      {}", subnet.total_ips)?;
        writeln!(out, "    Usable IPs:     {}", subnet.usable_ips)?;
        writeln!(out, "    Usable Range:   {}", subnet.usable_range)?;
        if let (Some(label), Some(zone)) = (provider.zone_label(), subnet.zone_label()) {
            writeln!(out, "    {:<16}{zone}", format!("{label}:"))?;
        }
        writeln!(out, "    Reserved IPs:   {}", subnet.reserved_list(", "))?;
        writeln!(out)?;
    }

    writeln!(out, "{HEAVY_RULE}")?;
    writeln!(out)
}

/// Table of every provider's policy.
pub fn providers_table(registry: &ProviderRegistry) -> String {
    let mut out = String::new();
    write_providers(&mut out, registry).expect("writing to a String cannot fail");
    out
}

fn write_providers(out: &mut String, registry: &ProviderRegistry) -> std::fmt::Result {
    writeln!(
        out,
        "{:<12} {:>8} {:>10} {:>10}  zones",
        "provider", "reserved", "min prefix", "max prefix"
    )?;
    for (provider, config) in registry.iter() {
        let zones = if config.availability_zones.is_empty() {
            "-".to_string()
        } else {
            config.availability_zones.join(", ")
        };
        writeln!(
            out,
            "{:<12} {:>8} {:>10} {:>10}  {zones}",
            provider.as_str(),
            config.reserved_ip_count,
            format!("/{}", config.min_cidr_prefix),
            format!("/{}", config.max_cidr_prefix),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{plan_topology, SpokeRequest};

    fn plan(provider: Provider, cidr: &str, n: usize, spokes: &[SpokeRequest]) -> TopologyPlan {
        let registry = ProviderRegistry::builtin();
        let config = registry.get(provider).unwrap();
        plan_topology(provider, config, cidr, n, None, spokes).unwrap()
    }

    #[test]
    fn test_info_report_gcp() {
        let report = info_report(&plan(Provider::Gcp, "10.0.0.0/16", 3, &[]));
        assert!(report.contains("  Network Information - GCP\n"));
        assert!(report.contains("  Total IPs:        65,536\n"));
        assert!(report.contains("  Address Range:    10.0.0.0 - 10.0.255.255\n"));
        assert!(report.contains("  Subnets:          3\n"));
        assert!(report.contains("  Subnet 3:\n    CIDR:           10.0.128.0/18\n"));
        assert!(report.contains("    Region:         us-west1\n"));
        assert!(report.contains("    Mask:           255.255.192.0\n"));
    }

    #[test]
    fn test_info_report_without_zones() {
        let report = info_report(&plan(Provider::Azure, "172.16.1.0/24", 4, &[]));
        assert!(!report.contains("AZ/Zone"));
        assert!(report.contains(
            "    Reserved IPs:   172.16.1.0, 172.16.1.1, 172.16.1.2, 172.16.1.62, 172.16.1.63\n"
        ));
    }

    #[test]
    fn test_info_report_spokes() {
        let spokes = vec![SpokeRequest {
            cidr: "10.1.0.0/16".to_string(),
            number_of_subnets: 2,
        }];
        let report = info_report(&plan(Provider::Oracle, "10.0.0.0/16", 2, &spokes));
        assert!(report.contains("  Spoke 1 Network - ORACLE\n"));
        assert!(report.contains("    AD:             AD-2\n"));
        assert!(report.contains("    CIDR:           10.1.128.0/17\n"));
    }

    #[test]
    fn test_providers_table() {
        let table = providers_table(&ProviderRegistry::builtin());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("azure"));
        assert!(lines[1].ends_with("  -"));
        assert!(lines[4].contains("AD-1, AD-2, AD-3"));
    }
}
