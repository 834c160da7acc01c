//! Command-line options and the plan-and-render entry point.

use crate::error::{Error, Result};
use crate::models::ProviderRegistry;
use crate::output::{render_plan, render_providers, OutputFormat};
use crate::processing::{find_overlaps, log_overlaps, pair_spokes, plan_topology};
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "cloud-ipcalc",
    about = "Plans the division of an IPv4 network into cloud provider subnets."
)]
pub struct Opt {
    /// Cloud provider: azure, aws, gcp, oracle, alicloud or onpremises
    #[structopt(short, long, env = "IPCALC_PROVIDER")]
    pub provider: Option<String>,

    /// Hub network CIDR, e.g. 10.0.0.0/16
    #[structopt(short, long, alias = "base-cidr")]
    pub cidr: Option<String>,

    /// Number of subnets to create (1-256)
    #[structopt(short, long)]
    pub subnets: Option<usize>,

    /// Explicit subnet prefix length
    #[structopt(long)]
    pub prefix: Option<u8>,

    /// Output format: info, json or csv
    #[structopt(short, long, default_value = "info")]
    pub output: String,

    /// Write the output to this file instead of stdout
    #[structopt(short, long)]
    pub file: Option<PathBuf>,

    /// Spoke network CIDRs, comma separated
    #[structopt(long, use_delimiter = true)]
    pub spoke_cidrs: Vec<String>,

    /// Subnet count per spoke, comma separated (default 2 each)
    #[structopt(long, use_delimiter = true)]
    pub spoke_subnets: Vec<usize>,

    /// List the supported providers and their settings
    #[structopt(long)]
    pub list_providers: bool,
}

/// Plan the requested networks and render them.
pub fn run(opt: &Opt, registry: &ProviderRegistry) -> Result<String> {
    let format: OutputFormat = opt.output.parse()?;
    if opt.list_providers {
        return render_providers(registry, format);
    }

    let name = opt
        .provider
        .as_deref()
        .ok_or(Error::MissingArgument("Provider"))?;
    let (provider, config) = registry.lookup(name)?;
    let cidr = opt.cidr.as_deref().unwrap_or(&config.default_cidr);
    let subnets = opt.subnets.unwrap_or(config.default_subnet_count);
    log::info!("#Start run() provider={provider} cidr={cidr} subnets={subnets} output={format}");

    let spokes = pair_spokes(&opt.spoke_cidrs, &opt.spoke_subnets)?;
    let plan = plan_topology(provider, config, cidr, subnets, opt.prefix, &spokes)?;
    log_overlaps(&find_overlaps(&plan));

    render_plan(&plan, format)
}

/// Write rendered output to `path`.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    log::info!("Writing output to {}", path.display());
    std::fs::write(path, content)?;
    Ok(())
}
