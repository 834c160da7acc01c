//! Cloud subnet planning: split an IPv4 network into provider-compliant
//! subnets, optionally as a hub with peered spokes.
//!
//! ```
//! use cloud_ipcalc::{calculate_subnets, ProviderRegistry, Provider};
//!
//! let registry = ProviderRegistry::builtin();
//! let aws = registry.get(Provider::Aws).unwrap();
//! let subnets = calculate_subnets("10.0.0.0/16", 3, aws, None).unwrap();
//! assert_eq!(subnets[2].cidr.to_string(), "10.0.128.0/18");
//! assert_eq!(subnets[2].availability_zone.as_deref(), Some("us-east-1c"));
//! ```

pub mod cli;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{Error, Result};
pub use models::{
    CidrBlock, CloudProviderConfig, NetworkInfo, Provider, ProviderRegistry, SubnetInfo,
};
pub use output::OutputFormat;
pub use processing::{
    calculate_network, calculate_subnets, find_overlaps, plan_topology, SpokeRequest, TopologyPlan,
};
