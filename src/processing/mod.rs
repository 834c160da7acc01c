//! Subnet planning logic.
//!
//! - [`network`] - Address space of a parent network
//! - [`partition`] - Splitting a network into subnets
//! - [`topology`] - Hub-spoke planning and overlap detection

mod network;
mod partition;
mod topology;

// Re-export public functions
pub use network::calculate_network;
pub use partition::{calculate_subnets, MAX_SUBNETS};
pub use topology::{
    find_overlaps, log_overlaps, pair_spokes, plan_topology, OverlapConflict, SpokeRequest,
    TopologyPlan, VnetPlan, DEFAULT_SPOKE_SUBNETS,
};
