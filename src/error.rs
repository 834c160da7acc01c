//! Error types for subnet planning.

use thiserror::Error;

/// Result type for planning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the planner can report.
///
/// Calculation failures carry the prefix that was attempted and the limit it
/// violated so the message can be shown to the user as-is.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid IP address: '{0}'")]
    InvalidAddress(String),

    #[error("Invalid CIDR notation '{cidr}': {reason}. Use format: 10.0.0.0/16")]
    InvalidCidr { cidr: String, reason: String },

    #[error("Number of subnets must be between 1 and {max}, got {requested}")]
    InvalidSubnetCount { requested: usize, max: usize },

    #[error(
        "Desired subnet prefix /{subnet_prefix} is larger than network prefix /{network_prefix}. \
         Subnet must be smaller than or equal to network."
    )]
    SubnetPrefixTooLarge {
        subnet_prefix: u8,
        network_prefix: u8,
    },

    #[error(
        "Cannot divide /{network_prefix} into {requested} subnets. \
         Each subnet would be /{subnet_prefix}, smaller than /{minimum} (cloud provider minimum)."
    )]
    SubnetBelowProviderMinimum {
        network_prefix: u8,
        requested: usize,
        subnet_prefix: u32,
        minimum: u8,
    },

    #[error("Desired subnet prefix /{subnet_prefix} is larger than cloud provider maximum /{maximum}.")]
    SubnetAboveProviderMaximum { subnet_prefix: u8, maximum: u8 },

    #[error(
        "Cannot create {requested} subnets with prefix /{subnet_prefix} in a /{network_prefix} network. \
         Maximum possible: {max_possible} subnet(s). \
         Use a larger prefix (smaller subnets) or reduce the number of subnets."
    )]
    InsufficientCapacity {
        requested: usize,
        subnet_prefix: u8,
        network_prefix: u8,
        max_possible: u64,
    },

    #[error(
        "Cannot divide /{network_prefix} into {requested} subnets. \
         Would require /{subnet_prefix} which exceeds /32."
    )]
    AddressSpaceExhausted {
        network_prefix: u8,
        requested: usize,
        subnet_prefix: u32,
    },

    #[error(
        "Subnet /{subnet_prefix} holds {subnet_size} addresses, \
         not enough for {reserved} reserved addresses."
    )]
    SubnetTooSmallForReservations {
        subnet_prefix: u8,
        subnet_size: u64,
        reserved: u32,
    },

    #[error("Unsupported cloud provider: '{name}'. Available providers: {available}")]
    UnknownProvider { name: String, available: String },

    #[error("Output format '{0}' is not supported. Use one of: info, json, csv")]
    UnsupportedOutput(String),

    #[error("{0} is required")]
    MissingArgument(&'static str),

    #[error("Number of spoke subnet counts ({counts}) must match number of spoke CIDRs ({cidrs})")]
    SpokeCountMismatch { cidrs: usize, counts: usize },

    #[error("Hub network error: {source}")]
    Hub { source: Box<Error> },

    #[error("Spoke {index} ({cidr}) error: {source}")]
    Spoke {
        index: usize,
        cidr: String,
        source: Box<Error>,
    },

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an [`Error::InvalidCidr`].
    pub fn invalid_cidr(cidr: &str, reason: impl Into<String>) -> Self {
        Error::InvalidCidr {
            cidr: cidr.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_message_names_maximum() {
        let err = Error::InsufficientCapacity {
            requested: 8,
            subnet_prefix: 26,
            network_prefix: 24,
            max_possible: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("Cannot create 8 subnets with prefix /26 in a /24 network"));
        assert!(msg.contains("Maximum possible: 4 subnet(s)"));
    }

    #[test]
    fn test_spoke_error_wraps_cause() {
        let err = Error::Spoke {
            index: 2,
            cidr: "10.2.0.0/33".to_string(),
            source: Box::new(Error::invalid_cidr("10.2.0.0/33", "prefix out of range")),
        };
        assert!(err.to_string().starts_with("Spoke 2 (10.2.0.0/33) error: Invalid CIDR"));
    }
}
