//! IPv4 address arithmetic and CIDR notation.
//!
//! Provides the dotted-quad <-> integer conversions, prefix masks and the
//! [`CidrBlock`] type used by the calculators.

use crate::error::{Error, Result};
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::OnceLock;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Four dot-separated runs of decimal digits.
static DOTTED_QUAD_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_dotted_quad_regex() -> &'static Regex {
    DOTTED_QUAD_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("Invalid Regex")
    })
}

/// Parse a dotted-quad string into its four octets.
///
/// Leading zeros are accepted (`010` is 10); anything that is not four
/// decimal integers in `0..=255` is an [`Error::InvalidAddress`].
///
/// # Examples
/// ```
/// use cloud_ipcalc::models::parse_ip;
/// assert_eq!(parse_ip("10.0.1.2").unwrap(), [10, 0, 1, 2]);
/// assert!(parse_ip("10.0.256.1").is_err());
/// ```
pub fn parse_ip(s: &str) -> Result<[u8; 4]> {
    let caps = get_dotted_quad_regex()
        .captures(s.trim())
        .ok_or_else(|| Error::InvalidAddress(s.to_string()))?;

    let mut octets = [0u8; 4];
    for (i, octet) in octets.iter_mut().enumerate() {
        *octet = caps[i + 1]
            .parse::<u8>()
            .map_err(|_| Error::InvalidAddress(s.to_string()))?;
    }
    Ok(octets)
}

/// Big-endian 32-bit value of four octets.
pub fn ip_to_number(octets: [u8; 4]) -> u32 {
    ((octets[0] as u32) << 24)
        | ((octets[1] as u32) << 16)
        | ((octets[2] as u32) << 8)
        | octets[3] as u32
}

/// Inverse of [`ip_to_number`].
pub fn number_to_ip(num: u32) -> [u8; 4] {
    [
        (num >> 24) as u8,
        ((num >> 16) & 0xFF) as u8,
        ((num >> 8) & 0xFF) as u8,
        (num & 0xFF) as u8,
    ]
}

/// Convert a prefix length to a subnet mask as u32.
///
/// Prefix 0 yields an all-zero mask; anything at or above 32 yields all ones.
///
/// # Examples
/// ```
/// use cloud_ipcalc::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> u32 {
    match len {
        0 => 0,
        len if len >= MAX_LENGTH => u32::MAX,
        len => u32::MAX << (MAX_LENGTH - len),
    }
}

/// Dotted subnet mask for a prefix length, built octet by octet.
pub fn cidr_to_mask(len: u8) -> [u8; 4] {
    let mut mask = [0u8; 4];
    for (i, octet) in mask.iter_mut().enumerate() {
        let bits = (len as i32 - i as i32 * 8).clamp(0, 8) as u32;
        *octet = ((0xFFu32 << (8 - bits)) & 0xFF) as u8;
    }
    mask
}

/// Number of addresses covered by a prefix length.
pub fn block_size(len: u8) -> u64 {
    1u64 << (MAX_LENGTH - len.min(MAX_LENGTH))
}

/// Address `offset` positions after `base`, wrapped to 32 bits.
pub fn addr_at(base: u32, offset: u64) -> Ipv4Addr {
    Ipv4Addr::from(((base as u64 + offset) & 0xFFFF_FFFF) as u32)
}

/// Parse `address/prefix` with the prefix restricted to
/// `shortest_prefix..=longest_prefix`.
///
/// Providers describe their bounds as `maxCidrPrefix` (largest network, the
/// shortest prefix) and `minCidrPrefix` (smallest subnet, the longest
/// prefix), so callers pass them in that order.
///
/// # Examples
/// ```
/// use cloud_ipcalc::models::parse_cidr;
/// assert!(parse_cidr("10.0.0.0/16", 8, 29).is_ok());
/// assert!(parse_cidr("10.0.0.0/30", 8, 29).is_err());
/// ```
pub fn parse_cidr(cidr: &str, shortest_prefix: u8, longest_prefix: u8) -> Result<CidrBlock> {
    let block: CidrBlock = cidr.parse()?;
    if block.prefix < shortest_prefix || block.prefix > longest_prefix {
        return Err(Error::invalid_cidr(
            cidr,
            format!("prefix /{} is outside /{shortest_prefix}../{longest_prefix}", block.prefix),
        ));
    }
    Ok(block)
}

/// An IPv4 address with a prefix length, e.g. `10.0.0.0/16`.
///
/// The address need not be network aligned; [`CidrBlock::network`] gives the
/// aligned base.
#[derive(Eq, Ord, PartialEq, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct CidrBlock {
    /// The IPv4 address as written.
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub prefix: u8,
}

impl CidrBlock {
    /// Create a block, rejecting prefixes above 32.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<CidrBlock> {
        if prefix > MAX_LENGTH {
            return Err(Error::invalid_cidr(
                &format!("{addr}/{prefix}"),
                "network length is too long",
            ));
        }
        Ok(CidrBlock { addr, prefix })
    }

    /// Network base as u32.
    pub fn base(&self) -> u32 {
        u32::from(self.addr) & get_cidr_mask(self.prefix)
    }

    /// Get the lowest (network) address in the block.
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.base())
    }

    /// Get the highest (broadcast) address in the block.
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.base() | !get_cidr_mask(self.prefix))
    }

    /// Total number of addresses in the block.
    pub fn size(&self) -> u64 {
        block_size(self.prefix)
    }

    /// Dotted subnet mask.
    pub fn mask(&self) -> Ipv4Addr {
        Ipv4Addr::from(cidr_to_mask(self.prefix))
    }

    /// The same block with its address aligned to the network base.
    pub fn aligned(&self) -> CidrBlock {
        CidrBlock {
            addr: self.network(),
            prefix: self.prefix,
        }
    }

    /// Check if an IP address is contained within this block.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        ip >= self.network() && ip <= self.broadcast()
    }

    /// Check if `other` lies entirely inside this block.
    pub fn contains_block(&self, other: &CidrBlock) -> bool {
        other.prefix >= self.prefix && self.contains(other.network())
    }

    /// Check if the two blocks share at least one address.
    pub fn overlaps(&self, other: &CidrBlock) -> bool {
        self.network() <= other.broadcast() && other.network() <= self.broadcast()
    }
}

impl FromStr for CidrBlock {
    type Err = Error;

    /// Parse `a.b.c.d/n` with any prefix in 0..=32.
    fn from_str(s: &str) -> Result<CidrBlock> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 {
            return Err(Error::invalid_cidr(s, "expected address/prefix"));
        }
        let octets = parse_ip(parts[0])
            .map_err(|_| Error::invalid_cidr(s, format!("invalid address {}", parts[0])))?;
        let prefix: u8 = parts[1]
            .parse()
            .map_err(|_| Error::invalid_cidr(s, format!("invalid prefix {}", parts[1])))?;
        CidrBlock::new(Ipv4Addr::from(octets), prefix)
    }
}

impl Serialize for CidrBlock {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CidrBlock {
    fn deserialize<D>(deserializer: D) -> std::result::Result<CidrBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl std::fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ip() {
        assert_eq!(parse_ip("192.168.1.42").unwrap(), [192, 168, 1, 42]);
        assert_eq!(parse_ip("0.0.0.0").unwrap(), [0, 0, 0, 0]);
        assert_eq!(parse_ip("010.001.0.1").unwrap(), [10, 1, 0, 1]);
        assert!(parse_ip("999.0.0.0").is_err());
        assert!(parse_ip("10.0.0").is_err());
        assert!(parse_ip("10.0.0.0.0").is_err());
        assert!(parse_ip("10.0.0.-1").is_err());
        assert!(parse_ip("10.0.a.1").is_err());
        assert!(parse_ip("").is_err());
    }

    #[test]
    fn test_number_round_trip() {
        for octets in [[0, 0, 0, 0], [10, 0, 1, 255], [172, 16, 1, 64], [255, 255, 255, 255]] {
            assert_eq!(number_to_ip(ip_to_number(octets)), octets);
        }
        assert_eq!(ip_to_number([10, 0, 0, 1]), 0x0A000001);
        assert_eq!(ip_to_number([255, 255, 255, 255]), u32::MAX);
        assert_eq!(number_to_ip(0xC0A8012A), [192, 168, 1, 42]);
    }

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0), 0x00000000);
        assert_eq!(get_cidr_mask(1), 0x80000000);
        assert_eq!(get_cidr_mask(8), 0xFF000000);
        assert_eq!(get_cidr_mask(16), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32), 0xFFFFFFFF);
    }

    #[test]
    fn test_cidr_to_mask() {
        assert_eq!(cidr_to_mask(24), [255, 255, 255, 0]);
        assert_eq!(cidr_to_mask(0), [0, 0, 0, 0]);
        assert_eq!(cidr_to_mask(32), [255, 255, 255, 255]);
        assert_eq!(cidr_to_mask(26), [255, 255, 255, 192]);
        assert_eq!(cidr_to_mask(13), [255, 248, 0, 0]);
        for len in 0..=32 {
            assert_eq!(cidr_to_mask(len), get_cidr_mask(len).to_be_bytes(), "/{len}");
        }
    }

    #[test]
    fn test_parse_cidr_bounds() {
        let block = parse_cidr("10.0.0.0/16", 8, 29).unwrap();
        assert_eq!(block.addr, Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(block.prefix, 16);
        assert!(parse_cidr("10.0.0.0/8", 8, 29).is_ok());
        assert!(parse_cidr("10.0.0.0/29", 8, 29).is_ok());
        assert!(parse_cidr("10.0.0.0/7", 8, 29).is_err());
        assert!(parse_cidr("10.0.0.0/30", 8, 29).is_err());
    }

    #[test]
    fn test_parse_cidr_malformed() {
        assert!(matches!(
            parse_cidr("10.0.0.0/33", 8, 29),
            Err(Error::InvalidCidr { .. })
        ));
        assert!(matches!(
            parse_cidr("999.0.0.0/24", 8, 29),
            Err(Error::InvalidCidr { .. })
        ));
        assert!(parse_cidr("10.0.0.0", 8, 29).is_err());
        assert!(parse_cidr("10.0.0.0/24/1", 8, 29).is_err());
        assert!(parse_cidr("10.0.0.0/abc", 8, 29).is_err());
    }

    #[test]
    fn test_block_bounds() {
        let block: CidrBlock = "192.168.1.42/24".parse().unwrap();
        assert_eq!(block.network(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(block.broadcast(), Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(block.size(), 256);
        assert_eq!(block.mask(), Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(block.aligned().to_string(), "192.168.1.0/24");

        let all: CidrBlock = "0.0.0.0/0".parse().unwrap();
        assert_eq!(all.size(), 1 << 32);
        assert_eq!(all.broadcast(), Ipv4Addr::new(255, 255, 255, 255));

        let host: CidrBlock = "10.1.2.3/32".parse().unwrap();
        assert_eq!(host.network(), host.broadcast());
        assert_eq!(host.size(), 1);
    }

    #[test]
    fn test_containment() {
        let vnet: CidrBlock = "10.0.0.0/16".parse().unwrap();
        let subnet: CidrBlock = "10.0.10.64/26".parse().unwrap();
        let other: CidrBlock = "10.1.0.0/24".parse().unwrap();

        assert!(vnet.contains(Ipv4Addr::new(10, 0, 255, 255)));
        assert!(!vnet.contains(Ipv4Addr::new(10, 1, 0, 0)));
        assert!(vnet.contains_block(&subnet));
        assert!(!subnet.contains_block(&vnet));
        assert!(!vnet.contains_block(&other));
        assert!(vnet.overlaps(&subnet));
        assert!(subnet.overlaps(&vnet));
        assert!(!vnet.overlaps(&other));
    }

    #[test]
    fn test_block_ordering() {
        let ip1: CidrBlock = "10.0.0.1/24".parse().unwrap();
        let ip2: CidrBlock = "10.0.0.2/24".parse().unwrap();
        let ip3: CidrBlock = "10.0.0.1/24".parse().unwrap();

        assert!(ip1 < ip2);
        assert!(ip1 == ip3);
        assert!(ip2 >= ip3);
    }

    #[test]
    fn test_serde_as_string() {
        let block: CidrBlock = "172.16.1.0/24".parse().unwrap();
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(json, "\"172.16.1.0/24\"");
        let back: CidrBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
        assert!(serde_json::from_str::<CidrBlock>("\"172.16.1.0\"").is_err());
    }
}
