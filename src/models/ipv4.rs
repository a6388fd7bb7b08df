//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4`] for representing an IPv4 network in CIDR notation,
//! along with the block arithmetic used when carving subnets out of a
//! cluster network.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

fn mask_bits(len: u8) -> u32 {
    let right_len = MAX_LENGTH - len.min(MAX_LENGTH);
    let all_bits = u32::MAX as u64;
    ((all_bits >> right_len) << right_len) as u32
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use cluster_defaults::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        Ok(mask_bits(len))
    }
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from((u32::from(addr) & mask) | !mask))
}

/// Returns the IP address following the given subnet.
pub fn ip_after_subnet(addr: Ipv4Addr, cidr: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let mask = get_cidr_mask(cidr)?;
    let subnet_size = 1u64 << (MAX_LENGTH - cidr);
    let network_bits = (u32::from(addr) & mask) as u64;
    let next_subnet_bits = network_bits + subnet_size;
    let next_subnet_bits =
        u32::try_from(next_subnet_bits).map_err(|_| "Next subnet calculation overflowed")?;
    Ok(Ipv4Addr::from(next_subnet_bits))
}

/// Calculate the next subnet after the given [`Ipv4`] subnet.
///
/// If `mask` is provided, the next subnet will use that mask size.
pub fn next_subnet_ipv4(ipv4: Ipv4, mask: Option<u8>) -> Result<Ipv4, Box<dyn Error>> {
    let current_mask = ipv4.mask;
    let new_mask = mask.unwrap_or(current_mask);
    let next_subnet = if new_mask <= current_mask {
        ip_after_subnet(ipv4.addr, new_mask)?
    } else {
        // smaller subnet: continue after the end of the current one
        let current_broadcast = broadcast_addr(ipv4.addr, current_mask)?;
        ip_after_subnet(current_broadcast, new_mask)?
    };
    Ok(Ipv4 {
        addr: next_subnet,
        mask: new_mask,
    })
}

/// IPv4 network with CIDR notation support.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s:?}: {e}")))
    }
}

impl FromStr for Ipv4 {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::new(s)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, Box<dyn Error>> {
        let (addr, mask) = addr_cidr
            .trim()
            .split_once('/')
            .ok_or("Invalid address/mask")?;
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| format!("Invalid address {addr}"))?;
        let mask: u8 = mask
            .parse()
            .map_err(|_| format!("Invalid subnet mask {mask}"))?;
        if mask > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        Ok(Ipv4 { addr, mask })
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & mask_bits(self.mask))
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        let mask = mask_bits(self.mask);
        Ipv4Addr::from((u32::from(self.addr) & mask) | !mask)
    }

    /// True when the two networks share at least one address.
    pub fn overlaps(&self, other: &Ipv4) -> bool {
        self.lo() <= other.hi() && other.lo() <= self.hi()
    }

    /// Split this network into `2^extra_bits` equal, consecutive blocks.
    pub fn split(&self, extra_bits: u8) -> Result<Vec<Ipv4>, Box<dyn Error>> {
        let new_mask = self
            .mask
            .checked_add(extra_bits)
            .filter(|m| *m <= MAX_LENGTH)
            .ok_or_else(|| format!("Cannot split {self} by {extra_bits} bits"))?;

        let mut block = Ipv4 {
            addr: self.lo(),
            mask: new_mask,
        };
        let count = 1usize << extra_bits;
        let mut blocks = Vec::with_capacity(count);
        blocks.push(block);
        for _ in 1..count {
            block = next_subnet_ipv4(block, None)?;
            blocks.push(block);
        }
        Ok(blocks)
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
