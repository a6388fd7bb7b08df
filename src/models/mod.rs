//! Domain models for cluster defaulting.
//!
//! - [`ClusterSpec`] and its parts - the specification being filled in
//! - [`Channel`] - release channel descriptors
//! - [`VersionRange`] and [`parse_tolerant`] - channel version matching
//! - [`Ipv4`] - IPv4 network in CIDR notation

mod channel;
mod cluster;
mod ipv4;
mod version;

// Re-export public types
pub use channel::{resolve_channel_location, Channel, ChannelSpec, ToolVersionSpec};
pub use cluster::{
    ClusterSpec, ClusterSubnetSpec, EgressProxySpec, HttpProxySpec, SubnetType, Topology,
    TopologySpec,
};
pub use ipv4::{
    broadcast_addr, get_cidr_mask, ip_after_subnet, next_subnet_ipv4, Ipv4, MAX_LENGTH,
};
pub use version::{parse_tolerant, VersionRange};
