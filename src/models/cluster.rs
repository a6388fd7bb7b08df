//! Cluster specification data model.
//!
//! Every optional field is `None` until either the user or the assignment
//! pass sets it. Empty strings read from a document are treated as unset.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Placement of a group of instances.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    #[default]
    Public,
    Private,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Public => write!(f, "public"),
            Topology::Private => write!(f, "private"),
        }
    }
}

/// Placement of masters and nodes. Defaults to public for both.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopologySpec {
    pub masters: Topology,
    pub nodes: Topology,
}

/// Outbound HTTP proxy endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpProxySpec {
    pub host: String,
    #[serde(default)]
    pub port: u16,
}

/// Egress proxy configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EgressProxySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_proxy: Option<HttpProxySpec>,
    /// Comma-joined hosts and CIDRs that bypass the proxy.
    #[serde(default)]
    pub proxy_excludes: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubnetType {
    #[default]
    Public,
    Private,
    /// Small subnets for load balancers and bastions in private topologies.
    Utility,
}

/// A subnet of the cluster network.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSubnetSpec {
    pub name: String,
    #[serde(default)]
    pub zone: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    #[serde(rename = "type", default)]
    pub subnet_type: SubnetType,
    /// Id of a subnet that already exists in the cloud.
    #[serde(
        rename = "id",
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub provider_id: Option<String>,
}

/// The cluster configuration that the assignment pass fills in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Id of an existing network. When set the cluster uses a shared VPC.
    #[serde(
        rename = "networkID",
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub network_id: Option<String>,
    #[serde(
        rename = "networkCIDR",
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub network_cidr: Option<String>,
    #[serde(
        rename = "nonMasqueradeCIDR",
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub non_masquerade_cidr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology: Option<TopologySpec>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub master_public_name: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub kubernetes_version: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub egress_proxy: Option<EgressProxySpec>,
    #[serde(
        rename = "clusterDNSDomain",
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub cluster_dns_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subnets: Vec<ClusterSubnetSpec>,
}

impl ClusterSpec {
    /// True when the cluster runs in a network it does not manage.
    pub fn shared_vpc(&self) -> bool {
        self.network_id.is_some()
    }
}
