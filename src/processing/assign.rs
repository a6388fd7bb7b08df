//! The assignment pass.

use super::proxy::assign_proxy;
use super::version::ensure_kubernetes_version;
use super::AssignContext;
use crate::config::{DEFAULT_NETWORK_CIDR, DEFAULT_NON_MASQUERADE_CIDR, MASTER_PUBLIC_NAME_PREFIX};
use crate::error::{AssignError, AssignResult};
use crate::models::{ClusterSpec, TopologySpec};

/// Populate values that are required and, once set, immutable.
///
/// Runs on create and on every update, so each step only fills a field that
/// is still unset. Steps run in a fixed order because later steps read what
/// earlier ones assign. The first failure stops the pass; fields assigned
/// before it stay assigned.
pub fn perform_assignments(cluster: &mut ClusterSpec, ctx: &AssignContext<'_>) -> AssignResult<()> {
    if cluster.network_cidr.is_none() {
        if let Some(network_id) = cluster.network_id.clone() {
            cluster.network_cidr = Some(lookup_network_cidr(&network_id, ctx)?);
        }
    }

    if cluster.topology.is_none() {
        cluster.topology = Some(TopologySpec::default());
    }

    if cluster.network_cidr.is_none() && !cluster.shared_vpc() {
        cluster.network_cidr = Some(DEFAULT_NETWORK_CIDR.to_string());
    }

    if cluster.non_masquerade_cidr.is_none() {
        cluster.non_masquerade_cidr = Some(DEFAULT_NON_MASQUERADE_CIDR.to_string());
    }

    if cluster.master_public_name.is_none() {
        if let Some(name) = &cluster.name {
            cluster.master_public_name = Some(format!("{MASTER_PUBLIC_NAME_PREFIX}{name}"));
        }
    }

    ctx.allocator
        .assign_cidrs_to_subnets(cluster)
        .map_err(AssignError::SubnetAllocation)?;

    cluster.egress_proxy = assign_proxy(cluster);

    ensure_kubernetes_version(cluster, ctx)
}

fn lookup_network_cidr(network_id: &str, ctx: &AssignContext<'_>) -> AssignResult<String> {
    let vpc_info = ctx
        .cloud
        .find_vpc_info(network_id)
        .map_err(|e| AssignError::NetworkLookup {
            network_id: network_id.to_string(),
            reason: e.to_string(),
        })?
        .ok_or_else(|| AssignError::NetworkLookup {
            network_id: network_id.to_string(),
            reason: "not found".to_string(),
        })?;

    match vpc_info.cidr {
        Some(cidr) => {
            log::info!("Using NetworkCIDR {cidr} from VPC {network_id:?}");
            Ok(cidr)
        }
        None => Err(AssignError::NetworkCidrMissing {
            network_id: network_id.to_string(),
        }),
    }
}
