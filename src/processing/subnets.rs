//! Subnet CIDR assignment.
//!
//! The cluster network is split into eight equal blocks. Public and private
//! subnets take whole blocks out of the first seven; the last block is always
//! kept for utility subnets, split eight ways again. Blocks that overlap an
//! already assigned subnet are skipped, so the layout does not depend on how
//! many passes it took to fill it in.

use crate::error::BoxError;
use crate::models::{ClusterSpec, ClusterSubnetSpec, Ipv4, SubnetType};

/// Bits added to the network prefix for each split.
const SPLIT_BITS: u8 = 3;

/// Assigns CIDRs to the subnets of a cluster that do not have one.
///
/// Implementations must be deterministic for the same spec and must not hand
/// out overlapping ranges.
///
/// Subnets with a `provider_id` belong to the cloud and are never assigned a
/// CIDR. If such a subnet carries its `cidr`, that range is kept clear;
/// without one its range is unknown here and may be handed out again.
pub trait SubnetAllocator: Send + Sync {
    fn assign_cidrs_to_subnets(&self, cluster: &mut ClusterSpec) -> Result<(), BoxError>;
}

/// The default [`SubnetAllocator`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SplitAllocator;

fn needs_cidr(subnet: &ClusterSubnetSpec) -> bool {
    subnet.cidr.is_none() && subnet.provider_id.is_none()
}

/// Take the first block that does not overlap anything reserved, and reserve it.
fn take_free(blocks: &mut Vec<Ipv4>, reserved: &mut Vec<Ipv4>) -> Option<Ipv4> {
    let index = blocks
        .iter()
        .position(|b| !reserved.iter().any(|r| r.overlaps(b)))?;
    let block = blocks.remove(index);
    reserved.push(block);
    Some(block)
}

impl SubnetAllocator for SplitAllocator {
    fn assign_cidrs_to_subnets(&self, cluster: &mut ClusterSpec) -> Result<(), BoxError> {
        if !cluster.subnets.iter().any(needs_cidr) {
            return Ok(());
        }

        let network_cidr = cluster
            .network_cidr
            .as_deref()
            .ok_or("NetworkCIDR must be set before subnet CIDRs can be assigned")?;
        let network = Ipv4::new(network_cidr)
            .map_err(|e| format!("Invalid NetworkCIDR {network_cidr:?}: {e}"))?;

        let mut reserved = Vec::new();
        for subnet in cluster.subnets.iter() {
            if let Some(cidr) = &subnet.cidr {
                let cidr = Ipv4::new(cidr)
                    .map_err(|e| format!("Invalid CIDR {cidr:?} for subnet {:?}: {e}", subnet.name))?;
                reserved.push(cidr);
            }
        }

        let mut pending: Vec<usize> = (0..cluster.subnets.len())
            .filter(|i| needs_cidr(&cluster.subnets[*i]))
            .collect();
        pending.sort_by(|a, b| cluster.subnets[*a].name.cmp(&cluster.subnets[*b].name));
        let (little, big): (Vec<usize>, Vec<usize>) = pending
            .into_iter()
            .partition(|i| cluster.subnets[*i].subnet_type == SubnetType::Utility);

        let mut big_blocks = network.split(SPLIT_BITS).map_err(|e| e.to_string())?;
        let pool = big_blocks
            .pop()
            .ok_or_else(|| format!("Unable to split NetworkCIDR {network}"))?;
        let mut little_blocks = if little.is_empty() {
            vec![]
        } else {
            pool.split(SPLIT_BITS).map_err(|e| e.to_string())?
        };

        for i in big {
            let subnet = &mut cluster.subnets[i];
            let block = take_free(&mut big_blocks, &mut reserved).ok_or_else(|| {
                format!("Not enough free blocks in {network} for subnet {:?}", subnet.name)
            })?;
            log::debug!("Assigned CIDR {block} to subnet {:?}", subnet.name);
            subnet.cidr = Some(block.to_string());
        }

        for i in little {
            let subnet = &mut cluster.subnets[i];
            let block = take_free(&mut little_blocks, &mut reserved).ok_or_else(|| {
                format!("Not enough free blocks in {network} for utility subnet {:?}", subnet.name)
            })?;
            log::debug!("Assigned CIDR {block} to utility subnet {:?}", subnet.name);
            subnet.cidr = Some(block.to_string());
        }

        Ok(())
    }
}
