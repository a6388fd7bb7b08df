//! Cloud provider lookups needed by the assignment pass.

use crate::error::BoxError;
use serde::{Deserialize, Serialize};

/// An existing network, as reported by the cloud.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct VpcInfo {
    pub network_id: String,
    pub cidr: Option<String>,
}

/// Read-only access to the cloud the cluster runs in.
pub trait Cloud: Send + Sync {
    /// Look up an existing network. `Ok(None)` when it does not exist.
    fn find_vpc_info(&self, network_id: &str) -> Result<Option<VpcInfo>, BoxError>;
}
