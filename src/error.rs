//! Error types for the assignment pass.

use thiserror::Error;

/// Error type returned by the cloud, VFS and subnet allocator collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for assignment operations.
pub type AssignResult<T> = Result<T, AssignError>;

/// Failures that abort an assignment pass.
///
/// Fields assigned before the failing step stay assigned; running the pass
/// again is safe.
#[derive(Debug, Error)]
pub enum AssignError {
    /// The shared network could not be looked up, or does not exist.
    #[error("unable to find VPC ID {network_id:?}: {reason}")]
    NetworkLookup { network_id: String, reason: String },

    /// The shared network exists but has no CIDR to copy.
    #[error("unable to infer NetworkCIDR from VPC ID {network_id:?}, please specify --network-cidr")]
    NetworkCidrMissing { network_id: String },

    /// The release channel could not be read or parsed.
    #[error("error loading channel {location:?}: {reason}")]
    ChannelLoad { location: String, reason: String },

    /// The latest stable Kubernetes version could not be downloaded.
    #[error("KubernetesVersion not specified, and unable to download latest version from {url:?}: {reason}")]
    LatestVersionFetch { url: String, reason: String },

    /// Subnet CIDR assignment failed.
    #[error(transparent)]
    SubnetAllocation(BoxError),
}
