//! Cluster spec defaulting.
//!
//! - [`assign`] - the assignment pass, in its fixed step order
//! - [`proxy`] - egress proxy exclusions
//! - [`subnets`] - subnet CIDR allocation
//! - [`version`] - Kubernetes version resolution

mod assign;
mod proxy;
mod subnets;
mod version;

use crate::cloud::Cloud;
use crate::config::Config;
use crate::vfs::Vfs;

// Re-export public functions
pub use assign::perform_assignments;
pub use proxy::assign_proxy;
pub use subnets::{SplitAllocator, SubnetAllocator};
pub use version::{ensure_kubernetes_version, find_latest_kubernetes_version};

/// Collaborators and settings for one assignment pass.
///
/// Nothing here is mutated by the pass, so one context can serve many
/// clusters, including from several threads.
#[derive(Clone, Copy)]
pub struct AssignContext<'a> {
    pub cloud: &'a dyn Cloud,
    pub vfs: &'a dyn Vfs,
    pub allocator: &'a dyn SubnetAllocator,
    pub config: &'a Config,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cloud::VpcInfo;
    use crate::error::BoxError;
    use crate::models::ClusterSpec;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct FakeCloud {
        vpc: Option<VpcInfo>,
        error: Option<String>,
        calls: AtomicUsize,
    }

    impl FakeCloud {
        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Cloud for FakeCloud {
        fn find_vpc_info(&self, network_id: &str) -> Result<Option<VpcInfo>, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(error) = &self.error {
                return Err(error.clone().into());
            }
            Ok(self.vpc.clone().filter(|v| v.network_id == network_id))
        }
    }

    #[derive(Default)]
    pub(crate) struct FakeVfs {
        files: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeVfs {
        pub(crate) fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn count(&self, location: &str) -> usize {
            self.requests().iter().filter(|r| *r == location).count()
        }
    }

    impl Vfs for FakeVfs {
        fn read_file(&self, location: &str) -> Result<Vec<u8>, BoxError> {
            self.requests.lock().unwrap().push(location.to_string());
            self.files
                .get(location)
                .map(|content| content.as_bytes().to_vec())
                .ok_or_else(|| format!("404 Not Found: {location}").into())
        }
    }

    #[derive(Default)]
    pub(crate) struct FakeAllocator {
        error: Option<String>,
    }

    impl SubnetAllocator for FakeAllocator {
        fn assign_cidrs_to_subnets(&self, cluster: &mut ClusterSpec) -> Result<(), BoxError> {
            match &self.error {
                Some(error) => Err(error.clone().into()),
                None => SplitAllocator.assign_cidrs_to_subnets(cluster),
            }
        }
    }

    pub(crate) struct Fakes {
        pub(crate) cloud: FakeCloud,
        pub(crate) vfs: FakeVfs,
        pub(crate) allocator: FakeAllocator,
        pub(crate) config: Config,
    }

    impl Fakes {
        pub(crate) fn new() -> Fakes {
            Fakes {
                cloud: FakeCloud::default(),
                vfs: FakeVfs::default(),
                allocator: FakeAllocator::default(),
                config: Config {
                    stable_url: "https://stable.test/stable.txt".to_string(),
                    channel_base_url: "https://channels.test/".to_string(),
                    tool_version: "0.1.0".to_string(),
                    ..Config::default()
                },
            }
        }

        pub(crate) fn with_file(mut self, location: &str, content: &str) -> Fakes {
            self.vfs
                .files
                .insert(location.to_string(), content.to_string());
            self
        }

        pub(crate) fn with_vpc(mut self, vpc: VpcInfo) -> Fakes {
            self.cloud.vpc = Some(vpc);
            self
        }

        pub(crate) fn with_cloud_error(mut self, error: &str) -> Fakes {
            self.cloud.error = Some(error.to_string());
            self
        }

        pub(crate) fn with_allocator_error(mut self, error: &str) -> Fakes {
            self.allocator.error = Some(error.to_string());
            self
        }
    }

    pub(crate) fn context(fakes: &Fakes) -> AssignContext<'_> {
        AssignContext {
            cloud: &fakes.cloud,
            vfs: &fakes.vfs,
            allocator: &fakes.allocator,
            config: &fakes.config,
        }
    }
}
