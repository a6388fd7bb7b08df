//! Egress proxy exclusions.

use crate::models::{ClusterSpec, EgressProxySpec};

const LOOPBACK: &str = "127.0.0.1";
const LOCALHOST: &str = "localhost";
const METADATA_SERVICE: &str = "169.254.169.254";
const NON_MASQUERADE_GATEWAY: &str = "100.64.0.1";

/// Add the hosts that must bypass the egress proxy to its exclusion list.
///
/// Returns `None` when no proxy is configured. A candidate is appended only
/// when the original exclusion string does not already contain it as a
/// substring, so an existing `"localhost-prod"` hides `"localhost"`.
pub fn assign_proxy(cluster: &ClusterSpec) -> Option<EgressProxySpec> {
    let Some(egress_proxy) = &cluster.egress_proxy else {
        log::debug!("Not setting up Proxy Excludes");
        return None;
    };

    let original = egress_proxy.proxy_excludes.as_str();
    let mut excludes: Vec<&str> = if original.is_empty() {
        vec![]
    } else {
        original.split(',').collect()
    };

    let candidates = [
        Some(LOOPBACK),
        Some(LOCALHOST),
        Some(METADATA_SERVICE),
        cluster.cluster_dns_domain.as_deref(),
        cluster.master_public_name.as_deref(),
        cluster.name.as_deref(),
        Some(NON_MASQUERADE_GATEWAY),
        cluster.non_masquerade_cidr.as_deref(),
    ];
    for exclude in candidates.into_iter().flatten() {
        if exclude.is_empty() {
            continue;
        }
        if !original.contains(exclude) {
            excludes.push(exclude);
        }
    }

    let proxy = EgressProxySpec {
        proxy_excludes: excludes.join(","),
        ..egress_proxy.clone()
    };
    log::debug!("Completed setting up Proxy Excludes: {:?}", proxy.proxy_excludes);
    Some(proxy)
}
