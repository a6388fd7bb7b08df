//! Kubernetes version resolution.

use super::AssignContext;
use crate::error::{AssignError, AssignResult};
use crate::models::{Channel, ClusterSpec};
use crate::vfs::Vfs;

/// Populate `kubernetes_version` if it is not already set.
///
/// The release channel is consulted first. When it has no recommendation
/// for this tool version, the latest stable release is downloaded instead.
pub fn ensure_kubernetes_version(
    cluster: &mut ClusterSpec,
    ctx: &AssignContext<'_>,
) -> AssignResult<()> {
    if cluster.kubernetes_version.is_some() {
        return Ok(());
    }

    match cluster.channel.as_deref() {
        Some(channel_name) => {
            let channel = Channel::load(ctx.vfs, channel_name, &ctx.config.channel_base_url)?;
            match channel.recommended_kubernetes_version(&ctx.config.tool_version) {
                Some(version) => {
                    let version = version.to_string();
                    log::info!(
                        "Using KubernetesVersion {version:?} from channel {channel_name:?}"
                    );
                    cluster.kubernetes_version = Some(version);
                }
                None => log::warn!(
                    "Cannot determine recommended kubernetes version from channel {channel_name:?}"
                ),
            }
        }
        None => log::warn!("Channel is not set; cannot determine KubernetesVersion from channel"),
    }

    if cluster.kubernetes_version.is_none() {
        let latest = find_latest_kubernetes_version(ctx.vfs, &ctx.config.stable_url)?;
        log::info!("Using kubernetes latest stable version: {latest}");
        cluster.kubernetes_version = Some(latest);
    }
    Ok(())
}

/// Download the latest stable Kubernetes version from `stable_url`.
///
/// Prefer a release channel; this source is kept for clusters without one.
pub fn find_latest_kubernetes_version(vfs: &dyn Vfs, stable_url: &str) -> AssignResult<String> {
    log::warn!("Loading latest kubernetes version from {stable_url:?}");
    let fetch_error = |reason: String| AssignError::LatestVersionFetch {
        url: stable_url.to_string(),
        reason,
    };

    let body = vfs.read_file(stable_url).map_err(|e| fetch_error(e.to_string()))?;
    let latest = String::from_utf8_lossy(&body).trim().to_string();
    if latest.is_empty() {
        return Err(fetch_error("empty response".to_string()));
    }
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::tests::{context, Fakes};

    const CHANNEL: &str = r#"
spec:
  kopsVersions:
  - range: ">=0.1.0"
    kubernetesVersion: "1.5.2"
"#;

    const NO_MATCH_CHANNEL: &str = r#"
spec:
  kopsVersions:
  - range: ">=9.0.0"
    kubernetesVersion: "1.9.0"
"#;

    #[test]
    fn test_preset_version_is_kept() {
        let fakes = Fakes::new();
        let mut cluster = ClusterSpec {
            kubernetes_version: Some("v1.2.3".to_string()),
            channel: Some("stable".to_string()),
            ..Default::default()
        };
        ensure_kubernetes_version(&mut cluster, &context(&fakes)).unwrap();
        assert_eq!(cluster.kubernetes_version.as_deref(), Some("v1.2.3"));
        assert!(fakes.vfs.requests().is_empty());
    }

    #[test]
    fn test_channel_recommendation_skips_latest() {
        let fakes = Fakes::new().with_file("https://channels.test/stable", CHANNEL);
        let mut cluster = ClusterSpec {
            channel: Some("stable".to_string()),
            ..Default::default()
        };
        ensure_kubernetes_version(&mut cluster, &context(&fakes)).unwrap();
        assert_eq!(cluster.kubernetes_version.as_deref(), Some("1.5.2"));
        assert_eq!(fakes.vfs.count("https://stable.test/stable.txt"), 0);
        assert_eq!(fakes.vfs.requests(), vec!["https://channels.test/stable"]);
    }

    #[test]
    fn test_no_channel_fetches_latest_once() {
        let fakes = Fakes::new().with_file("https://stable.test/stable.txt", " v1.6.1\n");
        let mut cluster = ClusterSpec::default();
        ensure_kubernetes_version(&mut cluster, &context(&fakes)).unwrap();
        assert_eq!(cluster.kubernetes_version.as_deref(), Some("v1.6.1"));
        assert_eq!(fakes.vfs.requests(), vec!["https://stable.test/stable.txt"]);
    }

    #[test]
    fn test_channel_without_recommendation_falls_back() {
        let fakes = Fakes::new()
            .with_file("https://channels.test/stable", NO_MATCH_CHANNEL)
            .with_file("https://stable.test/stable.txt", "v1.6.1");
        let mut cluster = ClusterSpec {
            channel: Some("stable".to_string()),
            ..Default::default()
        };
        ensure_kubernetes_version(&mut cluster, &context(&fakes)).unwrap();
        assert_eq!(cluster.kubernetes_version.as_deref(), Some("v1.6.1"));
        assert_eq!(fakes.vfs.count("https://stable.test/stable.txt"), 1);
    }

    #[test]
    fn test_channel_load_error_is_fatal() {
        let fakes = Fakes::new().with_file("https://stable.test/stable.txt", "v1.6.1");
        let mut cluster = ClusterSpec {
            channel: Some("stable".to_string()),
            ..Default::default()
        };
        let err = ensure_kubernetes_version(&mut cluster, &context(&fakes)).unwrap_err();
        assert!(matches!(err, AssignError::ChannelLoad { ref location, .. } if location == "https://channels.test/stable"));
        assert_eq!(cluster.kubernetes_version, None);
        assert_eq!(fakes.vfs.count("https://stable.test/stable.txt"), 0);
    }

    #[test]
    fn test_unparseable_channel_is_fatal() {
        let fakes = Fakes::new().with_file("https://channels.test/stable", "spec: [not, a, map");
        let mut cluster = ClusterSpec {
            channel: Some("stable".to_string()),
            ..Default::default()
        };
        let err = ensure_kubernetes_version(&mut cluster, &context(&fakes)).unwrap_err();
        assert!(matches!(err, AssignError::ChannelLoad { .. }));
    }

    #[test]
    fn test_latest_fetch_errors() {
        let fakes = Fakes::new();
        let mut cluster = ClusterSpec::default();
        let err = ensure_kubernetes_version(&mut cluster, &context(&fakes)).unwrap_err();
        assert!(matches!(err, AssignError::LatestVersionFetch { .. }));

        let fakes = Fakes::new().with_file("https://stable.test/stable.txt", "  \n");
        let err = ensure_kubernetes_version(&mut cluster, &context(&fakes)).unwrap_err();
        assert!(
            matches!(err, AssignError::LatestVersionFetch { ref reason, .. } if reason == "empty response")
        );
        assert_eq!(cluster.kubernetes_version, None);
    }
}
