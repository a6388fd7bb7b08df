//! Release channel descriptors.
//!
//! A channel maps ranges of tool versions to the Kubernetes release that was
//! tested with them.

use super::version::{parse_tolerant, VersionRange};
use crate::error::{AssignError, AssignResult};
use crate::vfs::Vfs;
use semver::Version;
use serde::{Deserialize, Serialize};

/// Guidance for a range of tool versions.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolVersionSpec {
    pub range: String,
    /// Kubernetes release to deploy with a tool version in `range`.
    #[serde(default)]
    pub kubernetes_version: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSpec {
    #[serde(default, alias = "kopsVersions")]
    pub tool_versions: Vec<ToolVersionSpec>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Channel {
    #[serde(default)]
    pub spec: ChannelSpec,
}

/// Resolve a channel name or relative path against `base`.
///
/// URLs and absolute paths are returned unchanged.
pub fn resolve_channel_location(location: &str, base: &str) -> String {
    if location.contains("://") || location.starts_with('/') {
        location.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), location)
    }
}

impl Channel {
    pub fn parse(content: &[u8]) -> Result<Channel, serde_yaml::Error> {
        serde_yaml::from_slice(content)
    }

    /// Read and parse the channel at `location`.
    pub fn load(vfs: &dyn Vfs, location: &str, base: &str) -> AssignResult<Channel> {
        let resolved = resolve_channel_location(location, base);
        let content = vfs
            .read_file(&resolved)
            .map_err(|e| AssignError::ChannelLoad {
                location: resolved.clone(),
                reason: e.to_string(),
            })?;
        let channel = Channel::parse(&content).map_err(|e| AssignError::ChannelLoad {
            location: resolved.clone(),
            reason: format!("error parsing channel: {e}"),
        })?;
        log::trace!(
            "Channel contents: {}",
            String::from_utf8_lossy(&content)
        );
        Ok(channel)
    }

    /// First entry whose range contains `tool_version`.
    pub fn find_tool_version_spec(&self, tool_version: &Version) -> Option<&ToolVersionSpec> {
        self.spec.tool_versions.iter().find(|spec| {
            match VersionRange::parse(&spec.range) {
                Ok(range) => range.matches(tool_version),
                Err(e) => {
                    log::warn!("Ignoring channel entry with bad range {:?}: {e}", spec.range);
                    false
                }
            }
        })
    }

    /// The Kubernetes release this channel recommends for `tool_version`.
    pub fn recommended_kubernetes_version(&self, tool_version: &str) -> Option<Version> {
        let tool_version = match parse_tolerant(tool_version) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Unable to parse tool version {tool_version:?}: {e}");
                return None;
            }
        };

        let spec = self.find_tool_version_spec(&tool_version)?;
        if spec.kubernetes_version.is_empty() {
            return None;
        }
        match parse_tolerant(&spec.kubernetes_version) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!(
                    "Unable to parse kubernetes version {:?} from channel: {e}",
                    spec.kubernetes_version
                );
                None
            }
        }
    }
}
