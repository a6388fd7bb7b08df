//! Defaults and environment overrides.

use std::time::Duration;

/// Network range given to clusters that do not use a shared VPC.
pub const DEFAULT_NETWORK_CIDR: &str = "172.20.0.0/16";
/// Pod and service range that is never masqueraded.
pub const DEFAULT_NON_MASQUERADE_CIDR: &str = "100.64.0.0/10";
/// Prefix of the derived master public name (`api.<cluster name>`).
pub const MASTER_PUBLIC_NAME_PREFIX: &str = "api.";
/// Legacy source of the latest stable Kubernetes release.
pub const DEFAULT_STABLE_URL: &str =
    "https://storage.googleapis.com/kubernetes-release/release/stable.txt";
/// Base that relative channel names are resolved against.
pub const DEFAULT_CHANNEL_BASE_URL: &str =
    "https://raw.githubusercontent.com/kubernetes/kops/master/channels/";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Settings for an assignment pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub stable_url: String,
    pub channel_base_url: String,
    /// Version of this tool, matched against channel ranges.
    pub tool_version: String,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stable_url: DEFAULT_STABLE_URL.to_string(),
            channel_base_url: DEFAULT_CHANNEL_BASE_URL.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Defaults overridden by `KUBE_STABLE_URL`, `CHANNEL_BASE_URL`,
    /// `TOOL_VERSION` and `HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Config {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup("KUBE_STABLE_URL") {
            config.stable_url = url;
        }
        if let Some(url) = lookup("CHANNEL_BASE_URL") {
            config.channel_base_url = url;
        }
        if let Some(version) = lookup("TOOL_VERSION") {
            config.tool_version = version;
        }
        if let Some(secs) = lookup("HTTP_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) => config.http_timeout = Duration::from_secs(secs),
                Err(e) => log::warn!("Ignoring HTTP_TIMEOUT_SECS={secs:?}: {e}"),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.tool_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("KUBE_STABLE_URL", "file:///tmp/stable.txt"),
            ("TOOL_VERSION", "1.5.0"),
            ("CHANNEL_BASE_URL", "  "),
            ("HTTP_TIMEOUT_SECS", "abc"),
        ]);
        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.stable_url, "file:///tmp/stable.txt");
        assert_eq!(config.tool_version, "1.5.0");
        assert_eq!(config.channel_base_url, DEFAULT_CHANNEL_BASE_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }
}
