//! Fills in the required fields of a partially specified cluster.
//!
//! [`perform_assignments`] runs on create and on every update. It only ever
//! assigns fields that are unset, so running it again on its own output
//! changes nothing.

pub mod args;
pub mod azure;
pub mod cloud;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod vfs;

pub use error::{AssignError, AssignResult, BoxError};
pub use processing::{perform_assignments, AssignContext};

use models::ClusterSpec;
use std::path::Path;

/// Read a cluster spec from a YAML or JSON file.
pub fn read_cluster_spec(path: &Path) -> Result<ClusterSpec, BoxError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading cluster spec {}: {e}", path.display()))?;

    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let spec = if is_json {
        let mut deserializer = serde_json::Deserializer::from_str(&content);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            format!(
                "Error parsing cluster spec {}: path={} error={}",
                path.display(),
                e.path(),
                e
            )
        })?
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Error parsing cluster spec {}: {e}", path.display()))?
    };
    log::info!("Read cluster spec from {}", path.display());
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_cluster_spec_json() {
        let spec = read_cluster_spec(Path::new("src/tests/test_data/cluster_new.json"))
            .expect("Error reading cluster spec");
        assert_eq!(spec.name.as_deref(), Some("prod.example.com"));
        assert_eq!(spec.subnets.len(), 3);
    }

    #[test]
    fn test_read_cluster_spec_yaml() {
        let spec = read_cluster_spec(Path::new("src/tests/test_data/cluster_shared_vpc.yaml"))
            .expect("Error reading cluster spec");
        assert_eq!(spec.network_id.as_deref(), Some("vpc-1"));
        assert!(spec.shared_vpc());
    }

    #[test]
    fn test_read_cluster_spec_bad_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"name": "x", "subnets": [{"name": 1}]}"#).unwrap();
        let err = read_cluster_spec(&path).unwrap_err();
        assert!(err.to_string().contains("path=subnets[0].name"));
    }
}
