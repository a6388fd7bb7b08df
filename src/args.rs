//! Command line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Fill in the defaults of a cluster spec and print the result as JSON
#[derive(Parser, Debug)]
#[command(name = "cluster-defaults")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Cluster spec to complete (JSON, or YAML for any other extension)
    pub spec: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_spec_path() {
        let args = Args::try_parse_from(["cluster-defaults", "cluster.yaml"]).unwrap();
        assert_eq!(args.spec, PathBuf::from("cluster.yaml"));
    }

    #[test]
    fn test_spec_path_required() {
        let err = Args::try_parse_from(["cluster-defaults"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
