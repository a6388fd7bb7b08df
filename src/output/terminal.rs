//! Terminal output utilities.
//!
//! Provides formatting helpers for showing a resolved cluster spec.

use crate::models::ClusterSpec;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

fn or_unset(value: Option<&str>) -> &str {
    value.unwrap_or("<unset>")
}

/// One `"field", "value"` line per resolved field, then one line per subnet.
pub fn cluster_summary_rows(cluster: &ClusterSpec) -> Vec<String> {
    let topology = cluster
        .topology
        .map(|t| format!("masters={} nodes={}", t.masters, t.nodes));
    let proxy_excludes = cluster
        .egress_proxy
        .as_ref()
        .map(|p| p.proxy_excludes.as_str());

    let fields = [
        ("name", cluster.name.as_deref()),
        ("network_id", cluster.network_id.as_deref()),
        ("network_cidr", cluster.network_cidr.as_deref()),
        ("non_masquerade_cidr", cluster.non_masquerade_cidr.as_deref()),
        ("topology", topology.as_deref()),
        ("master_public_name", cluster.master_public_name.as_deref()),
        ("kubernetes_version", cluster.kubernetes_version.as_deref()),
        ("channel", cluster.channel.as_deref()),
        ("proxy_excludes", proxy_excludes),
    ];

    let mut rows: Vec<String> = fields
        .iter()
        .map(|(field, value)| {
            format!(
                "{}, {}",
                format_field(field, 22),
                format_field(or_unset(*value), 0)
            )
        })
        .collect();

    for subnet in &cluster.subnets {
        rows.push(format!(
            "{}, {}, {}, {}",
            format_field("subnet", 22),
            format_field(&subnet.name, 0),
            format_field(format!("{:?}", subnet.subnet_type), 0),
            format_field(or_unset(subnet.cidr.as_deref()), 0)
        ));
    }
    rows
}

/// Print the summary to stderr so stdout stays machine readable.
pub fn print_cluster_summary(cluster: &ClusterSpec) {
    eprintln!("{}", "# Resolved cluster spec".on_blue());
    for row in cluster_summary_rows(cluster) {
        eprintln!("{row}");
    }
}
