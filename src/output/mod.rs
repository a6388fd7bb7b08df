//! Output formatting for resolved cluster specs.
//!
//! - [`terminal`] - Terminal summary with colors

mod terminal;

pub use terminal::{cluster_summary_rows, format_field, print_cluster_summary};
