//! Azure CLI interaction.
//!
//! - [`cli`] - Command execution for Azure CLI
//! - [`network`] - Virtual network lookups implementing [`Cloud`](crate::cloud::Cloud)

mod cli;
mod network;

// Re-export public types
pub use network::AzureCloud;
