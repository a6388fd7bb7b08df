//! Virtual network lookups through the Azure CLI.

use super::cli;
use crate::cloud::{Cloud, VpcInfo};
use crate::error::BoxError;
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct AddressSpace {
    #[serde(default)]
    address_prefixes: Vec<String>,
}

/// The parts of `az network vnet show` output the lookup needs.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct VnetShow {
    id: String,
    #[serde(default)]
    address_space: AddressSpace,
}

/// [`Cloud`] backed by the `az` command line tool.
#[derive(Debug, Default, Clone)]
pub struct AzureCloud;

impl AzureCloud {
    pub fn new() -> AzureCloud {
        AzureCloud
    }
}

fn parse_vnet_show(output: &str) -> Result<VpcInfo, BoxError> {
    let mut deserializer = serde_json::Deserializer::from_str(output);
    let vnet: VnetShow = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", output);
        format!("Error parsing vnet JSON: path={} error={}", e.path(), e)
    })?;

    if vnet.address_space.address_prefixes.len() > 1 {
        log::warn!(
            "VNet {} has {} address prefixes, using the first",
            vnet.id,
            vnet.address_space.address_prefixes.len()
        );
    }

    Ok(VpcInfo {
        network_id: vnet.id,
        cidr: vnet
            .address_space
            .address_prefixes
            .into_iter()
            .find(|p| !p.is_empty()),
    })
}

impl Cloud for AzureCloud {
    fn find_vpc_info(&self, network_id: &str) -> Result<Option<VpcInfo>, BoxError> {
        let cmd = format!("az network vnet show --ids {network_id} --output json");
        match cli::run(&cmd) {
            Ok(output) => {
                let info = parse_vnet_show(&output)?;
                log::debug!("Found VNet {} cidr={:?}", info.network_id, info.cidr);
                Ok(Some(info))
            }
            Err(e) if e.to_string().contains("ResourceNotFound") => {
                log::debug!("VNet {network_id} not found");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
