//! Type definitions used throughout the scripts

use std::path::PathBuf;

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::JsonAbi,
    network::Ethereum,
    primitives::{Address, Bytes},
    providers::DynProvider,
};
use neon_common::networks::NetworkConfig;
use serde::Deserialize;

use crate::errors::ScriptError;

/// The signing provider the scripts send transactions through
pub type Client = DynProvider<Ethereum>;

/// Everything a deploy command needs to know about where and how to deploy
pub struct DeployContext {
    /// The network being deployed to
    pub network: NetworkConfig,
    /// The signing provider connected to the network
    pub client: Client,
    /// The address transactions are sent from
    pub deployer: Address,
    /// The directory compilation artifacts are read from
    pub artifacts_dir: PathBuf,
    /// The file deployed addresses are recorded in
    pub deployments_path: PathBuf,
}

/// A compiled contract, as emitted by the Solidity toolchain
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// The name of the contract, filled in from the artifact's file name
    /// when the toolchain omits it
    #[serde(default)]
    pub contract_name: String,
    /// The contract ABI
    pub abi: JsonAbi,
    /// The contract creation bytecode
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// The creation code for the contract: its bytecode followed by the
    /// ABI-encoded constructor arguments.
    ///
    /// The arguments are type-checked against the constructor in the ABI.
    pub fn deploy_code(&self, constructor_args: &[DynSolValue]) -> Result<Bytes, ScriptError> {
        let encoded_args = match &self.abi.constructor {
            Some(constructor) => constructor
                .abi_encode_input(constructor_args)
                .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?,
            None if constructor_args.is_empty() => Vec::new(),
            None => {
                return Err(ScriptError::CalldataConstruction(format!(
                    "{} has no constructor, but {} arguments were given",
                    self.contract_name,
                    constructor_args.len()
                )))
            }
        };

        Ok([&self.bytecode[..], encoded_args.as_slice()].concat().into())
    }

    /// Whether the contract ABI defines a function with the given name
    pub fn has_function(&self, name: &str) -> bool {
        self.abi.function(name).is_some()
    }
}

/// The addresses produced by deploying a contract behind an upgradeable proxy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProxyDeployment {
    /// The implementation contract
    pub implementation: Address,
    /// The proxy contract, which is the address users interact with
    pub proxy: Address,
    /// The admin contract through which the proxy is upgraded
    pub proxy_admin: Address,
}
