//! Definitions of the networks the contracts can be deployed to

use std::borrow::Cow;

use crate::{
    constants::{
        DEVELOPMENT_BLOCK_CONFIRMATIONS, DEVELOPMENT_CHAINS, DEVELOPMENT_CHAIN_ID,
        DEVELOPMENT_RPC_URL, HARDHAT_NETWORK, LOCALHOST_NETWORK, SEPOLIA_BLOCK_CONFIRMATIONS,
        SEPOLIA_CHAIN_ID, SEPOLIA_NETWORK, SEPOLIA_RPC_URL_ENV_VAR,
    },
    resolver::is_development_chain,
};

/// Connection and confirmation parameters for a single network
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkConfig {
    /// The name the network is selected by
    pub name: Cow<'static, str>,
    /// The chain ID the RPC endpoint is expected to report.
    ///
    /// `None` for networks that are only known by their RPC URL.
    pub chain_id: Option<u64>,
    /// The RPC URL to use when none is given explicitly
    pub default_rpc_url: Option<Cow<'static, str>>,
    /// The environment variable to read the RPC URL from when none is given explicitly
    pub rpc_url_env_var: Option<&'static str>,
    /// The number of blocks to wait for after a deployment is mined
    pub block_confirmations: u64,
}

/// The in-process development network
pub const HARDHAT: NetworkConfig = NetworkConfig {
    name: Cow::Borrowed(HARDHAT_NETWORK),
    chain_id: Some(DEVELOPMENT_CHAIN_ID),
    default_rpc_url: Some(Cow::Borrowed(DEVELOPMENT_RPC_URL)),
    rpc_url_env_var: None,
    block_confirmations: DEVELOPMENT_BLOCK_CONFIRMATIONS,
};

/// A development node running on the local machine
pub const LOCALHOST: NetworkConfig = NetworkConfig {
    name: Cow::Borrowed(LOCALHOST_NETWORK),
    chain_id: Some(DEVELOPMENT_CHAIN_ID),
    default_rpc_url: Some(Cow::Borrowed(DEVELOPMENT_RPC_URL)),
    rpc_url_env_var: None,
    block_confirmations: DEVELOPMENT_BLOCK_CONFIRMATIONS,
};

/// The Sepolia testnet
pub const SEPOLIA: NetworkConfig = NetworkConfig {
    name: Cow::Borrowed(SEPOLIA_NETWORK),
    chain_id: Some(SEPOLIA_CHAIN_ID),
    default_rpc_url: None,
    rpc_url_env_var: Some(SEPOLIA_RPC_URL_ENV_VAR),
    block_confirmations: SEPOLIA_BLOCK_CONFIRMATIONS,
};

/// All networks known ahead of time
pub const KNOWN_NETWORKS: [NetworkConfig; 3] = [HARDHAT, LOCALHOST, SEPOLIA];

impl NetworkConfig {
    /// Look up a known network by name
    pub fn lookup(name: &str) -> Option<NetworkConfig> {
        KNOWN_NETWORKS
            .iter()
            .find(|network| network.name == name)
            .cloned()
    }

    /// A network known only by name and RPC URL.
    ///
    /// The chain ID is not checked and a single confirmation is awaited.
    pub fn custom(name: impl Into<String>, rpc_url: impl Into<String>) -> NetworkConfig {
        NetworkConfig {
            name: Cow::Owned(name.into()),
            chain_id: None,
            default_rpc_url: Some(Cow::Owned(rpc_url.into())),
            rpc_url_env_var: None,
            block_confirmations: 1,
        }
    }

    /// The name of the network
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the network is one of the [`DEVELOPMENT_CHAINS`]
    pub fn is_development(&self) -> bool {
        is_development_chain(&DEVELOPMENT_CHAINS, &self.name)
    }
}
