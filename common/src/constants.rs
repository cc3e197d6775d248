//! Constants describing the networks and token addresses the scripts target

use alloy_primitives::{address, Address};

/// The names of the networks treated as local / ephemeral.
///
/// Contracts on these networks are redeployed freely and bind to throwaway
/// dependencies such as the test staking token.
pub const DEVELOPMENT_CHAINS: [&str; 2] = ["hardhat", "localhost"];

/// The name of the in-process development network
pub const HARDHAT_NETWORK: &str = "hardhat";

/// The name of a development node running on the local machine
pub const LOCALHOST_NETWORK: &str = "localhost";

/// The name of the Sepolia testnet
pub const SEPOLIA_NETWORK: &str = "sepolia";

/// The chain ID used by local development nodes
pub const DEVELOPMENT_CHAIN_ID: u64 = 31337;

/// The chain ID of the Sepolia testnet
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

/// The RPC URL that local development nodes listen on
pub const DEVELOPMENT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The environment variable holding the Sepolia RPC URL
pub const SEPOLIA_RPC_URL_ENV_VAR: &str = "SEPOLIA_RPC_URL";

/// The number of block confirmations to wait for on Sepolia
pub const SEPOLIA_BLOCK_CONFIRMATIONS: u64 = 6;

/// The number of block confirmations to wait for on development chains
pub const DEVELOPMENT_BLOCK_CONFIRMATIONS: u64 = 1;

/// The DAI contract on Sepolia, used as the staking token outside of development chains
pub const STAKING_MAIN_TOKEN_ADDRESS: Address =
    address!("0x68194a729C2450ad26072b3D33ADaCbcef39D574");

/// The Neon token proxy, used as the reward token
pub const REWARD_TOKEN_ADDRESS: Address = address!("0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512");

/// The private key of the first account funded by local development nodes
pub const DEFAULT_DEVELOPMENT_PKEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
