//! Constants used in the deploy scripts

use alloy_primitives::{b256, B256};

/// The storage slot containing the proxy admin contract address in the upgradeable proxy.
///
/// This is specified in EIP1967: https://eips.ethereum.org/EIPS/eip-1967#admin-address
pub const PROXY_ADMIN_STORAGE_SLOT: B256 =
    b256!("0xb53127684a568b3173ae13b9f8a6016e243e63b6e8ee1178d6a717850b5d6103");

/// The number of bytes stored in a single storage slot
pub const NUM_BYTES_STORAGE_SLOT: usize = 32;

/// The number of bytes in an Ethereum address
pub const NUM_BYTES_ADDRESS: usize = 20;

/// The network deployed to when none is given
pub const DEFAULT_NETWORK: &str = "hardhat";

/// The directory compilation artifacts are read from when none is given
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The deployments file used when none is given
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The extension of a compilation artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The name of the initializer run through the proxy on deployment
pub const INITIALIZER: &str = "initialize";

/// The name of the upgradeable proxy contract.
///
/// Compiled from https://github.com/OpenZeppelin/openzeppelin-contracts/blob/v5.0.0/contracts/proxy/transparent/TransparentUpgradeableProxy.sol
pub const PROXY_CONTRACT_NAME: &str = "TransparentUpgradeableProxy";

/// The name of the test staking token contract
pub const TEST_STAKING_TOKEN_CONTRACT_NAME: &str = "TestStakingToken";

/// The name of the Neon token contract
pub const NEON_TOKEN_CONTRACT_NAME: &str = "NeonToken";

/// The name of the staking rewards contract
pub const STAKING_REWARDS_CONTRACT_NAME: &str = "NeonStakingRewards";

/// The test staking token key in the deployments file
pub const TEST_STAKING_TOKEN_KEY: &str = "TestStakingToken";

/// The Neon token implementation key in the deployments file
pub const NEON_TOKEN_KEY: &str = "NeonToken";

/// The Neon token proxy key in the deployments file
pub const NEON_TOKEN_PROXY_KEY: &str = "NeonTokenProxy";

/// The Neon token proxy admin key in the deployments file
pub const NEON_TOKEN_PROXY_ADMIN_KEY: &str = "NeonTokenProxyAdmin";

/// The staking rewards implementation key in the deployments file
pub const STAKING_REWARDS_KEY: &str = "NeonStakingRewards";

/// The staking rewards proxy key in the deployments file
pub const STAKING_REWARDS_PROXY_KEY: &str = "NeonStakingRewardsProxy";

/// The staking rewards proxy admin key in the deployments file
pub const STAKING_REWARDS_PROXY_ADMIN_KEY: &str = "NeonStakingRewardsProxyAdmin";
