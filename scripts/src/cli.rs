//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use alloy::primitives::{Address, Bytes};
use clap::{Args, Parser, Subcommand};
use neon_common::constants::REWARD_TOKEN_ADDRESS;

use crate::{
    commands::{deploy_neon_token, deploy_staking_rewards, deploy_test_staking_token, upgrade},
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_PATH, DEFAULT_NETWORK},
    errors::ScriptError,
    types::DeployContext,
};

/// Deploy the Neon staking contracts
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the network to deploy to
    #[arg(short, long, env = "NETWORK", default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Network RPC URL, overriding the one configured for the network
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Private key of the deployer.
    ///
    /// Defaults to the first prefunded account on development chains.
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Directory containing the contract compilation artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Path to the file in which deployed addresses are recorded
    #[arg(long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments: PathBuf,

    /// The deploy command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available deploy commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the staking token used on development chains
    DeployTestStakingToken,
    /// Deploy the Neon reward token behind an upgradeable proxy
    DeployNeonToken(DeployNeonTokenArgs),
    /// Deploy the staking rewards contract behind an upgradeable proxy
    DeployStakingRewards(DeployStakingRewardsArgs),
    /// Upgrade the implementation behind a proxy
    Upgrade(UpgradeArgs),
}

impl Command {
    /// Run the command against the given deployment context
    pub async fn run(self, ctx: &DeployContext) -> Result<(), ScriptError> {
        match self {
            Command::DeployTestStakingToken => deploy_test_staking_token(ctx).await,
            Command::DeployNeonToken(args) => deploy_neon_token(args, ctx).await,
            Command::DeployStakingRewards(args) => deploy_staking_rewards(args, ctx).await,
            Command::Upgrade(args) => upgrade(args, ctx).await,
        }
    }
}

/// Deploy the Neon token upgradeable proxy contract.
///
/// Concretely, this is a [`TransparentUpgradeableProxy`](https://docs.openzeppelin.com/contracts/5.x/api/proxy#transparent_proxy),
/// which itself deploys a `ProxyAdmin` contract.
///
/// Calls made directly to the `TransparentUpgradeableProxy` contract will be forwarded to the implementation contract.
/// Upgrade calls can only be made to the `TransparentUpgradeableProxy` through the `ProxyAdmin`.
#[derive(Args)]
pub struct DeployNeonTokenArgs {
    /// Owner of the proxy admin contract, defaults to the deployer
    #[arg(short, long)]
    pub owner: Option<Address>,
}

/// Deploy the staking rewards upgradeable proxy contract.
///
/// The staking and reward token addresses are immutable arguments of the
/// implementation's constructor.
#[derive(Args)]
pub struct DeployStakingRewardsArgs {
    /// Owner of the proxy admin contract, defaults to the deployer
    #[arg(short, long)]
    pub owner: Option<Address>,

    /// Staking token address.
    ///
    /// Defaults to the recorded test staking token on development chains,
    /// and to DAI otherwise.
    #[arg(short, long)]
    pub staking_token: Option<Address>,

    /// Reward token address
    #[arg(short, long, default_value_t = REWARD_TOKEN_ADDRESS)]
    pub reward_token: Address,
}

/// Upgrade the implementation behind a proxy
#[derive(Args)]
pub struct UpgradeArgs {
    /// Address of the proxy admin contract
    #[arg(long)]
    pub proxy_admin: Address,

    /// Address of the proxy contract
    #[arg(long)]
    pub proxy: Address,

    /// Address of the new implementation contract
    #[arg(short, long)]
    pub implementation: Address,

    /// Optional calldata, in hex form, with which to
    /// call the implementation contract when upgrading
    #[arg(short, long)]
    pub calldata: Option<Bytes>,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use alloy::primitives::{address, bytes};
    use clap::Parser;
    use neon_common::constants::REWARD_TOKEN_ADDRESS;

    use super::{Cli, Command};

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["neon-deploy", "deploy-test-staking-token"]).unwrap();

        assert_eq!(cli.network, "hardhat");
        assert_eq!(cli.artifacts, PathBuf::from("artifacts"));
        assert_eq!(cli.deployments, PathBuf::from("deployments.json"));
        assert!(matches!(cli.command, Command::DeployTestStakingToken));
    }

    #[test]
    fn test_parse_deploy_neon_token() {
        let cli = Cli::try_parse_from([
            "neon-deploy",
            "--network",
            "sepolia",
            "--rpc-url",
            "http://127.0.0.1:8545",
            "deploy-neon-token",
            "--owner",
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
        ])
        .unwrap();

        assert_eq!(cli.network, "sepolia");
        assert_eq!(cli.rpc_url.as_deref(), Some("http://127.0.0.1:8545"));
        let Command::DeployNeonToken(args) = cli.command else {
            panic!("expected deploy-neon-token");
        };
        assert_eq!(
            args.owner,
            Some(address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"))
        );
    }

    #[test]
    fn test_parse_deploy_staking_rewards() {
        let cli = Cli::try_parse_from(["neon-deploy", "deploy-staking-rewards"]).unwrap();
        let Command::DeployStakingRewards(args) = cli.command else {
            panic!("expected deploy-staking-rewards");
        };
        assert_eq!(args.owner, None);
        assert_eq!(args.staking_token, None);
        assert_eq!(args.reward_token, REWARD_TOKEN_ADDRESS);

        let cli = Cli::try_parse_from([
            "neon-deploy",
            "deploy-staking-rewards",
            "--staking-token",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        ])
        .unwrap();
        let Command::DeployStakingRewards(args) = cli.command else {
            panic!("expected deploy-staking-rewards");
        };
        assert_eq!(
            args.staking_token,
            Some(address!("0x5FbDB2315678afecb367f032d93F642f64180aa3"))
        );
    }

    #[test]
    fn test_parse_upgrade() {
        let cli = Cli::try_parse_from([
            "neon-deploy",
            "upgrade",
            "--proxy-admin",
            "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0",
            "--proxy",
            "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
            "--implementation",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "--calldata",
            "0x8129fc1c",
        ])
        .unwrap();

        let Command::Upgrade(args) = cli.command else {
            panic!("expected upgrade");
        };
        assert_eq!(
            args.proxy_admin,
            address!("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0")
        );
        assert_eq!(args.calldata, Some(bytes!("8129fc1c")));
    }

    #[test]
    fn test_reject_invalid_address() {
        assert!(Cli::try_parse_from([
            "neon-deploy",
            "deploy-neon-token",
            "--owner",
            "not-an-address",
        ])
        .is_err());
    }
}
