//! Implementations of the various deploy scripts

use std::path::Path;

use alloy::{dyn_abi::DynSolValue, primitives::Address};
use neon_common::{
    constants::{DEVELOPMENT_CHAINS, STAKING_MAIN_TOKEN_ADDRESS},
    resolver::select_address,
};
use tracing::{info, warn};

use crate::{
    cli::{DeployNeonTokenArgs, DeployStakingRewardsArgs, UpgradeArgs},
    constants::{
        NEON_TOKEN_CONTRACT_NAME, NEON_TOKEN_KEY, NEON_TOKEN_PROXY_ADMIN_KEY, NEON_TOKEN_PROXY_KEY,
        STAKING_REWARDS_CONTRACT_NAME, STAKING_REWARDS_KEY, STAKING_REWARDS_PROXY_ADMIN_KEY,
        STAKING_REWARDS_PROXY_KEY, TEST_STAKING_TOKEN_CONTRACT_NAME, TEST_STAKING_TOKEN_KEY,
    },
    errors::ScriptError,
    solidity::IProxyAdmin,
    types::{DeployContext, ProxyDeployment},
    utils::{
        deploy_contract, deploy_proxy, ensure_success, load_artifact, read_deployment,
        write_deployment,
    },
};

pub async fn deploy_test_staking_token(ctx: &DeployContext) -> Result<(), ScriptError> {
    if !ctx.network.is_development() {
        warn!(
            "Deploying `{}` to `{}` - THIS SHOULD ONLY BE DONE FOR TESTING",
            TEST_STAKING_TOKEN_CONTRACT_NAME,
            ctx.network.name()
        );
    }

    info!("Start deploying test staking token...");

    let artifact = load_artifact(&ctx.artifacts_dir, TEST_STAKING_TOKEN_CONTRACT_NAME)?;
    let address = deploy_contract(ctx, &artifact, &[]).await?;

    record(ctx, TEST_STAKING_TOKEN_KEY, address)?;

    info!("Deployed test staking token at: {:#x}", address);
    Ok(())
}

pub async fn deploy_neon_token(
    args: DeployNeonTokenArgs,
    ctx: &DeployContext,
) -> Result<(), ScriptError> {
    let owner = args.owner.unwrap_or(ctx.deployer);
    let artifact = load_artifact(&ctx.artifacts_dir, NEON_TOKEN_CONTRACT_NAME)?;

    info!("Start deploying Neon token proxy...");

    let deployment = deploy_proxy(ctx, &artifact, &[], owner).await?;
    record_proxy(
        ctx,
        &deployment,
        NEON_TOKEN_KEY,
        NEON_TOKEN_PROXY_KEY,
        NEON_TOKEN_PROXY_ADMIN_KEY,
    )?;

    info!("Deployed Neon token proxy at: {:#x}", deployment.proxy);
    info!(
        "Neon token proxy admin deployed at: {:#x}",
        deployment.proxy_admin
    );
    Ok(())
}

pub async fn deploy_staking_rewards(
    args: DeployStakingRewardsArgs,
    ctx: &DeployContext,
) -> Result<(), ScriptError> {
    let owner = args.owner.unwrap_or(ctx.deployer);
    let staking_token = resolve_staking_token(
        args.staking_token,
        ctx.network.name(),
        &ctx.deployments_path,
    )?;
    let reward_token = args.reward_token;

    let artifact = load_artifact(&ctx.artifacts_dir, STAKING_REWARDS_CONTRACT_NAME)?;

    info!(
        "Start deploying StakingRewards proxy with staking token {:#x} and reward token {:#x}...",
        staking_token, reward_token
    );

    let deployment = deploy_proxy(
        ctx,
        &artifact,
        &[
            DynSolValue::Address(staking_token),
            DynSolValue::Address(reward_token),
        ],
        owner,
    )
    .await?;
    record_proxy(
        ctx,
        &deployment,
        STAKING_REWARDS_KEY,
        STAKING_REWARDS_PROXY_KEY,
        STAKING_REWARDS_PROXY_ADMIN_KEY,
    )?;

    info!(
        "Successfully deployed StakingRewards proxy at {:#x}",
        deployment.proxy
    );
    info!(
        "StakingRewards proxy admin deployed at {:#x}",
        deployment.proxy_admin
    );
    Ok(())
}

pub async fn upgrade(args: UpgradeArgs, ctx: &DeployContext) -> Result<(), ScriptError> {
    let proxy_admin = IProxyAdmin::new(args.proxy_admin, ctx.client.clone());
    let data = args.calldata.unwrap_or_default();

    info!(
        "Upgrading proxy {:#x} to implementation {:#x}...",
        args.proxy, args.implementation
    );

    let receipt = proxy_admin
        .upgradeAndCall(args.proxy, args.implementation, data)
        .send()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
        .with_required_confirmations(ctx.network.block_confirmations)
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    ensure_success(&receipt, "upgrade").map_err(ScriptError::ContractInteraction)?;

    info!("Upgraded proxy {:#x}", args.proxy);
    Ok(())
}

/// The staking token to bind into the staking rewards contract.
///
/// An explicit `staking_token` always wins. Otherwise development chains use
/// the test staking token recorded for `network`, and every other network
/// uses DAI. The recorded token is only required on development chains.
fn resolve_staking_token(
    staking_token: Option<Address>,
    network: &str,
    deployments_path: &Path,
) -> Result<Address, ScriptError> {
    if let Some(staking_token) = staking_token {
        return Ok(staking_token);
    }

    let test_staking_token = read_deployment(deployments_path, network, TEST_STAKING_TOKEN_KEY);
    select_address(
        &DEVELOPMENT_CHAINS,
        network,
        Ok(STAKING_MAIN_TOKEN_ADDRESS),
        test_staking_token,
    )
}

/// Record a deployed address for the current network
fn record(ctx: &DeployContext, key: &str, address: Address) -> Result<(), ScriptError> {
    write_deployment(&ctx.deployments_path, ctx.network.name(), key, address)
}

/// Record all addresses produced by a proxy deployment for the current network
fn record_proxy(
    ctx: &DeployContext,
    deployment: &ProxyDeployment,
    implementation_key: &str,
    proxy_key: &str,
    proxy_admin_key: &str,
) -> Result<(), ScriptError> {
    record(ctx, implementation_key, deployment.implementation)?;
    record(ctx, proxy_key, deployment.proxy)?;
    record(ctx, proxy_admin_key, deployment.proxy_admin)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;
    use neon_common::constants::STAKING_MAIN_TOKEN_ADDRESS;
    use tempfile::tempdir;

    use super::resolve_staking_token;
    use crate::{constants::TEST_STAKING_TOKEN_KEY, errors::ScriptError, utils::write_deployment};

    #[test]
    fn test_explicit_staking_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let staking_token = address!("0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0");

        // No deployments file is needed on any network
        for network in ["hardhat", "sepolia", "holesky"] {
            assert_eq!(
                resolve_staking_token(Some(staking_token), network, &path).unwrap(),
                staking_token
            );
        }
    }

    #[test]
    fn test_recorded_staking_token_on_development_chain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let test_token = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
        write_deployment(&path, "localhost", TEST_STAKING_TOKEN_KEY, test_token).unwrap();

        assert_eq!(
            resolve_staking_token(None, "localhost", &path).unwrap(),
            test_token
        );
    }

    #[test]
    fn test_unrecorded_staking_token_on_development_chain() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.json");

        assert!(matches!(
            resolve_staking_token(None, "hardhat", &path),
            Err(ScriptError::ReadDeployments(_))
        ));

        // A token recorded for another network doesn't count
        let test_token = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
        write_deployment(&path, "localhost", TEST_STAKING_TOKEN_KEY, test_token).unwrap();
        assert!(resolve_staking_token(None, "hardhat", &path).is_err());
    }

    #[test]
    fn test_main_staking_token_without_deployments_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.json");

        assert_eq!(
            resolve_staking_token(None, "sepolia", &path).unwrap(),
            STAKING_MAIN_TOKEN_ADDRESS
        );
        assert_eq!(
            resolve_staking_token(None, "holesky", &path).unwrap(),
            STAKING_MAIN_TOKEN_ADDRESS
        );
        assert!(!path.exists());
    }

    #[test]
    fn test_main_staking_token_ignores_recorded_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let test_token = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
        write_deployment(&path, "sepolia", TEST_STAKING_TOKEN_KEY, test_token).unwrap();

        assert_eq!(
            resolve_staking_token(None, "sepolia", &path).unwrap(),
            STAKING_MAIN_TOKEN_ADDRESS
        );
    }
}
