//! Utilities for the deploy scripts.

use std::{
    env, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{
    dyn_abi::DynSolValue,
    network::{ReceiptResponse, TransactionBuilder},
    primitives::{Address, Bytes, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    sol_types::SolCall,
    transports::http::reqwest::Url,
};
use neon_common::{constants::DEFAULT_DEVELOPMENT_PKEY, networks::NetworkConfig};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::{
    constants::{
        ARTIFACT_EXTENSION, INITIALIZER, NUM_BYTES_ADDRESS, NUM_BYTES_STORAGE_SLOT,
        PROXY_ADMIN_STORAGE_SLOT, PROXY_CONTRACT_NAME,
    },
    errors::ScriptError,
    solidity::initializeCall,
    types::{Client, ContractArtifact, DeployContext, ProxyDeployment},
};

// -----------------
// | Configuration |
// -----------------

/// Resolve the network to deploy to, and the RPC URL to reach it at.
///
/// An explicit `rpc_url` takes precedence over the network's configured one.
/// Networks that are not known ahead of time can only be used with an
/// explicit `rpc_url`.
pub fn resolve_network(
    name: &str,
    rpc_url: Option<String>,
) -> Result<(NetworkConfig, String), ScriptError> {
    let network = match (NetworkConfig::lookup(name), rpc_url.as_deref()) {
        (Some(network), _) => network,
        (None, Some(url)) => NetworkConfig::custom(name, url),
        (None, None) => {
            return Err(ScriptError::Config(format!(
                "unknown network `{}`, an RPC URL is required to deploy to it",
                name
            )))
        }
    };

    let rpc_url = match rpc_url {
        Some(url) => url,
        None => network
            .default_rpc_url
            .as_deref()
            .map(String::from)
            .or_else(|| network.rpc_url_env_var.and_then(|var| env::var(var).ok()))
            .ok_or_else(|| {
                ScriptError::Config(format!(
                    "no RPC URL configured for network `{}`",
                    network.name()
                ))
            })?,
    };

    Ok((network, rpc_url))
}

/// Resolve the private key to deploy with.
///
/// Development chains fall back to the first prefunded development account;
/// every other network requires an explicit key.
pub fn resolve_priv_key(
    network: &NetworkConfig,
    priv_key: Option<String>,
) -> Result<String, ScriptError> {
    match priv_key {
        Some(priv_key) => Ok(priv_key),
        None if network.is_development() => Ok(DEFAULT_DEVELOPMENT_PKEY.to_string()),
        None => Err(ScriptError::Config(format!(
            "a private key is required to deploy to `{}`",
            network.name()
        ))),
    }
}

/// Sets up the signing client with which to send transactions,
/// returning it alongside the address of the signer.
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<(Client, Address), ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let deployer = signer.address();

    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);

    Ok((DynProvider::new(provider), deployer))
}

/// Ensure that the RPC endpoint serves the chain the network is configured for
pub async fn check_chain_id(client: &Client, network: &NetworkConfig) -> Result<(), ScriptError> {
    let actual = client
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    match network.chain_id {
        Some(expected) if expected != actual => {
            Err(ScriptError::ChainIdMismatch { expected, actual })
        }
        Some(_) => Ok(()),
        None => {
            warn!(
                "Network `{}` has no configured chain ID, deploying to chain {}",
                network.name(),
                actual
            );
            Ok(())
        }
    }
}

/// Build the context shared by all deploy commands from the CLI arguments
pub async fn setup_context(
    network: &str,
    rpc_url: Option<String>,
    priv_key: Option<String>,
    artifacts_dir: PathBuf,
    deployments_path: PathBuf,
) -> Result<DeployContext, ScriptError> {
    let (network, rpc_url) = resolve_network(network, rpc_url)?;
    let priv_key = resolve_priv_key(&network, priv_key)?;

    let (client, deployer) = setup_client(&priv_key, &rpc_url)?;
    check_chain_id(&client, &network).await?;

    info!(
        "Deploying to `{}` at {} from {:#x}",
        network.name(),
        rpc_url,
        deployer
    );

    Ok(DeployContext {
        network,
        client,
        deployer,
        artifacts_dir,
        deployments_path,
    })
}

// -------------
// | Artifacts |
// -------------

/// Find the compilation artifact for the given contract under `artifacts_dir`
pub fn find_artifact(artifacts_dir: &Path, contract_name: &str) -> Result<PathBuf, ScriptError> {
    let file_name = format!("{}.{}", contract_name, ARTIFACT_EXTENSION);
    search_dir(artifacts_dir, &file_name)?.ok_or_else(|| {
        ScriptError::ReadArtifact(format!(
            "no artifact for {} under {}",
            contract_name,
            artifacts_dir.display()
        ))
    })
}

/// Search `dir` for a file named `file_name`, preferring shallower matches.
///
/// Symlinked directories are not descended into.
fn search_dir(dir: &Path, file_name: &str) -> Result<Option<PathBuf>, ScriptError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| ScriptError::ReadArtifact(format!("{}: {}", dir.display(), e)))?
        .map(|entry| entry.and_then(|entry| Ok((entry.path(), entry.file_type()?))))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ScriptError::ReadArtifact(e.to_string()))?;
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    let found = entries.iter().find(|(path, _)| {
        path.is_file() && path.file_name().and_then(|name| name.to_str()) == Some(file_name)
    });
    if let Some((path, _)) = found {
        return Ok(Some(path.clone()));
    }

    for (path, _) in entries.iter().filter(|(_, file_type)| file_type.is_dir()) {
        if let Some(path) = search_dir(path, file_name)? {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

/// Load the compilation artifact for the given contract
pub fn load_artifact(
    artifacts_dir: &Path,
    contract_name: &str,
) -> Result<ContractArtifact, ScriptError> {
    let path = find_artifact(artifacts_dir, contract_name)?;
    let contents =
        fs::read_to_string(&path).map_err(|e| ScriptError::ReadArtifact(e.to_string()))?;

    let mut artifact: ContractArtifact = serde_json::from_str(&contents)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;
    if artifact.contract_name.is_empty() {
        artifact.contract_name = contract_name.to_string();
    }

    // Interfaces and abstract contracts compile to empty bytecode
    if artifact.bytecode.is_empty() {
        return Err(ScriptError::ArtifactParsing(format!(
            "{} has no bytecode",
            artifact.contract_name
        )));
    }

    Ok(artifact)
}

// ---------------
// | Deployments |
// ---------------

/// Read the deployments file as a map from network name to deployed contracts
fn read_deployments_file(path: &Path) -> Result<Map<String, Value>, ScriptError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ScriptError::ReadDeployments(format!("{}: {}", path.display(), e)))?;

    match serde_json::from_str::<Value>(&contents)
        .map_err(|e| ScriptError::ReadDeployments(e.to_string()))?
    {
        Value::Object(deployments) => Ok(deployments),
        _ => Err(ScriptError::ReadDeployments(format!(
            "{} is not a JSON object",
            path.display()
        ))),
    }
}

/// Read the address recorded for `key` on `network` from the deployments file
pub fn read_deployment(path: &Path, network: &str, key: &str) -> Result<Address, ScriptError> {
    let deployments = read_deployments_file(path)?;

    let addr_str = deployments
        .get(network)
        .and_then(|contracts| contracts.get(key))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ScriptError::ReadDeployments(format!(
                "no {} deployment recorded for `{}`",
                key, network
            ))
        })?;

    Address::from_str(addr_str).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Record the address of `key` on `network` in the deployments file,
/// creating the file if it doesn't exist
pub fn write_deployment(
    path: &Path,
    network: &str,
    key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    let mut deployments = if path.exists() {
        read_deployments_file(path)?
    } else {
        Map::new()
    };

    let contracts = deployments
        .entry(network)
        .or_insert_with(|| Value::Object(Map::new()));
    let Value::Object(contracts) = contracts else {
        return Err(ScriptError::WriteDeployments(format!(
            "entry for `{}` is not a JSON object",
            network
        )));
    };
    contracts.insert(key.to_string(), Value::String(address.to_string()));

    let contents = serde_json::to_string_pretty(&Value::Object(deployments))
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    fs::write(path, contents).map_err(|e| ScriptError::WriteDeployments(e.to_string()))
}

// --------------
// | Deployment |
// --------------

/// Deploy the given contract, waiting for the network's configured number of confirmations
pub async fn deploy_contract(
    ctx: &DeployContext,
    artifact: &ContractArtifact,
    constructor_args: &[DynSolValue],
) -> Result<Address, ScriptError> {
    let deploy_code = artifact.deploy_code(constructor_args)?;
    let tx = TransactionRequest::default().with_deploy_code(deploy_code);

    let receipt = ctx
        .client
        .send_transaction(tx)
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
        .with_required_confirmations(ctx.network.block_confirmations)
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

    let address = deployed_address(&receipt, &artifact.contract_name)?;

    info!("{} deployed at {:#x}", artifact.contract_name, address);
    Ok(address)
}

/// Ensure the transaction behind `receipt` succeeded, describing the
/// reverted `action` otherwise
pub fn ensure_success<R: ReceiptResponse>(receipt: &R, action: &str) -> Result<(), String> {
    if receipt.status() {
        return Ok(());
    }

    Err(format!(
        "{} reverted in tx {:#x}",
        action,
        receipt.transaction_hash()
    ))
}

/// The address of the contract created by the deployment behind `receipt`
pub fn deployed_address<R: ReceiptResponse>(
    receipt: &R,
    contract_name: &str,
) -> Result<Address, ScriptError> {
    ensure_success(receipt, &format!("{} deployment", contract_name))
        .map_err(ScriptError::ContractDeployment)?;

    receipt.contract_address().ok_or_else(|| {
        ScriptError::ContractDeployment(format!(
            "no contract address in receipt for {}",
            contract_name
        ))
    })
}

/// Prepare calldata for the `initialize` method run through the proxy
pub fn initialize_calldata() -> Bytes {
    initializeCall {}.abi_encode().into()
}

/// Deploy the given contract behind a `TransparentUpgradeableProxy`,
/// initializing it through the proxy.
///
/// The proxy deploys its own `ProxyAdmin`, owned by `owner`.
pub async fn deploy_proxy(
    ctx: &DeployContext,
    artifact: &ContractArtifact,
    constructor_args: &[DynSolValue],
    owner: Address,
) -> Result<ProxyDeployment, ScriptError> {
    if !artifact.has_function(INITIALIZER) {
        return Err(ScriptError::CalldataConstruction(format!(
            "{} has no `{}` function",
            artifact.contract_name, INITIALIZER
        )));
    }
    let proxy_artifact = load_artifact(&ctx.artifacts_dir, PROXY_CONTRACT_NAME)?;

    let implementation = deploy_contract(ctx, artifact, constructor_args).await?;

    let proxy = deploy_contract(
        ctx,
        &proxy_artifact,
        &[
            DynSolValue::Address(implementation),
            DynSolValue::Address(owner),
            DynSolValue::Bytes(initialize_calldata().to_vec()),
        ],
    )
    .await?;

    let proxy_admin = get_proxy_admin(&ctx.client, proxy).await?;

    Ok(ProxyDeployment {
        implementation,
        proxy,
        proxy_admin,
    })
}

/// Get the address of the admin contract of the given proxy.
///
/// This is the recommended way to get the proxy admin address:
/// https://github.com/OpenZeppelin/openzeppelin-contracts/blob/v5.0.0/contracts/proxy/ERC1967/ERC1967Utils.sol#L104-L106
pub async fn get_proxy_admin(client: &Client, proxy: Address) -> Result<Address, ScriptError> {
    let slot = client
        .get_storage_at(proxy, U256::from_be_bytes(PROXY_ADMIN_STORAGE_SLOT.0))
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    Ok(proxy_admin_from_slot(slot))
}

/// Extract the admin address from the value of the EIP-1967 admin slot
pub fn proxy_admin_from_slot(slot: U256) -> Address {
    Address::from_slice(
        &slot.to_be_bytes::<NUM_BYTES_STORAGE_SLOT>()
            [NUM_BYTES_STORAGE_SLOT - NUM_BYTES_ADDRESS..NUM_BYTES_STORAGE_SLOT],
    )
}
