//! Deployment pipeline: generate → compile → deploy → verify → record.
//!
//! The pipeline performs no business logic beyond sequencing the external
//! collaborators and surfacing the first failure. Each stage maps onto one
//! [`DeployError`] variant so callers can tell a local validation failure
//! from a network-side one — and, critically, a clean failure from a
//! confirmed deployment whose registry write was lost.

use action::{
    deploy::{Deploy, DeployAction},
    Action, SignerFn,
};
use alloy_primitives::Address;
use alloy_provider::Provider;
use compiler::{CompileError, CompilerClient};
use config::ChainConfig;
use registry::{DeploymentRecord, NewDeployment, RegistryClient, RegistryError};
use template::{generate, TemplateError, TokenSpec};
use thiserror::Error;
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{error, info, warn};

/// Failure taxonomy of the deployment pipeline, ordered by stage.
#[derive(Error, Debug)]
pub enum DeployError {
    /// Bad name/symbol/decimals; rejected before any network call
    #[error("invalid token parameters: {0}")]
    Validation(#[from] TemplateError),

    /// Compiler service rejected the generated source
    #[error("compilation failed: {0}")]
    Compile(#[from] CompileError),

    /// Wallet or provider failure (wrong network, rejected signature)
    #[error("wallet error: {0}")]
    Wallet(#[from] client::ClientError),

    /// Broadcast or confirmation failure on the target chain
    #[error("chain error: {0}")]
    Chain(#[source] eyre::Report),

    /// The deployment is confirmed on-chain but the registry write failed.
    ///
    /// The token exists at `contract_address` and is only missing from the
    /// registry; callers must surface this distinctly from a clean failure.
    #[error("deployment confirmed at {contract_address} but registry record failed: {source}")]
    Registry {
        contract_address: Address,
        #[source]
        source: RegistryError,
    },
}

/// A successful deployment: the on-chain address plus the registry row.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub contract_address: Address,
    pub record: DeploymentRecord,
}

/// Run the full deployment pipeline for `spec`.
///
/// The chain id written to the registry is read back from the RPC
/// endpoint, never taken from configuration, so a misconfigured client
/// cannot record a spoofed contract/chain pairing.
pub async fn deploy_token<P>(
    provider: P,
    signer: SignerFn,
    compiler: &CompilerClient,
    registry: &RegistryClient,
    chain: &ChainConfig,
    wallet_address: Address,
    spec: &TokenSpec,
) -> Result<DeployOutcome, DeployError>
where
    P: Provider + Clone,
{
    let source = generate(spec)?;
    info!(
        symbol = %spec.symbol,
        source_bytes = source.len(),
        "Contract source generated"
    );

    let compiled = compiler.compile(&source, &spec.symbol).await?;
    info!(
        bytecode_bytes = compiled.bytecode.len(),
        "Contract compiled"
    );
    for warning in &compiled.warnings {
        warn!("compiler: {}", warning);
    }

    let chain_id = client::ensure_chain(&provider, chain.chain_id).await?;

    let mut deploy = DeployAction::new(
        provider.clone(),
        signer,
        Deploy {
            bytecode: compiled.bytecode,
            deployer: wallet_address,
            tx_hash: None,
        },
    );
    let result = deploy.execute().await.map_err(DeployError::Chain)?;
    let contract_address = result.contract_address.ok_or_else(|| {
        DeployError::Chain(eyre::eyre!("deployment receipt carried no contract address"))
    })?;

    verify_deployment(&provider, contract_address)
        .await
        .map_err(DeployError::Chain)?;

    let record = registry
        .record(&NewDeployment {
            wallet_address,
            token_name: spec.name.clone(),
            token_symbol: spec.symbol.clone(),
            contract_address,
            chain_id,
            decimals: spec.decimals,
        })
        .await
        .map_err(|source| {
            // The token is live; losing its record must not look like a
            // clean failure. Log the address for manual recovery.
            error!(
                contract = %contract_address,
                chain_id,
                error = %source,
                "Deployment confirmed on-chain but registry write failed; record manually"
            );
            DeployError::Registry {
                contract_address,
                source,
            }
        })?;

    info!(
        contract = %contract_address,
        record_id = %record.id,
        explorer = %chain.explorer_address_url(contract_address),
        "Deployment recorded"
    );

    Ok(DeployOutcome {
        contract_address,
        record,
    })
}

/// Confirm code exists at the deployed address before recording it.
///
/// Retries briefly with backoff: a receipt can arrive from one node of a
/// load-balanced endpoint before another node serves the code.
async fn verify_deployment<P>(provider: &P, address: Address) -> eyre::Result<()>
where
    P: Provider,
{
    let retry_strategy = ExponentialBackoff::from_millis(100).take(5);

    let code = Retry::spawn(retry_strategy, || async {
        let code = provider.get_code_at(address).await?;
        if code.is_empty() {
            eyre::bail!("no code at {} yet", address)
        }
        Ok(code)
    })
    .await?;

    info!(address = %address, code_bytes = code.len(), "Deployed code verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_registry_failure_names_the_orphaned_contract() {
        let contract_address = address!("09aea4b2242abC8bb4BB78D537A67a245A7bEC64");
        let err = DeployError::Registry {
            contract_address,
            source: RegistryError::Service {
                status: 500,
                message: "database unavailable".to_string(),
            },
        };

        let message = err.to_string();
        assert!(message.contains("confirmed"));
        assert!(message.contains("0x09aea4b2242abC8bb4BB78D537A67a245A7bEC64"));
    }

    #[test]
    fn test_validation_errors_map_to_validation_variant() {
        let err: DeployError = TemplateError::DecimalsOutOfRange(42).into();
        assert!(matches!(err, DeployError::Validation(_)));
        assert!(err.to_string().contains("invalid token parameters"));
    }
}
