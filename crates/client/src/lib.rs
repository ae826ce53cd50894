mod wallet;

use alloy_consensus::TxEnvelope;
use alloy_network::{eip2718::Encodable2718, EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, Bytes};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use std::{future::Future, pin::Pin, sync::Arc};
use thiserror::Error;
pub use wallet::WalletSigner;

/// A function that signs a transaction request and returns signed bytes.
///
/// This type alias matches the one in the `action` crate and allows
/// for both local key signing and delegation to a wallet service.
pub type SignerFn = Arc<
    dyn Fn(TransactionRequest) -> Pin<Box<dyn Future<Output = eyre::Result<Bytes>> + Send>>
        + Send
        + Sync,
>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Error connecting to the RPC endpoint
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error with private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Connected endpoint serves a different chain than the configuration
    /// targets
    #[error("wrong network: expected chain id {expected}, endpoint serves {actual}")]
    WrongNetwork { expected: u64, actual: u64 },

    /// The wallet service declined to sign (user closed the prompt)
    #[error("signature request rejected by wallet")]
    UserRejected,

    /// General error with context
    #[error("Client error: {0}")]
    Other(String),
}

/// Convenience function to create an ethereum rpc provider from url.
pub async fn create_provider(rpc_url: &str) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;
    let provider = ProviderBuilder::new().connect_http(url);

    Ok(provider)
}

/// Create a provider with wallet signing capability from a private key.
pub fn create_wallet_provider(
    rpc_url: &str,
    private_key: &str,
) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;

    let signer: PrivateKeySigner = private_key
        .parse()
        .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))?;

    let wallet = EthereumWallet::from(signer);

    let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

    Ok(provider)
}

/// Verify the provider is connected to the expected chain.
///
/// An RPC endpoint cannot be switched the way a browser wallet can; a
/// mismatch means the configuration points at the wrong network and must
/// be fixed before any transaction is built. Returns the verified chain id
/// so callers record what the chain reports, not what they assumed.
pub async fn ensure_chain<P>(provider: &P, expected: u64) -> Result<u64, ClientError>
where
    P: Provider,
{
    let actual = provider
        .get_chain_id()
        .await
        .map_err(|e| ClientError::Connection(format!("{}", e)))?;

    if actual != expected {
        return Err(ClientError::WrongNetwork { expected, actual });
    }

    Ok(actual)
}

/// Create a SignerFn from a WalletSigner and provider.
///
/// The provider is used to fill transaction fields (nonce, gas, fees)
/// before sending to the wallet service for signing.
pub fn wallet_signer_fn<P>(wallet: WalletSigner, provider: P) -> SignerFn
where
    P: Provider + Clone + 'static,
{
    let from_address = wallet.address();
    let chain_id = wallet.chain_id();

    Arc::new(move |tx| {
        let wallet = wallet.clone();
        let provider = provider.clone();
        Box::pin(async move {
            let prepared = prepare_transaction(tx, from_address, chain_id);
            let filled_tx = fill_transaction(prepared, &provider).await?;
            wallet.sign_transaction(filled_tx).await
        })
    })
}

/// Create a SignerFn from a local private key and provider.
///
/// The provider is used to fill transaction fields (nonce, gas, fees)
/// before signing locally with the private key.
pub fn local_signer_fn<P>(
    private_key: &str,
    chain_id: u64,
    provider: P,
) -> Result<SignerFn, ClientError>
where
    P: Provider + Clone + 'static,
{
    let signer: PrivateKeySigner = private_key
        .parse()
        .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))?;
    let from_address = signer.address();
    let wallet = EthereumWallet::from(signer);

    Ok(Arc::new(move |tx: TransactionRequest| {
        let wallet = wallet.clone();
        let provider = provider.clone();
        Box::pin(async move {
            let prepared = prepare_transaction(tx, from_address, chain_id);
            let filled_tx = fill_transaction(prepared, &provider).await?;

            // Build and sign the typed transaction
            let tx_envelope: TxEnvelope = filled_tx
                .build(&wallet)
                .await
                .map_err(|e| eyre::eyre!("{}", e))?;

            // Encode to EIP-2718 bytes
            let mut encoded = Vec::new();
            tx_envelope.encode_2718(&mut encoded);
            Ok(Bytes::from(encoded))
        })
    }))
}

/// Set sender and chain id when the caller left them open.
fn prepare_transaction(
    mut tx: TransactionRequest,
    from: Address,
    chain_id: u64,
) -> TransactionRequest {
    if tx.from.is_none() {
        tx.from = Some(from);
    }
    if tx.chain_id.is_none() {
        tx.chain_id = Some(chain_id);
    }
    tx
}

/// Fill missing transaction fields using the provider.
///
/// The sender must already be set; chain id, nonce, fees, and gas are
/// resolved from the provider when absent.
pub async fn fill_transaction<P>(
    mut tx: TransactionRequest,
    provider: &P,
) -> eyre::Result<TransactionRequest>
where
    P: Provider,
{
    let from = tx
        .from
        .ok_or_else(|| eyre::eyre!("transaction request has no sender"))?;

    // Set chain_id
    if tx.chain_id.is_none() {
        tx.chain_id = Some(provider.get_chain_id().await?);
    }

    // Get nonce if not set
    if tx.nonce.is_none() {
        let nonce = provider.get_transaction_count(from).await?;
        tx.nonce = Some(nonce);
    }

    // Get fee parameters if not set (EIP-1559) - do this before gas estimation
    // since gas estimation may need fee info
    if tx.max_fee_per_gas.is_none() || tx.max_priority_fee_per_gas.is_none() {
        let fee_estimate = provider.estimate_eip1559_fees().await?;
        if tx.max_fee_per_gas.is_none() {
            tx.max_fee_per_gas = Some(fee_estimate.max_fee_per_gas);
        }
        if tx.max_priority_fee_per_gas.is_none() {
            tx.max_priority_fee_per_gas = Some(fee_estimate.max_priority_fee_per_gas);
        }
    }

    // Estimate gas if not set
    if tx.gas.is_none() {
        let gas_estimate = provider.estimate_gas(tx.clone()).await?;
        // Add 20% buffer for safety
        tx.gas = Some(gas_estimate + gas_estimate / 5);
    }

    Ok(tx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url() {
        let result = create_provider("not a url").await;
        assert!(result.is_err());
    }

    #[test]
    fn test_prepare_transaction_fills_open_fields() {
        let from = Address::from([0x42; 20]);
        let tx = prepare_transaction(TransactionRequest::default(), from, 97);
        assert_eq!(tx.from, Some(from));
        assert_eq!(tx.chain_id, Some(97));

        // Caller-set fields win
        let preset = TransactionRequest {
            chain_id: Some(56),
            ..Default::default()
        };
        let tx = prepare_transaction(preset, from, 97);
        assert_eq!(tx.chain_id, Some(56));
    }

    #[test]
    fn test_wrong_network_error_names_both_chains() {
        let err = ClientError::WrongNetwork {
            expected: 56,
            actual: 1,
        };
        let message = err.to_string();
        assert!(message.contains("56"));
        assert!(message.contains('1'));
    }
}
