//! Transaction signer that delegates signing to an external wallet service.
//!
//! The wallet signer sends `eth_signTransaction` JSON-RPC requests to a
//! wallet service, which holds the key and may require interactive user
//! approval. A declined prompt comes back as JSON-RPC error 4001 (the
//! EIP-1193 user-rejection code) and is surfaced as
//! [`ClientError::UserRejected`] so callers can distinguish a cancelled
//! signature from a transport failure.

use crate::ClientError;
use alloy_primitives::{Address, Bytes};
use alloy_rpc_types::eth::TransactionRequest;
use eyre::{bail, Result};
use serde::{Deserialize, Serialize};

/// JSON-RPC error code for a user-rejected request (EIP-1193).
const USER_REJECTED_CODE: i32 = 4001;

/// A signer that delegates transaction signing to a wallet service.
///
/// Sends `eth_signTransaction` requests over HTTP and returns the signed
/// raw transaction bytes ready for broadcast.
///
/// # Example
///
/// ```ignore
/// let wallet = WalletSigner::new("http://localhost:9060", address, 56);
/// let signed_tx = wallet.sign_transaction(tx_request).await?;
/// provider.send_raw_transaction(&signed_tx).await?;
/// ```
#[derive(Debug, Clone)]
pub struct WalletSigner {
    client: reqwest::Client,
    wallet_url: String,
    address: Address,
    chain_id: u64,
}

impl WalletSigner {
    /// Creates a new wallet signer.
    ///
    /// # Arguments
    /// * `wallet_url` - The URL of the wallet service (e.g., "http://localhost:9060")
    /// * `address` - The account the wallet signs for
    /// * `chain_id` - The chain ID for EIP-155 replay protection
    pub fn new(wallet_url: impl Into<String>, address: Address, chain_id: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            wallet_url: wallet_url.into(),
            address,
            chain_id,
        }
    }

    /// Creates a new wallet signer with a custom HTTP client.
    pub fn with_client(
        client: reqwest::Client,
        wallet_url: impl Into<String>,
        address: Address,
        chain_id: u64,
    ) -> Self {
        Self {
            client,
            wallet_url: wallet_url.into(),
            address,
            chain_id,
        }
    }

    /// Returns the signer's address.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the chain ID.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Signs a transaction via the wallet service.
    ///
    /// Returns the signed transaction as raw bytes, ready to be broadcast
    /// via `provider.send_raw_transaction()`. The wait is unbounded from
    /// this side: the service may block on user approval, and declining
    /// surfaces as [`ClientError::UserRejected`] with no local state
    /// touched.
    pub async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method: "eth_signTransaction",
            params: [tx],
            id: 1,
        };

        let response = self
            .client
            .post(&self.wallet_url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            bail!("wallet service returned {status}: {body}");
        }

        let rpc_response: JsonRpcResponse<SignedTransactionResponse> = response.json().await?;

        match rpc_response.result {
            Some(result) => {
                let bytes: Bytes = result.raw.parse()?;
                Ok(bytes)
            }
            None => {
                let error = rpc_response.error.unwrap_or(JsonRpcError {
                    code: -1,
                    message: "unknown error".to_string(),
                });
                if error.code == USER_REJECTED_CODE {
                    return Err(ClientError::UserRejected.into());
                }
                bail!("JSON-RPC error {}: {}", error.code, error.message);
            }
        }
    }

    /// Helper to build a transaction request with the signer's address and
    /// chain ID pre-filled.
    pub fn build_transaction(&self) -> TransactionRequest {
        TransactionRequest {
            from: Some(self.address),
            chain_id: Some(self.chain_id),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<T> {
    jsonrpc: &'static str,
    method: &'static str,
    params: T,
    id: u32,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

/// Response from eth_signTransaction containing the signed transaction.
#[derive(Debug, Deserialize)]
struct SignedTransactionResponse {
    /// The signed transaction as hex-encoded RLP.
    raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_build_transaction() {
        let wallet = WalletSigner::new(
            "http://localhost:9060",
            address!("5CFFA347b0aE99cc01E5c01714cA5658e54a23D1"),
            56,
        );

        let tx = wallet.build_transaction();
        assert_eq!(tx.from, Some(wallet.address()));
        assert_eq!(tx.chain_id, Some(56));
    }

    #[test]
    fn test_rejection_code_is_eip_1193() {
        assert_eq!(USER_REJECTED_CODE, 4001);
    }
}
