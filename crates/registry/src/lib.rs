//! Client for the deployment registry service.
//!
//! The registry keeps one row per confirmed deployment, keyed by the
//! deploying wallet, and serves them back newest-first. Rows are immutable
//! once written; `id` and `deployedAt` are assigned server-side.

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// Transport-level failure reaching the service
    #[error("registry unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("registry returned {status}: {message}")]
    Service { status: u16, message: String },
}

/// A recorded deployment, as stored by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// Server-generated primary key
    pub id: String,
    /// Wallet that deployed the token
    pub wallet_address: Address,
    /// Token display name
    pub token_name: String,
    /// Token symbol (also the contract identifier)
    pub token_symbol: String,
    /// Deployed contract address
    pub contract_address: Address,
    /// Chain the contract lives on, as verified against the RPC endpoint
    pub chain_id: u64,
    /// Token decimal precision
    pub decimals: u8,
    /// Server-assigned creation timestamp
    pub deployed_at: DateTime<Utc>,
}

/// Insertion payload for a new deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeployment {
    pub wallet_address: Address,
    pub token_name: String,
    pub token_symbol: String,
    pub contract_address: Address,
    pub chain_id: u64,
    pub decimals: u8,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Client for the registry service.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    /// Creates a new registry client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Creates a new registry client with a custom HTTP client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Record a confirmed deployment. Returns the stored row with its
    /// server-assigned id and timestamp.
    pub async fn record(
        &self,
        deployment: &NewDeployment,
    ) -> Result<DeploymentRecord, RegistryError> {
        let response = self
            .client
            .post(format!("{}/api/tokens", self.base_url))
            .json(deployment)
            .send()
            .await?;

        parse_response(response).await
    }

    /// All deployments recorded for a wallet, newest first.
    pub async fn deployments_for_wallet(
        &self,
        wallet: Address,
    ) -> Result<Vec<DeploymentRecord>, RegistryError> {
        let response = self
            .client
            .get(format!("{}/api/tokens/{}", self.base_url, wallet))
            .send()
            .await?;

        parse_response(response).await
    }
}

async fn parse_response<T>(response: reqwest::Response) -> Result<T, RegistryError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown".to_string());
        let message = serde_json::from_str::<ServiceErrorBody>(&body)
            .ok()
            .and_then(|e| e.message.or(e.error))
            .unwrap_or(body);
        return Err(RegistryError::Service {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json().await?)
}
