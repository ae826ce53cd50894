//! Client for the remote Solidity compilation service.
//!
//! The service wraps solc: it takes raw source text and the identifier of
//! the contract to extract, and returns the ABI plus deployable creation
//! bytecode. Compilation failures come back as a JSON `error` body and are
//! surfaced verbatim — a failure here on generated source means the
//! template and the service disagree, which the operator needs to see
//! unfiltered.

use alloy_primitives::{hex, Bytes};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    /// Transport-level failure reaching the service
    #[error("compiler service unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the source; message is solc's, verbatim
    #[error("compiler rejected source: {0}")]
    Rejected(String),

    /// Non-success response without a structured compiler error
    #[error("compiler service returned {status}: {message}")]
    Service { status: u16, message: String },

    /// The service answered but the bytecode field is not usable
    #[error("compiler returned malformed bytecode: {0}")]
    InvalidBytecode(String),
}

/// Compiled contract artifacts ready for deployment.
#[derive(Debug, Clone)]
pub struct CompiledContract {
    /// JSON ABI as produced by solc
    pub abi: Value,
    /// Deployable creation bytecode
    pub bytecode: Bytes,
    /// Non-fatal compiler diagnostics
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompileRequest<'a> {
    source_code: &'a str,
    contract_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompileResponse {
    abi: Option<Value>,
    bytecode: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
    error: Option<String>,
}

/// Client for the compilation service.
#[derive(Debug, Clone)]
pub struct CompilerClient {
    client: reqwest::Client,
    base_url: String,
}

impl CompilerClient {
    /// Creates a new compiler client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Creates a new compiler client with a custom HTTP client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Compile `source_text` and return the artifacts for
    /// `contract_identifier` (the generated contract is named after the
    /// token symbol).
    pub async fn compile(
        &self,
        source_text: &str,
        contract_identifier: &str,
    ) -> Result<CompiledContract, CompileError> {
        let request = CompileRequest {
            source_code: source_text,
            contract_name: contract_identifier,
        };

        let response = self
            .client
            .post(format!("{}/api/solidity/compile", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            // Compilation failures arrive as 4xx with an `error` body
            if let Some(error) = parse_error_body(&body) {
                return Err(CompileError::Rejected(error));
            }
            return Err(CompileError::Service {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: CompileResponse = response.json().await?;
        if let Some(error) = parsed.error {
            return Err(CompileError::Rejected(error));
        }

        let (Some(abi), Some(bytecode)) = (parsed.abi, parsed.bytecode) else {
            return Err(CompileError::Rejected(
                "response missing abi or bytecode".to_string(),
            ));
        };

        Ok(CompiledContract {
            abi,
            bytecode: parse_bytecode(&bytecode)?,
            warnings: parsed.errors,
        })
    }
}

fn parse_error_body(body: &str) -> Option<String> {
    serde_json::from_str::<CompileResponse>(body).ok()?.error
}

/// Decode solc bytecode output (hex, with or without a 0x prefix).
fn parse_bytecode(raw: &str) -> Result<Bytes, CompileError> {
    let stripped = raw.strip_prefix("0x").unwrap_or(raw);
    if stripped.is_empty() {
        return Err(CompileError::InvalidBytecode("empty bytecode".to_string()));
    }
    hex::decode(stripped)
        .map(Bytes::from)
        .map_err(|e| CompileError::InvalidBytecode(format!("{}", e)))
}
