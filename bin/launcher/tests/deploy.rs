//! Integration tests for the deployment pipeline.
//!
//! The live tests run against the network and services configured in
//! `tests/test-config.toml` (BNB testnet) and need a funded key; they are
//! ignored by default.
//!
//! Run with:
//! ```bash
//! cargo test --package launcher --test deploy -- --ignored
//! ```
#[path = "setup.rs"]
mod setup;

use alloy_provider::Provider;
use compiler::CompilerClient;
use launcher::deploy::deploy_token;
use registry::RegistryClient;
use setup::{load_private_key, load_test_config, setup_provider};
use template::TokenSpec;

#[tokio::test]
#[ignore = "requires a reachable RPC endpoint"]
async fn test_chain_check_against_configured_network() {
    let config = load_test_config();
    let network = config.network_config();

    let provider = setup_provider(&config.rpc_url()).await;
    let chain_id = client::ensure_chain(&provider, network.chain.chain_id)
        .await
        .expect("endpoint should serve the configured chain");

    println!("✓ Connected to chain {}", chain_id);
    assert_eq!(chain_id, network.chain.chain_id);
}

#[tokio::test]
#[ignore = "requires a running compiler service"]
async fn test_generated_source_compiles() {
    let config = load_test_config();
    let compiler_client = CompilerClient::new(&config.compiler_url);

    let spec = TokenSpec::new("Integration Token", "ITK", 18).unwrap();
    let source = template::generate(&spec).unwrap();

    let compiled = compiler_client
        .compile(&source, &spec.symbol)
        .await
        .expect("generated source should compile cleanly");

    println!(
        "✓ Compiled: {} bytes of bytecode, {} warnings",
        compiled.bytecode.len(),
        compiled.warnings.len()
    );
    assert!(!compiled.bytecode.is_empty());
    assert!(compiled.abi.is_array());
}

#[tokio::test]
#[ignore = "requires real funds and submits an actual deployment - run deliberately"]
async fn test_deploy_token_end_to_end() {
    let config = load_test_config();
    let network = config.network_config();

    let private_key = load_private_key().expect("private key required for deployment");
    let provider = setup_provider(&config.rpc_url()).await;
    let signer =
        client::local_signer_fn(&private_key, network.chain.chain_id, provider.clone()).unwrap();

    let compiler_client = CompilerClient::new(&config.compiler_url);
    let registry_client = RegistryClient::new(&config.registry_url);

    let spec = TokenSpec::new("Integration Token", "ITK", 18).unwrap();

    let outcome = deploy_token(
        provider.clone(),
        signer,
        &compiler_client,
        &registry_client,
        &network.chain,
        config.wallet_address,
        &spec,
    )
    .await
    .expect("deployment pipeline should succeed");

    println!("✓ Deployed at {}", outcome.contract_address);
    println!("  Registry row id: {}", outcome.record.id);

    // The recorded chain id is the one the endpoint reported
    assert_eq!(outcome.record.chain_id, network.chain.chain_id);

    // Code must exist at the recorded address
    let code = provider
        .get_code_at(outcome.contract_address)
        .await
        .unwrap();
    assert!(!code.is_empty(), "deployed address must hold code");

    // The new deployment is first in the wallet's newest-first listing
    let records = registry_client
        .deployments_for_wallet(config.wallet_address)
        .await
        .unwrap();
    assert_eq!(records.first().map(|r| r.id.as_str()), Some(outcome.record.id.as_str()));
}
