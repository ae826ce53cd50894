//! Token launcher CLI.
//!
//! Subcommands cover the full token lifecycle: generate contract source,
//! compile and deploy, list recorded deployments, inspect on-chain status,
//! and invoke the owner-only management functions of a deployed token.

use alloy_primitives::{Address, U256};
use binding::token::IManagedToken;
use clap::{Parser, Subcommand};
use compiler::CompilerClient;
use launcher::{
    config::Config,
    deploy::{deploy_token, DeployError},
    manage::{
        format_token_amount, parse_token_amount, run_management_op, token_status, ManagementOp,
    },
    metrics::{install_prometheus_exporter, Metrics},
};
use registry::RegistryClient;
use template::TokenSpec;
use tracing::info;

#[derive(Parser)]
#[command(name = "launcher")]
#[command(about = "Deploy and manage owner-controlled tokens")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Private key for signing transactions (hex string, with or without 0x prefix)
    #[arg(short = 'k', long, env = "PRIVATE_KEY")]
    private_key: Option<String>,

    /// Dry-run mode: log actions without executing transactions
    #[arg(long)]
    dry_run: bool,

    /// Port for the Prometheus metrics exporter (disabled when absent)
    #[arg(long)]
    metrics_port: Option<u16>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the generated contract source without deploying
    Generate {
        /// Token display name
        name: String,
        /// Token symbol (also the contract identifier)
        symbol: String,
        /// Decimal precision, 0-18
        #[arg(default_value_t = 18)]
        decimals: u8,
    },

    /// Compile and deploy a new token, then record it in the registry
    Deploy {
        /// Token display name
        name: String,
        /// Token symbol (also the contract identifier)
        symbol: String,
        /// Decimal precision, 0-18
        #[arg(default_value_t = 18)]
        decimals: u8,
    },

    /// List deployments recorded for the configured wallet, newest first
    List,

    /// Show the on-chain status of a deployed token
    Status {
        /// Deployed token contract address
        token: Address,
    },

    /// Halt transfers (owner only)
    Pause { token: Address },

    /// Resume transfers (owner only)
    Unpause { token: Address },

    /// Bar an account from transfers (owner only)
    Blacklist { token: Address, account: Address },

    /// Re-admit an account (owner only)
    Unblacklist { token: Address, account: Address },

    /// Mint new supply to an account (owner only); amount is in whole tokens
    Mint {
        token: Address,
        to: Address,
        amount: String,
    },

    /// Burn supply from the owner balance (owner only); amount is in whole tokens
    Burn { token: Address, amount: String },

    /// Hand ownership to another address (owner only)
    TransferOwnership { token: Address, new_owner: Address },

    /// Renounce ownership permanently (owner only)
    RenounceOwnership { token: Address },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Cli {
        config: config_path,
        private_key,
        dry_run,
        metrics_port,
        command,
    } = Cli::parse();

    // Source generation needs no config, network, or key
    if let Command::Generate {
        name,
        symbol,
        decimals,
    } = &command
    {
        let spec = TokenSpec::new(name.clone(), symbol.clone(), *decimals)?;
        print!("{}", template::generate(&spec)?);
        return Ok(());
    }

    let mut config = Config::from_file(&config_path)?;

    // Override dry_run from CLI flag
    if dry_run {
        config.dry_run = true;
    }

    let network = config.network_config();

    info!("Loaded config:");
    info!("  Network: {:?} ({})", config.network, network.chain.name);
    info!("  RPC URL: {}", config.rpc_url());
    info!("  Compiler: {}", config.compiler_url);
    info!("  Registry: {}", config.registry_url);
    info!("  Wallet: {}", config.wallet_address);
    if config.dry_run {
        info!("  Mode: DRY-RUN (no transactions will be executed)");
    }

    let metrics = Metrics::new();
    if let Some(port) = metrics_port {
        install_prometheus_exporter(port)?;
        info!("Metrics exporter listening on port {}", port);
    }

    let private_key = private_key.as_deref();

    match command {
        Command::Generate { .. } => unreachable!("handled before config load"),

        Command::Deploy {
            name,
            symbol,
            decimals,
        } => {
            let spec = TokenSpec::new(name, symbol, decimals)?;
            let provider = client::create_provider(&config.rpc_url()).await?;
            let compiler_client = CompilerClient::new(&config.compiler_url);
            let registry_client = RegistryClient::new(&config.registry_url);

            if config.dry_run {
                let source = template::generate(&spec)?;
                let compiled = compiler_client.compile(&source, &spec.symbol).await?;
                info!(
                    bytecode_bytes = compiled.bytecode.len(),
                    "Dry-run: contract compiles; skipping deployment"
                );
                return Ok(());
            }

            let signer = client::local_signer_fn(
                require_private_key(private_key)?,
                network.chain.chain_id,
                provider.clone(),
            )?;

            let started = std::time::Instant::now();
            let outcome = deploy_token(
                provider,
                signer,
                &compiler_client,
                &registry_client,
                &network.chain,
                config.wallet_address,
                &spec,
            )
            .await;

            match &outcome {
                Ok(_) => metrics.record_deployment(true, started.elapsed()),
                Err(DeployError::Registry { .. }) => {
                    metrics.record_deployment(false, started.elapsed());
                    metrics.record_orphaned_deployment();
                }
                Err(_) => metrics.record_deployment(false, started.elapsed()),
            }

            let outcome = outcome?;
            println!(
                "Deployed {} at {}",
                outcome.record.token_symbol, outcome.contract_address
            );
            println!(
                "{}",
                network.chain.explorer_address_url(outcome.contract_address)
            );
        }

        Command::List => {
            let registry_client = RegistryClient::new(&config.registry_url);
            metrics.record_registry_lookup();

            let records = registry_client
                .deployments_for_wallet(config.wallet_address)
                .await?;

            if records.is_empty() {
                println!("No deployments recorded for {}", config.wallet_address);
                return Ok(());
            }

            for record in records {
                println!(
                    "{}  {} ({})  chain {}  decimals {}  {}",
                    record.deployed_at.format("%Y-%m-%d %H:%M:%S"),
                    record.token_symbol,
                    record.token_name,
                    record.chain_id,
                    record.decimals,
                    record.contract_address,
                );
            }
        }

        Command::Status { token } => {
            let provider = client::create_provider(&config.rpc_url()).await?;
            client::ensure_chain(&provider, network.chain.chain_id).await?;

            let status = token_status(&provider, token, config.wallet_address).await?;
            println!("{} ({})", status.name, status.symbol);
            println!("  Address:      {}", token);
            println!(
                "  Total supply: {} {}",
                format_token_amount(status.total_supply, status.decimals),
                status.symbol
            );
            println!("  Decimals:     {}", status.decimals);
            println!(
                "  Status:       {}",
                if status.paused { "Paused" } else { "Active" }
            );
            println!(
                "  Owner:        {}{}",
                status.owner,
                if status.caller_is_owner { " (you)" } else { "" }
            );
        }

        Command::Pause { token } => {
            run_op(private_key, &config, &metrics, token, ManagementOp::Pause).await?;
        }
        Command::Unpause { token } => {
            run_op(private_key, &config, &metrics, token, ManagementOp::Unpause).await?;
        }
        Command::Blacklist { token, account } => {
            run_op(
                private_key,
                &config,
                &metrics,
                token,
                ManagementOp::Blacklist { account },
            )
            .await?;
        }
        Command::Unblacklist { token, account } => {
            run_op(
                private_key,
                &config,
                &metrics,
                token,
                ManagementOp::Unblacklist { account },
            )
            .await?;
        }
        Command::Mint { token, to, amount } => {
            let amount = to_base_units(&config, token, &amount).await?;
            run_op(
                private_key,
                &config,
                &metrics,
                token,
                ManagementOp::Mint { to, amount },
            )
            .await?;
        }
        Command::Burn { token, amount } => {
            let amount = to_base_units(&config, token, &amount).await?;
            run_op(
                private_key,
                &config,
                &metrics,
                token,
                ManagementOp::Burn { amount },
            )
            .await?;
        }
        Command::TransferOwnership { token, new_owner } => {
            run_op(
                private_key,
                &config,
                &metrics,
                token,
                ManagementOp::TransferOwnership { new_owner },
            )
            .await?;
        }
        Command::RenounceOwnership { token } => {
            run_op(
                private_key,
                &config,
                &metrics,
                token,
                ManagementOp::RenounceOwnership,
            )
            .await?;
        }
    }

    Ok(())
}

/// Run one management operation with the configured wallet.
async fn run_op(
    private_key: Option<&str>,
    config: &Config,
    metrics: &Metrics,
    token: Address,
    op: ManagementOp,
) -> eyre::Result<()> {
    let network = config.network_config();
    let provider = client::create_provider(&config.rpc_url()).await?;
    client::ensure_chain(&provider, network.chain.chain_id).await?;

    let signer = client::local_signer_fn(
        require_private_key(private_key)?,
        network.chain.chain_id,
        provider.clone(),
    )?;

    let function = op.function_name();
    let result = run_management_op(
        provider,
        signer,
        token,
        config.wallet_address,
        op,
        config.dry_run,
    )
    .await;

    match &result {
        Ok(Some(executed)) => {
            metrics.record_management_call(function, true);
            println!("{} confirmed: {}", function, executed.tx_hash);
            println!("{}", network.chain.explorer_tx_url(executed.tx_hash));
        }
        Ok(None) => {}
        Err(_) => metrics.record_management_call(function, false),
    }

    result.map(|_| ())
}

/// Scale a whole-token amount by the token's on-chain decimals.
async fn to_base_units(config: &Config, token: Address, amount: &str) -> eyre::Result<U256> {
    let provider = client::create_provider(&config.rpc_url()).await?;
    let contract = IManagedToken::new(token, &provider);
    let decimals = contract.decimals().call().await?;
    parse_token_amount(amount, decimals)
}

fn require_private_key(private_key: Option<&str>) -> eyre::Result<&str> {
    private_key.ok_or_else(|| {
        eyre::eyre!(
            "a private key is required; pass --private-key or set the PRIVATE_KEY environment variable"
        )
    })
}
