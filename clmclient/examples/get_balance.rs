//! Print the balance of a loyalty card
//!
//! Configuration comes from `CLMCLIENT__USERNAME`, `CLMCLIENT__PASSWORD`,
//! `CLMCLIENT__URI` and optionally `CLMCLIENT__TIMEOUT_SECS`, or from a YAML
//! file given as second argument.
//!
//! ```text
//! cargo run --example get_balance -- 100200300 [config.yaml]
//! ```

use clmclient::{ClientConfig, LoyaltyClient, OperationResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clmclient=debug".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let card_number = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: get_balance <card-number> [config.yaml]"))?;

    let config = match args.next() {
        Some(path) => ClientConfig::from_yaml_file(path)?,
        None => ClientConfig::from_env()?,
    };

    let client = LoyaltyClient::connect(config)?;

    match client.get_balance(&card_number).await {
        Ok(balance) => {
            println!("Balance: {}", balance.field_str("balance").unwrap_or("?"));
            println!("{}", serde_json::to_string_pretty(&balance)?);
        }
        Err(e) => {
            eprintln!("{}", e);
            if let Some(detail) = e.service_error().and_then(|s| s.internal_message()) {
                eprintln!("details: {}", detail);
            }
        }
    }

    Ok(())
}
