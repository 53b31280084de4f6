//! # Idena Node Live Smoke Test
//!
//! Talks to the node configured through `apis.config.json5` / `IDENA_API_*`
//! (a local node on port 9009 by default) and prints what it returns.

use lib_apis::chains::idena::IdenaApi;
use lib_apis::configs::load_apis_config;

/// Prints sync state, epoch and the coinbase balance, or the error record.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    let config = load_apis_config(None)?;
    println!("{}", config);

    let node = IdenaApi::with_options(
        &config.idena.node_url(),
        config.idena.api_key.clone(),
        config.http.client_options(),
    )?;

    println!("[*] Requesting node state from {} ...", node.node_url());

    let outcome = async {
        let syncing = node.syncing().await?;
        let epoch = node.epoch().await?;
        let coinbase = node.get_coinbase_addr().await?;
        let address = coinbase.as_str().unwrap_or_default().to_string();
        let balance = node.get_balance(&address).await?;
        Ok::<_, lib_apis::ApiError>(serde_json::json!({
            "syncing": syncing,
            "epoch": epoch,
            "coinbase": coinbase,
            "balance": balance,
        }))
    }
    .await;

    match outcome {
        Ok(data) => {
            println!("\n[SUCCESS] Data received:");
            println!("-----------------------------------------------");
            println!("{}", serde_json::to_string_pretty(&data)?);
            println!("-----------------------------------------------");
        }
        Err(e) => {
            eprintln!("\n[ERROR] Node request failed:");
            eprintln!(">>> {}", serde_json::to_string(&e.to_record())?);
            std::process::exit(1);
        }
    }

    Ok(())
}
