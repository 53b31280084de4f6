//! # CoinGecko Live Smoke Test
//!
//! Exercises `lib_apis::markets::coingecko::ApiCallCoinGecko` against the
//! public CoinGecko API. Values change by the minute, so only the shape of
//! each reply is checked.
//!
//! Run with `cargo run -p project_tests --bin test_coingecko_live`.

use lib_apis::loggers::{setup_logging, LoggerOptions};
use lib_apis::markets::coingecko::ApiCallCoinGecko;
use lib_apis::retrieve::ApiError;
use lib_apis::QueryParams;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    let _guard = setup_logging("test_coingecko_live", &LoggerOptions::default())?;

    let cg = ApiCallCoinGecko::new()?;
    println!("--- Starting CoinGecko Live Tests ---");

    // --- TEST 1: Ping ---
    println!("\n[Test 1] ping...");
    let pong = cg.ping().await?;
    assert!(pong["gecko_says"].is_string());
    println!("✅ {}", pong["gecko_says"]);

    // --- TEST 2: Simple price with list arguments ---
    println!("\n[Test 2] simple/price with lists...");
    let extra = QueryParams::new().with("include_24hr_change", true);
    let prices = cg.get_price(vec!["bitcoin", "idena"], ["usd", "eur"], extra).await?;
    assert!(prices["bitcoin"]["usd"].is_number());
    println!("✅ {}", serde_json::to_string(&prices)?);

    // --- TEST 3: Market chart ---
    println!("\n[Test 3] coins/idena/market_chart...");
    let chart = cg.get_coin_market_chart_by_id("idena", "usd", 1u32).await?;
    let points = chart["prices"].as_array().map(Vec::len).unwrap_or(0);
    assert!(points > 0);
    println!("✅ {} price points", points);

    // --- TEST 4: Unknown coin (error record, not a panic) ---
    println!("\n[Test 4] unknown coin...");
    match cg.get_coin_by_id("definitely-not-a-coin-id", QueryParams::new()).await {
        Err(e @ ApiError::Status { .. }) => {
            println!("✅ Error record: {}", serde_json::to_string(&e.to_record())?);
        }
        other => return Err(format!("expected a status error, got {:?}", other).into()),
    }

    println!("\n--- All Tests Passed Successfully ---");
    Ok(())
}
