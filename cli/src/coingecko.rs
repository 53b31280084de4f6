//! Command-line access to every CoinGecko endpoint wrapped by `lib_apis`.
//!
//! ```text
//! coingecko price --ids bitcoin,idena --vs usd -p include_24hr_change=true
//! coingecko chart-range idena usd 1700000000 1710000000
//! ```

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use lib_apis::configs::ApisConfig;
use lib_apis::markets::coingecko::ApiCallCoinGecko;
use lib_apis::retrieve::ApiError;

#[path = "./clicommon.rs"]
mod clicommon;
use clicommon::{finish, parse_args_from, parse_params, GlobalArgs};

#[derive(Parser, Debug)]
#[command(name = "coingecko", version, about = "Query the CoinGecko v3 REST API")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Extra query parameter, repeatable (key=value); only for endpoints with optional parameters
    #[arg(short = 'p', long = "param", global = true)]
    params: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check API server status
    Ping,
    /// Current price of coins
    Price {
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,
        #[arg(long = "vs", value_delimiter = ',', required = true)]
        vs_currencies: Vec<String>,
    },
    /// Current price of tokens by contract address
    TokenPrice {
        /// Asset platform id, e.g. ethereum
        platform: String,
        #[arg(long, value_delimiter = ',', required = true)]
        addresses: Vec<String>,
        #[arg(long = "vs", value_delimiter = ',', required = true)]
        vs_currencies: Vec<String>,
    },
    /// Supported quote currencies
    SupportedVsCurrencies,
    /// Coins with full data
    Coins,
    /// Coin ids, names and symbols
    CoinsList,
    /// Market data for coins quoted in a currency
    Markets { vs_currency: String },
    /// Current data for one coin
    Coin { id: String },
    /// Tickers for one coin
    Tickers { id: String },
    /// Historical snapshot for one coin (date as dd-mm-yyyy)
    History { id: String, date: String },
    /// Market chart over the last N days (or "max")
    Chart { id: String, vs_currency: String, days: String },
    /// Market chart between two UNIX timestamps
    ChartRange { id: String, vs_currency: String, from: u64, to: u64 },
    /// Status updates for one coin
    StatusUpdates { id: String },
    /// Coin info by token contract address
    Contract { platform: String, address: String },
    /// All exchanges
    Exchanges,
    /// Exchange ids and names
    ExchangesList,
    /// One exchange
    Exchange { id: String },
    /// Tickers for one exchange
    ExchangeTickers { id: String },
    /// BTC exchange rates
    ExchangeRates,
    /// Trending searches
    Trending,
    /// Global market data
    Global,
}

impl Command {
    /// Whether the endpoint takes optional query parameters (`-p`).
    fn accepts_params(&self) -> bool {
        matches!(
            self,
            Command::Price { .. }
                | Command::TokenPrice { .. }
                | Command::Coins
                | Command::Markets { .. }
                | Command::Coin { .. }
                | Command::Tickers { .. }
                | Command::History { .. }
                | Command::StatusUpdates { .. }
                | Command::Exchanges
                | Command::ExchangeTickers { .. }
        )
    }
}

fn connect(global: &GlobalArgs, config: &ApisConfig) -> Result<ApiCallCoinGecko, ApiError> {
    let base_url = global.url.as_deref().unwrap_or(&config.coingecko.base_url);
    ApiCallCoinGecko::with_options(base_url, config.http.client_options())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli: Cli = parse_args_from(None, std::env::args_os());
    if !cli.params.is_empty() && !cli.command.accepts_params() {
        Cli::command()
            .error(ErrorKind::ArgumentConflict, "--param is not accepted by this subcommand")
            .exit();
    }
    let _guard = cli.global.init_logging("coingecko")?;
    let config = cli.global.load_config()?;
    let extra = parse_params(&cli.params)?;

    let cg = match connect(&cli.global, &config) {
        Ok(cg) => cg,
        Err(e) => return finish(Err(e)),
    };

    let result = match cli.command {
        Command::Ping => cg.ping().await,
        Command::Price { ids, vs_currencies } => cg.get_price(ids, vs_currencies, extra).await,
        Command::TokenPrice {
            platform,
            addresses,
            vs_currencies,
        } => cg.get_token_price(&platform, addresses, vs_currencies, extra).await,
        Command::SupportedVsCurrencies => cg.get_supported_vs_currencies().await,
        Command::Coins => cg.get_coins(extra).await,
        Command::CoinsList => cg.get_coins_list().await,
        Command::Markets { vs_currency } => cg.get_coins_markets(vs_currency, extra).await,
        Command::Coin { id } => cg.get_coin_by_id(&id, extra).await,
        Command::Tickers { id } => cg.get_coin_ticker_by_id(&id, extra).await,
        Command::History { id, date } => cg.get_coin_history_by_id(&id, &date, extra).await,
        Command::Chart { id, vs_currency, days } => cg.get_coin_market_chart_by_id(&id, vs_currency, days).await,
        Command::ChartRange {
            id,
            vs_currency,
            from,
            to,
        } => cg.get_coin_market_chart_range_by_id(&id, vs_currency, from, to).await,
        Command::StatusUpdates { id } => cg.get_coin_status_updates_by_id(&id, extra).await,
        Command::Contract { platform, address } => {
            cg.get_coin_info_from_contract_address_by_id(&platform, &address).await
        }
        Command::Exchanges => cg.get_exchanges_list(extra).await,
        Command::ExchangesList => cg.get_exchanges_id_name_list().await,
        Command::Exchange { id } => cg.get_exchanges_by_id(&id).await,
        Command::ExchangeTickers { id } => cg.get_exchanges_tickers_by_id(&id, extra).await,
        Command::ExchangeRates => cg.get_exchange_rates().await,
        Command::Trending => cg.get_search_trending().await,
        Command::Global => cg.get_global().await,
    };

    finish(result)
}
