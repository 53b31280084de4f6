//! # CoinGecko API Client
//!
//! A thin client for the CoinGecko v3 REST API. Every method maps one
//! endpoint to one `GET`: required arguments become query parameters, any
//! further keyword parameters the endpoint understands travel in an `extra`
//! [`QueryParams`], and the decoded JSON body is returned untouched.
//!
//! ## Core Features:
//! - **Dedicated Client**: Uses a pre-configured `ApiClient` with the
//!   CoinGecko base URL, so request paths stay relative.
//! - **List Arguments**: Anything convertible into a [`ParamValue`] is
//!   accepted; lists are comma-joined and the id-like arguments of the
//!   `simple/*` endpoints have their spaces stripped.
//! - **Opaque Ids**: coin, platform and exchange ids are sent as single
//!   encoded path segments and never alter the route or the query.
//! - **Uniform Errors**: Non-2xx replies and transport failures come back as
//!   [`ApiError`], with CoinGecko's own `error` message when it sent one.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use serde_json::Value;
use tracing::debug;

use crate::retrieve::error::ApiError;
use crate::retrieve::ky_http::{ApiClient, ClientOptions};
use crate::retrieve::query::{ParamValue, QueryParams};

/// Public CoinGecko v3 endpoint.
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3/";

/// # CoinGecko API Call Client
///
/// Wraps an [`ApiClient`] pointed at the CoinGecko base URL. Cheap to clone.
#[derive(Clone)]
pub struct ApiCallCoinGecko {
    /// The underlying generic HTTP client.
    client: ApiClient,
}

impl ApiCallCoinGecko {
    /// Client for the public API with default timeout and retry settings.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_options(COINGECKO_API_URL, ClientOptions::default())
    }

    /// Client for `base_url` (e.g. a Pro endpoint or a mock server).
    pub fn with_options(base_url: &str, options: ClientOptions) -> Result<Self, ApiError> {
        Ok(Self {
            client: ApiClient::new(base_url, options)?,
        })
    }

    /// Wraps an existing [`ApiClient`].
    pub fn from_client(client: ApiClient) -> Self {
        Self { client }
    }

    async fn get(&self, segments: &[&str], params: QueryParams) -> Result<Value, ApiError> {
        debug!(path = %segments.join("/"), params = params.len(), "coingecko call");
        let query = (!params.is_empty()).then_some(&params);
        self.client.get_json(segments, query).await
    }

    /// Check API server status.
    pub async fn ping(&self) -> Result<Value, ApiError> {
        self.get(&["ping"], QueryParams::new()).await
    }

    //---------- SIMPLE ----------//

    /// Current price of any cryptocurrencies in any other supported currencies.
    ///
    /// `ids` and `vs_currencies` accept a single string or a list; spaces are
    /// removed after joining.
    pub async fn get_price(
        &self,
        ids: impl Into<ParamValue>,
        vs_currencies: impl Into<ParamValue>,
        extra: QueryParams,
    ) -> Result<Value, ApiError> {
        let mut params = extra;
        params.insert("ids", ids.into().without_spaces());
        params.insert("vs_currencies", vs_currencies.into().without_spaces());
        self.get(&["simple", "price"], params).await
    }

    /// Current price of tokens on platform `id`, by contract address.
    pub async fn get_token_price(
        &self,
        id: &str,
        contract_addresses: impl Into<ParamValue>,
        vs_currencies: impl Into<ParamValue>,
        extra: QueryParams,
    ) -> Result<Value, ApiError> {
        let mut params = extra;
        params.insert("contract_addresses", contract_addresses.into().without_spaces());
        params.insert("vs_currencies", vs_currencies.into().without_spaces());
        self.get(&["simple", "token_price", id], params).await
    }

    /// List of supported `vs_currencies`.
    pub async fn get_supported_vs_currencies(&self) -> Result<Value, ApiError> {
        self.get(&["simple", "supported_vs_currencies"], QueryParams::new()).await
    }

    //---------- COINS ----------//

    /// All coins with data (name, price, market, developer, community).
    ///
    /// Useful `extra` keys: `order`, `per_page`, `page`, `localization`.
    pub async fn get_coins(&self, extra: QueryParams) -> Result<Value, ApiError> {
        self.get(&["coins"], extra).await
    }

    /// All supported coins' id, name and symbol.
    pub async fn get_coins_list(&self) -> Result<Value, ApiError> {
        self.get(&["coins", "list"], QueryParams::new()).await
    }

    /// Price, market cap, volume and market data for coins quoted in `vs_currency`.
    pub async fn get_coins_markets(
        &self,
        vs_currency: impl Into<ParamValue>,
        extra: QueryParams,
    ) -> Result<Value, ApiError> {
        let mut params = extra;
        params.insert("vs_currency", vs_currency);
        self.get(&["coins", "markets"], params).await
    }

    /// Current data for a coin, including exchange tickers.
    pub async fn get_coin_by_id(&self, id: &str, extra: QueryParams) -> Result<Value, ApiError> {
        self.get(&["coins", id], extra).await
    }

    /// Coin tickers, paginated to 100 items.
    pub async fn get_coin_ticker_by_id(&self, id: &str, extra: QueryParams) -> Result<Value, ApiError> {
        self.get(&["coins", id, "tickers"], extra).await
    }

    /// Historical data at `date` (`dd-mm-yyyy`) for a coin.
    pub async fn get_coin_history_by_id(
        &self,
        id: &str,
        date: &str,
        extra: QueryParams,
    ) -> Result<Value, ApiError> {
        let mut params = extra;
        params.insert("date", date);
        self.get(&["coins", id, "history"], params).await
    }

    /// Historical price, market cap and 24h volume over the last `days`
    /// (a number or `"max"`).
    pub async fn get_coin_market_chart_by_id(
        &self,
        id: &str,
        vs_currency: impl Into<ParamValue>,
        days: impl Into<ParamValue>,
    ) -> Result<Value, ApiError> {
        let params = QueryParams::new()
            .with("vs_currency", vs_currency)
            .with("days", days);
        self.get(&["coins", id, "market_chart"], params).await
    }

    /// Historical market data between two UNIX timestamps.
    pub async fn get_coin_market_chart_range_by_id(
        &self,
        id: &str,
        vs_currency: impl Into<ParamValue>,
        from_timestamp: impl Into<ParamValue>,
        to_timestamp: impl Into<ParamValue>,
    ) -> Result<Value, ApiError> {
        let params = QueryParams::new()
            .with("vs_currency", vs_currency)
            .with("from", from_timestamp)
            .with("to", to_timestamp);
        self.get(&["coins", id, "market_chart", "range"], params).await
    }

    /// Status updates for a coin.
    pub async fn get_coin_status_updates_by_id(
        &self,
        id: &str,
        extra: QueryParams,
    ) -> Result<Value, ApiError> {
        self.get(&["coins", id, "status_updates"], extra).await
    }

    /// Coin info looked up by token contract address on platform `id`.
    pub async fn get_coin_info_from_contract_address_by_id(
        &self,
        id: &str,
        contract_address: &str,
    ) -> Result<Value, ApiError> {
        self.get(&["coins", id, "contract", contract_address], QueryParams::new())
            .await
    }

    //---------- EXCHANGES ----------//

    /// All exchanges.
    pub async fn get_exchanges_list(&self, extra: QueryParams) -> Result<Value, ApiError> {
        self.get(&["exchanges"], extra).await
    }

    /// All supported exchange ids and names.
    pub async fn get_exchanges_id_name_list(&self) -> Result<Value, ApiError> {
        self.get(&["exchanges", "list"], QueryParams::new()).await
    }

    /// Volume and top-100 tickers for an exchange.
    pub async fn get_exchanges_by_id(&self, id: &str) -> Result<Value, ApiError> {
        self.get(&["exchanges", id], QueryParams::new()).await
    }

    /// Exchange tickers, paginated to 100 items.
    pub async fn get_exchanges_tickers_by_id(
        &self,
        id: &str,
        extra: QueryParams,
    ) -> Result<Value, ApiError> {
        self.get(&["exchanges", id, "tickers"], extra).await
    }

    //---------- MISC ----------//

    /// BTC-to-currency exchange rates.
    pub async fn get_exchange_rates(&self) -> Result<Value, ApiError> {
        self.get(&["exchange_rates"], QueryParams::new()).await
    }

    /// Top-7 trending coins searched in the last 24 hours.
    pub async fn get_search_trending(&self) -> Result<Value, ApiError> {
        self.get(&["search", "trending"], QueryParams::new()).await
    }

    /// Global cryptocurrency data.
    pub async fn get_global(&self) -> Result<Value, ApiError> {
        self.get(&["global"], QueryParams::new()).await
    }
}
