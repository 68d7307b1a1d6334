//! Tiingo daily price history client.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use regime_core::error::DataError;
use regime_core::traits::PriceProvider;
use regime_core::types::{PricePoint, PriceSeries};
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.tiingo.com";

/// Tiingo API configuration.
#[derive(Clone)]
pub struct TiingoConfig {
    /// Resolved API token
    pub api_key: String,
    /// API base URL
    pub base_url: String,
}

impl TiingoConfig {
    /// Create a config for the public Tiingo endpoint.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

// The token must never reach logs or error output.
impl fmt::Debug for TiingoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TiingoConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// One row of Tiingo's daily price response.
#[derive(Debug, Deserialize)]
struct TiingoPrice {
    date: String,
    #[serde(rename = "adjClose")]
    adj_close: f64,
}

/// Tiingo REST client for daily adjusted closes.
pub struct TiingoClient {
    config: TiingoConfig,
    client: Client,
}

impl TiingoClient {
    /// Create a new client.
    pub fn new(config: TiingoConfig) -> Result<Self, DataError> {
        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Token {}", config.api_key))
            .map_err(|e| DataError::Auth(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| DataError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn parse_date(date: &str) -> Result<i64, DataError> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
            return Ok(dt.timestamp_millis());
        }
        if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            let dt = d.and_hms_opt(0, 0, 0).unwrap();
            return Ok(dt.and_utc().timestamp_millis());
        }
        Err(DataError::Parse(format!("Could not parse date: {}", date)))
    }

    fn series_from_rows(symbol: &str, rows: Vec<TiingoPrice>) -> Result<PriceSeries, DataError> {
        if rows.is_empty() {
            return Err(DataError::Empty);
        }

        let points = rows
            .into_iter()
            .map(|row| {
                Ok(PricePoint::new(
                    Self::parse_date(&row.date)?,
                    row.adj_close,
                ))
            })
            .collect::<Result<Vec<_>, DataError>>()?;

        Ok(PriceSeries::new(symbol.to_string(), points))
    }
}

#[async_trait]
impl PriceProvider for TiingoClient {
    async fn daily_prices(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, DataError> {
        let url = format!(
            "{}/tiingo/daily/{}/prices",
            self.config.base_url,
            symbol.to_lowercase()
        );
        let params = [
            ("startDate", start.format("%Y-%m-%d").to_string()),
            ("endDate", end.format("%Y-%m-%d").to_string()),
            ("resampleFreq", "daily".to_string()),
            ("format", "json".to_string()),
        ];

        debug!(%symbol, %start, %end, "requesting daily prices");

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| DataError::Connection(e.to_string()))?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(DataError::Auth("API token rejected".into()));
            }
            StatusCode::NOT_FOUND => {
                return Err(DataError::SymbolNotFound(symbol.to_string()));
            }
            status if !status.is_success() => {
                let body = resp.text().await.unwrap_or_default();
                return Err(DataError::Internal(format!("HTTP {}: {}", status, body)));
            }
            _ => {}
        }

        let rows: Vec<TiingoPrice> = resp
            .json()
            .await
            .map_err(|e| DataError::Parse(e.to_string()))?;

        Self::series_from_rows(symbol, rows)
    }

    fn name(&self) -> &str {
        "tiingo"
    }
}
