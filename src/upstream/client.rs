// src/upstream/client.rs
//! Upstream finance API client

use futures::future::join_all;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{LoginRequest, Prediction, Quote};

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream returned {status}")]
    Status { status: reqwest::StatusCode },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST {upstream}/login
    ///
    /// Validates email/password against the upstream API and returns the
    /// raw session cookie from the response. Upstream sessions are
    /// short-lived, so callers re-login before every protected read
    /// rather than replaying an old cookie.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, UpstreamError> {
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        debug!(http_status = %status, "Upstream login response received");

        if !status.is_success() {
            return Err(UpstreamError::Status { status });
        }

        // Some deployments return the cookie split across several
        // Set-Cookie headers
        let cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");

        Ok(cookie)
    }

    /// GET {upstream}/stocks/{symbol}
    pub async fn fetch_quote(
        &self,
        symbol: &str,
        cookie: Option<&str>,
    ) -> Result<Quote, UpstreamError> {
        let url = format!("{}/stocks/{}", self.base_url, symbol);
        let mut quote: Quote = self.get_json(&url, &[], cookie).await?;
        if quote.symbol.is_empty() {
            quote.symbol = symbol.to_string();
        }
        Ok(quote)
    }

    /// GET {upstream}/predict?symbol={symbol}
    pub async fn fetch_prediction(
        &self,
        symbol: &str,
        cookie: Option<&str>,
    ) -> Result<Prediction, UpstreamError> {
        let url = format!("{}/predict", self.base_url);
        let mut prediction: Prediction =
            self.get_json(&url, &[("symbol", symbol)], cookie).await?;
        if prediction.symbol.is_empty() {
            prediction.symbol = symbol.to_string();
        }
        Ok(prediction)
    }

    /// Fetch many symbols concurrently and independently.
    ///
    /// Each symbol yields its own success or failure; a failed read is
    /// logged and dropped from the result set, it never cancels or taints
    /// the others.
    pub async fn fetch_quotes(&self, symbols: &[String], cookie: Option<&str>) -> Vec<Quote> {
        let futures = symbols.iter().map(|symbol| async move {
            match self.fetch_quote(symbol, cookie).await {
                Ok(quote) => Some(quote),
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Dropping failed symbol from batch");
                    None
                }
            }
        });

        join_all(futures).await.into_iter().flatten().collect()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Result<T, UpstreamError> {
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(cookie) = cookie.filter(|c| !c.is_empty()) {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(UpstreamError::Status { status });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
    }
}
