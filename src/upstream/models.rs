//! Upstream response models
//!
//! Upstream payloads are reshaped defensively: missing numeric fields
//! deserialize to zero instead of failing the request.

use serde::{Deserialize, Serialize};

/// One stock quote as returned by `GET {upstream}/stocks/{symbol}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub change_percent: f64,
    #[serde(default)]
    pub volume: i64,
    #[serde(default)]
    pub currency: Option<String>,
}

/// One prediction as returned by `GET {upstream}/predict?symbol=...`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub predicted_price: f64,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub horizon_days: i64,
}

/// JSON body for `POST {upstream}/login`
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}
