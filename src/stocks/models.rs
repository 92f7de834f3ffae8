//! Stocks request/response models

use serde::{Deserialize, Serialize};

use crate::upstream::Quote;

/// Query parameters for GET /api/stocks
#[derive(Deserialize)]
pub struct QuotesQueryParams {
    pub symbols: Option<String>,
}

/// Response for GET /api/stocks
///
/// Failed symbols are omitted rather than null-padded, so `returned` may
/// be smaller than `requested`.
#[derive(Serialize)]
pub struct QuotesResponse {
    pub quotes: Vec<Quote>,
    pub requested: usize,
    pub returned: usize,
}
