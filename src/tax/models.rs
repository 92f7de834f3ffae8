//! Tax request/response models

use serde::{Deserialize, Serialize};

use super::slabs::{SlabTax, TaxRegime};

/// POST /api/tax/calculate request body
#[derive(Deserialize)]
pub struct TaxCalculationRequest {
    pub income: f64,
    #[serde(default)]
    pub deductions: f64,
    #[serde(default)]
    pub regime: TaxRegime,
}

/// POST /api/tax/calculate response body
#[derive(Serialize)]
pub struct TaxCalculationResponse {
    pub regime: TaxRegime,
    pub taxable_income: f64,
    pub breakdown: Vec<SlabTax>,
    pub base_tax: f64,
    pub cess: f64,
    pub total_tax: f64,
    pub effective_rate: f64,
}
