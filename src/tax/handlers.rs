//! Tax handlers

use axum::extract::Json;
use tracing::debug;

use super::models::{TaxCalculationRequest, TaxCalculationResponse};
use super::slabs::compute_tax;
use crate::common::ApiError;

/// POST /api/tax/calculate - Slab-wise marginal tax for a taxable income
pub async fn calculate_tax(
    Json(payload): Json<TaxCalculationRequest>,
) -> Result<Json<TaxCalculationResponse>, ApiError> {
    if !payload.income.is_finite() || payload.income < 0.0 {
        return Err(ApiError::ValidationError(
            "income: must be a non-negative number".to_string(),
        ));
    }
    if !payload.deductions.is_finite() || payload.deductions < 0.0 {
        return Err(ApiError::ValidationError(
            "deductions: must be a non-negative number".to_string(),
        ));
    }

    let result = compute_tax(payload.income, payload.deductions, payload.regime);

    debug!(
        regime = ?payload.regime,
        taxable_income = result.taxable_income,
        total_tax = result.total_tax,
        "Computed tax"
    );

    Ok(Json(TaxCalculationResponse {
        regime: payload.regime,
        taxable_income: result.taxable_income,
        breakdown: result.breakdown,
        base_tax: result.base_tax,
        cess: result.cess,
        total_tax: result.total_tax,
        effective_rate: result.effective_rate,
    }))
}
