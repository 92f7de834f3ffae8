// src/tax/slabs.rs
//! Marginal tax slab computation
//!
//! Tax is computed marginally: each slab taxes only the portion of
//! taxable income that falls inside its band, and a 4% health-and-
//! education cess is added on top of the slab total.

use serde::{Deserialize, Serialize};

/// Health and education cess applied on the computed slab tax
const CESS_RATE: f64 = 0.04;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    #[default]
    New,
    Old,
}

/// One tax band: [floor, ceiling) at `rate`. `ceiling: None` means the
/// band is open-ended.
#[derive(Debug, Clone, Copy)]
pub struct TaxSlab {
    pub floor: f64,
    pub ceiling: Option<f64>,
    pub rate: f64,
}

/// New regime slabs, FY 2024-25
const NEW_REGIME_SLABS: [TaxSlab; 6] = [
    TaxSlab { floor: 0.0, ceiling: Some(300_000.0), rate: 0.0 },
    TaxSlab { floor: 300_000.0, ceiling: Some(700_000.0), rate: 0.05 },
    TaxSlab { floor: 700_000.0, ceiling: Some(1_000_000.0), rate: 0.10 },
    TaxSlab { floor: 1_000_000.0, ceiling: Some(1_200_000.0), rate: 0.15 },
    TaxSlab { floor: 1_200_000.0, ceiling: Some(1_500_000.0), rate: 0.20 },
    TaxSlab { floor: 1_500_000.0, ceiling: None, rate: 0.30 },
];

/// Old regime slabs (below-60 resident)
const OLD_REGIME_SLABS: [TaxSlab; 4] = [
    TaxSlab { floor: 0.0, ceiling: Some(250_000.0), rate: 0.0 },
    TaxSlab { floor: 250_000.0, ceiling: Some(500_000.0), rate: 0.05 },
    TaxSlab { floor: 500_000.0, ceiling: Some(1_000_000.0), rate: 0.20 },
    TaxSlab { floor: 1_000_000.0, ceiling: None, rate: 0.30 },
];

impl TaxRegime {
    pub fn slabs(&self) -> &'static [TaxSlab] {
        match self {
            TaxRegime::New => &NEW_REGIME_SLABS,
            TaxRegime::Old => &OLD_REGIME_SLABS,
        }
    }
}

/// Tax attributable to one slab of the schedule
#[derive(Debug, Clone, Serialize)]
pub struct SlabTax {
    pub from: f64,
    pub to: Option<f64>,
    pub rate: f64,
    pub taxable_amount: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaxComputation {
    pub taxable_income: f64,
    pub breakdown: Vec<SlabTax>,
    pub base_tax: f64,
    pub cess: f64,
    pub total_tax: f64,
    pub effective_rate: f64,
}

/// Compute marginal tax on `income - deductions` (floored at zero) under
/// the given regime. Deterministic and side-effect free.
pub fn compute_tax(income: f64, deductions: f64, regime: TaxRegime) -> TaxComputation {
    let taxable_income = (income - deductions).max(0.0);

    let mut breakdown = Vec::new();
    let mut base_tax = 0.0;

    for slab in regime.slabs() {
        let upper = slab.ceiling.unwrap_or(f64::INFINITY).min(taxable_income);
        let taxable_amount = (upper - slab.floor).max(0.0);
        if taxable_amount <= 0.0 {
            continue;
        }

        let tax = taxable_amount * slab.rate;
        base_tax += tax;
        breakdown.push(SlabTax {
            from: slab.floor,
            to: slab.ceiling,
            rate: slab.rate,
            taxable_amount,
            tax,
        });
    }

    let cess = base_tax * CESS_RATE;
    let total_tax = base_tax + cess;
    let effective_rate = if taxable_income > 0.0 {
        total_tax / taxable_income
    } else {
        0.0
    };

    TaxComputation {
        taxable_income,
        breakdown,
        base_tax,
        cess,
        total_tax,
        effective_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_zero_income_is_tax_free() {
        let result = compute_tax(0.0, 0.0, TaxRegime::New);
        assert_close(result.taxable_income, 0.0);
        assert_close(result.total_tax, 0.0);
        assert_close(result.effective_rate, 0.0);
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn test_income_within_exempt_slab() {
        let result = compute_tax(250_000.0, 0.0, TaxRegime::New);
        assert_close(result.base_tax, 0.0);
        assert_close(result.total_tax, 0.0);
        assert_eq!(result.breakdown.len(), 1);
        assert_close(result.breakdown[0].rate, 0.0);
    }

    #[test]
    fn test_exempt_slab_boundary_new_regime() {
        // Exactly at the first ceiling: the 5% slab has zero overlap
        let result = compute_tax(300_000.0, 0.0, TaxRegime::New);
        assert_close(result.base_tax, 0.0);
        assert_eq!(result.breakdown.len(), 1);
    }

    #[test]
    fn test_second_slab_boundary_new_regime() {
        // 5% on the 300k-700k band only
        let result = compute_tax(700_000.0, 0.0, TaxRegime::New);
        assert_close(result.base_tax, 20_000.0);
        assert_close(result.cess, 800.0);
        assert_close(result.total_tax, 20_800.0);
        assert_eq!(result.breakdown.len(), 2);
        assert_close(result.breakdown[1].taxable_amount, 400_000.0);
    }

    #[test]
    fn test_income_spanning_all_new_regime_slabs() {
        // 1.6M: 20k + 30k + 30k + 60k + 30k = 170k base
        let result = compute_tax(1_600_000.0, 0.0, TaxRegime::New);
        assert_close(result.base_tax, 170_000.0);
        assert_close(result.cess, 6_800.0);
        assert_close(result.total_tax, 176_800.0);
        assert_eq!(result.breakdown.len(), 6);
        assert_close(result.breakdown[5].taxable_amount, 100_000.0);
        assert_close(result.breakdown[5].tax, 30_000.0);
    }

    #[test]
    fn test_old_regime_schedule() {
        // 600k old: 5% of 250k + 20% of 100k = 32.5k base
        let result = compute_tax(600_000.0, 0.0, TaxRegime::Old);
        assert_close(result.base_tax, 32_500.0);
        assert_close(result.cess, 1_300.0);
        assert_close(result.total_tax, 33_800.0);
    }

    #[test]
    fn test_deductions_reduce_taxable_income() {
        let result = compute_tax(800_000.0, 100_000.0, TaxRegime::New);
        assert_close(result.taxable_income, 700_000.0);
        assert_close(result.base_tax, 20_000.0);
    }

    #[test]
    fn test_deductions_exceeding_income_floor_at_zero() {
        let result = compute_tax(200_000.0, 500_000.0, TaxRegime::New);
        assert_close(result.taxable_income, 0.0);
        assert_close(result.total_tax, 0.0);
    }

    #[test]
    fn test_effective_rate_is_total_over_taxable() {
        let result = compute_tax(700_000.0, 0.0, TaxRegime::New);
        assert_close(result.effective_rate, 20_800.0 / 700_000.0);
    }
}
