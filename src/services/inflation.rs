// src/services/inflation.rs
use crate::models::ReturnFactor;

/// Average monthly inflation rate implied by a year's total and
/// inflation-adjusted factors. The result is a difference, not a factor.
pub fn estimate_monthly_inflation(
    year_total: Option<ReturnFactor>,
    year_inflation_adjusted: Option<ReturnFactor>,
) -> Option<f64> {
    let yearly_inflation_rate = year_total? - year_inflation_adjusted?;
    Some(yearly_inflation_rate / 12.0)
}
