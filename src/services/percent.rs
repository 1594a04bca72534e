// src/services/percent.rs
use crate::error::PercentError;
use crate::models::ReturnFactor;

/// Convert a percentage gain such as `+5.09`, `-3.21` or `0.0` into a return
/// factor (1.0509, 0.9679, 1.0). Blank cells are missing data, not zero.
pub fn parse_percent(token: &str) -> Result<Option<ReturnFactor>, PercentError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let factor = if trimmed.contains('-') {
        let magnitude = parse_magnitude(&trimmed.replace('-', ""), token)?;
        (100.0 - magnitude) / 100.0
    } else {
        let magnitude = parse_magnitude(&trimmed.replace('+', ""), token)?;
        (100.0 + magnitude) / 100.0
    };

    Ok(Some(factor))
}

fn parse_magnitude(cleaned: &str, token: &str) -> Result<f64, PercentError> {
    let invalid = || PercentError {
        token: token.to_string(),
    };

    // `f64::from_str` also accepts "inf" and "NaN"
    let magnitude = cleaned.trim().parse::<f64>().map_err(|_| invalid())?;
    if !magnitude.is_finite() {
        return Err(invalid());
    }
    Ok(magnitude)
}
