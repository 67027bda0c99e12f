//! Production request validation

use thiserror::Error;

use crate::models::{coerce_number, ProductionRequest};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Select a product model")]
    NoModelSelected,

    #[error("Quantity must be greater than zero")]
    InvalidQuantity,

    #[error("Quantity must be a whole number")]
    NonIntegerQuantity,

    #[error("Quantity must be at most {max}")]
    QuantityTooLarge { max: u32 },
}

/// Check a `(model, quantity)` pair before running the calculator.
///
/// Rules are checked in order and the first failure wins.
pub fn validate_production_request(
    model_id: Option<&str>,
    raw_quantity: &str,
) -> Result<ProductionRequest, ValidationError> {
    let model_id = model_id.map(str::trim).unwrap_or_default();
    if model_id.is_empty() {
        return Err(ValidationError::NoModelSelected);
    }

    let quantity = coerce_number(raw_quantity);
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(ValidationError::InvalidQuantity);
    }
    if quantity.fract() != 0.0 {
        return Err(ValidationError::NonIntegerQuantity);
    }
    if quantity > f64::from(u32::MAX) {
        return Err(ValidationError::QuantityTooLarge { max: u32::MAX });
    }

    Ok(ProductionRequest {
        model_id: model_id.to_string(),
        quantity: quantity as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_checked_first() {
        assert_eq!(validate_production_request(None, "5"), Err(ValidationError::NoModelSelected));
        assert_eq!(validate_production_request(Some(""), "5"), Err(ValidationError::NoModelSelected));
        assert_eq!(validate_production_request(Some("  "), "abc"), Err(ValidationError::NoModelSelected));
    }

    #[test]
    fn test_rejects_bad_quantities() {
        for raw in ["0", "", "-3", "abc", "NaN", "inf", "-0.5"] {
            assert_eq!(
                validate_production_request(Some("mdl-1"), raw),
                Err(ValidationError::InvalidQuantity),
                "input {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_rejects_fractional_quantity() {
        assert_eq!(
            validate_production_request(Some("abc"), "2.5"),
            Err(ValidationError::NonIntegerQuantity)
        );
    }

    #[test]
    fn test_rejects_quantity_above_cap() {
        let err = validate_production_request(Some("mdl-1"), "4294967296").unwrap_err();
        assert_eq!(err, ValidationError::QuantityTooLarge { max: u32::MAX });
        assert_eq!(err.to_string(), "Quantity must be at most 4294967295");
        assert_eq!(
            validate_production_request(Some("mdl-1"), "4294967295").unwrap().quantity,
            u32::MAX
        );
    }

    #[test]
    fn test_accepts_positive_integers() {
        let request = validate_production_request(Some(" mdl-1 "), " 12 ").unwrap();
        assert_eq!(request, ProductionRequest { model_id: "mdl-1".into(), quantity: 12 });
        assert_eq!(validate_production_request(Some("mdl-1"), "3.0").unwrap().quantity, 3);
        assert_eq!(validate_production_request(Some("mdl-1"), "1").unwrap().quantity, 1);
    }
}
