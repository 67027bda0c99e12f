//! Data models for product recipes and production runs

use serde::Serialize;

pub const DEFAULT_MATERIAL_NAME: &str = "Unnamed material";
pub const DEFAULT_MODEL_NAME: &str = "Unnamed model";
pub const DEFAULT_DIMENSIONS: &str = "-";

/// Unit label that marks a material as sold in whole sheets
pub const SHEET_UNIT_LABEL: &str = "chapa";

/// How a material is consumed: whole sheets or a continuous quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Sheet,
    Continuous,
}

impl UnitKind {
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case(SHEET_UNIT_LABEL) {
            UnitKind::Sheet
        } else {
            UnitKind::Continuous
        }
    }

    pub fn is_sheet(self) -> bool {
        self == UnitKind::Sheet
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub id: String,
    pub name: String,
    pub consumption_per_unit: f64,
    pub unit: String,
    pub unit_kind: UnitKind,
    pub dimensions: Option<String>,
}

/// Raw material fields as typed into an editor or read from an import file
#[derive(Debug, Clone, Default)]
pub struct MaterialDraft {
    pub name: String,
    pub consumption_per_unit: String,
    pub unit: String,
    pub dimensions: String,
}

impl MaterialDraft {
    pub fn new(name: &str, consumption_per_unit: &str, unit: &str, dimensions: &str) -> Self {
        Self {
            name: name.to_string(),
            consumption_per_unit: consumption_per_unit.to_string(),
            unit: unit.to_string(),
            dimensions: dimensions.to_string(),
        }
    }

    /// Sanitize the draft into a catalog material with the given id
    pub fn into_material(self, id: String) -> Material {
        let name = non_empty_or(&self.name, DEFAULT_MATERIAL_NAME);
        let unit = self.unit.trim().to_string();
        let dimensions = self.dimensions.trim();

        Material {
            id,
            name,
            consumption_per_unit: sanitize_amount(coerce_number(&self.consumption_per_unit)),
            unit_kind: UnitKind::from_label(&unit),
            unit,
            dimensions: (!dimensions.is_empty()).then(|| dimensions.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductModel {
    pub id: String,
    pub name: String,
    pub dimensions: String,
    pub materials: Vec<Material>,
}

/// A validated request to produce `quantity` units of a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionRequest {
    pub model_id: String,
    pub quantity: u32,
}

/// Computed need for one material in a production run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRequirement {
    #[serde(flatten)]
    pub material: Material,
    pub raw_total: f64,
    pub rounded_total: f64,
    pub display_total: String,
    pub waste_percentage: f64,
    pub waste_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReuseSuggestion {
    pub product_name: String,
    pub suggested_quantity: u32,
    pub note: String,
}

/// Result of a bill-of-materials calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionResult {
    pub model_id: String,
    pub model_name: String,
    pub quantity: u32,
    pub materials: Vec<MaterialRequirement>,
    pub reuse_suggestions: Vec<ReuseSuggestion>,
}

/// Convert loosely typed numeric input the way a form field would.
///
/// Surrounding whitespace is ignored and blank input counts as zero.
/// Anything unparseable comes back as NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Clamp an amount to a finite, non-negative value
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

pub(crate) fn non_empty_or(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_kind_from_label() {
        assert_eq!(UnitKind::from_label("chapa"), UnitKind::Sheet);
        assert_eq!(UnitKind::from_label(" CHAPA "), UnitKind::Sheet);
        assert_eq!(UnitKind::from_label("Chapa"), UnitKind::Sheet);
        assert_eq!(UnitKind::from_label("metros"), UnitKind::Continuous);
        assert_eq!(UnitKind::from_label("chapas"), UnitKind::Continuous);
        assert_eq!(UnitKind::from_label(""), UnitKind::Continuous);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("  2.5 "), 2.5);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("   "), 0.0);
        assert!(coerce_number("abc").is_nan());
        assert_eq!(coerce_number("-3"), -3.0);
    }

    #[test]
    fn test_sanitize_amount() {
        assert_eq!(sanitize_amount(1.5), 1.5);
        assert_eq!(sanitize_amount(-1.0), 0.0);
        assert_eq!(sanitize_amount(f64::NAN), 0.0);
        assert_eq!(sanitize_amount(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_draft_sanitization() {
        let material = MaterialDraft::new("  ", "not a number", " Chapa ", "").into_material("mat-1".into());
        assert_eq!(material.name, DEFAULT_MATERIAL_NAME);
        assert_eq!(material.consumption_per_unit, 0.0);
        assert_eq!(material.unit, "Chapa");
        assert_eq!(material.unit_kind, UnitKind::Sheet);
        assert_eq!(material.dimensions, None);

        let material = MaterialDraft::new(" Tecido Suede ", "14.5", "metros", " 1.40m largura ")
            .into_material("mat-2".into());
        assert_eq!(material.name, "Tecido Suede");
        assert_eq!(material.consumption_per_unit, 14.5);
        assert_eq!(material.unit_kind, UnitKind::Continuous);
        assert_eq!(material.dimensions.as_deref(), Some("1.40m largura"));
    }
}
