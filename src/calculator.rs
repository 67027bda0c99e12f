//! Bill-of-materials calculator logic

use tracing::debug;

use crate::catalog::Catalog;
use crate::models::{
    sanitize_amount, Material, MaterialRequirement, ProductModel, ProductionRequest,
    ProductionResult, ReuseSuggestion, UnitKind,
};

/// Waste on the last sheet above this percentage gets a note
pub const WASTE_NOTE_THRESHOLD: f64 = 5.0;

/// Foam waste above this percentage is worth reusing
pub const REUSE_THRESHOLD: f64 = 20.0;

const FOAM_MARKER: &str = "espuma";
const ACCESSORY_PRODUCT: &str = "Almofada decorativa";
const ACCESSORY_STEP: f64 = 20.0;
const FILLING_PRODUCT: &str = "Enchimento de flocos";
const FILLING_STEP: f64 = 5.0;

/// Calculate how much of one material a run of `quantity` units needs
pub fn calculate_material_requirement(material: &Material, quantity: u32) -> MaterialRequirement {
    // Overflowing products count as zero, like any other non-finite amount
    let raw_total = sanitize_amount(sanitize_amount(material.consumption_per_unit) * f64::from(quantity));

    let (rounded_total, waste_percentage) = match material.unit_kind {
        UnitKind::Sheet => {
            let rounded = raw_total.ceil();
            let waste = if rounded > 0.0 {
                sanitize_amount((rounded - raw_total) / rounded * 100.0)
            } else {
                0.0
            };
            (rounded, waste)
        }
        UnitKind::Continuous => (raw_total, 0.0),
    };

    let waste_note = (material.unit_kind.is_sheet() && waste_percentage > WASTE_NOTE_THRESHOLD)
        .then(|| format!("{:.1}% waste on the last sheet", waste_percentage));

    MaterialRequirement {
        material: material.clone(),
        raw_total,
        rounded_total,
        display_total: format_quantity(rounded_total),
        waste_percentage,
        waste_note,
    }
}

/// Suggest secondary products for foam offcuts.
///
/// Only the first foam material above the reuse threshold is considered.
pub fn generate_waste_suggestions(requirements: &[MaterialRequirement]) -> Vec<ReuseSuggestion> {
    let Some(foam) = requirements.iter().find(|r| {
        r.material.name.to_lowercase().contains(FOAM_MARKER) && r.waste_percentage > REUSE_THRESHOLD
    }) else {
        return Vec::new();
    };

    let waste = foam.waste_percentage;
    let mut suggestions = Vec::new();

    let accessories = (waste / ACCESSORY_STEP).floor() as u32;
    if accessories > 0 {
        suggestions.push(ReuseSuggestion {
            product_name: ACCESSORY_PRODUCT.to_string(),
            suggested_quantity: accessories,
            note: format!("Cut small cushions from the {} offcut", foam.material.name),
        });
    }

    let filling = (waste / FILLING_STEP).floor() as u32;
    if filling > 0 {
        suggestions.push(ReuseSuggestion {
            product_name: FILLING_PRODUCT.to_string(),
            suggested_quantity: filling,
            note: format!("Shred the remaining {} into filling", foam.material.name),
        });
    }

    suggestions
}

/// Calculate the full bill of materials for `quantity` units of a model
pub fn build_production_result(model: &ProductModel, quantity: u32) -> ProductionResult {
    let materials: Vec<MaterialRequirement> = model
        .materials
        .iter()
        .map(|m| calculate_material_requirement(m, quantity))
        .collect();

    let reuse_suggestions = generate_waste_suggestions(&materials);

    debug!(
        model = %model.id,
        quantity,
        materials = materials.len(),
        suggestions = reuse_suggestions.len(),
        "calculated production result"
    );

    ProductionResult {
        model_id: model.id.clone(),
        model_name: model.name.clone(),
        quantity,
        materials,
        reuse_suggestions,
    }
}

/// Resolve the requested model in a catalog snapshot and calculate it.
///
/// Returns `None` when the model no longer exists.
pub fn resolve_and_calculate(catalog: &Catalog, request: &ProductionRequest) -> Option<ProductionResult> {
    let model = catalog.get_model_by_id(&request.model_id);
    if model.is_none() {
        debug!(model = %request.model_id, "model not found, nothing to calculate");
    }
    model.map(|m| build_production_result(m, request.quantity))
}

/// Render a quantity with at most two decimals and no trailing zeros
pub fn format_quantity(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a production result as a readable table
pub fn format_production_result(result: &ProductionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "=== Bill of Materials: {} x{} ===\n\n",
        result.model_name, result.quantity
    ));
    output.push_str(&format!(
        "{:<28} {:>12} {:<10} {:>8}\n",
        "Material", "Required", "Unit", "Waste"
    ));
    output.push_str(&format!("{}\n", "-".repeat(61)));

    for req in &result.materials {
        let waste = if req.material.unit_kind.is_sheet() {
            format!("{:.1}%", req.waste_percentage)
        } else {
            "-".to_string()
        };
        output.push_str(&format!(
            "{:<28} {:>12} {:<10} {:>8}\n",
            req.material.name, req.display_total, req.material.unit, waste
        ));
        if let Some(dims) = &req.material.dimensions {
            output.push_str(&format!("  ({})\n", dims));
        }
        if let Some(note) = &req.waste_note {
            output.push_str(&format!("  ! {}\n", note));
        }
    }

    if !result.reuse_suggestions.is_empty() {
        output.push_str("\nReuse suggestions:\n");
        for s in &result.reuse_suggestions {
            output.push_str(&format!(
                "  {}x {} - {}\n",
                s.suggested_quantity, s.product_name, s.note
            ));
        }
    }

    output
}

impl std::fmt::Display for ProductionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_production_result(self))
    }
}
