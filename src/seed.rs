//! Built-in furniture catalog used when no catalog directory is given

use crate::catalog::{CatalogStore, Result};
use crate::models::MaterialDraft;

struct SeedModel {
    name: &'static str,
    dimensions: &'static str,
    // (name, consumption per unit, unit, dimensions)
    materials: &'static [(&'static str, &'static str, &'static str, &'static str)],
}

const SEED_MODELS: &[SeedModel] = &[
    SeedModel {
        name: "Sofá Retrátil Milano",
        dimensions: "2.30m x 1.05m x 0.95m",
        materials: &[
            ("Espuma D33", "1.5", "chapa", "190 x 130 x 10 cm"),
            ("Espuma D28 Soft", "0.6", "chapa", "190 x 130 x 5 cm"),
            ("Tecido Suede", "14.5", "metros", "1.40 m de largura"),
            ("Madeira Pinus", "0.12", "m³", ""),
            ("Percinta Elástica", "18", "metros", ""),
            ("Mecanismo Retrátil", "2", "unidades", ""),
        ],
    },
    SeedModel {
        name: "Poltrona Lisboa",
        dimensions: "0.80m x 0.85m x 0.90m",
        materials: &[
            ("Espuma D33", "0.45", "chapa", "190 x 130 x 10 cm"),
            ("Tecido Linho", "4.2", "metros", "1.40 m de largura"),
            ("Chapa MDF 15mm", "0.25", "chapa", "275 x 185 cm"),
            ("Pés de Madeira", "4", "unidades", "15 cm"),
        ],
    },
    SeedModel {
        name: "Cama Box Casal Premium",
        dimensions: "1.38m x 1.88m x 0.42m",
        materials: &[
            ("Espuma D45", "1.2", "chapa", "188 x 138 x 15 cm"),
            ("Molas Ensacadas", "1", "kit", "138 x 188 cm"),
            ("Tecido Jacquard", "6.8", "metros", "2.80 m de largura"),
            ("Chapa Compensado 10mm", "1.5", "chapa", "220 x 160 cm"),
            ("Grampos", "0.35", "kg", ""),
        ],
    },
];

/// Build a catalog store populated with the standard furniture models
pub fn seed_catalog() -> Result<CatalogStore> {
    let mut store = CatalogStore::new();

    for seed in SEED_MODELS {
        let model_id = store.add_model(seed.name, seed.dimensions);
        for (name, consumption, unit, dimensions) in seed.materials {
            store.add_material(&model_id, MaterialDraft::new(name, consumption, unit, dimensions))?;
        }
    }

    tracing::debug!(models = store.list_models().len(), "seeded catalog");
    Ok(store)
}
