//! Product catalog with copy-on-write snapshots
//!
//! The store owns the model list. Calculations work on a [`Catalog`]
//! snapshot obtained from [`CatalogStore::snapshot`]; later edits to the
//! store never show up in a snapshot that was already handed out.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::models::{non_empty_or, MaterialDraft, ProductModel, DEFAULT_DIMENSIONS, DEFAULT_MODEL_NAME};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Material {material_id} not found in model {model_id}")]
    MaterialNotFound { model_id: String, material_id: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Immutable view of the product models
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    models: Vec<ProductModel>,
}

impl Catalog {
    pub fn get_model_by_id(&self, id: &str) -> Option<&ProductModel> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn list_models(&self) -> &[ProductModel] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct CatalogStore {
    current: Arc<Catalog>,
    next_model: u64,
    next_material: u64,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current catalog state, shared with every caller until the next edit
    pub fn snapshot(&self) -> Arc<Catalog> {
        Arc::clone(&self.current)
    }

    pub fn get_model_by_id(&self, id: &str) -> Option<&ProductModel> {
        self.current.get_model_by_id(id)
    }

    pub fn list_models(&self) -> &[ProductModel] {
        self.current.list_models()
    }

    /// Create an empty model and return its id
    pub fn add_model(&mut self, name: &str, dimensions: &str) -> String {
        self.next_model += 1;
        let id = format!("mdl-{}", self.next_model);

        let model = ProductModel {
            id: id.clone(),
            name: non_empty_or(name, DEFAULT_MODEL_NAME),
            dimensions: non_empty_or(dimensions, DEFAULT_DIMENSIONS),
            materials: Vec::new(),
        };
        debug!(model = %id, name = %model.name, "added model");

        Arc::make_mut(&mut self.current).models.push(model);
        id
    }

    pub fn rename_model(&mut self, model_id: &str, name: &str) -> Result<()> {
        let name = non_empty_or(name, DEFAULT_MODEL_NAME);
        self.model_mut(model_id)?.name = name;
        Ok(())
    }

    pub fn set_model_dimensions(&mut self, model_id: &str, dimensions: &str) -> Result<()> {
        let dimensions = non_empty_or(dimensions, DEFAULT_DIMENSIONS);
        self.model_mut(model_id)?.dimensions = dimensions;
        Ok(())
    }

    pub fn remove_model(&mut self, model_id: &str) -> Result<ProductModel> {
        let index = self.model_index(model_id)?;
        debug!(model = %model_id, "removed model");
        Ok(Arc::make_mut(&mut self.current).models.remove(index))
    }

    /// Append a material to a model and return the new material id
    pub fn add_material(&mut self, model_id: &str, draft: MaterialDraft) -> Result<String> {
        self.model_index(model_id)?;

        self.next_material += 1;
        let material_id = format!("mat-{}", self.next_material);
        let material = draft.into_material(material_id.clone());
        debug!(model = %model_id, material = %material_id, unit_kind = ?material.unit_kind, "added material");

        self.model_mut(model_id)?.materials.push(material);
        Ok(material_id)
    }

    /// Replace a material's fields, keeping its id and position
    pub fn update_material(&mut self, model_id: &str, material_id: &str, draft: MaterialDraft) -> Result<()> {
        let index = self.material_index(model_id, material_id)?;
        let material = draft.into_material(material_id.to_string());
        self.model_mut(model_id)?.materials[index] = material;
        Ok(())
    }

    pub fn remove_material(&mut self, model_id: &str, material_id: &str) -> Result<()> {
        let index = self.material_index(model_id, material_id)?;
        self.model_mut(model_id)?.materials.remove(index);
        Ok(())
    }

    fn model_index(&self, model_id: &str) -> Result<usize> {
        self.current
            .models
            .iter()
            .position(|m| m.id == model_id)
            .ok_or_else(|| CatalogError::ModelNotFound(model_id.to_string()))
    }

    fn material_index(&self, model_id: &str, material_id: &str) -> Result<usize> {
        let model = &self.current.models[self.model_index(model_id)?];
        model
            .materials
            .iter()
            .position(|m| m.id == material_id)
            .ok_or_else(|| CatalogError::MaterialNotFound {
                model_id: model_id.to_string(),
                material_id: material_id.to_string(),
            })
    }

    fn model_mut(&mut self, model_id: &str) -> Result<&mut ProductModel> {
        let index = self.model_index(model_id)?;
        Ok(&mut Arc::make_mut(&mut self.current).models[index])
    }
}
