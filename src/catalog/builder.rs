use std::collections::HashSet;

use indexmap::IndexMap;
use thiserror::Error;

use super::{catalog_file::CatalogFile, Catalog};
use crate::{
    matching::StyleParameter,
    model::{Ingredient, CUSTOM_ID_PREFIX},
    style::BeerStyle,
};

/// Builder to create a custom [`Catalog`]
///
/// The builder uses [`CatalogFile`] to configure the catalog. More than one
/// file can be layered. Order matters, a style or ingredient in a later layer
/// replaces the one with the same name or id added before, keeping its
/// position.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    styles: IndexMap<String, BeerStyle>,
    ingredients: IndexMap<String, Ingredient>,
}

impl CatalogBuilder {
    /// New empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the bundled catalog to the builder
    ///
    /// This is only available with the `bundled_catalog` feature.
    #[cfg(feature = "bundled_catalog")]
    pub fn with_bundled_catalog(mut self) -> Result<Self, CatalogBuilderError> {
        self.add_bundled_catalog()?;
        Ok(self)
    }

    /// Add the bundled catalog to the builder
    ///
    /// This is only available with the `bundled_catalog` feature.
    #[cfg(feature = "bundled_catalog")]
    pub fn add_bundled_catalog(&mut self) -> Result<&mut Self, CatalogBuilderError> {
        self.add_catalog_file(CatalogFile::bundled())?;
        Ok(self)
    }

    /// Add a [`CatalogFile`] to the builder
    pub fn with_catalog_file(mut self, file: CatalogFile) -> Result<Self, CatalogBuilderError> {
        self.add_catalog_file(file)?;
        Ok(self)
    }

    /// Parse a TOML [`CatalogFile`] and add it to the builder
    pub fn with_toml(mut self, input: &str) -> Result<Self, CatalogBuilderError> {
        self.add_catalog_file(CatalogFile::from_toml(input)?)?;
        Ok(self)
    }

    /// Add a [`CatalogFile`] to the builder
    ///
    /// The whole layer is checked before anything is added, so on error the
    /// builder is left unchanged.
    #[tracing::instrument(level = "debug", skip_all, fields(styles = file.style.len(), ingredients = file.ingredient.len()))]
    pub fn add_catalog_file(&mut self, file: CatalogFile) -> Result<&mut Self, CatalogBuilderError> {
        check_styles(&file.style)?;
        check_ingredients(&file.ingredient)?;

        for style in file.style {
            if let Some(old) = self.styles.insert(style.name.clone(), style) {
                tracing::debug!(style = %old.name, "style overridden");
            }
        }
        for ingredient in file.ingredient {
            if let Some(old) = self.ingredients.insert(ingredient.id.clone(), ingredient) {
                tracing::debug!(id = %old.id, name = %old.name, "ingredient overridden");
            }
        }
        Ok(self)
    }

    /// Consume the builder and return the new [`Catalog`]
    ///
    /// This never fails. Every layer is checked in
    /// [`add_catalog_file`](Self::add_catalog_file) and an override replaces
    /// an entry as a whole, so any stack of accepted layers is a valid
    /// catalog, the empty one included. The [`Result`] matches the other
    /// builders and leaves room for checks that span layers.
    pub fn finish(self) -> Result<Catalog, CatalogBuilderError> {
        let mut catalog = Catalog::empty();
        catalog.styles = self.styles.into_values().collect();
        for ingredient in self.ingredients.into_values() {
            catalog.insert_ingredient(ingredient);
        }
        tracing::debug!(
            styles = catalog.styles.len(),
            ingredients = catalog.ingredient_count(),
            "catalog built"
        );
        Ok(catalog)
    }
}

fn check_styles(styles: &[BeerStyle]) -> Result<(), CatalogBuilderError> {
    let mut seen = HashSet::new();
    for style in styles {
        if style.name.trim().is_empty() {
            return Err(CatalogBuilderError::EmptyStyleName);
        }
        if !seen.insert(style.name.as_str()) {
            return Err(CatalogBuilderError::DuplicateStyle {
                name: style.name.clone(),
            });
        }
        for parameter in StyleParameter::ALL {
            let range = parameter.range(style);
            if range.is_inverted() {
                return Err(CatalogBuilderError::InvalidRange {
                    style: style.name.clone(),
                    parameter,
                    min: range.min,
                    max: range.max,
                });
            }
        }
    }
    Ok(())
}

fn check_ingredients(ingredients: &[Ingredient]) -> Result<(), CatalogBuilderError> {
    let mut seen = HashSet::new();
    for ingredient in ingredients {
        if ingredient.id.trim().is_empty() {
            return Err(CatalogBuilderError::EmptyIngredientId {
                name: ingredient.name.clone(),
            });
        }
        if ingredient.name.trim().is_empty() {
            return Err(CatalogBuilderError::EmptyIngredientName {
                id: ingredient.id.clone(),
            });
        }
        if ingredient.id.starts_with(CUSTOM_ID_PREFIX) {
            return Err(CatalogBuilderError::ReservedId {
                id: ingredient.id.clone(),
            });
        }
        if !seen.insert(ingredient.id.as_str()) {
            return Err(CatalogBuilderError::DuplicateIngredient {
                id: ingredient.id.clone(),
            });
        }
    }
    Ok(())
}

/// Errors generated by [`CatalogBuilder`]
#[derive(Debug, Error)]
pub enum CatalogBuilderError {
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("Style without name")]
    EmptyStyleName,

    #[error("Duplicate style in the same layer: {name}")]
    DuplicateStyle { name: String },

    #[error("Invalid {parameter} range in style '{style}': {min} - {max}")]
    InvalidRange {
        style: String,
        parameter: StyleParameter,
        min: f64,
        max: f64,
    },

    #[error("Ingredient without id: {name}")]
    EmptyIngredientId { name: String },

    #[error("Ingredient without name: {id}")]
    EmptyIngredientName { id: String },

    #[error("Duplicate ingredient in the same layer: {id}")]
    DuplicateIngredient { id: String },

    #[error("Ingredient id '{id}' uses the prefix reserved for custom ingredients")]
    ReservedId { id: String },
}
