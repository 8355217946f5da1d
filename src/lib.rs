//! Homebrew recipe calculations and beer style matching.
//!
//! Given a [`Recipe`], the engine computes the usual brewing numbers:
//! original and final gravity, alcohol by volume, bitterness (IBU), color
//! (SRM) and calories and carbohydrates per 12 oz serving. It can also rank
//! the styles of a [`Catalog`] by how well the recipe fits them.
//!
//! Also includes:
//! - A catalog of beer styles and default ingredients, configurable with
//!   TOML layers.
//! - Custom ingredient management.
//! - Simple stores to save recipes, in memory or in a JSON file.
//! - Duplicating, cloning and promoting recipes.
//! - A priming sugar calculator and shopping lists.
//!
//! # Basic usage
//! ```rust
//! # use brewcraft::{convert::Unit, BrewEngine, Ingredient, Recipe, RecipeIngredient};
//! let recipe = Recipe::new("r1", "House Pale")
//!     .with_ingredient(RecipeIngredient::new(
//!         Ingredient::malt("m1", "2-Row Pale Malt", 1.8, 37.0),
//!         10.0,
//!         Unit::Lb,
//!     ))
//!     .with_ingredient(RecipeIngredient::boil(
//!         Ingredient::hop("h1", "Cascade", 6.0),
//!         1.0,
//!         Unit::Oz,
//!         60,
//!     ));
//!
//! let engine = BrewEngine::default();
//! let values = engine.calculate(&recipe);
//! assert_eq!(values.original_gravity, 1.056);
//!
//! let styles = engine.match_styles(&recipe);
//! assert!(styles.len() <= 5);
//! ```
//!
//! The calculations never fail. Garbage in gives numbers out, never an
//! error or a panic.

#![warn(rustdoc::broken_intra_doc_links, clippy::doc_markdown)]

#[cfg(doc)]
pub mod _features {
    //! This lib has 1 feature, enabled by default:
    //! - `bundled_catalog`. Includes a catalog of beer styles and default
    //!   ingredients. The default [`Catalog`](crate::catalog::Catalog) uses
    //!   it if this feature is enabled.
}

pub mod bitterness;
pub mod catalog;
pub mod color;
pub mod convert;
pub mod gravity;
pub mod lifecycle;
pub mod matching;
pub mod model;
pub mod nutrition;
pub mod priming;
pub mod shopping;
pub mod stats;
pub mod store;
pub mod style;

use std::sync::Arc;

pub use catalog::{Catalog, CatalogBuilder, IngredientCatalog};
pub use color::srm_color;
pub use matching::{StyleMatch, StyleParameter};
pub use model::*;
pub use stats::calculate;
pub use style::{BeerStyle, StyleRange};

/// Calculation and style matching engine
///
/// Holds the [`Catalog`] used to match styles. Cloning it is cheap.
///
/// The default engine uses [`Catalog::default`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BrewEngine {
    catalog: Arc<Catalog>,
}

impl BrewEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Get the engine catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Calculate the derived values of a recipe. See [`stats::calculate`].
    pub fn calculate(&self, recipe: &Recipe) -> DerivedValues {
        stats::calculate(recipe)
    }

    /// Best matching styles of the catalog for a recipe
    ///
    /// See [`matching::match_styles`].
    pub fn match_styles(&self, recipe: &Recipe) -> Vec<StyleMatch> {
        matching::match_styles(recipe, self.catalog.styles())
    }

    /// Ingredient catalog with the default ingredients of the engine
    /// catalog and no custom ones
    pub fn ingredient_catalog(&self) -> IngredientCatalog {
        IngredientCatalog::new(Arc::clone(&self.catalog))
    }
}

/// Match a recipe with a default [`BrewEngine`]
///
/// With the `bundled_catalog` feature disabled the default catalog is empty
/// and this always returns an empty list.
pub fn match_styles(recipe: &Recipe) -> Vec<StyleMatch> {
    BrewEngine::default().match_styles(recipe)
}
