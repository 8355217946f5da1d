//! Reference data: beer styles and default ingredients
//!
//! A [`Catalog`] is immutable once built. It is passed to whatever needs it,
//! there is no global catalog. Use [`CatalogBuilder`] to create one from
//! [`CatalogFile`] layers, or [`Catalog::bundled`] for the data that comes
//! with the crate.
//!
//! User defined ingredients live in an [`IngredientCatalog`] on top of a
//! [`Catalog`].

use std::collections::HashMap;

use enum_map::EnumMap;
#[cfg(feature = "bundled_catalog")]
use once_cell::sync::Lazy;

use crate::{
    model::{Ingredient, IngredientType},
    style::BeerStyle,
};

mod builder;
mod catalog_file;
mod ingredients;

pub use builder::{CatalogBuilder, CatalogBuilderError};
pub use catalog_file::CatalogFile;
pub use ingredients::{CatalogError, IngredientCatalog};

/// Beer styles and default ingredients
///
/// [`Catalog::default`] changes with the feature `bundled_catalog`:
/// - When enabled, [`Catalog::bundled`].
/// - When disabled, [`Catalog::empty`].
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    styles: Vec<BeerStyle>,
    ingredients: EnumMap<IngredientType, Vec<Ingredient>>,
    ingredient_index: HashMap<String, (IngredientType, usize)>,
}

impl Catalog {
    /// Empty catalog
    ///
    /// This is the default when the `bundled_catalog` feature is disabled.
    /// Matching against it returns no styles.
    pub fn empty() -> Self {
        Self {
            styles: Vec::new(),
            ingredients: EnumMap::default(),
            ingredient_index: HashMap::new(),
        }
    }

    /// Catalog with the bundled styles and ingredients
    ///
    /// This is only available when the `bundled_catalog` feature is enabled.
    ///
    /// This is the default when the `bundled_catalog` feature is enabled.
    #[cfg(feature = "bundled_catalog")]
    pub fn bundled() -> Self {
        static BUNDLED: Lazy<Catalog> = Lazy::new(|| {
            CatalogBuilder::new()
                .with_bundled_catalog()
                .unwrap()
                .finish()
                .unwrap()
        });
        BUNDLED.clone()
    }

    /// Start building a custom catalog
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// All the styles, in matching order
    pub fn styles(&self) -> &[BeerStyle] {
        &self.styles
    }

    /// Find a style by name
    pub fn style(&self, name: &str) -> Option<&BeerStyle> {
        self.styles.iter().find(|s| s.name == name)
    }

    /// Styles of a category
    pub fn styles_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a BeerStyle> {
        self.styles.iter().filter(move |s| s.category == category)
    }

    /// Categories of the styles, in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = Vec::new();
        for style in &self.styles {
            if !categories.contains(&style.category.as_str()) {
                categories.push(style.category.as_str());
            }
        }
        categories
    }

    /// Default ingredients of a type, in catalog order
    pub fn ingredients(&self, ty: IngredientType) -> &[Ingredient] {
        &self.ingredients[ty]
    }

    /// Find a default ingredient by id
    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        let &(ty, index) = self.ingredient_index.get(id)?;
        self.ingredients[ty].get(index)
    }

    /// All the default ingredients, grouped by type
    pub fn all_ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.values().flatten()
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredient_index.len()
    }

    fn insert_ingredient(&mut self, ingredient: Ingredient) {
        let ty = ingredient.ingredient_type();
        let group = &mut self.ingredients[ty];
        self.ingredient_index
            .insert(ingredient.id.clone(), (ty, group.len()));
        group.push(ingredient);
    }
}

#[cfg(not(feature = "bundled_catalog"))]
impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(feature = "bundled_catalog")]
impl Default for Catalog {
    fn default() -> Self {
        Self::bundled()
    }
}

#[cfg(all(test, feature = "bundled_catalog"))]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog() {
        let catalog = Catalog::bundled();
        assert_eq!(catalog, Catalog::default());
        assert!(catalog.style("American Pale Ale").is_some());
        assert!(catalog.style("Wheat Beer").is_some());
        assert_eq!(catalog.ingredient("m1").unwrap().name, "2-Row Pale Malt");
        assert_eq!(catalog.ingredient("h1").unwrap().alpha_acid(), Some(5.5));
        assert!(catalog.ingredient("custom-malt-1").is_none());
        assert_eq!(
            catalog.all_ingredients().count(),
            catalog.ingredient_count()
        );
    }

    #[test]
    fn grouped_by_type() {
        let catalog = Catalog::bundled();
        for ty in IngredientType::ALL {
            let group = catalog.ingredients(ty);
            assert!(!group.is_empty());
            assert!(group.iter().all(|i| i.ingredient_type() == ty));
        }
    }

    #[test]
    fn categories() {
        let catalog = Catalog::bundled();
        let categories = catalog.categories();
        for expected in ["Stout", "Porter", "Belgian", "IPA", "Pale Ale", "Wheat"] {
            assert!(categories.contains(&expected), "missing {expected}");
        }
        assert!(catalog.styles_in("Stout").all(|s| s.category == "Stout"));
        assert!(catalog.styles_in("Stout").count() >= 2);
    }

    #[test]
    fn bundled_styles_are_valid() {
        for style in Catalog::bundled().styles() {
            for range in [style.og, style.fg, style.abv, style.ibu, style.srm] {
                assert!(range.min < range.max, "{}", style.name);
            }
            assert!(!style.description.is_empty());
        }
    }
}
