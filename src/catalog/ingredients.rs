use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;
use uuid::Uuid;

use super::Catalog;
use crate::model::{Ingredient, IngredientProperties, IngredientType, CUSTOM_ID_PREFIX};

/// Default ingredients plus the ones defined by the user
///
/// The default ingredients come from a [`Catalog`] and can't be changed.
/// Custom ingredients can be added, edited and removed. Their ids always
/// start with [`CUSTOM_ID_PREFIX`].
#[derive(Debug, Clone)]
pub struct IngredientCatalog {
    seeds: Arc<Catalog>,
    custom: IndexMap<String, Ingredient>,
}

impl IngredientCatalog {
    pub fn new(seeds: Arc<Catalog>) -> Self {
        Self {
            seeds,
            custom: IndexMap::new(),
        }
    }

    /// Restore previously saved custom ingredients
    ///
    /// Fails if any of them does not have a custom id.
    pub fn with_custom(
        mut self,
        custom: impl IntoIterator<Item = Ingredient>,
    ) -> Result<Self, CatalogError> {
        for ingredient in custom {
            if !ingredient.is_custom() {
                return Err(CatalogError::ReadOnly { id: ingredient.id });
            }
            self.custom.insert(ingredient.id.clone(), ingredient);
        }
        Ok(self)
    }

    /// The catalog with the default ingredients
    pub fn seeds(&self) -> &Catalog {
        &self.seeds
    }

    /// Create a new custom ingredient
    ///
    /// The name is trimmed. A new id is generated.
    pub fn add_custom(
        &mut self,
        name: &str,
        properties: IngredientProperties,
    ) -> Result<&Ingredient, CatalogError> {
        let name = valid_name(name)?;
        let ty = properties.ingredient_type();
        let id = format!("{CUSTOM_ID_PREFIX}{ty}-{}", Uuid::new_v4().simple());
        tracing::debug!(%id, %name, "custom ingredient added");
        let ingredient = Ingredient::new(id.clone(), name, properties);
        Ok(self.custom.entry(id).or_insert(ingredient))
    }

    /// Replace a custom ingredient with the same id
    ///
    /// The type of an ingredient can't change.
    pub fn update_custom(&mut self, mut ingredient: Ingredient) -> Result<(), CatalogError> {
        let Some(current) = self.custom.get_mut(&ingredient.id) else {
            return Err(self.missing(&ingredient.id));
        };
        let (from, to) = (current.ingredient_type(), ingredient.ingredient_type());
        if from != to {
            return Err(CatalogError::TypeChange {
                id: ingredient.id,
                from,
                to,
            });
        }
        ingredient.name = valid_name(&ingredient.name)?;
        tracing::debug!(id = %ingredient.id, "custom ingredient updated");
        *current = ingredient;
        Ok(())
    }

    /// Remove a custom ingredient
    ///
    /// Recipes that used it keep their own copy.
    pub fn remove_custom(&mut self, id: &str) -> Result<Ingredient, CatalogError> {
        match self.custom.shift_remove(id) {
            Some(ingredient) => {
                tracing::debug!(%id, "custom ingredient removed");
                Ok(ingredient)
            }
            None => Err(self.missing(id)),
        }
    }

    /// Find any ingredient by id
    pub fn get(&self, id: &str) -> Option<&Ingredient> {
        self.seeds.ingredient(id).or_else(|| self.custom.get(id))
    }

    /// Ingredients of a type, default ones first
    pub fn by_type(&self, ty: IngredientType) -> impl Iterator<Item = &Ingredient> {
        self.seeds
            .ingredients(ty)
            .iter()
            .chain(self.custom.values().filter(move |i| i.ingredient_type() == ty))
    }

    /// Custom ingredients in creation order
    pub fn custom(&self) -> impl Iterator<Item = &Ingredient> {
        self.custom.values()
    }

    /// Every ingredient, default ones first
    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.seeds.all_ingredients().chain(self.custom.values())
    }

    /// Ingredients with a name containing `query`, ignoring case
    ///
    /// An empty query matches everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Ingredient> + 'a {
        let query = query.trim().to_lowercase();
        self.iter()
            .filter(move |i| i.name.to_lowercase().contains(&query))
    }

    fn missing(&self, id: &str) -> CatalogError {
        if self.seeds.ingredient(id).is_some() {
            CatalogError::ReadOnly { id: id.to_string() }
        } else {
            CatalogError::UnknownIngredient { id: id.to_string() }
        }
    }
}

fn valid_name(name: &str) -> Result<String, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::EmptyName);
    }
    Ok(name.to_string())
}

/// Errors when managing custom ingredients
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Unknown ingredient: {id}")]
    UnknownIngredient { id: String },

    #[error("Ingredient '{id}' is not a custom ingredient and can't be changed")]
    ReadOnly { id: String },

    #[error("Can't change the type of ingredient '{id}' from {from} to {to}")]
    TypeChange {
        id: String,
        from: IngredientType,
        to: IngredientType,
    },

    #[error("Ingredient name is empty")]
    EmptyName,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;
    use indoc::indoc;

    fn catalog() -> IngredientCatalog {
        let seeds = CatalogBuilder::new()
            .with_toml(indoc! {r#"
                [[ingredient]]
                id = "m1"
                name = "2-Row Pale Malt"
                type = "malt"
                lovibond = 1.8
                ppg = 37.0

                [[ingredient]]
                id = "h1"
                name = "Cascade"
                type = "hop"
                alphaAcid = 5.5
            "#})
            .unwrap()
            .finish()
            .unwrap();
        IngredientCatalog::new(Arc::new(seeds))
    }

    fn hop(alpha_acid: f64) -> IngredientProperties {
        IngredientProperties::Hop {
            alpha_acid: Some(alpha_acid),
        }
    }

    #[test]
    fn add_custom() {
        let mut catalog = catalog();
        let added = catalog.add_custom("  Homegrown Cascade ", hop(4.8)).unwrap();
        assert_eq!(added.name, "Homegrown Cascade");
        assert!(added.id.starts_with("custom-hop-"));
        assert!(added.is_custom());
        let id = added.id.clone();

        let hops: Vec<_> = catalog
            .by_type(IngredientType::Hop)
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(hops, ["Cascade", "Homegrown Cascade"]);
        assert_eq!(catalog.get(&id).unwrap().alpha_acid(), Some(4.8));
    }

    #[test]
    fn empty_name() {
        let mut catalog = catalog();
        assert_eq!(
            catalog.add_custom("   ", hop(4.8)).unwrap_err(),
            CatalogError::EmptyName
        );
        assert_eq!(catalog.custom().count(), 0);
    }

    #[test]
    fn update_custom() {
        let mut catalog = catalog();
        let mut edited = catalog.add_custom("Wild Hop", hop(3.0)).unwrap().clone();
        edited.name = "Wild Hop 2024".to_string();
        edited.properties = hop(3.4);
        catalog.update_custom(edited.clone()).unwrap();
        assert_eq!(catalog.get(&edited.id), Some(&edited));

        let mut retyped = edited.clone();
        retyped.properties = IngredientProperties::Adjunct;
        assert!(matches!(
            catalog.update_custom(retyped),
            Err(CatalogError::TypeChange {
                from: IngredientType::Hop,
                to: IngredientType::Adjunct,
                ..
            })
        ));
    }

    #[test]
    fn seeds_are_read_only() {
        let mut catalog = catalog();
        let cascade = catalog.get("h1").unwrap().clone();
        assert_eq!(
            catalog.update_custom(cascade),
            Err(CatalogError::ReadOnly { id: "h1".into() })
        );
        assert_eq!(
            catalog.remove_custom("m1"),
            Err(CatalogError::ReadOnly { id: "m1".into() })
        );
        assert_eq!(
            catalog.remove_custom("nope"),
            Err(CatalogError::UnknownIngredient { id: "nope".into() })
        );
        assert!(catalog
            .with_custom([Ingredient::hop("h9", "Fake", 1.0)])
            .is_err());
    }

    #[test]
    fn remove_custom() {
        let mut catalog = catalog();
        let id = catalog
            .add_custom("Lactose", IngredientProperties::Adjunct)
            .unwrap()
            .id
            .clone();
        let removed = catalog.remove_custom(&id).unwrap();
        assert_eq!(removed.name, "Lactose");
        assert!(catalog.get(&id).is_none());
    }

    #[test]
    fn search() {
        let mut catalog = catalog();
        catalog.add_custom("Cascade (Fresh)", hop(6.0)).unwrap();
        let found: Vec<_> = catalog.search("CASC").map(|i| i.name.as_str()).collect();
        assert_eq!(found, ["Cascade", "Cascade (Fresh)"]);
        assert_eq!(catalog.search("").count(), 3);
        assert_eq!(catalog.search("pilsner").count(), 0);
    }

    #[test]
    fn restore_custom() {
        let mut original = catalog();
        original.add_custom("Lactose", IngredientProperties::Adjunct).unwrap();
        let saved: Vec<_> = original.custom().cloned().collect();

        let restored = catalog().with_custom(saved).unwrap();
        assert_eq!(restored.custom().count(), 1);
        assert_eq!(restored.by_type(IngredientType::Adjunct).count(), 1);
    }
}
