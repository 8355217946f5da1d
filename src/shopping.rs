//! Shopping list of a recipe

use enum_map::EnumMap;
use serde::Serialize;

use crate::{
    convert::Unit,
    model::{IngredientType, Recipe},
};

/// Something to buy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingItem {
    pub name: String,
    pub amount: f64,
    pub unit: Unit,
    pub checked: bool,
}

/// Ingredients of a recipe grouped by type
///
/// Groups are always in the order malt, hop, yeast, adjunct. Inside a group
/// the items keep the recipe order. The same ingredient added twice to the
/// recipe is listed twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    groups: EnumMap<IngredientType, Vec<ShoppingItem>>,
}

/// A non empty group of a [`ShoppingList`]
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShoppingGroup<'a> {
    #[serde(rename = "type")]
    pub ingredient_type: IngredientType,
    pub label: &'static str,
    pub items: &'a [ShoppingItem],
}

impl ShoppingList {
    /// Shopping list of a recipe, nothing checked
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let mut list = Self::default();
        for entry in &recipe.ingredients {
            list.groups[entry.ingredient_type()].push(ShoppingItem {
                name: entry.ingredient.name.clone(),
                amount: entry.amount,
                unit: entry.unit,
                checked: false,
            });
        }
        list
    }

    /// Non empty groups, in display order
    pub fn groups(&self) -> impl Iterator<Item = ShoppingGroup<'_>> {
        IngredientType::ALL
            .into_iter()
            .filter(|&ty| !self.groups[ty].is_empty())
            .map(|ty| ShoppingGroup {
                ingredient_type: ty,
                label: ty.group_label(),
                items: &self.groups[ty],
            })
    }

    /// Items of one type
    pub fn items(&self, ty: IngredientType) -> &[ShoppingItem] {
        &self.groups[ty]
    }

    /// Flip the checked mark of an item, returns the new value
    ///
    /// Returns [`None`] if there is no item at `index` in the group.
    pub fn toggle(&mut self, ty: IngredientType, index: usize) -> Option<bool> {
        let item = self.groups[ty].get_mut(index)?;
        item.checked = !item.checked;
        Some(item.checked)
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of items not checked yet
    pub fn remaining(&self) -> usize {
        self.groups
            .values()
            .flatten()
            .filter(|item| !item.checked)
            .count()
    }
}

impl Serialize for ShoppingList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.groups())
    }
}
