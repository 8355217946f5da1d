//! Original gravity, final gravity and alcohol content
//!
//! Gravity points are the part after the decimal point times 1000, so a
//! gravity of `1.050` is 50 points.

use crate::model::{IngredientType, RecipeIngredient};

/// Fixed brewhouse efficiency applied to the extract potential of malts
pub const BREWHOUSE_EFFICIENCY: f64 = 0.75;
/// Attenuation used when the recipe has no yeast or it has no attenuation
pub const DEFAULT_ATTENUATION: u32 = 75;
/// Factor of the simple ABV formula
pub const ABV_FACTOR: f64 = 131.25;

/// Gravity points a single ingredient adds to the batch
///
/// Only malts with a known extract potential and a mass unit contribute.
pub fn gravity_points(ingredient: &RecipeIngredient, batch_size: f64) -> f64 {
    if ingredient.ingredient_type() != IngredientType::Malt {
        return 0.0;
    }
    let (Some(ppg), Some(pounds)) = (ingredient.ingredient.ppg(), ingredient.pounds()) else {
        return 0.0;
    };
    ppg * pounds * BREWHOUSE_EFFICIENCY / batch_size
}

/// Estimated original gravity of the ingredients in a batch of `batch_size`
/// gallons
///
/// Without fermentables this is `1.0`. The batch size is not checked, a
/// non-positive value gives a meaningless result.
#[tracing::instrument(level = "trace", skip_all, fields(ingredients = ingredients.len(), batch_size = batch_size), ret)]
pub fn original_gravity(ingredients: &[RecipeIngredient], batch_size: f64) -> f64 {
    let points: f64 = ingredients
        .iter()
        .map(|i| gravity_points(i, batch_size))
        .sum();
    1.0 + points / 1000.0
}

/// Attenuation of the first yeast in the ingredients
///
/// Only the first yeast is looked at, even if there are more. A missing or
/// zero attenuation gives [`DEFAULT_ATTENUATION`].
pub fn attenuation(ingredients: &[RecipeIngredient]) -> u32 {
    ingredients
        .iter()
        .find(|i| i.ingredient_type() == IngredientType::Yeast)
        .and_then(|i| i.ingredient.attenuation())
        .filter(|&a| a != 0)
        .unwrap_or(DEFAULT_ATTENUATION)
}

/// Final gravity after the yeast ferments a wort of gravity `og`
pub fn final_gravity(og: f64, ingredients: &[RecipeIngredient]) -> f64 {
    final_gravity_with(og, attenuation(ingredients))
}

/// Final gravity for a known attenuation percentage
pub fn final_gravity_with(og: f64, attenuation: u32) -> f64 {
    og - (og - 1.0) * f64::from(attenuation) / 100.0
}

/// Alcohol by volume percentage from two gravity readings
///
/// ```
/// # use brewcraft::gravity::abv;
/// let abv = abv(1.050, 1.010);
/// assert!((abv - 5.25).abs() < 1e-9);
/// ```
pub fn abv(og: f64, fg: f64) -> f64 {
    (og - fg) * ABV_FACTOR
}
