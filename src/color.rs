//! Beer color in SRM with the Morey equation
//!
//! Also maps an SRM value to a hex color to show it.

use crate::model::{IngredientType, RecipeIngredient};

/// Malt color units of the ingredients in a batch of `batch_size` gallons
///
/// Only malts with a color value and a mass unit contribute.
pub fn malt_color_units(ingredients: &[RecipeIngredient], batch_size: f64) -> f64 {
    ingredients
        .iter()
        .filter(|i| i.ingredient_type() == IngredientType::Malt)
        .filter_map(|i| Some(i.pounds()? * i.ingredient.lovibond()? / batch_size))
        .sum()
}

/// SRM from malt color units
///
/// A non-positive (or NaN) value gives `0.0` instead of a NaN from the
/// fractional power.
pub fn srm_from_mcu(mcu: f64) -> f64 {
    if mcu.is_nan() || mcu <= 0.0 {
        return 0.0;
    }
    1.4922 * mcu.powf(0.6859)
}

/// Estimated color of the ingredients in a batch of `batch_size` gallons
#[tracing::instrument(level = "trace", skip_all, fields(ingredients = ingredients.len()), ret)]
pub fn srm(ingredients: &[RecipeIngredient], batch_size: f64) -> f64 {
    srm_from_mcu(malt_color_units(ingredients, batch_size))
}

/// Upper SRM bound (inclusive) of each swatch and its color
const SRM_SWATCHES: &[(f64, &str)] = &[
    (2.0, "#FFE699"),
    (4.0, "#FFD878"),
    (6.0, "#FFCA5A"),
    (8.0, "#FFBF42"),
    (10.0, "#FBB123"),
    (12.0, "#F8A600"),
    (14.0, "#F39C00"),
    (16.0, "#EA8F00"),
    (18.0, "#E58500"),
    (20.0, "#DE7C00"),
    (24.0, "#D77200"),
    (28.0, "#CF6900"),
    (32.0, "#CB6200"),
    (36.0, "#C35900"),
    (40.0, "#BB5100"),
];

/// Color of anything darker than the last swatch
const DARKEST_SWATCH: &str = "#8D4C32";

/// Hex color to display a beer of the given SRM
///
/// ```
/// # use brewcraft::color::srm_color;
/// assert_eq!(srm_color(3.6), "#FFD878");
/// assert_eq!(srm_color(55.0), "#8D4C32");
/// ```
pub fn srm_color(srm: f64) -> &'static str {
    SRM_SWATCHES
        .iter()
        .find(|(max, _)| srm <= *max)
        .map(|(_, color)| *color)
        .unwrap_or(DARKEST_SWATCH)
}
