//! Hop bitterness with the Tinseth formula

use crate::model::{HopSchedule, RecipeIngredient};

/// Converts ounces per gallon of alpha acid to mg/l
pub const IBU_FACTOR: f64 = 7490.0;

/// Reduction in utilization caused by a dense wort
pub fn bigness_factor(og: f64) -> f64 {
    1.65 * 0.000125_f64.powf(og - 1.0)
}

/// Utilization reached after boiling for `minutes`
pub fn boil_time_factor(minutes: u32) -> f64 {
    (1.0 - (-0.04 * f64::from(minutes)).exp()) / 4.15
}

/// Fraction of the alpha acids that end up isomerized in the beer
///
/// ```
/// # use brewcraft::bitterness::utilization;
/// let u = utilization(1.050, 60);
/// assert!((u - 0.2307).abs() < 1e-4);
/// ```
pub fn utilization(og: f64, minutes: u32) -> f64 {
    bigness_factor(og) * boil_time_factor(minutes)
}

/// Bitterness of a single hop addition
///
/// Only boil additions with a boil time, an alpha acid and a mass unit
/// have a value. Whirlpool and dry hop additions return [`None`].
pub fn hop_ibu(ingredient: &RecipeIngredient, batch_size: f64, og: f64) -> Option<f64> {
    let Some(HopSchedule::Boil {
        minutes: Some(minutes),
    }) = ingredient.hop_schedule()
    else {
        return None;
    };
    if minutes == 0 {
        return None;
    }
    let alpha_acid = ingredient.alpha_acid()?;
    let ounces = ingredient.ounces()?;
    let ibu = ounces * (alpha_acid / 100.0) * utilization(og, minutes) * IBU_FACTOR / batch_size;
    Some(ibu)
}

/// Total bitterness of the ingredients in a batch of `batch_size` gallons
/// with a wort of gravity `og`
///
/// The result is not clamped.
#[tracing::instrument(level = "trace", skip_all, fields(ingredients = ingredients.len()), ret)]
pub fn ibu(ingredients: &[RecipeIngredient], batch_size: f64, og: f64) -> f64 {
    ingredients
        .iter()
        .filter_map(|i| hop_ibu(i, batch_size, og))
        .sum()
}
