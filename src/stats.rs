//! Derived values of a whole recipe
//!
//! [`calculate`] is the single entry point. It runs every formula in order,
//! each one using the result of the previous, and rounds the results for
//! display.

use chrono::Utc;

use crate::{bitterness, color, gravity, model::DerivedValues, nutrition, Recipe};

/// Round `value` to `decimals` decimal places, half away from zero
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Calculate the derived values of a recipe
///
/// OG and FG are rounded to 3 decimals, ABV, SRM and carbs to 1 and IBU and
/// calories to integers. The recipe is not changed.
///
/// This never fails. A recipe with a non-positive batch size is logged and
/// gives meaningless numbers.
#[tracing::instrument(level = "debug", skip_all, fields(recipe = %recipe.id, ingredients = recipe.ingredients.len()))]
pub fn calculate(recipe: &Recipe) -> DerivedValues {
    let batch_size = recipe.batch_size;
    if batch_size.is_nan() || batch_size <= 0.0 {
        tracing::warn!(batch_size, "calculating a recipe with a non-positive batch size");
    }
    let ingredients = recipe.ingredients.as_slice();

    let og = gravity::original_gravity(ingredients, batch_size);
    let fg = gravity::final_gravity(og, ingredients);
    let abv = gravity::abv(og, fg);
    let ibu = bitterness::ibu(ingredients, batch_size, og);
    let srm = color::srm(ingredients, batch_size);
    let calories = nutrition::calories_per_12oz(og, fg, abv);
    let carbs = nutrition::carbs_per_12oz(og, fg);

    DerivedValues {
        original_gravity: round_to(og, 3),
        final_gravity: round_to(fg, 3),
        abv: round_to(abv, 1),
        ibu: ibu.round(),
        srm: round_to(srm, 1),
        calories_per_12oz: calories.round(),
        carbs_per_12oz: round_to(carbs, 1),
    }
}

/// ABV, calories and carbs from measured gravities, rounded like
/// [`calculate`]
pub fn from_readings(og: f64, fg: f64) -> (f64, f64, f64) {
    let abv = gravity::abv(og, fg);
    (
        round_to(abv, 1),
        nutrition::calories_per_12oz(og, fg, abv).round(),
        round_to(nutrition::carbs_per_12oz(og, fg), 1),
    )
}

impl Recipe {
    /// Calculate the derived values of the recipe. See [`calculate`].
    pub fn calculate(&self) -> DerivedValues {
        calculate(self)
    }

    /// Recalculate and store the derived values snapshot
    ///
    /// This is done every time a recipe is saved. It also bumps the update
    /// time and, when both measured gravities are present, the measured ABV.
    pub fn refresh_derived(&mut self) -> DerivedValues {
        let derived = calculate(self);
        self.derived = Some(derived);
        if let (Some(og), Some(fg)) = (self.actual_og, self.actual_fg) {
            self.actual_abv = Some(from_readings(og, fg).0);
        }
        self.updated_at = Utc::now();
        derived
    }

    /// Values to show for this recipe
    ///
    /// Starts from the stored snapshot, or a fresh calculation if there is
    /// none. When both measured gravities are present, they replace the
    /// estimated gravities, ABV, calories and carbs. The stored snapshot is
    /// never changed.
    pub fn display_values(&self) -> DerivedValues {
        let mut values = self.derived.unwrap_or_else(|| calculate(self));
        if let (Some(og), Some(fg)) = (self.actual_og, self.actual_fg) {
            let (abv, calories, carbs) = from_readings(og, fg);
            values.original_gravity = round_to(og, 3);
            values.final_gravity = round_to(fg, 3);
            values.abv = abv;
            values.calories_per_12oz = calories;
            values.carbs_per_12oz = carbs;
        }
        values
    }
}
