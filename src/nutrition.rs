//! Calories and carbohydrates in a 12 oz serving
//!
//! Both work from a pair of gravities, estimated or measured.

/// Degrees Plato of a specific gravity
pub fn gravity_to_plato(gravity: f64) -> f64 {
    (gravity - 1.0) * 1000.0 / 4.0
}

/// Real extract in gravity units
pub fn real_extract(og: f64, fg: f64) -> f64 {
    0.1808 * og + 0.8192 * fg - 1.0004
}

/// Calories in 12 oz of beer
pub fn calories_per_12oz(og: f64, fg: f64, abv: f64) -> f64 {
    ((6.9 * abv) + 4.0 * (real_extract(og, fg) - 0.1)) * fg * 3.55
}

/// Grams of carbohydrates in 12 oz of beer
pub fn carbs_per_12oz(og: f64, fg: f64) -> f64 {
    let real_extract_plato = 0.1808 * gravity_to_plato(og) + 0.8192 * gravity_to_plato(fg);
    real_extract_plato * 3.55
}
