//! Mass conversions for recipe quantities
//!
//! Gravity and color formulas work in pounds and bitterness works in
//! ounces. A [`Unit::Packet`] is a count, it has no mass, so every
//! conversion from it returns [`None`].

use serde::{Deserialize, Serialize};

pub const OUNCES_PER_POUND: f64 = 16.0;
pub const GRAMS_PER_POUND: f64 = 453.592;
pub const GRAMS_PER_OUNCE: f64 = 28.3495;
pub const POUNDS_PER_KILOGRAM: f64 = 2.20462;

/// Unit of a recipe ingredient quantity
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    enum_map::Enum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Unit {
    Lb,
    Oz,
    G,
    Kg,
    Packet,
}

/// What a [`Unit`] measures
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, strum::Display, enum_map::Enum,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum PhysicalQuantity {
    Mass,
    Count,
}

impl Unit {
    /// All the units with a mass conversion
    pub const MASS: [Unit; 4] = [Unit::Lb, Unit::Oz, Unit::G, Unit::Kg];

    pub fn physical_quantity(self) -> PhysicalQuantity {
        match self {
            Unit::Lb | Unit::Oz | Unit::G | Unit::Kg => PhysicalQuantity::Mass,
            Unit::Packet => PhysicalQuantity::Count,
        }
    }

    /// Check if the unit can be converted to pounds or ounces
    pub fn is_mass(self) -> bool {
        self.physical_quantity() == PhysicalQuantity::Mass
    }

    /// Pounds in one of this unit
    ///
    /// ```
    /// # use brewcraft::convert::Unit;
    /// assert_eq!(Unit::Kg.pounds_ratio(), Some(2.20462));
    /// assert_eq!(Unit::Packet.pounds_ratio(), None);
    /// ```
    pub fn pounds_ratio(self) -> Option<f64> {
        match self {
            Unit::Lb => Some(1.0),
            Unit::Oz => Some(1.0 / OUNCES_PER_POUND),
            Unit::G => Some(1.0 / GRAMS_PER_POUND),
            Unit::Kg => Some(POUNDS_PER_KILOGRAM),
            Unit::Packet => None,
        }
    }
}

/// Convert an amount to pounds
///
/// Returns [`None`] for units without mass. Callers only convert
/// mass-bearing ingredients, so this is not an error.
pub fn to_pounds(amount: f64, unit: Unit) -> Option<f64> {
    match unit {
        Unit::Lb => Some(amount),
        Unit::Oz => Some(amount / OUNCES_PER_POUND),
        Unit::G => Some(amount / GRAMS_PER_POUND),
        Unit::Kg => Some(amount * POUNDS_PER_KILOGRAM),
        Unit::Packet => None,
    }
}

/// Inverse of [`to_pounds`]
pub fn from_pounds(pounds: f64, unit: Unit) -> Option<f64> {
    match unit {
        Unit::Lb => Some(pounds),
        Unit::Oz => Some(pounds * OUNCES_PER_POUND),
        Unit::G => Some(pounds * GRAMS_PER_POUND),
        Unit::Kg => Some(pounds / POUNDS_PER_KILOGRAM),
        Unit::Packet => None,
    }
}

/// Convert an amount to ounces
///
/// Grams use the direct ounce factor instead of going through pounds.
pub fn to_ounces(amount: f64, unit: Unit) -> Option<f64> {
    match unit {
        Unit::Lb => Some(amount * OUNCES_PER_POUND),
        Unit::Oz => Some(amount),
        Unit::G => Some(amount / GRAMS_PER_OUNCE),
        Unit::Kg => Some(amount * POUNDS_PER_KILOGRAM * OUNCES_PER_POUND),
        Unit::Packet => None,
    }
}
