//! Priming sugar for bottle conditioning

use serde::{Deserialize, Serialize};

use crate::style::StyleRange;

/// Grams in an ounce, as used for priming sugar
pub const GRAMS_PER_OUNCE: f64 = 28.35;

/// Fermentation temperature assumed when none is given, in Fahrenheit
pub const DEFAULT_TEMPERATURE: f64 = 68.0;

/// Sugar used to prime
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    enum_map::Enum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sugar {
    #[default]
    Dextrose,
    Table,
    Brown,
    Turbinado,
    Belgian,
    Dme,
    Honey,
    Maple,
    Molasses,
    Agave,
}

impl Sugar {
    pub fn name(self) -> &'static str {
        match self {
            Sugar::Dextrose => "Corn Sugar (Dextrose)",
            Sugar::Table => "Table Sugar (Sucrose)",
            Sugar::Brown => "Brown Sugar",
            Sugar::Turbinado => "Turbinado/Raw Sugar",
            Sugar::Belgian => "Belgian Candi Sugar",
            Sugar::Dme => "Dry Malt Extract",
            Sugar::Honey => "Honey",
            Sugar::Maple => "Maple Syrup",
            Sugar::Molasses => "Molasses",
            Sugar::Agave => "Agave Nectar",
        }
    }

    /// Weight of this sugar that gives the same CO2 as one of dextrose
    pub fn dextrose_factor(self) -> f64 {
        match self {
            Sugar::Dextrose => 1.0,
            Sugar::Table | Sugar::Brown | Sugar::Turbinado | Sugar::Belgian => 0.91,
            Sugar::Dme => 1.33,
            Sugar::Honey | Sugar::Maple => 1.25,
            Sugar::Molasses => 1.11,
            Sugar::Agave => 1.18,
        }
    }
}

/// CO2 volumes left in the beer after fermenting at `fahrenheit`
pub fn residual_co2(fahrenheit: f64) -> f64 {
    let celsius = (fahrenheit - 32.0) * 5.0 / 9.0;
    3.0378 - 0.050062 * celsius + 0.00026555 * celsius * celsius
}

/// Amount of priming sugar
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimingSugar {
    pub ounces: f64,
    pub grams: f64,
    /// CO2 volumes the sugar has to add
    pub co2_needed: f64,
    /// CO2 volumes already in the beer
    pub residual_co2: f64,
}

/// Sugar needed to reach `target_co2` volumes in a batch of `batch_size`
/// gallons fermented at `fahrenheit`
///
/// When the beer already has enough CO2, or the batch size is not positive,
/// the amounts are zero.
pub fn priming_sugar(batch_size: f64, target_co2: f64, fahrenheit: f64, sugar: Sugar) -> PrimingSugar {
    let residual = residual_co2(fahrenheit);
    let needed = target_co2 - residual;
    if needed.is_nan() || needed <= 0.0 || batch_size.is_nan() || batch_size <= 0.0 {
        return PrimingSugar {
            co2_needed: needed,
            residual_co2: residual,
            ..Default::default()
        };
    }
    let dextrose = needed * batch_size * 0.5;
    let ounces = dextrose * sugar.dextrose_factor();
    PrimingSugar {
        ounces,
        grams: ounces * GRAMS_PER_OUNCE,
        co2_needed: needed,
        residual_co2: residual,
    }
}

/// Usual carbonation of a family of styles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonationLevel {
    pub family: &'static str,
    /// CO2 volumes
    pub volumes: StyleRange,
}

/// Reference carbonation levels
pub const CARBONATION_LEVELS: &[CarbonationLevel] = &[
    CarbonationLevel {
        family: "British Ales",
        volumes: StyleRange::new(1.5, 2.0),
    },
    CarbonationLevel {
        family: "American Ales",
        volumes: StyleRange::new(2.2, 2.6),
    },
    CarbonationLevel {
        family: "European Lagers",
        volumes: StyleRange::new(2.4, 2.6),
    },
    CarbonationLevel {
        family: "Belgian Ales",
        volumes: StyleRange::new(2.0, 4.5),
    },
    CarbonationLevel {
        family: "Wheat Beers",
        volumes: StyleRange::new(3.0, 4.5),
    },
    CarbonationLevel {
        family: "Lambics",
        volumes: StyleRange::new(2.4, 4.5),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use strum::IntoEnumIterator;
    use test_case::test_case;

    #[test]
    fn residual() {
        assert_abs_diff_eq!(residual_co2(68.0), 2.14278, epsilon = 1e-9);
        assert!(residual_co2(40.0) > residual_co2(75.0));
    }

    #[test]
    fn dextrose_for_five_gallons() {
        let sugar = priming_sugar(5.0, 2.4, 68.0, Sugar::Dextrose);
        assert_abs_diff_eq!(sugar.co2_needed, 0.25722, epsilon = 1e-9);
        assert_abs_diff_eq!(sugar.ounces, 0.64305, epsilon = 1e-9);
        assert_abs_diff_eq!(sugar.grams, 18.2304675, epsilon = 1e-6);
    }

    #[test_case(Sugar::Table => 0.91 ; "table")]
    #[test_case(Sugar::Dme => 1.33 ; "dme")]
    #[test_case(Sugar::Honey => 1.25 ; "honey")]
    fn scaled_by_sugar(sugar: Sugar) -> f64 {
        let dextrose = priming_sugar(5.0, 2.6, 65.0, Sugar::Dextrose).ounces;
        let other = priming_sugar(5.0, 2.6, 65.0, sugar).ounces;
        (other / dextrose * 100.0).round() / 100.0
    }

    #[test_case(5.0, 1.8 ; "already carbonated")]
    #[test_case(0.0, 2.4 ; "no batch")]
    #[test_case(-5.0, 2.4 ; "negative batch")]
    fn no_sugar(batch_size: f64, target: f64) {
        let sugar = priming_sugar(batch_size, target, 68.0, Sugar::Dextrose);
        assert_eq!(sugar.ounces, 0.0);
        assert_eq!(sugar.grams, 0.0);
    }

    #[test]
    fn sugars() {
        assert_eq!(Sugar::iter().count(), 10);
        assert_eq!(Sugar::default(), Sugar::Dextrose);
        assert_eq!("dme".parse::<Sugar>().unwrap(), Sugar::Dme);
        assert_eq!(Sugar::Belgian.name(), "Belgian Candi Sugar");
    }

    #[test]
    fn levels() {
        assert_eq!(CARBONATION_LEVELS.len(), 6);
        let wheat = CARBONATION_LEVELS
            .iter()
            .find(|l| l.family == "Wheat Beers")
            .unwrap();
        assert!(wheat.volumes.contains(3.5));
    }
}
