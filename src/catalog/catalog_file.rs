//! Configuration data structures used in [`CatalogBuilder`](super::CatalogBuilder)

use serde::{Deserialize, Serialize};

use crate::{model::Ingredient, style::BeerStyle};

/// A layer of catalog data used in [`CatalogBuilder`](super::CatalogBuilder)
///
/// This structure is designed for deserializing [TOML](https://toml.io/en/),
/// but you can try other formats supported by serde.
///
/// ```toml
/// [[style]]
/// name = "Blonde Ale"
/// category = "Pale Ale"
/// og = [1.038, 1.054]
/// fg = [1.008, 1.013]
/// abv = [3.8, 5.5]
/// ibu = [15.0, 28.0]
/// srm = [3.0, 6.0]
///
/// [[ingredient]]
/// id = "m1"
/// name = "2-Row Pale Malt"
/// type = "malt"
/// lovibond = 1.8
/// ppg = 37.0
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    /// Beer styles, in matching order
    #[serde(default)]
    pub style: Vec<BeerStyle>,
    /// Default ingredients, in display order
    #[serde(default)]
    pub ingredient: Vec<Ingredient>,
}

impl CatalogFile {
    /// Parse a TOML catalog layer
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Join another layer after this one
    pub fn extend(&mut self, other: CatalogFile) {
        self.style.extend(other.style);
        self.ingredient.extend(other.ingredient);
    }
}

#[cfg(feature = "bundled_catalog")]
const BUNDLED_STYLES: &str = include_str!("../../styles.toml");
#[cfg(feature = "bundled_catalog")]
const BUNDLED_INGREDIENTS: &str = include_str!("../../ingredients.toml");

#[cfg(feature = "bundled_catalog")]
impl CatalogFile {
    /// Get the bundled catalog data
    ///
    /// This is only available with the `bundled_catalog` feature.
    pub fn bundled() -> Self {
        let mut file = Self::from_toml(BUNDLED_STYLES).expect("bundled styles.toml is valid");
        file.extend(Self::from_toml(BUNDLED_INGREDIENTS).expect("bundled ingredients.toml is valid"));
        file
    }
}
