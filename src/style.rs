//! Beer style definitions

use serde::{Deserialize, Serialize};

/// Inclusive range of values of a style parameter
///
/// Serialized as a `[min, max]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct StyleRange {
    pub min: f64,
    pub max: f64,
}

impl StyleRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    /// Distance from `value` to the nearest bound, `0.0` when inside
    pub fn distance(&self, value: f64) -> f64 {
        if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }

    pub(crate) fn is_inverted(&self) -> bool {
        self.min.is_nan() || self.max.is_nan() || self.min > self.max
    }
}

impl From<(f64, f64)> for StyleRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<StyleRange> for (f64, f64) {
    fn from(value: StyleRange) -> Self {
        (value.min, value.max)
    }
}

/// A beer style of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeerStyle {
    /// Unique in the catalog
    pub name: String,
    pub category: String,
    pub og: StyleRange,
    pub fg: StyleRange,
    /// Percentage
    pub abv: StyleRange,
    pub ibu: StyleRange,
    pub srm: StyleRange,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(5.0 => true ; "inside")]
    #[test_case(4.5 => true ; "lower bound")]
    #[test_case(6.2 => true ; "upper bound")]
    #[test_case(4.4 => false ; "below")]
    #[test_case(7.0 => false ; "above")]
    fn contains(value: f64) -> bool {
        StyleRange::new(4.5, 6.2).contains(value)
    }

    #[test]
    fn geometry() {
        let range = StyleRange::new(30.0, 50.0);
        assert_eq!(range.center(), 40.0);
        assert_eq!(range.size(), 20.0);
        assert_eq!(range.distance(35.0), 0.0);
        assert_eq!(range.distance(25.0), 5.0);
        assert_eq!(range.distance(53.0), 3.0);
        assert!(!range.is_inverted());
        assert!(StyleRange::new(5.0, 4.0).is_inverted());
    }

    #[test]
    fn style_from_toml() {
        let style: BeerStyle = toml::from_str(
            r#"
            name = "American Pale Ale"
            category = "Pale Ale"
            og = [1.045, 1.060]
            fg = [1.010, 1.015]
            abv = [4.5, 6.2]
            ibu = [30.0, 50.0]
            srm = [5.0, 10.0]
            "#,
        )
        .unwrap();
        assert_eq!(style.ibu, StyleRange::new(30.0, 50.0));
        assert_eq!(style.description, "");
    }
}
