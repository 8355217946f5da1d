//! Score a recipe against beer styles
//!
//! Each style gets a confidence from 0 to 100. Five parameters of the recipe
//! are compared with the ranges of the style, each one with a weight, and
//! some ingredients that are typical of a style add a bonus.
//!
//! A parameter inside the range scores between 70% and 100% of its weight,
//! more the closer it is to the center. A parameter outside the range, but
//! within a tolerance of 15% of the range size, scores up to 50% of its
//! weight, decreasing to 0 at the end of the tolerance.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    model::DerivedValues,
    stats,
    style::{BeerStyle, StyleRange},
    Recipe,
};

/// Max number of styles returned by [`match_styles`]
pub const MAX_MATCHES: usize = 5;

/// Fraction of the range size allowed outside of it
pub const TOLERANCE: f64 = 0.15;

/// A parameter compared with the style ranges
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    enum_map::Enum,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum StyleParameter {
    Srm,
    Abv,
    Ibu,
    Og,
    Fg,
}

impl StyleParameter {
    /// All parameters in scoring order
    pub const ALL: [StyleParameter; 5] = [
        StyleParameter::Srm,
        StyleParameter::Abv,
        StyleParameter::Ibu,
        StyleParameter::Og,
        StyleParameter::Fg,
    ];

    /// Max score of the parameter. All the weights add up to 100.
    pub fn weight(self) -> f64 {
        match self {
            StyleParameter::Srm => 30.0,
            StyleParameter::Abv | StyleParameter::Ibu => 25.0,
            StyleParameter::Og | StyleParameter::Fg => 10.0,
        }
    }

    pub fn range(self, style: &BeerStyle) -> StyleRange {
        match self {
            StyleParameter::Srm => style.srm,
            StyleParameter::Abv => style.abv,
            StyleParameter::Ibu => style.ibu,
            StyleParameter::Og => style.og,
            StyleParameter::Fg => style.fg,
        }
    }

    pub fn value(self, values: &DerivedValues) -> f64 {
        match self {
            StyleParameter::Srm => values.srm,
            StyleParameter::Abv => values.abv,
            StyleParameter::Ibu => values.ibu,
            StyleParameter::Og => values.original_gravity,
            StyleParameter::Fg => values.final_gravity,
        }
    }
}

/// Score of a single parameter value against a range
///
/// Non finite values score 0. A range with no width scores the full
/// weight when hit exactly and 0 otherwise.
pub fn parameter_score(value: f64, range: StyleRange, weight: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let size = range.size();
    if size <= 0.0 {
        return if value == range.min { weight } else { 0.0 };
    }

    if range.contains(value) {
        let from_center = (value - range.center()).abs() / (size / 2.0);
        return weight * (1.0 - 0.3 * from_center);
    }

    let band = size * TOLERANCE;
    let outside = range.distance(value);
    if outside <= band {
        weight * 0.5 * (1.0 - outside / band)
    } else {
        0.0
    }
}

/// Which styles a bonus rule applies to
#[derive(Debug, Clone, Copy)]
enum StyleSelector {
    Name(&'static str),
    Category(&'static [&'static str]),
}

impl StyleSelector {
    fn applies(self, style: &BeerStyle) -> bool {
        match self {
            StyleSelector::Name(name) => style.name == name,
            StyleSelector::Category(categories) => categories.contains(&style.category.as_str()),
        }
    }
}

/// Bonus for styles with a typical ingredient
#[derive(Debug, Clone, Copy)]
struct BonusRule {
    styles: StyleSelector,
    /// Lowercase, matched as substrings of the ingredient names
    keywords: &'static [&'static str],
    points: f64,
}

const BONUS_RULES: &[BonusRule] = &[
    BonusRule {
        styles: StyleSelector::Name("Wheat Beer"),
        keywords: &["wheat"],
        points: 10.0,
    },
    BonusRule {
        styles: StyleSelector::Category(&["Stout", "Porter"]),
        keywords: &["roasted", "black", "chocolate"],
        points: 10.0,
    },
    BonusRule {
        styles: StyleSelector::Category(&["Belgian"]),
        keywords: &["belgian", "candi"],
        points: 5.0,
    },
    BonusRule {
        styles: StyleSelector::Category(&["IPA", "Pale Ale"]),
        keywords: &["cascade", "centennial", "citra", "mosaic", "amarillo"],
        points: 5.0,
    },
];

/// Bonus points for the ingredients of a recipe
///
/// `ingredient_names` must be lowercase.
pub fn ingredient_bonus(style: &BeerStyle, ingredient_names: &[String]) -> f64 {
    BONUS_RULES
        .iter()
        .filter(|rule| rule.styles.applies(style))
        .filter(|rule| {
            ingredient_names
                .iter()
                .any(|name| rule.keywords.iter().any(|k| name.contains(k)))
        })
        .map(|rule| rule.points)
        .sum()
}

/// How well a recipe fits a style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleMatch {
    /// Name of the style
    pub style: String,
    /// From 0 to 100
    pub confidence: u8,
    /// Parameters that scored more than half their weight
    pub matches: SmallVec<[StyleParameter; 5]>,
}

/// Score a style with the derived values of a recipe
pub fn score_style(values: &DerivedValues, ingredient_names: &[String], style: &BeerStyle) -> StyleMatch {
    let mut score = 0.0;
    let mut matches = SmallVec::new();
    for param in StyleParameter::ALL {
        let weight = param.weight();
        let param_score = parameter_score(param.value(values), param.range(style), weight);
        if param_score > weight / 2.0 {
            matches.push(param);
        }
        score += param_score;
    }
    score += ingredient_bonus(style, ingredient_names);

    StyleMatch {
        style: style.name.clone(),
        confidence: confidence(score),
        matches,
    }
}

fn confidence(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    score.min(100.0).round().clamp(0.0, 100.0) as u8
}

/// Best matching styles for a recipe
///
/// Returns up to [`MAX_MATCHES`] styles sorted by confidence. Styles with
/// the same confidence keep the order they have in `styles`.
#[tracing::instrument(level = "debug", skip_all, fields(recipe = %recipe.id, styles = styles.len()))]
pub fn match_styles(recipe: &Recipe, styles: &[BeerStyle]) -> Vec<StyleMatch> {
    let values = stats::calculate(recipe);
    let names: Vec<String> = recipe
        .ingredients
        .iter()
        .map(|i| i.ingredient.name.to_lowercase())
        .collect();

    let mut matches: Vec<StyleMatch> = styles
        .iter()
        .map(|style| score_style(&values, &names, style))
        .collect();
    // stable
    matches.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    matches.truncate(MAX_MATCHES);
    tracing::debug!(top = ?matches.first().map(|m| &m.style), "styles matched");
    matches
}
