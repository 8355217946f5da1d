//! Recipe representation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::convert::{self, Unit};

/// Prefix of the ids of user defined ingredients
pub const CUSTOM_ID_PREFIX: &str = "custom-";

/// Kind of ingredient
///
/// The type of an ingredient never changes after creation.
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
pub enum IngredientType {
    Malt,
    Hop,
    Yeast,
    Adjunct,
}

impl IngredientType {
    /// All types in display order
    pub const ALL: [IngredientType; 4] = [
        IngredientType::Malt,
        IngredientType::Hop,
        IngredientType::Yeast,
        IngredientType::Adjunct,
    ];

    /// Label for a group of ingredients of this type
    pub fn group_label(self) -> &'static str {
        match self {
            IngredientType::Malt => "Malts & Grains",
            IngredientType::Hop => "Hops",
            IngredientType::Yeast => "Yeast",
            IngredientType::Adjunct => "Adjuncts & Other",
        }
    }

    /// Unit usually used when adding an ingredient of this type
    pub fn default_unit(self) -> Unit {
        match self {
            IngredientType::Malt => Unit::Lb,
            IngredientType::Hop | IngredientType::Adjunct => Unit::Oz,
            IngredientType::Yeast => Unit::Packet,
        }
    }
}

/// Yeast flocculation tier
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
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Flocculation {
    Low,
    Medium,
    High,
}

/// Fermentation temperature range in Fahrenheit
///
/// Serialized as a `[min, max]` pair. The bounds are reordered on
/// creation so `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct TempRange {
    min: f64,
    max: f64,
}

impl TempRange {
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, fahrenheit: f64) -> bool {
        (self.min..=self.max).contains(&fahrenheit)
    }
}

impl From<(f64, f64)> for TempRange {
    fn from((a, b): (f64, f64)) -> Self {
        Self::new(a, b)
    }
}

impl From<TempRange> for (f64, f64) {
    fn from(value: TempRange) -> Self {
        (value.min, value.max)
    }
}

/// Type tag and type specific attributes of an [`Ingredient`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IngredientProperties {
    Malt {
        /// Color contribution
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lovibond: Option<f64>,
        /// Points per pound per gallon (extract potential)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ppg: Option<f64>,
    },
    Hop {
        /// Alpha acid percentage
        #[serde(
            default,
            rename = "alphaAcid",
            skip_serializing_if = "Option::is_none"
        )]
        alpha_acid: Option<f64>,
    },
    Yeast {
        /// Expected attenuation percentage
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attenuation: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flocculation: Option<Flocculation>,
        #[serde(
            default,
            rename = "tempRange",
            skip_serializing_if = "Option::is_none"
        )]
        temp_range: Option<TempRange>,
    },
    Adjunct,
}

impl IngredientProperties {
    pub fn ingredient_type(&self) -> IngredientType {
        match self {
            IngredientProperties::Malt { .. } => IngredientType::Malt,
            IngredientProperties::Hop { .. } => IngredientType::Hop,
            IngredientProperties::Yeast { .. } => IngredientType::Yeast,
            IngredientProperties::Adjunct => IngredientType::Adjunct,
        }
    }

    /// Properties of the given type without any attribute set
    pub fn empty(ty: IngredientType) -> Self {
        match ty {
            IngredientType::Malt => IngredientProperties::Malt {
                lovibond: None,
                ppg: None,
            },
            IngredientType::Hop => IngredientProperties::Hop { alpha_acid: None },
            IngredientType::Yeast => IngredientProperties::Yeast {
                attenuation: None,
                flocculation: None,
                temp_range: None,
            },
            IngredientType::Adjunct => IngredientProperties::Adjunct,
        }
    }
}

/// A catalog ingredient
///
/// Recipes hold their own copy of the ingredient, so editing the catalog
/// later does not change existing recipes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique in the catalog
    pub id: String,
    /// Display name
    pub name: String,
    /// Type and its attributes
    #[serde(flatten)]
    pub properties: IngredientProperties,
}

impl Ingredient {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        properties: IngredientProperties,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            properties,
        }
    }

    pub fn malt(id: impl Into<String>, name: impl Into<String>, lovibond: f64, ppg: f64) -> Self {
        Self::new(
            id,
            name,
            IngredientProperties::Malt {
                lovibond: Some(lovibond),
                ppg: Some(ppg),
            },
        )
    }

    pub fn hop(id: impl Into<String>, name: impl Into<String>, alpha_acid: f64) -> Self {
        Self::new(
            id,
            name,
            IngredientProperties::Hop {
                alpha_acid: Some(alpha_acid),
            },
        )
    }

    pub fn yeast(id: impl Into<String>, name: impl Into<String>, attenuation: u32) -> Self {
        Self::new(
            id,
            name,
            IngredientProperties::Yeast {
                attenuation: Some(attenuation),
                flocculation: None,
                temp_range: None,
            },
        )
    }

    pub fn adjunct(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, IngredientProperties::Adjunct)
    }

    /// Set the flocculation of a yeast. Does nothing for other types.
    pub fn with_flocculation(mut self, value: Flocculation) -> Self {
        if let IngredientProperties::Yeast { flocculation, .. } = &mut self.properties {
            *flocculation = Some(value);
        }
        self
    }

    /// Set the temperature range of a yeast. Does nothing for other types.
    pub fn with_temp_range(mut self, min: f64, max: f64) -> Self {
        if let IngredientProperties::Yeast { temp_range, .. } = &mut self.properties {
            *temp_range = Some(TempRange::new(min, max));
        }
        self
    }

    pub fn ingredient_type(&self) -> IngredientType {
        self.properties.ingredient_type()
    }

    /// Check if the ingredient was defined by the user
    pub fn is_custom(&self) -> bool {
        self.id.starts_with(CUSTOM_ID_PREFIX)
    }

    pub fn lovibond(&self) -> Option<f64> {
        match self.properties {
            IngredientProperties::Malt { lovibond, .. } => lovibond,
            _ => None,
        }
    }

    pub fn ppg(&self) -> Option<f64> {
        match self.properties {
            IngredientProperties::Malt { ppg, .. } => ppg,
            _ => None,
        }
    }

    pub fn alpha_acid(&self) -> Option<f64> {
        match self.properties {
            IngredientProperties::Hop { alpha_acid } => alpha_acid,
            _ => None,
        }
    }

    pub fn attenuation(&self) -> Option<u32> {
        match self.properties {
            IngredientProperties::Yeast { attenuation, .. } => attenuation,
            _ => None,
        }
    }

    pub fn flocculation(&self) -> Option<Flocculation> {
        match self.properties {
            IngredientProperties::Yeast { flocculation, .. } => flocculation,
            _ => None,
        }
    }

    pub fn temp_range(&self) -> Option<TempRange> {
        match self.properties {
            IngredientProperties::Yeast { temp_range, .. } => temp_range,
            _ => None,
        }
    }
}

/// When a hop is added
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
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum HopUse {
    Boil,
    Whirlpool,
    DryHop,
}

/// Typed view of the hop fields of a [`RecipeIngredient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopSchedule {
    Boil { minutes: Option<u32> },
    Whirlpool,
    DryHop { days: Option<u32> },
}

/// An ingredient used in a recipe
///
/// The hop fields are only meaningful when the ingredient is a hop. Use
/// [`RecipeIngredient::hop_schedule`] to read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    /// Copy of the catalog ingredient at the time it was added
    pub ingredient: Ingredient,
    pub amount: f64,
    pub unit: Unit,
    /// Minutes, only for boil additions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boil_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hop_use: Option<HopUse>,
    /// Alpha acid of this batch, overrides the catalog value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_alpha_acid: Option<f64>,
    /// Days, only for dry hop additions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_hop_days: Option<u32>,
}

impl RecipeIngredient {
    pub fn new(ingredient: Ingredient, amount: f64, unit: Unit) -> Self {
        Self {
            ingredient,
            amount,
            unit,
            boil_time: None,
            hop_use: None,
            custom_alpha_acid: None,
            dry_hop_days: None,
        }
    }

    /// A hop added to the boil for `minutes`
    pub fn boil(ingredient: Ingredient, amount: f64, unit: Unit, minutes: u32) -> Self {
        Self {
            boil_time: Some(minutes),
            hop_use: Some(HopUse::Boil),
            ..Self::new(ingredient, amount, unit)
        }
    }

    pub fn whirlpool(ingredient: Ingredient, amount: f64, unit: Unit) -> Self {
        Self {
            hop_use: Some(HopUse::Whirlpool),
            ..Self::new(ingredient, amount, unit)
        }
    }

    pub fn dry_hop(ingredient: Ingredient, amount: f64, unit: Unit, days: u32) -> Self {
        Self {
            hop_use: Some(HopUse::DryHop),
            dry_hop_days: Some(days),
            ..Self::new(ingredient, amount, unit)
        }
    }

    /// Override the catalog alpha acid for this batch
    pub fn with_alpha_acid(mut self, alpha_acid: f64) -> Self {
        self.custom_alpha_acid = Some(alpha_acid);
        self
    }

    pub fn ingredient_type(&self) -> IngredientType {
        self.ingredient.ingredient_type()
    }

    /// Amount in pounds, [`None`] if the unit has no mass
    pub fn pounds(&self) -> Option<f64> {
        convert::to_pounds(self.amount, self.unit)
    }

    /// Amount in ounces, [`None`] if the unit has no mass
    pub fn ounces(&self) -> Option<f64> {
        convert::to_ounces(self.amount, self.unit)
    }

    /// Hop schedule of the addition
    ///
    /// Always [`None`] for non hop ingredients, whatever the hop fields say.
    pub fn hop_schedule(&self) -> Option<HopSchedule> {
        if self.ingredient_type() != IngredientType::Hop {
            return None;
        }
        let schedule = match self.hop_use? {
            HopUse::Boil => HopSchedule::Boil {
                minutes: self.boil_time,
            },
            HopUse::Whirlpool => HopSchedule::Whirlpool,
            HopUse::DryHop => HopSchedule::DryHop {
                days: self.dry_hop_days,
            },
        };
        Some(schedule)
    }

    /// Alpha acid used for bitterness
    ///
    /// The batch override wins over the catalog value. A value of zero
    /// counts as missing. Always [`None`] for non hop ingredients.
    pub fn alpha_acid(&self) -> Option<f64> {
        if self.ingredient_type() != IngredientType::Hop {
            return None;
        }
        self.custom_alpha_acid
            .filter(|&aa| aa != 0.0)
            .or_else(|| self.ingredient.alpha_acid().filter(|&aa| aa != 0.0))
    }
}

/// A step of the brewing process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewingStep {
    pub id: String,
    pub name: String,
    /// Minutes
    pub duration: u32,
    /// Fahrenheit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl BrewingStep {
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            temperature: None,
            notes: String::new(),
            completed: false,
            timestamp: None,
        }
    }

    /// Mark the step as done at `at`
    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.completed = true;
        self.timestamp = Some(at);
    }

    /// Undo [`Self::complete`]
    pub fn reopen(&mut self) {
        self.completed = false;
        self.timestamp = None;
    }
}

/// A mash rest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MashStep {
    pub id: String,
    pub name: String,
    /// Fahrenheit
    pub temperature: f64,
    /// Minutes
    pub duration: u32,
}

impl MashStep {
    pub fn new(id: impl Into<String>, name: impl Into<String>, temperature: f64, duration: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            temperature,
            duration,
        }
    }

    /// The standard mash rests
    ///
    /// The ids are empty, callers assign one when adding the step to a recipe.
    pub fn common() -> Vec<MashStep> {
        [
            ("Single Infusion", 152.0, 60),
            ("Mash Out", 168.0, 10),
            ("Protein Rest", 122.0, 20),
            ("Beta Amylase Rest", 145.0, 30),
            ("Alpha Amylase Rest", 158.0, 30),
        ]
        .into_iter()
        .map(|(name, temperature, duration)| MashStep::new("", name, temperature, duration))
        .collect()
    }
}

/// Packaging format of a final yield
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
)]
pub enum YieldKind {
    #[serde(rename = "gallons")]
    #[strum(serialize = "gallons")]
    Gallons,
    #[serde(rename = "bottles-22oz")]
    #[strum(serialize = "bottles-22oz")]
    Bottles22oz,
    #[serde(rename = "bottles-12oz")]
    #[strum(serialize = "bottles-12oz")]
    Bottles12oz,
    #[serde(rename = "cornelius-keg")]
    #[strum(serialize = "cornelius-keg")]
    CorneliusKeg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: YieldKind,
    pub amount: f64,
}

/// Values derived from the ingredients of a recipe
///
/// Created by [`calculate`](crate::stats::calculate), already rounded for
/// display.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedValues {
    pub original_gravity: f64,
    pub final_gravity: f64,
    /// Percentage
    pub abv: f64,
    pub ibu: f64,
    pub srm: f64,
    #[serde(rename = "caloriesPer12oz")]
    pub calories_per_12oz: f64,
    /// Grams
    #[serde(rename = "carbsPer12oz")]
    pub carbs_per_12oz: f64,
}

/// A complete recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Gallons
    pub batch_size: f64,
    /// Minutes
    pub boil_time: u32,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub steps: Vec<BrewingStep>,
    #[serde(default)]
    pub mash_steps: Vec<MashStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brew_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yeast_pitch_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottling_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub final_yield: Vec<YieldEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_notes: Option<String>,
    /// Snapshot of the derived values taken when the recipe was saved
    ///
    /// Stored flat next to the other recipe fields. A document missing any
    /// of the seven values has no snapshot.
    #[serde(flatten)]
    pub derived: Option<DerivedValues>,
    /// Measured original gravity
    #[serde(default, rename = "actualOG", skip_serializing_if = "Option::is_none")]
    pub actual_og: Option<f64>,
    /// Measured final gravity
    #[serde(default, rename = "actualFG", skip_serializing_if = "Option::is_none")]
    pub actual_fg: Option<f64>,
    /// ABV from the measured gravities, set on save when both are present
    #[serde(default, rename = "actualABV", skip_serializing_if = "Option::is_none")]
    pub actual_abv: Option<f64>,
    /// Recipe this one was cloned from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_recipe_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_recipe_name: Option<String>,
    /// Recipes cloned from this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clone_ids: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reasons a recipe is not ready to be saved
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecipeError {
    #[error("Recipe name is empty")]
    EmptyName,
    #[error("Recipe has no ingredients")]
    NoIngredients,
    #[error("Batch size must be positive, got {0}")]
    InvalidBatchSize(f64),
    #[error("Boil time must be positive")]
    InvalidBoilTime,
}

impl Recipe {
    /// New empty recipe of 5 gallons with a 60 minute boil
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            style: None,
            batch_size: 5.0,
            boil_time: 60,
            ingredients: Vec::new(),
            steps: Vec::new(),
            mash_steps: Vec::new(),
            brew_date: Some(now),
            yeast_pitch_date: None,
            bottling_date: None,
            final_yield: Vec::new(),
            process_notes: None,
            derived: None,
            actual_og: None,
            actual_fg: None,
            actual_abv: None,
            parent_recipe_id: None,
            parent_recipe_name: None,
            clone_ids: Vec::new(),
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_batch_size(mut self, gallons: f64) -> Self {
        self.batch_size = gallons;
        self
    }

    pub fn with_boil_time(mut self, minutes: u32) -> Self {
        self.boil_time = minutes;
        self
    }

    pub fn with_ingredient(mut self, ingredient: RecipeIngredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Checks done before saving a recipe
    ///
    /// The calculations never call this, they accept any recipe.
    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.name.trim().is_empty() {
            return Err(RecipeError::EmptyName);
        }
        if self.ingredients.is_empty() {
            return Err(RecipeError::NoIngredients);
        }
        if self.batch_size.is_nan() || self.batch_size <= 0.0 {
            return Err(RecipeError::InvalidBatchSize(self.batch_size));
        }
        if self.boil_time == 0 {
            return Err(RecipeError::InvalidBoilTime);
        }
        Ok(())
    }

    /// Iterator over the ingredients of the given type, in recipe order
    pub fn ingredients_of(&self, ty: IngredientType) -> impl Iterator<Item = &RecipeIngredient> {
        self.ingredients
            .iter()
            .filter(move |ri| ri.ingredient_type() == ty)
    }

    /// First yeast of the recipe
    pub fn first_yeast(&self) -> Option<&Ingredient> {
        self.ingredients_of(IngredientType::Yeast)
            .next()
            .map(|ri| &ri.ingredient)
    }

    /// Check if the recipe was cloned from another one
    pub fn is_clone(&self) -> bool {
        self.parent_recipe_id.is_some()
    }

    /// Flip the favorite mark, returns the new value
    pub fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.is_favorite
    }
}
