//! Copies and family relations between recipes
//!
//! A clone remembers the recipe it was cloned from (its parent) and the
//! parent keeps the ids of its clones. A plain duplicate has no relation
//! with the original.
//!
//! The functions without a store work on values and return the changed
//! recipes. The `*_in` variants load what they need from a [`Store`] and
//! save every recipe they change.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    model::Recipe,
    store::{Store, StoreError},
};

/// Generate a new recipe id
pub fn new_recipe_id() -> String {
    format!("recipe-{}", Uuid::new_v4().simple())
}

/// Independent copy of a recipe
///
/// The copy gets a new id, " (Copy)" after the name and today as brew
/// date. Brewing data of the original batch (pitch and bottling dates,
/// measured gravities), family links and the favorite mark are not copied.
pub fn duplicate(recipe: &Recipe) -> Recipe {
    let now = Utc::now();
    Recipe {
        id: new_recipe_id(),
        name: format!("{} (Copy)", recipe.name),
        brew_date: Some(now),
        yeast_pitch_date: None,
        bottling_date: None,
        actual_og: None,
        actual_fg: None,
        actual_abv: None,
        parent_recipe_id: None,
        parent_recipe_name: None,
        clone_ids: Vec::new(),
        is_favorite: false,
        created_at: now,
        updated_at: now,
        ..recipe.clone()
    }
}

/// Clone a recipe, linking the clone and the parent
///
/// The clone gets a new id, " (Clone)" after the name and today as brew
/// date. The parent gets the id of the clone added to its clones.
pub fn clone_recipe(parent: &mut Recipe) -> Recipe {
    let now = Utc::now();
    let clone = Recipe {
        id: new_recipe_id(),
        name: format!("{} (Clone)", parent.name),
        brew_date: Some(now),
        parent_recipe_id: Some(parent.id.clone()),
        parent_recipe_name: Some(parent.name.clone()),
        clone_ids: Vec::new(),
        created_at: now,
        updated_at: now,
        ..parent.clone()
    };
    parent.clone_ids.push(clone.id.clone());
    parent.updated_at = now;
    clone
}

/// Result of [`promote_to_master`]
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    /// The clone, now without parent
    pub master: Recipe,
    /// The old parent, now a clone of `master`
    pub demoted: Recipe,
    /// Ids of the other clones of the old parent. They have to be
    /// re-parented with [`reparent`].
    pub siblings: Vec<String>,
}

/// Make a clone the master of its family
///
/// The old parent becomes a clone of the promoted recipe, and the promoted
/// recipe gets the old parent and all its other clones as clones.
pub fn promote_to_master(clone: &Recipe, parent: &Recipe) -> Result<Promotion, LifecycleError> {
    match clone.parent_recipe_id.as_deref() {
        None => {
            return Err(LifecycleError::NotAClone {
                id: clone.id.clone(),
            })
        }
        Some(parent_id) if parent_id != parent.id => {
            return Err(LifecycleError::WrongParent {
                id: clone.id.clone(),
                expected: parent_id.to_string(),
                found: parent.id.clone(),
            })
        }
        Some(_) => {}
    }

    let now = Utc::now();
    let siblings: Vec<String> = parent
        .clone_ids
        .iter()
        .filter(|id| **id != clone.id)
        .cloned()
        .collect();

    let mut clone_ids = Vec::with_capacity(siblings.len() + 1);
    clone_ids.push(parent.id.clone());
    clone_ids.extend(siblings.iter().cloned());

    let master = Recipe {
        parent_recipe_id: None,
        parent_recipe_name: None,
        clone_ids,
        updated_at: now,
        ..clone.clone()
    };
    let demoted = Recipe {
        parent_recipe_id: Some(clone.id.clone()),
        parent_recipe_name: Some(clone.name.clone()),
        clone_ids: Vec::new(),
        updated_at: now,
        ..parent.clone()
    };

    Ok(Promotion {
        master,
        demoted,
        siblings,
    })
}

/// Point a clone to a new parent
pub fn reparent(clone: &mut Recipe, master: &Recipe) {
    clone.parent_recipe_id = Some(master.id.clone());
    clone.parent_recipe_name = Some(master.name.clone());
    clone.updated_at = Utc::now();
}

/// Errors of the recipe lifecycle operations
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Recipe not found: {id}")]
    RecipeNotFound { id: String },

    #[error("Recipe '{id}' is not a clone")]
    NotAClone { id: String },

    #[error("Recipe '{id}' is a clone of '{expected}', not of '{found}'")]
    WrongParent {
        id: String,
        expected: String,
        found: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn load<S: Store<Recipe>>(store: &S, id: &str) -> Result<Recipe, LifecycleError> {
    store
        .get(id)?
        .ok_or_else(|| LifecycleError::RecipeNotFound { id: id.to_string() })
}

/// Recalculate the derived values and save a recipe
pub fn save_recipe<S: Store<Recipe>>(store: &mut S, mut recipe: Recipe) -> Result<Recipe, LifecycleError> {
    recipe.refresh_derived();
    Ok(store.save(recipe)?)
}

/// [`duplicate`] a stored recipe and save the copy
pub fn duplicate_in<S: Store<Recipe>>(store: &mut S, id: &str) -> Result<Recipe, LifecycleError> {
    let copy = duplicate(&load(store, id)?);
    Ok(store.save(copy)?)
}

/// [`clone_recipe`] a stored recipe and save both
pub fn clone_in<S: Store<Recipe>>(store: &mut S, id: &str) -> Result<Recipe, LifecycleError> {
    let mut parent = load(store, id)?;
    let clone = clone_recipe(&mut parent);
    let clone = store.save(clone)?;
    store.save(parent)?;
    Ok(clone)
}

/// [`promote_to_master`] a stored clone
///
/// Saves the promoted recipe, the demoted parent and every sibling still in
/// the store. Missing siblings are skipped. Returns the promoted recipe.
pub fn promote_in<S: Store<Recipe>>(store: &mut S, clone_id: &str) -> Result<Recipe, LifecycleError> {
    let clone = load(store, clone_id)?;
    let parent_id = clone
        .parent_recipe_id
        .clone()
        .ok_or_else(|| LifecycleError::NotAClone {
            id: clone_id.to_string(),
        })?;
    let parent = load(store, &parent_id)?;

    let Promotion {
        master,
        demoted,
        siblings,
    } = promote_to_master(&clone, &parent)?;

    let master = store.save(master)?;
    store.save(demoted)?;
    for sibling_id in siblings {
        let Some(mut sibling) = store.get(&sibling_id)? else {
            tracing::debug!(id = %sibling_id, "sibling clone not found, skipped");
            continue;
        };
        reparent(&mut sibling, &master);
        store.save(sibling)?;
    }
    Ok(master)
}

/// Toggle the favorite mark of a stored recipe, returns the new value
pub fn toggle_favorite_in<S: Store<Recipe>>(store: &mut S, id: &str) -> Result<bool, LifecycleError> {
    let mut recipe = load(store, id)?;
    let favorite = recipe.toggle_favorite();
    store.save(recipe)?;
    Ok(favorite)
}
