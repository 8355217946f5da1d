use brewcraft::{
    catalog::{CatalogBuilderError, CatalogError, CatalogFile},
    store::{JsonFileStore, Store},
    BrewEngine, Catalog, CatalogBuilder, Ingredient, IngredientCatalog, IngredientProperties,
    IngredientType,
};
use indoc::indoc;
use std::sync::Arc;

#[cfg(feature = "bundled_catalog")]
#[test]
fn bundled_catalog() {
    let catalog = Catalog::bundled();
    assert_eq!(catalog.styles().len(), 31);
    assert_eq!(catalog.ingredient_count(), 198);
    assert_eq!(catalog.ingredients(IngredientType::Malt).len(), 36);
    assert_eq!(catalog.ingredients(IngredientType::Hop).len(), 58);
    assert_eq!(catalog.ingredients(IngredientType::Yeast).len(), 34);
    assert_eq!(catalog.ingredients(IngredientType::Adjunct).len(), 70);
    assert_eq!(catalog, Catalog::default());

    let cascade = catalog.ingredient("h1").unwrap();
    assert_eq!(cascade.name, "Cascade");
    assert_eq!(cascade.alpha_acid(), Some(5.5));

    for style in catalog.styles() {
        for range in [style.og, style.fg, style.abv, style.ibu, style.srm] {
            assert!(range.min <= range.max, "{}", style.name);
        }
    }

    let categories = catalog.categories();
    assert_eq!(categories[0], "Lager");
    assert!(categories.contains(&"Stout"));
    assert_eq!(catalog.styles_in("Stout").count(), 4);
}

#[cfg(feature = "bundled_catalog")]
#[test]
fn layer_over_bundled() {
    let catalog = CatalogBuilder::new()
        .with_bundled_catalog()
        .unwrap()
        .with_toml(indoc! {r#"
            [[style]]
            name = "American Pale Ale"
            category = "Pale Ale"
            og = [1.045, 1.060]
            fg = [1.010, 1.015]
            abv = [4.5, 6.2]
            ibu = [30.0, 50.0]
            srm = [5.0, 10.0]

            [[style]]
            name = "Grodziskie"
            category = "Smoked"
            og = [1.028, 1.032]
            fg = [1.006, 1.012]
            abv = [2.5, 3.3]
            ibu = [20.0, 35.0]
            srm = [3.0, 6.0]

            [[ingredient]]
            id = "h1"
            name = "Cascade (2024)"
            type = "hop"
            alphaAcid = 7.2
        "#})
        .unwrap()
        .finish()
        .unwrap();

    assert_eq!(catalog.styles().len(), 32);
    let apa = catalog.style("American Pale Ale").unwrap();
    assert_eq!(apa.ibu.min, 30.0);
    assert_eq!(catalog.styles().last().unwrap().name, "Grodziskie");
    // overrides keep their position
    let position = catalog
        .styles()
        .iter()
        .position(|s| s.name == "American Pale Ale");
    let bundled_position = Catalog::bundled()
        .styles()
        .iter()
        .position(|s| s.name == "American Pale Ale");
    assert_eq!(position, bundled_position);

    assert_eq!(catalog.ingredient("h1").unwrap().alpha_acid(), Some(7.2));
    assert_eq!(catalog.ingredient_count(), 198);
}

#[test]
fn layers_from_files() {
    let mut first = CatalogFile::from_toml(indoc! {r#"
        [[ingredient]]
        id = "m1"
        name = "Base"
        type = "malt"
        ppg = 36.0
    "#})
    .unwrap();
    let second = CatalogFile::from_toml(indoc! {r#"
        [[ingredient]]
        id = "y1"
        name = "Ale Yeast"
        type = "yeast"
        attenuation = 77
        flocculation = "medium"
        tempRange = [60.0, 72.0]
    "#})
    .unwrap();
    first.extend(second);

    let catalog = Catalog::builder()
        .with_catalog_file(first)
        .unwrap()
        .finish()
        .unwrap();
    assert_eq!(catalog.ingredient_count(), 2);
    let yeast = catalog.ingredient("y1").unwrap();
    assert_eq!(yeast.attenuation(), Some(77));
    assert!(yeast.temp_range().unwrap().contains(65.0));
    assert!(catalog.styles().is_empty());
}

#[test]
fn invalid_layers() {
    let err = Catalog::builder().with_toml("[[style]]\nname = 3").unwrap_err();
    assert!(matches!(err, CatalogBuilderError::Toml(_)));

    let err = Catalog::builder()
        .with_toml(indoc! {r#"
            [[style]]
            name = "Backwards"
            category = "Odd"
            og = [1.060, 1.040]
            fg = [1.010, 1.015]
            abv = [4.5, 6.2]
            ibu = [30.0, 50.0]
            srm = [5.0, 10.0]
        "#})
        .unwrap_err();
    assert!(matches!(err, CatalogBuilderError::InvalidRange { .. }));

    let err = Catalog::builder()
        .with_toml(indoc! {r#"
            [[ingredient]]
            id = "custom-hop-1"
            name = "Sneaky"
            type = "hop"
        "#})
        .unwrap_err();
    assert!(matches!(err, CatalogBuilderError::ReservedId { .. }));

    let err = Catalog::builder()
        .with_toml(indoc! {r#"
            [[ingredient]]
            id = "a1"
            name = "Rice Hulls"
            type = "adjunct"

            [[ingredient]]
            id = "a1"
            name = "Irish Moss"
            type = "adjunct"
        "#})
        .unwrap_err();
    assert!(matches!(err, CatalogBuilderError::DuplicateIngredient { .. }));
}

#[test]
fn custom_ingredients_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ingredients.json");
    let seeds = Arc::new(
        Catalog::builder()
            .with_toml(indoc! {r#"
                [[ingredient]]
                id = "h1"
                name = "Cascade"
                type = "hop"
                alphaAcid = 5.5
            "#})
            .unwrap()
            .finish()
            .unwrap(),
    );

    let mut catalog = IngredientCatalog::new(Arc::clone(&seeds));
    let id = catalog
        .add_custom(
            "  Homegrown Cascade ",
            IngredientProperties::Hop {
                alpha_acid: Some(4.0),
            },
        )
        .unwrap()
        .id
        .clone();
    assert!(id.starts_with("custom-hop-"));

    let mut store: JsonFileStore<Ingredient> = JsonFileStore::open(&path).unwrap();
    for ingredient in catalog.custom() {
        store.save(ingredient.clone()).unwrap();
    }

    let reopened: JsonFileStore<Ingredient> = JsonFileStore::open(&path).unwrap();
    let restored = IngredientCatalog::new(seeds)
        .with_custom(reopened.list().unwrap())
        .unwrap();
    let hop = restored.get(&id).unwrap();
    assert_eq!(hop.name, "Homegrown Cascade");
    assert_eq!(hop.alpha_acid(), Some(4.0));
    let hops: Vec<_> = restored
        .by_type(IngredientType::Hop)
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(hops, ["Cascade", "Homegrown Cascade"]);
    assert_eq!(restored.search("cascade").count(), 2);
}

#[test]
fn default_ingredients_are_read_only() {
    let seeds = Catalog::builder()
        .with_toml(indoc! {r#"
            [[ingredient]]
            id = "a1"
            name = "Irish Moss"
            type = "adjunct"
        "#})
        .unwrap()
        .finish()
        .unwrap();
    let mut catalog = BrewEngine::new(seeds).ingredient_catalog();

    assert_eq!(
        catalog.remove_custom("a1"),
        Err(CatalogError::ReadOnly { id: "a1".into() })
    );
    assert_eq!(
        catalog.remove_custom("nope"),
        Err(CatalogError::UnknownIngredient { id: "nope".into() })
    );
    let mut moss = catalog.get("a1").unwrap().clone();
    moss.name = "Whirlfloc".into();
    assert!(matches!(
        catalog.update_custom(moss),
        Err(CatalogError::ReadOnly { .. })
    ));

    let sugar = catalog
        .add_custom("Candi Syrup", IngredientProperties::Adjunct)
        .unwrap()
        .clone();
    let mut changed = sugar.clone();
    changed.properties = IngredientProperties::Malt {
        lovibond: Some(80.0),
        ppg: Some(32.0),
    };
    assert!(matches!(
        catalog.update_custom(changed),
        Err(CatalogError::TypeChange { .. })
    ));
    assert_eq!(catalog.remove_custom(&sugar.id).unwrap().name, "Candi Syrup");
    assert_eq!(catalog.custom().count(), 0);
}
