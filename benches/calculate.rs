use brewcraft::{calculate, convert::Unit, BrewEngine, Recipe, RecipeIngredient};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn recipe(engine: &BrewEngine, entries: &[(&str, f64, Unit, Option<u32>)]) -> Recipe {
    let mut recipe = Recipe::new("bench", "Bench");
    for &(id, amount, unit, boil) in entries {
        let ingredient = engine.catalog().ingredient(id).unwrap().clone();
        recipe.ingredients.push(match boil {
            Some(minutes) => RecipeIngredient::boil(ingredient, amount, unit, minutes),
            None => RecipeIngredient::new(ingredient, amount, unit),
        });
    }
    recipe
}

fn derived_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("derived values");
    let engine = BrewEngine::default();

    let pale = recipe(
        &engine,
        &[
            ("m1", 9.0, Unit::Lb, None),
            ("m13", 0.75, Unit::Lb, None),
            ("h2", 1.0, Unit::Oz, Some(60)),
            ("h1", 1.0, Unit::Oz, Some(15)),
            ("h1", 1.0, Unit::Oz, Some(5)),
            ("y1", 1.0, Unit::Packet, None),
        ],
    );
    let big = recipe(
        &engine,
        &[
            ("m5", 12.0, Unit::Lb, None),
            ("m3", 2.0, Unit::Lb, None),
            ("m13", 1.0, Unit::Lb, None),
            ("m18", 8.0, Unit::Oz, None),
            ("m20", 500.0, Unit::G, None),
            ("m35", 1.0, Unit::Kg, None),
            ("h37", 2.0, Unit::Oz, Some(90)),
            ("h37", 1.0, Unit::Oz, Some(60)),
            ("h25", 30.0, Unit::G, Some(30)),
            ("h25", 30.0, Unit::G, Some(15)),
            ("h1", 1.0, Unit::Oz, Some(5)),
            ("h1", 1.0, Unit::Oz, None),
            ("y6", 1.0, Unit::Packet, None),
            ("y1", 1.0, Unit::Packet, None),
            ("a3", 1.0, Unit::Lb, None),
        ],
    );

    let pale = black_box(pale);
    let big = black_box(big);

    group.bench_function("pale ale", |b| b.iter(|| calculate(&pale)));
    group.bench_function("big recipe", |b| b.iter(|| calculate(&big)));
    group.bench_function("display with readings", |b| {
        let mut recipe = pale.clone();
        recipe.refresh_derived();
        recipe.actual_og = Some(1.052);
        recipe.actual_fg = Some(1.011);
        b.iter(|| recipe.display_values())
    });
}

criterion_group!(benches, derived_values);
criterion_main!(benches);
