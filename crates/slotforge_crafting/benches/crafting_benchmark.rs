//! Benchmark for crafting system performance.
//!
//! Run with: cargo bench --package slotforge_crafting --bench crafting_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use slotforge_crafting::{CraftingConfig, Crafter, Inventory, ItemId, RecipeId};

const OAK_PLANKS: ItemId = 3;
const BIRCH_PLANKS: ItemId = 4;
const COAL: ItemId = 7;
const CHARCOAL: ItemId = 8;
const STICK: ItemId = 20;

const TORCH_RECIPE: RecipeId = 4;
const CHEST_RECIPE: RecipeId = 5;

fn create_crafter() -> Crafter {
    let config = CraftingConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/recipes.toml")).unwrap();
    Crafter::from_config(&config).unwrap()
}

fn stocked_inventory() -> Inventory {
    let mut inventory = Inventory::default();
    inventory.add(OAK_PLANKS, 150, 64).unwrap();
    inventory.add(BIRCH_PLANKS, 90, 64).unwrap();
    inventory.add(COAL, 40, 64).unwrap();
    inventory.add(CHARCOAL, 25, 64).unwrap();
    inventory.add(STICK, 64, 64).unwrap();
    inventory
}

fn benchmark_max_crafts(c: &mut Criterion) {
    let crafter = create_crafter();
    let inventory = stocked_inventory();

    c.bench_function("max_crafts_chest_8_tag_slots", |b| {
        b.iter(|| black_box(crafter.max_crafts(&inventory, black_box(CHEST_RECIPE))));
    });
}

fn benchmark_craft_max(c: &mut Criterion) {
    let crafter = create_crafter();
    let inventory = stocked_inventory();

    c.bench_function("craft_max_torch_with_rollback_snapshot", |b| {
        b.iter(|| {
            let mut inventory = inventory.clone();
            black_box(crafter.craft_max(&mut inventory, TORCH_RECIPE))
        });
    });
}

criterion_group!(benches, benchmark_max_crafts, benchmark_craft_max);
criterion_main!(benches);
