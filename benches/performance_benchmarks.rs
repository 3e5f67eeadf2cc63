use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use fitplan::{
    CatalogLoader, Equipment, Gender, Goal, MacroEngine, PlanCatalog, Profile, ProfileNormalizer,
    UnitSystem,
};
use fitplan::catalog::BUILTIN_CATALOG;

/// Performance benchmarks for the calculation core
///
/// Both components are recomputed on every request, so these keep an eye
/// on per-call cost across batch sizes.

fn create_profiles(count: usize) -> Vec<Profile> {
    (0..count)
        .map(|i| Profile {
            unit_system: if i % 2 == 0 { UnitSystem::Metric } else { UnitSystem::Imperial },
            weight: dec!(60) + Decimal::from(i % 40),
            height: dec!(65) + Decimal::from(i % 20),
            age: 18 + (i % 60) as u32,
            gender: match i % 3 {
                0 => Gender::Male,
                1 => Gender::Female,
                _ => Gender::Unspecified,
            },
            goal: Goal::ALL[i % 3],
            equipment: Equipment::ALL[i % 4],
        })
        .collect()
}

fn bench_macro_calculation(c: &mut Criterion) {
    let engine = MacroEngine::default();
    let mut group = c.benchmark_group("Macro Calculation");

    for &size in &[1, 10, 100, 1000] {
        let profiles = create_profiles(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("normalize_and_compute", size),
            &profiles,
            |b, profiles| {
                b.iter(|| {
                    for profile in profiles {
                        if let Ok(normalized) = ProfileNormalizer::normalize(profile) {
                            black_box(engine.compute_macros(&normalized, profile.goal));
                        }
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_plan_building(c: &mut Criterion) {
    let catalog = PlanCatalog::builtin().expect("built-in catalog");
    let mut group = c.benchmark_group("Plan Building");

    group.bench_function("all_combinations", |b| {
        b.iter(|| {
            for equipment in Equipment::ALL {
                for goal in Goal::ALL {
                    let _ = black_box(catalog.build_weekly_plan(equipment, goal));
                }
            }
        });
    });

    group.bench_function("parse_builtin_catalog", |b| {
        b.iter(|| {
            let _ = black_box(CatalogLoader::load_from_string(BUILTIN_CATALOG, "bench"));
        });
    });

    group.finish();
}

// Define benchmark groups
criterion_group!(benches, bench_macro_calculation, bench_plan_building);

criterion_main!(benches);
