//! End-to-end resolve + reduce over the fixture data file.

mod common;

use asset_energy::reducer::Reducer;
use asset_energy::resolver::{ResolveError, resolve};

use common::fixture_store;

#[test]
fn fixture_has_three_assets() {
    let store = fixture_store();
    assert_eq!(store.asset_count(), 3);
}

#[test]
fn office_block_matches_worked_example() {
    let store = fixture_store();
    let record = resolve(&store, 1).expect("asset 1 should resolve");
    assert_eq!(record.name, "Office Block");
    assert_eq!(record.energy_output, Some(6.0));

    let reduced = Reducer::default().reduce(&record).expect("reduce should succeed");
    assert_eq!(reduced.energy_demand.get("heat"), Some(&4.0));
    assert_eq!(reduced.energy_demand.get("gas"), Some(&5.0));
    assert_eq!(reduced.total_energy_demand, 9.0);
    assert_eq!(reduced.energy_output_reduction, "66.67");
}

#[test]
fn warehouse_skips_unlinked_demand_and_offsets_electricity() {
    let store = fixture_store();
    let record = resolve(&store, 2).expect("asset 2 should resolve");
    assert_eq!(
        record.energy_demand.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["electricity", "heat"]
    );

    let reduced = Reducer::default().reduce(&record).expect("reduce should succeed");
    assert_eq!(reduced.energy_demand.get("electricity"), Some(&0.0));
    assert_eq!(reduced.energy_demand.get("heat"), Some(&15.0));
    assert_eq!(reduced.total_energy_demand, 15.0);
    assert_eq!(reduced.energy_output_reduction, "166.67");
}

#[test]
fn depot_without_output_has_no_reduction() {
    let store = fixture_store();
    let record = resolve(&store, 3).expect("asset 3 should resolve");
    assert_eq!(record.energy_output, None);

    let reduced = Reducer::default().reduce(&record).expect("reduce should succeed");
    assert_eq!(reduced.energy_demand.get("heat"), Some(&8.0));
    assert_eq!(reduced.energy_output_reduction, "0.00");
}

#[test]
fn demand_keys_are_known_energy_types() {
    let store = fixture_store();
    let known = ["heat", "electricity", "gas"];
    for id in 1..=3 {
        let record = resolve(&store, id).expect("asset should resolve");
        assert!(
            record.energy_demand.keys().all(|k| known.contains(&k.as_str())),
            "asset {id} has unknown energy type"
        );
    }
}

#[test]
fn out_of_range_asset_is_not_found() {
    let store = fixture_store();
    assert_eq!(resolve(&store, 999), Err(ResolveError::AssetNotFound(999)));
}
