use common::filter_store::FilterStore;
use common::model::filter::ColumnFilter;
use common::model::row::{CellValue, Dataset, Row};
use proptest::prelude::*;

const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Null),
        (-1000i32..1000).prop_map(|n| CellValue::Number(n as f64)),
        (-1000i32..1000).prop_map(|n| CellValue::Text(n.to_string())),
        Just(CellValue::Text("n/a".into())),
    ]
}

fn dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec((0..REGIONS.len(), cell(), any::<bool>()), 0..60).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(id, (region, amount, has_amount))| {
                let mut row = Row::new();
                row.insert("id".into(), CellValue::Number(id as f64));
                row.insert("region".into(), REGIONS[region].into());
                if has_amount {
                    row.insert("amount".into(), amount);
                }
                row
            })
            .collect()
    })
}

fn ids(rows: &[Row]) -> Vec<f64> {
    rows.iter().filter_map(|r| r["id"].as_number()).collect()
}

proptest! {
    #[test]
    fn view_is_an_ordered_subsequence_of_the_base(
        rows in dataset(),
        excluded in prop::collection::btree_set(0..REGIONS.len(), 0..=REGIONS.len()),
        min in prop::option::of(-500i32..500),
        max in prop::option::of(-500i32..500),
    ) {
        let mut store = FilterStore::new();
        store.load(rows);
        store.set_filter("region", ColumnFilter::excluding(excluded.iter().map(|&i| REGIONS[i])));
        store.set_filter("amount", ColumnFilter::range(min.map(f64::from), max.map(f64::from)));

        let view = store.compute_view();
        let view_ids = ids(&view);
        prop_assert!(view_ids.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(view.len() <= store.record_count());
        for row in view.iter() {
            prop_assert!(!excluded.iter().any(|&i| row["region"] == CellValue::from(REGIONS[i])));
        }
    }

    #[test]
    fn compute_view_is_deterministic(
        rows in dataset(),
        excluded in prop::collection::btree_set(0..REGIONS.len(), 0..=REGIONS.len()),
    ) {
        let mut store = FilterStore::new();
        store.load(rows);
        store.set_filter("region", ColumnFilter::excluding(excluded.iter().map(|&i| REGIONS[i])));
        prop_assert_eq!(ids(&store.compute_view()), ids(&store.compute_view()));
    }

    #[test]
    fn clearing_the_only_filter_restores_the_base(
        rows in dataset(),
        min in -500i32..500,
    ) {
        let mut store = FilterStore::new();
        store.load(rows);
        let before = ids(&store.compute_view());
        store.set_filter("amount", ColumnFilter::range(Some(f64::from(min)), None));
        store.clear_filter("amount");
        prop_assert_eq!(ids(&store.compute_view()), before);
        prop_assert_eq!(store.compute_view().len(), store.record_count());
    }
}
