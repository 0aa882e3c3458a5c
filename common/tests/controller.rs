use chrono::{TimeZone, Utc};
use common::controller::{LoadOutcome, PivotSurface, ReconciliationController};
use common::filter_store::FilterStore;
use common::model::configuration::ConfigurationSnapshot;
use common::model::filter::ColumnFilter;
use common::model::pivot::PivotConfig;
use common::model::row::{CellValue, Dataset, Row};
use common::ExplorerError;
use pretty_assertions::assert_eq;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum SurfaceCall {
    Render {
        records: usize,
        config: PivotConfig,
        generation: u64,
    },
    Teardown,
    Placeholder,
    Bind(u64),
}

#[derive(Default)]
struct RecordingSurface {
    calls: Vec<SurfaceCall>,
    last_rows: Option<Rc<[Row]>>,
}

impl RecordingSurface {
    fn renders(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Render { .. }))
            .count()
    }

    fn binds(&self) -> Vec<u64> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Bind(g) => Some(*g),
                _ => None,
            })
            .collect()
    }

    fn last_render(&self) -> Option<&SurfaceCall> {
        self.calls
            .iter()
            .rev()
            .find(|c| matches!(c, SurfaceCall::Render { .. }))
    }
}

impl PivotSurface for RecordingSurface {
    fn render(&mut self, rows: Rc<[Row]>, config: &PivotConfig, generation: u64) {
        self.calls.push(SurfaceCall::Render {
            records: rows.len(),
            config: config.clone(),
            generation,
        });
        self.last_rows = Some(rows);
    }

    fn teardown(&mut self) {
        self.calls.push(SurfaceCall::Teardown);
    }

    fn show_placeholder(&mut self) {
        self.calls.push(SurfaceCall::Placeholder);
    }

    fn bind_header_interceptors(&mut self, generation: u64) {
        self.calls.push(SurfaceCall::Bind(generation));
    }
}

fn record(region: &str, sales: f64) -> Row {
    let mut row = Row::new();
    row.insert("Region".into(), region.into());
    row.insert("Sales".into(), CellValue::Number(sales));
    row
}

fn dataset() -> Dataset {
    vec![
        record("North", 10.0),
        record("South", 20.0),
        record("East", 30.0),
        record("North", 40.0),
        record("South", 50.0),
    ]
}

fn by_region() -> PivotConfig {
    PivotConfig {
        row_fields: vec!["Region".into()],
        value_fields: vec!["Sales".into()],
        aggregator_name: "Sum".into(),
        ..PivotConfig::default()
    }
}

fn controller() -> ReconciliationController<RecordingSurface> {
    ReconciliationController::new(FilterStore::new(), RecordingSurface::default())
}

fn loaded() -> ReconciliationController<RecordingSurface> {
    let mut ctl = controller();
    let generation = ctl.load_dataset(dataset());
    ctl.on_render_settled(generation);
    ctl
}

fn at(secs: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap()
}

#[test]
fn every_render_is_followed_by_one_bind_per_generation() {
    let mut ctl = controller();
    let g1 = ctl.load_dataset(dataset());
    assert!(ctl.on_render_settled(g1));
    // the fallback timer fires after the real signal
    assert!(!ctl.on_render_settled(g1));

    let g2 = ctl.refresh();
    assert!(g2 > g1);
    assert!(!ctl.on_render_settled(g1));
    assert!(ctl.on_render_settled(g2));
    assert_eq!(ctl.surface().binds(), vec![g1, g2]);
}

#[test]
fn config_change_rebinds_after_the_widget_redraws() {
    let mut ctl = loaded();
    let generation = ctl.generation();
    assert!(ctl.handle_config_change(generation, by_region()));
    assert!(ctl.on_render_settled(generation));
    assert_eq!(ctl.surface().binds(), vec![generation, generation]);
}

#[test]
fn widget_changes_are_captured() {
    let mut ctl = loaded();
    assert!(ctl.handle_config_change(ctl.generation(), by_region()));
    assert_eq!(ctl.current_config(), &by_region());
}

#[test]
fn stale_config_change_is_dropped() {
    let mut ctl = loaded();
    let old = ctl.generation();
    ctl.refresh();
    assert!(!ctl.handle_config_change(old, by_region()));
    assert_eq!(ctl.current_config(), &PivotConfig::default());
}

#[test]
fn filtering_keeps_the_configuration_and_narrows_the_view() {
    let mut ctl = loaded();
    ctl.handle_config_change(ctl.generation(), by_region());

    ctl.apply_column_filter("Region", ColumnFilter::excluding(["South"]));
    assert_eq!(
        ctl.surface().last_render(),
        Some(&SurfaceCall::Render {
            records: 3,
            config: by_region(),
            generation: ctl.generation(),
        })
    );

    ctl.apply_column_filter("Sales", ColumnFilter::range(Some(25.0), None));
    let rows = ctl.surface().last_rows.clone().unwrap();
    let sales: Vec<&CellValue> = rows.iter().map(|r| &r["Sales"]).collect();
    assert_eq!(sales, vec![&CellValue::Number(30.0), &CellValue::Number(40.0)]);
    assert_eq!(ctl.current_config(), &by_region());
}

#[test]
fn clearing_a_filter_restores_the_base_rows() {
    let mut ctl = loaded();
    ctl.apply_column_filter("Region", ColumnFilter::excluding(["North", "East"]));
    ctl.clear_column_filter("Region");
    let rows = ctl.surface().last_rows.clone().unwrap();
    assert!(Rc::ptr_eq(&rows, ctl.store().base_rows()));
}

#[test]
fn filter_editor_requires_data_and_a_known_column() {
    let ctl = controller();
    assert_eq!(ctl.open_filter_editor("Region"), Err(ExplorerError::NoData));

    let ctl = loaded();
    assert_eq!(
        ctl.open_filter_editor("Missing"),
        Err(ExplorerError::ColumnNotFound("Missing".into()))
    );
    let draft = ctl.open_filter_editor("Sales").unwrap();
    assert!(draft.is_numeric());
}

#[test]
fn applying_a_draft_replaces_the_excluded_set() {
    let mut ctl = loaded();
    ctl.apply_column_filter("Region", ColumnFilter::excluding(["North"]));

    let mut draft = ctl.open_filter_editor("Region").unwrap();
    draft.set_included("North", true);
    draft.set_included("East", false);
    ctl.apply_draft(&draft);
    assert_eq!(
        ctl.store().filter("Region"),
        Some(&ColumnFilter::excluding(["East"]))
    );
}

#[test]
fn saving_the_default_configuration_is_refused() {
    let mut ctl = loaded();
    assert_eq!(
        ctl.save_current_configuration(at(0)).map(|s| s.name.clone()),
        Err(ExplorerError::NothingToSave)
    );
    assert_eq!(ctl.saved_count(), 0);
}

#[test]
fn saved_configurations_are_numbered_sequentially() {
    let mut ctl = loaded();
    ctl.handle_config_change(ctl.generation(), by_region());
    ctl.apply_column_filter("Region", ColumnFilter::excluding(["East"]));

    let first = ctl.save_current_configuration(at(1)).unwrap();
    assert_eq!(first.name, "Config-1");
    assert_eq!(first.snapshot.data_info.records, 5);
    assert_eq!(first.snapshot.data_info.columns, vec!["Region", "Sales"]);
    assert_eq!(
        ctl.save_current_configuration(at(2)).unwrap().name,
        "Config-2"
    );

    ctl.clear_all_configurations();
    assert_eq!(ctl.saved_count(), 0);
    assert_eq!(
        ctl.save_current_configuration(at(3)).unwrap().name,
        "Config-1"
    );
}

#[test]
fn saved_snapshot_is_independent_of_later_changes() {
    let mut ctl = loaded();
    ctl.handle_config_change(ctl.generation(), by_region());
    ctl.save_current_configuration(at(1)).unwrap();

    let mut changed = by_region();
    changed.col_fields.push("Sales".into());
    ctl.refresh();
    ctl.handle_config_change(ctl.generation(), changed);

    let saved = ctl.saved_configuration("Config-1").unwrap();
    assert_eq!(saved.snapshot.pivot_config, by_region());
}

#[test]
fn loading_suppresses_widget_echo_until_the_render_settles() {
    let mut ctl = loaded();
    ctl.handle_config_change(ctl.generation(), by_region());
    ctl.apply_column_filter("Region", ColumnFilter::excluding(["East"]));
    ctl.save_current_configuration(at(1)).unwrap();

    ctl.reset_all();
    assert_eq!(ctl.load_configuration("Config-1"), Ok(LoadOutcome::Applied));
    assert!(ctl.is_capture_suppressed());

    // The rebuilt widget reports its initial state before settling.
    let generation = ctl.generation();
    assert!(!ctl.handle_config_change(generation, PivotConfig::default()));
    assert_eq!(ctl.current_config(), &by_region());
    assert_eq!(
        ctl.store().filter("Region"),
        Some(&ColumnFilter::excluding(["East"]))
    );

    let calls = &ctl.surface().calls;
    let teardown = calls.iter().rposition(|c| c == &SurfaceCall::Teardown);
    let render = calls
        .iter()
        .rposition(|c| matches!(c, SurfaceCall::Render { .. }));
    assert!(teardown < render);

    assert!(ctl.on_render_settled(generation));
    assert!(!ctl.is_capture_suppressed());
    assert!(ctl.handle_config_change(generation, PivotConfig::default()));
}

#[test]
fn settle_of_an_older_render_does_not_lift_suppression() {
    let mut ctl = loaded();
    ctl.handle_config_change(ctl.generation(), by_region());
    ctl.save_current_configuration(at(1)).unwrap();
    let before = ctl.generation();

    ctl.load_configuration("Config-1").unwrap();
    ctl.on_render_settled(before);
    assert!(ctl.is_capture_suppressed());
}

#[test]
fn a_newer_render_settling_ends_the_load() {
    let mut ctl = loaded();
    ctl.handle_config_change(ctl.generation(), by_region());
    ctl.save_current_configuration(at(1)).unwrap();

    ctl.load_configuration("Config-1").unwrap();
    let reload = ctl.load_dataset(dataset());
    assert!(ctl.is_capture_suppressed());
    assert!(ctl.on_render_settled(reload));
    assert!(!ctl.is_capture_suppressed());

    let moved = PivotConfig {
        col_fields: vec!["Region".into()],
        row_fields: Vec::new(),
        ..by_region()
    };
    assert!(ctl.handle_config_change(reload, moved.clone()));
    assert_eq!(ctl.current_config(), &moved);
}

#[test]
fn a_filter_applied_during_a_load_does_not_leave_capture_suppressed() {
    let mut ctl = loaded();
    ctl.handle_config_change(ctl.generation(), by_region());
    ctl.save_current_configuration(at(1)).unwrap();

    assert_eq!(ctl.load_configuration("Config-1"), Ok(LoadOutcome::Applied));
    let loading = ctl.generation();
    let filtered = ctl.apply_column_filter("Region", ColumnFilter::excluding(["East"]));
    assert!(!ctl.on_render_settled(loading));
    assert!(ctl.is_capture_suppressed());

    ctl.on_render_settled(filtered);
    assert!(!ctl.is_capture_suppressed());
    let refreshed = ctl.refresh();
    ctl.on_render_settled(refreshed);
    assert!(!ctl.is_capture_suppressed());
}

#[test]
fn loading_an_unknown_configuration_fails() {
    let mut ctl = loaded();
    assert_eq!(
        ctl.load_configuration("Config-9"),
        Err(ExplorerError::ConfigNotFound("Config-9".into()))
    );
    assert!(!ctl.is_capture_suppressed());
}

#[test]
fn loading_without_data_is_deferred_to_the_next_dataset() {
    let mut ctl = loaded();
    ctl.handle_config_change(ctl.generation(), by_region());
    let snapshot = ctl.export_configuration(at(5)).unwrap();

    let mut fresh = controller();
    assert_eq!(fresh.import_configuration(snapshot), LoadOutcome::Deferred);
    assert!(!fresh.is_capture_suppressed());
    assert_eq!(fresh.surface().renders(), 0);

    fresh.load_dataset(dataset());
    assert_eq!(
        fresh.surface().last_render(),
        Some(&SurfaceCall::Render {
            records: 5,
            config: by_region(),
            generation: fresh.generation(),
        })
    );
}

#[test]
fn new_dataset_clears_filters_but_keeps_fields() {
    let mut ctl = loaded();
    ctl.handle_config_change(ctl.generation(), by_region());
    ctl.apply_column_filter("Region", ColumnFilter::excluding(["North"]));

    ctl.load_dataset(vec![record("West", 1.0)]);
    assert!(ctl.store().active_filters().is_empty());
    assert_eq!(ctl.current_config(), &by_region());
}

#[test]
fn reset_is_idempotent() {
    let mut ctl = loaded();
    ctl.handle_config_change(ctl.generation(), by_region());
    ctl.apply_column_filter("Region", ColumnFilter::excluding(["North"]));

    ctl.reset_all();
    let generation = ctl.generation();
    ctl.reset_all();
    assert!(ctl.generation() > generation);
    assert_eq!(ctl.current_config(), &PivotConfig::default());
    assert!(ctl.store().active_filters().is_empty());
    assert_eq!(ctl.store().record_count(), 5);
    assert_eq!(
        ctl.surface().calls.last(),
        Some(&SurfaceCall::Placeholder)
    );
}

#[test]
fn reset_on_a_fresh_controller_is_harmless() {
    let mut ctl = controller();
    ctl.reset_all();
    ctl.reset_all();
    assert_eq!(ctl.current_config(), &PivotConfig::default());
    assert!(ctl.store().active_filters().is_empty());
    assert!(!ctl.store().is_loaded());
    assert!(!ctl.is_capture_suppressed());
    assert_eq!(ctl.surface().renders(), 0);
    assert_eq!(
        ctl.surface().calls,
        vec![SurfaceCall::Placeholder, SurfaceCall::Placeholder]
    );
}

#[test]
fn callbacks_from_before_a_reset_are_stale() {
    let mut ctl = loaded();
    let before = ctl.generation();
    ctl.reset_all();
    assert!(!ctl.handle_config_change(before, by_region()));
    assert!(!ctl.on_render_settled(before));
}

#[test]
fn exported_file_round_trips_through_import() {
    let mut ctl = loaded();
    ctl.handle_config_change(ctl.generation(), by_region());
    ctl.apply_column_filter("Sales", ColumnFilter::range(Some(15.0), Some(45.0)));

    let snapshot = ctl.export_configuration(at(1_700_000_000)).unwrap();
    assert_eq!(snapshot.export_file_name(), "pivot-config-1700000000000.json");
    let text = snapshot.to_json_pretty().unwrap();

    let mut other = loaded();
    let parsed = ConfigurationSnapshot::from_json(&text).unwrap();
    assert_eq!(other.import_configuration(parsed), LoadOutcome::Applied);
    assert_eq!(other.current_config(), &by_region());
    assert_eq!(other.store().compute_view().len(), 3);
}
