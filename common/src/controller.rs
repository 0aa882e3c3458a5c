//! Reconciliation between the filter store, the current pivot configuration
//! and the pivot widget.
//!
//! The widget is an external collaborator reached through [`PivotSurface`].
//! It owns everything it draws, re-creates its header elements on every
//! render, and reports back in two ways:
//!
//! - `handle_config_change` when the user rearranges fields or picks another
//!   aggregator or renderer through the widget's own UI;
//! - `on_render_settled` once a render has reached the page, which is when
//!   header interception can be bound.
//!
//! Every render request gets a new generation number. Both callbacks carry the
//! generation they belong to, and anything tagged with an older generation is
//! dropped. On top of that, `suppress_config_capture` is raised while a saved
//! configuration is being applied, so that nothing the widget reports before
//! the programmatic render settles can overwrite the loaded configuration.
//!
//! The widget may not deliver a settle signal at all (the frontend then falls
//! back to a fixed delay). Binding is idempotent per generation, so the real
//! signal and the fallback may both arrive. If neither arrives before the user
//! clicks a header, that click is not intercepted for the render cycle.

use crate::error::{ExplorerError, Result};
use crate::filter_editor::FilterDraft;
use crate::filter_store::FilterStore;
use crate::model::configuration::{ConfigurationSnapshot, SavedConfiguration};
use crate::model::filter::ColumnFilter;
use crate::model::pivot::PivotConfig;
use crate::model::row::{Dataset, Row};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::rc::Rc;

/// The pivot widget as seen by the controller.
pub trait PivotSurface {
    /// Draws `rows` with `config`, replacing whatever was shown before.
    fn render(&mut self, rows: Rc<[Row]>, config: &PivotConfig, generation: u64);

    /// Discards the rendering container entirely so the next render starts
    /// from a fresh one.
    fn teardown(&mut self);

    /// Shows the idle placeholder instead of the widget.
    fn show_placeholder(&mut self);

    /// Attaches header interception to the elements produced by render
    /// `generation`. Called at most once per generation.
    fn bind_header_interceptors(&mut self, generation: u64);
}

/// Result of applying a saved or imported configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Data was present and the widget was rebuilt with the configuration.
    Applied,
    /// No data yet. The configuration is current and takes effect on the
    /// next dataset load.
    Deferred,
}

pub struct ReconciliationController<S: PivotSurface> {
    store: FilterStore,
    surface: S,
    current_config: PivotConfig,
    suppress_config_capture: bool,
    /// Generation whose settle signal lifts `suppress_config_capture`.
    release_on_settle: Option<u64>,
    saved_configurations: IndexMap<String, SavedConfiguration>,
    next_config_index: u32,
    generation: u64,
    bound_generation: Option<u64>,
}

impl<S: PivotSurface> ReconciliationController<S> {
    pub fn new(store: FilterStore, surface: S) -> Self {
        Self {
            store,
            surface,
            current_config: PivotConfig::default(),
            suppress_config_capture: false,
            release_on_settle: None,
            saved_configurations: IndexMap::new(),
            next_config_index: 1,
            generation: 0,
            bound_generation: None,
        }
    }

    pub fn store(&self) -> &FilterStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn current_config(&self) -> &PivotConfig {
        &self.current_config
    }

    /// Generation of the most recent render request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_capture_suppressed(&self) -> bool {
        self.suppress_config_capture
    }

    pub fn saved_configurations(&self) -> impl Iterator<Item = &SavedConfiguration> {
        self.saved_configurations.values()
    }

    pub fn saved_configuration(&self, name: &str) -> Option<&SavedConfiguration> {
        self.saved_configurations.get(name)
    }

    pub fn saved_count(&self) -> usize {
        self.saved_configurations.len()
    }

    /// Installs a freshly loaded dataset and renders it with the current
    /// configuration. Filters are cleared; field selections are kept.
    pub fn load_dataset(&mut self, rows: Dataset) -> u64 {
        self.store.load(rows);
        self.refresh()
    }

    /// Requests a render of `rows` with the current configuration.
    pub fn render(&mut self, rows: Rc<[Row]>) -> u64 {
        self.generation += 1;
        self.bound_generation = None;
        debug!(
            "render #{}: {} records, {}",
            self.generation,
            rows.len(),
            self.current_config.summary()
        );
        self.surface.render(rows, &self.current_config, self.generation);
        self.generation
    }

    /// Recomputes the filtered view and renders it.
    pub fn refresh(&mut self) -> u64 {
        let view = self.store.compute_view();
        self.render(view)
    }

    /// Widget callback: the user changed the configuration through the
    /// widget. Returns whether the change was captured.
    pub fn handle_config_change(&mut self, generation: u64, new_config: PivotConfig) -> bool {
        if self.suppress_config_capture {
            debug!("config change during programmatic load ignored");
            return false;
        }
        if generation != self.generation {
            debug!(
                "stale config change from render #{} ignored (current #{})",
                generation, self.generation
            );
            return false;
        }
        info!("pivot table updated: {}", new_config.summary());
        self.current_config = new_config;
        // The widget redraws its own headers after a change; bind again when
        // that redraw settles.
        self.bound_generation = None;
        true
    }

    /// Widget callback: render `generation` has reached the page. Binds header
    /// interception once per generation and ends a pending programmatic load
    /// whose render is this one or an earlier one.
    /// Returns whether interceptors were bound by this call.
    pub fn on_render_settled(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            debug!("settle signal for stale render #{} ignored", generation);
            return false;
        }
        // A render requested after the load draws the loaded configuration
        // too, so its settle also ends the load.
        if self.release_on_settle.is_some_and(|pending| generation >= pending) {
            self.release_on_settle = None;
            self.suppress_config_capture = false;
        }
        if self.bound_generation == Some(generation) {
            return false;
        }
        self.surface.bind_header_interceptors(generation);
        self.bound_generation = Some(generation);
        debug!("header interception bound for render #{}", generation);
        true
    }

    /// Prepares the filter editor for `column`, as triggered by an
    /// intercepted header click or tap.
    pub fn open_filter_editor(&self, column: &str) -> Result<FilterDraft> {
        if !self.store.is_loaded() {
            return Err(ExplorerError::NoData);
        }
        if !self.store.has_column(column) {
            warn!("column {} not found in data", column);
            return Err(ExplorerError::ColumnNotFound(column.to_string()));
        }
        let analysis = self.store.analyze_column(column);
        Ok(FilterDraft::new(analysis, self.store.filter(column)))
    }

    /// Applies `filter` to `column` and re-renders with the unchanged
    /// configuration.
    pub fn apply_column_filter(&mut self, column: &str, filter: ColumnFilter) -> u64 {
        self.store.set_filter(column, filter);
        info!(
            "filter applied to {}; active filters: {}",
            column,
            self.store.active_filters().len()
        );
        self.refresh()
    }

    /// Applies whatever the editor draft describes. A draft that yields no
    /// filter leaves the filter map alone but still re-renders.
    pub fn apply_draft(&mut self, draft: &FilterDraft) -> u64 {
        match draft.to_filter() {
            Some(filter) => self.apply_column_filter(draft.column(), filter),
            None => self.refresh(),
        }
    }

    pub fn clear_column_filter(&mut self, column: &str) -> u64 {
        self.store.clear_filter(column);
        self.refresh()
    }

    /// Back to the idle state: default configuration, no filters, placeholder
    /// instead of the widget. The loaded dataset is kept.
    pub fn reset_all(&mut self) {
        self.current_config = PivotConfig::default();
        self.store.clear_all();
        self.suppress_config_capture = false;
        self.release_on_settle = None;
        // Anything still in flight from the previous widget is now stale.
        self.generation += 1;
        self.bound_generation = None;
        self.surface.show_placeholder();
        info!("pivot table reset");
    }

    fn snapshot(&self, timestamp: DateTime<Utc>) -> Result<ConfigurationSnapshot> {
        if !self.current_config.has_field_selections() {
            return Err(ExplorerError::NothingToSave);
        }
        Ok(ConfigurationSnapshot {
            pivot_config: self.current_config.clone(),
            active_filters: self.store.active_filters().clone(),
            timestamp,
            data_info: self.store.fingerprint(),
        })
    }

    /// Stores a copy of the current configuration and filters as `Config-N`.
    pub fn save_current_configuration(
        &mut self,
        timestamp: DateTime<Utc>,
    ) -> Result<&SavedConfiguration> {
        let snapshot = self.snapshot(timestamp)?;
        let name = format!("Config-{}", self.next_config_index);
        self.next_config_index += 1;
        info!(
            "configuration saved as {}: {}",
            name,
            snapshot.pivot_config.summary()
        );
        self.saved_configurations.insert(
            name.clone(),
            SavedConfiguration {
                name: name.clone(),
                snapshot,
            },
        );
        info!("{} configurations in memory", self.saved_configurations.len());
        Ok(&self.saved_configurations[&name])
    }

    /// Makes the named configuration current and rebuilds the widget with it.
    pub fn load_configuration(&mut self, name: &str) -> Result<LoadOutcome> {
        let saved = self
            .saved_configurations
            .get(name)
            .ok_or_else(|| ExplorerError::ConfigNotFound(name.to_string()))?
            .snapshot
            .clone();
        let outcome = self.apply_snapshot(saved);
        info!("configuration {} loaded ({:?})", name, outcome);
        Ok(outcome)
    }

    /// Same as [`load_configuration`](Self::load_configuration) for a
    /// snapshot read from an exported file.
    pub fn import_configuration(&mut self, snapshot: ConfigurationSnapshot) -> LoadOutcome {
        if snapshot.data_info.columns != self.store.column_names() && self.store.is_loaded() {
            warn!(
                "imported configuration was saved against columns [{}]",
                snapshot.data_info.columns.join(",")
            );
        }
        self.apply_snapshot(snapshot)
    }

    /// Snapshot of the current state for download.
    pub fn export_configuration(&self, timestamp: DateTime<Utc>) -> Result<ConfigurationSnapshot> {
        self.snapshot(timestamp)
    }

    fn apply_snapshot(&mut self, snapshot: ConfigurationSnapshot) -> LoadOutcome {
        self.suppress_config_capture = true;
        self.current_config = snapshot.pivot_config;
        self.store.replace_filters(snapshot.active_filters);

        if !self.store.is_loaded() {
            self.suppress_config_capture = false;
            return LoadOutcome::Deferred;
        }

        self.surface.teardown();
        let generation = self.refresh();
        self.release_on_settle = Some(generation);
        LoadOutcome::Applied
    }

    pub fn clear_all_configurations(&mut self) {
        self.saved_configurations.clear();
        self.next_config_index = 1;
        info!("all configurations cleared");
    }
}
