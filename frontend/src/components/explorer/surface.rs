//! The controller's view of the page.
//!
//! `YewSurface` does not touch the DOM. The controller's calls only change
//! what the explorer's next view will show:
//!
//! - `render` stores a frame (rows, configuration, generation) for the pivot
//!   widget;
//! - `teardown` bumps the container epoch, which is the `key` of the widget
//!   container, so the next frame mounts a brand-new widget instance;
//! - `bind_header_interceptors` turns on header interception for the
//!   widget of that generation only;
//! - `show_placeholder` replaces the widget with the idle placeholder.

use common::controller::PivotSurface;
use common::model::pivot::PivotConfig;
use common::model::row::Row;
use std::rc::Rc;

/// Row view handed to the widget. Equality is identity, so the widget only
/// recomputes when it is given a different view.
#[derive(Debug, Clone)]
pub struct SharedRows(pub Rc<[Row]>);

impl PartialEq for SharedRows {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub rows: SharedRows,
    pub config: PivotConfig,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Placeholder,
    Pivot(RenderFrame),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewCounts {
    pub shown: usize,
    pub total: usize,
    pub columns: usize,
}

#[derive(Debug)]
pub struct YewSurface {
    stage: Stage,
    container_epoch: u64,
    bound_generation: Option<u64>,
    requested_render: Option<u64>,
}

impl Default for YewSurface {
    fn default() -> Self {
        Self {
            stage: Stage::Placeholder,
            container_epoch: 0,
            bound_generation: None,
            requested_render: None,
        }
    }
}

impl YewSurface {
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn container_epoch(&self) -> u64 {
        self.container_epoch
    }

    /// Whether clicks and taps on the current widget's headers open the
    /// filter editor.
    pub fn interception_enabled(&self) -> bool {
        match &self.stage {
            Stage::Pivot(frame) => self.bound_generation == Some(frame.generation),
            Stage::Placeholder => false,
        }
    }

    /// Generation of the last render request not yet picked up by the
    /// settle fallback timer.
    pub fn take_requested_render(&mut self) -> Option<u64> {
        self.requested_render.take()
    }

    /// Figures for the status bar: shown and total records of the base
    /// dataset (`total_records`) and the shown view's column count. All zero
    /// while the placeholder is up.
    pub fn view_counts(&self, total_records: usize) -> ViewCounts {
        match &self.stage {
            Stage::Pivot(frame) => ViewCounts {
                shown: frame.rows.0.len(),
                total: total_records,
                columns: frame.rows.0.first().map_or(0, |row| row.len()),
            },
            Stage::Placeholder => ViewCounts::default(),
        }
    }

    pub fn shown_rows(&self) -> Option<&Rc<[Row]>> {
        match &self.stage {
            Stage::Pivot(frame) => Some(&frame.rows.0),
            Stage::Placeholder => None,
        }
    }
}

impl PivotSurface for YewSurface {
    fn render(&mut self, rows: Rc<[Row]>, config: &PivotConfig, generation: u64) {
        self.stage = Stage::Pivot(RenderFrame {
            rows: SharedRows(rows),
            config: config.clone(),
            generation,
        });
        self.requested_render = Some(generation);
    }

    fn teardown(&mut self) {
        self.container_epoch += 1;
        self.bound_generation = None;
    }

    fn show_placeholder(&mut self) {
        self.stage = Stage::Placeholder;
        self.bound_generation = None;
        self.requested_render = None;
    }

    fn bind_header_interceptors(&mut self, generation: u64) {
        self.bound_generation = Some(generation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::filter_store::FilterStore;
    use common::model::row::CellValue;
    use common::controller::ReconciliationController;

    fn rows() -> Vec<Row> {
        let mut row = Row::new();
        row.insert("Region".into(), CellValue::from("North"));
        vec![row]
    }

    #[test]
    fn interception_follows_the_latest_settled_render() {
        let mut ctl = ReconciliationController::new(FilterStore::new(), YewSurface::default());
        let first = ctl.load_dataset(rows());
        assert!(!ctl.surface().interception_enabled());
        ctl.on_render_settled(first);
        assert!(ctl.surface().interception_enabled());

        ctl.refresh();
        assert!(!ctl.surface().interception_enabled());
    }

    #[test]
    fn teardown_changes_the_container_key() {
        let mut surface = YewSurface::default();
        let epoch = surface.container_epoch();
        surface.teardown();
        assert_eq!(surface.container_epoch(), epoch + 1);
    }

    #[test]
    fn placeholder_reports_zero_counts() {
        let mut ctl = ReconciliationController::new(FilterStore::new(), YewSurface::default());
        ctl.load_dataset(rows());
        let total = ctl.store().record_count();
        assert_eq!(
            ctl.surface().view_counts(total),
            ViewCounts { shown: 1, total: 1, columns: 1 }
        );
        ctl.reset_all();
        let total = ctl.store().record_count();
        assert_eq!(total, 1);
        assert_eq!(ctl.surface().view_counts(total), ViewCounts::default());
        assert_eq!(ctl.surface_mut().take_requested_render(), None);
    }
}
