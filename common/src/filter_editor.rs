//! Draft state of the filter popover for one column.
//!
//! The popover edits a draft; nothing reaches the filter store until the user
//! applies it. For categorical columns the draft tracks the excluded set as
//! checkboxes are toggled and hands the complete set to the store on apply.
//! For numeric columns it keeps the raw text of the min/max inputs.

use crate::analysis::{ColumnAnalysis, ColumnKind};
use crate::model::filter::ColumnFilter;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct FilterDraft {
    pub analysis: ColumnAnalysis,
    state: DraftState,
}

#[derive(Debug, Clone, PartialEq)]
enum DraftState {
    Categorical { excluded: BTreeSet<String> },
    Numeric { min_input: String, max_input: String },
}

impl FilterDraft {
    /// Starts a draft for `analysis`, seeded from the column's current
    /// filter when there is one of the matching kind.
    pub fn new(analysis: ColumnAnalysis, current: Option<&ColumnFilter>) -> Self {
        let state = match &analysis.kind {
            ColumnKind::Numeric { min, max, .. } => {
                let (cur_min, cur_max) = match current {
                    Some(ColumnFilter::NumericRange { min, max }) => (*min, *max),
                    _ => (None, None),
                };
                DraftState::Numeric {
                    min_input: cur_min.unwrap_or(*min).to_string(),
                    max_input: cur_max.unwrap_or(*max).to_string(),
                }
            }
            ColumnKind::Categorical { .. } => DraftState::Categorical {
                excluded: match current {
                    Some(ColumnFilter::Categorical { excluded_values }) => excluded_values.clone(),
                    _ => BTreeSet::new(),
                },
            },
        };
        Self { analysis, state }
    }

    pub fn column(&self) -> &str {
        &self.analysis.name
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.state, DraftState::Numeric { .. })
    }

    /// Checkbox state for `value`: checked means included.
    pub fn is_included(&self, value: &str) -> bool {
        match &self.state {
            DraftState::Categorical { excluded } => !excluded.contains(value),
            DraftState::Numeric { .. } => true,
        }
    }

    pub fn set_included(&mut self, value: &str, included: bool) {
        if let DraftState::Categorical { excluded } = &mut self.state {
            if included {
                excluded.remove(value);
            } else {
                excluded.insert(value.to_string());
            }
        }
    }

    pub fn select_all(&mut self) {
        if let DraftState::Categorical { excluded } = &mut self.state {
            excluded.clear();
        }
    }

    pub fn deselect_all(&mut self) {
        let all = self.analysis.unique_values().cloned().unwrap_or_default();
        if let DraftState::Categorical { excluded } = &mut self.state {
            *excluded = all;
        }
    }

    pub fn min_input(&self) -> &str {
        match &self.state {
            DraftState::Numeric { min_input, .. } => min_input,
            DraftState::Categorical { .. } => "",
        }
    }

    pub fn max_input(&self) -> &str {
        match &self.state {
            DraftState::Numeric { max_input, .. } => max_input,
            DraftState::Categorical { .. } => "",
        }
    }

    pub fn set_min_input(&mut self, text: impl Into<String>) {
        if let DraftState::Numeric { min_input, .. } = &mut self.state {
            *min_input = text.into();
        }
    }

    pub fn set_max_input(&mut self, text: impl Into<String>) {
        if let DraftState::Numeric { max_input, .. } = &mut self.state {
            *max_input = text.into();
        }
    }

    /// Number of values currently excluded (categorical drafts only).
    pub fn excluded_count(&self) -> usize {
        match &self.state {
            DraftState::Categorical { excluded } => excluded.len(),
            DraftState::Numeric { .. } => 0,
        }
    }

    /// The filter to apply, or `None` when the draft leaves the column's
    /// filter unchanged (a numeric draft where neither bound parses).
    pub fn to_filter(&self) -> Option<ColumnFilter> {
        match &self.state {
            DraftState::Categorical { excluded } => Some(ColumnFilter::Categorical {
                excluded_values: excluded.clone(),
            }),
            DraftState::Numeric {
                min_input,
                max_input,
            } => {
                let min = parse_bound(min_input);
                let max = parse_bound(max_input);
                if min.is_none() && max.is_none() {
                    None
                } else {
                    Some(ColumnFilter::NumericRange { min, max })
                }
            }
        }
    }
}

fn parse_bound(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn categorical() -> ColumnAnalysis {
        ColumnAnalysis {
            name: "Region".into(),
            kind: ColumnKind::Categorical {
                unique_values: ["East", "North", "South"].into_iter().map(String::from).collect(),
            },
            total_values: 9,
        }
    }

    fn numeric() -> ColumnAnalysis {
        ColumnAnalysis {
            name: "Sales".into(),
            kind: ColumnKind::Numeric {
                min: 10.0,
                max: 50.0,
                avg: 30.0,
            },
            total_values: 5,
        }
    }

    #[test]
    fn toggling_checkboxes_builds_the_full_excluded_set() {
        let mut draft = FilterDraft::new(categorical(), None);
        draft.set_included("South", false);
        draft.set_included("East", false);
        draft.set_included("East", true);
        assert_eq!(draft.to_filter(), Some(ColumnFilter::excluding(["South"])));
    }

    #[test]
    fn draft_starts_from_the_current_filter() {
        let current = ColumnFilter::excluding(["North"]);
        let draft = FilterDraft::new(categorical(), Some(&current));
        assert!(!draft.is_included("North"));
        assert!(draft.is_included("South"));
    }

    #[test]
    fn select_and_deselect_all() {
        let mut draft = FilterDraft::new(categorical(), None);
        draft.deselect_all();
        assert_eq!(draft.excluded_count(), 3);
        draft.select_all();
        assert_eq!(draft.to_filter(), Some(ColumnFilter::excluding(Vec::<String>::new())));
    }

    #[test]
    fn numeric_inputs_default_to_column_range() {
        let draft = FilterDraft::new(numeric(), None);
        assert_eq!(draft.min_input(), "10");
        assert_eq!(draft.max_input(), "50");
        assert_eq!(draft.to_filter(), Some(ColumnFilter::range(Some(10.0), Some(50.0))));
    }

    #[test]
    fn numeric_inputs_default_to_current_bounds() {
        let current = ColumnFilter::range(Some(20.0), None);
        let draft = FilterDraft::new(numeric(), Some(&current));
        assert_eq!(draft.min_input(), "20");
        assert_eq!(draft.max_input(), "50");
    }

    #[test]
    fn unparseable_bounds_are_dropped() {
        let mut draft = FilterDraft::new(numeric(), None);
        draft.set_min_input("");
        draft.set_max_input("40");
        assert_eq!(draft.to_filter(), Some(ColumnFilter::range(None, Some(40.0))));

        draft.set_max_input("abc");
        assert_eq!(draft.to_filter(), None);
    }
}
