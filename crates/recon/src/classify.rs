use serde::Serialize;

use crate::model::{CompareSummary, ComparisonRow};

/// Where a comparison row landed. This is the whole contract between the
/// engine and the report styling: one state per row, one color per state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    Equal,
    Different,
    NotFound,
}

impl MatchState {
    pub fn of(row: &ComparisonRow) -> MatchState {
        if !row.found {
            Self::NotFound
        } else if row.equal {
            Self::Equal
        } else {
            Self::Different
        }
    }

    /// CSS class suffix used by the HTML renderer.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Different => "different",
            Self::NotFound => "not-found",
        }
    }
}

impl std::fmt::Display for MatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equal => write!(f, "equal"),
            Self::Different => write!(f, "different"),
            Self::NotFound => write!(f, "not_found"),
        }
    }
}

/// Tally rows by state.
pub fn compute_summary(rows: &[ComparisonRow]) -> CompareSummary {
    let mut summary = CompareSummary {
        total_rows: rows.len(),
        ..Default::default()
    };
    for row in rows {
        match MatchState::of(row) {
            MatchState::Equal => summary.equal += 1,
            MatchState::Different => summary.differing += 1,
            MatchState::NotFound => summary.not_found += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordia_core::Value;

    fn row(found: bool, equal: bool, difference: Option<f64>) -> ComparisonRow {
        ComparisonRow {
            key: "os-1".into(),
            left_value: Value::Number(100.0),
            right_value: if found { Value::Number(90.0) } else { Value::Missing },
            found,
            equal,
            difference,
        }
    }

    #[test]
    fn state_follows_found_then_equal() {
        assert_eq!(MatchState::of(&row(false, false, None)), MatchState::NotFound);
        assert_eq!(MatchState::of(&row(true, true, Some(0.0))), MatchState::Equal);
        assert_eq!(MatchState::of(&row(true, false, Some(10.0))), MatchState::Different);
    }

    #[test]
    fn summary_counts_every_row_once() {
        let rows = vec![
            row(true, true, Some(0.0)),
            row(true, false, Some(10.0)),
            row(true, false, Some(-4.0)),
            row(false, false, None),
        ];
        let summary = compute_summary(&rows);
        assert_eq!(summary.total_rows, 4);
        assert_eq!(summary.equal, 1);
        assert_eq!(summary.differing, 2);
        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.equal + summary.differing + summary.not_found, summary.total_rows);
    }

    #[test]
    fn css_classes_are_stable() {
        // The report stylesheet keys off these names.
        assert_eq!(MatchState::Equal.css_class(), "equal");
        assert_eq!(MatchState::Different.css_class(), "different");
        assert_eq!(MatchState::NotFound.css_class(), "not-found");
    }
}
