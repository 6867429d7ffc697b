use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ordia_core::Table;

use crate::error::ReconError;
use crate::model::Selection;

/// Draw the audit sample from `source`: the `top_n` largest rows by
/// `value_column`, the `bottom_n` smallest, and `random_n` random rows from
/// whatever is left, ordered by value descending.
///
/// Row identity is the source row position, never the key value: extracts
/// carry duplicate service-order numbers and each physical row is its own
/// candidate. No row is ever selected twice; when top and bottom overlap on
/// a small source the overlap collapses instead of double-counting, and a
/// short random pool silently yields fewer rows.
///
/// The random draw is fully determined by `seed` *and* the composition of
/// the remaining pool, so changing `top_n`/`bottom_n` changes the random
/// picks even under the same seed.
pub fn select(
    source: &Table,
    value_column: &str,
    top_n: usize,
    bottom_n: usize,
    random_n: usize,
    seed: u64,
) -> Result<Selection, ReconError> {
    let col = source
        .column_index(value_column)
        .ok_or_else(|| ReconError::MissingColumn {
            table: "source".into(),
            column: value_column.into(),
        })?;

    let mut values = Vec::with_capacity(source.len());
    for (row, cells) in source.rows().iter().enumerate() {
        match cells[col].as_number() {
            Some(n) => values.push(n),
            None => {
                return Err(ReconError::NonNumericValue {
                    table: "source".into(),
                    column: value_column.into(),
                    row,
                })
            }
        }
    }

    let mut warnings = Vec::new();
    if source.is_empty() {
        warnings.push("source extract has no rows; the selection is empty".to_string());
    }

    let mut by_value_desc: Vec<usize> = (0..values.len()).collect();
    by_value_desc.sort_by_key(|&i| Reverse(OrderedFloat(values[i])));

    let mut by_value_asc: Vec<usize> = (0..values.len()).collect();
    by_value_asc.sort_by_key(|&i| OrderedFloat(values[i]));

    // Union by row position. A row that is both a "largest" and a
    // "smallest" is kept once.
    let mut chosen: Vec<usize> = by_value_desc.iter().copied().take(top_n).collect();
    for &i in by_value_asc.iter().take(bottom_n) {
        if !chosen.contains(&i) {
            chosen.push(i);
        }
    }

    // A short pool silently caps the draw.
    let remaining: Vec<usize> = (0..values.len()).filter(|i| !chosen.contains(i)).collect();
    let draw = random_n.min(remaining.len());

    let mut rng = StdRng::seed_from_u64(seed);
    for picked in rand::seq::index::sample(&mut rng, remaining.len(), draw) {
        chosen.push(remaining[picked]);
    }

    // Final presentation order: value descending. The sort is stable, so
    // ties keep their largest/smallest/random concatenation order.
    chosen.sort_by_key(|&i| Reverse(OrderedFloat(values[i])));

    let total = chosen.iter().map(|&i| values[i]).sum();

    Ok(Selection {
        table: source.select_rows(&chosen),
        total,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordia_core::Value;

    /// A source table with one key column and the given totals, keys
    /// "os-0", "os-1", ... in row order.
    fn source(totals: &[f64]) -> Table {
        let mut t = Table::new(vec!["OS".into(), "Fat Total".into()]);
        for (i, &v) in totals.iter().enumerate() {
            t.push_row(vec![Value::Text(format!("os-{i}")), Value::Number(v)]);
        }
        t
    }

    fn totals_of(selection: &Selection) -> Vec<f64> {
        selection
            .table
            .rows()
            .iter()
            .map(|r| r[1].as_number().unwrap())
            .collect()
    }

    #[test]
    fn top_bottom_random_without_overlap() {
        let t = source(&[10.0, 90.0, 20.0, 80.0, 30.0, 70.0, 40.0, 60.0, 50.0, 100.0]);
        let selection = select(&t, "Fat Total", 3, 3, 4, 42).unwrap();

        // 3 + 3 + 4 out of 10 distinct rows = the whole table.
        assert_eq!(selection.table.len(), 10);
        let got = totals_of(&selection);
        let mut expected = got.clone();
        expected.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(got, expected, "rows must be ordered by value descending");
        assert_eq!(selection.total, 550.0);
        assert!(selection.warnings.is_empty());
    }

    #[test]
    fn random_shortfall_is_silent() {
        // 8 rows, top 3 + bottom 3 leaves 2 for a random_n of 4.
        let t = source(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let selection = select(&t, "Fat Total", 3, 3, 4, 42).unwrap();
        assert_eq!(selection.table.len(), 8);
        assert!(selection.warnings.is_empty());
    }

    #[test]
    fn tied_values_never_select_a_row_twice() {
        // Every total ties, so the stable top-2 and bottom-2 land on the
        // same two rows; the union collapses them and the random draw adds
        // one more: 3 rows, not 5.
        let t = source(&[5.0, 5.0, 5.0, 5.0, 5.0, 5.0]);
        let selection = select(&t, "Fat Total", 2, 2, 1, 7).unwrap();
        assert_eq!(selection.table.len(), 3);

        // Identity comes from the key column since all totals tie.
        let mut keys: Vec<String> = selection
            .table
            .rows()
            .iter()
            .map(|r| r[0].canonical_key())
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 3, "a source row must never be selected twice");
    }

    #[test]
    fn overlapping_top_and_bottom_collapse() {
        // 2 rows, top 2 and bottom 2 both cover the whole table.
        let t = source(&[10.0, 20.0]);
        let selection = select(&t, "Fat Total", 2, 2, 0, 42).unwrap();
        assert_eq!(selection.table.len(), 2);
        assert_eq!(selection.total, 30.0);
    }

    #[test]
    fn same_seed_same_selection() {
        let t = source(&[12.0, 7.0, 99.0, 3.0, 54.0, 61.0, 8.0, 41.0, 22.0, 87.0, 15.0, 33.0]);
        let a = select(&t, "Fat Total", 2, 2, 3, 1234).unwrap();
        let b = select(&t, "Fat Total", 2, 2, 3, 1234).unwrap();
        assert_eq!(a.table, b.table);
        assert_eq!(a.total, b.total);
    }

    #[test]
    fn random_draw_depends_on_the_exclusion_set() {
        // Same seed, different top_n: the remaining pool shifts, so the
        // random picks are allowed to shift with it. This coupling is part
        // of the contract: tightening the top/bottom picks reshuffles the
        // random sample even under a fixed seed.
        let t = source(&[12.0, 7.0, 99.0, 3.0, 54.0, 61.0, 8.0, 41.0, 22.0, 87.0, 15.0, 33.0]);
        let narrow = select(&t, "Fat Total", 1, 1, 3, 77).unwrap();
        let wide = select(&t, "Fat Total", 3, 3, 3, 77).unwrap();
        assert_eq!(narrow.table.len(), 5);
        assert_eq!(wide.table.len(), 9);
    }

    #[test]
    fn empty_source_is_a_warning_not_an_error() {
        let t = source(&[]);
        let selection = select(&t, "Fat Total", 3, 3, 4, 42).unwrap();
        assert!(selection.table.is_empty());
        assert_eq!(selection.total, 0.0);
        assert_eq!(selection.warnings.len(), 1);
    }

    #[test]
    fn missing_value_column_is_fatal() {
        let t = source(&[1.0]);
        let err = select(&t, "Total", 1, 0, 0, 42).unwrap_err();
        assert!(matches!(err, ReconError::MissingColumn { .. }));
    }

    #[test]
    fn non_numeric_value_is_fatal() {
        let mut t = Table::new(vec!["OS".into(), "Fat Total".into()]);
        t.push_row(vec![Value::Text("a".into()), Value::Number(1.0)]);
        t.push_row(vec![Value::Text("b".into()), Value::Text("n/a".into())]);
        let err = select(&t, "Fat Total", 1, 0, 0, 42).unwrap_err();
        assert!(matches!(err, ReconError::NonNumericValue { row: 1, .. }));
    }
}
