use std::collections::{HashMap, HashSet};

use ordia_core::{Table, Value};

use crate::classify::compute_summary;
use crate::error::ReconError;
use crate::model::{Comparison, ComparisonRow, OutputLayout};

/// Join `reference` against `candidate` by canonicalized key and derive, per
/// reference row: the candidate value (or `Missing`), a found flag, an exact
/// equality flag, and the signed difference `reference - candidate`.
///
/// Left outer join, reference order. When a key matches several candidate
/// rows only the first one (candidate order) is consulted; when it matches
/// none the row is reported not-found with a `None` difference, never a
/// zero. A candidate extract missing the key or value column entirely is a
/// configuration error; a blank cell in an otherwise present column is just
/// an absent value.
pub fn reconcile(
    reference: &Table,
    candidate: &Table,
    key_column: &str,
    value_column: &str,
    reference_label: &str,
    candidate_label: &str,
) -> Result<Comparison, ReconError> {
    let ref_key = column(reference, "reference", key_column)?;
    let ref_val = column(reference, "reference", value_column)?;
    let cand_key = column(candidate, "candidate", key_column)?;
    let cand_val = column(candidate, "candidate", value_column)?;

    let mut warnings = Vec::new();
    if reference.is_empty() {
        warnings.push("reference extract has no rows; the comparison is empty".to_string());
    }
    if candidate.is_empty() && !reference.is_empty() {
        warnings.push(
            "candidate extract has no rows; every service order will be reported as not found"
                .to_string(),
        );
    }

    // Index only the keys the reference actually uses. Purely a size
    // optimization for large production dumps; the join below defines the
    // output.
    let wanted: HashSet<String> = reference
        .rows()
        .iter()
        .map(|row| row[ref_key].canonical_key())
        .collect();

    // First candidate match wins, in candidate order.
    let mut first_match: HashMap<String, usize> = HashMap::new();
    for (i, row) in candidate.rows().iter().enumerate() {
        let key = row[cand_key].canonical_key();
        if wanted.contains(&key) {
            first_match.entry(key).or_insert(i);
        }
    }

    let mut rows = Vec::with_capacity(reference.len());
    for ref_row in reference.rows() {
        let key = ref_row[ref_key].canonical_key();
        let left_value = ref_row[ref_val].clone();
        let (found, right_value) = match first_match.get(&key) {
            Some(&i) => (true, candidate.rows()[i][cand_val].clone()),
            None => (false, Value::Missing),
        };

        let equal = found && left_value.known_eq(&right_value);

        // Subtraction over a missing operand yields a missing difference,
        // also for found rows whose value cell is blank.
        let difference = if found {
            match (left_value.as_number(), right_value.as_number()) {
                (Some(l), Some(r)) => Some(l - r),
                _ => None,
            }
        } else {
            None
        };

        rows.push(ComparisonRow {
            key,
            left_value,
            right_value,
            found,
            equal,
            difference,
        });
    }

    if !reference.is_empty() && !candidate.is_empty() && rows.iter().all(|r| !r.found) {
        warnings.push("no service order from the reference was found in the candidate".to_string());
    }

    let (table, layout) = build_output_table(
        reference,
        ref_key,
        ref_val,
        &rows,
        value_column,
        reference_label,
        candidate_label,
    );
    let summary = compute_summary(&rows);

    Ok(Comparison {
        rows,
        table,
        layout,
        summary,
        warnings,
    })
}

fn column(table: &Table, which: &str, name: &str) -> Result<usize, ReconError> {
    table
        .column_index(name)
        .ok_or_else(|| ReconError::MissingColumn {
            table: which.into(),
            column: name.into(),
        })
}

/// Assemble the report table: key, both value columns, the derived fields,
/// then every remaining reference column untouched.
///
/// Both extracts carry the value column under the same configured name, so
/// the reference copy takes the reference label to break the collision; an
/// empty reference label keeps the plain name. The candidate copy is always
/// labeled; an unlabeled second copy would be unreadable next to the
/// derived columns.
fn build_output_table(
    reference: &Table,
    ref_key: usize,
    ref_val: usize,
    rows: &[ComparisonRow],
    value_column: &str,
    reference_label: &str,
    candidate_label: &str,
) -> (Table, OutputLayout) {
    let left_name = if reference_label.is_empty() {
        value_column.to_string()
    } else {
        format!("{value_column}_{reference_label}")
    };
    let right_name = format!("{value_column}_{candidate_label}");

    let extra: Vec<usize> = (0..reference.columns().len())
        .filter(|&i| i != ref_key && i != ref_val)
        .collect();

    let mut columns = vec![
        reference.columns()[ref_key].clone(),
        left_name,
        right_name,
        format!("{value_column}_equal"),
        format!("{value_column}_difference"),
        format!("found_in_{candidate_label}"),
    ];
    columns.extend(extra.iter().map(|&i| reference.columns()[i].clone()));

    let layout = OutputLayout {
        key: 0,
        left_value: 1,
        right_value: 2,
        equal: 3,
        difference: 4,
        found: 5,
    };

    let mut table = Table::new(columns);
    for (row, ref_row) in rows.iter().zip(reference.rows()) {
        let mut cells = vec![
            Value::Text(row.key.clone()),
            row.left_value.clone(),
            row.right_value.clone(),
            Value::Bool(row.equal),
            row.difference.map_or(Value::Missing, Value::Number),
            Value::Bool(row.found),
        ];
        cells.extend(extra.iter().map(|&i| ref_row[i].clone()));
        table.push_row(cells);
    }

    (table, layout)
}
