//! Recovery of a prior selection inside a freshly rendered table
//!
//! Rendering the preset records on their own yields different column widths
//! than rendering them inside the full table, so their rows only match the
//! full-table rows once whitespace is ignored.

use std::collections::HashMap;

use tracing::debug;

use super::format::Formatter;
use super::projector::ProjectedTable;
use crate::codec;

fn normalize(row: &str) -> String {
    row.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Full-table row keys matching `presets`, in preset order.
///
/// Presets that no longer appear in the table are dropped.
pub fn resolve<T, F>(presets: &[T], formatter: &F, table: &ProjectedTable) -> Vec<String>
where
    F: Formatter<T> + ?Sized,
{
    if presets.is_empty() {
        return Vec::new();
    }

    let lookup: HashMap<String, &str> = table
        .record_rows()
        .map(|(key, _)| (normalize(key), key))
        .collect();

    let rendered = formatter.format(presets);
    let mut resolved: Vec<String> = Vec::new();

    for row in &rendered.rows {
        let normalized = normalize(&codec::escape(row));
        match lookup.get(&normalized) {
            Some(key) => {
                if !resolved.iter().any(|r| r == key) {
                    resolved.push((*key).to_string());
                }
            }
            None => debug!(row = %row, "dropping stale preset"),
        }
    }

    resolved
}
