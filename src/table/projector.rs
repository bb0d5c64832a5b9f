//! Projection of records into selectable table rows
//!
//! The projector renders records once through a [`Formatter`] and keeps an
//! ordered mapping from each display row to the record it came from. Row
//! order always equals record order; sorting is the engine's business.

use std::collections::HashMap;

use tracing::debug;

use super::format::Formatter;
use crate::codec;
use crate::error::{Result, SelectError};

/// Prefix that aligns header rows with the `"> "` cursor of selectable rows
pub const HEADER_PADDING: &str = "  ";

/// What a projected row points to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    /// Column titles or separator line, never selectable
    Header,
    /// Index into the projected record slice
    Record(usize),
    /// Caller supplied extra option without a backing record
    Custom,
}

/// One row of a projected table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow {
    /// Escaped row text, used as the option label
    pub key: String,
    pub target: RowTarget,
}

/// Ordered row -> record mapping for one menu invocation
#[derive(Debug, Clone, Default)]
pub struct ProjectedTable {
    rows: Vec<ProjectedRow>,
    index: HashMap<String, usize>,
}

impl ProjectedTable {
    /// Render `records` and build the row mapping.
    ///
    /// Fails when there would be nothing selectable. Panics if the formatter
    /// returns a row count that differs from the record count.
    pub fn project<T, F>(records: &[T], formatter: &F, custom_options: &[String]) -> Result<Self>
    where
        F: Formatter<T> + ?Sized,
    {
        if records.is_empty() && custom_options.is_empty() {
            return Err(SelectError::config(
                "table menu requires at least one record or custom option",
            ));
        }

        let mut table = Self::default();

        if !records.is_empty() {
            let formatted = formatter.format(records);
            assert_eq!(
                formatted.rows.len(),
                records.len(),
                "formatter produced {} rows for {} records",
                formatted.rows.len(),
                records.len()
            );

            for line in &formatted.header {
                table.push(format!("{HEADER_PADDING}{line}"), RowTarget::Header);
            }
            for (idx, row) in formatted.rows.iter().enumerate() {
                table.push(codec::escape(row), RowTarget::Record(idx));
            }
        }

        for custom in custom_options {
            table.push(custom.clone(), RowTarget::Custom);
        }

        debug!(
            records = records.len(),
            custom = custom_options.len(),
            "projected table rows"
        );
        Ok(table)
    }

    fn push(&mut self, key: String, target: RowTarget) {
        self.index.entry(key.clone()).or_insert(self.rows.len());
        self.rows.push(ProjectedRow { key, target });
    }

    /// All rows, header first
    pub fn rows(&self) -> &[ProjectedRow] {
        &self.rows
    }

    /// The two header lines (empty when the table has only custom options)
    pub fn header(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.target == RowTarget::Header)
            .map(|row| row.key.as_str())
            .collect()
    }

    /// Rows that may be offered as options, in display order
    pub fn selectable(&self) -> impl Iterator<Item = &ProjectedRow> {
        self.rows.iter().filter(|row| row.target != RowTarget::Header)
    }

    pub fn selectable_len(&self) -> usize {
        self.selectable().count()
    }

    /// Data rows only (keys that map to a record)
    pub fn record_rows(&self) -> impl Iterator<Item = (&str, usize)> {
        self.rows.iter().filter_map(|row| match row.target {
            RowTarget::Record(idx) => Some((row.key.as_str(), idx)),
            _ => None,
        })
    }

    pub fn target(&self, key: &str) -> Option<RowTarget> {
        self.index.get(key).map(|&pos| self.rows[pos].target)
    }

    pub fn record_index(&self, key: &str) -> Option<usize> {
        match self.target(key)? {
            RowTarget::Record(idx) => Some(idx),
            _ => None,
        }
    }

    pub fn is_header(&self, key: &str) -> bool {
        self.target(key) == Some(RowTarget::Header)
    }

    /// Unescaped row text -> record index
    pub fn unescaped_index(&self) -> HashMap<String, usize> {
        self.record_rows()
            .map(|(key, idx)| (codec::unescape(key), idx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::format::FormattedTable;

    fn lines(records: &[&str]) -> FormattedTable {
        FormattedTable {
            header: ["name | kind".to_string(), "-----------".to_string()],
            rows: records.iter().map(|r| format!("{r} | disk")).collect(),
        }
    }

    #[test]
    fn test_rows_follow_record_order() {
        let records = ["sdb", "sda", "nvme0n1"];
        let table = ProjectedTable::project(&records[..], &lines, &[]).unwrap();

        let mapped: Vec<usize> = table.record_rows().map(|(_, idx)| idx).collect();
        assert_eq!(mapped, vec![0, 1, 2]);
        assert_eq!(table.selectable_len(), 3);
    }

    #[test]
    fn test_header_rows_are_padded_and_not_selectable() {
        let table = ProjectedTable::project(&["sda"][..], &lines, &[]).unwrap();
        assert_eq!(table.header(), vec!["  name | kind", "  -----------"]);
        assert!(table.is_header("  name | kind"));
        assert!(table.selectable().all(|row| row.target != RowTarget::Header));
    }

    #[test]
    fn test_separator_escaped_in_keys() {
        let table = ProjectedTable::project(&["sda"][..], &lines, &[]).unwrap();
        assert_eq!(table.record_index("sda \\| disk"), Some(0));
        assert_eq!(table.record_index("sda | disk"), None);
        assert_eq!(table.unescaped_index().get("sda | disk"), Some(&0));
    }

    #[test]
    fn test_custom_options_appended() {
        let custom = vec!["Add a new partition".to_string()];
        let table = ProjectedTable::project(&["sda"][..], &lines, &custom).unwrap();
        let last = table.rows().last().unwrap();
        assert_eq!(last.key, "Add a new partition");
        assert_eq!(last.target, RowTarget::Custom);
        assert_eq!(table.selectable_len(), 2);
    }

    #[test]
    fn test_only_custom_options() {
        let custom = vec!["Create new".to_string()];
        let table = ProjectedTable::project(&[] as &[&str], &lines, &custom).unwrap();
        assert!(table.header().is_empty());
        assert_eq!(table.selectable_len(), 1);
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = ProjectedTable::project(&[] as &[&str], &lines, &[]).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    #[should_panic(expected = "formatter produced")]
    fn test_formatter_contract_violation_panics() {
        let broken = |_: &[&str]| FormattedTable::default();
        let _ = ProjectedTable::project(&["sda"][..], &broken, &[]);
    }
}
