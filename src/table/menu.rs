//! Selection menu over table rows
//!
//! [`TableMenu`] composes the projector, the preset resolver and a
//! [`SelectionEngine`]: every data row becomes an option whose value is the
//! record it was rendered from.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::format::Formatter;
use super::preset;
use super::projector::{ProjectedTable, RowTarget};
use crate::codec;
use crate::config::{DEFAULT_SUFFIX, MenuConfig};
use crate::error::{Result, SelectError};
use crate::frontend::MenuFrontend;
use crate::menu::{KeybindingContext, MenuOption, PreviewBridge, SelectionEngine, SelectionResult};

/// Value behind a table menu option
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableEntry<T> {
    /// A data row
    Record(T),
    /// A caller supplied extra option, carrying its label
    Custom(String),
}

impl<T> TableEntry<T> {
    pub fn record(self) -> Option<T> {
        match self {
            TableEntry::Record(record) => Some(record),
            TableEntry::Custom(_) => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, TableEntry::Custom(_))
    }
}

type RecordPreviewFn<'a, T> = Box<dyn Fn(&T) -> Option<String> + 'a>;

/// Preview for table rows.
///
/// The focused label, as drawn, is looked up in the unescaped row -> record
/// mapping; only labels that belong to a data row reach the preview function.
pub struct TablePreview<'a, T> {
    index: HashMap<String, usize>,
    func: RecordPreviewFn<'a, T>,
}

impl<'a, T> TablePreview<'a, T> {
    pub fn new(table: &ProjectedTable, func: impl Fn(&T) -> Option<String> + 'a) -> Self {
        Self {
            index: table.unescaped_index(),
            func: Box::new(func),
        }
    }

    /// Preview text for the option displayed as `label`
    pub fn preview(&self, label: &str, entry: &TableEntry<T>) -> Option<String> {
        let TableEntry::Record(record) = entry else {
            return None;
        };
        let row = label.strip_suffix(DEFAULT_SUFFIX).unwrap_or(label);
        if self.index.contains_key(row) {
            (self.func)(record)
        } else {
            None
        }
    }

    pub fn into_bridge(self) -> PreviewBridge<'a, TableEntry<T>>
    where
        T: 'a,
    {
        PreviewBridge::with_label(move |label, entry| self.preview(label, entry))
    }
}

impl<T> std::fmt::Debug for TablePreview<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TablePreview")
            .field("rows", &self.index.len())
            .finish_non_exhaustive()
    }
}

/// Menu whose options are the rows of a rendered table.
///
/// Rows keep record order: table menus never sort. `config.extra_options`
/// become custom rows below the data, and `config.header` is shown above
/// the column titles.
pub struct TableMenu<'a, T, F> {
    records: Vec<T>,
    formatter: F,
    config: MenuConfig,
    presets: Vec<T>,
    default: Option<T>,
    preview: Option<RecordPreviewFn<'a, T>>,
    keybindings: KeybindingContext,
}

impl<'a, T, F> TableMenu<'a, T, F>
where
    F: Formatter<T>,
{
    pub fn new(records: Vec<T>, formatter: F, config: MenuConfig) -> Self {
        Self {
            records,
            formatter,
            config: config.with_sort(false),
            presets: Vec::new(),
            default: None,
            preview: None,
            keybindings: KeybindingContext::default(),
        }
    }

    /// Records selected previously; checked (multi) or focused (single)
    pub fn with_presets(mut self, presets: Vec<T>) -> Self {
        self.presets = presets;
        self
    }

    /// Record offered as the default entry, pinned first
    pub fn with_default(mut self, record: T) -> Self {
        self.default = Some(record);
        self
    }

    pub fn with_preview(mut self, func: impl Fn(&T) -> Option<String> + 'a) -> Self {
        self.preview = Some(Box::new(func));
        self
    }

    pub fn with_keybindings(mut self, keybindings: KeybindingContext) -> Self {
        self.keybindings = keybindings;
        self
    }

    /// Show the table and block until the operator resolves it
    pub fn run<Fr>(self, frontend: &mut Fr) -> Result<SelectionResult<TableEntry<T>>>
    where
        Fr: MenuFrontend + ?Sized,
        T: 'a,
    {
        let Self {
            records,
            formatter,
            mut config,
            presets,
            default,
            preview,
            keybindings,
        } = self;

        let table = ProjectedTable::project(&records, &formatter, &config.extra_options)?;
        let preset_keys = preset::resolve(&presets, &formatter, &table);

        if let Some(record) = &default {
            let key = preset::resolve(std::slice::from_ref(record), &formatter, &table)
                .into_iter()
                .next()
                .ok_or_else(|| SelectError::config("default record is not part of the table"))?;
            config.default = Some(key);
        }

        let table_header = table.header().join("\n");
        config.header = match (config.header.take(), table_header.is_empty()) {
            (Some(text), false) => Some(format!("{text}\n{table_header}")),
            (Some(text), true) => Some(text),
            (None, false) => Some(table_header),
            (None, true) => None,
        };

        let mut slots: Vec<Option<T>> = records.into_iter().map(Some).collect();
        let options: Vec<MenuOption<TableEntry<T>>> = table
            .selectable()
            .filter_map(|row| match row.target {
                // Drawn unescaped, and kept selectable even when blank
                RowTarget::Record(idx) => slots[idx].take().map(|record| {
                    MenuOption::new(row.key.clone(), TableEntry::Record(record))
                        .with_display(codec::unescape(&row.key))
                        .keep_blank()
                }),
                RowTarget::Custom => Some(MenuOption::new(
                    row.key.clone(),
                    TableEntry::Custom(row.key.clone()),
                )),
                RowTarget::Header => None,
            })
            .collect();

        debug!(
            rows = options.len(),
            presets = preset_keys.len(),
            "table menu prepared"
        );

        let mut engine = SelectionEngine::new(options, config)?
            .with_presets(preset_keys)
            .with_keybindings(keybindings);
        if let Some(func) = preview {
            engine = engine.with_preview(TablePreview::new(&table, func).into_bridge());
        }

        engine.run(frontend)
    }
}
