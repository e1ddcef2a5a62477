//! Typed view of a single dataset row.

use serde::Serialize;
use std::collections::BTreeMap;

use super::{Field, Value};

/// One row of the snapshot, readable through logical keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRow {
    index: usize,
    cells: Vec<(String, Value)>,
    fields: BTreeMap<Field, Value>,
}

impl LocationRow {
    pub(crate) fn new(
        index: usize,
        cells: Vec<(String, Value)>,
        fields: BTreeMap<Field, Value>,
    ) -> Self {
        Self {
            index,
            cells,
            fields,
        }
    }

    /// Position of the row in the snapshot (CSV order, zero based).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value behind a logical key, `None` when the loaded file lacks that column.
    pub fn get(&self, field: Field) -> Option<&Value> {
        self.fields.get(&field)
    }

    pub fn number(&self, field: Field) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    /// Location name as spelled in the dataset.
    pub fn location_name(&self) -> Option<&str> {
        self.get(Field::Location).and_then(Value::as_str)
    }

    /// Every physical cell, in column order.
    pub fn cells(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }
}
