//! Dataset Store Module
//! Owns the loaded snapshot and answers column and row lookups.

use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::fields::{Field, FieldTranslator, LOCATION_ALIASES};
use super::loader;
use super::row::LocationRow;
use super::value::Value;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to load dataset {}: {reason}", path.display())]
    DatasetLoad { path: PathBuf, reason: String },
    #[error("No location column in dataset (expected one of: {})", LOCATION_ALIASES.join(", "))]
    UnresolvedLocationColumn,
    #[error("Unknown field '{0}'")]
    UnknownField(String),
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),
    #[error("{value} not found in provided CSV")]
    NotFound { value: String },
    #[error("No dataset loaded")]
    NotReady,
    #[error("Snapshot query failed: {0}")]
    Snapshot(#[from] PolarsError),
}

impl DatasetError {
    pub(crate) fn load(path: &Path, reason: impl Into<String>) -> Self {
        DatasetError::DatasetLoad {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Lifecycle of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Empty,
    Loading,
    Ready,
}

struct Snapshot {
    df: DataFrame,
    source: PathBuf,
    encoding: &'static str,
}

impl Snapshot {
    fn column(&self, name: &str) -> Result<&Column, DatasetError> {
        self.df
            .column(name)
            .map_err(|_| DatasetError::ColumnNotFound(name.to_string()))
    }
}

enum State {
    Empty,
    Loading,
    Ready(Snapshot),
}

/// In-memory store for one CSV snapshot.
///
/// `load` needs `&mut self` while lookups take `&self`, so a reload can never
/// overlap a read of the snapshot it replaces.
pub struct DatasetStore {
    state: State,
    translator: FieldTranslator,
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetStore {
    pub fn new() -> Self {
        Self {
            state: State::Empty,
            translator: FieldTranslator::new(),
        }
    }

    /// Load `csv_path`, replacing any previous snapshot.
    ///
    /// The previous snapshot is dropped before reading starts; on failure the
    /// store is left `Empty`.
    pub fn load(&mut self, csv_path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = csv_path.as_ref();
        self.state = State::Loading;
        self.translator.reset();
        debug!(path = %path.display(), "loading dataset");

        let table = match loader::read_table(path) {
            Ok(table) => table,
            Err(e) => {
                self.state = State::Empty;
                return Err(e);
            }
        };

        let location = self
            .translator
            .bind_location_alias(table.df.get_column_names().iter().map(|c| c.as_str()));
        match location {
            Some(column) => debug!(column, "location column bound"),
            None => debug!("no location column alias present"),
        }

        debug!(
            rows = table.df.height(),
            columns = table.df.width(),
            encoding = table.encoding,
            "dataset ready"
        );
        self.state = State::Ready(Snapshot {
            df: table.df,
            source: path.to_path_buf(),
            encoding: table.encoding,
        });
        Ok(())
    }

    pub fn state(&self) -> StoreState {
        match self.state {
            State::Empty => StoreState::Empty,
            State::Loading => StoreState::Loading,
            State::Ready(_) => StoreState::Ready,
        }
    }

    fn snapshot(&self) -> Result<&Snapshot, DatasetError> {
        match &self.state {
            State::Ready(snapshot) => Ok(snapshot),
            State::Empty | State::Loading => Err(DatasetError::NotReady),
        }
    }

    /// Every value of the column behind `field`, in row order.
    pub fn query_column(&self, field: Field) -> Result<Vec<Value>, DatasetError> {
        let snapshot = self.snapshot()?;
        let name = self.translator.resolve(field)?;
        let column = snapshot.column(name)?;

        let values = (0..column.len())
            .map(|i| column.get(i).map(Value::from))
            .collect::<PolarsResult<Vec<_>>>()?;
        Ok(values)
    }

    /// First row whose `field` equals `match_value`, ignoring case.
    pub fn find_row(&self, field: Field, match_value: &str) -> Result<LocationRow, DatasetError> {
        let snapshot = self.snapshot()?;
        let name = self.translator.resolve(field)?;
        let column = snapshot.column(name)?;
        let needle = match_value.to_lowercase();

        for idx in 0..column.len() {
            let cell = Value::from(column.get(idx)?);
            if !cell.is_null() && cell.to_string().to_lowercase() == needle {
                return self.row_at(snapshot, idx);
            }
        }

        Err(DatasetError::NotFound {
            value: match_value.to_string(),
        })
    }

    /// `query_column` for a user-typed logical key.
    pub fn query_column_by_key(&self, key: &str) -> Result<Vec<Value>, DatasetError> {
        self.query_column(key.parse()?)
    }

    /// `find_row` for a user-typed logical key.
    pub fn find_row_by_key(&self, key: &str, match_value: &str) -> Result<LocationRow, DatasetError> {
        self.find_row(key.parse()?, match_value)
    }

    fn row_at(&self, snapshot: &Snapshot, idx: usize) -> Result<LocationRow, DatasetError> {
        let cells = snapshot
            .df
            .get_columns()
            .iter()
            .map(|c| Ok((c.name().to_string(), Value::from(c.get(idx)?))))
            .collect::<PolarsResult<Vec<_>>>()?;

        let fields: BTreeMap<Field, Value> = Field::ALL
            .into_iter()
            .filter_map(|field| {
                let name = self.translator.resolve(field).ok()?;
                let (_, value) = cells.iter().find(|(column, _)| column == name)?;
                Some((field, value.clone()))
            })
            .collect();

        Ok(LocationRow::new(idx, cells, fields))
    }

    /// Number of rows in the snapshot, 0 unless ready.
    pub fn row_count(&self) -> usize {
        self.snapshot().map(|s| s.df.height()).unwrap_or(0)
    }

    /// Physical column names of the snapshot.
    pub fn columns(&self) -> Vec<String> {
        self.snapshot()
            .map(|s| {
                s.df.get_column_names()
                    .iter()
                    .map(|c| c.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the snapshot carries the column behind `field`.
    pub fn has_field(&self, field: Field) -> bool {
        match (self.snapshot(), self.translator.resolve(field)) {
            (Ok(snapshot), Ok(name)) => snapshot.df.column(name).is_ok(),
            _ => false,
        }
    }

    /// Column the `location` key is currently bound to.
    pub fn location_column(&self) -> Option<&'static str> {
        self.translator.location_column()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.snapshot().ok().map(|s| s.source.as_path())
    }

    /// Name of the decoder used for the snapshot's text, e.g. `"UTF-8"`.
    pub fn encoding(&self) -> Option<&'static str> {
        self.snapshot().ok().map(|s| s.encoding)
    }
}
