//! Data module - CSV ingest, field translation and lookups

pub mod fields;
pub mod loader;
mod row;
mod store;
mod value;

pub use fields::{Field, FieldTranslator, LOCATION_ALIASES};
pub use row::LocationRow;
pub use store::{DatasetError, DatasetStore, StoreState};
pub use value::Value;
