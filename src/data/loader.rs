//! CSV Ingest Module
//! Reads a CSV file, normalises its text encoding and parses it with Polars.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use polars::prelude::*;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

use super::DatasetError;

/// A freshly parsed table plus the decoder that produced its text.
pub struct LoadedTable {
    pub df: DataFrame,
    pub encoding: &'static str,
}

/// Read and parse `path` into a `DataFrame`. Column types are inferred from
/// every row.
///
/// Fails on a missing/unreadable file, text Polars cannot parse, a file
/// without a header, or a header with no data rows.
pub fn read_table(path: &Path) -> Result<LoadedTable, DatasetError> {
    let bytes = fs::read(path).map_err(|e| DatasetError::load(path, e.to_string()))?;
    let (text, encoding) = decode_text(&bytes);
    debug!(path = %path.display(), bytes = bytes.len(), encoding = encoding.name(), "decoded csv");

    if text.trim().is_empty() {
        return Err(DatasetError::load(path, "file is empty"));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
        .map_err(|e| DatasetError::load(path, e.to_string()))?;

    if df.width() == 0 {
        return Err(DatasetError::load(path, "no columns found"));
    }
    if df.height() == 0 {
        return Err(DatasetError::load(path, "no data rows"));
    }

    Ok(LoadedTable {
        df,
        encoding: encoding.name(),
    })
}

/// Decode raw bytes to UTF-8 text.
///
/// A BOM wins; otherwise valid UTF-8 is taken as is and anything else is read
/// as Latin-1 (Windows-1252), which never fails.
pub fn decode_text(bytes: &[u8]) -> (String, &'static Encoding) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (text.into_owned(), encoding);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), UTF_8),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            (text.into_owned(), WINDOWS_1252)
        }
    }
}
