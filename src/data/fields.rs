//! Field Translator Module
//! Maps logical query keys onto the physical CSV column names.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::DatasetError;

/// Candidate headers for the location column, in preference order.
pub const LOCATION_ALIASES: [&str; 2] = ["laua_name", "la_name"];

/// Logical keys a caller may query by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Location,
    MaxDlSpeed,
    MinDlSpeed,
    MaxUlSpeed,
    MinUlSpeed,
    AvgDlSpeed,
    AvgUlSpeed,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Location,
        Field::MaxDlSpeed,
        Field::MinDlSpeed,
        Field::MaxUlSpeed,
        Field::MinUlSpeed,
        Field::AvgDlSpeed,
        Field::AvgUlSpeed,
    ];

    /// The logical key as typed by a user.
    pub fn key(self) -> &'static str {
        match self {
            Field::Location => "location",
            Field::MaxDlSpeed => "max_dl_speed",
            Field::MinDlSpeed => "min_dl_speed",
            Field::MaxUlSpeed => "max_ul_speed",
            Field::MinUlSpeed => "min_ul_speed",
            Field::AvgDlSpeed => "avg_dl_speed",
            Field::AvgUlSpeed => "avg_ul_speed",
        }
    }

    /// Physical column for every key except `Location`, which is bound per load.
    fn static_column(self) -> Option<&'static str> {
        match self {
            Field::Location => None,
            Field::MaxDlSpeed => Some("Maximum download speed (Mbit/s)"),
            Field::MinDlSpeed => Some("Minimum download speed (Mbit/s)"),
            Field::MaxUlSpeed => Some("Maximum upload speed (Mbit/s)"),
            Field::MinUlSpeed => Some("Minimum upload speed (Mbit/s)"),
            Field::AvgDlSpeed => Some("Average download speed (Mbit/s)"),
            Field::AvgUlSpeed => Some("Average upload speed (Mbit/s)"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| DatasetError::UnknownField(s.to_string()))
    }
}

/// Per-store translation table. The location binding is only valid for the
/// snapshot it was bound against.
#[derive(Debug, Clone, Default)]
pub struct FieldTranslator {
    location: Option<&'static str>,
}

impl FieldTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a logical key to its physical column name.
    pub fn resolve(&self, field: Field) -> Result<&'static str, DatasetError> {
        match field.static_column() {
            Some(column) => Ok(column),
            None => self.location.ok_or(DatasetError::UnresolvedLocationColumn),
        }
    }

    /// Resolve a user-typed key such as `"avg_dl_speed"`.
    pub fn resolve_key(&self, key: &str) -> Result<&'static str, DatasetError> {
        self.resolve(key.parse()?)
    }

    /// Bind `location` to the first known alias present in `columns`.
    ///
    /// Returns the bound column, or `None` when no alias matched, in which case
    /// the binding is cleared.
    pub fn bind_location_alias<I, S>(&mut self, columns: I) -> Option<&'static str>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let available: Vec<S> = columns.into_iter().collect();
        self.location = LOCATION_ALIASES
            .into_iter()
            .find(|alias| available.iter().any(|c| c.as_ref() == *alias));
        self.location
    }

    /// Currently bound location column, if any.
    pub fn location_column(&self) -> Option<&'static str> {
        self.location
    }

    pub fn reset(&mut self) {
        self.location = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_keys_resolve_without_binding() {
        let translator = FieldTranslator::new();
        assert_eq!(
            translator.resolve(Field::AvgDlSpeed).unwrap(),
            "Average download speed (Mbit/s)"
        );
        assert_eq!(
            translator.resolve_key("min_ul_speed").unwrap(),
            "Minimum upload speed (Mbit/s)"
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        let translator = FieldTranslator::new();
        match translator.resolve_key("median_speed") {
            Err(DatasetError::UnknownField(key)) => assert_eq!(key, "median_speed"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn location_prefers_laua_name() {
        let mut translator = FieldTranslator::new();
        let bound = translator.bind_location_alias(["la_name", "laua_name", "x"]);
        assert_eq!(bound, Some("laua_name"));
        assert_eq!(translator.resolve(Field::Location).unwrap(), "laua_name");
    }

    #[test]
    fn location_falls_back_to_la_name() {
        let mut translator = FieldTranslator::new();
        translator.bind_location_alias(vec!["la_name".to_string()]);
        assert_eq!(translator.resolve(Field::Location).unwrap(), "la_name");
    }

    #[test]
    fn missing_alias_clears_previous_binding() {
        let mut translator = FieldTranslator::new();
        translator.bind_location_alias(["laua_name"]);
        assert!(translator.bind_location_alias(["LAUA_NAME", "name"]).is_none());
        assert!(matches!(
            translator.resolve(Field::Location),
            Err(DatasetError::UnresolvedLocationColumn)
        ));
    }

    #[test]
    fn keys_round_trip_through_from_str() {
        for field in Field::ALL {
            assert_eq!(field.key().parse::<Field>().unwrap(), field);
        }
    }
}
