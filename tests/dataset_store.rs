use broadband_compare::{average, DatasetError, DatasetStore, Field, StoreState, Value};
use std::io::Write;
use tempfile::NamedTempFile;

const AVG_DL: &str = "Average download speed (Mbit/s)";

fn csv_file(contents: &[u8]) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    tmp.write_all(contents).unwrap();
    tmp.flush().unwrap();
    tmp
}

fn three_towns() -> NamedTempFile {
    csv_file(format!("laua_name,{AVG_DL}\nLeicester,40\nYork,60\nBath,20\n").as_bytes())
}

#[test]
fn test_three_row_scenario() {
    let tmp = three_towns();
    let mut store = DatasetStore::new();
    store.load(tmp.path()).unwrap();
    assert_eq!(store.state(), StoreState::Ready);
    assert_eq!(store.row_count(), 3);

    let speeds = store.query_column(Field::AvgDlSpeed).unwrap();
    assert_eq!(speeds, vec![Value::Int(40), Value::Int(60), Value::Int(20)]);
    assert_eq!(average(&speeds).unwrap(), 40.0);

    let york = store.find_row(Field::Location, "york").unwrap();
    assert_eq!(york.get(Field::AvgDlSpeed), Some(&Value::Int(60)));
    assert_eq!(york.location_name(), Some("York"));
    assert_eq!(york.index(), 1);

    match store.find_row(Field::Location, "Oxford") {
        Err(DatasetError::NotFound { value }) => assert_eq!(value, "Oxford"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_lookup_ignores_case() {
    let tmp = three_towns();
    let mut store = DatasetStore::new();
    store.load(tmp.path()).unwrap();

    let a = store.find_row(Field::Location, "Leicester").unwrap();
    let b = store.find_row(Field::Location, "LEICESTER").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_string_keys_go_through_translation() {
    let tmp = three_towns();
    let mut store = DatasetStore::new();
    store.load(tmp.path()).unwrap();

    let by_key = store.query_column_by_key("avg_dl_speed").unwrap();
    assert_eq!(by_key, store.query_column(Field::AvgDlSpeed).unwrap());
    assert!(store.find_row_by_key("location", "bath").is_ok());

    // physical column names are not logical keys
    assert!(matches!(
        store.query_column_by_key(AVG_DL),
        Err(DatasetError::UnknownField(_))
    ));
}

#[test]
fn test_column_length_matches_row_count() {
    let tmp = csv_file(
        b"la_name,Average download speed (Mbit/s),Average upload speed (Mbit/s),Maximum download speed (Mbit/s)\n\
          Leeds,30.5,5.5,100\n\
          Hull,,4.0,80\n\
          Derby,25.0,3.5,90\n\
          Wells,12.0,1.5,40\n",
    );
    let mut store = DatasetStore::new();
    store.load(tmp.path()).unwrap();

    for field in [
        Field::Location,
        Field::AvgDlSpeed,
        Field::AvgUlSpeed,
        Field::MaxDlSpeed,
    ] {
        assert!(store.has_field(field));
        assert_eq!(store.query_column(field).unwrap().len(), store.row_count());
    }

    // missing cells surface as nulls and are not averaged away
    let dl = store.query_column(Field::AvgDlSpeed).unwrap();
    assert!(dl[1].is_null());
    assert!(average(&dl).is_err());
}

#[test]
fn test_location_alias_binding() {
    let mut store = DatasetStore::new();

    let laua = csv_file(b"laua_name,la_name\nYork,Ignored\n");
    store.load(laua.path()).unwrap();
    assert_eq!(store.location_column(), Some("laua_name"));
    assert!(store.find_row(Field::Location, "york").is_ok());

    let la = csv_file(b"la_name,code\nYork,E1\n");
    store.load(la.path()).unwrap();
    assert_eq!(store.location_column(), Some("la_name"));
    assert!(store.find_row(Field::Location, "YORK").is_ok());

    let neither = csv_file(format!("name,{AVG_DL}\nYork,60\n").as_bytes());
    store.load(neither.path()).unwrap();
    assert_eq!(store.location_column(), None);
    assert!(matches!(
        store.find_row(Field::Location, "York"),
        Err(DatasetError::UnresolvedLocationColumn)
    ));
    // other keys still work
    assert_eq!(store.query_column(Field::AvgDlSpeed).unwrap(), vec![Value::Int(60)]);
}

#[test]
fn test_absent_column_is_reported() {
    let tmp = three_towns();
    let mut store = DatasetStore::new();
    store.load(tmp.path()).unwrap();

    match store.query_column(Field::AvgUlSpeed) {
        Err(DatasetError::ColumnNotFound(name)) => {
            assert_eq!(name, "Average upload speed (Mbit/s)")
        }
        other => panic!("expected ColumnNotFound, got {other:?}"),
    }
    assert!(!store.has_field(Field::AvgUlSpeed));

    // rows simply lack the field
    let row = store.find_row(Field::Location, "Bath").unwrap();
    assert_eq!(row.get(Field::AvgUlSpeed), None);
}

#[test]
fn test_zero_row_file_is_rejected() {
    let header_only = csv_file(format!("laua_name,{AVG_DL}\n").as_bytes());
    let mut store = DatasetStore::new();
    let err = store.load(header_only.path()).unwrap_err();
    assert!(matches!(err, DatasetError::DatasetLoad { .. }));
    assert_eq!(store.state(), StoreState::Empty);

    let empty = csv_file(b"");
    assert!(matches!(
        store.load(empty.path()),
        Err(DatasetError::DatasetLoad { .. })
    ));
    assert_eq!(store.state(), StoreState::Empty);
}

#[test]
fn test_reload_replaces_snapshot() {
    let first = three_towns();
    let second = csv_file(format!("laua_name,{AVG_DL}\nOxford,70\n").as_bytes());

    let mut store = DatasetStore::new();
    store.load(first.path()).unwrap();
    assert!(store.find_row(Field::Location, "Leicester").is_ok());

    store.load(second.path()).unwrap();
    assert_eq!(store.row_count(), 1);
    assert_eq!(store.source_path(), Some(second.path()));
    assert!(store.find_row(Field::Location, "Oxford").is_ok());
    assert!(matches!(
        store.find_row(Field::Location, "Leicester"),
        Err(DatasetError::NotFound { .. })
    ));
}

#[test]
fn test_failed_reload_clears_previous_snapshot() {
    let good = three_towns();
    let mut store = DatasetStore::new();
    store.load(good.path()).unwrap();

    assert!(store.load(good.path().with_extension("missing")).is_err());
    assert_eq!(store.state(), StoreState::Empty);
    assert!(store.location_column().is_none());
    assert!(matches!(
        store.find_row(Field::Location, "York"),
        Err(DatasetError::NotReady)
    ));
}

#[test]
fn test_latin1_names_load_and_match() {
    let tmp = csv_file(b"laua_name,Average download speed (Mbit/s)\nC\xf4te,10\nYork,60\n");
    let mut store = DatasetStore::new();
    store.load(tmp.path()).unwrap();
    assert_eq!(store.encoding(), Some("windows-1252"));

    let row = store.find_row(Field::Location, "CÔTE").unwrap();
    assert_eq!(row.location_name(), Some("Côte"));
    assert_eq!(row.number(Field::AvgDlSpeed), Some(10.0));
}

#[test]
fn test_duplicate_names_return_first_row() {
    let tmp = csv_file(format!("laua_name,{AVG_DL}\nBath,20\nbath,99\n").as_bytes());
    let mut store = DatasetStore::new();
    store.load(tmp.path()).unwrap();

    let row = store.find_row(Field::Location, "BATH").unwrap();
    assert_eq!(row.index(), 0);
    assert_eq!(row.number(Field::AvgDlSpeed), Some(20.0));
}

#[test]
fn test_late_float_row_widens_integer_column() {
    let mut csv = format!("laua_name,{AVG_DL}\n");
    for i in 0..10_050 {
        csv.push_str(&format!("Town{i},40\n"));
    }
    csv.push_str("Late,12.5\n");
    let tmp = csv_file(csv.as_bytes());

    let mut store = DatasetStore::new();
    store.load(tmp.path()).unwrap();
    assert_eq!(store.row_count(), 10_051);

    let speeds = store.query_column(Field::AvgDlSpeed).unwrap();
    assert_eq!(speeds[0], Value::Float(40.0));
    assert_eq!(speeds[10_050], Value::Float(12.5));

    let late = store.find_row(Field::Location, "late").unwrap();
    assert_eq!(late.number(Field::AvgDlSpeed), Some(12.5));
}
