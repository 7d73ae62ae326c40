use datafile::{
    Column, DatafileError, File, FileContent, FileError, FileIO, NpyIO, Result, Table,
};
use ndarray::{Array, ArrayD, IxDyn};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Build a table wide enough to exercise the full-read path (>60 columns).
fn wide_table() -> Table {
    let mut columns = vec![
        Column::new("id", vec!["1".into(), "2".into(), "3".into()]),
        Column::new("bathrooms", vec!["1.0".into(), "2.5".into(), "3.0".into()]),
    ];
    for i in 0..61 {
        columns.push(Column::new(
            format!("feature_{:02}", i),
            vec!["a".into(), "b".into(), "c".into()],
        ));
    }
    Table::from_columns(columns).unwrap()
}

/// 0..100 as f64, flat and reshaped to 25x4.
fn numpy_fixture() -> (ArrayD<f64>, ArrayD<f64>) {
    let flat: Vec<f64> = (0..100).map(|i| i as f64).collect();
    let a = Array::from_shape_vec(IxDyn(&[100]), flat.clone()).unwrap();
    let b = Array::from_shape_vec(IxDyn(&[25, 4]), flat).unwrap();
    (a, b)
}

fn file_at(path: &Path) -> File {
    File::new(path.to_str().unwrap()).unwrap()
}

#[test]
fn test_file_identity_after_construction() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("san_francisco.csv");
    fs::write(&path, "id,bathrooms\n1,2\n").unwrap();

    let file = file_at(&path);
    assert_eq!(file.path(), path.as_path());
    assert_eq!(file.directory(), dir.path());
    assert_eq!(file.filename(), "san_francisco.csv");
    assert_eq!(file.name(), "san_francisco");
    assert_eq!(file.file_ext(), ".csv");
    assert!(file.exists());
    assert!(!file.is_locked());
    Ok(())
}

#[test]
fn test_copy_leaves_source_untouched() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("san_francisco.csv");
    let dest = dir.path().join("copied.csv");
    fs::write(&source, "id,bathrooms\n1,2\n").unwrap();

    let mut file = file_at(&source);

    // Copy is permitted even while locked
    file.lock();
    file.copy(&dest)?;

    assert_eq!(file.path(), source.as_path());
    assert!(source.exists());
    assert!(dest.exists());
    assert_eq!(
        fs::read_to_string(&source).unwrap(),
        fs::read_to_string(&dest).unwrap()
    );
    Ok(())
}

#[test]
fn test_move_updates_path_and_lock_blocks_it() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let origin = dir.path().join("san_francisco.csv");
    let target_dir = dir.path().join("moved");
    let target = target_dir.join("san_francisco.csv");
    fs::create_dir_all(&target_dir).unwrap();
    fs::write(&origin, "id,bathrooms\n1,2\n").unwrap();

    let mut file = file_at(&origin);
    file.move_to(&target)?;

    assert!(!origin.exists());
    assert!(target.exists());
    assert_eq!(file.path(), target.as_path());
    assert_eq!(file.directory(), target_dir.as_path());

    // A locked file silently refuses to move back
    file.lock();
    file.move_to(&origin)?;
    assert!(!origin.exists());
    assert_eq!(file.path(), target.as_path());

    // Unlocking makes the same call succeed
    file.unlock();
    file.move_to(&origin)?;
    assert!(origin.exists());
    assert_eq!(file.path(), origin.as_path());
    Ok(())
}

#[test]
fn test_rename_contract() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let origin = dir.path().join("san_francisco.csv");
    fs::write(&origin, "id,bathrooms\n1,2\n").unwrap();

    let mut file = file_at(&origin);

    // Locked rename is a documented no-op, not an error
    file.lock();
    file.rename("bay_area")?;
    assert_eq!(file.path(), origin.as_path());

    file.unlock();
    assert!(!file.is_locked());

    // A bare name inherits the original extension
    file.rename("bay_area")?;
    assert_eq!(file.filename(), "bay_area.csv");
    assert_eq!(file.path(), dir.path().join("bay_area.csv").as_path());
    assert!(dir.path().join("bay_area.csv").exists());
    assert!(!origin.exists());

    // An explicit extension is honored
    file.rename("bay_area.csv.gz")?;
    assert_eq!(file.filename(), "bay_area.csv.gz");
    assert_eq!(file.file_ext(), ".csv.gz");
    Ok(())
}

#[test]
fn test_csv_write_read_wide_table() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("san_francisco.csv");

    let table = wide_table();
    let file = file_at(&path);
    file.write(&FileContent::Table(table.clone()))?;

    let full = file.read()?.into_table().unwrap();
    assert!(full.n_columns() > 60);
    assert_eq!(full.shape(), table.shape());
    assert_eq!(full.column_names(), table.column_names());

    // Round-trip again from what was just read
    file.write(&FileContent::Table(full.clone()))?;
    let again = file.read()?.into_table().unwrap();
    assert_eq!(again.shape(), full.shape());
    Ok(())
}

#[test]
fn test_csv_column_filter() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("san_francisco.csv");

    let file = file_at(&path);
    file.write(&FileContent::Table(wide_table()))?;

    let filtered = file.read_columns(&["id", "bathrooms"])?.into_table().unwrap();
    assert_eq!(filtered.n_columns(), 2);
    assert_eq!(filtered.column_names(), vec!["id", "bathrooms"]);
    assert_eq!(filtered.n_rows(), 3);
    Ok(())
}

#[test]
fn test_csv_gz_roundtrip() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("san_francisco.csv.gz");

    let table = wide_table();
    let file = file_at(&path);
    file.write(&FileContent::Table(table.clone()))?;

    // The gzip frame must actually be in place
    let raw = fs::read(&path).unwrap();
    assert!(raw.starts_with(&[0x1f, 0x8b]));

    let full = file.read()?.into_table().unwrap();
    assert_eq!(full.shape(), table.shape());

    let filtered = file.read_columns(&["id", "bathrooms"])?.into_table().unwrap();
    assert_eq!(filtered.n_columns(), 2);
    Ok(())
}

#[test]
fn test_npy_roundtrip_reshaped() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let (a, b) = numpy_fixture();

    let flat_file = file_at(&dir.path().join("numpy_array_a.npy"));
    flat_file.write(&FileContent::Array(a.clone()))?;
    assert_eq!(flat_file.read()?.into_array().unwrap(), a);

    let shaped_file = file_at(&dir.path().join("numpy_array_b.npy"));
    shaped_file.write(&FileContent::Array(b.clone()))?;
    let loaded = shaped_file.read()?.into_array().unwrap();
    assert_eq!(loaded.shape(), &[25, 4]);
    assert_eq!(loaded, b);
    Ok(())
}

#[test]
fn test_npy_extension_correction() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let (_, b) = numpy_fixture();
    let wrong = dir.path().join("numpy_array_b.txt");

    let written = NpyIO.write(&wrong, &FileContent::Array(b))?;

    // The file lands at the corrected path only
    assert_eq!(written, dir.path().join("numpy_array_b.txt.npy"));
    assert!(!wrong.exists());
    assert!(written.exists());
    Ok(())
}

#[test]
fn test_read_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let file = file_at(&dir.path().join("missing.csv"));
    let result = file.read();
    assert!(matches!(
        result,
        Err(DatafileError::File(FileError::NotFound { .. }))
    ));
}

#[test]
fn test_read_unsupported_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.md");
    fs::write(&path, "# notes").unwrap();

    let file = file_at(&path);
    let result = file.read();
    assert!(matches!(
        result,
        Err(DatafileError::File(FileError::UnsupportedFormat { .. }))
    ));
}
