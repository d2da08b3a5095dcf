//! Opening and writing packages on disk

use ox_sheets::prelude::*;
use pretty_assertions::assert_eq;
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

fn sample_workbook() -> Workbook {
    let mut wb = Workbook::new();
    wb.set_cell_text(0, 0, 0, "Datum").unwrap();
    wb.set_cell_number(0, 1, 0, 42.0).unwrap();
    wb
}

#[test]
fn test_write_to_then_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("book.xlsx");

    let mut package = Package::with_workbook(sample_workbook());
    package.write_to(&path).unwrap();
    assert_eq!(package.path(), Some(path.as_path()));

    let opened = Package::open(&path).unwrap();
    assert_eq!(opened.kind(), DocumentKind::Spreadsheet);
    assert_eq!(opened.path(), Some(path.as_path()));
    let (read, written) = (opened.workbook().unwrap(), package.workbook().unwrap());
    assert_eq!(read.shared_text(), written.shared_text());
    assert_eq!(
        read.worksheet(0).unwrap().rows(),
        written.worksheet(0).unwrap().rows()
    );
}

#[test]
fn test_write_back_to_stored_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("edit.xlsx");
    Package::with_workbook(sample_workbook())
        .write_to(&path)
        .unwrap();

    let mut package = Package::open(&path).unwrap();
    package
        .workbook_mut()
        .unwrap()
        .set_cell_text(0, 2, 0, "appended")
        .unwrap();
    package.write().unwrap();

    let reopened = Package::open(&path).unwrap();
    let wb = reopened.workbook().unwrap();
    assert_eq!(wb.worksheet(0).unwrap().row_count(), 3);
    assert_eq!(wb.cell_display_text(0, 2, 0).unwrap().as_deref(), Some("appended"));
}

#[test]
fn test_write_without_path_fails() {
    let mut package = Package::with_workbook(sample_workbook());
    assert!(matches!(package.write(), Err(XlsxError::MissingPath)));
}

#[test]
fn test_workbook_save_and_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plain.xlsx");

    let mut wb = sample_workbook();
    wb.save(&path).unwrap();

    let read = Workbook::open(&path).unwrap();
    assert_eq!(read.shared_text(), wb.shared_text());
    let (sheet, original) = (read.worksheet(0).unwrap(), wb.worksheet(0).unwrap());
    assert_eq!(sheet.rows(), original.rows());
    assert_eq!(sheet.id(), original.id());
    assert_eq!(sheet.relationship_id(), "rId4");
    // Every grid column is written out, so defaults come back explicit
    assert_eq!(sheet.columns(), &[Column::new()]);
}

#[test]
fn test_open_rejects_non_packages() {
    let dir = TempDir::new().unwrap();

    let text_path = dir.path().join("notes.xlsx");
    File::create(&text_path)
        .unwrap()
        .write_all(b"just some text")
        .unwrap();
    assert!(matches!(Package::open(&text_path), Err(XlsxError::Zip(_))));

    let zip_path = dir.path().join("bare.xlsx");
    let mut zip = zip::ZipWriter::new(File::create(&zip_path).unwrap());
    zip.start_file("readme.txt", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"hello").unwrap();
    zip.finish().unwrap();
    assert!(matches!(
        Package::open(&zip_path),
        Err(XlsxError::NotAPackage(_))
    ));

    assert!(matches!(
        Package::open(dir.path().join("missing.xlsx")),
        Err(XlsxError::Io(_))
    ));
}

#[test]
fn test_write_to_replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("twice.xlsx");

    let mut first = Package::with_workbook(sample_workbook());
    first.write_to(&path).unwrap();

    let mut second_wb = Workbook::new();
    second_wb.set_cell_number(0, 0, 0, 7.0).unwrap();
    let mut second = Package::with_workbook(second_wb);
    second.write_to(&path).unwrap();

    let opened = Package::open(&path).unwrap();
    let wb = opened.workbook().unwrap();
    assert!(wb.shared_text().is_empty());
    assert_eq!(wb.cell_display_text(0, 0, 0).unwrap().as_deref(), Some("7"));
}
