//! XLSX reader

mod sheet;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{XlsxError, XlsxResult};
use crate::escape::decode_excel_escapes;
use crate::parts::{self, APP_PROPS, CORE_PROPS, SHARED_STRINGS, WORKBOOK, WORKBOOK_RELS};
use ox_sheets_core::{DocumentKind, Package, SharedTextTable, Workbook};

/// A `<sheet>` entry of the workbook part
#[derive(Debug, Clone, PartialEq)]
struct SheetEntry {
    name: String,
    sheet_id: u32,
    relationship_id: String,
}

/// XLSX file reader
///
/// The archive is opened for the duration of one call and dropped before it
/// returns.
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a package from a file path, remembering the path
    pub fn open_file<P: AsRef<Path>>(path: P) -> XlsxResult<Package> {
        let file = File::open(path.as_ref())?;
        let mut package = Self::read_package(BufReader::new(file))?;
        package.set_path(path.as_ref());
        Ok(package)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let package = Self::read_package(reader)?;
        let kind = package.kind();
        package
            .into_workbook()
            .ok_or_else(|| XlsxError::UnsupportedKind(kind.to_string()))
    }

    /// Read a package from a reader
    ///
    /// Fails with [`XlsxError::NotAPackage`] when the document-properties
    /// members are absent and [`XlsxError::UnsupportedKind`] when the package
    /// is not a spreadsheet.
    pub fn read_package<R: Read + Seek>(reader: R) -> XlsxResult<Package> {
        let mut archive = ZipArchive::new(reader)?;

        let kind = Self::classify(&mut archive)?;
        match kind {
            DocumentKind::Spreadsheet => {}
            DocumentKind::None => {
                return Err(XlsxError::UnsupportedKind(
                    "unrecognized application".into(),
                ))
            }
            other => return Err(XlsxError::UnsupportedKind(other.to_string())),
        }

        let workbook = Self::read_workbook(&mut archive)?;
        Ok(Package::with_workbook(workbook))
    }

    /// Decide the document kind from the extended properties
    fn classify<R: Read + Seek>(archive: &mut ZipArchive<R>) -> XlsxResult<DocumentKind> {
        if read_part(archive, CORE_PROPS)?.is_none() {
            return Err(XlsxError::NotAPackage(CORE_PROPS.into()));
        }
        let app = read_part(archive, APP_PROPS)?
            .ok_or_else(|| XlsxError::NotAPackage(APP_PROPS.into()))?;

        let application = read_application(&app)?;
        let kind = DocumentKind::from_application(&application);
        if kind == DocumentKind::None {
            log::warn!("unrecognized application '{}' in {}", application, APP_PROPS);
        }
        Ok(kind)
    }

    fn read_workbook<R: Read + Seek>(archive: &mut ZipArchive<R>) -> XlsxResult<Workbook> {
        let workbook_xml =
            read_part(archive, WORKBOOK)?.ok_or_else(|| XlsxError::MissingPart(WORKBOOK.into()))?;
        let entries = read_workbook_xml(&workbook_xml)?;

        let sheet_paths = match read_part(archive, WORKBOOK_RELS)? {
            Some(rels) => read_workbook_rels(&rels)?,
            None => HashMap::new(),
        };

        let mut workbook = Workbook::empty();

        // Shared strings first: inline strings in sheets append to the same table
        if let Some(sst) = read_part(archive, SHARED_STRINGS)? {
            match read_shared_strings(&sst) {
                Ok(table) => *workbook.shared_text_mut() = table,
                Err(e) => log::warn!(
                    "{}: {}; using an empty shared text table",
                    SHARED_STRINGS,
                    e
                ),
            }
        }

        for (i, entry) in entries.into_iter().enumerate() {
            let path = sheet_paths
                .get(&entry.relationship_id)
                .cloned()
                .unwrap_or_else(|| parts::worksheet_path(i));
            let xml = read_part(archive, &path)?.ok_or_else(|| XlsxError::MissingPart(path.clone()))?;

            let mut worksheet =
                sheet::read_worksheet(&path, &xml, &entry.name, workbook.shared_text_mut())?;
            worksheet.set_id(entry.sheet_id);
            worksheet.set_relationship_id(entry.relationship_id);
            workbook.push_worksheet(worksheet);
        }

        Ok(workbook)
    }
}

/// Read a whole archive member, or `None` if the archive lacks it
fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> XlsxResult<Option<Vec<u8>>> {
    let mut file = match archive.by_name(path) {
        Ok(f) => f,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut buf = Vec::with_capacity(file.size() as usize);
    file.read_to_end(&mut buf)?;
    Ok(Some(buf))
}

/// Value of the attribute with local name `name`
pub(crate) fn attr_value(e: &BytesStart<'_>, name: &[u8]) -> XlsxResult<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// True for "1" and "true"
pub(crate) fn is_truthy(value: &str) -> bool {
    value == "1" || value == "true"
}

/// Text of the `Application` element in `docProps/app.xml`
fn read_application(xml: &[u8]) -> XlsxResult<String> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut in_application = false;
    let mut application = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"Application" => {
                in_application = true;
            }
            Event::End(e) if e.local_name().as_ref() == b"Application" => break,
            Event::Text(e) if in_application => {
                application.push_str(&e.unescape()?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(application)
}

/// Sheet entries of `xl/workbook.xml` in declared order
fn read_workbook_xml(xml: &[u8]) -> XlsxResult<Vec<SheetEntry>> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
                let name = attr_value(&e, b"name")?;
                let relationship_id = attr_value(&e, b"id")?;
                let sheet_id = attr_value(&e, b"sheetId")?
                    .and_then(|s| s.parse::<u32>().ok())
                    .unwrap_or(sheets.len() as u32 + 1);

                match (name, relationship_id) {
                    (Some(name), Some(relationship_id)) => sheets.push(SheetEntry {
                        name,
                        sheet_id,
                        relationship_id,
                    }),
                    _ => log::warn!("skipping sheet entry without name or r:id in {}", WORKBOOK),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Worksheet relationship ids mapped to archive paths
fn read_workbook_rels(xml: &[u8]) -> XlsxResult<HashMap<String, String>> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut rels = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
                let id = attr_value(&e, b"Id")?;
                let target = attr_value(&e, b"Target")?;
                let rel_type = attr_value(&e, b"Type")?;

                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                    if rel_type == parts::REL_WORKSHEET {
                        rels.insert(id, resolve_target(&target));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Resolve a workbook relationship target to an archive path
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

/// Parse `xl/sharedStrings.xml`
///
/// Entries keep their positional ids even when texts repeat. Rich-text runs
/// are concatenated and phonetic runs dropped.
fn read_shared_strings(xml: &[u8]) -> XlsxResult<SharedTextTable> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut table = SharedTextTable::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;
    let mut in_phonetic = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"rPh" => in_phonetic = true,
                b"t" if in_si && !in_phonetic => in_t = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => {
                table.push(String::new());
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => {
                    table.push(decode_excel_escapes(&current));
                    in_si = false;
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_t = false,
                _ => {}
            },
            Event::Text(e) if in_t => {
                current.push_str(&e.unescape()?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(table)
}
