//! XLSX writer

mod sheet;

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use crate::error::{XlsxError, XlsxResult};
use crate::escape::{escape_text, escape_xml, needs_space_preserve};
use crate::parts::{self, *};
use crate::styles::to_styles_xml;
use crate::theme::THEME_XML;
use ox_sheets_core::{Package, SharedTextTable, Workbook};

/// Creator recorded in core properties
const CREATOR: &str = "ox-sheets";

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &mut Workbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(workbook, BufWriter::new(file))
    }

    /// Write a package to a file path and remember the path
    pub fn write_package_file<P: AsRef<Path>>(package: &mut Package, path: P) -> XlsxResult<()> {
        let file = File::create(path.as_ref())?;
        Self::write_package(package, BufWriter::new(file))?;
        package.set_path(path.as_ref());
        Ok(())
    }

    /// Write a spreadsheet package to a writer
    pub fn write_package<W: Write + Seek>(package: &mut Package, writer: W) -> XlsxResult<()> {
        let kind = package.kind();
        let workbook = package
            .workbook_mut()
            .ok_or_else(|| XlsxError::UnsupportedKind(kind.to_string()))?;
        Self::write(workbook, writer)
    }

    /// Write a workbook to a writer
    ///
    /// The shared text table is renumbered first, so only referenced entries
    /// are written. Afterwards each worksheet's id and relationship id match
    /// what was written.
    pub fn write<W: Write + Seek>(workbook: &mut Workbook, writer: W) -> XlsxResult<()> {
        workbook.renumber_shared_text()?;
        if workbook.is_empty() {
            log::warn!("writing a workbook without worksheets");
        }

        let mut zip = zip::ZipWriter::new(writer);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_app_props(&mut zip, workbook)?;
        Self::write_core_props(&mut zip)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_part(&mut zip, THEME, THEME_XML)?;
        Self::write_part(&mut zip, STYLES, &to_styles_xml())?;
        Self::write_workbook_xml(&mut zip, workbook)?;

        for (i, worksheet) in workbook.worksheets().enumerate() {
            let path = parts::worksheet_path(i);
            log::debug!("writing {} ({} rows)", path, worksheet.row_count());
            Self::write_part(&mut zip, &path, &sheet::worksheet_xml(worksheet))?;
        }

        Self::write_shared_strings(&mut zip, workbook.shared_text())?;

        zip.finish()?;

        for (i, worksheet) in workbook.worksheets_mut().enumerate() {
            worksheet.set_id(i as u32 + 1);
            worksheet.set_relationship_id(worksheet_rid(i));
        }
        Ok(())
    }

    fn write_part<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        path: &str,
        content: &str,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(path, options)?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/{}" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                parts::worksheet_path(i)
            ));
        }

        content.push_str(
            r#"
    <Override PartName="/xl/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
    <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>
    <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
    <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>"#,
        );

        Self::write_part(zip, CONTENT_TYPES, &content)
    }

    fn write_app_props<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let count = workbook.sheet_count();
        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
    <Application>{}</Application>
    <DocSecurity>0</DocSecurity>
    <ScaleCrop>false</ScaleCrop>
    <HeadingPairs>
        <vt:vector size="2" baseType="variant">
            <vt:variant><vt:lpstr>Worksheets</vt:lpstr></vt:variant>
            <vt:variant><vt:i4>{}</vt:i4></vt:variant>
        </vt:vector>
    </HeadingPairs>
    <TitlesOfParts>
        <vt:vector size="{}" baseType="lpstr">"#,
            APPLICATION_NAME, count, count
        );

        for worksheet in workbook.worksheets() {
            content.push_str(&format!(
                "\n            <vt:lpstr>{}</vt:lpstr>",
                escape_xml(worksheet.name())
            ));
        }

        content.push_str(
            r#"
        </vt:vector>
    </TitlesOfParts>
    <LinksUpToDate>false</LinksUpToDate>
    <SharedDoc>false</SharedDoc>
    <HyperlinksChanged>false</HyperlinksChanged>
    <AppVersion>16.0300</AppVersion>
</Properties>"#,
        );

        Self::write_part(zip, APP_PROPS, &content)
    }

    fn write_core_props<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <dc:creator>{creator}</dc:creator>
    <cp:lastModifiedBy>{creator}</cp:lastModifiedBy>
    <dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created>
    <dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified>
</cp:coreProperties>"#,
            creator = CREATOR,
            now = now
        );

        Self::write_part(zip, CORE_PROPS, &content)
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
    <Relationship Id="rId1" Type="{}" Target="{}"/>
    <Relationship Id="rId2" Type="{}" Target="{}"/>
    <Relationship Id="rId3" Type="{}" Target="{}"/>
</Relationships>"#,
            NS_PKG_REL,
            REL_OFFICE_DOCUMENT,
            WORKBOOK,
            REL_CORE_PROPS,
            CORE_PROPS,
            REL_EXTENDED_PROPS,
            APP_PROPS
        );

        Self::write_part(zip, ROOT_RELS, &content)
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
    <Relationship Id="{}" Type="{}" Target="theme/theme1.xml"/>
    <Relationship Id="{}" Type="{}" Target="styles.xml"/>
    <Relationship Id="{}" Type="{}" Target="sharedStrings.xml"/>"#,
            NS_PKG_REL,
            THEME_RID,
            REL_THEME,
            STYLES_RID,
            REL_STYLES,
            SHARED_STRINGS_RID,
            REL_SHARED_STRINGS
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="{}" Type="{}" Target="{}"/>"#,
                worksheet_rid(i),
                REL_WORKSHEET,
                parts::worksheet_target(i)
            ));
        }

        content.push_str("\n</Relationships>");

        Self::write_part(zip, WORKBOOK_RELS, &content)
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{}" xmlns:r="{}">
    <fileVersion appName="xl"/>
    <workbookPr/>
    <bookViews>
        <workbookView/>
    </bookViews>
    <sheets>"#,
            NS_MAIN, NS_REL
        );

        for (i, worksheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="{}"/>"#,
                escape_xml(worksheet.name()),
                i + 1,
                worksheet_rid(i)
            ));
        }

        content.push_str(
            r#"
    </sheets>
    <calcPr calcId="0"/>
</workbook>"#,
        );

        Self::write_part(zip, WORKBOOK, &content)
    }

    fn write_shared_strings<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        table: &SharedTextTable,
    ) -> XlsxResult<()> {
        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="{}" count="{}" uniqueCount="{}">"#,
            NS_MAIN,
            table.len(),
            table.len()
        );

        for (_, text) in table.iter() {
            let space = if needs_space_preserve(text) {
                r#" xml:space="preserve""#
            } else {
                ""
            };
            content.push_str(&format!("<si><t{}>{}</t></si>", space, escape_text(text)));
        }

        content.push_str("</sst>");

        Self::write_part(zip, SHARED_STRINGS, &content)
    }
}
