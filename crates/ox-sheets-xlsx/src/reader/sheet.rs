//! Worksheet part decoding
//!
//! A worksheet member is parsed twice. The survey pass sizes the grid: row
//! count from the `sheetData` children and column count from the first
//! row's `spans`. The fill pass then walks the sparse `row`/`c` elements and
//! densifies them, putting a placeholder wherever a column was skipped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::{attr_value, is_truthy};
use crate::error::{XlsxError, XlsxResult};
use crate::escape::decode_excel_escapes;
use ox_sheets_core::{
    Cell, CellAddress, CellRange, Column, Expression, Freeze, Row, SharedTextTable, Worksheet,
    DEFAULT_COLUMN_WIDTH, MAX_COLS,
};

/// Grid dimensions found by the survey pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Survey {
    /// Direct children of `sheetData`
    children: usize,
    /// `row` elements among them
    rows: usize,
    /// Cells per row
    column_count: usize,
}

/// Decode one worksheet member
///
/// Inline strings are interned into `table`.
pub(super) fn read_worksheet(
    part: &str,
    xml: &[u8],
    name: &str,
    table: &mut SharedTextTable,
) -> XlsxResult<Worksheet> {
    let survey = survey(xml)?;
    if survey.children != survey.rows {
        log::warn!(
            "{}: sheetData has {} children but {} row elements; decoding rows only",
            part,
            survey.children,
            survey.rows
        );
    }

    let mut fill = Fill::new(part, name, survey, table);
    fill.run(xml)?;
    Ok(fill.finish())
}

/// Count rows and find the column count without building anything
fn survey(xml: &[u8]) -> XlsxResult<Survey> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut survey = Survey::default();
    let mut in_sheet_data = false;
    let mut depth = 0usize;
    let mut spans: Option<usize> = None;
    let mut widest = 0usize;
    let mut next_col = 0usize;

    loop {
        buf.clear();
        let (e, is_start) = match reader.read_event_into(&mut buf)? {
            Event::Start(e) => (e, true),
            Event::Empty(e) => (e, false),
            Event::End(_) => {
                if depth > 0 {
                    depth -= 1;
                } else {
                    in_sheet_data = false;
                }
                continue;
            }
            Event::Eof => break,
            _ => continue,
        };

        if !in_sheet_data {
            if is_start && e.local_name().as_ref() == b"sheetData" {
                in_sheet_data = true;
                depth = 0;
            }
            continue;
        }

        match e.local_name().as_ref() {
            b"row" if depth == 0 => {
                if survey.rows == 0 {
                    if let Some(value) = attr_value(&e, b"spans")? {
                        spans = span_width(&value);
                        if spans.is_none() {
                            log::warn!("unreadable spans \"{}\" on first row ignored", value);
                        }
                    }
                }
                survey.rows += 1;
                next_col = 0;
            }
            b"c" => {
                let col = attr_value(&e, b"r")?
                    .and_then(|r| CellAddress::parse(&r).ok())
                    .map_or(next_col, |addr| addr.col as usize);
                next_col = col + 1;
                widest = widest.max(next_col);
            }
            _ => {}
        }
        if depth == 0 {
            survey.children += 1;
        }
        if is_start {
            depth += 1;
        }
    }

    survey.column_count = match spans {
        Some(width) if width > MAX_COLS as usize => {
            log::warn!(
                "first row spans {} columns, past the {} column limit; sizing from cells",
                width,
                MAX_COLS
            );
            widest
        }
        Some(width) => width,
        None => widest,
    };
    Ok(survey)
}

/// Column count from a `spans` attribute ("1:3" -> 3)
fn span_width(spans: &str) -> Option<usize> {
    spans
        .split_whitespace()
        .last()
        .and_then(|range| range.split(':').nth(1))
        .and_then(|last| last.trim().parse().ok())
}

/// Which field text events currently feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    None,
    Value,
    Formula,
    Inline,
}

/// A `c` element whose children are still being read
#[derive(Debug, Default)]
struct PendingCell {
    col: usize,
    cell_type: Option<String>,
    value: Option<String>,
    formula: Option<String>,
    has_formula: bool,
    inline: Option<String>,
}

/// State of the fill pass
struct Fill<'a> {
    part: &'a str,
    table: &'a mut SharedTextTable,
    worksheet: Worksheet,
    column_count: usize,
    rows: Vec<Vec<Cell>>,
    current_row: Option<Vec<Cell>>,
    pending: Option<PendingCell>,
    next_col: usize,
    target: TextTarget,
    in_phonetic: bool,
}

impl<'a> Fill<'a> {
    fn new(part: &'a str, name: &str, survey: Survey, table: &'a mut SharedTextTable) -> Self {
        Self {
            part,
            table,
            worksheet: Worksheet::new(name),
            column_count: survey.column_count,
            rows: Vec::with_capacity(survey.rows),
            current_row: None,
            pending: None,
            next_col: 0,
            target: TextTarget::None,
            in_phonetic: false,
        }
    }

    fn run(&mut self, xml: &[u8]) -> XlsxResult<()> {
        let mut reader = Reader::from_reader(xml);
        reader.trim_text(false);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => self.start(&e, false)?,
                Event::Empty(e) => self.start(&e, true)?,
                Event::End(e) => match e.local_name().as_ref() {
                    b"v" | b"f" | b"t" => self.target = TextTarget::None,
                    b"rPh" => self.in_phonetic = false,
                    b"c" => self.finish_cell()?,
                    b"row" => self.finish_row(),
                    _ => {}
                },
                Event::Text(e) if self.target != TextTarget::None => {
                    let text = e.unescape()?;
                    self.push_text(&text);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Handle a start or empty element
    fn start(&mut self, e: &BytesStart<'_>, empty: bool) -> XlsxResult<()> {
        match e.local_name().as_ref() {
            b"sheetFormatPr" => self.read_format(e)?,
            b"pane" => self.read_pane(e)?,
            b"col" => self.read_col(e)?,
            b"autoFilter" => self.read_filter(e)?,
            b"row" => {
                self.check_row_number(e)?;
                self.current_row = Some(Vec::with_capacity(self.column_count));
                self.next_col = 0;
                if empty {
                    self.finish_row();
                }
            }
            b"c" => {
                self.start_cell(e)?;
                if empty {
                    self.finish_cell()?;
                }
            }
            b"v" => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.value = Some(String::new());
                    if !empty {
                        self.target = TextTarget::Value;
                    }
                }
            }
            b"f" => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.has_formula = true;
                    if !empty {
                        pending.formula = Some(String::new());
                        self.target = TextTarget::Formula;
                    }
                }
            }
            b"is" => {
                if let Some(pending) = self.pending.as_mut() {
                    pending.inline = Some(String::new());
                }
            }
            b"rPh" if !empty => self.in_phonetic = true,
            b"t" if !empty && !self.in_phonetic => {
                if self.pending.as_ref().is_some_and(|p| p.inline.is_some()) {
                    self.target = TextTarget::Inline;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let field = match self.target {
            TextTarget::Value => &mut pending.value,
            TextTarget::Formula => &mut pending.formula,
            TextTarget::Inline => &mut pending.inline,
            TextTarget::None => return,
        };
        field.get_or_insert_with(String::new).push_str(text);
    }

    fn start_cell(&mut self, e: &BytesStart<'_>) -> XlsxResult<()> {
        let col = match attr_value(e, b"r")? {
            Some(r) => {
                CellAddress::parse(&r)
                    .map_err(|_| XlsxError::MalformedAddress {
                        part: self.part.to_string(),
                        address: r.clone(),
                    })?
                    .col as usize
            }
            None => self.next_col,
        };

        self.pending = Some(PendingCell {
            col,
            cell_type: attr_value(e, b"t")?,
            ..PendingCell::default()
        });
        Ok(())
    }

    /// Rows are placed by position; an explicit `r` that skips ahead is only reported
    fn check_row_number(&self, e: &BytesStart<'_>) -> XlsxResult<()> {
        let position = self.rows.len() + 1;
        if let Some(r) = attr_value(e, b"r")? {
            if r.trim().parse::<usize>().ok() != Some(position) {
                log::warn!(
                    "{}: row r=\"{}\" decoded as row {}",
                    self.part,
                    r,
                    position
                );
            }
        }
        Ok(())
    }

    fn finish_cell(&mut self) -> XlsxResult<()> {
        self.target = TextTarget::None;
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        let col = pending.col;
        let cell = self.build_cell(pending)?;

        let Some(cells) = self.current_row.as_mut() else {
            log::warn!("{}: cell outside of a row ignored", self.part);
            return Ok(());
        };

        if col < cells.len() {
            log::warn!(
                "{}: cell in column {} of row {} appears out of order",
                self.part,
                col + 1,
                self.rows.len() + 1
            );
            cells[col] = cell;
        } else {
            // Densify the gap since the previous cell
            cells.resize(col, Cell::placeholder());
            cells.push(cell);
        }
        self.next_col = col + 1;
        Ok(())
    }

    fn build_cell(&mut self, pending: PendingCell) -> XlsxResult<Cell> {
        let PendingCell {
            cell_type,
            value,
            formula,
            has_formula,
            inline,
            ..
        } = pending;

        let cell = match cell_type.as_deref() {
            Some("s") => match value.as_deref().map(str::trim) {
                None | Some("") => Cell::Empty,
                Some(v) => Cell::Reference(v.parse().map_err(|_| {
                    XlsxError::Parse(format!("{}: invalid shared text id '{}'", self.part, v))
                })?),
            },
            Some("e") => Cell::Expression(Expression::new(formula, value)),
            _ if has_formula => Cell::Expression(Expression::new(formula, value)),
            Some("str") => Cell::Expression(Expression::new(None, value)),
            Some("inlineStr") => {
                let text = decode_excel_escapes(&inline.unwrap_or_default());
                Cell::Reference(self.table.insert(&text))
            }
            None | Some("n") | Some("b") => match value.as_deref().map(str::trim) {
                None | Some("") => Cell::Empty,
                Some(v) => Cell::Number(v.parse().map_err(|_| {
                    XlsxError::Parse(format!("{}: invalid number '{}'", self.part, v))
                })?),
            },
            Some(other) => {
                log::warn!("{}: unknown cell type '{}' read as empty", self.part, other);
                Cell::Empty
            }
        };
        Ok(cell)
    }

    fn finish_row(&mut self) {
        let Some(mut cells) = self.current_row.take() else {
            return;
        };
        if cells.len() > self.column_count {
            log::warn!(
                "{}: row {} has {} cells, more than the {} columns declared; widening",
                self.part,
                self.rows.len() + 1,
                cells.len(),
                self.column_count
            );
            self.column_count = cells.len();
        }
        cells.resize(self.column_count, Cell::placeholder());
        self.rows.push(cells);
    }

    fn read_format(&mut self, e: &BytesStart<'_>) -> XlsxResult<()> {
        let custom = attr_value(e, b"customHeight")?.is_some_and(|v| is_truthy(&v));
        if !custom {
            return Ok(());
        }
        if let Some(height) = attr_value(e, b"defaultRowHeight")?.and_then(|h| h.parse().ok()) {
            self.worksheet.set_default_row_height(height);
        }
        Ok(())
    }

    fn read_pane(&mut self, e: &BytesStart<'_>) -> XlsxResult<()> {
        let frozen = attr_value(e, b"state")?.is_some_and(|s| s.starts_with("frozen"));
        if !frozen {
            return Ok(());
        }
        let split = |v: Option<String>| -> u32 {
            v.and_then(|s| s.parse::<f64>().ok())
                .map_or(0, |n| n.max(0.0) as u32)
        };
        let rows = split(attr_value(e, b"ySplit")?);
        let cols = split(attr_value(e, b"xSplit")?);

        let freeze = if rows > 0 {
            Freeze::TopRows(rows)
        } else {
            Freeze::LeftColumns(cols)
        };
        self.worksheet.set_freeze(freeze);
        Ok(())
    }

    fn read_col(&mut self, e: &BytesStart<'_>) -> XlsxResult<()> {
        let number = |v: Option<String>| v.and_then(|s| s.parse::<usize>().ok());
        let Some(min) = number(attr_value(e, b"min")?).filter(|&m| m > 0 && m <= MAX_COLS as usize)
        else {
            return Ok(());
        };
        let declared_max = number(attr_value(e, b"max")?)
            .unwrap_or(min)
            .clamp(min, MAX_COLS as usize);
        // Ranges running past the grid (often to the last column) stop at its edge
        let max = declared_max.min(self.column_count.max(min));
        if max < declared_max {
            log::debug!(
                "{}: col range {}:{} truncated to {}:{}",
                self.part,
                min,
                declared_max,
                min,
                max
            );
        }
        let width = attr_value(e, b"width")?
            .and_then(|w| w.parse().ok())
            .unwrap_or(DEFAULT_COLUMN_WIDTH);
        let best_fit = attr_value(e, b"bestFit")?.is_some_and(|v| is_truthy(&v));

        for index in (min - 1)..max {
            *self.worksheet.column_mut(index) = Column::with_width(width, best_fit);
        }
        Ok(())
    }

    fn read_filter(&mut self, e: &BytesStart<'_>) -> XlsxResult<()> {
        let Some(reference) = attr_value(e, b"ref")? else {
            return Ok(());
        };
        let range = CellRange::parse(&reference).map_err(|_| XlsxError::MalformedAddress {
            part: self.part.to_string(),
            address: reference.clone(),
        })?;
        self.worksheet.set_filter(range.start.col, range.end.col);
        Ok(())
    }

    fn finish(self) -> Worksheet {
        let Fill {
            mut worksheet,
            column_count,
            rows,
            ..
        } = self;

        worksheet.fill_columns(column_count);
        for mut cells in rows {
            // Rows read before a later row widened the sheet
            cells.resize(column_count, Cell::placeholder());
            worksheet.add_row(cells.into_iter().collect::<Row>());
        }
        worksheet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ox_sheets_core::CellKind;
    use pretty_assertions::assert_eq;

    fn sheet_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">{}</worksheet>"#,
            body
        )
    }

    fn read(body: &str) -> XlsxResult<(Worksheet, SharedTextTable)> {
        let mut table = SharedTextTable::new();
        let xml = sheet_xml(body);
        let ws = read_worksheet("xl/worksheets/sheet1.xml", xml.as_bytes(), "Sheet1", &mut table)?;
        Ok((ws, table))
    }

    fn kinds(ws: &Worksheet, row: usize) -> Vec<CellKind> {
        ws.row(row).unwrap().cells().iter().map(Cell::kind).collect()
    }

    #[test]
    fn test_sparse_row_is_densified() {
        let (ws, _) = read(
            r#"<sheetData><row r="1" spans="1:3"><c r="A1"><v>1</v></c><c r="C1"><v>3</v></c></row></sheetData>"#,
        )
        .unwrap();

        assert_eq!(ws.row_count(), 1);
        assert_eq!(ws.column_count(), 3);
        assert_eq!(
            kinds(&ws, 0),
            vec![CellKind::Number, CellKind::Expression, CellKind::Number]
        );
        assert!(ws.cell(0, 1).unwrap().expression().unwrap().is_placeholder());
        assert!(ws.is_dense());
    }

    #[test]
    fn test_trailing_cells_padded_to_first_row_span() {
        let (ws, _) = read(
            r#"<sheetData>
<row r="1" spans="1:4"><c r="A1"><v>1</v></c><c r="D1"><v>4</v></c></row>
<row r="2" spans="1:4"><c r="B2"><v>2</v></c></row>
<row r="3"/>
</sheetData>"#,
        )
        .unwrap();

        assert_eq!(ws.row_count(), 3);
        assert_eq!(ws.column_count(), 4);
        assert_eq!(ws.cell(1, 1).unwrap().number(), Some(2.0));
        assert!(ws.cell(1, 3).unwrap().expression().unwrap().is_placeholder());
        assert!(ws.cell(2, 0).unwrap().expression().unwrap().is_placeholder());
        assert!(ws.is_dense());
    }

    #[test]
    fn test_column_count_without_spans() {
        let (ws, _) = read(
            r#"<sheetData><row r="1"><c r="A1"><v>1</v></c></row><row r="2"><c r="E2"><v>5</v></c></row></sheetData>"#,
        )
        .unwrap();
        assert_eq!(ws.column_count(), 5);
        assert_eq!(ws.cell(1, 4).unwrap().number(), Some(5.0));
    }

    #[test]
    fn test_row_wider_than_span_grows_grid() {
        let (ws, _) = read(
            r#"<sheetData>
<row r="1" spans="1:1"><c r="A1"><v>1</v></c></row>
<row r="2" spans="1:3"><c r="C2"><v>3</v></c></row>
</sheetData>"#,
        )
        .unwrap();
        assert_eq!(ws.column_count(), 3);
        assert!(ws.is_dense());
        assert_eq!(ws.cell(1, 2).unwrap().number(), Some(3.0));
    }

    #[test]
    fn test_cell_types() {
        let (ws, table) = read(
            r#"<sheetData><row r="1" spans="1:8">
<c r="A1" s="1" t="s"><v>4</v></c>
<c r="B1" s="2"><v>-12.5</v></c>
<c r="C1" t="str"><f>A1&amp;"x"</f><v>textx</v></c>
<c r="D1" t="e"><f>1/0</f><v>#DIV/0!</v></c>
<c r="E1" t="b"><v>1</v></c>
<c r="F1" t="inlineStr"><is><t>inline</t></is></c>
<c r="G1"/>
<c r="H1" t="d"><v>2024-01-01</v></c>
</row></sheetData>"#,
        )
        .unwrap();

        assert_eq!(ws.cell(0, 0).unwrap().reference(), Some(4));
        assert_eq!(ws.cell(0, 1).unwrap().number(), Some(-12.5));

        let formula = ws.cell(0, 2).unwrap().expression().unwrap();
        assert_eq!(formula.formula.as_deref(), Some("A1&\"x\""));
        assert_eq!(formula.value.as_deref(), Some("textx"));

        let error = ws.cell(0, 3).unwrap().expression().unwrap();
        assert_eq!(error.value.as_deref(), Some("#DIV/0!"));

        assert_eq!(ws.cell(0, 4).unwrap().number(), Some(1.0));

        let id = ws.cell(0, 5).unwrap().reference().unwrap();
        assert_eq!(table.find_by_id(id), Some("inline"));

        assert!(ws.cell(0, 6).unwrap().is_empty());
        assert!(ws.cell(0, 7).unwrap().is_empty());
    }

    #[test]
    fn test_cells_without_address_follow_previous() {
        let (ws, _) = read(
            r#"<sheetData><row><c r="B1"><v>2</v></c><c><v>3</v></c></row></sheetData>"#,
        )
        .unwrap();
        assert_eq!(ws.column_count(), 3);
        assert_eq!(ws.cell(0, 2).unwrap().number(), Some(3.0));
    }

    #[test]
    fn test_malformed_address_is_an_error() {
        let err = read(r#"<sheetData><row r="1"><c r="1A"><v>1</v></c></row></sheetData>"#)
            .unwrap_err();
        match err {
            XlsxError::MalformedAddress { part, address } => {
                assert_eq!(part, "xl/worksheets/sheet1.xml");
                assert_eq!(address, "1A");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_structural_mismatch_decodes_rows() {
        let (ws, _) = read(
            r#"<sheetData><row r="1" spans="1:1"><c r="A1"><v>1</v></c></row><extLst/><row r="2" spans="1:1"><c r="A2"><v>2</v></c></row></sheetData>"#,
        )
        .unwrap();
        assert_eq!(ws.row_count(), 2);
        assert_eq!(ws.cell(1, 0).unwrap().number(), Some(2.0));
    }

    #[test]
    fn test_survey_counts() {
        let xml = sheet_xml(
            r#"<sheetData><row r="1" spans="1:2"><c r="A1"><v>1</v></c></row><foo/><row r="2"/></sheetData>"#,
        );
        assert_eq!(
            survey(xml.as_bytes()).unwrap(),
            Survey {
                children: 3,
                rows: 2,
                column_count: 2
            }
        );
    }

    #[test]
    fn test_layout_readback() {
        let (ws, _) = read(
            r#"<sheetViews><sheetView tabSelected="1" workbookViewId="0"><pane ySplit="2" topLeftCell="A3" activePane="bottomLeft" state="frozen"/></sheetView></sheetViews>
<sheetFormatPr defaultRowHeight="21" customHeight="1"/>
<cols><col min="1" max="2" width="30" bestFit="1" customWidth="1"/><col min="4" max="4" width="8" customWidth="1"/></cols>
<sheetData><row r="1" spans="1:4"><c r="A1"><v>1</v></c></row><row r="2" spans="1:4"/></sheetData>
<autoFilter ref="B1:D2"/>"#,
        )
        .unwrap();

        assert_eq!(ws.freeze(), Freeze::TopRows(2));
        assert_eq!(ws.default_row_height(), Some(21.0));
        assert_eq!(ws.column(0), Some(&Column::with_width(30.0, true)));
        assert_eq!(ws.column(1), Some(&Column::with_width(30.0, true)));
        assert_eq!(ws.column(2), Some(&Column::new()));
        assert_eq!(ws.column(3), Some(&Column::with_width(8.0, false)));
        let filter = ws.filter().unwrap();
        assert_eq!((filter.first_column, filter.last_column), (1, 3));
    }

    #[test]
    fn test_left_column_freeze_and_plain_row_height() {
        let (ws, _) = read(
            r#"<sheetViews><sheetView workbookViewId="0"><pane xSplit="3" topLeftCell="D1" activePane="topRight" state="frozen"/></sheetView></sheetViews>
<sheetFormatPr defaultRowHeight="15"/><sheetData/>"#,
        )
        .unwrap();
        assert_eq!(ws.freeze(), Freeze::LeftColumns(3));
        assert_eq!(ws.default_row_height(), None);
        assert_eq!(ws.row_count(), 0);
    }

    #[test]
    fn test_oversized_spans_size_from_cells() {
        for spans in ["1:18446744073709551615", "1:100000000", "1:16385"] {
            let (ws, _) = read(&format!(
                r#"<sheetData><row r="1" spans="{}"><c r="A1"><v>1</v></c><c r="C1"><v>3</v></c></row></sheetData>"#,
                spans
            ))
            .unwrap();
            assert_eq!(ws.column_count(), 3, "spans {}", spans);
            assert!(ws.is_dense());
        }
    }

    #[test]
    fn test_garbage_spans_size_from_cells() {
        let (ws, _) = read(
            r#"<sheetData><row r="1" spans="x:y"><c r="B1"><v>2</v></c></row><row r="2" spans="1:99999999999999999999999"/></sheetData>"#,
        )
        .unwrap();
        assert_eq!(ws.column_count(), 2);
        assert_eq!(ws.row_count(), 2);
        assert!(ws.is_dense());
    }

    #[test]
    fn test_spans_at_column_limit_accepted() {
        let xml = sheet_xml(r#"<sheetData><row r="1" spans="1:16384"/></sheetData>"#);
        assert_eq!(survey(xml.as_bytes()).unwrap().column_count, MAX_COLS as usize);
    }

    #[test]
    fn test_skipped_row_numbers_decode_by_position() {
        let (ws, _) = read(
            r#"<sheetData><row r="1" spans="1:1"><c r="A1"><v>1</v></c></row><row r="5" spans="1:1"><c r="A5"><v>5</v></c></row></sheetData>"#,
        )
        .unwrap();
        assert_eq!(ws.row_count(), 2);
        assert_eq!(ws.cell(1, 0).unwrap().number(), Some(5.0));
    }

    #[test]
    fn test_col_range_stops_at_grid_edge() {
        let (ws, _) = read(
            r#"<cols><col min="2" max="2" width="20" customWidth="1"/><col min="3" max="16384" width="9" customWidth="1"/></cols>
<sheetData><row r="1" spans="1:4"><c r="A1"><v>1</v></c></row></sheetData>"#,
        )
        .unwrap();
        assert_eq!(ws.columns().len(), 4);
        assert_eq!(ws.column(1), Some(&Column::with_width(20.0, false)));
        assert_eq!(ws.column(3), Some(&Column::with_width(9.0, false)));
    }

    #[test]
    fn test_col_range_past_empty_grid_keeps_first_column() {
        let (ws, _) = read(
            r#"<cols><col min="5" max="16384" width="12" customWidth="1"/></cols><sheetData/>"#,
        )
        .unwrap();
        assert_eq!(ws.columns().len(), 5);
        assert_eq!(ws.column(4), Some(&Column::with_width(12.0, false)));
    }

    #[test]
    fn test_span_width() {
        assert_eq!(span_width("1:3"), Some(3));
        assert_eq!(span_width("2:7"), Some(7));
        assert_eq!(span_width("1:2 4:9"), Some(9));
        assert_eq!(span_width("bogus"), None);
    }
}
