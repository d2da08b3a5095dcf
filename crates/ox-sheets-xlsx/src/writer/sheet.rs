//! Worksheet part encoding

use crate::escape::{escape_text, escape_xml};
use crate::parts::{NS_MAIN, NS_REL, NUMBER_STYLE_SLOT, TEXT_STYLE_SLOT};
use ox_sheets_core::{format_number, Cell, CellAddress, Freeze, Worksheet, MAX_COLS};

/// Render one worksheet member
pub(super) fn worksheet_xml(sheet: &Worksheet) -> String {
    let rows = sheet.row_count();
    let cols = sheet.column_count();

    let mut content = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{}" xmlns:r="{}">
    <dimension ref="{}"/>"#,
        NS_MAIN,
        NS_REL,
        dimension(rows, cols)
    );

    write_sheet_views(&mut content, sheet.freeze());

    match sheet.default_row_height() {
        Some(height) => content.push_str(&format!(
            "\n    <sheetFormatPr defaultRowHeight=\"{}\" customHeight=\"1\"/>",
            format_number(height)
        )),
        None => content.push_str("\n    <sheetFormatPr defaultRowHeight=\"15\"/>"),
    }

    write_cols(&mut content, sheet);
    write_sheet_data(&mut content, sheet);

    if let Some(filter) = sheet.filter() {
        let first = CellAddress::column_to_letters(filter.first_column);
        let last = CellAddress::column_to_letters(filter.last_column);
        let last_row = rows.max(1);
        if rows >= 2 {
            content.push_str(&format!(
                "\n    <autoFilter ref=\"{first}1:{last}{last_row}\"><sortState ref=\"{first}2:{last}{last_row}\"/></autoFilter>"
            ));
        } else {
            content.push_str(&format!(
                "\n    <autoFilter ref=\"{first}1:{last}{last_row}\"/>"
            ));
        }
    }

    content.push_str(
        r#"
    <pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/>
    <pageSetup orientation="portrait"/>
</worksheet>"#,
    );
    content
}

/// Used range of a `rows` x `cols` grid
fn dimension(rows: usize, cols: usize) -> String {
    if rows == 0 {
        return "A1".to_string();
    }
    let last = if cols == 0 {
        "A".to_string()
    } else {
        CellAddress::column_to_letters(to_col(cols - 1))
    };
    format!("A1:{}{}", last, rows)
}

fn to_col(index: usize) -> u16 {
    index.min(MAX_COLS as usize - 1) as u16
}

fn write_sheet_views(content: &mut String, freeze: Freeze) {
    let (split, top_left, pane) = match freeze {
        Freeze::None => return,
        Freeze::TopRows(n) => (format!("ySplit=\"{}\"", n), format!("A{}", n as u64 + 1), "bottomLeft"),
        Freeze::LeftColumns(n) => (
            format!("xSplit=\"{}\"", n),
            format!("{}1", CellAddress::column_to_letters(to_col(n as usize))),
            "topRight",
        ),
    };

    content.push_str(&format!(
        r#"
    <sheetViews>
        <sheetView tabSelected="1" workbookViewId="0">
            <pane {} topLeftCell="{}" activePane="{}" state="frozen"/>
            <selection pane="{}"/>
        </sheetView>
    </sheetViews>"#,
        split, top_left, pane, pane
    ));
}

fn write_cols(content: &mut String, sheet: &Worksheet) {
    let count = sheet.column_count().max(sheet.columns().len());
    if count == 0 {
        return;
    }

    content.push_str("\n    <cols>");
    for i in 0..count {
        let column = sheet.column_or_default(i);
        content.push_str(&format!(
            "\n        <col min=\"{}\" max=\"{}\" width=\"{}\" bestFit=\"{}\" customWidth=\"1\"/>",
            i + 1,
            i + 1,
            format_number(column.width),
            u8::from(column.auto_width)
        ));
    }
    content.push_str("\n    </cols>");
}

fn write_sheet_data(content: &mut String, sheet: &Worksheet) {
    if sheet.row_count() == 0 {
        content.push_str("\n    <sheetData/>");
        return;
    }

    let cols = sheet.column_count();
    let spans = if cols > 0 {
        format!(" spans=\"1:{}\"", cols)
    } else {
        String::new()
    };
    let height = match sheet.default_row_height() {
        Some(h) => format!(" ht=\"{}\" customHeight=\"1\"", format_number(h)),
        None => String::new(),
    };

    content.push_str("\n    <sheetData>");
    for (r, row) in sheet.rows().iter().enumerate() {
        content.push_str(&format!("\n        <row r=\"{}\"{}{}>", r + 1, spans, height));
        for (c, cell) in row.cells().iter().enumerate() {
            let address = CellAddress::new(r as u32, to_col(c)).to_a1_string();
            write_cell(content, &address, cell);
        }
        content.push_str("</row>");
    }
    content.push_str("\n    </sheetData>");
}

fn write_cell(content: &mut String, address: &str, cell: &Cell) {
    match cell {
        Cell::Empty => {}
        Cell::Reference(id) => content.push_str(&format!(
            "<c r=\"{}\" s=\"{}\" t=\"s\"><v>{}</v></c>",
            address, TEXT_STYLE_SLOT, id
        )),
        Cell::Number(n) if !n.is_finite() => {
            log::warn!("{}: non-finite number {} written as #NUM!", address, n);
            content.push_str(&format!("<c r=\"{}\" t=\"e\"><v>#NUM!</v></c>", address));
        }
        Cell::Number(n) => content.push_str(&format!(
            "<c r=\"{}\" s=\"{}\"><v>{}</v></c>",
            address,
            NUMBER_STYLE_SLOT,
            format_number(*n)
        )),
        Cell::Expression(expr) if expr.is_placeholder() => {}
        Cell::Expression(expr) => {
            content.push_str(&format!("<c r=\"{}\" t=\"str\">", address));
            if let Some(formula) = &expr.formula {
                content.push_str(&format!("<f>{}</f>", escape_xml(formula)));
            }
            if let Some(value) = &expr.value {
                content.push_str(&format!("<v>{}</v>", escape_text(value)));
            }
            content.push_str("</c>");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ox_sheets_core::{Column, SharedTextTable};
    use pretty_assertions::assert_eq;

    fn cell_xml(cell: &Cell) -> String {
        let mut out = String::new();
        write_cell(&mut out, "B2", cell);
        out
    }

    #[test]
    fn test_dimension() {
        assert_eq!(dimension(0, 0), "A1");
        assert_eq!(dimension(0, 4), "A1");
        assert_eq!(dimension(3, 0), "A1:A3");
        assert_eq!(dimension(6, 5), "A1:E6");
        assert_eq!(dimension(1, 28), "A1:AB1");
    }

    #[test]
    fn test_cell_encoding() {
        assert_eq!(
            cell_xml(&Cell::Reference(0)),
            r#"<c r="B2" s="1" t="s"><v>0</v></c>"#
        );
        assert_eq!(
            cell_xml(&Cell::Number(42.0)),
            r#"<c r="B2" s="2"><v>42</v></c>"#
        );
        assert_eq!(
            cell_xml(&Cell::Number(0.1)),
            r#"<c r="B2" s="2"><v>0.1</v></c>"#
        );
        assert_eq!(
            cell_xml(&Cell::from(ox_sheets_core::Expression::new(
                Some("A1&\"<\"".into()),
                Some("x<".into())
            ))),
            r#"<c r="B2" t="str"><f>A1&amp;&quot;&lt;&quot;</f><v>x&lt;</v></c>"#
        );
        assert_eq!(
            cell_xml(&Cell::Number(f64::NAN)),
            r#"<c r="B2" t="e"><v>#NUM!</v></c>"#
        );
        assert_eq!(
            cell_xml(&Cell::Number(f64::NEG_INFINITY)),
            r#"<c r="B2" t="e"><v>#NUM!</v></c>"#
        );
        assert_eq!(cell_xml(&Cell::Empty), "");
        assert_eq!(cell_xml(&Cell::placeholder()), "");
    }

    #[test]
    fn test_sheet_with_sparse_row() {
        let mut ws = Worksheet::new("Sheet1");
        let mut table = SharedTextTable::new();
        ws.create_cell(0, 0).unwrap().set_text(&mut table, "Datum");
        ws.create_cell(1, 2).unwrap().set_number(42.0);

        let xml = worksheet_xml(&ws);
        assert!(xml.contains(r#"<dimension ref="A1:C2"/>"#));
        assert!(xml.contains(
            r#"<row r="1" spans="1:3"><c r="A1" s="1" t="s"><v>0</v></c></row>"#
        ));
        assert!(xml.contains(r#"<row r="2" spans="1:3"><c r="C2" s="2"><v>42</v></c></row>"#));
        assert!(xml.contains(r#"<sheetFormatPr defaultRowHeight="15"/>"#));
        assert!(!xml.contains("<sheetViews>"));
        assert!(!xml.contains("<autoFilter"));
    }

    #[test]
    fn test_empty_sheet() {
        let xml = worksheet_xml(&Worksheet::new("Empty"));
        assert!(xml.contains(r#"<dimension ref="A1"/>"#));
        assert!(xml.contains("<sheetData/>"));
        assert!(!xml.contains("<cols>"));
    }

    #[test]
    fn test_layout_elements() {
        let mut ws = Worksheet::new("Layout");
        ws.fill_columns(2);
        ws.fill_rows(3);
        ws.set_default_row_height(20.5);
        ws.set_freeze(Freeze::TopRows(1));
        ws.set_filter(0, 1);
        *ws.column_mut(1) = Column::with_width(32.0, false);

        let xml = worksheet_xml(&ws);
        assert!(xml.contains(
            r#"<pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/>"#
        ));
        assert!(xml.contains(r#"<selection pane="bottomLeft"/>"#));
        assert!(xml.contains(r#"<sheetFormatPr defaultRowHeight="20.5" customHeight="1"/>"#));
        assert!(xml.contains(
            r#"<col min="1" max="1" width="15" bestFit="1" customWidth="1"/>"#
        ));
        assert!(xml.contains(
            r#"<col min="2" max="2" width="32" bestFit="0" customWidth="1"/>"#
        ));
        assert!(xml.contains(r#"<row r="3" spans="1:2" ht="20.5" customHeight="1"></row>"#));
        assert!(xml.contains(
            r#"<autoFilter ref="A1:B3"><sortState ref="A2:B3"/></autoFilter>"#
        ));

        let dimension = xml.find("<dimension").unwrap();
        let views = xml.find("<sheetViews>").unwrap();
        let format = xml.find("<sheetFormatPr").unwrap();
        let cols = xml.find("<cols>").unwrap();
        let data = xml.find("<sheetData>").unwrap();
        let filter = xml.find("<autoFilter").unwrap();
        let margins = xml.find("<pageMargins").unwrap();
        assert!(dimension < views && views < format && format < cols);
        assert!(cols < data && data < filter && filter < margins);
    }

    #[test]
    fn test_left_column_freeze() {
        let mut ws = Worksheet::new("Frozen");
        ws.set_freeze(Freeze::LeftColumns(2));
        let xml = worksheet_xml(&ws);
        assert!(xml.contains(
            r#"<pane xSplit="2" topLeftCell="C1" activePane="topRight" state="frozen"/>"#
        ));
    }

    #[test]
    fn test_single_row_filter_has_no_sort_state() {
        let mut ws = Worksheet::new("One");
        ws.create_cell(0, 3).unwrap().set_number(1.0);
        ws.set_filter(1, 3);
        let xml = worksheet_xml(&ws);
        assert!(xml.contains(r#"<autoFilter ref="B1:D1"/>"#));
    }
}
