//! Stylesheet emitted with every workbook
//!
//! Cells only ever carry one of the fixed slots from [`crate::parts`], so the
//! stylesheet is a small table keyed on those slots rather than a style
//! registry.

use crate::parts::{NUMBER_STYLE_SLOT, TEXT_STYLE_SLOT};

/// Built-in number format "General"
const NUM_FMT_GENERAL: u32 = 0;

/// Built-in number format "@" (text)
const NUM_FMT_TEXT: u32 = 49;

/// One `<xf>` entry of `cellXfs`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellXf {
    num_fmt_id: u32,
    apply_number_format: bool,
}

impl CellXf {
    const DEFAULT: CellXf = CellXf {
        num_fmt_id: NUM_FMT_GENERAL,
        apply_number_format: false,
    };

    fn with_format(num_fmt_id: u32) -> Self {
        Self {
            num_fmt_id,
            apply_number_format: true,
        }
    }

    fn to_xml(self) -> String {
        let apply = if self.apply_number_format {
            r#" applyNumberFormat="1""#
        } else {
            ""
        };
        format!(
            r#"<xf numFmtId="{}" fontId="0" fillId="0" borderId="0" xfId="0"{}/>"#,
            self.num_fmt_id, apply
        )
    }
}

/// The `cellXfs` table, indexed by style slot
fn cell_xfs() -> Vec<CellXf> {
    let len = TEXT_STYLE_SLOT.max(NUMBER_STYLE_SLOT) as usize + 1;
    let mut xfs = vec![CellXf::DEFAULT; len];
    xfs[TEXT_STYLE_SLOT as usize] = CellXf::with_format(NUM_FMT_TEXT);
    xfs[NUMBER_STYLE_SLOT as usize] = CellXf::with_format(NUM_FMT_GENERAL);
    xfs
}

/// Render `xl/styles.xml`
pub(crate) fn to_styles_xml() -> String {
    let mut xml = String::new();
    xml.push_str(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="1">
    <font><sz val="11"/><color theme="1"/><name val="Calibri"/><family val="2"/><scheme val="minor"/></font>
  </fonts>
  <fills count="2">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
  </fills>
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
    );

    let xfs = cell_xfs();
    xml.push_str(&format!("\n  <cellXfs count=\"{}\">", xfs.len()));
    for xf in xfs {
        xml.push_str("\n    ");
        xml.push_str(&xf.to_xml());
    }
    xml.push_str("\n  </cellXfs>");

    xml.push_str(
        r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium2" defaultPivotStyle="PivotStyleLight16"/>"#,
    );

    xml.push_str("\n</styleSheet>");
    xml
}
