//! Text escaping for markup members
//!
//! Two layers apply to cell text: XML entity escaping, and Excel's
//! `_xHHHH_` notation for characters XML 1.0 cannot carry (control
//! characters) plus literal underscores that would otherwise look like an
//! escape.

/// Escape `&`, `<`, `>`, `"` and `'` for element text or attribute values
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Code point of an `_xHHHH_` sequence at the start of `s`, if there is one
fn escape_at(s: &str) -> Option<u32> {
    let bytes = s.as_bytes();
    if bytes.len() < 7 || &bytes[..2] != b"_x" || bytes[6] != b'_' {
        return None;
    }
    let hex = s.get(2..6)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Decode `_xHHHH_` sequences
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match escape_at(rest).and_then(char::from_u32) {
            Some(c) => {
                out.push(c);
                rest = &rest[7..];
            }
            None => {
                out.push('_');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Encode characters that need `_xHHHH_` notation
///
/// Control characters other than tab, line feed and carriage return are
/// written as escapes, and an underscore starting an escape lookalike is
/// written as `_x005F_` so the text decodes back unchanged.
pub(crate) fn encode_excel_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            '_' if escape_at(&s[i..]).is_some() => out.push_str("_x005F_"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 => out.push_str(&format!("_x{:04X}_", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

/// Escape cell text for a `<t>` element
pub(crate) fn escape_text(s: &str) -> String {
    escape_xml(&encode_excel_escapes(s))
}

/// True if `s` has whitespace a parser would otherwise trim
pub(crate) fn needs_space_preserve(s: &str) -> bool {
    s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
}
