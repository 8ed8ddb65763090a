//! Spreadsheet-export parsing for the bulk member import.
//!
//! Staff hand in whatever their previous tool produced, so the parser leans
//! lenient: it sniffs the delimiter, tolerates one level of double-quoting,
//! and degrades junk to empty fields instead of failing.

use std::collections::HashMap;

/// Template offered for download: fixed header, two example rows.
pub const TEMPLATE_CSV: &str = "nombre;apellido;telefono;email;fechaRegistro;plan\n\
Juan;Pérez;3001234567;juan@ejemplo.com;01/02/2026;mensual_basic\n\
María;García;3109876543;;05/01/2026;bimestre_basic";

pub const TEMPLATE_FILENAME: &str = "plantilla_usuarios.csv";

/// One parsed data row, keyed by lower-cased header name.
pub type CsvRow = HashMap<String, String>;

/// Parse a delimited spreadsheet export into row mappings.
///
/// The first line is the header row; the delimiter is semicolon if the
/// header contains one, else comma. Header cells are trimmed, lower-cased
/// and stripped of one surrounding quote. A row is kept only when at least
/// one of `nombre`, `apellido`, `telefono` is non-empty. Never fails.
pub fn parse_csv(text: &str) -> Vec<CsvRow> {
    // Spreadsheet tools (and our own template) prefix a BOM.
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let sep = if lines[0].contains(';') { ';' } else { ',' };
    let headers: Vec<String> = lines[0]
        .split(sep)
        .map(|h| strip_quotes(h.trim()).to_lowercase())
        .collect();

    let mut rows = Vec::new();
    for line in &lines[1..] {
        let values = split_line(line, sep);
        let mut row = CsvRow::new();
        for (i, header) in headers.iter().enumerate() {
            let value = values.get(i).map(|v| v.trim()).unwrap_or("");
            row.insert(header.clone(), value.to_string());
        }
        let keep = ["nombre", "apellido", "telefono"]
            .iter()
            .any(|k| row.get(*k).is_some_and(|v| !v.is_empty()));
        if keep {
            rows.push(row);
        }
    }
    rows
}

fn strip_quotes(s: &str) -> &str {
    let s = s
        .strip_prefix('"')
        .or_else(|| s.strip_prefix('\''))
        .unwrap_or(s);
    s.strip_suffix('"')
        .or_else(|| s.strip_suffix('\''))
        .unwrap_or(s)
}

/// Split one data line. A leading `"` consumes through the next `"` with the
/// delimiter ignored inside (no doubled-quote escape); one whitespace, comma
/// or semicolon after the closing quote is swallowed.
fn split_line(line: &str, sep: char) -> Vec<String> {
    let mut values = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        if let Some(quoted) = rest.strip_prefix('"') {
            match quoted.find('"') {
                Some(end) => {
                    values.push(quoted[..end].to_string());
                    rest = &quoted[end + 1..];
                    let mut chars = rest.chars();
                    if matches!(chars.next(), Some(c) if c == ',' || c == ';' || c.is_whitespace())
                    {
                        rest = chars.as_str();
                    }
                }
                None => {
                    values.push(quoted.to_string());
                    rest = "";
                }
            }
        } else {
            match rest.find(sep) {
                Some(idx) => {
                    values.push(rest[..idx].trim().to_string());
                    rest = &rest[idx + 1..];
                }
                None => {
                    values.push(rest.trim().to_string());
                    rest = "";
                }
            }
        }
    }
    values
}
