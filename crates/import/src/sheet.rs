//! Spreadsheet reading and template generation.
//!
//! Reading goes through `calamine` so both `.xlsx` and legacy `.xls` files
//! are accepted; the template is produced with `rust_xlsxwriter` so operators
//! learn the expected `{correo, cedula}` schema from a real workbook.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use crate::errors::ImportError;
use crate::records::RawRecord;

/// Extensions accepted for import files
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Worksheet name used in the downloadable template
const TEMPLATE_SHEET: &str = "Usuarios";

/// Example rows written into the template
const TEMPLATE_ROWS: [(&str, &str); 2] = [
    ("usuario1@example.com", "1234567890"),
    ("usuario2@example.com", "0987654321"),
];

/// Read the first worksheet of a spreadsheet into raw records.
///
/// The first row is treated as the header; every following row becomes one
/// [`RawRecord`] keyed by the header names. A file that cannot be opened or
/// parsed fails with [`ImportError::ParseFailed`], which is a caller-visible
/// failure distinct from row-level validation errors.
pub fn read_rows(path: &Path) -> Result<Vec<RawRecord>, ImportError> {
    check_extension(path)?;

    let mut workbook =
        open_workbook_auto(path).map_err(|e| ImportError::ParseFailed(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::ParseFailed("workbook has no worksheets".to_string()))?
        .map_err(|e| ImportError::ParseFailed(e.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(cells) => cells.iter().map(cell_text).collect(),
        None => return Ok(Vec::new()),
    };

    let records: Vec<RawRecord> = rows
        .map(|cells| {
            let mut record = RawRecord::new();
            for (column, cell) in header.iter().zip(cells) {
                if !column.is_empty() {
                    record.insert(column.clone(), cell_text(cell));
                }
            }
            record
        })
        .collect();

    debug!(path = %path.display(), rows = records.len(), "read spreadsheet");
    Ok(records)
}

/// Write the downloadable template with example `{correo, cedula}` rows
pub fn write_template(path: &Path) -> Result<(), ImportError> {
    fn fill(worksheet: &mut rust_xlsxwriter::Worksheet) -> Result<(), rust_xlsxwriter::XlsxError> {
        worksheet.set_name(TEMPLATE_SHEET)?;
        worksheet.write_string(0, 0, "correo")?;
        worksheet.write_string(0, 1, "cedula")?;
        for (index, (correo, cedula)) in TEMPLATE_ROWS.iter().enumerate() {
            let row = index as u32 + 1;
            worksheet.write_string(row, 0, *correo)?;
            worksheet.write_string(row, 1, *cedula)?;
        }
        Ok(())
    }

    let mut workbook = rust_xlsxwriter::Workbook::new();
    fill(workbook.add_worksheet()).map_err(|e| ImportError::TemplateFailed(e.to_string()))?;
    workbook
        .save(path)
        .map_err(|e| ImportError::TemplateFailed(e.to_string()))?;

    debug!(path = %path.display(), "wrote import template");
    Ok(())
}

fn check_extension(path: &Path) -> Result<(), ImportError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(ImportError::UnsupportedFile(path.display().to_string()))
    }
}

/// Coerce a cell to trimmed text.
///
/// Excel hands numeric cells back as floats, so an integral value loses the
/// trailing `.0` a plain `to_string` would keep; cedulas typed as numbers
/// must survive as digit strings.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 9e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_coercion() {
        assert_eq!(cell_text(&Data::String("  a@b.com ".to_string())), "a@b.com");
        assert_eq!(cell_text(&Data::Float(1234567890.0)), "1234567890");
        assert_eq!(cell_text(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_text(&Data::Int(123456)), "123456");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn test_extension_check() {
        assert!(check_extension(Path::new("users.xlsx")).is_ok());
        assert!(check_extension(Path::new("users.XLS")).is_ok());
        assert!(matches!(
            check_extension(Path::new("users.csv")),
            Err(ImportError::UnsupportedFile(_))
        ));
        assert!(check_extension(Path::new("users")).is_err());
    }

    #[test]
    fn test_template_round_trips_through_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plantilla_usuarios.xlsx");

        write_template(&path).unwrap();
        let rows = read_rows(&path).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("correo"), Some("usuario1@example.com"));
        assert_eq!(rows[0].get("cedula"), Some("1234567890"));
        assert_eq!(rows[1].get("cedula"), Some("0987654321"));
    }

    #[test]
    fn test_unreadable_file_is_a_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"this is not a spreadsheet").unwrap();

        let result = read_rows(&path);
        assert!(matches!(result, Err(ImportError::ParseFailed(_))));
    }

    #[test]
    fn test_missing_file_is_a_parse_failure() {
        let result = read_rows(Path::new("/nonexistent/users.xlsx"));
        assert!(matches!(result, Err(ImportError::ParseFailed(_))));
    }
}
