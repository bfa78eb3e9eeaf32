//! End-to-end import flow: real workbook on disk -> parse -> validate ->
//! preview -> confirm -> reconciled store.

use std::path::Path;

use odonto_import::{read_rows, validate_batch, write_template, ImportSession, ImportStage};
use odonto_users::{UserSource, UserStore};
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

fn write_sheet(path: &Path, rows: &[(&str, &str)]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "correo").unwrap();
    worksheet.write_string(0, 1, "cedula").unwrap();
    for (index, (correo, cedula)) in rows.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, *correo).unwrap();
        worksheet.write_string(row, 1, *cedula).unwrap();
    }
    workbook.save(path).unwrap();
}

#[tokio::test]
async fn file_to_store_happy_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("estudiantes.xlsx");
    write_sheet(
        &path,
        &[
            ("Ana.Lopez@udla.edu.ec", "1712345678"),
            ("not-an-email", "1798765432"),
            ("jose.mora@udla.edu.ec", "12345"),
            ("rosa.vega@udla.edu.ec", "1755555555"),
        ],
    );

    let store = UserStore::new();
    let mut session = ImportSession::new();

    let preview = session.load_file(&path).unwrap();
    assert_eq!(session.stage(), ImportStage::Preview);
    assert_eq!(preview.total, 4);
    assert_eq!(preview.valid, 2);
    assert_eq!(preview.errors, 2);

    // Emails arrive normalized in the preview sample
    assert_eq!(preview.sample[0].email, "ana.lopez@udla.edu.ec");
    assert_eq!(preview.sample[0].source_row, 2);

    // Rejected rows keep their spreadsheet numbering
    let errors = session.errors();
    assert_eq!(errors[0].row, 3);
    assert!(errors[0].message.contains("invalid email"));
    assert_eq!(errors[1].row, 4);
    assert!(errors[1].message.contains("minimum 6"));

    let results = session.confirm(&store).await.unwrap();
    assert_eq!(results.total, 2);
    assert_eq!(results.successful, 2);
    assert_eq!(results.failed, 0);
    assert_eq!(results.duplicates, 0);

    let users = store.users().await;
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.source == UserSource::BulkUpload));
    let ana = store.find_by_email("ana.lopez@udla.edu.ec").await.unwrap();
    assert_eq!(ana.display_name, "Ana.lopez");
    assert_eq!(ana.cedula, "1712345678");
}

#[tokio::test]
async fn corrupt_file_keeps_session_in_upload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"definitely not a workbook").unwrap();

    let mut session = ImportSession::new();
    assert!(session.load_file(&path).is_err());

    assert_eq!(session.stage(), ImportStage::Upload);
    assert_eq!(session.errors().len(), 1);
    assert_eq!(session.errors()[0].row, 0);

    // A good file can still be loaded afterwards
    let good = dir.path().join("good.xlsx");
    write_sheet(&good, &[("a@b.com", "123456")]);
    let preview = session.load_file(&good).unwrap();
    assert_eq!(preview.valid, 1);
    assert_eq!(preview.errors, 0);
}

#[tokio::test]
async fn wrong_extension_is_rejected_before_parsing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("users.csv");
    std::fs::write(&path, b"correo,cedula\n").unwrap();

    let mut session = ImportSession::new();
    let err = session.load_file(&path).unwrap_err();
    assert!(err.to_string().contains("unsupported file extension"));
}

#[test]
fn template_rows_validate_cleanly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plantilla_usuarios.xlsx");
    write_template(&path).unwrap();

    let rows = read_rows(&path).unwrap();
    let outcome = validate_batch(&rows);

    assert_eq!(outcome.valid.len(), 2);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.valid[0].email, "usuario1@example.com");
}

#[tokio::test]
async fn numeric_cedula_cells_import_as_digit_strings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("numeric.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "correo").unwrap();
    worksheet.write_string(0, 1, "cedula").unwrap();
    worksheet.write_string(1, 0, "n@udla.edu.ec").unwrap();
    worksheet.write_number(1, 1, 1712345678.0).unwrap();
    workbook.save(&path).unwrap();

    let rows = read_rows(&path).unwrap();
    let outcome = validate_batch(&rows);

    assert_eq!(outcome.valid.len(), 1);
    assert_eq!(outcome.valid[0].cedula, "1712345678");
}
