use super::*;

fn meta(name: &str, mime: &str, size: u64) -> FileMeta {
    FileMeta { name: name.to_owned(), mime: mime.to_owned(), size }
}

#[test]
fn genetic_requires_xlsx_mime() {
    assert_eq!(UploadKind::Genetic.validate(&meta("markers.xlsx", XLSX_MIME, 10)), Ok(()));
    assert_eq!(
        UploadKind::Genetic.validate(&meta("markers.xlsx", "application/octet-stream", 10)),
        Err(UploadError::NotSpreadsheet)
    );
    assert_eq!(UploadKind::Genetic.validate(&meta("markers.csv", "text/csv", 10)), Err(UploadError::NotSpreadsheet));
}

#[test]
fn dicom_accepts_mime_or_extension() {
    assert_eq!(UploadKind::Dicom.validate(&meta("scan", DICOM_MIME, 10)), Ok(()));
    assert_eq!(UploadKind::Dicom.validate(&meta("scan.dcm", "", 10)), Ok(()));
    assert_eq!(UploadKind::Dicom.validate(&meta("SCAN.DCM", "", 10)), Ok(()));
    assert_eq!(UploadKind::Dicom.validate(&meta("scan.png", "image/png", 10)), Err(UploadError::NotDicom));
}

#[test]
fn skin_image_requires_image_mime() {
    assert_eq!(UploadKind::SkinImage.validate(&meta("lesion.jpg", "image/jpeg", 1024)), Ok(()));
    assert_eq!(UploadKind::SkinImage.validate(&meta("lesion.pdf", "application/pdf", 1024)), Err(UploadError::NotImage));
}

#[test]
fn skin_image_size_limit_is_inclusive() {
    assert_eq!(UploadKind::SkinImage.validate(&meta("a.png", "image/png", MAX_IMAGE_BYTES)), Ok(()));
    assert_eq!(
        UploadKind::SkinImage.validate(&meta("a.png", "image/png", MAX_IMAGE_BYTES + 1)),
        Err(UploadError::ImageTooLarge)
    );
}

#[test]
fn upload_errors_render_form_messages() {
    assert_eq!(UploadError::NotSpreadsheet.to_string(), "Please upload a valid Excel file (.xlsx)");
    assert_eq!(UploadError::ImageTooLarge.to_string(), "Image file size should be less than 5MB");
}

#[test]
fn spreadsheet_names() {
    assert!(is_spreadsheet_name("patients.xlsx"));
    assert!(is_spreadsheet_name("PATIENTS.XLS"));
    assert!(!is_spreadsheet_name("patients.csv"));
}
