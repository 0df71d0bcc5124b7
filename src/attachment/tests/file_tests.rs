//! Tests for file naming, classification, and upload limit rules.

use crate::attachment::domain::{
    AttachmentDomainError, FileCategory, FileName, FilePath, file_extension, format_file_size,
    rules, safe_file_name,
};
use crate::config::AttachmentLimits;
use crate::task::domain::TaskId;
use eyre::ensure;
use rstest::rstest;

#[rstest]
#[case("report.pdf")]
#[case("  notes v2.txt  ")]
#[case("CONSOLE.log")]
#[case("COM10")]
fn file_name_accepts_ordinary_names(#[case] raw: &str) {
    assert!(FileName::new(raw).is_ok(), "{raw} should be accepted");
}

#[rstest]
#[case("", AttachmentDomainError::EmptyFileName)]
#[case("   ", AttachmentDomainError::EmptyFileName)]
#[case("a/b.txt", AttachmentDomainError::ForbiddenCharacter('/'))]
#[case("what?.txt", AttachmentDomainError::ForbiddenCharacter('?'))]
#[case("tab\tname", AttachmentDomainError::ForbiddenCharacter('\t'))]
#[case("con", AttachmentDomainError::ReservedFileName("con".to_owned()))]
#[case("NUL.txt", AttachmentDomainError::ReservedFileName("NUL.txt".to_owned()))]
#[case("lpt9.doc", AttachmentDomainError::ReservedFileName("lpt9.doc".to_owned()))]
fn file_name_rejects_hostile_names(#[case] raw: &str, #[case] expected: AttachmentDomainError) {
    assert_eq!(FileName::new(raw), Err(expected));
}

#[rstest]
fn file_name_length_is_bounded() {
    assert!(FileName::new("a".repeat(255)).is_ok());
    assert_eq!(
        FileName::new("a".repeat(256)),
        Err(AttachmentDomainError::FileNameTooLong { max: 255 })
    );
}

#[rstest]
fn file_path_must_not_be_blank() {
    assert_eq!(FilePath::new(" \t"), Err(AttachmentDomainError::BlankFilePath));
    assert!(FilePath::new("uploads/1/a.png").is_ok());
}

#[rstest]
#[case("Photo.JPG", "jpg")]
#[case("archive.tar.gz", "gz")]
#[case("README", "")]
fn extension_is_lowercased_suffix(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(file_extension(name), expected);
}

#[rstest]
#[case("My Report.PDF", "My_Report_1700000000000_a1b2c3.pdf")]
#[case("résumé.docx", "r_sum__1700000000000_a1b2c3.docx")]
#[case("Makefile", "Makefile_1700000000000_a1b2c3")]
#[case("v1.2-final.txt", "v1.2-final_1700000000000_a1b2c3.txt")]
fn safe_name_replaces_unsafe_characters(#[case] original: &str, #[case] expected: &str) {
    assert_eq!(
        safe_file_name(original, 1_700_000_000_000, "a1b2c3d4e5f6"),
        expected
    );
}

#[rstest]
#[case("image/png", FileCategory::Image)]
#[case("application/pdf", FileCategory::Pdf)]
#[case("application/msword", FileCategory::Document)]
#[case(
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    FileCategory::Document
)]
#[case("application/vnd.ms-excel", FileCategory::Spreadsheet)]
#[case(
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    FileCategory::Spreadsheet
)]
#[case("text/plain", FileCategory::Text)]
#[case("application/zip", FileCategory::Other)]
fn category_follows_mime_type(#[case] mime: &str, #[case] expected: FileCategory) {
    assert_eq!(FileCategory::from_mime(mime), expected);
}

#[rstest]
#[case(0, "0 B")]
#[case(512, "512 B")]
#[case(1024, "1 KB")]
#[case(1536, "1.5 KB")]
#[case(1_234_567, "1.18 MB")]
#[case(10 * 1024 * 1024, "10 MB")]
#[case(5 * 1024 * 1024 * 1024, "5 GB")]
fn size_formats_with_binary_units(#[case] bytes: u64, #[case] expected: &str) {
    assert_eq!(format_file_size(bytes), expected);
}

#[rstest]
fn acceptable_file_checks_type_then_size() -> eyre::Result<()> {
    let limits = AttachmentLimits::default();
    let max = limits.max_file_size_bytes;

    ensure!(rules::ensure_acceptable_file(&limits, "image/png", max).is_ok());
    ensure!(
        rules::ensure_acceptable_file(&limits, "application/x-msdownload", 10)
            == Err(AttachmentDomainError::FileTypeNotAllowed(
                "application/x-msdownload".to_owned()
            ))
    );
    ensure!(
        rules::ensure_acceptable_file(&limits, "image/png", 0)
            == Err(AttachmentDomainError::EmptyFile)
    );
    ensure!(
        rules::ensure_acceptable_file(&limits, "image/png", max + 1)
            == Err(AttachmentDomainError::FileTooLarge { size: max + 1, max })
    );
    Ok(())
}

#[rstest]
fn task_capacity_checks_count_and_total() -> eyre::Result<()> {
    let limits = AttachmentLimits {
        max_per_task: 2,
        max_total_size_bytes: 100,
        ..AttachmentLimits::default()
    };
    let task = TaskId::new(1)?;

    ensure!(rules::ensure_task_capacity(&limits, task, 1, 60, 40).is_ok());
    ensure!(
        rules::ensure_task_capacity(&limits, task, 2, 0, 1)
            == Err(AttachmentDomainError::LimitReached { task_id: task, max: 2 })
    );
    ensure!(
        rules::ensure_task_capacity(&limits, task, 1, 60, 41)
            == Err(AttachmentDomainError::TotalSizeExceeded { task_id: task, max: 100 })
    );
    ensure!(!rules::can_add_by_size(u64::MAX, 1, u64::MAX));
    Ok(())
}
