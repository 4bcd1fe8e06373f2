use crate::record::BookRecord;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const BOOK_BUCKET: &str = "ebooks";
pub const COVER_BUCKET: &str = "ebook-covers";

/// Where the artifacts of one record go, on disk and in the object store.
/// Both use the record's file names so the two stay in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoragePlan {
    pub publisher_folder: String,
    pub archive_path: PathBuf,
    pub cover_path: PathBuf,
    pub archive_object_key: String,
    pub cover_object_key: String,
}

impl StoragePlan {
    pub fn new(record: &BookRecord, archive_root: &Path, cover_root: &Path) -> Self {
        let publisher_folder = record.publisher.to_lowercase();
        Self {
            archive_path: archive_root
                .join(&publisher_folder)
                .join(&record.book_file_name),
            cover_path: cover_root
                .join(&publisher_folder)
                .join(&record.cover_file_name),
            archive_object_key: format!("{}/{}", publisher_folder, record.book_file_name),
            cover_object_key: format!("{}/{}", publisher_folder, record.cover_file_name),
            publisher_folder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_plan() {
        let record = BookRecord {
            publisher: "NSP".to_string(),
            book_file_name: "NSP.Awesome.Book.1234567890.Feb.2020.zip".to_string(),
            cover_file_name: "1234567890.jpg".to_string(),
            ..Default::default()
        };

        let plan = StoragePlan::new(&record, Path::new("out_book"), Path::new("out_cover"));

        assert_eq!(plan.publisher_folder, "nsp");
        assert_eq!(
            plan.archive_path,
            PathBuf::from("out_book/nsp/NSP.Awesome.Book.1234567890.Feb.2020.zip")
        );
        assert_eq!(plan.cover_path, PathBuf::from("out_cover/nsp/1234567890.jpg"));
        assert_eq!(plan.archive_object_key, "nsp/NSP.Awesome.Book.1234567890.Feb.2020.zip");
        assert_eq!(plan.cover_object_key, "nsp/1234567890.jpg");
    }
}
