use anyhow::Result;
use log::debug;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The book files waiting in the input folder for one record.
#[derive(Debug, Clone, Default)]
pub struct BookFiles {
    pub files: Vec<PathBuf>,
    pub total_size: u64,
    /// Lower-cased extensions without the dot, sorted and unique.
    pub formats: Vec<String>,
}

impl BookFiles {
    /// Walks `folder` for book files. A missing folder is an empty scan.
    pub fn scan(folder: &Path) -> Result<Self> {
        let mut scan = BookFiles::default();
        if !folder.is_dir() {
            debug!("Book input folder {:?} does not exist", folder);
            return Ok(scan);
        }

        let mut formats = BTreeSet::new();
        for entry in WalkDir::new(folder)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| !is_hidden(e.path()))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_dir() {
                continue;
            }

            let size = fs::metadata(path)?.len();
            if let Some(format) = format_of(path) {
                formats.insert(format);
            }
            scan.total_size += size;
            scan.files.push(path.to_path_buf());
        }

        scan.files.sort();
        scan.formats = formats.into_iter().collect();
        debug!(
            "Found {} book files ({} bytes) in {:?}",
            scan.files.len(),
            scan.total_size,
            folder
        );
        Ok(scan)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn format_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
