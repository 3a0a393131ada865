//! File path utilities for generated and hand-authored data files.

use crate::models::MediaCategory;
use std::path::{Path, PathBuf};

/// File path manager for the site's data files
#[derive(Debug, Clone)]
pub struct DataPaths {
    output_dir: PathBuf,
    local_dir: PathBuf,
}

impl DataPaths {
    /// Create a new DataPaths from the generated and hand-authored data directories
    pub fn new(output_dir: impl AsRef<Path>, local_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            local_dir: local_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory generated JSON is written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Directory holding hand-authored data
    pub fn local_dir(&self) -> &Path {
        &self.local_dir
    }

    // ========== Generated (overwritten on every sync) ==========

    /// Generated collection file for a category
    pub fn collection_file(&self, category: MediaCategory) -> PathBuf {
        self.output_dir
            .join(format!("bangumi-{}-data.json", category.as_str()))
    }

    // ========== Hand-authored ==========

    /// Hand-authored list for a category
    pub fn local_collection_file(&self, category: MediaCategory) -> PathBuf {
        let name = match category {
            MediaCategory::Anime => "anime.json",
            MediaCategory::Book => "books.json",
            MediaCategory::Game => "games.json",
        };
        self.local_dir.join(name)
    }

    /// Hand-authored device list
    pub fn devices_file(&self) -> PathBuf {
        self.local_dir.join("devices.json")
    }

    /// Create the output directory if it does not exist
    pub fn create_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.output_dir)
    }
}
