//! Checks for the hand-authored fallback data.
//!
//! Categories not synced from Bangumi are rendered from files edited by
//! hand. Parsing them into the typed records enforces each category's status
//! vocabulary; the remaining checks catch values the site would render
//! wrongly.

use crate::writer::read_json;
use anyhow::Result;
use serde::de::DeserializeOwned;
use shared::{AnimeRecord, BookRecord, DataPaths, DeviceCatalog, GameRecord, MediaCategory};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const MAX_RATING: f64 = 10.0;

/// One problem found in a hand-authored file
#[derive(Debug, Clone, PartialEq)]
pub struct LocalProblem {
    pub file: PathBuf,
    /// Position and title of the offending item, when the file parsed
    pub item: Option<String>,
    pub message: String,
}

impl fmt::Display for LocalProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.item {
            Some(item) => write!(f, "{} {}: {}", self.file.display(), item, self.message),
            None => write!(f, "{}: {}", self.file.display(), self.message),
        }
    }
}

/// Outcome of checking the local data directory
#[derive(Debug, Default)]
pub struct LocalReport {
    pub files_checked: usize,
    pub files_missing: usize,
    pub items_checked: usize,
    pub problems: Vec<LocalProblem>,
}

impl LocalReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Fields shared by hand-authored media records
trait LocalItem {
    fn title(&self) -> &str;
    fn rating(&self) -> f64;
    /// (progress, total) when the record tracks progress against a total
    fn progress(&self) -> Option<(u32, u32)>;
}

impl LocalItem for AnimeRecord {
    fn title(&self) -> &str {
        &self.title
    }
    fn rating(&self) -> f64 {
        self.rating
    }
    fn progress(&self) -> Option<(u32, u32)> {
        Some((self.progress, self.total_episodes))
    }
}

impl LocalItem for BookRecord {
    fn title(&self) -> &str {
        &self.title
    }
    fn rating(&self) -> f64 {
        self.rating
    }
    fn progress(&self) -> Option<(u32, u32)> {
        Some((self.progress, self.total_chapters))
    }
}

impl LocalItem for GameRecord {
    fn title(&self) -> &str {
        &self.title
    }
    fn rating(&self) -> f64 {
        self.rating
    }
    fn progress(&self) -> Option<(u32, u32)> {
        Some((self.progress, self.total_progress))
    }
}

/// Check every hand-authored file under the local data directory.
///
/// Missing files are counted but not reported as problems.
pub fn check_local_data(paths: &DataPaths) -> LocalReport {
    let mut report = LocalReport::default();

    info!(local_dir = %paths.local_dir().display(), "Checking hand-authored data");

    check_media::<AnimeRecord>(&paths.local_collection_file(MediaCategory::Anime), &mut report);
    check_media::<BookRecord>(&paths.local_collection_file(MediaCategory::Book), &mut report);
    check_media::<GameRecord>(&paths.local_collection_file(MediaCategory::Game), &mut report);
    check_devices(&paths.devices_file(), &mut report);

    report
}

fn load<T: DeserializeOwned>(path: &Path, report: &mut LocalReport) -> Option<T> {
    if !path.exists() {
        debug!(path = %path.display(), "Local file not present");
        report.files_missing += 1;
        return None;
    }

    report.files_checked += 1;
    match read_json::<T>(path) {
        Ok(value) => Some(value),
        Err(e) => {
            report.problems.push(LocalProblem {
                file: path.to_path_buf(),
                item: None,
                message: format!("{:#}", e),
            });
            None
        }
    }
}

fn check_media<T: LocalItem + DeserializeOwned>(path: &Path, report: &mut LocalReport) {
    let Some(items) = load::<Vec<T>>(path, report) else {
        return;
    };

    for (idx, item) in items.iter().enumerate() {
        report.items_checked += 1;
        let label = format!("[{}] '{}'", idx, item.title());
        let mut problem = |message: String| {
            report.problems.push(LocalProblem {
                file: path.to_path_buf(),
                item: Some(label.clone()),
                message,
            });
        };

        if item.title().trim().is_empty() {
            problem("title is empty".to_string());
        }

        let rating = item.rating();
        if !(0.0..=MAX_RATING).contains(&rating) {
            problem(format!("rating {} is outside 0..={}", rating, MAX_RATING));
        }

        if let Some((progress, total)) = item.progress() {
            if progress > total {
                problem(format!("progress {} exceeds total {}", progress, total));
            }
        }
    }
}

fn check_devices(path: &Path, report: &mut LocalReport) {
    let Some(catalog) = load::<DeviceCatalog>(path, report) else {
        return;
    };

    for (category, devices) in &catalog {
        for (idx, device) in devices.iter().enumerate() {
            report.items_checked += 1;
            if device.name.trim().is_empty() {
                report.problems.push(LocalProblem {
                    file: path.to_path_buf(),
                    item: Some(format!("{}[{}]", category, idx)),
                    message: "device name is empty".to_string(),
                });
            }
        }
    }
}

/// Log the report; an error when any problem was found
pub fn ensure_valid(report: &LocalReport) -> Result<()> {
    for problem in &report.problems {
        tracing::error!(problem = %problem, "Invalid local data");
    }

    if !report.is_ok() {
        anyhow::bail!(
            "{} problem(s) found in hand-authored data",
            report.problems.len()
        );
    }

    info!(
        files_checked = report.files_checked,
        files_missing = report.files_missing,
        items_checked = report.items_checked,
        "Hand-authored data is valid"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BOOKS: &str = r#"[
        {
            "title": "三体",
            "status": "completed",
            "rating": 9.5,
            "cover": "/assets/book/santi.webp",
            "description": "刘慈欣的科幻巨作",
            "chapters": "3卷",
            "year": "2008",
            "genre": ["科幻", "硬科幻"],
            "author": "刘慈欣",
            "link": "https://book.douban.com/subject/2567698/",
            "progress": 3,
            "totalChapters": 3,
            "publisher": "重庆出版社"
        }
    ]"#;

    const DEVICES: &str = r#"{
        "Laptop": [
            {
                "name": "ROG Zephyrus G16",
                "image": "/images/device/laptop.png",
                "specs": "Gray / 32G + 1TB",
                "description": "Intel Core Ultra 9",
                "link": "https://rog.asus.com/"
            }
        ]
    }"#;

    fn setup() -> std::io::Result<(TempDir, DataPaths)> {
        let temp_dir = TempDir::new()?;
        let paths = DataPaths::new(temp_dir.path().join("out"), temp_dir.path().join("local"));
        std::fs::create_dir_all(paths.local_dir())?;
        Ok((temp_dir, paths))
    }

    #[test]
    fn test_valid_files() -> Result<()> {
        let (_temp_dir, paths) = setup()?;
        std::fs::write(paths.local_collection_file(MediaCategory::Book), BOOKS)?;
        std::fs::write(paths.devices_file(), DEVICES)?;

        let report = check_local_data(&paths);

        assert!(report.is_ok(), "{:?}", report.problems);
        assert_eq!(report.files_checked, 2);
        assert_eq!(report.files_missing, 2);
        assert_eq!(report.items_checked, 2);
        ensure_valid(&report)?;

        let books: Vec<BookRecord> = read_json(paths.local_collection_file(MediaCategory::Book))?;
        assert_eq!(books[0].chapters.as_deref(), Some("3卷"));

        Ok(())
    }

    #[test]
    fn test_wrong_status_vocabulary() -> Result<()> {
        let (_temp_dir, paths) = setup()?;
        // "watching" is the anime label; books use "reading"
        std::fs::write(
            paths.local_collection_file(MediaCategory::Book),
            BOOKS.replace("\"completed\"", "\"watching\""),
        )?;

        let report = check_local_data(&paths);

        assert_eq!(report.problems.len(), 1);
        assert!(report.problems[0].item.is_none());
        assert!(ensure_valid(&report).is_err());

        Ok(())
    }

    #[test]
    fn test_value_checks() -> Result<()> {
        let (_temp_dir, paths) = setup()?;
        std::fs::write(
            paths.local_collection_file(MediaCategory::Book),
            BOOKS
                .replace("9.5", "11")
                .replace("\"progress\": 3", "\"progress\": 4"),
        )?;

        let report = check_local_data(&paths);

        let messages: Vec<String> = report.problems.iter().map(|p| p.to_string()).collect();
        assert_eq!(messages.len(), 2, "{:?}", messages);
        assert!(messages[0].contains("[0] '三体': rating 11 is outside 0..=10"));
        assert!(messages[1].contains("progress 4 exceeds total 3"));

        Ok(())
    }

    #[test]
    fn test_empty_device_name() -> Result<()> {
        let (_temp_dir, paths) = setup()?;
        std::fs::write(
            paths.devices_file(),
            DEVICES.replace("ROG Zephyrus G16", " "),
        )?;

        let report = check_local_data(&paths);

        assert_eq!(report.problems.len(), 1);
        assert_eq!(report.problems[0].item.as_deref(), Some("Laptop[0]"));

        Ok(())
    }

    #[test]
    fn test_shipped_data_is_valid() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        let paths = DataPaths::new(root.join("src/data"), root.join("data/local"));

        let report = check_local_data(&paths);

        assert!(report.is_ok(), "{:?}", report.problems);
        assert_eq!(report.files_checked, 3);
    }

    #[test]
    fn test_missing_directory_is_not_an_error() {
        let paths = DataPaths::new("nowhere/out", "nowhere/local");
        let report = check_local_data(&paths);

        assert!(report.is_ok());
        assert_eq!(report.files_missing, 4);
        assert_eq!(report.files_checked, 0);
    }
}
