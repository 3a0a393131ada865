//! Data models for the site's media pages.
//!
//! These are the records the site reads: one shape per media category, the
//! status vocabulary of each category, and the hand-authored device list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Media category, matching the site's three collection pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Anime,
    Book,
    Game,
}

impl MediaCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Anime => "anime",
            MediaCategory::Book => "book",
            MediaCategory::Game => "game",
        }
    }

    /// Cover shown when the catalog has no image for a subject
    pub fn default_cover(&self) -> &'static str {
        match self {
            MediaCategory::Anime => "/assets/anime/default.webp",
            MediaCategory::Book => "/assets/book/default.webp",
            MediaCategory::Game => "/assets/game/default.webp",
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic collection status bucket.
///
/// The catalog knows one vocabulary for every subject type; books and games
/// rename the in-progress bucket when written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    Watching,
    Planned,
    Completed,
    OnHold,
    Dropped,
}

impl CollectionStatus {
    /// Buckets in the order they appear in the generated files
    pub const ALL: [CollectionStatus; 5] = [
        Self::Watching,
        Self::Planned,
        Self::Completed,
        Self::OnHold,
        Self::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionStatus::Watching => "watching",
            CollectionStatus::Planned => "planned",
            CollectionStatus::Completed => "completed",
            CollectionStatus::OnHold => "onhold",
            CollectionStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of an anime entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimeStatus {
    Watching,
    Planned,
    Completed,
    OnHold,
    Dropped,
}

/// Status of a book entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Reading,
    Planned,
    Completed,
    OnHold,
    Dropped,
}

/// Status of a game entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Planned,
    Completed,
    OnHold,
    Dropped,
}

impl From<CollectionStatus> for AnimeStatus {
    fn from(status: CollectionStatus) -> Self {
        match status {
            CollectionStatus::Watching => AnimeStatus::Watching,
            CollectionStatus::Planned => AnimeStatus::Planned,
            CollectionStatus::Completed => AnimeStatus::Completed,
            CollectionStatus::OnHold => AnimeStatus::OnHold,
            CollectionStatus::Dropped => AnimeStatus::Dropped,
        }
    }
}

impl From<CollectionStatus> for BookStatus {
    fn from(status: CollectionStatus) -> Self {
        match status {
            CollectionStatus::Watching => BookStatus::Reading,
            CollectionStatus::Planned => BookStatus::Planned,
            CollectionStatus::Completed => BookStatus::Completed,
            CollectionStatus::OnHold => BookStatus::OnHold,
            CollectionStatus::Dropped => BookStatus::Dropped,
        }
    }
}

impl From<CollectionStatus> for GameStatus {
    fn from(status: CollectionStatus) -> Self {
        match status {
            CollectionStatus::Watching => GameStatus::Playing,
            CollectionStatus::Planned => GameStatus::Planned,
            CollectionStatus::Completed => GameStatus::Completed,
            CollectionStatus::OnHold => GameStatus::OnHold,
            CollectionStatus::Dropped => GameStatus::Dropped,
        }
    }
}

/// One entry on the anime page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeRecord {
    pub title: String,
    pub status: AnimeStatus,
    pub rating: f64,
    pub cover: String,
    pub description: String,
    /// Display string, e.g. "12 episodes"
    pub episodes: String,
    pub year: String,
    pub genre: Vec<String>,
    pub studio: String,
    pub link: String,
    pub progress: u32,
    pub total_episodes: u32,
    pub start_date: String,
    pub end_date: String,
}

/// One entry on the book page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub title: String,
    pub status: BookStatus,
    pub rating: f64,
    pub cover: String,
    pub description: String,
    /// Free-form length, e.g. "3卷"; only hand-authored entries have it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapters: Option<String>,
    pub year: String,
    pub genre: Vec<String>,
    pub author: String,
    pub publisher: String,
    pub link: String,
    pub progress: u32,
    pub total_chapters: u32,
}

/// One entry on the game page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub title: String,
    pub status: GameStatus,
    pub rating: f64,
    pub cover: String,
    pub description: String,
    /// Free-form play time, e.g. "120小时"; only hand-authored entries have it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime: Option<String>,
    pub year: String,
    pub genre: Vec<String>,
    pub developer: String,
    pub platform: String,
    pub link: String,
    pub progress: u32,
    pub total_progress: u32,
}

/// Hand-authored device entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub image: String,
    pub specs: String,
    pub description: String,
    pub link: String,
}

/// Devices grouped by category name ("Laptop", "Phone", ...)
pub type DeviceCatalog = BTreeMap<String, Vec<Device>>;
