//! Collection entry normalization.
//!
//! Turns a catalog collection entry, plus its optional subject detail, into
//! the record shape the site renders. Every output field is computed on its
//! own from a fixed preference order, and every field has a non-null
//! fallback.

use crate::api::{CollectionEntry, SlimSubject, SubjectDetail};
use serde::Serialize;
use shared::{AnimeRecord, BookRecord, CollectionStatus, GameRecord, MediaCategory};

const SUBJECT_URL: &str = "https://bgm.tv/subject";
const MAX_GENRES: usize = 3;

const STUDIO_KEYS: &[&str] = &["动画制作", "制作", "製作", "开发"];
const AUTHOR_KEYS: &[&str] = &["作者", "作 者", "Author"];
const PUBLISHER_KEYS: &[&str] = &["出版社", "出版社/出品", "Publisher"];
const DEVELOPER_KEYS: &[&str] = &["开发", "开发商", "Developer"];
const PLATFORM_KEYS: &[&str] = &["平台", "Platform"];

/// A site record that can be built from a collection entry
pub trait Normalize: Serialize + Sized {
    const CATEGORY: MediaCategory;

    fn normalize(
        entry: &CollectionEntry,
        detail: Option<&SubjectDetail>,
        status: CollectionStatus,
    ) -> Self;
}

/// Fields shared by every category
#[derive(Debug, Clone, PartialEq)]
struct Common {
    title: String,
    rating: f64,
    cover: String,
    description: String,
    year: String,
    genre: Vec<String>,
    link: String,
}

impl Common {
    fn extract(
        entry: &CollectionEntry,
        detail: Option<&SubjectDetail>,
        category: MediaCategory,
    ) -> Self {
        let subject = entry.subject.as_ref();

        let title = subject
            .and_then(|s| non_empty(&s.name_cn).or_else(|| non_empty(&s.name)))
            .unwrap_or(match category {
                MediaCategory::Anime => "Unknown Title",
                MediaCategory::Book | MediaCategory::Game => "Unknown",
            })
            .to_string();

        let year_fallback = match category {
            MediaCategory::Anime => "Unknown",
            MediaCategory::Book | MediaCategory::Game => "",
        };

        Self {
            rating: rating(entry),
            cover: subject
                .and_then(|s| s.images.as_ref())
                .and_then(|images| non_empty(&images.medium))
                .unwrap_or(category.default_cover())
                .to_string(),
            description: description(subject, detail),
            year: year(subject).unwrap_or_else(|| year_fallback.to_string()),
            genre: genres(subject),
            link: link(subject),
            title,
        }
    }
}

impl Normalize for AnimeRecord {
    const CATEGORY: MediaCategory = MediaCategory::Anime;

    fn normalize(
        entry: &CollectionEntry,
        detail: Option<&SubjectDetail>,
        status: CollectionStatus,
    ) -> Self {
        let common = Common::extract(entry, detail, Self::CATEGORY);
        let subject = entry.subject.as_ref();

        let progress = entry.ep_status.unwrap_or(0);
        let total_episodes = subject
            .and_then(|s| s.eps)
            .filter(|eps| *eps > 0)
            .unwrap_or(progress);
        let date = subject
            .and_then(|s| non_empty(&s.date))
            .unwrap_or_default()
            .to_string();

        AnimeRecord {
            title: common.title,
            status: status.into(),
            rating: common.rating,
            cover: common.cover,
            description: common.description,
            episodes: format!("{} episodes", total_episodes),
            year: common.year,
            genre: common.genre,
            studio: detail
                .and_then(|d| d.infobox_field(STUDIO_KEYS))
                .unwrap_or("Unknown")
                .to_string(),
            link: common.link,
            progress,
            total_episodes,
            start_date: date.clone(),
            end_date: date,
        }
    }
}

impl Normalize for BookRecord {
    const CATEGORY: MediaCategory = MediaCategory::Book;

    fn normalize(
        entry: &CollectionEntry,
        detail: Option<&SubjectDetail>,
        status: CollectionStatus,
    ) -> Self {
        let common = Common::extract(entry, detail, Self::CATEGORY);

        BookRecord {
            title: common.title,
            status: status.into(),
            rating: common.rating,
            cover: common.cover,
            description: common.description,
            chapters: None,
            year: common.year,
            genre: common.genre,
            author: infobox_or_empty(detail, AUTHOR_KEYS),
            publisher: infobox_or_empty(detail, PUBLISHER_KEYS),
            link: common.link,
            progress: entry.vol_status.unwrap_or(0),
            total_chapters: entry
                .subject
                .as_ref()
                .and_then(|s| s.volumes)
                .filter(|volumes| *volumes > 0)
                .unwrap_or(1),
        }
    }
}

impl Normalize for GameRecord {
    const CATEGORY: MediaCategory = MediaCategory::Game;

    fn normalize(
        entry: &CollectionEntry,
        detail: Option<&SubjectDetail>,
        status: CollectionStatus,
    ) -> Self {
        let common = Common::extract(entry, detail, Self::CATEGORY);
        let progress = entry.ep_status.unwrap_or(0);

        let platform = detail
            .and_then(|d| d.infobox_field(PLATFORM_KEYS).or_else(|| non_empty(&d.platform)))
            .unwrap_or_default()
            .to_string();

        GameRecord {
            title: common.title,
            status: status.into(),
            rating: common.rating,
            cover: common.cover,
            description: common.description,
            playtime: None,
            year: common.year,
            genre: common.genre,
            developer: infobox_or_empty(detail, DEVELOPER_KEYS),
            platform,
            link: common.link,
            progress,
            total_progress: progress,
        }
    }
}

/// Round to one decimal place from the exact stored value.
///
/// `6.35` is stored just below the half and rounds down to `6.3`. Only values
/// that sit exactly on a half (`x.25`, `x.75`) round away from zero.
fn round_rating(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return (value * 10.0).round() / 10.0;
    }

    format!("{:.1}", value).parse().unwrap_or(0.0)
}

/// User rating, then catalog score, then 0. Zero counts as "not rated".
fn rating(entry: &CollectionEntry) -> f64 {
    let score = entry.subject.as_ref().and_then(|s| s.score);

    entry
        .rate
        .filter(|rate| *rate != 0.0)
        .or(score.filter(|score| *score != 0.0))
        .map(round_rating)
        .unwrap_or(0.0)
}

/// Detail summary, then short summary, then Chinese name, then empty
fn description(subject: Option<&SlimSubject>, detail: Option<&SubjectDetail>) -> String {
    detail
        .and_then(|d| non_empty(&d.summary))
        .or_else(|| subject.and_then(|s| non_empty(&s.short_summary)))
        .or_else(|| subject.and_then(|s| non_empty(&s.name_cn)))
        .unwrap_or_default()
        .trim_start()
        .to_string()
}

/// First four characters of the subject date
fn year(subject: Option<&SlimSubject>) -> Option<String> {
    subject
        .and_then(|s| non_empty(&s.date))
        .map(|date| date.chars().take(4).collect())
}

fn genres(subject: Option<&SlimSubject>) -> Vec<String> {
    let genres: Vec<String> = subject
        .and_then(|s| s.tags.as_ref())
        .map(|tags| {
            tags.iter()
                .take(MAX_GENRES)
                .map(|tag| tag.name.clone())
                .collect()
        })
        .unwrap_or_default();

    if genres.is_empty() {
        vec!["Unknown".to_string()]
    } else {
        genres
    }
}

fn link(subject: Option<&SlimSubject>) -> String {
    match subject.and_then(|s| s.id) {
        Some(id) => format!("{}/{}", SUBJECT_URL, id),
        None => "#".to_string(),
    }
}

fn infobox_or_empty(detail: Option<&SubjectDetail>, keys: &[&str]) -> String {
    detail
        .and_then(|d| d.infobox_field(keys))
        .unwrap_or_default()
        .to_string()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
