//! Bangumi API v0 request and response types.
//!
//! Only the fields the site uses are modelled; everything else in the
//! responses is ignored. Most fields are optional because the catalog is
//! user-edited and sparsely populated.

use serde::{Deserialize, Deserializer, Serialize};
use shared::{CollectionStatus, MediaCategory};

/// Catalog subject type, as used in the `subject_type` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectType {
    Book,
    Anime,
    Game,
}

impl SubjectType {
    pub fn code(&self) -> u8 {
        match self {
            SubjectType::Book => 1,
            SubjectType::Anime => 2,
            SubjectType::Game => 4,
        }
    }
}

impl From<MediaCategory> for SubjectType {
    fn from(category: MediaCategory) -> Self {
        match category {
            MediaCategory::Anime => SubjectType::Anime,
            MediaCategory::Book => SubjectType::Book,
            MediaCategory::Game => SubjectType::Game,
        }
    }
}

/// Collection type, as used in the `type` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionType {
    Wish,
    Done,
    Doing,
    OnHold,
    Dropped,
}

impl CollectionType {
    pub fn code(&self) -> u8 {
        match self {
            CollectionType::Wish => 1,
            CollectionType::Done => 2,
            CollectionType::Doing => 3,
            CollectionType::OnHold => 4,
            CollectionType::Dropped => 5,
        }
    }
}

impl From<CollectionStatus> for CollectionType {
    fn from(status: CollectionStatus) -> Self {
        match status {
            CollectionStatus::Watching => CollectionType::Doing,
            CollectionStatus::Planned => CollectionType::Wish,
            CollectionStatus::Completed => CollectionType::Done,
            CollectionStatus::OnHold => CollectionType::OnHold,
            CollectionStatus::Dropped => CollectionType::Dropped,
        }
    }
}

/// One page request against the user collection listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionQuery {
    pub user_id: String,
    pub subject_type: SubjectType,
    pub collection_type: CollectionType,
    pub limit: u32,
    pub offset: u32,
}

impl CollectionQuery {
    /// Path and query string relative to the API base URL
    pub fn endpoint(&self) -> String {
        format!(
            "/v0/users/{}/collections?subject_type={}&type={}&limit={}&offset={}",
            self.user_id,
            self.subject_type.code(),
            self.collection_type.code(),
            self.limit,
            self.offset
        )
    }
}

/// Paged collection listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionPage {
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub data: Option<Vec<CollectionEntry>>,
}

impl CollectionPage {
    pub fn new(data: Vec<CollectionEntry>) -> Self {
        Self {
            data: Some(data),
            ..Default::default()
        }
    }

    /// Entries on this page; a missing `data` field reads as an empty page
    pub fn into_entries(self) -> Vec<CollectionEntry> {
        self.data.unwrap_or_default()
    }
}

/// One item of a user's collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub subject_id: u64,
    /// User rating 1..=10, 0 when unrated
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub ep_status: Option<u32>,
    #[serde(default)]
    pub vol_status: Option<u32>,
    #[serde(default)]
    pub subject: Option<SlimSubject>,
}

/// Subject summary embedded in a collection entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlimSubject {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_cn: Option<String>,
    #[serde(default)]
    pub short_summary: Option<String>,
    /// Air or publish date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub images: Option<SubjectImages>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub tags: Option<Vec<SubjectTag>>,
    #[serde(default)]
    pub eps: Option<u32>,
    #[serde(default)]
    pub volumes: Option<u32>,
}

/// Cover image URLs in several sizes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectImages {
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub common: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub grid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectTag {
    pub name: String,
    #[serde(default)]
    pub count: Option<u32>,
}

/// Full subject record from `/v0/subjects/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectDetail {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    /// `None` when absent or not shaped like an infobox
    #[serde(default, deserialize_with = "lenient_infobox")]
    pub infobox: Option<Vec<InfoboxEntry>>,
}

impl SubjectDetail {
    /// Look up an infobox value by trying each key spelling in order.
    ///
    /// A string value is returned as-is. A list value yields its first item
    /// with a non-empty `v`; a list with no such item falls through to the
    /// next key.
    pub fn infobox_field(&self, keys: &[&str]) -> Option<&str> {
        let infobox = self.infobox.as_deref()?;

        keys.iter().find_map(|key| {
            let entry = infobox.iter().find(|entry| entry.key == *key)?;
            match &entry.value {
                InfoboxValue::Text(text) => Some(text.as_str()),
                InfoboxValue::List(items) => items
                    .iter()
                    .filter_map(|item| item.v.as_deref())
                    .find(|v| !v.is_empty()),
                InfoboxValue::Other(_) => None,
            }
        })
    }
}

/// One `{key, value}` row of a subject infobox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoboxEntry {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: InfoboxValue,
}

/// Infobox values are either plain text or a list of `{k?, v}` items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoboxValue {
    Text(String),
    List(Vec<InfoboxListItem>),
    Other(serde_json::Value),
}

impl Default for InfoboxValue {
    fn default() -> Self {
        InfoboxValue::Other(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoboxListItem {
    #[serde(default)]
    pub k: Option<String>,
    #[serde(default)]
    pub v: Option<String>,
}

fn lenient_infobox<'de, D>(deserializer: D) -> Result<Option<Vec<InfoboxEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
