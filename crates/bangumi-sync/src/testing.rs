//! In-memory catalog for tests.

use crate::api::{
    ApiError, CatalogApi, CollectionEntry, CollectionPage, CollectionQuery, SlimSubject,
    SubjectDetail, SubjectTag,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Canned response for one collection page
#[derive(Debug, Clone)]
pub enum FakePage {
    Entries(Vec<CollectionEntry>),
    NotFound,
    Status(u16),
}

/// Catalog that serves canned pages and records every request.
///
/// Pages are keyed by (subject type code, collection type code, offset).
/// Unknown pages are empty; unknown subjects are 404.
#[derive(Default)]
pub struct FakeCatalog {
    pages: HashMap<(u8, u8, u32), FakePage>,
    subjects: HashMap<u64, SubjectDetail>,
    collection_requests: Mutex<Vec<CollectionQuery>>,
    subject_requests: Mutex<Vec<u64>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, subject_type: u8, collection_type: u8, offset: u32, page: FakePage) -> Self {
        self.pages.insert((subject_type, collection_type, offset), page);
        self
    }

    pub fn with_subject(mut self, subject_id: u64, detail: SubjectDetail) -> Self {
        self.subjects.insert(subject_id, detail);
        self
    }

    pub fn collection_requests(&self) -> Vec<CollectionQuery> {
        self.collection_requests.lock().unwrap().clone()
    }

    pub fn subject_requests(&self) -> Vec<u64> {
        self.subject_requests.lock().unwrap().clone()
    }
}

impl CatalogApi for FakeCatalog {
    async fn collections(&self, query: &CollectionQuery) -> Result<CollectionPage, ApiError> {
        self.collection_requests.lock().unwrap().push(query.clone());

        let key = (
            query.subject_type.code(),
            query.collection_type.code(),
            query.offset,
        );
        match self.pages.get(&key) {
            Some(FakePage::Entries(entries)) => Ok(CollectionPage::new(entries.clone())),
            Some(FakePage::NotFound) => Err(ApiError::NotFound {
                url: query.endpoint(),
            }),
            Some(FakePage::Status(status)) => Err(ApiError::Status {
                url: query.endpoint(),
                status: *status,
                body: String::new(),
            }),
            None => Ok(CollectionPage::new(Vec::new())),
        }
    }

    async fn subject(&self, subject_id: u64) -> Result<SubjectDetail, ApiError> {
        self.subject_requests.lock().unwrap().push(subject_id);

        self.subjects
            .get(&subject_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                url: format!("/v0/subjects/{}", subject_id),
            })
    }
}

/// Collection entry with a populated subject summary
pub fn entry(subject_id: u64, name_cn: &str) -> CollectionEntry {
    CollectionEntry {
        subject_id,
        rate: Some(0.0),
        ep_status: Some(0),
        vol_status: Some(0),
        subject: Some(SlimSubject {
            id: Some(subject_id),
            name: Some(format!("subject {}", subject_id)),
            name_cn: Some(name_cn.to_string()),
            short_summary: Some(format!("short summary {}", subject_id)),
            date: Some("2020-04-01".to_string()),
            images: None,
            score: Some(7.26),
            tags: Some(vec![SubjectTag {
                name: "TV".to_string(),
                count: Some(10),
            }]),
            eps: Some(12),
            volumes: Some(3),
        }),
    }
}

/// `count` entries with consecutive subject ids starting at `first_id`
pub fn entries(first_id: u64, count: usize) -> Vec<CollectionEntry> {
    (0..count as u64)
        .map(|i| entry(first_id + i, &format!("条目 {}", first_id + i)))
        .collect()
}
