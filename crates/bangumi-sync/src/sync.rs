//! Main sync orchestrator.
//!
//! For each media category switched to live mode: walk the five status
//! buckets, enrich and normalize every entry, and replace the category's
//! output file. Everything runs sequentially.

use crate::api::{CatalogApi, CollectionEntry, SubjectDetail, Throttle};
use crate::collection::CollectionFetcher;
use crate::normalize::Normalize;
use crate::writer::write_records;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use shared::{AnimeRecord, BookRecord, CollectionStatus, Config, DataPaths, GameRecord, MediaCategory};
use tracing::{debug, info};

/// Statistics for one sync run
#[derive(Debug, Clone)]
pub struct SyncStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub categories_written: usize,
    pub categories_skipped: usize,
    pub entries_written: usize,
    pub pages_fetched: usize,
    pub page_failures: usize,
    pub detail_misses: usize,
}

impl SyncStats {
    fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            categories_written: 0,
            categories_skipped: 0,
            entries_written: 0,
            pages_fetched: 0,
            page_failures: 0,
            detail_misses: 0,
        }
    }

    /// Wall-clock duration of the run, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }
}

/// Sync coordinator
pub struct BangumiSync<A: CatalogApi> {
    api: A,
    throttle: Throttle,
    paths: DataPaths,
    config: Config,
}

impl<A: CatalogApi> BangumiSync<A> {
    /// Create a new sync using the pacing and paths from `config`
    pub fn new(api: A, config: Config) -> Self {
        let throttle = Throttle::from_settings(&config.api);
        let paths = DataPaths::new(config.output_dir(), config.local_dir());

        Self {
            api,
            throttle,
            paths,
            config,
        }
    }

    /// Replace the pacing, e.g. to disable it
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    #[cfg(test)]
    pub(crate) fn api(&self) -> &A {
        &self.api
    }

    /// Run the complete sync: anime, then books, then games
    pub async fn run(&self) -> Result<SyncStats> {
        info!(user_id = self.config.user_id(), "Starting Bangumi sync");

        let mut stats = SyncStats::new();

        self.paths
            .create_dirs()
            .with_context(|| {
                format!(
                    "Failed to create output directory: {}",
                    self.paths.output_dir().display()
                )
            })?;

        let anime = self.sync_category::<AnimeRecord>(&mut stats).await?;
        let books = self.sync_category::<BookRecord>(&mut stats).await?;
        let games = self.sync_category::<GameRecord>(&mut stats).await?;

        for written in [anime, books, games].into_iter().flatten() {
            stats.categories_written += 1;
            stats.entries_written += written;
        }

        stats.finished_at = Some(Utc::now());

        info!(
            categories_written = stats.categories_written,
            categories_skipped = stats.categories_skipped,
            entries_written = stats.entries_written,
            pages_fetched = stats.pages_fetched,
            page_failures = stats.page_failures,
            detail_misses = stats.detail_misses,
            "Bangumi sync complete"
        );

        Ok(stats)
    }

    fn category_mode(&self, category: MediaCategory) -> &shared::SourceMode {
        match category {
            MediaCategory::Anime => &self.config.anime.mode,
            MediaCategory::Book => &self.config.book.mode,
            MediaCategory::Game => &self.config.game.mode,
        }
    }

    /// Fetch, normalize and write one category.
    ///
    /// Returns the number of records written, or `None` when the category was skipped.
    async fn sync_category<R: Normalize>(&self, stats: &mut SyncStats) -> Result<Option<usize>> {
        let category = R::CATEGORY;
        let mode = self.category_mode(category);

        if !mode.is_live() {
            info!(category = %category, mode = %mode, "Category not in bangumi mode, skipping");
            stats.categories_skipped += 1;
            return Ok(None);
        }

        info!(category = %category, "Updating collection from Bangumi");

        let fetcher = CollectionFetcher::new(&self.api, &self.throttle, self.config.api.page_size);
        let mut records: Vec<R> = Vec::new();

        for status in CollectionStatus::ALL {
            let fetch = fetcher
                .fetch(self.config.user_id(), status, category.into())
                .await;

            stats.pages_fetched += fetch.pages;
            if fetch.failed {
                stats.page_failures += 1;
            }

            if fetch.entries.is_empty() {
                continue;
            }

            info!(
                category = %category,
                status = %status,
                entries = fetch.entries.len(),
                "Processing status bucket"
            );

            let total = fetch.entries.len();
            for (idx, entry) in fetch.entries.iter().enumerate() {
                debug!(
                    category = %category,
                    status = %status,
                    progress = format!("{}/{}", idx + 1, total),
                    subject_id = entry.subject_id,
                    "Processing entry"
                );

                let detail = self.fetch_detail(entry, stats).await;
                records.push(R::normalize(entry, detail.as_ref(), status));
            }
        }

        let path = self.paths.collection_file(category);
        write_records(&path, &records)
            .with_context(|| format!("Failed to write {} collection", category))?;

        info!(
            category = %category,
            path = %path.display(),
            total = records.len(),
            "Collection saved"
        );

        Ok(Some(records.len()))
    }

    /// Subject detail for an entry; any failure reads as "no detail"
    async fn fetch_detail(
        &self,
        entry: &CollectionEntry,
        stats: &mut SyncStats,
    ) -> Option<SubjectDetail> {
        if !self.config.api.fetch_details {
            return None;
        }

        let detail = match self.api.subject(entry.subject_id).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                debug!(subject_id = entry.subject_id, error = %e, "Subject detail unavailable");
                stats.detail_misses += 1;
                None
            }
        };

        self.throttle.after_detail().await;
        detail
    }
}
