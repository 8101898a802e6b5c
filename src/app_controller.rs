use anyhow::{Result, Context, anyhow};
use log::{error, info, debug};
use std::path::Path;
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::Config;
use crate::catalog::{BookCatalog, CatalogSource};
use crate::file_utils::FileManager;
use crate::markers::{build_marker_batch, MarkerBatch};
use crate::numeration;
use crate::probe::Probe;
use crate::video_name::VideoInfo;

// @module: Application controller for marker extraction and numeration

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Probing tool built from the configuration
    probe: Probe,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let probe = config.probe();
        Ok(Self { config, probe })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Catalog for the configured language from the cache, or from `source` on a miss
    pub fn load_catalog(&self, source: &dyn CatalogSource) -> Result<BookCatalog> {
        let work_dir = self.config.work_dir();
        FileManager::ensure_dir(&work_dir)?;
        BookCatalog::load_or_fetch(&work_dir, &self.config.language, source)
            .with_context(|| format!("Failed to load book catalog for language {}", self.config.language))
    }

    /// Markers of one publication video.
    ///
    /// A failing probe is reported and yields an empty batch so folder runs
    /// can carry on with the next file.
    pub async fn markers_for_file(&self, video: &Path, catalog: &BookCatalog) -> Result<MarkerBatch> {
        let info = VideoInfo::parse(video)
            .with_context(|| format!("Unexpected video filename: {:?}", video))?;
        let book_name = catalog.name_for(&info.book_number)?;

        let raw_markers = match self.probe.chapters(video).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("error {:?}: {}", video, e);
                return Ok(MarkerBatch::default());
            }
        };

        let parent = video.to_string_lossy();
        let batch = build_marker_batch(&parent, book_name, &info.book_number, &raw_markers)
            .with_context(|| format!("Failed to read chapter titles of {:?}", video))?;

        debug!(
            "{:?}: {} markers kept, {} titles without citation",
            video, batch.markers.len(), batch.dropped
        );
        Ok(batch)
    }

    /// Markers of every video below `dir`, one file at a time in name order
    pub async fn markers_for_folder(&self, dir: &Path, catalog: &BookCatalog) -> Result<MarkerBatch> {
        let videos = FileManager::find_video_files(dir)?;
        if videos.is_empty() {
            return Err(anyhow!("No video files found in {:?}", dir));
        }

        let progress_bar = ProgressBar::new(videos.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        let mut all = MarkerBatch::default();
        for video in &videos {
            progress_bar.set_message(FileManager::stem(video));
            let batch = self.markers_for_file(video, catalog).await?;
            all.extend(batch);
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        info!(
            "Collected {} markers from {} files ({} titles without citation)",
            all.markers.len(), videos.len(), all.dropped
        );
        Ok(all)
    }

    /// Markers for a single video or for every video in a directory
    pub async fn markers(&self, input: &Path, catalog: &BookCatalog) -> Result<MarkerBatch> {
        if input.is_file() {
            self.markers_for_file(input, catalog).await
        } else if input.is_dir() {
            self.markers_for_folder(input, catalog).await
        } else {
            Err(anyhow!("Input path does not exist: {:?}", input))
        }
    }

    // @renames: `<name>` entries to `<number> <name>`
    pub fn add_numeration(&self, dir: &Path, catalog: &BookCatalog) -> Result<usize> {
        let renamed = numeration::add_numeration(dir, catalog)?;
        info!("Numbered {} entries in {:?}", renamed, dir);
        Ok(renamed)
    }

    // @renames: `<number> <name>` entries back to `<name>`
    pub fn remove_numeration(&self, dir: &Path, catalog: &BookCatalog) -> Result<usize> {
        let renamed = numeration::remove_numeration(dir, catalog)?;
        info!("Removed numbering from {} entries in {:?}", renamed, dir);
        Ok(renamed)
    }

    /// Height of the first video stream of a file
    pub async fn video_height(&self, video: &Path) -> Result<Option<u32>> {
        Ok(self.probe.video_height(video).await?)
    }

    /// General container information of a file
    pub async fn video_format(&self, video: &Path) -> Result<serde_json::Value> {
        Ok(self.probe.format(video).await?)
    }
}
