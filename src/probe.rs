use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;
use log::{debug, error, warn};
use serde_json::{Value, from_str};
use tokio::process::Command;
use crate::errors::ProbeError;
use crate::markers::RawChapterMarker;

// @module: ffprobe invocation for chapters, format and video height

/// Default probing tool, resolved through `PATH`
pub const DEFAULT_FFPROBE: &str = "ffprobe";

// @struct: Configured probing tool
#[derive(Debug, Clone)]
pub struct Probe {
    // @field: Program to run
    ffprobe: PathBuf,

    // @field: Per invocation limit
    timeout: Duration,
}

impl Default for Probe {
    fn default() -> Self {
        Self::new(DEFAULT_FFPROBE, Duration::from_secs(60))
    }
}

impl Probe {
    pub fn new<P: Into<PathBuf>>(ffprobe: P, timeout: Duration) -> Self {
        Probe {
            ffprobe: ffprobe.into(),
            timeout,
        }
    }

    /// Chapter list of a media file, in container order
    pub async fn chapters<P: AsRef<Path>>(&self, video_path: P) -> Result<Vec<RawChapterMarker>, ProbeError> {
        let video_path = video_path.as_ref();
        let output = self.run(video_path, &[
            "-v", "quiet",
            "-show_chapters",
            "-print_format", "json",
        ]).await?;

        parse_chapters_json(&String::from_utf8_lossy(&output.stdout))
    }

    /// General container information (`-show_format`)
    pub async fn format<P: AsRef<Path>>(&self, video_path: P) -> Result<Value, ProbeError> {
        let video_path = video_path.as_ref();
        let output = self.run(video_path, &[
            "-v", "quiet",
            "-show_format",
            "-print_format", "json",
        ]).await?;

        from_str(&String::from_utf8_lossy(&output.stdout))
            .map_err(|e| ProbeError::Parse(format!("format JSON: {}", e)))
    }

    /// Height of the first video stream, `None` when ffprobe prints no number
    pub async fn video_height<P: AsRef<Path>>(&self, video_path: P) -> Result<Option<u32>, ProbeError> {
        let video_path = video_path.as_ref();
        let output = self.run(video_path, &[
            "-v", "quiet",
            "-show_entries", "stream=height",
            "-of", "default=noprint_wrappers=1:nokey=1",
            "-select_streams", "v:0",
        ]).await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        match stdout.trim().parse::<u32>() {
            Ok(height) => Ok(Some(height)),
            Err(_) => {
                warn!("Could not read video height of {:?}: '{}'", video_path, stdout.trim());
                Ok(None)
            }
        }
    }

    // @runs: ffprobe with the given arguments followed by the file path
    async fn run(&self, video_path: &Path, args: &[&str]) -> Result<Output, ProbeError> {
        let tool = self.ffprobe.display().to_string();

        if !video_path.exists() {
            return Err(ProbeError::NotFound(video_path.to_path_buf()));
        }

        debug!("Running {} {} {:?}", tool, args.join(" "), video_path);
        let ffprobe_future = Command::new(&self.ffprobe)
            .args(args)
            .arg(video_path)
            .kill_on_drop(true)
            .output();

        let output = tokio::select! {
            result = ffprobe_future => {
                result.map_err(|source| ProbeError::Spawn { tool: tool.clone(), source })?
            },
            _ = tokio::time::sleep(self.timeout) => {
                return Err(ProbeError::Timeout { tool: tool.clone(), secs: self.timeout.as_secs() });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("{} failed: {}", tool, stderr);
            return Err(ProbeError::Failed {
                tool,
                path: video_path.to_path_buf(),
                stderr,
            });
        }

        Ok(output)
    }
}

/// Parse `ffprobe -show_chapters -print_format json` output.
///
/// A chapter without a title tag gets an empty title. Times may be JSON
/// strings (as ffprobe prints them) or numbers.
pub fn parse_chapters_json(json: &str) -> Result<Vec<RawChapterMarker>, ProbeError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = from_str(json)
        .map_err(|e| ProbeError::Parse(format!("chapters JSON: {}", e)))?;

    let Some(chapters) = value.get("chapters").and_then(|c| c.as_array()) else {
        return Ok(Vec::new());
    };

    chapters
        .iter()
        .enumerate()
        .map(|(i, chapter)| {
            let title = chapter.get("tags")
                .and_then(|t| t.get("title"))
                .and_then(|t| t.as_str())
                .unwrap_or_default()
                .to_string();

            Ok(RawChapterMarker {
                title,
                start_time: seconds_field(chapter, "start_time", i)?,
                end_time: seconds_field(chapter, "end_time", i)?,
            })
        })
        .collect()
}

// @returns: Seconds value of a chapter time field
fn seconds_field(chapter: &Value, key: &str, index: usize) -> Result<f64, ProbeError> {
    let value = chapter.get(key);
    value
        .and_then(|v| match v {
            Value::String(s) => s.trim().parse::<f64>().ok(),
            other => other.as_f64(),
        })
        .ok_or_else(|| ProbeError::Parse(format!("chapter {} has no valid {}: {:?}", index, key, value)))
}
