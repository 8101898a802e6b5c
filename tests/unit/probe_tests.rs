/*!
 * Tests for ffprobe output parsing and invocation
 */

use anyhow::Result;
use cutup::errors::ProbeError;
use cutup::markers::RawChapterMarker;
use cutup::probe::{parse_chapters_json, Probe};
use crate::common;

#[test]
fn test_parse_chapters_json_withFfprobeOutput_shouldReadTitlesAndTimes() -> Result<()> {
    let json = r#"{
        "chapters": [
            {
                "id": 0,
                "time_base": "1/1000",
                "start": 0,
                "start_time": "0.000000",
                "end": 4504,
                "end_time": "4.504000",
                "tags": { "title": "Inicio" }
            },
            {
                "id": 1,
                "time_base": "1/1000",
                "start": 4504,
                "start_time": "4.504000",
                "end": 12250,
                "end_time": "12.250000",
                "tags": { "title": "Gén. 1:1\r" }
            }
        ]
    }"#;

    let chapters = parse_chapters_json(json)?;
    assert_eq!(chapters, vec![
        RawChapterMarker::new("Inicio", 0.0, 4.504),
        RawChapterMarker::new("Gén. 1:1\r", 4.504, 12.25),
    ]);
    Ok(())
}

#[test]
fn test_parse_chapters_json_withNumericTimesAndNoTags_shouldUseEmptyTitle() -> Result<()> {
    let json = r#"{"chapters": [{"start_time": 1.5, "end_time": 3}]}"#;

    let chapters = parse_chapters_json(json)?;
    assert_eq!(chapters, vec![RawChapterMarker::new("", 1.5, 3.0)]);
    Ok(())
}

#[test]
fn test_parse_chapters_json_withNoChapters_shouldReturnEmpty() -> Result<()> {
    assert!(parse_chapters_json("")?.is_empty());
    assert!(parse_chapters_json("{}")?.is_empty());
    assert!(parse_chapters_json(r#"{"chapters": []}"#)?.is_empty());
    Ok(())
}

#[test]
fn test_parse_chapters_json_withBadInput_shouldReturnParseError() {
    assert!(matches!(parse_chapters_json("not json"), Err(ProbeError::Parse(_))));

    let missing_end = r#"{"chapters": [{"start_time": "0.0", "tags": {"title": "Gén. 1:1"}}]}"#;
    assert!(matches!(parse_chapters_json(missing_end), Err(ProbeError::Parse(_))));

    let bad_time = r#"{"chapters": [{"start_time": "abc", "end_time": "1.0"}]}"#;
    assert!(matches!(parse_chapters_json(bad_time), Err(ProbeError::Parse(_))));
}

#[tokio::test]
async fn test_probe_withMissingVideo_shouldReturnNotFound() {
    let probe = Probe::default();
    let result = probe.chapters("/definitely/not/here/nwt_01_Ge_S_01.mp4").await;
    assert!(matches!(result, Err(ProbeError::NotFound(_))));
}

#[tokio::test]
async fn test_probe_withMissingProgram_shouldReturnSpawnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video = common::create_test_file(temp_dir.path(), "nwt_01_Ge_S_01.mp4", "")?;

    let probe = Probe::new(temp_dir.path().join("no-ffprobe-here"), std::time::Duration::from_secs(5));
    assert!(matches!(probe.chapters(&video).await, Err(ProbeError::Spawn { .. })));
    Ok(())
}

#[cfg(unix)]
mod with_fake_ffprobe {
    use std::time::Duration;
    use anyhow::Result;
    use cutup::errors::ProbeError;
    use cutup::markers::RawChapterMarker;
    use cutup::probe::Probe;
    use crate::common;

    fn probe() -> Probe {
        Probe::new(common::fake_ffprobe(), Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_probe_chapters_shouldReturnContainerOrder() -> Result<()> {
        let temp_dir = common::create_temp_dir()?;
        let video = common::create_test_video(temp_dir.path(), "nwt_01_Ge_S_01_r720P.mp4", &[
            ("Inicio", 0.0, 4.5),
            ("Gén. 1:1", 4.5, 12.25),
        ])?;

        let chapters = probe().chapters(&video).await?;
        assert_eq!(chapters, vec![
            RawChapterMarker::new("Inicio", 0.0, 4.5),
            RawChapterMarker::new("Gén. 1:1", 4.5, 12.25),
        ]);
        Ok(())
    }

    #[tokio::test]
    async fn test_probe_video_height_shouldParseNumber() -> Result<()> {
        let temp_dir = common::create_temp_dir()?;
        let video = common::create_test_file(temp_dir.path(), "nwt_01_Ge_S_01_r720P.mp4", "")?;

        assert_eq!(probe().video_height(&video).await?, Some(720));
        Ok(())
    }

    #[tokio::test]
    async fn test_probe_format_shouldReturnJson() -> Result<()> {
        let temp_dir = common::create_temp_dir()?;
        let video = common::create_test_file(temp_dir.path(), "nwt_01_Ge_S_01_r720P.mp4", "")?;

        let format = probe().format(&video).await?;
        assert_eq!(format["format"]["nb_streams"], 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_probe_withFailingTool_shouldReturnFailedWithStderr() -> Result<()> {
        let temp_dir = common::create_temp_dir()?;
        let video = common::create_test_file(temp_dir.path(), "broken.mp4", "")?;

        match probe().chapters(&video).await {
            Err(ProbeError::Failed { stderr, .. }) => assert!(stderr.contains("Invalid data")),
            other => panic!("expected Failed, got {:?}", other),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_probe_withHangingTool_shouldTimeOut() -> Result<()> {
        let temp_dir = common::create_temp_dir()?;
        let video = common::create_test_file(temp_dir.path(), "slow.mp4", "")?;

        let probe = Probe::new(common::fake_ffprobe(), Duration::from_millis(200));
        assert!(matches!(probe.chapters(&video).await, Err(ProbeError::Timeout { .. })));
        Ok(())
    }
}
