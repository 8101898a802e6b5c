/*!
 * Tests for file utility functions
 */

use std::fs;
use anyhow::Result;
use cutup::file_utils::FileManager;
use crate::common;

#[test]
fn test_extension_and_stem_withVideoPath_shouldSplitName() {
    let path = "/videos/nwt_01_Ge_S_01_r720P.mp4";
    assert_eq!(FileManager::extension(path), ".mp4");
    assert_eq!(FileManager::stem(path), "nwt_01_Ge_S_01_r720P");

    assert_eq!(FileManager::extension("README"), "");
    assert_eq!(FileManager::stem("README"), "README");
}

#[test]
fn test_is_video_extension_withVariousNames_shouldIgnoreCase() {
    assert!(FileManager::is_video_extension("a.mp4"));
    assert!(FileManager::is_video_extension("a.M4V"));
    assert!(FileManager::is_video_extension("a.mkv"));
    assert!(!FileManager::is_video_extension("a.json"));
    assert!(!FileManager::is_video_extension("mp4"));
}

/// Test that video discovery recurses and sorts by name
#[test]
fn test_find_video_files_withNestedFolders_shouldReturnSortedVideos() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("Génesis");
    fs::create_dir(&nested)?;

    common::create_test_file(temp_dir.path(), "nwt_02_Ex_S_01.mp4", "")?;
    common::create_test_file(temp_dir.path(), "nwt_01_Ge_S_02.mp4", "")?;
    common::create_test_file(temp_dir.path(), "lang-S.json", "{}")?;
    common::create_test_file(&nested, "nwt_01_Ge_S_01.mp4", "")?;

    let found = FileManager::find_video_files(temp_dir.path())?;
    assert_eq!(found, vec![
        nested.join("nwt_01_Ge_S_01.mp4"),
        temp_dir.path().join("nwt_01_Ge_S_02.mp4"),
        temp_dir.path().join("nwt_02_Ex_S_01.mp4"),
    ]);
    Ok(())
}

#[test]
fn test_find_video_files_withMissingDir_shouldFail() {
    assert!(FileManager::find_video_files("./non_existent_directory_12345").is_err());
}

#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out").join("markers.json");

    FileManager::write_to_file(&path, "[]")?;
    assert_eq!(FileManager::read_to_string(&path)?, "[]");
    assert!(FileManager::file_exists(&path));
    assert!(FileManager::dir_exists(temp_dir.path().join("out")));
    Ok(())
}

#[test]
fn test_hide_file_withExistingAndMissingFile_shouldOnlyFailWhenMissing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "lang-S.json", "{}")?;

    FileManager::hide_file(&path)?;
    assert!(path.exists());
    assert!(FileManager::hide_file(temp_dir.path().join("missing.json")).is_err());
    Ok(())
}
