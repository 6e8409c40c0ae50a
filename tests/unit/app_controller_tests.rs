/*!
 * Tests for the application controller
 */

use std::fs;
use std::io::Cursor;
use anyhow::Result;
use vttsrt::app_config::Config;
use vttsrt::app_controller::{Controller, OutputTarget};
use vttsrt::errors::ConversionError;
use crate::common;

/// Test that an invalid configuration is rejected up front
#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let config = Config {
        timestamp_width: 0,
        ..Config::default()
    };
    assert!(Controller::with_config(config).is_err());
}

/// Test filename resolution for the `lecture` scenario
#[test]
fn test_resolve_filenames_withBareInputAndEnter_shouldUseDefaults() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let mut reader = Cursor::new(b"\n".to_vec());
    let mut writer: Vec<u8> = Vec::new();

    let (input, output) = controller.resolve_filenames(Some("lecture"), None, &mut reader, &mut writer)?;

    assert_eq!(input.to_str(), Some("lecture.vtt"));
    assert_eq!(output.to_str(), Some("lecture.srt"));
    Ok(())
}

/// Test converting a caption file to an SRT file
#[test]
fn test_convert_file_withRollingCaptions_shouldWriteSrt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_captions(temp_dir.path(), "talk.vtt")?;
    let output = temp_dir.path().join("talk.srt");
    let controller = Controller::with_config(Config::default())?;

    let summary = controller.convert_file(&input, &output)?;

    assert_eq!(summary.output, OutputTarget::File(output.clone()));
    assert_eq!(summary.blocks_written, 3);
    assert_eq!(summary.stats.deduplicated_lines, 6);
    assert_eq!(fs::read_to_string(&output)?, common::ROLLING_SRT);
    Ok(())
}

/// Test a missing input file is fatal and writes nothing
#[test]
fn test_convert_file_withMissingInput_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = temp_dir.path().join("missing.srt");
    let controller = Controller::with_config(Config::default())?;

    let result = controller.convert_file(&temp_dir.path().join("missing.vtt"), &output);

    assert!(matches!(result, Err(ConversionError::FileNotFound(_))));
    assert!(!output.exists());
    Ok(())
}

/// Test an unopenable output falls back to stdout
#[test]
fn test_convert_file_withUnwritableOutput_shouldFallBackToStdout() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_captions(temp_dir.path(), "talk.vtt")?;
    let output = temp_dir.path().join("no_such_dir").join("talk.srt");
    let controller = Controller::with_config(Config::default())?;

    let summary = controller.convert_file(&input, &output)?;

    assert_eq!(summary.output, OutputTarget::Stdout);
    assert_eq!(summary.requested_output, output);
    assert_eq!(summary.blocks_written, 3);
    Ok(())
}

/// Test an empty input file still succeeds with zero blocks
#[test]
fn test_convert_file_withEmptyInput_shouldWriteEmptySrt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "empty.vtt", "")?;
    let output = temp_dir.path().join("empty.srt");
    let controller = Controller::with_config(Config::default())?;

    let summary = controller.convert_file(&input, &output)?;

    assert_eq!(summary.blocks_written, 0);
    assert_eq!(fs::read_to_string(&output)?, "");
    Ok(())
}
