/*!
 * Tests for file, filename and prompt utilities
 */

use std::io::Cursor;
use anyhow::Result;
use vttsrt::errors::ConversionError;
use vttsrt::file_utils::{FileManager, FilenamePolicy};
use crate::common;

fn non_interactive() -> FilenamePolicy {
    FilenamePolicy {
        interactive: false,
        ..FilenamePolicy::default()
    }
}

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    Ok(())
}

/// Test that dir_exists returns false for non-existent directories
#[test]
fn test_dir_exists_withNonExistentDir_shouldReturnFalse() {
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));
}

/// Test reading a missing file reports FileNotFound
#[test]
fn test_read_document_withMissingFile_shouldReturnFileNotFound() {
    let result = FileManager::read_document("definitely_missing_file.vtt");
    assert!(matches!(result, Err(ConversionError::FileNotFound(_))));
}

/// Test reading a file with invalid UTF-8 still succeeds
#[test]
fn test_read_document_withInvalidUtf8_shouldDecodeLossily() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("latin1.vtt");
    std::fs::write(&path, [b'c', b'a', b'f', 0xe9, b'\n'])?;

    let content = FileManager::read_document(&path)?;

    assert!(content.starts_with("caf"));
    assert!(content.ends_with('\n'));
    Ok(())
}

/// Test extension normalization appends only when missing
#[test]
fn test_ensure_extension_withAndWithoutSuffix_shouldAppendOnce() -> Result<()> {
    assert_eq!(FileManager::ensure_extension("lecture", "vtt")?, "lecture.vtt");
    assert_eq!(FileManager::ensure_extension("lecture.vtt", "vtt")?, "lecture.vtt");
    assert_eq!(FileManager::ensure_extension("vtt", "vtt")?, "vtt.vtt");
    assert_eq!(FileManager::ensure_extension("notes.txt", "vtt")?, "notes.txt.vtt");
    Ok(())
}

/// Test empty names are rejected
#[test]
fn test_ensure_extension_withEmptyName_shouldFail() {
    assert!(matches!(
        FileManager::ensure_extension("", "vtt"),
        Err(ConversionError::EmptyFilename)
    ));
}

/// Test default output derivation
#[test]
fn test_derive_output_name_withVttInput_shouldSwapExtension() {
    assert_eq!(FileManager::derive_output_name("lecture.vtt", "vtt", "srt"), "lecture.srt");
    assert_eq!(FileManager::derive_output_name("dir/a.b.vtt", "vtt", "srt"), "dir/a.b.srt");
}

/// Test input argument resolution without prompting
#[test]
fn test_resolve_input_withBareName_shouldAppendVtt() -> Result<()> {
    let mut reader = Cursor::new(Vec::<u8>::new());
    let mut writer: Vec<u8> = Vec::new();

    let input = FilenamePolicy::default().resolve_input(Some("lecture"), &mut reader, &mut writer)?;

    assert_eq!(input, "lecture.vtt");
    assert!(writer.is_empty(), "no prompt expected when an argument is given");
    Ok(())
}

/// Test the interactive input prompt
#[test]
fn test_resolve_input_withPromptAnswer_shouldUseAnswer() -> Result<()> {
    let mut reader = Cursor::new(b"talk\n".to_vec());
    let mut writer: Vec<u8> = Vec::new();

    let input = FilenamePolicy::default().resolve_input(None, &mut reader, &mut writer)?;

    assert_eq!(input, "talk.vtt");
    assert_eq!(String::from_utf8(writer)?, "Enter input filename (*.vtt): ");
    Ok(())
}

/// Test an empty prompt answer for the input is fatal
#[test]
fn test_resolve_input_withEmptyAnswer_shouldFailWithEmptyFilename() {
    let mut reader = Cursor::new(b"\n".to_vec());
    let mut writer: Vec<u8> = Vec::new();

    let result = FilenamePolicy::default().resolve_input(None, &mut reader, &mut writer);

    assert!(matches!(result, Err(ConversionError::EmptyFilename)));
}

/// Test a closed stdin while prompting
#[test]
fn test_resolve_input_withClosedInput_shouldFailWithPromptError() {
    let mut reader = Cursor::new(Vec::<u8>::new());
    let mut writer: Vec<u8> = Vec::new();

    let result = FilenamePolicy::default().resolve_input(None, &mut reader, &mut writer);

    assert!(matches!(result, Err(ConversionError::PromptFailed(_))));
}

/// Test non-interactive mode without an input argument
#[test]
fn test_resolve_input_nonInteractiveWithoutArgument_shouldFail() {
    let mut reader = Cursor::new(b"ignored\n".to_vec());
    let mut writer: Vec<u8> = Vec::new();

    let result = non_interactive().resolve_input(None, &mut reader, &mut writer);

    assert!(matches!(result, Err(ConversionError::EmptyFilename)));
}

/// Test pressing enter accepts the default output
#[test]
fn test_resolve_output_withEmptyAnswer_shouldAcceptDefault() -> Result<()> {
    let mut reader = Cursor::new(b"\r\n".to_vec());
    let mut writer: Vec<u8> = Vec::new();

    let output = FilenamePolicy::default().resolve_output(None, "lecture.vtt", &mut reader, &mut writer)?;

    assert_eq!(output, "lecture.srt");
    assert_eq!(String::from_utf8(writer)?, "Enter output filename (default: lecture.srt): ");
    Ok(())
}

/// Test overriding the default output at the prompt
#[test]
fn test_resolve_output_withTypedName_shouldAppendSrt() -> Result<()> {
    let mut reader = Cursor::new(b"final\n".to_vec());
    let mut writer: Vec<u8> = Vec::new();

    let output = FilenamePolicy::default().resolve_output(None, "lecture.vtt", &mut reader, &mut writer)?;

    assert_eq!(output, "final.srt");
    Ok(())
}

/// Test the output argument skips the prompt
#[test]
fn test_resolve_output_withArgument_shouldNotPrompt() -> Result<()> {
    let mut reader = Cursor::new(Vec::<u8>::new());
    let mut writer: Vec<u8> = Vec::new();

    let output = FilenamePolicy::default().resolve_output(Some("out"), "lecture.vtt", &mut reader, &mut writer)?;

    assert_eq!(output, "out.srt");
    assert!(writer.is_empty());
    Ok(())
}

/// Test non-interactive output resolution
#[test]
fn test_resolve_output_nonInteractive_shouldUseDefault() -> Result<()> {
    let mut reader = Cursor::new(Vec::<u8>::new());
    let mut writer: Vec<u8> = Vec::new();

    let output = non_interactive().resolve_output(None, "lecture.vtt", &mut reader, &mut writer)?;

    assert_eq!(output, "lecture.srt");
    Ok(())
}

/// Test find_files picks caption files recursively
#[test]
fn test_find_files_withNestedCaptions_shouldFindAllVtt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("nested");
    std::fs::create_dir(&nested)?;
    common::create_test_file(temp_dir.path(), "a.vtt", "")?;
    common::create_test_file(&nested, "b.VTT", "")?;
    common::create_test_file(temp_dir.path(), "c.srt", "")?;

    let files = FileManager::find_files(temp_dir.path(), "vtt")?;

    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.extension().is_some_and(|e| e.eq_ignore_ascii_case("vtt"))));
    Ok(())
}
