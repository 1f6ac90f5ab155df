use anyhow::{Result, Context};
use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::subtitle_processor::SubtitleDocument;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @checks: Existing file with an .xml extension
    pub fn is_movie_xml<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        Self::file_exists(path) && has_extension(path, "xml")
    }

    /// Replace any other extension with .srt
    pub fn ensure_srt_extension<P: AsRef<Path>>(path: P) -> PathBuf {
        let path = path.as_ref();
        if has_extension(path, "srt") {
            path.to_path_buf()
        } else {
            path.with_extension("srt")
        }
    }

    // @generates: Output path next to the input, with .srt extension
    pub fn default_output_path<P: AsRef<Path>>(input_file: P) -> PathBuf {
        input_file.as_ref().with_extension("srt")
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let extension = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && has_extension(path, extension) {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a document as SRT, creating the parent directory if needed
    pub fn write_srt<P: AsRef<Path>>(path: P, document: &SubtitleDocument, fps: f64) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        for (i, cue) in document.cues.iter().enumerate() {
            writer
                .write_all(cue.to_srt_block(i + 1, fps).as_bytes())
                .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        Ok(())
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
}
