/*!
 * Common test utilities for the gosubtitle test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds a Movie XML document from (start, stop, text, voice) tuples
pub fn movie_xml(duration: f64, sounds: &[(f64, f64, &str, &str)]) -> String {
    let mut xml = format!("<movie duration=\"{}\">\n", duration);
    for (start, stop, text, voice) in sounds {
        xml.push_str(&format!(
            "  <sound tts=\"1\"><start>{}</start><stop>{}</stop><ttsdata><text>{}</text><voice>{}</voice></ttsdata></sound>\n",
            start, stop, text, voice
        ));
    }
    xml.push_str("</movie>\n");
    xml
}

/// Helper to get the absolute path to a test resource
pub fn test_resource_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("resources");
    path.push(relative_path);
    path
}

/// Route library log output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
