use anyhow::{Context, Result};
use directories_next::BaseDirs;
use std::env;
use std::path::PathBuf;

/// Directory holding the per-topic question files. Defaults to `./questions`.
pub fn questions_dir() -> PathBuf {
    env::var_os("REVISION_QUIZ_QUESTIONS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("questions"))
}

/// Location of the performance log file, inside the platform data directory
/// unless overridden.
pub fn performance_file() -> Result<PathBuf> {
    if let Some(dir) = env::var_os("REVISION_QUIZ_DATA") {
        return Ok(PathBuf::from(dir).join("performance.json"));
    }
    let mut path = BaseDirs::new()
        .context("could not locate system directories")?
        .data_dir()
        .to_path_buf();
    path.push("revision-quiz");
    path.push("performance.json");
    Ok(path)
}
