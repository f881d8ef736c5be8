use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid corpus directory: {0}")]
    InvalidCorpusDir(PathBuf),
    #[error("Invalid fixture pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Failed to write output {path}: {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Directory holding the fixture files of a corpus
pub fn fixture_dir(corpus_root: &Path) -> PathBuf {
    corpus_root.join("src")
}

/// Find every `*.yaml` fixture directly under `<corpus_root>/src`, sorted by path.
pub fn scan_fixture_files(corpus_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    let dir = fixture_dir(corpus_root);
    if !dir.is_dir() {
        return Err(IoError::InvalidCorpusDir(dir));
    }

    let pattern = format!(
        "{}/*.yaml",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let mut files = glob::glob(&pattern)?
        .map(|entry| entry.map_err(|e| IoError::Io(e.into())))
        .collect::<Result<Vec<_>, _>>()?;
    files.retain(|path| path.is_file());
    files.sort();
    Ok(files)
}

pub fn validate_corpus_dir(path: &Path) -> Result<(), IoError> {
    if !path.is_dir() || !fixture_dir(path).is_dir() {
        return Err(IoError::InvalidCorpusDir(path.to_path_buf()));
    }
    Ok(())
}

/// Write `content` to `path` in one step.
///
/// The text goes to a temporary file next to `path` first and is renamed into
/// place, so an interrupted run never leaves a truncated spec behind.
pub fn write_output(path: &Path, content: &str) -> Result<(), IoError> {
    let output_error = |source| IoError::Output {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(output_error)?;

    let mut staged = tempfile::NamedTempFile::new_in(&parent).map_err(output_error)?;
    staged
        .write_all(content.as_bytes())
        .map_err(output_error)?;
    staged
        .persist(path)
        .map_err(|e| output_error(e.error))?;
    Ok(())
}
