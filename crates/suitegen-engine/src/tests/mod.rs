use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary corpus root with an empty `src` directory
pub fn create_test_corpus() -> TempDir {
    let corpus = tempfile::tempdir().unwrap();
    fs::create_dir(corpus.path().join("src")).unwrap();
    corpus
}

/// Write `src/<stem>.yaml` into a test corpus
pub fn write_fixture(corpus: &TempDir, stem: &str, content: &str) -> PathBuf {
    let file_path = corpus.path().join("src").join(format!("{stem}.yaml"));
    fs::write(&file_path, content).unwrap();
    file_path
}
