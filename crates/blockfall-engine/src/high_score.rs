//! Best score persisted as a plain decimal integer in a text file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("failed to write high score to {}", path.display())]
pub struct HighScoreError {
    path: PathBuf,
    source: io::Error,
}

impl HighScoreError {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub struct HighScore;

impl HighScore {
    /// Reads the stored high score.
    ///
    /// A missing, unreadable or malformed file counts as no high score and
    /// yields 0.
    #[must_use]
    pub fn load(path: &Path) -> usize {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Writes `score` if it beats the stored high score.
    ///
    /// Returns whether the file was written.
    pub fn save_if_higher(path: &Path, score: usize) -> Result<bool, HighScoreError> {
        if score <= Self::load(path) {
            return Ok(false);
        }
        fs::write(path, score.to_string()).map_err(|source| HighScoreError {
            path: path.to_owned(),
            source,
        })?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("blockfall-{}-{name}.txt", process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_path("missing");
        assert_eq!(HighScore::load(&path), 0);
    }

    #[test]
    fn test_load_malformed_file() {
        let path = temp_path("malformed");
        fs::write(&path, "not a number").unwrap();
        assert_eq!(HighScore::load(&path), 0);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_trims_whitespace() {
        let path = temp_path("whitespace");
        fs::write(&path, " 1250\n").unwrap();
        assert_eq!(HighScore::load(&path), 1250);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_only_when_higher() {
        let path = temp_path("save");

        assert!(HighScore::save_if_higher(&path, 300).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "300");

        assert!(!HighScore::save_if_higher(&path, 300).unwrap());
        assert!(!HighScore::save_if_higher(&path, 125).unwrap());
        assert_eq!(HighScore::load(&path), 300);

        assert!(HighScore::save_if_higher(&path, 425).unwrap());
        assert_eq!(HighScore::load(&path), 425);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_save_error_reports_path() {
        let dir = temp_path("dir");
        fs::create_dir_all(&dir).unwrap();

        let err = HighScore::save_if_higher(&dir, 100).unwrap_err();
        assert_eq!(err.path(), dir);
        assert!(err.to_string().contains("failed to write high score"));
        fs::remove_dir(&dir).unwrap();
    }
}
