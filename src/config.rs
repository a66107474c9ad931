use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const NOTES_DIR_ENV: &str = "NOTE_TAKER_DIR";
pub const LOG_ENV: &str = "NOTE_TAKER_LOG";
pub const DEFAULT_EDITOR: &str = "vim";

/// Tunables for the interactive finder. Built once and handed to the
/// session; nothing here changes while a search is running.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    pub rows_to_show: usize,
    pub title_column_width: usize,
    pub max_search_rows: usize,
    /// Widest leading unmatched run shown before a highlighted match in
    /// content search; longer runs collapse to an ellipsis.
    pub line_context_width: usize,
    pub max_match_score: f64,
    pub max_non_match_penalty: f64,
    pub date_weight: f64,
    pub date_penalty_ceil: f64,
    pub date_format: &'static str,
}

impl FinderConfig {
    pub const DEFAULT: Self = Self {
        rows_to_show: 15,
        title_column_width: 40,
        max_search_rows: 1000,
        line_context_width: 24,
        max_match_score: 250.0,
        max_non_match_penalty: -100.0,
        date_weight: 10.0,
        date_penalty_ceil: 100.0,
        date_format: "%Y/%m/%d %H:%M:%S",
    };
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Process-level settings resolved from flags and the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub notes_dir: PathBuf,
    pub editor: String,
    pub use_color: bool,
    pub finder: FinderConfig,
}

impl Config {
    pub fn resolve(path_flag: Option<&str>) -> io::Result<Self> {
        let notes_dir = match path_flag {
            Some(p) => PathBuf::from(p),
            None => notes_dir()?,
        };
        ensure_dir(&notes_dir)?;
        Ok(Self {
            notes_dir,
            editor: env::var("EDITOR")
                .ok()
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EDITOR.to_string()),
            use_color: env::var("NO_COLOR").is_err(),
            finder: FinderConfig::default(),
        })
    }
}

pub fn notes_dir() -> io::Result<PathBuf> {
    if let Ok(dir) = env::var(NOTES_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let home = env::var("HOME").map_err(|_| {
        io::Error::other(format!("HOME not set; set {NOTES_DIR_ENV} explicitly"))
    })?;
    Ok(PathBuf::from(home).join(".note-taker"))
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_finder_defaults() {
        let cfg = FinderConfig::default();
        assert_eq!(cfg.rows_to_show, 15);
        assert_eq!(cfg.title_column_width, 40);
        assert_eq!(cfg.max_search_rows, 1000);
        assert_eq!(cfg.max_match_score, 250.0);
        assert_eq!(cfg.date_penalty_ceil, 100.0);
    }

    #[test]
    fn test_resolve_with_path_flag_creates_dir() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("nested").join("notes");
        let cfg = Config::resolve(Some(dir.to_str().unwrap())).unwrap();
        assert_eq!(cfg.notes_dir, dir);
        assert!(dir.is_dir());
    }
}
