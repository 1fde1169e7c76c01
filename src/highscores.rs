//! Persisted best score
//!
//! Stored as a single decimal integer in a text file. A missing or unreadable
//! file is treated as a best score of 0; it is never an error for the player.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default file name, relative to the working directory
pub const DEFAULT_FILE: &str = "highscores.txt";

/// Best score across sessions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Create an empty record
    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Parse file contents: the last line holding a valid integer wins
    pub fn parse(text: &str) -> Option<u64> {
        text.lines()
            .filter_map(|line| line.trim().parse::<u64>().ok())
            .last()
    }

    /// Load the stored best score, defaulting to 0 on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match Self::parse(&text) {
                Some(best) => {
                    log::info!("Loaded high score {} from {}", best, path.display());
                    Self { best }
                }
                None => {
                    log::warn!("No score found in {}, starting fresh", path.display());
                    Self::new()
                }
            },
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    log::warn!("Could not read {}: {}", path.display(), e);
                }
                Self::new()
            }
        }
    }

    /// Write the best score as decimal text
    pub fn save(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.best.to_string())?;
        log::info!("High score {} saved to {}", self.best, path.display());
        Ok(())
    }

    /// Check if a score beats the stored best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Fold a finished session into the record; returns true on a new best
    pub fn record(&mut self, score: u64) -> bool {
        if self.qualifies(score) {
            self.best = score;
            true
        } else {
            false
        }
    }
}

/// Resolve the high-score file, defaulting to the working directory
pub fn resolve_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE))
}
