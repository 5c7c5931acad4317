//! Persistent high scores.
//!
//! Records are stored one per line as `name score`. Reading is lenient: lines
//! that do not parse are skipped on their own, and a missing file is simply an
//! empty scoreboard.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::ScoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
}

impl ScoreRecord {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }

    /// Parses a single `name score` line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?;
        let score = tokens.next()?.parse().ok()?;
        if tokens.next().is_some() {
            return None;
        }
        Some(Self::new(name, score))
    }
}

/// Sorts records by descending score; equal scores keep their order.
pub fn sort_records(records: &mut [ScoreRecord]) {
    records.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Parses every well-formed line of a scoreboard, best score first.
pub fn parse_records(text: &str) -> Vec<ScoreRecord> {
    let mut records: Vec<ScoreRecord> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(number, line)| {
            let record = ScoreRecord::parse(line);
            if record.is_none() {
                warn!(line = number + 1, content = line, "Skipping malformed scoreboard line");
            }
            record
        })
        .collect();
    sort_records(&mut records);
    records
}

/// Parses a scoreboard from raw file bytes.
///
/// Lines that are not valid UTF-8 are skipped like any other malformed line.
pub fn parse_bytes(bytes: &[u8]) -> Vec<ScoreRecord> {
    let lines: Vec<&str> = bytes
        .split(|byte| *byte == b'\n')
        .enumerate()
        .filter_map(|(number, line)| match std::str::from_utf8(line) {
            Ok(line) => Some(line),
            Err(_) => {
                warn!(line = number + 1, "Skipping scoreboard line that is not UTF-8");
                None
            }
        })
        .collect();
    parse_records(&lines.join("\n"))
}

/// Storage for score records.
pub trait ScoreStore {
    /// Reads all records, best score first.
    fn load(&self) -> Result<Vec<ScoreRecord>, ScoreError>;

    /// Replaces the stored records.
    fn save(&mut self, records: &[ScoreRecord]) -> Result<(), ScoreError>;

    /// Appends a finished game's result.
    ///
    /// Not atomic: the records are read, extended and written back in full.
    fn save_result(&mut self, name: &str, score: u32) -> Result<(), ScoreError> {
        if name.is_empty() || name.split_whitespace().count() != 1 {
            return Err(ScoreError::InvalidName(name.to_string()));
        }

        let mut records = self.load()?;
        records.push(ScoreRecord::new(name, score));
        sort_records(&mut records);
        self.save(&records)
    }

    /// The `n` best records.
    fn top(&self, n: usize) -> Result<Vec<ScoreRecord>, ScoreError> {
        let mut records = self.load()?;
        records.truncate(n);
        Ok(records)
    }
}

/// A scoreboard kept in a plain text file.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<Vec<ScoreRecord>, ScoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(parse_bytes(&bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No scoreboard yet");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, records: &[ScoreRecord]) -> Result<(), ScoreError> {
        let mut sorted = records.to_vec();
        sort_records(&mut sorted);
        let text: String = sorted
            .iter()
            .map(|record| format!("{} {}\n", record.name, record.score))
            .collect();
        fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), records = sorted.len(), "Scoreboard written");
        Ok(())
    }
}

/// A scoreboard that only lives in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    records: Vec<ScoreRecord>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<Vec<ScoreRecord>, ScoreError> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &[ScoreRecord]) -> Result<(), ScoreError> {
        self.records = records.to_vec();
        sort_records(&mut self.records);
        Ok(())
    }
}
