/*!
 * Candidate dictionary loading
 *
 * Reads a line-oriented password source into an ordered, immutable list.
 * Entries are trimmed and blank lines dropped; the WPA length policy
 * (8-63 characters) is deliberately NOT enforced here. Out-of-range
 * entries stay in the list and are skipped by the workers at test time.
 */

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Errors raised while loading the candidate dictionary.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source contained no usable entries after trimming.
    #[error("dictionary is empty")]
    Empty,

    /// The source could not be read.
    #[error("failed to read dictionary: {0}")]
    Io(#[from] std::io::Error),
}

/// Ordered list of candidate passwords, insertion order preserved.
///
/// Built once before the search starts and shared read-only by all
/// workers. Scan order within a shard follows this order.
#[derive(Debug, Clone)]
pub struct Wordlist {
    entries: Vec<String>,
}

impl Wordlist {
    /// Read candidates from any line-oriented source.
    ///
    /// The stream is consumed fully. Lines are trimmed of surrounding
    /// whitespace; blank lines are dropped. Fails with
    /// [`SourceError::Empty`] if nothing remains.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, SourceError> {
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                entries.push(trimmed.to_string());
            }
        }

        if entries.is_empty() {
            return Err(SourceError::Empty);
        }

        Ok(Self { entries })
    }

    /// Read candidates from a dictionary file, one per line.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Build a list from entries already in memory. Entries are taken
    /// as-is; no trimming or filtering is applied.
    pub fn from_entries(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All candidates, in load order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;

    #[test]
    fn test_trims_and_drops_blanks() {
        let input = Cursor::new("  password123  \n\n\npassword456\n   \n");
        let list = Wordlist::from_reader(input).unwrap();
        assert_eq!(list.entries(), &["password123", "password456"]);
    }

    #[test]
    fn test_short_entries_are_kept() {
        // Length policy is enforced at test time, not at load time.
        let input = Cursor::new("short\nlongenough1\n");
        let list = Wordlist::from_reader(input).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries()[0], "short");
    }

    #[test]
    fn test_empty_source_is_an_error() {
        let input = Cursor::new("\n   \n\t\n");
        let result = Wordlist::from_reader(input);
        assert!(matches!(result, Err(SourceError::Empty)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "firstpassword").unwrap();
        writeln!(file, "secondpassword").unwrap();

        let list = Wordlist::from_path(file.path()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries()[1], "secondpassword");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Wordlist::from_path("/nonexistent/wordlist.txt");
        assert!(matches!(result, Err(SourceError::Io(_))));
    }
}
