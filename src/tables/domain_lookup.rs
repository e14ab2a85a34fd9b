//! Mapping from search-result domain id to (accession, short name).
//!
//! Built from the `cdd.versions` reference file distributed with the domain
//! database. The search id (pssm-id) is what a local search reports as the
//! hit subject; it corresponds 1-1 to a domain accession, so this table is
//! the bridge between the two namespaces.

use anyhow::{bail, Context, Result};
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Number of header lines at the top of the reference file, discarded.
const HEADER_LINES: usize = 4;

#[derive(Debug, Clone)]
pub struct DomainLookup {
    // domain id -> (accession, short name)
    entries: FxHashMap<String, (String, String)>,
}

impl DomainLookup {
    /// Parse the reference table: a fixed header, then whitespace-delimited
    /// rows whose first three non-empty tokens are
    /// (short name, accession, domain id). Blank lines are skipped.
    pub fn from_reader<R: BufRead>(src: R) -> Result<DomainLookup> {
        let mut entries = FxHashMap::default();
        for (idx, line) in src.lines().enumerate() {
            let line = line?;
            if idx < HEADER_LINES {
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            let mut tokens = line.split_whitespace();
            let (Some(short_name), Some(accession), Some(id)) =
                (tokens.next(), tokens.next(), tokens.next())
            else {
                bail!(
                    "line {}: expected at least 3 whitespace-delimited fields: {}",
                    idx + 1,
                    line
                );
            };
            entries.insert(
                id.to_string(),
                (accession.to_string(), short_name.to_string()),
            );
        }
        Ok(DomainLookup { entries })
    }

    pub fn load(path: &Path) -> Result<DomainLookup> {
        let file = File::open(path)
            .with_context(|| format!("can't open domain lookup table {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("malformed domain lookup table {}", path.display()))
    }

    /// Load from the primary path, falling back to the backup path when the
    /// primary does not exist.
    pub fn load_with_fallback(primary: &Path, backup: &Path) -> Result<DomainLookup> {
        if primary.exists() {
            Self::load(primary)
        } else if backup.exists() {
            Self::load(backup)
        } else {
            bail!(
                "domain lookup table not found at {} or {}",
                primary.display(),
                backup.display()
            );
        }
    }

    pub fn accession(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(|(acc, _)| acc.as_str())
    }

    pub fn short_name(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(|(_, name)| name.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TABLE: &str = "\
# header 1
# header 2
# header 3
# header 4
COX1\tcd01663\t238833

Ndh\tcd00284\t238142
";

    #[test]
    fn test_load_skips_header_and_blanks() {
        let table = DomainLookup::from_reader(Cursor::new(TABLE)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.accession("238833"), Some("cd01663"));
        assert_eq!(table.short_name("238833"), Some("COX1"));
        assert_eq!(table.accession("238142"), Some("cd00284"));
    }

    #[test]
    fn test_unknown_id_is_absent() {
        let table = DomainLookup::from_reader(Cursor::new(TABLE)).unwrap();
        assert_eq!(table.accession("999999"), None);
        assert_eq!(table.short_name("999999"), None);
        assert!(!table.contains("999999"));
    }

    #[test]
    fn test_malformed_row_cites_line() {
        // line 5 parses; line 6 has only two tokens
        let bad = "h\nh\nh\nh\nCOX1 cd01663 238833\nNdh cd00284\n";
        let err = DomainLookup::from_reader(Cursor::new(bad)).unwrap_err();
        assert!(err.to_string().contains("line 6"), "got: {}", err);
    }

    #[test]
    fn test_missing_both_paths_is_error() {
        let err = DomainLookup::load_with_fallback(
            Path::new("/nonexistent/cdd.versions"),
            Path::new("/also/nonexistent/cdd.versions"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("not found"), "got: {}", err);
    }
}
