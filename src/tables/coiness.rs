//! Curated biological-significance labels for conserved domains.
//!
//! The curated file maps a domain accession (e.g. `cd01663`) or a raw search
//! id (e.g. `238833`) to its COI-ness. After loading, every search id whose
//! accession is curated gets indexed as well, so both namespaces resolve to
//! the same label.

use super::domain_lookup::DomainLookup;
use anyhow::{anyhow, bail, Context, Result};
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Curated significance of a conserved domain with respect to the domain of
/// interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Coiness {
    Positive,
    Negative,
    Uninformative,
}

impl FromStr for Coiness {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "POSITIVE" => Ok(Coiness::Positive),
            "NEGATIVE" => Ok(Coiness::Negative),
            "UNINFORMATIVE" => Ok(Coiness::Uninformative),
            other => Err(anyhow!("unknown COIness label {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoinessTable {
    labels: FxHashMap<String, Coiness>,
}

impl CoinessTable {
    /// Parse the curated table: comma-separated (code, label) rows. Blank
    /// lines are skipped; anything else must split into exactly two
    /// non-blank fields with a recognized label.
    pub fn from_reader<R: BufRead>(src: R) -> Result<CoinessTable> {
        let mut labels = FxHashMap::default();
        for (idx, line) in src.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != 2 || fields.iter().any(|f| f.is_empty()) {
                bail!(
                    "line {}: expected two comma-separated fields: {}",
                    idx + 1,
                    line
                );
            }
            let label: Coiness = fields[1]
                .parse()
                .with_context(|| format!("line {}: {}", idx + 1, line))?;
            labels.insert(fields[0].to_string(), label);
        }
        Ok(CoinessTable { labels })
    }

    pub fn load(path: &Path) -> Result<CoinessTable> {
        let file = File::open(path)
            .with_context(|| format!("can't open COIness table {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
            .with_context(|| format!("malformed COIness table {}", path.display()))
    }

    pub fn load_with_fallback(primary: &Path, backup: &Path) -> Result<CoinessTable> {
        if primary.exists() {
            Self::load(primary)
        } else if backup.exists() {
            Self::load(backup)
        } else {
            bail!(
                "COIness table not found at {} or {}",
                primary.display(),
                backup.display()
            );
        }
    }

    /// Index every search id whose accession carries a curated label, so
    /// hits reported under either namespace classify identically.
    pub fn index_search_ids(&mut self, lookup: &DomainLookup) {
        let mut extra = Vec::new();
        for id in lookup.ids() {
            if let Some(acc) = lookup.accession(id) {
                if let Some(label) = self.labels.get(acc) {
                    extra.push((id.to_string(), *label));
                }
            }
        }
        self.labels.extend(extra);
    }

    /// Classification rule for an arbitrary domain id:
    /// - ids starting with `cl` (case-insensitive) are superfamily clusters,
    ///   which aggregate unrelated models: Uninformative;
    /// - curated ids get their curated label;
    /// - anything else is Negative. All top-scoring domains in the study
    ///   data have been manually curated; of the uncurated remainder, over
    ///   99% of those spot-checked were irrelevant to the domain of
    ///   interest, so unknown ids default to negative evidence.
    pub fn coiness_of(&self, id: &str) -> Coiness {
        if id.len() >= 2 && id[..2].eq_ignore_ascii_case("cl") {
            return Coiness::Uninformative;
        }
        self.labels.get(id).copied().unwrap_or(Coiness::Negative)
    }

    /// True when the id itself is curated (the `cl` rule and the negative
    /// default do not count).
    pub fn is_curated(&self, id: &str) -> bool {
        self.labels.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
