//! Tabular alignment-hit record shared across the crate.
//!
//! Tabular search output is e.g.
//! `query1,CDD:238833,85.47,117,17,0,35,151,12,128,8e-22,97.6`
//! Fields: query, subject, %ident, length, mismatches, gap opens,
//! q start, q end, s start, s end, e-value, score.
//!
//! Local searches emit 12 comma-separated fields; the remote service emits
//! 13 tab-separated fields with a second identity column that is discarded.

use anyhow::{anyhow, bail, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Field delimiter of a tabular hit line. The delimiter determines the
/// expected field count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// 12-field local output.
    Comma,
    /// 13-field remote output (extra identity column, discarded on parse).
    Tab,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }

    pub fn expected_fields(self) -> usize {
        match self {
            Delimiter::Comma => 12,
            Delimiter::Tab => 13,
        }
    }
}

impl FromStr for Delimiter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" | "comma" => Ok(Delimiter::Comma),
            "tsv" | "tab" => Ok(Delimiter::Tab),
            other => Err(anyhow!(
                "unsupported hit table format {:?} (expected csv or tsv)",
                other
            )),
        }
    }
}

/// One parsed alignment hit. Start/end pairs are normalized so that
/// start <= end regardless of input orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularHit {
    pub query: String,
    pub subject: String,
    pub pct_identity: f32,
    pub length: usize,
    pub mismatches: usize,
    pub gap_opens: usize,
    pub query_start: usize,
    pub query_end: usize,
    pub subject_start: usize,
    pub subject_end: usize,
    pub e_value: f64,
    pub score: f32,
}

/// Field names in input order for the 12-field form, used in parse errors.
const FIELD_NAMES: [&str; 12] = [
    "query",
    "subject",
    "pct_identity",
    "length",
    "mismatches",
    "gap_opens",
    "query_start",
    "query_end",
    "subject_start",
    "subject_end",
    "e_value",
    "score",
];

fn parse_field<T: FromStr>(token: &str, field: &str, line: &str) -> Result<T> {
    token.parse().map_err(|_| {
        anyhow!(
            "can't parse field {} from {:?} in hit line: {}",
            field,
            token,
            line
        )
    })
}

impl TabularHit {
    /// Parse one tabular hit line. Lines starting with `#` or `>` are not
    /// data and are rejected here; readers skip comments before calling.
    pub fn parse(line: &str, delimiter: Delimiter) -> Result<TabularHit> {
        if line.starts_with('#') || line.starts_with('>') {
            bail!("unexpected first char in hit line: {}", line);
        }

        let tokens: Vec<&str> = line
            .split(delimiter.as_char())
            .filter(|t| !t.trim().is_empty())
            .collect();
        let expected = delimiter.expected_fields();
        if tokens.len() != expected {
            bail!(
                "wrong number of fields: saw {}, expected {}: {}",
                tokens.len(),
                expected,
                line
            );
        }

        // The 13-field remote form carries a second identity column right
        // after pct_identity; skip it so both forms line up.
        let mut n = 0;
        let mut next = || {
            let t = tokens[n];
            n += 1;
            t
        };

        let query = next().to_string();
        let subject = next().to_string();
        let pct_identity = parse_field(next(), "pct_identity", line)?;
        if expected == 13 {
            next();
        }
        let length = parse_field(next(), "length", line)?;
        let mismatches = parse_field(next(), "mismatches", line)?;
        let gap_opens = parse_field(next(), "gap_opens", line)?;
        let q1: usize = parse_field(next(), "query_start", line)?;
        let q2: usize = parse_field(next(), "query_end", line)?;
        let s1: usize = parse_field(next(), "subject_start", line)?;
        let s2: usize = parse_field(next(), "subject_end", line)?;
        let e_value: f64 = parse_field(next(), "e_value", line)?;
        let score = parse_field(next(), "score", line)?;

        if !(e_value >= 0.0) {
            bail!(
                "can't parse field e_value: negative or NaN value {:?} in hit line: {}",
                e_value,
                line
            );
        }

        Ok(TabularHit {
            query,
            subject,
            pct_identity,
            length,
            mismatches,
            gap_opens,
            query_start: q1.min(q2),
            query_end: q1.max(q2),
            subject_start: s1.min(s2),
            subject_end: s1.max(s2),
            e_value,
            score,
        })
    }

    /// Inclusive span of the hit on the query.
    pub fn query_span(&self) -> usize {
        self.query_end - self.query_start + 1
    }

    /// Inclusive span of the hit on the subject.
    pub fn subject_span(&self) -> usize {
        self.subject_end - self.subject_start + 1
    }

    pub fn field_names() -> &'static [&'static str] {
        &FIELD_NAMES
    }
}

impl fmt::Display for TabularHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Query={}, Sbjct={}, %ident={} over {} at {}-{}, e-value={}",
            self.query,
            self.subject,
            self.pct_identity,
            self.length,
            self.query_start,
            self.query_end,
            self.e_value
        )
    }
}

/// Compare two hits: query asc, length asc, identity asc, subject asc,
/// e-value asc (lower e-value is stronger evidence and sorts first), then a
/// stable tiebreak over the remaining fields.
pub fn compare_hits(a: &TabularHit, b: &TabularHit) -> Ordering {
    match a.query.cmp(&b.query) {
        Ordering::Equal => {}
        ord => return ord,
    }
    match a.length.cmp(&b.length) {
        Ordering::Equal => {}
        ord => return ord,
    }
    match a.pct_identity.total_cmp(&b.pct_identity) {
        Ordering::Equal => {}
        ord => return ord,
    }
    match a.subject.cmp(&b.subject) {
        Ordering::Equal => {}
        ord => return ord,
    }
    match a.e_value.total_cmp(&b.e_value) {
        Ordering::Equal => {}
        ord => return ord,
    }
    (a.mismatches, a.gap_opens, a.query_start, a.query_end)
        .cmp(&(b.mismatches, b.gap_opens, b.query_start, b.query_end))
        .then(a.subject_start.cmp(&b.subject_start))
        .then(a.subject_end.cmp(&b.subject_end))
        .then(a.score.total_cmp(&b.score))
}
