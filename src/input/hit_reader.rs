//! Streaming reader for tabular hit files.
//!
//! Skips blank lines and `#` comment lines, parses everything else into
//! `TabularHit` records, and reports parse failures with the 1-based line
//! number of the offending line.

use crate::common::{Delimiter, TabularHit};
use anyhow::{Context, Result};
use std::io::BufRead;

pub struct TabularHitReader<R> {
    src: R,
    delimiter: Delimiter,
    line_no: usize,
}

impl<R: BufRead> TabularHitReader<R> {
    pub fn new(src: R, delimiter: Delimiter) -> Self {
        TabularHitReader {
            src,
            delimiter,
            line_no: 0,
        }
    }

    /// Line number of the most recently read line (1-based, counting
    /// skipped comments and blanks).
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Next hit record, or `None` at end of input.
    pub fn read_hit(&mut self) -> Result<Option<TabularHit>> {
        let mut buf = String::new();
        loop {
            buf.clear();
            let n = self.src.read_line(&mut buf)?;
            if n == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let line = buf.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let hit = TabularHit::parse(line, self.delimiter)
                .with_context(|| format!("line {}", self.line_no))?;
            return Ok(Some(hit));
        }
    }

    /// Drain the source into a vector of hits.
    pub fn read_all(&mut self) -> Result<Vec<TabularHit>> {
        let mut hits = Vec::new();
        while let Some(hit) = self.read_hit()? {
            hits.push(hit);
        }
        Ok(hits)
    }
}
