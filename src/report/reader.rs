//! Groups consecutive hit lines sharing a query id into domain reports.
//!
//! Hit files carry all hits for a query contiguously, and query ids are
//! globally unique across the files feeding one run. The reader parses
//! lines until the query id changes, pushes the overshoot line back, and
//! yields the finished report.

use super::domain_report::DomainReport;
use crate::common::{Delimiter, TabularHit};
use crate::input::PushbackLineReader;
use anyhow::{Context, Result};
use std::io::BufRead;

pub struct DomainReportReader<R> {
    src: PushbackLineReader<R>,
    delimiter: Delimiter,
    line_no: usize,
}

impl<R: BufRead> DomainReportReader<R> {
    pub fn new(src: R, delimiter: Delimiter) -> Self {
        DomainReportReader {
            src: PushbackLineReader::new(src),
            delimiter,
            line_no: 0,
        }
    }

    /// Next report, holding every contiguous hit for one query, or `None`
    /// when the input is exhausted.
    pub fn read_report(&mut self) -> Result<Option<DomainReport>> {
        let mut report: Option<DomainReport> = None;
        while let Some(line) = self.src.read_line()? {
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let hit = TabularHit::parse(trimmed, self.delimiter)
                .with_context(|| format!("line {}", self.line_no))?;
            match report.as_mut() {
                None => {
                    let mut fresh = DomainReport::new(&hit.query);
                    fresh.insert(&hit.subject, hit.e_value);
                    report = Some(fresh);
                }
                Some(current) if current.query() == hit.query => {
                    current.insert(&hit.subject, hit.e_value);
                }
                Some(_) => {
                    // First hit of the next query: hand the line back so
                    // the next call starts from it.
                    self.src.push_back(line);
                    self.line_no -= 1;
                    break;
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HITS: &str = "\
# comment
q1,CDD:238833,85.47,117,17,0,35,151,12,128,8e-22,97.6
q1,cd00123,80.00,110,20,1,30,139,10,119,2e-10,55.1

q2,cd00456,91.20,95,8,0,1,95,3,97,1e-40,140.0
";

    #[test]
    fn test_groups_contiguous_hits_by_query() {
        let mut reader = DomainReportReader::new(Cursor::new(HITS), Delimiter::Comma);

        let first = reader.read_report().unwrap().unwrap();
        assert_eq!(first.query(), "q1");
        let domains: Vec<_> = first.domains().collect();
        assert_eq!(domains, vec![("238833", 8e-22), ("cd00123", 2e-10)]);

        let second = reader.read_report().unwrap().unwrap();
        assert_eq!(second.query(), "q2");
        assert_eq!(second.len(), 1);

        assert!(reader.read_report().unwrap().is_none());
    }

    #[test]
    fn test_empty_input_yields_none() {
        let mut reader = DomainReportReader::new(Cursor::new("# only comments\n"), Delimiter::Comma);
        assert!(reader.read_report().unwrap().is_none());
    }

    #[test]
    fn test_parse_error_carries_line_number() {
        let bad = "q1,CDD:238833,85.47,117,17,0,35,151,12,128,8e-22,97.6\nq1,short\n";
        let mut reader = DomainReportReader::new(Cursor::new(bad), Delimiter::Comma);
        let err = reader.read_report().unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"), "got: {:#}", err);
    }
}
