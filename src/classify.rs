//! Batch driver: stream a tabular hit file, classify each query's report,
//! and write one CSV row per query.

use crate::common::Delimiter;
use crate::report::DomainReportReader;
use crate::tables::{CoinessTable, DomainLookup};
use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DFLT_CDD_VERSIONS: &str = "data/cdd.versions";
const BACKUP_CDD_VERSIONS: &str = "cdd.versions";
const DFLT_COINESS: &str = "data/cds.csv";
const BACKUP_COINESS: &str = "cds.csv";

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Tabular hit file (local csv or remote tsv output)
    #[arg(short = 'i', long)]
    pub hits: PathBuf,
    /// Hit table format: csv (12 fields) or tsv (13 fields)
    #[arg(short, long, default_value = "csv")]
    pub format: Delimiter,
    /// Minimum superiority for an accepted call
    #[arg(short, long, default_value_t = 0.9)]
    pub threshold: f64,
    /// Domain lookup table; defaults to data/cdd.versions, then cdd.versions
    #[arg(long)]
    pub cdd_versions: Option<PathBuf>,
    /// Curated COIness table; defaults to data/cds.csv, then cds.csv
    #[arg(long)]
    pub coiness: Option<PathBuf>,
    /// Output csv (default stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Emit only accepted queries
    #[arg(long, default_value_t = false)]
    pub accepted_only: bool,
}

fn load_tables(args: &ClassifyArgs) -> Result<CoinessTable> {
    let lookup = match &args.cdd_versions {
        Some(path) => DomainLookup::load(path)?,
        None => DomainLookup::load_with_fallback(
            Path::new(DFLT_CDD_VERSIONS),
            Path::new(BACKUP_CDD_VERSIONS),
        )?,
    };
    let mut coiness = match &args.coiness {
        Some(path) => CoinessTable::load(path)?,
        None => {
            CoinessTable::load_with_fallback(Path::new(DFLT_COINESS), Path::new(BACKUP_COINESS))?
        }
    };
    coiness.index_search_ids(&lookup);
    Ok(coiness)
}

pub fn run(args: ClassifyArgs) -> Result<()> {
    // Tables load before any report is touched; a failure here terminates
    // the run with no partial output.
    let coiness = load_tables(&args)?;

    let hits = File::open(&args.hits)
        .with_context(|| format!("can't open hit file {}", args.hits.display()))?;
    let mut reader = DomainReportReader::new(BufReader::new(hits), args.format);

    let mut out: Box<dyn Write> = match &args.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("can't create output file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {pos} queries classified")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));

    writeln!(out, "query,call,superiority")?;
    let mut n_accepted = 0usize;
    while let Some(mut report) = reader
        .read_report()
        .with_context(|| format!("reading {}", args.hits.display()))?
    {
        let outcome = *report.classify_for_superiority_threshold(args.threshold, &coiness);
        spinner.inc(1);
        if outcome.is_accepted() {
            n_accepted += 1;
        }
        if args.accepted_only && !outcome.is_accepted() {
            continue;
        }
        let bound = outcome
            .superiority
            .map(|b| b.to_string())
            .unwrap_or_default();
        writeln!(
            out,
            "{},{},{}",
            report.query(),
            outcome.is_accepted(),
            bound
        )?;
    }
    out.flush()?;
    spinner.finish_and_clear();
    eprintln!("{} queries accepted", n_accepted);
    Ok(())
}
