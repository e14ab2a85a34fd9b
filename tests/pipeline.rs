//! End-to-end pipeline tests: tables loaded from in-memory readers, hit
//! stream grouped into reports, reports classified at the standard
//! threshold.

use coarbitrator::common::Delimiter;
use coarbitrator::report::DomainReportReader;
use coarbitrator::tables::{CoinessTable, DomainLookup};
use std::io::Cursor;

const CURATED: &str = "\
cd01663,POSITIVE
cd00284,NEGATIVE
";

const CDD_VERSIONS: &str = "\
cdd.versions reference table
downloaded 2018
columns: short name, accession, pssm id
----
COX1\tcd01663\t238833
Ndh\tcd00284\t238142
";

fn coiness() -> CoinessTable {
    let lookup = DomainLookup::from_reader(Cursor::new(CDD_VERSIONS)).unwrap();
    let mut table = CoinessTable::from_reader(Cursor::new(CURATED)).unwrap();
    table.index_search_ids(&lookup);
    table
}

#[test]
fn classifies_a_multi_query_hit_stream() {
    // q1: clear positive evidence 50 decades ahead of the competition
    // q2: best evidence is negative
    // q3: unknown domain, defaults to negative at modest strength
    let hits = "\
# query, subject, %ident, length, mismatches, gap opens, q start, q end, s start, s end, e, score
q1,CDD:238833,92.1,150,10,0,1,150,1,150,1e-60,200.0
q1,CDD:238142,70.0,140,40,2,5,144,2,141,1e-10,80.0
q2,CDD:238142,95.0,150,7,0,1,150,1,150,1e-45,180.0
q2,CDD:238833,60.0,100,40,3,10,109,20,119,1e-8,40.0
q3,CDD:999999,88.0,120,14,1,1,120,4,123,1e-5,60.0
";
    let mut reader = DomainReportReader::new(Cursor::new(hits), Delimiter::Comma);
    let table = coiness();

    let mut q1 = reader.read_report().unwrap().unwrap();
    assert_eq!(q1.query(), "q1");
    q1.classify_for_superiority_threshold(0.9, &table);
    assert!(q1.is_coi());
    let bound = q1.superiority_bound().unwrap();
    assert!((bound - 50.0).abs() < 1e-9, "got {}", bound);

    let mut q2 = reader.read_report().unwrap().unwrap();
    q2.classify_for_superiority_threshold(0.9, &table);
    assert!(!q2.is_coi());
    let bound = q2.superiority_bound().unwrap();
    assert!((bound + 37.0).abs() < 1e-9, "got {}", bound);

    let mut q3 = reader.read_report().unwrap().unwrap();
    q3.classify_for_superiority_threshold(0.9, &table);
    assert!(!q3.is_coi());
    let bound = q3.superiority_bound().unwrap();
    assert!((bound + 5.0).abs() < 1e-9, "got {}", bound);

    assert!(reader.read_report().unwrap().is_none());
}

#[test]
fn local_and_remote_subject_namespaces_classify_identically() {
    let table = coiness();

    // same evidence expressed as pssm ids (local) and accessions (remote)
    let local = "q1,CDD:238833,92.1,150,10,0,1,150,1,150,1e-60,200.0\n";
    let remote = "q1\tcd01663\t92.1\t92.1\t150\t10\t0\t1\t150\t1\t150\t1e-60\t200.0\n";

    let mut local_reader = DomainReportReader::new(Cursor::new(local), Delimiter::Comma);
    let mut local_report = local_reader.read_report().unwrap().unwrap();
    local_report.classify_for_superiority_threshold(0.9, &table);

    let mut remote_reader = DomainReportReader::new(Cursor::new(remote), Delimiter::Tab);
    let mut remote_report = remote_reader.read_report().unwrap().unwrap();
    remote_report.classify_for_superiority_threshold(0.9, &table);

    assert_eq!(local_report.classification(), remote_report.classification());
    assert!(local_report.is_coi());
}

#[test]
fn tied_evalues_form_one_echelon_across_namespaces() {
    let table = coiness();
    // positive pssm id and negative accession tie at 1e-55: a lone mixed
    // echelon stronger than 1e-50, upgraded to positive by majority rule
    let hits = "\
q1,CDD:238833,92.1,150,10,0,1,150,1,150,1e-55,200.0
q1,cd00284,91.0,150,11,0,1,150,1,150,1e-55,195.0
";
    let mut reader = DomainReportReader::new(Cursor::new(hits), Delimiter::Comma);
    let mut report = reader.read_report().unwrap().unwrap();
    report.classify_for_superiority_threshold(0.9, &table);
    assert!(report.is_coi());
    let bound = report.superiority_bound().unwrap();
    assert!((bound - 55.0).abs() < 1e-9, "got {}", bound);
}
