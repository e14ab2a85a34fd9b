//! Echelon formation and typing.
//!
//! An echelon is the set of domain ids in one report sharing an identical
//! e-value. Echelon size is almost always 1, but the domain database
//! contains families of near-identical models that tie exactly, and the
//! tie-break voting here decides what a tied rank means.

use crate::counter::HashBinCounter;
use crate::tables::{Coiness, CoinessTable};

/// Superiority assigned to a floating-point-zero e-value. Calibration
/// constant from the original study; do not re-derive.
pub const MAX_SUPERIORITY: f64 = 180.0;

/// Stand-in for a zero e-value inside `to_superiority`, keeping the
/// logarithm finite while preserving ordering.
pub const ZERO_EVALUE_SUBSTITUTE: f64 = 1e-200;

/// Below this e-value a lone uninformative echelon is strong enough to be
/// re-typed by majority vote.
pub const STRONG_EVIDENCE_EVALUE: f64 = 1e-50;

/// Minimum superiority at which a lone uninformative echelon may still be
/// accepted (together with a positive majority vote).
pub const UNINFORMATIVE_ACCEPT_SUPERIORITY: f64 = 25.0;

/// Aggregate significance of one echelon. `Unknown` only appears while
/// typing is in progress; it is always resolved to `Negative` before a call
/// is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EchelonType {
    Positive,
    Negative,
    Uninformative,
    Unknown,
}

impl From<Coiness> for EchelonType {
    fn from(label: Coiness) -> EchelonType {
        match label {
            Coiness::Positive => EchelonType::Positive,
            Coiness::Negative => EchelonType::Negative,
            Coiness::Uninformative => EchelonType::Uninformative,
        }
    }
}

/// Domain ids sharing one exact e-value, in report insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Echelon {
    pub expect: f64,
    pub members: Vec<String>,
}

impl Echelon {
    /// Derive the echelon type from the multiset of member labels:
    /// homogeneous echelons take their one label; mixed echelons are
    /// positive or negative only when the other side is absent, otherwise
    /// uninformative.
    pub fn echelon_type(&self, table: &CoinessTable) -> EchelonType {
        let mut ctr = HashBinCounter::new();
        for id in &self.members {
            ctr.bump(table.coiness_of(id));
        }

        if ctr.is_empty() {
            return EchelonType::Unknown;
        }

        if ctr.len() == 1 {
            if let Some((label, _)) = ctr.iter().next() {
                return (*label).into();
            }
        }

        let have_positive = ctr.count_or_zero(&Coiness::Positive) > 0;
        let have_negative = ctr.count_or_zero(&Coiness::Negative) > 0;
        if have_positive && !have_negative {
            EchelonType::Positive
        } else if have_negative && !have_positive {
            EchelonType::Negative
        } else {
            EchelonType::Uninformative
        }
    }

    /// Majority rule for strong but uninformative echelons: positive if at
    /// least one positive member and at most one negative member.
    pub fn positive_by_non_minority(&self, table: &CoinessTable) -> EchelonType {
        let mut n_pos = 0usize;
        let mut n_neg = 0usize;
        for id in &self.members {
            match table.coiness_of(id) {
                Coiness::Positive => n_pos += 1,
                Coiness::Negative => n_neg += 1,
                Coiness::Uninformative => {}
            }
        }
        if n_pos >= 1 && n_neg <= 1 {
            EchelonType::Positive
        } else {
            EchelonType::Uninformative
        }
    }
}

/// Group (domain id, e-value) pairs into echelons by exact e-value equality
/// and order them ascending by e-value. Members keep insertion order.
pub fn collect_echelons(hits: &[(String, f64)]) -> Vec<Echelon> {
    let mut echelons: Vec<Echelon> = Vec::new();
    for (id, e) in hits {
        match echelons.iter_mut().find(|ech| ech.expect == *e) {
            Some(ech) => ech.members.push(id.clone()),
            None => echelons.push(Echelon {
                expect: *e,
                members: vec![id.clone()],
            }),
        }
    }
    echelons.sort_by(|a, b| a.expect.total_cmp(&b.expect));
    echelons
}

/// Log-scale separation between two e-values: `log10(worse) - log10(better)`.
/// A zero `better_e` is substituted with 1e-200.
///
/// Panics if `better_e >= worse_e` or `worse_e < 0`; callers must never
/// pass a misordered pair.
pub fn to_superiority(better_e: f64, worse_e: f64) -> f64 {
    assert!(
        better_e < worse_e,
        "expected {} to be < {}",
        better_e,
        worse_e
    );
    assert!(worse_e >= 0.0);

    let better_e = if better_e == 0.0 {
        ZERO_EVALUE_SUBSTITUTE
    } else {
        better_e
    };
    worse_e.log10() - better_e.log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn table() -> CoinessTable {
        let curated = "\
cd00001,POSITIVE
cd00002,POSITIVE
cd00010,NEGATIVE
cd00020,UNINFORMATIVE
";
        CoinessTable::from_reader(Cursor::new(curated)).unwrap()
    }

    fn echelon(members: &[&str]) -> Echelon {
        Echelon {
            expect: 1e-20,
            members: members.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_to_superiority_log_difference() {
        let s = to_superiority(1e-60, 1e-10);
        assert!((s - 50.0).abs() < 1e-9, "got {}", s);
    }

    #[test]
    fn test_to_superiority_zero_substitution() {
        let s = to_superiority(0.0, 1e-10);
        assert!((s - 190.0).abs() < 1e-9, "got {}", s);
    }

    #[test]
    #[should_panic(expected = "to be <")]
    fn test_to_superiority_rejects_misordered_pair() {
        to_superiority(1e-10, 1e-60);
    }

    #[test]
    #[should_panic(expected = "to be <")]
    fn test_to_superiority_rejects_equal_pair() {
        to_superiority(1e-10, 1e-10);
    }

    #[test]
    fn test_homogeneous_echelon_types() {
        let t = table();
        assert_eq!(
            echelon(&["cd00001", "cd00002"]).echelon_type(&t),
            EchelonType::Positive
        );
        assert_eq!(echelon(&["cd00010"]).echelon_type(&t), EchelonType::Negative);
        assert_eq!(
            echelon(&["cd00020"]).echelon_type(&t),
            EchelonType::Uninformative
        );
    }

    #[test]
    fn test_mixed_echelon_types() {
        let t = table();
        // positive + uninformative, no negative
        assert_eq!(
            echelon(&["cd00001", "cd00020"]).echelon_type(&t),
            EchelonType::Positive
        );
        // negative + uninformative, no positive
        assert_eq!(
            echelon(&["cd00010", "cd00020"]).echelon_type(&t),
            EchelonType::Negative
        );
        // both sides present
        assert_eq!(
            echelon(&["cd00001", "cd00010"]).echelon_type(&t),
            EchelonType::Uninformative
        );
    }

    #[test]
    fn test_empty_echelon_is_unknown() {
        let t = table();
        assert_eq!(echelon(&[]).echelon_type(&t), EchelonType::Unknown);
    }

    #[test]
    fn test_positive_by_non_minority() {
        let t = table();
        // one positive, one negative: negatives are a non-majority
        assert_eq!(
            echelon(&["cd00001", "cd00010"]).positive_by_non_minority(&t),
            EchelonType::Positive
        );
        // one positive, two negatives
        assert_eq!(
            echelon(&["cd00001", "cd00010", "cd00010"]).positive_by_non_minority(&t),
            EchelonType::Uninformative
        );
        // no positives at all
        assert_eq!(
            echelon(&["cd00020"]).positive_by_non_minority(&t),
            EchelonType::Uninformative
        );
    }

    #[test]
    fn test_collect_echelons_groups_and_sorts() {
        let hits = vec![
            ("cd00010".to_string(), 1e-5),
            ("cd00001".to_string(), 1e-40),
            ("cd00002".to_string(), 1e-40),
            ("cd00020".to_string(), 1e-20),
        ];
        let echelons = collect_echelons(&hits);
        assert_eq!(echelons.len(), 3);
        assert_eq!(echelons[0].expect, 1e-40);
        assert_eq!(echelons[0].members, vec!["cd00001", "cd00002"]);
        assert_eq!(echelons[1].expect, 1e-20);
        assert_eq!(echelons[2].expect, 1e-5);
    }
}
