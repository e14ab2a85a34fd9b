//! Per-query domain report and the superiority classification.
//!
//! A report holds the (domain id, e-value) pairs one search produced for a
//! single query, in hit order. Classification collapses them into a call
//! (is the query a domain-of-interest match?) plus a signed superiority
//! bound measuring how far the supporting evidence outruns the competing
//! evidence on a log10 scale.

use super::echelon::{
    collect_echelons, to_superiority, Echelon, EchelonType, MAX_SUPERIORITY,
    STRONG_EVIDENCE_EVALUE, UNINFORMATIVE_ACCEPT_SUPERIORITY,
};
use crate::counter::TreeBinCounter;
use crate::tables::CoinessTable;

/// Terminal decision for one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Accepted,
    Rejected,
}

/// Outcome of classification. The superiority bound stays absent for
/// reports with no usable evidence (empty report, or every echelon trimmed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub call: Call,
    pub superiority: Option<f64>,
}

impl Classification {
    fn rejected_without_bound() -> Classification {
        Classification {
            call: Call::Rejected,
            superiority: None,
        }
    }

    fn with_bound(call: Call, superiority: f64) -> Classification {
        Classification {
            call,
            superiority: Some(superiority),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.call == Call::Accepted
    }
}

/// One query's domain hits, insertion-ordered, plus the write-once outcome.
#[derive(Debug, Clone)]
pub struct DomainReport {
    query: String,
    // (domain id, e-value); duplicate ids overwrite in place
    hits: Vec<(String, f64)>,
    classification: Option<Classification>,
}

impl DomainReport {
    pub fn new(query: &str) -> DomainReport {
        DomainReport {
            query: query.to_string(),
            hits: Vec::new(),
            classification: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Record one (domain id, e-value) pair. Local searches prefix every
    /// subject with `CDD:`; the prefix is stripped so both local and remote
    /// subjects land in one namespace. A duplicate id keeps its original
    /// position and takes the new e-value.
    pub fn insert(&mut self, subject: &str, e_value: f64) {
        let id = subject.strip_prefix("CDD:").unwrap_or(subject);
        match self.hits.iter_mut().find(|(d, _)| d == id) {
            Some(entry) => entry.1 = e_value,
            None => self.hits.push((id.to_string(), e_value)),
        }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// (domain id, e-value) pairs in insertion order.
    pub fn domains(&self) -> impl Iterator<Item = (&str, f64)> {
        self.hits.iter().map(|(d, e)| (d.as_str(), *e))
    }

    pub fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    pub fn is_coi(&self) -> bool {
        self.classification
            .as_ref()
            .is_some_and(Classification::is_accepted)
    }

    pub fn superiority_bound(&self) -> Option<f64> {
        self.classification.as_ref().and_then(|c| c.superiority)
    }

    /// Classify this report against a superiority threshold. The outcome is
    /// stored on the report and also returned; callers must treat it as
    /// terminal.
    ///
    /// Panics if an echelon still lacks a resolved label when the final
    /// decision is taken; every domain resolves to a concrete label, so
    /// reaching such a state is a logic error and must not be masked.
    pub fn classify_for_superiority_threshold(
        &mut self,
        threshold: f64,
        table: &CoinessTable,
    ) -> &Classification {
        let outcome = self.derive_classification(threshold, table);
        self.classification.insert(outcome)
    }

    fn derive_classification(&self, threshold: f64, table: &CoinessTable) -> Classification {
        // No hits at all: reject with no bound.
        if self.hits.is_empty() {
            return Classification::rejected_without_bound();
        }

        // Collect hits into echelons by e-value and type each one.
        let echelons = collect_echelons(&self.hits);
        let mut typed: Vec<(Echelon, EchelonType)> = echelons
            .into_iter()
            .map(|ech| {
                let ty = ech.echelon_type(table);
                (ech, ty)
            })
            .collect();

        // A lone echelon with a very strong e-value gets a second chance by
        // majority rule before being written off as uninformative.
        if typed.len() == 1
            && typed[0].1 == EchelonType::Uninformative
            && typed[0].0.expect < STRONG_EVIDENCE_EVALUE
        {
            typed[0].1 = typed[0].0.positive_by_non_minority(table);
        }

        // Unknown -> Negative. With high probability all relevant domains
        // have been curated, so the remainder count as negative evidence.
        for entry in typed.iter_mut() {
            if entry.1 == EchelonType::Unknown {
                entry.1 = EchelonType::Negative;
            }
        }

        // Trim uninformative echelons off the strong end until the best
        // survivor is positive or negative, or one echelon remains.
        while typed.len() > 1
            && matches!(
                typed[0].1,
                EchelonType::Uninformative | EchelonType::Unknown
            )
        {
            typed.remove(0);
        }

        if typed.is_empty() {
            return Classification::rejected_without_bound();
        }

        let e_best = typed[0].0.expect;

        // One echelon left: superiority comes from its e-value alone.
        if typed.len() == 1 {
            let (best, best_type) = &typed[0];
            let bound = if e_best == 0.0 {
                MAX_SUPERIORITY
            } else {
                -e_best.log10()
            };
            if bound < threshold {
                return Classification::with_bound(Call::Rejected, bound);
            }
            return match best_type {
                EchelonType::Positive => Classification::with_bound(Call::Accepted, bound),
                EchelonType::Negative => Classification::with_bound(Call::Rejected, -bound),
                EchelonType::Uninformative => {
                    let accept = bound > UNINFORMATIVE_ACCEPT_SUPERIORITY
                        && best.positive_by_non_minority(table) == EchelonType::Positive;
                    if accept {
                        Classification::with_bound(Call::Accepted, bound)
                    } else {
                        Classification::with_bound(Call::Rejected, -MAX_SUPERIORITY)
                    }
                }
                EchelonType::Unknown => unreachable!(
                    "unknown echelon type for query {}: every domain must carry a label",
                    self.query
                ),
            };
        }

        // Multiple echelons, one shared type: superiority spans the whole
        // surviving range.
        let type_ctr: TreeBinCounter<EchelonType> = typed.iter().map(|(_, ty)| *ty).collect();
        if type_ctr.len() == 1 {
            let e_worst = typed[typed.len() - 1].0.expect;
            let bound = to_superiority(e_best, e_worst);
            return match typed[0].1 {
                EchelonType::Positive => {
                    let call = if bound >= threshold {
                        Call::Accepted
                    } else {
                        Call::Rejected
                    };
                    Classification::with_bound(call, bound)
                }
                EchelonType::Negative | EchelonType::Uninformative => {
                    Classification::with_bound(Call::Rejected, -bound)
                }
                EchelonType::Unknown => unreachable!(
                    "unknown echelon type for query {}: every domain must carry a label",
                    self.query
                ),
            };
        }

        // General case: multiple echelons, multiple types. Trimming
        // guarantees the best echelon is positive or negative.
        match typed[0].1 {
            EchelonType::Negative => {
                let e_next = typed[1].0.expect;
                Classification::with_bound(Call::Rejected, -to_superiority(e_best, e_next))
            }
            EchelonType::Positive => {
                // Only positive and negative echelons compete; the bound is
                // the gap to the best negative, or the best e-value itself
                // when no negative survives.
                let e_best_negative = typed
                    .iter()
                    .find(|(_, ty)| *ty == EchelonType::Negative)
                    .map(|(ech, _)| ech.expect);
                let bound = match e_best_negative {
                    None if e_best == 0.0 => MAX_SUPERIORITY,
                    None => -e_best.log10(),
                    Some(e_neg) => to_superiority(e_best, e_neg),
                };
                let call = if bound >= threshold {
                    Call::Accepted
                } else {
                    Call::Rejected
                };
                Classification::with_bound(call, bound)
            }
            other => unreachable!(
                "unexpected best echelon type {:?} for query {} after trimming",
                other, self.query
            ),
        }
    }
}
