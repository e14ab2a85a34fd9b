//! Reference tables loaded once at startup and read-only afterwards.
//!
//! Load failure is fatal: the engine cannot produce meaningful
//! classifications without these tables, so the binary propagates the error
//! and exits before any report is processed.

pub mod coiness;
pub mod domain_lookup;

pub use coiness::{Coiness, CoinessTable};
pub use domain_lookup::DomainLookup;
