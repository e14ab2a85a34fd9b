//! Per-query domain reports and the classification engine.

pub mod domain_report;
pub mod echelon;
pub mod reader;

pub use domain_report::{Call, Classification, DomainReport};
pub use echelon::{collect_echelons, to_superiority, Echelon, EchelonType};
pub use reader::DomainReportReader;
