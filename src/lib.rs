//! Loan requisition records and filter matching
//!
//! Requisitions scraped from a peer-to-peer lending platform are bound to
//! typed records, then selected by filter sets loaded from configuration
//! documents. A record is selected when it meets any filter of the set.
//!
//! ```
//! use requisitions::{Bounds, Filter, FilterSet, Format, Grade, Requisition};
//!
//! let filters = FilterSet::<Filter>::parse(
//!     "filters:\n  - maximum_risk_grade: B5\n    minimum_score: 600\n",
//!     Format::Yaml,
//! )
//! .unwrap();
//!
//! let listing: Vec<Requisition> = requisitions::parse_listing(
//!     r#"
//! requisitions:
//!   - id: "1001"
//!     url: https://example.com/requisitions/1001
//!     grade: B3
//!     interest_rate: 17.5%
//!     score: 620
//!     destination: Automóvil
//!     term: 24 meses
//!     amount: $15,000.00
//!     remaining_funding_amount: $6,500.00
//!     loan_number: 2
//! "#,
//!     Format::Yaml,
//! )
//! .unwrap();
//!
//! assert_eq!(filters.select(&listing).len(), 1);
//! assert_eq!(filters.iter().next().unwrap().risk_grade, Bounds::at_most(Grade::B5));
//! ```

pub mod domain;
pub use domain::{
    Bounds, Categories, Destination, DetailedFilter, DetailedRequisition, Details, Education,
    EmptyIdError, Filter, FilterSet, Grade, Housing, Matches, OccupationType, Requisition,
    RequisitionId, UnknownLabel, filter_records,
};

/// Loading filter sets and requisition listings from documents.
pub mod storage;
pub use storage::{Format, FormatError, LoadError, RecordError, load_listing, parse_listing};
