//! Domain models for requisition filtering.
//!
//! This module contains the typed requisition records, their categorical
//! attributes, and the filters that select among them.

mod category;
pub use category::{Destination, Education, Housing, OccupationType, UnknownLabel};

mod grade;
pub use grade::Grade;

mod requisition;
pub use requisition::{EmptyIdError, Requisition, RequisitionId};

mod detailed;
pub use detailed::{DetailedRequisition, Details};

/// Optional range and category constraints used by filters.
pub mod criteria;
pub use criteria::{Bounds, Categories};

mod filter;
pub use filter::{DetailedFilter, Filter, Matches};

mod filter_set;
pub use filter_set::{FilterSet, filter_records};
