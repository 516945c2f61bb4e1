/// Document formats shared by filter and listing documents.
mod format;
pub use format::{Format, FormatError};

mod filters;
pub use filters::LoadError;

/// Raw requisition records and listing documents.
pub mod listing;
pub use listing::{
    RawDetailedRequisition, RawDetails, RawRequisition, RecordError, load_listing, parse_listing,
};
