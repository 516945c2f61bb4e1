//! Loading filter sets from configuration documents.
//!
//! A filter document has a single required section, `filters`, holding an
//! ordered list of mappings from criterion name to value:
//!
//! ```yaml
//! filters:
//!   - minimum_risk_grade: A1
//!     maximum_risk_grade: B5
//!     minimum_score: 600
//!   - destination_whitelist: [Negocio]
//!     destination_blacklist: [Automóvil]
//! ```
//!
//! Keys that are not criteria of the filter kind being loaded are ignored, so
//! one document can serve both base and detailed filter sets. Any entry that
//! fails to bind aborts the whole load.

use std::{fs, io, path::Path};

use serde::{Deserialize, de::DeserializeOwned};

use super::format::{Format, FormatError};
use crate::domain::FilterSet;

#[derive(Debug, Deserialize)]
struct FilterDocument<F> {
    filters: Option<Vec<F>>,
}

impl<F: DeserializeOwned> FilterSet<F> {
    /// Loads a filter set from the document at `path`.
    ///
    /// The format is chosen from the file extension (see
    /// [`Format::from_path`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a valid document,
    /// has no `filters` section, or if any entry holds a value that cannot be
    /// bound to its criterion (such as an unrecognised category label).
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let format = Format::from_path(path);
        let content = fs::read_to_string(path)?;
        let filters = Self::parse(&content, format)?;

        tracing::debug!(
            "Loaded {} filters from {} ({format:?})",
            filters.len(),
            path.display()
        );

        Ok(filters)
    }

    /// Parses a filter set from document text.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed, has no `filters`
    /// section, or holds an entry that cannot be bound.
    pub fn parse(content: &str, format: Format) -> Result<Self, LoadError> {
        let document: FilterDocument<F> = format.parse(content)?;
        let filters = document
            .filters
            .ok_or(LoadError::MissingSection("filters"))?;
        Ok(Self::new(filters))
    }
}

/// Errors that can occur when loading a document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document could not be read.
    #[error("failed to read document: {0}")]
    Io(#[from] io::Error),
    /// The document could not be decoded.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// A required top-level section is absent or null.
    #[error("document has no `{0}` section")]
    MissingSection(&'static str),
}
