use std::{fmt, num::NonZeroU32, ops::Deref};

use non_empty_string::NonEmptyString;
use serde::{Serialize, Serializer};

use super::{Destination, Grade};

/// The platform's identifier for a requisition.
///
/// This is the natural key of a listing and is never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequisitionId(NonEmptyString);

impl RequisitionId {
    /// Creates a new identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyIdError`] if the string is empty.
    pub fn new(id: String) -> Result<Self, EmptyIdError> {
        NonEmptyString::new(id).map(Self).map_err(|_| EmptyIdError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<&str> for RequisitionId {
    type Error = EmptyIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl Deref for RequisitionId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for RequisitionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for RequisitionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Error returned when a requisition identifier is empty.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
#[error("Requisition identifier must not be empty")]
pub struct EmptyIdError;

/// Summary of a loan requisition, as shown on the requisition list page.
///
/// Records are read-only once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Requisition {
    id: RequisitionId,
    url: String,
    grade: Grade,
    interest_rate: f64,
    score: u32,
    destination: Destination,
    term: u32,
    amount: f64,
    remaining_funding_amount: f64,
    loan_number: NonZeroU32,
}

impl Requisition {
    /// Construct a requisition from already-typed fields.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        id: RequisitionId,
        url: String,
        grade: Grade,
        interest_rate: f64,
        score: u32,
        destination: Destination,
        term: u32,
        amount: f64,
        remaining_funding_amount: f64,
        loan_number: NonZeroU32,
    ) -> Self {
        Self {
            id,
            url,
            grade,
            interest_rate,
            score,
            destination,
            term,
            amount,
            remaining_funding_amount,
            loan_number,
        }
    }

    /// The platform identifier of the requisition.
    #[must_use]
    pub const fn id(&self) -> &RequisitionId {
        &self.id
    }

    /// Address of the requisition's detail page.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Risk grade assigned by the platform.
    #[must_use]
    pub const fn grade(&self) -> Grade {
        self.grade
    }

    /// Annual interest rate, as a percentage (`17.5` rather than `0.175`).
    #[must_use]
    pub const fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    /// Credit score of the requisitioner.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Stated purpose of the loan.
    #[must_use]
    pub const fn destination(&self) -> Destination {
        self.destination
    }

    /// Loan term in months.
    #[must_use]
    pub const fn term(&self) -> u32 {
        self.term
    }

    /// Requested amount, in currency units.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.amount
    }

    /// Amount still to be funded when the listing was observed.
    #[must_use]
    pub const fn remaining_funding_amount(&self) -> f64 {
        self.remaining_funding_amount
    }

    /// Number of loans the requisitioner has previously repaid, plus one.
    #[must_use]
    pub const fn loan_number(&self) -> NonZeroU32 {
        self.loan_number
    }
}

impl AsRef<Self> for Requisition {
    fn as_ref(&self) -> &Self {
        self
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_id_is_rejected() {
        assert_eq!(RequisitionId::new(String::new()), Err(EmptyIdError));
        assert_eq!(RequisitionId::try_from("42").unwrap().as_str(), "42");
    }

    #[test]
    fn accessors_return_constructed_values() {
        let requisition = fixtures::requisition();
        assert_eq!(requisition.id().as_str(), "REQ-1001");
        assert_eq!(requisition.grade(), Grade::B3);
        assert!((requisition.interest_rate() - 17.5).abs() < f64::EPSILON);
        assert_eq!(requisition.score(), 620);
        assert_eq!(requisition.destination(), Destination::Car);
        assert_eq!(requisition.term(), 24);
        assert_eq!(requisition.loan_number().get(), 2);
    }

    #[test]
    fn serializes_with_flat_field_names() {
        let value = serde_json::to_value(fixtures::requisition()).unwrap();
        assert_eq!(value["id"], "REQ-1001");
        assert_eq!(value["grade"], "B3");
        assert_eq!(value["destination"], "Automóvil");
        assert_eq!(value["loan_number"], 2);
    }
}
