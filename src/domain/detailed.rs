use std::ops::Deref;

use serde::Serialize;

use super::{Education, Housing, OccupationType, Requisition};

/// Fields that are only available on a requisition's detail page.
///
/// These describe the requisitioner's finances, credit history and
/// demographics. No personally identifiable information is included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Details {
    /// Calculated monthly payment, in currency units.
    pub monthly_payment: f64,
    /// Credit history length in years.
    pub credit_history_length: u32,
    /// Number of recent credit history inquiries.
    pub credit_history_inquiries: u32,
    /// Number of opened bank accounts.
    pub opened_accounts: u32,
    /// Declared total monthly income.
    pub total_income: f64,
    /// Declared total monthly expenses.
    pub total_expenses: f64,
    /// Age in years.
    pub age: u32,
    /// Number of economic dependents.
    pub dependents: u32,
    /// Whether the requisitioner has major medical insurance.
    pub has_major_medical_insurance: bool,
    /// Whether the requisitioner owns a vehicle.
    pub has_own_vehicle: bool,
    /// Highest education level.
    pub education: Education,
    /// State of residence, as free text.
    pub state_of_residence: String,
    /// Housing situation.
    pub housing: Housing,
    /// Job position as written by the requisitioner. May be empty.
    pub occupation: String,
    /// Years at the stated occupation.
    pub tenure: u32,
    /// Kind of occupation.
    pub occupation_type: OccupationType,
}

/// A fully detailed requisition: the summary record plus its [`Details`].
///
/// The summary is held by value, so every base field is present on the
/// detailed record with the value it was built from. Base accessors are
/// reachable through [`Deref`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedRequisition {
    #[serde(flatten)]
    requisition: Requisition,
    #[serde(flatten)]
    details: Details,
}

impl DetailedRequisition {
    /// Enrich a summary record with the fields read from its detail page.
    #[must_use]
    pub const fn new(requisition: Requisition, details: Details) -> Self {
        Self {
            requisition,
            details,
        }
    }

    /// The summary part of the record.
    #[must_use]
    pub const fn requisition(&self) -> &Requisition {
        &self.requisition
    }

    /// The detail-page part of the record.
    #[must_use]
    pub const fn details(&self) -> &Details {
        &self.details
    }

    /// Splits the record back into its summary and details.
    #[must_use]
    pub fn into_parts(self) -> (Requisition, Details) {
        (self.requisition, self.details)
    }

    /// Monthly income left after declared expenses.
    #[must_use]
    pub fn free_income(&self) -> f64 {
        self.details.total_income - self.details.total_expenses
    }
}

impl Deref for DetailedRequisition {
    type Target = Requisition;

    fn deref(&self) -> &Self::Target {
        &self.requisition
    }
}

impl AsRef<Requisition> for DetailedRequisition {
    fn as_ref(&self) -> &Requisition {
        &self.requisition
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{DetailedRequisition, Details};
    use crate::domain::{Education, Housing, OccupationType, requisition};

    pub(crate) fn details() -> Details {
        Details {
            monthly_payment: 780.0,
            credit_history_length: 6,
            credit_history_inquiries: 2,
            opened_accounts: 3,
            total_income: 22_000.0,
            total_expenses: 12_500.0,
            age: 34,
            dependents: 1,
            has_major_medical_insurance: true,
            has_own_vehicle: false,
            education: Education::Professional,
            state_of_residence: "Jalisco".to_string(),
            housing: Housing::Rented,
            occupation: "Contador".to_string(),
            tenure: 4,
            occupation_type: OccupationType::Employee,
        }
    }

    pub(crate) fn detailed() -> DetailedRequisition {
        DetailedRequisition::new(requisition::fixtures::requisition(), details())
    }
}
