//! Raw requisition records, as handed over by the scraper.
//!
//! A listing document has one section, `requisitions`, holding a list of flat
//! records. Every field is optional at the syntax level so that a missing
//! value is reported as [`RecordError::MissingField`] when the typed record is
//! built, rather than defaulted.
//!
//! Numeric fields accept plain numbers or the text shown on the page
//! (`"$15,000.00"`, `"17.5%"`, `"24 meses"`); the first decimal number in
//! the text is used. Flags accept booleans or `Sí`/`Si`/`Yes`/`true` and
//! `No`/`false`. Category labels are trimmed before lookup. Education,
//! housing, occupation and occupation type may be absent or null, which
//! reads as the empty label (`Unknown`, or an empty occupation).

use std::{fs, num::NonZeroU32, path::Path, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};

use super::{
    filters::LoadError,
    format::Format,
};
use crate::domain::{
    DetailedRequisition, Details, EmptyIdError, Requisition, RequisitionId, UnknownLabel,
};

// The integer part is optional so that `"$.50"` reads as `0.5`.
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?(?:\d[\d,]*)?\.?\d+").expect("number pattern is valid"));

/// A numeric field as scraped: either a number or its displayed text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// Already numeric.
    Number(f64),
    /// Displayed text containing a number, such as `"$15,000.00"`.
    Text(String),
}

impl RawNumber {
    fn decimal(&self, field: &'static str) -> Result<f64, RecordError> {
        match self {
            Self::Number(number) => Ok(*number),
            Self::Text(text) => NUMBER
                .find(text)
                .and_then(|found| found.as_str().replace(',', "").parse().ok())
                .ok_or_else(|| RecordError::InvalidNumber {
                    field,
                    value: text.clone(),
                }),
        }
    }

    fn count(&self, field: &'static str) -> Result<u32, RecordError> {
        let decimal = self.decimal(field)?;
        if decimal.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&decimal) {
            return Err(RecordError::InvalidNumber {
                field,
                value: self.to_string(),
            });
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(decimal as u32)
    }
}

impl std::fmt::Display for RawNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A yes/no field as scraped: either a boolean or its displayed text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawFlag {
    /// Already boolean.
    Bool(bool),
    /// Displayed text, such as `"Sí"` or `"No"`.
    Text(String),
}

impl RawFlag {
    fn value(&self, field: &'static str) -> Result<bool, RecordError> {
        match self {
            Self::Bool(value) => Ok(*value),
            Self::Text(text) => match text.trim().to_lowercase().as_str() {
                "sí" | "si" | "yes" | "true" => Ok(true),
                "no" | "false" => Ok(false),
                _ => Err(RecordError::InvalidFlag {
                    field,
                    value: text.clone(),
                }),
            },
        }
    }
}

impl From<bool> for RawFlag {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Summary fields of a requisition before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct RawRequisition {
    pub id: Option<String>,
    pub url: Option<String>,
    pub grade: Option<String>,
    pub interest_rate: Option<RawNumber>,
    pub score: Option<RawNumber>,
    pub destination: Option<String>,
    pub term: Option<RawNumber>,
    pub amount: Option<RawNumber>,
    pub remaining_funding_amount: Option<RawNumber>,
    pub loan_number: Option<RawNumber>,
}

/// Detail-page fields of a requisition before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct RawDetails {
    pub monthly_payment: Option<RawNumber>,
    pub credit_history_length: Option<RawNumber>,
    pub credit_history_inquiries: Option<RawNumber>,
    pub opened_accounts: Option<RawNumber>,
    pub total_income: Option<RawNumber>,
    pub total_expenses: Option<RawNumber>,
    pub age: Option<RawNumber>,
    pub dependents: Option<RawNumber>,
    pub has_major_medical_insurance: Option<RawFlag>,
    pub has_own_vehicle: Option<RawFlag>,
    pub education: Option<String>,
    pub state_of_residence: Option<String>,
    pub housing: Option<String>,
    pub occupation: Option<String>,
    pub tenure: Option<RawNumber>,
    pub occupation_type: Option<String>,
}

/// A detailed requisition before validation: summary and detail fields side
/// by side in one flat record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDetailedRequisition {
    /// The summary fields.
    #[serde(flatten)]
    pub requisition: RawRequisition,
    /// The detail-page fields.
    #[serde(flatten)]
    pub details: RawDetails,
}

/// Errors raised when a raw record cannot be turned into a typed one.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    /// A field was not present in the raw record.
    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    /// A numeric field held no usable number.
    #[error("Invalid number in field '{field}': '{value}'")]
    InvalidNumber {
        /// The field name.
        field: &'static str,
        /// The raw value.
        value: String,
    },

    /// A yes/no field held an unrecognised value.
    #[error("Invalid flag in field '{field}': '{value}'")]
    InvalidFlag {
        /// The field name.
        field: &'static str,
        /// The raw value.
        value: String,
    },

    /// The loan number was zero.
    #[error("Invalid loan number: must be at least 1")]
    ZeroLoanNumber,

    /// The identifier was empty.
    #[error(transparent)]
    EmptyId(#[from] EmptyIdError),

    /// A category field held an unrecognised label.
    #[error(transparent)]
    Label(#[from] UnknownLabel),
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, RecordError> {
    value.ok_or(RecordError::MissingField(field))
}

fn label(value: Option<String>, field: &'static str) -> Result<String, RecordError> {
    required(value, field).map(|value| value.trim().to_string())
}

/// Like [`label`], but an absent or null value reads as the empty label.
fn label_or_empty(value: Option<String>) -> String {
    value.map(|value| value.trim().to_string()).unwrap_or_default()
}

impl TryFrom<RawRequisition> for Requisition {
    type Error = RecordError;

    fn try_from(raw: RawRequisition) -> Result<Self, Self::Error> {
        let id = RequisitionId::new(label(raw.id, "id")?)?;
        let loan_number = required(raw.loan_number, "loan_number")?.count("loan_number")?;

        Ok(Self::new(
            id,
            label(raw.url, "url")?,
            label(raw.grade, "grade")?.parse()?,
            required(raw.interest_rate, "interest_rate")?.decimal("interest_rate")?,
            required(raw.score, "score")?.count("score")?,
            label(raw.destination, "destination")?.parse()?,
            required(raw.term, "term")?.count("term")?,
            required(raw.amount, "amount")?.decimal("amount")?,
            required(raw.remaining_funding_amount, "remaining_funding_amount")?
                .decimal("remaining_funding_amount")?,
            NonZeroU32::new(loan_number).ok_or(RecordError::ZeroLoanNumber)?,
        ))
    }
}

impl TryFrom<RawDetails> for Details {
    type Error = RecordError;

    fn try_from(raw: RawDetails) -> Result<Self, Self::Error> {
        Ok(Self {
            monthly_payment: required(raw.monthly_payment, "monthly_payment")?
                .decimal("monthly_payment")?,
            credit_history_length: required(raw.credit_history_length, "credit_history_length")?
                .count("credit_history_length")?,
            credit_history_inquiries: required(
                raw.credit_history_inquiries,
                "credit_history_inquiries",
            )?
            .count("credit_history_inquiries")?,
            opened_accounts: required(raw.opened_accounts, "opened_accounts")?
                .count("opened_accounts")?,
            total_income: required(raw.total_income, "total_income")?.decimal("total_income")?,
            total_expenses: required(raw.total_expenses, "total_expenses")?
                .decimal("total_expenses")?,
            age: required(raw.age, "age")?.count("age")?,
            dependents: required(raw.dependents, "dependents")?.count("dependents")?,
            has_major_medical_insurance: required(
                raw.has_major_medical_insurance,
                "has_major_medical_insurance",
            )?
            .value("has_major_medical_insurance")?,
            has_own_vehicle: required(raw.has_own_vehicle, "has_own_vehicle")?
                .value("has_own_vehicle")?,
            education: label_or_empty(raw.education).parse()?,
            state_of_residence: label(raw.state_of_residence, "state_of_residence")?,
            housing: label_or_empty(raw.housing).parse()?,
            occupation: label_or_empty(raw.occupation),
            tenure: required(raw.tenure, "tenure")?.count("tenure")?,
            occupation_type: label_or_empty(raw.occupation_type).parse()?,
        })
    }
}

impl TryFrom<RawDetailedRequisition> for DetailedRequisition {
    type Error = RecordError;

    fn try_from(raw: RawDetailedRequisition) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.requisition.try_into()?, raw.details.try_into()?))
    }
}

impl<'de> Deserialize<'de> for Requisition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawRequisition::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for DetailedRequisition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawDetailedRequisition::deserialize(deserializer)?
            .try_into()
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Deserialize)]
struct ListingDocument<T> {
    requisitions: Option<Vec<T>>,
}

/// Parses the records of a listing document.
///
/// `T` is either a raw record type, to validate records one at a time, or a
/// typed record, in which case the first invalid record fails the parse.
///
/// # Errors
///
/// Returns an error if the document is malformed, has no `requisitions`
/// section, or holds a record that cannot be bound to `T`.
pub fn parse_listing<T: DeserializeOwned>(content: &str, format: Format) -> Result<Vec<T>, LoadError> {
    let document: ListingDocument<T> = format.parse(content)?;
    document
        .requisitions
        .ok_or(LoadError::MissingSection("requisitions"))
}

/// Loads the records of the listing document at `path`.
///
/// The format is chosen from the file extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if
/// [`parse_listing`] fails.
pub fn load_listing<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let format = Format::from_path(path);
    let content = fs::read_to_string(path)?;
    let records = parse_listing(&content, format)?;

    tracing::debug!(
        "Loaded {} requisitions from {} ({format:?})",
        records.len(),
        path.display()
    );

    Ok(records)
}
