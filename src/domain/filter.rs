//! Filter criteria and the matching rules that apply them to requisitions.
//!
//! A [`Filter`] constrains the summary fields of a [`Requisition`]; a
//! [`DetailedFilter`] embeds a [`Filter`] and adds criteria over the
//! [`Details`](super::Details) of a [`DetailedRequisition`]. Every criterion
//! is optional and all set criteria of one filter must hold together.
//!
//! Which record kinds a filter kind applies to is expressed through
//! [`Matches`]: a base filter applies to either record kind and only ever
//! sees summary fields, while a detailed filter applies to detailed records
//! only. Applying a detailed filter to a summary record does not compile.

use serde::{Deserialize, Serialize};

use super::{
    Destination, DetailedRequisition, Grade, Housing, OccupationType, Requisition,
    criteria::{Bounds, Categories, flag_admits},
};

/// Applies a filter of kind `F` to a record.
pub trait Matches<F> {
    /// Whether the record satisfies every criterion set on `filter`.
    ///
    /// Criteria are tested in declaration order and evaluation stops at the
    /// first unmet criterion.
    fn meets_filter(&self, filter: &F) -> bool;
}

/// Criteria over the summary fields of a requisition.
///
/// Built from a configuration document (see
/// [`FilterSet::load`](crate::FilterSet::load)) or directly:
///
/// ```
/// use requisitions::{Bounds, Filter, Grade};
///
/// let filter = Filter {
///     risk_grade: Bounds::between(Grade::A1, Grade::B5),
///     score: Bounds::at_least(600),
///     ..Filter::default()
/// };
/// assert!(!filter.is_unconstrained());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "FilterEntry", into = "FilterEntry")]
pub struct Filter {
    /// Admitted risk grades.
    pub risk_grade: Bounds<Grade>,
    /// Admitted credit scores.
    pub score: Bounds<u32>,
    /// Admitted interest rates, as percentages.
    pub interest_rate: Bounds<f64>,
    /// Admitted loan destinations.
    pub destination: Categories<Destination>,
    /// Admitted terms, in months.
    pub term: Bounds<u32>,
    /// Admitted requested amounts.
    pub amount: Bounds<f64>,
    /// Admitted amounts still to be funded.
    pub remaining_funding_amount: Bounds<f64>,
    /// Admitted loan numbers.
    pub loan_number: Bounds<u32>,
}

impl Filter {
    /// Configuration keys bound by a base filter.
    pub const CRITERIA: &'static [&'static str] = &[
        "minimum_risk_grade",
        "maximum_risk_grade",
        "minimum_score",
        "maximum_score",
        "minimum_interest_rate",
        "maximum_interest_rate",
        "destination_whitelist",
        "destination_blacklist",
        "minimum_term",
        "maximum_term",
        "minimum_amount",
        "maximum_amount",
        "minimum_remaining_funding_amount",
        "maximum_remaining_funding_amount",
        "minimum_loan_number",
        "maximum_loan_number",
    ];

    /// Whether every criterion is unset, so that every record matches.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.risk_grade.is_unbounded()
            && self.score.is_unbounded()
            && self.interest_rate.is_unbounded()
            && self.destination.is_any()
            && self.term.is_unbounded()
            && self.amount.is_unbounded()
            && self.remaining_funding_amount.is_unbounded()
            && self.loan_number.is_unbounded()
    }

    /// The configuration keys that are set on this filter, in declaration
    /// order.
    #[must_use]
    pub fn constrained_criteria(&self) -> Vec<&'static str> {
        set_keys(
            Self::CRITERIA,
            &[
                self.risk_grade.minimum.is_some(),
                self.risk_grade.maximum.is_some(),
                self.score.minimum.is_some(),
                self.score.maximum.is_some(),
                self.interest_rate.minimum.is_some(),
                self.interest_rate.maximum.is_some(),
                self.destination.whitelist.is_some(),
                self.destination.blacklist.is_some(),
                self.term.minimum.is_some(),
                self.term.maximum.is_some(),
                self.amount.minimum.is_some(),
                self.amount.maximum.is_some(),
                self.remaining_funding_amount.minimum.is_some(),
                self.remaining_funding_amount.maximum.is_some(),
                self.loan_number.minimum.is_some(),
                self.loan_number.maximum.is_some(),
            ],
        )
    }
}

impl Matches<Filter> for Requisition {
    fn meets_filter(&self, filter: &Filter) -> bool {
        filter.risk_grade.admits(&self.grade())
            && filter.score.admits(&self.score())
            && filter.interest_rate.admits(&self.interest_rate())
            && filter.destination.admits(&self.destination())
            && filter.term.admits(&self.term())
            && filter.amount.admits(&self.amount())
            && filter
                .remaining_funding_amount
                .admits(&self.remaining_funding_amount())
            && filter.loan_number.admits(&self.loan_number().get())
    }
}

impl Matches<Filter> for DetailedRequisition {
    /// Only summary criteria exist on a base filter, so the details are never
    /// consulted.
    fn meets_filter(&self, filter: &Filter) -> bool {
        self.requisition().meets_filter(filter)
    }
}

/// Criteria over every field of a detailed requisition.
///
/// The embedded [`base`](Self::base) filter is evaluated first; the detail
/// criteria are only consulted if it passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "DetailedFilterEntry", into = "DetailedFilterEntry")]
pub struct DetailedFilter {
    /// Criteria over the summary fields.
    pub base: Filter,
    /// Admitted monthly payments.
    pub monthly_payment: Bounds<f64>,
    /// Admitted credit history lengths, in years.
    pub credit_history_length: Bounds<u32>,
    /// Admitted numbers of credit history inquiries.
    pub credit_history_inquiries: Bounds<u32>,
    /// Admitted numbers of opened accounts.
    pub opened_accounts: Bounds<u32>,
    /// Admitted total incomes.
    pub total_income: Bounds<f64>,
    /// Admitted total expenses.
    pub total_expenses: Bounds<f64>,
    /// Admitted ages.
    pub age: Bounds<u32>,
    /// Admitted numbers of dependents.
    pub dependents: Bounds<u32>,
    /// Required major medical insurance status, if any.
    pub has_major_medical_insurance: Option<bool>,
    /// Required vehicle ownership status, if any.
    pub has_own_vehicle: Option<bool>,
    /// Admitted housing situations.
    pub housing: Categories<Housing>,
    /// Admitted tenures at the stated occupation, in years.
    pub tenure: Bounds<u32>,
    /// Admitted occupation types.
    pub occupation_type: Categories<OccupationType>,
}

impl DetailedFilter {
    /// Configuration keys bound by the detail criteria. None of these may
    /// also appear in [`Filter::CRITERIA`].
    pub const CRITERIA: &'static [&'static str] = &[
        "minimum_monthly_payment",
        "maximum_monthly_payment",
        "minimum_credit_history_length",
        "maximum_credit_history_length",
        "minimum_credit_history_inquiries",
        "maximum_credit_history_inquiries",
        "minimum_opened_accounts",
        "maximum_opened_accounts",
        "minimum_total_income",
        "maximum_total_income",
        "minimum_total_expenses",
        "maximum_total_expenses",
        "minimum_age",
        "maximum_age",
        "minimum_dependents",
        "maximum_dependents",
        "has_major_medical_insurance",
        "has_own_vehicle",
        "housing_whitelist",
        "housing_blacklist",
        "minimum_tenure",
        "maximum_tenure",
        "occupation_type_whitelist",
        "occupation_type_blacklist",
    ];

    /// Wraps a base filter with no detail criteria set.
    #[must_use]
    pub fn from_base(base: Filter) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Whether every criterion, base and detail, is unset.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.base.is_unconstrained()
            && self.monthly_payment.is_unbounded()
            && self.credit_history_length.is_unbounded()
            && self.credit_history_inquiries.is_unbounded()
            && self.opened_accounts.is_unbounded()
            && self.total_income.is_unbounded()
            && self.total_expenses.is_unbounded()
            && self.age.is_unbounded()
            && self.dependents.is_unbounded()
            && self.has_major_medical_insurance.is_none()
            && self.has_own_vehicle.is_none()
            && self.housing.is_any()
            && self.tenure.is_unbounded()
            && self.occupation_type.is_any()
    }

    /// The configuration keys that are set on this filter, base keys first.
    #[must_use]
    pub fn constrained_criteria(&self) -> Vec<&'static str> {
        let mut keys = self.base.constrained_criteria();
        keys.extend(set_keys(
            Self::CRITERIA,
            &[
                self.monthly_payment.minimum.is_some(),
                self.monthly_payment.maximum.is_some(),
                self.credit_history_length.minimum.is_some(),
                self.credit_history_length.maximum.is_some(),
                self.credit_history_inquiries.minimum.is_some(),
                self.credit_history_inquiries.maximum.is_some(),
                self.opened_accounts.minimum.is_some(),
                self.opened_accounts.maximum.is_some(),
                self.total_income.minimum.is_some(),
                self.total_income.maximum.is_some(),
                self.total_expenses.minimum.is_some(),
                self.total_expenses.maximum.is_some(),
                self.age.minimum.is_some(),
                self.age.maximum.is_some(),
                self.dependents.minimum.is_some(),
                self.dependents.maximum.is_some(),
                self.has_major_medical_insurance.is_some(),
                self.has_own_vehicle.is_some(),
                self.housing.whitelist.is_some(),
                self.housing.blacklist.is_some(),
                self.tenure.minimum.is_some(),
                self.tenure.maximum.is_some(),
                self.occupation_type.whitelist.is_some(),
                self.occupation_type.blacklist.is_some(),
            ],
        ));
        keys
    }
}

impl From<Filter> for DetailedFilter {
    fn from(base: Filter) -> Self {
        Self::from_base(base)
    }
}

impl Matches<DetailedFilter> for DetailedRequisition {
    fn meets_filter(&self, filter: &DetailedFilter) -> bool {
        if !self.requisition().meets_filter(&filter.base) {
            return false;
        }

        let details = self.details();
        filter.monthly_payment.admits(&details.monthly_payment)
            && filter
                .credit_history_length
                .admits(&details.credit_history_length)
            && filter
                .credit_history_inquiries
                .admits(&details.credit_history_inquiries)
            && filter.opened_accounts.admits(&details.opened_accounts)
            && filter.total_income.admits(&details.total_income)
            && filter.total_expenses.admits(&details.total_expenses)
            && filter.age.admits(&details.age)
            && filter.dependents.admits(&details.dependents)
            && flag_admits(
                filter.has_major_medical_insurance,
                details.has_major_medical_insurance,
            )
            && flag_admits(filter.has_own_vehicle, details.has_own_vehicle)
            && filter.housing.admits(&details.housing)
            && filter.tenure.admits(&details.tenure)
            && filter.occupation_type.admits(&details.occupation_type)
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn disjoint(a: &[&str], b: &[&str]) -> bool {
    let mut i = 0;
    while i < a.len() {
        let mut j = 0;
        while j < b.len() {
            if str_eq(a[i], b[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

// A detail key shadowing a base key would be silently claimed by one side
// when a document is bound, so an overlap is rejected at build time.
const _: () = assert!(
    disjoint(Filter::CRITERIA, DetailedFilter::CRITERIA),
    "detailed filter criteria must not shadow base filter criteria"
);

/// Returns the keys from `criteria` whose criterion is set, where `set` lists
/// one flag per key in the same order.
fn set_keys(criteria: &[&'static str], set: &[bool]) -> Vec<&'static str> {
    debug_assert_eq!(criteria.len(), set.len());
    criteria
        .iter()
        .zip(set)
        .filter(|(_, set)| **set)
        .map(|(key, _)| *key)
        .collect()
}

/// The flat configuration shape of a [`Filter`].
///
/// Unknown keys are ignored and omitted keys leave their criterion unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct FilterEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_risk_grade: Option<Grade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_risk_grade: Option<Grade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination_whitelist: Option<Vec<Destination>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination_blacklist: Option<Vec<Destination>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_term: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_term: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_remaining_funding_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_remaining_funding_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_loan_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_loan_number: Option<u32>,
}

const fn bounds<T>(minimum: Option<T>, maximum: Option<T>) -> Bounds<T> {
    Bounds { minimum, maximum }
}

const fn categories<T>(whitelist: Option<Vec<T>>, blacklist: Option<Vec<T>>) -> Categories<T> {
    Categories {
        whitelist,
        blacklist,
    }
}

impl From<FilterEntry> for Filter {
    fn from(entry: FilterEntry) -> Self {
        Self {
            risk_grade: bounds(entry.minimum_risk_grade, entry.maximum_risk_grade),
            score: bounds(entry.minimum_score, entry.maximum_score),
            interest_rate: bounds(entry.minimum_interest_rate, entry.maximum_interest_rate),
            destination: categories(entry.destination_whitelist, entry.destination_blacklist),
            term: bounds(entry.minimum_term, entry.maximum_term),
            amount: bounds(entry.minimum_amount, entry.maximum_amount),
            remaining_funding_amount: bounds(
                entry.minimum_remaining_funding_amount,
                entry.maximum_remaining_funding_amount,
            ),
            loan_number: bounds(entry.minimum_loan_number, entry.maximum_loan_number),
        }
    }
}

impl From<Filter> for FilterEntry {
    fn from(filter: Filter) -> Self {
        Self {
            minimum_risk_grade: filter.risk_grade.minimum,
            maximum_risk_grade: filter.risk_grade.maximum,
            minimum_score: filter.score.minimum,
            maximum_score: filter.score.maximum,
            minimum_interest_rate: filter.interest_rate.minimum,
            maximum_interest_rate: filter.interest_rate.maximum,
            destination_whitelist: filter.destination.whitelist,
            destination_blacklist: filter.destination.blacklist,
            minimum_term: filter.term.minimum,
            maximum_term: filter.term.maximum,
            minimum_amount: filter.amount.minimum,
            maximum_amount: filter.amount.maximum,
            minimum_remaining_funding_amount: filter.remaining_funding_amount.minimum,
            maximum_remaining_funding_amount: filter.remaining_funding_amount.maximum,
            minimum_loan_number: filter.loan_number.minimum,
            maximum_loan_number: filter.loan_number.maximum,
        }
    }
}

/// The flat configuration shape of a [`DetailedFilter`].
///
/// Base keys are claimed by the flattened [`FilterEntry`]; the rest are
/// matched against the detail keys below.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct DetailedFilterEntry {
    #[serde(flatten)]
    base: FilterEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_monthly_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_monthly_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_credit_history_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_credit_history_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_credit_history_inquiries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_credit_history_inquiries: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_opened_accounts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_opened_accounts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_total_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_total_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_total_expenses: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_total_expenses: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_dependents: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_dependents: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    has_major_medical_insurance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    has_own_vehicle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    housing_whitelist: Option<Vec<Housing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    housing_blacklist: Option<Vec<Housing>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_tenure: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maximum_tenure: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    occupation_type_whitelist: Option<Vec<OccupationType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    occupation_type_blacklist: Option<Vec<OccupationType>>,
}

impl From<DetailedFilterEntry> for DetailedFilter {
    fn from(entry: DetailedFilterEntry) -> Self {
        Self {
            base: entry.base.into(),
            monthly_payment: bounds(entry.minimum_monthly_payment, entry.maximum_monthly_payment),
            credit_history_length: bounds(
                entry.minimum_credit_history_length,
                entry.maximum_credit_history_length,
            ),
            credit_history_inquiries: bounds(
                entry.minimum_credit_history_inquiries,
                entry.maximum_credit_history_inquiries,
            ),
            opened_accounts: bounds(entry.minimum_opened_accounts, entry.maximum_opened_accounts),
            total_income: bounds(entry.minimum_total_income, entry.maximum_total_income),
            total_expenses: bounds(entry.minimum_total_expenses, entry.maximum_total_expenses),
            age: bounds(entry.minimum_age, entry.maximum_age),
            dependents: bounds(entry.minimum_dependents, entry.maximum_dependents),
            has_major_medical_insurance: entry.has_major_medical_insurance,
            has_own_vehicle: entry.has_own_vehicle,
            housing: categories(entry.housing_whitelist, entry.housing_blacklist),
            tenure: bounds(entry.minimum_tenure, entry.maximum_tenure),
            occupation_type: categories(
                entry.occupation_type_whitelist,
                entry.occupation_type_blacklist,
            ),
        }
    }
}

impl From<DetailedFilter> for DetailedFilterEntry {
    fn from(filter: DetailedFilter) -> Self {
        Self {
            base: filter.base.into(),
            minimum_monthly_payment: filter.monthly_payment.minimum,
            maximum_monthly_payment: filter.monthly_payment.maximum,
            minimum_credit_history_length: filter.credit_history_length.minimum,
            maximum_credit_history_length: filter.credit_history_length.maximum,
            minimum_credit_history_inquiries: filter.credit_history_inquiries.minimum,
            maximum_credit_history_inquiries: filter.credit_history_inquiries.maximum,
            minimum_opened_accounts: filter.opened_accounts.minimum,
            maximum_opened_accounts: filter.opened_accounts.maximum,
            minimum_total_income: filter.total_income.minimum,
            maximum_total_income: filter.total_income.maximum,
            minimum_total_expenses: filter.total_expenses.minimum,
            maximum_total_expenses: filter.total_expenses.maximum,
            minimum_age: filter.age.minimum,
            maximum_age: filter.age.maximum,
            minimum_dependents: filter.dependents.minimum,
            maximum_dependents: filter.dependents.maximum,
            has_major_medical_insurance: filter.has_major_medical_insurance,
            has_own_vehicle: filter.has_own_vehicle,
            housing_whitelist: filter.housing.whitelist,
            housing_blacklist: filter.housing.blacklist,
            minimum_tenure: filter.tenure.minimum,
            maximum_tenure: filter.tenure.maximum,
            occupation_type_whitelist: filter.occupation_type.whitelist,
            occupation_type_blacklist: filter.occupation_type.blacklist,
        }
    }
}
