//! Closed categorical attributes of a requisition.
//!
//! Each category is parsed from the label the lending platform displays.
//! Labels are matched exactly (after uppercasing, for [`Education`]); a
//! non-empty label that is not declared here is an error rather than being
//! coerced to a fallback, so new upstream labels surface as parse failures
//! and get added as new variants.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Error returned when a raw label does not name any member of a category.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Unrecognised {category} '{label}'")]
pub struct UnknownLabel {
    category: &'static str,
    label: String,
}

impl UnknownLabel {
    pub(crate) fn new(category: &'static str, label: &str) -> Self {
        Self {
            category,
            label: label.to_string(),
        }
    }

    /// The name of the category the label was parsed as.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        self.category
    }

    /// The raw label that failed to parse.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Implements label lookup, `FromStr`, `Display` and label-based serde for a
/// category enum.
macro_rules! labelled {
    ($ty:ident, $category:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            /// Every member of the category, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The label the platform displays for this member.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            fn lookup(label: &str) -> Result<Self, UnknownLabel> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|member| member.label() == label)
                    .ok_or_else(|| UnknownLabel::new($category, label))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl TryFrom<String> for $ty {
            type Error = UnknownLabel;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for &'static str {
            fn from(value: $ty) -> Self {
                value.label()
            }
        }
    };
}

/// Stated purpose of the loan, according to the requisitioner.
///
/// Unordered: only equality is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Destination {
    /// Family expenses.
    Family,
    /// Paying off existing debts.
    PayDebts,
    /// Buying or repairing a vehicle.
    Car,
    /// Business investment.
    Business,
    /// Tuition and other education costs.
    Education,
    /// Housing purchase or improvement.
    Housing,
    /// Personal expenses.
    PersonalExpenses,
}

labelled!(Destination, "destination", {
    Family => "Familiar",
    PayDebts => "Pagar Deudas",
    Car => "Automóvil",
    Business => "Negocio",
    Education => "Educación",
    Housing => "Vivienda",
    PersonalExpenses => "Gastos Personales",
});

impl FromStr for Destination {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}

/// Highest education level of the requisitioner, ordered from `Unknown`
/// upwards.
///
/// The platform is inconsistent about capitalisation, so raw labels are
/// uppercased before lookup. An empty label parses as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Education {
    /// No education level was reported.
    Unknown,
    /// Technical school.
    Technician,
    /// Undergraduate degree.
    Professional,
    /// Master's degree.
    Masters,
    /// Doctorate.
    Phd,
}

labelled!(Education, "education level", {
    Unknown => "",
    Technician => "TÉCNICO",
    Professional => "PROFESIONAL",
    Masters => "MAESTRÍA",
    Phd => "DOCTORADO",
});

impl FromStr for Education {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(&s.to_uppercase()).map_err(|_| UnknownLabel::new("education level", s))
    }
}

/// Housing situation of the requisitioner. An empty label parses as
/// `Unknown`.
///
/// Some options imply similar repayment behaviour, so this is kept
/// categorical rather than ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Housing {
    /// No housing situation was reported.
    Unknown,
    /// Pays rent.
    Rented,
    /// Lives with family.
    LivesWithFamily,
    /// Owns their home.
    Owner,
}

labelled!(Housing, "housing", {
    Unknown => "",
    Rented => "Rentada",
    LivesWithFamily => "Vivo con familia",
    Owner => "Propietario",
});

impl FromStr for Housing {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}

/// Kind of occupation of the requisitioner. An empty label parses as
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum OccupationType {
    /// No occupation type was reported.
    Unknown,
    /// Salaried employee.
    Employee,
    /// Self-employed.
    Freelancer,
    /// Runs their own business.
    BusinessOwner,
}

labelled!(OccupationType, "occupation type", {
    Unknown => "",
    Employee => "Empleado",
    Freelancer => "Trabajo por mi cuenta",
    BusinessOwner => "Tengo un negocio",
});

impl FromStr for OccupationType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("Familiar", Destination::Family)]
    #[test_case("Pagar Deudas", Destination::PayDebts)]
    #[test_case("Automóvil", Destination::Car)]
    #[test_case("Gastos Personales", Destination::PersonalExpenses)]
    fn destination_parses_exact_labels(label: &str, expected: Destination) {
        assert_eq!(label.parse::<Destination>().unwrap(), expected);
        assert_eq!(expected.to_string(), label);
    }

    #[test]
    fn destination_has_no_unknown_member() {
        let error = "".parse::<Destination>().unwrap_err();
        assert_eq!(error.category(), "destination");
        assert!("automóvil".parse::<Destination>().is_err());
    }

    #[test]
    fn empty_labels_parse_as_unknown() {
        assert_eq!("".parse::<Housing>().unwrap(), Housing::Unknown);
        assert_eq!("".parse::<OccupationType>().unwrap(), OccupationType::Unknown);
        assert_eq!("".parse::<Education>().unwrap(), Education::Unknown);
    }

    #[test_case("Profesional", Education::Professional)]
    #[test_case("PROFESIONAL", Education::Professional)]
    #[test_case("Técnico", Education::Technician)]
    #[test_case("maestría", Education::Masters)]
    #[test_case("Doctorado", Education::Phd)]
    fn education_is_case_insensitive(label: &str, expected: Education) {
        assert_eq!(label.parse::<Education>().unwrap(), expected);
    }

    #[test]
    fn education_is_ordered() {
        assert!(Education::Unknown < Education::Technician);
        assert!(Education::Professional < Education::Masters);
        assert!(Education::Masters < Education::Phd);
    }

    #[test]
    fn unrecognised_labels_are_errors() {
        let housing = "Hipotecada".parse::<Housing>().unwrap_err();
        assert_eq!(housing.to_string(), "Unrecognised housing 'Hipotecada'");

        let occupation = "Jubilado".parse::<OccupationType>().unwrap_err();
        assert_eq!(occupation.category(), "occupation type");

        let education = "Preparatoria".parse::<Education>().unwrap_err();
        assert_eq!(education.label(), "Preparatoria");
    }

    #[test]
    fn housing_and_occupation_labels_are_case_sensitive() {
        assert!("rentada".parse::<Housing>().is_err());
        assert!("EMPLEADO".parse::<OccupationType>().is_err());
    }

    #[test]
    fn serde_uses_labels() {
        let housing: Vec<Housing> =
            serde_yaml::from_str("[Rentada, Propietario, '']").unwrap();
        assert_eq!(
            housing,
            vec![Housing::Rented, Housing::Owner, Housing::Unknown]
        );

        let yaml = serde_yaml::to_string(&Destination::Business).unwrap();
        assert_eq!(yaml.trim(), "Negocio");

        assert!(serde_yaml::from_str::<Destination>("Viajes").is_err());
    }
}
