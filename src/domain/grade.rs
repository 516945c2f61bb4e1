use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::category::UnknownLabel;

/// Platform-assigned risk tier of a requisition.
///
/// `A1` carries the lowest risk of default (and the lowest interest rate),
/// `C7` the highest. Variants are declared in risk order, so the derived
/// [`Ord`] compares grades by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Grade {
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
    C1,
    C2,
    C3,
    C4,
    C5,
    C6,
    C7,
}

impl Grade {
    /// Every grade, from lowest to highest risk.
    pub const ALL: [Self; 21] = [
        Self::A1,
        Self::A2,
        Self::A3,
        Self::A4,
        Self::A5,
        Self::A6,
        Self::A7,
        Self::B1,
        Self::B2,
        Self::B3,
        Self::B4,
        Self::B5,
        Self::B6,
        Self::B7,
        Self::C1,
        Self::C2,
        Self::C3,
        Self::C4,
        Self::C5,
        Self::C6,
        Self::C7,
    ];

    /// Ordinal position of the grade, `0` for `A1` up to `20` for `C7`.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Looks a grade up by its ordinal rank.
    #[must_use]
    pub const fn from_rank(rank: u8) -> Option<Self> {
        if (rank as usize) < Self::ALL.len() {
            Some(Self::ALL[rank as usize])
        } else {
            None
        }
    }

    /// The two-character code used by the platform, e.g. `"B3"`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        const CODES: [&str; 21] = [
            "A1", "A2", "A3", "A4", "A5", "A6", "A7", "B1", "B2", "B3", "B4", "B5", "B6", "B7",
            "C1", "C2", "C3", "C4", "C5", "C6", "C7",
        ];
        CODES[self as usize]
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Grade {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|grade| grade.code() == s)
            .ok_or_else(|| UnknownLabel::new("risk grade", s))
    }
}

impl TryFrom<&str> for Grade {
    type Error = UnknownLabel;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Grades are written either as codes (`B3`) or as ordinal ranks (`9`).
#[derive(Deserialize)]
#[serde(untagged)]
enum GradeRepr {
    Code(String),
    Rank(u64),
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match GradeRepr::deserialize(deserializer)? {
            GradeRepr::Code(code) => code.parse().map_err(serde::de::Error::custom),
            GradeRepr::Rank(rank) => u8::try_from(rank)
                .ok()
                .and_then(Self::from_rank)
                .ok_or_else(|| {
                    serde::de::Error::custom(UnknownLabel::new("risk grade", &rank.to_string()))
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn grades_are_ordered_by_risk() {
        assert!(Grade::A1 < Grade::A2);
        assert!(Grade::A7 < Grade::B1);
        assert!(Grade::B7 < Grade::C1);
        assert_eq!(Grade::ALL.iter().max(), Some(&Grade::C7));
    }

    #[test]
    fn rank_matches_position() {
        for (position, grade) in Grade::ALL.into_iter().enumerate() {
            assert_eq!(usize::from(grade.rank()), position);
            assert_eq!(Grade::from_rank(grade.rank()), Some(grade));
        }
        assert_eq!(Grade::from_rank(21), None);
    }

    #[test_case("A1", Grade::A1)]
    #[test_case("B3", Grade::B3)]
    #[test_case("C7", Grade::C7)]
    fn parses_known_codes(code: &str, expected: Grade) {
        assert_eq!(code.parse::<Grade>().unwrap(), expected);
        assert_eq!(expected.to_string(), code);
    }

    #[test_case(""; "empty")]
    #[test_case("a1"; "lowercase")]
    #[test_case("C8"; "past the last grade")]
    #[test_case("D1"; "unknown tier")]
    fn rejects_unknown_codes(code: &str) {
        let error = code.parse::<Grade>().unwrap_err();
        assert_eq!(error.label(), code);
    }

    #[test]
    fn deserializes_codes_and_ranks() {
        let by_code: Grade = serde_yaml::from_str("B5").unwrap();
        let by_rank: Grade = serde_yaml::from_str("11").unwrap();
        assert_eq!(by_code, Grade::B5);
        assert_eq!(by_rank, Grade::B5);
    }

    #[test]
    fn rejects_out_of_range_rank() {
        assert!(serde_yaml::from_str::<Grade>("21").is_err());
        assert!(serde_yaml::from_str::<Grade>("300").is_err());
    }
}
