//! Building blocks shared by every filter criterion.

/// An optional inclusive range over a field.
///
/// Either side may be absent, meaning "no constraint on that side". An
/// absent bound is distinct from a bound of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds<T> {
    /// Smallest admitted value, if any.
    pub minimum: Option<T>,
    /// Largest admitted value, if any.
    pub maximum: Option<T>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T> Bounds<T> {
    /// A range with neither bound set.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            minimum: None,
            maximum: None,
        }
    }

    /// A range with only a lower bound.
    #[must_use]
    pub const fn at_least(minimum: T) -> Self {
        Self {
            minimum: Some(minimum),
            maximum: None,
        }
    }

    /// A range with only an upper bound.
    #[must_use]
    pub const fn at_most(maximum: T) -> Self {
        Self {
            minimum: None,
            maximum: Some(maximum),
        }
    }

    /// A range with both bounds.
    #[must_use]
    pub const fn between(minimum: T, maximum: T) -> Self {
        Self {
            minimum: Some(minimum),
            maximum: Some(maximum),
        }
    }

    /// Whether neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.minimum.is_none() && self.maximum.is_none()
    }
}

impl<T: PartialOrd> Bounds<T> {
    /// Tests a value against the range. Bounds are inclusive.
    ///
    /// The value is rejected only when a set bound is strictly exceeded, so
    /// a value that does not compare (a `NaN` rate) never fails a bound.
    #[must_use]
    pub fn admits(&self, value: &T) -> bool {
        if self.minimum.as_ref().is_some_and(|minimum| minimum > value) {
            return false;
        }
        !self.maximum.as_ref().is_some_and(|maximum| maximum < value)
    }
}

/// An optional whitelist and blacklist over a categorical field.
///
/// A value in both lists is rejected: the blacklist is consulted after the
/// whitelist and can still exclude a whitelisted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categories<T> {
    /// When set, only these values are admitted. An empty list admits
    /// nothing.
    pub whitelist: Option<Vec<T>>,
    /// When set, these values are rejected.
    pub blacklist: Option<Vec<T>>,
}

impl<T> Default for Categories<T> {
    fn default() -> Self {
        Self::any()
    }
}

impl<T> Categories<T> {
    /// No constraint on the category.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            whitelist: None,
            blacklist: None,
        }
    }

    /// Admit only the given values.
    #[must_use]
    pub const fn only(whitelist: Vec<T>) -> Self {
        Self {
            whitelist: Some(whitelist),
            blacklist: None,
        }
    }

    /// Admit everything except the given values.
    #[must_use]
    pub const fn except(blacklist: Vec<T>) -> Self {
        Self {
            whitelist: None,
            blacklist: Some(blacklist),
        }
    }

    /// Whether neither list is set.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        self.whitelist.is_none() && self.blacklist.is_none()
    }
}

impl<T: PartialEq> Categories<T> {
    /// Tests a value against both lists.
    #[must_use]
    pub fn admits(&self, value: &T) -> bool {
        if let Some(whitelist) = &self.whitelist {
            if !whitelist.contains(value) {
                return false;
            }
        }
        if let Some(blacklist) = &self.blacklist {
            if blacklist.contains(value) {
                return false;
            }
        }
        true
    }
}

/// Tests a field against an optional exact-match flag.
#[must_use]
pub fn flag_admits(flag: Option<bool>, value: bool) -> bool {
    flag.is_none_or(|expected| expected == value)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(Bounds::unbounded(), 0 => true; "unbounded")]
    #[test_case(Bounds::at_least(600), 600 => true; "minimum is inclusive")]
    #[test_case(Bounds::at_least(601), 600 => false; "minimum one above")]
    #[test_case(Bounds::at_most(600), 600 => true; "maximum is inclusive")]
    #[test_case(Bounds::at_most(599), 600 => false; "maximum one below")]
    #[test_case(Bounds::between(600, 600), 600 => true; "degenerate range")]
    #[test_case(Bounds::between(0, 10), 0 => true; "zero minimum is a real bound")]
    #[test_case(Bounds::between(1, 10), 0 => false; "below a non-zero minimum")]
    fn bounds(bounds: Bounds<u32>, value: u32) -> bool {
        bounds.admits(&value)
    }

    #[test]
    fn nan_never_fails_a_bound() {
        assert!(Bounds::between(1.0, 2.0).admits(&f64::NAN));
    }

    #[test]
    fn inverted_bounds_admit_nothing() {
        let bounds = Bounds::between(10, 5);
        assert!((0..20).all(|value| !bounds.admits(&value)));
    }

    #[test_case(Categories::any(), 'a' => true; "no lists")]
    #[test_case(Categories::only(vec!['a', 'b']), 'a' => true; "whitelisted")]
    #[test_case(Categories::only(vec!['b']), 'a' => false; "not whitelisted")]
    #[test_case(Categories::only(vec![]), 'a' => false; "empty whitelist")]
    #[test_case(Categories::except(vec!['a']), 'a' => false; "blacklisted")]
    #[test_case(Categories::except(vec![]), 'a' => true; "empty blacklist")]
    #[test_case(
        Categories { whitelist: Some(vec!['a', 'b']), blacklist: Some(vec!['a']) }, 'a' => false;
        "blacklist wins over whitelist"
    )]
    #[test_case(
        Categories { whitelist: Some(vec!['a', 'b']), blacklist: Some(vec!['a']) }, 'b' => true;
        "whitelisted and not blacklisted"
    )]
    fn categories(categories: Categories<char>, value: char) -> bool {
        categories.admits(&value)
    }

    #[test]
    fn flags_match_exactly_when_set() {
        assert!(flag_admits(None, true));
        assert!(flag_admits(None, false));
        assert!(flag_admits(Some(true), true));
        assert!(!flag_admits(Some(true), false));
        assert!(!flag_admits(Some(false), true));
    }

    #[test]
    fn unset_criteria_report_as_such() {
        assert!(Bounds::<u32>::default().is_unbounded());
        assert!(!Bounds::at_least(0).is_unbounded());
        assert!(Categories::<char>::default().is_any());
        assert!(!Categories::<char>::only(vec![]).is_any());
    }
}
