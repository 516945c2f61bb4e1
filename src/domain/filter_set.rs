use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use super::filter::Matches;

/// An ordered collection of filters combined by union.
///
/// A record is selected when it meets *any* of the filters. An empty set
/// selects nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSet<F> {
    filters: Vec<F>,
}

impl<F> Default for FilterSet<F> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
        }
    }
}

impl<F> FilterSet<F> {
    /// Creates a filter set from filters in evaluation order.
    #[must_use]
    pub const fn new(filters: Vec<F>) -> Self {
        Self { filters }
    }

    /// The number of filters in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the set holds no filters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Iterates over the filters in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, F> {
        self.filters.iter()
    }

    /// Consumes the set, returning the filters.
    #[must_use]
    pub fn into_inner(self) -> Vec<F> {
        self.filters
    }

    /// Whether `record` meets at least one filter.
    ///
    /// Filters are tried in order and evaluation stops at the first match.
    pub fn admits<R: Matches<F>>(&self, record: &R) -> bool {
        self.filters.iter().any(|filter| record.meets_filter(filter))
    }

    /// Selects the records meeting at least one filter, preserving their
    /// order.
    pub fn select<'a, R: Matches<F>>(&self, records: &'a [R]) -> Vec<&'a R> {
        filter_records(records, &self.filters)
    }

    /// Same as [`select`](Self::select), with records tested in parallel.
    pub fn par_select<'a, R>(&self, records: &'a [R]) -> Vec<&'a R>
    where
        R: Matches<F> + Sync,
        F: Sync,
    {
        if self.filters.is_empty() {
            return Vec::new();
        }

        let selected: Vec<&R> = records
            .par_iter()
            .filter(|record| self.admits(*record))
            .collect();

        tracing::debug!(
            "Selected {} of {} records with {} filters",
            selected.len(),
            records.len(),
            self.filters.len()
        );

        selected
    }
}

impl<F> From<Vec<F>> for FilterSet<F> {
    fn from(filters: Vec<F>) -> Self {
        Self::new(filters)
    }
}

impl<F> FromIterator<F> for FilterSet<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, F> IntoIterator for &'a FilterSet<F> {
    type Item = &'a F;
    type IntoIter = std::slice::Iter<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

/// Selects the records that meet at least one of `filters`.
///
/// The result is the union of the records matched by each filter, in the
/// order the records were given. With no filters the result is empty.
pub fn filter_records<'a, R, F>(records: &'a [R], filters: &[F]) -> Vec<&'a R>
where
    R: Matches<F>,
{
    let selected: Vec<&R> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| filters.iter().any(|filter| record.meets_filter(filter)))
        .map(|(index, record)| {
            tracing::trace!("Record {index} meets a filter");
            record
        })
        .collect();

    tracing::debug!(
        "Selected {} of {} records with {} filters",
        selected.len(),
        records.len(),
        filters.len()
    );

    selected
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::domain::{
        Bounds, Categories, Destination, DetailedFilter, DetailedRequisition, Filter, Grade,
        Requisition, RequisitionId, detailed,
    };

    fn requisition(id: &str, grade: Grade, score: u32, destination: Destination) -> Requisition {
        Requisition::new(
            RequisitionId::try_from(id).unwrap(),
            format!("https://example.com/requisitions/{id}"),
            grade,
            15.0,
            score,
            destination,
            12,
            10_000.0,
            10_000.0,
            std::num::NonZeroU32::MIN,
        )
    }

    fn records() -> Vec<Requisition> {
        vec![
            requisition("1", Grade::A2, 710, Destination::Business),
            requisition("2", Grade::B3, 620, Destination::Car),
            requisition("3", Grade::C5, 540, Destination::PayDebts),
            requisition("4", Grade::B7, 650, Destination::Family),
        ]
    }

    fn ids(selected: &[&Requisition]) -> Vec<String> {
        selected.iter().map(|record| record.id().to_string()).collect()
    }

    fn low_risk() -> Filter {
        Filter {
            risk_grade: Bounds::at_most(Grade::A7),
            ..Filter::default()
        }
    }

    fn car_loans() -> Filter {
        Filter {
            destination: Categories::only(vec![Destination::Car]),
            ..Filter::default()
        }
    }

    #[test]
    fn empty_set_selects_nothing() {
        let set = FilterSet::<Filter>::default();
        assert!(set.is_empty());
        assert!(set.select(&records()).is_empty());
        assert!(set.par_select(&records()).is_empty());
        assert!(filter_records::<Requisition, Filter>(&records(), &[]).is_empty());
    }

    #[test]
    fn unconstrained_filter_selects_everything() {
        let set = FilterSet::new(vec![Filter::default()]);
        assert_eq!(set.select(&records()).len(), 4);
    }

    #[test]
    fn filters_combine_by_union() {
        let records = records();
        let first: BTreeSet<_> = ids(&filter_records(&records, &[low_risk()]))
            .into_iter()
            .collect();
        let second: BTreeSet<_> = ids(&filter_records(&records, &[car_loans()]))
            .into_iter()
            .collect();
        let both: BTreeSet<_> = ids(&filter_records(&records, &[low_risk(), car_loans()]))
            .into_iter()
            .collect();

        assert_eq!(both, first.union(&second).cloned().collect());
        assert_eq!(both, BTreeSet::from(["1".to_string(), "2".to_string()]));
    }

    #[test]
    fn selection_preserves_record_order() {
        let records = records();
        let set: FilterSet<Filter> = [car_loans(), low_risk()].into_iter().collect();
        assert_eq!(ids(&set.select(&records)), vec!["1", "2"]);
    }

    #[test]
    fn parallel_selection_matches_sequential() {
        let records: Vec<Requisition> = (0..200_u32)
            .map(|i| {
                requisition(
                    &i.to_string(),
                    Grade::ALL[(i % 21) as usize],
                    500 + i,
                    Destination::ALL[(i % 7) as usize],
                )
            })
            .collect();
        let set = FilterSet::new(vec![low_risk(), car_loans()]);

        assert_eq!(set.par_select(&records), set.select(&records));
    }

    #[test]
    fn admits_short_circuits_on_first_match() {
        let set = FilterSet::new(vec![low_risk(), car_loans()]);
        let records = records();
        assert!(set.admits(&records[0]));
        assert!(set.admits(&records[1]));
        assert!(!set.admits(&records[2]));
    }

    #[test]
    fn detailed_sets_select_detailed_records() {
        let record = detailed::fixtures::detailed();
        let records: Vec<DetailedRequisition> = vec![record];

        let base = FilterSet::new(vec![car_loans()]);
        assert_eq!(base.select(&records).len(), 1);

        let mut detailed_filter = DetailedFilter::from(car_loans());
        detailed_filter.age = Bounds::at_least(40);
        let detailed = FilterSet::new(vec![detailed_filter]);
        assert!(detailed.select(&records).is_empty());
    }
}
