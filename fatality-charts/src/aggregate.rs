use std::collections::BTreeMap;

use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use crate::{dataset::Dataset, dimension::Dimension};

/// Summary of the recorded ages within one group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgeSummary {
    /// Rows with a recorded age.
    pub known: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AgeSummary {
    fn from_ages(ages: &[f64]) -> Self {
        let (min, max) = match ages.iter().copied().minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => (None, None),
            MinMaxResult::OneElement(age) => (Some(age), Some(age)),
            MinMaxResult::MinMax(min, max) => (Some(min), Some(max)),
        };
        Self {
            known: ages.len(),
            mean: (!ages.is_empty()).then(|| ages.iter().sum::<f64>() / ages.len() as f64),
            min,
            max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub key: String,
    /// Number of rows in the group, one per fatality.
    pub fatalities: usize,
    pub age: AgeSummary,
    /// Fatalities per road user role, most frequent first.
    pub road_users: Vec<(String, usize)>,
    /// Fatalities per speed limit zone, most frequent first.
    pub speed_limits: Vec<(String, usize)>,
}

/// Tallies ordered by count, ties broken by name.
fn ranked(tally: BTreeMap<String, usize>) -> Vec<(String, usize)> {
    tally
        .into_iter()
        .sorted_by(|(a_name, a), (b_name, b)| b.cmp(a).then_with(|| a_name.cmp(b_name)))
        .collect()
}

#[derive(Default)]
struct GroupBuilder {
    fatalities: usize,
    ages: Vec<f64>,
    road_users: BTreeMap<String, usize>,
    speed_limits: BTreeMap<String, usize>,
}

impl GroupBuilder {
    fn finish(self, key: String) -> Group {
        Group {
            key,
            fatalities: self.fatalities,
            age: AgeSummary::from_ages(&self.ages),
            road_users: ranked(self.road_users),
            speed_limits: ranked(self.speed_limits),
        }
    }
}

/// The dataset partitioned by the text value of one dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedAggregate {
    pub dimension: Dimension,
    /// Groups in ascending key order.
    pub groups: Vec<Group>,
}

impl GroupedAggregate {
    pub fn group_by(dataset: &Dataset, dimension: Dimension) -> Self {
        let mut builders: BTreeMap<String, GroupBuilder> = BTreeMap::new();
        for (key, record) in dataset.column(dimension).zip(dataset.records()) {
            let builder = builders.entry(key.into_owned()).or_default();
            builder.fatalities += 1;
            if let Some(age) = record.known_age() {
                builder.ages.push(age);
            }
            if let Some(role) = record.road_user() {
                *builder.road_users.entry(role.to_string()).or_default() += 1;
            }
            if let Some(limit) = record.speed_limit() {
                *builder.speed_limits.entry(limit.to_string()).or_default() += 1;
            }
        }
        Self {
            dimension,
            groups: builders
                .into_iter()
                .map(|(key, builder)| builder.finish(key))
                .collect(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.groups.iter().map(|g| g.fatalities)
    }

    pub fn total(&self) -> usize {
        self.counts().sum()
    }

    /// Smallest and largest group count, `None` without groups.
    pub fn count_range(&self) -> Option<(usize, usize)> {
        self.counts().minmax().into_option()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::sample;

    #[test]
    fn groups_cover_every_row() {
        let dataset = sample();
        for dimension in Dimension::ALL {
            let grouped = GroupedAggregate::group_by(&dataset, dimension);
            assert_eq!(grouped.total(), dataset.len(), "{dimension}");
        }
    }

    #[test]
    fn years_ascend() {
        let grouped = GroupedAggregate::group_by(&sample(), Dimension::Year);
        assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["2017", "2018", "2019"]);
        assert_eq!(grouped.counts().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn month_keys_sort_as_text() {
        let grouped = GroupedAggregate::group_by(&sample(), Dimension::Month);
        assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["1", "12", "2"]);
        assert_eq!(grouped.count_range(), Some((2, 2)));
    }

    #[test]
    fn summarises_ages_and_roles() {
        let grouped = GroupedAggregate::group_by(&sample(), Dimension::State);
        let nsw = &grouped.groups[0];
        assert_eq!(nsw.key, "NSW");
        assert_eq!(nsw.fatalities, 2);
        assert_eq!(nsw.age.known, 1);
        assert_eq!(nsw.age.mean, Some(45.0));
        assert_eq!(
            nsw.road_users,
            vec![("Driver".to_string(), 1), ("Passenger".to_string(), 1)]
        );

        assert_eq!(nsw.speed_limits, vec![("100".to_string(), 2)]);

        let vic = &grouped.groups[2];
        assert_eq!(vic.speed_limits, vec![("60".to_string(), 1)]);
        assert_eq!(vic.key, "VIC");
        assert_eq!(vic.age.min, Some(80.0));
        assert_eq!(vic.age.max, Some(80.0));
    }

    #[test]
    fn speed_limits_rank_by_count() {
        let csv = "State,Month,Year,Speed Limit\nSA,1,2020,60\nSA,1,2020,100\nSA,1,2020,100\nSA,1,2020, \n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        let grouped = GroupedAggregate::group_by(&dataset, Dimension::State);
        assert_eq!(
            grouped.groups[0].speed_limits,
            vec![("100".to_string(), 2), ("60".to_string(), 1)]
        );
        assert_eq!(grouped.groups[0].fatalities, 4);
    }

    #[test]
    fn single_value_yields_one_group() {
        let csv = "State,Month,Year\nSA,3,2020\nSA,4,2020\nSA,5,2020\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        let grouped = GroupedAggregate::group_by(&dataset, Dimension::State);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped.groups[0].fatalities, 3);
        assert_eq!(grouped.count_range(), Some((3, 3)));
        assert_eq!(grouped.groups[0].age, AgeSummary::default());
    }

    #[test]
    fn empty_dataset_has_no_range() {
        let grouped = GroupedAggregate::group_by(&Dataset::default(), Dimension::Month);
        assert!(grouped.is_empty());
        assert_eq!(grouped.count_range(), None);
        assert_eq!(grouped.total(), 0);
    }
}
