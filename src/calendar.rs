//! Contribution calendar model and the normalizer that builds it
//!
//! Raw records arrive in the provider's vocabulary (GitHub's GraphQL
//! `contributionCalendar`) and are normalized into weeks of days carrying a
//! level in `0..=4`. The normalized calendar is never mutated afterwards.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Activity bucket of a single day, mapped one-to-one onto a 5-color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContributionLevel {
    #[default]
    None,
    FirstQuartile,
    SecondQuartile,
    ThirdQuartile,
    FourthQuartile,
}

impl ContributionLevel {
    pub const ALL: [ContributionLevel; 5] = [
        ContributionLevel::None,
        ContributionLevel::FirstQuartile,
        ContributionLevel::SecondQuartile,
        ContributionLevel::ThirdQuartile,
        ContributionLevel::FourthQuartile,
    ];

    /// Map a provider classification string onto a level.
    ///
    /// Unrecognized classifications fall back to level 0 instead of failing.
    pub fn from_classification(raw: &str) -> Self {
        match raw {
            "NONE" => ContributionLevel::None,
            "FIRST_QUARTILE" => ContributionLevel::FirstQuartile,
            "SECOND_QUARTILE" => ContributionLevel::SecondQuartile,
            "THIRD_QUARTILE" => ContributionLevel::ThirdQuartile,
            "FOURTH_QUARTILE" => ContributionLevel::FourthQuartile,
            other => {
                log::debug!("unknown contribution level {:?}, using level 0", other);
                ContributionLevel::None
            }
        }
    }

    /// Numeric level in `0..=4`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u32,
    pub level: ContributionLevel,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32, level: ContributionLevel) -> Self {
        Self { date, count, level }
    }

    /// Calendar month of the day, 1-based.
    pub fn month(&self) -> u32 {
        self.date.month()
    }
}

/// One grid column. The position of a day in `days` is its row index, so a
/// partial first or last week simply holds fewer than 7 entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionWeek {
    pub days: Vec<ContributionDay>,
}

impl ContributionWeek {
    pub fn new(days: Vec<ContributionDay>) -> Self {
        Self { days }
    }

    pub fn first_day(&self) -> Option<&ContributionDay> {
        self.days.first()
    }
}

/// Normalized calendar: weeks in chronological order plus the provider's total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionCalendar {
    weeks: Vec<ContributionWeek>,
    total_contributions: u64,
}

impl ContributionCalendar {
    /// `total_contributions` is trusted as supplied; it is not derived from
    /// the day counts.
    pub fn new(weeks: Vec<ContributionWeek>, total_contributions: u64) -> Self {
        Self {
            weeks,
            total_contributions,
        }
    }

    pub fn weeks(&self) -> &[ContributionWeek] {
        &self.weeks
    }

    pub fn total_contributions(&self) -> u64 {
        self.total_contributions
    }

    /// Number of days across all weeks, partial weeks included.
    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(|w| w.days.len()).sum()
    }

    pub fn days(&self) -> impl Iterator<Item = &ContributionDay> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    /// Contribution count recorded for `date`, if the calendar covers it.
    pub fn count_on(&self, date: NaiveDate) -> Option<u32> {
        self.days().find(|d| d.date == date).map(|d| d.count)
    }

    /// The most recent `max_weeks` weeks (all of them when fewer exist).
    pub fn last_weeks(&self, max_weeks: usize) -> &[ContributionWeek] {
        let start = self.weeks.len().saturating_sub(max_weeks);
        &self.weeks[start..]
    }
}

/// Calendar as delivered by the provider, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCalendar {
    pub total_contributions: u64,
    pub weeks: Vec<RawWeek>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeek {
    pub contribution_days: Vec<RawDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDay {
    pub contribution_count: u32,
    pub date: NaiveDate,
    pub contribution_level: String,
}

/// Convert a provider calendar into the canonical model. Never fails.
pub fn normalize(raw: RawCalendar) -> ContributionCalendar {
    let weeks = raw
        .weeks
        .into_iter()
        .map(|week| {
            ContributionWeek::new(
                week.contribution_days
                    .into_iter()
                    .map(|day| ContributionDay {
                        date: day.date,
                        count: day.contribution_count,
                        level: ContributionLevel::from_classification(&day.contribution_level),
                    })
                    .collect(),
            )
        })
        .collect();
    ContributionCalendar::new(weeks, raw.total_contributions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn raw_day(d: &str, count: u32, level: &str) -> RawDay {
        RawDay {
            contribution_count: count,
            date: date(d),
            contribution_level: level.to_string(),
        }
    }

    #[test]
    fn classification_table_maps_quartiles() {
        let expected = [
            ("NONE", 0),
            ("FIRST_QUARTILE", 1),
            ("SECOND_QUARTILE", 2),
            ("THIRD_QUARTILE", 3),
            ("FOURTH_QUARTILE", 4),
        ];
        for (raw, level) in expected {
            assert_eq!(ContributionLevel::from_classification(raw).index(), level);
        }
    }

    #[test]
    fn unknown_classification_defaults_to_zero() {
        for raw in ["UNKNOWN_BUCKET", "", "first_quartile", "FIFTH_QUARTILE"] {
            assert_eq!(
                ContributionLevel::from_classification(raw),
                ContributionLevel::None
            );
        }
    }

    #[test]
    fn normalize_preserves_order_and_total() {
        let raw = RawCalendar {
            total_contributions: 42,
            weeks: vec![
                RawWeek {
                    contribution_days: vec![raw_day("2024-01-06", 3, "SECOND_QUARTILE")],
                },
                RawWeek {
                    contribution_days: vec![
                        raw_day("2024-01-07", 0, "NONE"),
                        raw_day("2024-01-08", 9, "FOURTH_QUARTILE"),
                        raw_day("2024-01-09", 1, "UNKNOWN_BUCKET"),
                    ],
                },
            ],
        };
        let cal = normalize(raw);
        assert_eq!(cal.total_contributions(), 42);
        assert_eq!(cal.weeks().len(), 2);
        assert_eq!(cal.day_count(), 4);
        let second = &cal.weeks()[1].days;
        assert_eq!(second[0].date, date("2024-01-07"));
        assert_eq!(second[1].level, ContributionLevel::FourthQuartile);
        assert_eq!(second[2].level, ContributionLevel::None);
        assert_eq!(second[2].count, 1);
    }

    #[test]
    fn total_is_trusted_not_recomputed() {
        let raw = RawCalendar {
            total_contributions: 1000,
            weeks: vec![RawWeek {
                contribution_days: vec![raw_day("2024-03-01", 2, "FIRST_QUARTILE")],
            }],
        };
        assert_eq!(normalize(raw).total_contributions(), 1000);
    }

    #[test]
    fn raw_calendar_decodes_graphql_shape() {
        let json = r#"{
            "totalContributions": 5,
            "weeks": [{"contributionDays": [
                {"contributionCount": 5, "date": "2024-02-29", "contributionLevel": "THIRD_QUARTILE"}
            ]}]
        }"#;
        let raw: RawCalendar = serde_json::from_str(json).unwrap();
        assert_eq!(raw.weeks[0].contribution_days[0].date, date("2024-02-29"));
        let cal = normalize(raw);
        assert_eq!(cal.weeks()[0].days[0].level.index(), 3);
        assert_eq!(cal.weeks()[0].days[0].month(), 2);
    }

    #[test]
    fn count_on_and_last_weeks() {
        let weeks = (0..5)
            .map(|i| {
                ContributionWeek::new(vec![ContributionDay::new(
                    date("2024-01-07") + chrono::Duration::weeks(i),
                    i as u32,
                    ContributionLevel::None,
                )])
            })
            .collect();
        let cal = ContributionCalendar::new(weeks, 10);
        assert_eq!(cal.count_on(date("2024-01-21")), Some(2));
        assert_eq!(cal.count_on(date("2023-12-31")), None);
        assert_eq!(cal.last_weeks(2).len(), 2);
        assert_eq!(cal.last_weeks(2)[0].days[0].count, 3);
        assert_eq!(cal.last_weeks(50).len(), 5);
        assert!(ContributionCalendar::default().last_weeks(3).is_empty());
    }
}
