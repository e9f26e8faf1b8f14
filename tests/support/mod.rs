#![allow(dead_code)]

use chrono::NaiveDate;
use grasscanvas::calendar::{RawCalendar, RawDay, RawWeek};
use grasscanvas::{ContributionCalendar, ContributionDay, ContributionLevel, ContributionWeek, DrawInstruction};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// `len` consecutive days starting at `start`, all at `level`.
pub fn week(start: &str, len: usize, level: ContributionLevel) -> ContributionWeek {
    let start = date(start);
    ContributionWeek::new(
        (0..len)
            .map(|i| ContributionDay::new(start + chrono::Duration::days(i as i64), i as u32, level))
            .collect(),
    )
}

/// `count` full weeks starting on `start`; week `w` uses level `w % 5`.
pub fn year(start: &str, count: usize) -> ContributionCalendar {
    let start = date(start);
    let weeks = (0..count)
        .map(|w| {
            let level = ContributionLevel::from_index(w % 5).expect("level");
            ContributionWeek::new(
                (0..7)
                    .map(|d| {
                        let day = start + chrono::Duration::days((w * 7 + d) as i64);
                        ContributionDay::new(day, (w + d) as u32, level)
                    })
                    .collect(),
            )
        })
        .collect();
    ContributionCalendar::new(weeks, 1234)
}

/// GraphQL response body for a year of data starting on `start`.
pub fn graphql_body(start: &str, weeks: usize) -> String {
    let levels = ["NONE", "FIRST_QUARTILE", "SECOND_QUARTILE", "THIRD_QUARTILE", "FOURTH_QUARTILE"];
    let start = date(start);
    let raw = RawCalendar {
        total_contributions: (weeks * 7) as u64,
        weeks: (0..weeks)
            .map(|w| RawWeek {
                contribution_days: (0..7)
                    .map(|d| RawDay {
                        contribution_count: 1,
                        date: start + chrono::Duration::days((w * 7 + d) as i64),
                        contribution_level: levels[(w + d) % 5].to_string(),
                    })
                    .collect(),
            })
            .collect(),
    };
    serde_json::json!({
        "data": {"user": {"contributionsCollection": {"contributionCalendar": raw}}}
    })
    .to_string()
}

pub fn filled_positions(instructions: &[DrawInstruction]) -> Vec<(f32, f32)> {
    instructions
        .iter()
        .filter_map(|i| match i {
            DrawInstruction::FilledRect { x, y, .. } => Some((*x, *y)),
            _ => None,
        })
        .collect()
}

pub fn rect_count(instructions: &[DrawInstruction]) -> usize {
    instructions
        .iter()
        .filter(|i| {
            matches!(
                i,
                DrawInstruction::FilledRect { .. } | DrawInstruction::StrokedRect { .. }
            )
        })
        .count()
}

/// Text labels whose content ends with the default month suffix.
pub fn month_labels(instructions: &[DrawInstruction]) -> Vec<(String, f32)> {
    instructions
        .iter()
        .filter_map(|i| match i {
            DrawInstruction::Text { content, x, .. }
                if content.ends_with('月') && content.chars().count() > 1 =>
            {
                Some((content.clone(), *x))
            }
            _ => None,
        })
        .collect()
}
