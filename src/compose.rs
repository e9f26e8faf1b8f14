//! The two published image variants
//!
//! Both variants go through the same renderer; they differ only in their
//! [`LayoutConfig`].

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::ContributionCalendar;
use crate::rendering::{render, CanvasSize, DisplayList, GridPlacement, LayoutConfig};

/// Number of weeks shown by the recent-window image.
pub const RECENT_WEEKS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    FullYear,
    RecentWindow,
}

impl Variant {
    /// Suffix appended to published object names.
    pub fn suffix(self) -> &'static str {
        match self {
            Variant::FullYear => "",
            Variant::RecentWindow => "-recent",
        }
    }
}

/// Whole calendar at the padded origin, canvas sized to fit.
pub fn full_year_layout(total_contributions: u64) -> LayoutConfig {
    LayoutConfig {
        title: format!("GitHub Contributions: {} total", total_contributions),
        ..Default::default()
    }
}

/// Last [`RECENT_WEEKS`] weeks with larger cells on a fixed canvas, the grid
/// pushed below a title naming today's count.
pub fn recent_window_layout(today_count: u32) -> LayoutConfig {
    LayoutConfig {
        cell_size: 20.0,
        cell_spacing: 4.0,
        placement: GridPlacement::Offset { x: 20.0, y: 60.0 },
        canvas: CanvasSize::Fixed {
            width: 300,
            height: 280,
        },
        max_weeks: Some(RECENT_WEEKS),
        title: format!("Today: {} contributions", today_count),
        captions: vec![format!("Last {} weeks", RECENT_WEEKS)],
        include_first_week_label: true,
        ..Default::default()
    }
}

#[derive(Debug, Clone)]
pub struct Composition {
    pub variant: Variant,
    pub display_list: DisplayList,
}

/// Render both variants. `today` selects the day whose count is shown in the
/// recent-window title; a date outside the calendar counts as 0.
pub fn compose(calendar: &ContributionCalendar, today: NaiveDate) -> Vec<Composition> {
    let today_count = calendar.count_on(today).unwrap_or(0);
    vec![
        Composition {
            variant: Variant::FullYear,
            display_list: render(calendar, &full_year_layout(calendar.total_contributions())),
        },
        Composition {
            variant: Variant::RecentWindow,
            display_list: render(calendar, &recent_window_layout(today_count)),
        },
    ]
}
