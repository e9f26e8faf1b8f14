//! Grass Canvas
//!
//! Renders a GitHub contribution calendar ("grass") as PNG heat-maps and
//! delivers them: a full-year grid and a recent-window grid, both produced by
//! the same layout engine.
//!
//! # Pipeline
//!
//! - [`github`]: fetch the raw calendar ([`github::CalendarSource`])
//! - [`calendar`]: normalize it into weeks of days with levels `0..=4`
//! - [`rendering`]: lay the weeks out into draw instructions and rasterize them
//! - [`compose`]: the two image variants
//! - [`publish`] / [`notify`]: hand the images off and tell the user
//! - [`pipeline`]: run the steps above in order
//!
//! # Example
//!
//! ```
//! use grasscanvas::calendar::{normalize, RawCalendar};
//! use grasscanvas::rendering::{render, LayoutConfig};
//!
//! let raw: RawCalendar = serde_json::from_str(r#"{
//!     "totalContributions": 4,
//!     "weeks": [{"contributionDays": [
//!         {"contributionCount": 4, "date": "2024-01-07", "contributionLevel": "FOURTH_QUARTILE"}
//!     ]}]
//! }"#).unwrap();
//! let calendar = normalize(raw);
//! let list = render(&calendar, &LayoutConfig::default());
//! assert_eq!(list.filled_rects().count(), 1);
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod calendar;
pub mod compose;
pub mod github;
pub mod notify;
pub mod pipeline;
pub mod publish;
pub mod rendering;

pub use calendar::{normalize, ContributionCalendar, ContributionDay, ContributionLevel, ContributionWeek};
pub use compose::{compose, Variant};
pub use pipeline::{Pipeline, RunReport};
pub use rendering::{render, DisplayList, DrawInstruction, LayoutConfig};
