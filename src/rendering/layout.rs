//! Layout parameters for the contribution grid

use serde::{Deserialize, Serialize};

use crate::calendar::ContributionLevel;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// `#rrggbb`; alpha is dropped.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One color per contribution level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette(pub [Color; 5]);

impl Palette {
    pub fn color(&self, level: ContributionLevel) -> Color {
        self.0[level.index()]
    }
}

impl Default for Palette {
    /// GitHub's light theme greens.
    fn default() -> Self {
        Palette([
            Color::rgb(0xeb, 0xed, 0xf0),
            Color::rgb(0x9b, 0xe9, 0xa8),
            Color::rgb(0x40, 0xc4, 0x63),
            Color::rgb(0x30, 0xa1, 0x4e),
            Color::rgb(0x21, 0x6e, 0x39),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size: f32,
    pub bold: bool,
}

impl FontSpec {
    pub const fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub const fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }
}

/// Where the label block (weekday column + month header) sits on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GridPlacement {
    /// At `(padding, padding)`.
    Padded,
    /// At an explicit offset, leaving room above for title and captions.
    Offset { x: f32, y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CanvasSize {
    /// Grow with the number of laid out weeks.
    Fit,
    Fixed { width: u32, height: u32 },
}

/// A weekday row that receives a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLabel {
    pub index: usize,
    pub text: String,
}

impl DayLabel {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Immutable layout configuration for one render call.
///
/// The defaults reproduce the full-year image: 12px cells with 3px gaps, a
/// 20px outer padding, a 20px month header and a 30px weekday column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub cell_size: f32,
    pub cell_spacing: f32,
    pub padding: f32,
    /// Height of the band above the cells that holds month labels
    pub month_label_height: f32,
    /// Width of the column left of the cells that holds weekday labels
    pub day_label_width: f32,
    pub placement: GridPlacement,
    pub canvas: CanvasSize,
    /// Lay out only the most recent weeks
    pub max_weeks: Option<usize>,
    pub title: String,
    /// Extra text lines drawn below the title
    pub captions: Vec<String>,
    pub caption_line_height: f32,
    pub palette: Palette,
    /// Cell outline color
    pub border_color: Color,
    pub border_width: f32,
    pub background: Color,
    pub title_color: Color,
    pub label_color: Color,
    pub title_font: FontSpec,
    pub caption_font: FontSpec,
    pub label_font: FontSpec,
    /// Baseline shift applied to weekday labels so they sit centered on a row
    pub label_baseline_offset: f32,
    pub day_labels: Vec<DayLabel>,
    /// Label text per month, January first
    pub month_labels: [String; 12],
    /// Whether the first laid out week may carry a month label
    pub include_first_week_label: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_size: 12.0,
            cell_spacing: 3.0,
            padding: 20.0,
            month_label_height: 20.0,
            day_label_width: 30.0,
            placement: GridPlacement::Padded,
            canvas: CanvasSize::Fit,
            max_weeks: None,
            title: String::new(),
            captions: Vec::new(),
            caption_line_height: 18.0,
            palette: Palette::default(),
            border_color: Color::WHITE,
            border_width: 1.0,
            background: Color::WHITE,
            title_color: Color::BLACK,
            label_color: Color::rgb(0x76, 0x76, 0x76),
            title_font: FontSpec::bold(14.0),
            caption_font: FontSpec::regular(12.0),
            label_font: FontSpec::regular(10.0),
            label_baseline_offset: 4.0,
            day_labels: vec![
                DayLabel::new(1, "月"),
                DayLabel::new(3, "水"),
                DayLabel::new(5, "金"),
            ],
            month_labels: std::array::from_fn(|i| format!("{}月", i + 1)),
            include_first_week_label: false,
        }
    }
}

impl LayoutConfig {
    /// Distance between the origins of adjacent cells.
    pub fn step(&self) -> f32 {
        self.cell_size + self.cell_spacing
    }

    /// Top-left corner of the label block.
    pub fn anchor(&self) -> (f32, f32) {
        match self.placement {
            GridPlacement::Padded => (self.padding, self.padding),
            GridPlacement::Offset { x, y } => (x, y),
        }
    }

    /// Top-left corner of the first cell.
    pub fn grid_origin(&self) -> (f32, f32) {
        let (x, y) = self.anchor();
        (x + self.day_label_width, y + self.month_label_height)
    }

    /// Canvas dimensions for a grid of `week_count` columns.
    pub fn canvas_size(&self, week_count: usize) -> (u32, u32) {
        match self.canvas {
            CanvasSize::Fixed { width, height } => (width, height),
            CanvasSize::Fit => {
                let width = self.padding * 2.0
                    + self.day_label_width
                    + week_count as f32 * self.step();
                let height = self.padding * 2.0 + self.month_label_height + 7.0 * self.step();
                (width.ceil() as u32, height.ceil() as u32)
            }
        }
    }

    /// Position of the cell for week column `week` and weekday row `day`.
    pub fn cell_position(&self, week: usize, day: usize) -> (f32, f32) {
        let (gx, gy) = self.grid_origin();
        (
            gx + week as f32 * self.step(),
            gy + day as f32 * self.step(),
        )
    }

    pub fn month_label(&self, month: u32) -> &str {
        let idx = (month.clamp(1, 12) - 1) as usize;
        &self.month_labels[idx]
    }
}
