//! Grid renderer: turns a calendar into an ordered list of draw instructions

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::calendar::{ContributionCalendar, ContributionWeek};
use crate::rendering::layout::{Color, FontSpec, LayoutConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawInstruction {
    FilledRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    StrokedRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
        line_width: f32,
    },
    /// `y` is the text baseline.
    Text {
        x: f32,
        y: f32,
        content: String,
        font: FontSpec,
        color: Color,
    },
}

/// A canvas description ready for a rasterizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub instructions: Vec<DrawInstruction>,
}

impl DisplayList {
    pub fn filled_rects(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.instructions
            .iter()
            .filter(|i| matches!(i, DrawInstruction::FilledRect { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, f32, f32)> {
        self.instructions.iter().filter_map(|i| match i {
            DrawInstruction::Text { content, x, y, .. } => Some((content.as_str(), *x, *y)),
            _ => None,
        })
    }

    /// SHA-256 of the canonical JSON encoding, hex encoded.
    pub fn digest(&self) -> String {
        let encoded = serde_json::to_vec(self).unwrap_or_default();
        hex::encode(Sha256::digest(&encoded))
    }
}

/// Lay out `calendar` according to `config`.
///
/// Identical inputs always produce an identical list. When `max_weeks` is set
/// only the most recent weeks are laid out and every label is positioned
/// relative to that slice.
pub fn render(calendar: &ContributionCalendar, config: &LayoutConfig) -> DisplayList {
    let weeks = match config.max_weeks {
        Some(n) => calendar.last_weeks(n),
        None => calendar.weeks(),
    };
    let (width, height) = config.canvas_size(weeks.len());
    let mut out = Vec::with_capacity(4 + config.day_labels.len() + weeks.len() * 15);

    emit_title(&mut out, config);

    if weeks.is_empty() {
        log::debug!("empty calendar, rendering title only");
    } else {
        emit_day_labels(&mut out, config);
        emit_month_labels(&mut out, config, weeks);
        emit_cells(&mut out, config, weeks);
    }

    log::debug!(
        "laid out {} weeks into {}x{} canvas ({} instructions)",
        weeks.len(),
        width,
        height,
        out.len()
    );

    DisplayList {
        width,
        height,
        background: config.background,
        instructions: out,
    }
}

fn emit_title(out: &mut Vec<DrawInstruction>, config: &LayoutConfig) {
    out.push(DrawInstruction::Text {
        x: config.padding,
        y: config.padding,
        content: config.title.clone(),
        font: config.title_font,
        color: config.title_color,
    });
    for (i, caption) in config.captions.iter().enumerate() {
        out.push(DrawInstruction::Text {
            x: config.padding,
            y: config.padding + (i + 1) as f32 * config.caption_line_height,
            content: caption.clone(),
            font: config.caption_font,
            color: config.title_color,
        });
    }
}

fn emit_day_labels(out: &mut Vec<DrawInstruction>, config: &LayoutConfig) {
    let (anchor_x, _) = config.anchor();
    let (_, grid_y) = config.grid_origin();
    for label in &config.day_labels {
        let y = grid_y
            + label.index as f32 * config.step()
            + config.cell_size / 2.0
            + config.label_baseline_offset;
        out.push(DrawInstruction::Text {
            x: anchor_x,
            y,
            content: label.text.clone(),
            font: config.label_font,
            color: config.label_color,
        });
    }
}

fn emit_month_labels(
    out: &mut Vec<DrawInstruction>,
    config: &LayoutConfig,
    weeks: &[ContributionWeek],
) {
    let (grid_x, grid_y) = config.grid_origin();
    let mut current_month: Option<u32> = None;
    for (week_index, week) in weeks.iter().enumerate() {
        let Some(first) = week.first_day() else {
            continue;
        };
        let month = first.date.month();
        if current_month == Some(month) {
            continue;
        }
        // A suppressed first week leaves the tracker untouched, so a month
        // that carries on into week 1 is still labelled there.
        if week_index == 0 && !config.include_first_week_label {
            continue;
        }
        current_month = Some(month);
        out.push(DrawInstruction::Text {
            x: grid_x + week_index as f32 * config.step(),
            y: grid_y - 5.0,
            content: config.month_label(month).to_string(),
            font: config.label_font,
            color: config.label_color,
        });
    }
}

fn emit_cells(out: &mut Vec<DrawInstruction>, config: &LayoutConfig, weeks: &[ContributionWeek]) {
    let size = config.cell_size;
    for (week_index, week) in weeks.iter().enumerate() {
        for (day_index, day) in week.days.iter().enumerate() {
            let (x, y) = config.cell_position(week_index, day_index);
            out.push(DrawInstruction::FilledRect {
                x,
                y,
                w: size,
                h: size,
                color: config.palette.color(day.level),
            });
            out.push(DrawInstruction::StrokedRect {
                x,
                y,
                w: size,
                h: size,
                color: config.border_color,
                line_width: config.border_width,
            });
        }
    }
}
