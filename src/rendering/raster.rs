//! Rasterization backend: display list -> SVG -> PNG

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use resvg::tiny_skia;
use resvg::usvg::{fontdb, Options, Tree};

use crate::rendering::layout::{Color, FontSpec};
use crate::rendering::paint::{DisplayList, DrawInstruction};
use crate::rendering::Screenshot;
use crate::{Error, Result};

/// Anything that can turn a display list into an encoded image.
pub trait Rasterizer {
    fn rasterize(&self, list: &DisplayList) -> Result<Screenshot>;
}

#[derive(Debug, Clone)]
pub struct RasterConfig {
    /// CSS font-family list written on every text element
    pub font_family: String,
    /// Extra directories scanned for font files
    pub font_dirs: Vec<PathBuf>,
    pub load_system_fonts: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            font_family: "Noto Sans CJK JP, Noto Sans JP, sans-serif".to_string(),
            font_dirs: Vec::new(),
            load_system_fonts: true,
        }
    }
}

/// Rasterizes through resvg. The font database is built once and shared by
/// every call.
pub struct SvgRasterizer {
    config: RasterConfig,
    fontdb: Arc<fontdb::Database>,
}

impl SvgRasterizer {
    pub fn new(config: RasterConfig) -> Self {
        let mut db = fontdb::Database::new();
        if config.load_system_fonts {
            db.load_system_fonts();
        }
        for dir in &config.font_dirs {
            db.load_fonts_dir(dir);
        }
        log::debug!("loaded {} font faces", db.len());
        Self {
            config,
            fontdb: Arc::new(db),
        }
    }

    pub fn to_svg(&self, list: &DisplayList) -> String {
        to_svg(list, &self.config.font_family)
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new(RasterConfig::default())
    }
}

impl Rasterizer for SvgRasterizer {
    fn rasterize(&self, list: &DisplayList) -> Result<Screenshot> {
        let svg = self.to_svg(list);

        let mut options = Options::default();
        options.fontdb = self.fontdb.clone();
        let tree = Tree::from_str(&svg, &options)
            .map_err(|e| Error::RenderError(format!("Failed to parse SVG: {}", e)))?;

        let mut pixmap = tiny_skia::Pixmap::new(list.width, list.height).ok_or_else(|| {
            Error::RenderError(format!(
                "Invalid canvas size {}x{}",
                list.width, list.height
            ))
        })?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        let png_data = pixmap
            .encode_png()
            .map_err(|e| Error::RenderError(format!("Failed to encode PNG: {}", e)))?;

        Ok(Screenshot {
            width: list.width,
            height: list.height,
            png_data,
        })
    }
}

/// Serialize a display list as a standalone SVG document.
pub fn to_svg(list: &DisplayList, font_family: &str) -> String {
    let mut out = String::with_capacity(128 + list.instructions.len() * 96);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = list.width,
        h = list.height,
    );
    let _ = write!(
        out,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        list.width,
        list.height,
        list.background.to_hex()
    );
    for instruction in &list.instructions {
        match instruction {
            DrawInstruction::FilledRect { x, y, w, h, color } => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"{}/>"#,
                    x,
                    y,
                    w,
                    h,
                    color.to_hex(),
                    opacity_attr("fill-opacity", *color)
                );
            }
            DrawInstruction::StrokedRect {
                x,
                y,
                w,
                h,
                color,
                line_width,
            } => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"{}/>"#,
                    x,
                    y,
                    w,
                    h,
                    color.to_hex(),
                    line_width,
                    opacity_attr("stroke-opacity", *color)
                );
            }
            DrawInstruction::Text {
                x,
                y,
                content,
                font,
                color,
            } => {
                if content.is_empty() {
                    continue;
                }
                let _ = write!(
                    out,
                    r#"<text x="{}" y="{}" font-family="{}" font-size="{}"{} fill="{}"{}>{}</text>"#,
                    x,
                    y,
                    escape_xml(font_family),
                    font.size,
                    weight_attr(font),
                    color.to_hex(),
                    opacity_attr("fill-opacity", *color),
                    escape_xml(content)
                );
            }
        }
    }
    out.push_str("</svg>");
    out
}

fn weight_attr(font: &FontSpec) -> &'static str {
    if font.bold {
        r#" font-weight="bold""#
    } else {
        ""
    }
}

fn opacity_attr(name: &str, color: Color) -> String {
    if color.a == 0xff {
        String::new()
    } else {
        format!(r#" {}="{:.3}""#, name, color.a as f32 / 255.0)
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
