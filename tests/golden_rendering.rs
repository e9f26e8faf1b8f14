mod support;

use std::fs;
use std::path::PathBuf;

use grasscanvas::rendering::{Palette, RasterConfig, Rasterizer, SvgRasterizer};
use grasscanvas::{compose, render, ContributionCalendar, ContributionLevel, LayoutConfig};

use support::{date, week, year};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

fn check_golden(name: &str, actual: &str) {
    let expected_path = golden_path(name);
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, actual).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    if !expected_path.exists() {
        println!(
            "No golden at {:?}; run with UPDATE_GOLDENS=1 to create it. Skipping.",
            expected_path
        );
        return;
    }

    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(actual, exp.trim());
}

/// Offline raster: no system fonts, so only geometry reaches the pixels.
fn rasterizer() -> SvgRasterizer {
    SvgRasterizer::new(RasterConfig {
        load_system_fonts: false,
        ..Default::default()
    })
}

fn decode(png_data: &[u8]) -> (u32, u32, Vec<u8>) {
    let decoder = png::Decoder::new(png_data);
    let mut reader = decoder.read_info().expect("decode");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("frame");
    buf.truncate(info.buffer_size());
    (info.width, info.height, buf)
}

fn pixel(buf: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

#[test]
fn golden_display_list_digests() {
    let cal = year("2023-01-01", 52);
    for part in compose(&cal, date("2023-12-27")) {
        let name = format!("year2023{}.digest", part.variant.suffix());
        check_golden(&name, &part.display_list.digest());
    }
}

#[test]
fn rasterized_cells_carry_palette_colors() {
    let cal = ContributionCalendar::new(
        vec![
            week("2024-01-01", 1, ContributionLevel::None),
            week("2024-01-07", 7, ContributionLevel::SecondQuartile),
        ],
        0,
    );
    let list = render(&cal, &LayoutConfig::default());
    let shot = rasterizer().rasterize(&list).expect("rasterize");
    assert_eq!(&shot.png_data[0..8], b"\x89PNG\r\n\x1a\n");

    let (width, height, buf) = decode(&shot.png_data);
    assert_eq!((width, height), (list.width, list.height));

    let palette = Palette::default();
    let rgba = |c: grasscanvas::rendering::Color| [c.r, c.g, c.b, c.a];

    // Background
    assert_eq!(pixel(&buf, width, 1, 1), [255, 255, 255, 255]);
    // Column 0, row 0: the lone level-0 day
    assert_eq!(pixel(&buf, width, 56, 46), rgba(palette.0[0]));
    // Column 1, rows 0 and 6: level 2
    assert_eq!(pixel(&buf, width, 71, 46), rgba(palette.0[2]));
    assert_eq!(pixel(&buf, width, 71, 46 + 6 * 15), rgba(palette.0[2]));
    // Column 0, row 1 has no day and stays background
    assert_eq!(pixel(&buf, width, 56, 61), [255, 255, 255, 255]);
}

#[test]
fn recent_window_png_has_fixed_size() {
    let cal = year("2023-01-01", 52);
    let parts = compose(&cal, date("2023-12-27"));
    let shot = rasterizer()
        .rasterize(&parts[1].display_list)
        .expect("rasterize");
    let (width, height, buf) = decode(&shot.png_data);
    assert_eq!((width, height), (300, 280));

    // Window column 0 is calendar week 43; its first cell sits at (50, 80).
    let c = Palette::default().0[43 % 5];
    assert_eq!(pixel(&buf, width, 60, 90), [c.r, c.g, c.b, 255]);
}

#[test]
fn fixture_file_renders_both_variants() {
    use grasscanvas::github::{CalendarSource, JsonFileSource};

    let raw = JsonFileSource::new("tests/fixtures/calendar.json")
        .fetch()
        .expect("fixture");
    let cal = grasscanvas::normalize(raw);
    assert_eq!(cal.total_contributions(), 17);
    assert_eq!(cal.weeks()[1].days[4].level, ContributionLevel::None);

    let parts = compose(&cal, date("2024-01-10"));
    assert_eq!(parts[0].display_list.filled_rects().count(), 8);
    let title = parts[1].display_list.texts().next().unwrap().0;
    assert_eq!(title, "Today: 6 contributions");

    let raster = rasterizer();
    for part in &parts {
        let shot = raster.rasterize(&part.display_list).expect("rasterize");
        assert!(!shot.is_empty());
    }
}
