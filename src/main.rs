use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use grasscanvas::github::{CalendarSource, GitHubConfig, GitHubSource, JsonFileSource};
use grasscanvas::notify::{LineConfig, LineNotifier, LogNotifier, Notifier};
use grasscanvas::publish::{DataUrlPublisher, DirectoryPublisher, Publisher};
use grasscanvas::rendering::{RasterConfig, Rasterizer, SvgRasterizer};
use grasscanvas::{compose, normalize, Pipeline};

#[derive(Parser)]
#[command(name = "grasscanvas", version, about = "GitHub contribution heat-map images")]
struct Cli {
    /// Font family list used for all text
    #[arg(long, global = true, env = "GRASS_FONT_FAMILY")]
    font_family: Option<String>,

    /// Additional directory to load fonts from
    #[arg(long, global = true, env = "GRASS_FONT_DIR")]
    font_dir: Vec<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render both images from a calendar JSON file
    Render {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, env = "GRASS_OUT_DIR")]
        out_dir: PathBuf,
        /// Day shown in the recent-window title (defaults to today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Fetch, render, publish and notify
    Run {
        #[arg(long, env = "GITHUB_USERNAME")]
        username: String,
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        github_token: Option<String>,
        #[arg(long, env = "GRASS_OUT_DIR", required_unless_present = "data_url")]
        out_dir: Option<PathBuf>,
        /// Public URL prefix under which `out_dir` is served
        #[arg(long, env = "GRASS_BASE_URL")]
        base_url: Option<String>,
        /// Inline images as `data:` URLs instead of writing them to disk
        #[arg(long, conflicts_with_all = ["out_dir", "base_url"])]
        data_url: bool,
        #[arg(long, env = "LINE_CHANNEL_ACCESS_TOKEN", hide_env_values = true)]
        line_token: Option<String>,
        #[arg(long, env = "LINE_USER_ID")]
        line_user_id: Option<String>,
    },
}

fn rasterizer(cli: &Cli) -> SvgRasterizer {
    let mut config = RasterConfig::default();
    if let Some(family) = &cli.font_family {
        config.font_family = family.clone();
    }
    config.font_dirs = cli.font_dir.clone();
    SvgRasterizer::new(config)
}

/// LINE only fetches images over https, so a LINE run needs a public base URL.
fn build_publisher(
    out_dir: Option<PathBuf>,
    base_url: Option<String>,
    data_url: bool,
    line_configured: bool,
) -> anyhow::Result<Box<dyn Publisher>> {
    if line_configured && base_url.is_none() {
        bail!("LINE notifications need --base-url so images are reachable over https");
    }
    if data_url {
        return Ok(Box::new(DataUrlPublisher));
    }
    match out_dir {
        Some(dir) => Ok(Box::new(DirectoryPublisher::new(dir, base_url))),
        None => bail!("--out-dir is required unless --data-url is given"),
    }
}

fn render_offline(
    raster: &SvgRasterizer,
    input: PathBuf,
    out_dir: PathBuf,
    today: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let raw = JsonFileSource::new(&input).fetch()?;
    let calendar = normalize(raw);
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    for part in compose(&calendar, today) {
        let shot = raster.rasterize(&part.display_list)?;
        let path = out_dir.join(format!("grass{}.png", part.variant.suffix()));
        log::info!("{:?} layout digest {}", part.variant, part.display_list.digest());
        std::fs::write(&path, &shot.png_data)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("{}", path.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let raster = rasterizer(&cli);

    match cli.command {
        Command::Render { input, out_dir, today } => render_offline(&raster, input, out_dir, today),
        Command::Run {
            username,
            github_token,
            out_dir,
            base_url,
            data_url,
            line_token,
            line_user_id,
        } => {
            let source = GitHubSource::new(GitHubConfig {
                token: github_token,
                ..GitHubConfig::new(username.clone())
            })?;
            let line_configured = line_token.is_some() || line_user_id.is_some();
            let publisher = build_publisher(out_dir, base_url, data_url, line_configured)?;
            let notifier: Box<dyn Notifier> = match (line_token, line_user_id) {
                (Some(token), Some(user)) => Box::new(LineNotifier::new(LineConfig::new(token, user))?),
                (None, None) => {
                    log::warn!("LINE credentials not set, notifications go to the log");
                    Box::new(LogNotifier)
                }
                _ => bail!("--line-token and --line-user-id must be given together"),
            };

            let pipeline = Pipeline {
                username,
                source: &source,
                rasterizer: &raster,
                publisher: publisher.as_ref(),
                notifier: notifier.as_ref(),
            };
            let report = pipeline
                .run_and_report_failure(Local::now().naive_local())
                .context("grass canvas run failed")?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_without_base_url_is_rejected() {
        let err = build_publisher(Some(PathBuf::from("out")), None, false, true).err().expect("error");
        assert!(err.to_string().contains("--base-url"));
        assert!(build_publisher(None, None, true, true).is_err());
    }

    #[test]
    fn publisher_selection() {
        let p = build_publisher(None, None, true, false).expect("data url");
        assert!(p.publish(b"x", "a.png").unwrap().starts_with("data:image/png;base64,"));

        let dir = tempfile::tempdir().unwrap();
        let p = build_publisher(
            Some(dir.path().to_path_buf()),
            Some("https://img.example.com".into()),
            false,
            true,
        )
        .expect("directory");
        assert_eq!(p.publish(b"x", "a.png").unwrap(), "https://img.example.com/a.png");

        assert!(build_publisher(None, None, false, false).is_err());
    }

    #[test]
    fn cli_flags_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["grasscanvas", "run", "--username", "octo", "--data-url"])
            .expect("parse");
        match cli.command {
            Command::Run { data_url, out_dir, .. } => {
                assert!(data_url);
                assert!(out_dir.is_none());
            }
            _ => panic!("expected run"),
        }
        assert!(Cli::try_parse_from([
            "grasscanvas", "run", "--username", "octo", "--data-url", "--out-dir", "x"
        ])
        .is_err());
    }
}
