//! Fetch, render, publish and notify, strictly one after another.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::calendar::normalize;
use crate::compose::{compose, Variant};
use crate::github::CalendarSource;
use crate::notify::Notifier;
use crate::publish::{object_key, Publisher};
use crate::rendering::Rasterizer;
use crate::Result;

#[derive(Debug, Clone, Serialize)]
pub struct PublishedImage {
    pub variant: Variant,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub total_contributions: u64,
    pub today_contributions: u32,
    pub images: Vec<PublishedImage>,
}

pub struct Pipeline<'a> {
    /// Used to name published objects
    pub username: String,
    pub source: &'a dyn CalendarSource,
    pub rasterizer: &'a dyn Rasterizer,
    pub publisher: &'a dyn Publisher,
    pub notifier: &'a dyn Notifier,
}

/// Text sent along with the images.
pub fn report_message(total_contributions: u64, now: NaiveDateTime) -> String {
    format!(
        "🌱 GitHub草レポート\n\n総コントリビューション: {}\n更新時刻: {}",
        total_contributions,
        now.format("%Y-%m-%d %H:%M:%S")
    )
}

pub fn failure_message(err: &crate::Error) -> String {
    format!("❌ Grass Canvasでエラーが発生しました\n\n{}", err)
}

impl<'a> Pipeline<'a> {
    /// Run once. `now` names the objects, selects "today" for the recent
    /// window and is quoted in the report message.
    pub fn run(&self, now: NaiveDateTime) -> Result<RunReport> {
        log::info!("processing contributions for {}", self.username);
        let calendar = normalize(self.source.fetch()?);
        log::info!(
            "calendar holds {} weeks, {} total contributions",
            calendar.weeks().len(),
            calendar.total_contributions()
        );

        let today_contributions = calendar.count_on(now.date()).unwrap_or(0);
        let mut images = Vec::new();
        for part in compose(&calendar, now.date()) {
            let shot = self.rasterizer.rasterize(&part.display_list)?;
            let name = object_key(&self.username, part.variant, now);
            let url = self.publisher.publish(&shot.png_data, &name)?;
            log::info!("{:?} image ({}x{}) at {}", part.variant, shot.width, shot.height, url);
            images.push(PublishedImage {
                variant: part.variant,
                url,
                width: shot.width,
                height: shot.height,
            });
        }

        let urls: Vec<String> = images.iter().map(|i| i.url.clone()).collect();
        self.notifier
            .notify_image(&urls, &report_message(calendar.total_contributions(), now))?;

        Ok(RunReport {
            total_contributions: calendar.total_contributions(),
            today_contributions,
            images,
        })
    }

    /// Like [`Pipeline::run`], but a failure is also reported through the
    /// notifier before being returned. A failing failure notification is only
    /// logged.
    pub fn run_and_report_failure(&self, now: NaiveDateTime) -> Result<RunReport> {
        self.run(now).map_err(|err| {
            log::error!("run failed: {}", err);
            if let Err(notify_err) = self.notifier.notify_text(&failure_message(&err)) {
                log::error!("failed to send error notification: {}", notify_err);
            }
            err
        })
    }
}
