//! Notification sinks.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;

use crate::{Error, Result};

pub trait Notifier {
    /// Deliver `text` followed by one image message per URL.
    fn notify_image(&self, image_urls: &[String], text: &str) -> Result<()>;

    fn notify_text(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct LineConfig {
    pub channel_access_token: String,
    /// Recipient of push messages
    pub user_id: String,
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl LineConfig {
    pub fn new(channel_access_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            channel_access_token: channel_access_token.into(),
            user_id: user_id.into(),
            endpoint: "https://api.line.me/v2/bot/message/push".to_string(),
            timeout_ms: 30000,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
enum LineMessage<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        original_content_url: &'a str,
        preview_image_url: &'a str,
    },
}

#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: Vec<LineMessage<'a>>,
}

/// Pushes messages through the LINE Messaging API.
pub struct LineNotifier {
    client: Client,
    config: LineConfig,
}

impl LineNotifier {
    pub fn new(config: LineConfig) -> Result<Self> {
        if config.channel_access_token.is_empty() || config.user_id.is_empty() {
            return Err(Error::ConfigError(
                "LINE channel access token and user id are required".into(),
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn push(&self, messages: Vec<LineMessage<'_>>) -> Result<()> {
        let body = PushRequest {
            to: &self.config.user_id,
            messages,
        };
        let resp = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.channel_access_token)
            .json(&body)
            .send()
            .map_err(|e| Error::NotifyError(format!("LINE push failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            return Err(Error::NotifyError(format!("LINE push returned HTTP {}: {}", status, text.trim())));
        }
        log::info!("LINE message sent");
        Ok(())
    }
}

impl Notifier for LineNotifier {
    fn notify_image(&self, image_urls: &[String], text: &str) -> Result<()> {
        let mut messages = vec![LineMessage::Text { text }];
        messages.extend(image_urls.iter().map(|url| LineMessage::Image {
            original_content_url: url,
            preview_image_url: url,
        }));
        self.push(messages)
    }

    fn notify_text(&self, text: &str) -> Result<()> {
        self.push(vec![LineMessage::Text { text }])
    }
}

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_image(&self, image_urls: &[String], text: &str) -> Result<()> {
        log::info!("{}", text);
        for url in image_urls {
            log::info!("image: {}", url);
        }
        Ok(())
    }

    fn notify_text(&self, text: &str) -> Result<()> {
        log::info!("{}", text);
        Ok(())
    }
}
