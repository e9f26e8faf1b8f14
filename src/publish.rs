//! Publishing sinks: accept a finished PNG and hand back an address for it.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::NaiveDateTime;

use crate::compose::Variant;
use crate::{Error, Result};

pub trait Publisher {
    /// Store `png` under the logical `name` and return a retrievable URL.
    fn publish(&self, png: &[u8], name: &str) -> Result<String>;
}

/// `grass/{username}/{yyyy-MM-dd-HHmmss}{suffix}.png`
pub fn object_key(username: &str, variant: Variant, timestamp: NaiveDateTime) -> String {
    format!(
        "grass/{}/{}{}.png",
        username,
        timestamp.format("%Y-%m-%d-%H%M%S"),
        variant.suffix()
    )
}

/// Writes images below a root directory. When `base_url` is set the returned
/// address is `{base_url}/{name}` (e.g. a static file server in front of the
/// directory), otherwise a `file://` URL.
pub struct DirectoryPublisher {
    root: PathBuf,
    base_url: Option<String>,
}

impl DirectoryPublisher {
    pub fn new(root: impl Into<PathBuf>, base_url: Option<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }
}

impl Publisher for DirectoryPublisher {
    fn publish(&self, png: &[u8], name: &str) -> Result<String> {
        let relative = Path::new(name);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(Error::PublishError(format!("Refusing object name {:?}", name)));
        }

        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::PublishError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(&path, png)
            .map_err(|e| Error::PublishError(format!("Failed to write {}: {}", path.display(), e)))?;

        let url = match &self.base_url {
            Some(base) => format!("{}/{}", base, name),
            None => {
                let absolute = path.canonicalize().unwrap_or(path);
                format!("file://{}", absolute.display())
            }
        };
        log::info!("image published to {}", url);
        Ok(url)
    }
}

/// Inlines the image as a `data:` URL; nothing is stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUrlPublisher;

impl Publisher for DataUrlPublisher {
    fn publish(&self, png: &[u8], _name: &str) -> Result<String> {
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }
}
