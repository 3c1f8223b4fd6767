//! Durable records of handler faults.
//!
//! Each fault is written to its own text file named after the UTC time it happened,
//! with `:` replaced by `-` so the name is valid on every filesystem. Writing is
//! gated by `errorLogging.enabled` in the runtime settings, read at each fault.

use chrono::{SecondsFormat, Utc};
use std::{
    error::Error,
    path::{Path, PathBuf},
};
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::settings::SettingsSource;

/// Upper bound on same-timestamp suffixes tried before giving up.
const MAX_NAME_ATTEMPTS: usize = 100;

#[derive(Debug, Clone)]
pub struct ErrorSink {
    dir: PathBuf,
    settings: SettingsSource,
}

impl ErrorSink {
    pub fn new(dir: impl Into<PathBuf>, settings: SettingsSource) -> Self {
        Self {
            dir: dir.into(),
            settings,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes a fault record, returning the file it was written to.
    ///
    /// Never fails: if error logging is switched off nothing is written, and a failed
    /// write is logged at warn level.
    pub async fn record(
        &self,
        context: &str,
        error: &(dyn Error + Send + Sync + 'static),
    ) -> Option<PathBuf> {
        if !self.settings.load().await.error_logging_enabled() {
            return None;
        }

        let body = render(context, error);

        match self.write(&body).await {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(
                    "Failed to write error record to {}: {}",
                    self.dir.display(),
                    e
                );
                None
            }
        }
    }

    async fn write(&self, body: &str) -> Result<PathBuf, std::io::Error> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let stamp = Utc::now()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace(':', "-");

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = match attempt {
                0 => format!("{}.txt", stamp),
                n => format!("{}-{}.txt", stamp, n),
            };
            let path = self.dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(mut file) => {
                    file.write_all(body.as_bytes()).await?;
                    file.flush().await?;
                    return Ok(path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }

        Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("no free error record name for {}", stamp),
        ))
    }
}

/// Context line, error message and the full source chain.
fn render(context: &str, error: &(dyn Error + Send + Sync + 'static)) -> String {
    let mut body = format!("{}\n{}\n", context, error);

    let mut source = error.source();
    while let Some(cause) = source {
        body.push_str(&format!("Caused by: {}\n", cause));
        source = cause.source();
    }

    body.push_str(&format!("\n{:?}\n", error));
    body
}
