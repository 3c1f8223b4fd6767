//! Runtime handler reloading.
//!
//! Handler sources in the handlers directory are applied on top of the builtin
//! handlers at startup and again whenever the watcher sees them change. The
//! registry only ever sees whole descriptors swapped through its reload contract;
//! nothing in the dispatch core touches the filesystem.

pub mod source;
pub mod watcher;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::Mutex;

use crate::{
    commands::{self, ActionCatalog},
    dispatch::registry::{CommandRegistry, HandlerId},
    error::{AppError, ReloadError},
    reload::source::HandlerSource,
    service::error_sink::ErrorSink,
};

/// Whether `path` looks like a handler source file.
pub fn is_handler_source(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == "json")
}

pub struct Reloader {
    registry: Arc<CommandRegistry>,
    catalog: ActionCatalog,
    error_sink: ErrorSink,
    dir: PathBuf,
    /// Which handler each source file registered, so edits and removals can find it.
    loaded: Mutex<HashMap<PathBuf, HandlerId>>,
}

impl Reloader {
    pub fn new(
        registry: Arc<CommandRegistry>,
        catalog: ActionCatalog,
        error_sink: ErrorSink,
        dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            catalog,
            error_sink,
            dir: dir.into(),
            loaded: Mutex::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Applies every handler source in the directory.
    ///
    /// A missing directory loads nothing. Sources that fail to load are logged and
    /// written to the error sink; the rest still load.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of sources applied
    /// - `Err(AppError::IoErr)` - The directory exists but could not be listed
    pub async fn load_dir(&self) -> Result<usize, AppError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if is_handler_source(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut applied = 0;
        for path in paths {
            match self.apply_file(&path).await {
                Ok(_) => applied += 1,
                Err(e) => self.report(&path, e).await,
            }
        }

        Ok(applied)
    }

    /// Parses one source file and swaps its descriptor into the registry.
    ///
    /// On failure the registry is left exactly as it was.
    pub async fn apply_file(&self, path: &Path) -> Result<HandlerId, ReloadError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ReloadError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let descriptor = HandlerSource::parse(path, &raw)?.into_descriptor(&self.catalog)?;
        let id: HandlerId = (descriptor.namespace, descriptor.name.clone());

        let mut loaded = self.loaded.lock().await;
        let previous = loaded.insert(path.to_path_buf(), id.clone());

        self.registry.reload(previous.as_ref(), descriptor).await;

        if let Some(previous) = previous.filter(|previous| *previous != id) {
            self.restore_builtin(&previous).await;
        }

        tracing::info!(
            "Loaded {} handler {} from {}",
            id.0.as_str(),
            id.1,
            path.display()
        );

        Ok(id)
    }

    /// Unregisters the handler a removed source file had registered.
    ///
    /// A builtin with the same name takes its place again.
    pub async fn remove_file(&self, path: &Path) -> Option<HandlerId> {
        let id = self.loaded.lock().await.remove(path)?;

        self.registry.unregister(id.0, &id.1).await;
        self.restore_builtin(&id).await;

        tracing::info!(
            "Unloaded {} handler {} after {} was removed",
            id.0.as_str(),
            id.1,
            path.display()
        );

        Some(id)
    }

    /// Reacts to a change of `path`: applies it if it exists, unloads it otherwise.
    pub async fn handle_change(&self, path: &Path) {
        if !is_handler_source(path) {
            return;
        }

        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            if let Err(e) = self.apply_file(path).await {
                self.report(path, e).await;
            }
        } else {
            self.remove_file(path).await;
        }
    }

    async fn restore_builtin(&self, id: &HandlerId) {
        if let Some(builtin) = commands::builtin(id.0, &id.1) {
            tracing::debug!("Restoring builtin {} handler {}", id.0.as_str(), id.1);
            self.registry.register(builtin).await;
        }
    }

    async fn report(&self, path: &Path, error: ReloadError) {
        tracing::warn!(
            "Failed to load handler source {}: {}",
            path.display(),
            error
        );

        let context = format!("Loading handler source {}", path.display());
        self.error_sink.record(&context, &error).await;
    }
}
