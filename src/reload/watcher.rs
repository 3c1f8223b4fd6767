//! Filesystem watcher for the handlers directory.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{collections::HashSet, path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::mpsc;

use crate::{
    error::AppError,
    reload::{is_handler_source, Reloader},
};

/// Quiet period before a burst of filesystem events is applied.
pub const DEBOUNCE: Duration = Duration::from_millis(250);

/// Keeps the underlying watcher alive; dropping it stops watching.
pub struct HandlerWatcher {
    _watcher: RecommendedWatcher,
}

impl HandlerWatcher {
    /// Starts watching the reloader's directory, creating it if needed.
    ///
    /// Filesystem events are collected until no new event arrives for [`DEBOUNCE`],
    /// then each touched source file is applied or unloaded once.
    pub fn start(reloader: Arc<Reloader>) -> Result<Self, AppError> {
        let dir = reloader.dir().to_path_buf();
        std::fs::create_dir_all(&dir)?;

        let (tx, mut rx) = mpsc::unbounded_channel::<PathBuf>();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    if matches!(event.kind, EventKind::Access(_)) {
                        return;
                    }
                    for path in event.paths {
                        if is_handler_source(&path) {
                            let _ = tx.send(path);
                        }
                    }
                }
                Err(e) => tracing::warn!("Handler watcher error: {}", e),
            },
            Config::default(),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tokio::spawn(async move {
            let mut pending = HashSet::new();

            while let Some(path) = rx.recv().await {
                pending.insert(path);

                while let Ok(Some(path)) = tokio::time::timeout(DEBOUNCE, rx.recv()).await {
                    pending.insert(path);
                }

                for path in pending.drain() {
                    reloader.handle_change(&path).await;
                }
            }
        });

        tracing::info!("Watching {} for handler changes", dir.display());

        Ok(Self { _watcher: watcher })
    }
}
