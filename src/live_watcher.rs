use log::{error, info};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

/// Real-time snapshot watcher with instant updates.
///
/// Watches the snapshot file's parent directory rather than the file itself,
/// since writers typically replace the file atomically (write temp + rename).
pub struct LiveWatcher {
    watcher: RecommendedWatcher,
    watch_dir: PathBuf,
    /// Debounce timer to prevent excessive reloads
    last_event: Arc<Mutex<Option<Instant>>>,
    /// Set when the snapshot changed but hasn't been reloaded yet
    pending: Arc<Mutex<bool>>,
    /// Callback invoked once per debounced change
    on_change: Arc<dyn Fn() + Send + Sync>,
}

impl LiveWatcher {
    pub fn new(
        snapshot_path: PathBuf,
        on_change: Arc<dyn Fn() + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let watch_dir = snapshot_path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name = snapshot_path.file_name().map(|n| n.to_owned());

        let pending = Arc::new(Mutex::new(false));
        let pending_clone = pending.clone();
        let last_event = Arc::new(Mutex::new(None));
        let last_event_clone = last_event.clone();

        // 100ms poll interval keeps fallback polling responsive
        let config = Config::default().with_poll_interval(Duration::from_millis(100));

        let watcher = RecommendedWatcher::new(
            move |res: Result<Event, _>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        for path in event.paths {
                            if let Some(path_str) = path.to_str() {
                                // Skip editor temporary files
                                if path_str.contains(".swp")
                                    || path_str.contains(".tmp")
                                    || path_str.contains('~')
                                {
                                    continue;
                                }
                            }
                            if path.file_name().map(|n| n.to_owned()) == file_name {
                                *last_event_clone.lock() = Some(Instant::now());
                                *pending_clone.lock() = true;
                            }
                        }
                    }
                }
                Err(e) => error!("File watcher error: {:?}", e),
            },
            config,
        )?;

        Ok(Self {
            watcher,
            watch_dir,
            last_event,
            pending,
            on_change,
        })
    }

    /// Start watching
    pub fn start(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.watcher
            .watch(&self.watch_dir, RecursiveMode::NonRecursive)?;
        info!(
            "Watching snapshot directory for live updates: {}",
            self.watch_dir.display()
        );
        Ok(())
    }

    /// Invoke the change callback once the last event is at least 80ms old.
    pub fn process_changes(&self) {
        let mut pending = self.pending.lock();
        if !*pending {
            return;
        }

        if let Some(last_event) = *self.last_event.lock() {
            if last_event.elapsed() < Duration::from_millis(80) {
                return;
            }
        }

        *pending = false;
        (self.on_change)();
    }
}
