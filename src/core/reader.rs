//! Background file reading.
//!
//! Reads run on short-lived named threads and report back over a
//! crossbeam channel. The UI thread drains completions once per frame.
//! No cancellation: whichever read completes last is applied last.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, error, trace};

use crate::error::TimelineResult;

/// Text of one file, or the reason it could not be read.
#[derive(Debug)]
pub struct ReadCompleted {
    pub path: PathBuf,
    pub result: TimelineResult<String>,
}

impl ReadCompleted {
    /// File name component used for the `FileContext`.
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Starts a read; the completion arrives asynchronously.
pub trait FileReader {
    fn read(&self, path: PathBuf);
}

type Notify = Arc<dyn Fn() + Send + Sync>;

/// `FileReader` that spawns one thread per request.
#[derive(Clone)]
pub struct ThreadReader {
    tx: Sender<ReadCompleted>,
    notify: Option<Notify>,
}

impl ThreadReader {
    pub fn new() -> (Self, Receiver<ReadCompleted>) {
        let (tx, rx) = unbounded();
        (Self { tx, notify: None }, rx)
    }

    /// Called after each completion is queued (e.g. to wake the UI).
    pub fn with_notify(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.notify = Some(Arc::new(notify));
        self
    }
}

impl FileReader for ThreadReader {
    fn read(&self, path: PathBuf) {
        let tx = self.tx.clone();
        let notify = self.notify.clone();
        let spawned = thread::Builder::new()
            .name("timeline-reader".into())
            .spawn(move || {
                trace!("Reading {}", path.display());
                let result = std::fs::read_to_string(&path).map_err(Into::into);
                debug!("Read finished: {} (ok={})", path.display(), result.is_ok());
                if tx.send(ReadCompleted { path, result }).is_err() {
                    debug!("Reader channel closed, dropping completion");
                    return;
                }
                if let Some(notify) = notify {
                    notify();
                }
            });
        if let Err(e) = spawned {
            error!("Failed to spawn reader thread: {}", e);
        }
    }
}
