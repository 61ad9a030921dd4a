//! Append-only log of everything a command did.
//!
//! One [`Transcript`] is created per process and handed to each operation.
//! Lines are numbered in append order; that number is the only clock the
//! transcript keeps.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    lines: Vec<String>,
    file: Option<File>,
}

impl Transcript {
    /// In-memory transcript, mirrored to `tracing`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript that also appends to `path`, creating parent directories.
    pub fn with_file(path: &Path) -> crate::Result<Self> {
        let open_err = |source| crate::Error::TranscriptOpen {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(open_err)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(open_err)?;

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                lines: Vec::new(),
                file: Some(file),
            })),
        })
    }

    /// Append `text`, one entry per non-blank line.
    pub fn append(&self, text: impl AsRef<str>) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        for line in text.as_ref().lines().filter(|l| !l.trim().is_empty()) {
            let seq = inner.lines.len() + 1;
            tracing::info!(target: "kndeploy::transcript", seq, "{line}");
            if let Some(file) = inner.file.as_mut() {
                if let Err(e) = writeln!(file, "[{seq}] {line}") {
                    tracing::warn!(error = %e, "failed to write transcript file");
                }
            }
            inner.lines.push(line.to_owned());
        }
    }

    /// Snapshot of all lines appended so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .lines
            .clone()
    }
}
