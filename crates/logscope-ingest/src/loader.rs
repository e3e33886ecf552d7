use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use logscope_store::LogStore;
use logscope_types::LogRecord;

use crate::parser::LineParser;

/// I/O failure during a load pass
///
/// Parse rejections are not errors; they are counted in the summary.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to list {path}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Accounting for one load pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Source files read
    pub files: usize,

    /// Lines accepted by the parser
    pub loaded: usize,

    /// Lines dropped by the parser
    pub rejected: usize,
}

/// Records and accounting from one successful load pass
#[derive(Debug)]
pub struct LoadedBatch {
    pub records: Vec<LogRecord>,
    pub summary: LoadSummary,
}

/// Batch loader for a directory of log files
#[derive(Clone, Debug)]
pub struct Loader {
    dir: PathBuf,
    extension: String,
}

impl Loader {
    /// Create a loader for `dir`, picking up `*.log` files
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: "log".to_string(),
        }
    }

    /// Override the file extension picked up during discovery
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Source directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read every matching file in the directory into a batch
    ///
    /// A missing directory yields an empty batch. Malformed lines are
    /// dropped and counted; any I/O failure aborts the whole pass.
    pub fn load(&self) -> Result<LoadedBatch, IngestError> {
        let mut records = Vec::new();
        let mut summary = LoadSummary::default();

        for path in self.discover()? {
            self.read_file(&path, &mut records, &mut summary)?;
            summary.files += 1;
        }

        info!(
            dir = %self.dir.display(),
            files = summary.files,
            loaded = summary.loaded,
            rejected = summary.rejected,
            "load pass complete"
        );
        Ok(LoadedBatch { records, summary })
    }

    /// Load the directory and atomically replace the store contents
    ///
    /// The whole batch is parsed before the store is touched, so a
    /// failed load leaves the previous contents in effect.
    pub fn load_into(&self, store: &LogStore) -> Result<LoadSummary, IngestError> {
        let batch = self.load()?;
        store.replace(batch.records);
        Ok(batch.summary)
    }

    /// Files in the source directory matching the extension
    ///
    /// Order is whatever the filesystem returns.
    fn discover(&self) -> Result<Vec<PathBuf>, IngestError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(IngestError::ReadDir {
                    path: self.dir.clone(),
                    source: e,
                });
            }
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| IngestError::ReadDir {
                path: self.dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if path.is_file() && path.extension() == Some(OsStr::new(&self.extension)) {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    fn read_file(
        &self,
        path: &Path,
        records: &mut Vec<LogRecord>,
        summary: &mut LoadSummary,
    ) -> Result<(), IngestError> {
        let file = File::open(path).map_err(|e| IngestError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| IngestError::ReadFile {
                path: path.to_path_buf(),
                source: e,
            })?;
            match LineParser::parse(&line) {
                Ok(record) => {
                    records.push(record);
                    summary.loaded += 1;
                }
                Err(reason) => {
                    debug!(path = %path.display(), %reason, "dropped line");
                    summary.rejected += 1;
                }
            }
        }
        Ok(())
    }
}
