//! Dataset scanning and validation.
//!
//! A scanner enumerates the files behind a dataset path, checks every file
//! against an [`ExtensionRegistry`] and logs one summary line describing what
//! it found.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EdaError, Result};
use crate::logging::ConsoleLogger;
use crate::registry::{extension_of, ExtensionRegistry, FormatEntry};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Something that turns a dataset path into processed data.
pub trait DatasetProcessor {
    /// Extensions this processor accepts
    const REGISTRY: ExtensionRegistry;

    type Output;

    /// Scan the dataset and process it.
    ///
    /// `split` is accepted for future train/test splitting and currently has
    /// no effect.
    fn get_processed_data(&mut self, split: bool) -> Result<Self::Output>;
}

#[derive(Clone, Debug)]
pub struct ScannerConfig {
    pub dataset_path: PathBuf,
}

/// Validated files of a dataset with their index-aligned extensions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Manifest {
    paths: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.paths
            .iter()
            .map(PathBuf::as_path)
            .zip(self.extensions.iter().map(String::as_str))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DatasetKind {
    File { label: &'static str },
    Directory { formats: Vec<&'static str> },
}

/// Outcome of one scan: the manifest plus the statistics that were logged.
#[derive(Clone, Debug)]
pub struct ScanSummary {
    pub kind: DatasetKind,
    pub manifest: Manifest,
    pub total_size_mb: f64,
}

impl ScanSummary {
    pub fn count(&self) -> usize {
        self.manifest.len()
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DatasetKind::File { label } => {
                write!(f, "Image is a {label} of size {:.4} MB.", self.total_size_mb)
            }
            DatasetKind::Directory { formats } => write!(
                f,
                "The dataset directory has {} images with file formats {} and a total size of {:.4} MB.",
                self.count(),
                formats.join(", "),
                self.total_size_mb
            ),
        }
    }
}

#[derive(Debug)]
pub struct DatasetScanner {
    dataset_path: PathBuf,
    logger: ConsoleLogger,
    manifest: Option<Manifest>,
}

impl DatasetScanner {
    pub fn new(config: ScannerConfig, logger: ConsoleLogger) -> Result<Self> {
        if !config.dataset_path.exists() {
            let err = EdaError::PathNotFound(config.dataset_path);
            logger.error(&err);
            return Err(err);
        }

        Ok(Self {
            dataset_path: config.dataset_path,
            logger,
            manifest: None,
        })
    }

    pub fn logger(&self) -> &ConsoleLogger {
        &self.logger
    }

    /// Manifest of the most recent successful scan.
    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    /// Return the extension of `file_path` if `registry` accepts it.
    pub fn validate_extension(
        &self,
        registry: &ExtensionRegistry,
        file_path: &Path,
    ) -> Result<String> {
        let extension = extension_of(file_path);
        if !registry.contains(&extension) {
            return Err(self.log_failure(EdaError::InvalidExtension(file_path.to_path_buf())));
        }
        Ok(extension)
    }

    /// File size in MiB, unrounded.
    pub fn file_size_mb(&self, file_path: &Path) -> Result<f64> {
        let metadata = fs::metadata(file_path).map_err(|source| {
            self.log_failure(EdaError::Io {
                path: file_path.to_path_buf(),
                source,
            })
        })?;
        Ok(metadata.len() as f64 / BYTES_PER_MB)
    }

    /// Enumerate and validate the dataset, then log a one line summary.
    ///
    /// The stored manifest is replaced only when every file passes validation.
    pub fn scan_and_summarize(&mut self, registry: &ExtensionRegistry) -> Result<ScanSummary> {
        let single_file = self.dataset_path.is_file();
        let paths = if single_file {
            vec![self.dataset_path.clone()]
        } else if self.dataset_path.is_dir() {
            self.list_children()?
        } else {
            return Err(self.log_failure(EdaError::PathNotFound(self.dataset_path.clone())));
        };

        let extensions = paths
            .iter()
            .map(|path| self.validate_extension(registry, path))
            .collect::<Result<Vec<_>>>()?;

        let total_size_mb = paths
            .iter()
            .map(|path| self.file_size_mb(path))
            .sum::<Result<f64>>()?;

        let kind = if single_file {
            DatasetKind::File {
                label: self.label_for(registry, &extensions[0]),
            }
        } else {
            let formats: BTreeSet<&'static str> = extensions
                .iter()
                .map(|extension| self.label_for(registry, extension))
                .collect();
            DatasetKind::Directory {
                formats: formats.into_iter().collect(),
            }
        };

        let manifest = Manifest { paths, extensions };
        let summary = ScanSummary {
            kind,
            manifest: manifest.clone(),
            total_size_mb,
        };

        self.logger.info(&summary);
        self.manifest = Some(manifest);

        Ok(summary)
    }

    /// Log `err` through this scanner's logger and hand it back for propagation.
    pub(crate) fn log_failure(&self, err: EdaError) -> EdaError {
        self.logger.error(&err);
        err
    }

    // Immediate children only; hidden entries and subdirectories are skipped
    fn list_children(&self) -> Result<Vec<PathBuf>> {
        let io_error = |source: std::io::Error| {
            self.log_failure(EdaError::Io {
                path: self.dataset_path.clone(),
                source,
            })
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dataset_path).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            let hidden = path
                .file_name()
                .map(|name| name.to_string_lossy().starts_with('.'))
                .unwrap_or(true);
            if hidden || !path.is_file() {
                continue;
            }
            paths.push(path);
        }

        paths.sort();
        Ok(paths)
    }

    fn label_for(&self, registry: &ExtensionRegistry, extension: &str) -> &'static str {
        registry.label(extension).unwrap_or("unknown")
    }
}

/// Scanner that only enumerates, validates and summarizes image files.
#[derive(Debug)]
pub struct PlainImageScanner {
    scanner: DatasetScanner,
}

impl PlainImageScanner {
    pub fn new(config: ScannerConfig, logger: ConsoleLogger) -> Result<Self> {
        Ok(Self {
            scanner: DatasetScanner::new(config, logger)?,
        })
    }

    pub fn scanner(&self) -> &DatasetScanner {
        &self.scanner
    }
}

impl DatasetProcessor for PlainImageScanner {
    const REGISTRY: ExtensionRegistry = ExtensionRegistry::new(&[FormatEntry {
        extension: ".jpg",
        label: "JPEG",
        decode: None,
    }]);

    type Output = ScanSummary;

    fn get_processed_data(&mut self, _split: bool) -> Result<ScanSummary> {
        self.scanner.scan_and_summarize(&Self::REGISTRY)
    }
}
