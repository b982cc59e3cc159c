//! Sensor package sources and the batch driver
//!
//! Packages come either from the built-in demo list or from a CSV/JSON file.
//! `process_packages` runs each one through read → calculate → summarize and
//! collects the failures instead of stopping at the first one.

use csv::{Position, ReaderBuilder, StringRecord, Trim};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{FitStatsError, Result};
use crate::models::Package;
use crate::report::InfoMessage;
use crate::training::read_package;

/// Where the driver gets its packages from
#[derive(Debug, Clone, PartialEq)]
pub enum PackageSource {
    Demo,
    File(PathBuf),
}

impl PackageSource {
    pub fn load(&self) -> Result<Vec<Package>> {
        match self {
            PackageSource::Demo => Ok(demo_packages()),
            PackageSource::File(path) => load_package_file(path),
        }
    }
}

impl fmt::Display for PackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageSource::Demo => f.write_str("demo packages"),
            PackageSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The fixed package list shipped with the tool
pub fn demo_packages() -> Vec<Package> {
    vec![
        Package::new("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]),
        Package::new("RUN", vec![15000.0, 1.0, 75.0]),
        Package::new("WLK", vec![9000.0, 1.0, 75.0, 180.0]),
    ]
}

/// Load packages from a `.csv` or `.json` file
pub fn load_package_file(path: &Path) -> Result<Vec<Package>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    if extension != "csv" && extension != "json" {
        return Err(FitStatsError::UnsupportedFormat {
            format: if extension.is_empty() {
                "<none>".to_string()
            } else {
                extension
            },
        });
    }

    let content = fs::read_to_string(path)?;
    let packages = if extension == "csv" {
        parse_csv(&content)
    } else {
        serde_json::from_str::<Vec<Package>>(&content).map_err(|e| e.to_string())
    }
    .map_err(|reason| FitStatsError::PackageFile {
        path: path.to_path_buf(),
        reason,
    })?;

    info!(path = %path.display(), count = packages.len(), "Loaded packages");
    Ok(packages)
}

/// Parse header-less CSV rows of `CODE,value,value,...`.
///
/// Rows may differ in length since each type code has its own arity.
/// Lines starting with `#` are skipped.
fn parse_csv(content: &str) -> std::result::Result<Vec<Package>, String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(content.as_bytes());

    let mut packages = Vec::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record).map_err(|e| e.to_string())? {
        let line = record_line(content, reader.position());

        let mut fields = record.iter();
        let code = match fields.next() {
            Some(code) if !code.is_empty() => code,
            _ => return Err(format!("line {} has no workout type", line)),
        };

        let data = fields
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|_| format!("line {}: '{}' is not a number", line, field))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        packages.push(Package::new(code, data));
    }

    Ok(packages)
}

/// Line of the record that just ended at `end`.
///
/// A record's own start position lies before any comment or blank lines
/// the reader skipped, so the line is taken from where the record ended.
fn record_line(content: &str, end: &Position) -> u64 {
    let ended_on_newline = (end.byte() as usize)
        .checked_sub(1)
        .and_then(|i| content.as_bytes().get(i))
        == Some(&b'\n');
    if ended_on_newline {
        end.line() - 1
    } else {
        end.line()
    }
}

/// A package that could not be turned into a summary
#[derive(Debug)]
pub struct PackageFailure {
    /// Position in the input list
    pub index: usize,
    pub workout_type: String,
    pub error: FitStatsError,
}

/// Result of running a whole package list
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub messages: Vec<InfoMessage>,
    pub failures: Vec<PackageFailure>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.messages.len() + self.failures.len()
    }

    pub fn all_failed(&self) -> bool {
        self.messages.is_empty() && !self.failures.is_empty()
    }
}

/// Summarize a single package
pub fn summarize(package: &Package) -> Result<InfoMessage> {
    let training = read_package(&package.workout_type, package.data.values())?;
    let message = training.show_training_info()?;
    debug!(
        workout_type = %package.workout_type,
        distance = message.distance,
        speed = message.speed,
        calories = message.calories,
        "Computed training"
    );
    Ok(message)
}

/// Summarize every package in order, skipping the ones that fail
pub fn process_packages(packages: &[Package]) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (index, package) in packages.iter().enumerate() {
        match summarize(package) {
            Ok(message) => outcome.messages.push(message),
            Err(error) => {
                warn!(
                    index,
                    workout_type = %package.workout_type,
                    error = %error,
                    "Skipping package"
                );
                outcome.failures.push(PackageFailure {
                    index,
                    workout_type: package.workout_type.clone(),
                    error,
                });
            }
        }
    }

    info!(
        processed = outcome.messages.len(),
        skipped = outcome.failures.len(),
        "Batch complete"
    );
    outcome
}
