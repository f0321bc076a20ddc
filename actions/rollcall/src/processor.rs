use crate::bill::BillDetails;
use crate::config::{Config, RecordKind, SortOrder};
use crate::decision::BillDecision;
use crate::error::{Error, Result};
use crate::goal::VoteGoal;
use crate::pipeline::Describe;
use crate::positions::{self, VotePositionSet};
use crate::raw::{RawBillDetails, RawVoteRecord};
use crate::timeline::TimelineMilestone;
use crate::vote::{self, VoteRecord};
use async_stream::stream;
use futures::Stream;
use jwalk::WalkDir;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A record file found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFile {
    pub path: PathBuf,
    pub relative_path: String,
}

/// One normalized vote, as printed by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct VoteEntry {
    pub file: String,
    pub vote: VoteRecord,
    pub goal: Option<VoteGoal>,
    pub positions: Option<VotePositionSet>,
}

/// One normalized bill with its decisions and timeline
#[derive(Debug, Clone, Serialize)]
pub struct BillEntry {
    pub file: String,
    pub bill_id: String,
    pub decisions: Vec<BillDecision>,
    pub timeline: Vec<TimelineMilestone>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Vote(VoteEntry),
    Bill(BillEntry),
}

/// Discovers raw record files and streams their normalized form
pub struct RecordProcessor {
    config: Config,
}

impl RecordProcessor {
    /// Create a new processor with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Discover `*.json` under the data directory and normalize every record in them
    pub fn process(&self) -> impl Stream<Item = Result<Entry>> {
        let config = self.config.clone();
        let config_for_discovery = config.clone();
        Box::pin(stream! {
            // jwalk is synchronous, so discovery runs on the blocking pool
            let files = match tokio::task::spawn_blocking(move || {
                Self::discover_files_internal(&config_for_discovery)
            }).await {
                Ok(Ok(files)) => files,
                Ok(Err(e)) => {
                    yield Err(e);
                    return;
                }
                Err(e) => {
                    yield Err(Error::Io(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Task join error: {}", e)
                    )));
                    return;
                }
            };
            debug!(count = files.len(), dir = %config.data_dir.display(), "discovered record files");

            let files = Self::apply_limit_internal(&config, Self::sort_files_internal(&config, files));
            for await item in Self::process_files_internal(config, files) {
                yield item;
            }
        })
    }

    /// Process files named on stdin (one path per line)
    pub fn process_from_stdin(
        config: &Config,
        paths: impl Iterator<Item = String>,
    ) -> impl Stream<Item = Result<Entry>> {
        let config = config.clone();
        Box::pin(stream! {
            let mut files = Vec::new();
            for path_str in paths {
                let path = Path::new(path_str.trim());
                if !path.is_file() || !Self::is_json(path) {
                    continue;
                }
                let relative_path = path
                    .strip_prefix(&config.data_dir)
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_else(|_| path.to_string_lossy().to_string());
                files.push(RecordFile { path: path.to_path_buf(), relative_path });
            }

            let files = Self::apply_limit_internal(&config, Self::sort_files_internal(&config, files));
            for await item in Self::process_files_internal(config, files) {
                yield item;
            }
        })
    }

    fn is_json(path: &Path) -> bool {
        path.extension().map(|e| e == "json").unwrap_or(false)
    }

    fn discover_files_internal(config: &Config) -> Result<Vec<RecordFile>> {
        let mut files = Vec::new();
        for entry_result in WalkDir::new(&config.data_dir).into_iter() {
            let entry = match entry_result {
                Ok(e) => e,
                Err(_) => continue,
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !Self::is_json(&path) {
                continue;
            }
            let relative_path = Self::calculate_relative_path(&path, &config.data_dir)?;
            files.push(RecordFile { path, relative_path });
        }
        Ok(files)
    }

    fn calculate_relative_path(path: &Path, search_dir: &Path) -> Result<String> {
        let search_dir_abs = search_dir.canonicalize().map_err(|_| {
            Error::Path(format!("Failed to canonicalize search directory: {}", search_dir.display()))
        })?;
        let path_abs = path.canonicalize().map_err(|_| {
            Error::Path(format!("Failed to canonicalize path: {}", path.display()))
        })?;

        let relative = pathdiff::diff_paths(&path_abs, &search_dir_abs)
            .ok_or_else(|| Error::Path("Failed to calculate relative path".to_string()))?;
        Ok(relative.to_string_lossy().to_string())
    }

    /// Files are named by congress/session/roll call, so path order is record order
    fn sort_files_internal(config: &Config, mut files: Vec<RecordFile>) -> Vec<RecordFile> {
        match config.sort_order {
            SortOrder::Ascending => files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path)),
            SortOrder::Descending => files.sort_by(|a, b| b.relative_path.cmp(&a.relative_path)),
        }
        files
    }

    fn apply_limit_internal(config: &Config, files: Vec<RecordFile>) -> Vec<RecordFile> {
        if let Some(limit) = config.limit {
            files.into_iter().take(limit).collect()
        } else {
            files
        }
    }

    /// Normalize every record of every file. Individual failures are yielded as
    /// errors; once more than the configured threshold have failed, the stream
    /// yields [`Error::TooManyFailures`] and ends.
    fn process_files_internal(config: Config, files: Vec<RecordFile>) -> impl Stream<Item = Result<Entry>> {
        stream! {
            let mut failures = 0usize;
            for file in files {
                let results = match config.kind {
                    RecordKind::Votes => Self::process_vote_file_internal(&file).await,
                    RecordKind::Bills => Self::process_bill_file_internal(&file).await,
                };

                for result in results {
                    if let Err(e) = &result {
                        failures += 1;
                        warn!(file = %file.relative_path, error = %e, "record failed");
                    }
                    yield result;
                    if failures > config.failure_threshold {
                        yield Err(Error::TooManyFailures {
                            failures,
                            threshold: config.failure_threshold,
                        });
                        return;
                    }
                }
            }
        }
    }

    /// Read a file holding one record or an array of them
    async fn read_records<R: DeserializeOwned>(file: &RecordFile) -> Result<Vec<R>> {
        let content = tokio::fs::read_to_string(&file.path).await?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        let records = match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<std::result::Result<Vec<R>, _>>()?,
            other => vec![serde_json::from_value(other)?],
        };
        Ok(records)
    }

    async fn process_vote_file_internal(file: &RecordFile) -> Vec<Result<Entry>> {
        let records: Vec<RawVoteRecord> = match Self::read_records(file).await {
            Ok(records) => records,
            Err(e) => return vec![Err(e)],
        };

        records
            .iter()
            .map(|record| {
                let (vote, positions) = match record.positions {
                    Some(_) => {
                        let (vote, set) = positions::normalize_with_positions(record)?;
                        (vote, Some(set))
                    }
                    None => (vote::classify(record)?, None),
                };
                debug!(record = %record.describe(), "normalized vote");
                Ok(Entry::Vote(VoteEntry {
                    file: file.relative_path.clone(),
                    goal: vote.goal(),
                    vote,
                    positions,
                }))
            })
            .collect()
    }

    async fn process_bill_file_internal(file: &RecordFile) -> Vec<Result<Entry>> {
        let records: Vec<RawBillDetails> = match Self::read_records(file).await {
            Ok(records) => records,
            Err(e) => return vec![Err(e)],
        };

        records
            .iter()
            .map(|raw| {
                let bill = BillDetails::from_raw(raw)?;
                let decisions = bill.history();
                let timeline = crate::timeline::build_timeline(&bill, &decisions);
                Ok(Entry::Bill(BillEntry {
                    file: file.relative_path.clone(),
                    bill_id: bill.meta.id.clone(),
                    decisions,
                    timeline,
                }))
            })
            .collect()
    }
}
