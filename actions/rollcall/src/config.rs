use crate::error::{Error, Result};
use crate::pipeline::DEFAULT_FAILURE_THRESHOLD;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Sort order for discovered record files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl From<&str> for SortOrder {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "DESC" => SortOrder::Descending,
            "ASC" | _ => SortOrder::Ascending,
        }
    }
}

/// Which kind of raw record the files hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Votes,
    Bills,
}

impl RecordKind {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "votes" | "vote" => Ok(RecordKind::Votes),
            "bills" | "bill" => Ok(RecordKind::Bills),
            other => Err(Error::Config(format!(
                "Invalid record kind '{}'. Allowed values are: votes, bills",
                other
            ))),
        }
    }
}

/// Optional `rollcall.yml` defaults. Command-line flags win over these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
    pub failure_threshold: Option<usize>,
}

impl FileConfig {
    pub const FILE_NAME: &'static str = "rollcall.yml";

    /// Load and parse a YAML config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load `path` if given, else `rollcall.yml` in the working directory when present
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(Self::FILE_NAME);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Environment variable naming the data directory
pub const DATA_DIR_ENV: &str = "ROLLCALL_DIR";

/// Pick the data directory: the command-line flag, then [`DATA_DIR_ENV`], then the
/// config file, then `./data`.
pub fn resolve_data_dir(flag: Option<PathBuf>, env: Option<PathBuf>, file: &FileConfig) -> PathBuf {
    flag.or(env)
        .or_else(|| file.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Configuration for the record processor
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub kind: RecordKind,
    pub sort_order: SortOrder,
    pub limit: Option<usize>,
    pub failure_threshold: usize,
}

impl Config {
    /// Create a new default configuration
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            kind: RecordKind::Votes,
            sort_order: SortOrder::Ascending,
            limit: None,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.data_dir.exists() {
            return Err(Error::Config(format!(
                "Data directory does not exist: {}",
                self.data_dir.display()
            )));
        }

        if !self.data_dir.is_dir() {
            return Err(Error::Config(format!(
                "Data directory is not a directory: {}",
                self.data_dir.display()
            )));
        }

        Ok(())
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::new(data_dir),
        }
    }

    /// Start from file defaults; `data_dir` applies when the file names none
    pub fn from_file(file: &FileConfig, data_dir: impl Into<PathBuf>) -> Self {
        let mut builder = Self::new(file.data_dir.clone().unwrap_or_else(|| data_dir.into()));
        if let Some(sort) = &file.sort {
            builder.config.sort_order = SortOrder::from(sort.as_str());
        }
        builder.config.limit = file.limit;
        if let Some(threshold) = file.failure_threshold {
            builder.config.failure_threshold = threshold;
        }
        builder
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    pub fn kind(mut self, kind: RecordKind) -> Self {
        self.config.kind = kind;
        self
    }

    pub fn kind_str(mut self, kind: &str) -> Result<Self> {
        self.config.kind = RecordKind::parse(kind)?;
        Ok(self)
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.config.sort_order = order;
        self
    }

    /// Set sort order from string
    pub fn sort_order_str(mut self, order: &str) -> Result<Self> {
        match order.to_uppercase().as_str() {
            "ASC" | "DESC" => {
                self.config.sort_order = SortOrder::from(order);
                Ok(self)
            }
            _ => Err(Error::Config(format!(
                "Invalid sort order '{}'. Allowed values are: ASC, DESC",
                order
            ))),
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = Some(limit);
        self
    }

    pub fn no_limit(mut self) -> Self {
        self.config.limit = None;
        self
    }

    pub fn failure_threshold(mut self, threshold: usize) -> Self {
        self.config.failure_threshold = threshold;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("data")
    }
}
