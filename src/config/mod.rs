//! Engine configuration.
//!
//! Every recognized option is a typed field; there is no free-form option map.
//! Override defaults with `RERANK_*` environment variables via [`Config::from_env`].

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{DEFAULT_MAX_DOCS, DEFAULT_THRESHOLD};

/// Pooling strategy requested from the embedding binary on the fallback path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbeddingPooling {
    /// Let the model decide (no `--pooling` flag).
    #[default]
    Default,
    /// Mean pooling (`--pooling mean`).
    Mean,
}

impl EmbeddingPooling {
    /// Value passed to `--pooling`, if any.
    pub fn as_arg(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Mean => Some("mean"),
        }
    }
}

impl FromStr for EmbeddingPooling {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" | "none" => Ok(Self::Default),
            "mean" => Ok(Self::Mean),
            _ => Err(ConfigError::UnknownPooling {
                value: s.to_string(),
            }),
        }
    }
}

/// Options forwarded to the external scoring process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScorerOptions {
    /// Thread count (`-t N`). `None` leaves the binary's default.
    pub threads: Option<usize>,

    /// Pooling used for embedding-mode invocations.
    pub pooling: EmbeddingPooling,
}

impl ScorerOptions {
    /// Rejects a zero thread count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(threads) = self.threads
            && threads == 0
        {
            return Err(ConfigError::InvalidThreads { value: threads });
        }
        Ok(())
    }
}

/// Ranking engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Path to the GGUF model artifact. Required.
    pub model_path: PathBuf,

    /// Explicit path to `llama-embedding`. Discovered when `None`.
    pub binary_path: Option<PathBuf>,

    /// Maximum documents returned by `rerank` and `rank`. `0` means [`DEFAULT_MAX_DOCS`].
    pub max_docs: usize,

    /// Inclusive lower bound on returned scores. Default: `0.0`.
    pub threshold: f32,

    /// Options forwarded to the external process.
    pub options: ScorerOptions,

    /// Per-process deadline. `None` waits indefinitely.
    pub inference_timeout: Option<Duration>,

    /// Probe the binary with `--version` before accepting it. Default: `true`.
    pub self_check: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            binary_path: None,
            max_docs: DEFAULT_MAX_DOCS,
            threshold: DEFAULT_THRESHOLD,
            options: ScorerOptions::default(),
            inference_timeout: None,
            self_check: true,
        }
    }
}

impl Config {
    const ENV_MODEL_PATH: &'static str = "RERANK_MODEL_PATH";
    const ENV_BINARY_PATH: &'static str = "RERANK_BINARY_PATH";
    const ENV_MAX_DOCS: &'static str = "RERANK_MAX_DOCS";
    const ENV_THRESHOLD: &'static str = "RERANK_THRESHOLD";
    const ENV_THREADS: &'static str = "RERANK_THREADS";
    const ENV_POOLING: &'static str = "RERANK_POOLING";
    const ENV_TIMEOUT_SECS: &'static str = "RERANK_TIMEOUT_SECS";
    const ENV_SELF_CHECK: &'static str = "RERANK_SELF_CHECK";

    /// Creates a configuration for `model_path` with defaults elsewhere.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: model_path.into(),
            ..Default::default()
        }
    }

    pub fn with_binary_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.binary_path = Some(path.into());
        self
    }

    pub fn with_max_docs(mut self, max_docs: usize) -> Self {
        self.max_docs = max_docs;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.options.threads = Some(threads);
        self
    }

    pub fn with_pooling(mut self, pooling: EmbeddingPooling) -> Self {
        self.options.pooling = pooling;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.inference_timeout = Some(timeout);
        self
    }

    pub fn with_self_check(mut self, enabled: bool) -> Self {
        self.self_check = enabled;
        self
    }

    /// Returns `max_docs`, substituting [`DEFAULT_MAX_DOCS`] for zero.
    pub fn effective_max_docs(&self) -> usize {
        if self.max_docs == 0 {
            DEFAULT_MAX_DOCS
        } else {
            self.max_docs
        }
    }

    /// Fills defaults for unset values (`max_docs == 0`).
    pub fn normalized(mut self) -> Self {
        self.max_docs = self.effective_max_docs();
        self
    }

    /// Validates invariants that do not touch the filesystem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingModelPath);
        }

        if !self.threshold.is_finite() {
            return Err(ConfigError::InvalidThreshold {
                value: self.threshold,
            });
        }

        if let Some(timeout) = self.inference_timeout
            && timeout.is_zero()
        {
            return Err(ConfigError::InvalidTimeout);
        }

        self.options.validate()
    }

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let model_path =
            Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH).unwrap_or_default();
        let binary_path = Self::parse_optional_path_from_env(Self::ENV_BINARY_PATH);
        let max_docs = Self::parse_from_env(Self::ENV_MAX_DOCS)?.unwrap_or(defaults.max_docs);
        let threshold = Self::parse_from_env(Self::ENV_THRESHOLD)?.unwrap_or(defaults.threshold);
        let threads = Self::parse_from_env(Self::ENV_THREADS)?;
        let pooling = match env::var(Self::ENV_POOLING) {
            Ok(value) => value.parse()?,
            Err(_) => EmbeddingPooling::default(),
        };
        let inference_timeout =
            Self::parse_from_env::<u64>(Self::ENV_TIMEOUT_SECS)?.map(Duration::from_secs);
        let self_check = env::var(Self::ENV_SELF_CHECK)
            .map(|s| s != "false" && s != "0")
            .unwrap_or(defaults.self_check);

        Ok(Self {
            model_path,
            binary_path,
            max_docs,
            threshold,
            options: ScorerOptions { threads, pooling },
            inference_timeout,
            self_check,
        })
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_from_env<T>(var_name: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse()
                    .map(Some)
                    .map_err(|e: T::Err| ConfigError::EnvParse {
                        name: var_name,
                        value: value.clone(),
                        reason: e.to_string(),
                    })
            }
            Err(_) => Ok(None),
        }
    }
}
