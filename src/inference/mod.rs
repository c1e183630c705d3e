//! Invocation of the external `llama-embedding` process.
//!
//! One call spawns one short-lived child and reaps it. There are no retries here;
//! fallback policy lives in [`crate::engine`]. Children are spawned with
//! `kill_on_drop`, so a cancelled or timed-out call kills its process.

pub mod error;


pub use error::InferenceError;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::ScorerOptions;
use crate::constants::{RANK_SEP_END, RANK_SEP_START, STDERR_TAIL_BYTES};

/// What the binary should compute for an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceMode {
    /// Rank pooling over a combined query/document input.
    Rank,
    /// A single text's L2-normalized embedding as JSON.
    Embedding,
}

/// Separately captured output streams of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Formats a query/document pair with the boundary markers rerankers expect.
#[inline]
pub fn format_rank_input(query: &str, document: &str) -> String {
    format!("{query}{RANK_SEP_END}{RANK_SEP_START}{document}")
}

/// Runs `llama-embedding` against a fixed model.
#[derive(Debug, Clone)]
pub struct LlamaInvoker {
    binary: PathBuf,
    model: PathBuf,
    options: ScorerOptions,
    timeout: Option<Duration>,
}

impl LlamaInvoker {
    pub fn new(binary: PathBuf, model: PathBuf, options: ScorerOptions) -> Self {
        Self {
            binary,
            model,
            options,
            timeout: None,
        }
    }

    /// Sets a per-process deadline.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn model(&self) -> &Path {
        &self.model
    }

    pub fn options(&self) -> &ScorerOptions {
        &self.options
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Arguments for rank mode: un-normalized score, verbose diagnostics.
    pub fn rank_args(&self, query: &str, document: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-m".into(),
            self.model.clone().into_os_string(),
            "-p".into(),
            format_rank_input(query, document).into(),
            "--pooling".into(),
            "rank".into(),
            "--embd-normalize".into(),
            "-1".into(),
            "--verbose-prompt".into(),
        ];
        self.push_thread_args(&mut args);
        args
    }

    /// Arguments for embedding mode: JSON output, L2 normalization.
    pub fn embedding_args(&self, text: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-m".into(),
            self.model.clone().into_os_string(),
            "-p".into(),
            text.into(),
            "--embd-output-format".into(),
            "json".into(),
            "--embd-normalize".into(),
            "2".into(),
        ];
        if let Some(pooling) = self.options.pooling.as_arg() {
            args.push("--pooling".into());
            args.push(pooling.into());
        }
        self.push_thread_args(&mut args);
        args
    }

    fn push_thread_args(&self, args: &mut Vec<OsString>) {
        if let Some(threads) = self.options.threads
            && threads > 0
        {
            args.push("-t".into());
            args.push(threads.to_string().into());
        }
    }

    /// Runs rank mode for one query/document pair.
    pub async fn rank(
        &self,
        query: &str,
        document: &str,
        cancel: &CancellationToken,
    ) -> Result<InferenceOutput, InferenceError> {
        self.invoke(InferenceMode::Rank, self.rank_args(query, document), cancel)
            .await
    }

    /// Runs embedding mode for one text.
    pub async fn embed(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<InferenceOutput, InferenceError> {
        self.invoke(InferenceMode::Embedding, self.embedding_args(text), cancel)
            .await
    }

    async fn invoke(
        &self,
        mode: InferenceMode,
        args: Vec<OsString>,
        cancel: &CancellationToken,
    ) -> Result<InferenceOutput, InferenceError> {
        debug!(
            ?mode,
            binary = %self.binary.display(),
            model = %self.model.display(),
            threads = ?self.options.threads,
            "Invoking inference process"
        );
        run_process(&self.binary, &args, self.timeout, cancel).await
    }
}

/// Spawns `program` with `args`, waits for it, and captures both streams.
///
/// The wait races `cancel` and the optional `timeout`; whichever fires first
/// drops the child, which kills it.
pub async fn run_process(
    program: &Path,
    args: &[OsString],
    timeout: Option<Duration>,
    cancel: &CancellationToken,
) -> Result<InferenceOutput, InferenceError> {
    if cancel.is_cancelled() {
        return Err(InferenceError::Cancelled);
    }

    let mut cmd = Command::new(program);
    cmd.args(args)
        .kill_on_drop(true)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let child = cmd.spawn().map_err(|source| InferenceError::SpawnFailed {
        binary: program.to_path_buf(),
        source,
    })?;

    let wait = async {
        match timeout {
            Some(after) => match tokio::time::timeout(after, child.wait_with_output()).await {
                Ok(result) => result.map_err(InferenceError::from),
                Err(_) => Err(InferenceError::TimedOut { after }),
            },
            None => child.wait_with_output().await.map_err(InferenceError::from),
        }
    };

    let output = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(InferenceError::Cancelled),
        result = wait => result?,
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(InferenceError::NonZeroExit {
            status: output.status,
            stderr: stderr_tail(&stderr),
        });
    }

    Ok(InferenceOutput { stdout, stderr })
}

fn stderr_tail(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.len() <= STDERR_TAIL_BYTES {
        return trimmed.to_string();
    }

    let mut start = trimmed.len() - STDERR_TAIL_BYTES;
    while !trimmed.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &trimmed[start..])
}
