//! Scorer lifecycle: locating and validating the inference binary and model
//! artifact before any scoring happens.
//!
//! Cache release on shutdown is [`RankingEngine::close`](crate::engine::RankingEngine::close).

pub mod error;
pub mod resolve;


pub use error::{LifecycleError, LifecycleResult};
pub use resolve::{
    ResolvedPaths, binary_candidates, find_in_path_var, resolve, resolve_binary,
    resolve_model_path,
};

use std::ffi::OsString;
use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::SELF_CHECK_TIMEOUT;
use crate::inference::run_process;

/// Confirms the binary can be started by running `<binary> --version`.
pub async fn self_check(binary: &Path, cancel: &CancellationToken) -> LifecycleResult<()> {
    let args = [OsString::from("--version")];

    let output = run_process(binary, &args, Some(SELF_CHECK_TIMEOUT), cancel)
        .await
        .map_err(|e| LifecycleError::SelfCheckFailed {
            binary: binary.to_path_buf(),
            reason: e.to_string(),
        })?;

    let version = output
        .stderr
        .lines()
        .chain(output.stdout.lines())
        .find(|line| line.contains("version"))
        .unwrap_or_default()
        .trim();
    debug!(binary = %binary.display(), version, "Inference binary self-check passed");

    Ok(())
}

/// Validates `config`, resolves paths, and (when enabled) runs the self-check.
pub async fn prepare(config: &Config, cancel: &CancellationToken) -> LifecycleResult<ResolvedPaths> {
    let paths = resolve(config)?;

    if config.self_check {
        self_check(&paths.binary, cancel).await?;
    }

    info!(
        model = %paths.model.display(),
        binary = %paths.binary.display(),
        self_check = config.self_check,
        "Inference scorer ready"
    );

    Ok(paths)
}
