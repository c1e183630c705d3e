use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{LifecycleError, LifecycleResult};
use crate::config::Config;
use crate::constants::DEFAULT_BINARY_NAME;

/// Absolute, validated locations of the model artifact and the inference binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub model: PathBuf,
    pub binary: PathBuf,
}

/// Resolves both paths for `config` without spawning anything.
pub fn resolve(config: &Config) -> LifecycleResult<ResolvedPaths> {
    config.validate()?;

    let model = resolve_model_path(&config.model_path)?;
    let binary = resolve_binary(config.binary_path.as_deref(), &model)?;

    debug!(
        model = %model.display(),
        binary = %binary.display(),
        "Resolved inference paths"
    );

    Ok(ResolvedPaths { model, binary })
}

/// Makes `path` absolute and checks that it names an existing file.
pub fn resolve_model_path(path: &Path) -> LifecycleResult<PathBuf> {
    let path = std::path::absolute(path)?;

    if !path.exists() {
        return Err(LifecycleError::ModelNotFound { path });
    }
    if !path.is_file() {
        return Err(LifecycleError::ModelNotAFile { path });
    }

    Ok(path)
}

/// Locations checked for `llama-embedding` when no explicit path is configured,
/// in order: next to the model's parent directory, then relative to the working
/// directory.
pub fn binary_candidates(model_path: &Path) -> Vec<PathBuf> {
    let build_bin = Path::new("llama.cpp")
        .join("build")
        .join("bin")
        .join(DEFAULT_BINARY_NAME);

    let mut candidates = Vec::with_capacity(4);
    if let Some(model_dir) = model_path.parent() {
        candidates.push(model_dir.join("..").join(&build_bin));
    }
    candidates.push(Path::new(".").join(&build_bin));
    candidates.push(Path::new("..").join(&build_bin));
    candidates.push(Path::new("..").join("..").join(&build_bin));
    candidates
}

/// Finds the inference binary.
///
/// An explicit path must exist and be executable. Otherwise the
/// [`binary_candidates`] are tried, then `PATH`.
pub fn resolve_binary(explicit: Option<&Path>, model_path: &Path) -> LifecycleResult<PathBuf> {
    if let Some(path) = explicit {
        if is_executable_file(path) {
            return Ok(std::path::absolute(path)?);
        }
        return Err(LifecycleError::BinaryNotFound {
            searched: vec![path.to_path_buf()],
        });
    }

    let candidates = binary_candidates(model_path);
    if let Some(found) = candidates.iter().find(|c| is_executable_file(c)) {
        return Ok(std::path::absolute(found)?);
    }

    if let Some(path_var) = env::var_os("PATH")
        && let Some(found) = find_in_path_var(DEFAULT_BINARY_NAME, &path_var)
    {
        return Ok(found);
    }

    Err(LifecycleError::BinaryNotFound {
        searched: candidates,
    })
}

/// Looks `name` up in a `PATH`-style list of directories.
pub fn find_in_path_var(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable_file(candidate))
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}
