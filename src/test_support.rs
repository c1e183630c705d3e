//! Fixtures for tests that exercise real child processes.
//!
//! Fake `llama-embedding` binaries are tiny `/bin/sh` scripts written into a
//! temporary directory.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Responds to `--version`, prints a rank score on stderr in rank mode, and a
/// fixed two-dimensional embedding as JSON otherwise.
pub const WELL_BEHAVED_SCRIPT: &str = r#"
if [ "$1" = "--version" ]; then
  echo "version: 4000 (test)" >&2
  exit 0
fi
case "$*" in
  *"--pooling rank"*)
    echo "llama_model_loader: loaded" >&2
    echo "rerank score 0: 7.5" >&2
    ;;
  *)
    echo '{"object":"list","data":[{"object":"embedding","index":0,"embedding":[0.6,0.8]}]}'
    ;;
esac
"#;

/// Writes an executable shell script named `llama-embedding` into `dir`.
pub fn fake_binary(dir: &Path, body: &str) -> PathBuf {
    fake_binary_named(dir, "llama-embedding", body)
}

/// Writes an executable shell script with the given file name into `dir`.
pub fn fake_binary_named(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write fake binary");
    let mut perms = fs::metadata(&path).expect("stat fake binary").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod fake binary");
    path
}

/// Writes a placeholder model artifact into `dir`.
pub fn fake_model(dir: &Path) -> PathBuf {
    let path = dir.join("model.gguf");
    fs::write(&path, b"GGUF").expect("write fake model");
    path
}
