#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Create a `shorthand` command isolated from the user's settings.
#[allow(dead_code)]
pub fn shorthand_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("shorthand"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("SHORTHAND_CONFIG", missing_config());
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn missing_config() -> PathBuf {
    std::env::temp_dir().join("shorthand-tests-no-config.toml")
}

/// Write `contents` to `name` inside `dir` and return its path.
#[allow(dead_code)]
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

/// A manifest adding `upload file`, which shares every abbreviation with
/// `user find`.
#[allow(dead_code)]
pub const UPLOAD_MANIFEST: &str = r#"
[[command]]
path = "upload file {path} {retries}"
help = "Upload a file"

  [[command.param]]
  name = "path"

  [[command.param]]
  name = "retries"
  type = "u8"

  [[command.option]]
  param = "retries"
  default = 3
"#;

#[allow(dead_code)]
pub fn manifest_in(dir: &TempDir) -> PathBuf {
    write_file(dir, "commands.toml", UPLOAD_MANIFEST)
}

#[allow(dead_code)]
pub fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}
