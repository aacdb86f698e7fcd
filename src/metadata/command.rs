use anyhow::{anyhow, bail, Context, Result};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

const TRIM_CHARS: &[char] = &['\r', '\n', '\t', ' '];

/// Run a whitespace-separated command line in `dir` and return its trimmed stdout.
///
/// Fails when the program cannot be started or exits unsuccessfully.
pub async fn run_command(cmd_line: &str, dir: &Path) -> Result<String> {
    let mut args = cmd_line.split_whitespace();
    let program = args
        .next()
        .ok_or_else(|| anyhow!("Empty command line"))?;

    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(dir);
    cmd.kill_on_drop(true);

    debug!("Running `{}` in {}", cmd_line, dir.display());

    let output = cmd
        .output()
        .await
        .with_context(|| format!("Failed to run `{}`", cmd_line))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "`{}` exited with {}: {}",
            cmd_line,
            output.status,
            stderr.trim_matches(TRIM_CHARS)
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .trim_matches(TRIM_CHARS)
        .to_string())
}
