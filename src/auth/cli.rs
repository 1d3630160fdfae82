//! Token lookup through the hosting CLIs (`gh`, `glab`)

use tokio::process::Command;
use tracing::debug;

/// Ask `program` for a token, returning `None` if it is missing or logged out
///
/// `host_args` are appended to both the status and the token call, e.g.
/// `["--hostname", "gitlab.example.com"]`.
pub async fn cli_token(program: &str, host_args: &[&str]) -> Option<String> {
    Command::new(program)
        .arg("--version")
        .output()
        .await
        .ok()?;

    let status = Command::new(program)
        .args(["auth", "status"])
        .args(host_args)
        .output()
        .await
        .ok()?;

    if !status.status.success() {
        debug!("{program} is installed but not authenticated");
        return None;
    }

    let output = Command::new(program)
        .args(["auth", "token"])
        .args(host_args)
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}
