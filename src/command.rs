//! External command invocation.
//!
//! Collaborators such as the metadata provider are configured as plain
//! command lines. They are split on whitespace and run without a shell.

use thiserror::Error;
use tokio::process::Command;

/// Failure to run a configured command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("empty command line")]
    Empty,

    #[error("could not start '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with status {status}: stderr: {stderr}, stdout: {stdout}")]
    Failed {
        command: String,
        status: i32,
        stderr: String,
        stdout: String,
    },
}

/// Run `command_line` and return its stdout on a zero exit status.
pub async fn run(command_line: &str) -> Result<String, CommandError> {
    let mut parts = command_line.split_whitespace();
    let program = parts.next().ok_or(CommandError::Empty)?;

    tracing::debug!(command = command_line, "Calling external command");
    let output = Command::new(program)
        .args(parts)
        .output()
        .await
        .map_err(|source| CommandError::Spawn {
            command: command_line.to_string(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if output.status.success() {
        return Ok(stdout);
    }

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    Err(CommandError::Failed {
        command: command_line.to_string(),
        // Signal-terminated processes carry no code
        status: output.status.code().unwrap_or(-1),
        stderr: or_placeholder(stderr, "(no output on stderr)"),
        stdout: or_placeholder(stdout, "(no output on stdout)"),
    })
}

fn or_placeholder(stream: String, placeholder: &str) -> String {
    if stream.trim().is_empty() {
        placeholder.to_string()
    } else {
        stream.trim().to_string()
    }
}
