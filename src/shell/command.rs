//! Shell command execution.

use crate::error::{Result, StartgateError};
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use super::platform::detect_shell;

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,
}

fn shell_command(command: &str, options: &CommandOptions) -> Command {
    let shell = detect_shell();
    let mut cmd = Command::new(&shell.executable);
    cmd.arg(shell.name.command_flag());
    cmd.arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
    for (key, value) in &options.env {
        cmd.env(key, value);
    }
    cmd
}

/// Run a command with inherited stdio and wait for it, failing on a non-zero exit.
pub fn execute_inherited(command: &str, cwd: Option<&Path>) -> Result<()> {
    let options = CommandOptions {
        cwd: cwd.map(|p| p.to_path_buf()),
        ..Default::default()
    };
    let status = shell_command(command, &options)
        .status()
        .map_err(|_| StartgateError::CommandFailed {
            command: command.to_string(),
            code: None,
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(StartgateError::CommandFailed {
            command: command.to_string(),
            code: status.code(),
        })
    }
}

/// Start a command in the background without waiting for it.
///
/// Stdin is closed and both output streams are appended to `log_path`.
/// On unix the child gets its own process group so terminal signals sent
/// to the launcher do not reach it. A reaper thread waits on the child, so
/// a service that exits does not linger as a zombie while this process
/// lives. Returns the child's pid.
pub fn spawn_detached(command: &str, options: &CommandOptions, log_path: &Path) -> Result<u32> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    let log_err = log.try_clone()?;

    let mut cmd = shell_command(command, options);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(log_err));

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let child = cmd.spawn().map_err(|_| StartgateError::CommandFailed {
        command: command.to_string(),
        code: None,
    })?;
    let pid = child.id();
    reap_in_background(child);
    Ok(pid)
}

fn reap_in_background(mut child: Child) {
    let pid = child.id();
    let spawned = std::thread::Builder::new()
        .name(format!("reap-{}", pid))
        .spawn(move || match child.wait() {
            Ok(status) => tracing::debug!("Background process {} exited: {}", pid, status),
            Err(e) => tracing::warn!("Failed to wait on background process {}: {}", pid, e),
        });
    if let Err(e) = spawned {
        tracing::warn!("No reaper for background process {}: {}", pid, e);
    }
}
