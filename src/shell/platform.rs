//! Which shell runs configured commands.
//!
//! Service and handoff commands are shell strings. `STARTGATE_SHELL` picks
//! the interpreter explicitly; otherwise the login shell (`SHELL`, or
//! `COMSPEC` on Windows) is used.

use std::path::{Path, PathBuf};

/// Overrides the shell used for configured commands.
pub const SHELL_ENV: &str = "STARTGATE_SHELL";

/// How a shell takes a single command string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    /// sh, bash, zsh, dash, fish and anything unrecognized
    Posix,
    PowerShell,
    Cmd,
}

impl ShellType {
    /// Classify a shell by its executable name.
    pub fn from_executable(exe: &Path) -> Self {
        let stem = exe
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match stem.as_str() {
            "pwsh" | "powershell" => ShellType::PowerShell,
            "cmd" => ShellType::Cmd,
            _ => ShellType::Posix,
        }
    }

    /// Flag preceding the command string.
    pub fn command_flag(&self) -> &'static str {
        match self {
            ShellType::Posix => "-c",
            ShellType::PowerShell => "-Command",
            ShellType::Cmd => "/C",
        }
    }
}

/// The interpreter for configured commands.
#[derive(Debug, Clone)]
pub struct ShellInfo {
    pub executable: PathBuf,
    pub name: ShellType,
}

impl ShellInfo {
    fn at(executable: PathBuf) -> Self {
        let name = ShellType::from_executable(&executable);
        Self { executable, name }
    }
}

/// Resolve the shell from the environment.
pub fn detect_shell() -> ShellInfo {
    let (var, fallback) = if cfg!(windows) {
        ("COMSPEC", "cmd.exe")
    } else {
        ("SHELL", "/bin/sh")
    };
    let executable = std::env::var_os(SHELL_ENV)
        .or_else(|| std::env::var_os(var))
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(fallback));
    ShellInfo::at(executable)
}

const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "BUILDKITE",
    "JENKINS_URL",
];

/// Whether we are running under a CI service (prompts are never shown there).
pub fn is_ci() -> bool {
    CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_shells_share_a_flag() {
        for exe in ["/bin/bash", "/usr/bin/zsh", "/bin/sh", "/usr/bin/fish"] {
            let shell = ShellType::from_executable(Path::new(exe));
            assert_eq!(shell, ShellType::Posix, "{}", exe);
            assert_eq!(shell.command_flag(), "-c");
        }
    }

    #[test]
    fn windows_shells() {
        assert_eq!(
            ShellType::from_executable(Path::new("pwsh")),
            ShellType::PowerShell
        );
        assert_eq!(
            ShellType::from_executable(Path::new("cmd.exe")).command_flag(),
            "/C"
        );
    }

    #[test]
    fn detect_shell_is_never_empty() {
        let info = detect_shell();
        assert!(!info.executable.as_os_str().is_empty());
    }
}
