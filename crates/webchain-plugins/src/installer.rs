//! Shell execution helpers for package installs and generator runs.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// Build a shell [`Command`] that executes `cmd_str` via the system shell.
///
/// - Unix: `sh -c "{cmd_str}"`
/// - Windows: `cmd /C "{cmd_str}"`
pub(crate) fn shell_command(cmd_str: &str) -> Command {
    #[cfg(windows)]
    {
        let mut c = Command::new("cmd");
        c.args(["/C", cmd_str]);
        c
    }
    #[cfg(not(windows))]
    {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd_str);
        c
    }
}

/// Run `cmd_str` in `working_dir` with inherited stdio and return its exit
/// code (`None` when it could not be started or was killed by a signal).
pub(crate) fn run_inherited(cmd_str: &str, working_dir: &Path) -> std::result::Result<(), Option<i32>> {
    let status = shell_command(cmd_str)
        .current_dir(working_dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| {
            tracing::debug!(command = cmd_str, error = %e, "failed to spawn");
            None
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(status.code())
    }
}

/// Execute a package install command for `name`.
///
/// Stdout and stderr are streamed live to the terminal so progress output
/// stays visible; a non-zero exit returns [`Error::InstallFailed`].
pub fn run_install(name: &str, install_cmd: &str, working_dir: &Path) -> Result<()> {
    run_inherited(install_cmd, working_dir).map_err(|exit_code| Error::InstallFailed {
        name: name.to_string(),
        command: install_cmd.to_string(),
        exit_code,
    })
}

/// Verify a binary is on PATH. Returns the resolved path or [`Error::PackageManagerNotFound`].
pub fn check_binary_on_path(tool: &str) -> Result<PathBuf> {
    let path_var = std::env::var_os("PATH").unwrap_or_default();
    let extensions: Vec<String> = if cfg!(windows) {
        std::env::var("PATHEXT")
            .unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string())
            .split(';')
            .map(|s| s.to_ascii_lowercase())
            .collect()
    } else {
        vec![String::new()]
    };

    for dir in std::env::split_paths(&path_var) {
        for ext in &extensions {
            let candidate = if ext.is_empty() {
                dir.join(tool)
            } else {
                dir.join(format!("{tool}{ext}"))
            };
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(Error::PackageManagerNotFound {
        tool: tool.to_string(),
        hint: install_hint(tool).map(str::to_string),
    })
}

fn install_hint(tool: &str) -> Option<&'static str> {
    match tool {
        "npm" => Some("\n  Install: https://nodejs.org"),
        "yarn" => Some("\n  Install: npm install -g yarn"),
        "pnpm" => Some("\n  Install: npm install -g pnpm"),
        _ => None,
    }
}

/// Quote `arg` for [`shell_command`] when it contains anything beyond a
/// conservative safe set.
pub(crate) fn quote_arg(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '/' | '.' | '_' | '-' | ':' | '='));
    if safe {
        arg.to_string()
    } else {
        format!("\"{}\"", arg.replace('"', "\\\""))
    }
}
