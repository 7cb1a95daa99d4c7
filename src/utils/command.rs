//! Command execution utilities

use crate::error::{Result, ThermoError};
use std::path::Path;
use std::process::Command;

/// Captured result of a finished command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Execute a command and capture both output streams, whatever the exit status
pub fn run_command_capture(program: &str, args: &[&str]) -> Result<CommandOutput> {
    let output = Command::new(program).args(args).output()?;

    Ok(CommandOutput {
        success: output.status.success(),
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Check if a command exists, either as a path or somewhere in PATH
pub fn command_exists(program: &str) -> bool {
    use std::env;

    if program.contains('/') {
        return Path::new(program).is_file();
    }

    if let Ok(path) = env::var("PATH") {
        for dir in path.split(':') {
            let full_path = Path::new(dir).join(program);
            if full_path.exists() && full_path.is_file() {
                return true;
            }
        }
    }
    false
}

/// Turn a failed exit status into an error
pub fn require_success(program: &str, output: &CommandOutput) -> Result<()> {
    if output.success {
        Ok(())
    } else {
        Err(ThermoError::SourceUnavailable(format!(
            "Command '{}' failed with exit code: {:?}",
            program, output.code
        )))
    }
}
