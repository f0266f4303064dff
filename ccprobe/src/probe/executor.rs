// SPDX-License-Identifier: GPL-3.0-or-later

//! External process invocation capability for the compiler probes.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Captured result of a finished process: an exit indicator plus the full
/// text of both output streams. Compilers route their diagnostic dump to
/// either stream depending on build and platform, so both are kept.
#[derive(Clone, Debug)]
pub struct CapturedOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// A capability to launch an executable and capture its output.
///
/// The probes depend on this trait instead of spawning processes
/// directly, which keeps them testable with canned compiler output.
pub trait CommandRunner {
    /// Runs the executable to completion and captures both streams.
    ///
    /// This is a blocking operation. Probes are single preprocessor
    /// passes over an empty input and finish quickly; there is no
    /// streaming interaction with the child and no cancellation.
    fn run(&self, executable: &str, arguments: &[String]) -> Result<CapturedOutput, ExecutorError>;
}

/// Runs the command as a child process with a null standard input.
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, executable: &str, arguments: &[String]) -> Result<CapturedOutput, ExecutorError> {
        log::debug!("Executing probe: {} {}", executable, shell_words::join(arguments));
        let output = Command::new(executable)
            .args(arguments)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ExecutorError::Spawn {
                executable: PathBuf::from(executable),
                source,
            })?;

        log::debug!("Probe finished: {:?}", output.status);
        Ok(CapturedOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Errors that can occur while running a probe process.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Failed to execute '{executable}': {source}", executable = executable.display())]
    Spawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
