use crate::tool::ToolError;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use tokio_util::sync::CancellationToken;

/// One invocation of an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory; inherits the caller's when `None`.
    pub cwd: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_owned(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
        }
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured output of a successful invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Abstraction over external CLI execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait ToolExecutor: Send + Sync {
    /// Run the command to completion and capture stdout/stderr.
    ///
    /// A zero exit status is success. Anything else is
    /// [`ToolError::CommandFailed`] carrying the captured stderr.
    async fn exec(&self, cmd: &ToolCommand) -> Result<ToolOutput, ToolError>;
}

/// Runs commands as child processes.
///
/// No timeout is applied. Cancelling the token kills whatever child is
/// running and fails it with [`ToolError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct RealExecutor {
    cancel: CancellationToken,
}

impl RealExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self { cancel }
    }
}

impl ToolExecutor for RealExecutor {
    async fn exec(&self, cmd: &ToolCommand) -> Result<ToolOutput, ToolError> {
        if self.cancel.is_cancelled() {
            return Err(ToolError::Cancelled {
                program: cmd.program.clone(),
            });
        }

        let mut command = tokio::process::Command::new(&cmd.program);
        command
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &cmd.cwd {
            command.current_dir(dir);
        }

        tracing::debug!(command = %cmd, cwd = ?cmd.cwd, "spawning");

        let child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ToolError::NotFound {
                    program: cmd.program.clone(),
                    source: e,
                }
            } else {
                ToolError::Spawn {
                    program: cmd.program.clone(),
                    source: e,
                }
            }
        })?;

        // Dropping the wait future drops the child, which kills it.
        let output = tokio::select! {
            output = child.wait_with_output() => output.map_err(|e| ToolError::Spawn {
                program: cmd.program.clone(),
                source: e,
            })?,
            () = self.cancel.cancelled() => {
                tracing::warn!(command = %cmd, "cancelled");
                return Err(ToolError::Cancelled { program: cmd.program.clone() });
            }
        };

        if output.status.success() {
            // Output is only logged and parsed downstream; the exit status alone decides success.
            Ok(ToolOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        } else {
            Err(ToolError::CommandFailed {
                program: cmd.program.clone(),
                args: cmd.args.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}
