#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("`{program}` not found on PATH — install it or set its path in kndeploy.toml [tools]")]
    NotFound {
        program: String,
        source: std::io::Error,
    },

    #[error("failed to run `{program}`")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program}` failed ({}): {args:?}\n{stderr}", format_code(code))]
    CommandFailed {
        program: String,
        args: Vec<String>,
        /// Exit code, `None` when killed by a signal.
        code: Option<i32>,
        stderr: String,
    },

    #[error("`{program}` was cancelled")]
    Cancelled { program: String },
}

impl ToolError {
    /// Captured stderr of a failed command, empty for other variants.
    pub fn stderr(&self) -> &str {
        match self {
            Self::CommandFailed { stderr, .. } => stderr,
            _ => "",
        }
    }
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_owned(),
    }
}
