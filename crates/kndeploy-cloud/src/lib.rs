//! External tool operations for kndeploy: image builds through `docker` or
//! `pack`, and Knative service management through `kubectl`.
//!
//! Every command goes through a [`ToolExecutor`], and every command line and
//! its captured output is appended to the caller's [`Transcript`].

pub mod builder;
pub mod executor;
pub mod knative;
pub mod tool;

pub use builder::{
    BuildError, DockerBuilder, ImageBuilder, PackBuilder, SelectedBuilder, select_builder,
};
pub use executor::{RealExecutor, ToolCommand, ToolExecutor, ToolOutput};
pub use knative::{ClusterError, KnativeClient, Readiness, ServiceInfo, ServiceList};
pub use tool::ToolError;

use kndeploy_core::Transcript;

/// Run `cmd` and copy the command line and its output into `log`.
pub(crate) async fn record<E: ToolExecutor>(
    executor: &E,
    cmd: &ToolCommand,
    log: &Transcript,
) -> Result<ToolOutput, ToolError> {
    log.append(format!("$ {cmd}"));
    match executor.exec(cmd).await {
        Ok(output) => {
            log.append(&output.stdout);
            log.append(&output.stderr);
            Ok(output)
        }
        Err(e) => {
            log.append(e.stderr());
            Err(e)
        }
    }
}
