mod delete;
mod deploy;
mod deploy_pipeline;
mod describe;
mod list;
mod new;
mod ping;
mod prompt;

pub use delete::delete;
pub use deploy::deploy;
pub use describe::describe;
pub use list::list;
pub use new::new_project;
pub use ping::ping;

use kndeploy_cloud::{KnativeClient, RealExecutor, SelectedBuilder, select_builder};
use kndeploy_core::{KndeployConfig, Transcript};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

/// Everything a cluster-facing command needs, wired once per process.
pub struct Session {
    pub project_dir: PathBuf,
    pub config: KndeployConfig,
    pub transcript: Transcript,
    executor: RealExecutor,
}

impl Session {
    /// Load `kndeploy.toml` from `project_dir` and open the transcript.
    ///
    /// A missing project directory is not an error here; `deploy` reports it
    /// itself before touching anything.
    pub fn open(project_dir: &Path, cancel: CancellationToken) -> anyhow::Result<Self> {
        let config = KndeployConfig::load(project_dir)?;
        let transcript = match &config.log.file {
            Some(file) => Transcript::with_file(&project_dir.join(file))?,
            None => Transcript::new(),
        };

        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            config,
            transcript,
            executor: RealExecutor::with_cancellation(cancel),
        })
    }

    pub fn builder(&self) -> SelectedBuilder<RealExecutor> {
        select_builder(
            &self.config.build,
            &self.config.tools,
            std::env::consts::ARCH,
            self.executor.clone(),
        )
    }

    pub fn cluster(&self) -> KnativeClient<RealExecutor> {
        KnativeClient::new(
            self.executor.clone(),
            &self.config.tools,
            &self.config.cluster,
        )
    }

    /// Copy a failed command's full error chain into the transcript before
    /// handing it back to the caller.
    pub fn report<T>(&self, result: anyhow::Result<T>) -> anyhow::Result<T> {
        if let Err(e) = &result {
            self.transcript.append(format!("error: {e:#}"));
        }
        result
    }
}
