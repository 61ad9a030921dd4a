//! Image build strategies.
//!
//! Which strategy runs is decided once at startup by [`select_builder`];
//! the deploy pipeline only sees the [`ImageBuilder`] contract.

use crate::executor::{ToolCommand, ToolExecutor};
use crate::record;
use crate::tool::ToolError;
use kndeploy_core::{BuildConfig, BuildStrategy, ToolsConfig, Transcript};
use std::path::{Path, PathBuf};

/// Build an image from a source folder and publish it to its registry.
#[allow(async_fn_in_trait)]
pub trait ImageBuilder: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    async fn build_and_publish(
        &self,
        image_reference: &str,
        source_dir: &Path,
        log: &Transcript,
    ) -> Result<(), BuildError>;
}

/// Local daemon build: `docker build` in the source folder, then `docker push`.
pub struct DockerBuilder<E: ToolExecutor> {
    executor: E,
    program: String,
}

impl<E: ToolExecutor> DockerBuilder<E> {
    pub fn new(executor: E, program: impl Into<String>) -> Self {
        Self {
            executor,
            program: program.into(),
        }
    }

    pub async fn build(
        &self,
        image_reference: &str,
        source_dir: &Path,
        log: &Transcript,
    ) -> Result<(), BuildError> {
        let cmd = ToolCommand::new(&self.program, ["build", "-t", image_reference, "."])
            .current_dir(source_dir);
        record(&self.executor, &cmd, log)
            .await
            .map_err(|e| BuildError::Build { source: e })?;
        Ok(())
    }

    pub async fn push(&self, image_reference: &str, log: &Transcript) -> Result<(), BuildError> {
        let cmd = ToolCommand::new(&self.program, ["push", image_reference]);
        record(&self.executor, &cmd, log)
            .await
            .map_err(|e| BuildError::Push { source: e })?;
        Ok(())
    }
}

impl<E: ToolExecutor> ImageBuilder for DockerBuilder<E> {
    fn name(&self) -> &'static str {
        "docker"
    }

    async fn build_and_publish(
        &self,
        image_reference: &str,
        source_dir: &Path,
        log: &Transcript,
    ) -> Result<(), BuildError> {
        self.build(image_reference, source_dir, log).await?;
        self.push(image_reference, log).await
    }
}

/// Buildpack build: `pack build --publish` builds and pushes in one step,
/// without a local container daemon.
pub struct PackBuilder<E: ToolExecutor> {
    executor: E,
    program: String,
    builder_image: String,
}

impl<E: ToolExecutor> PackBuilder<E> {
    pub fn new(executor: E, program: impl Into<String>, builder_image: impl Into<String>) -> Self {
        Self {
            executor,
            program: program.into(),
            builder_image: builder_image.into(),
        }
    }
}

impl<E: ToolExecutor> ImageBuilder for PackBuilder<E> {
    fn name(&self) -> &'static str {
        "pack"
    }

    async fn build_and_publish(
        &self,
        image_reference: &str,
        source_dir: &Path,
        log: &Transcript,
    ) -> Result<(), BuildError> {
        let source = source_dir
            .to_str()
            .ok_or_else(|| BuildError::InvalidPath(source_dir.to_path_buf()))?;

        let cmd = ToolCommand::new(
            &self.program,
            [
                "build",
                image_reference,
                "--path",
                source,
                "--builder",
                self.builder_image.as_str(),
                "--publish",
            ],
        );
        record(&self.executor, &cmd, log)
            .await
            .map_err(|e| BuildError::Build { source: e })?;
        Ok(())
    }
}

/// The strategy picked at startup.
pub enum SelectedBuilder<E: ToolExecutor> {
    Docker(DockerBuilder<E>),
    Pack(PackBuilder<E>),
}

impl<E: ToolExecutor> ImageBuilder for SelectedBuilder<E> {
    fn name(&self) -> &'static str {
        match self {
            Self::Docker(b) => b.name(),
            Self::Pack(b) => b.name(),
        }
    }

    async fn build_and_publish(
        &self,
        image_reference: &str,
        source_dir: &Path,
        log: &Transcript,
    ) -> Result<(), BuildError> {
        match self {
            Self::Docker(b) => b.build_and_publish(image_reference, source_dir, log).await,
            Self::Pack(b) => b.build_and_publish(image_reference, source_dir, log).await,
        }
    }
}

/// Pick the build strategy for this host.
///
/// `arch` is normally [`std::env::consts::ARCH`]; see
/// [`BuildStrategy::resolve`] for how `auto` is decided.
pub fn select_builder<E: ToolExecutor>(
    build: &BuildConfig,
    tools: &ToolsConfig,
    arch: &str,
    executor: E,
) -> SelectedBuilder<E> {
    let strategy = build.strategy.resolve(arch);
    tracing::debug!(?strategy, arch, "selected build strategy");
    match strategy {
        BuildStrategy::Pack => SelectedBuilder::Pack(PackBuilder::new(
            executor,
            tools.pack.as_str(),
            build.builder_image.as_str(),
        )),
        BuildStrategy::Docker | BuildStrategy::Auto => {
            SelectedBuilder::Docker(DockerBuilder::new(executor, tools.docker.as_str()))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("image build failed")]
    Build { source: ToolError },

    #[error("image push failed")]
    Push { source: ToolError },

    #[error("source path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),
}
