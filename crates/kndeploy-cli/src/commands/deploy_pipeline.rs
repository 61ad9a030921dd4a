use kndeploy_build::{ArtifactError, ServiceManifest, write_dockerfile};
use kndeploy_cloud::{BuildError, ClusterError, ImageBuilder, KnativeClient, ToolExecutor};
use kndeploy_core::{DeploymentRequest, ProjectRoot, Transcript};
use std::path::{Path, PathBuf};

/// Result of a successful deploy pipeline run.
#[derive(Debug)]
pub(crate) struct DeployOutcome {
    /// Name to use with `describe` / `delete`.
    pub service_name: String,
    pub dockerfile: PathBuf,
    pub manifest: PathBuf,
}

/// Which step of the pipeline stopped a deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DeployStage {
    NoWorkspace,
    Filesystem,
    BuildFailed,
    PushFailed,
    ApplyFailed,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum DeployError {
    #[error(transparent)]
    NoWorkspace(kndeploy_core::Error),

    #[error("could not write {}", source.path().display())]
    Filesystem {
        #[from]
        source: ArtifactError,
    },

    #[error("build failed")]
    BuildFailed { source: BuildError },

    #[error("push failed")]
    PushFailed { source: BuildError },

    #[error("apply failed")]
    ApplyFailed { source: ClusterError },
}

impl DeployError {
    pub(crate) fn stage(&self) -> DeployStage {
        match self {
            Self::NoWorkspace(_) => DeployStage::NoWorkspace,
            Self::Filesystem { .. } => DeployStage::Filesystem,
            Self::BuildFailed { .. } => DeployStage::BuildFailed,
            Self::PushFailed { .. } => DeployStage::PushFailed,
            Self::ApplyFailed { .. } => DeployStage::ApplyFailed,
        }
    }
}

impl From<BuildError> for DeployError {
    fn from(e: BuildError) -> Self {
        match e {
            BuildError::Push { .. } => Self::PushFailed { source: e },
            BuildError::Build { .. } | BuildError::InvalidPath(_) => {
                Self::BuildFailed { source: e }
            }
        }
    }
}

/// Run the deploy pipeline: Dockerfile → build → push → manifest → apply.
///
/// Stops at the first failing step. Nothing is rolled back: files already
/// written stay on disk and images already pushed stay in the registry.
pub(crate) async fn run<B: ImageBuilder, E: ToolExecutor>(
    project_dir: &Path,
    request: &DeploymentRequest,
    builder: &B,
    cluster: &KnativeClient<E>,
    log: &Transcript,
) -> Result<DeployOutcome, DeployError> {
    let root = ProjectRoot::resolve(project_dir).map_err(DeployError::NoWorkspace)?;
    let image_reference = request.image_reference();
    log.append(format!(
        "Deploying {image_reference} from {}",
        root.path().display()
    ));

    let dockerfile = write_dockerfile(&root)?;
    log.append(format!("Wrote {}", dockerfile.display()));

    log.append(format!(
        "Building {image_reference} with {}",
        builder.name()
    ));
    builder
        .build_and_publish(&image_reference, root.path(), log)
        .await?;
    log.append(format!("Published {image_reference}"));

    let manifest = ServiceManifest::new(request).write(&root)?;
    log.append(format!("Wrote {}", manifest.display()));

    cluster
        .apply(&manifest, log)
        .await
        .map_err(|e| DeployError::ApplyFailed { source: e })?;

    let service_name = request.service_name();
    log.append(format!("Deployed {service_name}"));

    Ok(DeployOutcome {
        service_name,
        dockerfile,
        manifest,
    })
}
