use crate::artifact::{ArtifactError, write_artifact};
use kndeploy_core::{DeploymentRequest, ProjectRoot};
use std::path::{Component, Path, PathBuf};

/// Port the container listens on; matches `EXPOSE` in the Dockerfile.
pub const CONTAINER_PORT: u16 = 5000;
pub const MIN_SCALE: u32 = 1;
pub const MAX_SCALE: u32 = 4;

/// Knative `serving.knative.dev/v1` Service for a deploy request.
pub struct ServiceManifest<'a> {
    request: &'a DeploymentRequest,
}

impl<'a> ServiceManifest<'a> {
    pub fn new(request: &'a DeploymentRequest) -> Self {
        Self { request }
    }

    /// `<image>-service.yaml`
    pub fn file_name(&self) -> String {
        format!("{}.yaml", self.request.service_name())
    }

    pub fn render(&self) -> String {
        format!(
            r#"apiVersion: serving.knative.dev/v1
kind: Service
metadata:
  name: {service}
spec:
  template:
    metadata:
      annotations:
        autoscaling.knative.dev/minScale: "{min}"
        autoscaling.knative.dev/maxScale: "{max}"
    spec:
      containers:
      - image: {image}
        ports:
        - containerPort: {port}
"#,
            service = self.request.service_name(),
            image = self.request.image_reference(),
            min = MIN_SCALE,
            max = MAX_SCALE,
            port = CONTAINER_PORT,
        )
    }

    /// Write the manifest into the project root, replacing any existing file.
    ///
    /// An image name with slashes lands in matching subdirectories. Leading
    /// slashes are dropped, and a name with a `..` component is rejected with
    /// [`ArtifactError::OutsideRoot`], so the file never escapes the root.
    pub fn write(&self, root: &ProjectRoot) -> Result<PathBuf, ArtifactError> {
        let file_name = self.file_name();
        let relative = Path::new(file_name.trim_start_matches('/'));
        let path = root.join(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ArtifactError::OutsideRoot { path });
        }
        write_artifact(&path, &self.render())?;
        Ok(path)
    }
}
