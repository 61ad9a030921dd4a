use crate::artifact::{ArtifactError, write_artifact};
use kndeploy_core::ProjectRoot;
use std::path::PathBuf;

/// Dockerfile written to every project root before a build.
///
/// Expects a Python app with `app.py` and `requirements.txt` at the root,
/// serving on port 5000.
pub const DOCKERFILE: &str = r#"FROM python:3.8-slim
COPY . /app
WORKDIR /app
RUN pip3 install --upgrade pip
RUN pip3 install -r requirements.txt
EXPOSE 5000
CMD ["python3", "app.py"]
"#;

/// Write [`DOCKERFILE`] to `<root>/Dockerfile`, replacing any existing file.
pub fn write_dockerfile(root: &ProjectRoot) -> Result<PathBuf, ArtifactError> {
    let path = root.join("Dockerfile");
    write_artifact(&path, DOCKERFILE)?;
    Ok(path)
}
