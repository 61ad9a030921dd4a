use std::path::{Path, PathBuf};

/// The project folder a deploy operates on.
///
/// Holding a `ProjectRoot` means the directory existed when it was resolved.
/// Nothing stops another process from removing it afterwards, in which case
/// the next write fails with a filesystem error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    path: PathBuf,
}

impl ProjectRoot {
    /// Bind to `dir`, failing with [`crate::Error::NoWorkspace`] when it is
    /// missing or not a directory.
    pub fn resolve(dir: &Path) -> crate::Result<Self> {
        if !dir.is_dir() {
            return Err(crate::Error::NoWorkspace {
                path: dir.to_path_buf(),
            });
        }
        Ok(Self {
            path: dir.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path.join(relative)
    }
}

impl AsRef<Path> for ProjectRoot {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}
