use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// File name of the per-project configuration.
pub const CONFIG_FILE: &str = "kndeploy.toml";

/// kndeploy.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KndeployConfig {
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub cluster: ClusterConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// External binaries invoked by kndeploy. Any tool offering the same verbs
/// can be substituted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Container build tool (`build`, `push`)
    #[serde(default = "default_docker")]
    pub docker: String,
    /// Buildpack CLI (`build --publish`)
    #[serde(default = "default_pack")]
    pub pack: String,
    /// Cluster control tool (`apply`, `get`, `delete`)
    #[serde(default = "default_kubectl")]
    pub kubectl: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// How images are built and published
    #[serde(default)]
    pub strategy: BuildStrategy,
    /// Builder image used by the buildpack strategy
    #[serde(default = "default_builder_image")]
    pub builder_image: String,
}

/// Image build strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStrategy {
    /// Pick by host architecture at startup.
    #[default]
    Auto,
    /// Local daemon: `docker build` then `docker push`.
    Docker,
    /// Buildpacks: `pack build --publish`, no local daemon needed.
    Pack,
}

impl BuildStrategy {
    /// Resolve `Auto` against the host architecture.
    ///
    /// `aarch64` hosts go through buildpacks, since a local daemon build
    /// there produces images the cluster nodes cannot run.
    pub fn resolve(self, arch: &str) -> Self {
        match self {
            Self::Auto if arch == "aarch64" => Self::Pack,
            Self::Auto => Self::Docker,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// kubeconfig context (defaults to the current context)
    pub context: Option<String>,
    /// Namespace for services (defaults to the context's namespace)
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Append the transcript to this file, relative to the project root
    pub file: Option<PathBuf>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            docker: default_docker(),
            pack: default_pack(),
            kubectl: default_kubectl(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            strategy: BuildStrategy::default(),
            builder_image: default_builder_image(),
        }
    }
}

impl KndeployConfig {
    /// Load from kndeploy.toml at the given path, or return defaults if not found.
    pub fn load(project_dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }
}

fn default_docker() -> String {
    "docker".to_owned()
}

fn default_pack() -> String {
    "pack".to_owned()
}

fn default_kubectl() -> String {
    "kubectl".to_owned()
}

fn default_builder_image() -> String {
    "paketobuildpacks/builder-jammy-base".to_owned()
}
