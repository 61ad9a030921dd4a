use crate::executor::{ToolCommand, ToolExecutor, ToolOutput};
use crate::record;
use crate::tool::ToolError;
use kndeploy_core::{ClusterConfig, ToolsConfig, Transcript};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};

/// Knative service operations through `kubectl`, parameterized over the
/// executor for testability.
///
/// Queries read `-o json` output; the human-readable table format is never
/// parsed.
pub struct KnativeClient<E: ToolExecutor> {
    executor: E,
    program: String,
    context: Option<String>,
    namespace: Option<String>,
}

impl<E: ToolExecutor> KnativeClient<E> {
    pub fn new(executor: E, tools: &ToolsConfig, cluster: &ClusterConfig) -> Self {
        Self {
            executor,
            program: tools.kubectl.clone(),
            context: cluster.context.clone(),
            namespace: cluster.namespace.clone(),
        }
    }

    /// Client with the default `kubectl` and no context or namespace override.
    pub fn with_executor(executor: E) -> Self {
        Self::new(executor, &ToolsConfig::default(), &ClusterConfig::default())
    }

    // ── Apply ──

    pub async fn apply(&self, manifest: &Path, log: &Transcript) -> Result<(), ClusterError> {
        let manifest_str = manifest
            .to_str()
            .ok_or_else(|| ClusterError::InvalidPath(manifest.to_path_buf()))?;

        let cmd = self.command(["apply", "-f", manifest_str]);
        record(&self.executor, &cmd, log)
            .await
            .map_err(|e| ClusterError::Apply { source: e })?;
        Ok(())
    }

    // ── Query ──

    pub async fn describe(
        &self,
        name: &str,
        log: &Transcript,
    ) -> Result<ServiceInfo, ClusterError> {
        let cmd = self.command(["get", "ksvc", name, "-o", "json"]);
        log.append(format!("$ {cmd}"));

        let output = match self.executor.exec(&cmd).await {
            Ok(output) => output,
            Err(e) if is_not_found(&e) => {
                log.append(e.stderr());
                return Err(ClusterError::NotFound {
                    name: name.to_owned(),
                    source: e,
                });
            }
            Err(e) => {
                log.append(e.stderr());
                return Err(ClusterError::Query { source: e });
            }
        };

        let service: KnativeServiceJson = parse_json(&output, log)?;
        Ok(service.into())
    }

    pub async fn list_all(&self, log: &Transcript) -> Result<ServiceList, ClusterError> {
        let cmd = self.command(["get", "ksvc", "-o", "json"]);
        log.append(format!("$ {cmd}"));

        let output = match self.executor.exec(&cmd).await {
            Ok(output) => output,
            Err(e) => {
                log.append(e.stderr());
                return Err(ClusterError::Query { source: e });
            }
        };

        let list: KnativeServiceListJson = parse_json(&output, log)?;

        if list.items.is_empty() {
            Ok(ServiceList::Empty)
        } else {
            Ok(ServiceList::Services(
                list.items.into_iter().map(ServiceInfo::from).collect(),
            ))
        }
    }

    // ── Delete ──

    /// Delete a service. A service that does not exist is an error.
    pub async fn delete(&self, name: &str, log: &Transcript) -> Result<(), ClusterError> {
        let cmd = self.command(["delete", "ksvc", name]);
        record(&self.executor, &cmd, log)
            .await
            .map_err(|e| ClusterError::Delete { source: e })?;
        Ok(())
    }

    fn command<const N: usize>(&self, verb: [&str; N]) -> ToolCommand {
        let mut args: Vec<String> = Vec::with_capacity(N + 4);
        if let Some(context) = &self.context {
            args.push("--context".to_owned());
            args.push(context.clone());
        }
        if let Some(namespace) = &self.namespace {
            args.push("--namespace".to_owned());
            args.push(namespace.clone());
        }
        args.extend(verb.iter().map(|s| (*s).to_owned()));
        ToolCommand::new(&self.program, args)
    }
}

/// Decode query output. Warnings on stderr are always logged; the raw stdout
/// is logged only when it fails to parse.
fn parse_json<T: DeserializeOwned>(
    output: &ToolOutput,
    log: &Transcript,
) -> Result<T, ClusterError> {
    log.append(&output.stderr);
    serde_json::from_str(&output.stdout).map_err(|e| {
        log.append(&output.stdout);
        ClusterError::Parse { source: e }
    })
}

fn is_not_found(err: &ToolError) -> bool {
    let stderr = err.stderr();
    stderr.contains("(NotFound)") || stderr.contains("\" not found")
}

// ── Service info ──

/// Whether a service is serving traffic, from its `Ready` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady,
}

impl Readiness {
    /// `"True"` is ready; any other status, or no `Ready` condition at all,
    /// is not.
    pub fn from_status(status: Option<&str>) -> Self {
        match status {
            Some("True") => Self::Ready,
            _ => Self::NotReady,
        }
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("Ready"),
            Self::NotReady => f.write_str("Not Ready"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: String,
    pub readiness: Readiness,
    pub url: Option<String>,
    pub latest_created_revision: Option<String>,
    pub latest_ready_revision: Option<String>,
}

impl fmt::Display for ServiceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_none = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_owned());
        writeln!(f, "Name:                    {}", self.name)?;
        writeln!(f, "Status:                  {}", self.readiness)?;
        writeln!(f, "URL:                     {}", or_none(&self.url))?;
        writeln!(
            f,
            "Latest created revision: {}",
            or_none(&self.latest_created_revision)
        )?;
        write!(
            f,
            "Latest ready revision:   {}",
            or_none(&self.latest_ready_revision)
        )
    }
}

/// Result of listing services. No services is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceList {
    Empty,
    Services(Vec<ServiceInfo>),
}

// ── Wire format (`kubectl get ksvc -o json`) ──

#[derive(Deserialize)]
struct KnativeServiceListJson {
    #[serde(default)]
    items: Vec<KnativeServiceJson>,
}

#[derive(Deserialize)]
struct KnativeServiceJson {
    metadata: MetadataJson,
    #[serde(default)]
    status: StatusJson,
}

#[derive(Deserialize)]
struct MetadataJson {
    name: String,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusJson {
    #[serde(default)]
    conditions: Vec<ConditionJson>,
    url: Option<String>,
    latest_created_revision_name: Option<String>,
    latest_ready_revision_name: Option<String>,
}

#[derive(Deserialize)]
struct ConditionJson {
    #[serde(rename = "type")]
    kind: String,
    status: Option<String>,
}

impl From<KnativeServiceJson> for ServiceInfo {
    fn from(svc: KnativeServiceJson) -> Self {
        let ready_status = svc
            .status
            .conditions
            .iter()
            .find(|c| c.kind == "Ready")
            .and_then(|c| c.status.as_deref());
        let readiness = Readiness::from_status(ready_status);

        Self {
            name: svc.metadata.name,
            readiness,
            url: svc.status.url,
            latest_created_revision: svc.status.latest_created_revision_name,
            latest_ready_revision: svc.status.latest_ready_revision_name,
        }
    }
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    #[error("manifest apply failed")]
    Apply { source: ToolError },

    #[error("service '{name}' not found")]
    NotFound { name: String, source: ToolError },

    #[error("service query failed")]
    Query { source: ToolError },

    #[error("unexpected service query output")]
    Parse { source: serde_json::Error },

    #[error("service deletion failed")]
    Delete { source: ToolError },

    #[error("manifest path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),
}
