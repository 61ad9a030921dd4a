//! Core types and configuration for kndeploy.
//!
//! This crate defines the `kndeploy.toml` schema ([`KndeployConfig`]),
//! the operator's [`DeploymentRequest`], project root resolution
//! ([`ProjectRoot`]), the append-only deploy [`Transcript`], and shared
//! error types.

pub mod config;
pub mod error;
pub mod request;
pub mod transcript;
pub mod workspace;

pub use config::{
    BuildConfig, BuildStrategy, ClusterConfig, KndeployConfig, LogConfig, ToolsConfig,
};
pub use error::{Error, Result};
pub use request::{DeploymentRequest, require_input, service_name_for};
pub use transcript::Transcript;
pub use workspace::ProjectRoot;
