//! Generated artifacts for kndeploy.
//!
//! # Deploy pipeline
//!
//! ```text
//! kndeploy deploy
//!   1. Dockerfile  ── dockerfile::write_dockerfile()      → <root>/Dockerfile
//!   2. Build       ── docker build -t <ref> .  (or pack build --publish)
//!   3. Push        ── docker push <ref>
//!   4. Manifest    ── ServiceManifest::write()             → <root>/<image>-service.yaml
//!   5. Apply       ── kubectl apply -f <manifest>
//! ```
//!
//! Both artifacts are plain text with fixed layout. Existing files are
//! overwritten without asking.
//!
//! [`quickstart`] scaffolds a sample app that the fixed Dockerfile can build.

pub mod artifact;
pub mod dockerfile;
pub mod manifest;
pub mod quickstart;

pub use artifact::ArtifactError;
pub use dockerfile::{DOCKERFILE, write_dockerfile};
pub use manifest::ServiceManifest;
