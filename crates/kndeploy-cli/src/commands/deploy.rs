use super::{Session, deploy_pipeline, prompt};
use kndeploy_core::DeploymentRequest;

/// Collect the registry and image names, then run the deploy pipeline.
pub async fn deploy(
    session: &Session,
    registry: Option<String>,
    image: Option<String>,
) -> anyhow::Result<()> {
    let registry = prompt::ask("registry name", registry)?;
    let image = prompt::ask("image name", image)?;
    let request = DeploymentRequest::new(&registry, &image)?;

    let builder = session.builder();
    let cluster = session.cluster();

    println!(
        "Deploying {} as {}...",
        request.image_reference(),
        request.service_name()
    );
    let outcome = deploy_pipeline::run(
        &session.project_dir,
        &request,
        &builder,
        &cluster,
        &session.transcript,
    )
    .await
    .inspect_err(|e| tracing::error!(stage = ?e.stage(), "deploy stopped"))?;

    println!();
    println!("Deployed service: {}", outcome.service_name);
    println!("Dockerfile: {}", outcome.dockerfile.display());
    println!("Manifest: {}", outcome.manifest.display());

    Ok(())
}
