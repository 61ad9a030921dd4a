use super::{Session, prompt};

/// Delete a service. Deleting one that does not exist fails.
pub async fn delete(session: &Session, name: Option<String>) -> anyhow::Result<()> {
    let name = prompt::ask("service name", name)?;

    session
        .cluster()
        .delete(&name, &session.transcript)
        .await?;

    println!("Deleted service '{name}'");
    Ok(())
}
