use super::{Session, prompt};

pub async fn describe(session: &Session, name: Option<String>) -> anyhow::Result<()> {
    let name = prompt::ask("service name", name)?;

    let info = session
        .cluster()
        .describe(&name, &session.transcript)
        .await?;

    println!("{info}");
    Ok(())
}
