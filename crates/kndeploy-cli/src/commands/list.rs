use super::Session;
use kndeploy_cloud::ServiceList;

pub async fn list(session: &Session) -> anyhow::Result<()> {
    match session.cluster().list_all(&session.transcript).await? {
        ServiceList::Empty => println!("No services found"),
        ServiceList::Services(services) => {
            for (i, info) in services.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{info}");
            }
        }
    }
    Ok(())
}
