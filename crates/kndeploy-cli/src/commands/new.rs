use kndeploy_build::quickstart;
use std::path::Path;

/// Scaffold the sample app into a new directory.
pub fn new_project(dir: &Path) -> anyhow::Result<()> {
    let written = quickstart::scaffold(dir)?;

    println!("Created project '{}'", dir.display());
    for path in &written {
        println!("  {}", path.display());
    }
    println!();
    println!("  cd {}", dir.display());
    println!("  kndeploy deploy --registry <registry> --image <name>");

    Ok(())
}
