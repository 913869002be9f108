use anyhow::Result;
use flowscrub_config::{Config, PROJECT_FILE};
use std::path::Path;

pub fn handle(cwd: &Path) -> Result<()> {
    let path = cwd.join(PROJECT_FILE);

    if path.exists() {
        anyhow::bail!("{} already exists in current directory", PROJECT_FILE);
    }

    Config::default().save(&path)?;

    println!("✓ Created {}", PROJECT_FILE);
    println!("  Edit `inputs` to list the workflow exports to sanitize");

    Ok(())
}
