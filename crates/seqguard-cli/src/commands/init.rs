use std::path::Path;

use seqguard_core::GuardConfig;

pub fn init(path: &str) -> anyhow::Result<()> {
    let output = Path::new(path).join("seqguard.toml");
    if output.exists() {
        anyhow::bail!("{} already exists", output.display());
    }

    let config = GuardConfig::scaffold();
    std::fs::write(&output, config.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}
