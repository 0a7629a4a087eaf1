//! Config command - print the effective configuration

use anyhow::Result;
use tally_config::Config;

pub fn run(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&effective(config))?);
    Ok(())
}

fn effective(config: &Config) -> serde_json::Value {
    serde_json::json!({
        "mode": config.mode(),
        "verbose": config.verbose(),
        "color": config.color(),
        "projectRoot": config.project_root().map(|p| p.display().to_string()),
    })
}
