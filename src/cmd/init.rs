use anyhow::Result;
use serde_json::json;

use vitalboard::models::config::Config;
use vitalboard::output;

pub fn run(force: bool) -> Result<()> {
    let path = Config::path();
    let existed = path.exists();

    if existed && !force {
        // Re-save to fill in any keys added since the file was written
        let config = Config::load()?;
        config.save()?;
    } else {
        Config::default().save()?;
    }
    tracing::info!(path = %path.display(), existed, force, "config initialized");

    let out = output::success(
        "init",
        json!({
            "path": path.display().to_string(),
            "message": "Config initialized",
            "overwritten": existed && force,
        }),
    );
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}
