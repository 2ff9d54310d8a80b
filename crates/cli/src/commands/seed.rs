//! Seed dataset commands.

use std::path::Path;

use marketdeck_api::store::seed::DEMO_SEED_JSON;

/// Write the embedded demo dataset to `out`.
///
/// The file round-trips: edit it and point `SEED_PATH` at it to serve a
/// custom dataset.
pub fn export(out: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // Re-serialize to catch fixture drift before writing
    let parsed: serde_json::Value = serde_json::from_str(DEMO_SEED_JSON)?;
    std::fs::write(out, serde_json::to_string_pretty(&parsed)?)?;

    tracing::info!("Demo dataset written to {}", out.display());
    Ok(())
}
