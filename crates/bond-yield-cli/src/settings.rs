use bond_yield_core::EngineConfig;
use tracing::debug;

use crate::input;

/// Load the engine configuration from a TOML file, or fall back to the
/// defaults when no path is given. The result is validated either way.
pub fn load_engine_config(path: Option<&str>) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => {
            let canonical = input::file::resolve_path(path)?;
            let contents = input::file::read_to_string(&canonical)?;
            debug!(path = %canonical.display(), "loading engine configuration");
            toml::from_str::<EngineConfig>(&contents)
                .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
        }
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
