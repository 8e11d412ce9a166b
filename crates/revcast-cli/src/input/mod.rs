pub mod file;
pub mod stdin;

use revcast_core::Configuration;

/// Load the run configuration from `--config <path>` or, failing that,
/// from piped stdin.
pub fn load_config(path: Option<&str>) -> Result<Configuration, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_json(path);
    }
    if let Some(config) = stdin::read_json()? {
        return Ok(config);
    }
    Err("--config <file.json> or piped stdin required".into())
}
