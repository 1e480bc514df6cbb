use bell_dns_domain::{CliOverrides, Config};

/// Loads and validates; logging is not up yet, so failures surface through the error.
pub fn load_config(config_path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}
