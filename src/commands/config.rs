use crate::config::Config;
use crate::error::{PustakaError, Result};

/// Print the effective configuration with the token redacted.
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;
    println!("base_url: {}", config.base_url);
    println!("timeout_secs: {}", config.timeout_secs);
    println!(
        "token: {}",
        if config.token().is_some() {
            "[set]"
        } else {
            "[not set]"
        }
    );
    Ok(())
}

/// Set a configuration key and persist it.
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    match key {
        "base_url" => {
            // Validate eagerly so a typo fails here, not on first request.
            let _: url::Url = value.parse()?;
            config.base_url = value.to_string();
        }
        "token" => config.set_token(value.to_string()),
        "timeout_secs" => {
            config.timeout_secs = value
                .parse()
                .map_err(|_| PustakaError::Config(format!("invalid timeout: {}", value)))?;
        }
        _ => {
            return Err(PustakaError::Config(format!(
                "unknown key '{}' (expected base_url, token, or timeout_secs)",
                key
            )));
        }
    }
    config.save()?;
    println!("{} updated", key);
    Ok(())
}
