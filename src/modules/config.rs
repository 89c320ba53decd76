use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::AppConfig;

const DATA_DIR: &str = ".club_gateway";
const CONFIG_FILE: &str = "gateway_config.json";

pub const ENV_CONFIG_PATH: &str = "CLUB_GATEWAY_CONFIG";
pub const ENV_UPSTREAM_URL: &str = "CLUB_GATEWAY_UPSTREAM_URL";
pub const ENV_PORT: &str = "CLUB_GATEWAY_PORT";
pub const ENV_ALLOW_LAN: &str = "CLUB_GATEWAY_ALLOW_LAN";
pub const ENV_TIMEOUT_SECS: &str = "CLUB_GATEWAY_TIMEOUT_SECS";

/// Get data directory path, creating it if needed
pub fn get_data_dir() -> AppResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AppError::Config("Failed to get user home directory".to_string()))?;
    let data_dir = home.join(DATA_DIR);

    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }

    Ok(data_dir)
}

/// Config file location: `CLUB_GATEWAY_CONFIG` if set, else the data directory.
pub fn config_path() -> AppResult<PathBuf> {
    match std::env::var(ENV_CONFIG_PATH) {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(get_data_dir()?.join(CONFIG_FILE)),
    }
}

/// Load application config: file, then environment overrides, then validation.
///
/// Read once at startup; the result is treated as immutable afterwards.
pub fn load_app_config() -> AppResult<AppConfig> {
    let path = config_path()?;
    let mut config = load_app_config_from(&path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config
        .gateway
        .validate()
        .map_err(AppError::Config)?;
    Ok(config)
}

/// Load config from a file. A missing file yields the defaults.
pub fn load_app_config_from(path: &Path) -> AppResult<AppConfig> {
    if !path.exists() {
        tracing::info!("Config file {:?} not found, using defaults", path);
        return Ok(AppConfig::new());
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> AppResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let gateway = &mut config.gateway;

    if let Some(url) = lookup(ENV_UPSTREAM_URL).filter(|v| !v.trim().is_empty()) {
        gateway.upstream_base_url = url.trim().to_string();
    }
    if let Some(port) = lookup(ENV_PORT) {
        gateway.port = port
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} is not a valid port: {}", ENV_PORT, port)))?;
    }
    if let Some(allow) = lookup(ENV_ALLOW_LAN) {
        gateway.allow_lan_access = matches!(allow.trim(), "1" | "true" | "yes");
    }
    if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
        gateway.request_timeout = timeout.trim().parse().map_err(|_| {
            AppError::Config(format!(
                "{} is not a number of seconds: {}",
                ENV_TIMEOUT_SECS, timeout
            ))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("club_gateway_{}.json", uuid::Uuid::new_v4().simple()))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_app_config_from(&temp_path()).unwrap();
        assert_eq!(config.gateway.port, 8046);
        assert!(config.gateway.upstream_base_url.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_path();
        fs::write(
            &path,
            r#"{"gateway":{"upstream_base_url":"https://api.example.com/api","port":9100}}"#,
        )
        .unwrap();

        let loaded = load_app_config_from(&path).unwrap();
        assert_eq!(loaded.gateway.upstream_base_url, "https://api.example.com/api");
        assert_eq!(loaded.gateway.port, 9100);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let path = temp_path();
        fs::write(&path, "{ not json").unwrap();
        let err = load_app_config_from(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::new();
        apply_env_overrides(
            &mut config,
            env(&[
                (ENV_UPSTREAM_URL, " http://backend:8000 "),
                (ENV_PORT, "9000"),
                (ENV_ALLOW_LAN, "true"),
                (ENV_TIMEOUT_SECS, "5"),
            ]),
        )
        .unwrap();

        assert_eq!(config.gateway.upstream_base_url, "http://backend:8000");
        assert_eq!(config.gateway.port, 9000);
        assert!(config.gateway.allow_lan_access);
        assert_eq!(config.gateway.request_timeout, 5);
        assert!(config.gateway.validate().is_ok());
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = AppConfig::new();
        let err = apply_env_overrides(&mut config, env(&[(ENV_PORT, "eighty")])).unwrap_err();
        assert!(err.to_string().contains(ENV_PORT));
    }
}
