use std::{env, fs};
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;

#[derive(Deserialize)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize)]
pub struct DBConfig {
    pub db_path: String,
}

#[derive(Deserialize)]
pub struct WeatherApi {
    pub endpoint: String,
    pub access_key: String,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: String,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub web_server: WebServer,
    pub db: DBConfig,
    pub weather_api: WeatherApi,
    pub general: General,
}

/// Reads the config file and sets up logging
///
/// The path is taken from the first program argument, then from the `WEATHER_CONFIG`
/// environment variable, and falls back to `config.toml`.
pub fn config() -> Result<Config, ConfigError> {
    let path = config_path(env::args().nth(1), env::var("WEATHER_CONFIG").ok());

    let config = load_config(&path)?;
    setup_logger(&config.general.log_path, &config.general.log_level, config.general.log_to_stdout)?;

    Ok(config)
}

/// Picks the config path, an explicit argument wins over the environment
///
/// # Arguments
///
/// * 'arg' - first program argument, if any
/// * 'var' - value of `WEATHER_CONFIG`, if set
fn config_path(arg: Option<String>, var: Option<String>) -> String {
    arg.or(var).unwrap_or_else(|| "config.toml".to_string())
}

/// Loads and parses the given TOML config file
///
/// # Arguments
///
/// * 'config_path' - path to the config file
fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    if config.weather_api.access_key.trim().is_empty() {
        return Err(ConfigError::from("weather_api.access_key must not be empty"));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONFIG: &str = r#"
[web_server]
bind_address = "127.0.0.1"
bind_port = 8080

[db]
db_path = "weather.db"

[weather_api]
endpoint = "https://api.weatherstack.com/current"
access_key = "KEY"

[general]
log_path = "log/weather.log"
log_level = "debug"
log_to_stdout = true
"#;

    fn write_temp(name: &str, contents: &str) -> String {
        let path = env::temp_dir().join(format!("{}-{}.toml", name, std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn loads_all_sections() {
        let path = write_temp("weather-config-ok", CONFIG);
        let config = load_config(&path).unwrap();

        assert_eq!(config.web_server.bind_port, 8080);
        assert_eq!(config.db.db_path, "weather.db");
        assert_eq!(config.weather_api.endpoint, "https://api.weatherstack.com/current");
        assert_eq!(config.general.log_level, "debug");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn empty_access_key_is_rejected() {
        let path = write_temp("weather-config-nokey", &CONFIG.replace("\"KEY\"", "\"\""));
        let err = load_config(&path).err().unwrap();

        assert!(err.to_string().contains("access_key"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn config_path_precedence() {
        assert_eq!(config_path(Some("a.toml".into()), Some("b.toml".into())), "a.toml");
        assert_eq!(config_path(None, Some("b.toml".into())), "b.toml");
        assert_eq!(config_path(None, None), "config.toml");
    }

    #[test]
    fn missing_file_is_config_error() {
        assert!(load_config("/nonexistent/weather.toml").is_err());
    }
}
