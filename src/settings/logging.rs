use serde::{Deserialize, Deserializer};
use std::env;
use tracing::Level;
use super::{parse_env_var, SettingsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogOutput {
    #[default]
    Stdout,
    File(String),
}

impl std::str::FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("stdout") {
            Ok(LogOutput::Stdout)
        } else if s.is_empty() {
            Err("빈 로그 출력 경로".to_string())
        } else {
            Ok(LogOutput::File(s.to_string()))
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogSettings {
    pub format: LogFormat,
    pub level: Level,
    pub output: LogOutput,
}

impl LogSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let level = env::var("PROXY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        Ok(Self {
            format: parse_env_var("PROXY_LOG_FORMAT", LogFormat::default)?,
            level: parse_log_level(&level).ok_or_else(|| SettingsError::EnvVarInvalid {
                var_name: "PROXY_LOG_LEVEL".to_string(),
                value: level.clone(),
                reason: "유효하지 않은 로그 레벨".to_string(),
            })?,
            output: parse_env_var("PROXY_LOG_OUTPUT", LogOutput::default)?,
        })
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: Level::INFO,
            output: LogOutput::default(),
        }
    }
}

fn parse_log_level(level: &str) -> Option<Level> {
    match level.to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for LogSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default)]
            format: LogFormat,
            #[serde(default = "default_log_level_string")]
            level: String,
            #[serde(default)]
            output: Option<String>,
        }

        let helper = Helper::deserialize(deserializer)?;
        let level = parse_log_level(&helper.level).ok_or_else(|| {
            serde::de::Error::custom(format!("유효하지 않은 로그 레벨: {}", helper.level))
        })?;
        let output = match helper.output {
            Some(output) => output.parse().map_err(serde::de::Error::custom)?,
            None => LogOutput::Stdout,
        };

        Ok(LogSettings {
            format: helper.format,
            level,
            output,
        })
    }
}

fn default_log_level_string() -> String {
    "info".to_string()
}
