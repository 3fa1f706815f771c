use serde::{Deserialize, Deserializer};
use std::env;
use tracing::Level;
use super::{parse_env_var, SettingsError};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
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

/// 로그 출력 대상
///
/// 표준 출력은 엔트리포인트 JSON 결과에 쓰이므로 로그는 표준 에러로 보냅니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogOutput {
    #[default]
    Stderr,
    File(String),
}

impl std::str::FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("stderr") {
            Ok(LogOutput::Stderr)
        } else if s.is_empty() {
            Err("Empty log output".to_string())
        } else {
            Ok(LogOutput::File(s.to_string()))
        }
    }
}

impl<'de> Deserialize<'de> for LogOutput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub format: LogFormat,
    pub level: Level,
    pub output: LogOutput,
}

impl LogSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            format: parse_env_var("PROXY_LOG_FORMAT", || LogFormat::Text)?,
            level: parse_log_level(env::var("PROXY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()))?,
            output: parse_env_var("PROXY_LOG_OUTPUT", || LogOutput::Stderr)?,
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

fn parse_log_level(level: String) -> Result<Level, SettingsError> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        _ => Err(SettingsError::EnvVarInvalid {
            var_name: "PROXY_LOG_LEVEL".to_string(),
            value: level,
            reason: "유효하지 않은 로그 레벨".to_string(),
        }),
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
            output: LogOutput,
        }

        let helper = Helper::deserialize(deserializer)?;
        let level = parse_log_level(helper.level).map_err(serde::de::Error::custom)?;

        Ok(LogSettings {
            format: helper.format,
            level,
            output: helper.output,
        })
    }
}

fn default_log_level_string() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_output_from_str() {
        assert_eq!("stderr".parse::<LogOutput>(), Ok(LogOutput::Stderr));
        assert_eq!("STDERR".parse::<LogOutput>(), Ok(LogOutput::Stderr));
        assert_eq!(
            "/var/log/rproxy.log".parse::<LogOutput>(),
            Ok(LogOutput::File("/var/log/rproxy.log".to_string()))
        );
        assert!("".parse::<LogOutput>().is_err());
    }

    #[test]
    fn test_deserialize_log_settings() {
        let settings: LogSettings = toml::from_str(
            r#"
            format = "json"
            level = "DEBUG"
            output = "proxy.log"
            "#,
        )
        .unwrap();

        assert_eq!(settings.format, LogFormat::Json);
        assert_eq!(settings.level, Level::DEBUG);
        assert_eq!(settings.output, LogOutput::File("proxy.log".to_string()));
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let result: Result<LogSettings, _> = toml::from_str(r#"level = "loud""#);
        assert!(result.is_err());
    }
}
