use std::{env, path::Path};
use serde::Deserialize;
use tracing::{debug, info};
use crate::entrypoints::EntryPoints;

pub mod logging;
mod error;

pub use logging::{LogFormat, LogOutput, LogSettings};
pub use error::SettingsError;

pub type Result<T> = std::result::Result<T, SettingsError>;

/// `PROXY_ENTRYPOINTS`에서 표현식을 구분하는 문자
pub const ENTRYPOINTS_SEPARATOR: char = ';';

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    /// 엔트리포인트 표현식 목록 (`"Name:http Address::80"` 형식)
    #[serde(default)]
    pub entry_points: Vec<String>,
}

pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(name: &str, default: F) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}

impl Settings {
    pub async fn load() -> Result<Self> {
        if let Ok(config_path) = env::var("PROXY_CONFIG_FILE") {
            Self::from_toml_file(&config_path).await
        } else {
            Self::from_env()
        }
    }

    pub async fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        debug!("설정 파일 로드: {}", path_ref.display());

        let content = tokio::fs::read_to_string(path_ref).await.map_err(|e| SettingsError::FileError {
            path: path_ref.to_string_lossy().to_string(),
            error: e,
        })?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::ParseError { source: e })?;

        info!(
            entry_points = settings.entry_points.len(),
            "설정 파일 로드 완료: {}", path_ref.display()
        );
        Ok(settings)
    }

    pub fn from_env() -> Result<Self> {
        let entry_points = env::var("PROXY_ENTRYPOINTS")
            .map(|raw| split_expressions(&raw))
            .unwrap_or_default();

        Ok(Self {
            logging: LogSettings::from_env()?,
            entry_points,
        })
    }

    /// 모든 표현식을 엔트리포인트 컬렉션으로 변환합니다.
    ///
    /// 하나라도 실패하면 첫 번째 실패를 반환합니다. 실패한 표현식만 건너뛰려면
    /// [`EntryPoints::from_expressions`]를 사용하세요.
    pub fn build_entry_points(&self) -> Result<EntryPoints> {
        let mut entry_points = EntryPoints::new();

        for expression in &self.entry_points {
            entry_points.set(expression).map_err(|e| SettingsError::EntryPoint {
                expression: expression.clone(),
                source: e,
            })?;
        }

        Ok(entry_points)
    }
}

/// `;`로 구분된 표현식을 나누고 빈 항목은 버립니다.
fn split_expressions(raw: &str) -> Vec<String> {
    raw.split(ENTRYPOINTS_SEPARATOR)
        .map(str::trim)
        .filter(|expression| !expression.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_toml_str() {
        let toml_content = r#"
            entry_points = [
                "Name:http Address::80 Redirect.EntryPoint:https",
                "Name:https Address::443 TLS:cert.pem,key.pem",
            ]

            [logging]
            format = "json"
            level = "warn"
        "#;

        let settings: Settings = toml::from_str(toml_content).unwrap();
        assert_eq!(settings.entry_points.len(), 2);
        assert_eq!(settings.logging.format, LogFormat::Json);

        let entry_points = settings.build_entry_points().unwrap();
        assert_eq!(entry_points.len(), 2);
        assert_eq!(
            entry_points.get("http").unwrap().redirect.as_ref().unwrap().entry_point,
            "https"
        );
    }

    #[test]
    fn test_build_entry_points_reports_expression() {
        let settings = Settings {
            entry_points: vec!["Address::80".to_string()],
            ..Default::default()
        };

        match settings.build_entry_points() {
            Err(SettingsError::EntryPoint { expression, .. }) => assert_eq!(expression, "Address::80"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_split_expressions() {
        assert_eq!(
            split_expressions(" Name:a Address::80 ;; Name:b ; "),
            vec!["Name:a Address::80", "Name:b"]
        );
        assert!(split_expressions("").is_empty());
    }
}
