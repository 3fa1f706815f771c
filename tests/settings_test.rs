use rproxy_entrypoints::settings::{LogFormat, LogOutput, Settings, SettingsError};
use std::sync::Once;

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;  // 환경 변수 테스트 격리

    static INIT: Once = Once::new();

    fn setup() {
        INIT.call_once(|| {
            cleanup_env();
        });
    }

    fn teardown() {
        cleanup_env();
    }

    fn cleanup_env() {
        std::env::remove_var("PROXY_CONFIG_FILE");
        std::env::remove_var("PROXY_ENTRYPOINTS");
        std::env::remove_var("PROXY_LOG_FORMAT");
        std::env::remove_var("PROXY_LOG_LEVEL");
        std::env::remove_var("PROXY_LOG_OUTPUT");
    }

    // 테스트용 임시 TOML 파일 생성 헬퍼
    fn create_test_toml(content: &str) -> (String, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");
        std::fs::write(&file_path, content).unwrap();
        (file_path.to_str().unwrap().to_string(), dir)
    }

    #[tokio::test]
    #[serial]
    async fn test_settings_defaults() {
        setup();

        let settings = Settings::load().await.unwrap();

        assert!(settings.entry_points.is_empty());
        assert_eq!(settings.logging.format, LogFormat::Text);
        assert_eq!(settings.logging.level, tracing::Level::INFO);
        assert_eq!(settings.logging.output, LogOutput::Stderr);
        assert!(settings.build_entry_points().unwrap().is_empty());
        teardown();
    }

    #[tokio::test]
    #[serial]
    async fn test_settings_from_env() {
        setup();

        std::env::set_var(
            "PROXY_ENTRYPOINTS",
            "Name:http Address::80 Redirect.EntryPoint:https; Name:https Address::443 TLS",
        );
        std::env::set_var("PROXY_LOG_FORMAT", "json");
        std::env::set_var("PROXY_LOG_LEVEL", "debug");
        std::env::set_var("PROXY_LOG_OUTPUT", "/tmp/rproxy.log");

        let settings = Settings::load().await.unwrap();
        assert_eq!(settings.entry_points.len(), 2);
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.level, tracing::Level::DEBUG);
        assert_eq!(
            settings.logging.output,
            LogOutput::File("/tmp/rproxy.log".to_string())
        );

        let entry_points = settings.build_entry_points().unwrap();
        assert_eq!(entry_points.names().collect::<Vec<_>>(), vec!["http", "https"]);
        assert_eq!(entry_points.get("https").unwrap().address, ":443");
        teardown();
    }

    #[tokio::test]
    #[serial]
    async fn test_settings_validation() {
        setup();

        // 1. 잘못된 로그 레벨
        std::env::set_var("PROXY_LOG_LEVEL", "invalid_level");
        assert!(Settings::from_env().is_err());
        teardown();

        // 2. 잘못된 로그 형식
        std::env::set_var("PROXY_LOG_FORMAT", "xml");
        assert!(matches!(
            Settings::from_env(),
            Err(SettingsError::EnvVarInvalid { .. })
        ));
        teardown();

        // 3. 이름 없는 표현식은 로드는 되지만 변환에서 실패
        std::env::set_var("PROXY_ENTRYPOINTS", "Address::80");
        let settings = Settings::from_env().unwrap();
        assert!(matches!(
            settings.build_entry_points(),
            Err(SettingsError::EntryPoint { .. })
        ));
        teardown();
    }

    #[tokio::test]
    #[serial]
    async fn test_settings_from_toml() {
        setup();

        let toml_content = r#"
            entry_points = [
                "Name:web Address::80 ForwardedHeaders.TrustedIPs:10.0.0.0/8",
                "Name:websecure Address::443 TLS:cert.pem,key.pem Auth.Basic.Users:a:h1,b:h2",
            ]

            [logging]
            format = "json"
            level = "warn"
        "#;

        let (file_path, _temp_dir) = create_test_toml(toml_content);
        std::env::set_var("PROXY_CONFIG_FILE", &file_path);

        let settings = Settings::load().await.unwrap();
        assert_eq!(settings.logging.level, tracing::Level::WARN);

        let entry_points = settings.build_entry_points().unwrap();
        let web = entry_points.get("web").unwrap();
        assert!(!web.forwarded_headers.insecure);
        assert_eq!(web.forwarded_headers.trusted_ips, vec!["10.0.0.0/8"]);

        let websecure = entry_points.get("websecure").unwrap();
        assert_eq!(
            websecure.auth.as_ref().unwrap().basic.as_ref().unwrap().users,
            vec!["a:h1", "b:h2"]
        );
        teardown();
    }

    #[tokio::test]
    #[serial]
    async fn test_settings_missing_file() {
        setup();

        let result = Settings::from_toml_file("/nonexistent/rproxy.toml").await;
        assert!(matches!(result, Err(SettingsError::FileError { .. })));
        teardown();
    }

    #[tokio::test]
    #[serial]
    async fn test_settings_invalid_toml() {
        setup();

        let (file_path, _temp_dir) = create_test_toml("entry_points = \"Name:web\"");
        let result = Settings::from_toml_file(&file_path).await;
        assert!(matches!(result, Err(SettingsError::ParseError { .. })));
        teardown();
    }
}
