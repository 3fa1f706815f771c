use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

use crate::settings::{LogFormat, LogOutput, LogSettings, SettingsError};

/// 로깅 설정에 따라 전역 subscriber를 설치합니다.
///
/// 반환되는 `WorkerGuard`는 프로그램 종료 시까지 유지해야 버퍼에 남은 로그가
/// 기록됩니다.
pub fn init_logging(settings: &LogSettings) -> Result<WorkerGuard, SettingsError> {
    let filter = EnvFilter::from_default_env().add_directive(settings.level.into());

    let (writer, guard) = match &settings.output {
        LogOutput::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        LogOutput::File(path) => {
            let path = Path::new(path);
            let file_name = path.file_name().ok_or_else(|| SettingsError::FileError {
                path: path.to_string_lossy().to_string(),
                error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "로그 파일 이름이 없습니다",
                ),
            })?;
            let directory = path.parent().unwrap_or_else(|| Path::new("."));
            tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name))
        }
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let result = match settings.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    // 이미 subscriber가 설치된 경우(테스트 등)는 무시
    if let Err(e) = result {
        eprintln!("로깅 초기화 생략: {}", e);
    }

    Ok(guard)
}
